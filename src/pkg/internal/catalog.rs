use crate::pkg::internal::adaptors::tags::spec::{NewTag, TagCategory, TagEntry};
use crate::pkg::internal::store::JobStore;
use crate::prelude::{AppError, Result};

pub fn categories() -> Vec<&'static str> {
    TagCategory::ALL.iter().map(TagCategory::as_str).collect()
}

/// Names of every tag in `category`, in catalog order.
pub async fn tag_names(store: &dyn JobStore, category: &str) -> Result<Vec<String>> {
    let category: TagCategory = category.parse()?;
    let tags = store.tags_by_category(category).await?;
    Ok(tags.into_iter().map(|t| t.name).collect())
}

pub async fn create_tag(store: &dyn JobStore, tag: &NewTag) -> Result<TagEntry> {
    let category: TagCategory = tag.category.parse()?;
    let name = tag.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("tag name must not be empty".into()));
    }
    let created = store
        .create_tag(name, category, tag.description.as_deref())
        .await?;
    tracing::info!(name = %created.name, %category, "tag created");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::store::MemoryStore;

    #[test]
    fn test_categories_are_the_closed_set() {
        assert_eq!(
            categories(),
            vec!["role", "technology", "skill", "methodology", "tool"]
        );
    }

    #[tokio::test]
    async fn test_tag_names_by_category() {
        let store = MemoryStore::new();
        store.create_tag("python", TagCategory::Technology, None).await.unwrap();
        store.create_tag("backend", TagCategory::Skill, None).await.unwrap();
        store.create_tag("react", TagCategory::Technology, None).await.unwrap();

        assert_eq!(
            tag_names(&store, "technology").await.unwrap(),
            vec!["python", "react"]
        );
        assert!(tag_names(&store, "role").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tag_names_rejects_unknown_category() {
        let store = MemoryStore::new();
        let err = tag_names(&store, "invalid-category").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCategory(_)));
        assert_eq!(err.to_string(), "Invalid category: invalid-category");
    }

    #[tokio::test]
    async fn test_create_tag_validates_input() {
        let store = MemoryStore::new();
        let tag = |name: &str, category: &str| NewTag {
            name: name.into(),
            category: category.into(),
            description: None,
        };
        assert!(matches!(
            create_tag(&store, &tag("scrum", "process")).await,
            Err(AppError::InvalidCategory(_))
        ));
        assert!(matches!(
            create_tag(&store, &tag("  ", "tool")).await,
            Err(AppError::Validation(_))
        ));
        let created = create_tag(&store, &tag("scrum", "methodology")).await.unwrap();
        assert_eq!(created.category, TagCategory::Methodology);
        assert!(matches!(
            create_tag(&store, &tag("scrum", "methodology")).await,
            Err(AppError::Duplicate(_))
        ));
    }
}
