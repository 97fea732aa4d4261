use std::path::Path;
use std::sync::Arc;

use jobboard::{
    conf::settings,
    pkg::{
        internal::{
            seed::{self, JobDocument, TagDocument},
            store::PgStore,
        },
        server::state::db_pool,
    },
    prelude::Result,
};

pub async fn apply(tags: &Path, jobs: &Path, reset: bool) -> Result<()> {
    let tags: TagDocument = seed::read_document(tags).await?;
    let jobs: JobDocument = seed::read_document(jobs).await?;
    let store = PgStore::new(Arc::new(db_pool(&settings)?));
    let summary = seed::import(&store, &tags, &jobs, reset).await?;
    tracing::info!(
        tags = summary.tags_created,
        jobs = summary.jobs_created,
        "data imported successfully"
    );
    Ok(())
}
