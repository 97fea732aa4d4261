use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{jobs, probes, root, tags};
use super::state::AppState;
use crate::conf::Settings;

pub fn build_routes(state: AppState, conf: &Settings) -> Router {
    let api = Router::new()
        .route("/jobs", post(jobs::create))
        .route("/jobs/search", get(jobs::search))
        .route("/jobs/{job_id}", get(jobs::get))
        .route("/tags", post(tags::create))
        .route("/tags/categories", get(tags::categories))
        .route("/tags/by-category/{category}", get(tags::by_category));

    let app = if conf.api_prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&conf.api_prefix, api)
    };

    app.route("/", get(root::welcome))
        .route("/healthz", get(probes::healthz))
        .route("/livez", get(probes::livez))
        .layer(cors_layer(conf))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(conf: &Settings) -> CorsLayer {
    let origin = match conf.allowed_origins() {
        None => AllowOrigin::from(Any),
        Some(origins) => {
            let values: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        tracing::warn!(origin = %o, "ignoring malformed cors origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
