//! v1 API endpoints

pub mod convert;

use axum::{routing::post, Router};

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/convert/manual-to-gherkin", post(convert::manual_to_gherkin))
        .route("/convert/gherkin-to-script", post(convert::gherkin_to_script))
}
