//! AI conversion endpoints

use axum::extract::State;
use tracing::error;

use crate::api::state::AppState;
use crate::api::types::{ActionResponse, ApiError, FormFields, Json};
use crate::domain::conversion::{GherkinToScriptInput, ManualToGherkinInput};

const HIGHLIGHTED_FIELDS: &str = "Please correct the highlighted fields.";
const GHERKIN_FAILED: &str = "Error converting to Gherkin.";
const SCRIPT_FAILED: &str = "Error generating test script.";

/// POST /v1/convert/manual-to-gherkin
pub async fn manual_to_gherkin(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Json<ActionResponse<String>>, ApiError> {
    let input: ManualToGherkinInput = fields.validate(HIGHLIGHTED_FIELDS)?;

    let output = state
        .conversions
        .convert_manual_to_gherkin(&input)
        .await
        .map_err(|e| {
            error!(error = %e, "Error converting manual tests to Gherkin");
            ApiError::conversion(GHERKIN_FAILED, &e)
        })?;

    Ok(Json(ActionResponse::success(output.generated_gherkin)))
}

/// POST /v1/convert/gherkin-to-script
pub async fn gherkin_to_script(
    State(state): State<AppState>,
    fields: FormFields,
) -> Result<Json<ActionResponse<String>>, ApiError> {
    let input: GherkinToScriptInput = fields.validate(HIGHLIGHTED_FIELDS)?;

    let output = state
        .conversions
        .convert_gherkin_to_script(&input)
        .await
        .map_err(|e| {
            error!(error = %e, "Error converting Gherkin to test script");
            ApiError::conversion(SCRIPT_FAILED, &e)
        })?;

    Ok(Json(ActionResponse::success(output.test_script)))
}
