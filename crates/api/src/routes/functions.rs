//! Registry listing.

use axum::extract::State;
use axum::Json;
use brain_core::FunctionSpec;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct FunctionList {
    pub functions: Vec<FunctionSpec>,
}

/// Every registered function with its schema and kind.
pub async fn list_functions(State(state): State<AppState>) -> Json<FunctionList> {
    Json(FunctionList {
        functions: state.orchestrator.specs().to_vec(),
    })
}
