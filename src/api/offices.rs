//! Office API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::{done, success, ApiResult};
use crate::errors::AppError;
use crate::models::{messages, OfficeBody, OfficeRecord};
use crate::AppState;

/// GET /offices - List all offices, newest first.
pub async fn list_offices(State(state): State<AppState>) -> ApiResult<Vec<OfficeRecord>> {
    let offices = state.store.list();
    tracing::debug!("Listing {} offices", offices.len());
    success(messages::LISTED, offices)
}

/// POST /office - Create a new office.
pub async fn create_office(
    State(state): State<AppState>,
    payload: Result<Json<OfficeBody>, JsonRejection>,
) -> ApiResult<OfficeRecord> {
    let Json(body) = payload?;
    validate(&body)?;

    let office = state.store.insert(body);
    tracing::info!("Created office {}", office.id);
    success(messages::ADDED, office)
}

/// PUT /office/{id} - Replace every field of an office.
pub async fn update_office(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<OfficeBody>, JsonRejection>,
) -> ApiResult<()> {
    let Json(body) = payload?;
    validate(&body)?;

    match state.store.replace(&id, body) {
        Some(_) => {
            tracing::info!("Updated office {}", id);
            done(messages::UPDATED)
        }
        None => {
            tracing::warn!("Update for unknown office {}", id);
            Err(AppError::invalid_request())
        }
    }
}

/// DELETE /office/{id} - Delete an office.
///
/// Unknown ids still answer 200 unless strict deletes are configured.
pub async fn delete_office(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let removed = state.store.remove(&id);

    if !removed {
        if state.config.strict_delete {
            tracing::warn!("Delete for unknown office {}", id);
            return Err(AppError::NotFound(
                messages::NOT_FOUND_FOR_DELETION.to_string(),
            ));
        }
        tracing::debug!("Delete for unknown office {} ignored", id);
    } else {
        tracing::info!("Deleted office {}", id);
    }

    done(messages::DELETED)
}

fn validate(body: &OfficeBody) -> Result<(), AppError> {
    let missing = body.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}
