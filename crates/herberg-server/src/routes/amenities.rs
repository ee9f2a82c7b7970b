use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use herberg_core::{Amenity, AmenityPatch, NewAmenity};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/amenities", get(list_amenities).post(create_amenity))
        .route(
            "/amenities/{id}",
            get(get_amenity).put(update_amenity).delete(delete_amenity),
        )
}

async fn create_amenity(
    State(state): State<AppState>,
    Json(new): Json<NewAmenity>,
) -> Result<(StatusCode, Json<Amenity>), ApiError> {
    let amenity = state.directory.create_amenity(new)?;
    Ok((StatusCode::CREATED, Json(amenity)))
}

async fn list_amenities(State(state): State<AppState>) -> Result<Json<Vec<Amenity>>, ApiError> {
    Ok(Json(state.directory.amenities()?))
}

async fn get_amenity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Amenity>, ApiError> {
    Ok(Json(state.directory.amenity(&id)?))
}

async fn update_amenity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<AmenityPatch>,
) -> Result<Json<Amenity>, ApiError> {
    Ok(Json(state.directory.update_amenity(&id, patch)?))
}

async fn delete_amenity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.directory.delete_amenity(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
