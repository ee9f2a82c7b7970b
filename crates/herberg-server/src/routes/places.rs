use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use herberg_core::{NewPlace, Place, PlacePatch};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/places", get(list_places).post(create_place))
        .route(
            "/places/{id}",
            get(get_place).put(update_place).delete(delete_place),
        )
}

async fn create_place(
    State(state): State<AppState>,
    Json(new): Json<NewPlace>,
) -> Result<(StatusCode, Json<Place>), ApiError> {
    let place = state.directory.create_place(new)?;
    tracing::debug!("Created place {}", place.id);
    Ok((StatusCode::CREATED, Json(place)))
}

async fn list_places(State(state): State<AppState>) -> Result<Json<Vec<Place>>, ApiError> {
    Ok(Json(state.directory.places()?))
}

async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Place>, ApiError> {
    Ok(Json(state.directory.place(&id)?))
}

async fn update_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<PlacePatch>,
) -> Result<Json<Place>, ApiError> {
    Ok(Json(state.directory.update_place(&id, patch)?))
}

async fn delete_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.directory.delete_place(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
