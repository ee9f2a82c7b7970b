use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use herberg_core::{City, CityPatch, NewCity};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cities", get(list_cities).post(create_city))
        .route(
            "/cities/{id}",
            get(get_city).put(update_city).delete(delete_city),
        )
}

async fn create_city(
    State(state): State<AppState>,
    Json(new): Json<NewCity>,
) -> Result<(StatusCode, Json<City>), ApiError> {
    let city = state.directory.create_city(new)?;
    tracing::debug!("Created city {}", city.id);
    Ok((StatusCode::CREATED, Json(city)))
}

async fn list_cities(State(state): State<AppState>) -> Result<Json<Vec<City>>, ApiError> {
    Ok(Json(state.directory.cities()?))
}

async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<City>, ApiError> {
    Ok(Json(state.directory.city(&id)?))
}

async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CityPatch>,
) -> Result<Json<City>, ApiError> {
    Ok(Json(state.directory.update_city(&id, patch)?))
}

async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.directory.delete_city(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
