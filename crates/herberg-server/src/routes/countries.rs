use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use herberg_core::{City, Country};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/countries", get(list_countries))
        .route("/countries/{code}", get(get_country))
        .route("/countries/{code}/cities", get(list_cities_in_country))
}

/// GET /countries - The pre-loaded country set.
async fn list_countries(State(state): State<AppState>) -> Json<Vec<Country>> {
    Json(state.directory.countries().to_vec())
}

async fn get_country(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Country>, ApiError> {
    Ok(Json(state.directory.country(&code)?))
}

async fn list_cities_in_country(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<City>>, ApiError> {
    Ok(Json(state.directory.cities_in(&code)?))
}
