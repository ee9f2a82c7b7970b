use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use herberg_core::{NewReview, Review, ReviewPatch};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/places/{place_id}/reviews",
            get(list_reviews_for_place).post(create_review),
        )
        .route("/users/{user_id}/reviews", get(list_reviews_by_user))
        .route(
            "/reviews/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
}

/// POST /places/{place_id}/reviews - Reviews are created against a place.
async fn create_review(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
    Json(new): Json<NewReview>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let review = state.directory.create_review(&place_id, new)?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn list_reviews_for_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.directory.reviews_for_place(&place_id)?))
}

async fn list_reviews_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    Ok(Json(state.directory.reviews_by_user(&user_id)?))
}

async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Review>, ApiError> {
    Ok(Json(state.directory.review(&id)?))
}

async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ReviewPatch>,
) -> Result<Json<Review>, ApiError> {
    Ok(Json(state.directory.update_review(&id, patch)?))
}

async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.directory.delete_review(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
