pub mod amenities;
pub mod cities;
pub mod countries;
pub mod health;
pub mod places;
pub mod reviews;
pub mod users;

use axum::Router;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(countries::routes())
        .merge(cities::routes())
        .merge(amenities::routes())
        .merge(users::routes())
        .merge(places::routes())
        .merge(reviews::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
