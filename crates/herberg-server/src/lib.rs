//! Herberg Server - Axum HTTP layer over the directory service.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::create_router;
pub use state::AppState;

use herberg_core::Country;

/// The fixed country set established at process start. Not mutable via the
/// API.
pub fn seed_countries() -> Vec<Country> {
    vec![
        Country::new("United States", "US"),
        Country::new("Canada", "CA"),
        Country::new("Mexico", "MX"),
    ]
}
