pub mod health;
pub mod projects;
pub mod routes;

pub use routes::{create_router, AppState};
