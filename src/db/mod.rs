pub mod audit;
pub mod content_types;
pub mod pool;
pub mod projects;
pub mod schema;

pub use content_types::ContentTypeCache;
pub use pool::{create_pool, run_migrations, MIGRATOR};
