pub mod project;

pub use project::ProjectRole;
