pub mod cache_reset;
pub mod request_metrics;

pub use cache_reset::clear_content_type_cache;
pub use request_metrics::track_request_metrics;
