pub mod bucket;
pub mod sigv4;

pub use bucket::{BucketHandle, S3BucketResolver};
