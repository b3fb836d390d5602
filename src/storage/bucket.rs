// S3 compatible bucket resolution

use crate::{
    config::StorageConfig,
    errors::{AppError, Result},
    observability::health::BucketResolver,
    storage::sigv4::{self, Credentials},
};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Url};
use std::time::Duration;

/// A bucket that answered a signed `HEAD` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketHandle {
    pub name: String,
    pub url: Url,
}

/// Resolves the configured bucket against an S3 compatible endpoint
pub struct S3BucketResolver {
    client: Client,
    config: StorageConfig,
}

impl S3BucketResolver {
    pub fn new(config: StorageConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("Invalid storage client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Path-style URL of the bucket, e.g. `http://minio:9000/qfieldcloud-local`
    pub fn bucket_url(&self) -> Result<Url> {
        bucket_url(&self.config.endpoint_url, &self.config.bucket_name)
    }

    async fn head_bucket(&self) -> Result<BucketHandle> {
        if self.config.access_key_id.is_empty() || self.config.secret_access_key.is_empty() {
            return Err(AppError::StorageUnavailable(
                "Storage credentials are not configured".to_string(),
            ));
        }

        let url = self.bucket_url()?;
        let host = host_header(&url)?;
        let signed = sigv4::sign_empty_payload(
            "HEAD",
            &host,
            url.path(),
            &Credentials {
                access_key_id: &self.config.access_key_id,
                secret_access_key: &self.config.secret_access_key,
                region: &self.config.region,
            },
            Utc::now(),
        );

        let response = self
            .client
            .head(url.clone())
            .header("authorization", signed.authorization)
            .header("x-amz-content-sha256", signed.content_sha256)
            .header("x-amz-date", signed.amz_date)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::StorageUnavailable(format!(
                "HEAD {} returned {}",
                url, status
            )));
        }

        Ok(BucketHandle {
            name: self.config.bucket_name.clone(),
            url,
        })
    }
}

#[async_trait]
impl BucketResolver for S3BucketResolver {
    async fn resolve_bucket(&self) -> Result<BucketHandle> {
        self.head_bucket().await
    }
}

fn bucket_url(endpoint_url: &str, bucket_name: &str) -> Result<Url> {
    if bucket_name.is_empty() {
        return Err(AppError::StorageUnavailable(
            "Storage bucket name is not configured".to_string(),
        ));
    }

    let mut url = Url::parse(endpoint_url).map_err(|e| {
        AppError::StorageUnavailable(format!("Invalid storage endpoint {}: {}", endpoint_url, e))
    })?;

    url.path_segments_mut()
        .map_err(|_| {
            AppError::StorageUnavailable(format!("Invalid storage endpoint {}", endpoint_url))
        })?
        .pop_if_empty()
        .push(bucket_name);

    Ok(url)
}

// Must match the Host header reqwest sends.
fn host_header(url: &Url) -> Result<String> {
    let host = url.host_str().ok_or_else(|| {
        AppError::StorageUnavailable(format!("Storage endpoint {} has no host", url))
    })?;

    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
