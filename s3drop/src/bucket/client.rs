//! S3 bucket client implementation

use aws_config::SdkConfig;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::{
    config::Region,
    error::{DisplayErrorContext, SdkError},
    operation::head_object::HeadObjectError,
    presigning::PresigningConfig,
    primitives::ByteStream,
    types::Object,
    Client,
};
use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use super::error::{from_sdk_error, service_error_code};
use super::provision::{create_drop_zone, lookup_region, RegionLookup};
use super::{
    validate_drop_zone_name, BucketError, BucketResult, DropZoneCreation, ObjectSummary,
    ShareLink, UploadRequest, DEFAULT_REGION,
};
use crate::expiration::Expiration;
use crate::types::Environment;

/// S3 bucket client for drop zone operations
#[derive(Debug, Clone)]
pub struct BucketClient {
    client: Client,
    bucket_name: String,
    region: String,
    created: bool,
}

impl BucketClient {
    /// Connects to the drop zone, creating it when missing and `auto_create` is set
    ///
    /// The bucket's region is looked up once and the returned client is pinned to it.
    /// A missing bucket is created in the configured region, or [`DEFAULT_REGION`]
    /// when none is configured.
    ///
    /// # Errors
    ///
    /// Returns `BucketError::MissingCredentials` if no credentials resolve
    /// Returns `BucketError::BucketNotFound` if the bucket is missing and `auto_create` is off
    /// Returns the creation errors of [`BucketClient::provision`] when auto-creating
    pub async fn connect(
        sdk_config: &SdkConfig,
        environment: &Environment,
        bucket_name: &str,
        auto_create: bool,
    ) -> BucketResult<Self> {
        ensure_credentials(sdk_config).await?;

        let home_region = sdk_config
            .region()
            .map_or(DEFAULT_REGION, Region::as_ref)
            .to_string();
        let home_client = Client::from_conf(
            environment.s3_client_config(sdk_config, Some(Region::new(home_region.clone()))),
        );

        let (region, created) = match lookup_region(&home_client, bucket_name).await {
            RegionLookup::Found(region) => (region, false),
            RegionLookup::Missing if auto_create => {
                info!("Drop zone {bucket_name} not found, creating it in {home_region}");
                let creation = create_drop_zone(&home_client, bucket_name, &home_region).await?;
                (home_region.clone(), creation == DropZoneCreation::Created)
            }
            RegionLookup::Missing => {
                return Err(BucketError::BucketNotFound(bucket_name.to_string()));
            }
        };

        let client = if region == home_region {
            home_client
        } else {
            Client::from_conf(
                environment.s3_client_config(sdk_config, Some(Region::new(region.clone()))),
            )
        };

        info!("Initialized S3 bucket client for bucket: {bucket_name} in {region}");

        Ok(Self {
            client,
            bucket_name: bucket_name.to_string(),
            region,
            created,
        })
    }

    /// Creates a private, versioned drop zone named `bucket_name` in `region`
    ///
    /// # Errors
    ///
    /// Returns `BucketError::InvalidBucketName` if the name breaks the S3 naming rules
    /// Returns `BucketError::MissingCredentials` if no credentials resolve
    /// Returns `BucketError::BucketNameTaken` if another account owns the name
    /// Returns `BucketError::PermissionDenied` if bucket creation is not allowed
    /// Returns `BucketError::CreateFailed` for any other creation failure
    pub async fn provision(
        sdk_config: &SdkConfig,
        environment: &Environment,
        bucket_name: &str,
        region: &str,
    ) -> BucketResult<DropZoneCreation> {
        validate_drop_zone_name(bucket_name)?;
        ensure_credentials(sdk_config).await?;

        let client = Client::from_conf(
            environment.s3_client_config(sdk_config, Some(Region::new(region.to_string()))),
        );

        create_drop_zone(&client, bucket_name, region).await
    }

    /// Name of the drop zone bucket
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    /// Region the bucket lives in
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Whether [`BucketClient::connect`] created the bucket
    #[must_use]
    pub const fn was_created(&self) -> bool {
        self.created
    }

    /// Uploads a validated local file to its object key
    ///
    /// # Errors
    ///
    /// Returns `BucketError::UploadFailed` if the file cannot be read or S3 rejects it
    pub async fn upload(&self, request: &UploadRequest) -> BucketResult<()> {
        debug!(
            "Uploading {} to {}/{} ({} bytes)",
            request.path.display(),
            self.bucket_name,
            request.key,
            request.size
        );

        let body = ByteStream::from_path(&request.path).await.map_err(|e| {
            BucketError::UploadFailed(format!("Failed to read {}: {e}", request.path.display()))
        })?;

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&request.key)
            .content_type(mime::APPLICATION_OCTET_STREAM.as_ref())
            .body(body)
            .send()
            .await?;

        debug!("Uploaded object: {}", request.key);
        Ok(())
    }

    /// Checks if an object exists in the bucket
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if object exists
    /// * `Ok(false)` if object does not exist
    /// * `Err(BucketError)` if S3 operation fails
    ///
    /// # Errors
    ///
    /// Returns `BucketError::S3Error` for S3 service errors
    /// Returns `BucketError::UpstreamError` for 5xx errors
    pub async fn check_object_exists(&self, key: &str) -> BucketResult<bool> {
        debug!("Checking if object exists: {key}");

        let result = self
            .client
            .head_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(service_err))
                if matches!(service_err.err(), HeadObjectError::NotFound(_)) =>
            {
                Ok(false)
            }
            Err(SdkError::ServiceError(service_err))
                if service_err.raw().status().as_u16() >= 500 =>
            {
                error!("Upstream error checking object existence for {key}");
                Err(BucketError::UpstreamError(format!("{:?}", service_err.err())))
            }
            Err(e) => Err(BucketError::from(e)),
        }
    }

    /// Generates a presigned GET URL for an existing object
    ///
    /// # Errors
    ///
    /// Returns `BucketError::ObjectNotFound` if the key does not exist
    /// Returns `BucketError::BucketNotFound` if the bucket itself is gone
    /// Returns `BucketError::ConfigError` if presigning config creation fails
    /// Returns `BucketError::S3Error` if presigned URL generation fails
    pub async fn generate_share_link(
        &self,
        key: &str,
        expiration: Expiration,
    ) -> BucketResult<ShareLink> {
        if !self.check_object_exists(key).await? {
            // A bodiless HEAD 404 reads the same for a missing bucket and a missing key
            if lookup_region(&self.client, &self.bucket_name).await == RegionLookup::Missing {
                return Err(BucketError::BucketNotFound(self.bucket_name.clone()));
            }
            return Err(BucketError::ObjectNotFound(key.to_string()));
        }

        let presigned_config = PresigningConfig::expires_in(expiration.as_duration())
            .map_err(|e| {
                BucketError::ConfigError(format!("Failed to create presigning config: {e}"))
            })?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .presigned(presigned_config)
            .await
            .map_err(|e| {
                BucketError::S3Error(format!(
                    "Failed to generate presigned URL: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let expires_at = Utc::now() + expiration.as_time_delta();

        debug!("Generated share link for object: {key} expires at: {expires_at}");

        Ok(ShareLink {
            key: key.to_string(),
            url: presigned.uri().to_string(),
            expires_at,
        })
    }

    /// Lists every object in the bucket, following pagination
    ///
    /// # Errors
    ///
    /// Returns `BucketError::BucketNotFound` if the bucket disappeared
    /// Returns `BucketError::S3Error` or `BucketError::UpstreamError` for S3 failures
    pub async fn list_files(&self) -> BucketResult<Vec<ObjectSummary>> {
        debug!("Listing objects in bucket: {}", self.bucket_name);

        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket_name)
            .into_paginator()
            .send();

        let mut objects = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                if service_error_code(&e) == Some("NoSuchBucket") {
                    BucketError::BucketNotFound(self.bucket_name.clone())
                } else {
                    from_sdk_error("ListObjectsV2", &e)
                }
            })?;
            objects.extend(page.contents().iter().map(ObjectSummary::from));
        }

        debug!("Listed {} objects in {}", objects.len(), self.bucket_name);
        Ok(objects)
    }
}

impl From<&Object> for ObjectSummary {
    fn from(object: &Object) -> Self {
        Self {
            key: object.key().unwrap_or_default().to_string(),
            size: object
                .size()
                .and_then(|size| u64::try_from(size).ok())
                .unwrap_or_default(),
            last_modified: object
                .last_modified()
                .and_then(|time| DateTime::from_timestamp(time.secs(), time.subsec_nanos())),
        }
    }
}

/// Fails early when the provider chain yields no credentials
async fn ensure_credentials(sdk_config: &SdkConfig) -> BucketResult<()> {
    let provider = sdk_config.credentials_provider().ok_or_else(|| {
        BucketError::MissingCredentials("no credentials provider configured".to_string())
    })?;

    provider
        .provide_credentials()
        .await
        .map(|_| ())
        .map_err(|e| BucketError::MissingCredentials(DisplayErrorContext(&e).to_string()))
}
