//! Region resolution and drop zone provisioning

use aws_sdk_s3::{
    error::DisplayErrorContext,
    types::{
        BucketLocationConstraint, BucketVersioningStatus, CreateBucketConfiguration,
        PublicAccessBlockConfiguration, VersioningConfiguration,
    },
    Client,
};
use tracing::{debug, info, warn};

use super::error::service_error_code;
use super::{BucketError, BucketResult};

/// Region S3 reports as an empty location constraint
pub const DEFAULT_REGION: &str = "us-east-1";

/// Outcome of a drop zone creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropZoneCreation {
    /// A new private, versioned bucket was created
    Created,
    /// The bucket already exists in the caller's account
    AlreadyOwned,
}

/// Result of looking up where a bucket lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RegionLookup {
    Found(String),
    Missing,
}

/// Maps a `GetBucketLocation` constraint onto a region name
#[must_use]
pub fn normalize_location(constraint: Option<&str>) -> String {
    match constraint.map(str::trim) {
        None | Some("") => DEFAULT_REGION,
        // Legacy alias still returned for old Ireland buckets
        Some("EU") => "eu-west-1",
        Some(region) => region,
    }
    .to_string()
}

/// Looks up the region of `bucket`
///
/// Lookup failures other than a missing bucket fall back to [`DEFAULT_REGION`].
pub(crate) async fn lookup_region(client: &Client, bucket: &str) -> RegionLookup {
    debug!("Looking up region of bucket: {bucket}");

    match client.get_bucket_location().bucket(bucket).send().await {
        Ok(output) => RegionLookup::Found(normalize_location(
            output
                .location_constraint()
                .map(BucketLocationConstraint::as_str),
        )),
        Err(e) if service_error_code(&e) == Some("NoSuchBucket") => {
            debug!("Bucket does not exist: {bucket}");
            RegionLookup::Missing
        }
        Err(e) => {
            warn!(
                "Could not determine region of {bucket}, assuming {DEFAULT_REGION}: {}",
                DisplayErrorContext(&e)
            );
            RegionLookup::Found(DEFAULT_REGION.to_string())
        }
    }
}

/// Creates `bucket` in `region`, blocks public access and enables versioning
///
/// `client` must be configured for `region`.
pub(crate) async fn create_drop_zone(
    client: &Client,
    bucket: &str,
    region: &str,
) -> BucketResult<DropZoneCreation> {
    info!("Creating drop zone {bucket} in {region}");

    let mut request = client.create_bucket().bucket(bucket);
    if region != DEFAULT_REGION {
        request = request.create_bucket_configuration(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build(),
        );
    }

    if let Err(e) = request.send().await {
        return match service_error_code(&e) {
            Some("BucketAlreadyOwnedByYou") => {
                info!("Drop zone {bucket} already exists in this account");
                Ok(DropZoneCreation::AlreadyOwned)
            }
            Some("BucketAlreadyExists") => Err(BucketError::BucketNameTaken(bucket.to_string())),
            Some("AccessDenied") => Err(BucketError::PermissionDenied(bucket.to_string())),
            _ => Err(BucketError::CreateFailed(DisplayErrorContext(&e).to_string())),
        };
    }

    secure_drop_zone(client, bucket).await?;

    info!("Created drop zone {bucket} in {region}");
    Ok(DropZoneCreation::Created)
}

async fn secure_drop_zone(client: &Client, bucket: &str) -> BucketResult<()> {
    debug!("Blocking public access for {bucket}");
    client
        .put_public_access_block()
        .bucket(bucket)
        .public_access_block_configuration(
            PublicAccessBlockConfiguration::builder()
                .block_public_acls(true)
                .ignore_public_acls(true)
                .block_public_policy(true)
                .restrict_public_buckets(true)
                .build(),
        )
        .send()
        .await
        .map_err(|e| match service_error_code(&e) {
            Some("AccessDenied") => BucketError::PermissionDenied(bucket.to_string()),
            _ => BucketError::CreateFailed(format!(
                "could not block public access: {}",
                DisplayErrorContext(&e)
            )),
        })?;

    debug!("Enabling versioning for {bucket}");
    client
        .put_bucket_versioning()
        .bucket(bucket)
        .versioning_configuration(
            VersioningConfiguration::builder()
                .status(BucketVersioningStatus::Enabled)
                .build(),
        )
        .send()
        .await
        .map_err(|e| match service_error_code(&e) {
            Some("AccessDenied") => BucketError::PermissionDenied(bucket.to_string()),
            _ => BucketError::CreateFailed(format!(
                "could not enable versioning: {}",
                DisplayErrorContext(&e)
            )),
        })?;

    Ok(())
}
