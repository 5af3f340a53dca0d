use crate::bucket::BucketClient;
use crate::report;
use crate::types::AppError;

pub(super) async fn run(client: &BucketClient) -> Result<(), AppError> {
    let objects = client.list_files().await?;
    print!("{}", report::file_listing(client.bucket_name(), &objects));
    Ok(())
}
