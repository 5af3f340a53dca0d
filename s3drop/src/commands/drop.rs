use crate::bucket::{BucketClient, UploadRequest};
use crate::cli::DropArgs;
use crate::report;
use crate::types::AppError;

use super::share::deliver_share_link;

pub(super) async fn run(client: &BucketClient, args: &DropArgs) -> Result<(), AppError> {
    let request = UploadRequest::from_path(&args.file, args.key.as_deref())?;

    println!(
        "📤 Dropping {} ({})",
        request.path.display(),
        report::format_megabytes(request.size)
    );
    client.upload(&request).await?;
    println!(
        "✅ Drop successful: s3://{}/{}",
        client.bucket_name(),
        request.key
    );

    if args.share {
        deliver_share_link(client, &request.key, &args.link).await?;
    }

    Ok(())
}
