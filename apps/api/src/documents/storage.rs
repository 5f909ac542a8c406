use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// Object key for an uploaded resume. The file name is reduced to a safe
/// character set so user input never shapes the key's path.
pub fn original_key(analysis_id: Uuid, file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = safe.trim_start_matches('.');
    let safe = if safe.is_empty() { "resume.pdf" } else { safe };
    format!("resumes/{analysis_id}/{safe}")
}

/// Uploads the original PDF and returns its object key.
pub async fn store_original(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    analysis_id: Uuid,
    file_name: &str,
    bytes: Bytes,
) -> Result<String, AppError> {
    let key = original_key(analysis_id, file_name);
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(bytes))
        .content_type("application/pdf")
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Upload of {key} failed: {e}")))?;

    info!("Uploaded resume to s3://{}/{}", bucket, key);
    Ok(key)
}

/// Removes an uploaded original whose analysis record was never written.
pub async fn delete_original(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<(), AppError> {
    s3.delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Delete of {key} failed: {e}")))?;

    info!("Removed orphaned upload s3://{}/{}", bucket, key);
    Ok(())
}
