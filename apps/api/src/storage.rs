//! Blob storage: fetching the master résumé by URL and storing new uploads.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use reqwest::Client;
use tracing::{info, warn};

use crate::errors::AppError;

/// Retrieves a stored document by its URL.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, AppError>;
}

/// Plain HTTP GET. One attempt; any non-2xx is a storage failure.
#[derive(Clone, Default)]
pub struct HttpDocumentFetcher {
    client: Client,
}

impl HttpDocumentFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to fetch document: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Document fetch returned {status}");
            return Err(AppError::Storage(format!(
                "Document fetch returned status {status}"
            )));
        }

        response
            .bytes()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to read document body: {e}")))
    }
}

/// Writes master résumés to the S3 bucket and hands back their public URL.
#[derive(Clone)]
pub struct ResumeStorage {
    s3: aws_sdk_s3::Client,
    bucket: String,
    public_url: String,
}

impl ResumeStorage {
    pub fn new(s3: aws_sdk_s3::Client, bucket: String, public_url: String) -> Self {
        Self {
            s3,
            bucket,
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Uploads a PDF and returns the URL it is served from. Each user has one
    /// object, so a new upload replaces the previous résumé in place.
    pub async fn upload_master_resume(&self, user_id: &str, pdf: Bytes) -> Result<String, AppError> {
        let key = resume_key(user_id);

        self.s3
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(pdf))
            .content_type("application/pdf")
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded master resume to s3://{}/{}", self.bucket, key);
        Ok(format!("{}/{}", self.public_url, key))
    }
}

fn resume_key(user_id: &str) -> String {
    format!("resumes/{user_id}/master.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_resume_key_is_stable_per_user() {
        assert_eq!(resume_key("user_2abc"), "resumes/user_2abc/master.pdf");
        assert_eq!(resume_key("user_2abc"), resume_key("user_2abc"));
        assert_ne!(resume_key("user_2abc"), resume_key("user_9xyz"));
    }

    #[tokio::test]
    async fn test_fetch_bytes_returns_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/resumes/u1/r.pdf");
                then.status(200).body("%PDF-1.4 body");
            })
            .await;

        let bytes = HttpDocumentFetcher::new()
            .fetch_bytes(&server.url("/resumes/u1/r.pdf"))
            .await
            .unwrap();

        assert_eq!(&bytes[..], b"%PDF-1.4 body");
    }

    #[tokio::test]
    async fn test_fetch_missing_document_is_storage_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gone.pdf");
                then.status(404);
            })
            .await;

        let err = HttpDocumentFetcher::new()
            .fetch_bytes(&server.url("/gone.pdf"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Storage(_)));
    }
}
