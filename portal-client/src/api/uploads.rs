use portal_common::booking::UploadedImage;

use crate::http::{ApiResponse, HttpClient, MultipartUpload, Result};

/// Multipart field the server reads the file from
const IMAGE_FIELD: &str = "image";

/// `POST /upload/image`. The returned url is what catalog records and payment proofs reference.
/// # Errors
/// See [HttpClient::post_multipart]
pub async fn upload_image(
    client: &HttpClient,
    file_name: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<ApiResponse<UploadedImage>> {
    let upload = MultipartUpload {
        field: IMAGE_FIELD.to_owned(),
        file_name: file_name.to_owned(),
        mime: mime.to_owned(),
        bytes,
    };
    client.post_multipart("/upload/image", upload).await
}
