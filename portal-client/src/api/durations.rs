use portal_common::{
    catalog::{Duration, DurationDraft},
    MessageBody,
};

use super::record_path;
use crate::http::{ApiResponse, HttpClient, Result};

/// # Errors
/// See [HttpClient::get]
pub async fn get_all_durations(client: &HttpClient) -> Result<ApiResponse<Vec<Duration>>> {
    client.get("/getdurasi").await
}

/// # Errors
/// See [HttpClient::post]
pub async fn create_duration(client: &HttpClient, duration: &DurationDraft) -> Result<ApiResponse<MessageBody>> {
    client.post("/createdurasi", duration).await
}

/// # Errors
/// See [HttpClient::put]
pub async fn update_duration(
    client: &HttpClient,
    id: i64,
    duration: &DurationDraft,
) -> Result<ApiResponse<MessageBody>> {
    client.put(&record_path("/updatedurasi", id), duration).await
}

/// # Errors
/// See [HttpClient::delete]
pub async fn delete_duration(client: &HttpClient, id: i64) -> Result<ApiResponse<MessageBody>> {
    client.delete(&record_path("/deletedurasi", id)).await
}
