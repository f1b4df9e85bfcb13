use portal_common::{
    catalog::{Workshop, WorkshopDraft},
    MessageBody,
};

use super::record_path;
use crate::http::{ApiResponse, HttpClient, Result};

/// # Errors
/// See [HttpClient::get]
pub async fn get_all_workshops(client: &HttpClient) -> Result<ApiResponse<Vec<Workshop>>> {
    client.get("/bengkel").await
}

/// # Errors
/// See [HttpClient::get]
pub async fn get_workshop(client: &HttpClient, id: i64) -> Result<ApiResponse<Workshop>> {
    client.get(&record_path("/bengkel", id)).await
}

/// # Errors
/// See [HttpClient::post]
pub async fn create_workshop(client: &HttpClient, workshop: &WorkshopDraft) -> Result<ApiResponse<MessageBody>> {
    client.post("/bengkel", workshop).await
}

/// # Errors
/// See [HttpClient::put]
pub async fn update_workshop(
    client: &HttpClient,
    id: i64,
    workshop: &WorkshopDraft,
) -> Result<ApiResponse<MessageBody>> {
    client.put(&record_path("/bengkel", id), workshop).await
}

/// # Errors
/// See [HttpClient::delete]
pub async fn delete_workshop(client: &HttpClient, id: i64) -> Result<ApiResponse<MessageBody>> {
    client.delete(&record_path("/bengkel", id)).await
}
