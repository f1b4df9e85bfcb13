use portal_common::{
    catalog::{Service, ServiceCategory, ServiceDraft},
    MessageBody,
};

use super::record_path;
use crate::http::{ApiResponse, HttpClient, Result};

/// # Errors
/// See [HttpClient::get]
pub async fn get_all_services(client: &HttpClient) -> Result<ApiResponse<Vec<Service>>> {
    client.get("/getlayanan").await
}

/// Services of a single vertical, filtered by the server
/// # Errors
/// See [HttpClient::get_with_query]
pub async fn get_services_by_category(
    client: &HttpClient,
    category: ServiceCategory,
) -> Result<ApiResponse<Vec<Service>>> {
    client
        .get_with_query("/getlayanan", &[("kategori", category.as_ref())])
        .await
}

/// # Errors
/// See [HttpClient::get]
pub async fn get_service(client: &HttpClient, id: i64) -> Result<ApiResponse<Service>> {
    client.get(&record_path("/getlayanan", id)).await
}

/// # Errors
/// See [HttpClient::post]
pub async fn create_service(client: &HttpClient, service: &ServiceDraft) -> Result<ApiResponse<MessageBody>> {
    client.post("/createlayanan", service).await
}

/// # Errors
/// See [HttpClient::put]
pub async fn update_service(
    client: &HttpClient,
    id: i64,
    service: &ServiceDraft,
) -> Result<ApiResponse<MessageBody>> {
    client.put(&record_path("/updatelayanan", id), service).await
}

/// # Errors
/// See [HttpClient::delete]
pub async fn delete_service(client: &HttpClient, id: i64) -> Result<ApiResponse<MessageBody>> {
    client.delete(&record_path("/deletelayanan", id)).await
}
