use portal_common::{
    catalog::{Product, ProductDraft},
    MessageBody,
};

use super::record_path;
use crate::http::{ApiResponse, HttpClient, Result};

/// # Errors
/// See [HttpClient::get]
pub async fn get_all_products(client: &HttpClient) -> Result<ApiResponse<Vec<Product>>> {
    client.get("/getproduk").await
}

/// # Errors
/// See [HttpClient::get]
pub async fn get_product(client: &HttpClient, id: i64) -> Result<ApiResponse<Product>> {
    client.get(&record_path("/getproduk", id)).await
}

/// # Errors
/// See [HttpClient::post]
pub async fn create_product(client: &HttpClient, product: &ProductDraft) -> Result<ApiResponse<MessageBody>> {
    client.post("/createproduk", product).await
}

/// # Errors
/// See [HttpClient::put]
pub async fn update_product(
    client: &HttpClient,
    id: i64,
    product: &ProductDraft,
) -> Result<ApiResponse<MessageBody>> {
    client.put(&record_path("/updateproduk", id), product).await
}

/// # Errors
/// See [HttpClient::delete]
pub async fn delete_product(client: &HttpClient, id: i64) -> Result<ApiResponse<MessageBody>> {
    client.delete(&record_path("/deleteproduk", id)).await
}
