use portal_common::{MessageBody, User};

use super::record_path;
use crate::http::{ApiResponse, HttpClient, Result};

/// # Errors
/// See [HttpClient::get]
pub async fn get_all_users(client: &HttpClient) -> Result<ApiResponse<Vec<User>>> {
    client.get("/users").await
}

/// # Errors
/// See [HttpClient::get]
pub async fn get_user(client: &HttpClient, id: i64) -> Result<ApiResponse<User>> {
    client.get(&record_path("/users", id)).await
}

/// # Errors
/// See [HttpClient::delete]
pub async fn delete_user(client: &HttpClient, id: i64) -> Result<ApiResponse<MessageBody>> {
    client.delete(&record_path("/users", id)).await
}
