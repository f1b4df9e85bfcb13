use portal_common::booking::Transaction;

use crate::http::{ApiResponse, HttpClient, Result};

/// Back office transaction listing
/// # Errors
/// See [HttpClient::get]
pub async fn get_all_transactions(client: &HttpClient) -> Result<ApiResponse<Vec<Transaction>>> {
    client.get("/admin/transactions").await
}
