use portal_common::{
    booking::{NewPayment, Payment},
    MessageBody,
};

use super::record_path;
use crate::http::{ApiResponse, HttpClient, Result};

/// # Errors
/// See [HttpClient::post]
pub async fn create_payment(client: &HttpClient, payment: &NewPayment) -> Result<ApiResponse<MessageBody>> {
    client.post("/payment", payment).await
}

/// # Errors
/// See [HttpClient::get]
pub async fn get_payment(client: &HttpClient, id: i64) -> Result<ApiResponse<Payment>> {
    client.get(&record_path("/payment", id)).await
}

/// Mark a payment as received. Admin only on the server side.
/// # Errors
/// See [HttpClient::put_empty]
pub async fn confirm_payment(client: &HttpClient, id: i64) -> Result<ApiResponse<MessageBody>> {
    client
        .put_empty(&format!("{}/confirm", record_path("/payment", id)))
        .await
}
