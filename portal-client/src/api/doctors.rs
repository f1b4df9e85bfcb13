use portal_common::{
    catalog::{Doctor, DoctorDraft},
    MessageBody,
};

use super::record_path;
use crate::http::{ApiResponse, HttpClient, Result};

/// Psychologists available for consultation bookings
/// # Errors
/// See [HttpClient::get]
pub async fn get_all_doctors(client: &HttpClient) -> Result<ApiResponse<Vec<Doctor>>> {
    client.get("/getpilihdokterpsikolog").await
}

/// # Errors
/// See [HttpClient::get]
pub async fn get_doctor(client: &HttpClient, id: i64) -> Result<ApiResponse<Doctor>> {
    client.get(&record_path("/getpilihdokterpsikolog", id)).await
}

/// # Errors
/// See [HttpClient::post]
pub async fn create_doctor(client: &HttpClient, doctor: &DoctorDraft) -> Result<ApiResponse<MessageBody>> {
    client.post("/createpilihdokterpsikolog", doctor).await
}

/// # Errors
/// See [HttpClient::put]
pub async fn update_doctor(
    client: &HttpClient,
    id: i64,
    doctor: &DoctorDraft,
) -> Result<ApiResponse<MessageBody>> {
    client
        .put(&record_path("/updatepilihdokterpsikolog", id), doctor)
        .await
}

/// # Errors
/// See [HttpClient::delete]
pub async fn delete_doctor(client: &HttpClient, id: i64) -> Result<ApiResponse<MessageBody>> {
    client
        .delete(&record_path("/deletepilihdokterpsikolog", id))
        .await
}
