use portal_common::{
    booking::{Booking, BookingStatusUpdate, NewBooking},
    MessageBody,
};

use super::record_path;
use crate::http::{ApiResponse, HttpClient, Result};

/// Every booking, for the back office
/// # Errors
/// See [HttpClient::get]
pub async fn get_all_bookings(client: &HttpClient) -> Result<ApiResponse<Vec<Booking>>> {
    client.get("/getbooking").await
}

/// # Errors
/// See [HttpClient::get]
pub async fn get_booking(client: &HttpClient, id: i64) -> Result<ApiResponse<Booking>> {
    client.get(&record_path("/getbooking", id)).await
}

/// Bookings made by one user
/// # Errors
/// See [HttpClient::get]
pub async fn get_user_bookings(client: &HttpClient, user_id: i64) -> Result<ApiResponse<Vec<Booking>>> {
    client.get(&record_path("/getbooking/user", user_id)).await
}

/// # Errors
/// See [HttpClient::post]
pub async fn create_booking(client: &HttpClient, booking: &NewBooking) -> Result<ApiResponse<MessageBody>> {
    client.post("/createbooking", booking).await
}

/// # Errors
/// See [HttpClient::put]
pub async fn update_booking_status(
    client: &HttpClient,
    id: i64,
    update: &BookingStatusUpdate,
) -> Result<ApiResponse<MessageBody>> {
    client.put(&record_path("/updatebooking", id), update).await
}

/// # Errors
/// See [HttpClient::delete]
pub async fn delete_booking(client: &HttpClient, id: i64) -> Result<ApiResponse<MessageBody>> {
    client.delete(&record_path("/deletebooking", id)).await
}
