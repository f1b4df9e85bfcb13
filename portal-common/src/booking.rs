//! Bookings, payments and the admin transaction ledger

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString, IntoStaticStr};

/// Lifecycle of a booking as tracked by the server
#[derive(
    Serialize, Deserialize, EnumString, IntoStaticStr, AsRefStr, PartialEq, Eq, Debug, Copy, Clone,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Booking form payload. Only the references relevant to the chosen vertical are set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub service_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<i64>,
    /// Requested appointment time as sent by the booking form
    pub scheduled_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    #[serde(flatten)]
    pub request: NewBooking,
    pub status: BookingStatus,
}

/// Body of a booking status change made from the back office
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

#[derive(
    Serialize, Deserialize, EnumString, IntoStaticStr, AsRefStr, PartialEq, Eq, Debug, Copy, Clone,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Rejected,
}

/// Payment submission for a booking. `proof_image` is the url returned by the image upload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub booking_id: i64,
    pub amount: f64,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_image: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i64,
    #[serde(flatten)]
    pub request: NewPayment,
    pub status: PaymentStatus,
}

/// Row of the admin transaction listing
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub booking_id: i64,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    pub amount: f64,
    pub status: PaymentStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Result of an image upload
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub url: String,
    #[serde(default)]
    pub msg: Option<String>,
}
