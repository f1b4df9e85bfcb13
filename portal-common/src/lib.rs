//! Data shared between the booking portal client and the REST API it consumes

use common::{error::PortalResult, validation};
use serde::{Deserialize, Serialize};

pub mod booking;
pub mod catalog;
pub mod role;

use crate::role::Role;

/// Login form payload
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new<E: Into<String>, P: Into<String>>(email: E, password: P) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check the form before it is sent
    /// # Errors
    /// This function will return an error if the email is not an address or the password is blank
    pub fn validate(&self) -> PortalResult<()> {
        validation::email("email", &self.email)?;
        validation::require("password", &self.password)
    }
}

/// Registration form payload. The role is never part of the request, the server assigns it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl RegisterRequest {
    /// Check the form before it is sent
    /// # Errors
    /// This function will return an error if any required field is blank, the email is not an
    /// address or the password is too short
    pub fn validate(&self) -> PortalResult<()> {
        validation::require("name", &self.name)?;
        validation::email("email", &self.email)?;
        validation::min_length(
            "password",
            &self.password,
            validation::MIN_PASSWORD_LENGTH,
        )
    }
}

/// Identity of a logged in portal user
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Body returned by `/login` and `/register`. A token and user are only present on a successful
/// login.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthResponse {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Plain acknowledgement or error body. Endpoints are inconsistent about the key used for the
/// human readable text so both are accepted.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl MessageBody {
    /// Text to display, preferring `message` over `msg`
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.msg.as_deref())
            .filter(|text| !text.trim().is_empty())
    }

    /// Pull the display text out of an arbitrary JSON error body
    pub fn from_value(value: &serde_json::Value) -> Option<String> {
        serde_json::from_value::<Self>(value.clone())
            .ok()
            .and_then(|body| body.text().map(str::to_owned))
    }
}
