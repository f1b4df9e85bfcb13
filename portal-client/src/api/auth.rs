use portal_common::{AuthResponse, Credentials, RegisterRequest};

use crate::http::{ApiResponse, HttpClient, Result};

/// `POST /login`
/// # Errors
/// See [HttpClient::submit_credentials]
pub async fn login(client: &HttpClient, credentials: &Credentials) -> Result<ApiResponse<AuthResponse>> {
    client.submit_credentials("/login", credentials).await
}

/// `POST /register`
/// # Errors
/// See [HttpClient::submit_credentials]
pub async fn register(client: &HttpClient, request: &RegisterRequest) -> Result<ApiResponse<AuthResponse>> {
    client.submit_credentials("/register", request).await
}
