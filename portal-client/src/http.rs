//! Single configured client for all server communication. Every request goes through
//! [HttpClient::execute] which injects the bearer token and applies the global 401 handling.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use portal_common::MessageBody;
pub use reqwest::Method;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::{auth::AuthContext, config::ClientConfig};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to reach the server. {0}")]
    Transport(String),
    #[error("Request failed with status {status}")]
    Status {
        status: u16,
        data: Option<serde_json::Value>,
    },
    #[error("Response body cannot be processed. {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Request body cannot be encoded. {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Request was cancelled")]
    Cancelled,
}

impl Error {
    /// HTTP status of a response error
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human readable text sent by the server with an error response, if any
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Status {
                data: Some(data), ..
            } => MessageBody::from_value(data),
            _ => None,
        }
    }
}

/// Successful response with its decoded body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
}

/// File sent as a single multipart field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartUpload {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl MultipartUpload {
    fn into_form(self) -> Result<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)
            .map_err(|error| Error::Transport(error.to_string()))?;
        Ok(Form::new().part(self.field, part))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    /// Serialized JSON document
    Json(Vec<u8>),
    /// Multipart payload. The content type header is left to the transport so it can add the
    /// boundary.
    Multipart(MultipartUpload),
}

/// Fully prepared request handed to a [Transport]
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// When false a 401 is an ordinary rejection of the submitted credentials and the stored
    /// session is left alone
    pub expires_session: bool,
}

impl Request {
    /// Value of the first header named `name`, ignoring case
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and raw body of a server response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Network layer under the [HttpClient]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and collect the full response. Non 2xx responses are not errors at this
    /// level.
    async fn send(&self, request: Request) -> Result<RawResponse>;
}

/// [Transport] backed by a pooled [reqwest::Client]
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout`
    /// # Errors
    /// This function will return an error if the TLS backend cannot be initialized
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::Transport(error.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<RawResponse> {
        let mut builder = self.client.request(request.method, request.url.as_str());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder.body(bytes),
            RequestBody::Multipart(upload) => builder.multipart(upload.into_form()?),
        };
        let response = builder
            .send()
            .await
            .map_err(|error| Error::Transport(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|error| Error::Transport(error.to_string()))?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[derive(Clone)]
pub struct HttpClient {
    base_url: Arc<str>,
    transport: Arc<dyn Transport>,
    auth: AuthContext,
}

impl HttpClient {
    pub fn new<U: Into<String>>(base_url: U, transport: Arc<dyn Transport>, auth: AuthContext) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
            transport,
            auth,
        }
    }

    /// Create a client talking to [ClientConfig::api_url] over [ReqwestTransport]
    /// # Errors
    /// This function will return an error if the transport cannot be built
    pub fn from_config(config: &ClientConfig, auth: AuthContext) -> Result<Self> {
        let transport = ReqwestTransport::new(config.request_timeout)?;
        Ok(Self::new(config.api_url.as_str(), Arc::new(transport), auth))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// # Errors
    /// See [HttpClient::execute]
    pub async fn get<T>(&self, path: &str) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        self.get_with_query(path, &[]).await
    }

    /// # Errors
    /// See [HttpClient::execute]
    pub async fn get_with_query<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let mut request = self.request(Method::GET, path, RequestBody::Empty);
        request.query = query
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        self.execute(request).await
    }

    /// # Errors
    /// See [HttpClient::execute]. Also fails if `body` cannot be serialized.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path, json_body(body)?);
        self.execute(request).await
    }

    /// # Errors
    /// See [HttpClient::execute]. Also fails if `body` cannot be serialized.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path, json_body(body)?);
        self.execute(request).await
    }

    /// PUT without a body, for state transitions addressed entirely by the path
    /// # Errors
    /// See [HttpClient::execute]
    pub async fn put_empty<T>(&self, path: &str) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path, RequestBody::Empty);
        self.execute(request).await
    }

    /// POST credentials to an auth endpoint. A 401 here means the credentials were wrong, so it
    /// does not expire the session already stored.
    /// # Errors
    /// See [HttpClient::execute]. Also fails if `body` cannot be serialized.
    pub async fn submit_credentials<B, T>(&self, path: &str, body: &B) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.request(Method::POST, path, json_body(body)?);
        request.expires_session = false;
        self.execute(request).await
    }

    /// # Errors
    /// See [HttpClient::execute]
    pub async fn delete<T>(&self, path: &str) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::DELETE, path, RequestBody::Empty);
        self.execute(request).await
    }

    /// # Errors
    /// See [HttpClient::execute]
    pub async fn post_multipart<T>(&self, path: &str, upload: MultipartUpload) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path, RequestBody::Multipart(upload));
        self.execute(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Prepare a request for `path`, attaching the stored bearer token when there is one
    fn request(&self, method: Method, path: &str, body: RequestBody) -> Request {
        let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
        if matches!(body, RequestBody::Json(_)) {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        if let Some(token) = self.auth.token() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        Request {
            method,
            url: self.url(path),
            headers,
            query: Vec::new(),
            body,
            expires_session: true,
        }
    }

    /// Send `request` and decode a 2xx body into `T`. A 401 response expires the stored session
    /// before the error is returned.
    /// # Errors
    /// This function will return an error if the transport fails, the server responds with a non
    /// 2xx status or the body cannot be decoded into `T`
    async fn execute<T>(&self, request: Request) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let label = format!("{} {}", request.method, request.url);
        let expires_session = request.expires_session;
        log::debug!("Sending {label}");
        let response = match self.transport.send(request).await {
            Ok(inner) => inner,
            Err(error) => {
                log::warn!("{label} failed. {error}");
                return Err(error);
            }
        };
        if response.status == 401 && expires_session {
            log::warn!("{label} was rejected as unauthorized");
            self.auth.expire();
        }
        if !(200..300).contains(&response.status) {
            log::debug!("{label} responded with {}", response.status);
            return Err(Error::Status {
                status: response.status,
                data: serde_json::from_slice(&response.body).ok(),
            });
        }
        let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &response.body
        };
        let data = serde_json::from_slice(body).map_err(Error::Decode)?;
        Ok(ApiResponse {
            data,
            status: response.status,
        })
    }
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody> {
    serde_json::to_vec(body)
        .map(RequestBody::Json)
        .map_err(Error::Encode)
}

#[cfg(test)]
mod test {
    use portal_common::{role::Role, MessageBody};
    use rstest::rstest;
    use serde_json::json;

    use super::{Error, Method, MockTransport, MultipartUpload, RequestBody};
    use crate::{
        auth::{TOKEN_KEY, USER_KEY},
        router::{Navigator, Page},
        session::SessionPhase,
        storage::{MemoryStorage, Storage},
        testing::{harness, json_response, logged_in_storage, raw_response, Harness, API_URL},
    };

    #[tokio::test]
    async fn requests_should_carry_bearer_token_when_stored() -> Result<(), Error> {
        let harness = harness(logged_in_storage(Role::User), Page::UserDashboard);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.header("authorization") == Some("Bearer token-123")
                    && request.url == format!("{API_URL}/getbooking")
                    && request.method == Method::GET
            })
            .times(1)
            .returning(|_| Ok(json_response(200, json!([]))));
        let client = harness.client(transport);

        let response = client.get::<Vec<serde_json::Value>>("/getbooking").await?;

        assert_eq!(response.status, 200);
        assert!(response.data.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn requests_should_omit_bearer_token_when_anonymous() -> Result<(), Error> {
        let harness = harness(MemoryStorage::new(), Page::Home);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.header("Authorization").is_none())
            .times(1)
            .returning(|_| Ok(json_response(200, json!([]))));
        let client = harness.client(transport);

        client.get::<Vec<serde_json::Value>>("getlayanan").await?;
        Ok(())
    }

    #[tokio::test]
    async fn json_bodies_should_declare_content_type() -> Result<(), Error> {
        let harness = harness(MemoryStorage::new(), Page::Register);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.header("Content-Type") == Some("application/json")
                    && request.body == RequestBody::Json(br#"{"name":"Budi"}"#.to_vec())
            })
            .times(1)
            .returning(|_| Ok(json_response(201, json!({ "msg": "created" }))));
        let client = harness.client(transport);

        let response = client
            .post::<_, MessageBody>("/register", &json!({ "name": "Budi" }))
            .await?;

        assert_eq!(response.status, 201);
        assert_eq!(response.data.text(), Some("created"));
        Ok(())
    }

    #[tokio::test]
    async fn multipart_bodies_should_leave_content_type_to_transport() -> Result<(), Error> {
        let harness = harness(logged_in_storage(Role::Admin), Page::AdminServices);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.header("Content-Type").is_none()
                    && request.header("Authorization").is_some()
                    && matches!(&request.body, RequestBody::Multipart(upload) if upload.field == "image")
            })
            .times(1)
            .returning(|_| Ok(json_response(200, json!({ "url": "/uploads/a.png" }))));
        let client = harness.client(transport);
        let upload = MultipartUpload {
            field: "image".to_owned(),
            file_name: "a.png".to_owned(),
            mime: "image/png".to_owned(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        };

        client
            .post_multipart::<serde_json::Value>("/upload/image", upload)
            .await?;
        Ok(())
    }

    #[tokio::test]
    async fn empty_success_body_should_decode_as_unit() -> Result<(), Error> {
        let harness = harness(MemoryStorage::new(), Page::Home);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(raw_response(204, "")));
        let client = harness.client(transport);

        let response = client.delete::<()>("/deletelayanan/3").await?;

        assert_eq!(response.status, 204);
        Ok(())
    }

    #[rstest]
    #[case(400, json!({ "message": "Nama wajib diisi" }), Some("Nama wajib diisi"))]
    #[case(404, json!({ "msg": "Data tidak ditemukan" }), Some("Data tidak ditemukan"))]
    #[case(500, json!("boom"), None)]
    #[tokio::test]
    async fn error_status_should_carry_server_body(
        #[case] status: u16,
        #[case] body: serde_json::Value,
        #[case] message: Option<&str>,
    ) {
        let harness = harness(logged_in_storage(Role::User), Page::UserDashboard);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(move |_| Ok(json_response(status, body.clone())));
        let client = harness.client(transport);

        let error = client
            .get::<serde_json::Value>("/getlayanan")
            .await
            .expect_err("Non 2xx status should fail");

        assert_eq!(error.status(), Some(status));
        assert_eq!(error.server_message().as_deref(), message);
        assert!(harness.storage.get(TOKEN_KEY).ok().flatten().is_some());
        assert_eq!(harness.history.visits(Page::Login), 0);
    }

    #[tokio::test]
    async fn undecodable_body_should_be_decode_error() {
        let harness = harness(MemoryStorage::new(), Page::Home);
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(raw_response(200, "<html>")));
        let client = harness.client(transport);

        let result = client.get::<Vec<serde_json::Value>>("/getdurasi").await;

        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[tokio::test]
    async fn unauthorized_response_should_expire_session() {
        let harness = harness(logged_in_storage(Role::Admin), Page::AdminTransactions);
        harness.auth.hydrate();
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(json_response(401, json!({ "message": "Token expired" }))));
        let client = harness.client(transport);

        let error = client
            .get::<serde_json::Value>("/admin/transactions")
            .await
            .expect_err("401 should fail");

        assert_eq!(error.status(), Some(401));
        assert_eq!(error.server_message().as_deref(), Some("Token expired"));
        assert_unauthorized_cleanup(&harness);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_unauthorized_responses_should_clear_once() {
        let harness = harness(logged_in_storage(Role::User), Page::UserDashboard);
        harness.auth.hydrate();
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(8)
            .returning(|_| Ok(json_response(401, json!({ "msg": "Unauthorized" }))));
        let client = harness.client(transport);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let client = client.clone();
                tokio::spawn(async move { client.get::<serde_json::Value>("/getbooking").await })
            })
            .collect();
        for result in futures::future::join_all(handles).await {
            let response = result.expect("Request task should not panic");
            assert_eq!(response.err().and_then(|e| e.status()), Some(401));
        }

        assert_unauthorized_cleanup(&harness);
    }

    #[tokio::test]
    async fn transport_failure_should_not_touch_session() {
        let harness = harness(logged_in_storage(Role::User), Page::UserDashboard);
        harness.auth.hydrate();
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(Error::Transport("connection refused".to_owned())));
        let client = harness.client(transport);

        let result = client.get::<serde_json::Value>("/getbooking").await;

        assert!(matches!(result, Err(Error::Transport(_))));
        assert_eq!(harness.auth.session().phase(), SessionPhase::Authenticated);
        assert_eq!(harness.history.visits(Page::Login), 0);
    }

    fn assert_unauthorized_cleanup(harness: &Harness) {
        assert_eq!(harness.storage.get(TOKEN_KEY).ok().flatten(), None);
        assert_eq!(harness.storage.get(USER_KEY).ok().flatten(), None);
        assert!(!harness.auth.session().is_authenticated);
        assert_eq!(harness.history.visits(Page::Login), 1);
        assert_eq!(harness.history.current().as_deref(), Some("/login"));
    }
}
