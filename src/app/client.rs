use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::time::Duration;

use crate::app::handlers::ErrorResponse;
use crate::core::{RemoteCollection, Resource};
use crate::domain::auth::{AuthResponse, LoginCredentials, SignupRequest};
use crate::domain::model::{Department, Employee, EmployeeCountChange};
use crate::domain::records::{Attendance, LeaveRequest, Salary};
use crate::utils::error::{HrError, Result};
use crate::utils::validation::{validate_url, Validate};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Thin wrapper over the production HR backend.
///
/// Every resource call sends `Authorization: Bearer <token>`; without a token
/// the call fails with [`HrError::MissingToken`] before anything goes out.
#[derive(Debug, Clone)]
pub struct HrClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HrClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        validate_url("api_url", base_url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or(HrError::MissingToken)?;
        Ok(builder.bearer_auth(token))
    }

    pub async fn login(&mut self, credentials: &LoginCredentials) -> Result<AuthResponse> {
        credentials.validate()?;
        let response = self
            .client
            .post(self.url("auth/login"))
            .json(credentials)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("Login rejected with status {}", response.status());
            return Err(HrError::LoginFailed);
        }

        let auth: AuthResponse = response.json().await?;
        self.token = Some(auth.token.clone());
        tracing::info!("Logged in");
        Ok(auth)
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        request.validate()?;
        let response = self
            .client
            .post(self.url("auth/signup"))
            .json(request)
            .send()
            .await?;
        check(response, "sign up").await?;
        Ok(())
    }

    /// `true` only if the backend accepts the current token.
    pub async fn validate_session(&self) -> bool {
        let Ok(request) = self.authorized(self.client.get(self.url("auth/validate"))) else {
            return false;
        };
        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Session validation failed: {}", e);
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    pub fn employees(&self) -> ResourceClient<'_, Employee> {
        ResourceClient::new(self)
    }

    pub fn departments(&self) -> ResourceClient<'_, Department> {
        ResourceClient::new(self)
    }

    pub fn attendances(&self) -> ResourceClient<'_, Attendance> {
        ResourceClient::new(self)
    }

    pub fn leave_requests(&self) -> ResourceClient<'_, LeaveRequest> {
        ResourceClient::new(self)
    }

    pub fn salaries(&self) -> ResourceClient<'_, Salary> {
        ResourceClient::new(self)
    }

    pub async fn employees_by_user(&self, user_id: u64) -> Result<Vec<Employee>> {
        let request = self.authorized(
            self.client
                .get(self.url(&format!("employees/user/{}", user_id))),
        )?;
        self.fetch_json(request, "fetch employees").await
    }

    pub async fn update_employee_count(&self, department_id: u64, count_change: i64) -> Result<()> {
        let request = self.authorized(
            self.client
                .patch(self.url(&format!("departments/{}/employee-count", department_id)))
                .json(&EmployeeCountChange { count_change }),
        )?;
        let response = request.send().await?;
        check(response, "update employee count").await?;
        Ok(())
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        tracing::debug!("Sending request to {}", self.base_url);
        let response = request.send().await?;
        let response = check(response, what).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Unreadable response while trying to {}: {}", what, e);
            HrError::SerializationError(e)
        })
    }
}

/// Maps non-2xx responses onto [`HrError`].
async fn check(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(HrError::Unauthorized);
    }

    tracing::error!("Server response: {} while trying to {}", status, what);
    let text = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(HrError::RemoteStatus {
        status: status.as_u16(),
        message: format!("Failed to {}: {}", what, detail),
    })
}

pub struct ResourceClient<'a, R: Resource> {
    api: &'a HrClient,
    _resource: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> ResourceClient<'a, R> {
    fn new(api: &'a HrClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    fn item_path(id: u64) -> String {
        format!("{}/{}", R::PATH, id)
    }
}

#[async_trait]
impl<'a, R: Resource> RemoteCollection<R> for ResourceClient<'a, R> {
    async fn list(&self) -> Result<Vec<R>> {
        let request = self.api.authorized(self.api.client.get(self.api.url(R::PATH)))?;
        self.api
            .fetch_json(request, &format!("fetch {}", R::LABEL))
            .await
    }

    async fn get(&self, id: u64) -> Result<R> {
        let request = self
            .api
            .authorized(self.api.client.get(self.api.url(&Self::item_path(id))))?;
        self.api
            .fetch_json(request, &format!("fetch {}", R::LABEL))
            .await
    }

    async fn create(&self, new: &R::New) -> Result<R> {
        let request = self
            .api
            .authorized(self.api.client.post(self.api.url(R::PATH)).json(new))?;
        self.api
            .fetch_json(request, &format!("create {}", R::LABEL))
            .await
    }

    async fn update(&self, id: u64, patch: &R::Patch) -> Result<R> {
        let request = self.api.authorized(
            self.api
                .client
                .put(self.api.url(&Self::item_path(id)))
                .json(patch),
        )?;
        self.api
            .fetch_json(request, &format!("update {}", R::LABEL))
            .await
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let request = self
            .api
            .authorized(self.api.client.delete(self.api.url(&Self::item_path(id))))?;
        let response = request.send().await?;
        check(response, &format!("delete {}", R::LABEL)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = HrClient::new("http://localhost:8080/api/", 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(client.url("/employees"), "http://localhost:8080/api/employees");
        assert_eq!(
            ResourceClient::<'_, LeaveRequest>::item_path(3),
            "leave-requests/3"
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        assert!(HrClient::new("localhost:8080", 5).is_err());
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_sending() {
        let client = HrClient::new(DEFAULT_API_URL, 5).unwrap();
        let err = client.employees().list().await.unwrap_err();
        assert!(matches!(err, HrError::MissingToken));
        assert!(!client.validate_session().await);
    }

    #[test]
    fn test_logout_clears_token() {
        let mut client = HrClient::new(DEFAULT_API_URL, 5).unwrap().with_token("abc");
        assert_eq!(client.token(), Some("abc"));
        client.logout();
        assert!(client.token().is_none());
    }
}
