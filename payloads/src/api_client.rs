use crate::{AttendanceEntry, Payment, Student, requests, responses};
use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::sync::{Arc, RwLock};

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// The credential for the current login, shared by every clone of the
/// client that was built from it.
#[derive(Clone, Default)]
pub struct Session {
    token: Arc<RwLock<Option<SecretString>>>,
}

impl Session {
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::default();
        session.set_token(token);
        session
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let token = SecretString::from(token.into());
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token);
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Run `f` with the raw token, if there is one. Used by front-ends that
    /// persist the session on the device.
    pub fn with_exposed_token<R>(&self, f: impl FnOnce(&str) -> R) -> Option<R> {
        let token = self.token.read().unwrap_or_else(|e| e.into_inner());
        token.as_ref().map(|token| f(token.expose_secret()))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.token.read().unwrap_or_else(|e| e.into_inner());
        match token.as_ref() {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }
}

/// An API client for interfacing with the backend.
///
/// Every request goes through [`Session::authorize`], so call sites never
/// deal with credentials.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
    pub session: Session,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>, session: Session) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
            session,
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn send(&self, request: RequestBuilder) -> ReqwestResult {
        let response = self.session.authorize(request).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED
            && self.session.is_authenticated()
        {
            tracing::info!("Session was rejected by the backend, clearing it");
            self.session.clear();
        }
        Ok(response)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);
        self.send(request).await
    }

    async fn empty_post(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path));
        self.send(request).await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));
        self.send(request).await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    /// Log in and keep the returned token in the session.
    ///
    /// Returns the display name of the logged in staff member.
    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<String, ClientError> {
        let response = self.post("login", details).await?;
        let session: responses::SessionToken = ok_body(response).await?;
        self.session.set_token(session.token);
        Ok(session.display_name)
    }

    /// End the session on the backend. The local credential is dropped even
    /// if the backend call fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = match self.empty_post("logout").await {
            Ok(response) => ok_empty(response).await,
            Err(e) => Err(e.into()),
        };
        self.session.clear();
        result
    }

    /// Get one page of students. An empty page means there are no more.
    pub async fn list_students(
        &self,
        details: &requests::ListStudents,
    ) -> Result<Vec<Student>, ClientError> {
        let response = self.post("list_students", details).await?;
        ok_body(response).await
    }

    pub async fn list_payments(
        &self,
        details: &requests::ListPayments,
    ) -> Result<Vec<Payment>, ClientError> {
        let response = self.post("list_payments", details).await?;
        ok_body(response).await
    }

    pub async fn mark_attendance(
        &self,
        details: &requests::MarkAttendance,
    ) -> Result<AttendanceEntry, ClientError> {
        let response = self.post("mark_attendance", details).await?;
        ok_body(response).await
    }

    pub async fn create_payment(
        &self,
        details: &requests::CreatePayment,
    ) -> Result<Payment, ClientError> {
        let response = self.post("create_payment", details).await?;
        ok_body(response).await
    }

    pub async fn daily_income(
        &self,
        details: &requests::DailyIncomeQuery,
    ) -> Result<responses::DailyIncome, ClientError> {
        let response = self.post("daily_income", details).await?;
        ok_body(response).await
    }

    pub async fn monthly_income(
        &self,
        details: &requests::MonthlyIncomeQuery,
    ) -> Result<responses::MonthlyIncome, ClientError> {
        let response = self.post("monthly_income", details).await?;
        ok_body(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
