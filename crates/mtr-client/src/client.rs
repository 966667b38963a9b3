use std::time::Duration;

use mtr_domain::{
    Curriculum, MenteeRegistration, MentorRegistration, NewProgram, ProgramDetail, ProgramQuery,
    ProgramSummary, TierProgress,
};
use reqwest::{RequestBuilder, header::AUTHORIZATION};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::{ClientError, Session, SessionUser};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// `{success, message?, error?, ...}` body shared by every endpoint
#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Envelope {
    fn take<T: DeserializeOwned>(&mut self, name: &str) -> Result<T, ClientError> {
        let value = self
            .fields
            .remove(name)
            .ok_or_else(|| ClientError::MalformedResponse(format!("missing `{name}` field")))?;
        serde_json::from_value(value)
            .map_err(|e| ClientError::MalformedResponse(format!("invalid `{name}` field: {e}")))
    }

    fn message_or(&self, default: &str) -> String {
        self.message.clone().unwrap_or_else(|| default.to_string())
    }
}

/// HTTP client for the `/v1` API
///
/// `base_url` includes the version prefix, e.g. `http://localhost:3000/v1`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_http_client(http, base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and unwrap the response envelope
    ///
    /// Error statuses are classified from their `error`/`message` text.
    /// A 2xx body that is not an envelope is malformed, and one with
    /// `success: false` is rejected.
    async fn send(&self, request: RequestBuilder) -> Result<Envelope, ClientError> {
        let response = request.send().await.map_err(ClientError::Network)?;
        let status = response.status();
        let body = response.text().await.map_err(ClientError::Network)?;
        let envelope = serde_json::from_str::<Envelope>(&body);

        if !status.is_success() {
            let message = envelope.ok().and_then(|e| e.error.or(e.message));
            tracing::debug!(%status, ?message, "request failed");
            return Err(ClientError::from_status(status, message));
        }

        let envelope = envelope.map_err(|e| {
            tracing::warn!(%status, error = %e, "response is not a JSON envelope");
            ClientError::MalformedResponse(e.to_string())
        })?;
        if !envelope.success {
            return Err(ClientError::rejected(envelope.error.or(envelope.message)));
        }

        Ok(envelope)
    }

    /// `POST /mentees/register`, returning the server's confirmation message
    pub async fn register_mentee(
        &self,
        registration: &MenteeRegistration,
    ) -> Result<String, ClientError> {
        let envelope = self
            .send(self.http.post(self.url("/mentees/register")).json(registration))
            .await?;
        Ok(envelope.message_or("Registration successful"))
    }

    /// `POST /mentors/register` for mentor and trainer accounts
    pub async fn register_mentor(
        &self,
        registration: &MentorRegistration,
    ) -> Result<String, ClientError> {
        let envelope = self
            .send(self.http.post(self.url("/mentors/register")).json(registration))
            .await?;
        Ok(envelope.message_or("Registration successful"))
    }

    /// `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let mut envelope = self
            .send(
                self.http
                    .post(self.url("/auth/login"))
                    .json(&json!({ "email": email, "password": password })),
            )
            .await?;

        Ok(Session {
            token: envelope.take("token")?,
            user: envelope.take("user")?,
        })
    }

    /// `GET /auth/me`
    pub async fn me(&self, session: &Session) -> Result<SessionUser, ClientError> {
        let mut envelope = self
            .send(
                self.http
                    .get(self.url("/auth/me"))
                    .header(AUTHORIZATION, session.bearer()),
            )
            .await?;
        envelope.take("user")
    }

    /// `GET /programs`, filtered and sorted by the server
    pub async fn list_programs(
        &self,
        query: &ProgramQuery,
    ) -> Result<Vec<ProgramSummary>, ClientError> {
        let mut envelope = self
            .send(self.http.get(self.url("/programs")).query(query))
            .await?;
        envelope.take("programs")
    }

    /// `POST /programs`, returning the stored program
    pub async fn create_program(
        &self,
        session: &Session,
        program: &NewProgram,
    ) -> Result<ProgramSummary, ClientError> {
        let mut envelope = self
            .send(
                self.http
                    .post(self.url("/programs"))
                    .header(AUTHORIZATION, session.bearer())
                    .json(program),
            )
            .await?;
        envelope.take("program")
    }

    /// `GET /programs/details/{id}`
    ///
    /// Fails with [`ClientError::NotSignedIn`] before any request when there
    /// is no session.
    pub async fn program_details(
        &self,
        session: Option<&Session>,
        program_id: Uuid,
    ) -> Result<ProgramDetail, ClientError> {
        let session = session.ok_or(ClientError::NotSignedIn)?;
        let mut envelope = self
            .send(
                self.http
                    .get(self.url(&format!("/programs/details/{program_id}")))
                    .header(AUTHORIZATION, session.bearer()),
            )
            .await?;
        envelope.take("program")
    }

    /// `PUT /programs/{id}/curriculum`, returning the saved total duration in minutes
    pub async fn save_curriculum(
        &self,
        session: &Session,
        program_id: Uuid,
        curriculum: &Curriculum,
    ) -> Result<u64, ClientError> {
        let mut envelope = self
            .send(
                self.http
                    .put(self.url(&format!("/programs/{program_id}/curriculum")))
                    .header(AUTHORIZATION, session.bearer())
                    .json(&json!({ "modules": curriculum.modules() })),
            )
            .await?;
        envelope.take("total_duration_minutes")
    }

    /// `POST /programs/{id}/enroll`
    pub async fn enroll(&self, session: &Session, program_id: Uuid) -> Result<String, ClientError> {
        let envelope = self
            .send(
                self.http
                    .post(self.url(&format!("/programs/{program_id}/enroll")))
                    .header(AUTHORIZATION, session.bearer()),
            )
            .await?;
        Ok(envelope.message_or("Enrolled successfully"))
    }

    /// `GET /mentors/{id}/rewards`
    pub async fn mentor_rewards(&self, mentor_id: Uuid) -> Result<TierProgress, ClientError> {
        let mut envelope = self
            .send(self.http.get(self.url(&format!("/mentors/{mentor_id}/rewards"))))
            .await?;
        envelope.take("rewards")
    }
}
