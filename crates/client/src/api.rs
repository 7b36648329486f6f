//! One method per REST call the views make.

use eventsite_auth::{AuthSession, Authenticator, BearerToken};
use eventsite_core::{
    Attendee, RegisterRequest, Session, SessionWithSpeaker, Speaker, Stats, Todo, TodoDraft,
    TodoId, TodoPatch, UpsertSession, UpsertSpeaker,
};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: BearerToken,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

/// HTTP client for the event-site API.
///
/// Whenever the shared [`AuthSession`] holds a token it is attached as
/// `Authorization: Bearer ...` to every request; after logout nothing is
/// attached. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    auth: AuthSession,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, auth: AuthSession) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        let raw = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(raw)
            .map_err(|e| ClientError::Config(format!("invalid base URL {raw:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!("invalid base URL {raw:?}")));
        }

        Ok(Self {
            http,
            base_url,
            auth,
        })
    }

    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    // ---------------------------------------------------------------------
    // Public endpoints
    // ---------------------------------------------------------------------

    pub async fn sessions(&self) -> ClientResult<Vec<SessionWithSpeaker>> {
        self.get_list(&["sessions"]).await
    }

    pub async fn speakers(&self) -> ClientResult<Vec<Speaker>> {
        self.get_list(&["speakers"]).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        self.send(Method::POST, &["register"], Some(request))
            .await
            .map(|_| ())
    }

    pub async fn attendee_count(&self) -> ClientResult<u64> {
        let body: CountResponse = self.get_json(&["attendees", "count"]).await?;
        Ok(body.count)
    }

    pub async fn admin_login(&self, password: &str) -> ClientResult<BearerToken> {
        let body = self
            .send(Method::POST, &["admin", "login"], Some(&LoginRequest { password }))
            .await?;
        let body: LoginResponse = decode(&body)?;
        Ok(body.token)
    }

    // ---------------------------------------------------------------------
    // Admin endpoints (bearer token required server-side)
    // ---------------------------------------------------------------------

    pub async fn attendees(&self) -> ClientResult<Vec<Attendee>> {
        self.get_list(&["admin", "attendees"]).await
    }

    pub async fn stats(&self) -> ClientResult<Stats> {
        let stats: Option<Stats> = self.get_json(&["admin", "stats"]).await?;
        Ok(stats.unwrap_or_default())
    }

    pub async fn upsert_speaker(&self, speaker: &UpsertSpeaker) -> ClientResult<Speaker> {
        decode(&self.send(Method::POST, &["admin", "speakers"], Some(speaker)).await?)
    }

    pub async fn upsert_session(&self, session: &UpsertSession) -> ClientResult<Session> {
        decode(&self.send(Method::POST, &["admin", "sessions"], Some(session)).await?)
    }

    // ---------------------------------------------------------------------
    // Todos
    // ---------------------------------------------------------------------

    pub async fn todos(&self) -> ClientResult<Vec<Todo>> {
        self.get_list(&["todos"]).await
    }

    pub async fn create_todo(&self, draft: &TodoDraft) -> ClientResult<Todo> {
        decode(&self.send(Method::POST, &["todos"], Some(draft)).await?)
    }

    pub async fn update_todo(&self, id: &TodoId, patch: &TodoPatch) -> ClientResult<Todo> {
        let path = ["todos", id.as_str()];
        decode(&self.send(Method::PATCH, &path, Some(patch)).await?)
    }

    pub async fn delete_todo(&self, id: &TodoId) -> ClientResult<()> {
        let path = ["todos", id.as_str()];
        self.send::<()>(Method::DELETE, &path, None)
            .await
            .map(|_| ())
    }

    // ---------------------------------------------------------------------
    // Plumbing
    // ---------------------------------------------------------------------

    /// Base URL plus `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Never fails: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut req = self.http.request(method, url);

        if let Some(token) = self.auth.token() {
            req = req.bearer_auth(token.as_str());
        }

        req
    }

    /// Send and read the whole body; non-2xx becomes `ClientError::Api`.
    async fn send<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> ClientResult<String>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments);
        let path = url.path().to_owned();
        let mut req = self.request(method.clone(), url);
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(%method, %path, "request failed: {e}");
            ClientError::Network(e.to_string())
        })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !status.is_success() {
            let err = ClientError::from_response(status.as_u16(), &body);
            tracing::warn!(%method, %path, status = status.as_u16(), "API rejected request: {err}");
            return Err(err);
        }

        tracing::debug!(%method, %path, status = status.as_u16(), "request succeeded");
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<T> {
        let body = self.send::<()>(Method::GET, segments, None).await?;
        decode(&body)
    }

    /// Lists may come back as `null`; that is an empty list.
    async fn get_list<T: DeserializeOwned>(&self, segments: &[&str]) -> ClientResult<Vec<T>> {
        let items: Option<Vec<T>> = self.get_json(segments).await?;
        Ok(items.unwrap_or_default())
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()))
}

impl Authenticator for ApiClient {
    type Error = ClientError;

    async fn authenticate(&self, password: &str) -> Result<BearerToken, ClientError> {
        self.admin_login(password).await
    }
}
