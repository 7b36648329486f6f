use eventsite_core::ServerMessage;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, broken body.
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response; `message` is what the server said, if anything.
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no details"))]
    Api { status: u16, message: Option<String> },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build an `Api` error from a failed response body.
    ///
    /// Accepts `{"error": "..."}`, `{"message": "..."}` or plain text.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        ClientError::Api {
            status,
            message: extract_message(body),
        }
    }
}

impl ServerMessage for ClientError {
    fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        return ["error", "message"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
    }

    Some(body.to_string())
}
