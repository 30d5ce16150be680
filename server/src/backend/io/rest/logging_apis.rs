//! Client-side log forwarding. The farm UI posts notable failures (a
//! rejected form, a fetch that timed out) so they land in the same log as
//! the server's own records.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::{log, Level};
use serde::{Deserialize, Serialize};

use crate::backend::domain::DomainError;
use crate::backend::io::rest::error_response;
use crate::backend::AppState;

/// Log target for every forwarded line, so `RUST_LOG=providence::client=warn`
/// can tune client noise independently of the server's.
pub const CLIENT_LOG_TARGET: &str = "providence::client";

#[derive(Debug, Deserialize)]
pub struct ClientLogEntry {
    #[serde(default)]
    pub level: Option<String>,
    pub message: String,
    /// UI screen or widget that produced the line
    #[serde(default)]
    pub component: Option<String>,
    /// Animal the user was working on, if any
    #[serde(default)]
    pub animal_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClientLogAck {
    pub success: bool,
    pub level: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientLogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl ClientLogLevel {
    /// Browser console names are accepted too; anything unknown is `info`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|l| l.trim().to_lowercase()).as_deref() {
            Some("debug") | Some("trace") => ClientLogLevel::Debug,
            Some("warn") | Some("warning") => ClientLogLevel::Warn,
            Some("error") | Some("fatal") => ClientLogLevel::Error,
            _ => ClientLogLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientLogLevel::Debug => "debug",
            ClientLogLevel::Info => "info",
            ClientLogLevel::Warn => "warn",
            ClientLogLevel::Error => "error",
        }
    }

    fn to_level(self) -> Level {
        match self {
            ClientLogLevel::Debug => Level::Debug,
            ClientLogLevel::Info => Level::Info,
            ClientLogLevel::Warn => Level::Warn,
            ClientLogLevel::Error => Level::Error,
        }
    }
}

impl ClientLogEntry {
    fn render(&self) -> String {
        let component = self
            .component
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("interface");
        match self.animal_id.as_deref().filter(|id| !id.is_empty()) {
            Some(animal_id) => format!("[{}] {} (animal {})", component, self.message.trim(), animal_id),
            None => format!("[{}] {}", component, self.message.trim()),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(forward_client_log))
}

pub async fn forward_client_log(Json(entry): Json<ClientLogEntry>) -> impl IntoResponse {
    if entry.message.trim().is_empty() {
        return error_response("forward client log", DomainError::validation("message is required"));
    }

    let level = ClientLogLevel::parse(entry.level.as_deref());
    log!(target: CLIENT_LOG_TARGET, level.to_level(), "{}", entry.render());

    (
        StatusCode::OK,
        Json(ClientLogAck {
            success: true,
            level: level.as_str(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(component: Option<&str>, animal_id: Option<&str>) -> ClientLogEntry {
        ClientLogEntry {
            level: None,
            message: " fetch timed out ".to_string(),
            component: component.map(str::to_string),
            animal_id: animal_id.map(str::to_string),
        }
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!(ClientLogLevel::parse(Some("WARNING")), ClientLogLevel::Warn);
        assert_eq!(ClientLogLevel::parse(Some("trace")), ClientLogLevel::Debug);
        assert_eq!(ClientLogLevel::parse(Some("fatal")), ClientLogLevel::Error);
        assert_eq!(ClientLogLevel::parse(Some("verbose")), ClientLogLevel::Info);
        assert_eq!(ClientLogLevel::parse(None), ClientLogLevel::Info);
    }

    #[test]
    fn test_render() {
        assert_eq!(entry(None, None).render(), "[interface] fetch timed out");
        assert_eq!(
            entry(Some("herd-view"), Some("a1b2")).render(),
            "[herd-view] fetch timed out (animal a1b2)"
        );
        assert_eq!(entry(Some("  "), Some("")).render(), "[interface] fetch timed out");
    }
}
