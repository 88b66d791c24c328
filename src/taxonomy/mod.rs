pub mod classify;
pub mod presentation;

use std::collections::BTreeMap;
use std::fmt;

use crate::types::ApiErrorBody;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ErrorCategory {
    Network,
    Authentication,
    Validation,
    ApiProtocol,
    Media,
    Cache,
    DataProcessing,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NetworkError {
    NoConnection,
    TimedOut,
    ConnectionLost,
    HostUnreachable,
    /// 5xx without a decodable error document.
    Server {
        status: u16,
        message: Option<String>,
    },
    /// 429 without a decodable error document.
    RateLimited { message: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuthError {
    /// 401/403. `detail` keeps the API's own wording when the body decoded.
    SessionExpired {
        status: u16,
        detail: Option<ApiErrorBody>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApiError {
    Server { status: u16, body: ApiErrorBody },
    Http { status: u16, body: Option<String> },
    Decoding { path: Option<String>, reason: String },
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaField {
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaFailure {
    UploadFailed,
    UnsupportedFormat,
    TooLarge,
    ProcessingFailed,
}

/// Unified error value produced by classification. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "category", content = "detail", rename_all = "camelCase")]
pub enum NormalizedError {
    Network(NetworkError),
    Authentication(AuthError),
    Validation {
        field: String,
        reason: String,
    },
    ApiProtocol(ApiError),
    Media {
        field: MediaField,
        kind: MediaFailure,
        reason: String,
    },
    Cache {
        reason: String,
    },
    DataProcessing {
        reason: String,
    },
    Unknown {
        cause: String,
    },
}

pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.trim().is_empty()).then_some(s)
}

impl NormalizedError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn media(field: MediaField, kind: MediaFailure, reason: impl Into<String>) -> Self {
        Self::Media {
            field,
            kind,
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) => ErrorCategory::Network,
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::ApiProtocol(_) => ErrorCategory::ApiProtocol,
            Self::Media { .. } => ErrorCategory::Media,
            Self::Cache { .. } => ErrorCategory::Cache,
            Self::DataProcessing { .. } => ErrorCategory::DataProcessing,
            Self::Unknown { .. } => ErrorCategory::Unknown,
        }
    }

    /// Stable machine-readable code, suitable for logs and analytics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Network(NetworkError::NoConnection) => "network.no_connection",
            Self::Network(NetworkError::TimedOut) => "network.timed_out",
            Self::Network(NetworkError::ConnectionLost) => "network.connection_lost",
            Self::Network(NetworkError::HostUnreachable) => "network.host_unreachable",
            Self::Network(NetworkError::Server { .. }) => "network.server_error",
            Self::Network(NetworkError::RateLimited { .. }) => "network.rate_limited",
            Self::Authentication(AuthError::SessionExpired { .. }) => "auth.session_expired",
            Self::Validation { .. } => "validation.invalid_field",
            Self::ApiProtocol(ApiError::Server { .. }) => "api.server_error",
            Self::ApiProtocol(ApiError::Http { .. }) => "api.http_error",
            Self::ApiProtocol(ApiError::Decoding { .. }) => "api.decoding_failed",
            Self::Media { kind, .. } => match kind {
                MediaFailure::UploadFailed => "media.upload_failed",
                MediaFailure::UnsupportedFormat => "media.unsupported_format",
                MediaFailure::TooLarge => "media.too_large",
                MediaFailure::ProcessingFailed => "media.processing_failed",
            },
            Self::Cache { .. } => "cache.access_failed",
            Self::DataProcessing { .. } => "data.processing_failed",
            Self::Unknown { .. } => "unknown",
        }
    }

    /// HTTP status behind this error, if one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network(NetworkError::Server { status, .. })
            | Self::Authentication(AuthError::SessionExpired { status, .. })
            | Self::ApiProtocol(ApiError::Server { status, .. } | ApiError::Http { status, .. }) => {
                Some(*status)
            }
            Self::Network(NetworkError::RateLimited { .. }) => Some(429),
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(err) => !matches!(err, NetworkError::HostUnreachable),
            Self::ApiProtocol(ApiError::Server { status, .. } | ApiError::Http { status, .. }) => {
                is_retryable_status(*status)
            }
            Self::Media { kind, .. } => *kind == MediaFailure::UploadFailed,
            Self::Authentication(_)
            | Self::Validation { .. }
            | Self::ApiProtocol(ApiError::Decoding { .. })
            | Self::Cache { .. }
            | Self::DataProcessing { .. }
            | Self::Unknown { .. } => false,
        }
    }

    /// Name of the form control this error belongs to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field.as_str()),
            Self::Media { field, .. } => Some(field.as_ref()),
            _ => None,
        }
    }

    /// Always non-empty.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(err) => match err {
                NetworkError::NoConnection => {
                    "No internet connection. Check your network and try again.".to_string()
                }
                NetworkError::TimedOut => "The request timed out. Please try again.".to_string(),
                NetworkError::ConnectionLost => {
                    "The network connection was lost. Please try again.".to_string()
                }
                NetworkError::HostUnreachable => {
                    "The surf report server can't be reached right now.".to_string()
                }
                NetworkError::Server { status, message } => message
                    .as_deref()
                    .and_then(non_empty)
                    .map_or_else(
                        || format!("The server is having trouble (HTTP {status}). Please try again shortly."),
                        str::to_string,
                    ),
                NetworkError::RateLimited { message } => message
                    .as_deref()
                    .and_then(non_empty)
                    .map_or_else(
                        || "Too many requests. Please wait a moment and try again.".to_string(),
                        str::to_string,
                    ),
            },
            Self::Authentication(AuthError::SessionExpired { detail, .. }) => detail
                .as_ref()
                .and_then(|body| non_empty(&body.message))
                .map_or_else(
                    || "Your session has expired. Please sign in again.".to_string(),
                    str::to_string,
                ),
            Self::Validation { field, reason } => non_empty(reason)
                .map_or_else(|| format!("The value for {field} is invalid."), str::to_string),
            Self::ApiProtocol(err) => match err {
                ApiError::Server { body, .. } => non_empty(&body.message)
                    .or_else(|| non_empty(&body.error))
                    .map_or_else(
                        || "The request could not be completed.".to_string(),
                        str::to_string,
                    ),
                ApiError::Http { status, .. } => {
                    format!("The request failed with status {status}.")
                }
                ApiError::Decoding { .. } => {
                    "The server sent a response we couldn't read.".to_string()
                }
            },
            Self::Media { field, kind, .. } => match kind {
                MediaFailure::UploadFailed => format!("Failed to upload the {field}."),
                MediaFailure::UnsupportedFormat => format!("This {field} format isn't supported."),
                MediaFailure::TooLarge => format!("This {field} is too large to upload."),
                MediaFailure::ProcessingFailed => {
                    format!("The selected {field} couldn't be processed.")
                }
            },
            Self::Cache { .. } => "Saved data couldn't be read.".to_string(),
            Self::DataProcessing { .. } => "The surf data couldn't be processed.".to_string(),
            Self::Unknown { .. } => "Something went wrong. Please try again.".to_string(),
        }
    }

    pub fn help_text(&self) -> Option<String> {
        match self {
            Self::Network(NetworkError::NoConnection | NetworkError::ConnectionLost) => {
                Some("Make sure Wi-Fi or cellular data is turned on.".to_string())
            }
            Self::Network(NetworkError::HostUnreachable) => {
                Some("The service may be down. Try again later.".to_string())
            }
            Self::Authentication(AuthError::SessionExpired { detail, .. }) => Some(
                detail
                    .as_ref()
                    .and_then(|body| non_empty(&body.help))
                    .unwrap_or("Sign in again to continue.")
                    .to_string(),
            ),
            Self::ApiProtocol(ApiError::Server { body, .. }) => {
                non_empty(&body.help).map(str::to_string)
            }
            Self::Media { kind, .. } => match kind {
                MediaFailure::UnsupportedFormat | MediaFailure::ProcessingFailed => {
                    Some("Try a different photo or video.".to_string())
                }
                MediaFailure::TooLarge => Some("Choose a shorter or smaller file.".to_string()),
                MediaFailure::UploadFailed => None,
            },
            _ => None,
        }
    }

    /// Field name to inline message; empty for errors without a field.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        self.field()
            .map(|field| (field.to_string(), self.user_message()))
            .into_iter()
            .collect()
    }
}

impl fmt::Display for NormalizedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.user_message())
    }
}

impl std::error::Error for NormalizedError {}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn lcg_next(state: &mut u64) -> u64 {
        *state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1);
        *state
    }

    fn sample_errors() -> Vec<NormalizedError> {
        vec![
            NormalizedError::Network(NetworkError::NoConnection),
            NormalizedError::Network(NetworkError::TimedOut),
            NormalizedError::Network(NetworkError::ConnectionLost),
            NormalizedError::Network(NetworkError::HostUnreachable),
            NormalizedError::Network(NetworkError::Server {
                status: 503,
                message: None,
            }),
            NormalizedError::Network(NetworkError::RateLimited {
                message: Some(String::new()),
            }),
            NormalizedError::Authentication(AuthError::SessionExpired {
                status: 401,
                detail: None,
            }),
            NormalizedError::validation("surfSize", ""),
            NormalizedError::ApiProtocol(ApiError::Server {
                status: 400,
                body: ApiErrorBody {
                    error: String::new(),
                    message: "  ".to_string(),
                    help: String::new(),
                },
            }),
            NormalizedError::ApiProtocol(ApiError::Http {
                status: 404,
                body: None,
            }),
            NormalizedError::ApiProtocol(ApiError::Decoding {
                path: None,
                reason: "eof".to_string(),
            }),
            NormalizedError::media(MediaField::Video, MediaFailure::TooLarge, ""),
            NormalizedError::Cache {
                reason: String::new(),
            },
            NormalizedError::DataProcessing {
                reason: String::new(),
            },
            NormalizedError::Unknown {
                cause: String::new(),
            },
        ]
    }

    #[test]
    fn category_string_forms() {
        assert_eq!(ErrorCategory::ApiProtocol.to_string(), "apiProtocol");
        assert_eq!(
            "dataProcessing".parse::<ErrorCategory>().ok(),
            Some(ErrorCategory::DataProcessing)
        );
        assert_eq!("api_protocol".parse::<ErrorCategory>().ok(), None);
        assert_eq!(ErrorCategory::iter().count(), 8);
    }

    #[test]
    fn every_error_has_message_and_code_even_with_empty_payloads() {
        for err in sample_errors() {
            assert!(!err.user_message().trim().is_empty(), "{err:?}");
            assert!(!err.code().is_empty(), "{err:?}");
        }
    }

    #[test]
    fn retryable_statuses_property_holds_for_randomized_inputs() {
        let mut seed = 0x5EA_5EA_u64;
        for _ in 0..10_000 {
            let status = (lcg_next(&mut seed) % 600) as u16;
            let expected = status == 429 || (500..=599).contains(&status);
            assert_eq!(is_retryable_status(status), expected, "status {status}");
        }
    }

    #[test]
    fn retryability_by_variant() {
        let retryable: Vec<bool> = sample_errors().iter().map(NormalizedError::is_retryable).collect();
        assert_eq!(
            retryable,
            vec![
                true, true, true, false, true, true, false, false, false, false, false, false,
                false, false, false
            ]
        );
        assert!(
            NormalizedError::media(MediaField::Image, MediaFailure::UploadFailed, "").is_retryable()
        );
    }

    #[test]
    fn only_validation_and_media_carry_fields() {
        for err in sample_errors() {
            match err.category() {
                ErrorCategory::Validation | ErrorCategory::Media => {
                    assert!(err.field().is_some());
                    assert_eq!(err.field_errors().len(), 1);
                }
                _ => {
                    assert!(err.field().is_none());
                    assert!(err.field_errors().is_empty());
                }
            }
        }
        let media = NormalizedError::media(MediaField::Image, MediaFailure::UnsupportedFormat, "heic");
        assert_eq!(media.field(), Some("image"));
    }

    #[test]
    fn api_wording_is_kept_verbatim() {
        let err = NormalizedError::Authentication(AuthError::SessionExpired {
            status: 403,
            detail: Some(ApiErrorBody {
                error: "forbidden".to_string(),
                message: "Token revoked".to_string(),
                help: "Log in on this device".to_string(),
            }),
        });
        assert_eq!(err.user_message(), "Token revoked");
        assert_eq!(err.help_text().as_deref(), Some("Log in on this device"));
        assert_eq!(err.status(), Some(403));
    }

    #[test]
    fn serializes_with_category_tag() {
        let err = NormalizedError::Network(NetworkError::TimedOut);
        let json = serde_json::to_value(&err).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({"category": "network", "detail": {"kind": "timed_out"}}))
        );
        let back: Option<NormalizedError> = json.and_then(|v| serde_json::from_value(v).ok());
        assert_eq!(back, Some(err));
    }
}
