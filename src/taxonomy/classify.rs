use crate::taxonomy::{ApiError, AuthError, NetworkError, NormalizedError};
use crate::types::{ApiErrorBody, DecodeFailure, RawFailure, TransportFailure};

const DEFAULT_BODY_SNIPPET_LIMIT: usize = 512;

/// Runtime knobs for [`ErrorClassifier`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Maximum number of characters of an undecodable body kept on the error.
    pub body_snippet_limit: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            body_snippet_limit: DEFAULT_BODY_SNIPPET_LIMIT,
        }
    }
}

/// Maps raw failures into [`NormalizedError`]. Holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier {
    config: ClassifierConfig,
}

impl ErrorClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Never fails; unrecognized input degrades to [`NormalizedError::Unknown`].
    pub fn classify(&self, raw: RawFailure) -> NormalizedError {
        match raw {
            RawFailure::Normalized(err) => err,
            RawFailure::Transport(failure) => classify_transport(failure),
            RawFailure::Http { status, body } => self.classify_http(status, body.as_deref()),
            RawFailure::Decode(failure) => classify_decode(failure),
        }
    }

    pub fn classify_http(&self, status: u16, body: Option<&[u8]>) -> NormalizedError {
        let decoded = body.and_then(|bytes| match ApiErrorBody::from_slice(bytes) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::debug!(status, error = %e, "response body is not an API error document");
                None
            }
        });

        if matches!(status, 401 | 403) {
            return NormalizedError::Authentication(AuthError::SessionExpired {
                status,
                detail: decoded,
            });
        }

        if let Some(body) = decoded {
            return NormalizedError::ApiProtocol(ApiError::Server { status, body });
        }

        let text = body.and_then(|bytes| self.body_snippet(bytes));
        match status {
            429 => NormalizedError::Network(NetworkError::RateLimited { message: text }),
            500..=599 => NormalizedError::Network(NetworkError::Server {
                status,
                message: text,
            }),
            _ => NormalizedError::ApiProtocol(ApiError::Http { status, body: text }),
        }
    }

    fn body_snippet(&self, bytes: &[u8]) -> Option<String> {
        let text = String::from_utf8_lossy(bytes);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.chars().take(self.config.body_snippet_limit).collect())
    }
}

fn classify_transport(failure: TransportFailure) -> NormalizedError {
    match failure {
        TransportFailure::NotConnected => NormalizedError::Network(NetworkError::NoConnection),
        TransportFailure::TimedOut => NormalizedError::Network(NetworkError::TimedOut),
        TransportFailure::ConnectionLost => NormalizedError::Network(NetworkError::ConnectionLost),
        TransportFailure::HostUnreachable => {
            NormalizedError::Network(NetworkError::HostUnreachable)
        }
        TransportFailure::Other { description } => {
            tracing::debug!(%description, "unrecognized transport failure");
            NormalizedError::Unknown { cause: description }
        }
    }
}

fn classify_decode(failure: DecodeFailure) -> NormalizedError {
    NormalizedError::ApiProtocol(ApiError::Decoding {
        path: failure.path,
        reason: failure.reason,
    })
}

/// Classifies with the default configuration.
pub fn classify(raw: RawFailure) -> NormalizedError {
    ErrorClassifier::default().classify(raw)
}
