use crate::error::Error;
use crate::taxonomy::NormalizedError;

/// Structured error document returned by the surf API on failure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ApiErrorBody {
    /// Short machine-oriented error name (e.g. `"invalid_report"`).
    pub error: String,
    /// Human-readable explanation, shown to the user verbatim.
    pub message: String,
    /// Suggestion on how to resolve the failure, shown verbatim.
    pub help: String,
}

impl ApiErrorBody {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Signal reported by the transport layer before any HTTP response arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    NotConnected,
    TimedOut,
    ConnectionLost,
    HostUnreachable,
    /// Any platform signal outside the known set.
    Other { description: String },
}

impl TransportFailure {
    /// Maps a snake_case signal name; unknown names are kept as [`TransportFailure::Other`].
    pub fn from_signal(signal: &str) -> Self {
        match signal {
            "not_connected" => Self::NotConnected,
            "timed_out" => Self::TimedOut,
            "connection_lost" => Self::ConnectionLost,
            "host_unreachable" => Self::HostUnreachable,
            other => Self::Other {
                description: other.to_string(),
            },
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NotConnected => "not_connected",
            Self::TimedOut => "timed_out",
            Self::ConnectionLost => "connection_lost",
            Self::HostUnreachable => "host_unreachable",
            Self::Other { description } => description,
        }
    }
}

/// A response body (or other payload) that did not decode into the expected shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeFailure {
    /// Location of the offending value, when the decoder reports one.
    pub path: Option<String>,
    pub reason: String,
}

impl From<serde_json::Error> for DecodeFailure {
    fn from(err: serde_json::Error) -> Self {
        let path = (err.line() > 0).then(|| format!("line {} column {}", err.line(), err.column()));
        Self {
            path,
            reason: err.to_string(),
        }
    }
}

/// A failure as first observed by the networking glue, prior to classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFailure {
    /// Already classified; classification returns it unchanged.
    Normalized(NormalizedError),
    Transport(TransportFailure),
    Http { status: u16, body: Option<Vec<u8>> },
    Decode(DecodeFailure),
}

impl RawFailure {
    pub fn http(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::Http {
            status,
            body: Some(body.into()),
        }
    }

    pub fn status_only(status: u16) -> Self {
        Self::Http { status, body: None }
    }
}

impl From<NormalizedError> for RawFailure {
    fn from(err: NormalizedError) -> Self {
        Self::Normalized(err)
    }
}

impl From<TransportFailure> for RawFailure {
    fn from(failure: TransportFailure) -> Self {
        Self::Transport(failure)
    }
}

impl From<DecodeFailure> for RawFailure {
    fn from(failure: DecodeFailure) -> Self {
        Self::Decode(failure)
    }
}

impl From<serde_json::Error> for RawFailure {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.into())
    }
}
