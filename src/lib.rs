#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod error;
pub mod handler;
pub mod taxonomy;
pub mod timestamp;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::Error;
pub use handler::{ErrorHandler, ErrorSink, NullSink, TracingSink};
pub use taxonomy::classify::{ClassifierConfig, ErrorClassifier, classify};
pub use taxonomy::presentation::{
    DefaultPresenter, ErrorPresentation, Presenter, RecoveryAction, category_title, present,
    recovery_actions,
};
pub use taxonomy::{
    ApiError, AuthError, ErrorCategory, MediaFailure, MediaField, NetworkError, NormalizedError,
    is_retryable_status,
};
pub use timestamp::parse_reported_timestamp;
pub use types::{ApiErrorBody, DecodeFailure, RawFailure, TransportFailure};
