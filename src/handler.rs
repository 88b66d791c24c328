use crate::taxonomy::NormalizedError;
use crate::taxonomy::classify::ErrorClassifier;
use crate::taxonomy::presentation::{DefaultPresenter, ErrorPresentation, Presenter};
use crate::types::RawFailure;

/// Destination for classified errors (logs, analytics, crash reporting).
pub trait ErrorSink {
    fn record(&self, error: &NormalizedError);
}

/// Emits one `tracing` event per error.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn record(&self, error: &NormalizedError) {
        let category = error.category();
        let field = error.field().unwrap_or_default();
        if error.is_retryable() {
            tracing::info!(
                code = error.code(),
                %category,
                field,
                status = error.status(),
                "retryable error"
            );
        } else {
            tracing::warn!(
                code = error.code(),
                %category,
                field,
                status = error.status(),
                "error surfaced to user"
            );
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ErrorSink for NullSink {
    fn record(&self, _error: &NormalizedError) {}
}

/// Classify, record, present. Construct one per app and pass it where needed.
#[derive(Debug, Clone)]
pub struct ErrorHandler<P = DefaultPresenter, S = TracingSink> {
    classifier: ErrorClassifier,
    presenter: P,
    sink: S,
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self::new(ErrorClassifier::default(), DefaultPresenter, TracingSink)
    }
}

impl<P: Presenter, S: ErrorSink> ErrorHandler<P, S> {
    pub fn new(classifier: ErrorClassifier, presenter: P, sink: S) -> Self {
        Self {
            classifier,
            presenter,
            sink,
        }
    }

    pub fn classifier(&self) -> &ErrorClassifier {
        &self.classifier
    }

    pub fn normalize(&self, raw: impl Into<RawFailure>) -> NormalizedError {
        let error = self.classifier.classify(raw.into());
        self.sink.record(&error);
        error
    }

    pub fn handle(&self, raw: impl Into<RawFailure>) -> ErrorPresentation {
        let error = self.normalize(raw);
        self.presenter.present(&error)
    }
}
