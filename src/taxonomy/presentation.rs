use std::collections::BTreeMap;

use crate::taxonomy::{ErrorCategory, NormalizedError};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
pub enum RecoveryAction {
    #[strum(serialize = "retry")]
    #[serde(rename = "retry")]
    Retry,
    #[strum(serialize = "sign in")]
    #[serde(rename = "sign in")]
    SignIn,
    #[strum(serialize = "choose different file")]
    #[serde(rename = "choose different file")]
    ChooseDifferentFile,
    #[strum(serialize = "check connection")]
    #[serde(rename = "check connection")]
    CheckConnection,
    #[strum(serialize = "dismiss")]
    #[serde(rename = "dismiss")]
    Dismiss,
}

/// UI-ready rendering of a [`NormalizedError`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPresentation {
    pub title: &'static str,
    pub message: String,
    pub help: Option<String>,
    /// Ordered by priority; the first entry is the primary action.
    pub actions: Vec<RecoveryAction>,
    pub field_errors: BTreeMap<String, String>,
}

pub trait Presenter {
    fn present(&self, error: &NormalizedError) -> ErrorPresentation;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPresenter;

impl Presenter for DefaultPresenter {
    fn present(&self, error: &NormalizedError) -> ErrorPresentation {
        present(error)
    }
}

pub fn category_title(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Network => "Connection Issue",
        ErrorCategory::Authentication => "Authentication Required",
        ErrorCategory::Validation => "Validation Error",
        ErrorCategory::ApiProtocol => "Request Failed",
        ErrorCategory::Media => "Media Error",
        ErrorCategory::Cache => "Data Access Error",
        ErrorCategory::DataProcessing => "Data Error",
        ErrorCategory::Unknown => "Unexpected Error",
    }
}

pub fn recovery_actions(error: &NormalizedError) -> Vec<RecoveryAction> {
    let retryable = error.is_retryable();
    let mut actions = Vec::with_capacity(2);
    if retryable {
        actions.push(RecoveryAction::Retry);
    }
    match error.category() {
        ErrorCategory::Authentication => actions.push(RecoveryAction::SignIn),
        ErrorCategory::Media => actions.push(RecoveryAction::ChooseDifferentFile),
        ErrorCategory::Network => actions.push(RecoveryAction::CheckConnection),
        ErrorCategory::Validation
        | ErrorCategory::ApiProtocol
        | ErrorCategory::Cache
        | ErrorCategory::DataProcessing
        | ErrorCategory::Unknown => {}
    }
    if actions.is_empty() && !retryable {
        actions.push(RecoveryAction::Dismiss);
    }
    actions
}

/// Pure projection of an error into its presentation.
pub fn present(error: &NormalizedError) -> ErrorPresentation {
    ErrorPresentation {
        title: category_title(error.category()),
        message: error.user_message(),
        help: error.help_text(),
        actions: recovery_actions(error),
        field_errors: error.field_errors(),
    }
}
