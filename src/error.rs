#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unrecognized report timestamp: {raw:?}")]
    Timestamp { raw: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
