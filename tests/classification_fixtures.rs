#![expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]

use surf_report_errors::{
    ApiError, ErrorCategory, MediaFailure, MediaField, NormalizedError, RawFailure,
    RecoveryAction, TransportFailure, classify, parse_reported_timestamp, present,
};

#[derive(serde::Deserialize)]
struct HttpFailureFixture {
    name: String,
    status: u16,
    body: Option<String>,
    category: String,
    code: String,
    retryable: bool,
}

#[derive(serde::Deserialize)]
struct TimestampFixture {
    raw: String,
    expected: Option<String>,
}

fn load_fixture<T: serde::de::DeserializeOwned>(filename: &str) -> Vec<T> {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = format!("{manifest_dir}/tests/fixtures/{filename}");
    let data =
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {path}: {e}"));
    serde_json::from_str(&data).unwrap_or_else(|e| panic!("failed to parse {path}: {e}"))
}

fn raw_from_fixture(fixture: &HttpFailureFixture) -> RawFailure {
    RawFailure::Http {
        status: fixture.status,
        body: fixture.body.clone().map(String::into_bytes),
    }
}

// ──────────────────── HTTP ────────────────────

#[test]
fn http_failures_classify_from_fixture() {
    for fixture in load_fixture::<HttpFailureFixture>("http_failures.json") {
        let err = classify(raw_from_fixture(&fixture));
        let expected: ErrorCategory = fixture
            .category
            .parse()
            .unwrap_or_else(|_| panic!("bad category in fixture {}", fixture.name));
        assert_eq!(err.category(), expected, "category for {}", fixture.name);
        assert_eq!(err.code(), fixture.code, "code for {}", fixture.name);
        assert_eq!(err.is_retryable(), fixture.retryable, "retryable for {}", fixture.name);
    }
}

#[test]
fn http_failures_present_deterministically_from_fixture() {
    for fixture in load_fixture::<HttpFailureFixture>("http_failures.json") {
        let first = present(&classify(raw_from_fixture(&fixture)));
        let second = present(&classify(raw_from_fixture(&fixture)));
        assert_eq!(first, second, "presentation for {}", fixture.name);
        assert!(!first.message.is_empty(), "message for {}", fixture.name);
        assert!(!first.actions.is_empty(), "actions for {}", fixture.name);
        assert_eq!(
            first.actions.first() == Some(&RecoveryAction::Retry),
            fixture.retryable,
            "retry action for {}",
            fixture.name
        );
    }
}

#[test]
fn api_document_message_and_help_reach_presentation() {
    let body = br#"{"error":"invalid_report","message":"Photo is missing GPS data","help":"Enable location for the camera"}"#;
    let err = classify(RawFailure::http(400, &body[..]));
    let presentation = present(&err);
    assert_eq!(presentation.title, "Request Failed");
    assert_eq!(presentation.message, "Photo is missing GPS data");
    assert_eq!(
        presentation.help.as_deref(),
        Some("Enable location for the camera")
    );
    assert_eq!(presentation.actions, vec![RecoveryAction::Dismiss]);
}

#[test]
fn reclassifying_is_idempotent() {
    let inputs: Vec<RawFailure> = vec![
        RawFailure::status_only(503),
        RawFailure::http(401, "nope"),
        TransportFailure::ConnectionLost.into(),
        TransportFailure::Other {
            description: "socket closed by peer".to_string(),
        }
        .into(),
        serde_json::from_str::<serde_json::Value>("{oops").unwrap_err().into(),
        NormalizedError::media(MediaField::Video, MediaFailure::UnsupportedFormat, "avi").into(),
    ];
    for raw in inputs {
        let once = classify(raw);
        let twice = classify(once.clone().into());
        assert_eq!(once, twice);
    }
}

#[test]
fn decode_failure_from_serde_is_api_protocol() {
    let err = classify(
        serde_json::from_str::<Vec<u32>>("[1, \"two\"]")
            .unwrap_err()
            .into(),
    );
    assert!(matches!(
        err,
        NormalizedError::ApiProtocol(ApiError::Decoding { .. })
    ));
    assert_eq!(present(&err).title, "Request Failed");
}

#[test]
fn surf_size_validation_presentation() {
    let presentation = present(&NormalizedError::validation(
        "surfSize",
        "Surf size is required",
    ));
    assert_eq!(presentation.title, "Validation Error");
    assert!(
        presentation
            .field_errors
            .get("surfSize")
            .is_some_and(|m| !m.is_empty())
    );
}

// ──────────────────── Timestamps ────────────────────

#[test]
fn report_timestamps_from_fixture() {
    for fixture in load_fixture::<TimestampFixture>("report_timestamps.json") {
        let parsed = parse_reported_timestamp(&fixture.raw);
        match fixture.expected {
            Some(expected) => {
                let expected = chrono::DateTime::parse_from_rfc3339(&expected).unwrap();
                let parsed = parsed.unwrap_or_else(|e| panic!("{}: {e}", fixture.raw));
                assert_eq!(
                    parsed.timestamp(),
                    expected.timestamp(),
                    "instant for {}",
                    fixture.raw
                );
            }
            None => assert!(parsed.is_err(), "expected failure for {}", fixture.raw),
        }
    }
}
