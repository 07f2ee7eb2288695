//! Request/response boundary with the analysis backend
//!
//! Both sides of `POST /analyze` live here: the client validates and builds
//! the request and interprets the response, the server validates incoming
//! requests and classifies what the model replied. All pure.

use serde::{Deserialize, Serialize};

/// Counterpart label sent with every request.
pub const MERCHANT_LABEL: &str = "Customer";

pub const EMPTY_ANALYSIS: &str = "Received an empty analysis from the server.";

pub const TRANSPORT_FAILURE: &str =
    "An unexpected client-side error occurred. Please check the logs or try again.";

pub const NO_CONTENT: &str = "AI service returned no content.";

// ============================================================================
// Wire Models
// ============================================================================

fn default_merchant_names() -> String {
    MERCHANT_LABEL.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub sales_rep_names: String,
    #[serde(default = "default_merchant_names")]
    pub merchant_names: String,
}

/// Response body of `POST /analyze`.
///
/// Exactly one shape is expected: `{error}`, `{analysis_text, is_error: true}`
/// or `{analysis_text}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_text: Option<String>,
}

impl AnalyzeResponse {
    pub fn report(text: impl Into<String>) -> Self {
        Self {
            analysis_text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn flagged(text: impl Into<String>) -> Self {
        Self {
            analysis_text: Some(text.into()),
            is_error: true,
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

// ============================================================================
// Client Side
// ============================================================================

/// Input field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SalesRepNames,
    Transcript,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Please enter the Sales Rep(s) name(s).")]
    MissingSalesReps,
    #[error("Please paste a transcript before analyzing.")]
    MissingTranscript,
}

impl SubmissionError {
    pub fn field(&self) -> Field {
        match self {
            SubmissionError::MissingSalesReps => Field::SalesRepNames,
            SubmissionError::MissingTranscript => Field::Transcript,
        }
    }
}

/// Validate user input and build the request.
///
/// Rep names are checked before the transcript, and both are trimmed.
pub fn prepare_request(
    transcript: &str,
    sales_rep_names: &str,
) -> Result<AnalyzeRequest, SubmissionError> {
    let transcript = transcript.trim();
    let sales_rep_names = sales_rep_names.trim();

    if sales_rep_names.is_empty() {
        return Err(SubmissionError::MissingSalesReps);
    }
    if transcript.is_empty() {
        return Err(SubmissionError::MissingTranscript);
    }

    Ok(AnalyzeRequest {
        transcript: transcript.to_string(),
        sales_rep_names: sales_rep_names.to_string(),
        merchant_names: MERCHANT_LABEL.to_string(),
    })
}

/// What the client should do with a backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A report to parse and display.
    Report(String),
    /// The backend failed; show its message.
    BackendError(String),
    /// The model refused the input (missing speaker roles, unredacted data, ...).
    Flagged(String),
    /// Success status but nothing to show.
    Empty,
}

/// Interpret a response by status code and decoded body.
///
/// `body` is `None` when the body was not valid JSON. A success status with
/// no usable body is [`Outcome::Empty`].
pub fn interpret_response(status: u16, body: Option<AnalyzeResponse>) -> Outcome {
    if !(200..300).contains(&status) {
        let message = body
            .and_then(|b| b.error)
            .unwrap_or_else(|| format!("Server error: {}", status));
        return Outcome::BackendError(message);
    }

    let Some(body) = body else {
        return Outcome::Empty;
    };

    if let Some(error) = body.error {
        return Outcome::BackendError(error);
    }
    if body.is_error {
        return Outcome::Flagged(body.analysis_text.unwrap_or_default());
    }

    match body.analysis_text {
        Some(text) if !text.is_empty() => Outcome::Report(text),
        _ => Outcome::Empty,
    }
}

// ============================================================================
// Server Side
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestRejection {
    #[error("No transcript provided.")]
    MissingTranscript,
    #[error("Sales Rep name(s) not provided.")]
    MissingSalesReps,
}

pub fn validate_request(request: &AnalyzeRequest) -> Result<(), RequestRejection> {
    if request.transcript.trim().is_empty() {
        return Err(RequestRejection::MissingTranscript);
    }
    if request.sales_rep_names.trim().is_empty() {
        return Err(RequestRejection::MissingSalesReps);
    }
    Ok(())
}

/// Fixed replies the model is instructed to give instead of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    NeedSpeakerRoles,
    DataNotRedacted,
    UnsupportedInput,
}

impl Sentinel {
    pub fn token(self) -> &'static str {
        match self {
            Sentinel::NeedSpeakerRoles => "NEED_SPEAKER_ROLES",
            Sentinel::DataNotRedacted => "DATA_NOT_REDACTED",
            Sentinel::UnsupportedInput => "UNSUPPORTED_INPUT",
        }
    }

    /// `NEED_SPEAKER_ROLES` carries an explanation after the token; the others stand alone.
    pub fn detect(reply: &str) -> Option<Sentinel> {
        let reply = reply.trim();
        if reply.starts_with(Sentinel::NeedSpeakerRoles.token()) {
            return Some(Sentinel::NeedSpeakerRoles);
        }
        [Sentinel::DataNotRedacted, Sentinel::UnsupportedInput]
            .into_iter()
            .find(|sentinel| reply == sentinel.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelReply {
    Flagged(Sentinel, String),
    Report(String),
    Empty,
}

pub fn classify_model_reply(reply: &str) -> ModelReply {
    if let Some(sentinel) = Sentinel::detect(reply) {
        return ModelReply::Flagged(sentinel, reply.trim().to_string());
    }
    if reply.trim().is_empty() {
        return ModelReply::Empty;
    }
    ModelReply::Report(reply.to_string())
}

impl From<ModelReply> for AnalyzeResponse {
    fn from(reply: ModelReply) -> Self {
        match reply {
            ModelReply::Flagged(_, text) => AnalyzeResponse::flagged(text),
            ModelReply::Report(text) => AnalyzeResponse::report(text),
            ModelReply::Empty => AnalyzeResponse::error(NO_CONTENT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // prepare_request tests
    // ============================================================================

    #[test]
    fn test_prepare_request_trims_and_sets_merchant() {
        let request = prepare_request("  Rep: hi\nMerchant: hello \n", " Alice ").unwrap();
        assert_eq!(request.transcript, "Rep: hi\nMerchant: hello");
        assert_eq!(request.sales_rep_names, "Alice");
        assert_eq!(request.merchant_names, "Customer");
    }

    #[test]
    fn test_prepare_request_checks_reps_first() {
        let err = prepare_request("", "  ").unwrap_err();
        assert_eq!(err, SubmissionError::MissingSalesReps);
        assert_eq!(err.field(), Field::SalesRepNames);
        assert_eq!(err.to_string(), "Please enter the Sales Rep(s) name(s).");
    }

    #[test]
    fn test_prepare_request_missing_transcript() {
        let err = prepare_request(" \n ", "Alice").unwrap_err();
        assert_eq!(err, SubmissionError::MissingTranscript);
        assert_eq!(err.field(), Field::Transcript);
    }

    #[test]
    fn test_request_serializes_wire_names() {
        let request = prepare_request("t", "r").unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "transcript": "t",
                "sales_rep_names": "r",
                "merchant_names": "Customer"
            })
        );
    }

    // ============================================================================
    // interpret_response tests
    // ============================================================================

    #[test]
    fn test_interpret_report() {
        let body = AnalyzeResponse::report("Final Score: 90/100 (Strong)");
        assert_eq!(
            interpret_response(200, Some(body)),
            Outcome::Report("Final Score: 90/100 (Strong)".to_string())
        );
    }

    #[test]
    fn test_interpret_error_status_uses_backend_message() {
        let body = AnalyzeResponse::error("Sales Rep name(s) not provided.");
        assert_eq!(
            interpret_response(400, Some(body)),
            Outcome::BackendError("Sales Rep name(s) not provided.".to_string())
        );
    }

    #[test]
    fn test_interpret_error_status_without_body() {
        assert_eq!(
            interpret_response(502, None),
            Outcome::BackendError("Server error: 502".to_string())
        );
        assert_eq!(
            interpret_response(500, Some(AnalyzeResponse::default())),
            Outcome::BackendError("Server error: 500".to_string())
        );
    }

    #[test]
    fn test_interpret_error_field_on_success_status() {
        assert_eq!(
            interpret_response(200, Some(AnalyzeResponse::error("quota"))),
            Outcome::BackendError("quota".to_string())
        );
    }

    #[test]
    fn test_interpret_flagged() {
        assert_eq!(
            interpret_response(200, Some(AnalyzeResponse::flagged("DATA_NOT_REDACTED"))),
            Outcome::Flagged("DATA_NOT_REDACTED".to_string())
        );
    }

    #[test]
    fn test_interpret_empty() {
        assert_eq!(interpret_response(200, None), Outcome::Empty);
        assert_eq!(
            interpret_response(200, Some(AnalyzeResponse::default())),
            Outcome::Empty
        );
        assert_eq!(
            interpret_response(200, Some(AnalyzeResponse::report(""))),
            Outcome::Empty
        );
    }

    #[test]
    fn test_response_deserializes_partial_bodies() {
        let body: AnalyzeResponse =
            serde_json::from_str(r#"{"analysis_text": "x", "is_error": true}"#).unwrap();
        assert_eq!(body, AnalyzeResponse::flagged("x"));

        let body: AnalyzeResponse = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert_eq!(body, AnalyzeResponse::error("boom"));
    }

    #[test]
    fn test_response_serialization_omits_defaults() {
        let json = serde_json::to_string(&AnalyzeResponse::report("ok")).unwrap();
        assert_eq!(json, r#"{"analysis_text":"ok"}"#);
    }

    // ============================================================================
    // Server-side tests
    // ============================================================================

    #[test]
    fn test_request_defaults_merchant_when_missing() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"transcript": "t", "sales_rep_names": "r"}"#).unwrap();
        assert_eq!(request.merchant_names, "Customer");
        assert_eq!(validate_request(&request), Ok(()));
    }

    #[test]
    fn test_validate_request_checks_transcript_first() {
        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(
            validate_request(&request),
            Err(RequestRejection::MissingTranscript)
        );

        let request: AnalyzeRequest = serde_json::from_str(r#"{"transcript": "t"}"#).unwrap();
        assert_eq!(
            validate_request(&request).unwrap_err().to_string(),
            "Sales Rep name(s) not provided."
        );
    }

    #[test]
    fn test_detect_sentinels() {
        assert_eq!(
            Sentinel::detect("NEED_SPEAKER_ROLES: Please specify which speaker(s) is/are the sales rep(s)."),
            Some(Sentinel::NeedSpeakerRoles)
        );
        assert_eq!(
            Sentinel::detect(" DATA_NOT_REDACTED\n"),
            Some(Sentinel::DataNotRedacted)
        );
        assert_eq!(
            Sentinel::detect("UNSUPPORTED_INPUT"),
            Some(Sentinel::UnsupportedInput)
        );
        assert_eq!(Sentinel::detect("UNSUPPORTED_INPUT because"), None);
        assert_eq!(Sentinel::detect("Final Score: 90/100 (Strong)"), None);
    }

    #[test]
    fn test_classify_model_reply() {
        assert_eq!(
            classify_model_reply("UNSUPPORTED_INPUT\n"),
            ModelReply::Flagged(Sentinel::UnsupportedInput, "UNSUPPORTED_INPUT".to_string())
        );
        assert_eq!(classify_model_reply("   "), ModelReply::Empty);
        assert_eq!(
            classify_model_reply("Final Score: 90/100 (Strong)\n"),
            ModelReply::Report("Final Score: 90/100 (Strong)\n".to_string())
        );
    }

    #[test]
    fn test_model_reply_into_response() {
        assert_eq!(
            AnalyzeResponse::from(ModelReply::Empty),
            AnalyzeResponse::error("AI service returned no content.")
        );
        assert!(AnalyzeResponse::from(ModelReply::Flagged(
            Sentinel::DataNotRedacted,
            "DATA_NOT_REDACTED".to_string()
        ))
        .is_error);
    }
}
