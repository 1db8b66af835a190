use serde::{Deserialize, Serialize};

/// Leading text of every client-side failure message.
pub const FAILURE_PREFIX: &str = "Error: ";

/// The detail of a failure message without its [`FAILURE_PREFIX`].
///
/// Server-authored messages carry no prefix and are returned unchanged.
pub fn failure_detail(message: &str) -> &str {
    message.strip_prefix(FAILURE_PREFIX).unwrap_or(message)
}

/// Reply from the recognition endpoint, kept in its wire shape.
///
/// Fields beyond `success` and `message` are only present on a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<bool>,
}

/// A matched person as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub roll_no: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, roll_no: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roll_no: roll_no.into(),
        }
    }
}

/// What a [`RecognitionResult`] means for the attendance log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// Marked present by this capture.
    FirstMatch(Identity),
    /// Already marked present earlier in the attendance period.
    Duplicate(Identity),
    Failed(String),
}

impl RecognitionResult {
    /// The uniform failure shape: `success: false`, `message: "Error: <detail>"`.
    pub fn failure(detail: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            message: format!("{FAILURE_PREFIX}{detail}"),
            name: None,
            roll_no: None,
            duplicate: None,
        }
    }

    pub fn matched(name: &str, roll_no: &str, duplicate: bool, message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            name: Some(name.to_string()),
            roll_no: Some(roll_no.to_string()),
            duplicate: Some(duplicate),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        self.duplicate.unwrap_or(false)
    }

    /// A successful reply without both identity fields counts as a failure.
    pub fn outcome(&self) -> RecognitionOutcome {
        if !self.success {
            return RecognitionOutcome::Failed(self.message.clone());
        }
        match (&self.name, &self.roll_no) {
            (Some(name), Some(roll_no)) => {
                let identity = Identity::new(name.as_str(), roll_no.as_str());
                if self.is_duplicate() {
                    RecognitionOutcome::Duplicate(identity)
                } else {
                    RecognitionOutcome::FirstMatch(identity)
                }
            }
            _ => RecognitionOutcome::Failed(format!(
                "{FAILURE_PREFIX}recognition reply is missing name or roll_no"
            )),
        }
    }
}

/// Reply from the enrollment endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl EnrollmentResult {
    pub fn failure(detail: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            message: format!("{FAILURE_PREFIX}{detail}"),
        }
    }
}
