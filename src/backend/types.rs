//! Wire types exchanged with the chat backend.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Status value the backend uses for a successfully processed request.
pub const STATUS_SUCCESS: &str = "success";

/// Reply type flag marking a structured report.
pub const REPLY_TYPE_REPORT: &str = "report";

/// Marker the report service emits when a metric could not be computed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Trimmed user input.
    pub message: String,
}

/// Body returned by `POST /chat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// `"success"` or anything else for an application-level failure.
    #[serde(default)]
    pub status: String,
    /// Optional reply type; `"report"` marks a structured report.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Human-readable reply text.
    #[serde(default)]
    pub message: String,
    /// Structured report, present when `kind` is `"report"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_data: Option<Report>,
}

/// What the UI should render for a decoded chat reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyOutcome {
    /// Plain bot message with the literal reply text.
    Text(String),
    /// Report message with its attached data.
    Report {
        /// Analysis text shown in the report body.
        message: String,
        /// Structured report data.
        report: Report,
    },
    /// The backend answered but did not report success.
    Failed,
}

impl ChatReply {
    /// Whether the backend reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// Whether this reply carries a structured report.
    #[must_use]
    pub fn is_report(&self) -> bool {
        self.kind.as_deref() == Some(REPLY_TYPE_REPORT)
    }

    /// Decide how the reply is rendered.
    ///
    /// A report reply without `report_data` still renders as a report, with
    /// an empty summary.
    #[must_use]
    pub fn into_outcome(self) -> ReplyOutcome {
        if !self.is_success() {
            return ReplyOutcome::Failed;
        }
        if self.is_report() {
            ReplyOutcome::Report {
                message: self.message,
                report: self.report_data.unwrap_or_default(),
            }
        } else {
            ReplyOutcome::Text(self.message)
        }
    }
}

/// Structured sustainability report attached to a report reply.
///
/// Fields the UI does not interpret are kept in `extra` so the report can be
/// sent back unchanged for validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: ReportSummary,
    /// Identifier of the generated report (an ISO timestamp in practice).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Headline figures of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sustainability_score: Option<Metric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_points_analyzed: Option<Metric>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_recommendations: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReportSummary {
    /// Score to display, if the backend computed one.
    #[must_use]
    pub fn score(&self) -> Option<&Metric> {
        self.sustainability_score.as_ref().filter(|m| m.is_available())
    }

    /// Number of analyzed data points to display, if known.
    #[must_use]
    pub fn data_points(&self) -> Option<&Metric> {
        self.data_points_analyzed.as_ref().filter(|m| m.is_available())
    }
}

/// A summary metric: a number, or a textual marker such as `"N/A"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(serde_json::Number),
    Text(String),
}

impl Metric {
    /// `false` for the `"N/A"` marker.
    #[must_use]
    pub fn is_available(&self) -> bool {
        match self {
            Self::Number(_) => true,
            Self::Text(text) => text != NOT_AVAILABLE,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Body of `POST /validate-report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRequest {
    /// Analysis text as displayed in the report.
    pub report_text: String,
    /// The report data exactly as received.
    pub report_data: Report,
}

/// Fact-check result for a rendered report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_accuracy: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_facts: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified_facts: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discrepancies: Vec<Discrepancy>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Display tier for the overall accuracy.
    #[must_use]
    pub fn tier(&self) -> AccuracyTier {
        AccuracyTier::from_accuracy(self.overall_accuracy)
    }

    /// Accuracy as shown to the user: whole numbers without a fraction.
    #[must_use]
    pub fn accuracy_label(&self) -> String {
        let accuracy = self.overall_accuracy;
        if accuracy.is_finite() && accuracy.fract() == 0.0 {
            format!("{accuracy:.0}%")
        } else {
            format!("{accuracy}%")
        }
    }
}

/// A single mismatch between the report and the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    #[serde(default, deserialize_with = "null_as_default")]
    pub issue: String,
    #[serde(default)]
    pub reported_value: Value,
    #[serde(default)]
    pub actual_value: Value,
}

impl Discrepancy {
    #[must_use]
    pub fn reported(&self) -> String {
        display_value(&self.reported_value)
    }

    #[must_use]
    pub fn actual(&self) -> String {
        display_value(&self.actual_value)
    }
}

/// Render a JSON scalar as plain text (strings without quotes).
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Color tier for a validation accuracy percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyTier {
    /// 90 and above.
    Success,
    /// 70 up to 90.
    Warning,
    /// Below 70.
    Danger,
}

impl AccuracyTier {
    #[must_use]
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy >= 90.0 {
            Self::Success
        } else if accuracy >= 70.0 {
            Self::Warning
        } else {
            Self::Danger
        }
    }
}
