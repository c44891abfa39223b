//! Genie query-result model and its conversion into chat activities.
//!
//! A [`GenieResult`] is built once per query turn by the backend, consumed
//! exactly once by [`GenieResult::process_query_results`], and discarded. All
//! optional sub-fields are explicit `Option`s; every missing-field combination
//! degrades to a displayable text activity rather than an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use chatx_core::{Activity, AdaptiveCard, TextBlock};

use crate::format::markdown_table;

/// One query turn's result: description, free-text answer, and optionally the
/// executed statement's rows and schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenieResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statement_response: Option<StatementResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_result_metadata: Option<GenieResultMetadata>,
}

/// Structured result of a backend-executed statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<ResultManifest>,
}

/// Row data: ordered rows of raw cell values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_array: Option<Vec<Vec<Value>>>,
}

/// Schema metadata for a statement response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultManifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ResultSchema>,
}

/// Ordered column descriptors. Column order defines the positional meaning of
/// each row's values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ColumnInfo>>,
}

/// A single column descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// Row-count metadata attached to a query result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenieResultMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<u64>,
}

impl GenieResult {
    /// Formats this result into a chat activity.
    ///
    /// Priority order: tabular card when statement rows exist; text-only
    /// description when the statement has no row data; the free-text message
    /// when there is no statement at all; a "No data available." fallback
    /// otherwise. Never fails; missing sub-fields only degrade the output.
    pub fn process_query_results(&self) -> Activity {
        if let Some(statement) = &self.statement_response {
            let rows = statement
                .result
                .as_ref()
                .and_then(|r| r.data_array.as_deref())
                .filter(|rows| !rows.is_empty());

            if let Some(rows) = rows {
                return self.table_card(statement, rows);
            }

            error!(
                query_description = ?self.query_description,
                "statement response has no result data, falling back to description"
            );
            // Output text must never be empty, even with no description.
            return Activity::message(
                self.query_description
                    .clone()
                    .unwrap_or_else(|| "No data available.".to_string()),
            );
        }

        if let Some(message) = &self.message {
            return Activity::message(message.clone());
        }

        let text = match self.query_description.as_deref() {
            Some(description) => format!("No data available. {}", description),
            None => "No data available.".to_string(),
        };
        Activity::message(text)
    }

    /// Builds the adaptive table card for non-empty row data.
    fn table_card(&self, statement: &StatementResponse, rows: &[Vec<Value>]) -> Activity {
        let declared = match statement
            .manifest
            .as_ref()
            .and_then(|m| m.schema.as_ref())
            .and_then(|s| s.columns.as_ref())
        {
            Some(columns) => columns.iter().map(|c| c.name.clone()).collect(),
            None => {
                warn!(
                    query_description = ?self.query_description,
                    "result manifest missing, synthesizing positional column headers"
                );
                Vec::new()
            }
        };

        let mut body = Vec::new();
        if let Some(description) = &self.query_description {
            body.push(TextBlock::heading(description.clone()));
        }
        body.push(TextBlock::new(markdown_table(&declared, rows)));
        if let Some(row_count) = self.query_result_metadata.as_ref().and_then(|m| m.row_count) {
            body.push(TextBlock::new(format!("**Row Count:** {}", row_count)));
        }

        Activity::with_card(AdaptiveCard::new(body))
    }
}
