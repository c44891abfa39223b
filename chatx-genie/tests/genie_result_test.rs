//! Integration tests for [`chatx_genie::GenieResult::process_query_results`].
//!
//! Covers: tabular card assembly with typed columns, NULL cell rendering,
//! missing manifest, missing result data, message-only results, and the
//! no-data fallback.

use std::io;
use std::sync::{Arc, Mutex};

use serde_json::json;

use chatx_genie::{
    ColumnInfo, GenieResult, GenieResultMetadata, ResultData, ResultManifest, ResultSchema,
    StatementResponse,
};

/// Collects formatted log output so tests can assert on emitted events.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn columns(specs: &[(&str, &str)]) -> ResultManifest {
    ResultManifest {
        schema: Some(ResultSchema {
            columns: Some(
                specs
                    .iter()
                    .map(|(name, type_name)| ColumnInfo {
                        name: name.to_string(),
                        type_name: Some(type_name.to_string()),
                    })
                    .collect(),
            ),
        }),
    }
}

/// **Test: full result renders a table card with formatted values and row count.**
///
/// **Setup:** 3 rows over `id:int, name:string, amount:double`, row_count=5.
/// **Action:** `process_query_results()`, serialize the activity.
/// **Expected:** values present, doubles with two decimals, `**Row Count:** 5`.
#[test]
fn test_genie_result() {
    let result = GenieResult {
        query_description: Some("Test Query".to_string()),
        query_result_metadata: Some(GenieResultMetadata { row_count: Some(5) }),
        statement_response: Some(StatementResponse {
            result: Some(ResultData {
                data_array: Some(vec![
                    vec![json!(1), json!("Alice"), json!(100.0)],
                    vec![json!(2), json!("Bob"), json!(200.0)],
                    vec![json!(3), json!("Charlie"), json!(300.0)],
                ]),
            }),
            manifest: Some(columns(&[
                ("id", "INT"),
                ("name", "STRING"),
                ("amount", "DOUBLE"),
            ])),
        }),
        ..Default::default()
    };

    let response = serde_json::to_string(&result.process_query_results()).unwrap();

    assert!(response.contains("1"));
    assert!(response.contains("Alice"));
    assert!(response.contains("100.00"));
    assert!(response.contains("2"));
    assert!(response.contains("Bob"));
    assert!(response.contains("200.00"));
    assert!(response.contains("**Row Count:** 5"));
}

/// **Test: null cells render as the literal NULL token.**
///
/// **Setup:** rows with interleaved nulls in string-typed columns.
/// **Action:** serialize the formatted activity.
/// **Expected:** `NULL` appears; non-null values untouched.
#[test]
fn test_genie_result_with_null_values() {
    let result = GenieResult {
        query_description: Some("Test Query with NULL values".to_string()),
        statement_response: Some(StatementResponse {
            result: Some(ResultData {
                data_array: Some(vec![
                    vec![json!(1), json!(null), json!("test")],
                    vec![json!(2), json!("Bob"), json!(null)],
                ]),
            }),
            manifest: Some(columns(&[
                ("id", "INT"),
                ("name", "STRING"),
                ("value", "STRING"),
            ])),
        }),
        ..Default::default()
    };

    let response = serde_json::to_string(&result.process_query_results()).unwrap();

    assert!(response.contains("NULL"));
    assert!(response.contains("1"));
    assert!(response.contains("2"));
    assert!(response.contains("test"));
}

/// **Test: missing manifest still renders a card with synthesized headers.**
///
/// **Setup:** row data, no manifest.
/// **Action:** `process_query_results()`.
/// **Expected:** no panic; positional `col0`/`col1` headers; values present.
#[test]
fn test_genie_result_missing_manifest() {
    let result = GenieResult {
        query_description: Some("Test Query with missing manifest".to_string()),
        statement_response: Some(StatementResponse {
            result: Some(ResultData {
                data_array: Some(vec![vec![json!(1), json!("test")]]),
            }),
            manifest: None,
        }),
        ..Default::default()
    };

    let activity = result.process_query_results();
    assert_eq!(activity.activity_type, "message");
    assert!(!activity.attachments.is_empty());

    let response = serde_json::to_string(&activity).unwrap();
    assert!(response.contains("col0"));
    assert!(response.contains("col1"));
    assert!(response.contains("test"));
}

/// **Test: missing manifest emits a warning while still producing the card.**
///
/// **Setup:** row data without a manifest; a scoped subscriber capturing output.
/// **Action:** `process_query_results()` under the capture subscriber.
/// **Expected:** card produced; captured output contains a manifest warning.
#[test]
fn test_genie_result_missing_manifest_logs_warning() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let result = GenieResult {
        query_description: Some("Schemaless query".to_string()),
        statement_response: Some(StatementResponse {
            result: Some(ResultData {
                data_array: Some(vec![vec![json!(1), json!("test")]]),
            }),
            manifest: None,
        }),
        ..Default::default()
    };

    let activity = tracing::subscriber::with_default(subscriber, || result.process_query_results());

    assert!(!activity.attachments.is_empty());
    let output = logs.contents();
    assert!(output.contains("WARN"));
    assert!(output.contains("manifest"));
}

/// **Test: missing result data degrades to a text activity with the description.**
#[test]
fn test_genie_result_missing_result() {
    let result = GenieResult {
        query_description: Some("Test Query with missing result".to_string()),
        statement_response: Some(StatementResponse::default()),
        ..Default::default()
    };

    let activity = result.process_query_results();

    assert_eq!(activity.activity_type, "message");
    assert!(activity
        .text
        .as_deref()
        .unwrap_or_default()
        .contains("Test Query with missing result"));
    assert!(activity.attachments.is_empty());
}

/// **Test: missing result with no description still yields non-empty text.**
#[test]
fn test_genie_result_missing_result_no_description() {
    let result = GenieResult {
        statement_response: Some(StatementResponse::default()),
        ..Default::default()
    };

    let activity = result.process_query_results();

    assert_eq!(activity.activity_type, "message");
    assert_eq!(activity.text.as_deref(), Some("No data available."));
}

/// **Test: empty data_array degrades the same way as a missing result.**
#[test]
fn test_genie_result_empty_data_array() {
    let result = GenieResult {
        query_description: Some("Query with zero rows".to_string()),
        statement_response: Some(StatementResponse {
            result: Some(ResultData {
                data_array: Some(vec![]),
            }),
            manifest: None,
        }),
        ..Default::default()
    };

    let activity = result.process_query_results();

    assert_eq!(activity.activity_type, "message");
    assert_eq!(activity.text.as_deref(), Some("Query with zero rows"));
    assert!(activity.attachments.is_empty());
}

/// **Test: message-only result becomes a text activity with that message.**
#[test]
fn test_genie_result_message_only() {
    let result = GenieResult {
        message: Some("This is a simple message response".to_string()),
        ..Default::default()
    };

    let activity = result.process_query_results();

    assert_eq!(activity.activity_type, "message");
    assert!(activity
        .text
        .as_deref()
        .unwrap_or_default()
        .contains("This is a simple message response"));
}

/// **Test: neither statement_response nor message falls back to "No data available."**
#[test]
fn test_genie_result_no_data_fallback() {
    let result = GenieResult {
        query_description: Some("Just a description, no data".to_string()),
        ..Default::default()
    };

    let activity = result.process_query_results();

    assert_eq!(activity.activity_type, "message");
    let text = activity.text.as_deref().unwrap_or_default();
    assert!(text.contains("No data available."));
    assert!(text.contains("Just a description, no data"));
}

/// **Test: fallback with no description is just "No data available."**
#[test]
fn test_genie_result_no_data_no_description() {
    let activity = GenieResult::default().process_query_results();

    assert_eq!(activity.activity_type, "message");
    assert_eq!(activity.text.as_deref(), Some("No data available."));
}
