use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Outcome of the last statement in a raw SQL console run.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SqlExecution {
    #[serde(rename_all = "camelCase")]
    Rows {
        columns: Vec<String>,
        rows: Vec<JsonMap<String, JsonValue>>,
    },
    #[serde(rename_all = "camelCase")]
    Statement { rows_affected: usize },
}
