use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Diagnostic toggles.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[schemars(title = "Debug", inline)]
#[serde(default)]
pub struct DebugOptions {
    /// Log a full record dump at trace level when animations are scheduled
    /// and retired.
    #[schemars(title = "Trace Records")]
    pub trace_records: bool,
}
