//! MCP tool definition shapes (tools/<category>/*.json).
//!
//! These files come straight out of MCP server dumps, so the field names are
//! camelCase on disk.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: ToolSchema,
    #[serde(
        default,
        rename = "outputSchema",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_schema: Option<ToolSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Value>,
    #[serde(default, rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolServerData {
    pub filename: String,
    pub name: String,
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
    // Legacy single data file; newer dumps carry `dataFiles` or a whole
    // `dataDir` of CSVs.
    #[serde(default, rename = "dataFile", skip_serializing_if = "Option::is_none")]
    pub data_file: Option<String>,
    #[serde(default, rename = "dataFiles", skip_serializing_if = "Option::is_none")]
    pub data_files: Option<Vec<String>>,
    #[serde(default, rename = "dataDir", skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

impl ToolServerData {
    /// All CSV data files the server references, legacy field included.
    pub fn all_data_files(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(f) = self.data_file.as_ref() {
            out.push(f.clone());
        }
        if let Some(fs) = self.data_files.as_ref() {
            out.extend(fs.iter().cloned());
        }
        out
    }
}
