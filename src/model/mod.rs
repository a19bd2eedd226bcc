pub mod operation;

use std::collections::HashMap;

use serde::Deserialize;

pub use operation::{
    FileRead, FileStat, FileWrite, IoWindow, Operation, Timing, WebMethod, WebRequest,
};

/// Parameters of one block, exactly as they appear in the JSON document.
///
/// Every value is text; the consuming operation parses what it needs.
pub type Parameters = HashMap<String, String>;

/// Entire template as it comes out of the JSON loader.
///
/// Block order is significant: it is the order of the emitted statements.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProgramTemplate {
    #[serde(default, alias = "name")]
    pub name: String,
    #[serde(default, alias = "metadata")]
    pub metadata: ProgramMetadata,
    #[serde(default, alias = "blocks")]
    pub blocks: Vec<ActionTemplate>,
}

/// Descriptive only; copied into the generated file header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProgramMetadata {
    #[serde(default, alias = "author")]
    pub author: String,
    #[serde(default, alias = "notes")]
    pub notes: String,
}

/// One raw, untyped action block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ActionTemplate {
    #[serde(alias = "module")]
    pub module: String,
    #[serde(alias = "operation")]
    pub operation: String,
    #[serde(default, alias = "parameters")]
    pub parameters: Parameters,
}

impl ActionTemplate {
    pub fn new(module: &str, operation: &str, params: &[(&str, &str)]) -> Self {
        Self {
            module: module.to_string(),
            operation: operation.to_string(),
            parameters: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}
