//! Ingestion: read a template file and decode it into a [`ProgramTemplate`].

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::model::ProgramTemplate;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("template {} does not exist; pass the path to an existing JSON file", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("cannot read template {}", .path.display())]
    TemplateAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("template is not a valid program description")]
    Decode(#[from] serde_json::Error),
}

/// Read and decode the template at `path`.
pub fn load(path: &Path) -> Result<ProgramTemplate, IngestError> {
    let json = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => IngestError::TemplateNotFound(path.to_path_buf()),
        _ => IngestError::TemplateAccess {
            path: path.to_path_buf(),
            source,
        },
    })?;
    info!(bytes = json.len(), "template loaded");

    let template = load_from_json(&json)?;
    info!(
        name = %template.name,
        blocks = template.blocks.len(),
        "template decoded"
    );
    Ok(template)
}

/// Decode a template from JSON text.
///
/// Every parameter value must be a JSON string; numbers or booleans are
/// rejected here rather than coerced.
pub fn load_from_json(json: &str) -> Result<ProgramTemplate, IngestError> {
    Ok(serde_json::from_str(json)?)
}
