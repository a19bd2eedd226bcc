//! Closed table mapping (module, operation) to a validator and a lowering.
//!
//! Lookup is two-level: the module must be one of the known families, then
//! the operation must belong to that family. Both checks run before any
//! parameter is looked at.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::model::{FileRead, FileStat, FileWrite, Operation, Parameters, WebMethod, WebRequest};

use super::error::BlockError;
use super::lower::{self, Lowered};
use super::names::NameGenerator;
use super::params;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    File,
    Web,
    Embed,
}

impl Module {
    pub const ALL: [Module; 3] = [Module::File, Module::Web, Module::Embed];

    pub fn as_str(self) -> &'static str {
        match self {
            Module::File => "file",
            Module::Web => "web",
            Module::Embed => "embed",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| BlockError::UnsupportedModule {
                module: s.to_string(),
                allowed: join(Module::ALL.iter().map(|m| m.as_str())),
            })
    }
}

/// Turns a block's parameters into a typed descriptor.
pub type Validator = fn(&Parameters) -> Result<Operation, BlockError>;

/// Turns the descriptor produced by the paired validator into a statement.
pub type Lowering = fn(&Operation, &mut dyn NameGenerator) -> Option<Lowered>;

/// One registered operation.
#[derive(Debug)]
pub struct Entry {
    pub module: Module,
    pub operation: &'static str,
    pub validate: Validator,
    pub lower: Lowering,
}

/// Result of a successful lookup.
#[derive(Debug, Clone, Copy)]
pub enum Dispatch {
    /// Validate with the entry, then lower the descriptor.
    Lowered(&'static Entry),
    /// The module is known but has no operations yet; nothing is emitted.
    Reserved(Module),
}

static ENTRIES: &[Entry] = &[
    Entry {
        module: Module::File,
        operation: "stat",
        validate: file_stat,
        lower: lower::file_stat,
    },
    Entry {
        module: Module::File,
        operation: "read",
        validate: file_read,
        lower: lower::file_read,
    },
    Entry {
        module: Module::File,
        operation: "write",
        validate: file_write,
        lower: lower::file_write,
    },
    Entry {
        module: Module::Web,
        operation: "head",
        validate: web_head,
        lower: lower::web_request,
    },
    Entry {
        module: Module::Web,
        operation: "get",
        validate: web_get,
        lower: lower::web_request,
    },
    Entry {
        module: Module::Web,
        operation: "post",
        validate: web_post,
        lower: lower::web_request,
    },
];

/// Modules that accept any operation name and emit nothing.
const RESERVED: &[Module] = &[Module::Embed];

/// Read-only index over [`ENTRIES`], built on first use.
pub struct Registry {
    index: HashMap<Module, HashMap<&'static str, &'static Entry>>,
}

static GLOBAL: LazyLock<Registry> = LazyLock::new(|| {
    let mut index: HashMap<Module, HashMap<&'static str, &'static Entry>> = HashMap::new();
    for entry in ENTRIES {
        index
            .entry(entry.module)
            .or_default()
            .insert(entry.operation, entry);
    }
    Registry { index }
});

impl Registry {
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    pub fn resolve(&self, module: &str, operation: &str) -> Result<Dispatch, BlockError> {
        let module: Module = module.parse()?;
        if RESERVED.contains(&module) {
            return Ok(Dispatch::Reserved(module));
        }

        self.index
            .get(&module)
            .and_then(|ops| ops.get(operation))
            .copied()
            .map(Dispatch::Lowered)
            .ok_or_else(|| BlockError::UnsupportedOperation {
                module: module.to_string(),
                operation: operation.to_string(),
                allowed: join(operations(module)),
            })
    }
}

/// Operation names of `module`, in registration order.
pub fn operations(module: Module) -> impl Iterator<Item = &'static str> {
    ENTRIES
        .iter()
        .filter(move |e| e.module == module)
        .map(|e| e.operation)
}

fn join<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

// ─────────────────────────────────────────────────────
// Validators
// ─────────────────────────────────────────────────────

fn file_stat(p: &Parameters) -> Result<Operation, BlockError> {
    let r = params::validate(p, params::FILE_STAT_SCHEMA)?;
    Ok(Operation::FileStat(FileStat {
        timing: r.timing(),
        path: r.text("path"),
    }))
}

fn file_read(p: &Parameters) -> Result<Operation, BlockError> {
    let r = params::validate(p, params::FILE_READ_SCHEMA)?;
    Ok(Operation::FileRead(FileRead {
        timing: r.timing(),
        path: r.text("path"),
        window: r.window(),
    }))
}

fn file_write(p: &Parameters) -> Result<Operation, BlockError> {
    let r = params::validate(p, params::FILE_WRITE_SCHEMA)?;
    Ok(Operation::FileWrite(FileWrite {
        timing: r.timing(),
        path: r.text("path"),
        window: r.window(),
        content: r.text("content"),
    }))
}

fn web(p: &Parameters, method: WebMethod) -> Result<Operation, BlockError> {
    let schema = match method {
        WebMethod::Post => params::WEB_POST_SCHEMA,
        WebMethod::Head | WebMethod::Get => params::WEB_SCHEMA,
    };
    let r = params::validate(p, schema)?;
    Ok(Operation::Web(WebRequest {
        timing: r.timing(),
        method,
        uri: r.text("uri"),
        retry_count: r.count("retry"),
        body: (method == WebMethod::Post).then(|| r.text("content")),
    }))
}

fn web_head(p: &Parameters) -> Result<Operation, BlockError> {
    web(p, WebMethod::Head)
}

fn web_get(p: &Parameters) -> Result<Operation, BlockError> {
    web(p, WebMethod::Get)
}

fn web_post(p: &Parameters) -> Result<Operation, BlockError> {
    web(p, WebMethod::Post)
}
