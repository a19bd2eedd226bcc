//! Typed operation descriptors produced by the parameter validator.
//!
//! Each concrete kind is a flat struct that carries the common timing
//! fields by value. Descriptors are immutable once built and are consumed
//! by exactly one lowering call.

/// Attributes shared by every action block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timing {
    /// Milliseconds slept before each execution.
    pub delay: u64,
    /// Extra executions after the first one.
    pub repeat: u64,
}

/// Byte window of a file I/O operation. `length == 0` means "unbounded".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoWindow {
    pub offset: u64,
    pub length: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub timing: Timing,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRead {
    pub timing: Timing,
    pub path: String,
    pub window: IoWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    pub timing: Timing,
    pub path: String,
    pub window: IoWindow,
    /// Stored verbatim; escaping happens when the literal is rendered.
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebMethod {
    Head,
    Get,
    Post,
}

impl WebMethod {
    /// Name of the `ureq` free function issuing this request.
    pub fn as_str(self) -> &'static str {
        match self {
            WebMethod::Head => "head",
            WebMethod::Get => "get",
            WebMethod::Post => "post",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebRequest {
    pub timing: Timing,
    pub method: WebMethod,
    pub uri: String,
    pub retry_count: u64,
    /// Request body; only ever set for `post`.
    pub body: Option<String>,
}

/// Validated descriptor for one action block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    FileStat(FileStat),
    FileRead(FileRead),
    FileWrite(FileWrite),
    Web(WebRequest),
}
