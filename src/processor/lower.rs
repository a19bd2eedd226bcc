//! Lowering: validated descriptors → statements of the generated `main`.
//!
//! Every lowered block is a marker plus exactly one top-level statement.
//! Timing wraps that statement, so repetition never changes the top-level
//! count. Statements are token streams; `writer` parses and formats them.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use crate::model::{Operation, Timing, WebMethod};

use super::names::NameGenerator;

/// Crate the generated program must depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dependency {
    pub name: &'static str,
    pub version: &'static str,
}

pub const UREQ: Dependency = Dependency {
    name: "ureq",
    version: "2",
};

/// Output of lowering one block.
#[derive(Debug, Clone)]
pub struct Lowered {
    /// Unique label, rendered as `// Operation: <marker>` above `stmt`.
    pub marker: String,
    /// The single top-level statement, timing already applied.
    pub stmt: TokenStream,
    pub requires: Option<Dependency>,
}

impl Lowered {
    fn new(
        kind: &str,
        timing: Timing,
        stmt: TokenStream,
        requires: Option<Dependency>,
        names: &mut dyn NameGenerator,
    ) -> Self {
        Self {
            marker: names.next(kind),
            stmt: with_timing(timing, stmt),
            requires,
        }
    }
}

/// Run `stmt` `repeat + 1` times, sleeping `delay` ms before each run.
pub fn with_timing(timing: Timing, stmt: TokenStream) -> TokenStream {
    if timing == Timing::default() {
        return stmt;
    }

    let sleep = (timing.delay > 0).then(|| {
        let ms = Literal::u64_unsuffixed(timing.delay);
        quote! { std::thread::sleep(std::time::Duration::from_millis(#ms)); }
    });

    if timing.repeat == 0 {
        quote! { { #sleep #stmt } }
    } else {
        let runs = Literal::u64_unsuffixed(timing.repeat.saturating_add(1));
        quote! { for _ in 0..#runs { #sleep #stmt } }
    }
}

// ─────────────────────────────────────────────────────
// Per-kind lowering, registered next to each validator.
// Each returns `None` for a descriptor of another kind.
// ─────────────────────────────────────────────────────

// `let _ = std::fs::metadata("<path>");`
pub fn file_stat(op: &Operation, names: &mut dyn NameGenerator) -> Option<Lowered> {
    let Operation::FileStat(op) = op else {
        return None;
    };
    let path = Literal::string(&op.path);
    let stmt = quote! { let _ = std::fs::metadata(#path); };
    Some(Lowered::new("file_stat", op.timing, stmt, None, names))
}

pub fn file_read(op: &Operation, names: &mut dyn NameGenerator) -> Option<Lowered> {
    let Operation::FileRead(op) = op else {
        return None;
    };
    let path = Literal::string(&op.path);
    let window = op.window;

    let binding = if window.offset > 0 || window.length == 0 {
        quote! { let mut file }
    } else {
        quote! { let file }
    };
    let seek = (window.offset > 0).then(|| seek(window.offset));
    let source = if window.length > 0 {
        let length = Literal::u64_unsuffixed(window.length);
        quote! { std::io::Read::take(file, #length) }
    } else {
        quote! { file }
    };

    let stmt = io_scope(
        quote! { std::io::Result<Vec<u8>> },
        quote! {
            #binding = std::fs::File::open(#path)?;
            #seek
            let mut buf = Vec::new();
            std::io::Read::read_to_end(&mut #source, &mut buf)?;
            Ok(buf)
        },
    );
    Some(Lowered::new("file_read", op.timing, stmt, None, names))
}

pub fn file_write(op: &Operation, names: &mut dyn NameGenerator) -> Option<Lowered> {
    let Operation::FileWrite(op) = op else {
        return None;
    };
    let path = Literal::string(&op.path);
    let window = op.window;
    let truncate = window.offset == 0;
    let seek = (window.offset > 0).then(|| seek(window.offset));

    let mut data = op.content.as_bytes();
    if window.length > 0 {
        let limit = usize::try_from(window.length).unwrap_or(usize::MAX);
        data = &data[..data.len().min(limit)];
    }
    let data = Literal::byte_string(data);

    let stmt = io_scope(
        quote! { std::io::Result<()> },
        quote! {
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(#truncate)
                .open(#path)?;
            #seek
            std::io::Write::write_all(&mut file, #data)?;
            Ok(())
        },
    );
    Some(Lowered::new("file_write", op.timing, stmt, None, names))
}

// `let _ = (0..retry+1).any(|_| ureq::<method>("<uri>").call().is_ok());`
pub fn web_request(op: &Operation, names: &mut dyn NameGenerator) -> Option<Lowered> {
    let Operation::Web(op) = op else {
        return None;
    };
    let method = format_ident!("{}", op.method.as_str());
    let uri = Literal::string(&op.uri);
    let attempts = Literal::u64_unsuffixed(op.retry_count.saturating_add(1));
    let send = match &op.body {
        Some(body) => {
            let body = Literal::string(body);
            quote! { send_string(#body) }
        }
        None => quote! { call() },
    };

    let kind = match op.method {
        WebMethod::Head => "web_head",
        WebMethod::Get => "web_get",
        WebMethod::Post => "web_post",
    };
    let stmt = quote! {
        let _ = (0..#attempts).any(|_| ureq::#method(#uri).#send.is_ok());
    };
    Some(Lowered::new(kind, op.timing, stmt, Some(UREQ), names))
}

fn seek(offset: u64) -> TokenStream {
    let offset = Literal::u64_unsuffixed(offset);
    quote! { std::io::Seek::seek(&mut file, std::io::SeekFrom::Start(#offset))?; }
}

/// `let _ = (|| -> <ret> { body })();`: lets `?` work inside `main` while
/// the generated program keeps going after a failed operation.
fn io_scope(ret: TokenStream, body: TokenStream) -> TokenStream {
    quote! {
        let _ = (|| -> #ret { #body })();
    }
}
