//! Turn a compiled [`Program`] into a ready-to-build Cargo project.

pub mod manifest;
pub mod rust;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::processor::Program;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("`{0}` is not a valid package name (use ASCII letters, digits, `-` or `_`, starting with a letter or `_`)")]
    InvalidPackageName(String),

    #[error("formatting generated source failed")]
    Format(#[from] std::fmt::Error),

    #[error("generated program is not valid Rust")]
    Syntax(#[from] syn::Error),
}

/// Source text of the generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub package: String,
    /// `Cargo.toml`
    pub manifest: String,
    /// `src/main.rs`
    pub main_rs: String,
}

pub fn render(program: &Program) -> Result<Rendered, RenderError> {
    check_package_name(&program.package)?;
    Ok(Rendered {
        package: program.package.clone(),
        manifest: manifest::render(program)?,
        main_rs: rust::render(program)?,
    })
}

/// Write `<out_dir>/<package>/{Cargo.toml,src/main.rs}` and return the
/// project directory.
pub fn emit(rendered: &Rendered, out_dir: &Path) -> io::Result<PathBuf> {
    let root = out_dir.join(&rendered.package);
    let src = root.join("src");
    fs::create_dir_all(&src)?;

    fs::write(root.join("Cargo.toml"), &rendered.manifest)?;
    fs::write(src.join("main.rs"), &rendered.main_rs)?;
    Ok(root)
}

fn check_package_name(name: &str) -> Result<(), RenderError> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RenderError::InvalidPackageName(name.to_string()))
    }
}
