//! Emit the generated project's `Cargo.toml`.

use std::fmt::Write;

use crate::processor::Program;

pub fn render(program: &Program) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "[package]")?;
    writeln!(out, "name = {:?}", program.package)?;
    writeln!(out, "version = \"0.1.0\"")?;
    writeln!(out, "edition = \"2021\"")?;
    writeln!(out)?;
    writeln!(out, "[dependencies]")?;
    for dep in &program.dependencies {
        writeln!(out, "{} = {:?}", dep.name, dep.version)?;
    }

    Ok(out)
}
