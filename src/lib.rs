pub mod cli;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::model::ProgramTemplate;
use crate::processor::{NameGenerator, SequentialNames, UuidNames};
use crate::writer::Rendered;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    let package = args.package();

    // 1. ── Parse ──────────────────────────────────────────────────────
    let template = parser::load(&args.template)
        .with_context(|| format!("Loading {}", args.template.display()))?;

    // 2. ── Compile & render ───────────────────────────────────────────
    let mut names: Box<dyn NameGenerator> = if args.sequential_names {
        Box::new(SequentialNames::default())
    } else {
        Box::new(UuidNames)
    };
    let rendered = generate(&template, &package, names.as_mut())?;

    // 3. ── Write outputs ──────────────────────────────────────────────
    print!("{}", rendered.main_rs);

    if !args.no_save {
        let root = writer::emit(&rendered, &args.out_dir)
            .with_context(|| format!("Writing project under {}", args.out_dir.display()))?;
        info!(path = %root.display(), "program saved");
    }

    Ok(())
}

/// Compile and render `template` without touching the filesystem.
pub fn generate(
    template: &ProgramTemplate,
    package: &str,
    names: &mut dyn NameGenerator,
) -> anyhow::Result<Rendered> {
    info!(blocks = template.blocks.len(), "generating source code");
    let program = processor::compile(template, package, names)
        .with_context(|| "Compiling action blocks")?;

    info!(statements = program.effect_count(), "rendering source code");
    let rendered = writer::render(&program).with_context(|| "Rendering generated program")?;
    Ok(rendered)
}
