//! The functional core: dispatch, validate, lower and assemble every block.
pub mod assemble;
pub mod error;
pub mod lower;
pub mod names;
pub mod params;
pub mod registry;

pub use assemble::Program;
pub use error::{BlockError, CompileError};
pub use names::{NameGenerator, SequentialNames, UuidNames};

use tracing::{debug, warn};

use crate::model::{ActionTemplate, ProgramTemplate};
use assemble::Assembler;
use lower::Lowered;
use registry::{Dispatch, Registry};

/// Compile `template` into a program named `package`.
///
/// Blocks are handled strictly in order and the first failing block aborts
/// the whole pass; no partial program is returned.
pub fn compile(
    template: &ProgramTemplate,
    package: &str,
    names: &mut dyn NameGenerator,
) -> Result<Program, CompileError> {
    let mut asm = Assembler::new(package, &template.name, &template.metadata);

    for (index, block) in template.blocks.iter().enumerate() {
        let lowered = lower_block(block, names).map_err(|source| CompileError {
            index,
            module: block.module.clone(),
            operation: block.operation.clone(),
            source,
        })?;

        match lowered {
            Some(lowered) => {
                debug!(index, marker = %lowered.marker, "lowered {}.{}", block.module, block.operation);
                asm.push(lowered);
            }
            None => warn!(
                index,
                "{}.{} is reserved; no code generated", block.module, block.operation
            ),
        }
    }

    Ok(asm.finish())
}

/// Registry lookup, parameter validation, then the entry's own lowering.
/// Reserved modules yield `None`.
fn lower_block(
    block: &ActionTemplate,
    names: &mut dyn NameGenerator,
) -> Result<Option<Lowered>, BlockError> {
    match Registry::global().resolve(&block.module, &block.operation)? {
        Dispatch::Lowered(entry) => {
            let op = (entry.validate)(&block.parameters)?;
            Ok((entry.lower)(&op, names))
        }
        Dispatch::Reserved(_) => Ok(None),
    }
}
