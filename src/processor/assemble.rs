//! Folds lowered blocks into the body of the generated `main`.

use std::collections::BTreeSet;

use proc_macro2::TokenStream;

use crate::model::ProgramMetadata;

use super::lower::{Dependency, Lowered};

/// Fully compiled program handed to `writer`.
#[derive(Debug, Clone)]
pub struct Program {
    /// Cargo package name of the generated program.
    pub package: String,
    /// `Name` of the template it was compiled from.
    pub template: String,
    pub metadata: ProgramMetadata,
    /// One marker per lowered block, in block order.
    pub markers: Vec<String>,
    /// Top-level statements of `fn main()`; `body[i]` belongs to `markers[i]`.
    pub body: Vec<TokenStream>,
    pub dependencies: BTreeSet<Dependency>,
}

impl Program {
    /// Statements that run; marker comments are not counted.
    pub fn effect_count(&self) -> usize {
        self.body.len()
    }

    /// `(marker, statement)` pairs in block order.
    pub fn blocks(&self) -> impl Iterator<Item = (&str, &TokenStream)> {
        self.markers.iter().map(String::as_str).zip(&self.body)
    }
}

/// Append-only: no reordering, merging or dropping of statements.
#[derive(Debug)]
pub struct Assembler {
    program: Program,
}

impl Assembler {
    pub fn new(package: &str, template: &str, metadata: &ProgramMetadata) -> Self {
        Self {
            program: Program {
                package: package.to_string(),
                template: template.to_string(),
                metadata: metadata.clone(),
                markers: Vec::new(),
                body: Vec::new(),
                dependencies: BTreeSet::new(),
            },
        }
    }

    pub fn push(&mut self, lowered: Lowered) {
        self.program.markers.push(lowered.marker);
        self.program.body.push(lowered.stmt);
        if let Some(dep) = lowered.requires {
            self.program.dependencies.insert(dep);
        }
    }

    pub fn finish(self) -> Program {
        self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::lower::UREQ;
    use quote::quote;

    fn block(marker: &str, requires: Option<Dependency>) -> Lowered {
        Lowered {
            marker: marker.into(),
            stmt: quote! { let _ = #marker; },
            requires,
        }
    }

    #[test]
    fn keeps_push_order() {
        let mut asm = Assembler::new("demo", "Demo", &ProgramMetadata::default());
        for m in ["b", "a", "c"] {
            asm.push(block(m, None));
        }
        let program = asm.finish();

        assert_eq!(program.markers, vec!["b", "a", "c"]);
        assert_eq!(program.effect_count(), 3);
        let pairs: Vec<_> = program
            .blocks()
            .map(|(m, s)| (m.to_string(), s.to_string()))
            .collect();
        assert_eq!(pairs[0], ("b".into(), quote! { let _ = "b"; }.to_string()));
        assert_eq!(pairs[2], ("c".into(), quote! { let _ = "c"; }.to_string()));
    }

    #[test]
    fn collects_dependencies_once() {
        let mut asm = Assembler::new("demo", "Demo", &ProgramMetadata::default());
        asm.push(block("a", Some(UREQ)));
        asm.push(block("b", None));
        asm.push(block("c", Some(UREQ)));
        let program = asm.finish();

        assert_eq!(program.dependencies.into_iter().collect::<Vec<_>>(), vec![UREQ]);
    }
}
