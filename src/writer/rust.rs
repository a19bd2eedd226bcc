//! Emit `src/main.rs` for the generated program.
//!
//! The body is built as one token stream, parsed into a `syn::File` and
//! printed by `prettyplease`. Comments are not tokens, so every block is
//! preceded by a placeholder `__marker!("...");` statement that is turned
//! into a `//` line after formatting.

use std::fmt::Write;

use proc_macro2::Literal;
use quote::quote;

use super::RenderError;
use crate::processor::Program;

const MARKER_OPEN: &str = "__marker!(";
const MARKER_CLOSE: &str = ");";

pub fn render(program: &Program) -> Result<String, RenderError> {
    let mut out = String::new();

    // ---------------------------------------------------------------
    // 1. Header: provenance only, never code
    // ---------------------------------------------------------------
    comment(&mut out, "Code generated by actiongen. DO NOT EDIT.")?;
    if !program.template.is_empty() {
        comment(&mut out, &format!("Template: {}", program.template))?;
    }
    if !program.metadata.author.is_empty() {
        comment(&mut out, &format!("Author: {}", program.metadata.author))?;
    }
    if !program.metadata.notes.is_empty() {
        comment(&mut out, &format!("Notes: {}", program.metadata.notes))?;
    }
    writeln!(out)?;

    // ---------------------------------------------------------------
    // 2. Entry point
    // ---------------------------------------------------------------
    let (labels, stmts): (Vec<_>, Vec<_>) = program
        .blocks()
        .map(|(marker, stmt)| (Literal::string(&format!("Operation: {marker}")), stmt))
        .unzip();
    let tokens = quote! {
        fn main() {
            #( __marker!(#labels); #stmts )*
        }
    };
    let file: syn::File = syn::parse2(tokens)?;

    // ---------------------------------------------------------------
    // 3. Format, then turn placeholders into comments
    // ---------------------------------------------------------------
    for line in prettyplease::unparse(&file).lines() {
        match marker_text(line) {
            Some(text) => {
                let indent = &line[..line.len() - line.trim_start().len()];
                writeln!(out, "{indent}// {text}")?;
            }
            None => writeln!(out, "{line}")?,
        }
    }

    Ok(out)
}

/// One `//` line per line of `text`.
fn comment(out: &mut String, text: &str) -> std::fmt::Result {
    for line in text.lines() {
        if line.is_empty() {
            writeln!(out, "//")?;
        } else {
            writeln!(out, "// {line}")?;
        }
    }
    Ok(())
}

/// Label of a placeholder line, unescaped.
fn marker_text(line: &str) -> Option<String> {
    let inner = line
        .trim()
        .strip_prefix(MARKER_OPEN)?
        .strip_suffix(MARKER_CLOSE)?;
    syn::parse_str::<syn::LitStr>(inner).ok().map(|lit| lit.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProgramMetadata;
    use proc_macro2::TokenStream;
    use std::collections::BTreeSet;

    fn program(blocks: Vec<(&str, TokenStream)>) -> Program {
        let (markers, body) = blocks
            .into_iter()
            .map(|(m, s)| (m.to_string(), s))
            .unzip();
        Program {
            package: "demo".into(),
            template: "Demo".into(),
            metadata: ProgramMetadata {
                author: "someone".into(),
                notes: "two\nlines".into(),
            },
            markers,
            body,
            dependencies: BTreeSet::new(),
        }
    }

    #[test]
    fn full_program_layout() {
        let stmt = quote! { for _ in 0..2 { f(); } };
        let expected = "\
// Code generated by actiongen. DO NOT EDIT.
// Template: Demo
// Author: someone
// Notes: two
// lines

fn main() {
    // Operation: file_stat_0
    for _ in 0..2 {
        f();
    }
}
";
        assert_eq!(render(&program(vec![("file_stat_0", stmt)])).unwrap(), expected);
    }

    #[test]
    fn every_block_gets_its_comment() {
        let text = render(&program(vec![
            ("a_0", quote! { let _ = 1; }),
            ("b_1", quote! { { g(); } }),
        ]))
        .unwrap();

        assert!(!text.contains(MARKER_OPEN), "{text}");
        let a = text.find("    // Operation: a_0\n").unwrap();
        let b = text.find("    // Operation: b_1\n").unwrap();
        assert!(a < b, "{text}");
    }

    #[test]
    fn string_literals_are_escaped() {
        let lit = Literal::string("say \"hi\"\n\\");
        let text = render(&program(vec![("s_0", quote! { let _ = #lit; })])).unwrap();

        assert!(text.contains(r#"let _ = "say \"hi\"\n\\";"#), "{text}");
        syn::parse_file(&text).unwrap();
    }

    #[test]
    fn malformed_statement_is_a_syntax_error() {
        let err = render(&program(vec![("x_0", quote! { let = ; })])).unwrap_err();
        assert!(matches!(err, RenderError::Syntax(_)), "{err}");
    }

    #[test]
    fn placeholder_lines_are_recognised() {
        assert_eq!(
            marker_text(r#"        __marker!("Operation: a\"b");"#).as_deref(),
            Some("Operation: a\"b")
        );
        assert_eq!(marker_text(r#"let _ = "__marker!(x);";"#), None);
    }
}
