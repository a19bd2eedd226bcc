use std::fs;
use std::path::Path;

use actiongen::model::ProgramTemplate;
use actiongen::parser::{self, IngestError};
use actiongen::processor::{self, BlockError, CompileError, SequentialNames, UuidNames};
use actiongen::writer::{self, RenderError};

fn fixture(name: &str) -> ProgramTemplate {
    parser::load(&Path::new("tests/fixtures").join(name)).expect("fixture loads")
}

fn generate(name: &str) -> writer::Rendered {
    actiongen::generate(&fixture(name), "demo", &mut SequentialNames::default())
        .expect("fixture compiles")
}

fn compile_error(name: &str) -> CompileError {
    processor::compile(&fixture(name), "demo", &mut SequentialNames::default())
        .expect_err("fixture must not compile")
}

#[test]
fn single_stat_renders_exactly() {
    let rendered = generate("stat_only.json");
    let expected = "\
// Code generated by actiongen. DO NOT EDIT.
// Template: stat-only
// Author: ops
// Notes: checks a single path

fn main() {
    // Operation: file_stat_0
    let _ = std::fs::metadata(\"/tmp/x\");
}
";
    assert_eq!(rendered.main_rs, expected);
    assert_eq!(rendered.main_rs.matches("std::fs::metadata").count(), 1);
}

#[test]
fn uuid_markers_are_unique_per_block() {
    let template = fixture("ordered.json");
    let program = processor::compile(&template, "demo", &mut UuidNames).unwrap();

    assert_eq!(program.markers.len(), 3);
    let mut unique = program.markers.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 3, "{:?}", program.markers);
    assert!(program.markers[0].starts_with("file_stat_"));
    assert!(program.markers[1].starts_with("file_write_"));
}

#[test]
fn block_order_is_preserved() {
    let src = generate("ordered.json").main_rs;

    let first = src.find("\"/tmp/first\"").unwrap();
    let second = src.find("\"/tmp/second\"").unwrap();
    let third = src.find("\"/tmp/third\"").unwrap();
    assert!(first < second && second < third, "{src}");

    assert!(src.contains("b\"hi\""), "{src}");
    let markers: Vec<_> = src
        .lines()
        .filter_map(|l| l.trim().strip_prefix("// Operation: "))
        .collect();
    assert_eq!(markers, ["file_stat_0", "file_write_1", "file_stat_2"]);
}

#[test]
fn generated_sources_parse_as_rust() {
    for name in ["stat_only.json", "ordered.json", "everything.json"] {
        let rendered = generate(name);
        if let Err(e) = syn::parse_file(&rendered.main_rs) {
            panic!("{name}: {e}\n{}", rendered.main_rs);
        }
    }
}

/// Source with all whitespace removed, so checks survive line wrapping.
fn squashed(src: &str) -> String {
    src.chars().filter(|c| !c.is_whitespace()).collect()
}

#[test]
fn timing_and_io_windows_are_emitted() {
    let src = generate("everything.json").main_rs;
    let flat = squashed(&src);
    let has = |needle: &str| flat.contains(&squashed(needle));

    // read with delay=500: sleeps once, seeks to the shared `delay` offset
    assert!(has("std::thread::sleep(std::time::Duration::from_millis(500));"), "{src}");
    assert!(has("std::io::SeekFrom::Start(500)"), "{src}");
    // read with repeat=16: 17 runs, 16-byte window
    assert!(has("for _ in 0..17 {"), "{src}");
    assert!(has("std::io::Read::take(file, 16)"), "{src}");
    // write: escaped content, truncated to `repeat` bytes, three runs
    assert!(has("for _ in 0..3 {"), "{src}");
    assert!(has("std::io::Write::write_all(&mut file, b\"li\")?;"), "{src}");
    // web
    assert!(has("let _ = (0..1).any(|_| ureq::head(\"http://example.com/\").call().is_ok());"), "{src}");
    assert!(has("(0..4).any(|_| ureq::get(\"http://example.com/data\").call().is_ok())"), "{src}");
    assert!(has("ureq::post(\"http://example.com/upload\").send_string(\"{\\\"k\\\":1}\")"), "{src}");
    // embed is reserved: six markers for seven blocks
    assert_eq!(src.matches("// Operation: ").count(), 6);
    assert!(!src.contains("__marker!"), "{src}");
}

#[test]
fn web_programs_declare_http_client() {
    assert!(generate("everything.json").manifest.contains("ureq = \"2\""));
    assert!(!generate("ordered.json").manifest.contains("ureq"));
}

#[test]
fn missing_content_fails_without_output() {
    let err = compile_error("missing_content.json");
    assert_eq!(err.index, 1);
    assert_eq!(err.source, BlockError::MissingParameter { key: "content" });
    assert!(err.to_string().contains("`content`"));
}

#[test]
fn unknown_module_fails_before_parameters() {
    let err = compile_error("unknown_module.json");
    assert_eq!(err.index, 0);
    assert!(
        matches!(&err.source, BlockError::UnsupportedModule { module, .. } if module == "ftp"),
        "{err}"
    );
}

#[test]
fn invalid_package_name_is_a_render_error() {
    for name in ["9lives", "-dash"] {
        let err = actiongen::generate(&fixture("stat_only.json"), name, &mut UuidNames).unwrap_err();
        assert!(
            matches!(err.downcast_ref::<RenderError>(), Some(RenderError::InvalidPackageName(n)) if n == name),
            "{err:#}"
        );
    }
}

#[test]
fn missing_template_is_not_found() {
    let err = parser::load(Path::new("tests/fixtures/does_not_exist.json")).unwrap_err();
    assert!(matches!(err, IngestError::TemplateNotFound(_)));
}

#[test]
fn emit_writes_cargo_project() {
    let out = tempfile::tempdir().unwrap();
    let rendered = generate("ordered.json");
    let root = writer::emit(&rendered, out.path()).unwrap();

    assert_eq!(root, out.path().join("demo"));
    assert_eq!(fs::read_to_string(root.join("src/main.rs")).unwrap(), rendered.main_rs);
    let manifest = fs::read_to_string(root.join("Cargo.toml")).unwrap();
    assert!(manifest.starts_with("[package]\nname = \"demo\""));
}
