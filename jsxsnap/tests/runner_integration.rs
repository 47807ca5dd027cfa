//! Runner integration tests.
//!
//! These drive the library end to end with an in-process backend that
//! mimics the plugin: it prepends the import the plugin would insert and
//! echoes the source.

use std::path::Path;

use jsxsnap::backend::{BackendError, CompilerBackend};
use jsxsnap::fixture::{discover, Fixture};
use jsxsnap::{FixtureError, Mode, ResolvedConfig, Resolver, Runner};
use serde_json::json;
use tempfile::TempDir;

/// Prepends `import { <pragma> } from "<importSource>";` to the input.
struct PragmaImportBackend;

impl CompilerBackend for PragmaImportBackend {
    fn transform_file(&self, input: &Path, config: &ResolvedConfig) -> Result<String, BackendError> {
        let source = std::fs::read_to_string(input)?;
        if source.contains("syntax error") {
            return Err(BackendError::Failed {
                program: "fake-swc".to_string(),
                status: "exit status: 1".to_string(),
                stderr: format!("failed to parse {}", input.display()),
            });
        }
        let import_source = config
            .plugins()
            .first()
            .and_then(|(_, payload)| payload.get("importSource"))
            .and_then(|v| v.as_str())
            .unwrap_or("react")
            .to_string();
        let pragma = config.pragma().unwrap_or_default().to_string();
        Ok(format!(
            "import {{ {} }} from \"{}\";\n{}",
            pragma, import_source, source
        ))
    }
}

fn write_fixture(root: &Path, name: &str, files: &[(&str, &str)]) {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    for (file, content) in files {
        std::fs::write(dir.join(file), content).unwrap();
    }
}

fn runner(mode: Mode) -> Runner<PragmaImportBackend> {
    Runner::new(
        Resolver::new("/work/swc_plugin_import_jsx_pragma.wasm"),
        PragmaImportBackend,
        mode,
    )
}

#[test]
fn test_record_then_assert_is_idempotent() {
    let root = TempDir::new().unwrap();
    write_fixture(root.path(), "element", &[("input.jsx", "const a = <div />;\n")]);
    write_fixture(
        root.path(),
        "preact",
        &[
            ("input.tsx", "const a = <></>;\n"),
            ("config.json", r#"{"importSource": "preact"}"#),
            (".swcrc", r#"{"jsc": {"transform": {"react": {"pragma": "h"}}}}"#),
        ],
    );
    let fixtures = discover(root.path()).unwrap();

    let recorded = runner(Mode::Record).run_all(&fixtures);
    assert!(recorded.is_success());
    assert_eq!(
        std::fs::read_to_string(root.path().join("preact/output.js")).unwrap(),
        "import { h } from \"preact\";\nconst a = <></>;\n"
    );

    let asserted = runner(Mode::Assert).run_all(&fixtures);
    assert!(asserted.is_success());
    assert_eq!(asserted.passed(), 2);
}

#[test]
fn test_missing_snapshot_does_not_stop_other_fixtures() {
    let root = TempDir::new().unwrap();
    write_fixture(root.path(), "fresh", &[("input.js", "<a />;\n")]);
    write_fixture(
        root.path(),
        "stable",
        &[
            ("input.js", "<b />;\n"),
            ("output.js", "import { createElement } from \"react\";\n<b />;\n"),
        ],
    );

    let summary = runner(Mode::Assert).run_all(&discover(root.path()).unwrap());
    assert_eq!(summary.passed(), 1);
    assert_eq!(summary.failed(), 1);

    let failure = summary.failures().next().unwrap();
    assert_eq!(failure.name, "fresh");
    assert!(matches!(
        failure.result,
        Err(FixtureError::MissingSnapshot { .. })
    ));
    assert!(!root.path().join("fresh/output.js").exists());
}

#[test]
fn test_trailing_whitespace_is_a_mismatch() {
    let root = TempDir::new().unwrap();
    write_fixture(
        root.path(),
        "spacing",
        &[
            ("input.ts", "let a = 1;\n"),
            ("output.js", "import { createElement } from \"react\";\nlet a = 1;\n\n"),
        ],
    );

    let summary = runner(Mode::Assert).run_all(&discover(root.path()).unwrap());
    match &summary.outcomes[0].result {
        Err(FixtureError::SnapshotMismatch {
            expected, actual, ..
        }) => {
            assert!(expected.ends_with("\n\n"));
            assert!(!actual.ends_with("\n\n"));
        }
        other => panic!("Expected SnapshotMismatch, got {:?}", other),
    }
}

#[test]
fn test_every_error_kind_is_scoped_to_its_fixture() {
    let root = TempDir::new().unwrap();
    write_fixture(root.path(), "a_no_input", &[("output.js", "")]);
    write_fixture(root.path(), "b_bad_json", &[("input.js", ""), (".swcrc", "{ nope")]);
    write_fixture(root.path(), "c_backend", &[("input.js", "syntax error"), ("output.js", "")]);
    write_fixture(
        root.path(),
        "d_ok",
        &[
            ("input.js", "ok;\n"),
            ("output.js", "import { createElement } from \"react\";\nok;\n"),
        ],
    );

    let summary = runner(Mode::Assert).run_all(&discover(root.path()).unwrap());
    let results: Vec<_> = summary.outcomes.iter().map(|o| &o.result).collect();

    assert!(matches!(results[0], Err(FixtureError::MissingInputFile { .. })));
    assert!(matches!(results[1], Err(FixtureError::InvalidDocument { .. })));
    assert!(matches!(results[2], Err(FixtureError::Compiler(_))));
    assert!(results[3].is_ok());
}

#[test]
fn test_loaded_fixture_resolves_like_direct_call() {
    let root = TempDir::new().unwrap();
    write_fixture(
        root.path(),
        "override",
        &[
            ("input.ts", ""),
            (".swcrc", r#"{"jsc": {"transform": {"react": {"pragma": "X"}}}}"#),
        ],
    );
    let dir = discover(root.path()).unwrap().remove(0);
    let fixture = Fixture::load(&dir).unwrap();

    let resolver = Resolver::new("/work/swc_plugin_import_jsx_pragma.wasm");
    let from_fixture = resolver.resolve(
        &fixture.extension,
        fixture.host_override.as_ref(),
        fixture.plugin_config.as_ref(),
    );
    let direct = resolver.resolve(
        ".ts",
        Some(&json!({"jsc": {"transform": {"react": {"pragma": "X"}}}})),
        Some(&json!({})),
    );
    assert_eq!(from_fixture, direct);
    assert_eq!(from_fixture.pragma(), Some("X"));
    assert_eq!(from_fixture.pragma_frag(), Some("Fragment"));
}
