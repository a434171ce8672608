//! S5 — Circular import (spec §8): `a.chtl` imports `b.chtl`, `b.chtl`
//! imports `a.chtl` back; compilation reports the cycle and both branches
//! abort cleanly rather than recursing forever.

use chtl::driver::compile_file;
use chtl::import_resolver::SearchConfig;

#[test]
fn s5_mutual_import_reports_one_cycle_and_terminates() {
    let dir = std::env::temp_dir().join(format!("chtl_circular_import_spec_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("a.chtl"), "[Import] @Chtl from b\n").unwrap();
    std::fs::write(dir.join("b.chtl"), "[Import] @Chtl from a\n").unwrap();

    let outcome = compile_file(&dir.join("a.chtl"), &SearchConfig::default()).unwrap();

    assert!(outcome.diagnostics.has_errors());
    let messages: Vec<String> = outcome.diagnostics.iter().map(|d| d.kind.to_string()).collect();
    assert!(
        messages.iter().any(|m| m.contains("circular") && m.contains("a.chtl") && m.contains("b.chtl")),
        "expected a circular-import diagnostic naming both files, got: {messages:?}"
    );
}
