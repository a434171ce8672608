//! S4 — Namespace merge (spec §8): two files each declaring their own
//! `[Namespace] Utils { ... }` contribute to one merged `Utils` namespace
//! once both are registered against the same global map.

use chtl::config::{Configuration, OptionValue};
use chtl::diagnostics::DiagnosticSink;
use chtl::parser::parse_source;
use chtl::registry::{collect_symbols, GlobalMap};

#[test]
fn s4_two_files_merge_into_one_namespace() {
    let mut sink = DiagnosticSink::new();
    let mut global = GlobalMap::new();
    let mut config = Configuration::default();
    // Each file declares `Utils` explicitly; without this, both would nest
    // under their own implicit per-file stem namespace instead of merging.
    config.set_option("DISABLE_DEFAULT_NAMESPACE", OptionValue::Bool(true)).unwrap();

    let a = parse_source(r#"[Namespace] Utils { [Template] @Var Pal { c1: "red"; } }"#, "a.chtl", &mut sink);
    collect_symbols(&a.arena, a.root, "a.chtl", &config, &mut global, &mut sink);

    let b = parse_source(r#"[Namespace] Utils { [Template] @Var Pal2 { c2: "blue"; } }"#, "b.chtl", &mut sink);
    collect_symbols(&b.arena, b.root, "b.chtl", &config, &mut global, &mut sink);

    assert!(!sink.has_errors(), "{:?}", sink.iter().collect::<Vec<_>>());

    let ns = global.namespace("Utils").expect("Utils namespace registered");
    assert!(ns.is_merged);
    assert_eq!(ns.source_files.len(), 2);

    assert!(global.lookup("Pal", "Utils").is_some());
    assert!(global.lookup("Pal2", "Utils").is_some());
}
