//! Import path resolution (spec §4.5): classify an `[Import]` node's raw
//! path, walk the search-path list in extension-kind order, expand
//! wildcards, and detect circular imports via [`GlobalMap`]'s loading stack.
//! Grounded on `ImportManager.h` (import record bookkeeping), `PathManager.h`
//! (path classification/resolution), and `DependencyManager.h` (cycle
//! detection) from the original implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ast::ImportKind;
use crate::diagnostics::{Diagnostic, DiagnosticSink, ResolutionError};
use crate::parse_util::ParseSourceSpan;
use crate::registry::{GlobalMap, ImportRecord};

/// Spec §4.5 step 1: how an import's raw path is shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Absolute,
    Relative,
    ModuleName,
    Submodule,
    Wildcard,
    RecursiveWildcard,
}

pub fn classify_path(raw_path: &str) -> PathKind {
    if raw_path.ends_with(".**") || raw_path.ends_with("/**") {
        return PathKind::RecursiveWildcard;
    }
    if raw_path.ends_with('*') {
        return PathKind::Wildcard;
    }
    if Path::new(raw_path).is_absolute() {
        return PathKind::Absolute;
    }
    if raw_path.starts_with("./") || raw_path.starts_with("../") || raw_path.contains('/') {
        return PathKind::Relative;
    }
    if raw_path.contains('.') {
        return PathKind::Submodule;
    }
    PathKind::ModuleName
}

/// Spec §4.5 step 3: candidate extensions to try, in order, for a module-name
/// or submodule path that carries no extension of its own.
fn extension_order(kind: &ImportKind) -> &'static [&'static str] {
    match kind {
        ImportKind::Html => &[".html", ".htm"],
        ImportKind::Style => &[".css"],
        ImportKind::JavaScript => &[".js"],
        ImportKind::CJmod => &[".cjmod"],
        ImportKind::Chtl | ImportKind::Config | ImportKind::Origin(_) | ImportKind::Template(_) | ImportKind::Custom(_) => {
            &[".chtl"]
        }
    }
}

/// Where module-name and submodule imports are searched, in order (spec
/// §4.5 step 2): the importing file's own directory, the configured module
/// search paths, then the official module directory.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    pub module_search_paths: Vec<PathBuf>,
    pub official_module_dir: Option<PathBuf>,
}

fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let mut os = base.as_os_str().to_os_string();
    os.push(ext);
    PathBuf::from(os)
}

/// Resolves a single (non-wildcard) import path to a concrete file.
///
/// `Submodule` paths (`Chtholly.Space`) are first split on `.` and rejoined
/// as path segments (`Chtholly/Space`) before the usual search-path walk.
pub fn resolve_path(raw_path: &str, kind: &ImportKind, current_dir: &Path, search: &SearchConfig) -> Result<PathBuf, ResolutionError> {
    let path_kind = classify_path(raw_path);

    if path_kind == PathKind::Absolute {
        let p = PathBuf::from(raw_path);
        return try_extensions(&p, kind).ok_or_else(|| ResolutionError::FileNotFound(raw_path.to_string()));
    }
    if path_kind == PathKind::Relative {
        let p = current_dir.join(raw_path);
        return try_extensions(&p, kind).ok_or_else(|| ResolutionError::FileNotFound(raw_path.to_string()));
    }

    let relative = match path_kind {
        PathKind::Submodule => raw_path.split('.').collect::<Vec<_>>().join("/"),
        _ => raw_path.to_string(),
    };

    let mut roots = vec![current_dir.to_path_buf()];
    roots.extend(search.module_search_paths.iter().cloned());
    if let Some(official) = &search.official_module_dir {
        roots.push(official.clone());
    }

    for root in roots {
        let candidate = root.join(&relative);
        if let Some(found) = try_extensions(&candidate, kind) {
            return Ok(found);
        }
    }
    Err(ResolutionError::FileNotFound(raw_path.to_string()))
}

fn try_extensions(base: &Path, kind: &ImportKind) -> Option<PathBuf> {
    if base.is_file() {
        return Some(base.to_path_buf());
    }
    for ext in extension_order(kind) {
        let candidate = with_extension(base, ext);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Expands a wildcard or recursive-wildcard import into the concrete files it
/// matches (spec §4.5 step 4), in directory-listing order.
pub fn resolve_wildcard(raw_path: &str, kind: &ImportKind, current_dir: &Path, search: &SearchConfig) -> Result<Vec<PathBuf>, ResolutionError> {
    let path_kind = classify_path(raw_path);
    let recursive = path_kind == PathKind::RecursiveWildcard;
    let dir_part = raw_path.trim_end_matches("/**").trim_end_matches(".**").trim_end_matches('*').trim_end_matches('/');

    let dir = if Path::new(dir_part).is_absolute() {
        PathBuf::from(dir_part)
    } else if dir_part.is_empty() {
        current_dir.to_path_buf()
    } else {
        current_dir.join(dir_part)
    };

    let exts = extension_order(kind);
    let mut matches = Vec::new();
    collect_matching_files(&dir, exts, recursive, 0, &mut matches);
    if matches.is_empty() {
        return Err(ResolutionError::WildcardMatchedNothing(raw_path.to_string()));
    }
    matches.sort();
    Ok(matches)
}

/// Spec §6.4: a `**` import descends at most this many directory levels
/// below its starting directory.
const MAX_RECURSIVE_WILDCARD_DEPTH: u32 = 10;

fn collect_matching_files(dir: &Path, exts: &[&str], recursive: bool, depth: u32, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if recursive && depth < MAX_RECURSIVE_WILDCARD_DEPTH {
                collect_matching_files(&path, exts, recursive, depth + 1, out);
            }
            continue;
        }
        if exts.iter().any(|ext| path.to_string_lossy().ends_with(ext)) {
            out.push(path);
        }
    }
}

/// One resolved `[Import]`: its file(s), any `as` alias, and `except`
/// exclusions, ready to feed [`GlobalMap::mark_imported`].
#[derive(Debug, Clone)]
pub struct ResolvedImport {
    pub files: Vec<PathBuf>,
    pub alias: Option<String>,
    pub excludes: Vec<String>,
}

/// Resolves one import declaration and records it in `global`, detecting
/// circular imports via the loading stack (spec §4.5 step 5) before the
/// caller recurses into the resolved file(s).
///
/// Returns `None` (after pushing a diagnostic) when resolution fails;
/// callers should treat that as "nothing further to compile for this
/// import" rather than aborting the whole run (spec §7 best-effort model).
pub fn resolve_import(
    importer_file: &str,
    current_dir: &Path,
    raw_path: &str,
    kind: &ImportKind,
    alias: Option<String>,
    excludes: Vec<String>,
    search: &SearchConfig,
    global: &mut GlobalMap,
    sink: &mut DiagnosticSink,
    span: &ParseSourceSpan,
) -> Option<ResolvedImport> {
    let path_kind = classify_path(raw_path);
    let is_wildcard = matches!(path_kind, PathKind::Wildcard | PathKind::RecursiveWildcard);

    if is_wildcard && alias.is_some() {
        sink.push(Diagnostic::error(crate::diagnostics::SyntaxError::AliasOnWildcardImport, span.clone()));
        return None;
    }

    let files = if is_wildcard {
        match resolve_wildcard(raw_path, kind, current_dir, search) {
            Ok(files) => files,
            Err(err) => {
                sink.error(err, span.clone());
                return None;
            }
        }
    } else {
        match resolve_path(raw_path, kind, current_dir, search) {
            Ok(file) => vec![file],
            Err(err) => {
                sink.error(err, span.clone());
                return None;
            }
        }
    };

    for file in &files {
        let resolved_str = file.to_string_lossy().to_string();
        if global.is_loading(&resolved_str) {
            sink.error(ResolutionError::CircularImport(format!("{} -> {}", importer_file, resolved_str)), span.clone());
            return None;
        }
        global.add_import(ImportRecord {
            importer_file: importer_file.to_string(),
            raw_path: raw_path.to_string(),
            resolved_path: Some(resolved_str),
            alias: alias.clone(),
            excludes: excludes.clone(),
        });
    }

    Some(ResolvedImport { files, alias, excludes })
}
