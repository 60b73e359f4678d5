use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use recspl::grammar::{Grammar, Symbol, Terminal};
use recspl_core::lang::registry::Stability;
use recspl_core::lang::reserved::{self, ReservedCategory};

/// Guardrail against reintroducing stringly-typed vocabulary checks.
///
/// This is intentionally a **coarse** safety net. It looks for suspicious patterns like `== "begin"` or
/// `match word { "halt" => ... }` in Rust source files where we expect callers to go through the
/// `recspl_core::lang` registries or the grammar table instead.
///
/// Notes:
/// - We allow occurrences in `crates/recspl_core/src/lang/**` (registries themselves) and in tests.
/// - This is not meant to be perfect; it’s meant to catch “oops I added a string match”.
#[test]
fn no_new_stringly_vocab_checks_in_rust_sources() {
    let root = repo_root();
    let spellings = word_spellings();
    let mut offenders: Vec<(PathBuf, usize, String)> = Vec::new();

    let targets = [root.join("src"), root.join("crates")];
    for dir in targets {
        if dir.exists() {
            scan_dir(&root, &dir, &spellings, &mut offenders);
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::new();
        msg.push_str("Found potential stringly-typed vocabulary checks. Prefer recspl_core registries.\n\n");
        for (path, line_no, line) in offenders.into_iter().take(80) {
            msg.push_str(&format!(
                "- {}:{}: {}\n",
                path.strip_prefix(&root).unwrap_or(&path).display(),
                line_no,
                line.trim()
            ));
        }
        panic!("{msg}");
    }
}

/// The built-in grammar and the registry agree: every literal is reserved, and every stable reserved
/// spelling is reachable from some rule.
#[test]
fn grammar_literals_match_the_registry() {
    let grammar = Grammar::recspl();
    let literals: BTreeSet<&str> = grammar
        .rules()
        .iter()
        .flat_map(|rule| rule.productions.iter())
        .flat_map(|production| production.symbols().iter())
        .filter_map(|symbol| match symbol {
            Symbol::Terminal(Terminal::Literal(s)) => Some(s.as_str()),
            _ => None,
        })
        .collect();

    for literal in &literals {
        assert!(reserved::is_reserved(literal), "grammar literal `{literal}` is not reserved");
    }
    for info in reserved::RESERVED {
        let used = literals.contains(info.canonical);
        match info.stability {
            Stability::Stable => assert!(used, "`{}` is stable but no rule produces it", info.canonical),
            Stability::Unused => assert!(!used, "`{}` is marked unused but the grammar uses it", info.canonical),
        }
    }
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn word_spellings() -> Vec<&'static str> {
    // Punctuation is left out: `"," =>` and friends are too common in formatting code to be a useful signal.
    let set: BTreeSet<&'static str> = reserved::RESERVED
        .iter()
        .filter(|r| r.category != ReservedCategory::Punctuation)
        .map(|r| r.canonical)
        .collect();
    set.into_iter().collect()
}

fn is_allowed_file(root: &Path, path: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    if !rel.ends_with(".rs") {
        return true;
    }
    // Registries define the spellings; allow them.
    if rel.starts_with("crates/recspl_core/src/lang/") {
        return true;
    }
    // Tests can mention spellings directly.
    if rel.starts_with("tests/") || rel.ends_with("/tests.rs") {
        return true;
    }
    false
}

fn scan_dir(root: &Path, dir: &Path, spellings: &[&'static str], offenders: &mut Vec<(PathBuf, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_dir(root, &path, spellings, offenders);
            continue;
        }
        if is_allowed_file(root, &path) {
            continue;
        }
        let Ok(contents) = fs::read_to_string(&path) else {
            continue;
        };
        for (idx, line) in contents.lines().enumerate() {
            if is_suspicious_line(line, spellings) {
                offenders.push((path.clone(), idx + 1, line.to_string()));
            }
        }
    }
}

fn is_suspicious_line(line: &str, spellings: &[&'static str]) -> bool {
    // Avoid false positives in comments/docstrings.
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") {
        return false;
    }

    // Only flag explicit equality checks or match arms for known vocabulary spellings.
    for s in spellings {
        let eq = format!("== \"{s}\"");
        let arm = format!("\"{s}\" =>");
        if line.contains(&eq) || line.contains(&arm) {
            return true;
        }
    }

    false
}
