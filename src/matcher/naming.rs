//! Name-prefix matcher
//!
//! C APIs fake namespaces with name prefixes: `rectangle_area` operates on a
//! `Rectangle`. This matcher normalizes each struct name to snake_case and
//! votes for every struct whose normalized name is a `_`-terminated prefix
//! of (or equal to) the function name.
//!
//! No abbreviation inference: `rect_init` does not match `Rectangle`; only a
//! struct actually declared as `Rect` would. With nested struct families
//! (`Rect`, `RectList`) one function name can prefix-match several structs —
//! the matcher votes for all of them and the resolver breaks the tie.

use crate::catalog::decl::FunctionDecl;
use crate::catalog::Catalog;
use crate::config::BinderConfig;
use crate::matcher::{BindingCandidate, SignalKind};

/// Normalize a struct name to lowercase snake_case
///
/// Case boundaries become underscores (`LinkedList` → `linked_list`), and an
/// acronym run keeps its last capital with the following word
/// (`HTTPServer` → `http_server`). Names already in snake_case pass through.
pub fn normalize_struct_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_lower = i > 0 && (chars[i - 1].is_lowercase() || chars[i - 1].is_ascii_digit());
            let acronym_end =
                i > 0 && chars[i - 1].is_uppercase() && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if (prev_lower || acronym_end) && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

/// Vote for every struct whose normalized name prefixes the function name
pub fn match_naming(
    function: &FunctionDecl,
    catalog: &Catalog,
    config: &BinderConfig,
) -> Vec<BindingCandidate> {
    let mut candidates = Vec::new();

    for (idx, entry) in catalog.structs().iter().enumerate() {
        let normalized = normalize_struct_name(&entry.decl.name);
        if prefix_matches(&function.name, &normalized) {
            candidates.push(BindingCandidate {
                struct_idx: idx,
                weight: config.naming_weight,
                kind: SignalKind::Naming,
            });
        }
    }

    candidates
}

/// Match at a `_` boundary or on the full name, never mid-word
fn prefix_matches(function_name: &str, normalized: &str) -> bool {
    if normalized.is_empty() {
        return false;
    }
    match function_name.strip_prefix(normalized) {
        Some("") => true,
        Some(rest) => rest.starts_with('_'),
        None => false,
    }
}
