//! Binding map assembly
//!
//! This module drives the whole pipeline: score every cataloged function
//! with the [`matcher`](crate::matcher)s, resolve each score sheet with the
//! [`resolver`](crate::resolver), and merge the per-function outcomes into
//! the final [`BindingMap`].
//!
//! # Cross-unit merge rules
//!
//! Function names may repeat across translation units (C `static` helpers),
//! so the merge runs in global source order and deduplicates by name:
//!
//! - same name bound to the same struct twice → first occurrence wins,
//!   [`Diagnostic::DuplicateMethodBinding`] recorded
//! - same name bound to two different structs → modeling error in the
//!   input; the name is demoted to the ambiguous list,
//!   [`Diagnostic::InconsistentBinding`] recorded
//! - any other repeat (utility vs. utility, utility vs. bound, ...) →
//!   first occurrence wins silently
//!
//! # Parallelism
//!
//! Scoring is per-function and reads only the immutable catalog, so it
//! fans out across a rayon pool. The merge itself is sequential and keyed
//! on source order, which keeps the output byte-identical regardless of
//! thread count.

use std::fmt;

use log::{debug, info, warn};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::catalog::decl::TranslationUnit;
use crate::catalog::{Catalog, CatalogError};
use crate::config::BinderConfig;
use crate::matcher::gather_candidates;
use crate::resolver::{resolve, Resolution};

/// One struct's ordered method list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructBinding {
    pub name: String,
    pub methods: Vec<String>,
}

/// The engine's primary output: struct → methods, plus the leftover lists
///
/// Every distinct cataloged function name appears in exactly one place:
/// one struct's method list, the utility list, or the ambiguous list.
#[derive(Debug, Clone, Serialize)]
pub struct BindingMap {
    structs: Vec<StructBinding>,
    utility: Vec<String>,
    ambiguous: Vec<String>,
    #[serde(skip)]
    index: FxHashMap<String, usize>,
}

impl BindingMap {
    /// Per-struct bindings in struct source order (empty lists included)
    pub fn structs(&self) -> &[StructBinding] {
        &self.structs
    }

    /// Method names bound to a struct, in source order
    pub fn methods_of(&self, struct_name: &str) -> Option<&[String]> {
        self.index
            .get(struct_name)
            .map(|&idx| self.structs[idx].methods.as_slice())
    }

    /// Functions with no positive signal toward any struct
    pub fn utility(&self) -> &[String] {
        &self.utility
    }

    /// Functions whose top-scoring candidate structs tied
    pub fn ambiguous(&self) -> &[String] {
        &self.ambiguous
    }
}

/// Recoverable merge conflict, reported alongside a still-usable map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Diagnostic {
    /// Same function bound to the same struct from two units
    DuplicateMethodBinding {
        function: String,
        struct_name: String,
        first_unit: String,
        second_unit: String,
    },
    /// Same function name bound to different structs across units
    InconsistentBinding {
        function: String,
        first_struct: String,
        second_struct: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DuplicateMethodBinding {
                function,
                struct_name,
                first_unit,
                second_unit,
            } => {
                write!(
                    f,
                    "Function '{}' already bound to '{}' by '{}'; dropped duplicate from '{}'",
                    function, struct_name, first_unit, second_unit
                )
            }
            Diagnostic::InconsistentBinding {
                function,
                first_struct,
                second_struct,
            } => {
                write!(
                    f,
                    "Function '{}' bound to both '{}' and '{}'; demoted to ambiguous",
                    function, first_struct, second_struct
                )
            }
        }
    }
}

/// Classification counters for one engine run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BindingReport {
    /// Function declarations cataloged, duplicate names included
    pub total_functions: usize,
    /// Distinct names in some struct's method list
    pub bound_functions: usize,
    /// Distinct names in the utility list
    pub utility_functions: usize,
    /// Distinct names in the ambiguous list
    pub ambiguous_functions: usize,
    /// Structs that ended up with at least one method
    pub structs_with_methods: usize,
}

impl BindingReport {
    /// Share of distinct function names that found an owner
    pub fn bound_ratio(&self) -> f64 {
        let distinct = self.bound_functions + self.utility_functions + self.ambiguous_functions;
        if distinct == 0 {
            0.0
        } else {
            self.bound_functions as f64 / distinct as f64
        }
    }
}

/// Everything one engine invocation produces
#[derive(Debug, Clone, Serialize)]
pub struct BindingOutcome {
    pub map: BindingMap,
    pub diagnostics: Vec<Diagnostic>,
    pub report: BindingReport,
}

/// Catalog the units, then bind
///
/// Fails on the first duplicate struct name. Callers that want to skip a
/// bad unit and keep the rest should build the [`Catalog`] themselves with
/// [`Catalog::add_unit`] and call [`bind_catalog`].
pub fn bind_units(
    units: Vec<TranslationUnit>,
    config: &BinderConfig,
) -> Result<BindingOutcome, CatalogError> {
    let catalog = Catalog::from_units(units)?;
    Ok(bind_catalog(&catalog, config))
}

/// Score every function and merge the outcomes into a binding map
pub fn bind_catalog(catalog: &Catalog, config: &BinderConfig) -> BindingOutcome {
    let resolutions: Vec<Resolution> = catalog
        .functions()
        .par_iter()
        .map(|entry| resolve(&gather_candidates(entry, catalog, config)))
        .collect();

    merge(catalog, &resolutions)
}

/// What the merge has already decided for a function name
#[derive(Clone, Copy)]
enum Owner {
    Struct(usize),
    Utility,
    Ambiguous,
}

struct Seen {
    owner: Owner,
    unit: String,
}

fn merge(catalog: &Catalog, resolutions: &[Resolution]) -> BindingOutcome {
    let mut methods: Vec<Vec<String>> = vec![Vec::new(); catalog.structs().len()];
    let mut utility: Vec<String> = Vec::new();
    let mut ambiguous: Vec<String> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut seen: FxHashMap<String, Seen> = FxHashMap::default();

    for (entry, resolution) in catalog.functions().iter().zip(resolutions) {
        let name = &entry.decl.name;
        let previous = seen.get(name).map(|s| (s.owner, s.unit.clone()));

        let Some((prev_owner, prev_unit)) = previous else {
            let owner = match resolution {
                Resolution::Bound(idx) => {
                    debug!(
                        "bound function '{}' to struct '{}'",
                        name,
                        catalog.structs()[*idx].decl.name
                    );
                    methods[*idx].push(name.clone());
                    Owner::Struct(*idx)
                }
                Resolution::Utility => {
                    debug!("function '{}' has no binding signal; utility", name);
                    utility.push(name.clone());
                    Owner::Utility
                }
                Resolution::Ambiguous(tied) => {
                    debug!(
                        "function '{}' ties between {} structs; ambiguous",
                        name,
                        tied.len()
                    );
                    ambiguous.push(name.clone());
                    Owner::Ambiguous
                }
            };
            seen.insert(
                name.clone(),
                Seen {
                    owner,
                    unit: entry.unit.clone(),
                },
            );
            continue;
        };

        match (prev_owner, resolution) {
            (Owner::Struct(i), Resolution::Bound(j)) if i == *j => {
                let diagnostic = Diagnostic::DuplicateMethodBinding {
                    function: name.clone(),
                    struct_name: catalog.structs()[i].decl.name.clone(),
                    first_unit: prev_unit,
                    second_unit: entry.unit.clone(),
                };
                warn!("{}", diagnostic);
                diagnostics.push(diagnostic);
            }
            (Owner::Struct(i), Resolution::Bound(j)) => {
                let diagnostic = Diagnostic::InconsistentBinding {
                    function: name.clone(),
                    first_struct: catalog.structs()[i].decl.name.clone(),
                    second_struct: catalog.structs()[*j].decl.name.clone(),
                };
                warn!("{}", diagnostic);
                methods[i].retain(|method| method != name);
                ambiguous.push(name.clone());
                if let Some(s) = seen.get_mut(name) {
                    s.owner = Owner::Ambiguous;
                }
                diagnostics.push(diagnostic);
            }
            _ => {
                // Repeated static helpers across units; first wins
                debug!("dropping repeated function name '{}' from '{}'", name, entry.unit);
            }
        }
    }

    let structs: Vec<StructBinding> = catalog
        .structs()
        .iter()
        .zip(methods)
        .map(|(entry, methods)| StructBinding {
            name: entry.decl.name.clone(),
            methods,
        })
        .collect();
    let index = structs
        .iter()
        .enumerate()
        .map(|(idx, binding)| (binding.name.clone(), idx))
        .collect();

    let report = BindingReport {
        total_functions: catalog.functions().len(),
        bound_functions: structs.iter().map(|b| b.methods.len()).sum(),
        utility_functions: utility.len(),
        ambiguous_functions: ambiguous.len(),
        structs_with_methods: structs.iter().filter(|b| !b.methods.is_empty()).count(),
    };
    info!(
        "binding complete: {} functions, {} bound, {} utility, {} ambiguous, {} diagnostics",
        report.total_functions,
        report.bound_functions,
        report.utility_functions,
        report.ambiguous_functions,
        diagnostics.len()
    );

    BindingOutcome {
        map: BindingMap {
            structs,
            utility,
            ambiguous,
            index,
        },
        diagnostics,
        report,
    }
}
