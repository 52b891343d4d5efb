//! Binding signal matchers
//!
//! Three independent matchers inspect one function against the catalog and
//! emit weighted votes ([`BindingCandidate`]s) toward candidate structs:
//!
//! - [`signature`]: receiver-shaped first parameter (strong)
//! - [`naming`]: struct-name prefix on the function name (weak)
//! - [`factory`]: struct-typed return with no struct-typed parameter (auxiliary)
//!
//! Matchers never decide ownership; they only vote. Summing and tie-breaking
//! is the [`resolver`](crate::resolver)'s job, which keeps the policy in one
//! auditable place.

pub mod factory;
pub mod naming;
pub mod signature;

use std::fmt;

use serde::Serialize;

use crate::catalog::{Catalog, FunctionEntry};
use crate::config::BinderConfig;

/// Which matcher produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalKind {
    Signature,
    Naming,
    Factory,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Signature => write!(f, "signature"),
            SignalKind::Naming => write!(f, "naming"),
            SignalKind::Factory => write!(f, "factory"),
        }
    }
}

/// One weighted vote toward binding the function under inspection to a struct
///
/// Transient: produced and consumed within a single resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingCandidate {
    /// Index into [`Catalog::structs`]
    pub struct_idx: usize,
    pub weight: f64,
    pub kind: SignalKind,
}

/// Run every matcher over one function
pub fn gather_candidates(
    function: &FunctionEntry,
    catalog: &Catalog,
    config: &BinderConfig,
) -> Vec<BindingCandidate> {
    let mut candidates = Vec::new();

    if let Some(candidate) = signature::match_signature(&function.decl, catalog, config) {
        candidates.push(candidate);
    }
    candidates.extend(naming::match_naming(&function.decl, catalog, config));
    if let Some(candidate) = factory::match_factory(&function.decl, catalog, config) {
        candidates.push(candidate);
    }

    candidates
}
