//! Factory-return matcher
//!
//! Constructor-style functions take no receiver at all: `Point
//! point_create(int x, int y)` or `Point *point_new(void)`. The signature
//! matcher cannot see those, so this matcher votes for the struct named by
//! the return type — but only when no parameter is struct-typed, otherwise
//! the function is a transformer and its receiver slot should decide.

use crate::catalog::decl::FunctionDecl;
use crate::catalog::Catalog;
use crate::config::BinderConfig;
use crate::matcher::{BindingCandidate, SignalKind};

/// Vote for the struct named by a factory-style return type
pub fn match_factory(
    function: &FunctionDecl,
    catalog: &Catalog,
    config: &BinderConfig,
) -> Option<BindingCandidate> {
    let takes_struct = function
        .params
        .iter()
        .any(|param| catalog.resolve_struct(&param.ty, config).is_some());
    if takes_struct {
        return None;
    }

    let struct_idx = catalog.resolve_struct(&function.return_type, config)?;

    Some(BindingCandidate {
        struct_idx,
        weight: config.factory_weight,
        kind: SignalKind::Factory,
    })
}
