//! Receiver-parameter matcher
//!
//! C convention puts the object argument first: `void point_move(Point *p, ...)`.
//! This matcher strips const/pointer/array qualifiers from the first
//! parameter's base type, resolves it through the catalog (so typedef
//! aliases work), and votes for the struct it names. Struct names are
//! unique, so at most one candidate comes out — this matcher can never
//! produce ambiguity on its own.

use crate::catalog::decl::FunctionDecl;
use crate::catalog::Catalog;
use crate::config::BinderConfig;
use crate::matcher::{BindingCandidate, SignalKind};

/// Vote for the struct named by the function's first parameter, if any
pub fn match_signature(
    function: &FunctionDecl,
    catalog: &Catalog,
    config: &BinderConfig,
) -> Option<BindingCandidate> {
    let first = function.first_param()?;
    let struct_idx = catalog.resolve_struct(&first.ty, config)?;

    Some(BindingCandidate {
        struct_idx,
        weight: config.signature_weight,
        kind: SignalKind::Signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::decl::{
        Declaration, Field, Param, StructDecl, TranslationUnit, TypeRef, TypedefDecl,
    };

    fn catalog_with_point() -> Catalog {
        let unit = TranslationUnit::with_declarations(
            "point.c",
            vec![
                Declaration::Struct(StructDecl {
                    name: "Point".to_string(),
                    fields: vec![
                        Field::new("x", TypeRef::new("int")),
                        Field::new("y", TypeRef::new("int")),
                    ],
                }),
                Declaration::Typedef(TypedefDecl {
                    name: "PointHandle".to_string(),
                    underlying: TypeRef::new("Point"),
                }),
            ],
        );
        Catalog::from_units(vec![unit]).unwrap()
    }

    fn func(name: &str, params: Vec<Param>) -> FunctionDecl {
        FunctionDecl {
            name: name.to_string(),
            return_type: TypeRef::new("void"),
            params,
        }
    }

    #[test]
    fn test_const_pointer_receiver_matches() {
        let catalog = catalog_with_point();
        let config = BinderConfig::default();

        let f = func(
            "point_print",
            vec![Param::new("p", TypeRef::new("Point").with_const().with_pointer())],
        );
        let candidate = match_signature(&f, &catalog, &config).unwrap();
        assert_eq!(candidate.struct_idx, 0);
        assert_eq!(candidate.kind, SignalKind::Signature);
        assert_eq!(candidate.weight, 0.7);
    }

    #[test]
    fn test_by_value_receiver_matches() {
        let catalog = catalog_with_point();
        let config = BinderConfig::default();

        let f = func("point_norm", vec![Param::new("p", TypeRef::new("Point"))]);
        assert!(match_signature(&f, &catalog, &config).is_some());
    }

    #[test]
    fn test_typedef_alias_receiver_matches() {
        let catalog = catalog_with_point();
        let config = BinderConfig::default();

        let f = func(
            "point_free",
            vec![Param::new("h", TypeRef::new("PointHandle").with_pointer())],
        );
        assert!(match_signature(&f, &catalog, &config).is_some());
    }

    #[test]
    fn test_primitive_first_param_no_signal() {
        let catalog = catalog_with_point();
        let config = BinderConfig::default();

        let f = func(
            "max",
            vec![
                Param::new("a", TypeRef::new("int")),
                Param::new("b", TypeRef::new("int")),
            ],
        );
        assert!(match_signature(&f, &catalog, &config).is_none());
    }

    #[test]
    fn test_no_params_no_signal() {
        let catalog = catalog_with_point();
        let config = BinderConfig::default();

        let f = func("init_graphics", vec![]);
        assert!(match_signature(&f, &catalog, &config).is_none());
    }

    #[test]
    fn test_only_first_param_considered() {
        let catalog = catalog_with_point();
        let config = BinderConfig::default();

        // Struct in second position is not a receiver
        let f = func(
            "scale",
            vec![
                Param::new("factor", TypeRef::new("int")),
                Param::new("p", TypeRef::new("Point").with_pointer()),
            ],
        );
        assert!(match_signature(&f, &catalog, &config).is_none());
    }
}
