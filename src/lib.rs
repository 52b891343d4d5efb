//! # Introduction
//!
//! structbind infers which free C functions act as methods of which structs,
//! so a wrapper generator can group them into object-oriented bindings. It
//! consumes declaration lists produced by a parser collaborator (it never
//! reads source text) and returns a deterministic binding map plus
//! diagnostics and a classification report.
//!
//! ## Inference pipeline
//!
//! ```text
//! Declarations → Catalog → Matchers → Resolver → BindingMap
//! ```
//!
//! 1. [`catalog`] — indexes structs, enums, typedefs, and functions from one
//!    or more translation units, with stable source ordering.
//! 2. [`matcher`] — three weighted signals per function: receiver-shaped
//!    first parameter (0.7), struct-name prefix (0.3), factory-style return
//!    type (0.2).
//! 3. [`resolver`] — sums the signals per candidate struct and binds on a
//!    strict maximum; ties are ambiguous, silence is utility.
//! 4. [`binding`] — merges per-function outcomes across translation units
//!    into the final [`binding::BindingMap`], reporting duplicate and
//!    inconsistent bindings as diagnostics instead of guessing.
//!
//! ## Fail-safe policy
//!
//! The engine is heuristic by design and prefers an honest "don't know":
//! a function with no signal lands in the utility list, and a function with
//! equally-plausible owners lands in the ambiguous list. Neither case is an
//! error.
//!
//! ## Example
//!
//! ```
//! use structbind::binding::bind_units;
//! use structbind::catalog::decl::{
//!     Declaration, Field, FunctionDecl, Param, StructDecl, TranslationUnit, TypeRef,
//! };
//! use structbind::config::BinderConfig;
//!
//! let unit = TranslationUnit::with_declarations(
//!     "point.c",
//!     vec![
//!         Declaration::Struct(StructDecl {
//!             name: "Point".to_string(),
//!             fields: vec![
//!                 Field::new("x", TypeRef::new("int")),
//!                 Field::new("y", TypeRef::new("int")),
//!             ],
//!         }),
//!         Declaration::Function(FunctionDecl {
//!             name: "point_move".to_string(),
//!             return_type: TypeRef::new("void"),
//!             params: vec![
//!                 Param::new("p", TypeRef::new("Point").with_pointer()),
//!                 Param::new("dx", TypeRef::new("int")),
//!                 Param::new("dy", TypeRef::new("int")),
//!             ],
//!         }),
//!     ],
//! );
//!
//! let outcome = bind_units(vec![unit], &BinderConfig::default()).unwrap();
//! assert_eq!(outcome.map.methods_of("Point").unwrap(), ["point_move"]);
//! ```

pub mod binding;
pub mod catalog;
pub mod config;
pub mod matcher;
pub mod resolver;
