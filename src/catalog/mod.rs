//! Declaration catalog
//!
//! This module holds the normalized view of one or more translation units:
//! - [`decl`]: declaration record definitions (structs, enums, typedefs, functions)
//! - [`Catalog`]: name indexes plus stable source ordering over those records
//!
//! The catalog is built once per run and treated as read-only afterwards;
//! every matcher takes it by shared reference. Struct names must be unique
//! across the whole catalog — a collision is a [`CatalogError::DuplicateStruct`]
//! surfaced to the caller rather than resolved silently. Each unit is
//! validated before insertion, so a rejected unit leaves the catalog
//! unchanged and the caller may continue with the remaining units.
//!
//! # Source order
//!
//! Every cataloged struct and function carries a global order index assigned
//! at insertion: units in the order they were added, declarations in the
//! order they appeared within the unit. All output ordering derives from
//! this index, which is what makes the engine deterministic.

pub mod decl;

use std::fmt;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::catalog::decl::{
    Declaration, EnumDecl, FunctionDecl, StructDecl, TranslationUnit, TypeRef,
};
use crate::config::BinderConfig;

/// Catalog construction error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Same struct name declared twice (within a unit or across units)
    DuplicateStruct {
        name: String,
        first_unit: String,
        second_unit: String,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateStruct {
                name,
                first_unit,
                second_unit,
            } => {
                write!(
                    f,
                    "Struct '{}' declared in both '{}' and '{}'",
                    name, first_unit, second_unit
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// A cataloged struct: the declaration plus its origin and order index
#[derive(Debug, Clone)]
pub struct StructEntry {
    pub decl: StructDecl,
    pub unit: String,
    pub order: usize,
}

/// A cataloged enum
#[derive(Debug, Clone)]
pub struct EnumEntry {
    pub decl: EnumDecl,
    pub unit: String,
    pub order: usize,
}

/// A cataloged function
#[derive(Debug, Clone)]
pub struct FunctionEntry {
    pub decl: FunctionDecl,
    pub unit: String,
    pub order: usize,
}

/// What a [`TypeRef`] base name resolves to, after following typedef aliases
#[derive(Debug, Clone, Copy)]
pub enum BaseKind<'a> {
    /// A cataloged struct, with its index into [`Catalog::structs`]
    Struct(usize, &'a StructEntry),
    Enum(&'a EnumEntry),
    /// A known C primitive (`int`, `size_t`, ...); never owns methods
    Primitive(&'a str),
    /// A name the catalog cannot resolve, e.g. a type from an unseen header.
    /// Carries the final name after alias expansion.
    Opaque(&'a str),
}

/// Read-only index over the declarations of all processed translation units
#[derive(Debug, Default)]
pub struct Catalog {
    structs: Vec<StructEntry>,
    struct_index: FxHashMap<String, usize>,
    enums: Vec<EnumEntry>,
    enum_index: FxHashMap<String, usize>,
    typedefs: FxHashMap<String, TypeRef>,
    functions: Vec<FunctionEntry>,
    function_index: FxHashMap<String, Vec<usize>>,
    next_order: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Build a catalog from units, failing on the first duplicate struct
    pub fn from_units(units: Vec<TranslationUnit>) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::new();
        for unit in units {
            catalog.add_unit(unit)?;
        }
        Ok(catalog)
    }

    /// Add one translation unit's declarations
    ///
    /// The unit is validated first: on a duplicate struct name (within the
    /// unit or against already-cataloged units) nothing is inserted and the
    /// error is returned, so callers can skip the bad unit and keep going.
    pub fn add_unit(&mut self, unit: TranslationUnit) -> Result<(), CatalogError> {
        self.check_unit(&unit)?;

        let unit_id = unit.id;
        for decl in unit.declarations {
            let order = self.next_order;
            self.next_order += 1;

            match decl {
                Declaration::Struct(s) => {
                    debug!("cataloged struct '{}' from '{}'", s.name, unit_id);
                    self.struct_index.insert(s.name.clone(), self.structs.len());
                    self.structs.push(StructEntry {
                        decl: s,
                        unit: unit_id.clone(),
                        order,
                    });
                }
                Declaration::Enum(e) => {
                    // First declaration wins; repeated enum names are legal input
                    if !self.enum_index.contains_key(&e.name) {
                        self.enum_index.insert(e.name.clone(), self.enums.len());
                        self.enums.push(EnumEntry {
                            decl: e,
                            unit: unit_id.clone(),
                            order,
                        });
                    }
                }
                Declaration::Typedef(t) => {
                    // First alias wins, matching enum handling
                    self.typedefs.entry(t.name).or_insert(t.underlying);
                }
                Declaration::Function(f) => {
                    self.function_index
                        .entry(f.name.clone())
                        .or_default()
                        .push(self.functions.len());
                    self.functions.push(FunctionEntry {
                        decl: f,
                        unit: unit_id.clone(),
                        order,
                    });
                }
            }
        }

        Ok(())
    }

    fn check_unit(&self, unit: &TranslationUnit) -> Result<(), CatalogError> {
        let mut pending: FxHashSet<&str> = FxHashSet::default();

        for decl in &unit.declarations {
            if let Declaration::Struct(s) = decl {
                if let Some(&idx) = self.struct_index.get(&s.name) {
                    return Err(CatalogError::DuplicateStruct {
                        name: s.name.clone(),
                        first_unit: self.structs[idx].unit.clone(),
                        second_unit: unit.id.clone(),
                    });
                }
                if !pending.insert(&s.name) {
                    return Err(CatalogError::DuplicateStruct {
                        name: s.name.clone(),
                        first_unit: unit.id.clone(),
                        second_unit: unit.id.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// All structs in source order
    pub fn structs(&self) -> &[StructEntry] {
        &self.structs
    }

    /// All functions in source order (duplicate names allowed across units)
    pub fn functions(&self) -> &[FunctionEntry] {
        &self.functions
    }

    pub fn struct_by_name(&self, name: &str) -> Option<&StructEntry> {
        self.struct_index.get(name).map(|&idx| &self.structs[idx])
    }

    /// All functions with this name in source order; C allows the same
    /// name in several units, so this is a multi-lookup
    pub fn functions_named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a FunctionEntry> {
        self.function_index
            .get(name)
            .map(|indexes| indexes.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |&idx| &self.functions[idx])
    }

    /// Resolve a type reference's base name, following typedef aliases
    ///
    /// Alias chains are bounded by the number of cataloged typedefs, so a
    /// cycle (`typedef A B; typedef B A;`) terminates as [`BaseKind::Opaque`]
    /// instead of looping. Names that resolve to neither a struct nor an
    /// enum are classified against the config's primitive set.
    pub fn resolve_base<'a>(&'a self, ty: &'a TypeRef, config: &BinderConfig) -> BaseKind<'a> {
        let mut name: &str = &ty.name;
        let mut hops = 0;

        loop {
            if let Some(&idx) = self.struct_index.get(name) {
                return BaseKind::Struct(idx, &self.structs[idx]);
            }
            if let Some(&idx) = self.enum_index.get(name) {
                return BaseKind::Enum(&self.enums[idx]);
            }
            match self.typedefs.get(name) {
                Some(underlying) if hops < self.typedefs.len() => {
                    name = &underlying.name;
                    hops += 1;
                }
                _ if config.is_primitive(name) => return BaseKind::Primitive(name),
                _ => return BaseKind::Opaque(name),
            }
        }
    }

    /// Resolve straight to a struct index, if the base names one
    pub fn resolve_struct(&self, ty: &TypeRef, config: &BinderConfig) -> Option<usize> {
        match self.resolve_base(ty, config) {
            BaseKind::Struct(idx, _) => Some(idx),
            _ => None,
        }
    }
}
