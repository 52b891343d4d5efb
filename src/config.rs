//! Engine configuration
//!
//! Signal weights and the C primitive-name set, passed explicitly to the
//! matchers and the binding builder. No global state: callers that want
//! non-default weights construct a [`BinderConfig`] and thread it through.
//!
//! The default weights encode the signal hierarchy: a receiver-shaped first
//! parameter (0.7) outranks a name prefix (0.3), which outranks a factory
//! return type (0.2). A name prefix plus a factory return (0.5) still loses
//! to a receiver parameter elsewhere, and equal sums tie rather than bind.

use rustc_hash::FxHashSet;

/// C primitive type names that never own methods
const PRIMITIVE_NAMES: &[&str] = &[
    "char", "short", "int", "long", "float", "double", "signed", "unsigned", "void", "size_t",
    "ssize_t", "_Bool", "bool",
];

/// Tunable knobs for the binding engine
#[derive(Debug, Clone)]
pub struct BinderConfig {
    /// Weight of a receiver-shaped first parameter
    pub signature_weight: f64,
    /// Weight of a struct-name prefix on the function name
    pub naming_weight: f64,
    /// Weight of a factory-style return type
    pub factory_weight: f64,
    primitives: FxHashSet<&'static str>,
}

impl Default for BinderConfig {
    fn default() -> Self {
        BinderConfig {
            signature_weight: 0.7,
            naming_weight: 0.3,
            factory_weight: 0.2,
            primitives: PRIMITIVE_NAMES.iter().copied().collect(),
        }
    }
}

impl BinderConfig {
    /// Whether a base type name is a C primitive
    ///
    /// Sign qualifiers are tolerated in the name itself ("unsigned int",
    /// bare "unsigned"), since parser collaborators differ on whether they
    /// fold them into the base name.
    pub fn is_primitive(&self, name: &str) -> bool {
        let stripped: Vec<&str> = name
            .split_whitespace()
            .filter(|word| *word != "signed" && *word != "unsigned")
            .collect();

        match stripped.as_slice() {
            // "unsigned" alone is an int
            [] => !name.trim().is_empty(),
            [single] => self.primitives.contains(single),
            // "long long", "unsigned long int" and friends
            words => words.iter().all(|word| self.primitives.contains(word)),
        }
    }
}
