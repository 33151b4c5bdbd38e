//! Type-Wrapper Analyzer
//!
//! Unwraps a `TypeRef`'s NON_NULL/LIST wrapper chain in one
//! outward-to-inward walk, yielding the base type plus arity flags. Pure;
//! a valid schema guarantees a finite chain, so this always terminates.

use crate::types::{RefKind, TypeKind, TypeRef};

/// The shape of an unwrapped type reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeShape {
    pub base_kind: TypeKind,
    pub base_name: String,
    /// Any LIST wrapper present in the chain
    pub is_array: bool,
    /// NON_NULL wrapping the outermost position
    pub is_required: bool,
    /// NON_NULL wrapping the list-element position
    pub items_required: bool,
}

/// Unwrap a reference chain to its base type and arity flags.
///
/// Returns `None` only when the chain terminates without a named type,
/// which a well-formed introspection document never produces; callers
/// skip such references.
pub fn analyze(type_ref: &TypeRef) -> Option<TypeShape> {
    let mut is_array = false;
    let mut is_required = false;
    let mut items_required = false;
    let mut current = type_ref;
    loop {
        match current.kind {
            RefKind::NonNull => {
                if is_array {
                    items_required = true;
                } else {
                    is_required = true;
                }
                current = current.of_type.as_deref()?;
            }
            RefKind::List => {
                is_array = true;
                current = current.of_type.as_deref()?;
            }
            named => {
                return Some(TypeShape {
                    base_kind: named.as_type_kind()?,
                    base_name: current.name.clone()?,
                    is_array,
                    is_required,
                    items_required,
                });
            }
        }
    }
}

/// Render a reference chain as SDL text, e.g. `[String!]!`
pub fn render_sdl(type_ref: &TypeRef) -> String {
    match (type_ref.kind, type_ref.of_type.as_deref()) {
        (RefKind::NonNull, Some(inner)) => format!("{}!", render_sdl(inner)),
        (RefKind::List, Some(inner)) => format!("[{}]", render_sdl(inner)),
        _ => type_ref.name.clone().unwrap_or_default(),
    }
}
