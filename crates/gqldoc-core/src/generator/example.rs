//! Leaf example resolution and the dynamic example hook
//!
//! A leaf value is resolved from, in order: the explicit example attached
//! during filtering, the first enum value's name, the first possible
//! type's name in an unresolved-union marker, or the built-in scalar
//! table. An externally supplied processor then sees the full context and
//! may substitute its own value; a processor that cannot be resolved or
//! that fails is logged and treated as absent. No branch is fatal.
//!
//! Copyright (c) 2025 Gqldoc Team
//! Licensed under the Apache-2.0 license

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::warn;

use crate::index::SchemaIndex;
use crate::types::{Argument, Field, SchemaType, TypeKind, TypeLocator};
use crate::wrapper::TypeShape;

/// Everything a dynamic example processor gets to look at
#[derive(Debug)]
pub struct ExampleContext<'a> {
    /// The type owning the field or argument
    pub owner: &'a SchemaType,
    pub field: Option<&'a Field>,
    pub argument: Option<&'a Argument>,
    /// The unwrapped base type of the value being exemplified
    pub shape: &'a TypeShape,
    /// The value the engine would use if the processor declines
    pub candidate: Option<&'a Value>,
}

/// An externally supplied source of example values.
///
/// Returning `Ok(None)` declines; returning `Err` is logged and treated
/// the same as declining.
pub trait ExampleProcessor {
    fn process(&self, context: &ExampleContext<'_>) -> anyhow::Result<Option<Value>>;
}

/// Constructor for a registered processor
pub type ProcessorFactory = fn() -> anyhow::Result<Box<dyn ExampleProcessor>>;

/// Outcome of resolving a configured processor name against a registry.
///
/// Expected alternates, not failures: only `Found` carries a processor,
/// and every other variant degrades to "no hook".
pub enum ProcessorResolution {
    Found(Box<dyn ExampleProcessor>),
    NotConfigured,
    NotFound,
    LoadFailed(anyhow::Error),
}

impl ProcessorResolution {
    /// Degrade every non-`Found` outcome to "no hook", logging why
    pub fn into_hook(self) -> Option<Box<dyn ExampleProcessor>> {
        match self {
            ProcessorResolution::Found(processor) => Some(processor),
            ProcessorResolution::NotConfigured => None,
            ProcessorResolution::NotFound => {
                warn!("configured dynamic example processor was not found; continuing without it");
                None
            }
            ProcessorResolution::LoadFailed(error) => {
                warn!(%error, "dynamic example processor failed to load; continuing without it");
                None
            }
        }
    }
}

/// Resolve a configured processor name against a registry of factories
pub fn resolve_processor(
    configured: Option<&str>,
    registry: &HashMap<String, ProcessorFactory>,
) -> ProcessorResolution {
    let Some(name) = configured else {
        return ProcessorResolution::NotConfigured;
    };
    let Some(factory) = registry.get(name) else {
        return ProcessorResolution::NotFound;
    };
    match factory() {
        Ok(processor) => ProcessorResolution::Found(processor),
        Err(error) => ProcessorResolution::LoadFailed(error),
    }
}

/// Built-in example table for scalar kinds. An unrecognized scalar falls
/// back to its own name as a string.
pub fn scalar_example(name: &str) -> Value {
    match name {
        "Int" => json!(987),
        "Float" => json!(123.45),
        "String" => json!("abc123"),
        "Boolean" => json!(true),
        "ID" => json!("4"),
        other => json!(other),
    }
}

/// Resolve an unwrapped leaf value, consulting the processor last so a
/// processor-supplied value wins over everything else
pub(crate) fn resolve_leaf(
    index: &SchemaIndex,
    owner: &SchemaType,
    field: Option<&Field>,
    argument: Option<&Argument>,
    shape: &TypeShape,
    attached: Option<&Value>,
    hook: Option<&dyn ExampleProcessor>,
) -> Value {
    let mut candidate = attached.cloned().or_else(|| fallback_example(index, shape));
    if let Some(hook) = hook {
        let context = ExampleContext {
            owner,
            field,
            argument,
            shape,
            candidate: candidate.as_ref(),
        };
        match hook.process(&context) {
            Ok(Some(value)) => candidate = Some(value),
            Ok(None) => {}
            Err(error) => {
                warn!(%error, "dynamic example processor failed; using fallback example");
            }
        }
    }
    candidate.unwrap_or(Value::Null)
}

fn fallback_example(index: &SchemaIndex, shape: &TypeShape) -> Option<Value> {
    let locator = TypeLocator::new(shape.base_kind, shape.base_name.clone());
    match shape.base_kind {
        TypeKind::Enum => index
            .lookup(&locator)?
            .enum_values
            .iter()
            .find(|v| !v.removed)
            .map(|v| json!(v.name.clone())),
        TypeKind::Union => {
            let first = index.lookup(&locator)?.possible_types.first()?;
            first
                .name
                .as_deref()
                .map(|n| json!(format!("Union<{}>", n)))
        }
        TypeKind::Scalar => Some(scalar_example(&shape.base_name)),
        _ => None,
    }
}

/// Apply the array wrapping an unwrapped shape calls for
pub(crate) fn wrap_array(value: Value, shape: &TypeShape) -> Value {
    if shape.is_array {
        Value::Array(vec![value])
    } else {
        value
    }
}
