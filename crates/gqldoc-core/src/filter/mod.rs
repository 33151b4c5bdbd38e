//! Documentation Filter
//!
//! Walks every element of an indexed Schema Graph, computes its
//! visibility from the configured category defaults plus per-element
//! metadata overrides, and drives the Schema Index's removal operations
//! to prune what should not be documented.
//!
//! The three phases run in a fixed order: types, then fields/enum
//! values, then arguments. A field whose return type fell in phase 1 is
//! already gone as a cascade side effect before phase 2 ever looks at
//! it, which is why the phases cannot be reordered.
//!
//! Copyright (c) 2025 Gqldoc Team
//! Licensed under the Apache-2.0 license

pub mod options;

use std::collections::HashSet;

use tracing::warn;

use crate::index::{CascadeFlags, SchemaIndex};
use crate::types::{DocMetadata, RootOperation, TypeKind, TypeLocator};

pub use options::FilterOptions;

/// The uniform visibility rule applied at every level
fn should_document(meta: Option<&DocMetadata>, plural: bool, singular_default: bool) -> bool {
    if !plural {
        return false;
    }
    let documented = meta.and_then(|m| m.documented).unwrap_or(false);
    let undocumented = meta.and_then(|m| m.undocumented).unwrap_or(false);
    !undocumented && (documented || singular_default)
}

/// Prune the indexed graph in place according to `options`.
///
/// Consumes each element's documentation metadata (attaching any supplied
/// example) and strips it from the graph. Root Query/Mutation/Subscription
/// types are structurally retained even when their own visibility computes
/// false; only their contents are pruned.
pub fn filter_schema(index: &mut SchemaIndex, options: &FilterOptions) {
    if !options.hide_queries_with_undocumented_return_type
        || !options.hide_mutations_with_undocumented_return_type
        || !options.hide_fields_of_undocumented_type
    {
        warn!(
            "hide-if-return-type-hidden switches are off; cascades still run \
             so the pruned graph keeps referential integrity"
        );
    }

    let hidden_roots = prune_types(index, options);
    prune_fields_and_enum_values(index, options, &hidden_roots);
    prune_arguments(index, options);
    index.clean();
}

/// Phase 1: types. Returns the names of root types whose own visibility
/// computed false; their contents are pruned in phase 2.
fn prune_types(index: &mut SchemaIndex, options: &FilterOptions) -> HashSet<String> {
    let mut hidden_roots = HashSet::new();
    for locator in index.locators() {
        let root = index.graph().root_operation(locator.kind, &locator.name);
        let meta = take_type_metadata(index, &locator, &options.metadata_key);

        let (plural, singular) = match (root, locator.kind) {
            (Some(RootOperation::Query), _) => (options.queries_documented, true),
            (Some(RootOperation::Mutation), _) => (options.mutations_documented, true),
            (Some(RootOperation::Subscription), _) => (options.subscriptions_documented, true),
            (None, TypeKind::Object) | (None, TypeKind::Interface) => {
                (options.objects_documented, options.object_documented_default)
            }
            (None, TypeKind::InputObject) => {
                (options.inputs_documented, options.input_documented_default)
            }
            (None, TypeKind::Union) => {
                (options.unions_documented, options.union_documented_default)
            }
            (None, TypeKind::Enum) => (options.enums_documented, options.enum_documented_default),
            // scalars have no category default; only an explicit
            // undocumented marker can hide one
            (None, TypeKind::Scalar) => (true, true),
        };

        if should_document(meta.as_ref(), plural, singular) {
            continue;
        }
        if root.is_some() {
            hidden_roots.insert(locator.name.clone());
        } else {
            index.remove_type(&locator, CascadeFlags::all(), false);
        }
    }
    hidden_roots
}

/// Phase 2: fields and enum values, over the graph as shrunk by phase 1
fn prune_fields_and_enum_values(
    index: &mut SchemaIndex,
    options: &FilterOptions,
    hidden_roots: &HashSet<String>,
) {
    for locator in index.locators() {
        match locator.kind {
            TypeKind::Object | TypeKind::Interface => {
                let root = index.graph().root_operation(locator.kind, &locator.name);
                let root_hidden = hidden_roots.contains(&locator.name);
                let (plural, singular) = match root {
                    Some(RootOperation::Query) => (
                        options.queries_documented && !root_hidden,
                        options.query_documented_default,
                    ),
                    Some(RootOperation::Mutation) => (
                        options.mutations_documented && !root_hidden,
                        options.mutation_documented_default,
                    ),
                    Some(RootOperation::Subscription) => (
                        options.subscriptions_documented && !root_hidden,
                        options.subscription_documented_default,
                    ),
                    None => (options.fields_documented, options.field_documented_default),
                };
                let doomed = collect_hidden_fields(index, &locator, options, plural, singular);
                for name in doomed {
                    index.remove_field(&locator, &name, true);
                }
            }
            TypeKind::InputObject => {
                let doomed = collect_hidden_input_fields(index, &locator, options);
                for name in doomed {
                    index.remove_input_field(&locator, &name, true);
                }
            }
            TypeKind::Enum => {
                let doomed = collect_hidden_enum_values(index, &locator, options);
                for name in doomed {
                    index.remove_enum_value(&locator, &name, true);
                }
            }
            TypeKind::Scalar | TypeKind::Union => {}
        }
    }
    index.clean();
}

/// Phase 3: arguments of every surviving field
fn prune_arguments(index: &mut SchemaIndex, options: &FilterOptions) {
    for locator in index.locators() {
        if !matches!(locator.kind, TypeKind::Object | TypeKind::Interface) {
            continue;
        }
        let root = index.graph().root_operation(locator.kind, &locator.name);
        let singular = match root {
            Some(RootOperation::Query) => options
                .query_arg_documented_default
                .unwrap_or(options.arg_documented_default),
            Some(RootOperation::Mutation) => options
                .mutation_arg_documented_default
                .unwrap_or(options.arg_documented_default),
            Some(RootOperation::Subscription) => options
                .subscription_arg_documented_default
                .unwrap_or(options.arg_documented_default),
            None => options.arg_documented_default,
        };
        let doomed = collect_hidden_args(index, &locator, options, singular);
        for (field, arg) in doomed {
            index.remove_arg(&locator, &field, &arg, true);
        }
    }
    index.clean();
}

fn take_type_metadata(
    index: &mut SchemaIndex,
    locator: &TypeLocator,
    key: &str,
) -> Option<DocMetadata> {
    let schema_type = index.lookup_mut(locator)?;
    let meta = DocMetadata::take_from(&mut schema_type.extensions, key)?;
    if schema_type.example.is_none() {
        schema_type.example = meta.chosen_example();
    }
    Some(meta)
}

fn collect_hidden_fields(
    index: &mut SchemaIndex,
    locator: &TypeLocator,
    options: &FilterOptions,
    plural: bool,
    singular: bool,
) -> Vec<String> {
    let mut doomed = Vec::new();
    let Some(schema_type) = index.lookup_mut(locator) else {
        return doomed;
    };
    for field in schema_type.fields.iter_mut().filter(|f| !f.removed) {
        let meta = DocMetadata::take_from(&mut field.extensions, &options.metadata_key);
        if let Some(m) = &meta {
            if field.example.is_none() {
                field.example = m.chosen_example();
            }
        }
        if !should_document(meta.as_ref(), plural, singular) {
            doomed.push(field.name.clone());
        }
    }
    doomed
}

fn collect_hidden_input_fields(
    index: &mut SchemaIndex,
    locator: &TypeLocator,
    options: &FilterOptions,
) -> Vec<String> {
    let mut doomed = Vec::new();
    let Some(schema_type) = index.lookup_mut(locator) else {
        return doomed;
    };
    for input_field in schema_type.input_fields.iter_mut().filter(|a| !a.removed) {
        let meta = DocMetadata::take_from(&mut input_field.extensions, &options.metadata_key);
        if let Some(m) = &meta {
            if input_field.example.is_none() {
                input_field.example = m.chosen_example();
            }
        }
        if !should_document(
            meta.as_ref(),
            options.input_fields_documented,
            options.input_field_documented_default,
        ) {
            doomed.push(input_field.name.clone());
        }
    }
    doomed
}

fn collect_hidden_enum_values(
    index: &mut SchemaIndex,
    locator: &TypeLocator,
    options: &FilterOptions,
) -> Vec<String> {
    let mut doomed = Vec::new();
    let Some(schema_type) = index.lookup_mut(locator) else {
        return doomed;
    };
    for value in schema_type.enum_values.iter_mut().filter(|v| !v.removed) {
        let meta = DocMetadata::take_from(&mut value.extensions, &options.metadata_key);
        if let Some(m) = &meta {
            if value.example.is_none() {
                value.example = m.chosen_example();
            }
        }
        if !should_document(
            meta.as_ref(),
            options.enum_values_documented,
            options.enum_value_documented_default,
        ) {
            doomed.push(value.name.clone());
        }
    }
    doomed
}

fn collect_hidden_args(
    index: &mut SchemaIndex,
    locator: &TypeLocator,
    options: &FilterOptions,
    singular: bool,
) -> Vec<(String, String)> {
    let mut doomed = Vec::new();
    let Some(schema_type) = index.lookup_mut(locator) else {
        return doomed;
    };
    for field in schema_type.fields.iter_mut().filter(|f| !f.removed) {
        for arg in field.args.iter_mut().filter(|a| !a.removed) {
            let meta = DocMetadata::take_from(&mut arg.extensions, &options.metadata_key);
            if let Some(m) = &meta {
                if arg.example.is_none() {
                    arg.example = m.chosen_example();
                }
            }
            if !should_document(meta.as_ref(), options.args_documented, singular) {
                doomed.push((field.name.clone(), arg.name.clone()));
            }
        }
    }
    doomed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKind;
    use serde_json::{json, Value};

    fn document_with_metadata() -> Value {
        json!({
            "__schema": {
                "queryType": { "name": "Query" },
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "fields": [
                            {
                                "name": "greet",
                                "args": [
                                    { "name": "name", "type": { "kind": "SCALAR", "name": "String" } }
                                ],
                                "type": { "kind": "SCALAR", "name": "String" }
                            },
                            {
                                "name": "internal",
                                "args": [],
                                "type": { "kind": "SCALAR", "name": "String" },
                                "metadata": { "undocumented": true }
                            }
                        ]
                    },
                    {
                        "kind": "OBJECT",
                        "name": "Secret",
                        "fields": [
                            { "name": "value", "args": [], "type": { "kind": "SCALAR", "name": "String" } }
                        ],
                        "metadata": { "undocumented": true }
                    },
                    {
                        "kind": "ENUM",
                        "name": "Color",
                        "enumValues": [
                            { "name": "RED" },
                            { "name": "BLUE", "metadata": { "undocumented": true } }
                        ]
                    },
                    { "kind": "SCALAR", "name": "String" }
                ]
            }
        })
    }

    fn query() -> TypeLocator {
        TypeLocator::new(TypeKind::Object, "Query")
    }

    #[test]
    fn test_visibility_rule() {
        let documented = DocMetadata {
            documented: Some(true),
            ..Default::default()
        };
        let undocumented = DocMetadata {
            undocumented: Some(true),
            ..Default::default()
        };
        // no metadata, default true
        assert!(should_document(None, true, true));
        // default false, no override
        assert!(!should_document(None, true, false));
        // default false, documented override
        assert!(should_document(Some(&documented), true, false));
        // undocumented wins over everything
        assert!(!should_document(Some(&undocumented), true, true));
        // plural switch off beats an explicit override
        assert!(!should_document(Some(&documented), false, true));
    }

    #[test]
    fn test_undocumented_metadata_prunes() {
        let mut index = SchemaIndex::from_introspection(&document_with_metadata()).unwrap();
        filter_schema(&mut index, &FilterOptions::default());

        assert!(index.field(&query(), "greet").is_some());
        assert!(index.field(&query(), "internal").is_none());
        assert!(index
            .lookup(&TypeLocator::new(TypeKind::Object, "Secret"))
            .is_none());
        let color = index
            .lookup(&TypeLocator::new(TypeKind::Enum, "Color"))
            .unwrap();
        assert_eq!(color.enum_values.len(), 1);
        assert_eq!(color.enum_values[0].name, "RED");
    }

    #[test]
    fn test_arg_default_false_prunes_argument() {
        let mut index = SchemaIndex::from_introspection(&document_with_metadata()).unwrap();
        let options = FilterOptions::from_json_value(json!({ "argDocumentedDefault": false }))
            .unwrap();
        filter_schema(&mut index, &options);

        assert!(index.field(&query(), "greet").is_some());
        assert!(index.argument(&query(), "greet", "name").is_none());
    }

    #[test]
    fn test_root_type_survives_hidden_queries() {
        let mut index = SchemaIndex::from_introspection(&document_with_metadata()).unwrap();
        let options =
            FilterOptions::from_json_value(json!({ "queriesDocumented": false })).unwrap();
        filter_schema(&mut index, &options);

        // root retained structurally, contents pruned
        let root = index.lookup(&query()).unwrap();
        assert!(root.fields.is_empty());
    }

    #[test]
    fn test_metadata_is_stripped_and_example_attached() {
        let doc = json!({
            "__schema": {
                "queryType": { "name": "Query" },
                "types": [
                    {
                        "kind": "OBJECT",
                        "name": "Query",
                        "fields": [
                            {
                                "name": "greet",
                                "args": [],
                                "type": { "kind": "SCALAR", "name": "String" },
                                "metadata": { "example": "Hello!" }
                            }
                        ]
                    },
                    { "kind": "SCALAR", "name": "String" }
                ]
            }
        });
        let mut index = SchemaIndex::from_introspection(&doc).unwrap();
        filter_schema(&mut index, &FilterOptions::default());
        let field = index.field(&query(), "greet").unwrap();
        assert_eq!(field.example, Some(json!("Hello!")));
        assert!(!field.extensions.contains_key("metadata"));
    }
}
