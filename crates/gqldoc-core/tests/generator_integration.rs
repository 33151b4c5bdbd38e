//! End-to-end tests for example generation over a filtered schema

use std::collections::HashMap;

use gqldoc_core::{
    filter_schema, resolve_processor, ExampleContext, ExampleGenerator, ExampleProcessor,
    FilterOptions, GeneratorConfig, ProcessorFactory, RootOperation, SchemaIndex, TypeKind,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn greet_fixture() -> Value {
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
                        }
                    ]
                },
                { "kind": "SCALAR", "name": "String" }
            ]
        }
    })
}

fn comment_fixture() -> Value {
    json!({
        "__schema": {
            "queryType": { "name": "Query" },
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "fields": [
                        {
                            "name": "comment",
                            "args": [
                                { "name": "id", "type": { "kind": "NON_NULL", "ofType": { "kind": "SCALAR", "name": "ID" } } }
                            ],
                            "type": { "kind": "OBJECT", "name": "Comment" }
                        }
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "Comment",
                    "fields": [
                        { "name": "body", "args": [], "type": { "kind": "SCALAR", "name": "String" } },
                        {
                            "name": "replies",
                            "args": [],
                            "type": { "kind": "LIST", "ofType": { "kind": "OBJECT", "name": "Comment" } }
                        }
                    ]
                },
                { "kind": "SCALAR", "name": "String" },
                { "kind": "SCALAR", "name": "ID" }
            ]
        }
    })
}

#[test]
fn test_greet_scenario_exact_output() {
    let mut index = SchemaIndex::from_introspection(&greet_fixture()).unwrap();
    filter_schema(&mut index, &FilterOptions::default());

    let generator = ExampleGenerator::new(GeneratorConfig::default());
    let example = generator
        .generate(&index, RootOperation::Query, "greet")
        .unwrap();

    assert_eq!(
        example.query,
        "query greet($name: String) {\n  greet(name: $name)\n}"
    );
    assert_eq!(example.response, json!({ "data": { "greet": "abc123" } }));
}

#[test]
fn test_self_referential_type_terminates_with_placeholder() {
    let mut index = SchemaIndex::from_introspection(&comment_fixture()).unwrap();
    filter_schema(&mut index, &FilterOptions::default());

    let generator = ExampleGenerator::new(GeneratorConfig::default());
    let example = generator
        .generate(&index, RootOperation::Query, "comment")
        .unwrap();

    // Comment.replies returns [Comment]; the repeat descent becomes a
    // fragment spread instead of recursing forever
    assert!(example.query.contains("...CommentFragment"), "{}", example.query);
    // variables carry the root argument, rendered with its SDL type
    assert!(example.query.starts_with("query comment($id: ID!) {"));
    assert_eq!(example.variables.unwrap().get("id"), Some(&json!("4")));

    // the response mirrors the query shape
    let comment = &example.response["data"]["comment"];
    assert_eq!(comment["body"], json!("abc123"));
    assert!(comment["replies"].is_array());
}

#[test]
fn test_nested_arguments_are_not_parameterized() {
    let doc = json!({
        "__schema": {
            "queryType": { "name": "Query" },
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "fields": [
                        { "name": "me", "args": [], "type": { "kind": "OBJECT", "name": "User" } }
                    ]
                },
                {
                    "kind": "OBJECT",
                    "name": "User",
                    "fields": [
                        {
                            "name": "avatar",
                            "args": [
                                { "name": "size", "type": { "kind": "SCALAR", "name": "Int" } }
                            ],
                            "type": { "kind": "SCALAR", "name": "String" }
                        }
                    ]
                },
                { "kind": "SCALAR", "name": "String" },
                { "kind": "SCALAR", "name": "Int" }
            ]
        }
    });
    let mut index = SchemaIndex::from_introspection(&doc).unwrap();
    filter_schema(&mut index, &FilterOptions::default());

    let generator = ExampleGenerator::new(GeneratorConfig::default());
    let example = generator
        .generate(&index, RootOperation::Query, "me")
        .unwrap();

    assert_eq!(
        example.query,
        "query me {\n  me {\n    avatar\n  }\n}"
    );
    assert!(example.variables.is_none());
}

struct UuidExamples;

impl ExampleProcessor for UuidExamples {
    fn process(&self, context: &ExampleContext<'_>) -> anyhow::Result<Option<Value>> {
        if context.shape.base_name == "ID" {
            Ok(Some(json!("00000000-0000-0000-0000-000000000000")))
        } else {
            Ok(None)
        }
    }
}

#[test]
fn test_dynamic_processor_substitutes_examples() {
    let mut registry: HashMap<String, ProcessorFactory> = HashMap::new();
    registry.insert("uuid".to_string(), || Ok(Box::new(UuidExamples)));

    let mut index = SchemaIndex::from_introspection(&comment_fixture()).unwrap();
    filter_schema(&mut index, &FilterOptions::default());

    let generator = ExampleGenerator::new(GeneratorConfig::default())
        .with_processor(resolve_processor(Some("uuid"), &registry));
    let example = generator
        .generate(&index, RootOperation::Query, "comment")
        .unwrap();

    assert_eq!(
        example.variables.unwrap().get("id"),
        Some(&json!("00000000-0000-0000-0000-000000000000"))
    );
    // the processor declined for String, table fallback still applies
    assert_eq!(example.response["data"]["comment"]["body"], json!("abc123"));
}

#[test]
fn test_unresolved_processor_degrades_to_table() {
    let registry: HashMap<String, ProcessorFactory> = HashMap::new();
    let mut index = SchemaIndex::from_introspection(&greet_fixture()).unwrap();
    filter_schema(&mut index, &FilterOptions::default());

    let generator = ExampleGenerator::new(GeneratorConfig::default())
        .with_processor(resolve_processor(Some("nonexistent"), &registry));
    let example = generator
        .generate(&index, RootOperation::Query, "greet")
        .unwrap();
    assert_eq!(example.response, json!({ "data": { "greet": "abc123" } }));
}

#[test]
fn test_full_pipeline_attaches_operation_examples() {
    let mut index = SchemaIndex::from_introspection(&comment_fixture()).unwrap();
    filter_schema(&mut index, &FilterOptions::default());
    ExampleGenerator::new(GeneratorConfig::default()).generate_all(&mut index);

    let graph = index.into_graph();
    let query = graph
        .types
        .iter()
        .find(|t| t.kind == TypeKind::Object && t.name == "Query")
        .unwrap();
    let field = &query.fields[0];
    let attached = field.operation_example.as_ref().unwrap();
    assert!(attached.query.starts_with("query comment"));
    assert_eq!(attached.response["data"]["comment"]["body"], json!("abc123"));

    let comment = graph
        .types
        .iter()
        .find(|t| t.kind == TypeKind::Object && t.name == "Comment")
        .unwrap();
    assert_eq!(comment.example, Some(json!({ "body": "abc123" })));
}

#[test]
fn test_filtered_out_operation_is_not_generated() {
    let mut index = SchemaIndex::from_introspection(&greet_fixture()).unwrap();
    let options =
        FilterOptions::from_json_value(json!({ "queriesDocumented": false })).unwrap();
    filter_schema(&mut index, &options);

    let generator = ExampleGenerator::new(GeneratorConfig::default());
    assert!(generator
        .generate(&index, RootOperation::Query, "greet")
        .is_none());
}
