//! Example/Query Generator
//!
//! Recursive descent over the pruned, indexed graph: for one root
//! operation field it emits example query text, top-level variables and a
//! matching example response tree. Two independent guards keep the
//! descent finite on cyclic schemas: a per-call visited set of
//! `(field name, return type)` pairs that swaps a repeat descent for a
//! fragment-spread placeholder, and a hard depth ceiling that truncates
//! anything pathological to a `__typename` selection.

pub mod example;

use std::collections::HashSet;

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::index::SchemaIndex;
use crate::types::{
    Field, OperationExample, RootOperation, SchemaType, TypeKind, TypeLocator,
};
use crate::wrapper::{analyze, render_sdl};

pub use example::{
    resolve_processor, scalar_example, ExampleContext, ExampleProcessor, ProcessorFactory,
    ProcessorResolution,
};

use example::{resolve_leaf, wrap_array};

/// Generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Hard ceiling on descent depth, independent of cycle detection
    pub max_depth: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig { max_depth: 10 }
    }
}

/// Synthesizes request/response examples from a pruned Schema Index
pub struct ExampleGenerator {
    config: GeneratorConfig,
    hook: Option<Box<dyn ExampleProcessor>>,
}

impl ExampleGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        ExampleGenerator { config, hook: None }
    }

    /// Install a dynamic example processor; any non-`Found` resolution
    /// degrades to "no hook"
    pub fn with_processor(mut self, resolution: ProcessorResolution) -> Self {
        self.hook = resolution.into_hook();
        self
    }

    /// Generate the example for one root operation field.
    ///
    /// Returns `None` when the operation root or the field is absent from
    /// the pruned graph.
    pub fn generate(
        &self,
        index: &SchemaIndex,
        operation: RootOperation,
        field_name: &str,
    ) -> Option<OperationExample> {
        let graph = index.graph();
        let root_name = match operation {
            RootOperation::Query => graph.query_root.clone(),
            RootOperation::Mutation => graph.mutation_root.clone()?,
            RootOperation::Subscription => graph.subscription_root.clone()?,
        };
        let root_locator = TypeLocator::new(TypeKind::Object, root_name);
        let root_type = index.lookup(&root_locator)?;
        let field = index.field(&root_locator, field_name)?;

        // only the root field's arguments become $variables
        let mut variables = Map::new();
        for arg in field.args.iter().filter(|a| !a.removed) {
            let Some(shape) = analyze(&arg.type_ref) else {
                continue;
            };
            let value = resolve_leaf(
                index,
                root_type,
                Some(field),
                Some(arg),
                &shape,
                arg.example.as_ref(),
                self.hook.as_deref(),
            );
            variables.insert(arg.name.clone(), wrap_array(value, &shape));
        }

        let declarations: Vec<String> = field
            .args
            .iter()
            .filter(|a| !a.removed)
            .map(|a| format!("${}: {}", a.name, render_sdl(&a.type_ref)))
            .collect();
        let header = if declarations.is_empty() {
            format!("{} {} {{", operation.keyword(), field.name)
        } else {
            format!(
                "{} {}({}) {{",
                operation.keyword(),
                field.name,
                declarations.join(", ")
            )
        };

        let mut lines = vec![header];
        let mut visited = HashSet::new();
        let value = self.walk_field(index, root_type, field, 1, &mut visited, &mut lines);
        lines.push("}".to_string());

        let mut data = Map::new();
        data.insert(field.name.clone(), value);
        Some(OperationExample {
            query: lines.join("\n"),
            variables: (!variables.is_empty()).then_some(variables),
            response: json!({ "data": data }),
        })
    }

    /// Generate and attach examples for every surviving root operation
    /// field, and synthesize examples for documented types that have none
    pub fn generate_all(&self, index: &mut SchemaIndex) {
        let mut operations = Vec::new();
        for operation in [
            RootOperation::Query,
            RootOperation::Mutation,
            RootOperation::Subscription,
        ] {
            let graph = index.graph();
            let root_name = match operation {
                RootOperation::Query => Some(graph.query_root.clone()),
                RootOperation::Mutation => graph.mutation_root.clone(),
                RootOperation::Subscription => graph.subscription_root.clone(),
            };
            let Some(root_name) = root_name else { continue };
            let locator = TypeLocator::new(TypeKind::Object, root_name);
            let Some(root_type) = index.lookup(&locator) else {
                continue;
            };
            let names: Vec<String> = root_type
                .fields
                .iter()
                .filter(|f| !f.removed)
                .map(|f| f.name.clone())
                .collect();
            for name in names {
                if let Some(generated) = self.generate(index, operation, &name) {
                    operations.push((locator.clone(), name, generated));
                }
            }
        }
        for (locator, name, generated) in operations {
            if let Some(field) = index.field_mut(&locator, &name) {
                field.operation_example = Some(generated);
            }
        }

        let mut type_examples = Vec::new();
        for locator in index.locators() {
            if index.graph().is_root(locator.kind, &locator.name) {
                continue;
            }
            let Some(schema_type) = index.lookup(&locator) else {
                continue;
            };
            if schema_type.example.is_some() {
                continue;
            }
            if let Some(example) = self.type_example(index, schema_type) {
                type_examples.push((locator, example));
            }
        }
        for (locator, example) in type_examples {
            if let Some(schema_type) = index.lookup_mut(&locator) {
                schema_type.example = Some(example);
            }
        }
    }

    // One shallow response-shaped value per documented type; leaf fields
    // only, nested objects are left to their own type's example.
    fn type_example(&self, index: &SchemaIndex, schema_type: &SchemaType) -> Option<Value> {
        match schema_type.kind {
            TypeKind::Object | TypeKind::Interface => {
                let mut object = Map::new();
                for field in schema_type.fields.iter().filter(|f| !f.removed) {
                    let Some(shape) = analyze(&field.type_ref) else {
                        continue;
                    };
                    if matches!(
                        shape.base_kind,
                        TypeKind::Object | TypeKind::Interface | TypeKind::InputObject
                    ) {
                        continue;
                    }
                    let value = resolve_leaf(
                        index,
                        schema_type,
                        Some(field),
                        None,
                        &shape,
                        field.example.as_ref(),
                        self.hook.as_deref(),
                    );
                    object.insert(field.name.clone(), wrap_array(value, &shape));
                }
                (!object.is_empty()).then(|| Value::Object(object))
            }
            TypeKind::InputObject => {
                let mut object = Map::new();
                for input_field in schema_type.input_fields.iter().filter(|a| !a.removed) {
                    let Some(shape) = analyze(&input_field.type_ref) else {
                        continue;
                    };
                    if matches!(
                        shape.base_kind,
                        TypeKind::Object | TypeKind::Interface | TypeKind::InputObject
                    ) {
                        continue;
                    }
                    let value = resolve_leaf(
                        index,
                        schema_type,
                        None,
                        Some(input_field),
                        &shape,
                        input_field.example.as_ref(),
                        self.hook.as_deref(),
                    );
                    object.insert(input_field.name.clone(), wrap_array(value, &shape));
                }
                (!object.is_empty()).then(|| Value::Object(object))
            }
            TypeKind::Enum => schema_type
                .enum_values
                .iter()
                .find(|v| !v.removed)
                .map(|v| json!(v.name.clone())),
            TypeKind::Union => schema_type
                .possible_types
                .first()
                .and_then(|pt| pt.name.as_deref())
                .map(|n| json!(format!("Union<{}>", n))),
            TypeKind::Scalar => None,
        }
    }

    fn walk_field(
        &self,
        index: &SchemaIndex,
        owner: &SchemaType,
        field: &Field,
        depth: usize,
        visited: &mut HashSet<(String, String)>,
        lines: &mut Vec<String>,
    ) -> Value {
        let indent = "  ".repeat(depth);
        let args_inline = if depth == 1 {
            let bindings: Vec<String> = field
                .args
                .iter()
                .filter(|a| !a.removed)
                .map(|a| format!("{}: ${}", a.name, a.name))
                .collect();
            if bindings.is_empty() {
                String::new()
            } else {
                format!("({})", bindings.join(", "))
            }
        } else {
            // nested-field arguments are deliberately not parameterized
            String::new()
        };

        let Some(shape) = analyze(&field.type_ref) else {
            lines.push(format!("{}{}", indent, field.name));
            return Value::Null;
        };
        let locator = TypeLocator::new(shape.base_kind, shape.base_name.clone());
        let target = match index.lookup(&locator) {
            Some(t)
                if matches!(shape.base_kind, TypeKind::Object | TypeKind::Interface)
                    && t.fields.iter().any(|f| !f.removed) =>
            {
                t
            }
            _ => {
                lines.push(format!("{}{}{}", indent, field.name, args_inline));
                let value = resolve_leaf(
                    index,
                    owner,
                    Some(field),
                    None,
                    &shape,
                    field.example.as_ref(),
                    self.hook.as_deref(),
                );
                return wrap_array(value, &shape);
            }
        };

        if depth >= self.config.max_depth {
            debug!(
                field = %field.name,
                type_name = %shape.base_name,
                "descent hit the depth ceiling; truncating to a placeholder"
            );
            lines.push(format!("{}{}{} {{", indent, field.name, args_inline));
            lines.push(format!("{}  __typename", indent));
            lines.push(format!("{}}}", indent));
            let value = json!({ "__typename": shape.base_name.clone() });
            return wrap_array(value, &shape);
        }

        let pair = (field.name.clone(), shape.base_name.clone());
        if depth > 1 && visited.contains(&pair) {
            lines.push(format!("{}{}{} {{", indent, field.name, args_inline));
            lines.push(format!("{}  ...{}Fragment", indent, shape.base_name));
            lines.push(format!("{}}}", indent));
            return wrap_array(Value::Null, &shape);
        }
        visited.insert(pair);

        lines.push(format!("{}{}{} {{", indent, field.name, args_inline));
        let mut object = Map::new();
        for child in target.fields.iter().filter(|f| !f.removed) {
            let value = self.walk_field(index, target, child, depth + 1, visited, lines);
            object.insert(child.name.clone(), value);
        }
        lines.push(format!("{}}}", indent));
        wrap_array(Value::Object(object), &shape)
    }
}
