//! Schema Index
//!
//! Lookup maps over the Schema Graph plus the cascading, referential-
//! integrity-preserving mutation operations the Documentation Filter
//! drives. Built in one pass: a `(kind, name)` locator map and reverse-
//! reference maps recording, for every named type, each Field/Argument/
//! InputField whose reference chain unwraps to it. Removal is a reverse-
//! dependency cascade, O(references) per removal rather than O(graph).
//!
//! Removals tombstone nodes in place; `clean()` compacts the tombstones
//! out of every collection and rebuilds the maps. Every removal runs
//! `clean()` eagerly unless the caller defers it, in which case the maps
//! must not be read until the caller's own final `clean()`.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::types::{
    Argument, Field, SchemaGraph, SchemaType, TypeKind, TypeLocator,
};
use crate::wrapper::analyze;

/// Path to a field through its owning type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    pub owner: TypeLocator,
    pub field: String,
}

/// Path to an argument through its owning type and field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgPath {
    pub owner: TypeLocator,
    pub field: String,
    pub arg: String,
}

/// Path to an input field through its owning INPUT_OBJECT type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFieldPath {
    pub owner: TypeLocator,
    pub input_field: String,
}

/// Which referencing elements a type removal also removes
#[derive(Debug, Clone, Copy)]
pub struct CascadeFlags {
    pub fields: bool,
    pub args: bool,
    pub input_fields: bool,
    pub possible_types: bool,
}

impl CascadeFlags {
    pub fn all() -> Self {
        CascadeFlags {
            fields: true,
            args: true,
            input_fields: true,
            possible_types: true,
        }
    }
}

impl Default for CascadeFlags {
    fn default() -> Self {
        Self::all()
    }
}

/// Lookup and mutation index over one Schema Graph.
///
/// One instance per documentation build; never shared across builds.
#[derive(Debug)]
pub struct SchemaIndex {
    graph: SchemaGraph,
    type_by_kind_name: HashMap<TypeLocator, usize>,
    fields_returning: HashMap<TypeLocator, Vec<FieldPath>>,
    args_accepting: HashMap<TypeLocator, Vec<ArgPath>>,
    input_fields_accepting: HashMap<TypeLocator, Vec<InputFieldPath>>,
    unions_containing: HashMap<TypeLocator, Vec<TypeLocator>>,
}

impl SchemaIndex {
    /// Index a graph, building all lookup maps
    pub fn new(graph: SchemaGraph) -> Self {
        let mut index = SchemaIndex {
            graph,
            type_by_kind_name: HashMap::new(),
            fields_returning: HashMap::new(),
            args_accepting: HashMap::new(),
            input_fields_accepting: HashMap::new(),
            unions_containing: HashMap::new(),
        };
        index.rebuild();
        index
    }

    /// Build a graph from an introspection document and index it
    pub fn from_introspection(document: &Value) -> Result<Self> {
        Ok(Self::new(SchemaGraph::from_introspection(document)?))
    }

    /// The underlying graph, for the rendering layer
    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    /// Consume the index, yielding the pruned, annotated graph
    pub fn into_graph(self) -> SchemaGraph {
        self.graph
    }

    /// Locators of all live types, in graph order
    pub fn locators(&self) -> Vec<TypeLocator> {
        self.graph
            .types
            .iter()
            .filter(|t| !t.removed)
            .map(|t| t.locator())
            .collect()
    }

    /// Look up a live type by `(kind, name)`
    pub fn lookup(&self, locator: &TypeLocator) -> Option<&SchemaType> {
        let idx = *self.type_by_kind_name.get(locator)?;
        let schema_type = &self.graph.types[idx];
        (!schema_type.removed).then_some(schema_type)
    }

    /// Look up a live type by name alone, any kind
    pub fn lookup_by_name(&self, name: &str) -> Option<&SchemaType> {
        self.graph
            .types
            .iter()
            .find(|t| !t.removed && t.name == name)
    }

    pub(crate) fn lookup_mut(&mut self, locator: &TypeLocator) -> Option<&mut SchemaType> {
        let idx = *self.type_by_kind_name.get(locator)?;
        let schema_type = &mut self.graph.types[idx];
        (!schema_type.removed).then_some(schema_type)
    }

    /// Look up a live field
    pub fn field(&self, owner: &TypeLocator, field: &str) -> Option<&Field> {
        self.lookup(owner)?
            .fields
            .iter()
            .find(|f| !f.removed && f.name == field)
    }

    pub(crate) fn field_mut(&mut self, owner: &TypeLocator, field: &str) -> Option<&mut Field> {
        self.lookup_mut(owner)?
            .fields
            .iter_mut()
            .find(|f| !f.removed && f.name == field)
    }

    /// Look up a live argument
    pub fn argument(&self, owner: &TypeLocator, field: &str, arg: &str) -> Option<&Argument> {
        self.field(owner, field)?
            .args
            .iter()
            .find(|a| !a.removed && a.name == arg)
    }

    /// Look up a live input field
    pub fn input_field(&self, owner: &TypeLocator, name: &str) -> Option<&Argument> {
        self.lookup(owner)?
            .input_fields
            .iter()
            .find(|a| !a.removed && a.name == name)
    }

    /// Paths of all fields whose return chain unwraps to `target`
    pub fn fields_returning(&self, target: &TypeLocator) -> &[FieldPath] {
        self.fields_returning
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Paths of all arguments whose type chain unwraps to `target`
    pub fn args_accepting(&self, target: &TypeLocator) -> &[ArgPath] {
        self.args_accepting
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Paths of all input fields whose type chain unwraps to `target`
    pub fn input_fields_accepting(&self, target: &TypeLocator) -> &[InputFieldPath] {
        self.input_fields_accepting
            .get(target)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Remove a type and, per `cascade`, everything that referenced it.
    ///
    /// Root Query/Mutation/Subscription types are structurally retained; a
    /// removal naming one is a no-op. Acting on an absent key is a no-op
    /// returning `false`.
    pub fn remove_type(
        &mut self,
        locator: &TypeLocator,
        cascade: CascadeFlags,
        defer_cleanup: bool,
    ) -> bool {
        if self.graph.is_root(locator.kind, &locator.name) {
            debug!(%locator, "refusing to remove root operation type");
            return false;
        }
        let Some(&idx) = self.type_by_kind_name.get(locator) else {
            return false;
        };
        if self.graph.types[idx].removed {
            return false;
        }
        self.graph.types[idx].removed = true;

        if cascade.fields {
            for path in self.fields_returning.get(locator).cloned().unwrap_or_default() {
                self.tombstone_field(&path.owner, &path.field);
            }
        }
        if cascade.args {
            for path in self.args_accepting.get(locator).cloned().unwrap_or_default() {
                self.tombstone_arg(&path.owner, &path.field, &path.arg);
            }
        }
        if cascade.input_fields {
            for path in self
                .input_fields_accepting
                .get(locator)
                .cloned()
                .unwrap_or_default()
            {
                self.tombstone_input_field(&path.owner, &path.input_field);
            }
        }
        if cascade.possible_types {
            for union in self.unions_containing.get(locator).cloned().unwrap_or_default() {
                self.drop_possible_type(&union, &locator.name);
            }
        }

        if !defer_cleanup {
            self.clean();
        }
        true
    }

    /// Remove one field
    pub fn remove_field(&mut self, owner: &TypeLocator, field: &str, defer_cleanup: bool) -> bool {
        let removed = self.tombstone_field(owner, field);
        if removed && !defer_cleanup {
            self.clean();
        }
        removed
    }

    /// Remove one argument
    pub fn remove_arg(
        &mut self,
        owner: &TypeLocator,
        field: &str,
        arg: &str,
        defer_cleanup: bool,
    ) -> bool {
        let removed = self.tombstone_arg(owner, field, arg);
        if removed && !defer_cleanup {
            self.clean();
        }
        removed
    }

    /// Remove one input field
    pub fn remove_input_field(&mut self, owner: &TypeLocator, name: &str, defer_cleanup: bool) -> bool {
        let removed = self.tombstone_input_field(owner, name);
        if removed && !defer_cleanup {
            self.clean();
        }
        removed
    }

    /// Remove one enum value
    pub fn remove_enum_value(&mut self, owner: &TypeLocator, name: &str, defer_cleanup: bool) -> bool {
        let removed = match self.lookup_mut(owner) {
            Some(schema_type) => match schema_type
                .enum_values
                .iter_mut()
                .find(|v| !v.removed && v.name == name)
            {
                Some(value) => {
                    value.removed = true;
                    true
                }
                None => false,
            },
            None => false,
        };
        if removed && !defer_cleanup {
            self.clean();
        }
        removed
    }

    /// Remove a single `possibleTypes` entry from one union
    pub fn remove_possible_type(
        &mut self,
        union: &TypeLocator,
        target_name: &str,
        defer_cleanup: bool,
    ) -> bool {
        let removed = self.drop_possible_type(union, target_name);
        if removed && !defer_cleanup {
            self.clean();
        }
        removed
    }

    /// Remove every union `possibleTypes` entry naming `target`
    pub fn remove_possible_types_of_type(&mut self, target: &TypeLocator, defer_cleanup: bool) -> bool {
        let mut removed = false;
        for union in self.unions_containing.get(target).cloned().unwrap_or_default() {
            removed |= self.drop_possible_type(&union, &target.name);
        }
        if removed && !defer_cleanup {
            self.clean();
        }
        removed
    }

    /// Compact tombstones out of every collection and rebuild all lookup maps
    pub fn clean(&mut self) {
        self.graph.types.retain(|t| !t.removed);
        for schema_type in &mut self.graph.types {
            schema_type.fields.retain(|f| !f.removed);
            for field in &mut schema_type.fields {
                field.args.retain(|a| !a.removed);
            }
            schema_type.input_fields.retain(|a| !a.removed);
            schema_type.enum_values.retain(|v| !v.removed);
        }
        self.rebuild();
    }

    fn tombstone_field(&mut self, owner: &TypeLocator, field: &str) -> bool {
        match self.field_mut(owner, field) {
            Some(field) => {
                field.removed = true;
                true
            }
            None => false,
        }
    }

    fn tombstone_arg(&mut self, owner: &TypeLocator, field: &str, arg: &str) -> bool {
        let Some(field) = self.field_mut(owner, field) else {
            return false;
        };
        match field.args.iter_mut().find(|a| !a.removed && a.name == arg) {
            Some(argument) => {
                argument.removed = true;
                true
            }
            None => false,
        }
    }

    fn tombstone_input_field(&mut self, owner: &TypeLocator, name: &str) -> bool {
        let Some(schema_type) = self.lookup_mut(owner) else {
            return false;
        };
        match schema_type
            .input_fields
            .iter_mut()
            .find(|a| !a.removed && a.name == name)
        {
            Some(input_field) => {
                input_field.removed = true;
                true
            }
            None => false,
        }
    }

    // possibleTypes entries are plain references with no tombstone slot;
    // they drop immediately. Nothing indexes into them by position.
    fn drop_possible_type(&mut self, union: &TypeLocator, target_name: &str) -> bool {
        let Some(schema_type) = self.lookup_mut(union) else {
            return false;
        };
        let before = schema_type.possible_types.len();
        schema_type
            .possible_types
            .retain(|pt| pt.name.as_deref() != Some(target_name));
        schema_type.possible_types.len() != before
    }

    fn rebuild(&mut self) {
        self.type_by_kind_name.clear();
        self.fields_returning.clear();
        self.args_accepting.clear();
        self.input_fields_accepting.clear();
        self.unions_containing.clear();

        for (idx, schema_type) in self.graph.types.iter().enumerate() {
            if !schema_type.removed {
                self.type_by_kind_name.insert(schema_type.locator(), idx);
            }
        }

        for schema_type in &self.graph.types {
            if schema_type.removed {
                continue;
            }
            let owner = schema_type.locator();
            for field in schema_type.fields.iter().filter(|f| !f.removed) {
                if let Some(shape) = analyze(&field.type_ref) {
                    self.fields_returning
                        .entry(TypeLocator::new(shape.base_kind, shape.base_name))
                        .or_default()
                        .push(FieldPath {
                            owner: owner.clone(),
                            field: field.name.clone(),
                        });
                }
                for arg in field.args.iter().filter(|a| !a.removed) {
                    if let Some(shape) = analyze(&arg.type_ref) {
                        self.args_accepting
                            .entry(TypeLocator::new(shape.base_kind, shape.base_name))
                            .or_default()
                            .push(ArgPath {
                                owner: owner.clone(),
                                field: field.name.clone(),
                                arg: arg.name.clone(),
                            });
                    }
                }
            }
            for input_field in schema_type.input_fields.iter().filter(|a| !a.removed) {
                if let Some(shape) = analyze(&input_field.type_ref) {
                    self.input_fields_accepting
                        .entry(TypeLocator::new(shape.base_kind, shape.base_name))
                        .or_default()
                        .push(InputFieldPath {
                            owner: owner.clone(),
                            input_field: input_field.name.clone(),
                        });
                }
            }
            if schema_type.kind == TypeKind::Union {
                for possible in &schema_type.possible_types {
                    if let Some(shape) = analyze(possible) {
                        self.unions_containing
                            .entry(TypeLocator::new(shape.base_kind, shape.base_name))
                            .or_default()
                            .push(owner.clone());
                    }
                }
            }
        }
    }
}
