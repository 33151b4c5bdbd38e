//! Schema Graph data model
//!
//! Everything the engine manipulates is a node of one shared, mutable
//! graph built from a GraphQL introspection document: named types, the
//! fields/input-fields/enum-values they own, and the possibly-wrapped
//! `TypeRef`s through which they name each other. References are weak
//! (a `TypeLocator` key resolved through the `SchemaIndex`), which keeps
//! self- and mutually-referential schemas representable without any
//! cycle special-casing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Kind of a named type in the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
        };
        write!(f, "{}", s)
    }
}

/// Kind tag on a `TypeRef` node: the named kinds plus the two wrappers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    NonNull,
    List,
}

impl RefKind {
    /// The named-type kind this tag corresponds to, if it is not a wrapper
    pub fn as_type_kind(self) -> Option<TypeKind> {
        match self {
            RefKind::Scalar => Some(TypeKind::Scalar),
            RefKind::Object => Some(TypeKind::Object),
            RefKind::Interface => Some(TypeKind::Interface),
            RefKind::Union => Some(TypeKind::Union),
            RefKind::Enum => Some(TypeKind::Enum),
            RefKind::InputObject => Some(TypeKind::InputObject),
            RefKind::NonNull | RefKind::List => None,
        }
    }
}

/// A chain of zero or more NON_NULL/LIST wrappers terminating in a named
/// type reference. Never owns the type it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: RefKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// A bare reference to a named type
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        let ref_kind = match kind {
            TypeKind::Scalar => RefKind::Scalar,
            TypeKind::Object => RefKind::Object,
            TypeKind::Interface => RefKind::Interface,
            TypeKind::Union => RefKind::Union,
            TypeKind::Enum => RefKind::Enum,
            TypeKind::InputObject => RefKind::InputObject,
        };
        TypeRef {
            kind: ref_kind,
            name: Some(name.into()),
            of_type: None,
        }
    }

    /// Wrap a reference in NON_NULL
    pub fn non_null(inner: TypeRef) -> Self {
        TypeRef {
            kind: RefKind::NonNull,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }

    /// Wrap a reference in LIST
    pub fn list(inner: TypeRef) -> Self {
        TypeRef {
            kind: RefKind::List,
            name: None,
            of_type: Some(Box::new(inner)),
        }
    }
}

/// Stable `(kind, name)` identity of a named type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeLocator {
    pub kind: TypeKind,
    pub name: String,
}

impl TypeLocator {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        TypeLocator {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

/// An argument on a field, or an input field on an INPUT_OBJECT type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
    #[serde(skip)]
    pub removed: bool,
}

/// A field owned by an OBJECT or INTERFACE type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<Argument>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_example: Option<OperationExample>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
    #[serde(skip)]
    pub removed: bool,
}

/// A value owned by an ENUM type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
    #[serde(skip)]
    pub removed: bool,
}

/// A named type in the Schema Graph
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaType {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<Field>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub input_fields: Vec<Argument>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enum_values: Vec<EnumValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub possible_types: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
    #[serde(skip)]
    pub removed: bool,
}

impl SchemaType {
    pub fn locator(&self) -> TypeLocator {
        TypeLocator::new(self.kind, self.name.clone())
    }
}

/// Introspection emits explicit `null` for collections a kind does not
/// carry; treat it the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Per-element documentation metadata, consumed and stripped by the Filter
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocMetadata {
    pub documented: Option<bool>,
    pub undocumented: Option<bool>,
    pub example: Option<Value>,
    pub examples: Option<Vec<Value>>,
}

impl DocMetadata {
    /// Pull the metadata object out of an element's extensions, removing it.
    /// A malformed value is treated as absent.
    pub fn take_from(extensions: &mut Map<String, Value>, key: &str) -> Option<DocMetadata> {
        let raw = extensions.remove(key)?;
        serde_json::from_value(raw).ok()
    }

    /// The example this metadata supplies, `example` winning over the first
    /// entry of `examples`
    pub fn chosen_example(&self) -> Option<Value> {
        self.example
            .clone()
            .or_else(|| self.examples.as_ref().and_then(|e| e.first().cloned()))
    }
}

/// A synthesized request/response example for one root operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationExample {
    pub query: String,
    pub variables: Option<Map<String, Value>>,
    pub response: Value,
}

/// Which root operation a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootOperation {
    Query,
    Mutation,
    Subscription,
}

impl RootOperation {
    /// The keyword opening a generated operation document
    pub fn keyword(self) -> &'static str {
        match self {
            RootOperation::Query => "query",
            RootOperation::Mutation => "mutation",
            RootOperation::Subscription => "subscription",
        }
    }
}

/// The in-memory Schema Graph built from one introspection document
#[derive(Debug, Clone)]
pub struct SchemaGraph {
    pub types: Vec<SchemaType>,
    pub query_root: String,
    pub mutation_root: Option<String>,
    pub subscription_root: Option<String>,
}

impl SchemaGraph {
    /// Build the graph from an introspection document.
    ///
    /// Structural checks run before any deserialization: a document without
    /// `__schema`, without a `types` array, or without a query root name is
    /// rejected outright. Introspection meta types (`__Schema`, `__Type`,
    /// ...) are not part of the documented graph and are dropped here.
    pub fn from_introspection(document: &Value) -> Result<Self> {
        let schema = document.get("__schema").ok_or(Error::MissingSchema)?;
        let types_value = schema
            .get("types")
            .filter(|t| t.is_array())
            .ok_or(Error::MissingTypes)?;
        let query_root = root_name(schema, "queryType").ok_or(Error::MissingQueryRoot)?;
        let mutation_root = root_name(schema, "mutationType");
        let subscription_root = root_name(schema, "subscriptionType");

        let mut types: Vec<SchemaType> = serde_json::from_value(types_value.clone())?;
        types.retain(|t| !t.name.starts_with("__"));

        let graph = SchemaGraph {
            types,
            query_root,
            mutation_root,
            subscription_root,
        };
        for root in graph.root_names() {
            if !graph
                .types
                .iter()
                .any(|t| t.kind == TypeKind::Object && t.name == root)
            {
                return Err(Error::MissingRootType { name: root });
            }
        }
        Ok(graph)
    }

    fn root_names(&self) -> Vec<String> {
        let mut names = vec![self.query_root.clone()];
        names.extend(self.mutation_root.clone());
        names.extend(self.subscription_root.clone());
        names
    }

    /// Whether `(kind, name)` is one of the conventional root types
    pub fn is_root(&self, kind: TypeKind, name: &str) -> bool {
        self.root_operation(kind, name).is_some()
    }

    /// The root operation a type serves, if any
    pub fn root_operation(&self, kind: TypeKind, name: &str) -> Option<RootOperation> {
        if kind != TypeKind::Object {
            return None;
        }
        if name == self.query_root {
            Some(RootOperation::Query)
        } else if self.mutation_root.as_deref() == Some(name) {
            Some(RootOperation::Mutation)
        } else if self.subscription_root.as_deref() == Some(name) {
            Some(RootOperation::Subscription)
        } else {
            None
        }
    }
}

fn root_name(schema: &Value, key: &str) -> Option<String> {
    schema
        .get(key)
        .and_then(|t| t.get("name"))
        .and_then(|n| n.as_str())
        .map(String::from)
}
