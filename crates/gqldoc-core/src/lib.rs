//! Gqldoc Core - Schema manipulation and example generation for GraphQL
//! reference documentation
//!
//! This crate holds a mutable, referentially-consistent in-memory graph
//! built from a GraphQL introspection document, prunes it according to
//! per-element documentation directives, and synthesizes representative
//! request/response examples for every surviving operation and type,
//! including termination-safe handling of cyclic type graphs.
//!
//! # Main Components
//!
//! - **Type-Wrapper Analyzer**: unwraps NON_NULL/LIST chains to a base
//!   type plus arity flags
//! - **Schema Index**: lookup maps and cascading, integrity-preserving
//!   removal operations over the graph
//! - **Documentation Filter**: configurable per-category visibility
//!   defaults plus per-element metadata overrides, driving the Index
//! - **Example/Query Generator**: recursive query text and response
//!   synthesis with cycle detection and a pluggable example hook
//!
//! # Example
//!
//! ```no_run
//! use gqldoc_core::{
//!     filter_schema, ExampleGenerator, FilterOptions, GeneratorConfig, Result, SchemaIndex,
//! };
//!
//! fn build(introspection: &serde_json::Value) -> Result<()> {
//!     let mut index = SchemaIndex::from_introspection(introspection)?;
//!     filter_schema(&mut index, &FilterOptions::default());
//!     ExampleGenerator::new(GeneratorConfig::default()).generate_all(&mut index);
//!     let _graph = index.into_graph(); // hand off to the rendering layer
//!     Ok(())
//! }
//! ```
//!
//! One build exclusively owns one `SchemaIndex`; filtering completes fully
//! before generation begins, and the graph is read-only thereafter.

pub mod error;
pub mod filter;
pub mod generator;
pub mod index;
pub mod types;
pub mod wrapper;

pub use error::{Error, Result};
pub use filter::{filter_schema, FilterOptions};
pub use generator::{
    resolve_processor, scalar_example, ExampleContext, ExampleGenerator, ExampleProcessor,
    GeneratorConfig, ProcessorFactory, ProcessorResolution,
};
pub use index::{ArgPath, CascadeFlags, FieldPath, InputFieldPath, SchemaIndex};
pub use types::{
    Argument, DocMetadata, EnumValue, Field, OperationExample, RefKind, RootOperation,
    SchemaGraph, SchemaType, TypeKind, TypeLocator, TypeRef,
};
pub use wrapper::{analyze, render_sdl, TypeShape};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
