//! # nsili-core — STANAG 4559 / NSILI library core
//!
//! The query/data-model engine behind an NSILI ("library") catalog endpoint:
//!
//! 1. **Schema model** (`schema`): the fixed NSILI entity-relationship graph,
//!    grouped into named views, with per-view mandatory-attribute and
//!    legacy-alias bookkeeping.
//! 2. **BQS compiler** (`bqs`): the Boolean Query Syntax grammar — comparisons,
//!    boolean combinators, and geospatial predicates over shape literals —
//!    compiled into a generic [`FilterNode`] tree.
//! 3. **Record graph marshaller** (`dag`): renders a flat catalog [`Record`]
//!    into the entity/attribute graph a view requires, and projects an
//!    inbound graph back to a flat attribute map.
//!
//! ## Design Principles
//!
//! 1. **Schema is data**: one entity/relationship pool, per-view inclusion
//!    tables, built once and shared immutably
//! 2. **Parser owns nothing**: BQS → `FilterNode` is a pure function
//! 3. **Clean DTOs**: `Record`, `Value`, `RecordGraph` cross all boundaries
//! 4. **Lenient input, strict output**: unparseable query fragments are
//!    dropped; outgoing records missing mandatory attributes are rejected
//!
//! ## Quick Start
//!
//! ```rust
//! use nsili_core::{bqs, dag, schema::DataModel, Record};
//!
//! # fn example() -> nsili_core::Result<()> {
//! let model = DataModel::new();
//!
//! // Compile a BQS query into a filter tree for the search executor.
//! let filter = bqs::compile("NSIL_COMMON.identifierUUID like 'Test'", true)?;
//!
//! // Render a matching record into the NSIL_ALL_VIEW graph shape.
//! let record = Record::new("a-record-id");
//! let mandatory = model.mandatory_fields("NSIL_ALL_VIEW");
//! let graph = dag::to_graph(&record, &model, "NSIL_ALL_VIEW", &[], mandatory);
//! # let _ = (filter, graph);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod schema;
pub mod bqs;
pub mod dag;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Value, Record, Coord, Shape, DistanceUnit,
    RecordGraph, GraphNode, GraphEdge, NodeId, NodeKind,
};

// ============================================================================
// Re-exports: Filter tree
// ============================================================================

pub use bqs::{FilterNode, CompareOp, BoolOp, SpatialOp, Literal};

// ============================================================================
// Re-exports: Schema
// ============================================================================

pub use schema::{
    DataModel, AttributeInformation, AttrType, Domain, RequirementMode,
    Association, Cardinality, ConceptualAttribute, ViewGraph,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The outermost query structure could not be tokenized or parsed.
    /// Inner malformed fragments degrade gracefully and never raise this.
    #[error("BQS syntax error at position {position}: {message}")]
    SyntaxError { position: usize, message: String },

    /// A literal the comparison operator cannot accept, e.g. `like 42`.
    #[error("operator {op} cannot accept literal {literal}")]
    UnsupportedLiteral { op: String, literal: String },

    #[error("view not found: {0}")]
    ViewNotFound(String),

    /// An outgoing record could not be rendered into the view's required
    /// shape. Fails only the affected record, never the whole batch.
    #[error("missing mandatory attribute {entity}.{field}")]
    MandatoryAttributeMissing { entity: String, field: String },
}

pub type Result<T> = std::result::Result<T, Error>;
