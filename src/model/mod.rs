//! Core data model: values, shapes, records, and the record graph.
//!
//! These are the DTOs that cross all boundaries. Pure data, no schema or
//! parser references.

pub mod value;
pub mod geometry;
pub mod record;
pub mod graph;

pub use value::Value;
pub use geometry::{Coord, DistanceUnit, Shape};
pub use record::Record;
pub use graph::{GraphBuilder, GraphEdge, GraphNode, NodeId, NodeKind, RecordGraph, SlotId};
