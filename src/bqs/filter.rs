//! Lowered query representation handed to the search executor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Shape;

/// Catch-all text field matched when a query lowers to nothing.
pub const ANY_TEXT: &str = "anyText";
/// Field the implicit lifecycle baseline compares against.
pub const STATUS_FIELD: &str = "status";
pub const OBSOLETE: &str = "OBSOLETE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoolOp {
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpatialOp {
    Intersects,
    Within,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Text(String),
    Number(f64),
    DateTime(DateTime<Utc>),
}

impl Literal {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Lowered query tree. `<>` and `beyond` never appear directly; both lower
/// to a `Not` wrapper during compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterNode {
    Comparison {
        path: String,
        op: CompareOp,
        literal: Literal,
    },
    Boolean {
        op: BoolOp,
        children: Vec<FilterNode>,
    },
    Spatial {
        path: String,
        op: SpatialOp,
        shape: Shape,
        distance_m: Option<f64>,
    },
}

impl FilterNode {
    pub fn comparison(path: impl Into<String>, op: CompareOp, literal: Literal) -> Self {
        FilterNode::Comparison { path: path.into(), op, literal }
    }

    pub fn and(children: Vec<FilterNode>) -> Self {
        FilterNode::Boolean { op: BoolOp::And, children }
    }

    pub fn or(children: Vec<FilterNode>) -> Self {
        FilterNode::Boolean { op: BoolOp::Or, children }
    }

    pub fn not(child: FilterNode) -> Self {
        FilterNode::Boolean { op: BoolOp::Not, children: vec![child] }
    }

    /// The predicate a query collapses to when every term was dropped.
    pub fn catch_all() -> Self {
        FilterNode::comparison(ANY_TEXT, CompareOp::Like, Literal::Text("*".to_owned()))
    }

    /// The implicit baseline conjoined onto compiled queries.
    pub fn obsolete_baseline() -> Self {
        FilterNode::not(FilterNode::comparison(
            STATUS_FIELD,
            CompareOp::Eq,
            Literal::Text(OBSOLETE.to_owned()),
        ))
    }

    /// True when the tree already negates an OBSOLETE status comparison,
    /// which suppresses the implicit baseline.
    pub fn has_obsolete_guard(&self) -> bool {
        match self {
            FilterNode::Boolean { op: BoolOp::Not, children } => children.iter().any(|c| {
                matches!(
                    c,
                    FilterNode::Comparison { path, op: CompareOp::Eq | CompareOp::Like, literal }
                        if path == STATUS_FIELD && literal.as_text() == Some(OBSOLETE)
                )
            }),
            FilterNode::Boolean { children, .. } => {
                children.iter().any(FilterNode::has_obsolete_guard)
            }
            _ => false,
        }
    }
}
