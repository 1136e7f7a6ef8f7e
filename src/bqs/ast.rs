//! BQS parse tree.
//!
//! The grammar is handled leniently: a term the parser cannot make sense of
//! becomes [`Expr::Absent`] instead of failing the parse, and lowering
//! collapses those nodes away. Only outermost structural damage (unbalanced
//! parentheses, unterminated literals) is a hard error.

use chrono::{DateTime, Utc};

use crate::model::{DistanceUnit, Shape};

/// Dotted attribute path: `field`, `ENTITY.field`, or
/// `GRANDPARENT:ENTITY.field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrPath {
    pub grandparent: Option<String>,
    pub entity: Option<String>,
    pub field: String,
}

impl AttrPath {
    pub fn field_only(field: impl Into<String>) -> Self {
        Self { grandparent: None, entity: None, field: field.into() }
    }
}

/// Comparison operators as written in the grammar. `<>` survives to
/// lowering, where it becomes a negated equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AstOp {
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Like,
}

/// A parsed literal. Quoted strings that match the BQS date formats are
/// promoted to `Date` during parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum AstLiteral {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
}

/// Geospatial predicate attached to a path.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoPredicate {
    Intersect {
        shape: Shape,
    },
    Within {
        distance: f64,
        unit: DistanceUnit,
        shape: Shape,
    },
    Beyond {
        distance: f64,
        unit: DistanceUnit,
        shape: Shape,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Or(Vec<Expr>),
    And(Vec<Expr>),
    Not(Box<Expr>),
    Comparison {
        path: AttrPath,
        op: AstOp,
        literal: AstLiteral,
    },
    Geo {
        path: AttrPath,
        predicate: GeoPredicate,
    },
    /// A fragment that failed to parse and was dropped.
    Absent,
}
