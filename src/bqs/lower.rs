//! Lowering from the parse tree to the executable filter.
//!
//! This is where the external attribute vocabulary is rewritten onto the
//! flat record fields, `<>` and `beyond` become negations, and dropped
//! fragments collapse out of the boolean structure.

use tracing::debug;

use crate::bqs::ast::{AstLiteral, AstOp, AttrPath, Expr, GeoPredicate};
use crate::bqs::filter::{BoolOp, CompareOp, FilterNode, Literal, SpatialOp};
use crate::schema::entities::{
    IDENTIFIER, IDENTIFIER_UUID, NSIL_CARD, SOURCE_LIBRARY, SPATIAL_GEOGRAPHIC_REF_BOX,
};
use crate::{Error, Result};

const FIELD_ID: &str = "id";
const FIELD_SOURCE_ID: &str = "sourceId";
const FIELD_LOCATION: &str = "location";

/// Lower a parse tree. `Ok(None)` means the whole tree collapsed away and
/// the caller should substitute its catch-all.
pub fn lower(expr: Expr, include_source_as_field: bool) -> Result<Option<FilterNode>> {
    match expr {
        Expr::Or(children) => lower_boolean(BoolOp::Or, children, include_source_as_field),
        Expr::And(children) => lower_boolean(BoolOp::And, children, include_source_as_field),
        Expr::Not(inner) => match lower(*inner, include_source_as_field)? {
            Some(node) => Ok(Some(FilterNode::not(node))),
            None => Ok(None),
        },
        Expr::Comparison { path, op, literal } => lower_comparison(path, op, literal, include_source_as_field),
        Expr::Geo { path, predicate } => lower_geo(path, predicate),
        Expr::Absent => Ok(None),
    }
}

fn lower_boolean(
    op: BoolOp,
    children: Vec<Expr>,
    include_source_as_field: bool,
) -> Result<Option<FilterNode>> {
    let mut lowered = Vec::with_capacity(children.len());
    for child in children {
        if let Some(node) = lower(child, include_source_as_field)? {
            lowered.push(node);
        }
    }
    match lowered.len() {
        0 => Ok(None),
        1 => Ok(lowered.pop()),
        _ => Ok(Some(FilterNode::Boolean { op, children: lowered })),
    }
}

fn lower_comparison(
    path: AttrPath,
    op: AstOp,
    literal: AstLiteral,
    include_source_as_field: bool,
) -> Result<Option<FilterNode>> {
    let Some(field) = rewrite_path(&path, include_source_as_field) else {
        debug!(field = %path.field, "dropping comparison on excluded field");
        return Ok(None);
    };
    let literal = lower_literal(op, literal)?;
    let node = match op {
        AstOp::Eq => FilterNode::comparison(field, CompareOp::Eq, literal),
        AstOp::Neq => FilterNode::not(FilterNode::comparison(field, CompareOp::Eq, literal)),
        AstOp::Lt => FilterNode::comparison(field, CompareOp::Lt, literal),
        AstOp::LtEq => FilterNode::comparison(field, CompareOp::LtEq, literal),
        AstOp::Gt => FilterNode::comparison(field, CompareOp::Gt, literal),
        AstOp::GtEq => FilterNode::comparison(field, CompareOp::GtEq, literal),
        AstOp::Like => FilterNode::comparison(field, CompareOp::Like, literal),
    };
    Ok(Some(node))
}

fn lower_geo(path: AttrPath, predicate: GeoPredicate) -> Result<Option<FilterNode>> {
    let Some(field) = rewrite_path(&path, true) else {
        return Ok(None);
    };
    let node = match predicate {
        GeoPredicate::Intersect { shape } => FilterNode::Spatial {
            path: field,
            op: SpatialOp::Intersects,
            shape,
            distance_m: None,
        },
        GeoPredicate::Within { distance, unit, shape } => FilterNode::Spatial {
            path: field,
            op: SpatialOp::Within,
            shape,
            distance_m: Some(unit.to_meters(distance)),
        },
        GeoPredicate::Beyond { distance, unit, shape } => FilterNode::not(FilterNode::Spatial {
            path: field,
            op: SpatialOp::Within,
            shape,
            distance_m: Some(unit.to_meters(distance)),
        }),
    };
    Ok(Some(node))
}

/// Map an external attribute path onto a flat record field. `None` means
/// the field is excluded from search and the term should be dropped.
fn rewrite_path(path: &AttrPath, include_source_as_field: bool) -> Option<String> {
    if path.field == IDENTIFIER_UUID {
        return Some(FIELD_ID.to_string());
    }
    if path.field == IDENTIFIER && path.entity.as_deref() == Some(NSIL_CARD) {
        return Some(FIELD_ID.to_string());
    }
    if path.field == SOURCE_LIBRARY {
        return include_source_as_field.then(|| FIELD_SOURCE_ID.to_string());
    }
    if path.field == SPATIAL_GEOGRAPHIC_REF_BOX {
        return Some(FIELD_LOCATION.to_string());
    }
    Some(path.field.clone())
}

fn lower_literal(op: AstOp, literal: AstLiteral) -> Result<Literal> {
    match (op, literal) {
        (AstOp::Like, AstLiteral::Text(text)) => Ok(Literal::Text(normalize_search_string(&text))),
        (AstOp::Like, other) => Err(Error::UnsupportedLiteral {
            op: "like".to_string(),
            literal: literal_name(&other).to_string(),
        }),
        (AstOp::Lt | AstOp::LtEq | AstOp::Gt | AstOp::GtEq, AstLiteral::Text(text)) => {
            Err(Error::UnsupportedLiteral {
                op: "ordering".to_string(),
                literal: format!("text '{text}'"),
            })
        }
        (_, AstLiteral::Text(text)) => Ok(Literal::Text(normalize_search_string(&text))),
        (_, AstLiteral::Number(n)) => Ok(Literal::Number(n)),
        (_, AstLiteral::Date(dt)) => Ok(Literal::DateTime(dt)),
    }
}

fn literal_name(literal: &AstLiteral) -> &'static str {
    match literal {
        AstLiteral::Text(_) => "text",
        AstLiteral::Number(_) => "number",
        AstLiteral::Date(_) => "date",
    }
}

/// `%` wildcards become `*`; stray quote characters are stripped.
pub fn normalize_search_string(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\'' && *c != '"')
        .map(|c| if c == '%' { '*' } else { c })
        .collect()
}
