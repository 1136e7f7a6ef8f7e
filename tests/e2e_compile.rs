//! End-to-end tests for the BQS compiler.
//!
//! Each test exercises the full pipeline: tokenize -> parse -> lower ->
//! baseline attachment, asserting on the compiled FilterNode tree.

use nsili_core::bqs::{compile, BoolOp, CompareOp, FilterNode, Literal, SpatialOp};
use pretty_assertions::assert_eq;

fn text(s: &str) -> Literal {
    Literal::Text(s.to_owned())
}

// ============================================================================
// 1. Plain boolean queries get the OBSOLETE baseline conjoined
// ============================================================================

#[test]
fn test_or_of_two_likes_gets_baseline() {
    let filter = compile(
        "(NSIL_FILE.title like 'Mission') or (NSIL_STREAM.standard like 'Mission')",
        true,
    )
    .unwrap();

    let expected = FilterNode::and(vec![
        FilterNode::or(vec![
            FilterNode::comparison("title", CompareOp::Like, text("Mission")),
            FilterNode::comparison("standard", CompareOp::Like, text("Mission")),
        ]),
        FilterNode::obsolete_baseline(),
    ]);
    assert_eq!(filter, expected);
}

// ============================================================================
// 2. A query that already guards against OBSOLETE keeps its own guard
// ============================================================================

#[test]
fn test_explicit_guard_suppresses_baseline() {
    let filter = compile(
        "NSIL_CARD.identifier like '%' and (not NSIL_PART:NSIL_CARD.status = 'OBSOLETE')",
        true,
    )
    .unwrap();

    let expected = FilterNode::and(vec![
        FilterNode::comparison("id", CompareOp::Like, text("*")),
        FilterNode::not(FilterNode::comparison("status", CompareOp::Eq, text("OBSOLETE"))),
    ]);
    assert_eq!(filter, expected);
}

#[test]
fn test_neq_guard_also_counts() {
    let filter = compile("NSIL_CARD.status <> 'OBSOLETE'", true).unwrap();
    assert_eq!(
        filter,
        FilterNode::not(FilterNode::comparison("status", CompareOp::Eq, text("OBSOLETE")))
    );
}

// ============================================================================
// 3. sourceLibrary terms depend on the library configuration
// ============================================================================

#[test]
fn test_source_library_included() {
    let filter = compile("NSIL_CARD.sourceLibrary like '%'", true).unwrap();
    let expected = FilterNode::and(vec![
        FilterNode::comparison("sourceId", CompareOp::Like, text("*")),
        FilterNode::obsolete_baseline(),
    ]);
    assert_eq!(filter, expected);
}

#[test]
fn test_source_library_excluded_collapses_to_catch_all() {
    let filter = compile("NSIL_CARD.sourceLibrary like '%'", false).unwrap();
    assert_eq!(filter, FilterNode::catch_all());
}

#[test]
fn test_excluded_term_drops_out_of_conjunction() {
    let filter = compile(
        "NSIL_CARD.sourceLibrary like 'lib%' and NSIL_FILE.title like 'x%'",
        false,
    )
    .unwrap();
    let expected = FilterNode::and(vec![
        FilterNode::comparison("title", CompareOp::Like, text("x*")),
        FilterNode::obsolete_baseline(),
    ]);
    assert_eq!(filter, expected);
}

// ============================================================================
// 4. Geospatial predicates
// ============================================================================

#[test]
fn test_polygon_intersect() {
    let filter = compile(
        "NSIL_COVERAGE.spatialGeographicReferenceBox intersect \
         POLYGON(10.0,20.0,10.0,25.0,5.0,25.0,5.0,20.0)",
        true,
    )
    .unwrap();

    let FilterNode::Boolean { op: BoolOp::And, children } = &filter else {
        panic!("expected baseline conjunction: {filter:?}")
    };
    let FilterNode::Spatial { path, op, shape, distance_m } = &children[0] else {
        panic!("expected spatial head: {:?}", children[0])
    };
    assert_eq!(path, "location");
    assert_eq!(*op, SpatialOp::Intersects);
    assert_eq!(shape.vertex_count(), 4);
    assert_eq!(*distance_m, None);
    assert_eq!(children[1], FilterNode::obsolete_baseline());
}

#[test]
fn test_within_distance_converts_to_meters() {
    let filter = compile(
        "NSIL_COVERAGE.spatialGeographicReferenceBox within 6000 meters of POINT(46.1,81.7)",
        true,
    )
    .unwrap();
    let FilterNode::Boolean { children, .. } = &filter else { panic!() };
    let FilterNode::Spatial { op, distance_m, .. } = &children[0] else { panic!() };
    assert_eq!(*op, SpatialOp::Within);
    assert_eq!(*distance_m, Some(6000.0));
}

#[test]
fn test_beyond_is_negated_within() {
    let filter = compile(
        "NSIL_COVERAGE.spatialGeographicReferenceBox beyond 6 statute miles of \
         POINT(46.1,81.7)",
        true,
    )
    .unwrap();
    let FilterNode::Boolean { op: BoolOp::And, children } = &filter else { panic!() };
    let FilterNode::Boolean { op: BoolOp::Not, children: inner } = &children[0] else {
        panic!("expected negated within: {:?}", children[0])
    };
    let FilterNode::Spatial { op, distance_m, .. } = &inner[0] else { panic!() };
    assert_eq!(*op, SpatialOp::Within);
    assert_eq!(*distance_m, Some(6.0 * 1609.344));
}

#[test]
fn test_circle_radius_in_meters() {
    let filter = compile(
        "NSIL_COVERAGE.spatialGeographicReferenceBox intersect CIRCLE(35.2,54.1,25.6 meters)",
        true,
    )
    .unwrap();
    let FilterNode::Boolean { children, .. } = &filter else { panic!() };
    let FilterNode::Spatial { shape: nsili_core::Shape::Circle { radius_m, .. }, .. } =
        &children[0]
    else {
        panic!("expected circle: {:?}", children[0])
    };
    assert_eq!(*radius_m, 25.6);
}

// ============================================================================
// 5. Lenient handling of damaged input
// ============================================================================

#[test]
fn test_garbage_query_compiles_to_bare_catch_all() {
    let filter = compile("purple monkey dishwasher", true).unwrap();
    assert_eq!(filter, FilterNode::catch_all());
}

#[test]
fn test_empty_query_compiles_to_bare_catch_all() {
    assert_eq!(compile("", true).unwrap(), FilterNode::catch_all());
}

#[test]
fn test_surviving_terms_keep_the_baseline() {
    // The damaged spatial term drops; the title comparison survives.
    let filter = compile(
        "NSIL_FILE.title like 'x%' and \
         NSIL_COVERAGE.spatialGeographicReferenceBox intersect POLYGON(1.0)",
        true,
    )
    .unwrap();
    let expected = FilterNode::and(vec![
        FilterNode::comparison("title", CompareOp::Like, text("x*")),
        FilterNode::obsolete_baseline(),
    ]);
    assert_eq!(filter, expected);
}

#[test]
fn test_unbalanced_parens_are_a_hard_error() {
    assert!(compile("(NSIL_FILE.title like 'x%'", true).is_err());
}

#[test]
fn test_unterminated_string_is_a_hard_error() {
    assert!(compile("NSIL_FILE.title like 'x", true).is_err());
}

// ============================================================================
// 6. Literal handling
// ============================================================================

#[test]
fn test_date_literal_ordering() {
    let filter = compile("NSIL_CARD.dateTimeModified >= '2016/06/01 13:45:59.000'", true)
        .unwrap();
    let FilterNode::Boolean { children, .. } = &filter else { panic!() };
    let FilterNode::Comparison { op, literal: Literal::DateTime(_), .. } = &children[0] else {
        panic!("expected date comparison: {:?}", children[0])
    };
    assert_eq!(*op, CompareOp::GtEq);
}

#[test]
fn test_like_with_number_is_rejected() {
    assert!(compile("NSIL_FILE.title like 42", true).is_err());
}

// ============================================================================
// 7. Wire format
// ============================================================================

#[test]
fn test_filter_tree_round_trips_through_json() {
    let filter = compile(
        "NSIL_FILE.title like 'x%' and \
         NSIL_COVERAGE.spatialGeographicReferenceBox within 500 meters of POINT(46.1,81.7)",
        true,
    )
    .unwrap();
    let json = serde_json::to_string(&filter).unwrap();
    let back: FilterNode = serde_json::from_str(&json).unwrap();
    assert_eq!(back, filter);
}

#[test]
fn test_identifier_uuid_rewrites_anywhere() {
    let filter = compile("identifierUUID = 'abc-123'", true).unwrap();
    let FilterNode::Boolean { children, .. } = &filter else { panic!() };
    let FilterNode::Comparison { path, .. } = &children[0] else { panic!() };
    assert_eq!(path, "id");
}
