//! End-to-end tests for record graph marshalling.
//!
//! Each test drives a flat record through to_graph against the real
//! DataModel and inspects the resulting graph, or flattens it back with
//! from_graph.

use chrono::{TimeZone, Utc};
use hashbrown::HashMap;
use nsili_core::dag::{from_graph, to_graph};
use nsili_core::schema::DataModel;
use nsili_core::{Coord, Error, NodeKind, Record, Shape, Value};
use pretty_assertions::assert_eq;

const ALL_VIEW: &str = "NSIL_ALL_VIEW";
const ASSOCIATION_VIEW: &str = "NSIL_ASSOCIATION_VIEW";

fn sample_record() -> Record {
    Record::new("rec-42")
        .with_source_id("coalition-lib")
        .with_created(Utc.with_ymd_and_hms(2020, 3, 1, 8, 0, 0).unwrap())
        .with_modified(Utc.with_ymd_and_hms(2020, 3, 1, 8, 0, 0).unwrap())
        .with_attr("NSIL_COMMON.identifierUUID", "rec-42")
        .with_attr("NSIL_COMMON.type", "IMAGERY")
        .with_attr("NSIL_FILE.title", "Harbour overview")
        .with_attr("NSIL_IMAGERY.category", "VIS")
        .with_attr("NSIL_SECURITY.classification", "UNCLASSIFIED")
}

fn no_mandatory() -> HashMap<String, Vec<String>> {
    HashMap::new()
}

// ============================================================================
// 1. Graph shape
// ============================================================================

#[test]
fn test_root_is_product_in_the_all_view() {
    let model = DataModel::new();
    let graph = to_graph(&sample_record(), &model, ALL_VIEW, &[], &no_mandatory()).unwrap();
    let root = graph.node(graph.root()).unwrap();
    assert_eq!(root.kind, NodeKind::Root);
    assert_eq!(root.name, "NSIL_PRODUCT");
}

#[test]
fn test_entities_sit_under_their_schema_parents() {
    let model = DataModel::new();
    let graph = to_graph(&sample_record(), &model, ALL_VIEW, &[], &no_mandatory()).unwrap();

    // NSIL_IMAGERY hangs off NSIL_PART, not the root.
    assert!(graph.entities_named(graph.root(), "NSIL_IMAGERY").next().is_none());
    let part = graph.entities_named(graph.root(), "NSIL_PART").next().unwrap();
    let imagery = graph.entities_named(part, "NSIL_IMAGERY").next().unwrap();
    assert_eq!(graph.attribute(imagery, "category"), Some(&Value::Text("VIS".into())));
}

#[test]
fn test_attribute_free_entities_are_absent() {
    let model = DataModel::new();
    let graph = to_graph(&sample_record(), &model, ALL_VIEW, &[], &no_mandatory()).unwrap();
    for name in ["NSIL_GMTI", "NSIL_VIDEO", "NSIL_CBRN"] {
        assert!(
            !graph.nodes().any(|n| n.name == name),
            "{name} emitted without attributes"
        );
    }
}

#[test]
fn test_view_membership_filters_entities() {
    let model = DataModel::new();
    let graph =
        to_graph(&sample_record(), &model, "NSIL_GMTI_VIEW", &[], &no_mandatory()).unwrap();
    // The GMTI view has no NSIL_IMAGERY node, so the imagery attribute
    // has nowhere to land.
    assert!(!graph.nodes().any(|n| n.name == "NSIL_IMAGERY"));
    assert!(graph.nodes().any(|n| n.name == "NSIL_FILE"));
}

// ============================================================================
// 2. Card bookkeeping
// ============================================================================

#[test]
fn test_card_fields_come_from_the_envelope() {
    let model = DataModel::new();
    let graph = to_graph(&sample_record(), &model, ALL_VIEW, &[], &no_mandatory()).unwrap();
    let card = graph.entities_named(graph.root(), "NSIL_CARD").next().unwrap();
    assert_eq!(graph.attribute(card, "identifier"), Some(&Value::Text("rec-42".into())));
    assert_eq!(
        graph.attribute(card, "sourceLibrary"),
        Some(&Value::Text("coalition-lib".into()))
    );
    assert!(graph.attribute(card, "sourceDateTimeModified").is_some());
    assert!(graph.attribute(card, "dateTimeModified").is_some());
}

#[test]
fn test_missing_source_renders_unknown() {
    let model = DataModel::new();
    let record = Record::new("rec-anon").with_attr("NSIL_COMMON.type", "DOCUMENT");
    let graph = to_graph(&record, &model, ALL_VIEW, &[], &no_mandatory()).unwrap();
    let card = graph.entities_named(graph.root(), "NSIL_CARD").next().unwrap();
    assert_eq!(graph.attribute(card, "sourceLibrary"), Some(&Value::Text("Unknown".into())));
}

#[test]
fn test_status_lifecycle() {
    let model = DataModel::new();
    let status_of = |record: &Record| {
        let graph = to_graph(record, &model, ALL_VIEW, &[], &no_mandatory()).unwrap();
        let card = graph.entities_named(graph.root(), "NSIL_CARD").next().unwrap();
        graph.attribute(card, "status").cloned().unwrap()
    };

    assert_eq!(status_of(&sample_record()), Value::Text("NEW".into()));
    assert_eq!(
        status_of(
            &sample_record()
                .with_modified(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap())
        ),
        Value::Text("CHANGED".into())
    );
    assert_eq!(status_of(&sample_record().with_deleted(true)), Value::Text("OBSOLETE".into()));
    // Without a timestamp pair the record cannot be proven unchanged.
    assert_eq!(
        status_of(&Record::new("rec-bare").with_attr("NSIL_COMMON.type", "DOCUMENT")),
        Value::Text("CHANGED".into())
    );
}

// ============================================================================
// 3. Mandatory enforcement
// ============================================================================

#[test]
fn test_mandatory_failure_names_entity_and_field() {
    let model = DataModel::new();
    let mut mandatory = HashMap::new();
    mandatory.insert("NSIL_CARD".to_owned(), vec!["publisher".to_owned()]);
    let err = to_graph(&sample_record(), &model, ALL_VIEW, &[], &mandatory).unwrap_err();
    let Error::MandatoryAttributeMissing { entity, field } = err else {
        panic!("unexpected error: {err}")
    };
    assert_eq!(entity, "NSIL_CARD");
    assert_eq!(field, "publisher");
}

#[test]
fn test_mandatory_enforced_per_view_membership() {
    let model = DataModel::new();
    let mut mandatory = HashMap::new();
    mandatory.insert("NSIL_COMMON".to_owned(), vec!["identifierUUID".to_owned()]);

    // Missing identifierUUID: fails in the all view, passes in the
    // association view, which has no NSIL_COMMON node.
    let record = Record::new("rec-1")
        .with_created(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        .with_modified(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        .with_attr("NSIL_COMMON.type", "DOCUMENT");
    assert!(to_graph(&record, &model, ALL_VIEW, &[], &mandatory).is_err());
    assert!(to_graph(&record, &model, ASSOCIATION_VIEW, &[], &mandatory).is_ok());
}

#[test]
fn test_per_view_mandatory_map_accepts_complete_record() {
    let model = DataModel::new();
    let mut mandatory = HashMap::new();
    mandatory.insert(
        "NSIL_CARD".to_owned(),
        vec!["identifier".to_owned(), "dateTimeModified".to_owned(), "status".to_owned()],
    );
    mandatory.insert("NSIL_COMMON".to_owned(), vec!["identifierUUID".to_owned()]);
    assert!(to_graph(&sample_record(), &model, ALL_VIEW, &[], &mandatory).is_ok());
}

#[test]
fn test_precomputed_view_map_judges_only_populated_entities() {
    let model = DataModel::new();
    let mandatory = model.mandatory_fields(ALL_VIEW);

    // An imagery product supplying every mandatory field of the entities it
    // populates. The all-view map also lists GMTI, message, video and TDL
    // fields; none of those entities appear here and none may be demanded.
    let record = Record::new("rec-img-7")
        .with_source_id("coalition-lib")
        .with_created(Utc.with_ymd_and_hms(2020, 3, 1, 8, 0, 0).unwrap())
        .with_modified(Utc.with_ymd_and_hms(2020, 3, 1, 8, 0, 0).unwrap())
        .with_attr("NSIL_COMMON.identifierUUID", "rec-img-7")
        .with_attr("NSIL_COMMON.type", "IMAGERY")
        .with_attr("NSIL_PART.partIdentifier", "1")
        .with_attr("NSIL_SECURITY.classification", "UNCLASSIFIED")
        .with_attr("NSIL_SECURITY.policy", "NATO")
        .with_attr("NSIL_SECURITY.releasability", "NATO")
        .with_attr("NSIL_METADATASECURITY.classification", "UNCLASSIFIED")
        .with_attr("NSIL_METADATASECURITY.policy", "NATO")
        .with_attr("NSIL_METADATASECURITY.releasability", "NATO")
        .with_attr("NSIL_IMAGERY.category", "VIS")
        .with_attr("NSIL_IMAGERY.decompressionTechnique", "NC")
        .with_attr("NSIL_IMAGERY.identifier", "img-7")
        .with_attr("NSIL_IMAGERY.numberOfBands", 1_i64);
    assert!(to_graph(&record, &model, ALL_VIEW, &[], mandatory).is_ok());

    // A populated entity is still held to its own list.
    let incomplete = Record::new("rec-img-8")
        .with_created(Utc.with_ymd_and_hms(2020, 3, 1, 8, 0, 0).unwrap())
        .with_modified(Utc.with_ymd_and_hms(2020, 3, 1, 8, 0, 0).unwrap())
        .with_attr("NSIL_COMMON.identifierUUID", "rec-img-8")
        .with_attr("NSIL_COMMON.type", "IMAGERY")
        .with_attr("NSIL_IMAGERY.category", "VIS");
    let err = to_graph(&incomplete, &model, ALL_VIEW, &[], mandatory).unwrap_err();
    let Error::MandatoryAttributeMissing { entity, .. } = err else {
        panic!("unexpected error: {err}")
    };
    assert_eq!(entity, "NSIL_IMAGERY");
}

// ============================================================================
// 4. Requested paths
// ============================================================================

#[test]
fn test_requested_paths_limit_the_graph() {
    let model = DataModel::new();
    let requested =
        vec!["NSIL_PRODUCT:NSIL_CARD.identifier".to_owned(), "NSIL_FILE.title".to_owned()];
    let graph =
        to_graph(&sample_record(), &model, ALL_VIEW, &requested, &no_mandatory()).unwrap();

    let card = graph.entities_named(graph.root(), "NSIL_CARD").next().unwrap();
    assert!(graph.attribute(card, "identifier").is_some());
    assert!(graph.attribute(card, "status").is_none());

    // NSIL_FILE sits directly under the root; with nothing requested below
    // NSIL_PART the whole part subtree is pruned.
    let file = graph.entities_named(graph.root(), "NSIL_FILE").next().unwrap();
    assert!(graph.attribute(file, "title").is_some());
    assert!(graph.entities_named(graph.root(), "NSIL_PART").next().is_none());
}

// ============================================================================
// 5. Geometry
// ============================================================================

#[test]
fn test_polygon_coverage_emits_box_and_raw_shape() {
    let model = DataModel::new();
    let polygon = Shape::Polygon(
        [
            Coord::new(10.0, 20.0),
            Coord::new(10.0, 25.0),
            Coord::new(5.0, 25.0),
            Coord::new(5.0, 20.0),
        ]
        .into_iter()
        .collect(),
    );
    let record = sample_record()
        .with_attr("NSIL_COVERAGE.spatialGeographicReferenceBox", Value::Geometry(polygon));
    let graph = to_graph(&record, &model, ALL_VIEW, &[], &no_mandatory()).unwrap();

    let part = graph.entities_named(graph.root(), "NSIL_PART").next().unwrap();
    let coverage = graph.entities_named(part, "NSIL_COVERAGE").next().unwrap();
    let Some(Value::Geometry(Shape::Rectangle { upper_left, lower_right })) =
        graph.attribute(coverage, "spatialGeographicReferenceBox")
    else {
        panic!("expected bounding box")
    };
    assert_eq!((upper_left.lat, upper_left.lon), (10.0, 20.0));
    assert_eq!((lower_right.lat, lower_right.lon), (5.0, 25.0));
    assert!(matches!(
        graph.attribute(coverage, "advancedGeoSpatial"),
        Some(Value::Geometry(Shape::Polygon(_)))
    ));
}

// ============================================================================
// 6. Flattening back
// ============================================================================

#[test]
fn test_from_graph_is_a_superset_of_the_record_attrs() {
    let model = DataModel::new();
    let record = sample_record();
    let graph = to_graph(&record, &model, ALL_VIEW, &[], &no_mandatory()).unwrap();
    let flat = from_graph(&graph);

    for (key, value) in &record.attrs {
        assert_eq!(flat.get(key), Some(value), "lost {key}");
    }
    // Plus the synthesized card bookkeeping.
    assert_eq!(flat.get("NSIL_CARD.identifier"), Some(&Value::Text("rec-42".into())));
    assert_eq!(flat.get("NSIL_CARD.status"), Some(&Value::Text("NEW".into())));
}

#[test]
fn test_graph_round_trips_through_json() {
    let model = DataModel::new();
    let graph = to_graph(&sample_record(), &model, ALL_VIEW, &[], &no_mandatory()).unwrap();
    let json = serde_json::to_string(&graph).unwrap();
    let back: nsili_core::RecordGraph = serde_json::from_str(&json).unwrap();
    assert_eq!(back, graph);
}

#[test]
fn test_association_view_flattens_from_its_own_root() {
    let model = DataModel::new();
    let record = Record::new("assoc-1")
        .with_created(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        .with_modified(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        .with_attr("NSIL_RELATION.relationship", "HAS PART");
    let graph = to_graph(&record, &model, ASSOCIATION_VIEW, &[], &no_mandatory()).unwrap();
    assert_eq!(graph.node(graph.root()).unwrap().name, "NSIL_ASSOCIATION");
    let flat = from_graph(&graph);
    assert_eq!(
        flat.get("NSIL_RELATION.relationship"),
        Some(&Value::Text("HAS PART".into()))
    );
}
