//! Marshalling between flat records and schema-shaped record graphs.
//!
//! [`to_graph`] walks a view's entity graph depth-first and materializes one
//! [`RecordGraph`] per record: the view root on top, entity nodes below,
//! attribute leaves at the bottom. [`from_graph`] flattens a graph back into
//! `ENTITY.field` keyed attributes.

use hashbrown::{HashMap, HashSet};
use tracing::debug;

use crate::model::graph::{GraphBuilder, SlotId};
use crate::model::{NodeKind, Record, RecordGraph, Shape, Value};
use crate::schema::entities::{
    ADVANCED_GEOSPATIAL, DATE_TIME_MODIFIED, IDENTIFIER, NSIL_CARD, SOURCE_DATE_TIME_MODIFIED,
    SOURCE_LIBRARY, SPATIAL_GEOGRAPHIC_REF_BOX, STATUS, STATUS_OBSOLETE, UNKNOWN,
};
use crate::schema::{DataModel, EntityType, ViewGraph};
use crate::{Error, Result};

const STATUS_NEW: &str = "NEW";
const STATUS_CHANGED: &str = "CHANGED";

/// Marshal a flat record into the entity graph of `view`.
///
/// `requested_paths` narrows the emitted attributes; empty means everything.
/// Entries match either the grandparent-prefixed form
/// (`NSIL_PRODUCT:NSIL_CARD.identifier`) or the bare `ENTITY.field` form.
/// Fields listed in `mandatory` are always emitted and then enforced for
/// every entity the record populated: a populated entity missing one of its
/// mandatory fields fails the whole record, entities the record never
/// mentions are left alone.
pub fn to_graph(
    record: &Record,
    model: &DataModel,
    view: &str,
    requested_paths: &[String],
    mandatory: &HashMap<String, Vec<String>>,
) -> Result<RecordGraph> {
    let graph = model
        .graph_of(view)
        .ok_or_else(|| Error::ViewNotFound(view.to_owned()))?;
    let root = graph.root();
    debug!(record = %record.id, view, root = root.name(), "marshalling record");

    let mut builder = RecordGraph::builder(root.name());
    let mut emitted: HashMap<&'static str, Vec<String>> = HashMap::new();
    let ctx = Context { record, graph, requested_paths, mandatory };

    // The root doubles as an entity in the association view, so its own
    // attributes are emitted the same way as everyone else's.
    let root_slot = builder.root();
    emit_attributes(&mut builder, root_slot, root, root.name(), &ctx, &mut emitted);
    visit_children(&mut builder, root_slot, root, &ctx, &mut emitted);

    // Mandatory fields are enforced only for entities that actually put
    // attributes into the graph. A record that never mentions NSIL_GMTI is
    // not a GMTI product and owes it nothing.
    for (entity, fields) in mandatory {
        let Some(present) = emitted.get(entity.as_str()) else {
            continue;
        };
        for field in fields {
            if !present.contains(field) {
                return Err(Error::MandatoryAttributeMissing {
                    entity: entity.clone(),
                    field: field.clone(),
                });
            }
        }
    }

    Ok(builder.finish())
}

/// Flatten a graph back to `ENTITY.field` keyed attributes. Every attribute
/// leaf is keyed by its owning entity, regardless of depth.
pub fn from_graph(graph: &RecordGraph) -> HashMap<String, Value> {
    let mut parents: HashMap<_, _> = HashMap::new();
    for edge in graph.edges() {
        parents.insert(edge.child, edge.parent);
    }
    let mut flat = HashMap::new();
    for node in graph.nodes() {
        if node.kind != NodeKind::Attribute {
            continue;
        }
        let Some(owner) = parents.get(&node.id).and_then(|p| graph.node(*p)) else {
            continue;
        };
        flat.insert(format!("{}.{}", owner.name, node.name), node.value.clone());
    }
    flat
}

struct Context<'a> {
    record: &'a Record,
    graph: &'a ViewGraph,
    requested_paths: &'a [String],
    mandatory: &'a HashMap<String, Vec<String>>,
}

impl Context<'_> {
    /// An attribute is emitted when no filter is set, when a requested path
    /// names it, or when it is mandatory for its entity.
    fn wants(&self, grandparent: &str, entity: &str, field: &str) -> bool {
        if self.requested_paths.is_empty() {
            return true;
        }
        if self
            .mandatory
            .get(entity)
            .is_some_and(|fields| fields.iter().any(|f| f == field))
        {
            return true;
        }
        self.requested_paths.iter().any(|p| {
            let Some((head, path_field)) = p.rsplit_once('.') else {
                return false;
            };
            if path_field != field {
                return false;
            }
            match head.split_once(':') {
                Some((gp, ent)) => gp == grandparent && ent == entity,
                None => head == entity,
            }
        })
    }
}

fn visit_children(
    builder: &mut GraphBuilder,
    parent_slot: SlotId,
    parent: EntityType,
    ctx: &Context<'_>,
    emitted: &mut HashMap<&'static str, Vec<String>>,
) {
    let mut seen: HashSet<EntityType> = HashSet::new();
    for rel in ctx.graph.children_of(parent) {
        // Single-child cardinalities cap emission at one instance.
        if seen.contains(&rel.child) && rel.forward.at_most_one_child() {
            continue;
        }
        if visit_entity(builder, parent_slot, parent, rel.child, ctx, emitted) {
            seen.insert(rel.child);
        }
    }
}

/// Emit one entity subtree. Returns false and prunes the node when neither
/// attributes nor descendants survived.
fn visit_entity(
    builder: &mut GraphBuilder,
    parent_slot: SlotId,
    parent: EntityType,
    entity: EntityType,
    ctx: &Context<'_>,
    emitted: &mut HashMap<&'static str, Vec<String>>,
) -> bool {
    let slot = builder.add_entity(parent_slot, entity.name());
    emit_attributes(builder, slot, entity, parent.name(), ctx, emitted);
    visit_children(builder, slot, entity, ctx, emitted);
    if builder.child_count(slot) == 0 {
        builder.prune(parent_slot, slot);
        return false;
    }
    true
}

fn emit_attributes(
    builder: &mut GraphBuilder,
    slot: SlotId,
    entity: EntityType,
    grandparent: &str,
    ctx: &Context<'_>,
    emitted: &mut HashMap<&'static str, Vec<String>>,
) {
    let mut emit = |builder: &mut GraphBuilder, field: &str, value: Value| {
        builder.add_attribute(slot, field, value);
        emitted.entry(entity.name()).or_default().push(field.to_owned());
    };

    // The envelope maps onto the card directly under the view root. Cards
    // reachable through association edges describe other records and stay
    // empty here.
    if entity == EntityType::Card && grandparent == ctx.graph.root().name() {
        emit_card(builder, ctx, grandparent, &mut emit);
    }

    for (field, value) in ctx.record.entity_attrs(entity.name()) {
        if !ctx.wants(grandparent, entity.name(), field) {
            continue;
        }
        if field == SPATIAL_GEOGRAPHIC_REF_BOX {
            if let Value::Geometry(shape) = value {
                emit_geometry(builder, shape, &mut emit);
                continue;
            }
        }
        emit(builder, field, value.clone());
    }
}

/// Card bookkeeping comes from the record envelope, never from plain
/// attributes.
fn emit_card(
    builder: &mut GraphBuilder,
    ctx: &Context<'_>,
    grandparent: &str,
    emit: &mut impl FnMut(&mut GraphBuilder, &str, Value),
) {
    let record = ctx.record;
    let wanted = |field: &str| ctx.wants(grandparent, NSIL_CARD, field);

    if wanted(IDENTIFIER) {
        emit(builder, IDENTIFIER, Value::Text(record.id.clone()));
    }
    if let Some(created) = record.created {
        if wanted(SOURCE_DATE_TIME_MODIFIED) {
            emit(builder, SOURCE_DATE_TIME_MODIFIED, Value::DateTime(created));
        }
    }
    if let Some(modified) = record.modified {
        if wanted(DATE_TIME_MODIFIED) {
            emit(builder, DATE_TIME_MODIFIED, Value::DateTime(modified));
        }
    }
    if wanted(SOURCE_LIBRARY) {
        let source = record.source_id.clone().unwrap_or_else(|| UNKNOWN.to_owned());
        emit(builder, SOURCE_LIBRARY, Value::Text(source));
    }
    if wanted(STATUS) {
        emit(builder, STATUS, Value::Text(derive_status(record).to_owned()));
    }
}

/// Lifecycle status from the record envelope. A record without a creation
/// timestamp cannot be proven unchanged and reports CHANGED.
fn derive_status(record: &Record) -> &'static str {
    if record.deleted {
        return STATUS_OBSOLETE;
    }
    match (record.created, record.modified) {
        (Some(created), Some(modified)) if modified > created => STATUS_CHANGED,
        (Some(_), _) => STATUS_NEW,
        (None, _) => STATUS_CHANGED,
    }
}

/// Rectangles pass through as the reference box. Any other shape emits its
/// bounding box there plus the raw shape under `advancedGeoSpatial`.
fn emit_geometry(
    builder: &mut GraphBuilder,
    shape: &Shape,
    emit: &mut impl FnMut(&mut GraphBuilder, &str, Value),
) {
    if shape.is_rectangle() {
        emit(builder, SPATIAL_GEOGRAPHIC_REF_BOX, Value::Geometry(shape.clone()));
        return;
    }
    emit(builder, SPATIAL_GEOGRAPHIC_REF_BOX, Value::Geometry(shape.bounding_box()));
    emit(builder, ADVANCED_GEOSPATIAL, Value::Geometry(shape.clone()));
}
