//! Static schema model: entity pool, views, attribute catalogs, aliases,
//! conceptual attributes, and associations.
//!
//! [`DataModel::new`] runs once at process start and the result is read-only
//! afterwards. Lookup misses return empty results rather than errors.

pub mod attributes;
pub mod entities;

use hashbrown::HashMap;
use tracing::debug;

pub use attributes::{AttrType, AttributeInformation, Domain, RequirementMode};
pub use entities::{Cardinality, EntityType, Relationship};

// ============================================================================
// View graph
// ============================================================================

/// A registered view: a connected subgraph of the entity pool.
#[derive(Debug, Clone)]
pub struct ViewGraph {
    pub name: String,
    pub nodes: Vec<EntityType>,
    pub edges: Vec<Relationship>,
}

impl ViewGraph {
    /// The entity with no incoming edge. NSIL_PRODUCT everywhere except the
    /// association view, whose root is NSIL_ASSOCIATION.
    pub fn root(&self) -> EntityType {
        self.nodes
            .iter()
            .copied()
            .find(|&n| !self.edges.iter().any(|e| e.child == n))
            .unwrap_or(self.nodes[0])
    }

    pub fn contains(&self, entity: EntityType) -> bool {
        self.nodes.contains(&entity)
    }

    pub fn children_of(&self, parent: EntityType) -> impl Iterator<Item = &Relationship> {
        self.edges.iter().filter(move |e| e.parent == parent)
    }
}

// ============================================================================
// Conceptual attributes and associations
// ============================================================================

/// Logical, view-independent field names resolved to concrete paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConceptualAttribute {
    Classification,
    DataSetType,
    DataSize,
    DirectAccess,
    Footprint,
    ModificationDate,
    ProductTitle,
    UniqueIdentifier,
}

/// Named semantic relation between two views, with the attribute catalog
/// available when querying associations.
#[derive(Debug, Clone)]
pub struct Association {
    pub name: String,
    pub source_view: String,
    pub dest_view: String,
    pub description: String,
    pub cardinality: Cardinality,
    pub attributes: Vec<AttributeInformation>,
}

const FULL_CONCEPTUAL_SET: [ConceptualAttribute; 8] = [
    ConceptualAttribute::Classification,
    ConceptualAttribute::DataSetType,
    ConceptualAttribute::DataSize,
    ConceptualAttribute::DirectAccess,
    ConceptualAttribute::Footprint,
    ConceptualAttribute::ModificationDate,
    ConceptualAttribute::ProductTitle,
    ConceptualAttribute::UniqueIdentifier,
];

fn conceptual_path(conceptual: ConceptualAttribute) -> &'static str {
    match conceptual {
        ConceptualAttribute::Classification => "NSIL_SECURITY.classification",
        ConceptualAttribute::DataSetType => "NSIL_PART:NSIL_COMMON.type",
        ConceptualAttribute::DataSize => "NSIL_FILE.extent",
        ConceptualAttribute::DirectAccess => "NSIL_FILE.productURL",
        ConceptualAttribute::Footprint => {
            "NSIL_PART:NSIL_COVERAGE.spatialGeographicReferenceBox"
        }
        ConceptualAttribute::ModificationDate => "NSIL_CARD.dateTimeModified",
        ConceptualAttribute::ProductTitle => "NSIL_FILE.title",
        ConceptualAttribute::UniqueIdentifier => "NSIL_CARD.identifier",
    }
}

// ============================================================================
// DataModel
// ============================================================================

type MandatoryMap = HashMap<String, Vec<String>>;

/// The immutable schema model. Built once, then shared freely across
/// threads (`Send + Sync`, no interior mutability).
#[derive(Debug)]
pub struct DataModel {
    attrs: HashMap<&'static str, Vec<AttributeInformation>>,
    views: Vec<ViewGraph>,
    mandatory: HashMap<String, MandatoryMap>,
    aliases: HashMap<&'static str, Vec<(String, String)>>,
    alias_categories: Vec<&'static str>,
    conceptual: HashMap<String, Vec<(ConceptualAttribute, String)>>,
    associations: Vec<Association>,
    empty_attrs: Vec<AttributeInformation>,
    empty_mandatory: MandatoryMap,
    empty_aliases: Vec<(String, String)>,
}

impl Default for DataModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DataModel {
    pub fn new() -> Self {
        let mut attrs = HashMap::new();
        for spec in entities::VIEW_SPECS {
            for &node in spec.nodes {
                attrs
                    .entry(node.name())
                    .or_insert_with(|| attributes::attributes_for(node.name()));
            }
        }

        let mut views = Vec::with_capacity(entities::VIEW_SPECS.len());
        let mut mandatory = HashMap::new();
        let mut conceptual = HashMap::new();
        for spec in entities::VIEW_SPECS {
            let view = ViewGraph {
                name: spec.name.to_owned(),
                nodes: spec.nodes.to_vec(),
                edges: spec.edges.to_vec(),
            };
            mandatory.insert(spec.name.to_owned(), mandatory_for(&view, &attrs));

            let set: &[ConceptualAttribute] = if spec.name == entities::NSIL_ASSOCIATION_VIEW {
                &[ConceptualAttribute::ModificationDate, ConceptualAttribute::UniqueIdentifier]
            } else {
                &FULL_CONCEPTUAL_SET
            };
            let pairs = set
                .iter()
                .map(|&c| (c, conceptual_path(c).to_owned()))
                .collect();
            conceptual.insert(spec.name.to_owned(), pairs);
            views.push(view);
        }

        let mut aliases: HashMap<&'static str, Vec<(String, String)>> = HashMap::new();
        let mut alias_categories = Vec::new();
        for &(category, external, path) in entities::ALIAS_TABLE {
            let entry = aliases.entry(category).or_insert_with(|| {
                alias_categories.push(category);
                Vec::new()
            });
            entry.push((external.to_owned(), path.to_owned()));
        }

        let associations = build_associations();

        Self {
            attrs,
            views,
            mandatory,
            aliases,
            alias_categories,
            conceptual,
            associations,
            empty_attrs: Vec::new(),
            empty_mandatory: HashMap::new(),
            empty_aliases: Vec::new(),
        }
    }

    /// Attribute catalog for an entity type. Empty for unknown names and for
    /// types that carry no direct attributes.
    pub fn attributes_of_entity(&self, entity_name: &str) -> &[AttributeInformation] {
        self.attrs.get(entity_name).unwrap_or(&self.empty_attrs)
    }

    pub fn graph_of(&self, view_name: &str) -> Option<&ViewGraph> {
        let graph = self.views.iter().find(|v| v.name == view_name);
        if graph.is_none() {
            debug!(view = view_name, "no entity graph registered for view");
        }
        graph
    }

    /// Union of entity catalogs over the view's nodes, in node registration
    /// order. Duplicates are allowed; callers dedupe if needed.
    pub fn attributes_of_view(&self, view_name: &str) -> Vec<&AttributeInformation> {
        let Some(graph) = self.graph_of(view_name) else {
            return Vec::new();
        };
        graph
            .nodes
            .iter()
            .flat_map(|n| self.attributes_of_entity(n.name()))
            .collect()
    }

    /// Entity name to mandatory field names, precomputed at registration.
    pub fn mandatory_fields(&self, view_name: &str) -> &MandatoryMap {
        self.mandatory.get(view_name).unwrap_or(&self.empty_mandatory)
    }

    pub fn alias_categories(&self) -> &[&'static str] {
        &self.alias_categories
    }

    pub fn aliases_for(&self, category: &str) -> &[(String, String)] {
        self.aliases.get(category).map(Vec::as_slice).unwrap_or(&self.empty_aliases)
    }

    /// First matching conceptual-attribute path for the view, if any.
    pub fn conceptual_attribute(
        &self,
        view_name: &str,
        conceptual: ConceptualAttribute,
    ) -> Option<&str> {
        self.conceptual
            .get(view_name)?
            .iter()
            .find(|(c, _)| *c == conceptual)
            .map(|(_, path)| path.as_str())
    }

    pub fn associations(&self) -> &[Association] {
        &self.associations
    }

    pub fn views(&self) -> impl Iterator<Item = &str> {
        self.views.iter().map(|v| v.name.as_str())
    }
}

fn mandatory_for(
    view: &ViewGraph,
    attrs: &HashMap<&'static str, Vec<AttributeInformation>>,
) -> MandatoryMap {
    let mut map: MandatoryMap = HashMap::new();
    for node in &view.nodes {
        let Some(catalog) = attrs.get(node.name()) else { continue };
        for info in catalog {
            if info.mode == RequirementMode::Mandatory {
                map.entry(info.entity().to_owned())
                    .or_default()
                    .push(info.field().to_owned());
            }
        }
    }
    map
}

fn build_associations() -> Vec<Association> {
    // Card plus relation attributes are the ones queryable on associations.
    let mut assoc_attrs = attributes::card_attributes();
    assoc_attrs.extend(attributes::relation_attributes());

    let assoc = |name: &str, description: &str, cardinality| Association {
        name: name.to_owned(),
        source_view: entities::NSIL_ALL_VIEW.to_owned(),
        dest_view: entities::NSIL_ALL_VIEW.to_owned(),
        description: description.to_owned(),
        cardinality,
        attributes: assoc_attrs.clone(),
    };

    vec![
        assoc(
            entities::HAS_PART,
            "Described resource includes the referenced resource either physically or logically.",
            Cardinality::ManyToMany,
        ),
        assoc(
            entities::IS_VERSION_OF,
            "Described resource (source) is a version, edition or adaptation of the referenced \
             resource (destination).",
            Cardinality::ManyToOne,
        ),
        assoc(
            entities::REPLACES,
            "Described resource (source) supplants, displaces or supersedes the referenced \
             resource (destination).",
            Cardinality::OneToMany,
        ),
        assoc(
            entities::IS_SUPPORT_DATA_TO,
            "Described resource (source) supplements information to the referenced RFI and IR \
             (destination).",
            Cardinality::OneToMany,
        ),
        assoc(
            entities::ORIGINATING_FROM,
            "Described resource (source) originates from the referenced resource (destination).",
            Cardinality::ManyToOne,
        ),
        assoc(
            entities::FOLLOWS,
            "Described resource (source) is the next in the chronological sequence after the \
             referenced resource (destination).",
            Cardinality::OneToOne,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_all_view_root_is_product() {
        let model = DataModel::new();
        let graph = model.graph_of(entities::NSIL_ALL_VIEW).unwrap();
        assert_eq!(graph.root(), EntityType::Product);
        assert_eq!(graph.nodes.len(), 30);
    }

    #[test]
    fn test_association_view_root_is_association() {
        let model = DataModel::new();
        let graph = model.graph_of(entities::NSIL_ASSOCIATION_VIEW).unwrap();
        assert_eq!(graph.root(), EntityType::Association);
    }

    #[test]
    fn test_unknown_view_is_a_miss_not_an_error() {
        let model = DataModel::new();
        assert!(model.graph_of("NSIL_BOGUS_VIEW").is_none());
        assert!(model.attributes_of_view("NSIL_BOGUS_VIEW").is_empty());
        assert!(model.mandatory_fields("NSIL_BOGUS_VIEW").is_empty());
    }

    #[test]
    fn test_mandatory_fields_precomputed_per_view() {
        let model = DataModel::new();
        let all = model.mandatory_fields(entities::NSIL_ALL_VIEW);
        assert!(all["NSIL_CARD"].contains(&"status".to_owned()));
        assert!(all["NSIL_COMMON"].contains(&"identifierUUID".to_owned()));
        // The association view has no NSIL_COMMON node at all.
        let assoc = model.mandatory_fields(entities::NSIL_ASSOCIATION_VIEW);
        assert!(!assoc.contains_key("NSIL_COMMON"));
        assert!(assoc.contains_key("NSIL_CARD"));
    }

    #[test]
    fn test_conceptual_attribute_resolution() {
        let model = DataModel::new();
        assert_eq!(
            model.conceptual_attribute(
                entities::NSIL_ALL_VIEW,
                ConceptualAttribute::Footprint
            ),
            Some("NSIL_PART:NSIL_COVERAGE.spatialGeographicReferenceBox")
        );
        assert_eq!(
            model.conceptual_attribute(
                entities::NSIL_ASSOCIATION_VIEW,
                ConceptualAttribute::Footprint
            ),
            None
        );
    }

    #[test]
    fn test_association_order_is_stable() {
        let model = DataModel::new();
        let names: Vec<&str> = model.associations().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "HAS PART",
                "IS VERSION OF",
                "REPLACES",
                "IS SUPPORT DATA TO",
                "ORIGINATING FROM",
                "FOLLOWS"
            ]
        );
        for assoc in model.associations() {
            assert!(!assoc.attributes.is_empty());
        }
    }
}
