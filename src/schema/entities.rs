//! Entity pool, relationship pool, and declarative view tables.
//!
//! All views draw from one shared pool of entity types and relationships.
//! Each view is a node set plus an edge set; the handful of views that
//! tighten a cardinality (single-part views) reference an alternate edge
//! constant rather than redefining the graph.

use serde::{Deserialize, Serialize};

// ============================================================================
// Entity types
// ============================================================================

/// The fixed entity pool. Discriminants are the stable integer identities,
/// assigned in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EntityType {
    Product = 0,
    Card = 1,
    Common = 2,
    Coverage = 3,
    File = 4,
    Gmti = 5,
    Imagery = 6,
    Message = 7,
    MetadataSecurity = 8,
    Part = 9,
    RelatedFile = 10,
    Relation = 11,
    Security = 12,
    Stream = 13,
    Video = 14,
    Approval = 15,
    ExploitationInfo = 16,
    Sds = 17,
    Tdl = 18,
    Rfi = 19,
    Cxp = 20,
    Report = 21,
    Task = 22,
    Source = 23,
    Destination = 24,
    Association = 25,
    Entity = 26,
    Intrep = 27,
    Intsum = 28,
    Cbrn = 29,
}

impl EntityType {
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            EntityType::Product => NSIL_PRODUCT,
            EntityType::Card => NSIL_CARD,
            EntityType::Common => NSIL_COMMON,
            EntityType::Coverage => NSIL_COVERAGE,
            EntityType::File => NSIL_FILE,
            EntityType::Gmti => NSIL_GMTI,
            EntityType::Imagery => NSIL_IMAGERY,
            EntityType::Message => NSIL_MESSAGE,
            EntityType::MetadataSecurity => NSIL_METADATA_SECURITY,
            EntityType::Part => NSIL_PART,
            EntityType::RelatedFile => NSIL_RELATED_FILE,
            EntityType::Relation => NSIL_RELATION,
            EntityType::Security => NSIL_SECURITY,
            EntityType::Stream => NSIL_STREAM,
            EntityType::Video => NSIL_VIDEO,
            EntityType::Approval => NSIL_APPROVAL,
            EntityType::ExploitationInfo => NSIL_EXPLOITATION_INFO,
            EntityType::Sds => NSIL_SDS,
            EntityType::Tdl => NSIL_TDL,
            EntityType::Rfi => NSIL_RFI,
            EntityType::Cxp => NSIL_CXP,
            EntityType::Report => NSIL_REPORT,
            EntityType::Task => NSIL_TASK,
            EntityType::Source => NSIL_SOURCE,
            EntityType::Destination => NSIL_DESTINATION,
            EntityType::Association => NSIL_ASSOCIATION,
            EntityType::Entity => NSIL_ENTITY,
            EntityType::Intrep => NSIL_INTREP,
            EntityType::Intsum => NSIL_INTSUM,
            EntityType::Cbrn => NSIL_CBRN,
        }
    }
}

// Entity names as they appear on the wire.
pub const NSIL_PRODUCT: &str = "NSIL_PRODUCT";
pub const NSIL_CARD: &str = "NSIL_CARD";
pub const NSIL_COMMON: &str = "NSIL_COMMON";
pub const NSIL_COVERAGE: &str = "NSIL_COVERAGE";
pub const NSIL_FILE: &str = "NSIL_FILE";
pub const NSIL_GMTI: &str = "NSIL_GMTI";
pub const NSIL_IMAGERY: &str = "NSIL_IMAGERY";
pub const NSIL_MESSAGE: &str = "NSIL_MESSAGE";
pub const NSIL_METADATA_SECURITY: &str = "NSIL_METADATASECURITY";
pub const NSIL_PART: &str = "NSIL_PART";
pub const NSIL_RELATED_FILE: &str = "NSIL_RELATED_FILE";
pub const NSIL_RELATION: &str = "NSIL_RELATION";
pub const NSIL_SECURITY: &str = "NSIL_SECURITY";
pub const NSIL_STREAM: &str = "NSIL_STREAM";
pub const NSIL_VIDEO: &str = "NSIL_VIDEO";
pub const NSIL_APPROVAL: &str = "NSIL_APPROVAL";
pub const NSIL_EXPLOITATION_INFO: &str = "EXPLOITATION_INFO";
pub const NSIL_SDS: &str = "NSIL_SDS";
pub const NSIL_TDL: &str = "NSIL_TDL";
pub const NSIL_RFI: &str = "NSIL_RFI";
pub const NSIL_CXP: &str = "NSIL_CXP";
pub const NSIL_REPORT: &str = "NSIL_REPORT";
pub const NSIL_TASK: &str = "NSIL_TASK";
pub const NSIL_SOURCE: &str = "NSIL_SOURCE";
pub const NSIL_DESTINATION: &str = "NSIL_DESTINATION";
pub const NSIL_ASSOCIATION: &str = "NSIL_ASSOCIATION";
pub const NSIL_ENTITY: &str = "NSIL_ENTITY";
pub const NSIL_INTREP: &str = "NSIL_INTREP";
pub const NSIL_INTSUM: &str = "NSIL_INTSUM";
pub const NSIL_CBRN: &str = "NSIL_CBRN";

// View names.
pub const NSIL_ALL_VIEW: &str = "NSIL_ALL_VIEW";
pub const NSIL_IMAGERY_VIEW: &str = "NSIL_IMAGERY_VIEW";
pub const NSIL_GMTI_VIEW: &str = "NSIL_GMTI_VIEW";
pub const NSIL_MESSAGE_VIEW: &str = "NSIL_MESSAGE_VIEW";
pub const NSIL_VIDEO_VIEW: &str = "NSIL_VIDEO_VIEW";
pub const NSIL_ASSOCIATION_VIEW: &str = "NSIL_ASSOCIATION_VIEW";
pub const NSIL_REPORT_VIEW: &str = "NSIL_REPORT_VIEW";
pub const NSIL_TDL_VIEW: &str = "NSIL_TDL_VIEW";
pub const NSIL_CCIRM_VIEW: &str = "NSIL_CCIRM_VIEW";
pub const NSIL_CBRN_VIEW: &str = "NSIL_CBRN_VIEW";

// Alias categories.
pub const NSIL_CORE: &str = "NSIL_CORE";
pub const STANAG_4545: &str = "STANAG4545";
pub const STANAG_4607: &str = "STANAG4607";
pub const STANAG_4609: &str = "STANAG4609";
pub const STANAG_5516: &str = "STANAG5516";
pub const NACT_L16: &str = "NACT_L16";

// Association names.
pub const HAS_PART: &str = "HAS PART";
pub const IS_VERSION_OF: &str = "IS VERSION OF";
pub const REPLACES: &str = "REPLACES";
pub const IS_SUPPORT_DATA_TO: &str = "IS SUPPORT DATA TO";
pub const ORIGINATING_FROM: &str = "ORIGINATING FROM";
pub const FOLLOWS: &str = "FOLLOWS";

// Well-known field names referenced outside the attribute catalogs.
pub const IDENTIFIER: &str = "identifier";
pub const IDENTIFIER_UUID: &str = "identifierUUID";
pub const STATUS: &str = "status";
pub const SOURCE_LIBRARY: &str = "sourceLibrary";
pub const SOURCE_DATE_TIME_MODIFIED: &str = "sourceDateTimeModified";
pub const DATE_TIME_MODIFIED: &str = "dateTimeModified";
pub const NUM_OF_PARTS: &str = "numberOfParts";
pub const SPATIAL_GEOGRAPHIC_REF_BOX: &str = "spatialGeographicReferenceBox";
pub const ADVANCED_GEOSPATIAL: &str = "advancedGeoSpatial";
pub const STATUS_OBSOLETE: &str = "OBSOLETE";
pub const UNKNOWN: &str = "Unknown";

// ============================================================================
// Relationships
// ============================================================================

/// Forward/reverse fan-out declared on a relationship or association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    OneToOne,
    OneToZeroOrOne,
    OneToZeroOrMore,
    OneToOneOrMore,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    /// True when at most one child instance may be rendered per parent.
    pub fn at_most_one_child(self) -> bool {
        matches!(self, Cardinality::OneToOne | Cardinality::OneToZeroOrOne)
    }
}

/// Directed parent-to-child edge in a view graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub parent: EntityType,
    pub child: EntityType,
    pub forward: Cardinality,
    pub reverse: Cardinality,
}

const fn rel(
    parent: EntityType,
    child: EntityType,
    forward: Cardinality,
    reverse: Cardinality,
) -> Relationship {
    Relationship { parent, child, forward, reverse }
}

use Cardinality::{OneToOne, OneToOneOrMore, OneToZeroOrMore, OneToZeroOrOne};
use EntityType::*;

pub const PRODUCT_ASSOCIATION: Relationship = rel(Product, Association, OneToZeroOrMore, OneToOne);
pub const PRODUCT_APPROVAL: Relationship = rel(Product, Approval, OneToZeroOrOne, OneToOne);
pub const PRODUCT_CARD: Relationship = rel(Product, Card, OneToOne, OneToOne);
pub const PRODUCT_FILE: Relationship = rel(Product, File, OneToZeroOrOne, OneToOne);
pub const PRODUCT_STREAM: Relationship = rel(Product, Stream, OneToZeroOrOne, OneToOne);
pub const PRODUCT_METADATA_SECURITY: Relationship =
    rel(Product, MetadataSecurity, OneToOne, OneToOne);
pub const PRODUCT_RELATED_FILE: Relationship = rel(Product, RelatedFile, OneToZeroOrMore, OneToOne);
pub const PRODUCT_SECURITY: Relationship = rel(Product, Security, OneToOne, OneToOne);
pub const PRODUCT_PART: Relationship = rel(Product, Part, OneToZeroOrMore, OneToOne);
/// Single-part variant used by the GMTI/message/video/report/TDL/CCIRM/CBRN
/// views, which carry exactly one part.
pub const PRODUCT_PART_SINGLE: Relationship = rel(Product, Part, OneToOne, OneToOne);
pub const PART_COMMON: Relationship = rel(Part, Common, OneToOne, OneToOne);
pub const PART_COVERAGE: Relationship = rel(Part, Coverage, OneToZeroOrOne, OneToOne);
pub const PART_SECURITY: Relationship = rel(Part, Security, OneToOne, OneToZeroOrOne);
pub const PART_EXPLOITATION: Relationship =
    rel(Part, ExploitationInfo, OneToZeroOrOne, OneToOne);
pub const PART_CXP: Relationship = rel(Part, Cxp, OneToZeroOrOne, OneToOne);
pub const PART_GMTI: Relationship = rel(Part, Gmti, OneToZeroOrOne, OneToOne);
pub const PART_IMAGERY: Relationship = rel(Part, Imagery, OneToZeroOrOne, OneToOne);
pub const PART_MESSAGE: Relationship = rel(Part, Message, OneToZeroOrOne, OneToOne);
pub const PART_REPORT: Relationship = rel(Part, Report, OneToZeroOrOne, OneToOne);
pub const PART_REPORT_SINGLE: Relationship = rel(Part, Report, OneToOne, OneToOne);
pub const PART_RFI: Relationship = rel(Part, Rfi, OneToZeroOrOne, OneToOne);
pub const PART_SDS: Relationship = rel(Part, Sds, OneToZeroOrOne, OneToOne);
pub const PART_TASK: Relationship = rel(Part, Task, OneToZeroOrOne, OneToOne);
pub const PART_TDL: Relationship = rel(Part, Tdl, OneToZeroOrOne, OneToOne);
pub const PART_VIDEO: Relationship = rel(Part, Video, OneToZeroOrOne, OneToOne);
pub const PART_CBRN: Relationship = rel(Part, Cbrn, OneToZeroOrMore, OneToOne);
pub const REPORT_ENTITY: Relationship = rel(Report, Entity, OneToZeroOrMore, OneToOne);
pub const REPORT_INTREP: Relationship = rel(Report, Intrep, OneToZeroOrOne, OneToOne);
pub const REPORT_INTSUM: Relationship = rel(Report, Intsum, OneToZeroOrOne, OneToOne);
pub const ASSOC_CARD: Relationship = rel(Association, Card, OneToOne, OneToZeroOrMore);
pub const ASSOC_SOURCE: Relationship = rel(Association, Source, OneToOne, OneToZeroOrMore);
pub const ASSOC_DESTINATION: Relationship =
    rel(Association, Destination, OneToOneOrMore, OneToZeroOrMore);
pub const ASSOC_RELATION: Relationship = rel(Association, Relation, OneToOne, OneToOne);
pub const SOURCE_CARD: Relationship = rel(Source, Card, OneToOne, OneToZeroOrOne);
pub const DESTINATION_CARD: Relationship = rel(Destination, Card, OneToOne, OneToZeroOrOne);

// ============================================================================
// View tables
// ============================================================================

/// Declarative view definition: name plus node and edge inclusion sets.
pub struct ViewSpec {
    pub name: &'static str,
    pub nodes: &'static [EntityType],
    pub edges: &'static [Relationship],
}

const ASSOC_EDGES: [Relationship; 6] = [
    ASSOC_CARD,
    ASSOC_SOURCE,
    ASSOC_DESTINATION,
    ASSOC_RELATION,
    SOURCE_CARD,
    DESTINATION_CARD,
];

pub const VIEW_SPECS: &[ViewSpec] = &[
    ViewSpec {
        name: NSIL_ALL_VIEW,
        nodes: &[
            Product, Card, Common, Coverage, File, Gmti, Imagery, Message, MetadataSecurity,
            Part, RelatedFile, Relation, Security, Stream, Video, Approval, ExploitationInfo,
            Sds, Tdl, Rfi, Cxp, Report, Task, Source, Destination, Association, Cbrn, Intrep,
            Intsum, Entity,
        ],
        edges: &[
            PRODUCT_ASSOCIATION,
            PRODUCT_APPROVAL,
            PRODUCT_CARD,
            PRODUCT_FILE,
            PRODUCT_STREAM,
            PRODUCT_METADATA_SECURITY,
            PRODUCT_RELATED_FILE,
            PRODUCT_SECURITY,
            PRODUCT_PART,
            PART_COMMON,
            PART_COVERAGE,
            PART_SECURITY,
            PART_EXPLOITATION,
            PART_CXP,
            PART_GMTI,
            PART_IMAGERY,
            PART_MESSAGE,
            PART_REPORT,
            PART_RFI,
            PART_SDS,
            PART_TASK,
            PART_TDL,
            PART_VIDEO,
            PART_CBRN,
            REPORT_ENTITY,
            REPORT_INTREP,
            REPORT_INTSUM,
            ASSOC_CARD,
            ASSOC_SOURCE,
            ASSOC_DESTINATION,
            ASSOC_RELATION,
            SOURCE_CARD,
            DESTINATION_CARD,
        ],
    },
    ViewSpec {
        name: NSIL_IMAGERY_VIEW,
        nodes: &[
            Product, Part, Source, Destination, Association, Approval, Card, File, Stream,
            MetadataSecurity, RelatedFile, Security, Common, Coverage, ExploitationInfo,
            Imagery, Relation,
        ],
        edges: &[
            PRODUCT_ASSOCIATION,
            PRODUCT_APPROVAL,
            PRODUCT_CARD,
            PRODUCT_FILE,
            PRODUCT_STREAM,
            PRODUCT_METADATA_SECURITY,
            PRODUCT_RELATED_FILE,
            PRODUCT_SECURITY,
            PRODUCT_PART,
            PART_COMMON,
            PART_COVERAGE,
            PART_SECURITY,
            PART_EXPLOITATION,
            PART_IMAGERY,
            ASSOC_CARD,
            ASSOC_SOURCE,
            ASSOC_DESTINATION,
            ASSOC_RELATION,
            SOURCE_CARD,
            DESTINATION_CARD,
        ],
    },
    ViewSpec {
        name: NSIL_GMTI_VIEW,
        nodes: &[
            Product, Card, Common, Coverage, File, Gmti, MetadataSecurity, Part, RelatedFile,
            Relation, Security, Stream, Approval, ExploitationInfo, Source, Destination,
            Association,
        ],
        edges: &[
            PRODUCT_ASSOCIATION,
            PRODUCT_APPROVAL,
            PRODUCT_CARD,
            PRODUCT_FILE,
            PRODUCT_STREAM,
            PRODUCT_METADATA_SECURITY,
            PRODUCT_RELATED_FILE,
            PRODUCT_SECURITY,
            PRODUCT_PART_SINGLE,
            PART_COMMON,
            PART_COVERAGE,
            PART_SECURITY,
            PART_EXPLOITATION,
            PART_GMTI,
            ASSOC_CARD,
            ASSOC_SOURCE,
            ASSOC_DESTINATION,
            ASSOC_RELATION,
            SOURCE_CARD,
            DESTINATION_CARD,
        ],
    },
    ViewSpec {
        name: NSIL_MESSAGE_VIEW,
        nodes: &[
            Product, Card, Common, Coverage, File, Message, MetadataSecurity, Part, RelatedFile,
            Relation, Security, Approval, ExploitationInfo, Source, Destination, Association,
        ],
        edges: &[
            PRODUCT_ASSOCIATION,
            PRODUCT_APPROVAL,
            PRODUCT_CARD,
            PRODUCT_FILE,
            PRODUCT_METADATA_SECURITY,
            PRODUCT_RELATED_FILE,
            PRODUCT_SECURITY,
            PRODUCT_PART_SINGLE,
            PART_COMMON,
            PART_COVERAGE,
            PART_SECURITY,
            PART_EXPLOITATION,
            PART_MESSAGE,
            ASSOC_CARD,
            ASSOC_SOURCE,
            ASSOC_DESTINATION,
            ASSOC_RELATION,
            SOURCE_CARD,
            DESTINATION_CARD,
        ],
    },
    ViewSpec {
        name: NSIL_VIDEO_VIEW,
        nodes: &[
            Product, Card, Common, Coverage, File, Stream, MetadataSecurity, Part, RelatedFile,
            Relation, Security, Video, Approval, ExploitationInfo, Source, Destination,
            Association,
        ],
        edges: &[
            PRODUCT_ASSOCIATION,
            PRODUCT_APPROVAL,
            PRODUCT_CARD,
            PRODUCT_FILE,
            PRODUCT_STREAM,
            PRODUCT_METADATA_SECURITY,
            PRODUCT_RELATED_FILE,
            PRODUCT_SECURITY,
            PRODUCT_PART_SINGLE,
            PART_COMMON,
            PART_COVERAGE,
            PART_SECURITY,
            PART_EXPLOITATION,
            PART_VIDEO,
            ASSOC_CARD,
            ASSOC_SOURCE,
            ASSOC_DESTINATION,
            ASSOC_RELATION,
            SOURCE_CARD,
            DESTINATION_CARD,
        ],
    },
    ViewSpec {
        name: NSIL_ASSOCIATION_VIEW,
        nodes: &[Card, Relation, Source, Destination, Association],
        edges: &ASSOC_EDGES,
    },
    ViewSpec {
        name: NSIL_REPORT_VIEW,
        nodes: &[
            Product, Approval, Card, Common, Coverage, File, MetadataSecurity, Part,
            RelatedFile, Relation, Security, ExploitationInfo, Report, Source, Destination,
            Association, Intrep, Intsum, Entity,
        ],
        edges: &[
            PRODUCT_APPROVAL,
            PRODUCT_CARD,
            PRODUCT_ASSOCIATION,
            PRODUCT_FILE,
            PRODUCT_METADATA_SECURITY,
            PRODUCT_RELATED_FILE,
            ASSOC_SOURCE,
            ASSOC_DESTINATION,
            ASSOC_RELATION,
            SOURCE_CARD,
            DESTINATION_CARD,
            PRODUCT_PART_SINGLE,
            PART_SECURITY,
            PART_COMMON,
            PART_COVERAGE,
            PART_EXPLOITATION,
            PART_REPORT_SINGLE,
            REPORT_ENTITY,
            REPORT_INTSUM,
            REPORT_INTREP,
        ],
    },
    ViewSpec {
        name: NSIL_TDL_VIEW,
        nodes: &[
            Product, Approval, Card, File, Stream, MetadataSecurity, RelatedFile, Security,
            Part, Common, Coverage, ExploitationInfo, Tdl, Association, Relation, Source,
            Destination,
        ],
        edges: &[
            PRODUCT_APPROVAL,
            PRODUCT_CARD,
            PRODUCT_FILE,
            PRODUCT_STREAM,
            PRODUCT_METADATA_SECURITY,
            PRODUCT_RELATED_FILE,
            PRODUCT_SECURITY,
            PRODUCT_PART_SINGLE,
            PART_SECURITY,
            PART_COMMON,
            PART_COVERAGE,
            PART_EXPLOITATION,
            PART_TDL,
            PRODUCT_ASSOCIATION,
            ASSOC_CARD,
            ASSOC_RELATION,
            ASSOC_SOURCE,
            ASSOC_DESTINATION,
        ],
    },
    ViewSpec {
        name: NSIL_CCIRM_VIEW,
        nodes: &[
            Product, Approval, Card, File, MetadataSecurity, RelatedFile, Security, Part,
            Common, Coverage, ExploitationInfo, Cxp, Rfi, Task, Association, Relation, Source,
            Destination,
        ],
        edges: &[
            PRODUCT_APPROVAL,
            PRODUCT_CARD,
            PRODUCT_FILE,
            PRODUCT_METADATA_SECURITY,
            PRODUCT_RELATED_FILE,
            PRODUCT_SECURITY,
            PRODUCT_PART_SINGLE,
            PART_SECURITY,
            PART_COMMON,
            PART_COVERAGE,
            PART_EXPLOITATION,
            PART_CXP,
            PART_RFI,
            PART_TASK,
            PRODUCT_ASSOCIATION,
            ASSOC_CARD,
            ASSOC_RELATION,
            ASSOC_SOURCE,
            ASSOC_DESTINATION,
        ],
    },
    ViewSpec {
        name: NSIL_CBRN_VIEW,
        nodes: &[
            Product, Approval, Card, MetadataSecurity, RelatedFile, Part, Security, Common,
            Coverage, Cbrn, Association, Relation, Source, Destination,
        ],
        edges: &[
            PRODUCT_APPROVAL,
            PRODUCT_CARD,
            PRODUCT_METADATA_SECURITY,
            PRODUCT_RELATED_FILE,
            PRODUCT_SECURITY,
            PRODUCT_PART_SINGLE,
            PART_COMMON,
            PART_COVERAGE,
            PART_CBRN,
            ASSOC_CARD,
            ASSOC_SOURCE,
            ASSOC_DESTINATION,
            ASSOC_RELATION,
            SOURCE_CARD,
            DESTINATION_CARD,
        ],
    },
];

// ============================================================================
// Alias tables
// ============================================================================

/// (category, external field name, NSILI attribute path).
pub const ALIAS_TABLE: &[(&str, &str, &str)] = &[
    (NSIL_CORE, "MISNID", "NSIL_COMMON.identifierMission"),
    (STANAG_4607, "/GMTI/PacketHeader/MissionID", "NSIL_COMMON.identifierMission"),
    (STANAG_4609, "EpisodeNumber", "NSIL_COMMON.identifierMission"),
    (STANAG_4545, "ISORCE", "NSIL_COMMON.source"),
    (NSIL_CORE, "ISORCE", "NSIL_COMMON.source"),
    (STANAG_4607, "/GMTI/PacketHeader/PlatformID", "NSIL_COMMON.source"),
    (STANAG_4609, "ImageSourceDevice", "NSIL_COMMON.source"),
    (NACT_L16, "/HJ3/SOURCE_TRK_NBR", "NSIL_COMMON.source"),
    (NSIL_CORE, "TGTID", "NSIL_COMMON.targetNumber"),
    (STANAG_4545, "TGTID", "NSIL_COVERAGE.spatialCountryCode"),
    (NSIL_CORE, "CNTRYCODE", "NSIL_COVERAGE.spatialCountryCode"),
    (STANAG_4609, "ObjectCountryCode", "NSIL_COVERAGE.spatialCountryCode"),
    (STANAG_4545, "IGEOLO", "NSIL_COVERAGE.spatialGeographicReferenceBox"),
    (NSIL_CORE, "IGEOLO", "NSIL_COVERAGE.spatialGeographicReferenceBox"),
    (STANAG_4607, "/GMTI/DwellSegment/DwellArea", "NSIL_COVERAGE.spatialGeographicReferenceBox"),
    (
        STANAG_4609,
        "FrameCenterLatitude + FrameCenterLongitude",
        "NSIL_COVERAGE.spatialGeographicReferenceBox",
    ),
    (STANAG_4545, "IDATIM", "NSIL_COVERAGE.temporalEnd"),
    (
        STANAG_4607,
        "/GMTI/MissionSegment/ReferenceTime + /GMTI/DwellSegment/DwellTime",
        "NSIL_COVERAGE.temporalEnd",
    ),
    (
        STANAG_4609,
        "TimingReconciliationMetadataSet/UserDefinedTimeStamp",
        "NSIL_COVERAGE.temporalEnd",
    ),
    (NACT_L16, "/HJ9/TIME_STAMP", "NSIL_COVERAGE.temporalEnd"),
    (STANAG_4545, "IDATIM", "NSIL_COVERAGE.temporalStart"),
    (NSIL_CORE, "IDATIM", "NSIL_COVERAGE.temporalStart"),
    (
        STANAG_4607,
        "/GMTI/MissionSegment/ReferenceTime + /GMTI/DwellSegment/DwellTime",
        "NSIL_COVERAGE.temporalStart",
    ),
    (
        STANAG_4609,
        "TimingReconciliationMetadataSet/UserDefinedTimeStamp",
        "NSIL_COVERAGE.temporalStart",
    ),
    (NACT_L16, "/HJ9/TIME_STAMP", "NSIL_COVERAGE.temporalStart"),
    (STANAG_4545, "OSTAID", "NSIL_FILE.creator"),
    (NSIL_CORE, "OSTAID", "NSIL_FILE.creator"),
    (STANAG_4545, "FDT", "NSIL_FILE.dateTimeDeclared"),
    (NSIL_CORE, "FDT", "NSIL_FILE.dateTimeDeclared"),
    (STANAG_4545, "FL", "NSIL_FILE.extent"),
    (NSIL_CORE, "FL", "NSIL_FILE.extent"),
    (STANAG_4545, "FHDR", "NSIL_FILE.format"),
    (STANAG_4545, "FHDR", "NSIL_FILE.formatVersion"),
    (STANAG_4607, "/GMTI/PacketHeader/VersionID", "NSIL_FILE.formatVersion"),
    (NSIL_CORE, "DAID", "NSIL_FILE.productURL"),
    (STANAG_4545, "FTITLE", "NSIL_FILE.title"),
    (NSIL_CORE, "FTITLE", "NSIL_FILE.title"),
    (STANAG_4607, "/GMTI/PacketHeader/JobID", "NSIL_GMTI.identifierJob"),
    (STANAG_4607, "/GMTI/DwellSegment/TargetReportCount", "NSIL_GMTI.numberOfTargetReports"),
    (STANAG_4545, "ICAT", "NSIL_IMAGERY.category"),
    (NSIL_CORE, "ICAT", "NSIL_IMAGERY.category"),
    (STANAG_4545, "ICOM", "NSIL_IMAGERY.comments"),
    (NSIL_CORE, "ICOM", "NSIL_IMAGERY.comments"),
    (STANAG_4545, "IC", "NSIL_IMAGERY.decompressionTechnique"),
    (STANAG_4545, "IID1", "NSIL_IMAGERY.identifier"),
    (NSIL_CORE, "IID1", "NSIL_IMAGERY.identifier"),
    (STANAG_4545, "NBANDS", "NSIL_IMAGERY.numberOfBands"),
    (STANAG_4545, "NROWS", "NSIL_IMAGERY.numberOfRows"),
    (STANAG_4545, "NCOLS", "NSIL_IMAGERY.numberOfCols"),
    (STANAG_4545, "IID2", "NSIL_IMAGERY.title"),
    (NSIL_CORE, "IID2", "NSIL_IMAGERY.title"),
    (STANAG_4545, "OSTAID", "NSIL_RELATED_FILE.creator"),
    (NSIL_CORE, "OSTAID", "NSIL_RELATED_FILE.creator"),
    (STANAG_4545, "FL", "NSIL_RELATED_FILE.extent"),
    (NSIL_CORE, "FL", "NSIL_RELATED_FILE.extent"),
    (STANAG_4545, "ISCLAS", "NSIL_SECURITY.classification"),
    (NSIL_CORE, "PSCLAS", "NSIL_SECURITY.classification"),
    (STANAG_4607, "/GMTI/PacketHeader/Security/Classification", "NSIL_SECURITY.classification"),
    (STANAG_4609, "SecurityClassification", "NSIL_SECURITY.classification"),
    (STANAG_4545, "ISCLSY", "NSIL_SECURITY.policy"),
    (NSIL_CORE, "PSCLSY", "NSIL_SECURITY.policy"),
    (STANAG_4607, "/GMTI/PacketHeader/Security/ClassificationSystem", "NSIL_SECURITY.policy"),
    (STANAG_4545, "ISREL", "NSIL_SECURITY.releasability"),
    (NSIL_CORE, "PSREL", "NSIL_SECURITY.releasability"),
    (STANAG_4609, "ReleasingInstructions", "NSIL_SECURITY.releasability"),
    (STANAG_4545, "OSTAID", "NSIL_STREAM.creator"),
    (NSIL_CORE, "OSTAID", "NSIL_STREAM.creator"),
    (STANAG_4545, "FDT", "NSIL_STREAM.dateTimeDeclared"),
    (NSIL_CORE, "FDT", "NSIL_STREAM.dateTimeDeclared"),
    (STANAG_4607, "/GMTI/PacketHeader/VersionID", "NSIL_STREAM.standardVersion"),
    (STANAG_5516, "TRACK NUMBER REFERENCE", "NSIL_TDL.trackNumber"),
    (NACT_L16, "/HJ1/MessageNumber", "NSIL_TDL.messageNumber"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_registration_order() {
        assert_eq!(EntityType::Product.id(), 0);
        assert_eq!(EntityType::Cbrn.id(), 29);
    }

    #[test]
    fn test_every_view_edge_endpoint_is_a_view_node() {
        for spec in VIEW_SPECS {
            for edge in spec.edges {
                assert!(spec.nodes.contains(&edge.parent), "{}: {:?}", spec.name, edge);
                assert!(spec.nodes.contains(&edge.child), "{}: {:?}", spec.name, edge);
            }
        }
    }

    #[test]
    fn test_single_part_views_cap_part_cardinality() {
        for name in [NSIL_GMTI_VIEW, NSIL_MESSAGE_VIEW, NSIL_VIDEO_VIEW, NSIL_CBRN_VIEW] {
            let spec = VIEW_SPECS.iter().find(|s| s.name == name).unwrap();
            let part = spec
                .edges
                .iter()
                .find(|e| e.parent == EntityType::Product && e.child == EntityType::Part)
                .unwrap();
            assert!(part.forward.at_most_one_child());
        }
    }
}
