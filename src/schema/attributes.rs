//! Per-entity attribute catalogs.
//!
//! One function per entity type, each returning the fixed catalog for that
//! type. Names are the full `ENTITY.field` paths so mandatory maps and view
//! unions can be derived without extra bookkeeping.

use serde::Serialize;

use crate::schema::entities as names;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttrType {
    Text,
    Integer,
    Float,
    Boolean,
    DateTime,
    Geometry,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Domain {
    Text { max_len: u32 },
    List(&'static [&'static str]),
    IntRange { min: i64, max: i64 },
    FloatRange { min: f64, max: f64 },
    DateRange,
    GeographicBox,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RequirementMode {
    Mandatory,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeInformation {
    /// Full `ENTITY.field` path.
    pub name: String,
    pub attr_type: AttrType,
    pub domain: Domain,
    pub mode: RequirementMode,
    pub sortable: bool,
    pub updatable: bool,
}

impl AttributeInformation {
    pub fn entity(&self) -> &str {
        self.name.split('.').next().unwrap_or("")
    }

    pub fn field(&self) -> &str {
        self.name.split('.').nth(1).unwrap_or("")
    }
}

fn attr(
    entity: &str,
    field: &str,
    attr_type: AttrType,
    domain: Domain,
    mode: RequirementMode,
    sortable: bool,
    updatable: bool,
) -> AttributeInformation {
    AttributeInformation {
        name: format!("{entity}.{field}"),
        attr_type,
        domain,
        mode,
        sortable,
        updatable,
    }
}

use AttrType::{Boolean, DateTime, Float, Geometry, Integer, Text};
use RequirementMode::{Mandatory, Optional};

const POSITIVE_INT: Domain = Domain::IntRange { min: 0, max: i64::MAX };
const PERCENT: Domain = Domain::IntRange { min: 0, max: 100 };
const MAX_STANAG_FLOAT: Domain = Domain::FloatRange { min: 0.0, max: 3.0e38 };

const CARD_STATUS: &[&str] = &["NEW", "CHANGED", "OBSOLETE"];
const CLASSIFICATIONS: &[&str] =
    &["COSMIC TOP SECRET", "SECRET", "CONFIDENTIAL", "RESTRICTED", "UNCLASSIFIED"];
const PRODUCT_TYPES: &[&str] = &[
    "CBRN",
    "COLLECTION/EXPLOITATION PLAN",
    "DOCUMENT",
    "ELECTRONIC ORDER OF BATTLE",
    "GEOGRAPHIC AREA OF INTEREST",
    "GMTI",
    "IMAGERY",
    "INTELLIGENCE REQUIREMENT",
    "MESSAGE",
    "OPERATIONAL ROLES",
    "ORBAT",
    "REPORT",
    "RFI",
    "SYSTEM ASSIGNMENTS",
    "SYSTEM DEPLOYMENT STATUS",
    "SYSTEM SPECIFICATIONS",
    "TACTICAL SYMBOL",
    "TASK",
    "TDL DATA",
    "VIDEO",
];
const IMAGERY_CATEGORIES: &[&str] =
    &["VIS", "SL", "TI", "FL", "RD", "EO", "OP", "HR", "HS", "CP", "BP", "SAR", "SARIQ", "IR", "MS", "FP", "MRI", "XRAY", "CAT", "VD", "PAT", "LEG", "DTEM", "MATR", "LOCG"];
const DECOMPRESSION_TECHNIQUES: &[&str] = &["NC", "NM", "C1", "M1", "I1", "C3", "M3", "C4", "M4", "C5", "M5", "C8", "M8"];
const MESSAGE_TYPES: &[&str] = &["XMPP"];
const VIDEO_CATEGORIES: &[&str] = &["VIS", "IR", "MP", "HC", "HRVIS", "HRIR", "HRMP"];
const VIDEO_ENCODING_SCHEMES: &[&str] =
    &["264ON2", "MPEG-2", "H.264", "H.265", "V1", "V2", "V3", "V4", "V5", "V6"];
const METADATA_ENCODING_SCHEMES: &[&str] = &["KLV", "XML"];
const SCANNING_MODES: &[&str] = &["INTERLACE", "PROGRESSIVE"];
const STREAM_STANDARDS: &[&str] = &["STANAG 4609", "STANAG 4607", "STANAG 4545", "NITF", "RTP"];
const APPROVAL_STATUSES: &[&str] = &["NOT APPLICABLE", "PENDING REVIEW", "APPROVED", "NOT APPROVED"];
const SUBJ_QUALITY_CODES: &[&str] = &["EXCELLENT", "FAIR", "GOOD", "POOR"];
const SDS_OP_STATUSES: &[&str] = &["OPERATIONAL", "NON OPERATIONAL", "EXERCISE"];
const TDL_MESSAGE_NUMBERS: &[&str] = &[
    "J2.2", "J2.5", "J3.0", "J3.2", "J3.3", "J3.5", "J3.7", "J7.0", "J7.1", "J7.2", "J14.0",
    "J14.2",
];
const RFI_STATUSES: &[&str] = &["APPROVED", "IN PROGRESS", "FULFILLED", "REJECTED"];
const RFI_WORKFLOW_STATUSES: &[&str] =
    &["NEW", "ACCEPTED", "DENIED", "CANCELLED", "COMPLETED"];
const CXP_STATUSES: &[&str] = &["CURRENT", "SUPERSEDED", "EXPIRED"];
const REPORT_PRIORITIES: &[&str] = &["FLASH", "IMMEDIATE", "PRIORITY", "ROUTINE"];
const REPORT_TYPES: &[&str] = &["MTIEXREP", "IMINTREP", "IMINTSUM", "RECCEXREP", "WLR", "ISRSPOTREP", "INTREP", "INTSUM", "HUMINTREP", "PENTAGRAM"];
const TASK_STATUSES: &[&str] = &["PLANNED", "ACKNOWLEDGED", "ONGOING", "ACCOMPLISHED", "INTERRUPTED", "INFEASIBLE", "CANCELLED"];
const RELATIONSHIPS: &[&str] = &[
    "HAS PART",
    "IS VERSION OF",
    "REPLACES",
    "IS SUPPORT DATA TO",
    "ORIGINATING FROM",
    "FOLLOWS",
];
const CBRN_EVENT_TYPES: &[&str] = &["CHEMICAL", "BIOLOGICAL", "RADIOLOGICAL", "NUCLEAR", "NOT KNOWN"];
const CBRN_ALARM_CLASSIFICATIONS: &[&str] =
    &["ABOVE THRESHOLD", "BELOW THRESHOLD", "FALSE ALARM"];
const SITUATION_TYPES: &[&str] = &["GENERAL", "MILITARY", "OTHER"];

pub fn card_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_CARD;
    vec![
        attr(e, "identifier", Text, Domain::Text { max_len: 50 }, Mandatory, true, false),
        attr(e, "sourceDateTimeModified", DateTime, Domain::DateRange, Optional, true, false),
        attr(e, "dateTimeModified", DateTime, Domain::DateRange, Mandatory, true, false),
        attr(e, "status", Text, Domain::List(CARD_STATUS), Mandatory, true, false),
        attr(e, "numberOfParts", Integer, Domain::IntRange { min: 0, max: 99_999 }, Optional, true, false),
        attr(e, "publisher", Text, Domain::Text { max_len: 30 }, Optional, true, true),
        attr(e, "sourceLibrary", Text, Domain::Text { max_len: 30 }, Optional, true, false),
    ]
}

pub fn common_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_COMMON;
    vec![
        attr(e, "descriptionAbstract", Text, Domain::Text { max_len: 800 }, Optional, false, true),
        attr(e, "identifierMission", Text, Domain::Text { max_len: 40 }, Optional, false, true),
        attr(e, "identifierUUID", Text, Domain::Text { max_len: 36 }, Mandatory, false, true),
        attr(e, "identifierJC3IEDM", Integer, POSITIVE_INT, Optional, false, true),
        attr(e, "language", Text, Domain::Text { max_len: 12 }, Optional, false, true),
        attr(e, "source", Text, Domain::Text { max_len: 200 }, Optional, false, true),
        attr(e, "subjectCategoryTarget", Text, Domain::Text { max_len: 50 }, Optional, false, true),
        attr(e, "targetNumber", Text, Domain::Text { max_len: 159 }, Optional, false, true),
        attr(e, "type", Text, Domain::List(PRODUCT_TYPES), Mandatory, false, true),
    ]
}

pub fn coverage_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_COVERAGE;
    vec![
        attr(e, "spatialCountryCode", Text, Domain::Text { max_len: 60 }, Optional, true, true),
        attr(e, "spatialGeographicReferenceBox", Geometry, Domain::GeographicBox, Optional, true, true),
        attr(e, "advancedGeoSpatial", Geometry, Domain::GeographicBox, Optional, false, true),
        attr(e, "temporalEnd", DateTime, Domain::DateRange, Optional, true, true),
        attr(e, "temporalStart", DateTime, Domain::DateRange, Optional, true, true),
    ]
}

pub fn file_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_FILE;
    vec![
        attr(e, "archived", Boolean, Domain::Boolean, Optional, false, true),
        attr(e, "archiveInformation", Text, Domain::Text { max_len: 100 }, Optional, false, true),
        attr(e, "creator", Text, Domain::Text { max_len: 30 }, Optional, true, true),
        attr(e, "dateTimeDeclared", DateTime, Domain::DateRange, Optional, true, true),
        attr(e, "extent", Float, MAX_STANAG_FLOAT, Optional, true, true),
        attr(e, "format", Text, Domain::Text { max_len: 50 }, Optional, true, true),
        attr(e, "formatVersion", Text, Domain::Text { max_len: 10 }, Optional, true, true),
        attr(e, "productURL", Text, Domain::Text { max_len: 500 }, Optional, false, true),
        attr(e, "title", Text, Domain::Text { max_len: 200 }, Optional, true, true),
        attr(e, "isProductLocal", Boolean, Domain::Boolean, Optional, true, false),
    ]
}

pub fn gmti_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_GMTI;
    vec![
        attr(e, "identifierJob", Float, MAX_STANAG_FLOAT, Mandatory, true, true),
        attr(e, "numberOfTargetReports", Integer, POSITIVE_INT, Mandatory, true, true),
    ]
}

pub fn imagery_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_IMAGERY;
    vec![
        attr(e, "category", Text, Domain::List(IMAGERY_CATEGORIES), Mandatory, true, true),
        attr(e, "cloudCoverPct", Integer, PERCENT, Optional, true, true),
        attr(e, "comments", Text, Domain::Text { max_len: 2000 }, Optional, false, true),
        attr(e, "decompressionTechnique", Text, Domain::List(DECOMPRESSION_TECHNIQUES), Mandatory, true, true),
        attr(e, "identifier", Text, Domain::Text { max_len: 80 }, Mandatory, true, true),
        attr(e, "NIIRS", Integer, Domain::IntRange { min: 0, max: 9 }, Optional, true, true),
        attr(e, "numberOfBands", Integer, POSITIVE_INT, Mandatory, true, true),
        attr(e, "numberOfRows", Integer, POSITIVE_INT, Optional, true, true),
        attr(e, "numberOfCols", Integer, POSITIVE_INT, Optional, true, true),
        attr(e, "title", Text, Domain::Text { max_len: 200 }, Optional, true, true),
    ]
}

pub fn message_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_MESSAGE;
    vec![
        attr(e, "recipient", Text, Domain::Text { max_len: 200 }, Mandatory, true, true),
        attr(e, "subject", Text, Domain::Text { max_len: 100 }, Optional, true, true),
        attr(e, "messageBody", Text, Domain::Text { max_len: 1000 }, Mandatory, false, true),
        attr(e, "messageType", Text, Domain::List(MESSAGE_TYPES), Mandatory, true, true),
    ]
}

pub fn metadata_security_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_METADATA_SECURITY;
    vec![
        attr(e, "classification", Text, Domain::List(CLASSIFICATIONS), Mandatory, true, true),
        attr(e, "policy", Text, Domain::Text { max_len: 20 }, Mandatory, true, true),
        attr(e, "releasability", Text, Domain::Text { max_len: 200 }, Mandatory, true, true),
    ]
}

pub fn part_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_PART;
    vec![attr(e, "partIdentifier", Text, Domain::Text { max_len: 20 }, Mandatory, true, false)]
}

pub fn related_file_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_RELATED_FILE;
    vec![
        attr(e, "creator", Text, Domain::Text { max_len: 30 }, Mandatory, true, true),
        attr(e, "dateTimeDeclared", DateTime, Domain::DateRange, Mandatory, true, true),
        attr(e, "extent", Float, MAX_STANAG_FLOAT, Optional, true, true),
        attr(e, "fileType", Text, Domain::Text { max_len: 50 }, Optional, true, true),
        attr(e, "URL", Text, Domain::Text { max_len: 500 }, Optional, false, true),
        attr(e, "isFileLocal", Boolean, Domain::Boolean, Optional, true, false),
    ]
}

pub fn relation_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_RELATION;
    vec![
        attr(e, "amplification", Text, Domain::Text { max_len: 200 }, Optional, false, true),
        attr(e, "contributor", Text, Domain::Text { max_len: 30 }, Optional, true, true),
        attr(e, "dateTimeDeclared", DateTime, Domain::DateRange, Optional, true, true),
        attr(e, "description", Text, Domain::Text { max_len: 200 }, Optional, false, true),
        attr(e, "relationship", Text, Domain::List(RELATIONSHIPS), Optional, true, true),
    ]
}

pub fn security_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_SECURITY;
    vec![
        attr(e, "classification", Text, Domain::List(CLASSIFICATIONS), Mandatory, true, true),
        attr(e, "policy", Text, Domain::Text { max_len: 20 }, Mandatory, true, true),
        attr(e, "releasability", Text, Domain::Text { max_len: 200 }, Mandatory, true, true),
    ]
}

pub fn stream_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_STREAM;
    vec![
        attr(e, "archived", Boolean, Domain::Boolean, Optional, false, true),
        attr(e, "archiveInformation", Text, Domain::Text { max_len: 100 }, Optional, false, true),
        attr(e, "creator", Text, Domain::Text { max_len: 30 }, Optional, true, true),
        attr(e, "dateTimeDeclared", DateTime, Domain::DateRange, Mandatory, true, true),
        attr(e, "standard", Text, Domain::List(STREAM_STANDARDS), Optional, true, true),
        attr(e, "standardVersion", Text, Domain::Text { max_len: 10 }, Optional, true, true),
        attr(e, "sourceURL", Text, Domain::Text { max_len: 500 }, Optional, false, true),
        attr(e, "programID", Integer, POSITIVE_INT, Optional, true, true),
    ]
}

pub fn video_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_VIDEO;
    vec![
        attr(e, "avgBitRate", Float, MAX_STANAG_FLOAT, Optional, true, true),
        attr(e, "category", Text, Domain::List(VIDEO_CATEGORIES), Mandatory, true, true),
        attr(e, "encodingScheme", Text, Domain::List(VIDEO_ENCODING_SCHEMES), Mandatory, true, true),
        attr(e, "frameRate", Float, MAX_STANAG_FLOAT, Optional, true, true),
        attr(e, "numberOfRows", Integer, POSITIVE_INT, Optional, true, true),
        attr(e, "numberOfCols", Integer, POSITIVE_INT, Optional, true, true),
        attr(e, "metadataEncodingScheme", Text, Domain::List(METADATA_ENCODING_SCHEMES), Optional, true, true),
        attr(e, "MISMLevel", Integer, Domain::IntRange { min: 0, max: 12 }, Optional, true, true),
        attr(e, "scanningMode", Text, Domain::List(SCANNING_MODES), Optional, true, true),
    ]
}

pub fn approval_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_APPROVAL;
    vec![
        attr(e, "approvedBy", Text, Domain::Text { max_len: 200 }, Optional, true, true),
        attr(e, "dateTimeModified", DateTime, Domain::DateRange, Optional, true, true),
        attr(e, "status", Text, Domain::List(APPROVAL_STATUSES), Optional, true, true),
    ]
}

pub fn exploitation_info_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_EXPLOITATION_INFO;
    vec![
        attr(e, "description", Text, Domain::Text { max_len: 400 }, Optional, false, true),
        attr(e, "level", Integer, Domain::IntRange { min: 0, max: 9 }, Optional, true, true),
        attr(e, "autoGenerated", Boolean, Domain::Boolean, Optional, true, true),
        attr(e, "subjectiveQualityCode", Text, Domain::List(SUBJ_QUALITY_CODES), Optional, true, true),
    ]
}

pub fn sds_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_SDS;
    vec![attr(e, "operationalStatus", Text, Domain::List(SDS_OP_STATUSES), Mandatory, true, true)]
}

pub fn tdl_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_TDL;
    vec![
        attr(e, "activity", Integer, Domain::IntRange { min: 0, max: 127 }, Optional, true, true),
        attr(e, "messageNumber", Text, Domain::List(TDL_MESSAGE_NUMBERS), Mandatory, true, true),
        attr(e, "platform", Integer, Domain::IntRange { min: 0, max: 63 }, Optional, true, true),
        attr(e, "trackNumber", Text, Domain::Text { max_len: 10 }, Optional, true, true),
    ]
}

pub fn rfi_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_RFI;
    vec![
        attr(e, "forAction", Text, Domain::Text { max_len: 50 }, Optional, true, true),
        attr(e, "forInformation", Text, Domain::Text { max_len: 200 }, Optional, true, true),
        attr(e, "serialNumber", Text, Domain::Text { max_len: 30 }, Mandatory, true, true),
        attr(e, "status", Text, Domain::List(RFI_STATUSES), Mandatory, true, true),
        attr(e, "workflowStatus", Text, Domain::List(RFI_WORKFLOW_STATUSES), Mandatory, true, true),
    ]
}

pub fn cxp_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_CXP;
    vec![attr(e, "status", Text, Domain::List(CXP_STATUSES), Optional, true, true)]
}

pub fn report_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_REPORT;
    vec![
        attr(e, "originatorsRequestSerialNumber", Text, Domain::Text { max_len: 30 }, Optional, true, true),
        attr(e, "priority", Text, Domain::List(REPORT_PRIORITIES), Mandatory, true, true),
        attr(e, "type", Text, Domain::List(REPORT_TYPES), Optional, true, true),
    ]
}

pub fn task_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_TASK;
    vec![
        attr(e, "comments", Text, Domain::Text { max_len: 255 }, Optional, false, true),
        attr(e, "status", Text, Domain::List(TASK_STATUSES), Mandatory, true, true),
    ]
}

pub fn cbrn_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_CBRN;
    vec![
        attr(e, "operationName", Text, Domain::Text { max_len: 50 }, Optional, true, true),
        attr(e, "incidentNumber", Text, Domain::Text { max_len: 30 }, Optional, true, true),
        attr(e, "eventType", Text, Domain::List(CBRN_EVENT_TYPES), Optional, true, true),
        attr(e, "cbrnCategory", Text, Domain::Text { max_len: 30 }, Optional, true, true),
        attr(e, "substance", Text, Domain::Text { max_len: 7 }, Optional, true, true),
        attr(e, "alarmClassification", Text, Domain::List(CBRN_ALARM_CLASSIFICATIONS), Optional, true, true),
    ]
}

pub fn entity_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_ENTITY;
    vec![
        attr(e, "name", Text, Domain::Text { max_len: 100 }, Optional, true, true),
        attr(e, "alias", Text, Domain::Text { max_len: 100 }, Optional, true, true),
    ]
}

pub fn intrep_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_INTREP;
    vec![attr(e, "situationType", Text, Domain::List(SITUATION_TYPES), Optional, true, true)]
}

pub fn intsum_attributes() -> Vec<AttributeInformation> {
    let e = names::NSIL_INTSUM;
    vec![
        attr(e, "areaAssessment", Text, Domain::Text { max_len: 800 }, Optional, false, true),
        attr(e, "generalAssessment", Text, Domain::Text { max_len: 800 }, Optional, false, true),
    ]
}

/// Catalog for the given entity. Product, source, destination, and
/// association carry no direct attributes, so unknown names and those types
/// both yield an empty catalog.
pub fn attributes_for(entity_name: &str) -> Vec<AttributeInformation> {
    match entity_name {
        names::NSIL_CARD => card_attributes(),
        names::NSIL_COMMON => common_attributes(),
        names::NSIL_COVERAGE => coverage_attributes(),
        names::NSIL_FILE => file_attributes(),
        names::NSIL_GMTI => gmti_attributes(),
        names::NSIL_IMAGERY => imagery_attributes(),
        names::NSIL_MESSAGE => message_attributes(),
        names::NSIL_METADATA_SECURITY => metadata_security_attributes(),
        names::NSIL_PART => part_attributes(),
        names::NSIL_RELATED_FILE => related_file_attributes(),
        names::NSIL_RELATION => relation_attributes(),
        names::NSIL_SECURITY => security_attributes(),
        names::NSIL_STREAM => stream_attributes(),
        names::NSIL_VIDEO => video_attributes(),
        names::NSIL_APPROVAL => approval_attributes(),
        names::NSIL_EXPLOITATION_INFO => exploitation_info_attributes(),
        names::NSIL_SDS => sds_attributes(),
        names::NSIL_TDL => tdl_attributes(),
        names::NSIL_RFI => rfi_attributes(),
        names::NSIL_CXP => cxp_attributes(),
        names::NSIL_REPORT => report_attributes(),
        names::NSIL_TASK => task_attributes(),
        names::NSIL_CBRN => cbrn_attributes(),
        names::NSIL_ENTITY => entity_attributes(),
        names::NSIL_INTREP => intrep_attributes(),
        names::NSIL_INTSUM => intsum_attributes(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_entity_prefixed() {
        for info in attributes_for(names::NSIL_CARD) {
            assert_eq!(info.entity(), "NSIL_CARD");
            assert!(!info.field().is_empty());
        }
    }

    #[test]
    fn test_card_mandatory_set() {
        let mandatory: Vec<String> = card_attributes()
            .into_iter()
            .filter(|a| a.mode == RequirementMode::Mandatory)
            .map(|a| a.name)
            .collect();
        assert_eq!(
            mandatory,
            vec!["NSIL_CARD.identifier", "NSIL_CARD.dateTimeModified", "NSIL_CARD.status"]
        );
    }

    #[test]
    fn test_leaf_entities_have_no_attributes() {
        assert!(attributes_for(names::NSIL_PRODUCT).is_empty());
        assert!(attributes_for(names::NSIL_SOURCE).is_empty());
        assert!(attributes_for("NO_SUCH_ENTITY").is_empty());
    }
}
