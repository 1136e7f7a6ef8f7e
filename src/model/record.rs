//! Flat catalog record: the marshaller's input and output surface.

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::Value;

/// A flat product record. Attribute keys are `ENTITY.field` pairs, e.g.
/// `NSIL_COMMON.identifierUUID`; the built-in fields below carry the card
/// bookkeeping that is never stored as a plain attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub source_id: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub deleted: bool,
    pub attrs: HashMap<String, Value>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Default::default() }
    }

    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = Some(source_id.into());
        self
    }

    pub fn with_created(mut self, at: DateTime<Utc>) -> Self {
        self.created = Some(at);
        self
    }

    pub fn with_modified(mut self, at: DateTime<Utc>) -> Self {
        self.modified = Some(at);
        self
    }

    pub fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// Non-null attributes whose key sits under the given entity prefix,
    /// e.g. `entity_attrs("NSIL_COMMON")` yields every `NSIL_COMMON.*` pair.
    pub fn entity_attrs<'a>(
        &'a self,
        entity: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        self.attrs.iter().filter_map(move |(k, v)| {
            let field = k.strip_prefix(entity)?.strip_prefix('.')?;
            if v.is_null() { None } else { Some((field, v)) }
        })
    }
}
