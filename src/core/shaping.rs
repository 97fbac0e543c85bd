//! Field projection: shaping objects down to a requested field subset
//!
//! Clients pass `?fields=id,name` to receive only those properties. The
//! projector resolves the requested names once against the target type's
//! declared field table, then applies the resolved descriptors to each
//! object, so the per-object cost does not include name resolution.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::error::ShapingError;
use crate::core::field::{FieldAccess, FieldValue};
use crate::core::hypermedia::ResourceLink;

/// A dynamically-shaped record: an ordered field-name → value map
///
/// Field order follows the declared order (full projection) or the resolved
/// request order (subset). When the hypermedia representation decorates a
/// record, its links serialize as a trailing `links` entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapedRecord {
    fields: IndexMap<String, FieldValue>,
    links: Vec<ResourceLink>,
}

impl ShapedRecord {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Number of data fields, not counting the links decoration
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in serialization order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Decorate the record with hypermedia links
    pub fn add_links(&mut self, links: Vec<ResourceLink>) {
        self.links.extend(links);
    }

    pub fn links(&self) -> &[ResourceLink] {
        &self.links
    }
}

impl Serialize for ShapedRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let extra = usize::from(!self.links.is_empty());
        let mut map = serializer.serialize_map(Some(self.fields.len() + extra))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        if !self.links.is_empty() {
            map.serialize_entry("links", &self.links)?;
        }
        map.end()
    }
}

/// Resolve a requested field list against `T`'s declared fields
///
/// An empty or absent list means every declared field, in declared order.
/// Otherwise the list is split on `,`, trimmed, and matched
/// case-insensitively; the resolved names keep the declared casing. Any
/// unresolvable name fails the whole request.
pub fn resolve_fields<T: FieldAccess>(
    fields: Option<&str>,
) -> Result<Vec<&'static str>, ShapingError> {
    let requested = fields.unwrap_or("").trim();
    if requested.is_empty() {
        return Ok(T::field_names().to_vec());
    }

    let mut resolved = Vec::new();
    for field in requested.split(',') {
        let name = field.trim();
        let declared = T::field_names()
            .iter()
            .find(|declared| declared.eq_ignore_ascii_case(name))
            .ok_or_else(|| ShapingError::UnknownField {
                field: name.to_string(),
                type_name: T::type_name().to_string(),
            })?;
        resolved.push(*declared);
    }

    Ok(resolved)
}

/// Boolean form of field validation, for callers that reject up front
pub fn type_has_fields<T: FieldAccess>(fields: Option<&str>) -> bool {
    resolve_fields::<T>(fields).is_ok()
}

/// Shape a single object down to the requested fields
pub fn shape_one<T: FieldAccess>(
    value: &T,
    fields: Option<&str>,
) -> Result<ShapedRecord, ShapingError> {
    let resolved = resolve_fields::<T>(fields)?;
    Ok(shape_with(value, &resolved))
}

/// Shape a sequence of objects, preserving input order
///
/// Field names are resolved once for the whole sequence; an unknown field
/// fails before any record is produced.
pub fn shape_many<T: FieldAccess>(
    values: &[T],
    fields: Option<&str>,
) -> Result<Vec<ShapedRecord>, ShapingError> {
    let resolved = resolve_fields::<T>(fields)?;
    Ok(values
        .iter()
        .map(|value| shape_with(value, &resolved))
        .collect())
}

fn shape_with<T: FieldAccess>(value: &T, resolved: &[&'static str]) -> ShapedRecord {
    let mut fields = IndexMap::with_capacity(resolved.len());
    for name in resolved {
        let field_value = value.field_value(name).unwrap_or(FieldValue::Null);
        fields.insert((*name).to_string(), field_value);
    }
    ShapedRecord {
        fields,
        links: Vec::new(),
    }
}
