//! Sort-key mapping and order-by translation
//!
//! Public field names on a DTO do not necessarily match the fields the
//! storage layer can sort on: `name` sorts by `first_name` then `last_name`,
//! `age` sorts by `date_of_birth` with the direction flipped. A
//! [`PropertyMap`] records this indirection per (source, destination) type
//! pair, and [`translate`] turns a client `orderBy` expression into the
//! ordered [`SortClause`] list the repository applies before paginating.

use std::any::{TypeId, type_name};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::{ConfigError, SortError};
use crate::core::field::{FieldAccess, FieldValue};

/// Mapping of one public field to one or more storage fields
///
/// The destination order matters: composite keys sort by the first
/// destination and break ties with the next. `reverse` flips the effective
/// direction of every destination emitted from this mapping.
#[derive(Debug, Clone)]
pub struct PropertyMappingValue {
    destinations: Vec<&'static str>,
    reverse: bool,
}

impl PropertyMappingValue {
    pub fn new(destinations: Vec<&'static str>) -> Self {
        debug_assert!(!destinations.is_empty());
        Self {
            destinations,
            reverse: false,
        }
    }

    pub fn reversed(destinations: Vec<&'static str>) -> Self {
        debug_assert!(!destinations.is_empty());
        Self {
            destinations,
            reverse: true,
        }
    }

    pub fn destinations(&self) -> &[&'static str] {
        &self.destinations
    }

    pub fn is_reversed(&self) -> bool {
        self.reverse
    }
}

/// Case-insensitive map from public field name to [`PropertyMappingValue`]
///
/// Built once at startup for a (DTO, entity) pair and read concurrently
/// afterwards; never mutated.
#[derive(Debug, Clone, Default)]
pub struct PropertyMap {
    entries: HashMap<String, PropertyMappingValue>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a public field; the name is matched case-insensitively
    pub fn with(mut self, source: &str, mapping: PropertyMappingValue) -> Self {
        self.entries.insert(source.to_lowercase(), mapping);
        self
    }

    /// Look up the mapping for a public field name
    pub fn resolve(&self, field: &str) -> Option<&PropertyMappingValue> {
        self.entries.get(&field.to_lowercase())
    }

    /// Check that every clause of an order-by expression resolves
    ///
    /// Splits on `,`, trims, and cuts each clause at its first space before
    /// the lookup, so trailing direction tokens are ignored. Returns `false`
    /// on the first unresolvable name; callers turn that into a client
    /// rejection.
    pub fn validates(&self, order_by: &str) -> bool {
        if order_by.trim().is_empty() {
            return true;
        }

        for clause in order_by.split(',') {
            let trimmed = clause.trim();
            let name = match trimmed.find(' ') {
                Some(index) => &trimmed[..index],
                None => trimmed,
            };
            if self.resolve(name).is_none() {
                return false;
            }
        }

        true
    }
}

/// One storage-level sort instruction
#[derive(Debug, Clone, PartialEq)]
pub struct SortClause {
    pub field: &'static str,
    pub descending: bool,
}

/// Translate a client order-by expression into storage sort clauses
///
/// The parsing rule is deliberately literal-minded and is relied on by
/// existing clients: a clause is descending iff it ends with the exact
/// string `" desc"`, the field name is the prefix before the first space,
/// and anything after the name that is not that literal is ignored.
pub fn translate(order_by: &str, map: &PropertyMap) -> Result<Vec<SortClause>, SortError> {
    if order_by.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut clauses = Vec::new();

    for clause in order_by.split(',') {
        let trimmed = clause.trim();
        let descending = trimmed.ends_with(" desc");
        let name = match trimmed.find(' ') {
            Some(index) => &trimmed[..index],
            None => trimmed,
        };

        let mapping = map.resolve(name).ok_or_else(|| SortError::UnmappedField {
            field: name.to_string(),
        })?;

        for destination in mapping.destinations() {
            let effective = if mapping.is_reversed() {
                !descending
            } else {
                descending
            };
            clauses.push(SortClause {
                field: destination,
                descending: effective,
            });
        }
    }

    Ok(clauses)
}

/// Re-order a sequence by the given clauses
///
/// A single stable multi-key comparison: the first clause is the primary
/// key, later clauses only break ties. The input is left untouched.
pub fn apply_sort<T>(items: &[T], clauses: &[SortClause]) -> Vec<T>
where
    T: FieldAccess + Clone,
{
    let mut sorted: Vec<T> = items.to_vec();
    if clauses.is_empty() {
        return sorted;
    }

    sorted.sort_by(|a, b| {
        for clause in clauses {
            let left = a.field_value(clause.field).unwrap_or(FieldValue::Null);
            let right = b.field_value(clause.field).unwrap_or(FieldValue::Null);
            let ordering = if clause.descending {
                left.compare(&right).reverse()
            } else {
                left.compare(&right)
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });

    sorted
}

/// Process-wide registry of property maps, keyed by (source, destination)
/// type pair
///
/// Built once in `main` and shared read-only behind an `Arc`; a missing
/// entry at request time is a wiring bug, surfaced as a configuration
/// error, not a client error.
#[derive(Debug, Default)]
pub struct PropertyMapRegistry {
    maps: HashMap<(TypeId, TypeId), Arc<PropertyMap>>,
}

impl PropertyMapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<S: 'static, D: 'static>(&mut self, map: PropertyMap) {
        self.maps
            .insert((TypeId::of::<S>(), TypeId::of::<D>()), Arc::new(map));
    }

    pub fn get<S: 'static, D: 'static>(&self) -> Result<&PropertyMap, ConfigError> {
        self.maps
            .get(&(TypeId::of::<S>(), TypeId::of::<D>()))
            .map(|map| map.as_ref())
            .ok_or(ConfigError::MissingPropertyMap {
                source: type_name::<S>(),
                destination: type_name::<D>(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Debug, Clone)]
    struct Person {
        first_name: &'static str,
        last_name: &'static str,
        born: NaiveDate,
    }

    impl Person {
        fn new(first_name: &'static str, last_name: &'static str, year: i32) -> Self {
            Self {
                first_name,
                last_name,
                born: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
            }
        }
    }

    impl FieldAccess for Person {
        fn type_name() -> &'static str {
            "Person"
        }

        fn field_names() -> &'static [&'static str] {
            &["first_name", "last_name", "born"]
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "first_name" => Some(FieldValue::String(self.first_name.to_string())),
                "last_name" => Some(FieldValue::String(self.last_name.to_string())),
                "born" => Some(FieldValue::Date(self.born)),
                _ => None,
            }
        }
    }

    fn person_map() -> PropertyMap {
        PropertyMap::new()
            .with(
                "name",
                PropertyMappingValue::new(vec!["first_name", "last_name"]),
            )
            .with("age", PropertyMappingValue::reversed(vec!["born"]))
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let map = person_map();
        assert!(map.resolve("Name").is_some());
        assert!(map.resolve("NAME").is_some());
        assert!(map.resolve("aGe").is_some());
        assert!(map.resolve("publisher").is_none());
    }

    #[test]
    fn test_validates_strips_direction_tokens() {
        let map = person_map();
        assert!(map.validates("name desc"));
        assert!(map.validates("Name asc, age desc"));
        assert!(map.validates(""));
        assert!(map.validates("   "));
        assert!(!map.validates("name, publisher desc"));
    }

    #[test]
    fn test_translate_expands_composite_key_in_order() {
        let clauses = translate("name", &person_map()).expect("should translate");
        assert_eq!(
            clauses,
            vec![
                SortClause {
                    field: "first_name",
                    descending: false
                },
                SortClause {
                    field: "last_name",
                    descending: false
                },
            ]
        );
    }

    #[test]
    fn test_translate_reversal_inverts_every_destination() {
        // "age" maps to born with the reversal flag: asking for descending
        // age means ascending birth date, and vice versa.
        let clauses = translate("age desc", &person_map()).expect("should translate");
        assert_eq!(
            clauses,
            vec![SortClause {
                field: "born",
                descending: false
            }]
        );

        let clauses = translate("age", &person_map()).expect("should translate");
        assert!(clauses[0].descending);
    }

    #[test]
    fn test_translate_desc_literal_is_exact() {
        // Only a trailing " desc" flips the direction; " DESC" or extra
        // tokens after it do not.
        let clauses = translate("name DESC", &person_map()).expect("should translate");
        assert!(!clauses[0].descending);

        let clauses = translate("name desc asc", &person_map()).expect("should translate");
        assert!(!clauses[0].descending);
        assert_eq!(clauses[0].field, "first_name");
    }

    #[test]
    fn test_translate_unmapped_field_fails() {
        let err = translate("publisher desc", &person_map()).unwrap_err();
        assert_eq!(
            err,
            SortError::UnmappedField {
                field: "publisher".to_string()
            }
        );
    }

    #[test]
    fn test_translate_empty_expression_is_noop() {
        assert!(translate("", &person_map()).expect("ok").is_empty());
        assert!(translate("  ", &person_map()).expect("ok").is_empty());
    }

    #[test]
    fn test_apply_sort_composite_primary_then_tiebreak() {
        let people = vec![
            Person::new("Mary", "Shelley", 1797),
            Person::new("John", "Tolkien", 1892),
            Person::new("John", "Irving", 1942),
        ];
        let clauses = translate("name", &person_map()).expect("should translate");
        let sorted = apply_sort(&people, &clauses);

        let names: Vec<_> = sorted
            .iter()
            .map(|p| (p.first_name, p.last_name))
            .collect();
        assert_eq!(
            names,
            vec![
                ("John", "Irving"),
                ("John", "Tolkien"),
                ("Mary", "Shelley")
            ]
        );
    }

    #[test]
    fn test_apply_sort_descending() {
        let people = vec![
            Person::new("Mary", "Shelley", 1797),
            Person::new("John", "Tolkien", 1892),
        ];
        let clauses = vec![SortClause {
            field: "born",
            descending: true,
        }];
        let sorted = apply_sort(&people, &clauses);
        assert_eq!(sorted[0].last_name, "Tolkien");
        assert_eq!(sorted[1].last_name, "Shelley");
    }

    #[test]
    fn test_apply_sort_is_stable_and_non_mutating() {
        let people = vec![
            Person::new("John", "Tolkien", 1892),
            Person::new("John", "Irving", 1942),
        ];
        let clauses = vec![SortClause {
            field: "first_name",
            descending: false,
        }];
        let sorted = apply_sort(&people, &clauses);

        // Full tie on the only clause: input order is preserved.
        assert_eq!(sorted[0].last_name, "Tolkien");
        assert_eq!(sorted[1].last_name, "Irving");
        // The input sequence itself is untouched.
        assert_eq!(people[0].last_name, "Tolkien");
    }

    #[test]
    fn test_apply_sort_without_clauses_keeps_order() {
        let people = vec![
            Person::new("B", "B", 1900),
            Person::new("A", "A", 1900),
        ];
        let sorted = apply_sort(&people, &[]);
        assert_eq!(sorted[0].first_name, "B");
    }

    #[test]
    fn test_registry_lookup_by_type_pair() {
        struct SourceDto;
        struct DestEntity;

        let mut registry = PropertyMapRegistry::new();
        registry.register::<SourceDto, DestEntity>(person_map());

        let map = registry
            .get::<SourceDto, DestEntity>()
            .expect("registered pair should resolve");
        assert!(map.resolve("name").is_some());

        let missing = registry.get::<DestEntity, SourceDto>();
        assert!(matches!(
            missing,
            Err(ConfigError::MissingPropertyMap { .. })
        ));
    }
}
