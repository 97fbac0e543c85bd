//! Author entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::field::{FieldAccess, FieldValue};

/// An author as the storage layer knows it
///
/// The public DTO exposes `name` and `age`; sorting on those goes through
/// the property map down to the fields declared here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
    pub genre: String,
}

impl Author {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            date_of_death: None,
            genre: genre.into(),
        }
    }

    pub fn with_date_of_death(mut self, date_of_death: Option<NaiveDate>) -> Self {
        self.date_of_death = date_of_death;
        self
    }
}

impl FieldAccess for Author {
    fn type_name() -> &'static str {
        "Author"
    }

    fn field_names() -> &'static [&'static str] {
        &[
            "id",
            "first_name",
            "last_name",
            "date_of_birth",
            "date_of_death",
            "genre",
        ]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Uuid(self.id)),
            "first_name" => Some(FieldValue::String(self.first_name.clone())),
            "last_name" => Some(FieldValue::String(self.last_name.clone())),
            "date_of_birth" => Some(FieldValue::Date(self.date_of_birth)),
            "date_of_death" => Some(
                self.date_of_death
                    .map(FieldValue::Date)
                    .unwrap_or(FieldValue::Null),
            ),
            "genre" => Some(FieldValue::String(self.genre.clone())),
            _ => None,
        }
    }
}
