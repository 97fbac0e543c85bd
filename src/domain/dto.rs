//! Wire-facing data transfer objects

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::field::{FieldAccess, FieldValue};

/// Public author representation
///
/// `name` flattens first and last name; `age` is derived from the dates.
/// These two are exactly the fields whose sorting needs the property-map
/// indirection back onto the entity.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub genre: String,
}

impl FieldAccess for AuthorDto {
    fn type_name() -> &'static str {
        "AuthorDto"
    }

    fn field_names() -> &'static [&'static str] {
        &["id", "name", "age", "genre"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Uuid(self.id)),
            "name" => Some(FieldValue::String(self.name.clone())),
            "age" => Some(FieldValue::Integer(self.age as i64)),
            "genre" => Some(FieldValue::String(self.genre.clone())),
            _ => None,
        }
    }
}

/// Public book representation
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

/// Standard author-creation payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorForCreationDto {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub genre: String,

    /// Books created together with their author
    #[serde(default)]
    pub books: Vec<BookForCreationDto>,
}

/// Richer author-creation payload, gated on its own vendor media type
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorWithDateOfDeathForCreationDto {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
    pub genre: String,

    #[serde(default)]
    pub books: Vec<BookForCreationDto>,
}

/// Book-creation payload nested in author creation or posted on its own
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForCreationDto {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}
