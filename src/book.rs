use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::schema::{FieldSpec, FieldType, Schema, SchemaValidated};

/// A book record as stored in the `books` table.
///
/// Doubles as the payload of `POST /books`, where every field including the isbn is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct Book {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub amazon_url: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub language: String,
    #[validate(range(min = 1, message = "must be greater than or equal to 1"))]
    pub pages: i32,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub publisher: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    pub year: i32,
}

/// Payload of `PUT /books/:isbn`. The isbn comes from the path and can not be changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct BookUpdate {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub amazon_url: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub language: String,
    #[validate(range(min = 1, message = "must be greater than or equal to 1"))]
    pub pages: i32,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub publisher: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    pub year: i32,
}

impl BookUpdate {
    pub fn into_book(self, isbn: String) -> Book {
        Book {
            isbn,
            amazon_url: self.amazon_url,
            author: self.author,
            language: self.language,
            pages: self.pages,
            publisher: self.publisher,
            title: self.title,
            year: self.year,
        }
    }
}

pub static BOOK_SCHEMA: Schema = Schema::new(&[
    FieldSpec::required("isbn", FieldType::String),
    FieldSpec::required("amazon_url", FieldType::String),
    FieldSpec::required("author", FieldType::String),
    FieldSpec::required("language", FieldType::String),
    FieldSpec::required("pages", FieldType::Integer),
    FieldSpec::required("publisher", FieldType::String),
    FieldSpec::required("title", FieldType::String),
    FieldSpec::required("year", FieldType::Integer),
]);

pub static BOOK_UPDATE_SCHEMA: Schema = Schema::new(&[
    FieldSpec::required("amazon_url", FieldType::String),
    FieldSpec::required("author", FieldType::String),
    FieldSpec::required("language", FieldType::String),
    FieldSpec::required("pages", FieldType::Integer),
    FieldSpec::required("publisher", FieldType::String),
    FieldSpec::required("title", FieldType::String),
    FieldSpec::required("year", FieldType::Integer),
]);

impl SchemaValidated for Book {
    fn schema() -> &'static Schema {
        &BOOK_SCHEMA
    }
}

impl SchemaValidated for BookUpdate {
    fn schema() -> &'static Schema {
        &BOOK_UPDATE_SCHEMA
    }
}
