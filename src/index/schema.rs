//! Fixed index schema for page documents

use crate::artifact::PageRecord;
use tantivy::schema::{Field, Schema, STORED, STRING, TEXT};

/// Separator joining a record's text fragments into the document body
pub const TEXT_SEPARATOR: &str = " · ";

/// The three-field schema every index is created with
///
/// The URL is the document's unique key and is indexed untokenized; title
/// and body go through the engine's default analyzer. The body is not
/// stored, it only feeds the inverted index.
pub struct SearchSchema {
    pub schema: Schema,
    pub url: Field,
    pub title: Field,
    pub body: Field,
}

impl SearchSchema {
    /// Builds the fixed schema
    pub fn build() -> Self {
        let mut builder = Schema::builder();

        let url = builder.add_text_field("url", STRING | STORED);
        let title = builder.add_text_field("title", TEXT | STORED);
        let body = builder.add_text_field("body", TEXT);

        Self {
            schema: builder.build(),
            url,
            title,
            body,
        }
    }
}

/// A document in the shape the index accepts, built transiently per record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDocument {
    pub url: String,
    pub title: String,
    pub body: String,
}

impl IndexDocument {
    /// Maps a page record to its index document
    pub fn from_record(record: PageRecord) -> Self {
        Self {
            url: record.url,
            title: record.title,
            body: record.texts.join(TEXT_SEPARATOR),
        }
    }
}
