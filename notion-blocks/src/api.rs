//! The Notion API boundary: the [`NotionApi`] trait and Block → wire JSON
//! conversion.
//!
//! The trait is the seam between chunking logic and transport. The publisher
//! only sees `&dyn NotionApi`, so production passes a
//! [`crate::client::NotionClient`] constructed once at bootstrap and tests
//! substitute a recording implementation.

use serde_json::{Value, json};

use crate::error::Error;
use crate::types::{Block, Destination};

/// The four Notion operations this crate consumes.
pub trait NotionApi {
    /// `POST /v1/pages` — create a page under `parent` titled `title` with
    /// an initial set of children. Returns the new page id.
    fn create_page(
        &self,
        parent: &Destination,
        title: &str,
        children: &[Value],
    ) -> Result<String, Error>;

    /// `PATCH /v1/blocks/{id}/children` — append children to an existing
    /// page, after its end.
    fn append_children(&self, page_id: &str, children: &[Value]) -> Result<(), Error>;

    /// `GET /v1/pages/{id}` — page metadata.
    fn page_info(&self, page_id: &str) -> Result<Value, Error>;

    /// `GET /v1/blocks/{id}/children` — list a page's child blocks.
    fn list_children(&self, container_id: &str, page_size: usize) -> Result<Vec<Value>, Error>;
}

/// Wrap a literal run of text as a single Notion rich-text span. Inline
/// markup is not decomposed; it travels as-is inside the span.
fn rich_text(text: &str) -> Value {
    json!([{ "type": "text", "text": { "content": text } }])
}

/// Convert a block to the JSON object shape the Notion API expects as a
/// child entry.
pub fn block_to_json(block: &Block) -> Value {
    match block {
        Block::Heading1 { text } => json!({
            "type": "heading_1",
            "heading_1": { "rich_text": rich_text(text) },
        }),
        Block::Heading2 { text } => json!({
            "type": "heading_2",
            "heading_2": { "rich_text": rich_text(text) },
        }),
        Block::Heading3 { text } => json!({
            "type": "heading_3",
            "heading_3": { "rich_text": rich_text(text) },
        }),
        Block::BulletedItem { text } => json!({
            "type": "bulleted_list_item",
            "bulleted_list_item": { "rich_text": rich_text(text) },
        }),
        Block::NumberedItem { text } => json!({
            "type": "numbered_list_item",
            "numbered_list_item": { "rich_text": rich_text(text) },
        }),
        Block::Quote { text } => json!({
            "type": "quote",
            "quote": { "rich_text": rich_text(text) },
        }),
        Block::Task { text, checked } => json!({
            "type": "to_do",
            "to_do": { "rich_text": rich_text(text), "checked": checked },
        }),
        Block::Code { text, language } => json!({
            "type": "code",
            "code": { "rich_text": rich_text(text), "language": language },
        }),
        Block::Paragraph { text } => json!({
            "type": "paragraph",
            "paragraph": { "rich_text": rich_text(text) },
        }),
    }
}

/// JSON `parent` reference for a create-page call.
pub(crate) fn parent_to_json(parent: &Destination) -> Value {
    match parent {
        Destination::Database(id) => json!({ "database_id": id }),
        Destination::Page(id) => json!({ "page_id": id }),
    }
}

/// JSON `properties` payload carrying the page title.
pub(crate) fn title_properties(title: &str) -> Value {
    json!({ "title": { "title": [{ "text": { "content": title } }] } })
}
