use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::url::resolve_page_url;

/// Language sentinel used when a code fence carries no language tag.
pub const PLAIN_TEXT_LANGUAGE: &str = "plain text";

/// One typed content block.
///
/// A block's kind is fixed at construction and it carries no ordering field:
/// its position in the containing sequence *is* its document order, and that
/// order is preserved end-to-end through publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading1 {
        text: String,
    },
    Heading2 {
        text: String,
    },
    Heading3 {
        text: String,
    },
    BulletedItem {
        text: String,
    },
    /// An ordered-list item. The source numeral is discarded; the ordinal is
    /// implicit from sequence position.
    NumberedItem {
        text: String,
    },
    Quote {
        text: String,
    },
    /// A checkbox item (`- [ ]` / `- [x]`).
    Task {
        text: String,
        checked: bool,
    },
    /// A fenced code block; `text` is the full body joined by newlines.
    Code {
        text: String,
        language: String,
    },
    Paragraph {
        text: String,
    },
}

/// A parsed document ready for publishing.
///
/// The title comes from the source identifier (file name), never from
/// document content — no in-document heading is promoted to title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    /// Ordered block sequence; position is document order.
    pub blocks: Vec<Block>,
}

/// The target under which a new page is created — exactly one of a database
/// or a parent page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Create the page as an entry of this database.
    Database(String),
    /// Create the page as a child of this page.
    Page(String),
}

impl Destination {
    /// Resolve a destination from the three optional input forms, once per
    /// publish operation.
    ///
    /// A page URL takes precedence and resolves to a parent page id via
    /// [`resolve_page_url`]; otherwise a database id wins over a direct page
    /// id. Supplying none of the three (or only empty strings) fails with
    /// [`Error::InvalidDestination`] before any remote call is made.
    pub fn resolve(
        parent_url: Option<&str>,
        database_id: Option<&str>,
        parent_page_id: Option<&str>,
    ) -> Result<Self, Error> {
        if let Some(url) = non_empty(parent_url) {
            return Ok(Destination::Page(resolve_page_url(url)?));
        }
        if let Some(id) = non_empty(database_id) {
            return Ok(Destination::Database(id.to_string()));
        }
        if let Some(id) = non_empty(parent_page_id) {
            return Ok(Destination::Page(id.to_string()));
        }
        Err(Error::InvalidDestination)
    }

    /// The raw target reference this destination points at.
    pub fn id(&self) -> &str {
        match self {
            Destination::Database(id) | Destination::Page(id) => id,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
