//! `notion-blocks` — Markdown block parser and chunked publisher for Notion.
//!
//! Converts Markdown source text into a flat, ordered sequence of typed
//! [`Block`]s and publishes that sequence as a new Notion page, splitting the
//! requests so each carries at most the API's 100-children-per-call ceiling.
//!
//! Inline spans (bold, italic, code spans, links) are not decomposed; they
//! travel as literal run text. Tables, nested lists, footnotes, and HTML
//! blocks pass through as plain paragraphs.
//!
//! # Quick start
//!
//! ```
//! let blocks = notion_blocks::parse("# Hello\n\nSome text here.\n");
//! assert_eq!(blocks.len(), 2);
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod parse;
pub mod publish;
pub mod types;
pub mod url;

pub use api::NotionApi;
pub use client::NotionClient;
pub use error::*;
pub use parse::{parse, read_document};
pub use publish::{MAX_BLOCKS_PER_REQUEST, publish, publish_file, publish_text};
pub use types::*;
pub use url::resolve_page_url;
