//! Chunked page publishing.
//!
//! The Notion API accepts at most [`MAX_BLOCKS_PER_REQUEST`] children per
//! create/append call, so an unbounded block sequence is split into
//! contiguous chunks submitted strictly in document order: one create call
//! carrying the first chunk, then one append call per remaining chunk, each
//! issued only after the previous call succeeded. Appends target the same
//! page, so they are never parallelised.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::api::{NotionApi, block_to_json};
use crate::error::Error;
use crate::parse;
use crate::types::{Block, Destination};

/// Hard Notion API ceiling on children per request. A provider contract,
/// not a tunable.
pub const MAX_BLOCKS_PER_REQUEST: usize = 100;

/// Create a page titled `title` under `destination` holding `blocks` as its
/// children, in exactly the given order. Returns the new page id.
///
/// A failure during the create call aborts the whole operation with no page
/// created. A failure during a later append call leaves a page with fewer
/// children than the source document; the error is surfaced unmodified and
/// nothing is retried or rolled back here.
pub fn publish(
    api: &dyn NotionApi,
    blocks: &[Block],
    title: &str,
    destination: &Destination,
) -> Result<String, Error> {
    if destination.id().trim().is_empty() {
        return Err(Error::InvalidDestination);
    }

    let children: Vec<Value> = blocks.iter().map(block_to_json).collect();

    let initial = children.len().min(MAX_BLOCKS_PER_REQUEST);
    let page_id = api.create_page(destination, title, &children[..initial])?;

    for chunk in children[initial..].chunks(MAX_BLOCKS_PER_REQUEST) {
        api.append_children(&page_id, chunk)?;
    }

    info!(page_id, blocks = blocks.len(), "published page");
    Ok(page_id)
}

/// Publish a Markdown file as a new page. The page title is the file name
/// without its final extension, never derived from document content.
pub fn publish_file(
    api: &dyn NotionApi,
    path: &Path,
    destination: &Destination,
) -> Result<String, Error> {
    let doc = parse::read_document(path)?;
    publish(api, &doc.blocks, &doc.title, destination)
}

/// Publish inline Markdown text as a new page under an explicit title.
pub fn publish_text(
    api: &dyn NotionApi,
    text: &str,
    title: &str,
    destination: &Destination,
) -> Result<String, Error> {
    let blocks = parse::parse(text);
    publish(api, &blocks, title, destination)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;

    /// Records every call in order; optionally fails the n-th call (0-based).
    #[derive(Default)]
    struct RecordingApi {
        calls: RefCell<Vec<(&'static str, usize)>>,
        received: RefCell<Vec<Value>>,
        fail_on_call: Option<usize>,
    }

    impl RecordingApi {
        fn failing_on(call: usize) -> Self {
            Self {
                fail_on_call: Some(call),
                ..Self::default()
            }
        }

        fn check_failure(&self) -> Result<(), Error> {
            let call_index = self.calls.borrow().len() - 1;
            if self.fail_on_call == Some(call_index) {
                return Err(Error::RemoteOperationFailed {
                    message: "injected failure".into(),
                });
            }
            Ok(())
        }
    }

    impl NotionApi for RecordingApi {
        fn create_page(
            &self,
            _parent: &Destination,
            _title: &str,
            children: &[Value],
        ) -> Result<String, Error> {
            self.calls.borrow_mut().push(("create", children.len()));
            self.check_failure()?;
            self.received.borrow_mut().extend_from_slice(children);
            Ok("page-1".to_string())
        }

        fn append_children(&self, page_id: &str, children: &[Value]) -> Result<(), Error> {
            assert_eq!(page_id, "page-1");
            self.calls.borrow_mut().push(("append", children.len()));
            self.check_failure()?;
            self.received.borrow_mut().extend_from_slice(children);
            Ok(())
        }

        fn page_info(&self, _page_id: &str) -> Result<Value, Error> {
            unimplemented!("not used by publish")
        }

        fn list_children(&self, _id: &str, _page_size: usize) -> Result<Vec<Value>, Error> {
            unimplemented!("not used by publish")
        }
    }

    fn numbered_paragraphs(count: usize) -> Vec<Block> {
        (0..count)
            .map(|i| Block::Paragraph {
                text: format!("block {i}"),
            })
            .collect()
    }

    fn dest() -> Destination {
        Destination::Page("parent-page".to_string())
    }

    #[test]
    fn small_document_needs_one_create_call() {
        let api = RecordingApi::default();
        let page_id = publish(&api, &numbered_paragraphs(5), "Small", &dest()).unwrap();
        assert_eq!(page_id, "page-1");
        assert_eq!(*api.calls.borrow(), vec![("create", 5)]);
    }

    #[test]
    fn empty_document_still_creates_the_page() {
        let api = RecordingApi::default();
        publish(&api, &[], "Empty", &dest()).unwrap();
        assert_eq!(*api.calls.borrow(), vec![("create", 0)]);
    }

    #[test]
    fn exactly_one_hundred_blocks_need_no_append() {
        let api = RecordingApi::default();
        publish(&api, &numbered_paragraphs(100), "Full", &dest()).unwrap();
        assert_eq!(*api.calls.borrow(), vec![("create", 100)]);
    }

    #[test]
    fn one_block_over_the_ceiling_appends_once() {
        let api = RecordingApi::default();
        publish(&api, &numbered_paragraphs(101), "Over", &dest()).unwrap();
        assert_eq!(*api.calls.borrow(), vec![("create", 100), ("append", 1)]);
    }

    #[test]
    fn chunk_count_law_for_250_blocks() {
        let api = RecordingApi::default();
        publish(&api, &numbered_paragraphs(250), "Big", &dest()).unwrap();
        assert_eq!(
            *api.calls.borrow(),
            vec![("create", 100), ("append", 100), ("append", 50)]
        );
    }

    #[test]
    fn order_is_preserved_across_chunks() {
        let api = RecordingApi::default();
        publish(&api, &numbered_paragraphs(250), "Ordered", &dest()).unwrap();

        let received = api.received.borrow();
        let texts: Vec<&str> = received
            .iter()
            .map(|child| {
                child["paragraph"]["rich_text"][0]["text"]["content"]
                    .as_str()
                    .unwrap()
            })
            .collect();
        let expected: Vec<String> = (0..250).map(|i| format!("block {i}")).collect();
        assert_eq!(texts, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn create_failure_aborts_without_appends() {
        let api = RecordingApi::failing_on(0);
        let err = publish(&api, &numbered_paragraphs(250), "Doomed", &dest()).unwrap_err();
        assert!(matches!(err, Error::RemoteOperationFailed { .. }));
        assert_eq!(*api.calls.borrow(), vec![("create", 100)]);
        assert!(api.received.borrow().is_empty());
    }

    #[test]
    fn append_failure_leaves_partial_page() {
        // Fail the second append: the page exists with 200 of 250 blocks.
        let api = RecordingApi::failing_on(2);
        let err = publish(&api, &numbered_paragraphs(250), "Partial", &dest()).unwrap_err();
        assert!(matches!(err, Error::RemoteOperationFailed { .. }));
        assert_eq!(
            *api.calls.borrow(),
            vec![("create", 100), ("append", 100), ("append", 50)]
        );
        assert_eq!(api.received.borrow().len(), 200);
    }

    #[test]
    fn empty_destination_reference_is_rejected_before_any_call() {
        let api = RecordingApi::default();
        let err = publish(
            &api,
            &numbered_paragraphs(1),
            "Nowhere",
            &Destination::Page(String::new()),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidDestination));
        assert!(api.calls.borrow().is_empty());
    }

    #[test]
    fn publish_text_parses_then_publishes() {
        let api = RecordingApi::default();
        let page_id = publish_text(&api, "# Title\n\n- item\n", "Inline", &dest()).unwrap();
        assert_eq!(page_id, "page-1");
        assert_eq!(*api.calls.borrow(), vec![("create", 2)]);

        let received = api.received.borrow();
        assert_eq!(received[0]["type"], "heading_1");
        assert_eq!(received[1]["type"], "bulleted_list_item");
    }
}
