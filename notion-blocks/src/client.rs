//! Blocking HTTP implementation of [`NotionApi`] backed by `reqwest`.

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::{Value, json};
use tracing::debug;

use crate::api::{NotionApi, parent_to_json, title_properties};
use crate::error::Error;
use crate::publish::MAX_BLOCKS_PER_REQUEST;
use crate::types::Destination;

const API_BASE: &str = "https://api.notion.com/v1";

/// Notion API revision this client speaks.
const NOTION_VERSION: &str = "2022-06-28";

/// Environment variable holding the integration token.
pub const TOKEN_ENV_VAR: &str = "NOTION_TOKEN";

/// Handle to the Notion API.
///
/// Construct once at host bootstrap and pass by reference into every
/// publish/lookup call. Parsing never needs one. Calls are synchronous and
/// strictly sequential; timeouts are left to the transport defaults and
/// nothing is retried here.
pub struct NotionClient {
    http: Client,
    token: String,
}

impl NotionClient {
    /// Build a client with an explicit integration token.
    pub fn new(token: impl Into<String>) -> Result<Self, Error> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::MissingCredential);
        }
        Ok(Self {
            http: Client::new(),
            token,
        })
    }

    /// Build a client from the `NOTION_TOKEN` environment variable.
    pub fn from_env() -> Result<Self, Error> {
        let token = std::env::var(TOKEN_ENV_VAR).map_err(|_| Error::MissingCredential)?;
        Self::new(token)
    }

    fn send(&self, builder: RequestBuilder) -> Result<Value, Error> {
        let response = builder
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .map_err(remote_error)?;
        read_json(response)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{API_BASE}/{path}")
    }
}

impl NotionApi for NotionClient {
    fn create_page(
        &self,
        parent: &Destination,
        title: &str,
        children: &[Value],
    ) -> Result<String, Error> {
        debug!(children = children.len(), title, "creating page");
        let body = json!({
            "parent": parent_to_json(parent),
            "properties": title_properties(title),
            "children": children,
        });
        let page = self.send(self.http.post(self.endpoint("pages")).json(&body))?;
        page.get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::RemoteOperationFailed {
                message: "create-page response carried no id".into(),
            })
    }

    fn append_children(&self, page_id: &str, children: &[Value]) -> Result<(), Error> {
        debug!(page_id, children = children.len(), "appending children");
        let body = json!({ "children": children });
        self.send(
            self.http
                .patch(self.endpoint(&format!("blocks/{page_id}/children")))
                .json(&body),
        )?;
        Ok(())
    }

    fn page_info(&self, page_id: &str) -> Result<Value, Error> {
        self.send(self.http.get(self.endpoint(&format!("pages/{page_id}"))))
    }

    fn list_children(&self, container_id: &str, page_size: usize) -> Result<Vec<Value>, Error> {
        let page_size = page_size.min(MAX_BLOCKS_PER_REQUEST);
        let response = self.send(
            self.http
                .get(self.endpoint(&format!("blocks/{container_id}/children")))
                .query(&[("page_size", page_size)]),
        )?;
        Ok(response
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default())
    }
}

fn remote_error(err: reqwest::Error) -> Error {
    Error::RemoteOperationFailed {
        message: err.to_string(),
    }
}

/// Decode a response body, translating non-2xx statuses into
/// [`Error::RemoteOperationFailed`] with the provider's message passed
/// through opaquely.
fn read_json(response: Response) -> Result<Value, Error> {
    let status = response.status();
    if status.is_success() {
        return response.json().map_err(remote_error);
    }
    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(body);
    Err(Error::RemoteOperationFailed {
        message: format!("{status}: {message}"),
    })
}
