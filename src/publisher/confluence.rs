use super::{Page, Publisher};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::Serialize;

/// Confluence client (using REST API)
pub struct ConfluencePublisher {
    client: Client,
    url: String,
    user: String,
    api_key: String,
    space_key: String,
    parent_page_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreatePageRequest {
    #[serde(rename = "type")]
    content_type: String,
    title: String,
    space: Space,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ancestors: Vec<Ancestor>,
    body: Body,
}

#[derive(Debug, Serialize)]
struct Space {
    key: String,
}

#[derive(Debug, Serialize)]
struct Ancestor {
    id: String,
}

#[derive(Debug, Serialize)]
struct Body {
    storage: Storage,
}

#[derive(Debug, Serialize)]
struct Storage {
    value: String,
    representation: String,
}

impl ConfluencePublisher {
    pub fn new(
        url: &str,
        user: &str,
        api_key: &str,
        space_key: &str,
        parent_page_id: Option<&str>,
    ) -> Self {
        Self {
            client: Client::new(),
            url: url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            api_key: api_key.to_string(),
            space_key: space_key.to_string(),
            parent_page_id: parent_page_id.map(str::to_string),
        }
    }

    fn content_url(&self) -> String {
        format!("{}/rest/api/content", self.url)
    }

    fn create_request(&self, page: &Page) -> CreatePageRequest {
        CreatePageRequest {
            content_type: "page".to_string(),
            title: page.title.clone(),
            space: Space {
                key: self.space_key.clone(),
            },
            ancestors: self
                .parent_page_id
                .iter()
                .map(|id| Ancestor { id: id.clone() })
                .collect(),
            body: Body {
                storage: Storage {
                    value: page.body.clone(),
                    representation: "storage".to_string(),
                },
            },
        }
    }
}

#[async_trait::async_trait]
impl Publisher for ConfluencePublisher {
    async fn publish(&self, page: &Page) -> Result<()> {
        let request = self.create_request(page);

        let response = self
            .client
            .post(self.content_url())
            .basic_auth(&self.user, Some(&self.api_key))
            .json(&request)
            .send()
            .await
            .context("Failed to send create page request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Confluence API error ({}): {}", status, body);
        }

        tracing::info!("Published page {}", page.title);
        Ok(())
    }
}
