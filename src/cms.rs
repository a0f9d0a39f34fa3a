use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::form_urlencoded;

use crate::config::CmsConfig;
use crate::error::CmsError;
use crate::models::{BlogPost, RawPost};

/// Thin client over the CMS REST API. One instance per process; `reqwest`
/// pools connections internally.
#[derive(Clone)]
pub struct CmsClient {
    http: Client,
    config: CmsConfig,
}

impl CmsClient {
    pub fn new(config: CmsConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &CmsConfig {
        &self.config
    }

    /// Authenticated GET against `{base_url}/api/{endpoint}`, decoded as JSON.
    /// Fails before any network traffic when no API token is configured.
    pub async fn fetch_resource(&self, endpoint: &str) -> Result<Value, CmsError> {
        let token = self
            .config
            .api_token
            .as_deref()
            .ok_or(CmsError::Configuration("CMS_API_TOKEN is not set"))?;

        let url = format!(
            "{}/api/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        );
        debug!(%url, "fetching from CMS");

        let response = self.http.get(&url).bearer_auth(token).send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), "CMS response");

        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.pointer("/error/message")
                        .and_then(Value::as_str)
                        .map(str::to_owned)
                })
                .unwrap_or_else(|| format!("API Error: {}", status.as_u16()));
            return Err(CmsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// All posts with related entities expanded. Degrades to an empty list on
    /// any failure so the public pages stay up when the CMS does not.
    pub async fn list_posts(&self) -> Vec<BlogPost> {
        match self.fetch_resource("blog-posts?populate=*").await {
            Ok(payload) => decode_posts(payload),
            Err(e) => {
                error!("failed to fetch blog posts: {e}");
                Vec::new()
            }
        }
    }

    /// Exact-slug lookup, filtered server-side. `None` covers both "no such
    /// post" and an upstream failure.
    pub async fn get_post_by_slug(&self, slug: &str) -> Option<BlogPost> {
        // Slugs are URL-safe by definition, but the filter value still gets
        // encoded so a stray `&` or `#` cannot mangle the query.
        let encoded: String = form_urlencoded::byte_serialize(slug.as_bytes()).collect();
        let endpoint = format!("blog-posts?filters[slug][$eq]={encoded}&populate=*");
        match self.fetch_resource(&endpoint).await {
            Ok(payload) => decode_posts(payload).into_iter().next(),
            Err(e) => {
                error!(%slug, "failed to fetch blog post: {e}");
                None
            }
        }
    }
}

fn decode_posts(payload: Value) -> Vec<BlogPost> {
    let Some(records) = payload.get("data").and_then(Value::as_array) else {
        warn!("CMS payload carried no data array");
        return Vec::new();
    };

    let mut posts = Vec::with_capacity(records.len());
    for record in records {
        let raw: RawPost = match serde_json::from_value(record.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("dropping undecodable post record: {e}");
                continue;
            }
        };
        let id = raw.id;
        match BlogPost::from_raw(raw) {
            Some(post) => posts.push(post),
            None => warn!(id, "dropping post record missing title, slug, or content"),
        }
    }
    posts
}
