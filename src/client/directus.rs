//! Alternate backend: a headless CMS exposing `items/<collection>` REST
//! endpoints behind a static bearer token.
//!
//! This is a separate collaborator from the contents-API store: records
//! arrive as expanded JSON (no front matter, no Markdown fetch per file),
//! so it is deliberately not unified under [`RemoteStore`](super::RemoteStore).

use serde::Deserialize;

use super::FetchError;

/// Every CMS payload wraps its result in a `data` envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Site-level blog record (`items/blog`)
#[derive(Debug, Clone, Deserialize)]
pub struct CmsBlogInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub banner: Option<String>,
}

/// Category record (`items/category`)
#[derive(Debug, Clone, Deserialize)]
pub struct CmsCategory {
    pub id: serde_json::Value,
    pub name: Option<String>,
}

/// Post record (`items/post`), category expanded server-side
#[derive(Debug, Clone, Deserialize)]
pub struct CmsPost {
    pub id: serde_json::Value,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub date_created: Option<String>,
    pub featured_image: Option<String>,
    pub category: Option<CmsCategory>,
}

/// Client for the headless CMS backend
#[derive(Debug, Clone)]
pub struct DirectusClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl DirectusClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Fetch the site-level blog record
    pub async fn blog_info(&self) -> Result<CmsBlogInfo, FetchError> {
        let url = format!("{}/items/blog", self.base_url);
        let envelope: Envelope<CmsBlogInfo> = self.get(&url).await?.json().await?;
        Ok(envelope.data)
    }

    /// Fetch all categories
    pub async fn categories(&self) -> Result<Vec<CmsCategory>, FetchError> {
        let url = format!("{}/items/category", self.base_url);
        let envelope: Envelope<Vec<CmsCategory>> = self.get(&url).await?.json().await?;
        Ok(envelope.data)
    }

    /// Fetch the latest posts, category fields expanded and sorted
    /// newest-first on the server
    pub async fn posts(&self, limit: usize) -> Result<Vec<CmsPost>, FetchError> {
        let url = format!(
            "{}/items/post?fields=*,category.*&sort=-date_created&limit={}",
            self.base_url, limit
        );
        let envelope: Envelope<Vec<CmsPost>> = self.get(&url).await?.json().await?;
        Ok(envelope.data)
    }

    /// Build a resized asset URL for an uploaded file id
    pub fn asset_url(&self, asset_id: &str, width: u32) -> String {
        format!(
            "{}/assets/{}?width={}&fit=cover&format=webp",
            self.base_url, asset_id, width
        )
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let response = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(FetchError::Auth {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_url() {
        let client = DirectusClient::new("http://localhost:8055/", "tok");
        assert_eq!(
            client.asset_url("a1b2", 400),
            "http://localhost:8055/assets/a1b2?width=400&fit=cover&format=webp"
        );
    }

    #[test]
    fn test_post_envelope_decodes() {
        let json = r#"{"data": [{
            "id": 7,
            "title": "Hello",
            "excerpt": "short",
            "date_created": "2024-01-15T10:30:00Z",
            "featured_image": "a1b2",
            "category": {"id": 2, "name": "Tech"}
        }]}"#;
        let envelope: Envelope<Vec<CmsPost>> = serde_json::from_str(json).unwrap();
        let post = &envelope.data[0];
        assert_eq!(post.title.as_deref(), Some("Hello"));
        assert_eq!(
            post.category.as_ref().and_then(|c| c.name.as_deref()),
            Some("Tech")
        );
    }

    #[test]
    fn test_blog_info_envelope_decodes() {
        let json = r#"{"data": {"title": "My Blog", "description": null, "banner": null}}"#;
        let envelope: Envelope<CmsBlogInfo> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.title.as_deref(), Some("My Blog"));
    }
}
