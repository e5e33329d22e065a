use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Proxy, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::models::{DataSourceOption, LogoItem, LogoRecord, ODataCollection, SourceRecord};
use super::DataSource;
use crate::config::SourceConfig;
use crate::{Error, Result};

const SOURCES_SELECT: &str = "Title";
const ITEMS_SELECT: &str = "Title,LogoUrl,LinkUrl";

/// REST client for a SharePoint site's lists
pub struct SharePointClient {
    client: Client,
    site_url: Url,
    access_token: Option<String>,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl SharePointClient {
    /// Create a new client from the `[source]` section
    pub fn new(config: &SourceConfig) -> Result<Self> {
        if config.site_url.trim().is_empty() {
            return Err(Error::Config(
                "source.site_url is not set; add it to config.toml or pass --site".to_string(),
            ));
        }
        let site_url = Url::parse(config.site_url.trim())?;
        if site_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "source.site_url is not a site URL: {}",
                site_url
            )));
        }

        let client = Self::build_client(config.request_timeout_secs, &config.proxy_url)?;

        Ok(Self {
            client,
            site_url,
            access_token: config.resolved_access_token(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for list requests");
        }

        builder.build().map_err(Error::Http)
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json;odata=nometadata"),
        );
        if let Some(ref token) = self.access_token {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("Access token contains invalid header characters, ignoring it"),
            }
        }
        headers
    }

    /// `{site}/_api/web/lists[/extra...]?$select=...`
    fn lists_endpoint(&self, extra: &[&str], select: &str) -> Result<Url> {
        let mut url = self.site_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::Config(format!("Cannot extend site URL: {}", self.site_url)))?;
            segments
                .pop_if_empty()
                .extend(["_api", "web", "lists"])
                .extend(extra);
        }
        url.set_query(Some(&format!("$select={}", select)));
        Ok(url)
    }

    /// Endpoint listing every list of the site
    pub fn sources_url(&self) -> Result<Url> {
        self.lists_endpoint(&[], SOURCES_SELECT)
    }

    /// Endpoint listing the items of one list, addressed by title
    pub fn items_url(&self, source_name: &str) -> Result<Url> {
        // OData string literals escape a single quote by doubling it
        let by_title = format!("getbytitle('{}')", source_name.replace('\'', "''"));
        self.lists_endpoint(&[by_title.as_str(), "items"], ITEMS_SELECT)
    }

    /// GET with retry and exponential backoff on transport errors, 429 and 503
    async fn get_with_retry(&self, url: &Url) -> Result<Bytes> {
        let mut last_error = None;
        let mut delay_ms = self.retry_delay_ms;

        for attempt in 0..self.max_retries {
            tracing::debug!("GET attempt {} for {}", attempt + 1, url);

            match self
                .client
                .get(url.clone())
                .headers(self.build_headers())
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::TOO_MANY_REQUESTS
                        || status == StatusCode::SERVICE_UNAVAILABLE
                    {
                        tracing::warn!("Received {} for {}, retrying after {}ms...", status, url, delay_ms);
                        last_error = Some(Error::Status {
                            status,
                            url: url.to_string(),
                        });
                    } else if !status.is_success() {
                        return Err(Error::Status {
                            status,
                            url: url.to_string(),
                        });
                    } else {
                        match response.bytes().await {
                            Ok(bytes) => return Ok(bytes),
                            Err(e) => {
                                tracing::warn!("Failed to read response body: {}", e);
                                last_error = Some(Error::Http(e));
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Request failed for {} (attempt {}): {}", url, attempt + 1, e);
                    last_error = Some(Error::Http(e));
                }
            }

            if attempt + 1 < self.max_retries {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                delay_ms *= 2;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::Other(format!(
                "Failed to fetch URL after {} attempts: {}",
                self.max_retries, url
            ))
        }))
    }

    async fn get_collection<T: DeserializeOwned>(&self, url: &Url) -> Result<Vec<T>> {
        let body = self.get_with_retry(url).await?;
        tracing::debug!("Response from {} ({} bytes)", url, body.len());
        let collection: ODataCollection<T> = serde_json::from_slice(&body)?;
        Ok(collection.value)
    }
}

#[async_trait::async_trait]
impl DataSource for SharePointClient {
    async fn list_sources(&self) -> Result<Vec<DataSourceOption>> {
        let url = self.sources_url()?;
        let records: Vec<SourceRecord> = self.get_collection(&url).await?;
        Ok(records.into_iter().map(DataSourceOption::from).collect())
    }

    async fn list_items(&self, source_name: &str) -> Result<Vec<LogoItem>> {
        let url = self.items_url(source_name)?;
        tracing::info!("Fetching logos from: {}", url);
        let records: Vec<LogoRecord> = self.get_collection(&url).await?;
        Ok(records.into_iter().map(LogoItem::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Local HTTP server answering with `responses` in order, repeating the
    /// last one; returns the site URL and a request counter
    async fn serve(responses: Vec<(&'static str, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = responses[n.min(responses.len() - 1)];

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(read) => request.extend_from_slice(&buf[..read]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        (format!("http://{}/sites/brand", addr), hits)
    }

    /// Client against a local server, bypassing any proxy from the environment
    fn local_client(site: &str, max_retries: u32) -> SharePointClient {
        let config = SourceConfig {
            site_url: site.to_string(),
            max_retries,
            retry_delay_ms: 1,
            ..Default::default()
        };
        let mut client = SharePointClient::new(&config).unwrap();
        client.client = Client::builder().no_proxy().build().unwrap();
        client
    }

    fn client_for(site: &str) -> SharePointClient {
        let config = SourceConfig {
            site_url: site.to_string(),
            ..Default::default()
        };
        SharePointClient::new(&config).unwrap()
    }

    #[test]
    fn test_sources_url() {
        let client = client_for("https://contoso.sharepoint.com/sites/brand/");
        assert_eq!(
            client.sources_url().unwrap().as_str(),
            "https://contoso.sharepoint.com/sites/brand/_api/web/lists?$select=Title"
        );
    }

    #[test]
    fn test_items_url_escapes_title() {
        let client = client_for("https://contoso.sharepoint.com/sites/brand");
        assert_eq!(
            client.items_url("Partner's Logos").unwrap().as_str(),
            "https://contoso.sharepoint.com/sites/brand/_api/web/lists/getbytitle('Partner''s%20Logos')/items?$select=Title,LogoUrl,LinkUrl"
        );
    }

    #[test]
    fn test_root_site_url() {
        let client = client_for("https://contoso.sharepoint.com");
        assert_eq!(
            client.items_url("Logos").unwrap().as_str(),
            "https://contoso.sharepoint.com/_api/web/lists/getbytitle('Logos')/items?$select=Title,LogoUrl,LinkUrl"
        );
    }

    #[test]
    fn test_missing_site_url() {
        let result = SharePointClient::new(&SourceConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_retries_after_service_unavailable() {
        let (site, hits) = serve(vec![
            ("503 Service Unavailable", ""),
            ("200 OK", r#"{"value":[{"Title":"Logos"}]}"#),
        ])
        .await;
        let client = local_client(&site, 3);

        let sources = client.list_sources().await.unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].key, "Logos");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_throttling_exhausts_attempts() {
        let (site, hits) = serve(vec![("429 Too Many Requests", "")]).await;
        let client = local_client(&site, 2);

        let result = client.list_items("Logos").await;
        assert!(matches!(
            result,
            Err(Error::Status { status, .. }) if status == StatusCode::TOO_MANY_REQUESTS
        ));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_not_found_fails_without_retry() {
        let (site, hits) = serve(vec![("404 Not Found", "")]).await;
        let client = local_client(&site, 3);

        let result = client.list_items("Missing").await;
        assert!(matches!(
            result,
            Err(Error::Status { status, .. }) if status == StatusCode::NOT_FOUND
        ));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let (site, hits) = serve(vec![("200 OK", "<html>sign in</html>")]).await;
        let client = local_client(&site, 3);

        let result = client.list_sources().await;
        assert!(matches!(result, Err(Error::Json(_))));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_invalid_site_url() {
        let config = SourceConfig {
            site_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            SharePointClient::new(&config),
            Err(Error::UrlParse(_))
        ));
    }
}
