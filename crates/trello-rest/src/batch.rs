//! Request batching.
//!
//! A [`Batch`] collects relative API paths and sends them as one
//! `GET batch?urls=<url1>,<url2>,...` call. The response is an array with
//! one entry per path, in the order the paths were added.
//!
//! Flushing empties the queue as soon as the request is issued, whether or
//! not it succeeds. A failed batch is never re-sent implicitly.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use trello_client::{Error, ErrorKind, RequestMethod, Result, Transport};

/// Capability a type must provide to host a [`Batch`].
pub trait BatchHost: Sync {
    /// Transport the batch request is sent through.
    type Http: Transport;

    /// The transport.
    fn http(&self) -> &Self::Http;

    /// Encode query parameters as `?name=value&...`.
    ///
    /// Returns an empty string when there are no parameters.
    fn make_query(&self, params: &[(&str, &str)]) -> Result<String> {
        if params.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("?{}", serde_urlencoded::to_string(params)?))
    }
}

/// Queue of sub-requests sent together as one batch call.
///
/// # Example
///
/// ```rust,ignore
/// let client = TrelloRestClient::new(config)?;
/// let mut batch = client.batch();
/// batch.add_url("/cards/abc123").add_url("/boards/def456");
///
/// let results = batch.flush_results().await?;
/// assert!(batch.is_empty());
/// ```
#[derive(Debug)]
pub struct Batch<'h, H: BatchHost> {
    host: &'h H,
    urls: Vec<String>,
}

impl<'h, H: BatchHost> Batch<'h, H> {
    /// Create an empty batch sending through `host`.
    pub fn new(host: &'h H) -> Self {
        Self {
            host,
            urls: Vec::new(),
        }
    }

    /// Queue one path. The path is not validated.
    pub fn add_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.urls.push(url.into());
        self
    }

    /// Queue several paths, keeping their order.
    pub fn add_urls<I, S>(&mut self, urls: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for url in urls {
            self.add_url(url);
        }
        self
    }

    /// Paths currently queued.
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Number of queued paths.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Send every queued path as one request.
    pub async fn flush(&mut self) -> Result<Value> {
        self.flush_with(&Value::Null).await
    }

    /// Merge the `urls` attribute, then send every queued path as one
    /// request.
    ///
    /// An array under `urls` queues each element; a string queues that
    /// string. Any other shape is ignored. With nothing queued no request is
    /// made and an empty array is returned.
    pub async fn flush_with(&mut self, attributes: &Value) -> Result<Value> {
        self.merge_attributes(attributes);
        let (_, value) = self.send().await?;
        Ok(value)
    }

    /// Send every queued path and pair each result with its path.
    pub async fn flush_results(&mut self) -> Result<Vec<BatchResult>> {
        self.flush_results_with(&Value::Null).await
    }

    /// Merge the `urls` attribute as [`Batch::flush_with`] does, then send
    /// and pair each result with its path.
    pub async fn flush_results_with(&mut self, attributes: &Value) -> Result<Vec<BatchResult>> {
        self.merge_attributes(attributes);
        let (urls, value) = self.send().await?;
        let items = BatchItem::from_response(&value)?;

        if items.len() != urls.len() {
            return Err(Error::new(ErrorKind::Json(format!(
                "batch returned {} results for {} urls",
                items.len(),
                urls.len()
            ))));
        }

        Ok(urls
            .into_iter()
            .zip(items)
            .map(|(url, item)| BatchResult { url, item })
            .collect())
    }

    fn merge_attributes(&mut self, attributes: &Value) {
        match attributes.get("urls") {
            Some(Value::Array(urls)) => {
                self.add_urls(urls.iter().map(url_string));
            }
            Some(Value::String(url)) => {
                self.add_url(url.as_str());
            }
            _ => {}
        }
    }

    #[instrument(skip(self), fields(queued = self.urls.len()))]
    async fn send(&mut self) -> Result<(Vec<String>, Value)> {
        if self.urls.is_empty() {
            debug!("Batch queue empty, nothing to send");
            return Ok((Vec::new(), Value::Array(Vec::new())));
        }

        let joined = self.urls.join(",");
        let path = format!("batch{}", self.host.make_query(&[("urls", joined.as_str())])?);

        let host = self.host;
        let pending = host.http().execute(RequestMethod::Get, &path, &[]);
        let urls = std::mem::take(&mut self.urls);

        match pending.await {
            Ok(value) => {
                debug!(count = urls.len(), "Batch sent");
                Ok((urls, value))
            }
            Err(err) => {
                warn!(count = urls.len(), error = %err, "Batch request failed");
                Err(err)
            }
        }
    }
}

fn url_string(value: &Value) -> String {
    match value {
        Value::String(url) => url.clone(),
        other => other.to_string(),
    }
}

/// One entry of a batch response.
///
/// Trello answers each sub-request with a single-key object mapping the
/// status code to the body, e.g. `{"200": {...}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchItem {
    /// Status code of the sub-request.
    pub status: u16,
    /// Body of the sub-request.
    pub body: Value,
}

impl BatchItem {
    /// Returns true for 2xx sub-requests.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode a batch response array.
    pub fn from_response(value: &Value) -> Result<Vec<BatchItem>> {
        let entries = value
            .as_array()
            .ok_or_else(|| Error::new(ErrorKind::Json("batch response is not an array".into())))?;

        entries.iter().map(Self::from_entry).collect()
    }

    fn from_entry(entry: &Value) -> Result<BatchItem> {
        let malformed = || Error::new(ErrorKind::Json(format!("malformed batch entry: {entry}")));

        let object = entry.as_object().ok_or_else(malformed)?;
        if object.len() != 1 {
            return Err(malformed());
        }
        let (status, body) = object.iter().next().ok_or_else(malformed)?;
        let status = status.parse().map_err(|_| malformed())?;

        Ok(BatchItem {
            status,
            body: body.clone(),
        })
    }
}

/// A batch entry together with the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    /// The queued path.
    pub url: String,
    /// Its result.
    pub item: BatchItem,
}
