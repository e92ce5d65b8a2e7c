//! Flickr photo search backend
//!
//! Sends parameterized GET requests to the Flickr REST endpoint and decodes
//! the JSON response into photo URLs. Flickr serves JSONP by default, so every
//! request carries `nojsoncallback=1` to get plain JSON back.
//!
//! An API key is required for real searches; supply it through config
//! (`api_keys.flickr`).

use crate::constants::api::{FLICKR_REST_URL, FLICKR_SEARCH_METHOD};
use crate::constants::photo::PHOTO_SIZE;
use crate::error::{Error, Result};
use crate::flickr::{photo_url, PhotoSearch, PhotoUrl, SearchParams};
use crate::location::Coordinate;
use serde::Deserialize;

const USER_AGENT: &str = "photo-wander/0.1.0";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Flickr search backend
#[derive(Debug)]
pub struct FlickrClient {
    client: reqwest::Client,
    api_key: String,
}

/// Search response shape: `{"photos": {"photo": [...]}}`
#[derive(Debug, Deserialize)]
struct SearchResponse {
    photos: PhotoPage,
}

#[derive(Debug, Deserialize)]
struct PhotoPage {
    photo: Vec<PhotoEntry>,
}

/// One raw photo record
///
/// Every field is optional: an entry missing any URL component is skipped
/// rather than failing the whole batch.
#[derive(Debug, Deserialize)]
struct PhotoEntry {
    #[serde(default)]
    farm: Option<u64>,
    #[serde(default)]
    server: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    secret: Option<String>,
}

impl PhotoEntry {
    fn to_url(&self) -> Option<PhotoUrl> {
        Some(photo_url(
            self.farm?,
            self.server.as_deref()?,
            self.id.as_deref()?,
            self.secret.as_deref()?,
            PHOTO_SIZE,
        ))
    }
}

impl FlickrClient {
    /// Create a new Flickr backend
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key: api_key.into(),
        }
    }

    /// Query pairs common to every request against the REST endpoint
    fn base_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("api_key", self.api_key.clone()),
            ("format", "json".to_string()),
            ("nojsoncallback", "1".to_string()),
            ("method", FLICKR_SEARCH_METHOD.to_string()),
        ]
    }

    /// Decode a search response from its status code and body
    ///
    /// Non-2xx statuses fail without touching the body. A 2xx body must carry
    /// the `photos.photo` array; entries inside it that are missing URL
    /// components are skipped silently, preserving the order of the rest.
    fn decode(status: u16, body: &[u8]) -> Result<Vec<PhotoUrl>> {
        if !(200..300).contains(&status) {
            return Err(Error::UnexpectedStatus(status));
        }

        let response: SearchResponse = serde_json::from_slice(body)
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        Ok(response
            .photos
            .photo
            .iter()
            .filter_map(|entry| entry.to_url())
            .collect())
    }
}

impl PhotoSearch for FlickrClient {
    fn name(&self) -> &'static str {
        "flickr"
    }

    fn description(&self) -> &'static str {
        "Flickr geotagged photo search"
    }

    async fn search(&self, center: Coordinate, params: &SearchParams) -> Result<Vec<PhotoUrl>> {
        center.validate()?;

        let query = merge_query(self.base_query(), params.to_query_pairs(center));
        let url = format!("{}?{}", FLICKR_REST_URL, encode_query(&query));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Flickr request failed: {}", e)))?;

        let status = response.status().as_u16();

        // a non-2xx body is not what was asked for, drop it unread
        let body = if response.status().is_success() {
            response
                .bytes()
                .await
                .map_err(|e| Error::Transport(format!("Failed to read Flickr response: {}", e)))?
                .to_vec()
        } else {
            Vec::new()
        };

        Self::decode(status, &body)
    }
}

/// Merge base and call-specific query pairs
///
/// Call-specific keys take precedence on collision, so per-search parameters
/// can override any of the convenience defaults.
fn merge_query(
    base: Vec<(&'static str, String)>,
    call: Vec<(&'static str, String)>,
) -> Vec<(&'static str, String)> {
    let mut merged = base;
    for (key, value) in call {
        if let Some(existing) = merged.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            merged.push((key, value));
        }
    }
    merged
}

/// Percent-encode pairs into a query string
fn encode_query(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_photo() {
        let body = br#"{"photos":{"photo":[{"farm":1,"server":"2","id":"3","secret":"4"}]}}"#;
        let urls = FlickrClient::decode(200, body).unwrap();

        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].as_str(), "https://farm1.staticflickr.com/2/3_4_c.jpg");
    }

    #[test]
    fn test_decode_preserves_response_order() {
        let body = br#"{"photos":{"photo":[
            {"farm":1,"server":"a","id":"1","secret":"x"},
            {"farm":2,"server":"b","id":"2","secret":"y"},
            {"farm":3,"server":"c","id":"3","secret":"z"}
        ]}}"#;
        let urls = FlickrClient::decode(200, body).unwrap();

        assert_eq!(urls.len(), 3);
        assert_eq!(urls[0].as_str(), "https://farm1.staticflickr.com/a/1_x_c.jpg");
        assert_eq!(urls[2].as_str(), "https://farm3.staticflickr.com/c/3_z_c.jpg");
    }

    #[test]
    fn test_decode_skips_entry_missing_secret() {
        let body = br#"{"photos":{"photo":[{"farm":1,"server":"2","id":"3"}]}}"#;
        let urls = FlickrClient::decode(200, body).unwrap();

        assert!(urls.is_empty());
    }

    #[test]
    fn test_decode_skips_incomplete_entries_keeps_rest() {
        let body = br#"{"photos":{"photo":[
            {"farm":1,"server":"a","id":"1"},
            {"farm":2,"server":"b","id":"2","secret":"y"},
            {"server":"c","id":"3","secret":"z"}
        ]}}"#;
        let urls = FlickrClient::decode(200, body).unwrap();

        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].as_str(), "https://farm2.staticflickr.com/b/2_y_c.jpg");
    }

    #[test]
    fn test_decode_unparseable_json() {
        let result = FlickrClient::decode(200, b"jsonFlickrApi({");
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_missing_photo_array() {
        let result = FlickrClient::decode(200, br#"{"stat":"ok"}"#);
        assert!(matches!(result, Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_decode_non_2xx_skips_body() {
        // the body is garbage; a parse attempt would surface MalformedResponse
        let result = FlickrClient::decode(500, b"not json at all");
        assert!(matches!(result, Err(Error::UnexpectedStatus(500))));
    }

    #[test]
    fn test_decode_other_2xx_accepted() {
        let body = br#"{"photos":{"photo":[]}}"#;
        let urls = FlickrClient::decode(204, body).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn test_merge_query_call_params_win() {
        let base = vec![("format", "json".to_string()), ("method", "a".to_string())];
        let call = vec![("method", "b".to_string()), ("lat", "1.5".to_string())];

        let merged = merge_query(base, call);

        assert_eq!(merged.len(), 3);
        assert!(merged.contains(&("format", "json".to_string())));
        assert!(merged.contains(&("method", "b".to_string())));
        assert!(merged.contains(&("lat", "1.5".to_string())));
    }

    #[test]
    fn test_encode_query_escapes_values() {
        let pairs = vec![("min_taken_date", "2010-01-01 00:00:01".to_string())];
        assert_eq!(encode_query(&pairs), "min_taken_date=2010-01-01%2000%3A00%3A01");
    }

    #[test]
    fn test_base_query_contents() {
        let client = FlickrClient::new("key123");
        let base = client.base_query();

        assert!(base.contains(&("api_key", "key123".to_string())));
        assert!(base.contains(&("format", "json".to_string())));
        assert!(base.contains(&("nojsoncallback", "1".to_string())));
        assert!(base.contains(&("method", "flickr.photos.search".to_string())));
    }

    #[tokio::test]
    async fn test_search_rejects_invalid_coordinates() {
        let client = FlickrClient::new("key");
        let result = client
            .search(Coordinate::new(91.0, 0.0), &SearchParams::default())
            .await;

        assert!(matches!(result, Err(Error::InvalidCoordinates(_))));
    }

    // Integration test - actually calls the Flickr API and needs a real key
    #[tokio::test]
    #[ignore = "Requires network access and a Flickr API key"]
    async fn test_live_search() {
        let key = std::env::var("FLICKR_API_KEY").unwrap();
        let client = FlickrClient::new(key);

        let urls = client
            .search(Coordinate::new(51.5074, -0.1278), &SearchParams::default())
            .await
            .unwrap();

        assert!(urls.len() <= 10);
    }
}
