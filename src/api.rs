//! API client for the remote show catalog.
//!
//! The catalog speaks the TVMaze REST dialect: `GET /shows` lists every show
//! and `GET /shows/{id}/episodes` lists one show's episodes. Each call makes
//! exactly one request; there is no retry.

use crate::error::{AppError, Result};
use crate::types::{Episode, Image, Show};
use log::{debug, warn};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// Default catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

const USER_AGENT: &str = concat!("show-browser/", env!("CARGO_PKG_VERSION"));

/// A source of show and episode data.
///
/// Implementations perform one fetch per call and never cache; caching is
/// layered on top by [`crate::cache::CachedCatalog`].
pub trait CatalogClient {
    /// Fetch the full show list.
    fn fetch_show_list(&self) -> impl Future<Output = Result<Vec<Show>>>;

    /// Fetch every episode of one show.
    fn fetch_episodes(&self, show_id: u32) -> impl Future<Output = Result<Vec<Episode>>>;
}

// Wire types mirroring the catalog's JSON. Nullable fields are optional here
// and resolved during conversion.

#[derive(Debug, Deserialize)]
struct WireImage {
    #[serde(default)]
    medium: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireRating {
    #[serde(default)]
    average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireShow {
    id: u32,
    name: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    image: Option<WireImage>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    rating: Option<WireRating>,
    #[serde(default)]
    runtime: Option<u32>,
    #[serde(default)]
    premiered: Option<String>,
    #[serde(default)]
    ended: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireEpisode {
    id: u32,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    season: Option<u32>,
    #[serde(default)]
    number: Option<u32>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    image: Option<WireImage>,
}

fn convert_image(image: Option<WireImage>) -> Option<Image> {
    image
        .and_then(|i| i.medium)
        .filter(|url| !url.is_empty())
        .map(|medium| Image { medium })
}

fn convert_show(raw: WireShow) -> Show {
    Show {
        id: raw.id,
        name: raw.name,
        summary: raw.summary.unwrap_or_default(),
        genres: raw.genres,
        image: convert_image(raw.image),
        status: raw.status.unwrap_or_else(|| "Unknown".to_string()),
        rating: raw.rating.and_then(|r| r.average),
        runtime: raw.runtime,
        premiered: raw.premiered,
        ended: raw.ended,
    }
}

fn convert_episode(raw: WireEpisode) -> Result<Episode> {
    let name = raw
        .name
        .ok_or_else(|| AppError::Parse(format!("episode {} has no name", raw.id)))?;

    let season = raw.season.filter(|s| *s >= 1).ok_or_else(|| {
        AppError::Parse(format!("episode {} has no valid season number", raw.id))
    })?;

    let number = raw.number.filter(|n| *n >= 1).ok_or_else(|| {
        AppError::Parse(format!("episode {} has no valid episode number", raw.id))
    })?;

    Ok(Episode {
        id: raw.id,
        name,
        season,
        number,
        summary: raw.summary.unwrap_or_default(),
        image: convert_image(raw.image),
    })
}

/// Decode a `GET /shows` body.
pub fn parse_show_list(body: &str) -> Result<Vec<Show>> {
    let raw: Vec<WireShow> = serde_json::from_str(body)?;
    Ok(raw.into_iter().map(convert_show).collect())
}

/// Decode a `GET /shows/{id}/episodes` body.
///
/// Any episode without a name or with a missing season/episode number
/// fails the whole list.
pub fn parse_episodes(body: &str) -> Result<Vec<Episode>> {
    let raw: Vec<WireEpisode> = serde_json::from_str(body)?;
    raw.into_iter().map(convert_episode).collect()
}

/// Catalog client backed by reqwest.
#[derive(Debug, Clone)]
pub struct TvMazeClient {
    client: reqwest::Client,
    base_url: String,
}

impl TvMazeClient {
    /// Create a client for the given base URL.
    ///
    /// `timeout` is handed to the transport; `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET and return the body of a successful response.
    async fn get_body(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            AppError::Network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Request to {} returned {}", url, status);
            return Err(AppError::Network(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        Ok(response.text().await?)
    }
}

impl CatalogClient for TvMazeClient {
    async fn fetch_show_list(&self) -> Result<Vec<Show>> {
        let body = self.get_body("/shows").await?;
        let shows = parse_show_list(&body)?;
        debug!("Fetched {} shows", shows.len());
        Ok(shows)
    }

    async fn fetch_episodes(&self, show_id: u32) -> Result<Vec<Episode>> {
        let body = self.get_body(&format!("/shows/{}/episodes", show_id)).await?;
        let episodes = parse_episodes(&body)?;
        debug!("Fetched {} episodes for show {}", episodes.len(), show_id);
        Ok(episodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer a single request with `response` and return the base URL.
    fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            let _ = stream.write_all(response.as_bytes());
        });

        format!("http://{}", addr)
    }

    fn http_response(status: &str, content_type: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            content_type,
            body.len(),
            body
        )
    }

    const SHOW_JSON: &str = r#"[
        {
            "id": 1,
            "name": "Under the Dome",
            "summary": "<p>A small town is sealed off.</p>",
            "genres": ["Drama", "Science-Fiction", "Thriller"],
            "image": {"medium": "https://static.tvmaze.com/1.jpg", "original": "x"},
            "status": "Ended",
            "rating": {"average": 6.5},
            "runtime": 60,
            "premiered": "2013-06-24",
            "ended": "2015-09-10"
        },
        {
            "id": 2,
            "name": "Person of Interest",
            "summary": null,
            "genres": [],
            "image": null,
            "status": null,
            "rating": {"average": null},
            "runtime": null
        }
    ]"#;

    #[test]
    fn test_parse_show_list_full_record() {
        let shows = parse_show_list(SHOW_JSON).unwrap();
        assert_eq!(shows.len(), 2);

        let dome = &shows[0];
        assert_eq!(dome.id, 1);
        assert_eq!(dome.genres.len(), 3);
        assert_eq!(
            dome.image.as_ref().map(|i| i.medium.as_str()),
            Some("https://static.tvmaze.com/1.jpg")
        );
        assert_eq!(dome.rating, Some(6.5));
        assert_eq!(dome.runtime, Some(60));
        assert_eq!(dome.ended.as_deref(), Some("2015-09-10"));
    }

    #[test]
    fn test_parse_show_list_nulls_become_absent() {
        let shows = parse_show_list(SHOW_JSON).unwrap();
        let poi = &shows[1];
        assert_eq!(poi.summary, "");
        assert_eq!(poi.status, "Unknown");
        assert!(poi.image.is_none());
        assert!(poi.rating.is_none());
        assert!(poi.premiered.is_none());
    }

    #[test]
    fn test_parse_show_list_malformed_is_parse_error() {
        let err = parse_show_list("<html>Service unavailable</html>").unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_parse_show_list_wrong_shape_is_parse_error() {
        let err = parse_show_list(r#"{"id": 1, "name": "Not a list"}"#).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_parse_episodes() {
        let body = r#"[
            {"id": 10, "name": "Pilot", "season": 1, "number": 1,
             "summary": "<p>It begins.</p>", "image": {"medium": "https://x/10.jpg"}},
            {"id": 11, "name": "The Fire", "season": 1, "number": 2,
             "summary": null, "image": null}
        ]"#;

        let episodes = parse_episodes(body).unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].code(), "S01E01");
        assert!(episodes[0].image.is_some());
        assert_eq!(episodes[1].summary, "");
        assert!(episodes[1].image.is_none());
    }

    #[test]
    fn test_parse_episodes_rejects_missing_number() {
        let body = r#"[{"id": 12, "name": "Special", "season": 1, "number": null}]"#;
        let err = parse_episodes(body).unwrap_err();
        assert!(matches!(err, AppError::Parse(ref msg) if msg.contains("12")));
    }

    #[test]
    fn test_parse_episodes_rejects_season_zero() {
        let body = r#"[{"id": 13, "name": "Behind the Scenes", "season": 0, "number": 1}]"#;
        assert!(matches!(parse_episodes(body), Err(AppError::Parse(_))));
    }

    #[test]
    fn test_image_without_medium_is_absent() {
        let body = r#"[{"id": 14, "name": "Ep", "season": 1, "number": 1,
                        "image": {"original": "https://x/big.jpg"}}]"#;
        let episodes = parse_episodes(body).unwrap();
        assert!(episodes[0].image.is_none());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = TvMazeClient::new("https://api.tvmaze.com/", None).unwrap();
        assert_eq!(client.base_url(), "https://api.tvmaze.com");
    }

    #[tokio::test]
    async fn test_error_status_is_network_error() {
        let base = serve_once(http_response("404 Not Found", "text/plain", ""));
        let client = TvMazeClient::new(&base, Some(Duration::from_secs(5))).unwrap();

        let err = client.fetch_show_list().await.unwrap_err();
        assert!(matches!(err, AppError::Network(ref msg) if msg == "HTTP 404 Not Found"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let base = serve_once(http_response(
            "200 OK",
            "text/html",
            "<html>Service unavailable</html>",
        ));
        let client = TvMazeClient::new(&base, Some(Duration::from_secs(5))).unwrap();

        let err = client.fetch_episodes(82).await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind and release a port so nothing is listening on it
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let client =
            TvMazeClient::new(&format!("http://{}", addr), Some(Duration::from_secs(5))).unwrap();

        let err = client.fetch_show_list().await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
        assert!(err.is_fetch_failure());
    }

    #[tokio::test]
    async fn test_fetch_episodes_over_http() {
        let body = r#"[{"id": 4952, "name": "Winter Is Coming", "season": 1, "number": 1}]"#;
        let base = serve_once(http_response("200 OK", "application/json", body));
        let client = TvMazeClient::new(&format!("{}/", base), None).unwrap();

        let episodes = client.fetch_episodes(82).await.unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].title_line(), "Winter Is Coming - S01E01");
    }
}
