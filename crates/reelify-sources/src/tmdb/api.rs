use crate::error::SourceError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Movie entry as returned by list endpoints (popular, search, discover, top rated)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbMovie {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub results: Vec<TmdbMovie>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbGenre {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbMovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TmdbVideo {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(rename = "type", default)]
    pub video_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

impl TmdbVideos {
    /// Key of the first video tagged as a trailer
    pub fn trailer_key(&self) -> Option<&str> {
        self.results
            .iter()
            .find(|v| v.video_type.as_deref() == Some("Trailer") && !v.key.is_empty())
            .map(|v| v.key.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderEntry {
    #[serde(default)]
    pub provider_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RegionProviders {
    #[serde(default)]
    pub flatrate: Vec<ProviderEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TmdbWatchProviders {
    /// Keyed by ISO 3166-1 country code
    #[serde(default)]
    pub results: HashMap<String, RegionProviders>,
}

impl TmdbWatchProviders {
    /// Flat-rate (subscription) provider names for a region
    pub fn flatrate_names(&self, region: &str) -> Vec<String> {
        self.results
            .get(region)
            .map(|r| {
                r.flatrate
                    .iter()
                    .filter(|p| !p.provider_name.is_empty())
                    .map(|p| p.provider_name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Raw list page; results are decoded one by one so a single odd entry does
/// not sink the whole page.
#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    total_pages: Option<u32>,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

/// Issue a GET against `base_url + endpoint`, always adding the credential
/// and response-locale parameters.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: &str,
    endpoint: &str,
    params: &[(&str, String)],
) -> Result<T, SourceError> {
    let url = format!("{}{}", base_url.trim_end_matches('/'), endpoint);

    let response = client
        .get(&url)
        .query(&[("api_key", api_key), ("language", language)])
        .query(params)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status { status, body });
    }

    let body = response.text().await?;
    let value: serde_json::Value = serde_json::from_str(&body)?;

    // TMDB reports some failures as a 200 with a status payload
    if value.get("success").and_then(|v| v.as_bool()) == Some(false) {
        let code = value.get("status_code").and_then(|v| v.as_i64()).unwrap_or_default();
        let message = value
            .get("status_message")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        return Err(SourceError::Api { code, message });
    }

    Ok(serde_json::from_value(value)?)
}

pub async fn get_movie_page(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: &str,
    endpoint: &str,
    params: &[(&str, String)],
) -> Result<MoviePage, SourceError> {
    let raw: RawPage = get_json(client, base_url, api_key, language, endpoint, params).await?;
    Ok(decode_page(raw))
}

fn decode_page(raw: RawPage) -> MoviePage {
    let received = raw.results.len();
    let results: Vec<TmdbMovie> = raw
        .results
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<TmdbMovie>(entry).ok())
        .collect();

    if results.len() < received {
        debug!(
            received = received,
            kept = results.len(),
            "Skipped list entries that could not be decoded"
        );
    }

    MoviePage {
        page: raw.page.unwrap_or(1),
        total_pages: raw.total_pages.unwrap_or(1),
        total_results: raw.total_results.unwrap_or(results.len() as u64),
        results,
    }
}

pub async fn get_movie_details(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: &str,
    movie_id: u64,
) -> Result<TmdbMovieDetails, SourceError> {
    let endpoint = format!("/movie/{}", movie_id);
    let params = [("append_to_response", "credits".to_string())];
    get_json(client, base_url, api_key, language, &endpoint, &params).await
}

pub async fn get_movie_videos(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: &str,
    movie_id: u64,
) -> Result<TmdbVideos, SourceError> {
    let endpoint = format!("/movie/{}/videos", movie_id);
    get_json(client, base_url, api_key, language, &endpoint, &[]).await
}

pub async fn get_watch_providers(
    client: &Client,
    base_url: &str,
    api_key: &str,
    language: &str,
    movie_id: u64,
) -> Result<TmdbWatchProviders, SourceError> {
    let endpoint = format!("/movie/{}/watch/providers", movie_id);
    get_json(client, base_url, api_key, language, &endpoint, &[]).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_page_skips_entries_without_id() {
        let raw: RawPage = serde_json::from_value(json!({
            "page": 2,
            "total_pages": 10,
            "total_results": 200,
            "results": [
                { "id": 550, "title": "Fight Club", "genre_ids": [18] },
                { "title": "No id here" },
                { "id": 603 }
            ]
        }))
        .unwrap();

        let page = decode_page(raw);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_results, 200);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].genre_ids, vec![18]);
        assert_eq!(page.results[1].title, None);
    }

    #[test]
    fn test_decode_page_defaults() {
        let raw: RawPage = serde_json::from_value(json!({})).unwrap();
        let page = decode_page(raw);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_results, 0);
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_trailer_key_picks_first_trailer() {
        let videos: TmdbVideos = serde_json::from_value(json!({
            "results": [
                { "key": "teaser1", "type": "Teaser" },
                { "key": "trailer1", "type": "Trailer", "site": "YouTube" },
                { "key": "trailer2", "type": "Trailer" }
            ]
        }))
        .unwrap();
        assert_eq!(videos.trailer_key(), Some("trailer1"));
        assert_eq!(TmdbVideos::default().trailer_key(), None);
    }

    #[test]
    fn test_flatrate_names_for_region() {
        let providers: TmdbWatchProviders = serde_json::from_value(json!({
            "id": 550,
            "results": {
                "TR": { "flatrate": [{ "provider_name": "Netflix" }, { "provider_name": "BluTV" }] },
                "US": { "rent": [{ "provider_name": "Apple TV" }] }
            }
        }))
        .unwrap();
        assert_eq!(providers.flatrate_names("TR"), vec!["Netflix", "BluTV"]);
        assert!(providers.flatrate_names("US").is_empty());
        assert!(providers.flatrate_names("DE").is_empty());
    }

    #[test]
    fn test_nested_entries_missing_fields_default() {
        let details: TmdbMovieDetails = serde_json::from_value(json!({
            "id": 603,
            "genres": [{ "id": 28 }, { "id": 878, "name": "Bilim-Kurgu" }]
        }))
        .unwrap();
        assert_eq!(details.genres[0].name, "");
        assert_eq!(details.genres[1].name, "Bilim-Kurgu");

        let videos: TmdbVideos = serde_json::from_value(json!({
            "results": [{ "type": "Trailer" }, { "key": "abc", "type": "Trailer" }]
        }))
        .unwrap();
        assert_eq!(videos.trailer_key(), Some("abc"));

        let providers: TmdbWatchProviders = serde_json::from_value(json!({
            "results": { "TR": { "flatrate": [{ "logo_path": "/x.png" }, { "provider_name": "Netflix" }] } }
        }))
        .unwrap();
        assert_eq!(providers.flatrate_names("TR"), vec!["Netflix"]);
    }
}
