use crate::tmdb::api::{self, MoviePage};
use crate::traits::{DetailBundle, MovieSource, Query};
use async_trait::async_trait;
use reelify_config::TmdbConfig;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Stateless gateway to the TMDB v3 API.
///
/// Every failure is swallowed here: callers get `None` (or an empty detail
/// slot) and the detail goes to the log.
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, language: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_key, base_url, language)
    }

    pub fn from_config(config: &TmdbConfig, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self::with_client(client, api_key, config.base_url.clone(), config.language.clone())
    }

    fn with_client(
        client: Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            client: Arc::new(client),
            api_key: api_key.into(),
            base_url: base_url.into(),
            language: language.into(),
        }
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn query(&self, query: &Query) -> Option<MoviePage> {
        let endpoint = query.endpoint();
        let params = query.params();

        match api::get_movie_page(
            &self.client,
            &self.base_url,
            &self.api_key,
            &self.language,
            endpoint,
            &params,
        )
        .await
        {
            Ok(page) => {
                info!(
                    endpoint = endpoint,
                    page = page.page,
                    results = page.results.len(),
                    total_results = page.total_results,
                    provider = "tmdb",
                    "Listing query completed"
                );
                Some(page)
            }
            Err(e) => {
                error!(endpoint = endpoint, error = %e, provider = "tmdb", "Listing query failed");
                None
            }
        }
    }

    async fn details(&self, movie_id: u64) -> DetailBundle {
        let (details, videos, providers) = futures::join!(
            api::get_movie_details(&self.client, &self.base_url, &self.api_key, &self.language, movie_id),
            api::get_movie_videos(&self.client, &self.base_url, &self.api_key, &self.language, movie_id),
            api::get_watch_providers(&self.client, &self.base_url, &self.api_key, &self.language, movie_id),
        );

        let details = details
            .map_err(|e| error!(movie_id = movie_id, error = %e, "Detail read failed"))
            .ok();
        let videos = videos
            .map_err(|e| warn!(movie_id = movie_id, error = %e, "Video read failed"))
            .ok();
        let providers = providers
            .map_err(|e| warn!(movie_id = movie_id, error = %e, "Watch provider read failed"))
            .ok();

        info!(
            movie_id = movie_id,
            details = details.is_some(),
            videos = videos.is_some(),
            providers = providers.is_some(),
            provider = "tmdb",
            "Detail fan-out joined"
        );

        DetailBundle { details, videos, providers }
    }
}
