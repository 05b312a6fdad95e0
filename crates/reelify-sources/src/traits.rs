use async_trait::async_trait;
use crate::tmdb::api::{MoviePage, TmdbMovieDetails, TmdbVideos, TmdbWatchProviders};

/// Parameterized read-only listing queries.
///
/// Pagination is owned by the caller; every variant carries its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Popular { page: u32 },
    Search { query: String, page: u32 },
    /// Popularity-sorted discovery feed, optionally filtered by genre code
    Discover { genre: Option<u32>, page: u32 },
    TopRated { page: u32 },
}

impl Query {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Query::Popular { .. } => "/movie/popular",
            Query::Search { .. } => "/search/movie",
            Query::Discover { .. } => "/discover/movie",
            Query::TopRated { .. } => "/movie/top_rated",
        }
    }

    pub fn page(&self) -> u32 {
        match self {
            Query::Popular { page }
            | Query::Search { page, .. }
            | Query::Discover { page, .. }
            | Query::TopRated { page } => *page,
        }
    }

    /// Endpoint-specific parameters (credential and locale are added by the client)
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        match self {
            Query::Popular { .. } | Query::TopRated { .. } => {}
            Query::Search { query, .. } => {
                params.push(("query", query.clone()));
            }
            Query::Discover { genre, .. } => {
                if let Some(code) = genre {
                    params.push(("with_genres", code.to_string()));
                }
                params.push(("sort_by", "popularity.desc".to_string()));
            }
        }
        params.push(("page", self.page().max(1).to_string()));
        params
    }
}

/// Result of the three-way detail fan-out. Each slot is absent when its read
/// failed; there is no retry.
#[derive(Debug, Clone, Default)]
pub struct DetailBundle {
    pub details: Option<TmdbMovieDetails>,
    pub videos: Option<TmdbVideos>,
    pub providers: Option<TmdbWatchProviders>,
}

#[async_trait]
pub trait MovieSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Run a listing query. `None` signals a failed read (already logged);
    /// an empty page is a valid answer.
    async fn query(&self, query: &Query) -> Option<MoviePage>;

    /// Detail + videos + watch providers, issued concurrently and joined
    async fn details(&self, movie_id: u64) -> DetailBundle;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_params() {
        let query = Query::Discover { genre: Some(27), page: 3 };
        assert_eq!(query.endpoint(), "/discover/movie");
        assert_eq!(
            query.params(),
            vec![
                ("with_genres", "27".to_string()),
                ("sort_by", "popularity.desc".to_string()),
                ("page", "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_unfiltered_discover_has_no_genre() {
        let params = Query::Discover { genre: None, page: 42 }.params();
        assert!(params.iter().all(|(k, _)| *k != "with_genres"));
    }

    #[test]
    fn test_search_params_and_page_floor() {
        let query = Query::Search { query: "matrix".to_string(), page: 0 };
        assert_eq!(query.endpoint(), "/search/movie");
        assert_eq!(
            query.params(),
            vec![("query", "matrix".to_string()), ("page", "1".to_string())]
        );
    }
}
