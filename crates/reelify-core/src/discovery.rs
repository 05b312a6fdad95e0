use crate::catalog::Catalog;
use crate::error::{CoreError, Result};
use crate::normalizer::{Normalizer, RawRecord};
use crate::selection::{self, IDEA_POOL_SIZE, SURPRISE_REASON};
use crate::session::{Listing, SessionState};
use rand::Rng;
use reelify_models::{Mood, Movie, MovieId};
use reelify_sources::{MovieSource, Query};
use tracing::{debug, info, warn};

pub const POPULAR_HEADING: &str = "Popular movies";

pub fn search_heading(query: &str) -> String {
    format!("Results for \"{}\"", query)
}

pub fn mood_heading(mood: Mood) -> String {
    format!("{} picks for your mood", mood.label())
}

fn mood_reason(mood: Mood) -> String {
    format!("Matches your mood: {}", mood.label())
}

/// One fetch + normalize + select entry point per user-facing action.
///
/// Remote reads go through the [`MovieSource`]; empty answers fall back to
/// the local [`Catalog`].
pub struct Discovery<S: MovieSource> {
    source: S,
    normalizer: Normalizer,
    catalog: Catalog,
}

impl<S: MovieSource> Discovery<S> {
    pub fn new(source: S, normalizer: Normalizer, catalog: Catalog) -> Self {
        Self {
            source,
            normalizer,
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Popular feed. Clears any active mood or search.
    pub async fn load_popular(&self, session: &mut SessionState, page: u32) -> Listing {
        session.current_mood = None;
        session.current_query = None;
        self.popular_page(session, page).await
    }

    /// Blank queries go back to the popular feed
    pub async fn search(&self, session: &mut SessionState, query: &str) -> Listing {
        let query = query.trim();
        if query.is_empty() {
            return self.load_popular(session, 1).await;
        }

        session.current_mood = None;
        session.current_query = Some(query.to_string());
        self.search_page(session, query, 1).await
    }

    /// Selecting the active mood again clears it and shows the popular feed
    pub async fn select_mood(&self, session: &mut SessionState, mood: Mood) -> Listing {
        if session.current_mood == Some(mood) {
            debug!(mood = %mood, "Mood deselected");
            return self.load_popular(session, 1).await;
        }

        session.current_mood = Some(mood);
        session.current_query = None;
        self.mood_page(session, mood, 1).await
    }

    /// Next page of whatever feed is active
    pub async fn load_more(&self, session: &mut SessionState) -> Listing {
        let page = session.current_page.max(1) + 1;
        if let Some(mood) = session.current_mood {
            self.mood_page(session, mood, page).await
        } else if let Some(query) = session.current_query.clone() {
            self.search_page(session, &query, page).await
        } else {
            self.popular_page(session, page).await
        }
    }

    /// One movie from a random page of the popularity feed
    pub async fn surprise<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Movie> {
        let page = selection::surprise_page(rng);
        let picked = match self.source.query(&Query::Discover { genre: None, page }).await {
            Some(result) if !result.results.is_empty() => selection::pick_uniform(&result.results, rng)
                .cloned()
                .map(|raw| self.normalizer.normalize(RawRecord::List(raw))),
            _ => {
                info!(page = page, fallback = self.catalog.len(), "Surprise feed empty, using fallback catalog");
                selection::pick_uniform(self.catalog.all(), rng).cloned()
            }
        };

        picked.map(|movie| movie.with_reason(SURPRISE_REASON))
    }

    /// One of the ten best rated movies
    pub async fn idea<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Movie> {
        let picked = match self.source.query(&Query::TopRated { page: 1 }).await {
            Some(result) if !result.results.is_empty() => selection::pick_idea(&result.results, rng)
                .cloned()
                .map(|raw| self.normalizer.normalize(RawRecord::List(raw))),
            _ => {
                info!(fallback = self.catalog.len(), "Top rated feed empty, using fallback catalog");
                let top = self.catalog.top_rated(IDEA_POOL_SIZE);
                selection::pick_idea(&top, rng).cloned()
            }
        };

        picked.map(|movie| {
            let reason = selection::idea_reason(&movie);
            movie.with_reason(reason)
        })
    }

    /// Full record for the detail view.
    ///
    /// Local ids come from the catalog. Remote ids go through the detail
    /// fan-out; when that fails the movie from the current listing is used.
    pub async fn open_movie(&self, session: &SessionState, id: MovieId) -> Result<Movie> {
        let cached = session.cached_movie(&id);

        let loaded = if id.is_local() {
            self.catalog.find(&id).cloned()
        } else {
            let bundle = self.source.details(id.id).await;
            bundle.details.map(|details| {
                self.normalizer.normalize(RawRecord::Detail {
                    details,
                    videos: bundle.videos,
                    providers: bundle.providers,
                })
            })
        };

        match (loaded, cached) {
            // Keep the reason the movie was surfaced with
            (Some(movie), Some(cached)) if movie.reason.is_none() => Ok(match &cached.reason {
                Some(reason) => movie.with_reason(reason.clone()),
                None => movie,
            }),
            (Some(movie), _) => Ok(movie),
            (None, Some(cached)) => {
                warn!(
                    source = self.source.source_name(),
                    movie_id = %id,
                    "Detail read failed, showing cached listing entry"
                );
                Ok(cached.clone())
            }
            (None, None) => Err(CoreError::MovieUnavailable(id)),
        }
    }

    async fn popular_page(&self, session: &mut SessionState, page: u32) -> Listing {
        let ticket = session.begin_request();
        let listing = match self.remote_listing(&Query::Popular { page }, POPULAR_HEADING.to_string(), None).await {
            Some(listing) => listing,
            None if page <= 1 => {
                info!(
                    source = self.source.source_name(),
                    fallback = self.catalog.len(),
                    "Popular feed empty, using fallback catalog"
                );
                Listing {
                    heading: POPULAR_HEADING.to_string(),
                    total_results: self.catalog.len() as u64,
                    page: 1,
                    movies: self.catalog.all().to_vec(),
                }
            }
            None => empty_listing(POPULAR_HEADING.to_string(), page),
        };
        session.apply_listing(ticket, &listing);
        listing
    }

    async fn search_page(&self, session: &mut SessionState, query: &str, page: u32) -> Listing {
        let ticket = session.begin_request();
        let heading = search_heading(query);
        let remote = Query::Search {
            query: query.to_string(),
            page,
        };
        let listing = match self.remote_listing(&remote, heading.clone(), None).await {
            Some(listing) => listing,
            None if page <= 1 => {
                let movies = self.catalog.search(query);
                info!(query = query, matches = movies.len(), "Search empty, using fallback catalog");
                Listing {
                    heading,
                    total_results: movies.len() as u64,
                    page: 1,
                    movies,
                }
            }
            None => empty_listing(heading, page),
        };
        session.apply_listing(ticket, &listing);
        listing
    }

    async fn mood_page(&self, session: &mut SessionState, mood: Mood, page: u32) -> Listing {
        let ticket = session.begin_request();
        let heading = mood_heading(mood);
        let remote = Query::Discover {
            genre: Some(mood.genre_code()),
            page,
        };
        let listing = match self.remote_listing(&remote, heading.clone(), Some(mood_reason(mood))).await {
            Some(listing) => listing,
            None if page <= 1 => {
                let movies: Vec<Movie> = self
                    .catalog
                    .for_mood(mood)
                    .into_iter()
                    .map(|m| m.with_reason(mood_reason(mood)))
                    .collect();
                info!(mood = %mood, matches = movies.len(), "Mood feed empty, using fallback catalog");
                Listing {
                    heading,
                    total_results: movies.len() as u64,
                    page: 1,
                    movies,
                }
            }
            None => empty_listing(heading, page),
        };
        session.apply_listing(ticket, &listing);
        listing
    }

    /// `None` when the read failed or came back empty
    async fn remote_listing(&self, query: &Query, heading: String, reason: Option<String>) -> Option<Listing> {
        let result = self.source.query(query).await?;
        if result.results.is_empty() {
            return None;
        }

        let movies = self
            .normalizer
            .normalize_list(result.results)
            .into_iter()
            .map(|m| match &reason {
                Some(reason) => m.with_reason(reason.clone()),
                None => m,
            })
            .collect();

        Some(Listing {
            heading,
            total_results: result.total_results,
            page: query.page().max(1),
            movies,
        })
    }
}

fn empty_listing(heading: String, page: u32) -> Listing {
    Listing {
        heading,
        total_results: 0,
        page,
        movies: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rand::rngs::mock::StepRng;
    use reelify_sources::{DetailBundle, MoviePage, TmdbMovie, TmdbMovieDetails};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubSource {
        pages: Vec<(Query, MoviePage)>,
        details: HashMap<u64, DetailBundle>,
        calls: Mutex<Vec<Query>>,
    }

    impl StubSource {
        fn with_page(mut self, query: Query, results: Vec<TmdbMovie>) -> Self {
            let page = MoviePage {
                page: query.page(),
                total_pages: 10,
                total_results: 200,
                results,
            };
            self.pages.push((query, page));
            self
        }

        fn with_details(mut self, id: u64, bundle: DetailBundle) -> Self {
            self.details.insert(id, bundle);
            self
        }

        fn calls(&self) -> Vec<Query> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MovieSource for StubSource {
        fn source_name(&self) -> &str {
            "stub"
        }

        async fn query(&self, query: &Query) -> Option<MoviePage> {
            self.calls.lock().unwrap().push(query.clone());
            self.pages
                .iter()
                .find(|(q, _)| q == query)
                .map(|(_, page)| page.clone())
        }

        async fn details(&self, movie_id: u64) -> DetailBundle {
            self.details.get(&movie_id).cloned().unwrap_or_default()
        }
    }

    fn raw(id: u64, title: &str, rating: f64) -> TmdbMovie {
        serde_json::from_value(json!({
            "id": id,
            "title": title,
            "vote_average": rating,
            "release_date": "2020-01-01",
            "genre_ids": [18]
        }))
        .unwrap()
    }

    fn discovery(source: StubSource) -> Discovery<StubSource> {
        Discovery::new(
            source,
            Normalizer::new("https://image.tmdb.org/t/p", "TR"),
            Catalog::builtin(),
        )
    }

    #[tokio::test]
    async fn test_popular_remote() {
        let d = discovery(StubSource::default().with_page(
            Query::Popular { page: 1 },
            vec![raw(1, "One", 7.0), raw(2, "Two", 6.0)],
        ));
        let mut session = SessionState::new();

        let listing = d.load_popular(&mut session, 1).await;
        assert_eq!(listing.heading, POPULAR_HEADING);
        assert_eq!(listing.total_results, 200);
        assert_eq!(listing.movies.len(), 2);
        assert_eq!(session.current_movies.len(), 2);
    }

    #[tokio::test]
    async fn test_popular_empty_falls_back_to_catalog() {
        let d = discovery(StubSource::default());
        let mut session = SessionState::new();

        let listing = d.load_popular(&mut session, 1).await;
        assert_eq!(listing.movies.len(), d.catalog().len());
        assert_eq!(listing.total_results, d.catalog().len() as u64);
        assert_eq!(listing.movies, d.catalog().all().to_vec());
    }

    #[tokio::test]
    async fn test_popular_empty_later_page_has_no_fallback() {
        let d = discovery(StubSource::default());
        let mut session = SessionState::new();
        d.load_popular(&mut session, 1).await;

        let more = d.load_more(&mut session).await;
        assert_eq!(more.page, 2);
        assert!(more.movies.is_empty());
        assert_eq!(session.current_movies.len(), d.catalog().len());
    }

    #[tokio::test]
    async fn test_search_remote_and_local_fallback() {
        let d = discovery(StubSource::default().with_page(
            Query::Search { query: "fight".to_string(), page: 1 },
            vec![raw(550, "Fight Club", 8.4)],
        ));
        let mut session = SessionState::new();

        let listing = d.search(&mut session, "  fight ").await;
        assert_eq!(listing.heading, "Results for \"fight\"");
        assert_eq!(listing.movies[0].id, MovieId::tmdb(550));
        assert_eq!(session.current_query.as_deref(), Some("fight"));

        let local = d.search(&mut session, "prison").await;
        assert_eq!(local.total_results, 2);
        assert!(local.movies.iter().all(|m| m.id.is_local()));
    }

    #[tokio::test]
    async fn test_blank_search_shows_popular_and_clears_mood() {
        let d = discovery(StubSource::default());
        let mut session = SessionState::new();
        session.current_mood = Some(Mood::Happy);

        let listing = d.search(&mut session, "   ").await;
        assert_eq!(listing.heading, POPULAR_HEADING);
        assert_eq!(session.current_mood, None);
        assert_eq!(session.current_query, None);
    }

    #[tokio::test]
    async fn test_mood_discovery_uses_genre_code() {
        let source = StubSource::default().with_page(
            Query::Discover { genre: Some(27), page: 1 },
            vec![raw(694, "The Shining", 8.2)],
        );
        let d = discovery(source);
        let mut session = SessionState::new();

        let listing = d.select_mood(&mut session, Mood::Scared).await;
        assert_eq!(listing.heading, "😱 Scared picks for your mood");
        assert_eq!(listing.movies.len(), 1);
        assert!(listing.movies[0].reason.is_some());
        assert_eq!(session.current_mood, Some(Mood::Scared));
    }

    #[tokio::test]
    async fn test_mood_empty_uses_catalog_genre() {
        let d = discovery(StubSource::default());
        let mut session = SessionState::new();

        let listing = d.select_mood(&mut session, Mood::Romantic).await;
        assert!(!listing.movies.is_empty());
        assert_eq!(listing.movies.len(), d.catalog().for_mood(Mood::Romantic).len());
    }

    #[tokio::test]
    async fn test_selecting_active_mood_clears_it() {
        let d = discovery(StubSource::default());
        let mut session = SessionState::new();

        d.select_mood(&mut session, Mood::Sad).await;
        let listing = d.select_mood(&mut session, Mood::Sad).await;
        assert_eq!(session.current_mood, None);
        assert_eq!(listing.heading, POPULAR_HEADING);
        assert_eq!(d.source().calls().last(), Some(&Query::Popular { page: 1 }));
    }

    #[tokio::test]
    async fn test_load_more_continues_mood() {
        let source = StubSource::default()
            .with_page(Query::Discover { genre: Some(35), page: 1 }, vec![raw(1, "A", 7.0)])
            .with_page(Query::Discover { genre: Some(35), page: 2 }, vec![raw(2, "B", 7.0)]);
        let d = discovery(source);
        let mut session = SessionState::new();

        d.select_mood(&mut session, Mood::Happy).await;
        let more = d.load_more(&mut session).await;
        assert_eq!(more.page, 2);
        assert_eq!(session.current_page, 2);
        assert_eq!(session.current_movies.len(), 2);
    }

    #[tokio::test]
    async fn test_load_more_continues_search() {
        let source = StubSource::default()
            .with_page(
                Query::Search { query: "star wars".to_string(), page: 1 },
                vec![raw(11, "Star Wars", 8.2)],
            )
            .with_page(
                Query::Search { query: "star wars".to_string(), page: 2 },
                vec![raw(1891, "The Empire Strikes Back", 8.4)],
            );
        let d = discovery(source);
        let mut session = SessionState::new();

        d.search(&mut session, "  star wars ").await;
        let more = d.load_more(&mut session).await;
        assert_eq!(more.page, 2);
        assert_eq!(more.heading, search_heading("star wars"));
        assert_eq!(
            d.source().calls().last(),
            Some(&Query::Search { query: "star wars".to_string(), page: 2 })
        );
        assert_eq!(session.current_page, 2);
        assert_eq!(session.current_query.as_deref(), Some("star wars"));
        let ids: Vec<_> = session.current_movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![MovieId::tmdb(11), MovieId::tmdb(1891)]);
    }

    #[tokio::test]
    async fn test_surprise_picks_from_feed() {
        let d = discovery(StubSource::default().with_page(
            Query::Discover { genre: None, page: 1 },
            vec![raw(10, "First", 6.1), raw(11, "Second", 7.3)],
        ));

        let movie = d.surprise(&mut StepRng::new(0, 0)).await.unwrap();
        assert_eq!(movie.id, MovieId::tmdb(10));
        assert_eq!(movie.reason.as_deref(), Some(SURPRISE_REASON));
    }

    #[tokio::test]
    async fn test_surprise_falls_back_to_catalog() {
        let d = discovery(StubSource::default());
        let movie = d.surprise(&mut StepRng::new(0, 0)).await.unwrap();
        assert_eq!(movie.id, d.catalog().all()[0].id);
        assert_eq!(movie.reason.as_deref(), Some(SURPRISE_REASON));
    }

    #[tokio::test]
    async fn test_surprise_with_empty_catalog_is_none() {
        let d = Discovery::new(
            StubSource::default(),
            Normalizer::new("https://image.tmdb.org/t/p", "TR"),
            Catalog::empty(),
        );
        assert!(d.surprise(&mut StepRng::new(0, 0)).await.is_none());
        assert!(d.idea(&mut StepRng::new(0, 0)).await.is_none());
    }

    #[tokio::test]
    async fn test_idea_reason_reports_rating() {
        let d = discovery(StubSource::default().with_page(
            Query::TopRated { page: 1 },
            vec![raw(238, "The Godfather", 8.7), raw(278, "Shawshank", 8.7)],
        ));

        let movie = d.idea(&mut StepRng::new(0, 0)).await.unwrap();
        assert_eq!(movie.id, MovieId::tmdb(238));
        assert_eq!(movie.reason.as_deref(), Some("⭐ Rated 8.7, one of the best!"));
    }

    #[tokio::test]
    async fn test_idea_fallback_uses_best_rated() {
        let d = discovery(StubSource::default());
        let movie = d.idea(&mut StepRng::new(0, 0)).await.unwrap();
        assert_eq!(movie.original_title, "The Shawshank Redemption");
        assert_eq!(movie.reason.as_deref(), Some("⭐ Rated 9.3, one of the best!"));
    }

    #[tokio::test]
    async fn test_open_local_movie() {
        let d = discovery(StubSource::default());
        let movie = d.open_movie(&SessionState::new(), MovieId::local(8)).await.unwrap();
        assert_eq!(movie.original_title, "The Matrix");
    }

    #[tokio::test]
    async fn test_open_remote_movie_with_partial_fan_out() {
        let details: TmdbMovieDetails = serde_json::from_value(json!({
            "id": 550,
            "title": "Dövüş Kulübü",
            "release_date": "1999-10-15",
            "overview": "An insomniac office worker..."
        }))
        .unwrap();
        let d = discovery(StubSource::default().with_details(
            550,
            DetailBundle {
                details: Some(details),
                videos: None,
                providers: None,
            },
        ));

        let movie = d.open_movie(&SessionState::new(), MovieId::tmdb(550)).await.unwrap();
        assert_eq!(movie.title, "Dövüş Kulübü");
        assert_eq!(movie.year, Some(1999));
        assert!(movie.trailer_key.is_none());
        assert!(movie.platforms.is_none());
    }

    #[tokio::test]
    async fn test_open_movie_falls_back_to_cached_listing() {
        let d = discovery(StubSource::default().with_page(
            Query::Popular { page: 1 },
            vec![raw(42, "Cached", 7.7)],
        ));
        let mut session = SessionState::new();
        d.load_popular(&mut session, 1).await;

        let movie = d.open_movie(&session, MovieId::tmdb(42)).await.unwrap();
        assert_eq!(movie.title, "Cached");
    }

    #[tokio::test]
    async fn test_open_local_pick_keeps_reason() {
        let d = discovery(StubSource::default());
        let picked = d.surprise(&mut StepRng::new(0, 0)).await.unwrap();

        let mut session = SessionState::new();
        let ticket = session.begin_request();
        session.apply_listing(
            ticket,
            &Listing {
                heading: String::new(),
                total_results: 1,
                page: 1,
                movies: vec![picked.clone()],
            },
        );

        let movie = d.open_movie(&session, picked.id).await.unwrap();
        assert_eq!(movie.reason.as_deref(), Some(SURPRISE_REASON));
    }

    #[tokio::test]
    async fn test_open_movie_unavailable() {
        let d = discovery(StubSource::default());
        let err = d
            .open_movie(&SessionState::new(), MovieId::tmdb(999))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::MovieUnavailable(id) if id == MovieId::tmdb(999)));

        let err = d
            .open_movie(&SessionState::new(), MovieId::local(999))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::MovieUnavailable(_)));
    }
}
