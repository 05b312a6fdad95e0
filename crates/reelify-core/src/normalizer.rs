use chrono::{Datelike, NaiveDate};
use reelify_config::TmdbConfig;
use reelify_models::{GenreRef, Movie, MovieId, DEFAULT_DURATION_MINUTES, NO_DESCRIPTION};
use reelify_sources::{TmdbMovie, TmdbMovieDetails, TmdbVideos, TmdbWatchProviders};

const POSTER_SIZE: &str = "w500";
const BACKDROP_SIZE: &str = "original";

/// Raw record shapes accepted by the normalizer
#[derive(Debug, Clone)]
pub enum RawRecord {
    /// Entry from a list endpoint; genres are numeric codes
    List(TmdbMovie),
    /// Result of the detail fan-out; genres are named
    Detail {
        details: TmdbMovieDetails,
        videos: Option<TmdbVideos>,
        providers: Option<TmdbWatchProviders>,
    },
    /// Already canonical (fallback catalog, cached listing)
    Local(Movie),
}

/// Turns raw records into canonical [`Movie`]s. Total: every missing field
/// has a default, nothing here can fail.
#[derive(Debug, Clone)]
pub struct Normalizer {
    image_base_url: String,
    region: String,
}

impl Normalizer {
    pub fn new(image_base_url: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            image_base_url: image_base_url.into(),
            region: region.into(),
        }
    }

    pub fn from_config(config: &TmdbConfig) -> Self {
        Self::new(config.image_base_url.clone(), config.region.clone())
    }

    pub fn normalize(&self, record: RawRecord) -> Movie {
        match record {
            RawRecord::List(raw) => self.from_list(raw),
            RawRecord::Detail {
                details,
                videos,
                providers,
            } => self.from_detail(details, videos, providers),
            RawRecord::Local(movie) => movie,
        }
    }

    pub fn normalize_list(&self, records: Vec<TmdbMovie>) -> Vec<Movie> {
        records
            .into_iter()
            .map(|raw| self.normalize(RawRecord::List(raw)))
            .collect()
    }

    fn from_list(&self, raw: TmdbMovie) -> Movie {
        let title = raw.title.unwrap_or_default();
        Movie {
            id: MovieId::tmdb(raw.id),
            original_title: non_empty(raw.original_title).unwrap_or_else(|| title.clone()),
            title,
            year: parse_year(raw.release_date.as_deref()),
            duration_minutes: DEFAULT_DURATION_MINUTES,
            rating: raw.vote_average.map(round_score),
            imdb_rating: raw.vote_average.map(round_score),
            poster_url: self.image_url(POSTER_SIZE, raw.poster_path.as_deref()),
            backdrop_url: self.image_url(BACKDROP_SIZE, raw.backdrop_path.as_deref()),
            overview: non_empty(raw.overview).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            genres: raw.genre_ids.into_iter().map(GenreRef::Code).collect(),
            reason: None,
            trailer_key: None,
            platforms: None,
            keywords: Vec::new(),
        }
    }

    fn from_detail(
        &self,
        details: TmdbMovieDetails,
        videos: Option<TmdbVideos>,
        providers: Option<TmdbWatchProviders>,
    ) -> Movie {
        let title = details.title.unwrap_or_default();
        Movie {
            id: MovieId::tmdb(details.id),
            original_title: non_empty(details.original_title).unwrap_or_else(|| title.clone()),
            title,
            year: parse_year(details.release_date.as_deref()),
            duration_minutes: details
                .runtime
                .filter(|r| *r > 0)
                .unwrap_or(DEFAULT_DURATION_MINUTES),
            rating: details.vote_average.map(round_score),
            imdb_rating: details.vote_average.map(round_score),
            poster_url: self.image_url(POSTER_SIZE, details.poster_path.as_deref()),
            backdrop_url: self.image_url(BACKDROP_SIZE, details.backdrop_path.as_deref()),
            overview: non_empty(details.overview).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            genres: details
                .genres
                .into_iter()
                .filter_map(|g| match (g.name.is_empty(), g.id) {
                    (false, _) => Some(GenreRef::Named(g.name)),
                    (true, 0) => None,
                    (true, code) => Some(GenreRef::Code(code)),
                })
                .collect(),
            reason: None,
            trailer_key: videos
                .as_ref()
                .and_then(|v| v.trailer_key())
                .map(str::to_string),
            platforms: providers.map(|p| p.flatrate_names(&self.region)),
            keywords: Vec::new(),
        }
    }

    fn image_url(&self, size: &str, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.is_empty()).map(|p| {
            format!("{}/{}{}", self.image_base_url.trim_end_matches('/'), size, p)
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn round_score(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}

/// `YYYY-MM-DD` via chrono, else a leading 4-digit year, else nothing.
pub fn parse_year(release_date: Option<&str>) -> Option<u16> {
    let date = release_date?.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return u16::try_from(parsed.year()).ok();
    }
    let prefix = date.get(..4)?;
    if prefix.chars().all(|c| c.is_ascii_digit()) {
        prefix.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelify_sources::{TmdbGenre, TmdbVideo};
    use serde_json::json;

    fn normalizer() -> Normalizer {
        Normalizer::new("https://image.tmdb.org/t/p", "TR")
    }

    fn list_record() -> TmdbMovie {
        serde_json::from_value(json!({
            "id": 27205,
            "title": "Başlangıç",
            "original_title": "Inception",
            "release_date": "2010-07-15",
            "vote_average": 8.369,
            "poster_path": "/poster.jpg",
            "backdrop_path": "/backdrop.jpg",
            "overview": "Dreams within dreams.",
            "genre_ids": [28, 878]
        }))
        .unwrap()
    }

    fn bare_details(id: u64) -> TmdbMovieDetails {
        serde_json::from_value(json!({ "id": id })).unwrap()
    }

    #[test]
    fn test_list_record() {
        let movie = normalizer().normalize(RawRecord::List(list_record()));
        assert_eq!(movie.id, MovieId::tmdb(27205));
        assert_eq!(movie.original_title, "Inception");
        assert_eq!(movie.year, Some(2010));
        assert_eq!(movie.rating, Some(8.4));
        assert_eq!(movie.duration_minutes, DEFAULT_DURATION_MINUTES);
        assert_eq!(
            movie.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert_eq!(
            movie.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/original/backdrop.jpg")
        );
        assert_eq!(movie.genres, vec![GenreRef::Code(28), GenreRef::Code(878)]);
        assert!(movie.trailer_key.is_none());
        assert!(movie.platforms.is_none());
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let raw: TmdbMovie = serde_json::from_value(json!({ "id": 1, "title": "Untitled" })).unwrap();
        let movie = normalizer().normalize(RawRecord::List(raw));
        assert_eq!(movie.year, None);
        assert_eq!(movie.year_label(), "N/A");
        assert_eq!(movie.rating_label(), "N/A");
        assert_eq!(movie.original_title, "Untitled");
        assert_eq!(movie.overview, NO_DESCRIPTION);
        assert!(movie.poster_url.is_none());
        assert!(movie.genres.is_empty());
    }

    #[test]
    fn test_detail_with_all_slots() {
        let mut details = bare_details(603);
        details.title = Some("Matrix".to_string());
        details.original_title = Some("The Matrix".to_string());
        details.release_date = Some("1999-03-30".to_string());
        details.runtime = Some(136);
        details.genres = vec![TmdbGenre { id: 28, name: "Aksiyon".to_string() }];

        let videos = TmdbVideos {
            results: vec![TmdbVideo {
                key: "vKQi3bBA1y8".to_string(),
                site: Some("YouTube".to_string()),
                video_type: Some("Trailer".to_string()),
            }],
        };
        let providers: TmdbWatchProviders = serde_json::from_value(json!({
            "results": { "TR": { "flatrate": [{ "provider_name": "Netflix" }] } }
        }))
        .unwrap();

        let movie = normalizer().normalize(RawRecord::Detail {
            details,
            videos: Some(videos),
            providers: Some(providers),
        });
        assert_eq!(movie.duration_minutes, 136);
        assert_eq!(movie.genres, vec![GenreRef::named("Aksiyon")]);
        assert_eq!(movie.trailer_key.as_deref(), Some("vKQi3bBA1y8"));
        assert_eq!(movie.platforms, Some(vec!["Netflix".to_string()]));
    }

    #[test]
    fn test_detail_genre_without_name_keeps_code() {
        let mut details = bare_details(603);
        details.genres = vec![
            TmdbGenre { id: 28, name: String::new() },
            TmdbGenre { id: 0, name: String::new() },
            TmdbGenre { id: 878, name: "Bilim-Kurgu".to_string() },
        ];

        let movie = normalizer().normalize(RawRecord::Detail {
            details,
            videos: None,
            providers: None,
        });
        assert_eq!(movie.genres, vec![GenreRef::Code(28), GenreRef::named("Bilim-Kurgu")]);
    }

    #[test]
    fn test_detail_only_base_read() {
        let mut details = bare_details(550);
        details.title = Some("Dövüş Kulübü".to_string());
        details.release_date = Some("1999-10-15".to_string());
        details.overview = Some("An insomniac office worker...".to_string());

        let movie = normalizer().normalize(RawRecord::Detail {
            details,
            videos: None,
            providers: None,
        });
        assert_eq!(movie.title, "Dövüş Kulübü");
        assert_eq!(movie.year, Some(1999));
        assert_eq!(movie.overview, "An insomniac office worker...");
        assert!(movie.trailer_key.is_none());
        assert!(movie.platforms.is_none());
    }

    #[test]
    fn test_local_record_is_unchanged() {
        let movie = normalizer().normalize(RawRecord::List(list_record()));
        let again = normalizer().normalize(RawRecord::Local(movie.clone()));
        assert_eq!(again, movie);
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year(Some("2019-05-30")), Some(2019));
        assert_eq!(parse_year(Some("2021")), Some(2021));
        assert_eq!(parse_year(Some("2021-13-99")), Some(2021));
        assert_eq!(parse_year(Some("")), None);
        assert_eq!(parse_year(Some("soon")), None);
        assert_eq!(parse_year(None), None);
    }
}
