pub mod error;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use tmdb::api::{
    MoviePage, ProviderEntry, RegionProviders, TmdbGenre, TmdbMovie, TmdbMovieDetails, TmdbVideo,
    TmdbVideos, TmdbWatchProviders,
};
pub use tmdb::TmdbClient;
pub use traits::{DetailBundle, MovieSource, Query};
