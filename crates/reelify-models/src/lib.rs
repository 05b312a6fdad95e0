pub mod genre;
pub mod movie;
pub mod movie_id;
pub mod mood;
pub mod rating;
pub mod review;

pub use genre::{genre_name, GenreRef};
pub use movie::{Movie, DEFAULT_DURATION_MINUTES, NO_DESCRIPTION, NOT_AVAILABLE};
pub use movie_id::{IdSource, MovieId, ParseMovieIdError};
pub use mood::{genre_code_for_token, Mood, DRAMA_GENRE_CODE};
pub use rating::RatingTag;
pub use review::Review;
