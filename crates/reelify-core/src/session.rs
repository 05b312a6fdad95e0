use reelify_models::{Mood, Movie, MovieId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Movies produced for one user action, ready to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub heading: String,
    pub total_results: u64,
    pub page: u32,
    pub movies: Vec<Movie>,
}

/// Generation number handed out when a request starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Per-session browsing state, passed by `&mut` to every handler
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub current_page: u32,
    pub current_mood: Option<Mood>,
    pub current_query: Option<String>,
    pub current_movies: Vec<Movie>,
    generation: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            current_page: 1,
            ..Self::default()
        }
    }

    /// Start a request; any ticket issued earlier becomes stale
    pub fn begin_request(&mut self) -> RequestTicket {
        self.generation += 1;
        RequestTicket(self.generation)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Apply a completed listing. Page 1 replaces the current movies, later
    /// pages append. Returns `false` when the ticket is stale and nothing
    /// changed.
    pub fn apply_listing(&mut self, ticket: RequestTicket, listing: &Listing) -> bool {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.0,
                current = self.generation,
                heading = %listing.heading,
                "Discarding stale listing"
            );
            return false;
        }

        self.current_page = listing.page.max(1);
        if listing.page <= 1 {
            self.current_movies = listing.movies.clone();
        } else {
            self.current_movies.extend(listing.movies.iter().cloned());
        }
        true
    }

    /// Movie from the listing currently on screen
    pub fn cached_movie(&self, id: &MovieId) -> Option<&Movie> {
        self.current_movies.iter().find(|m| &m.id == id)
    }
}
