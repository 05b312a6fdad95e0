use super::context::AppContext;
use super::ui::with_spinner;
use crate::output::Output;
use crate::render::{self, Marks, MovieView};
use color_eyre::Result;
use reelify_core::{review_of, Discovery, Listing, SessionState};
use reelify_models::{Mood, Movie, MovieId};
use reelify_sources::MovieSource;

pub enum Feed {
    Popular { page: u32 },
    Search { query: String },
    Mood { mood: Mood },
}

/// Load a feed, then `extra_pages` more through "load more"
pub async fn run_feed(ctx: &AppContext, feed: Feed, extra_pages: u32, output: &Output) -> Result<()> {
    let discovery = ctx.discovery(output);
    let mut session = SessionState::new();
    let spin = output.is_human() && !output.is_quiet();

    let first = with_spinner("Loading movies...", spin, async {
        match &feed {
            Feed::Popular { page } => discovery.load_popular(&mut session, *page).await,
            Feed::Search { query } => discovery.search(&mut session, query).await,
            Feed::Mood { mood } => discovery.select_mood(&mut session, *mood).await,
        }
    })
    .await;

    for _ in 0..extra_pages {
        let more = with_spinner("Loading more...", spin, discovery.load_more(&mut session)).await;
        if more.movies.is_empty() {
            tracing::debug!(page = more.page, "No more results");
            break;
        }
    }

    let listing = Listing {
        heading: first.heading,
        total_results: first.total_results,
        page: session.current_page,
        movies: session.current_movies.clone(),
    };

    let collection = ctx.collection();
    output.render(
        || render::listing_text(&listing, |id| Marks::of(&collection, id)),
        &listing,
    );
    Ok(())
}

pub async fn run_surprise(ctx: &AppContext, output: &Output) -> Result<()> {
    let discovery = ctx.discovery(output);
    let spin = output.is_human() && !output.is_quiet();

    let picked = with_spinner("Finding something for you...", spin, async {
        let mut rng = rand::thread_rng();
        discovery.surprise(&mut rng).await
    })
    .await;

    show_pick(ctx, &discovery, picked, output).await
}

pub async fn run_idea(ctx: &AppContext, output: &Output) -> Result<()> {
    let discovery = ctx.discovery(output);
    let spin = output.is_human() && !output.is_quiet();

    let picked = with_spinner("Looking through the best rated...", spin, async {
        let mut rng = rand::thread_rng();
        discovery.idea(&mut rng).await
    })
    .await;

    show_pick(ctx, &discovery, picked, output).await
}

pub async fn run_show(ctx: &AppContext, id: MovieId, output: &Output) -> Result<()> {
    let discovery = ctx.discovery(output);
    let spin = output.is_human() && !output.is_quiet();

    let movie = with_spinner("Loading details...", spin, discovery.open_movie(&SessionState::new(), id)).await?;
    print_movie(ctx, &movie, output);
    Ok(())
}

/// A pick from a list endpoint is enriched through the detail fan-out; the
/// pick itself stands in when that fails.
async fn show_pick<S: MovieSource>(
    ctx: &AppContext,
    discovery: &Discovery<S>,
    picked: Option<Movie>,
    output: &Output,
) -> Result<()> {
    let Some(picked) = picked else {
        output.warn("Nothing to suggest right now.");
        return Ok(());
    };

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

    let spin = output.is_human() && !output.is_quiet();
    let movie = with_spinner("Loading details...", spin, discovery.open_movie(&session, picked.id))
        .await
        .unwrap_or(picked);
    print_movie(ctx, &movie, output);
    Ok(())
}

fn print_movie(ctx: &AppContext, movie: &Movie, output: &Output) {
    let collection = ctx.collection();
    let view = MovieView {
        movie,
        review: review_of(movie),
        collection: Marks::of(&collection, &movie.id),
    };
    output.render(
        || render::movie_card(view.movie, &view.review, &view.collection),
        &view,
    );
}

pub fn parse_mood(token: &str) -> std::result::Result<Mood, String> {
    Mood::from_token(token).ok_or_else(|| {
        let valid: Vec<&str> = Mood::ALL.iter().map(|m| m.token()).collect();
        format!("unknown mood '{}', expected one of: {}", token, valid.join(", "))
    })
}
