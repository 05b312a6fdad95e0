use super::context::AppContext;
use super::ui::with_spinner;
use crate::output::Output;
use crate::render::{self, Marks};
use color_eyre::Result;
use reelify_core::{Listing, SessionState};
use reelify_models::{MovieId, RatingTag};
use serde_json::json;

pub enum Shelf {
    Watchlist,
    Watched,
}

impl Shelf {
    fn heading(&self) -> &'static str {
        match self {
            Shelf::Watchlist => "📌 Watchlist",
            Shelf::Watched => "✅ Watched",
        }
    }
}

/// Toggle `id` on the shelf, or list the shelf when no id is given
pub async fn run_shelf(ctx: &AppContext, shelf: Shelf, id: Option<MovieId>, output: &Output) -> Result<()> {
    let mut store = ctx.collection();

    let Some(id) = id else {
        let ids = match shelf {
            Shelf::Watchlist => store.watchlist().to_vec(),
            Shelf::Watched => store.watched().to_vec(),
        };
        return list_movies(ctx, shelf.heading(), &ids, output).await;
    };

    let (now_on, verb_on, verb_off) = match shelf {
        Shelf::Watchlist => (store.toggle_watchlist(id), "Added to watchlist", "Removed from watchlist"),
        Shelf::Watched => (store.toggle_watched(id), "Marked as watched", "Unmarked as watched"),
    };

    if output.is_human() {
        output.success(format!("{}: {}", if now_on { verb_on } else { verb_off }, id));
    } else {
        output.render(String::new, &json!({ "id": id, "marks": Marks::of(&store, &id) }));
    }
    Ok(())
}

pub async fn run_rate(ctx: &AppContext, id: MovieId, tag: RatingTag, output: &Output) -> Result<()> {
    let mut store = ctx.collection();
    let current = store.set_rating(id, tag);

    if output.is_human() {
        match current {
            Some(tag) => output.success(format!("Rated {}: {}", id, tag.label())),
            None => output.success(format!("Cleared rating for {}", id)),
        }
    } else {
        output.render(String::new, &json!({ "id": id, "rating": current }));
    }
    Ok(())
}

pub async fn run_summary(ctx: &AppContext, output: &Output) -> Result<()> {
    let store = ctx.collection();
    let stats = store.stats();
    let ratings: Vec<_> = store
        .ratings()
        .iter()
        .map(|(id, tag)| json!({ "id": id, "rating": tag }))
        .collect();

    output.render(
        || render::stats_table(&stats).to_string(),
        &json!({
            "stats": stats,
            "watchlist": store.watchlist(),
            "watched": store.watched(),
            "ratings": ratings,
        }),
    );
    Ok(())
}

/// Resolve ids to movies for display. Ids that cannot be loaded are listed
/// as warnings and skipped.
async fn list_movies(ctx: &AppContext, heading: &str, ids: &[MovieId], output: &Output) -> Result<()> {
    let discovery = ctx.discovery(output);
    let session = SessionState::new();
    let spin = output.is_human() && !output.is_quiet();

    let mut movies = Vec::with_capacity(ids.len());
    with_spinner("Loading collection...", spin, async {
        for id in ids {
            match discovery.open_movie(&session, *id).await {
                Ok(movie) => movies.push(movie),
                Err(e) => output.warn(e.to_string()),
            }
        }
    })
    .await;

    let listing = Listing {
        heading: heading.to_string(),
        total_results: ids.len() as u64,
        page: 1,
        movies,
    };

    let store = ctx.collection();
    output.render(
        || render::listing_text(&listing, |id| Marks::of(&store, id)),
        &listing,
    );
    Ok(())
}
