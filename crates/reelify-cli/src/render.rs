use comfy_table::{Cell, Color, ContentArrangement, Table};
use owo_colors::OwoColorize;
use reelify_core::{CollectionBackend, CollectionStats, CollectionStore, Listing};
use reelify_models::{Movie, MovieId, RatingTag, Review};
use serde::Serialize;

/// Collection state of one movie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Marks {
    pub in_watchlist: bool,
    pub watched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<RatingTag>,
}

impl Marks {
    pub fn of<B: CollectionBackend>(store: &CollectionStore<B>, id: &MovieId) -> Self {
        Self {
            in_watchlist: store.in_watchlist(id),
            watched: store.is_watched(id),
            rating: store.rating_of(id),
        }
    }

    fn badges(&self) -> String {
        let mut badges = Vec::new();
        if self.in_watchlist {
            badges.push("📌");
        }
        if self.watched {
            badges.push("✅");
        }
        if let Some(tag) = self.rating {
            badges.push(match tag {
                RatingTag::Fire => "🔥",
                RatingTag::Good => "👍",
                RatingTag::Meh => "😐",
            });
        }
        badges.join(" ")
    }
}

/// Detail view payload for JSON output
#[derive(Debug, Serialize)]
pub struct MovieView<'a> {
    #[serde(flatten)]
    pub movie: &'a Movie,
    pub review: Review,
    pub collection: Marks,
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn genre_list(movie: &Movie) -> String {
    movie
        .genres
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn listing_table(listing: &Listing, marks: impl Fn(&MovieId) -> Marks) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Genres").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for movie in &listing.movies {
        let title = if movie.has_localized_title() {
            format!("{}\n{}", movie.display_title(), movie.title)
        } else {
            movie.display_title().to_string()
        };
        table.add_row(vec![
            Cell::new(movie.id.to_string()).fg(Color::DarkGrey),
            Cell::new(title),
            Cell::new(movie.year_label()),
            Cell::new(format!("⭐ {}", movie.rating_label())).fg(Color::Yellow),
            Cell::new(genre_list(movie)),
            Cell::new(marks(&movie.id).badges()),
        ]);
    }
    table
}

pub fn listing_text(listing: &Listing, marks: impl Fn(&MovieId) -> Marks) -> String {
    let header = format!(
        "{} {}",
        listing.heading.bright_cyan().bold(),
        format!("({} results, page {})", listing.total_results, listing.page).dimmed()
    );
    if listing.movies.is_empty() {
        return format!("{}\nNo movies found.", header);
    }
    format!("{}\n{}", header, listing_table(listing, marks))
}

pub fn movie_card(movie: &Movie, review: &Review, marks: &Marks) -> String {
    let mut lines = Vec::new();

    lines.push(format!("{}", movie.display_title().bright_white().bold()));
    if movie.has_localized_title() {
        lines.push(format!("{}", movie.title.dimmed()));
    }
    lines.push(format!(
        "{} · {} min · ⭐ {} · IMDb {}  {}",
        movie.year_label(),
        movie.duration_minutes,
        movie.rating_label(),
        movie.imdb_label(),
        movie.id.to_string().dimmed()
    ));
    if !movie.genres.is_empty() {
        lines.push(genre_list(movie));
    }
    if let Some(reason) = &movie.reason {
        lines.push(format!("{}", reason.magenta()));
    }

    lines.push(String::new());
    lines.push(movie.overview.clone());
    lines.push(String::new());

    lines.push(format!("{}", "Pros".green().bold()));
    lines.extend(review.pros.iter().map(|p| format!("  + {}", p)));
    lines.push(format!("{}", "Cons".red().bold()));
    lines.extend(review.cons.iter().map(|c| format!("  - {}", c)));

    if let Some(url) = movie.trailer_url() {
        lines.push(String::new());
        lines.push(format!("Trailer: {}", url.underline()));
    }
    match &movie.platforms {
        Some(platforms) if !platforms.is_empty() => {
            lines.push(format!("Streaming on: {}", platforms.join(", ")));
        }
        Some(_) => lines.push("Not streaming in your region".to_string()),
        None => {}
    }
    if let Some(poster) = &movie.poster_url {
        lines.push(format!("Poster: {}", poster));
    }

    let badges = marks.badges();
    if !badges.is_empty() {
        lines.push(String::new());
        lines.push(badges);
    }

    lines.join("\n")
}

pub fn stats_table(stats: &CollectionStats) -> Table {
    let mut table = styled_table();
    table.set_header(vec![
        Cell::new("Collection")
            .fg(Color::Cyan)
            .add_attribute(comfy_table::Attribute::Bold),
        Cell::new(""),
    ]);
    table.add_row(vec![Cell::new("📌 Watchlist"), Cell::new(stats.watchlist)]);
    table.add_row(vec![Cell::new("✅ Watched"), Cell::new(stats.watched)]);
    table.add_row(vec![Cell::new(RatingTag::Fire.label()), Cell::new(stats.fire)]);
    table.add_row(vec![Cell::new(RatingTag::Good.label()), Cell::new(stats.good)]);
    table.add_row(vec![Cell::new(RatingTag::Meh.label()), Cell::new(stats.meh)]);
    table
}
