//! Rule-based review synthesis.
//!
//! A movie's genres and rating are looked up in fixed tables and aggregated
//! into a short pros/cons list. Same movie in, same review out.

use reelify_models::{Movie, Review};

const MAX_PROS: usize = 3;
const MAX_CONS: usize = 2;
const DEFAULT_RATING: f64 = 7.0;

const ACCLAIMED: &str = "Highly acclaimed by critics";
const GENERALLY_POSITIVE: &str = "Generally positive reviews";
const DISAPPOINTED: &str = "Some viewers were disappointed";

const FALLBACK_PROS: [&str; 2] = ["Engaging storytelling", "Visually satisfying"];
const FALLBACK_CONS: [&str; 1] = ["May not suit every taste"];

struct GenreNotes {
    names: &'static [&'static str],
    pros: [&'static str; 2],
    con: &'static str,
}

/// English and Turkish genre names share an entry
const GENRE_NOTES: &[GenreNotes] = &[
    GenreNotes {
        names: &["Action", "Aksiyon"],
        pros: ["Breathtaking action sequences", "Adrenaline-packed moments"],
        con: "Some scenes may be overly violent",
    },
    GenreNotes {
        names: &["Comedy", "Komedi"],
        pros: ["Fun, laugh-out-loud moments", "A light watch"],
        con: "The humor may not land for everyone",
    },
    GenreNotes {
        names: &["Drama", "Dram"],
        pros: ["Emotional depth", "Compelling character development"],
        con: "The slow pace may bore some viewers",
    },
    GenreNotes {
        names: &["Horror", "Korku"],
        pros: ["Tense, unsettling atmosphere", "Effective scares"],
        con: "May be disturbing for sensitive viewers",
    },
    GenreNotes {
        names: &["Romance", "Romantik"],
        pros: ["Romantic, heartfelt moments", "Great chemistry"],
        con: "Can lean on clichés",
    },
    GenreNotes {
        names: &["Science Fiction", "Bilim Kurgu"],
        pros: ["Inventive science fiction concept", "Impressive visual effects"],
        con: "Some scientific details are far-fetched",
    },
    GenreNotes {
        names: &["Thriller", "Gerilim"],
        pros: ["A story that keeps you guessing", "Unpredictable twists"],
        con: "Can be exhausting if you dislike suspense",
    },
    GenreNotes {
        names: &["Animation", "Animasyon"],
        pros: ["Visually enchanting", "Suitable for all ages"],
        con: "May feel simple to adults",
    },
    GenreNotes {
        names: &["Adventure", "Macera"],
        pros: ["An adventure-filled story", "A real sense of discovery"],
        con: "Some stretches feel long",
    },
    GenreNotes {
        names: &["Fantasy", "Fantastik"],
        pros: ["A rich fantasy world", "Imaginative visuals"],
        con: "Not for viewers who want realism",
    },
    GenreNotes {
        names: &["Crime", "Suç"],
        pros: ["A gripping crime story", "A cleverly constructed script"],
        con: "Contains dark themes",
    },
    GenreNotes {
        names: &["War", "Savaş"],
        pros: ["Historical realism", "Emotional depth"],
        con: "Violent scenes may be disturbing",
    },
];

fn notes_for(genre: &str) -> Option<&'static GenreNotes> {
    GENRE_NOTES.iter().find(|notes| notes.names.contains(&genre))
}

/// Synthesize the canned review for a movie.
///
/// Never returns empty lists: at most 3 pros and 2 cons, at least one of each.
pub fn review_of(movie: &Movie) -> Review {
    let mut pros: Vec<&str> = Vec::new();
    let mut cons: Vec<&str> = Vec::new();

    for notes in movie.genres.iter().filter_map(|g| g.name()).filter_map(notes_for) {
        pros.extend(notes.pros);
        cons.push(notes.con);
    }

    // TMDB reports 0 for titles nobody has voted on yet
    let rating = movie.rating.filter(|r| *r > 0.0).unwrap_or(DEFAULT_RATING);
    if rating >= 8.0 {
        pros.push(ACCLAIMED);
    } else if rating >= 7.0 {
        pros.push(GENERALLY_POSITIVE);
    } else if rating < 6.0 {
        cons.push(DISAPPOINTED);
    }

    let mut pros = dedup_truncate(pros, MAX_PROS);
    let mut cons = dedup_truncate(cons, MAX_CONS);

    if pros.is_empty() {
        pros = FALLBACK_PROS.iter().map(|s| s.to_string()).collect();
    }
    if cons.is_empty() {
        cons = FALLBACK_CONS.iter().map(|s| s.to_string()).collect();
    }

    Review { pros, cons }
}

fn dedup_truncate(lines: Vec<&str>, limit: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(limit);
    for line in lines {
        if out.len() == limit {
            break;
        }
        if !out.iter().any(|seen| seen == line) {
            out.push(line.to_string());
        }
    }
    out
}
