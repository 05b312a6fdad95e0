use rand::Rng;
use reelify_models::Movie;

/// Pages of the popularity feed that surprise draws from
pub const SURPRISE_MAX_PAGE: u32 = 100;
/// Idea picks among this many top-rated entries
pub const IDEA_POOL_SIZE: usize = 10;

pub const SURPRISE_REASON: &str = "✨ Selected specially for you!";

pub fn idea_reason(movie: &Movie) -> String {
    format!("⭐ Rated {}, one of the best!", movie.rating_label())
}

pub fn surprise_page<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(1..=SURPRISE_MAX_PAGE)
}

/// Uniform pick over the whole slice
pub fn pick_uniform<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.gen_range(0..items.len()))
}

/// Uniform pick among the first `min(IDEA_POOL_SIZE, len)` entries
pub fn pick_idea<'a, T, R: Rng + ?Sized>(ranked: &'a [T], rng: &mut R) -> Option<&'a T> {
    let pool = &ranked[..ranked.len().min(IDEA_POOL_SIZE)];
    pick_uniform(pool, rng)
}
