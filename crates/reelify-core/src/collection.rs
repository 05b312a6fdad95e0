use crate::error::{CoreError, Result};
use reelify_models::{MovieId, RatingTag};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const WATCHLIST_SLOT: &str = "reelify_watchlist";
pub const WATCHED_SLOT: &str = "reelify_watched";
pub const RATINGS_SLOT: &str = "reelify_ratings";

/// Durable key-value storage holding one JSON document per named slot
pub trait CollectionBackend {
    /// `Ok(None)` when the slot has never been written
    fn read(&self, slot: &str) -> Result<Option<String>>;
    fn write(&mut self, slot: &str, contents: &str) -> Result<()>;
}

/// One `<slot>.json` file per slot under a directory
pub struct JsonFileBackend {
    dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl CollectionBackend for JsonFileBackend {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            debug!(slot = slot, "Collection slot file does not exist");
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn write(&mut self, slot: &str, contents: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(slot);

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, contents)?;
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }
}

/// In-process slots, nothing survives the process
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    slots: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose writes always fail, like storage that has been disabled
    pub fn unavailable() -> Self {
        Self {
            slots: HashMap::new(),
            unavailable: true,
        }
    }

    pub fn slot(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }
}

impl CollectionBackend for MemoryBackend {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, contents: &str) -> Result<()> {
        if self.unavailable {
            return Err(CoreError::Storage(format!("slot {} is not writable", slot)));
        }
        self.slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub watchlist: usize,
    pub watched: usize,
    pub rated: usize,
    pub fire: usize,
    pub good: usize,
    pub meh: usize,
}

/// Watchlist, watched list and rating tags.
///
/// Loaded once on `open`, flushed synchronously after every mutation. A
/// failed flush is logged and the in-memory state is kept.
pub struct CollectionStore<B: CollectionBackend> {
    backend: B,
    watchlist: Vec<MovieId>,
    watched: Vec<MovieId>,
    ratings: BTreeMap<MovieId, RatingTag>,
}

impl<B: CollectionBackend> CollectionStore<B> {
    pub fn open(backend: B) -> Self {
        let watchlist: Vec<MovieId> = load_slot(&backend, WATCHLIST_SLOT);
        let watched: Vec<MovieId> = load_slot(&backend, WATCHED_SLOT);
        let ratings: BTreeMap<MovieId, RatingTag> = load_slot(&backend, RATINGS_SLOT);

        info!(
            watchlist = watchlist.len(),
            watched = watched.len(),
            ratings = ratings.len(),
            "Loaded collection"
        );

        Self {
            backend,
            watchlist,
            watched,
            ratings,
        }
    }

    /// Returns whether the movie is on the watchlist afterwards
    pub fn toggle_watchlist(&mut self, id: MovieId) -> bool {
        let added = toggle(&mut self.watchlist, id);
        self.flush(WATCHLIST_SLOT);
        added
    }

    /// Returns whether the movie is marked watched afterwards. Marking a
    /// movie watched takes it off the watchlist.
    pub fn toggle_watched(&mut self, id: MovieId) -> bool {
        let added = toggle(&mut self.watched, id);
        self.flush(WATCHED_SLOT);

        if added {
            let before = self.watchlist.len();
            self.watchlist.retain(|w| *w != id);
            if self.watchlist.len() != before {
                self.flush(WATCHLIST_SLOT);
            }
        }
        added
    }

    /// Setting the tag a movie already has clears it. Returns the tag now in
    /// effect.
    pub fn set_rating(&mut self, id: MovieId, tag: RatingTag) -> Option<RatingTag> {
        let current = if self.ratings.get(&id) == Some(&tag) {
            self.ratings.remove(&id);
            None
        } else {
            self.ratings.insert(id, tag);
            Some(tag)
        };
        self.flush(RATINGS_SLOT);
        current
    }

    pub fn in_watchlist(&self, id: &MovieId) -> bool {
        self.watchlist.contains(id)
    }

    pub fn is_watched(&self, id: &MovieId) -> bool {
        self.watched.contains(id)
    }

    pub fn rating_of(&self, id: &MovieId) -> Option<RatingTag> {
        self.ratings.get(id).copied()
    }

    pub fn watchlist(&self) -> &[MovieId] {
        &self.watchlist
    }

    pub fn watched(&self) -> &[MovieId] {
        &self.watched
    }

    pub fn ratings(&self) -> &BTreeMap<MovieId, RatingTag> {
        &self.ratings
    }

    pub fn stats(&self) -> CollectionStats {
        let count = |tag: RatingTag| self.ratings.values().filter(|t| **t == tag).count();
        CollectionStats {
            watchlist: self.watchlist.len(),
            watched: self.watched.len(),
            rated: self.ratings.len(),
            fire: count(RatingTag::Fire),
            good: count(RatingTag::Good),
            meh: count(RatingTag::Meh),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn flush(&mut self, slot: &str) {
        if let Err(e) = self.try_flush(slot) {
            warn!(slot = slot, error = %e, "Failed to persist collection slot, keeping in-memory state");
        }
    }

    fn try_flush(&mut self, slot: &str) -> Result<()> {
        let contents = match slot {
            WATCHLIST_SLOT => serde_json::to_string(&self.watchlist)?,
            WATCHED_SLOT => serde_json::to_string(&self.watched)?,
            RATINGS_SLOT => serde_json::to_string(&self.ratings)?,
            other => return Err(CoreError::Storage(format!("unknown slot {}", other))),
        };
        self.backend.write(slot, &contents)?;
        debug!(slot = slot, bytes = contents.len(), "Persisted collection slot");
        Ok(())
    }
}

fn toggle(list: &mut Vec<MovieId>, id: MovieId) -> bool {
    if let Some(pos) = list.iter().position(|x| *x == id) {
        list.remove(pos);
        false
    } else {
        list.push(id);
        true
    }
}

/// Absent or unreadable slot means an empty collection
fn load_slot<B: CollectionBackend, T: DeserializeOwned + Default>(backend: &B, slot: &str) -> T {
    let raw = match backend.read(slot) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!(slot = slot, error = %e, "Failed to read collection slot, starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(slot = slot, error = %e, "Collection slot is not valid JSON, starting empty");
            T::default()
        }
    }
}
