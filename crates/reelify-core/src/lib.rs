pub mod catalog;
pub mod chat;
pub mod collection;
pub mod discovery;
pub mod error;
pub mod normalizer;
pub mod review;
pub mod selection;
pub mod session;

pub use catalog::Catalog;
pub use chat::respond;
pub use collection::{CollectionBackend, CollectionStats, CollectionStore, JsonFileBackend, MemoryBackend};
pub use discovery::Discovery;
pub use error::{CoreError, Result};
pub use normalizer::{Normalizer, RawRecord};
pub use review::review_of;
pub use session::{Listing, RequestTicket, SessionState};
