// In-memory cache module.
// Holds fetched GitHub data for the TTL window to avoid redundant remote calls.

pub mod slots;
pub mod store;

pub use store::{Clock, DEFAULT_TTL, MemoryCache, SystemClock};
