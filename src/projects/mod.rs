// Projects module.
// Normalization, classification rules, curated tables, and the data provider.

pub mod classify;
pub mod curated;
pub mod model;
pub mod provider;

pub use model::{Category, Complexity, NormalizedProject};
pub use provider::ProjectProvider;
