//! Provider recommendation — scoring and ranking candidates against a
//! persona profile.

pub mod model;
pub mod routes;
pub mod scorer;

pub use model::{Preferences, Provider, Recommendation};
pub use scorer::score_providers;
