//! Configuration loader, schema types and the persisted-state file.
//!
//! Settings drive runtime behavior and are loaded from an optional TOML
//! file plus environment overrides; the persisted state remembers the last
//! remote playlist path across runs.

mod load;
mod schema;
mod state;

pub use schema::*;
pub use state::PersistedState;

#[cfg(test)]
mod tests;
