//! Per-dataset providers: cache-through wrappers around the fan-out fetcher
//! with deterministic merging and static fallbacks.
//!
//! Every provider follows the same contract: `current()` never errors and
//! never blocks longer than its fan-out deadline; total upstream failure
//! yields the dataset's fallback payload, which is never cached so the next
//! request retries immediately.

mod activations;
mod contests;
mod solar;
mod spots;
mod weather;

pub use activations::ActivationsProvider;
pub use contests::ContestsProvider;
pub use solar::SolarProvider;
pub use spots::SpotsProvider;
pub use weather::WeatherProvider;
