//! Concurrent fan-out / fan-in fetching across independent upstream sources.

mod fanout;

pub use fanout::{DataSource, FanoutFetcher, FetchResults};
