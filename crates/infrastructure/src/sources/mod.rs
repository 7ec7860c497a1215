//! Clients for the upstream services each dataset is aggregated from.
//!
//! Transport and parsing are kept separate: `fetch` methods only do HTTP,
//! the `parse_*` functions are pure and unit-tested offline.

mod contest_calendar;
mod hamqsl;
mod http;
mod noaa;
mod openweather;
mod pota;
mod pskreporter;
mod sota;
mod wsprnet;

pub use contest_calendar::ContestCalendarSource;
pub use hamqsl::HamQslSource;
pub use noaa::NoaaSwpcSource;
pub use openweather::OpenWeatherSource;
pub use pota::PotaSource;
pub use pskreporter::PskReporterSource;
pub use sota::SotaSource;
pub use wsprnet::WsprNetSource;
