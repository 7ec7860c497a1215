pub mod cache;
pub mod datasets;
pub mod health;
pub mod scheduler;

pub use cache::{clear_cache, get_cache_stats};
pub use datasets::{
    get_activations, get_conditions, get_contests, get_solar, get_spots, get_weather,
};
pub use health::health_check;
pub use scheduler::get_scheduler_status;
