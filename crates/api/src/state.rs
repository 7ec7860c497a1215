use propcast_domain::Config;
use propcast_infrastructure::{CacheStore, ReportAssembler};
use propcast_jobs::TaskScheduler;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub report: Arc<ReportAssembler>,
    pub cache: Arc<CacheStore>,
    pub scheduler: Arc<TaskScheduler>,
    pub config: Arc<Config>,
}
