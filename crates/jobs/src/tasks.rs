use crate::scheduler::TaskFn;
use propcast_infrastructure::{CacheStore, ReportAssembler};
use std::sync::Arc;
use tracing::{debug, info};

/// Periodic cache sweep: drops expired entries and re-enforces namespace caps.
pub fn cache_sweep_task(cache: Arc<CacheStore>) -> TaskFn {
    Arc::new(move || {
        let cache = Arc::clone(&cache);
        Box::pin(async move {
            let stats = cache.sweep();
            if stats.expired_removed > 0 || stats.evicted > 0 {
                info!(
                    expired = stats.expired_removed,
                    evicted = stats.evicted,
                    "Cache sweep complete"
                );
            } else {
                debug!("Cache sweep complete, nothing to remove");
            }
            Ok(())
        })
    })
}

/// Periodic report pre-warm: re-assembles the composite report so API
/// requests are served from cache. Uses the force-refresh path, otherwise a
/// composite entry still inside its TTL would make the run a no-op.
pub fn conditions_refresh_task(assembler: Arc<ReportAssembler>) -> TaskFn {
    Arc::new(move || {
        let assembler = Arc::clone(&assembler);
        Box::pin(async move {
            let report = assembler.refresh().await;
            debug!(
                solar_source = %report.solar.source,
                spot_count = report.spots.spots.len(),
                "Conditions refreshed"
            );
            Ok(())
        })
    })
}
