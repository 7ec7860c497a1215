use async_trait::async_trait;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use propcast_domain::DomainError;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// One independent upstream source for a dataset.
///
/// `fetch` wraps a single network call; its own HTTP timeout is expected to
/// sit at or below the fan-out's per-source deadline.
#[async_trait]
pub trait DataSource<R>: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self) -> Result<R, DomainError>;
}

/// Records collected from one fan-out call, keyed by source name. A source
/// either contributed its full record or is absent.
#[derive(Debug)]
pub struct FetchResults<R> {
    records: HashMap<String, R>,
}

impl<R> FetchResults<R> {
    pub fn get(&self, source: &str) -> Option<&R> {
        self.records.get(source)
    }

    pub fn take(&mut self, source: &str) -> Option<R> {
        self.records.remove(source)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Contributing source names, sorted for deterministic labeling.
    pub fn source_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &R)> {
        self.records.iter()
    }
}

/// Runs every source concurrently against a per-source deadline and a global
/// one, keeping whatever completed in time.
///
/// Source failures and timeouts are absorbed here; `collect` itself never
/// errors and never waits past the overall deadline. Sources still pending at
/// the deadline are aborted so no late result lands after return.
#[derive(Debug, Clone, Copy)]
pub struct FanoutFetcher {
    per_source: Duration,
    overall: Duration,
}

impl FanoutFetcher {
    pub fn new(per_source: Duration, overall: Duration) -> Self {
        Self {
            per_source,
            overall,
        }
    }

    pub async fn collect<R: Send + 'static>(
        &self,
        sources: &[Arc<dyn DataSource<R>>],
    ) -> FetchResults<R> {
        let mut abort_handles = Vec::with_capacity(sources.len());
        let mut pending = FuturesUnordered::new();

        for source in sources {
            let source = Arc::clone(source);
            let per_source = self.per_source;
            let handle = tokio::spawn(async move {
                let name = source.name();
                match timeout(per_source, source.fetch()).await {
                    Ok(Ok(record)) => Some((name, record)),
                    Ok(Err(e)) => {
                        debug!(source = name, error = %e, "Source fetch failed");
                        None
                    }
                    Err(_) => {
                        debug!(
                            source = name,
                            deadline_ms = per_source.as_millis() as u64,
                            "Source fetch timed out"
                        );
                        None
                    }
                }
            });
            abort_handles.push(handle.abort_handle());
            pending.push(handle);
        }

        let mut records = HashMap::new();
        let drained = timeout(self.overall, async {
            while let Some(join_result) = pending.next().await {
                match join_result {
                    Ok(Some((name, record))) => {
                        records.insert(name.to_string(), record);
                    }
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "Source task panicked"),
                }
            }
        })
        .await;

        if drained.is_err() {
            debug!(
                deadline_ms = self.overall.as_millis() as u64,
                collected = records.len(),
                total = sources.len(),
                "Fan-out deadline reached, abandoning pending sources"
            );
        }
        for handle in &abort_handles {
            handle.abort();
        }

        FetchResults { records }
    }
}
