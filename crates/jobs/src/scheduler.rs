use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use propcast_domain::DomainError;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
// Due-ness follows tokio's clock, same as the tick interval.
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A schedulable job body. Cheap to clone; invoked once per due tick.
pub type TaskFn = Arc<dyn Fn() -> BoxFuture<'static, Result<(), DomainError>> + Send + Sync>;

const TICK: Duration = Duration::from_secs(1);
const STOP_TIMEOUT: Duration = Duration::from_secs(5);

struct TaskState {
    last_run: Option<DateTime<Utc>>,
    next_run: Instant,
    run_count: u64,
    error_count: u64,
    last_error: Option<String>,
}

struct Task {
    task_fn: TaskFn,
    interval: Duration,
    state: Mutex<TaskState>,
    /// Overlap guard: a task still running when its next tick comes due is
    /// skipped, not queued.
    running: AtomicBool,
}

/// Point-in-time view of one task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskStatus {
    pub interval_secs: u64,
    pub last_run: Option<DateTime<Utc>>,
    pub next_run_in_secs: f64,
    pub run_count: u64,
    pub error_count: u64,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SchedulerStatus {
    pub running: bool,
    pub tasks: BTreeMap<String, TaskStatus>,
}

/// Interval scheduler for named background jobs.
///
/// One loop wakes every second and launches every due task on its own tokio
/// task, so a slow job never delays another job's start. A failing task keeps
/// its `next_run` unchanged and is retried on the following tick instead of
/// waiting out a full interval.
pub struct TaskScheduler {
    tasks: Arc<Mutex<HashMap<String, Arc<Task>>>>,
    running: Arc<AtomicBool>,
    shutdown: Mutex<CancellationToken>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(HashMap::new())),
            running: Arc::new(AtomicBool::new(false)),
            shutdown: Mutex::new(CancellationToken::new()),
            loop_handle: Mutex::new(None),
        }
    }

    /// Register a task; re-adding the same name replaces it. First run is one
    /// full interval from now.
    pub fn add_task(&self, name: &str, task_fn: TaskFn, interval: Duration) {
        let task = Arc::new(Task {
            task_fn,
            interval,
            state: Mutex::new(TaskState {
                last_run: None,
                next_run: Instant::now() + interval,
                run_count: 0,
                error_count: 0,
                last_error: None,
            }),
            running: AtomicBool::new(false),
        });
        let replaced = self
            .tasks
            .lock()
            .unwrap()
            .insert(name.to_string(), task)
            .is_some();
        info!(
            task = name,
            interval_secs = interval.as_secs(),
            replaced,
            "Registered background task"
        );
    }

    pub fn remove_task(&self, name: &str) -> bool {
        let removed = self.tasks.lock().unwrap().remove(name).is_some();
        if removed {
            info!(task = name, "Removed background task");
        }
        removed
    }

    /// Start the scheduling loop. Idempotent.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Scheduler already running");
            return;
        }

        let token = CancellationToken::new();
        *self.shutdown.lock().unwrap() = token.clone();

        let tasks = Arc::clone(&self.tasks);
        let handle = tokio::spawn(async move {
            info!("Scheduler loop started");
            let mut ticker = tokio::time::interval(TICK);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        info!("Scheduler loop shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        launch_due_tasks(&tasks);
                    }
                }
            }
        });
        *self.loop_handle.lock().unwrap() = Some(handle);
    }

    /// Signal the loop to exit and wait for it, bounded. A loop that does not
    /// exit within the bound is abandoned rather than blocking shutdown.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.shutdown.lock().unwrap().cancel();

        let handle = self.loop_handle.lock().unwrap().take();
        if let Some(handle) = handle {
            if tokio::time::timeout(STOP_TIMEOUT, handle).await.is_err() {
                warn!(
                    timeout_secs = STOP_TIMEOUT.as_secs(),
                    "Scheduler loop did not exit in time, abandoning"
                );
            }
        }
        info!("Scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> SchedulerStatus {
        let now = Instant::now();
        let tasks = self.tasks.lock().unwrap();
        let statuses = tasks
            .iter()
            .map(|(name, task)| {
                let state = task.state.lock().unwrap();
                (
                    name.clone(),
                    TaskStatus {
                        interval_secs: task.interval.as_secs(),
                        last_run: state.last_run,
                        next_run_in_secs: state
                            .next_run
                            .saturating_duration_since(now)
                            .as_secs_f64(),
                        run_count: state.run_count,
                        error_count: state.error_count,
                        last_error: state.last_error.clone(),
                    },
                )
            })
            .collect();
        SchedulerStatus {
            running: self.is_running(),
            tasks: statuses,
        }
    }
}

impl Default for TaskScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Launch every due task on its own tokio task. Tasks whose previous run is
/// still in flight are skipped for this tick.
fn launch_due_tasks(tasks: &Arc<Mutex<HashMap<String, Arc<Task>>>>) {
    let now = Instant::now();
    let due: Vec<(String, Arc<Task>)> = {
        let tasks = tasks.lock().unwrap();
        tasks
            .iter()
            .filter(|(_, task)| task.state.lock().unwrap().next_run <= now)
            .map(|(name, task)| (name.clone(), Arc::clone(task)))
            .collect()
    };

    for (name, task) in due {
        if task.running.swap(true, Ordering::Acquire) {
            debug!(task = %name, "Previous run still in flight, skipping tick");
            continue;
        }
        tokio::spawn(async move {
            run_task(&name, &task).await;
            task.running.store(false, Ordering::Release);
        });
    }
}

async fn run_task(name: &str, task: &Task) {
    // Run the body on its own task so a panic is contained and counted as a
    // failure rather than tearing anything down.
    let result = match tokio::spawn((task.task_fn)()).await {
        Ok(result) => result,
        Err(e) => Err(DomainError::TaskFailed(format!("task panicked: {e}"))),
    };

    let mut state = task.state.lock().unwrap();
    match result {
        Ok(()) => {
            state.last_run = Some(Utc::now());
            state.next_run = Instant::now() + task.interval;
            state.run_count += 1;
            state.last_error = None;
            debug!(task = name, run_count = state.run_count, "Task completed");
        }
        Err(e) => {
            state.error_count += 1;
            state.last_error = Some(e.to_string());
            // next_run stays put: the task is due again on the next tick.
            warn!(task = name, error = %e, error_count = state.error_count, "Task failed, retrying next tick");
        }
    }
}
