//! Periodic recurrence-scan driver.
//!
//! # Responsibility
//! - Invoke `generate_recurring_instances` on a fixed period from a
//!   dedicated thread.
//! - Serialize access to the shared service through a mutex.
//!
//! # Invariants
//! - The scan period is configuration, not a correctness constant.
//! - Stopping joins the worker thread; drop stops implicitly.

use crate::clock::Clock;
use crate::repo::task_repo::TaskRepository;
use crate::service::task_service::TaskService;
use log::error;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Default scan period when no configuration overrides it.
pub const DEFAULT_SCAN_PERIOD: Duration = Duration::from_secs(60);

const STOP_POLL_SLICE: Duration = Duration::from_millis(50);

/// Handle to a running periodic scan thread.
pub struct Scheduler {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Spawns the scan loop over a shared service.
    ///
    /// Every `period`, the loop locks the service, runs one recurrence
    /// scan and logs (without retrying) any persistence failure.
    pub fn spawn<R, C>(service: Arc<Mutex<TaskService<R, C>>>, period: Duration) -> Self
    where
        R: TaskRepository + Send + 'static,
        C: Clock + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = std::thread::spawn(move || loop {
            if sleep_until_stop(period, &stop_flag) {
                return;
            }

            let mut service = match service.lock() {
                Ok(guard) => guard,
                // Keep scanning even if another holder panicked.
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Err(err) = service.generate_recurring_instances() {
                error!("event=recurring_scan module=scheduler status=error error={err}");
            }
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Signals the loop to end and joins the worker thread.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sleeps for `period` in short slices, returning `true` when the stop
/// flag was raised in the meantime.
fn sleep_until_stop(period: Duration, stop: &AtomicBool) -> bool {
    let mut remaining = period;
    while !remaining.is_zero() {
        if stop.load(Ordering::Relaxed) {
            return true;
        }
        let slice = remaining.min(STOP_POLL_SLICE);
        std::thread::sleep(slice);
        remaining = remaining.saturating_sub(slice);
    }
    stop.load(Ordering::Relaxed)
}
