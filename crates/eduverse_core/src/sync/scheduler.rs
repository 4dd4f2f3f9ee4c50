//! Periodic background jobs.
//!
//! # Invariants
//! - The job runs once immediately, then at fixed-rate deadlines
//!   `start + k * interval`, independent of how long each run takes.
//! - Each tick runs on its own worker thread, so a slow run never delays or
//!   blocks the next tick. Runs of one task may overlap.
//! - `stop()` and `Drop` both wake the scheduler thread and join it and every
//!   worker still running; no tick starts after either returns.

use log::{debug, info, warn};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Handle to a named polling thread.
pub struct PeriodicTask {
    name: String,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<u64>>,
}

impl PeriodicTask {
    /// Spawns a scheduler thread named `eduverse-<name>` that starts `job`
    /// on a worker thread every `interval`.
    ///
    /// # Errors
    /// - Returns the OS error when the scheduler thread cannot be spawned.
    pub fn spawn<F>(name: &str, interval: Duration, job: F) -> std::io::Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let task_name = name.to_string();
        let thread_name = format!("eduverse-{name}");
        let job = Arc::new(job);

        let handle = thread::Builder::new().name(thread_name.clone()).spawn(move || {
            info!(
                "event=poller_start module=scheduler task={} interval_ms={}",
                task_name,
                interval.as_millis()
            );
            let mut workers: Vec<JoinHandle<()>> = Vec::new();
            let mut ticks = 0_u64;
            let mut next = Instant::now();
            loop {
                workers.retain(|worker| !worker.is_finished());
                let tick_job = Arc::clone(&job);
                match thread::Builder::new()
                    .name(format!("{thread_name}-tick"))
                    .spawn(move || (*tick_job)())
                {
                    Ok(worker) => {
                        workers.push(worker);
                        ticks += 1;
                    }
                    Err(err) => warn!(
                        "event=poller_tick module=scheduler task={} status=error error={}",
                        task_name, err
                    ),
                }

                next += interval;
                let now = Instant::now();
                if next < now {
                    // Fell more than a period behind; resume from now instead
                    // of firing a burst of catch-up ticks.
                    next = now;
                }
                match stop_rx.recv_timeout(next.saturating_duration_since(now)) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            for worker in workers {
                if worker.join().is_err() {
                    debug!(
                        "event=poller_tick module=scheduler task={} status=panicked",
                        task_name
                    );
                }
            }
            info!(
                "event=poller_stop module=scheduler task={} ticks={}",
                task_name, ticks
            );
            ticks
        })?;

        Ok(Self {
            name: name.to_string(),
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Stops the task, waits for running ticks, and returns how many started.
    pub fn stop(mut self) -> u64 {
        self.shutdown()
    }

    fn shutdown(&mut self) -> u64 {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(ticks)) => ticks,
            Some(Err(_)) => {
                debug!(
                    "event=poller_stop module=scheduler task={} status=panicked",
                    self.name
                );
                0
            }
            None => 0,
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::PeriodicTask;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    #[test]
    fn runs_immediately_and_stops_on_request() {
        let counter = Arc::new(AtomicUsize::new(0));
        let job_counter = Arc::clone(&counter);
        let task = PeriodicTask::spawn("test-immediate", Duration::from_secs(3600), move || {
            job_counter.fetch_add(1, Ordering::SeqCst);
        })
        .expect("task should spawn");

        let deadline = Instant::now() + Duration::from_secs(5);
        while counter.load(Ordering::SeqCst) == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }

        let started = Instant::now();
        let ticks = task.stop();
        assert_eq!(ticks, 1);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn ticks_repeatedly_until_dropped() {
        let counter = Arc::new(AtomicUsize::new(0));
        let job_counter = Arc::clone(&counter);
        let task = PeriodicTask::spawn("test-repeat", Duration::from_millis(5), move || {
            job_counter.fetch_add(1, Ordering::SeqCst);
        })
        .expect("task should spawn");

        let deadline = Instant::now() + Duration::from_secs(5);
        while counter.load(Ordering::SeqCst) < 3 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        drop(task);

        let after_drop = counter.load(Ordering::SeqCst);
        assert!(after_drop >= 3);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(counter.load(Ordering::SeqCst), after_drop);
    }

    #[test]
    fn slow_runs_do_not_delay_the_next_tick() {
        let started = Arc::new(AtomicUsize::new(0));
        let job_started = Arc::clone(&started);
        let task = PeriodicTask::spawn("test-slow", Duration::from_millis(50), move || {
            job_started.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(100));
        })
        .expect("task should spawn");

        std::thread::sleep(Duration::from_millis(1000));
        let ticks = task.stop();

        // Fixed-rate scheduling starts about 20 runs in a second; running
        // back-to-back with a 100 ms job would start at most 10.
        assert!(ticks >= 14, "only {ticks} ticks started");
        assert_eq!(started.load(Ordering::SeqCst) as u64, ticks);
    }
}
