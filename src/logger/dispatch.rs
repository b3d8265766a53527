//! Background dispatcher for non-fatal log writes
//!
//! Error/Warn/Info/Debug lines are handed to a bounded queue drained by a small
//! fixed pool of worker threads, so the caller never waits on sink I/O.
//!
//! Guarantees:
//! - Memory is bounded by the queue capacity. When the queue is full (or the
//!   dispatcher is shut down) the line is written on the caller's thread instead.
//! - No ordering between dispatched lines, even from the same caller.
//! - `flush()` returns once every accepted line has reached its sink.
//! - `shutdown()` drains the queue and joins the workers.

use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::{Condvar, Mutex, RwLock};
use tokio::sync::mpsc::{self, error::TrySendError};

use super::error::{ConfigError, ConfigResult};
use super::sink::{LineRecord, LineWriter};

pub const DEFAULT_WORKERS: usize = 2;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

const WORKER_NAME_PREFIX: &str = "levelog-worker-";

/// A decorated line waiting to be written
pub(crate) struct Job {
    sink: Arc<dyn LineWriter>,
    message: String,
    location: &'static Location<'static>,
    time: DateTime<Utc>,
}

impl Job {
    pub(crate) fn new(
        sink: Arc<dyn LineWriter>,
        message: String,
        location: &'static Location<'static>,
    ) -> Self {
        Self {
            sink,
            message,
            location,
            time: Utc::now(),
        }
    }

    fn write(&self) {
        self.sink.write_line(&LineRecord {
            message: &self.message,
            location: self.location,
            time: self.time,
        });
    }
}

/// State shared between the dispatcher handle and its workers
struct Shared {
    /// Jobs accepted but not yet written
    pending: Mutex<usize>,
    drained: Condvar,
}

impl Shared {
    fn begin(&self) {
        *self.pending.lock() += 1;
    }

    fn run(&self, job: Job) {
        // A panicking sink must not take a worker (or the caller) down with it
        if panic::catch_unwind(AssertUnwindSafe(|| job.write())).is_err() {
            log::warn!(
                "log sink panicked while writing a line from {}:{}",
                job.location.file(),
                job.location.line()
            );
        }

        let mut pending = self.pending.lock();
        *pending = pending.saturating_sub(1);
        if *pending == 0 {
            self.drained.notify_all();
        }
    }
}

/// Bounded queue plus a fixed pool of writer threads
pub struct Dispatcher {
    sender: RwLock<Option<mpsc::Sender<Job>>>,
    shared: Arc<Shared>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    worker_count: usize,
    capacity: usize,
}

impl Dispatcher {
    /// Start `workers` threads draining a queue of `capacity` lines
    pub fn new(workers: usize, capacity: usize) -> ConfigResult<Self> {
        if workers == 0 {
            return Err(ConfigError::ZeroSized("worker count"));
        }
        if capacity == 0 {
            return Err(ConfigError::ZeroSized("queue capacity"));
        }

        let (tx, rx) = mpsc::channel::<Job>(capacity);
        let receiver = Arc::new(Mutex::new(rx));
        let shared = Arc::new(Shared {
            pending: Mutex::new(0),
            drained: Condvar::new(),
        });

        let dispatcher = Self {
            sender: RwLock::new(Some(tx)),
            shared: Arc::clone(&shared),
            workers: Mutex::new(Vec::with_capacity(workers)),
            worker_count: workers,
            capacity,
        };

        for id in 0..workers {
            let receiver = Arc::clone(&receiver);
            let shared = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("{}{}", WORKER_NAME_PREFIX, id))
                .spawn(move || loop {
                    // Only one idle worker waits on the channel; the rest wait on the lock
                    let next = receiver.lock().blocking_recv();
                    match next {
                        Some(job) => shared.run(job),
                        None => break,
                    }
                });

            match handle {
                Ok(handle) => dispatcher.workers.lock().push(handle),
                Err(e) => {
                    // Dropping `dispatcher` closes the channel and joins what was started
                    return Err(ConfigError::WorkerSpawn(e));
                }
            }
        }

        log::debug!(
            "log dispatcher started: {} workers, queue capacity {}",
            workers,
            capacity
        );
        Ok(dispatcher)
    }

    /// Dispatcher with the default pool size and queue capacity
    pub fn with_defaults() -> ConfigResult<Self> {
        Self::new(DEFAULT_WORKERS, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lines accepted but not yet written
    pub fn pending(&self) -> usize {
        *self.shared.pending.lock()
    }

    pub fn is_shut_down(&self) -> bool {
        self.sender.read().is_none()
    }

    /// Queue a line; falls back to an inline write when the queue is full or closed
    pub(crate) fn submit(&self, job: Job) {
        self.shared.begin();

        let rejected = match self.sender.read().as_ref() {
            Some(tx) => match tx.try_send(job) {
                Ok(()) => None,
                Err(TrySendError::Full(job)) | Err(TrySendError::Closed(job)) => Some(job),
            },
            None => Some(job),
        };

        if let Some(job) = rejected {
            self.shared.run(job);
        }
    }

    /// Block until every accepted line has been written
    pub fn flush(&self) {
        let mut pending = self.shared.pending.lock();
        while *pending > 0 {
            self.shared.drained.wait(&mut pending);
        }
    }

    /// Like `flush`, giving up after `timeout`; returns whether the queue drained
    pub fn flush_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut pending = self.shared.pending.lock();
        while *pending > 0 {
            if self
                .shared
                .drained
                .wait_until(&mut pending, deadline)
                .timed_out()
            {
                return *pending == 0;
            }
        }
        true
    }

    /// Stop accepting lines, write what is queued and join the workers
    ///
    /// Safe to call more than once and from several threads: every call returns
    /// only after the backlog is written. Lines submitted afterwards are written
    /// inline.
    pub fn shutdown(&self) {
        let sender = self.sender.write().take();
        if sender.is_none() {
            // Another caller owns the join; wait for the backlog it is draining.
            // A sink calling back in from a worker would wait on its own line.
            if !on_worker_thread() {
                self.flush();
            }
            return;
        }
        // Closing the channel lets workers drain the backlog and then exit
        drop(sender);

        let current = thread::current().id();
        let workers = std::mem::take(&mut *self.workers.lock());
        for handle in workers {
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                log::warn!("log worker exited with a panic");
            }
        }
        log::debug!("log dispatcher stopped");
    }
}

fn on_worker_thread() -> bool {
    thread::current()
        .name()
        .map_or(false, |name| name.starts_with(WORKER_NAME_PREFIX))
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
