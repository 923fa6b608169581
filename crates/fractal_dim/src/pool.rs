//! Fixed-size worker pool over a shared FIFO queue.
//!
//! N persistent threads pull boxed closures from one crossbeam channel.
//! Two shutdown modes:
//!
//! - [`WorkerPool::join`]: stop accepting work, let the workers drain the
//!   queue, wait for them.
//! - [`WorkerPool::close`]: stop accepting work and discard everything still
//!   queued. Tasks already running finish.
//!
//! # Usage
//!
//! ```ignore
//! let pool = WorkerPool::new(4)?;
//!
//! for radius in 1..=16 {
//!     pool.submit(move || compute(radius));
//! }
//!
//! // Blocks until every queued task has run
//! pool.join();
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{self as channel, Receiver, Sender};

use crate::constants::MAX_THREADS;
use crate::error::{FractalError, Result};

type Task = Box<dyn FnOnce() + Send + 'static>;

/// Counters shared with the workers.
#[derive(Default)]
struct PoolCounters {
  closed: AtomicBool,
  completed: AtomicUsize,
  panicked: AtomicUsize,
  discarded: AtomicUsize,
}

/// Pool of persistent worker threads.
pub struct WorkerPool {
  /// `None` once the pool stopped accepting tasks.
  sender: Mutex<Option<Sender<Task>>>,
  /// Kept so `close` can discard queued tasks.
  receiver: Receiver<Task>,
  workers: Mutex<Vec<JoinHandle<()>>>,
  counters: Arc<PoolCounters>,
  size: usize,
}

impl WorkerPool {
  /// Start `size` workers. `size` must be in `1..=MAX_THREADS`.
  pub fn new(size: usize) -> Result<Self> {
    if size == 0 || size > MAX_THREADS {
      return Err(FractalError::InvalidThreadCount(size));
    }

    let (sender, receiver) = channel::unbounded::<Task>();
    let counters = Arc::new(PoolCounters::default());
    let mut workers = Vec::with_capacity(size);

    for id in 0..size {
      let receiver = receiver.clone();
      let counters = Arc::clone(&counters);
      let spawned = thread::Builder::new()
        .name(format!("fractal-worker-{id}"))
        .spawn(move || worker_loop(id, receiver, counters));

      match spawned {
        Ok(handle) => workers.push(handle),
        Err(err) => {
          // Disconnect so the workers already started exit.
          drop(sender);
          for handle in workers {
            let _ = handle.join();
          }
          return Err(err.into());
        }
      }
    }

    tracing::debug!(workers = size, "worker pool started");

    Ok(Self {
      sender: Mutex::new(Some(sender)),
      receiver,
      workers: Mutex::new(workers),
      counters,
      size,
    })
  }

  /// Queue a task for the next idle worker (non-blocking).
  ///
  /// Returns `false` and drops the task if the pool was closed or joined.
  pub fn submit<F>(&self, task: F) -> bool
  where
    F: FnOnce() + Send + 'static,
  {
    if self.counters.closed.load(Ordering::Acquire) {
      return false;
    }
    match lock(&self.sender).as_ref() {
      Some(sender) => sender.send(Box::new(task)).is_ok(),
      None => false,
    }
  }

  /// Stop accepting tasks and discard every task not yet started.
  ///
  /// Returns immediately with the number of tasks discarded here. Running
  /// tasks finish; idle workers exit.
  pub fn close(&self) -> usize {
    self.counters.closed.store(true, Ordering::Release);
    lock(&self.sender).take();

    let mut discarded = 0;
    while self.receiver.try_recv().is_ok() {
      discarded += 1;
    }
    self.counters.discarded.fetch_add(discarded, Ordering::Relaxed);

    tracing::debug!(discarded, "worker pool closed");
    discarded
  }

  /// Stop accepting tasks, run everything queued, and wait for the workers.
  pub fn join(&self) {
    lock(&self.sender).take();

    let workers = std::mem::take(&mut *lock(&self.workers));
    for handle in workers {
      if handle.join().is_err() {
        tracing::error!("worker thread terminated abnormally");
      }
    }
  }

  /// Number of worker threads.
  pub fn size(&self) -> usize {
    self.size
  }

  /// True while the pool accepts new tasks.
  pub fn is_active(&self) -> bool {
    !self.counters.closed.load(Ordering::Acquire) && lock(&self.sender).is_some()
  }

  /// Tasks queued but not yet picked up by a worker.
  pub fn pending_count(&self) -> usize {
    self.receiver.len()
  }

  /// Tasks that ran to completion.
  pub fn completed_count(&self) -> usize {
    self.counters.completed.load(Ordering::Relaxed)
  }

  /// Tasks that panicked.
  pub fn panicked_count(&self) -> usize {
    self.counters.panicked.load(Ordering::Relaxed)
  }

  /// Tasks dropped by `close` without running.
  pub fn discarded_count(&self) -> usize {
    self.counters.discarded.load(Ordering::Relaxed)
  }
}

impl Drop for WorkerPool {
  fn drop(&mut self) {
    self.join();
  }
}

/// Worker body: run tasks until the queue is empty and disconnected.
fn worker_loop(id: usize, receiver: Receiver<Task>, counters: Arc<PoolCounters>) {
  while let Ok(task) = receiver.recv() {
    if counters.closed.load(Ordering::Acquire) {
      counters.discarded.fetch_add(1, Ordering::Relaxed);
      continue;
    }

    match panic::catch_unwind(AssertUnwindSafe(task)) {
      Ok(()) => {
        counters.completed.fetch_add(1, Ordering::Relaxed);
      }
      Err(payload) => {
        counters.panicked.fetch_add(1, Ordering::Relaxed);
        tracing::error!(worker = id, "task panicked: {}", panic_message(payload.as_ref()));
      }
    }
  }

  tracing::trace!(worker = id, "worker exiting");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
  if let Some(message) = payload.downcast_ref::<&'static str>() {
    message
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message
  } else {
    "non-string panic payload"
  }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "pool_test.rs"]
mod pool_test;
