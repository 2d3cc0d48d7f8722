use crate::error::{DrillError, Result};
use crossbeam::channel::{self, Receiver, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

type Job = Box<dyn FnOnce() + Send + 'static>;

struct Worker {
    name: String,
    thread: JoinHandle<()>,
}

impl Worker {
    fn spawn(id: usize, receiver: Receiver<Job>) -> Result<Self> {
        let name = format!("drills-worker-{id}");
        let thread = thread::Builder::new().name(name.clone()).spawn(move || {
            for job in receiver.iter() {
                debug!(worker = id, "executing job");
                // A panicking job must not take the worker down with it.
                if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                    warn!(worker = id, "job panicked");
                }
            }
            debug!(worker = id, "shutting down");
        })?;
        Ok(Self { name, thread })
    }
}

/// Result of a submitted job.
pub struct JobHandle<R> {
    result: Receiver<R>,
}

impl<R> JobHandle<R> {
    /// Blocks until the job finishes. `ChannelClosed` if it panicked.
    pub fn join(self) -> Result<R> {
        self.result.recv().map_err(|_| DrillError::ChannelClosed)
    }
}

/// Fixed set of named worker threads sharing one job channel.
pub struct WorkerPool {
    sender: Option<Sender<Job>>,
    workers: Vec<Worker>,
}

impl WorkerPool {
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(DrillError::InvalidCapacity { capacity: size });
        }
        let (sender, receiver) = channel::unbounded::<Job>();
        let workers = (0..size)
            .map(|id| Worker::spawn(id, receiver.clone()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sender: Some(sender),
            workers,
        })
    }

    pub fn submit<F, R>(&self, job: F) -> Result<JobHandle<R>>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = channel::bounded(1);
        let sender = self.sender.as_ref().ok_or(DrillError::ChannelClosed)?;
        sender
            .send(Box::new(move || {
                let _ = tx.send(job());
            }))
            .map_err(|_| DrillError::ChannelClosed)?;
        Ok(JobHandle { result: rx })
    }

    pub fn size(&self) -> usize {
        self.workers.len()
    }

    pub fn worker_names(&self) -> Vec<&str> {
        self.workers.iter().map(|w| w.name.as_str()).collect()
    }

    /// Stops accepting jobs, lets queued jobs finish, and joins every worker.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        // Dropping the sender ends each worker's receive loop.
        self.sender.take();
        for worker in self.workers.drain(..) {
            if worker.thread.join().is_err() {
                warn!(worker = %worker.name, "worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Runs `tasks` jobs on a pool of `workers` threads.
/// Returns `(task_id, worker_name)` pairs ordered by task id.
pub fn run_tasks(workers: usize, tasks: usize) -> Result<Vec<(usize, String)>> {
    let pool = WorkerPool::new(workers)?;
    let handles = (1..=tasks)
        .map(|task_id| {
            pool.submit(move || {
                let name = thread::current().name().unwrap_or("unnamed").to_string();
                (task_id, name)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut results = handles
        .into_iter()
        .map(JobHandle::join)
        .collect::<Result<Vec<_>>>()?;
    pool.shutdown();

    results.sort_by_key(|(task_id, _)| *task_id);
    Ok(results)
}
