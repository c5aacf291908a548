//! A bounded, drop-oldest outbound queue serviced by a background thread, so
//! a slow or disconnected sink never stalls the tick loop.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::sink::Sink;

struct Shared {
    queue: Mutex<VecDeque<(String, Vec<u8>)>>,
    ready: Condvar,
    stopped: Mutex<bool>,
}

/// Owns the producer side of the queue and the worker thread draining it.
/// Cloning is not supported — `pf_publish::Publisher` holds the single
/// instance and pushes to it from the tick loop's publish hook.
pub struct OutboundQueue {
    shared: Arc<Shared>,
    capacity: usize,
    worker: Option<JoinHandle<()>>,
}

impl OutboundQueue {
    /// Spawn the background worker that pops items and calls `sink.emit`.
    /// A disconnected sink causes items to be dropped silently rather than
    /// retried — there is no replay.
    pub fn spawn(mut sink: Box<dyn Sink>, capacity: usize) -> Self {
        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            ready: Condvar::new(),
            stopped: Mutex::new(false),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::spawn(move || {
            loop {
                let item = {
                    let mut queue = worker_shared.queue.lock().unwrap();
                    loop {
                        if let Some(item) = queue.pop_front() {
                            break Some(item);
                        }
                        if *worker_shared.stopped.lock().unwrap() {
                            break None;
                        }
                        queue = worker_shared.ready.wait(queue).unwrap();
                    }
                };
                let Some((topic, bytes)) = item else { break };

                if !sink.is_connected() {
                    continue;
                }
                if let Err(err) = sink.emit(&topic, &bytes) {
                    warn!(%err, topic, "sink emit failed; record dropped");
                }
            }
        });

        Self { shared, capacity, worker: Some(worker) }
    }

    /// Enqueue a record. If the queue is already at capacity the oldest
    /// pending record is dropped to make room — recent state matters more
    /// than a complete history for a live position feed.
    pub fn push(&self, topic: String, bytes: Vec<u8>) {
        let mut queue = self.shared.queue.lock().unwrap();
        if queue.len() >= self.capacity {
            queue.pop_front();
        }
        queue.push_back((topic, bytes));
        drop(queue);
        self.shared.ready.notify_one();
    }

    pub fn is_empty(&self) -> bool {
        self.shared.queue.lock().unwrap().is_empty()
    }

    pub fn len(&self) -> usize {
        self.shared.queue.lock().unwrap().len()
    }

    /// Wait up to `timeout` for the queue to drain, then signal the worker
    /// to stop and join it. Any records still queued past the timeout are
    /// abandoned rather than blocking shutdown indefinitely.
    pub fn flush_and_stop(mut self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        while !self.is_empty() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }

        *self.shared.stopped.lock().unwrap() = true;
        self.shared.ready.notify_one();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}
