//! `Publisher`: serializes a [`TrackRecord`](crate::record::TrackRecord) and
//! hands it to the outbound queue under `<topic_prefix>/<device_id>`.

use std::time::Duration;

use tracing::warn;

use crate::queue::OutboundQueue;
use crate::record::TrackRecord;
use crate::sink::Sink;

pub struct Publisher {
    queue: OutboundQueue,
    topic: String,
}

impl Publisher {
    pub fn new(sink: Box<dyn Sink>, topic_prefix: &str, device_id: &str, queue_capacity: usize) -> Self {
        Self {
            queue: OutboundQueue::spawn(sink, queue_capacity),
            topic: format!("{topic_prefix}/{device_id}"),
        }
    }

    /// Serialize and enqueue one record. No batching, no reordering — each
    /// call is independent and records are published in call order.
    pub fn publish(&self, record: &TrackRecord) {
        match serde_json::to_vec(record) {
            Ok(bytes) => self.queue.push(self.topic.clone(), bytes),
            Err(err) => warn!(%err, "failed to serialize track record; dropped"),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Finish in-flight work: wait up to `timeout` for the queue to drain,
    /// then stop the worker thread and drop the sink.
    pub fn stop(self, timeout: Duration) {
        self.queue.flush_and_stop(timeout);
    }
}
