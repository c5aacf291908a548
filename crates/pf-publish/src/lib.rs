//! `pf-publish` — turns live simulation state into `TrackRecord`s and ships
//! them out over MQTT (or a file/stdout sink for local runs).
//!
//! # Pieces
//!
//! | Module        | Responsibility                                          |
//! |---------------|----------------------------------------------------------|
//! | [`record`]    | The `TrackRecord` wire type and the agent → record mapping |
//! | [`sink`]      | `Sink` trait: MQTT, stdout, and JSONL-file backends       |
//! | [`queue`]     | Bounded, drop-oldest outbound queue + background worker   |
//! | [`publisher`] | `Publisher`: serialize + enqueue, one call per record     |
//! | [`observer`]  | `PublishObserver`: bridges `pf_sim::SimObserver`          |
//!
//! # Usage
//!
//! ```rust,ignore
//! use pf_publish::{MqttSink, PublishObserver, Publisher};
//!
//! let sink = MqttSink::connect(&config.mqtt_broker, &config.device_id)?;
//! let publisher = Publisher::new(Box::new(sink), &config.topic_prefix, &config.device_id, config.mqtt_queue_capacity);
//! let mut observer = PublishObserver::new(publisher);
//! sim.run(&mut observer)?;
//! ```

pub mod error;
pub mod observer;
pub mod publisher;
pub mod queue;
pub mod record;
pub mod sink;


pub use error::{PfPublishError, PfPublishResult, SinkError};
pub use observer::PublishObserver;
pub use publisher::Publisher;
pub use queue::OutboundQueue;
pub use record::{BoundingBox, Point3, TrackRecord};
pub use sink::{JsonFileSink, MqttSink, Sink, StdoutSink};
