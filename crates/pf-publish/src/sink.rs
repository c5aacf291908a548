//! The `Sink` trait and its implementations: where a serialized
//! [`crate::record::TrackRecord`] actually goes.

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rumqttc::{Client, MqttOptions, QoS};

use crate::error::SinkError;

/// A destination for published bytes. One `emit` call is one `TrackRecord`,
/// already serialized and LF-terminated.
///
/// Implementations run on the outbound queue's single background thread, so
/// `emit` may block (a network write, a file flush) without stalling the
/// tick loop.
pub trait Sink: Send {
    fn emit(&mut self, topic: &str, bytes: &[u8]) -> Result<(), SinkError>;

    /// Whether the sink currently has somewhere to send records. A `false`
    /// return means the queue worker drops the record rather than calling
    /// `emit` — there is no replay buffer.
    fn is_connected(&self) -> bool {
        true
    }
}

/// Writes each record as a line to stdout, prefixed with its topic. Useful
/// for local runs without a broker.
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn emit(&mut self, topic: &str, bytes: &[u8]) -> Result<(), SinkError> {
        println!("{topic} {}", String::from_utf8_lossy(bytes));
        Ok(())
    }
}

/// Appends each record as a line to a file, ignoring `topic`. Used in tests
/// and offline captures where a newline-delimited JSON file is easier to
/// inspect than an MQTT trace.
pub struct JsonFileSink {
    file: std::fs::File,
}

impl JsonFileSink {
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = std::fs::File::create(path)?;
        Ok(Self { file })
    }
}

impl Sink for JsonFileSink {
    fn emit(&mut self, _topic: &str, bytes: &[u8]) -> Result<(), SinkError> {
        self.file.write_all(bytes)?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}

/// Publishes each record to an MQTT broker at QoS 0. A background thread
/// drives the connection's event loop and tracks whether the broker
/// connection is currently up.
pub struct MqttSink {
    client: Client,
    connected: Arc<AtomicBool>,
    _network: std::thread::JoinHandle<()>,
}

impl MqttSink {
    /// `broker_url` is `mqtt://host:port`; `client_id` should be unique per
    /// running engine instance (the device id is a natural choice).
    pub fn connect(broker_url: &str, client_id: &str) -> Result<Self, SinkError> {
        let (host, port) = parse_broker_url(broker_url)?;

        let mut options = MqttOptions::new(client_id, host, port);
        options.set_keep_alive(Duration::from_secs(30));
        let (client, mut connection) = Client::new(options, 64);

        let connected = Arc::new(AtomicBool::new(false));
        let worker_connected = Arc::clone(&connected);
        let network = std::thread::spawn(move || {
            for notification in connection.iter() {
                match notification {
                    Ok(rumqttc::Event::Incoming(rumqttc::Packet::ConnAck(_))) => {
                        worker_connected.store(true, Ordering::Relaxed);
                    }
                    Ok(_) => {}
                    Err(_) => {
                        worker_connected.store(false, Ordering::Relaxed);
                    }
                }
            }
        });

        Ok(Self { client, connected, _network: network })
    }
}

impl Sink for MqttSink {
    fn emit(&mut self, topic: &str, bytes: &[u8]) -> Result<(), SinkError> {
        self.client
            .publish(topic, QoS::AtMostOnce, false, bytes)
            .map_err(|e| SinkError::Publish(e.to_string()))
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}

pub(crate) fn parse_broker_url(broker_url: &str) -> Result<(String, u16), SinkError> {
    let stripped = broker_url.strip_prefix("mqtt://").unwrap_or(broker_url);
    let (host, port) = stripped
        .split_once(':')
        .ok_or_else(|| SinkError::Connect(format!("expected host:port, got {broker_url:?}")))?;
    let port: u16 = port
        .parse()
        .map_err(|_| SinkError::Connect(format!("invalid port in {broker_url:?}")))?;
    Ok((host.to_string(), port))
}
