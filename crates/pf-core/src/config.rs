//! Engine configuration: the recognized options table, defaults, and the
//! clamping policy for out-of-range values.
//!
//! Loaded by the CLI from TOML via `serde`, but usable standalone (the
//! `Default` impl matches the documented defaults). `validate()` never
//! fails — an invalid Scene fails construction hard, but an invalid
//! *config* value is clamped to the nearest valid value and surfaced as a
//! warning string, since the engine should still run.

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug)]
pub struct EngineConfig {
    // ── identity / transport ──────────────────────────────────────────
    pub mqtt_broker: String,
    pub device_id: String,
    pub venue_id: String,
    pub topic_prefix: String,
    pub mqtt_queue_capacity: usize,

    // ── tick / population ──────────────────────────────────────────────
    pub frequency_hz: u32,
    pub target_people_count: u32,
    pub avg_stay_time_min: f32,

    // ── stress-test knobs ────────────────────────────────────────────
    pub arrival_rate_multiplier: f32,
    pub checkout_prob_multiplier: f32,
    pub browsing_speed_multiplier: f32,

    // ── cashiers / lanes ──────────────────────────────────────────────
    pub enable_cashiers: bool,
    pub cashier_shift_min: f32,
    pub cashier_break_prob_per_hour: f32,
    pub lane_open_confirm_sec: f32,
    pub lane_close_grace_sec: f32,
    pub enable_checkout_manager: bool,
    pub queue_pressure_threshold: f32,

    // ── determinism ──────────────────────────────────────────────────
    pub seed: Option<u64>,

    // ── ambient: logging / shutdown ──────────────────────────────────
    pub log_level: String,
    pub log_file: Option<String>,
    pub stop_flush_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mqtt_broker: "mqtt://localhost:1883".to_string(),
            device_id: "sim-0".to_string(),
            venue_id: "venue-0".to_string(),
            topic_prefix: "tracks".to_string(),
            mqtt_queue_capacity: 4096,

            frequency_hz: 10,
            target_people_count: 20,
            avg_stay_time_min: 8.0,

            arrival_rate_multiplier: 1.0,
            checkout_prob_multiplier: 1.0,
            browsing_speed_multiplier: 1.0,

            enable_cashiers: true,
            cashier_shift_min: 240.0,
            cashier_break_prob_per_hour: 1.0,
            lane_open_confirm_sec: 120.0,
            lane_close_grace_sec: 180.0,
            enable_checkout_manager: true,
            queue_pressure_threshold: 3.0,

            seed: None,

            log_level: "info".to_string(),
            log_file: None,
            stop_flush_timeout_ms: 1000,
        }
    }
}

impl EngineConfig {
    /// Clamp every field to its valid range, returning a human-readable
    /// warning per field that was actually changed. Never fails: a config
    /// value out of range is clamped to the nearest valid value and a
    /// warning is surfaced in status, but the engine runs.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        macro_rules! clamp_field {
            ($field:ident, $lo:expr, $hi:expr) => {
                let clamped = self.$field.clamp($lo, $hi);
                if clamped != self.$field {
                    warnings.push(format!(
                        "{} clamped from {:?} to {:?}",
                        stringify!($field),
                        self.$field,
                        clamped
                    ));
                    self.$field = clamped;
                }
            };
        }

        clamp_field!(frequency_hz, 1, 60);
        clamp_field!(target_people_count, 0, 100_000);
        clamp_field!(avg_stay_time_min, 0.1, 240.0);
        clamp_field!(arrival_rate_multiplier, 0.0, 100.0);
        clamp_field!(checkout_prob_multiplier, 0.0, 100.0);
        clamp_field!(browsing_speed_multiplier, 0.05, 10.0);
        clamp_field!(cashier_shift_min, 1.0, 1440.0);
        clamp_field!(cashier_break_prob_per_hour, 0.0, 100.0);
        clamp_field!(lane_open_confirm_sec, 0.0, 3600.0);
        clamp_field!(lane_close_grace_sec, 0.0, 3600.0);
        clamp_field!(queue_pressure_threshold, 0.0, 1000.0);
        clamp_field!(mqtt_queue_capacity, 16, 1_000_000);
        clamp_field!(stop_flush_timeout_ms, 0, 60_000);

        warnings
    }

    /// Simulated seconds per tick (`1 / frequency_hz`).
    #[inline]
    pub fn tick_duration_secs(&self) -> f32 {
        1.0 / self.frequency_hz as f32
    }
}
