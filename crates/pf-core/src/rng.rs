//! Deterministic engine-level and per-agent RNG wrappers.
//!
//! # Determinism strategy
//!
//! A single `EngineRng`, seeded once at engine start, is threaded through
//! every clock-ordered stochastic site (spawn draws, waypoint choice, lane
//! promotion, jitter). Because the record stream's determinism property is
//! defined over tick order, not per-agent independence, one shared stream
//! (rather than one `SmallRng` per agent) is enough — and it matches the
//! fact that agents are created and destroyed continuously, unlike a fixed
//! population.
//!
//! Each agent additionally gets its own `AgentRng`, spun off the shared
//! stream at spawn time via [`EngineRng::spawn_agent_rng`]. This keeps one
//! agent's random draws (stay-time, service-time, wobble, break rolls) from
//! perturbing another's even though both ultimately trace back to the same
//! seed — consuming one `u64` from the shared stream to seed a child is
//! itself part of the deterministic order.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── EngineRng ─────────────────────────────────────────────────────────────────

/// The single shared RNG stream driving every engine-level stochastic
/// decision in tick order.
pub struct EngineRng(SmallRng);

impl EngineRng {
    pub fn new(seed: u64) -> Self {
        EngineRng(SmallRng::seed_from_u64(seed))
    }

    /// Spawn a fresh per-agent RNG by drawing one `u64` from this stream and
    /// mixing it with the agent's id, so concurrently-spawned agents never
    /// collide even if multiple spawn in the same tick.
    pub fn spawn_agent_rng(&mut self, agent: AgentId) -> AgentRng {
        let draw: u64 = self.0.r#gen();
        let seed = draw ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a non-empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG, seeded from [`EngineRng::spawn_agent_rng`] at
/// spawn time and stored alongside the agent in SoA storage.
pub struct AgentRng(SmallRng);

impl AgentRng {
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
