//! RNG module - per-session piece generation
//!
//! A small deterministic generator (splitmix-style) whose whole state is one
//! u64 carried inside the session record. Persisting the state with the
//! session keeps the piece sequence exact across save/load, and giving each
//! session its own generator keeps concurrent games independent. Kinds are
//! drawn uniformly from the seven.

use serde::{Deserialize, Serialize};

use crate::types::PieceKind;

/// Deterministic piece generator, seeded per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRng {
    state: u64,
}

impl PieceRng {
    /// Create a generator from a seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw value (splitmix64 step)
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Widening multiply avoids the modulo bias of `% max`.
        ((self.next_u64() >> 32) * max as u64 >> 32) as u32
    }

    /// Draw one of the seven piece kinds uniformly
    pub fn piece(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(7) as usize]
    }
}
