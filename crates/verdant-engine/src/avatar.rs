//! Scripted avatar.
//!
//! Stands in for the player: an energy gauge that jumps spend and idle
//! ticks refill. The host only reads the gauge for logging.

/// Full energy gauge.
pub const MAX_ENERGY: u32 = 100;

/// Energy one jump costs.
pub const JUMP_COST: u32 = 10;

/// Energy regained per idle tick.
pub const IDLE_REGEN: u32 = 1;

/// Jump source with an energy gauge.
#[derive(Debug, Clone)]
pub struct Avatar {
    /// Current energy in `[0, MAX_ENERGY]`
    energy: u32,
    /// Jumps performed
    jumps: u64,
    /// Jumps refused for lack of energy
    refused: u64,
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new()
    }
}

impl Avatar {
    /// Creates an avatar with a full gauge.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            energy: MAX_ENERGY,
            jumps: 0,
            refused: 0,
        }
    }

    /// Tries to jump. Returns `true` if there was enough energy, in which
    /// case the caller should broadcast the jump.
    pub fn jump(&mut self) -> bool {
        if self.energy < JUMP_COST {
            self.refused += 1;
            return false;
        }
        self.energy -= JUMP_COST;
        self.jumps += 1;
        true
    }

    /// Regenerates energy for one tick without a jump.
    pub fn idle(&mut self) {
        self.energy = (self.energy + IDLE_REGEN).min(MAX_ENERGY);
    }

    /// Returns the current energy.
    #[must_use]
    pub const fn energy(&self) -> u32 {
        self.energy
    }

    /// Returns the jumps performed.
    #[must_use]
    pub const fn jumps(&self) -> u64 {
        self.jumps
    }

    /// Returns the jumps refused.
    #[must_use]
    pub const fn refused(&self) -> u64 {
        self.refused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_costs_energy() {
        let mut avatar = Avatar::new();
        assert!(avatar.jump());
        assert_eq!(avatar.energy(), MAX_ENERGY - JUMP_COST);
        assert_eq!(avatar.jumps(), 1);
    }

    #[test]
    fn test_exhausted_avatar_cannot_jump() {
        let mut avatar = Avatar::new();
        for _ in 0..10 {
            assert!(avatar.jump());
        }
        assert_eq!(avatar.energy(), 0);
        assert!(!avatar.jump());
        assert_eq!(avatar.refused(), 1);

        for _ in 0..JUMP_COST {
            avatar.idle();
        }
        assert!(avatar.jump());
    }

    #[test]
    fn test_idle_caps_at_max() {
        let mut avatar = Avatar::new();
        avatar.idle();
        assert_eq!(avatar.energy(), MAX_ENERGY);
    }
}
