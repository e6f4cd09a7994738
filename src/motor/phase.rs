use std::fmt;

use log::debug;

use crate::units::Duration;

// ---------------------------------------------------------------------------
// Motor lifecycle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnPhase {
    Ready,
    Burning,
    Exhausted,
}

impl fmt::Display for BurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BurnPhase::Ready => write!(f, "ready"),
            BurnPhase::Burning => write!(f, "burning"),
            BurnPhase::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Phase and elapsed burn time of a single-use motor.
///
/// Phases only move forward: ready → burning (explicit ignition), then
/// burning → exhausted once an update starts with the rated duration already
/// spent. The check runs before the step is added, so exhaustion shows up one
/// update after the threshold is reached.
#[derive(Debug, Clone)]
pub struct BurnClock {
    phase: BurnPhase,
    elapsed: Duration,
}

impl BurnClock {
    pub fn new() -> Self {
        Self { phase: BurnPhase::Ready, elapsed: Duration::ZERO }
    }

    pub fn phase(&self) -> BurnPhase {
        self.phase
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn ignite(&mut self) {
        assert!(
            self.phase == BurnPhase::Ready,
            "ignite() called on a motor that is already {}",
            self.phase
        );
        self.phase = BurnPhase::Burning;
        debug!("motor ignited");
    }

    pub fn advance(&mut self, dt: Duration, burn_duration: Duration) {
        if self.phase != BurnPhase::Burning {
            return;
        }
        if self.elapsed >= burn_duration {
            self.phase = BurnPhase::Exhausted;
            debug!("motor exhausted after {} of burn", self.elapsed);
        }
        self.elapsed += dt;
    }
}

impl Default for BurnClock {
    fn default() -> Self {
        Self::new()
    }
}
