//! Raid Timer Plumbing
//!
//! The engine runs on a single cooperative tick; there is no parallelism.
//! Three recurring timers can be in flight during a raid: stamina drain
//! (1 Hz), the raid clock (1 Hz), and the opponent's think loop (one
//! decision every 1.5 s). All of them are owned handles on the simulation:
//! cancellation clears the handle, and a fire that races a cancellation is
//! absorbed because every handler re-checks its precondition before acting.

/// Engine tick length in seconds.
pub const TICK_DT: f32 = 0.5;

/// Ticks per wall-clock second.
pub const TICKS_PER_SECOND: u32 = 2;

/// Ticks between opponent decisions (1.5 s, roughly 0.67 Hz).
pub const AI_THINK_PERIOD_TICKS: u32 = 3;

const _: () = assert!(TICK_DT * TICKS_PER_SECOND as f32 == 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Stamina,
    Clock,
    AiThink,
}

/// A self-rescheduling countdown.
#[derive(Debug, Clone)]
struct Periodic {
    period: u32,
    until_fire: u32,
}

impl Periodic {
    fn new(period: u32) -> Self {
        Self { period, until_fire: period }
    }

    /// Advance one tick; true when the period elapses (and rewinds).
    fn advance(&mut self) -> bool {
        self.until_fire -= 1;
        if self.until_fire == 0 {
            self.until_fire = self.period;
            true
        } else {
            false
        }
    }
}

/// The set of timer handles a raid can hold. `None` means cancelled;
/// cancelling twice is a no-op by construction.
#[derive(Debug, Clone, Default)]
pub struct RaidTimers {
    stamina: Option<Periodic>,
    clock: Option<Periodic>,
    ai_think: Option<Periodic>,
}

impl RaidTimers {
    /// Arm stamina drain and the raid clock from scratch.
    pub fn arm_raid(&mut self) {
        self.stamina = Some(Periodic::new(TICKS_PER_SECOND));
        self.clock = Some(Periodic::new(TICKS_PER_SECOND));
    }

    /// Arm the opponent think loop from scratch.
    pub fn arm_ai(&mut self) {
        self.ai_think = Some(Periodic::new(AI_THINK_PERIOD_TICKS));
    }

    /// Cancel stamina drain and the raid clock (QTE pause, raid end).
    pub fn cancel_raid(&mut self) {
        self.stamina = None;
        self.clock = None;
    }

    pub fn cancel_ai(&mut self) {
        self.ai_think = None;
    }

    pub fn cancel_all(&mut self) {
        self.cancel_raid();
        self.cancel_ai();
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        match kind {
            TimerKind::Stamina => self.stamina.is_some(),
            TimerKind::Clock => self.clock.is_some(),
            TimerKind::AiThink => self.ai_think.is_some(),
        }
    }

    /// Advance every armed timer one tick and return the kinds due to fire,
    /// in a fixed order so a run is reproducible.
    pub fn advance(&mut self) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        if self.stamina.as_mut().is_some_and(|t| t.advance()) {
            fired.push(TimerKind::Stamina);
        }
        if self.clock.as_mut().is_some_and(|t| t.advance()) {
            fired.push(TimerKind::Clock);
        }
        if self.ai_think.as_mut().is_some_and(|t| t.advance()) {
            fired.push(TimerKind::AiThink);
        }
        fired
    }
}
