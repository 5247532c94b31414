use log::{debug, info};

use crate::popup::session::SessionRecord;

/// Dismiss count at which the popup stops reopening on its own.
pub const MINIMIZE_AFTER: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub initial_delay_ms: u32,
    pub reappear_delay_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            initial_delay_ms: 500,
            reappear_delay_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    InitialOpen,
    Reappear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Mounted without any session record, waiting for the first open.
    Initial,
    Open { reappearing: bool },
    /// Dismissed once; the reappear timer is armed.
    ClosedPendingReappear,
    Minimized,
    Suppressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Mounted(SessionRecord),
    TimerFired(TimerKind),
    Dismiss,
    SuppressForever,
    ReopenFromBadge,
}

/// Side effects the host component has to carry out after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Arm { timer: TimerKind, after_ms: u32 },
    CancelTimers,
    PersistDismissCount(u32),
    PersistSuppressed,
}

/// What the view needs to know, derived from the phase alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Projection {
    pub is_open: bool,
    pub is_minimized: bool,
    pub is_reappearing: bool,
    pub badge_reopens: bool,
}

#[derive(Debug, Clone)]
pub struct PopupMachine {
    phase: Phase,
    dismiss_count: u32,
    mounted: bool,
    timing: Timing,
}

impl PopupMachine {
    pub fn new(timing: Timing) -> Self {
        Self {
            phase: Phase::Initial,
            dismiss_count: 0,
            mounted: false,
            timing,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn dismiss_count(&self) -> u32 {
        self.dismiss_count
    }

    pub fn projection(&self) -> Projection {
        match self.phase {
            Phase::Initial | Phase::ClosedPendingReappear => Projection::default(),
            Phase::Open { reappearing } => Projection {
                is_open: true,
                is_reappearing: reappearing,
                ..Projection::default()
            },
            Phase::Minimized => Projection {
                is_minimized: true,
                badge_reopens: true,
                ..Projection::default()
            },
            Phase::Suppressed => Projection {
                is_minimized: true,
                ..Projection::default()
            },
        }
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match (self.phase, event) {
            (_, Event::Mounted(record)) => self.mount(record),
            (Phase::Initial, Event::TimerFired(TimerKind::InitialOpen)) => {
                self.enter(Phase::Open { reappearing: false });
                Vec::new()
            }
            (Phase::ClosedPendingReappear, Event::TimerFired(TimerKind::Reappear)) => {
                self.enter(Phase::Open { reappearing: true });
                Vec::new()
            }
            (phase, Event::TimerFired(timer)) => {
                debug!("Ignoring stale {:?} timer in {:?}", timer, phase);
                Vec::new()
            }
            (Phase::Open { .. }, Event::Dismiss) => self.dismiss(),
            (Phase::Suppressed, Event::SuppressForever) => Vec::new(),
            (_, Event::SuppressForever) => {
                self.enter(Phase::Suppressed);
                vec![Effect::CancelTimers, Effect::PersistSuppressed]
            }
            (Phase::Minimized, Event::ReopenFromBadge) => {
                self.enter(Phase::Open { reappearing: true });
                Vec::new()
            }
            (phase, event) => {
                debug!("{:?} has no effect in {:?}", event, phase);
                Vec::new()
            }
        }
    }

    fn mount(&mut self, record: SessionRecord) -> Vec<Effect> {
        if self.mounted {
            debug!("Popup already mounted, ignoring session record");
            return Vec::new();
        }
        self.mounted = true;
        self.dismiss_count = record.dismiss_count.unwrap_or(0);

        if record.suppressed {
            self.enter(Phase::Suppressed);
            return Vec::new();
        }
        match record.dismiss_count {
            Some(count) if count >= MINIMIZE_AFTER => {
                self.enter(Phase::Minimized);
                Vec::new()
            }
            Some(_) => {
                self.enter(Phase::Open { reappearing: false });
                Vec::new()
            }
            None => vec![Effect::Arm {
                timer: TimerKind::InitialOpen,
                after_ms: self.timing.initial_delay_ms,
            }],
        }
    }

    fn dismiss(&mut self) -> Vec<Effect> {
        self.dismiss_count = self.dismiss_count.saturating_add(1);
        let mut effects = vec![Effect::PersistDismissCount(self.dismiss_count)];

        if self.dismiss_count >= MINIMIZE_AFTER {
            self.enter(Phase::Minimized);
        } else {
            self.enter(Phase::ClosedPendingReappear);
            effects.push(Effect::Arm {
                timer: TimerKind::Reappear,
                after_ms: self.timing.reappear_delay_ms,
            });
        }
        effects
    }

    fn enter(&mut self, next: Phase) {
        info!(
            "Popup {:?} -> {:?} (dismissed {} times)",
            self.phase, next, self.dismiss_count
        );
        self.phase = next;
    }
}
