pub const LONG_PRESS_MS: u32 = 450;
pub const LONG_PRESS_CANCEL_THRESHOLD_PX: f32 = 14.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressPhase {
    Idle,
    /// Held down; the long-press timer is running.
    Armed,
    /// The long press already fired for this contact.
    Fired,
    /// Moved too far to become a long press. Releasing still counts as a tap.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    Tap,
    LongPress,
}

/// Identifies the timer armed by one `press`. Older tokens are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerToken(u32);

/// Tap versus long-press disambiguation for a single score area.
#[derive(Clone, Copy, Debug)]
pub struct PressGesture {
    phase: PressPhase,
    origin: [f32; 2],
    cancel_slop: f32,
    generation: u32,
}

impl PressGesture {
    pub fn new() -> Self {
        Self::with_slop(LONG_PRESS_CANCEL_THRESHOLD_PX)
    }

    pub fn with_slop(cancel_slop: f32) -> Self {
        Self {
            phase: PressPhase::Idle,
            origin: [0.0, 0.0],
            cancel_slop,
            generation: 0,
        }
    }

    pub fn phase(&self) -> PressPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != PressPhase::Idle
    }

    /// Starts a contact. The caller schedules a `LONG_PRESS_MS` timer carrying the token.
    pub fn press(&mut self, x: f32, y: f32) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        self.origin = [x, y];
        self.phase = PressPhase::Armed;
        TimerToken(self.generation)
    }

    /// Returns true when this move cancelled the pending long press.
    pub fn moved(&mut self, x: f32, y: f32) -> bool {
        if self.phase != PressPhase::Armed {
            return false;
        }
        let dx = x - self.origin[0];
        let dy = y - self.origin[1];
        if dx.hypot(dy) > self.cancel_slop {
            self.phase = PressPhase::Cancelled;
            return true;
        }
        false
    }

    pub fn timer_elapsed(&mut self, token: TimerToken) -> Option<PressOutcome> {
        if self.phase != PressPhase::Armed || token.0 != self.generation {
            return None;
        }
        self.phase = PressPhase::Fired;
        Some(PressOutcome::LongPress)
    }

    pub fn release(&mut self) -> Option<PressOutcome> {
        let outcome = match self.phase {
            PressPhase::Armed | PressPhase::Cancelled => Some(PressOutcome::Tap),
            PressPhase::Idle | PressPhase::Fired => None,
        };
        self.phase = PressPhase::Idle;
        outcome
    }

    /// Pointer cancelled or capture lost: drop the contact without an outcome.
    pub fn abort(&mut self) {
        self.phase = PressPhase::Idle;
    }

    /// True while a timer for this contact may still fire.
    pub fn timer_pending(&self) -> bool {
        self.phase == PressPhase::Armed
    }
}

impl Default for PressGesture {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
    Unknown,
}

impl PointerKind {
    pub fn from_pointer_type(value: &str) -> Self {
        match value {
            "mouse" => PointerKind::Mouse,
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Unknown,
        }
    }
}

/// Mouse presses only count for the main button, everything else for the primary contact.
pub fn is_primary_press(kind: PointerKind, button: i16, is_primary: bool) -> bool {
    match kind {
        PointerKind::Mouse => button == 0,
        _ => is_primary,
    }
}
