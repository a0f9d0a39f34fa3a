use std::time::Duration;

/// Automatic rotation fires on this interval while the carousel is idle.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(5);

/// Cross-fade length. Manual controls are ignored until it elapses.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Rotation timer is live.
    IdleRotating,
    /// Pointer is over the widget; rotation suspended.
    HoveredPaused,
    /// A cross-fade is running. Remembers whether the pointer is over the
    /// widget so the right phase is restored when the fade ends.
    Transitioning { hovered: bool },
    /// Full-scale modal view of the active image.
    Enlarged,
}

/// State machine behind the portfolio carousel: a cyclic index over a fixed
/// image sequence with guarded transitions, so an overlapping step or a
/// rotation inside the modal is unrepresentable rather than merely avoided.
#[derive(Debug)]
pub struct Carousel {
    len: usize,
    index: usize,
    phase: Phase,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            index: 0,
            phase: Phase::IdleRotating,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rotation timer fired. Advances only while idle; hover, an in-flight
    /// fade, and the modal all suppress automatic advancement.
    pub fn tick(&mut self) -> bool {
        match self.phase {
            Phase::IdleRotating => self.step(1, false),
            _ => false,
        }
    }

    /// Manual advance. Returns `false` when the input was ignored.
    pub fn next(&mut self) -> bool {
        self.manual_step(1)
    }

    /// Manual step back. Returns `false` when the input was ignored.
    pub fn prev(&mut self) -> bool {
        self.manual_step(-1)
    }

    fn manual_step(&mut self, delta: isize) -> bool {
        match self.phase {
            Phase::IdleRotating => self.step(delta, false),
            Phase::HoveredPaused => self.step(delta, true),
            Phase::Transitioning { .. } | Phase::Enlarged => false,
        }
    }

    fn step(&mut self, delta: isize, hovered: bool) -> bool {
        if self.len == 0 {
            return false;
        }
        let len = self.len as isize;
        self.index = (self.index as isize + delta).rem_euclid(len) as usize;
        self.phase = Phase::Transitioning { hovered };
        true
    }

    /// The cross-fade finished; resume rotation unless the pointer is still
    /// over the widget.
    pub fn finish_transition(&mut self) {
        if let Phase::Transitioning { hovered } = self.phase {
            self.phase = if hovered {
                Phase::HoveredPaused
            } else {
                Phase::IdleRotating
            };
        }
    }

    pub fn pointer_enter(&mut self) {
        match self.phase {
            Phase::IdleRotating => self.phase = Phase::HoveredPaused,
            Phase::Transitioning { .. } => self.phase = Phase::Transitioning { hovered: true },
            Phase::HoveredPaused | Phase::Enlarged => {}
        }
    }

    pub fn pointer_leave(&mut self) {
        match self.phase {
            Phase::HoveredPaused => self.phase = Phase::IdleRotating,
            Phase::Transitioning { .. } => self.phase = Phase::Transitioning { hovered: false },
            Phase::IdleRotating | Phase::Enlarged => {}
        }
    }

    /// Clicking the active image opens the full-scale view.
    pub fn enlarge(&mut self) -> bool {
        if self.len == 0 || self.phase == Phase::Enlarged {
            return false;
        }
        self.phase = Phase::Enlarged;
        true
    }

    /// Close control, or a click outside the enlarged frame.
    pub fn close(&mut self) {
        if self.phase == Phase::Enlarged {
            self.phase = Phase::IdleRotating;
        }
    }
}
