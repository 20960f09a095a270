//=========================================================================
// State Transition
//=========================================================================
//
// Four-phase lifecycle shared by every entry of the state stack.
//
// Progress `t` runs from 1.0 (fully off screen) to 0.0 (fully on):
// ```text
//            not covered                 covered
//   ┌──────────────┐  t→0  ┌────────┐  t→1  ┌───────────────┐ t=1 ┌────────┐
//   │ TransitionOn │ ────► │ Active │ ────► │ TransitionOff │ ──► │ Hidden │
//   └──────────────┘       └────────┘       └───────────────┘     └────────┘
//
//   exiting: always TransitionOff, removed from the stack once t = 1
// ```
//
//=========================================================================

//=== Constants ===========================================================

/// Progress change per second (a 0.5 s transition).
pub const TRANSITION_RATE: f32 = 2.0;

// Absorbs f32 drift so N equal steps of 1/N land on the end point.
const END_EPSILON: f32 = 1.0e-5;

//=== Phase ===============================================================

/// Lifecycle phase of a stacked state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    TransitionOn,
    Active,
    TransitionOff,
    Hidden,
}

impl Phase {
    /// `TransitionOn` or `Active`: the phases that may take focus.
    pub const fn is_on(self) -> bool {
        matches!(self, Self::TransitionOn | Self::Active)
    }
}

//=== Transition ==========================================================

/// Phase, progress and focus bookkeeping for one stacked state.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    phase: Phase,
    progress: f32,
    exiting: bool,
    other_has_focus: bool,
}

impl Transition {
    /// A freshly pushed state: fully off, transitioning on.
    pub fn new() -> Self {
        Self {
            phase: Phase::TransitionOn,
            progress: 1.0,
            exiting: false,
            other_has_focus: false,
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// 0.0 = fully on, 1.0 = fully off.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Opacity for fades (`1 - progress`).
    pub fn alpha(&self) -> f32 {
        1.0 - self.progress
    }

    pub fn is_exiting(&self) -> bool {
        self.exiting
    }

    pub fn other_has_focus(&self) -> bool {
        self.other_has_focus
    }

    /// Whether the owning state may respond to input this frame.
    pub fn is_active(&self) -> bool {
        !self.other_has_focus && self.phase.is_on()
    }

    //--- Mutation ---------------------------------------------------------

    /// Starts the one-way exit transition. Repeated calls are no-ops.
    pub fn begin_exit(&mut self) {
        self.exiting = true;
    }

    /// Advances the lifecycle by `dt` seconds.
    ///
    /// Returns `false` once an exiting state has fully transitioned off and
    /// must be removed from the stack.
    pub fn update(&mut self, dt: f32, other_has_focus: bool, covered: bool) -> bool {
        self.other_has_focus = other_has_focus;

        if self.exiting {
            self.phase = Phase::TransitionOff;
            if !self.advance(dt, 1.0) {
                self.phase = Phase::Hidden;
                return false;
            }
        } else if covered {
            self.phase = if self.advance(dt, 1.0) {
                Phase::TransitionOff
            } else {
                Phase::Hidden
            };
        } else {
            self.phase = if self.advance(dt, -1.0) {
                Phase::TransitionOn
            } else {
                Phase::Active
            };
        }

        true
    }

    /// Moves progress toward 1 (`direction > 0`) or 0. Returns `true`
    /// while the end point has not been reached.
    fn advance(&mut self, dt: f32, direction: f32) -> bool {
        self.progress += dt.max(0.0) * TRANSITION_RATE * direction;

        if direction < 0.0 && self.progress <= END_EPSILON {
            self.progress = 0.0;
            false
        } else if direction > 0.0 && self.progress >= 1.0 - END_EPSILON {
            self.progress = 1.0;
            false
        } else {
            true
        }
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn active() -> Transition {
        let mut t = Transition::new();
        while t.phase() != Phase::Active {
            t.update(DT, false, false);
        }
        t
    }

    #[test]
    fn new_state_starts_fully_off() {
        let t = Transition::new();
        assert_eq!(t.phase(), Phase::TransitionOn);
        assert_eq!(t.progress(), 1.0);
        assert_eq!(t.alpha(), 0.0);
    }

    #[test]
    fn transition_on_takes_half_a_second() {
        let mut t = Transition::new();
        for _ in 0..29 {
            t.update(DT, false, false);
            assert_eq!(t.phase(), Phase::TransitionOn);
        }
        t.update(DT, false, false);
        assert_eq!(t.phase(), Phase::Active);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn covered_state_fades_to_hidden_and_stays() {
        let mut t = active();

        t.update(0.1, false, true);
        assert_eq!(t.phase(), Phase::TransitionOff);

        for _ in 0..10 {
            assert!(t.update(0.1, true, true));
        }
        assert_eq!(t.phase(), Phase::Hidden);
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn uncovered_state_comes_back() {
        let mut t = active();
        for _ in 0..30 {
            t.update(DT, true, true);
        }
        assert_eq!(t.phase(), Phase::Hidden);

        t.update(DT, false, false);
        assert_eq!(t.phase(), Phase::TransitionOn);
    }

    #[test]
    fn closing_finishes_in_bounded_frames() {
        for dt in [1.0f32 / 60.0, 1.0 / 64.0, 0.125, 0.3] {
            let mut t = active();
            t.begin_exit();

            let bound = (1.0 / (2.0 * dt)).ceil() as usize;
            let mut frames = 0;
            while t.update(dt, false, false) {
                frames += 1;
                assert_eq!(t.phase(), Phase::TransitionOff);
                assert!(frames < bound, "dt {} exceeded {} frames", dt, bound);
            }
            assert_eq!(frames + 1, bound);
            assert_eq!(t.phase(), Phase::Hidden);
        }
    }

    #[test]
    fn closing_wins_over_cover_and_focus() {
        let mut t = active();
        t.begin_exit();

        t.update(DT, false, false);
        assert_eq!(t.phase(), Phase::TransitionOff);
        t.update(DT, true, true);
        assert_eq!(t.phase(), Phase::TransitionOff);
        assert!(t.is_exiting());
    }

    #[test]
    fn progress_stays_in_unit_range() {
        let mut t = Transition::new();
        let pattern = [(0.7, false, false), (0.05, true, true), (2.0, false, true), (0.3, false, false)];

        for step in 0..200 {
            let (dt, focus, covered) = pattern[step % pattern.len()];
            t.update(dt, focus, covered);
            assert!((0.0..=1.0).contains(&t.progress()));
        }
    }

    #[test]
    fn is_active_requires_focus_and_on_phase() {
        let mut t = active();
        assert!(t.is_active());

        t.update(DT, true, false);
        assert!(!t.is_active());

        t.update(DT, false, true);
        assert!(!t.is_active());
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut t = active();
        t.update(-1.0, false, true);
        assert_eq!(t.progress(), 0.0);
    }
}
