use std::time::{Duration, Instant};

use tracing::trace;

use crate::core::Viewport;

use super::{HoverSession, HoverState, HoverTransition, ResolvedDatumSet, TeardownReason};

pub const DEFAULT_HOVER_DEBOUNCE: Duration = Duration::from_millis(300);

/// Handle of the pending dismissal timer.
///
/// Hosts that drive real timers schedule a callback at `deadline` and hand the
/// token back through [`HoverSessionController::fire_timer`]. Cancelling the
/// teardown drops the handle, so an old token can never fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DebounceTimer {
    pub token: u64,
    pub deadline: Instant,
}

/// Per-chart hover state machine.
///
/// `Idle` is represented by the absence of a session; at most one session
/// exists at any time.
#[derive(Debug, Clone)]
pub struct HoverSessionController {
    session: Option<HoverSession>,
    timer: Option<DebounceTimer>,
    next_token: u64,
    debounce: Duration,
}

impl Default for HoverSessionController {
    fn default() -> Self {
        Self::new(DEFAULT_HOVER_DEBOUNCE)
    }
}

impl HoverSessionController {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            session: None,
            timer: None,
            next_token: 0,
            debounce,
        }
    }

    #[must_use]
    pub fn state(&self) -> HoverState {
        self.session
            .as_ref()
            .map_or(HoverState::Idle, HoverSession::state)
    }

    #[must_use]
    pub fn session(&self) -> Option<&HoverSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn pending_timer(&self) -> Option<DebounceTimer> {
        self.timer
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn on_enter(&mut self, x: f64, y: f64, viewport: Viewport) -> HoverTransition {
        if !viewport.contains_plot_y(y) {
            return self.teardown(TeardownReason::OutOfBounds);
        }

        let transition = match self.session.as_mut() {
            None => {
                self.session = Some(HoverSession::armed((x, y)));
                HoverTransition::Armed
            }
            Some(session) if session.state == HoverState::Dismissing => {
                self.timer = None;
                *session = HoverSession::armed((x, y));
                HoverTransition::Rearmed
            }
            Some(session) => {
                session.pointer = (x, y);
                HoverTransition::Unchanged
            }
        };
        trace!(?transition, x, y, "hover enter");
        transition
    }

    /// Resolves the datum set for a pointer move.
    ///
    /// `resolve` is only invoked when the session can accept a datum. A move
    /// while idle arms the session first; a move while dismissing is ignored
    /// because the pointer is outside the target area.
    pub fn on_move<F>(&mut self, x: f64, y: f64, viewport: Viewport, resolve: F) -> HoverTransition
    where
        F: FnOnce(f64, f64) -> ResolvedDatumSet,
    {
        if !viewport.contains_plot_y(y) {
            return self.teardown(TeardownReason::OutOfBounds);
        }

        let session = self
            .session
            .get_or_insert_with(|| HoverSession::armed((x, y)));
        if session.state == HoverState::Dismissing {
            return HoverTransition::Unchanged;
        }

        let was_active = session.state == HoverState::Active;
        session.pointer = (x, y);
        session.resolved = resolve(x, y);

        let transition = if session.resolved.is_empty() {
            session.state = HoverState::Armed;
            if was_active {
                HoverTransition::Armed
            } else {
                HoverTransition::Unchanged
            }
        } else {
            session.state = HoverState::Active;
            if was_active {
                HoverTransition::Updated
            } else {
                HoverTransition::Activated
            }
        };
        trace!(?transition, x, y, resolved = session.resolved.len(), "hover move");
        transition
    }

    /// Starts the dismissal debounce.
    pub fn on_leave(&mut self, now: Instant) -> HoverTransition {
        let Some(session) = self.session.as_mut() else {
            return HoverTransition::Unchanged;
        };
        if session.state == HoverState::Dismissing {
            return HoverTransition::Unchanged;
        }

        session.state = HoverState::Dismissing;
        self.next_token += 1;
        let timer = DebounceTimer {
            token: self.next_token,
            deadline: now + self.debounce,
        };
        self.timer = Some(timer);
        trace!(token = timer.token, "hover dismissing");
        HoverTransition::Dismissing
    }

    /// Fires the pending timer if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> HoverTransition {
        match self.timer {
            Some(timer) => self.fire_timer(timer.token, now),
            None => HoverTransition::Unchanged,
        }
    }

    /// Delivers a host-scheduled timer callback. Stale tokens and early
    /// deliveries are no-ops.
    pub fn fire_timer(&mut self, token: u64, now: Instant) -> HoverTransition {
        let Some(timer) = self.timer else {
            return HoverTransition::Unchanged;
        };
        if timer.token != token || now < timer.deadline {
            return HoverTransition::Unchanged;
        }
        if self.state() != HoverState::Dismissing {
            self.timer = None;
            return HoverTransition::Unchanged;
        }
        self.teardown(TeardownReason::DebounceElapsed)
    }

    /// Drops the session immediately, bypassing any debounce.
    pub fn force_idle(&mut self, reason: TeardownReason) -> HoverTransition {
        self.teardown(reason)
    }

    fn teardown(&mut self, reason: TeardownReason) -> HoverTransition {
        self.timer = None;
        if self.session.take().is_none() {
            return HoverTransition::Unchanged;
        }
        trace!(?reason, "hover session torn down");
        HoverTransition::TornDown(reason)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::HoverSessionController;
    use crate::core::{Margin, Viewport};
    use crate::interaction::{
        HoverState, HoverTransition, ResolvedDatum, ResolvedDatumSet, TeardownReason,
    };

    fn viewport() -> Viewport {
        Viewport::new(400, 300).with_margin(Margin::new(20.0, 10.0, 30.0, 40.0))
    }

    fn one_datum(_: f64, _: f64) -> ResolvedDatumSet {
        let mut set = ResolvedDatumSet::new();
        set.push(ResolvedDatum {
            series_key: "a".to_owned(),
            point_index: 0,
            datum_index: 0,
            x: 1.0,
            y: Some(2.0),
        });
        set
    }

    #[test]
    fn leave_then_timeout_returns_to_idle() {
        let mut hover = HoverSessionController::default();
        let t0 = Instant::now();
        hover.on_enter(100.0, 100.0, viewport());
        hover.on_move(100.0, 100.0, viewport(), one_datum);
        assert_eq!(hover.state(), HoverState::Active);

        assert_eq!(hover.on_leave(t0), HoverTransition::Dismissing);
        assert_eq!(
            hover.poll(t0 + Duration::from_millis(299)),
            HoverTransition::Unchanged
        );
        assert_eq!(
            hover.poll(t0 + Duration::from_millis(300)),
            HoverTransition::TornDown(TeardownReason::DebounceElapsed)
        );
        assert_eq!(hover.state(), HoverState::Idle);
    }

    #[test]
    fn stale_timer_token_never_fires() {
        let mut hover = HoverSessionController::default();
        let t0 = Instant::now();
        hover.on_enter(100.0, 100.0, viewport());
        hover.on_move(100.0, 100.0, viewport(), one_datum);
        hover.on_leave(t0);
        let stale = hover.pending_timer().expect("timer armed").token;

        hover.on_enter(100.0, 100.0, viewport());
        assert!(hover.pending_timer().is_none());
        assert_eq!(
            hover.fire_timer(stale, t0 + Duration::from_secs(5)),
            HoverTransition::Unchanged
        );
        assert_eq!(hover.state(), HoverState::Armed);
    }

    #[test]
    fn move_with_no_resolvable_datum_stays_armed() {
        let mut hover = HoverSessionController::default();
        hover.on_enter(100.0, 100.0, viewport());
        let transition = hover.on_move(100.0, 100.0, viewport(), |_, _| ResolvedDatumSet::new());
        assert_eq!(transition, HoverTransition::Unchanged);
        assert_eq!(hover.state(), HoverState::Armed);
    }
}
