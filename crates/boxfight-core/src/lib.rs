pub mod catalog;
pub mod error;
pub mod events;
pub mod geometry;
pub mod intent;
pub mod session;
pub mod snapshot;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::events::SimEvent;
    use crate::intent::{InputFrame, LookDelta, MoveAxes};
    use crate::session::ArenaSession;

    /// Input that holds the given movement axes and nothing else.
    pub fn move_input(dx: f32, dz: f32) -> InputFrame {
        InputFrame {
            move_axes: MoveAxes { dx, dz },
            ..Default::default()
        }
    }

    /// Input that holds the trigger without moving.
    pub fn shoot_input() -> InputFrame {
        InputFrame {
            shoot_held: true,
            ..Default::default()
        }
    }

    /// Input that turns by a raw pointer delta.
    pub fn look_input(dx: f32) -> InputFrame {
        InputFrame {
            look_delta: LookDelta { dx, dy: 0.0 },
            ..Default::default()
        }
    }

    /// Run N ticks of `dt`, returning all accumulated events.
    pub fn run_ticks(session: &mut dyn ArenaSession, n: usize, dt: f32) -> Vec<SimEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(session.tick(dt));
        }
        all_events
    }

    // ================================================================
    // Session Contract Tests
    // ================================================================
    // Generic checks every ArenaSession implementation must pass. Crates
    // call them from their own tests with a freshly built session.

    /// tick() with dt>0 must advance the simulated clock.
    pub fn contract_tick_advances_clock(session: &mut dyn ArenaSession) {
        let before = session.snapshot().time;
        session.tick(0.25);
        let after = session.snapshot().time;
        assert!(after > before, "tick(dt>0) must advance the clock");
    }

    /// A paused session must not change; resuming must let it change again.
    pub fn contract_pause_freezes_state(session: &mut dyn ArenaSession) {
        session.pause();
        assert!(session.is_paused());
        let before = session.snapshot();
        session.tick(1.0);
        let during = session.snapshot();
        assert_eq!(before, during, "State must not change while paused");

        session.resume();
        session.tick(1.0);
        let after = session.snapshot();
        assert_ne!(during.time, after.time, "Clock must move after resume");
    }

    /// Every snapshot entity must respect the ammo bounds.
    pub fn contract_ammo_within_bounds(session: &dyn ArenaSession) {
        for e in &session.snapshot().entities {
            assert!(
                e.ammo <= e.max_ammo,
                "entity {} has ammo {} above max {}",
                e.id,
                e.ammo,
                e.max_ammo
            );
        }
    }
}
