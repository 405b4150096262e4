use std::time::Duration;

use serde::{Deserialize, Serialize};

use boxfight_core::catalog::WeaponKind;
use boxfight_core::time::SimInstant;

/// Fixed per-archetype weapon numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub max_ammo: u32,
    pub damage: i32,
    /// Minimum time between two shots.
    pub fire_interval: Duration,
    pub reload_duration: Duration,
}

impl WeaponStats {
    pub fn for_kind(kind: WeaponKind) -> Self {
        match kind {
            WeaponKind::Assault => Self {
                max_ammo: 30,
                damage: 10,
                fire_interval: Duration::from_millis(100),
                reload_duration: Duration::from_millis(1500),
            },
            WeaponKind::Shotgun => Self {
                max_ammo: 5,
                damage: 30,
                fire_interval: Duration::from_millis(800),
                reload_duration: Duration::from_millis(2000),
            },
            WeaponKind::Sniper => Self {
                max_ammo: 1,
                damage: 50,
                fire_interval: Duration::from_millis(1500),
                reload_duration: Duration::from_millis(2500),
            },
        }
    }
}

/// What happened when a shot was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    /// The weapon was not ready; nothing changed.
    NotReady,
    Fired,
    /// Fired the last round and started reloading.
    Emptied,
}

/// One weapon instance: ammo, cooldown and reload timing.
///
/// Cooldown is implicit in `last_fired_at`; reloading is a deadline on the
/// simulated clock, checked by [`Weapon::update`] every tick whether or not
/// the weapon is the active one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    kind: WeaponKind,
    stats: WeaponStats,
    ammo: u32,
    last_fired_at: Option<SimInstant>,
    reload_completes_at: Option<SimInstant>,
}

impl Weapon {
    pub fn new(kind: WeaponKind) -> Self {
        let stats = WeaponStats::for_kind(kind);
        Self {
            kind,
            stats,
            ammo: stats.max_ammo,
            last_fired_at: None,
            reload_completes_at: None,
        }
    }

    /// The standard three-slot loadout.
    pub fn loadout() -> [Weapon; 3] {
        WeaponKind::LOADOUT.map(Weapon::new)
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn stats(&self) -> &WeaponStats {
        &self.stats
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn max_ammo(&self) -> u32 {
        self.stats.max_ammo
    }

    pub fn damage(&self) -> i32 {
        self.stats.damage
    }

    pub fn is_reloading(&self) -> bool {
        self.reload_completes_at.is_some()
    }

    pub fn reload_completes_at(&self) -> Option<SimInstant> {
        self.reload_completes_at
    }

    pub fn last_fired_at(&self) -> Option<SimInstant> {
        self.last_fired_at
    }

    pub fn can_fire(&self, now: SimInstant) -> bool {
        self.ammo > 0
            && !self.is_reloading()
            && self
                .last_fired_at
                .is_none_or(|last| now.duration_since(last) >= self.stats.fire_interval)
    }

    /// Spend one round. Callers check [`can_fire`](Self::can_fire) first; an
    /// unready weapon is left untouched.
    pub fn fire(&mut self, now: SimInstant) -> FireOutcome {
        if !self.can_fire(now) {
            return FireOutcome::NotReady;
        }
        self.ammo -= 1;
        self.last_fired_at = Some(now);
        if self.ammo == 0 {
            self.start_reload(now);
            FireOutcome::Emptied
        } else {
            FireOutcome::Fired
        }
    }

    /// Begin reloading. No-op while already reloading or with a full
    /// magazine. Returns whether a reload started.
    pub fn start_reload(&mut self, now: SimInstant) -> bool {
        if self.is_reloading() || self.ammo >= self.stats.max_ammo {
            return false;
        }
        self.reload_completes_at = Some(now + self.stats.reload_duration);
        true
    }

    /// Finish a reload whose deadline has passed. Returns whether one did.
    pub fn update(&mut self, now: SimInstant) -> bool {
        match self.reload_completes_at {
            Some(deadline) if now >= deadline => {
                self.ammo = self.stats.max_ammo;
                self.reload_completes_at = None;
                true
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxfight_core::time::SimClock;

    fn at(secs: f32) -> SimInstant {
        SimInstant::from_secs_f32(secs)
    }

    #[test]
    fn archetype_table() {
        let a = WeaponStats::for_kind(WeaponKind::Assault);
        assert_eq!((a.max_ammo, a.damage), (30, 10));
        let s = WeaponStats::for_kind(WeaponKind::Shotgun);
        assert_eq!((s.max_ammo, s.damage), (5, 30));
        assert_eq!(s.fire_interval, Duration::from_millis(800));
        let n = WeaponStats::for_kind(WeaponKind::Sniper);
        assert_eq!((n.max_ammo, n.damage), (1, 50));
        assert_eq!(n.reload_duration, Duration::from_millis(2500));
    }

    #[test]
    fn fresh_weapon_can_fire_immediately() {
        let w = Weapon::new(WeaponKind::Sniper);
        assert!(w.can_fire(SimInstant::ZERO));
    }

    #[test]
    fn cooldown_blocks_until_interval_elapsed() {
        let mut w = Weapon::new(WeaponKind::Shotgun);
        assert_eq!(w.fire(at(1.0)), FireOutcome::Fired);
        assert!(!w.can_fire(at(1.5)));
        assert_eq!(w.fire(at(1.5)), FireOutcome::NotReady);
        assert_eq!(w.ammo(), 4);
        assert!(w.can_fire(at(1.8)));
    }

    #[test]
    fn last_round_starts_reload() {
        let mut w = Weapon::new(WeaponKind::Sniper);
        assert_eq!(w.fire(at(2.0)), FireOutcome::Emptied);
        assert_eq!(w.ammo(), 0);
        assert!(w.is_reloading());
        assert_eq!(w.reload_completes_at(), Some(at(4.5)));
    }

    #[test]
    fn ammo_frozen_while_reloading() {
        let mut w = Weapon::new(WeaponKind::Sniper);
        w.fire(at(0.0));
        assert!(!w.update(at(2.4)));
        assert_eq!(w.ammo(), 0);
        assert!(!w.can_fire(at(2.4)));
        assert!(w.update(at(2.5)));
        assert_eq!(w.ammo(), 1);
        assert!(!w.is_reloading());
    }

    #[test]
    fn late_update_still_completes_reload() {
        let mut w = Weapon::new(WeaponKind::Shotgun);
        for i in 0..5 {
            w.fire(at(i as f32));
        }
        assert!(w.is_reloading());
        // Many skipped ticks collapse into one large step.
        assert!(w.update(at(60.0)));
        assert_eq!(w.ammo(), 5);
    }

    #[test]
    fn manual_reload() {
        let mut w = Weapon::new(WeaponKind::Assault);
        assert!(!w.start_reload(at(0.0)), "Full magazine does not reload");
        w.fire(at(0.0));
        assert!(w.start_reload(at(0.5)));
        assert!(!w.start_reload(at(0.6)), "Already reloading");
        assert!(w.update(at(2.0)));
        assert_eq!(w.ammo(), 30);
    }

    #[test]
    fn assault_empties_and_refills_on_schedule() {
        let mut w = Weapon::new(WeaponKind::Assault);
        let mut clock = SimClock::new();
        let mut shots = 0;
        for _ in 0..30 {
            let now = clock.advance(0.1);
            w.update(now);
            if w.can_fire(now) {
                w.fire(now);
                shots += 1;
            }
        }
        assert_eq!(shots, 30);
        assert_eq!(w.ammo(), 0);
        assert!(w.is_reloading());

        for _ in 0..14 {
            let now = clock.advance(0.1);
            w.update(now);
            assert_eq!(w.ammo(), 0);
        }
        let now = clock.advance(0.1);
        w.update(now);
        assert_eq!(w.ammo(), 30);
        assert!(!w.is_reloading());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ammo_stays_in_bounds_and_shots_are_spaced(
                kind_idx in 0usize..3,
                steps in proptest::collection::vec((0.0f32..0.5, proptest::bool::ANY), 1..300),
            ) {
                let mut w = Weapon::new(WeaponKind::LOADOUT[kind_idx]);
                let mut clock = SimClock::new();
                let mut last_shot: Option<SimInstant> = None;

                for (dt, trigger) in steps {
                    let now = clock.advance(dt);
                    w.update(now);
                    if trigger && w.can_fire(now) {
                        w.fire(now);
                        if let Some(prev) = last_shot {
                            prop_assert!(now.duration_since(prev) >= w.stats().fire_interval);
                        }
                        last_shot = Some(now);
                    }
                    prop_assert!(w.ammo() <= w.max_ammo());
                    if !w.is_reloading() {
                        prop_assert!(w.reload_completes_at().is_none());
                    }
                    if w.ammo() == 0 {
                        prop_assert!(w.is_reloading());
                    }
                }
            }
        }
    }
}
