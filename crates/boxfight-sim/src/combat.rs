use smallvec::SmallVec;

use boxfight_core::events::SimEvent;
use boxfight_core::geometry::{Aabb, Vec3};
use boxfight_core::intent::EntityId;
use boxfight_core::time::SimInstant;

use crate::config::ArenaConfig;
use crate::entity::Entity;
use crate::movement::forward;
use crate::weapon::FireOutcome;

/// Ids of every target whose box the ray crosses, in the order given.
///
/// Each target is tested on its own: a nearer entity does not shield one
/// behind it. The shooter is skipped. Obstacles are not considered.
pub fn cast_hitscan(
    origin: Vec3,
    dir: Vec3,
    targets: &[(EntityId, Aabb)],
    shooter_id: EntityId,
) -> SmallVec<[EntityId; 8]> {
    targets
        .iter()
        .filter(|(id, _)| *id != shooter_id)
        .filter(|(_, bounds)| bounds.ray_entry(origin, dir).is_some())
        .map(|(id, _)| *id)
        .collect()
}

/// Pull the trigger on the shooter's active weapon.
///
/// Nothing happens unless the weapon can fire. Otherwise the weapon spends a
/// round and every other entity on the shooter's forward ray takes the
/// weapon's damage.
pub fn resolve_fire(
    entities: &mut [Entity],
    shooter_index: usize,
    now: SimInstant,
    config: &ArenaConfig,
) -> Vec<SimEvent> {
    let mut events = Vec::new();
    let Some(shooter) = entities.get_mut(shooter_index) else {
        return events;
    };
    let shooter_id = shooter.id;
    let origin = shooter.position;
    let dir = forward(shooter.yaw);

    let weapon = shooter.active_weapon_mut();
    if !weapon.can_fire(now) {
        return events;
    }
    let outcome = weapon.fire(now);
    let kind = weapon.kind();
    let damage = weapon.damage();
    events.push(SimEvent::WeaponFired {
        shooter: shooter_id,
        weapon: kind,
        ammo_left: weapon.ammo(),
    });
    if outcome == FireOutcome::Emptied {
        events.push(SimEvent::ReloadStarted {
            entity: shooter_id,
            weapon: kind,
        });
    }

    // Stack-allocated for typical session sizes
    let targets: SmallVec<[(EntityId, Aabb); 8]> = entities
        .iter()
        .map(|e| (e.id, config.entity_bounds(e.position)))
        .collect();
    let hits = cast_hitscan(origin, dir, &targets, shooter_id);

    for target_id in hits {
        let Some(target) = entities.iter_mut().find(|e| e.id == target_id) else {
            continue;
        };
        let eliminated = target.take_damage(damage);
        tracing::debug!(
            shooter = shooter_id,
            target = target_id,
            damage,
            health = target.health,
            "Hitscan hit"
        );
        events.push(SimEvent::Hit {
            shooter: shooter_id,
            target: target_id,
            damage,
            health_left: target.health,
        });
        if eliminated {
            tracing::info!(entity = target_id, by = shooter_id, "Entity eliminated");
            events.push(SimEvent::Eliminated {
                entity: target_id,
                by: shooter_id,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use boxfight_core::catalog::WeaponKind;

    use super::*;

    fn unit_at(x: f32, z: f32) -> Aabb {
        Aabb::from_center_half_extents(Vec3::new(x, 0.0, z), Vec3::splat(0.5))
    }

    #[test]
    fn ray_hits_target_ahead() {
        let targets = [(2, unit_at(0.0, -5.0))];
        let hits = cast_hitscan(Vec3::ZERO, Vec3::NEG_Z, &targets, 1);
        assert_eq!(hits.as_slice(), &[2]);
    }

    #[test]
    fn ray_misses_target_behind_or_aside() {
        let targets = [(2, unit_at(0.0, 5.0)), (3, unit_at(4.0, -5.0))];
        assert!(cast_hitscan(Vec3::ZERO, Vec3::NEG_Z, &targets, 1).is_empty());
    }

    #[test]
    fn ray_never_hits_shooter() {
        let targets = [(1, unit_at(0.0, 0.0))];
        assert!(cast_hitscan(Vec3::ZERO, Vec3::NEG_Z, &targets, 1).is_empty());
    }

    #[test]
    fn every_entity_on_the_line_is_hit() {
        let targets = [(2, unit_at(0.0, -3.0)), (3, unit_at(0.0, -9.0))];
        let hits = cast_hitscan(Vec3::ZERO, Vec3::NEG_Z, &targets, 1);
        assert_eq!(hits.as_slice(), &[2, 3]);
    }

    fn duel(target_health: i32) -> Vec<Entity> {
        let shooter = Entity::human(1, Vec3::ZERO, 100);
        let mut target = Entity::autonomous(2, Vec3::new(0.0, 0.0, -10.0), 100, Some(1));
        target.health = target_health;
        vec![shooter, target]
    }

    #[test]
    fn shotgun_eliminates_weak_target() {
        let config = ArenaConfig::default();
        let mut entities = duel(10);
        entities[0].switch_weapon(1);
        let events = resolve_fire(&mut entities, 0, SimInstant::ZERO, &config);
        assert!(entities[1].is_eliminated());
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::Eliminated { entity: 2, by: 1 }
        )));
    }

    #[test]
    fn shotgun_wounds_healthy_target() {
        let config = ArenaConfig::default();
        let mut entities = duel(40);
        entities[0].switch_weapon(1);
        let events = resolve_fire(&mut entities, 0, SimInstant::ZERO, &config);
        assert_eq!(entities[1].health, 10);
        assert!(!entities[1].is_eliminated());
        assert!(!events.iter().any(SimEvent::is_elimination));
        assert!(events.contains(&SimEvent::Hit {
            shooter: 1,
            target: 2,
            damage: 30,
            health_left: 10,
        }));
    }

    #[test]
    fn unready_weapon_does_nothing() {
        let config = ArenaConfig::default();
        let mut entities = duel(100);
        let t0 = SimInstant::ZERO;
        assert!(!resolve_fire(&mut entities, 0, t0, &config).is_empty());
        let again = resolve_fire(&mut entities, 0, SimInstant::from_secs_f32(0.05), &config);
        assert!(again.is_empty());
        assert_eq!(entities[0].active_weapon().ammo(), 29);
        assert_eq!(entities[1].health, 90);
    }

    #[test]
    fn shot_that_misses_still_spends_ammo() {
        let config = ArenaConfig::default();
        let mut entities = duel(100);
        entities[0].yaw = std::f32::consts::PI;
        let events = resolve_fire(&mut entities, 0, SimInstant::ZERO, &config);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SimEvent::WeaponFired { ammo_left: 29, .. }));
        assert_eq!(entities[1].health, 100);
    }

    #[test]
    fn sniper_shot_reports_reload() {
        let config = ArenaConfig::default();
        let mut entities = duel(100);
        entities[0].switch_weapon(2);
        let events = resolve_fire(&mut entities, 0, SimInstant::ZERO, &config);
        assert!(events.contains(&SimEvent::ReloadStarted {
            entity: 1,
            weapon: WeaponKind::Sniper,
        }));
        assert_eq!(entities[1].health, 50);
    }
}
