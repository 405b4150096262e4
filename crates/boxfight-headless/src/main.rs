mod script;

use tracing_subscriber::EnvFilter;

use boxfight_core::events::SimEvent;
use boxfight_core::session::ArenaSession;
use boxfight_sim::Simulation;
use boxfight_sim::config::ArenaConfig;

use script::ScriptedPilot;

fn arg<T: std::str::FromStr>(prefix: &str) -> Option<T> {
    std::env::args()
        .skip(1)
        .find_map(|a| a.strip_prefix(prefix).map(String::from))
        .and_then(|v| v.parse::<T>().ok())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let ticks: u64 = arg("--ticks=").unwrap_or(600);
    let fps: f32 = arg("--fps=").filter(|f: &f32| *f > 0.0).unwrap_or(60.0);
    let build_every: u64 = arg("--build-every=").unwrap_or(120);

    let config = match arg::<String>("--config=") {
        Some(path) => match ArenaConfig::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Failed to load {path}: {e}");
                std::process::exit(1);
            },
        },
        None => ArenaConfig::load(),
    };

    let mut sim = match Simulation::standard_session(config) {
        Ok(sim) => sim,
        Err(e) => {
            tracing::error!("Cannot start session: {e}");
            std::process::exit(1);
        },
    };
    let Some(human) = sim.human_id() else {
        tracing::error!("Session has no human entity");
        std::process::exit(1);
    };

    tracing::info!("Running {ticks} ticks at {fps} fps");

    let dt = 1.0 / fps;
    let mut pilot = ScriptedPilot::new(build_every);
    let mut shots = 0usize;
    let mut eliminations = 0usize;

    for _ in 0..ticks {
        let step = pilot.next_step();
        if let Err(e) = sim.submit_input(human, step.input) {
            tracing::warn!("Input rejected: {e}");
        }
        if let Some((kind, point)) = step.build {
            sim.place_obstacle_at(kind, point);
        }

        for event in sim.tick(dt) {
            match event {
                SimEvent::WeaponFired { .. } => shots += 1,
                SimEvent::Eliminated { entity, by } => {
                    eliminations += 1;
                    tracing::info!(
                        "t={:.2}s entity {entity} eliminated by {by}",
                        sim.now().as_secs_f32()
                    );
                },
                other => tracing::debug!(?other),
            }
        }
    }

    let snapshot = sim.snapshot();
    tracing::info!(
        "Finished at t={:.2}s: {shots} shots, {eliminations} eliminations, {} obstacles",
        snapshot.time.as_secs_f32(),
        snapshot.obstacle_count
    );
    for e in &snapshot.entities {
        tracing::info!(
            "entity {} ({}) pos=({:.1}, {:.1}, {:.1}) health={} weapon={} ammo={}/{}{}",
            e.id,
            if e.autonomous { "bot" } else { "human" },
            e.position.x,
            e.position.y,
            e.position.z,
            e.health,
            e.active_weapon.name(),
            e.ammo,
            e.max_ammo,
            if e.reloading { " reloading" } else { "" }
        );
    }
}
