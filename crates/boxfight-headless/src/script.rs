use boxfight_core::catalog::ObstacleKind;
use boxfight_core::geometry::Vec3;
use boxfight_core::intent::{InputFrame, LookDelta, MoveAxes};

/// Canned human input for unattended runs.
///
/// Strafes back and forth, sweeps the view left and right and holds the
/// trigger. Every `build_every` ticks it also asks for a wall in front of
/// the spawn, cycling through obstacle kinds.
#[derive(Debug, Clone)]
pub struct ScriptedPilot {
    tick: u64,
    build_every: u64,
}

/// One tick's worth of scripted actions.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub input: InputFrame,
    pub build: Option<(ObstacleKind, Vec3)>,
}

const STRAFE_PERIOD: u64 = 60;
const SWITCH_PERIOD: u64 = 300;
const BUILD_KINDS: [ObstacleKind; 3] =
    [ObstacleKind::Wall, ObstacleKind::Ramp, ObstacleKind::Floor];

impl ScriptedPilot {
    pub fn new(build_every: u64) -> Self {
        Self {
            tick: 0,
            build_every,
        }
    }

    pub fn next_step(&mut self) -> ScriptStep {
        let tick = self.tick;
        self.tick += 1;

        let leftward = (tick / STRAFE_PERIOD) % 2 == 0;
        let strafe = if leftward { -1.0 } else { 1.0 };
        let weapon_switch = if tick > 0 && tick % SWITCH_PERIOD == 0 {
            u8::try_from((tick / SWITCH_PERIOD) % 3).ok()
        } else {
            None
        };

        let input = InputFrame {
            move_axes: MoveAxes { dx: strafe, dz: 0.0 },
            jump_pressed: tick % 90 == 45,
            shoot_held: true,
            weapon_switch,
            look_delta: LookDelta {
                dx: -strafe * 4.0,
                dy: 0.0,
            },
        };

        let build = (self.build_every > 0 && tick > 0 && tick % self.build_every == 0).then(|| {
            let n = tick / self.build_every;
            let kind = BUILD_KINDS[(n % 3) as usize];
            let offset = (n % 8) as f32 * 5.0;
            (kind, Vec3::new(offset - 20.0, 0.0, -10.0))
        });

        ScriptStep { input, build }
    }
}
