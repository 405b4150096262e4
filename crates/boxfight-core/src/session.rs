use crate::catalog::ObstacleKind;
use crate::error::SimError;
use crate::events::SimEvent;
use crate::geometry::Vec3;
use crate::intent::{EntityId, InputFrame};
use crate::snapshot::WorldSnapshot;

/// A live arena session as seen by its external collaborators.
///
/// The scheduler calls [`tick`](ArenaSession::tick) once per frame with the
/// measured wall-clock delta; the input and placement collaborators feed the
/// session between ticks; presentation reads [`snapshot`](ArenaSession::snapshot).
pub trait ArenaSession {
    /// Latest input for a human-controlled entity. Look deltas accumulate
    /// until the next tick consumes them.
    fn submit_input(&mut self, entity: EntityId, frame: InputFrame) -> Result<(), SimError>;

    /// Queue an obstacle; it joins the registry during the next tick.
    fn submit_obstacle(&mut self, kind: ObstacleKind, position: Vec3);

    /// Advance the simulation by `dt` seconds.
    fn tick(&mut self, dt: f32) -> Vec<SimEvent>;

    fn snapshot(&self) -> WorldSnapshot;

    fn pause(&mut self);

    fn resume(&mut self);

    fn is_paused(&self) -> bool;
}
