use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in a session. Assigned in creation order.
pub type EntityId = u64;

/// Horizontal movement axes from the input collaborator, each in [-1, 1].
///
/// `dz = -1` is forward. `dx = +1` strafes toward the entity's left
/// (-X at yaw 0), `dx = -1` toward its right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveAxes {
    pub dx: f32,
    pub dz: f32,
}

/// Accumulated pointer motion since the last tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LookDelta {
    pub dx: f32,
    pub dy: f32,
}

/// Input bundle for the human-controlled entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub move_axes: MoveAxes,
    pub jump_pressed: bool,
    pub shoot_held: bool,
    /// Requested weapon slot; `None` keeps the current weapon.
    pub weapon_switch: Option<u8>,
    pub look_delta: LookDelta,
}

impl InputFrame {
    /// Replace non-finite values with zero and clamp the move axes to [-1, 1].
    pub fn sanitized(mut self) -> Self {
        self.move_axes.dx = clamp_axis(self.move_axes.dx);
        self.move_axes.dz = clamp_axis(self.move_axes.dz);
        self.look_delta.dx = finite_or_zero(self.look_delta.dx);
        self.look_delta.dy = finite_or_zero(self.look_delta.dy);
        self
    }

    /// Decode a MessagePack-encoded frame, as sent by a remote input provider.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        match rmp_serde::from_slice::<InputFrame>(data) {
            Ok(frame) => Some(frame.sanitized()),
            Err(e) => {
                tracing::debug!(error = %e, "Dropped malformed input frame");
                None
            },
        }
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() { v } else { 0.0 }
}

fn clamp_axis(v: f32) -> f32 {
    finite_or_zero(v).clamp(-1.0, 1.0)
}

/// Desired actions for one entity for one tick, whatever produced them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Entity-local forward axis, +1 straight ahead.
    pub forward: f32,
    /// Entity-local strafe axis, +1 to the right.
    pub strafe: f32,
    pub jump: bool,
    pub fire: bool,
    pub weapon_switch: Option<u8>,
    /// Heading (radians) the entity adopts this tick.
    pub yaw: f32,
}

impl Intent {
    /// No movement, no actions, keep facing `yaw`.
    pub fn idle(yaw: f32) -> Self {
        Self {
            yaw,
            ..Default::default()
        }
    }
}
