use crate::intent::EntityId;

/// Failures at the edges of the simulation: session setup, lookups,
/// configuration and snapshot encoding. Tick logic itself never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    UnknownEntity(EntityId),
    /// The entity is human-controlled but the call needs a bot.
    NotAutonomous(EntityId),
    /// The entity is a bot but the call needs the human.
    NotHuman(EntityId),
    MissingHuman,
    MissingOpponent,
    Config(String),
    Snapshot(String),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEntity(id) => write!(f, "unknown entity {id}"),
            Self::NotAutonomous(id) => write!(f, "entity {id} is not autonomous"),
            Self::NotHuman(id) => write!(f, "entity {id} is not human-controlled"),
            Self::MissingHuman => write!(f, "session has no human entity"),
            Self::MissingOpponent => write!(f, "session has no autonomous entity"),
            Self::Config(m) => write!(f, "config: {m}"),
            Self::Snapshot(m) => write!(f, "snapshot: {m}"),
        }
    }
}

impl std::error::Error for SimError {}
