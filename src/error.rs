use thiserror::Error;

use crate::problem::Vertex;

/// Everything that can stop a competition from producing a broadcast time.
///
/// At the program boundary all variants collapse into the same sentinel
/// (see [`crate::engine::NO_BROADCAST_TIME`]); they are kept apart so tests and
/// log lines can tell the cases from each other.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompetitionError {
    /// Unreadable or malformed network description, zero vertices, bad calibration.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("arc {from} -> {to} is out of range for a network with {num_nodes} vertices")]
    InvalidEdge {
        from: Vertex,
        to: Vertex,
        num_nodes: usize,
    },

    #[error("speed {speed} is outside of [{min}, {max}]")]
    SpeedOutOfRange { speed: u32, min: u32, max: u32 },

    /// At least one ordered pair has no directed path.
    #[error("vertex {to} is unreachable from vertex {from}")]
    Unreachable { from: Vertex, to: Vertex },
}

impl From<std::io::Error> for CompetitionError {
    fn from(error: std::io::Error) -> Self {
        CompetitionError::InvalidInput(error.to_string())
    }
}
