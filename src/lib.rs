pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod problem;
pub mod utils;

pub use config::Calibration;
pub use engine::{time_required_for_competition, Competition, NO_BROADCAST_TIME};
pub use error::CompetitionError;
pub use problem::{Arc, SpeedTriple};
