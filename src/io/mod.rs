use std::fs::File;
use std::path::Path;

use serde::Serialize;

pub mod network_reader;

pub use network_reader::{parse_network, read_network, NetworkDescription};

/// Machine readable result of one run.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub network: String,
    pub num_nodes: usize,
    pub num_edges: usize,
    pub slowest_speed: u32,
    pub eccentricity: Option<f64>,
    pub time_bound: i64,
    pub error: Option<String>,
}

pub fn write_summary_json(path: impl AsRef<Path>, summary: &RunSummary) -> anyhow::Result<()> {
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}
