use std::net::SocketAddr;
use std::path::PathBuf;

use h3o::Resolution;

/// Candidate generation strategy, fixed once per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateStrategy {
    /// resolution × resolution lattice over the region's bounding box.
    Grid { resolution: u32 },
    /// H3 hexagonal tessellation of the region polygon.
    Hex { resolution: Resolution },
}

impl std::fmt::Display for CandidateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateStrategy::Grid { resolution } => write!(f, "grid({resolution})"),
            CandidateStrategy::Hex { resolution } => write!(f, "hex({})", u8::from(*resolution)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub stations_path: PathBuf,
    pub boundaries_path: PathBuf,
    pub region_id_property: String,
    pub strategy: CandidateStrategy,
}
