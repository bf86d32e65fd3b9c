use log::{debug, info, warn};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use took::Timer;

use crate::config::Calibration;
use crate::error::CompetitionError;
use crate::io::NetworkDescription;
use crate::problem::distance_matrix::DistanceMatrix;
use crate::problem::{Arc, Distance, SpeedTriple, Vertex};
use crate::utils::logging::format_log_broadcast_timed;

/// Reported when no broadcast duration can be determined.
pub const NO_BROADCAST_TIME: i64 = -1;

/// All-pairs shortest paths (Floyd-Warshall), in place.
///
/// The intermediate vertex `k` is the outermost loop: every path through
/// `0..k` is final before `k + 1` is considered.
pub fn relax(matrix: &mut DistanceMatrix) {
    for k in 0..matrix.num_nodes() {
        relax_through(matrix, k);
    }
}

/// One Floyd-Warshall layer: tries `k` as intermediate vertex for every pair.
///
/// Unreachable entries are `+inf`, so any sum containing one is `+inf` as well
/// and never passes the strict comparison.
#[cfg(not(feature = "parallel"))]
pub fn relax_through(matrix: &mut DistanceMatrix, k: Vertex) {
    let n = matrix.num_nodes();
    let data = matrix.data_mut();
    for i in 0..n {
        let d_ik = data[i * n + k];
        if d_ik.is_infinite() {
            continue;
        }
        for j in 0..n {
            let via_k = d_ik + data[k * n + j];
            if data[i * n + j] > via_k {
                data[i * n + j] = via_k;
            }
        }
    }
}

/// One Floyd-Warshall layer, rows relaxed in parallel.
///
/// Row `k` cannot change while processing layer `k` (`d[k][k]` is 0), so a
/// copy of it is shared by all workers.
#[cfg(feature = "parallel")]
pub fn relax_through(matrix: &mut DistanceMatrix, k: Vertex) {
    let n = matrix.num_nodes();
    let data = matrix.data_mut();
    let row_k = data[k * n..(k + 1) * n].to_vec();
    data.par_chunks_mut(n).for_each(|row_i| {
        let d_ik = row_i[k];
        if d_ik.is_infinite() {
            return;
        }
        for (d_ij, d_kj) in row_i.iter_mut().zip(row_k.iter()) {
            let via_k = d_ik + d_kj;
            if *d_ij > via_k {
                *d_ij = via_k;
            }
        }
    });
}

/// Largest shortest-path distance over all ordered pairs of a relaxed matrix.
pub fn eccentricity(matrix: &DistanceMatrix) -> Result<Distance, CompetitionError> {
    if let Some((from, to)) = matrix.first_unreachable_pair() {
        return Err(CompetitionError::Unreachable { from, to });
    }
    matrix
        .max_finite_distance()
        .ok_or_else(|| CompetitionError::InvalidInput("network has no vertices".to_string()))
}

/// `ceil(eccentricity * factor / slowest_speed)`, rejected as
/// [`CompetitionError::InvalidInput`] when it does not fit a signed 64 bit
/// duration.
pub fn time_bound(
    eccentricity: Distance,
    slowest_speed: u32,
    calibration: &Calibration,
) -> Result<u64, CompetitionError> {
    debug_assert!(slowest_speed > 0);
    let bound =
        (eccentricity * calibration.distance_to_time_factor / slowest_speed as f64).ceil();
    // i64::MAX rounds up to 2^63 as f64, so equality is already out of range
    if !bound.is_finite() || bound < 0.0 || bound >= i64::MAX as f64 {
        return Err(CompetitionError::InvalidInput(format!(
            "broadcast time for eccentricity {} at speed {} is out of range",
            eccentricity, slowest_speed
        )));
    }
    Ok(bound as u64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BroadcastTime {
    pub eccentricity: Distance,
    pub slowest_speed: u32,
    pub time_bound: u64,
}

/// Three contestants on one road network.
///
/// A network that failed to load is kept as the error it produced, so the
/// competition still answers (with [`NO_BROADCAST_TIME`]) instead of failing
/// at construction.
#[derive(Debug, Clone)]
pub struct Competition {
    network: Result<NetworkDescription, CompetitionError>,
    speeds: SpeedTriple,
    calibration: Calibration,
}

impl Competition {
    pub fn new(num_nodes: usize, arcs: Vec<Arc>, speeds: SpeedTriple) -> Self {
        Self::with_network(
            Ok(NetworkDescription {
                num_nodes,
                num_edges: arcs.len(),
                arcs,
            }),
            speeds,
            Calibration::default(),
        )
    }

    pub fn with_network(
        network: Result<NetworkDescription, CompetitionError>,
        speeds: SpeedTriple,
        calibration: Calibration,
    ) -> Self {
        Self {
            network,
            speeds,
            calibration,
        }
    }

    pub fn from_file(
        path: impl AsRef<std::path::Path>,
        speeds: SpeedTriple,
        calibration: Calibration,
    ) -> Self {
        Self::with_network(crate::io::read_network(path), speeds, calibration)
    }

    pub fn network(&self) -> Option<&NetworkDescription> {
        self.network.as_ref().ok()
    }

    pub fn speeds(&self) -> SpeedTriple {
        self.speeds
    }

    fn validated_network(&self) -> Result<&NetworkDescription, CompetitionError> {
        let network = self.network.as_ref().map_err(Clone::clone)?;
        self.calibration.validate()?;
        if network.num_nodes == 0 {
            return Err(CompetitionError::InvalidInput(
                "network has no vertices".to_string(),
            ));
        }
        for speed in self.speeds.iter() {
            self.calibration.check_speed(speed)?;
        }
        Ok(network)
    }

    /// Runs the full computation and returns the relaxed matrix alongside
    /// the result.
    pub fn try_solve_with_matrix(
        &self,
    ) -> Result<(BroadcastTime, DistanceMatrix), CompetitionError> {
        let network = self.validated_network()?;

        let timer = Timer::new();
        let mut matrix = DistanceMatrix::from_arcs(network.num_nodes, &network.arcs)?;
        relax(&mut matrix);
        debug!(
            "relaxed {}x{} matrix after {}",
            network.num_nodes,
            network.num_nodes,
            timer.took()
        );

        let eccentricity = eccentricity(&matrix)?;
        let slowest_speed = self.speeds.slowest();
        let res = BroadcastTime {
            eccentricity,
            slowest_speed,
            time_bound: time_bound(eccentricity, slowest_speed, &self.calibration)?,
        };
        info!("{}", format_log_broadcast_timed("floyd-warshall", &res, timer.took()));
        Ok((res, matrix))
    }

    pub fn try_solve(&self) -> Result<BroadcastTime, CompetitionError> {
        self.try_solve_with_matrix().map(|(res, _)| res)
    }

    pub fn try_time_required(&self) -> Result<u64, CompetitionError> {
        self.try_solve().map(|res| res.time_bound)
    }

    /// Minimum broadcast duration, or [`NO_BROADCAST_TIME`] if there is none.
    pub fn time_required(&self) -> i64 {
        let time = self.try_time_required().and_then(|time| {
            i64::try_from(time).map_err(|e| CompetitionError::InvalidInput(e.to_string()))
        });
        match time {
            Ok(time) => time,
            Err(e) => {
                warn!("no broadcast time: {}", e);
                NO_BROADCAST_TIME
            }
        }
    }
}

/// Minimum broadcast duration for three contestants with the given speeds
/// on the network `(vertex_count, edges)`, or [`NO_BROADCAST_TIME`].
pub fn time_required_for_competition(
    vertex_count: usize,
    edges: &[Arc],
    speed_a: u32,
    speed_b: u32,
    speed_c: u32,
) -> i64 {
    Competition::new(
        vertex_count,
        edges.to_vec(),
        SpeedTriple::new(speed_a, speed_b, speed_c),
    )
    .time_required()
}
