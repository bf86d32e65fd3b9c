use took::Took;

use crate::engine::BroadcastTime;
use crate::problem::Distance;

pub fn format_log_broadcast_timed(method: &str, res: &BroadcastTime, took: Took) -> String {
    format!("{method} - {}, took: {took}", format_log_broadcast(res))
}

pub fn format_log_broadcast(res: &BroadcastTime) -> String {
    format!(
        "{}/{}/{} (eccentricity/slowest speed/broadcast time)",
        res.eccentricity, res.slowest_speed, res.time_bound,
    )
}

pub fn format_log_matrix_row(from: usize, row: &[Distance]) -> String {
    let cells = row
        .iter()
        .map(|it| {
            if it.is_finite() {
                format!("{:>8.3}", it)
            } else {
                format!("{:>8}", "-")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    format!("{:>4}: {}", from, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::UNREACHABLE;

    #[test]
    fn unreachable_cells_are_dashes() {
        assert_eq!(
            format_log_matrix_row(3, &[0.0, UNREACHABLE, 1.25]),
            "   3:    0.000        -    1.250"
        );
    }

    #[test]
    fn broadcast_line() {
        let res = BroadcastTime {
            eccentricity: 5.0,
            slowest_speed: 50,
            time_bound: 100,
        };
        assert_eq!(
            format_log_broadcast(&res),
            "5/50/100 (eccentricity/slowest speed/broadcast time)"
        );
    }
}
