use anyhow::Context;
use clap::{CommandFactory, FromArgMatches};
use log::{info, warn};
use took::Timer;

use contest_broadcast::cli;
use contest_broadcast::config::Calibration;
use contest_broadcast::engine::{Competition, NO_BROADCAST_TIME};
use contest_broadcast::io::{write_summary_json, RunSummary};
use contest_broadcast::utils::logging::format_log_matrix_row;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = cli::expand_args(std::env::args_os())?;
    let args = cli::ProgramArguments::from_arg_matches(
        &cli::ProgramArguments::command().get_matches_from(args)
    )?;
    info!("{:?}", &args);

    let calibration = match &args.config {
        Some(path) => Calibration::load(path)
            .with_context(|| format!("failed to load calibration from {}", path))?,
        None => Calibration::default(),
    };
    info!("calibration: {:?}", &calibration);

    let load_timer = Timer::new();
    let speeds = args.speed_triple();
    let competition = Competition::from_file(&args.network, speeds, calibration);
    info!("network loaded after {}", load_timer.took());

    let (time_bound, eccentricity, error) = match competition.try_solve_with_matrix() {
        Ok((res, matrix)) => {
            if args.print_matrix {
                for (from, row) in matrix.rows().enumerate() {
                    info!("{}", format_log_matrix_row(from, row));
                }
            }
            let time_bound = i64::try_from(res.time_bound)
                .with_context(|| format!("broadcast time {} out of range", res.time_bound))?;
            (time_bound, Some(res.eccentricity), None)
        }
        Err(e) => {
            warn!("no broadcast time for {}: {}", &args.network, e);
            (NO_BROADCAST_TIME, None, Some(e.to_string()))
        }
    };

    println!("{}", time_bound);

    if let Some(summary_path) = &args.summary_json {
        let network = competition.network();
        let summary = RunSummary {
            network: args.network.clone(),
            num_nodes: network.map_or(0, |it| it.num_nodes),
            num_edges: network.map_or(0, |it| it.arcs.len()),
            slowest_speed: speeds.slowest(),
            eccentricity,
            time_bound,
            error,
        };
        info!("writing summary to {}", summary_path);
        write_summary_json(summary_path, &summary)?;
    }

    Ok(())
}
