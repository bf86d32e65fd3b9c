use std::ffi::OsString;

use clap::Parser;

use crate::problem::SpeedTriple;

#[derive(Parser, Debug)]
#[command(version, about = "Minimum broadcast time for three contestants to meet")]
pub struct ProgramArguments {
    #[arg(short, long, help = "road network file path")]
    pub network: String,

    #[arg(
        short,
        long,
        value_delimiter = ' ',
        num_args = 3..=3,
        help = "walking speeds of the three contestants"
    )]
    pub speeds: Vec<u32>,

    #[arg(short, long, help = "TOML file overriding speed range and time factor")]
    pub config: Option<String>,

    #[arg(long, help = "file to store a JSON summary of the run")]
    pub summary_json: Option<String>,

    #[arg(long, help = "log the relaxed distance matrix", default_value = "false")]
    pub print_matrix: bool,
}

/// Expands `@file` arguments. Argument files are split like a shell command
/// line (whitespace separated, quotes group), arguments given directly are
/// passed through untouched.
pub fn expand_args(
    args: impl IntoIterator<Item = impl Into<OsString>>,
) -> std::io::Result<Vec<OsString>> {
    argfile::expand_args_from(
        args.into_iter().map(Into::into),
        argfile::parse_response,
        argfile::PREFIX,
    )
}

impl ProgramArguments {
    pub fn speed_triple(&self) -> SpeedTriple {
        SpeedTriple::new(self.speeds[0], self.speeds[1], self.speeds[2])
    }
}
