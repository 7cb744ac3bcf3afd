use std::process;

use dsm::cli::{Args, Command};
use dsm::logging::init_logger;

fn main() {
    let args = Args::parse_args();

    init_logger(args.verbose, args.quiet, args.no_colors);
    tracing::debug!("{} v{}", dsm::NAME, dsm::VERSION);

    let command = Command::from_args(args);
    process::exit(command.run());
}
