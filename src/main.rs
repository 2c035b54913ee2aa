use anyhow::Result;
use gitwizard::cli::{init_logging, parse_args};

fn main() -> Result<()> {
    let cli = parse_args();
    init_logging(cli.verbose);
    gitwizard::commands::run(cli)
}
