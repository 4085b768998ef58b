use anyhow::Result;
use locmeta::cli::Cli;
use locmeta::logging::init_tracing;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.common.verbose);
    cli.execute()
}
