use anyhow::Result;
use clap::Parser;
use scaffold_cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    scaffold_cli::init_logging(cli.verbose());
    cli.run()
}
