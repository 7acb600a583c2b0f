use anyhow::Result;
use clap::Parser;

mod args;
mod cmd;
mod output;

fn main() -> Result<()> {
    let cli = args::Cli::parse();
    output::init(cli.json);
    output::init_tracing(cli.log_json);

    cmd::dispatch(cli)
}
