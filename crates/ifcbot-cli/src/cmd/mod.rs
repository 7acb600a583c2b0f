use anyhow::Result;

use crate::args::{Cli, Command};

mod convert;
mod inspect;
mod types;

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Convert {
            input,
            out,
            instance_ns,
            instance_prefix,
            max_input_bytes,
            zone_types,
            element_types,
        } => convert::run(convert::ConvertArgs {
            input,
            out,
            instance_ns,
            instance_prefix,
            max_input_bytes,
            zone_types,
            element_types,
        }),
        Command::Types => types::run(),
        Command::Inspect { input } => inspect::run(&input),
    }
}
