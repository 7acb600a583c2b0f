use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(name = "ifcbot", version, about = "IFC STEP to BOT Turtle converter")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON on stderr (filter with RUST_LOG).
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert an IFC STEP file into BOT instance data (Turtle).
    Convert {
        /// Input .ifc file.
        input: PathBuf,

        /// Output .ttl file (default: input path with a .ttl extension).
        #[arg(long, short)]
        out: Option<PathBuf>,

        /// Namespace IRI used to mint instance identifiers.
        #[arg(long)]
        instance_ns: Option<String>,

        /// Local-name prefix placed before STEP ids.
        #[arg(long)]
        instance_prefix: Option<String>,

        /// Refuse inputs larger than this many bytes.
        #[arg(long)]
        max_input_bytes: Option<usize>,

        /// Extra IFC zone type, as TYPE=CLASS (e.g. IFCZONE=Space). Repeatable.
        #[arg(long = "zone-type", value_name = "TYPE=CLASS")]
        zone_types: Vec<String>,

        /// Extra IFC element type (e.g. IFCRAILING). Repeatable.
        #[arg(long = "element-type", value_name = "TYPE")]
        element_types: Vec<String>,
    },

    /// List the IFC types of interest and what they map to.
    Types,

    /// Summarize a Turtle file produced by `convert`.
    Inspect {
        /// Turtle file.
        input: PathBuf,
    },
}
