//! File collaborators around the pure pipeline.
//!
//! - `read_source`: whole file into memory, decoded best-effort
//! - `write_output`: written to a sibling temporary file, then renamed, so a
//!   failed run never leaves partial Turtle behind
//! - `convert_file`: size check → read → convert → write

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{ConvertConfig, LimitsConfig};
use crate::determinism::normalize_text::decode_source;
use crate::errors::{IfcBotError, IfcBotResult};
use crate::pipeline::convert::{convert_text, ConvertReport};
use crate::registry::TypeRegistry;

/// Read and decode a STEP file.
pub fn read_source(path: impl AsRef<Path>) -> IfcBotResult<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| IfcBotError::read(path, e))?;
    Ok(decode_source(&bytes))
}

/// Reject a file whose on-disk size exceeds `max_input_bytes` before it is
/// loaded.
fn check_input_size(path: &Path, limits: &LimitsConfig) -> IfcBotResult<()> {
    let len = fs::metadata(path).map_err(|e| IfcBotError::read(path, e))?.len();
    if len > limits.max_input_bytes as u64 {
        return Err(IfcBotError::invalid_argument(format!(
            "input too large ({len} bytes > limit {})",
            limits.max_input_bytes
        )));
    }
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{name}.partial"))
}

/// Write Turtle text to `path`, replacing any existing file.
pub fn write_output(path: impl AsRef<Path>, text: &str) -> IfcBotResult<()> {
    let path = path.as_ref();
    let tmp = partial_path(path);

    let result = fs::File::create(&tmp)
        .and_then(|mut f| {
            f.write_all(text.as_bytes())?;
            f.sync_all()
        })
        .and_then(|_| fs::rename(&tmp, path));

    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(IfcBotError::write(path, e));
    }
    Ok(())
}

/// Convert `input` into Turtle at `output`.
pub fn convert_file(
    registry: &TypeRegistry,
    cfg: &ConvertConfig,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> IfcBotResult<ConvertReport> {
    let input = input.as_ref();
    let output = output.as_ref();

    tracing::debug!(input = %input.display(), output = %output.display(), "converting file");

    check_input_size(input, &cfg.limits)?;
    let text = read_source(input)?;
    let report = convert_text(registry, cfg, &text)?;
    write_output(output, &report.turtle)?;
    Ok(report)
}
