use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use ifcbot_core::determinism::hashing::digest_hex;
use ifcbot_core::pipeline::{ConvertStats, DiagnosticLevel};
use ifcbot_core::prelude::*;

use crate::output;

pub struct ConvertArgs {
    pub input: PathBuf,
    pub out: Option<PathBuf>,
    pub instance_ns: Option<String>,
    pub instance_prefix: Option<String>,
    pub max_input_bytes: Option<usize>,
    pub zone_types: Vec<String>,
    pub element_types: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertOut {
    pub input: String,
    pub output: String,
    pub digest: String,
    pub stats: ConvertStats,
    pub warnings: Vec<Warning>,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    let registry = build_registry(&args.zone_types, &args.element_types)?;
    let cfg = build_config(&args)?;
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| args.input.with_extension("ttl"));

    let report = convert_file(&registry, &cfg, &args.input, &out_path)
        .with_context(|| format!("converting {}", args.input.display()))?;

    let warnings: Vec<Warning> = report
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Warning)
        .map(|d| Warning {
            code: d.code.clone(),
            message: d.message.clone(),
        })
        .collect();
    for w in &warnings {
        tracing::warn!(code = %w.code, "{}", w.message);
    }

    let out = ConvertOut {
        input: args.input.display().to_string(),
        output: out_path.display().to_string(),
        digest: digest_hex(report.turtle.as_bytes()),
        stats: report.stats,
        warnings,
    };

    let lines = vec![
        format!("input:     {}", out.input),
        format!("output:    {}", out.output),
        format!(
            "records:   {} selected, {} entities, {} relationships ({} dropped)",
            out.stats.selected_records,
            out.stats.entities,
            out.stats.relationships,
            out.stats.dropped_relationships
        ),
        format!(
            "triples:   {} across {} subjects",
            out.stats.triples, out.stats.subjects
        ),
        format!("sha256:    {}", out.digest),
    ];
    output::print(&out, &lines)
}

fn build_registry(zone_types: &[String], element_types: &[String]) -> Result<TypeRegistry> {
    if zone_types.is_empty() && element_types.is_empty() {
        return Ok(TypeRegistry::bot());
    }

    let mut b = TypeRegistry::bot().to_builder();
    for flag in zone_types {
        let (ty, class) = flag
            .split_once('=')
            .ok_or_else(|| anyhow!("--zone-type expects TYPE=CLASS, got {flag}"))?;
        b = b.with_zone_type(ty, ZoneClass::parse(class)?);
    }
    for ty in element_types {
        b = b.with_element_type(ty);
    }
    Ok(b.build()?)
}

fn build_config(args: &ConvertArgs) -> Result<ConvertConfig> {
    let mut cfg = ConvertConfig::default();
    if let Some(ns) = &args.instance_ns {
        cfg.namespaces.instances = ns.clone();
    }
    if let Some(p) = &args.instance_prefix {
        cfg.namespaces.instance_prefix = p.clone();
    }
    if let Some(n) = args.max_input_bytes {
        cfg.limits.max_input_bytes = n;
    }
    validate_config(&cfg)?;
    Ok(cfg)
}
