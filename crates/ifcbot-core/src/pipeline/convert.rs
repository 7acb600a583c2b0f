//! High-level conversion orchestration.
//!
//! `convert_text` is the entry point most callers want: it validates the
//! configuration, assembles the four built-in stages and returns the Turtle
//! text together with diagnostics and counters.
//!
//! Determinism contract:
//! - entity triples follow id order (`BTreeMap`), relationship triples follow
//!   source order
//! - no timestamps, randomness or environment reads
//! - same registry + config + text ⇒ byte-identical Turtle

use crate::config::{validate_config, ConvertConfig};
use crate::errors::IfcBotResult;
use crate::pipeline::stages::{EmitTurtleStage, MapStage, ParseStage, SelectStage};
use crate::pipeline::{ConvertStats, Pipeline, PipelineContext, PipelineData, PipelineDiagnostic};
use crate::registry::TypeRegistry;

/// Result of one conversion.
#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub turtle: String,
    pub diagnostics: Vec<PipelineDiagnostic>,
    pub stats: ConvertStats,
}

/// Assemble select → parse → map → emit.
pub fn build_pipeline<'a>(registry: &'a TypeRegistry, cfg: &'a ConvertConfig) -> Pipeline<'a> {
    let mut p = Pipeline::new();
    p.push_stage(SelectStage::new(registry, &cfg.limits))
        .push_stage(ParseStage::new(registry))
        .push_stage(MapStage::new(registry))
        .push_stage(EmitTurtleStage::new(&cfg.namespaces));
    p
}

/// Convert decoded STEP text into Turtle.
pub fn convert_text(registry: &TypeRegistry, cfg: &ConvertConfig, text: &str) -> IfcBotResult<ConvertReport> {
    validate_config(cfg)?;

    let report = build_pipeline(registry, cfg)
        .run(PipelineContext::default(), PipelineData::Text(text.to_string()))?;
    let (turtle, diagnostics, stats) = report.require_turtle()?;

    tracing::info!(
        records = stats.selected_records,
        entities = stats.entities,
        relationships = stats.relationships,
        triples = stats.triples,
        "conversion finished"
    );

    Ok(ConvertReport {
        turtle,
        diagnostics,
        stats,
    })
}
