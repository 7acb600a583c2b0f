//! Conversion pipeline primitives for ifcbot.
//!
//! A conversion is a strictly linear chain of stages:
//! - `select`: raw STEP text → records whose IFC type is of interest
//! - `parse`: records → entities + relationships (still IFC vocabulary)
//! - `map`: entities + relationships → BOT triples
//! - `emit`: triples → Turtle text
//!
//! Each stage consumes the previous stage's `PipelineData` by value and returns
//! a new one; nothing is mutated in place. Stages only borrow the immutable
//! `TypeRegistry` and configuration they were built with.
//!
//! The core crate does not do filesystem I/O inside stages. `crate::io` reads
//! and writes around the pipeline.

use std::collections::BTreeMap;

use crate::errors::{IfcBotError, IfcBotResult};
use crate::model::{ParsedDocument, RawRecord, Triple};

pub mod convert;
pub mod map;
pub mod parse;
pub mod select;
pub mod stages;

/// A structured diagnostic emitted by pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDiagnostic {
    pub level: DiagnosticLevel,
    pub code: String,
    pub message: String,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

/// Counters collected while a conversion runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConvertStats {
    pub input_bytes: usize,
    pub selected_records: usize,
    pub entities: usize,
    pub classified_entities: usize,
    pub relationships: usize,
    pub dropped_relationships: usize,
    pub triples: usize,
    pub subjects: usize,
}

/// Pipeline context shared by all stages of one run.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    /// Collected diagnostics.
    pub diagnostics: Vec<PipelineDiagnostic>,

    /// Counters for presentation.
    pub stats: ConvertStats,
}

impl PipelineContext {
    pub fn push_info(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(DiagnosticLevel::Info, code, message, BTreeMap::new());
    }

    pub fn push(
        &mut self,
        level: DiagnosticLevel,
        code: impl Into<String>,
        message: impl Into<String>,
        data: BTreeMap<String, String>,
    ) {
        self.diagnostics.push(PipelineDiagnostic {
            level,
            code: code.into(),
            message: message.into(),
            data,
        });
    }
}

/// A stage input/output carrier.
#[derive(Debug, Clone)]
pub enum PipelineData {
    None,

    /// Decoded source document.
    Text(String),

    /// Selected records, in source order.
    Records(Vec<RawRecord>),

    /// Entities and relationships.
    Parsed(ParsedDocument),

    /// Mapped triples, in emission order.
    Triples(Vec<Triple>),

    /// Serialized Turtle.
    Turtle(String),
}

impl PipelineData {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Text(_) => "text",
            Self::Records(_) => "records",
            Self::Parsed(_) => "parsed",
            Self::Triples(_) => "triples",
            Self::Turtle(_) => "turtle",
        }
    }
}

/// A pipeline stage.
///
/// Stages must be deterministic: no system time, env, randomness or I/O.
pub trait Stage {
    fn id(&self) -> &str;
    fn run(&self, ctx: &mut PipelineContext, input: PipelineData) -> IfcBotResult<PipelineData>;
}

/// A pipeline is an ordered list of stages.
#[derive(Default)]
pub struct Pipeline<'a> {
    stages: Vec<Box<dyn Stage + 'a>>,
}

impl<'a> Pipeline<'a> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn push_stage<S: Stage + 'a>(&mut self, s: S) -> &mut Self {
        self.stages.push(Box::new(s));
        self
    }

    pub fn stages(&self) -> usize {
        self.stages.len()
    }

    /// Run the pipeline and return a structured report.
    pub fn run(&self, mut ctx: PipelineContext, input: PipelineData) -> IfcBotResult<PipelineReport> {
        let mut data = input;

        for st in &self.stages {
            ctx.push_info(
                "pipeline.stage.start",
                format!("starting stage {} ({} input)", st.id(), data.kind()),
            );

            data = st.run(&mut ctx, data)?;

            ctx.push_info(
                "pipeline.stage.end",
                format!("completed stage {} ({} output)", st.id(), data.kind()),
            );
        }

        Ok(PipelineReport {
            output: data,
            diagnostics: ctx.diagnostics,
            stats: ctx.stats,
        })
    }
}

/// Pipeline run result.
#[derive(Debug)]
pub struct PipelineReport {
    pub output: PipelineData,
    pub diagnostics: Vec<PipelineDiagnostic>,
    pub stats: ConvertStats,
}

impl PipelineReport {
    /// Require Turtle output from a report.
    pub fn require_turtle(self) -> IfcBotResult<(String, Vec<PipelineDiagnostic>, ConvertStats)> {
        match self.output {
            PipelineData::Turtle(s) => Ok((s, self.diagnostics, self.stats)),
            other => Err(IfcBotError::invariant(format!(
                "expected turtle pipeline output, got {}",
                other.kind()
            ))),
        }
    }
}

/// Error for a stage that received the wrong data shape.
pub(crate) fn unexpected_input(stage: &str, expected: &str, got: &PipelineData) -> IfcBotError {
    IfcBotError::invariant(format!(
        "stage {stage} expected {expected} input, got {}",
        got.kind()
    ))
}
