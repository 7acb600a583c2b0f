//! Built-in pipeline stages for ifcbot.
//!
//! One stage per conversion step. Each stage borrows the immutable registry
//! or configuration it needs, records counters into `PipelineContext::stats`
//! and structured diagnostics for anything it skipped.

use std::collections::BTreeMap;

use crate::config::{LimitsConfig, NamespaceConfig};
use crate::emit::turtle::{group_by_subject, render_turtle};
use crate::errors::{IfcBotError, IfcBotResult};
use crate::pipeline::map::MappingEngine;
use crate::pipeline::parse::parse_records_with_summary;
use crate::pipeline::select::select_records;
use crate::pipeline::{unexpected_input, DiagnosticLevel, PipelineContext, PipelineData, Stage};
use crate::registry::TypeRegistry;

/// Stage: Text → Records.
pub struct SelectStage<'a> {
    registry: &'a TypeRegistry,
    limits: &'a LimitsConfig,
}

impl<'a> SelectStage<'a> {
    pub fn new(registry: &'a TypeRegistry, limits: &'a LimitsConfig) -> Self {
        Self { registry, limits }
    }
}

impl Stage for SelectStage<'_> {
    fn id(&self) -> &str {
        "ifc.select"
    }

    fn run(&self, ctx: &mut PipelineContext, input: PipelineData) -> IfcBotResult<PipelineData> {
        let text = match input {
            PipelineData::Text(text) => text,
            other => return Err(unexpected_input(self.id(), "text", &other)),
        };

        if text.len() > self.limits.max_input_bytes {
            return Err(IfcBotError::invalid_argument(format!(
                "input too large ({} bytes > limit {})",
                text.len(),
                self.limits.max_input_bytes
            )));
        }

        let mut records = Vec::new();
        for rec in select_records(&text, self.registry) {
            if records.len() == self.limits.max_records {
                return Err(IfcBotError::invalid_argument(format!(
                    "too many records of interest (limit {})",
                    self.limits.max_records
                )));
            }
            records.push(rec);
        }

        ctx.stats.input_bytes = text.len();
        ctx.stats.selected_records = records.len();
        ctx.push_info(
            "select.records",
            format!("selected {} records of interest", records.len()),
        );

        Ok(PipelineData::Records(records))
    }
}

/// Stage: Records → Parsed.
pub struct ParseStage<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> ParseStage<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }
}

impl Stage for ParseStage<'_> {
    fn id(&self) -> &str {
        "ifc.parse"
    }

    fn run(&self, ctx: &mut PipelineContext, input: PipelineData) -> IfcBotResult<PipelineData> {
        let records = match input {
            PipelineData::Records(records) => records,
            other => return Err(unexpected_input(self.id(), "records", &other)),
        };

        let (doc, summary) = parse_records_with_summary(records, self.registry);

        for id in &summary.duplicate_ids {
            ctx.push(
                DiagnosticLevel::Warning,
                "parse.duplicate_id",
                format!("entity #{id} appears more than once; last record kept"),
                BTreeMap::from([("id".to_string(), id.to_string())]),
            );
        }
        if !summary.dropped_relationships.is_empty() {
            let ids: Vec<String> = summary
                .dropped_relationships
                .iter()
                .map(|id| format!("#{id}"))
                .collect();
            ctx.push(
                DiagnosticLevel::Info,
                "parse.relationship_dropped",
                format!(
                    "{} relation records with fewer than two references ignored",
                    ids.len()
                ),
                BTreeMap::from([("ids".to_string(), ids.join(","))]),
            );
        }

        ctx.stats.entities = doc.entities.len();
        ctx.stats.classified_entities = doc
            .entities
            .values()
            .filter(|e| self.registry.target_class(&e.source_type).is_some())
            .count();
        ctx.stats.relationships = doc.relationships.len();
        ctx.stats.dropped_relationships = summary.dropped_relationships.len();

        Ok(PipelineData::Parsed(doc))
    }
}

/// Stage: Parsed → Triples.
pub struct MapStage<'a> {
    registry: &'a TypeRegistry,
}

impl<'a> MapStage<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Self {
        Self { registry }
    }
}

impl Stage for MapStage<'_> {
    fn id(&self) -> &str {
        "bot.map"
    }

    fn run(&self, ctx: &mut PipelineContext, input: PipelineData) -> IfcBotResult<PipelineData> {
        let doc = match input {
            PipelineData::Parsed(doc) => doc,
            other => return Err(unexpected_input(self.id(), "parsed", &other)),
        };

        let triples = MappingEngine::new(self.registry).map(&doc);

        ctx.stats.triples = triples.len();
        ctx.push_info("map.triples", format!("mapped {} triples", triples.len()));

        Ok(PipelineData::Triples(triples))
    }
}

/// Stage: Triples → Turtle.
pub struct EmitTurtleStage<'a> {
    namespaces: &'a NamespaceConfig,
}

impl<'a> EmitTurtleStage<'a> {
    pub fn new(namespaces: &'a NamespaceConfig) -> Self {
        Self { namespaces }
    }
}

impl Stage for EmitTurtleStage<'_> {
    fn id(&self) -> &str {
        "emit.turtle"
    }

    fn run(&self, ctx: &mut PipelineContext, input: PipelineData) -> IfcBotResult<PipelineData> {
        let triples = match input {
            PipelineData::Triples(triples) => triples,
            other => return Err(unexpected_input(self.id(), "triples", &other)),
        };

        ctx.stats.subjects = group_by_subject(&triples).len();
        Ok(PipelineData::Turtle(render_turtle(&triples, self.namespaces)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParsedDocument;

    #[test]
    fn select_stage_enforces_input_limit() {
        let reg = TypeRegistry::bot();
        let limits = LimitsConfig {
            max_input_bytes: 4,
            ..LimitsConfig::default()
        };
        let mut ctx = PipelineContext::default();
        let err = SelectStage::new(&reg, &limits)
            .run(&mut ctx, PipelineData::Text("#1=IFCWALL('a','b');".into()))
            .unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn select_stage_enforces_record_limit() {
        let reg = TypeRegistry::bot();
        let limits = LimitsConfig {
            max_records: 1,
            ..LimitsConfig::default()
        };
        let mut ctx = PipelineContext::default();
        let err = SelectStage::new(&reg, &limits)
            .run(
                &mut ctx,
                PipelineData::Text("#1=IFCWALL('a','b');#2=IFCWALL('c','d');".into()),
            )
            .unwrap_err();
        assert!(err.to_string().contains("too many records"));
    }

    #[test]
    fn parse_stage_reports_duplicates_and_dropped() {
        let reg = TypeRegistry::bot();
        let limits = LimitsConfig::default();
        let mut ctx = PipelineContext::default();
        let text = "#1=IFCWALL('a','b');#1=IFCWALL('a','c');#9=IFCRELAGGREGATES('x',#1);";
        let records = SelectStage::new(&reg, &limits)
            .run(&mut ctx, PipelineData::Text(text.into()))
            .unwrap();
        let parsed = ParseStage::new(&reg).run(&mut ctx, records).unwrap();

        assert!(matches!(parsed, PipelineData::Parsed(ref d) if d.entities.len() == 1));
        assert_eq!(ctx.stats.dropped_relationships, 1);
        let codes: Vec<&str> = ctx.diagnostics.iter().map(|d| d.code.as_str()).collect();
        assert!(codes.contains(&"parse.duplicate_id"));
        assert!(codes.contains(&"parse.relationship_dropped"));
    }

    #[test]
    fn stages_reject_wrong_input_shape() {
        let reg = TypeRegistry::bot();
        let mut ctx = PipelineContext::default();
        let err = MapStage::new(&reg)
            .run(&mut ctx, PipelineData::Text(String::new()))
            .unwrap_err();
        assert_eq!(err.code(), "pipeline.invariant");

        let ok = MapStage::new(&reg)
            .run(&mut ctx, PipelineData::Parsed(ParsedDocument::default()))
            .unwrap();
        assert!(matches!(ok, PipelineData::Triples(ref t) if t.is_empty()));
    }
}
