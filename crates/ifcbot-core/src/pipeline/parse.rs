//! Record parsing.
//!
//! Turns selected records into neutral structures. Nothing here knows about
//! BOT; the parser only decides "entity or relationship" from the registry and
//! pulls out the few argument fields the mapping needs.
//!
//! Rules:
//! - entities: arguments starting with `'GLOBALID','NAME'` give
//!   (global id, name); anything else leaves both empty
//! - relationships: every `#<id>` in the arguments, in order; the first is the
//!   parent, the rest are children; fewer than two references drops the record
//! - references are not resolved here; one whose digits overflow a `StepId`
//!   keeps its position as `UNRESOLVED_ID`
//!
//! The positional (global id, name) rule matches the leading attributes of IFC
//! rooted entities as exported by common tools. It is not a STEP grammar.

use std::collections::btree_map::Entry;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Entity, ParsedDocument, RawRecord, Relationship, StepId, UNRESOLVED_ID};
use crate::registry::TypeRegistry;

static LEADING_STRINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^'([^']*)'\s*,\s*'([^']*)'").expect("Invalid regex"));

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9]+)").expect("Invalid regex"));

/// What the parser skipped or overwrote, for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseSummary {
    /// Entity ids seen more than once (the last record wins).
    pub duplicate_ids: Vec<StepId>,
    /// Relation records with fewer than two references.
    pub dropped_relationships: Vec<StepId>,
}

/// Build an entity from a zone/element/root record.
pub fn parse_entity(rec: &RawRecord) -> Entity {
    let (global_id, name) = match LEADING_STRINGS.captures(&rec.args) {
        Some(c) => (c[1].to_string(), c[2].to_string()),
        None => (String::new(), String::new()),
    };

    Entity {
        id: rec.id,
        source_type: rec.source_type.clone(),
        name,
        global_id,
    }
}

/// Build a relationship from a relation record, or `None` when it carries
/// fewer than two references.
pub fn parse_relationship(rec: &RawRecord) -> Option<Relationship> {
    let mut refs = REFERENCE
        .captures_iter(&rec.args)
        .map(|c| c[1].parse::<StepId>().unwrap_or(UNRESOLVED_ID));

    let parent = refs.next()?;
    let children: Vec<StepId> = refs.collect();
    if children.is_empty() {
        return None;
    }

    Some(Relationship {
        id: rec.id,
        source_type: rec.source_type.clone(),
        parent,
        children,
    })
}

/// Parse selected records into entities and relationships.
pub fn parse_records<I>(records: I, registry: &TypeRegistry) -> ParsedDocument
where
    I: IntoIterator<Item = RawRecord>,
{
    parse_records_with_summary(records, registry).0
}

/// Like `parse_records`, also reporting what was dropped or overwritten.
pub fn parse_records_with_summary<I>(
    records: I,
    registry: &TypeRegistry,
) -> (ParsedDocument, ParseSummary)
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut doc = ParsedDocument::default();
    let mut summary = ParseSummary::default();

    for rec in records {
        if rec.id == UNRESOLVED_ID {
            tracing::trace!(ty = %rec.source_type, "skipping record with reserved id");
            continue;
        }

        if registry.is_entity_type(&rec.source_type) {
            let entity = parse_entity(&rec);
            match doc.entities.entry(rec.id) {
                Entry::Vacant(v) => {
                    v.insert(entity);
                }
                Entry::Occupied(mut o) => {
                    tracing::debug!(id = rec.id, "duplicate entity id, keeping last record");
                    summary.duplicate_ids.push(rec.id);
                    o.insert(entity);
                }
            }
        } else if registry.is_relation_type(&rec.source_type) {
            match parse_relationship(&rec) {
                Some(rel) => doc.relationships.push(rel),
                None => {
                    tracing::trace!(id = rec.id, ty = %rec.source_type, "dropping relation with fewer than two references");
                    summary.dropped_relationships.push(rec.id);
                }
            }
        }
    }

    (doc, summary)
}
