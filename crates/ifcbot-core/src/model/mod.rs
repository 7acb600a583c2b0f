//! ifcbot data models.
//!
//! Two worlds live here, kept apart on purpose:
//! - the IFC side (`RawRecord`, `Entity`, `Relationship`, `ParsedDocument`),
//!   which still speaks in IFC type names and numeric STEP ids
//! - the BOT side (`Triple`, `Object`, `Literal` and the vocabulary in `bot`)
//!
//! Models are plain data. Selection, parsing and mapping policy live in
//! `crate::pipeline`.

use std::collections::BTreeMap;

pub mod bot;

pub use bot::{ElementClass, Predicate, RelationKind, TargetClass, ZoneClass};

/// Numeric STEP instance id (`#123`).
pub type StepId = u64;

/// Stand-in for a `#n` reference whose digits do not fit a `StepId`.
///
/// The selector never yields a record with this id, so it resolves to nothing.
pub const UNRESOLVED_ID: StepId = StepId::MAX;

/// A selected record before any interpretation of its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub id: StepId,
    /// Upper-cased IFC type name.
    pub source_type: String,
    /// Argument text between the outer parentheses, verbatim.
    pub args: String,
}

/// A zone, element or root entity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Entity {
    pub id: StepId,
    pub source_type: String,
    pub name: String,
    pub global_id: String,
}

/// A relation record: one parent reference, ordered child references.
///
/// References are raw ids and may not resolve to any parsed entity.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Relationship {
    pub id: StepId,
    pub source_type: String,
    pub parent: StepId,
    pub children: Vec<StepId>,
}

/// Output of the record parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Entities keyed by id. Iteration order is id order.
    pub entities: BTreeMap<StepId, Entity>,
    /// Relationships in source order.
    pub relationships: Vec<Relationship>,
}

/// Classification of a referenced id, used to disambiguate relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Zone(ZoneClass),
    Element,
    Neither,
}

impl Classification {
    pub fn is_zone(&self) -> bool {
        matches!(self, Self::Zone(_))
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element)
    }
}

/// A quoted string literal. Holds the escaped lexical form (without the
/// surrounding quotes).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal(String);

impl Literal {
    /// Build a literal from raw text. `\`, `"`, LF and CR become Turtle
    /// escapes so the literal stays on one line.
    pub fn new(raw: &str) -> Self {
        let mut out = String::with_capacity(raw.len());
        for c in raw.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                c => out.push(c),
            }
        }
        Self(out)
    }

    pub fn lexical(&self) -> &str {
        &self.0
    }
}

/// Object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Object {
    Instance(StepId),
    Class(TargetClass),
    Literal(Literal),
}

/// A single subject–predicate–object statement. Subjects are always instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: StepId,
    pub predicate: Predicate,
    pub object: Object,
}

impl Triple {
    pub fn link(subject: StepId, predicate: Predicate, object: StepId) -> Self {
        Self {
            subject,
            predicate,
            object: Object::Instance(object),
        }
    }

    pub fn class(subject: StepId, class: TargetClass) -> Self {
        Self {
            subject,
            predicate: Predicate::Type,
            object: Object::Class(class),
        }
    }

    pub fn label(subject: StepId, name: &str) -> Self {
        Self {
            subject,
            predicate: Predicate::Label,
            object: Object::Literal(Literal::new(name)),
        }
    }
}
