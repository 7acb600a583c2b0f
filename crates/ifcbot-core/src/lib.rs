//! ifcbot-core
//!
//! Converts the building-structure subset of an IFC STEP file into BOT
//! (Building Topology Ontology) instance data in Turtle:
//! - `registry`: which IFC types matter and what they map to
//! - `pipeline::select`: pick records of interest out of raw STEP text
//! - `pipeline::parse`: records → entities and relationships
//! - `pipeline::map`: classification and relation disambiguation → triples
//! - `emit::turtle`: triples → Turtle, grouped by subject
//!
//! Stages are pure and synchronous. `io` holds the file read/write helpers.

pub mod config;
pub mod determinism;
pub mod emit;
pub mod errors;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod registry;

pub use crate::errors::{IfcBotError, IfcBotResult};

/// Convenience re-exports.
pub mod prelude {
    pub use crate::config::{validate_config, ConvertConfig, LimitsConfig, NamespaceConfig};
    pub use crate::emit::{read_stanzas, render_turtle, Stanza};
    pub use crate::io::{convert_file, read_source, write_output};
    pub use crate::model::{
        Classification, ElementClass, Entity, Object, ParsedDocument, Predicate, RawRecord,
        RelationKind, Relationship, StepId, TargetClass, Triple, ZoneClass, UNRESOLVED_ID,
    };
    pub use crate::pipeline::convert::{convert_text, ConvertReport};
    pub use crate::pipeline::map::{map_document, MappingEngine};
    pub use crate::pipeline::parse::parse_records;
    pub use crate::pipeline::select::select_records;
    pub use crate::pipeline::ConvertStats;
    pub use crate::registry::{TypeRegistry, TypeRegistryBuilder};
    pub use crate::{IfcBotError, IfcBotResult};
}
