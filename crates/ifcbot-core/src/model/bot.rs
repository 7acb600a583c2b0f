//! BOT (Building Topology Ontology) vocabulary used by the mapping engine.
//!
//! Everything here is a closed set: zone classes, the single element class,
//! the relation kinds recognised on the IFC side and the predicates emitted on
//! the BOT side. CURIEs are rendered against the prefixes declared by
//! `crate::config::NamespaceConfig`.

use crate::errors::{IfcBotError, IfcBotResult};

/// BOT zone classes (spatial containment concepts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneClass {
    Site,
    Building,
    Storey,
    Space,
}

impl ZoneClass {
    pub const ALL: [ZoneClass; 4] = [Self::Site, Self::Building, Self::Storey, Self::Space];

    pub fn curie(&self) -> &'static str {
        match self {
            Self::Site => "bot:Site",
            Self::Building => "bot:Building",
            Self::Storey => "bot:Storey",
            Self::Space => "bot:Space",
        }
    }

    /// Parse a zone class from `Site`, `bot:Site` or any casing thereof.
    pub fn parse(s: &str) -> IfcBotResult<Self> {
        let local = s.trim();
        let local = local.strip_prefix("bot:").unwrap_or(local);
        Self::ALL
            .into_iter()
            .find(|z| z.curie()[4..].eq_ignore_ascii_case(local))
            .ok_or_else(|| IfcBotError::invalid_argument(format!("unknown zone class: {s}")))
    }
}

/// BOT element class. Every IFC element subtype collapses onto this one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementClass {
    #[default]
    Element,
}

impl ElementClass {
    pub fn curie(&self) -> &'static str {
        match self {
            Self::Element => "bot:Element",
        }
    }
}

/// Target class of a classified entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetClass {
    Zone(ZoneClass),
    Element(ElementClass),
}

impl TargetClass {
    pub fn curie(&self) -> &'static str {
        match self {
            Self::Zone(z) => z.curie(),
            Self::Element(e) => e.curie(),
        }
    }
}

/// The IFC relation kinds the engine knows how to disambiguate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationKind {
    /// Zone→zone or element→element decomposition (polymorphic).
    Aggregation,
    /// Zone→{elements}.
    SpatialContainment,
    /// Symmetric element adjacency.
    Connection,
    /// Symmetric element intersection.
    Interference,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aggregation => "aggregation",
            Self::SpatialContainment => "spatial-containment",
            Self::Connection => "connection",
            Self::Interference => "interference",
        }
    }

    /// The BOT properties this relation kind can produce, in dispatch order.
    pub fn predicates(&self) -> &'static [Predicate] {
        match self {
            Self::Aggregation => &[Predicate::ContainsZone, Predicate::HasSubElement],
            Self::SpatialContainment => &[Predicate::ContainsElement],
            Self::Connection => &[Predicate::AdjacentElement],
            Self::Interference => &[Predicate::IntersectingElement],
        }
    }
}

/// Predicates emitted by the mapping engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Predicate {
    Type,
    Label,
    ContainsZone,
    HasSubElement,
    ContainsElement,
    AdjacentElement,
    IntersectingElement,
}

impl Predicate {
    pub fn curie(&self) -> &'static str {
        match self {
            Self::Type => "rdf:type",
            Self::Label => "rdfs:label",
            Self::ContainsZone => "bot:containsZone",
            Self::HasSubElement => "bot:hasSubElement",
            Self::ContainsElement => "bot:containsElement",
            Self::AdjacentElement => "bot:adjacentElement",
            Self::IntersectingElement => "bot:intersectingElement",
        }
    }
}
