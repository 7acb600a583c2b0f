//! IFC type registry.
//!
//! The registry is the only place that knows which IFC types matter and what
//! they map to. It is plain data:
//! - IFC spatial types → BOT zone classes
//! - IFC element types → `bot:Element`
//! - IFC relation types → relation kinds (disambiguated later by the mapping engine)
//! - one root type (`IFCPROJECT`) kept for context but never mapped
//!
//! Requirements:
//! - stable ordering for listing (`BTreeMap`)
//! - immutable once built; share it by reference or `Arc`
//! - no global mutable state
//!
//! Supporting another IFC type is a registry change only, through
//! `TypeRegistryBuilder`.

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{IfcBotError, IfcBotResult};
use crate::model::{Classification, ElementClass, RelationKind, TargetClass, ZoneClass};

/// Default root type retained as context.
pub const ROOT_TYPE: &str = "IFCPROJECT";

const BOT_ZONES: &[(&str, ZoneClass)] = &[
    ("IFCSITE", ZoneClass::Site),
    ("IFCBUILDING", ZoneClass::Building),
    ("IFCBUILDINGSTOREY", ZoneClass::Storey),
    ("IFCSPACE", ZoneClass::Space),
];

const BOT_ELEMENTS: &[&str] = &[
    "IFCWALL",
    "IFCWALLSTANDARDCASE",
    "IFCSLAB",
    "IFCBEAM",
    "IFCCOLUMN",
    "IFCDOOR",
    "IFCWINDOW",
    "IFCPLATE",
    "IFCFURNISHINGELEMENT",
    "IFCSTAIR",
    "IFCSTAIRFLIGHT",
    "IFCFLOWTERMINAL",
];

const BOT_RELATIONS: &[(&str, RelationKind)] = &[
    ("IFCRELAGGREGATES", RelationKind::Aggregation),
    ("IFCRELCONTAINEDINSPATIALSTRUCTURE", RelationKind::SpatialContainment),
    ("IFCRELCONNECTSELEMENTS", RelationKind::Connection),
    ("IFCRELINTERFERESELEMENTS", RelationKind::Interference),
];

/// Immutable IFC → BOT lookup tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    zones: BTreeMap<String, ZoneClass>,
    elements: BTreeMap<String, ElementClass>,
    relations: BTreeMap<String, RelationKind>,
    root_type: String,
    interest: BTreeSet<String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::bot()
    }
}

impl TypeRegistry {
    /// The stock IFC → BOT tables.
    pub fn bot() -> Self {
        let mut b = TypeRegistryBuilder::new();
        for (t, z) in BOT_ZONES {
            b.zones.insert((*t).to_string(), *z);
        }
        for t in BOT_ELEMENTS {
            b.elements.insert((*t).to_string(), ElementClass::Element);
        }
        for (t, k) in BOT_RELATIONS {
            b.relations.insert((*t).to_string(), *k);
        }
        b.root_type = ROOT_TYPE.to_string();
        b.freeze()
    }

    /// Start from an empty registry.
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// Start from a copy of this registry's tables.
    pub fn to_builder(&self) -> TypeRegistryBuilder {
        TypeRegistryBuilder {
            zones: self.zones.clone(),
            elements: self.elements.clone(),
            relations: self.relations.clone(),
            root_type: self.root_type.clone(),
        }
    }

    pub fn zone_class(&self, source_type: &str) -> Option<ZoneClass> {
        self.zones.get(source_type).copied()
    }

    pub fn element_class(&self, source_type: &str) -> Option<ElementClass> {
        self.elements.get(source_type).copied()
    }

    pub fn relation_kind(&self, source_type: &str) -> Option<RelationKind> {
        self.relations.get(source_type).copied()
    }

    /// Zone lookup first, then element.
    pub fn target_class(&self, source_type: &str) -> Option<TargetClass> {
        self.zone_class(source_type)
            .map(TargetClass::Zone)
            .or_else(|| self.element_class(source_type).map(TargetClass::Element))
    }

    /// Classification of a source type as used during relation dispatch.
    pub fn classify_type(&self, source_type: &str) -> Classification {
        match self.target_class(source_type) {
            Some(TargetClass::Zone(z)) => Classification::Zone(z),
            Some(TargetClass::Element(_)) => Classification::Element,
            None => Classification::Neither,
        }
    }

    pub fn root_type(&self) -> &str {
        &self.root_type
    }

    pub fn is_root(&self, source_type: &str) -> bool {
        !self.root_type.is_empty() && self.root_type == source_type
    }

    /// Zone, element or root type: parsed into an `Entity`.
    pub fn is_entity_type(&self, source_type: &str) -> bool {
        self.zones.contains_key(source_type)
            || self.elements.contains_key(source_type)
            || self.is_root(source_type)
    }

    pub fn is_relation_type(&self, source_type: &str) -> bool {
        self.relations.contains_key(source_type)
    }

    /// Union of zone, element, relation and root types.
    pub fn is_of_interest(&self, source_type: &str) -> bool {
        self.interest.contains(source_type)
    }

    pub fn types_of_interest(&self) -> impl Iterator<Item = &str> {
        self.interest.iter().map(|s| s.as_str())
    }

    pub fn zones(&self) -> impl Iterator<Item = (&str, ZoneClass)> {
        self.zones.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn elements(&self) -> impl Iterator<Item = (&str, ElementClass)> {
        self.elements.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn relations(&self) -> impl Iterator<Item = (&str, RelationKind)> {
        self.relations.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Mutable staging area for a `TypeRegistry`.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistryBuilder {
    zones: BTreeMap<String, ZoneClass>,
    elements: BTreeMap<String, ElementClass>,
    relations: BTreeMap<String, RelationKind>,
    root_type: String,
}

impl TypeRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone_type(mut self, source_type: &str, class: ZoneClass) -> Self {
        self.zones.insert(source_type.trim().to_ascii_uppercase(), class);
        self
    }

    pub fn with_element_type(mut self, source_type: &str) -> Self {
        self.elements
            .insert(source_type.trim().to_ascii_uppercase(), ElementClass::Element);
        self
    }

    pub fn with_relation_type(mut self, source_type: &str, kind: RelationKind) -> Self {
        self.relations
            .insert(source_type.trim().to_ascii_uppercase(), kind);
        self
    }

    pub fn with_root_type(mut self, source_type: &str) -> Self {
        self.root_type = source_type.trim().to_ascii_uppercase();
        self
    }

    /// Validate and freeze.
    ///
    /// Checks:
    /// - type names are non-empty `[A-Z0-9_]` identifiers
    /// - zone, element, relation and root types are pairwise disjoint
    pub fn build(self) -> IfcBotResult<TypeRegistry> {
        let all = self
            .zones
            .keys()
            .chain(self.elements.keys())
            .chain(self.relations.keys())
            .chain(std::iter::once(&self.root_type).filter(|r| !r.is_empty()));

        let mut seen = BTreeSet::new();
        for t in all {
            if !is_type_name(t) {
                return Err(IfcBotError::invalid_argument(format!(
                    "invalid IFC type name: {t:?}"
                )));
            }
            if !seen.insert(t.as_str()) {
                return Err(IfcBotError::invalid_argument(format!(
                    "IFC type registered under more than one role: {t}"
                )));
            }
        }

        Ok(self.freeze())
    }

    fn freeze(self) -> TypeRegistry {
        let mut interest: BTreeSet<String> = BTreeSet::new();
        interest.extend(self.zones.keys().cloned());
        interest.extend(self.elements.keys().cloned());
        interest.extend(self.relations.keys().cloned());
        if !self.root_type.is_empty() {
            interest.insert(self.root_type.clone());
        }

        TypeRegistry {
            zones: self.zones,
            elements: self.elements,
            relations: self.relations,
            root_type: self.root_type,
            interest,
        }
    }
}

fn is_type_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}
