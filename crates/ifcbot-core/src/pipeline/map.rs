//! IFC → BOT mapping engine.
//!
//! Entities become `rdf:type` (+ `rdfs:label`) triples. Relationships are
//! disambiguated by the classification of their endpoints:
//!
//! | relation kind        | parent  | child   | predicate                |
//! |----------------------|---------|---------|--------------------------|
//! | aggregation          | zone    | zone    | `bot:containsZone`       |
//! | aggregation          | element | element | `bot:hasSubElement`      |
//! | spatial containment  | zone    | element | `bot:containsElement`    |
//! | connection (2 kids)  | n/a     | element | `bot:adjacentElement` ×2 |
//! | interference (2 kids)| n/a     | element | `bot:intersectingElement` ×2 |
//!
//! Every other combination emits nothing. Ids that do not resolve to a parsed
//! entity classify as `Neither`.

use crate::model::{
    Classification, Entity, ParsedDocument, Predicate, RelationKind, Relationship, StepId, Triple,
};
use crate::registry::TypeRegistry;

/// Maps a parsed document onto BOT triples.
#[derive(Debug, Clone, Copy)]
pub struct MappingEngine<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> MappingEngine<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Classify an id against the document's entities.
    pub fn classify(&self, doc: &ParsedDocument, id: StepId) -> Classification {
        doc.entities
            .get(&id)
            .map(|e| self.registry.classify_type(&e.source_type))
            .unwrap_or(Classification::Neither)
    }

    /// Type and label triples for one entity; empty for unclassified entities.
    pub fn entity_triples(&self, entity: &Entity, out: &mut Vec<Triple>) {
        let Some(class) = self.registry.target_class(&entity.source_type) else {
            return;
        };

        out.push(Triple::class(entity.id, class));
        if !entity.name.is_empty() {
            out.push(Triple::label(entity.id, &entity.name));
        }
    }

    /// Triples for one relationship.
    pub fn relationship_triples(&self, doc: &ParsedDocument, rel: &Relationship, out: &mut Vec<Triple>) {
        let Some(kind) = self.registry.relation_kind(&rel.source_type) else {
            return;
        };

        match kind {
            RelationKind::Aggregation => {
                let parent = self.classify(doc, rel.parent);
                for &child in &rel.children {
                    match (parent, self.classify(doc, child)) {
                        (Classification::Zone(_), Classification::Zone(_)) => {
                            out.push(Triple::link(rel.parent, Predicate::ContainsZone, child));
                        }
                        (Classification::Element, Classification::Element) => {
                            out.push(Triple::link(rel.parent, Predicate::HasSubElement, child));
                        }
                        _ => {}
                    }
                }
            }
            RelationKind::SpatialContainment => {
                let parent = self.classify(doc, rel.parent);
                for &child in &rel.children {
                    if let (Classification::Zone(_), Classification::Element) =
                        (parent, self.classify(doc, child))
                    {
                        out.push(Triple::link(rel.parent, Predicate::ContainsElement, child));
                    }
                }
            }
            RelationKind::Connection => {
                self.symmetric(doc, rel, Predicate::AdjacentElement, out);
            }
            RelationKind::Interference => {
                self.symmetric(doc, rel, Predicate::IntersectingElement, out);
            }
        }
    }

    fn symmetric(&self, doc: &ParsedDocument, rel: &Relationship, predicate: Predicate, out: &mut Vec<Triple>) {
        let &[a, b] = rel.children.as_slice() else {
            return;
        };
        if self.classify(doc, a).is_element() && self.classify(doc, b).is_element() {
            out.push(Triple::link(a, predicate, b));
            out.push(Triple::link(b, predicate, a));
        }
    }

    /// Map a whole document: entity triples in id order, then relationship
    /// triples in source order.
    pub fn map(&self, doc: &ParsedDocument) -> Vec<Triple> {
        let mut out = Vec::new();

        for entity in doc.entities.values() {
            self.entity_triples(entity, &mut out);
        }

        for rel in &doc.relationships {
            self.relationship_triples(doc, rel, &mut out);
        }

        out
    }
}

/// Convenience wrapper around `MappingEngine::map`.
pub fn map_document(doc: &ParsedDocument, registry: &TypeRegistry) -> Vec<Triple> {
    MappingEngine::new(registry).map(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementClass, Object, TargetClass, ZoneClass};

    fn entity(id: StepId, ty: &str, name: &str) -> Entity {
        Entity {
            id,
            source_type: ty.to_string(),
            name: name.to_string(),
            global_id: format!("G{id}"),
        }
    }

    fn rel(id: StepId, ty: &str, parent: StepId, children: &[StepId]) -> Relationship {
        Relationship {
            id,
            source_type: ty.to_string(),
            parent,
            children: children.to_vec(),
        }
    }

    fn doc(entities: Vec<Entity>, relationships: Vec<Relationship>) -> ParsedDocument {
        ParsedDocument {
            entities: entities.into_iter().map(|e| (e.id, e)).collect(),
            relationships,
        }
    }

    #[test]
    fn classified_entity_gets_type_and_label() {
        let reg = TypeRegistry::bot();
        let d = doc(vec![entity(10, "IFCBUILDING", "Main")], vec![]);
        let t = map_document(&d, &reg);
        assert_eq!(
            t,
            vec![
                Triple::class(10, TargetClass::Zone(ZoneClass::Building)),
                Triple::label(10, "Main"),
            ]
        );
    }

    #[test]
    fn empty_name_gets_no_label_and_root_gets_nothing() {
        let reg = TypeRegistry::bot();
        let d = doc(
            vec![entity(1, "IFCPROJECT", "Project"), entity(5, "IFCWALL", "")],
            vec![],
        );
        let t = map_document(&d, &reg);
        assert_eq!(t, vec![Triple::class(5, TargetClass::Element(ElementClass::Element))]);
    }

    #[test]
    fn aggregation_disambiguates_by_endpoint_classification() {
        let reg = TypeRegistry::bot();
        let d = doc(
            vec![
                entity(10, "IFCBUILDING", ""),
                entity(20, "IFCBUILDINGSTOREY", ""),
                entity(30, "IFCWALL", ""),
                entity(40, "IFCPLATE", ""),
            ],
            vec![
                rel(100, "IFCRELAGGREGATES", 10, &[20, 30, 99]),
                rel(101, "IFCRELAGGREGATES", 30, &[40, 20]),
            ],
        );
        let engine = MappingEngine::new(&reg);
        let mut out = Vec::new();
        for r in &d.relationships {
            engine.relationship_triples(&d, r, &mut out);
        }
        assert_eq!(
            out,
            vec![
                Triple::link(10, Predicate::ContainsZone, 20),
                Triple::link(30, Predicate::HasSubElement, 40),
            ]
        );
    }

    #[test]
    fn containment_requires_zone_parent_and_element_child() {
        let reg = TypeRegistry::bot();
        let d = doc(
            vec![
                entity(20, "IFCBUILDINGSTOREY", ""),
                entity(21, "IFCSPACE", ""),
                entity(30, "IFCWALL", ""),
                entity(31, "IFCDOOR", ""),
            ],
            vec![
                rel(200, "IFCRELCONTAINEDINSPATIALSTRUCTURE", 30, &[31]),
                rel(201, "IFCRELCONTAINEDINSPATIALSTRUCTURE", 20, &[30, 21, 31]),
            ],
        );
        let engine = MappingEngine::new(&reg);
        let mut out = Vec::new();
        for r in &d.relationships {
            engine.relationship_triples(&d, r, &mut out);
        }
        assert_eq!(
            out,
            vec![
                Triple::link(20, Predicate::ContainsElement, 30),
                Triple::link(20, Predicate::ContainsElement, 31),
            ]
        );
    }

    #[test]
    fn connection_and_interference_are_symmetric_pairs() {
        let reg = TypeRegistry::bot();
        let d = doc(
            vec![
                entity(30, "IFCWALL", ""),
                entity(31, "IFCSLAB", ""),
                entity(32, "IFCCOLUMN", ""),
                entity(20, "IFCSPACE", ""),
            ],
            vec![
                rel(300, "IFCRELCONNECTSELEMENTS", 1, &[30, 31]),
                rel(301, "IFCRELCONNECTSELEMENTS", 1, &[30, 31, 32]),
                rel(302, "IFCRELINTERFERESELEMENTS", 1, &[31, 32]),
                rel(303, "IFCRELINTERFERESELEMENTS", 1, &[31, 20]),
            ],
        );
        let engine = MappingEngine::new(&reg);
        let mut out = Vec::new();
        for r in &d.relationships {
            engine.relationship_triples(&d, r, &mut out);
        }
        assert_eq!(
            out,
            vec![
                Triple::link(30, Predicate::AdjacentElement, 31),
                Triple::link(31, Predicate::AdjacentElement, 30),
                Triple::link(31, Predicate::IntersectingElement, 32),
                Triple::link(32, Predicate::IntersectingElement, 31),
            ]
        );
    }

    #[test]
    fn dangling_and_root_references_classify_as_neither() {
        let reg = TypeRegistry::bot();
        let d = doc(vec![entity(1, "IFCPROJECT", "P")], vec![]);
        let engine = MappingEngine::new(&reg);
        assert_eq!(engine.classify(&d, 1), Classification::Neither);
        assert_eq!(engine.classify(&d, 12345), Classification::Neither);
    }

    #[test]
    fn entity_triples_precede_relationship_triples() {
        let reg = TypeRegistry::bot();
        let d = doc(
            vec![entity(20, "IFCSPACE", ""), entity(10, "IFCBUILDINGSTOREY", "")],
            vec![rel(100, "IFCRELAGGREGATES", 10, &[20])],
        );
        let t = map_document(&d, &reg);
        assert_eq!(t.len(), 3);
        assert_eq!(t[0].subject, 10);
        assert_eq!(t[1].subject, 20);
        assert_eq!(t[2].object, Object::Instance(20));
    }
}
