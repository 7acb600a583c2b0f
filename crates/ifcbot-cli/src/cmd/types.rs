use anyhow::Result;
use serde::Serialize;

use ifcbot_core::registry::TypeRegistry;

use crate::output;

#[derive(Debug, Serialize)]
pub struct TypeRow {
    pub ifc_type: String,
    pub role: &'static str,
    pub target: String,
}

pub fn run() -> Result<()> {
    let reg = TypeRegistry::bot();
    let mut rows = Vec::new();

    for (t, z) in reg.zones() {
        rows.push(TypeRow {
            ifc_type: t.to_string(),
            role: "zone",
            target: z.curie().to_string(),
        });
    }
    for (t, e) in reg.elements() {
        rows.push(TypeRow {
            ifc_type: t.to_string(),
            role: "element",
            target: e.curie().to_string(),
        });
    }
    for (t, k) in reg.relations() {
        let props: Vec<&str> = k.predicates().iter().map(|p| p.curie()).collect();
        rows.push(TypeRow {
            ifc_type: t.to_string(),
            role: k.as_str(),
            target: props.join(" | "),
        });
    }
    rows.push(TypeRow {
        ifc_type: reg.root_type().to_string(),
        role: "root",
        target: "-".to_string(),
    });

    let width = rows.iter().map(|r| r.ifc_type.len()).max().unwrap_or(0);
    let lines: Vec<String> = rows
        .iter()
        .map(|r| format!("{:<width$}  {:<20}  {}", r.ifc_type, r.role, r.target))
        .collect();
    output::print(&rows, &lines)
}
