use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use ifcbot_core::emit::read_stanzas;

use crate::output;

#[derive(Debug, Serialize)]
pub struct InspectOut {
    pub subjects: usize,
    pub triples: usize,
    pub predicates: BTreeMap<String, usize>,
    pub classes: BTreeMap<String, usize>,
}

pub fn run(input: &Path) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let stanzas = read_stanzas(&text).with_context(|| format!("parsing {}", input.display()))?;

    let mut predicates: BTreeMap<String, usize> = BTreeMap::new();
    let mut classes: BTreeMap<String, usize> = BTreeMap::new();
    let mut triples = 0;
    for s in &stanzas {
        for (p, o) in &s.pairs {
            triples += 1;
            *predicates.entry(p.clone()).or_default() += 1;
            if p == "rdf:type" {
                *classes.entry(o.clone()).or_default() += 1;
            }
        }
    }

    let out = InspectOut {
        subjects: stanzas.len(),
        triples,
        predicates,
        classes,
    };

    let mut lines = vec![format!("{} subjects, {} triples", out.subjects, out.triples)];
    lines.extend(out.classes.iter().map(|(c, n)| format!("  {c:<28} {n}")));
    lines.extend(out.predicates.iter().map(|(p, n)| format!("  {p:<28} {n}")));
    output::print(&out, &lines)
}
