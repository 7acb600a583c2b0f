//! Turtle serialization of BOT triples.
//!
//! Layout:
//! - the four prefix declarations (`rdf`, `rdfs`, `bot`, `ex`) and a blank line
//! - one stanza per subject, subjects in first-appearance order
//! - inside a stanza, pairs in emission order, `;` between pairs and `.` after
//!   the last, followed by a blank line
//!
//! Nothing is deduplicated: a triple emitted twice is written twice.

use std::collections::BTreeMap;

use crate::config::NamespaceConfig;
use crate::errors::{IfcBotError, IfcBotResult};
use crate::model::{Object, StepId, Triple};

const INDENT: &str = "    ";

/// Instance CURIE for a STEP id (`ex:inst_42`).
pub fn instance_curie(ns: &NamespaceConfig, id: StepId) -> String {
    format!("ex:{}{}", ns.instance_prefix, id)
}

fn object_term(ns: &NamespaceConfig, object: &Object) -> String {
    match object {
        Object::Instance(id) => instance_curie(ns, *id),
        Object::Class(c) => c.curie().to_string(),
        Object::Literal(l) => format!("\"{}\"", l.lexical()),
    }
}

/// Group triples by subject, keeping first-appearance order of subjects and
/// emission order within each group.
pub fn group_by_subject(triples: &[Triple]) -> Vec<(StepId, Vec<&Triple>)> {
    let mut index: BTreeMap<StepId, usize> = BTreeMap::new();
    let mut groups: Vec<(StepId, Vec<&Triple>)> = Vec::new();

    for t in triples {
        let slot = *index.entry(t.subject).or_insert_with(|| {
            groups.push((t.subject, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(t);
    }

    groups
}

/// Render triples as a Turtle document.
pub fn render_turtle(triples: &[Triple], ns: &NamespaceConfig) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (prefix, iri) in ns.prefixes() {
        lines.push(format!("@prefix {:<6}<{}> .", format!("{prefix}:"), iri));
    }
    lines.push(String::new());

    for (subject, pairs) in group_by_subject(triples) {
        lines.push(instance_curie(ns, subject));
        let last = pairs.len() - 1;
        for (i, t) in pairs.iter().enumerate() {
            let sep = if i < last { " ;" } else { " ." };
            lines.push(format!(
                "{INDENT}{} {}{sep}",
                t.predicate.curie(),
                object_term(ns, &t.object)
            ));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// A subject and its predicate–object pairs as read back from Turtle text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza {
    pub subject: String,
    pub pairs: Vec<(String, String)>,
}

/// Read the stanzas of a document produced by `render_turtle`.
///
/// This is a reader for our own layout (one pair per line, `;`/`.` line
/// terminators), not a general Turtle parser.
pub fn read_stanzas(text: &str) -> IfcBotResult<Vec<Stanza>> {
    let mut out: Vec<Stanza> = Vec::new();
    let mut open = false;

    for (n, line) in text.lines().enumerate() {
        let lineno = n + 1;
        if line.trim().is_empty() || line.starts_with("@prefix") {
            continue;
        }

        if !line.starts_with(char::is_whitespace) {
            if open {
                return Err(IfcBotError::invalid_argument(format!(
                    "line {lineno}: new subject before previous stanza ended"
                )));
            }
            out.push(Stanza {
                subject: line.trim_end().to_string(),
                pairs: Vec::new(),
            });
            open = true;
            continue;
        }

        let stanza = match out.last_mut() {
            Some(s) if open => s,
            _ => {
                return Err(IfcBotError::invalid_argument(format!(
                    "line {lineno}: predicate-object pair outside a stanza"
                )))
            }
        };

        let body = line.trim();
        let (body, closes) = if let Some(b) = body.strip_suffix(" .") {
            (b, true)
        } else if let Some(b) = body.strip_suffix(" ;") {
            (b, false)
        } else {
            return Err(IfcBotError::invalid_argument(format!(
                "line {lineno}: pair is not terminated by ';' or '.'"
            )));
        };

        let (predicate, object) = body.split_once(' ').ok_or_else(|| {
            IfcBotError::invalid_argument(format!("line {lineno}: expected '<predicate> <object>'"))
        })?;
        stanza.pairs.push((predicate.to_string(), object.to_string()));
        open = !closes;
    }

    if open {
        return Err(IfcBotError::invalid_argument("unterminated stanza at end of input"));
    }

    Ok(out)
}
