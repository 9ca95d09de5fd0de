use std::fs;
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::term::internal::HpoTermInternal;
use crate::{HpoError, HpoResult, HpoTermId, Ontology};

type Connections = Vec<(HpoTermId, HpoTermId)>;

/// Reads an `hp.obo` file and adds all terms and connections to the ontology
pub(crate) fn read_obo_file<P: AsRef<Path>>(filename: P, ontology: &mut Ontology) -> HpoResult<()> {
    let path = filename.as_ref().display().to_string();
    let file_content =
        fs::read_to_string(filename).map_err(|_| HpoError::CannotOpenFile(path))?;
    load_from_str(&file_content, ontology)
}

pub(crate) fn load_from_str(content: &str, ontology: &mut Ontology) -> HpoResult<()> {
    // stores tuples of Term - Parent
    let mut connections: Connections = Vec::new();
    let (header, blocks) = stanzas(content);

    for line in header {
        match parse_line(line) {
            Some((key, value)) => ontology.add_header(key, strip_qualifiers(value)),
            None => warn!("Unable to parse header line: {}", line),
        }
    }

    for stanza in blocks {
        match stanza.first() {
            Some(&"[Term]") => {
                if let Some(term) = term_from_obo(&stanza[1..])? {
                    let id = ontology.add_term(term);
                    add_connections(&mut connections, &stanza[1..], id)?;
                }
            }
            Some(header) => trace!("Ignoring stanza: {}", header),
            None => (),
        }
    }

    for (child, parent) in connections {
        if !ontology.contains(parent) {
            return Err(HpoError::InvalidInput(format!(
                "{child} is_a unknown term {parent}"
            )));
        }
        ontology.add_parent(parent, child)?;
    }
    debug!("Parsed {} terms from OBO", ontology.len());
    Ok(())
}

/// Splits the OBO content into the document header and stanzas
///
/// Each stanza starts with its header line (e.g. `[Term]`), blank lines
/// are dropped. Lines before the first stanza belong to the document header.
fn stanzas(content: &str) -> (Vec<&str>, Vec<Vec<&str>>) {
    let mut header: Vec<&str> = Vec::new();
    let mut res: Vec<Vec<&str>> = Vec::new();
    for line in content.lines().map(str::trim_end) {
        if line.starts_with('[') {
            res.push(vec![line]);
        } else if !line.is_empty() {
            match res.last_mut() {
                Some(stanza) => stanza.push(line),
                None => header.push(line),
            }
        }
    }
    (header, res)
}

/// Builds the term from the lines of a `[Term]` stanza
///
/// Returns `None` for obsolete terms
fn term_from_obo(lines: &[&str]) -> HpoResult<Option<HpoTermInternal>> {
    let mut id: Option<HpoTermId> = None;
    let mut name = String::new();
    let mut xrefs = Vec::new();
    let mut attributes = Vec::new();
    for line in lines {
        let Some((key, value)) = parse_line(line) else {
            warn!("Unable to parse line: {}", line);
            continue;
        };
        match key {
            "id" => id = Some(HpoTermId::try_from(value)?),
            "name" => name = value.to_string(),
            "xref" => xrefs.push(strip_qualifiers(value).to_string()),
            "is_a" => (),
            "is_obsolete" if value == "true" => {
                trace!("Skipping obsolete term {:?}", id);
                return Ok(None);
            }
            _ => attributes.push((key.to_string(), strip_qualifiers(value).to_string())),
        }
    }
    let Some(id) = id else {
        return Err(HpoError::InvalidInput(format!(
            "term without id: {}",
            lines.join(" | ")
        )));
    };
    let mut term = HpoTermInternal::new(name, id);
    *term.xrefs_mut() = xrefs;
    *term.attributes_mut() = attributes;
    Ok(Some(term))
}

fn add_connections(connections: &mut Connections, lines: &[&str], id: HpoTermId) -> HpoResult<()> {
    for line in lines {
        if let Some(value) = line.strip_prefix("is_a: ") {
            connections.push((id, HpoTermId::try_from(strip_qualifiers(value))?));
        }
    }
    Ok(())
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    line.split_once(": ")
        .or_else(|| line.strip_suffix(':').map(|key| (key, "")))
}

/// Removes trailing `! comments` and `{qualifiers}` from a tag value
fn strip_qualifiers(value: &str) -> &str {
    let value = value.split_once(" !").map_or(value, |(v, _)| v);
    let value = value.split_once(" {").map_or(value, |(v, _)| v);
    value.trim()
}
