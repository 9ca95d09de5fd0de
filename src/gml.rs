//! Reading and writing annotated subgraphs as GML
//!
//! The annotated subgraph is written as a directed graph in the
//! [Graph Modelling Language](https://en.wikipedia.org/wiki/Graph_Modelling_Language).
//!
//! # Layout
//!
//! ```text
//! graph [
//!   directed 1
//!   root "HP:0000118"
//!   keys [
//!     data_version "data-version"
//!     format_version "format-version"
//!   ]
//!   format_version "1.2"
//!   data_version "hp/releases/2023-04-05"
//!   node [
//!     id 0
//!     label "HP:0000118"
//!     name "Phenotypic abnormality"
//!     xref "UMLS:C4021819"
//!     def "&quot;A phenotypic abnormality.&quot; [HPO:probinson]"
//!     M 0
//!     L 0
//!     I 1
//!     T 0
//!     shortest_path_to_root "HP:0000118"
//!   ]
//!   edge [
//!     source 1
//!     target 0
//!   ]
//! ]
//! ```
//!
//! - The OBO document header is written as graph-level attributes.
//! - Every node has an integer `id` (its position in the file) and the
//!   [`HpoTermId`] as `label`.
//! - Edges point from the child term (`source`) to its parent (`target`).
//! - Multi-valued attributes (`xref`, `shortest_path_to_root` and all
//!   passthrough attributes) are written as repeated keys in order.
//! - The flags `M`, `L`, `I` and `T` are written as `1` or `0`.
//!
//! # Key sanitization
//!
//! GML keys may only contain ASCII letters, digits and `_` and must not
//! start with a digit. Every other character of a header or attribute key
//! is replaced by `_` (e.g. `data-version` becomes `data_version`) and
//! a leading digit gets an `_` prefix, see [`sanitize_key`].
//! Every key that changes is recorded in the graph-level `keys` block as
//! `sanitized "original"`, so that [`read`] restores the original keys.
//!
//! # String escaping
//!
//! Strings are written in double quotes. `&` and `"` are written as
//! `&amp;` and `&quot;`, every non-ASCII or control character as a
//! decimal character reference, e.g. `&#233;`.
//!
//! # Compression
//!
//! [`write_file`] and [`read_file`] transparently gzip (de)compress
//! files whose name ends with `.gz`.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use crate::annotation::{AnnotatedOntology, Annotation};
use crate::term::internal::HpoTermInternal;
use crate::{HpoError, HpoResult, HpoTermId, Ontology};

const GRAPH_KEYS: [&str; 5] = ["directed", "root", "keys", "node", "edge"];

const NODE_KEYS: [&str; 12] = [
    "id",
    "label",
    "name",
    "xref",
    "M",
    "L",
    "I",
    "T",
    "shortest_path_to_root",
    "source",
    "target",
    "keys",
];

/// Replaces all characters that are not allowed in GML keys with `_`
///
/// # Examples
///
/// ```
/// use hpo_abnormal::gml::sanitize_key;
///
/// assert_eq!(sanitize_key("data-version"), "data_version");
/// assert_eq!(sanitize_key("created_by"), "created_by");
/// assert_eq!(sanitize_key("3prime"), "_3prime");
/// ```
pub fn sanitize_key(key: &str) -> String {
    let mut res: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if res.is_empty() || res.starts_with(|c: char| c.is_ascii_digit()) {
        res.insert(0, '_');
    }
    res
}

fn escape(value: &str) -> String {
    let mut res = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '"' => res.push_str("&quot;"),
            c if c.is_ascii() && !c.is_ascii_control() => res.push(c),
            c => res.push_str(&format!("&#{};", c as u32)),
        }
    }
    res
}

fn unescape(value: &str) -> String {
    let mut res = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find('&') {
        res.push_str(&rest[..start]);
        rest = &rest[start..];
        let decoded = rest.find(';').and_then(|end| {
            let entity = &rest[1..end];
            let c = match entity {
                "amp" => Some('&'),
                "quot" => Some('"'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(str::parse::<u32>))
                    .and_then(Result::ok)
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, end))
        });
        match decoded {
            Some((c, end)) => {
                res.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                res.push('&');
                rest = &rest[1..];
            }
        }
    }
    res.push_str(rest);
    res
}

/// Line based GML output with indentation
struct GmlWriter<W: Write> {
    inner: W,
    depth: usize,
}

impl<W: Write> GmlWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, depth: 0 }
    }

    fn line(&mut self, content: &str) -> HpoResult<()> {
        writeln!(self.inner, "{:indent$}{}", "", content, indent = self.depth * 2)
            .map_err(|err| HpoError::Serialization(err.to_string()))
    }

    fn open(&mut self, key: &str) -> HpoResult<()> {
        self.line(&format!("{key} ["))?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self) -> HpoResult<()> {
        self.depth = self.depth.saturating_sub(1);
        self.line("]")
    }

    fn int(&mut self, key: &str, value: usize) -> HpoResult<()> {
        self.line(&format!("{key} {value}"))
    }

    fn flag(&mut self, key: &str, value: bool) -> HpoResult<()> {
        self.int(key, usize::from(value))
    }

    fn string(&mut self, key: &str, value: &str) -> HpoResult<()> {
        self.line(&format!("{key} \"{}\"", escape(value)))
    }

    fn into_inner(self) -> W {
        self.inner
    }
}

/// Collects all header and passthrough keys and their sanitized spelling
///
/// # Errors
///
/// [`HpoError::Serialization`] if two keys sanitize to the same GML key
/// or a key collides with one of the structured attributes
fn sanitized_keys(ontology: &Ontology) -> HpoResult<HashMap<String, String>> {
    let header = ontology.header().iter().map(|(key, _)| (key, &GRAPH_KEYS[..]));
    let attributes = ontology
        .hpos()
        .flat_map(|term| term.attributes().iter())
        .map(|(key, _)| (key, &NODE_KEYS[..]));

    let mut original_by_key: HashMap<String, String> = HashMap::new();
    let mut sanitized_by_original: HashMap<String, String> = HashMap::new();
    for (key, reserved) in header.chain(attributes) {
        let sanitized = sanitize_key(key);
        if reserved.contains(&sanitized.as_str()) {
            return Err(HpoError::Serialization(format!(
                "key {key} collides with reserved key {sanitized}"
            )));
        }
        if sanitized_by_original.contains_key(key) {
            continue;
        }
        if let Some(other) = original_by_key.insert(sanitized.clone(), key.clone()) {
            return Err(HpoError::Serialization(format!(
                "keys {other} and {key} both sanitize to {sanitized}"
            )));
        }
        sanitized_by_original.insert(key.clone(), sanitized);
    }
    Ok(sanitized_by_original)
}

/// Writes the annotated subgraph as GML
///
/// # Errors
///
/// [`HpoError::Serialization`] if the writer fails or the attribute keys
/// can't be sanitized unambiguously
pub fn write<W: Write>(annotated: &AnnotatedOntology, writer: W) -> HpoResult<W> {
    let ontology = annotated.ontology();
    let keys = sanitized_keys(ontology)?;

    let mut gml = GmlWriter::new(writer);
    gml.open("graph")?;
    gml.int("directed", 1)?;
    gml.string("root", &annotated.root().to_string())?;

    let mut renamed: Vec<(&String, &String)> = keys
        .iter()
        .filter(|(original, sanitized)| original != sanitized)
        .collect();
    renamed.sort();
    if !renamed.is_empty() {
        gml.open("keys")?;
        for (original, sanitized) in renamed {
            gml.string(sanitized, original)?;
        }
        gml.close()?;
    }
    for (key, value) in ontology.header() {
        gml.string(sanitized(&keys, key)?, value)?;
    }

    for (idx, (term, annotation)) in annotated.iter().enumerate() {
        gml.open("node")?;
        gml.int("id", idx)?;
        gml.string("label", &term.id().to_string())?;
        gml.string("name", term.name())?;
        for xref in term.xrefs() {
            gml.string("xref", xref)?;
        }
        for (key, value) in term.attributes() {
            gml.string(sanitized(&keys, key)?, value)?;
        }
        gml.flag("M", annotation.mapped())?;
        gml.flag("L", annotation.leaf())?;
        gml.flag("I", annotation.intermediate())?;
        gml.flag("T", annotation.terminal())?;
        for id in annotation.shortest_path_to_root() {
            gml.string("shortest_path_to_root", &id.to_string())?;
        }
        gml.close()?;
    }

    for (idx, term) in ontology.hpos().enumerate() {
        for parent in term.parent_ids() {
            let target = ontology.index_of(parent).ok_or_else(|| {
                HpoError::Serialization(format!("parent {parent} of {} is missing", term.id()))
            })?;
            gml.open("edge")?;
            gml.int("source", idx)?;
            gml.int("target", target)?;
            gml.close()?;
        }
    }
    gml.close()?;

    let mut writer = gml.into_inner();
    writer
        .flush()
        .map_err(|err| HpoError::Serialization(err.to_string()))?;
    Ok(writer)
}

fn sanitized<'a>(keys: &'a HashMap<String, String>, key: &str) -> HpoResult<&'a str> {
    keys.get(key)
        .map(String::as_str)
        .ok_or_else(|| HpoError::Serialization(format!("no sanitized key for {key}")))
}

/// Writes the annotated subgraph to a GML file
///
/// If the filename ends with `.gz`, the file is gzip compressed.
///
/// # Errors
///
/// - [`HpoError::CannotOpenFile`] if the file can't be created
/// - [`HpoError::Serialization`] if writing fails
pub fn write_file<P: AsRef<Path>>(annotated: &AnnotatedOntology, path: P) -> HpoResult<()> {
    let path = path.as_ref();
    let file =
        File::create(path).map_err(|_| HpoError::CannotOpenFile(path.display().to_string()))?;
    let writer = BufWriter::new(file);
    if is_gzip(path) {
        write(annotated, GzEncoder::new(writer, Compression::default()))?
            .finish()
            .and_then(|mut writer| writer.flush())
            .map_err(|err| HpoError::Serialization(err.to_string()))?;
    } else {
        write(annotated, writer)?;
    }
    debug!("Wrote {} terms to {}", annotated.len(), path.display());
    Ok(())
}

/// Reads a GML file written by [`write_file`]
///
/// # Errors
///
/// - [`HpoError::CannotOpenFile`] if the file can't be opened
/// - [`HpoError::Serialization`] if the content is not a valid annotated graph
pub fn read_file<P: AsRef<Path>>(path: P) -> HpoResult<AnnotatedOntology> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|_| HpoError::CannotOpenFile(path.display().to_string()))?;
    let reader = BufReader::new(file);
    if is_gzip(path) {
        read(GzDecoder::new(reader))
    } else {
        read(reader)
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

/// Parsed GML value
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Int(i64),
    Real(f64),
    Str(String),
    List(Vec<(String, Value)>),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Key(String),
    Int(i64),
    Real(f64),
    Str(String),
    Open,
    Close,
}

fn tokenize(content: &str) -> HpoResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = content.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                // comment until end of line
                for (_, c) in chars.by_ref() {
                    if c == '\n' {
                        break;
                    }
                }
            }
            '[' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ']' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '"' => {
                chars.next();
                let mut end = None;
                for (idx, c) in chars.by_ref() {
                    if c == '"' {
                        end = Some(idx);
                        break;
                    }
                }
                let end = end.ok_or_else(|| {
                    HpoError::Serialization(format!("unterminated string at byte {start}"))
                })?;
                tokens.push(Token::Str(unescape(&content[start + 1..end])));
            }
            _ => {
                let mut end = content.len();
                while let Some(&(idx, c)) = chars.peek() {
                    if c.is_whitespace() || c == '[' || c == ']' || c == '"' {
                        end = idx;
                        break;
                    }
                    chars.next();
                }
                tokens.push(word_token(&content[start..end])?);
            }
        }
    }
    Ok(tokens)
}

fn word_token(word: &str) -> HpoResult<Token> {
    if word.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        return Ok(Token::Key(word.to_string()));
    }
    if let Ok(int) = word.parse::<i64>() {
        return Ok(Token::Int(int));
    }
    word.parse::<f64>()
        .map(Token::Real)
        .map_err(|_| HpoError::Serialization(format!("invalid token {word}")))
}

fn parse_list<I: Iterator<Item = Token>>(
    tokens: &mut I,
    nested: bool,
) -> HpoResult<Vec<(String, Value)>> {
    let mut res = Vec::new();
    loop {
        let key = match tokens.next() {
            Some(Token::Key(key)) => key,
            Some(Token::Close) if nested => return Ok(res),
            None if !nested => return Ok(res),
            Some(other) => {
                return Err(HpoError::Serialization(format!(
                    "expected key, found {other:?}"
                )))
            }
            None => return Err(HpoError::Serialization("unexpected end of input".into())),
        };
        let value = match tokens.next() {
            Some(Token::Int(int)) => Value::Int(int),
            Some(Token::Real(real)) => Value::Real(real),
            Some(Token::Str(string)) => Value::Str(string),
            Some(Token::Open) => Value::List(parse_list(tokens, true)?),
            other => {
                return Err(HpoError::Serialization(format!(
                    "missing value for {key}, found {other:?}"
                )))
            }
        };
        res.push((key, value));
    }
}

fn as_int(key: &str, value: &Value) -> HpoResult<i64> {
    match value {
        Value::Int(int) => Ok(*int),
        _ => Err(HpoError::Serialization(format!("{key} must be an integer"))),
    }
}

fn as_str<'a>(key: &str, value: &'a Value) -> HpoResult<&'a str> {
    match value {
        Value::Str(string) => Ok(string),
        _ => Err(HpoError::Serialization(format!("{key} must be a string"))),
    }
}

fn as_flag(key: &str, value: &Value) -> HpoResult<bool> {
    match as_int(key, value)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(HpoError::Serialization(format!(
            "{key} must be 0 or 1, found {other}"
        ))),
    }
}

fn parse_id(value: &str) -> HpoResult<HpoTermId> {
    HpoTermId::try_from(value)
        .map_err(|_| HpoError::Serialization(format!("invalid term id {value}")))
}

/// A node record with its GML id
struct Node {
    gml_id: i64,
    term: HpoTermInternal,
    annotation: Annotation,
}

fn parse_node(entries: &[(String, Value)], keys: &HashMap<String, String>) -> HpoResult<Node> {
    let mut gml_id = None;
    let mut label = None;
    let mut name = String::new();
    let mut xrefs = Vec::new();
    let mut attributes = Vec::new();
    let mut flags: [Option<bool>; 4] = [None; 4];
    let mut path = Vec::new();
    for (key, value) in entries {
        match key.as_str() {
            "id" => gml_id = Some(as_int(key, value)?),
            "label" => label = Some(parse_id(as_str(key, value)?)?),
            "name" => name = as_str(key, value)?.to_string(),
            "xref" => xrefs.push(as_str(key, value)?.to_string()),
            "M" => flags[0] = Some(as_flag(key, value)?),
            "L" => flags[1] = Some(as_flag(key, value)?),
            "I" => flags[2] = Some(as_flag(key, value)?),
            "T" => flags[3] = Some(as_flag(key, value)?),
            "shortest_path_to_root" => path.push(parse_id(as_str(key, value)?)?),
            _ => {
                let original = keys.get(key).unwrap_or(key);
                attributes.push((original.clone(), as_str(key, value)?.to_string()));
            }
        }
    }
    let (Some(gml_id), Some(label)) = (gml_id, label) else {
        return Err(HpoError::Serialization("node without id or label".into()));
    };
    let [Some(mapped), Some(leaf), Some(intermediate), Some(terminal)] = flags else {
        return Err(HpoError::Serialization(format!(
            "node {label} is missing one of M, L, I, T"
        )));
    };
    let mut term = HpoTermInternal::new(name, label);
    *term.xrefs_mut() = xrefs;
    *term.attributes_mut() = attributes;
    Ok(Node {
        gml_id,
        term,
        annotation: Annotation::new(mapped, leaf, intermediate, terminal, path),
    })
}

fn parse_edge(entries: &[(String, Value)]) -> HpoResult<(i64, i64)> {
    let mut source = None;
    let mut target = None;
    for (key, value) in entries {
        match key.as_str() {
            "source" => source = Some(as_int(key, value)?),
            "target" => target = Some(as_int(key, value)?),
            _ => (),
        }
    }
    source
        .zip(target)
        .ok_or_else(|| HpoError::Serialization("edge without source or target".into()))
}

/// Reads an annotated subgraph from GML
///
/// # Errors
///
/// [`HpoError::Serialization`] if the reader fails or the content is not
/// a valid annotated graph
pub fn read<R: Read>(mut reader: R) -> HpoResult<AnnotatedOntology> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|err| HpoError::Serialization(err.to_string()))?;

    let document = parse_list(&mut tokenize(&content)?.into_iter(), false)?;
    let graph = document
        .iter()
        .find_map(|(key, value)| match (key.as_str(), value) {
            ("graph", Value::List(entries)) => Some(entries),
            _ => None,
        })
        .ok_or_else(|| HpoError::Serialization("no graph found".into()))?;

    let mut root = None;
    let mut keys: HashMap<String, String> = HashMap::new();
    for (key, value) in graph {
        match (key.as_str(), value) {
            ("root", value) => root = Some(parse_id(as_str(key, value)?)?),
            ("keys", Value::List(entries)) => {
                for (sanitized, original) in entries {
                    keys.insert(sanitized.clone(), as_str(sanitized, original)?.to_string());
                }
            }
            _ => (),
        }
    }
    let root = root.ok_or_else(|| HpoError::Serialization("graph without root".into()))?;

    let mut ontology = Ontology::default();
    for (key, value) in graph {
        if !GRAPH_KEYS.contains(&key.as_str()) {
            let original = keys.get(key).unwrap_or(key);
            ontology.add_header(original, as_str(key, value)?);
        }
    }

    let mut annotations = Vec::new();
    let mut ids: HashMap<i64, HpoTermId> = HashMap::new();
    for (key, value) in graph {
        if let ("node", Value::List(entries)) = (key.as_str(), value) {
            let node = parse_node(entries, &keys)?;
            let id = *node.term.id();
            if ontology.contains(id) || ids.insert(node.gml_id, id).is_some() {
                return Err(HpoError::Serialization(format!("duplicate node {id}")));
            }
            ontology.add_term(node.term);
            annotations.push(node.annotation);
        }
    }
    for (key, value) in graph {
        if let ("edge", Value::List(entries)) = (key.as_str(), value) {
            let (source, target) = parse_edge(entries)?;
            let (Some(child), Some(parent)) = (ids.get(&source), ids.get(&target)) else {
                return Err(HpoError::Serialization(format!(
                    "edge {source} -> {target} references unknown node"
                )));
            };
            ontology.add_parent(*parent, *child)?;
        }
    }

    AnnotatedOntology::from_parts(ontology, root, annotations)
        .map_err(|err| HpoError::Serialization(err.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{annotate, Config};

    fn annotated() -> AnnotatedOntology {
        let obo = "format-version: 1.2\ndata-version: hp/releases/2023-04-05\nontology: hp\n\n\
                   [Term]\nid: HP:0000118\nname: Phenotypic abnormality\n\
                   def: \"A phenotypic abnormality.\" [HPO:probinson]\n\n\
                   [Term]\nid: HP:0000152\nname: Abnormality of head or neck\n\
                   xref: SNOMEDCT_US:118932009\nxref: UMLS:C4021817\n\
                   comment: foo \"bar\"\nis_a: HP:0000118\n\n\
                   [Term]\nid: HP:0000234\nname: Abnormalité & \"head\"\n\
                   synonym: \"one\" EXACT []\nsynonym: \"two\" EXACT []\nis_a: HP:0000152\n";
        annotate(Ontology::from_obo_str(obo).unwrap(), &Config::default()).unwrap()
    }

    fn gml_string(annotated: &AnnotatedOntology) -> String {
        String::from_utf8(write(annotated, Vec::new()).unwrap()).unwrap()
    }

    #[test]
    fn escaping() {
        assert_eq!(escape("a \"b\" & c"), "a &quot;b&quot; &amp; c");
        assert_eq!(escape("é\n"), "&#233;&#10;");
        assert_eq!(unescape("a &quot;b&quot; &amp; c"), "a \"b\" & c");
        assert_eq!(unescape("&#233;&#xE9;"), "éé");
        assert_eq!(unescape("AT&T; & &bogus;"), "AT&T; & &bogus;");
    }

    #[test]
    fn sanitize() {
        assert_eq!(sanitize_key("format-version"), "format_version");
        assert_eq!(sanitize_key("a.b c"), "a_b_c");
        assert_eq!(sanitize_key(""), "_");
    }

    #[test]
    fn write_layout() {
        let gml = gml_string(&annotated());
        assert!(gml.starts_with("graph [\n  directed 1\n  root \"HP:0000118\"\n"));
        assert!(gml.contains(
            "  keys [\n    data_version \"data-version\"\n    format_version \"format-version\"\n  ]\n"
        ));
        assert!(gml.contains(
            "  format_version \"1.2\"\n  data_version \"hp/releases/2023-04-05\"\n  ontology \"hp\"\n"
        ));
        assert!(gml.contains("    label \"HP:0000152\"\n"));
        assert!(gml.contains("    comment \"foo &quot;bar&quot;\"\n"));
        assert!(gml.contains("    name \"Abnormalit&#233; &amp; &quot;head&quot;\"\n"));
        assert!(gml.contains("  edge [\n    source 1\n    target 0\n  ]\n"));
        assert!(gml.ends_with("]\n"));
    }

    #[test]
    fn roundtrip() {
        let original = annotated();
        let copy = read(gml_string(&original).as_bytes()).unwrap();

        assert_eq!(copy.root(), original.root());
        assert_eq!(copy.ontology().header(), original.ontology().header());
        assert_eq!(copy.ontology().header()[1].0, "data-version");
        assert_eq!(copy.len(), original.len());
        assert_eq!(copy.ontology().edge_count(), original.ontology().edge_count());
        for (term, annotation) in original.iter() {
            let other = copy.ontology().hpo(term.id()).unwrap();
            assert_eq!(other.name(), term.name());
            assert_eq!(other.xrefs(), term.xrefs());
            assert_eq!(other.attributes(), term.attributes());
            assert_eq!(other.parent_ids(), term.parent_ids());
            assert_eq!(copy.get(term.id()).unwrap(), annotation);
        }
    }

    #[test]
    fn roundtrip_gzip_file() {
        let original = annotated();
        let path = std::env::temp_dir().join(format!("hpo-abnormal-{}.gml.gz", std::process::id()));
        write_file(&original, &path).unwrap();
        let copy = read_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(copy.len(), 3);
        assert_eq!(
            copy.get(234u32).unwrap().shortest_path_to_root(),
            original.get(234u32).unwrap().shortest_path_to_root()
        );
    }

    #[test]
    fn colliding_keys() {
        let mut ont = Ontology::default();
        let mut term = HpoTermInternal::new("Foo".into(), 118u32.into());
        *term.attributes_mut() = vec![
            ("foo-bar".to_string(), "1".to_string()),
            ("foo.bar".to_string(), "2".to_string()),
        ];
        ont.add_term(term);
        let annotated = annotate(ont, &Config::default()).unwrap();
        assert!(matches!(
            write(&annotated, Vec::new()),
            Err(HpoError::Serialization(_))
        ));
    }

    #[test]
    fn reserved_key() {
        let mut ont = Ontology::default();
        let mut term = HpoTermInternal::new("Foo".into(), 118u32.into());
        *term.attributes_mut() = vec![("label".to_string(), "1".to_string())];
        ont.add_term(term);
        let annotated = annotate(ont, &Config::default()).unwrap();
        assert!(write(&annotated, Vec::new()).is_err());
    }

    #[test]
    fn reserved_header_key() {
        let mut ont = Ontology::default();
        ont.add_term(HpoTermInternal::new("Foo".into(), 118u32.into()));
        ont.add_header("root", "HP:0000001");
        let annotated = annotate(ont, &Config::default()).unwrap();
        assert!(matches!(
            write(&annotated, Vec::new()),
            Err(HpoError::Serialization(_))
        ));
    }

    #[test]
    fn read_inconsistent_annotations() {
        for node in [
            "M 1 L 1 I 1 T 1 shortest_path_to_root \"HP:0000118\"",
            "M 0 L 1 I 1 T 0 shortest_path_to_root \"HP:0000118\"",
            "M 0 L 1 I 0 T 1",
            "M 0 L 1 I 0 T 1 shortest_path_to_root \"HP:0000152\"",
        ] {
            let gml = format!("graph [ root \"HP:0000118\" node [ id 0 label \"HP:0000118\" {node} ] ]");
            assert!(matches!(
                read(gml.as_bytes()),
                Err(HpoError::Serialization(_))
            ));
        }
    }

    #[test]
    fn read_invalid_content() {
        assert!(read("graph [ node [ id 0 ".as_bytes()).is_err());
        assert!(read("graph [ directed 1 ]".as_bytes()).is_err());
        assert!(read("graph [ root \"HP:0000118\" node [ id 0 label \"HP:0000118\" M 2 L 0 I 0 T 1 ] ]".as_bytes()).is_err());
        assert!(read("graph [ root \"HP:0000118\" node [ id 0 label \"HP:0000118\" M 0 L 0 I 0 ] ]".as_bytes()).is_err());
    }

    #[test]
    fn read_minimal_graph() {
        let gml = "# comment\ngraph [\n root \"HP:0000118\"\n \
                   node [ id 5 label \"HP:0000118\" name \"Root\" M 0 L 0 I 0 T 1 shortest_path_to_root \"HP:0000118\" ]\n \
                   node [ id 7 label \"HP:0000152\" M 0 L 1 I 0 T 1 comment \"x\" \
                   shortest_path_to_root \"HP:0000118\" shortest_path_to_root \"HP:0000152\" ]\n \
                   edge [ source 7 target 5 ]\n]\n";
        let annotated = read(gml.as_bytes()).unwrap();
        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated.ontology().edge_count(), 1);
        let term = annotated.ontology().hpo(152u32).unwrap();
        assert_eq!(term.attributes(), &[("comment".to_string(), "x".to_string())]);
        assert!(annotated.get(152u32).unwrap().leaf());
        assert_eq!(annotated.get(152u32).unwrap().shortest_path_to_root().len(), 2);
        assert!(annotated.ontology().header().is_empty());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_file("tests/does-not-exist.gml"),
            Err(HpoError::CannotOpenFile(_))
        ));
    }
}
