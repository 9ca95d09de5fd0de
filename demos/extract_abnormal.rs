//! Extracts the abnormal subgraph from HPO and annotates its terms
//!
//! `cargo run --release --example extract_abnormal <hp.obo> <OUTPUT.gml.gz> [ROOT] [PREFIX]`
//!
//! The output is read again as a sanity check and one term is printed.
use std::process;

use hpo_abnormal::{gml, pipeline, Config, HpoTermId, Ontology};

fn main() {
    simple_logger::init_with_level(log::Level::Info).unwrap();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 5 {
        println!("Usage: extract_abnormal <hp.obo> <OUTPUT.gml[.gz]> [ROOT] [PREFIX]");
        process::exit(1);
    }

    let mut config = Config::default();
    if let Some(root) = args.get(3) {
        config = config.with_root(HpoTermId::try_from(root.as_str()).expect("invalid root term"));
    }
    if let Some(prefix) = args.get(4) {
        config = config.with_xref_prefix(prefix);
    }

    let ontology = Ontology::from_obo(&args[1]).expect("unable to read ontology");
    let abnormal = pipeline::run(&ontology, &config).expect("unable to annotate the ontology");
    println!(
        "Total abnormal terms: {} out of a total of {} terms in HPO",
        abnormal.len(),
        ontology.len()
    );
    println!("{}", abnormal.summary());

    gml::write_file(&abnormal, &args[2]).expect("unable to write GML");

    let copy = gml::read_file(&args[2]).expect("unable to read GML");
    for (key, value) in copy.ontology().header() {
        println!("{key}: {value}");
    }
    let sample = HpoTermId::from(10281u32);
    let sample = if copy.get(sample).is_some() {
        sample
    } else {
        copy.root()
    };
    let term = copy.ontology().hpo(sample).expect("term is present");
    let annotation = copy.get(sample).expect("term is annotated");
    println!("{} | {}", term.id(), term.name());
    println!("xrefs: {:?}", term.xrefs());
    println!(
        "M: {} L: {} I: {} T: {}",
        annotation.mapped(),
        annotation.leaf(),
        annotation.intermediate(),
        annotation.terminal()
    );
    let path: Vec<String> = annotation
        .shortest_path_to_root()
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("shortest_path_to_root: {}", path.join(" - "));
}
