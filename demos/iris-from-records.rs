//! Generate subject IRIs and labels for a few CSV-like rows.
//!
//! The templates are parsed once and evaluated for every row.
//! Rows missing a referenced column produce no output and are skipped.
use std::collections::BTreeMap;

use rml_template::{lookup::Header, TemplateFunction};

const HEADER: &[&str] = &["id", "name", "city"];

const ROWS: &[&[&str]] = &[
	&["1", "Jane Doe", "Ghent"],
	&["2", "Jöran/Ström", "Malmö"],
	&["3", "", "Brussels"],
	&["4"],
];

fn main() {
	let subject = TemplateFunction::from_template("http://example.org/person/{id}/{name}", true);
	let label = TemplateFunction::from_template("{name} ({city})", false);
	let graph = TemplateFunction::with_constant_value("http://example.org/graph/people");

	let header = Header::new(HEADER.iter().copied());

	let mut output = BTreeMap::new();
	for row in ROWS {
		let record = header.row(row);

		let Some(iri) = subject.apply(&record) else {
			eprintln!("skipping row {:?}: no subject", row);
			continue;
		};
		output.insert(iri, label.apply(&record));
	}

	let graph = graph.apply(&rml_template::EmptyRecord).unwrap_or_default();
	println!("graph <{graph}>");
	for (subject, label) in output {
		match label {
			Some(label) => println!("  <{subject}> rdfs:label {label:?}"),
			None => println!("  <{subject}>"),
		}
	}
}
