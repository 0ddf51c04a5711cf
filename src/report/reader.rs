//! Reads a persisted JUnit report back into rows.
//!
//! This is what downstream consumers (summary mail, telemetry upload) see of a run, so it
//! only relies on the document, never on the live tree.

use std::fs;
use std::path::Path;

use sxd_document::dom::{ChildOfElement, Element};
use sxd_document::parser;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{evaluate_xpath, Value};

use crate::report::error::ReportError;
use crate::report::model::Counters;
use crate::report::outcome::Outcome;
use crate::report::summary::Summary;

#[derive(Debug, Clone, PartialEq)]
pub struct SuiteRow {
    pub name: String,
    pub timestamp: String,
    pub counters: Counters,
    pub elapsed_seconds: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseRow {
    pub suite: String,
    pub name: String,
    pub class_name: String,
    pub outcome: Outcome,
    pub elapsed_seconds: f64,
    pub message: String,
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedReport {
    pub run_name: String,
    pub suites: Vec<SuiteRow>,
    pub cases: Vec<CaseRow>,
}

impl ParsedReport {
    /// Counters summed over the suites as the document states them.
    pub fn totals(&self) -> Counters {
        let mut totals = Counters::default();
        for suite in &self.suites {
            totals.merge(&suite.counters);
        }
        totals
    }

    /// Session totals rebuilt from the case rows.
    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        summary.extend(self.cases.iter().map(|case| case.outcome));
        summary
    }
}

fn attribute(element: &Element, name: &str) -> String {
    element.attribute_value(name).unwrap_or_default().to_owned()
}

fn number<T: std::str::FromStr + Default>(element: &Element, name: &str) -> T {
    let raw = attribute(element, name);
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            if !raw.is_empty() {
                warn!("Attribute {}='{}' is not a number", name, raw);
            }
            T::default()
        }
    }
}

fn child_elements<'d>(element: &Element<'d>) -> Vec<Element<'d>> {
    element
        .children()
        .into_iter()
        .filter_map(|child| match child {
            ChildOfElement::Element(child) => Some(child),
            _ => None,
        })
        .collect()
}

fn text_of(element: &Element) -> String {
    element
        .children()
        .into_iter()
        .filter_map(|child| match child {
            ChildOfElement::Text(text) => Some(text.text().to_owned()),
            _ => None,
        })
        .collect()
}

fn read_case(suite: &str, element: &Element) -> CaseRow {
    let mut row = CaseRow {
        suite: suite.to_owned(),
        name: attribute(element, "name"),
        class_name: attribute(element, "classname"),
        outcome: Outcome::Pass,
        elapsed_seconds: number(element, "time"),
        message: String::new(),
        detail: String::new(),
    };
    for child in child_elements(element) {
        let outcome = match child.name().local_part() {
            "failure" => Outcome::Fail,
            "error" => Outcome::Error,
            _ => continue,
        };
        if outcome > row.outcome {
            row.outcome = outcome;
            row.message = attribute(&child, "message");
            row.detail = text_of(&child);
        }
    }
    row
}

/// Parses a JUnit document as rendered by [`junit::render`](super::junit::render).
pub fn parse(xml: &str) -> Result<ParsedReport, ReportError> {
    let package = parser::parse(xml).map_err(|e| ReportError::Xml(format!("{:?}", e)))?;
    let document = package.as_document();

    let run_name = evaluate_xpath(&document, "string(/testsuites/@name)")
        .map_err(|e| ReportError::Xml(format!("{:?}", e)))?
        .string();
    let suites = match evaluate_xpath(&document, "/testsuites/testsuite")
        .map_err(|e| ReportError::Xml(format!("{:?}", e)))?
    {
        Value::Nodeset(nodes) => nodes.document_order(),
        _ => Vec::new(),
    };

    let mut report = ParsedReport {
        run_name,
        ..ParsedReport::default()
    };
    for node in suites {
        let element = match node {
            Node::Element(element) => element,
            _ => continue,
        };
        let name = attribute(&element, "name");
        for child in child_elements(&element) {
            if child.name().local_part() == "testcase" {
                report.cases.push(read_case(&name, &child));
            }
        }
        report.suites.push(SuiteRow {
            timestamp: attribute(&element, "timestamp"),
            counters: Counters {
                tests: number(&element, "tests"),
                failures: number(&element, "failures"),
                errors: number(&element, "errors"),
            },
            elapsed_seconds: number(&element, "time"),
            name,
        });
    }
    Ok(report)
}

pub fn read(path: &Path) -> Result<ParsedReport, ReportError> {
    let xml = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    parse(&xml)
}
