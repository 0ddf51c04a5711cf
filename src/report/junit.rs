//! Renders a [`Document`] as a JUnit XML snapshot.
//!
//! Every call builds a fresh DOM from the typed model; nothing is kept between flushes.

use crate::report::error::ReportError;
use crate::report::model::{Case, Counters, Document, Suite};
use crate::report::outcome::Outcome;
use std::borrow::Cow;
use sxd_document::dom;
use sxd_document::writer::format_document;
use sxd_document::Package;

fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}' => true,
        _ => false,
    }
}

/// Replaces characters XML 1.0 cannot carry (control codes from console logs, mostly)
/// with U+FFFD.
fn xml_text(value: &str) -> Cow<'_, str> {
    if value.chars().all(is_xml_char) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(
            value
                .chars()
                .map(|c| if is_xml_char(c) { c } else { '\u{FFFD}' })
                .collect(),
        )
    }
}

fn set_text_attribute(element: &dom::Element, name: &str, value: &str) {
    element.set_attribute_value(name, &xml_text(value));
}

fn set_counters(element: &dom::Element, counters: &Counters) {
    element.set_attribute_value("tests", &counters.tests.to_string());
    element.set_attribute_value("failures", &counters.failures.to_string());
    element.set_attribute_value("errors", &counters.errors.to_string());
}

fn seconds(value: f64) -> String {
    format!("{:.2}", value)
}

fn case_element<'d>(xml: &dom::Document<'d>, case: &Case) -> Option<dom::Element<'d>> {
    // Open cases have nothing to report yet.
    let result = case.result()?;
    let element = xml.create_element("testcase");
    set_text_attribute(&element, "name", case.name());
    set_text_attribute(&element, "classname", case.class_name());
    element.set_attribute_value("time", &seconds(case.node().current_seconds()));

    let tag = match result.outcome {
        Outcome::Pass => return Some(element),
        Outcome::Fail => "failure",
        Outcome::Error => "error",
    };
    let child = xml.create_element(tag);
    if let Some(message) = &result.message {
        set_text_attribute(&child, "message", message);
    }
    if let Some(detail) = result.detail.as_deref().filter(|d| !d.is_empty()) {
        child.append_child(xml.create_text(&xml_text(detail)));
    }
    element.append_child(child);
    Some(element)
}

fn suite_element<'d>(xml: &dom::Document<'d>, suite: &Suite) -> dom::Element<'d> {
    let element = xml.create_element("testsuite");
    set_text_attribute(&element, "name", suite.name());
    element.set_attribute_value("timestamp", &suite.timestamp());
    set_counters(&element, suite.counters());
    element.set_attribute_value("time", &seconds(suite.node().current_seconds()));
    for case in suite.cases() {
        if let Some(child) = case_element(xml, case) {
            element.append_child(child);
        }
    }
    element
}

/// Serializes the whole document, XML declaration included.
pub fn render(document: &Document) -> Result<Vec<u8>, ReportError> {
    let package = Package::new();
    let xml = package.as_document();

    let root = xml.create_element("testsuites");
    set_text_attribute(&root, "name", document.run_name());
    set_counters(&root, &document.totals());
    root.set_attribute_value("time", &seconds(document.total_seconds()));
    for suite in document.suites() {
        root.append_child(suite_element(&xml, suite));
    }
    xml.root().append_child(root);

    let mut buffer = Vec::new();
    format_document(&xml, &mut buffer).map_err(|e| ReportError::Xml(e.to_string()))?;
    Ok(buffer)
}
