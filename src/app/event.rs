use serde_derive::Deserialize;

use crate::report::{ReportTree, SubResult};

/// Lifecycle event written by an external driver, one JSON object per line.
///
/// ```text
/// {"event":"start_suite","suite":"LISAv2"}
/// {"event":"complete_case","suite":"LISAv2","case":"NET","outcome":"FAIL","detail":"timeout"}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    StartSuite {
        suite: String,
    },
    StartCase {
        suite: String,
        case: String,
        #[serde(default)]
        class_name: Option<String>,
    },
    CompleteCase {
        suite: String,
        case: String,
        outcome: String,
        #[serde(default)]
        detail: String,
    },
    CompleteBundle {
        suite: String,
        case: String,
        results: Vec<SubResult>,
    },
    CompleteSuite {
        suite: String,
    },
}

impl Event {
    /// Parses one line of the stream. Blank lines carry no event.
    pub fn parse(line: &str) -> Option<Result<Event, serde_json::Error>> {
        let line = line.trim();
        if line.is_empty() {
            None
        } else {
            Some(serde_json::from_str(line))
        }
    }

    pub fn apply(&self, tree: &mut ReportTree) {
        match self {
            Event::StartSuite { suite } => tree.start_suite(suite),
            Event::StartCase {
                suite,
                case,
                class_name,
            } => match class_name {
                Some(class_name) => tree.start_case_with_class(suite, case, class_name),
                None => tree.start_case(suite, case),
            },
            Event::CompleteCase {
                suite,
                case,
                outcome,
                detail,
            } => tree.complete_case(suite, case, outcome, detail),
            Event::CompleteBundle {
                suite,
                case,
                results,
            } => tree.complete_case_bundle(suite, case, results),
            Event::CompleteSuite { suite } => tree.complete_suite(suite),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Event;
    use crate::report::SubResult;

    #[test]
    fn test_parse_events() {
        {
            let event = Event::parse(r#"{"event":"start_suite","suite":"LISAv2"}"#);
            assert_eq!(
                event.unwrap().unwrap(),
                Event::StartSuite {
                    suite: "LISAv2".to_owned()
                }
            );
        }
        {
            let event = Event::parse(
                r#"{"event":"complete_case","suite":"LISAv2","case":"BVT","outcome":"PASS"}"#,
            );
            assert_eq!(
                event.unwrap().unwrap(),
                Event::CompleteCase {
                    suite: "LISAv2".to_owned(),
                    case: "BVT".to_owned(),
                    outcome: "PASS".to_owned(),
                    detail: String::new(),
                }
            );
        }
        {
            let event = Event::parse(
                r#"{"event":"complete_bundle","suite":"S","case":"C","results":[{"outcome":"PASS"},{"outcome":"FAIL","detail":"x"}]}"#,
            );
            assert_eq!(
                event.unwrap().unwrap(),
                Event::CompleteBundle {
                    suite: "S".to_owned(),
                    case: "C".to_owned(),
                    results: vec![SubResult::new("PASS", ""), SubResult::new("FAIL", "x")],
                }
            );
        }
    }

    #[test]
    fn test_blank_and_malformed_lines() {
        assert!(Event::parse("   ").is_none());
        assert!(Event::parse(r#"{"event":"explode"}"#).unwrap().is_err());
        assert!(Event::parse("not json").unwrap().is_err());
    }
}
