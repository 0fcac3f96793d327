// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element filtering with type-entity fallback

use crate::matcher::element_matches;
use log::{debug, trace};
use paramscan_model::{Element, ElementSource, MatchSet, Result, ScanError};

/// Collect every instance element whose parameter `name` contains `value`
///
/// The instance's own parameters are tried first. Only when the instance
/// lacks the parameter entirely is its type entity consulted, and a type
/// match still records the instance id.
pub fn filter<S>(source: &S, name: &str, value: &str) -> Result<MatchSet>
where
    S: ElementSource + ?Sized,
{
    if name.trim().is_empty() {
        return Err(ScanError::EmptyParameterName);
    }

    let elements = source.instance_elements();
    debug!(
        "Filtering {} elements on parameter '{}' containing '{}'",
        elements.len(),
        name,
        value
    );

    let matches: MatchSet = elements
        .iter()
        .filter(|element| matches_with_fallback(source, element, name, value))
        .map(|element| element.id)
        .collect();

    debug!("{} of {} elements matched", matches.len(), elements.len());
    Ok(matches)
}

fn matches_with_fallback<S>(source: &S, element: &Element, name: &str, value: &str) -> bool
where
    S: ElementSource + ?Sized,
{
    if let Some(hit) = element_matches(element, name, value) {
        return hit;
    }

    let Some(type_element) = source.type_of(element) else {
        return false;
    };

    match element_matches(&type_element, name, value) {
        Some(hit) => {
            trace!("{} resolved '{}' through type {}", element.id, name, type_element.id);
            hit
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocument;
    use paramscan_model::{ElementId, Parameter, ParameterValue};
    use pretty_assertions::assert_eq;

    fn doc() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        doc.add_type(
            Element::new(ElementId(100), "Door Type")
                .with_parameter(Parameter::new("Fire Rating", ParameterValue::text("60 min"))),
        );
        doc.add(
            Element::new(ElementId(1), "Doors")
                .with_type(ElementId(100))
                .with_parameter(Parameter::new("Mark", ParameterValue::text("D-01"))),
        );
        doc.add(
            Element::new(ElementId(2), "Doors")
                .with_type(ElementId(100))
                .with_parameter(Parameter::new("Fire Rating", ParameterValue::text("none"))),
        );
        doc.add(Element::new(ElementId(3), "Walls").with_type(ElementId(999)));
        doc.add(
            Element::new(ElementId(4), "Walls")
                .with_parameter(Parameter::new("mark", ParameterValue::text("W-01"))),
        );
        doc
    }

    #[test]
    fn test_empty_name_rejected() {
        let doc = doc();
        assert!(matches!(filter(&doc, "", "x"), Err(ScanError::EmptyParameterName)));
        assert!(matches!(filter(&doc, "   ", ""), Err(ScanError::EmptyParameterName)));
    }

    #[test]
    fn test_direct_match_any_value() {
        let doc = doc();
        let matches = filter(&doc, "MARK", "").unwrap();
        assert_eq!(matches.ids(), &[ElementId(1), ElementId(4)]);
    }

    #[test]
    fn test_type_fallback_adds_instance() {
        let doc = doc();
        let matches = filter(&doc, "fire rating", "60").unwrap();
        // Element 2 has its own (non-matching) value, so the type is not consulted
        assert_eq!(matches.ids(), &[ElementId(1)]);
        assert!(!matches.ids().contains(&ElementId(100)));
    }

    #[test]
    fn test_dangling_type_is_excluded() {
        let doc = doc();
        let matches = filter(&doc, "Fire Rating", "").unwrap();
        assert_eq!(matches.ids(), &[ElementId(1), ElementId(2)]);
    }
}
