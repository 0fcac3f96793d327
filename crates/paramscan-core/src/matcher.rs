// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter lookup, value rendering and value comparison

use paramscan_model::{Element, Parameter, ParameterValue};
use std::borrow::Cow;

/// Rendered value of a parameter the host cannot expose as text
pub const UNEXPOSED_VALUE: &str = "Unexposed parameter.";

/// Find the first parameter whose definition name equals `name`, ignoring case
///
/// Parameters without a definition are skipped. When an element carries
/// several parameters with the same name, only the first in host order is
/// ever considered.
pub fn find_named_parameter<'a>(element: &'a Element, name: &str) -> Option<&'a Parameter> {
    element.parameters.iter().find(|parameter| {
        parameter
            .name
            .as_deref()
            .is_some_and(|defined| eq_ignore_case(defined, name))
    })
}

/// Render a parameter value as the string the user searches against
pub fn render_value(parameter: &Parameter) -> Cow<'_, str> {
    match &parameter.value {
        ParameterValue::Float { display, .. } => {
            Cow::Borrowed(display.as_deref().unwrap_or_default())
        }
        ParameterValue::Text(text) => Cow::Borrowed(text.as_deref().unwrap_or_default()),
        ParameterValue::Integer(i) => Cow::Owned(i.to_string()),
        ParameterValue::ReferenceId(id) => Cow::Owned(id.integer_value().to_string()),
        ParameterValue::Unsupported => Cow::Borrowed(UNEXPOSED_VALUE),
    }
}

/// Case-insensitive containment test
///
/// An empty `expected` always matches; an empty `actual` never matches a
/// non-empty `expected`.
pub fn value_matches(actual: &str, expected: &str) -> bool {
    if expected.is_empty() {
        return true;
    }
    if actual.is_empty() {
        return false;
    }
    actual.to_lowercase().contains(&expected.to_lowercase())
}

/// Look up `name` on `element` and test its rendered value
///
/// Returns `None` when the element has no such parameter, so callers can
/// tell "absent" apart from "present but different".
pub fn element_matches(element: &Element, name: &str, expected: &str) -> Option<bool> {
    let parameter = find_named_parameter(element, name)?;
    Some(value_matches(&render_value(parameter), expected))
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramscan_model::ElementId;
    use proptest::prelude::*;

    fn door() -> Element {
        Element::new(ElementId(7), "Doors")
            .with_parameter(Parameter::without_definition(ParameterValue::text("orphan")))
            .with_parameter(Parameter::new("Mark", ParameterValue::text("D-01")))
            .with_parameter(Parameter::new("Height", ParameterValue::float(2.1, "2100 mm")))
            .with_parameter(Parameter::new("MARK", ParameterValue::text("duplicate")))
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let element = door();
        let lower = find_named_parameter(&element, "height");
        let upper = find_named_parameter(&element, "HEIGHT");
        assert!(lower.is_some());
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_find_takes_first_duplicate() {
        let element = door();
        let found = find_named_parameter(&element, "mark").unwrap();
        assert_eq!(found.value, ParameterValue::text("D-01"));
    }

    #[test]
    fn test_find_skips_missing_definitions() {
        let element = door();
        assert!(find_named_parameter(&element, "").is_none());
        assert!(find_named_parameter(&element, "Width").is_none());
    }

    #[test]
    fn test_render_each_storage_kind() {
        let render = |value| render_value(&Parameter::new("p", value)).into_owned();
        assert_eq!(render(ParameterValue::float(120.5, "120.50 SF")), "120.50 SF");
        assert_eq!(
            render(ParameterValue::Float {
                value: 1.0,
                display: None
            }),
            ""
        );
        assert_eq!(render(ParameterValue::text("A-101")), "A-101");
        assert_eq!(render(ParameterValue::Text(None)), "");
        assert_eq!(render(ParameterValue::Integer(-3)), "-3");
        assert_eq!(render(ParameterValue::ReferenceId(ElementId(311))), "311");
        assert_eq!(render(ParameterValue::Unsupported), UNEXPOSED_VALUE);
    }

    #[test]
    fn test_value_matches() {
        assert!(value_matches("120.50 SF", "120"));
        assert!(value_matches("Fire Rated", "fire"));
        assert!(value_matches("", ""));
        assert!(!value_matches("", "x"));
        assert!(!value_matches("A-101", "B"));
    }

    #[test]
    fn test_element_matches_distinguishes_absent() {
        let element = door();
        assert_eq!(element_matches(&element, "mark", "d-0"), Some(true));
        assert_eq!(element_matches(&element, "mark", "zz"), Some(false));
        assert_eq!(element_matches(&element, "Comments", ""), None);
    }

    proptest! {
        #[test]
        fn prop_empty_search_always_matches(actual in ".*") {
            prop_assert!(value_matches(&actual, ""));
        }

        #[test]
        fn prop_containment_ignores_case(actual in "[a-zA-Z0-9 -]{1,24}", start in 0usize..24, len in 1usize..8) {
            let start = start.min(actual.len() - 1);
            let end = (start + len).min(actual.len());
            let needle = actual[start..end].to_uppercase();
            prop_assert!(value_matches(&actual, &needle));
            prop_assert!(value_matches(&actual.to_lowercase(), &needle));
        }

        #[test]
        fn prop_absent_substring_never_matches(actual in "[a-z]{0,16}", needle in "[0-9]{1,4}") {
            prop_assert!(!value_matches(&actual, &needle));
        }

        #[test]
        fn prop_lookup_ignores_case(name in "[A-Za-z]{1,12}") {
            let element = Element::new(ElementId(1), "Generic")
                .with_parameter(Parameter::new(name.clone(), ParameterValue::Integer(1)));
            let upper = find_named_parameter(&element, &name.to_uppercase());
            let lower = find_named_parameter(&element, &name.to_lowercase());
            prop_assert!(upper.is_some());
            prop_assert_eq!(upper, lower);
        }
    }
}
