//! Compact text syntax for selector paths.
//!
//! ```text
//! declaration[IDENT=EM].element_modification[name=k].expression
//! ```
//!
//! Steps are separated by `.` outside brackets. `rule[field=value]` filters
//! on child text, `rule[field]` requires the field, and a bare `rule` is
//! unfiltered. Values may contain dots and balanced brackets, so
//! `connect_clause[component_reference=a[1].p]` is one step.

use crate::select::engine::PathStep;
use crate::select::errors::PathSyntaxError;

pub fn parse_path(input: &str) -> Result<Vec<PathStep>, PathSyntaxError> {
    let error = |offset: usize, message: &str| PathSyntaxError {
        path: input.to_string(),
        offset,
        message: message.to_string(),
    };

    let bytes = input.as_bytes();
    let mut steps = Vec::new();
    let mut pos = 0;

    if input.trim().is_empty() {
        return Err(error(0, "path is empty"));
    }

    loop {
        let rule_start = pos;
        while pos < bytes.len() && is_name_byte(bytes[pos]) {
            pos += 1;
        }
        if pos == rule_start {
            return Err(error(pos, "expected a rule name"));
        }
        let mut step = PathStep::rule(&input[rule_start..pos]);

        if bytes.get(pos) == Some(&b'[') {
            pos += 1;
            let filter_start = pos;
            let mut depth = 0usize;
            loop {
                match bytes.get(pos) {
                    None => return Err(error(filter_start - 1, "unclosed '['")),
                    Some(b'[') => depth += 1,
                    Some(b']') if depth == 0 => break,
                    Some(b']') => depth -= 1,
                    Some(_) => {}
                }
                pos += 1;
            }
            let filter = &input[filter_start..pos];
            pos += 1;

            let (field, value) = match filter.split_once('=') {
                Some((field, value)) => (field.trim(), Some(value.trim())),
                None => (filter.trim(), None),
            };
            if field.is_empty() || !field.bytes().all(is_name_byte) {
                return Err(error(filter_start, "expected a field name"));
            }
            step = match value {
                Some("") => return Err(error(filter_start, "empty filter value")),
                Some(value) => step.where_child(field, value),
                None => step.with_field(field),
            };
        }

        steps.push(step);

        match bytes.get(pos) {
            None => return Ok(steps),
            Some(b'.') => pos += 1,
            Some(_) => return Err(error(pos, "expected '.' between steps")),
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_argument_path() {
        let steps = parse_path("declaration[IDENT=EM].element_modification[name=k].expression").unwrap();
        assert_eq!(
            steps,
            vec![
                PathStep::rule("declaration").where_child("IDENT", "EM"),
                PathStep::rule("element_modification").where_child("name", "k"),
                PathStep::rule("expression"),
            ]
        );
    }

    #[test]
    fn dotted_and_subscripted_values() {
        let steps = parse_path("connect_clause[component_reference=a[1].p]").unwrap();
        assert_eq!(
            steps,
            vec![PathStep::rule("connect_clause").where_child("component_reference", "a[1].p")]
        );
    }

    #[test]
    fn field_only_filter() {
        let steps = parse_path("declaration[modification]").unwrap();
        assert_eq!(steps, vec![PathStep::rule("declaration").with_field("modification")]);
    }

    #[test]
    fn display_round_trips_simple_paths() {
        let text = "declaration[IDENT=x].expression";
        let rendered: Vec<_> = parse_path(text)
            .unwrap()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(rendered.join("."), text);
    }

    #[test]
    fn malformed_paths() {
        assert_eq!(parse_path("").unwrap_err().message, "path is empty");
        assert_eq!(parse_path("declaration[IDENT=x").unwrap_err().offset, 11);
        assert_eq!(
            parse_path("declaration..expression").unwrap_err().message,
            "expected a rule name"
        );
        assert_eq!(
            parse_path("declaration[=x]").unwrap_err().message,
            "expected a field name"
        );
        assert_eq!(
            parse_path("declaration[IDENT=]").unwrap_err().message,
            "empty filter value"
        );
        assert_eq!(
            parse_path("declaration[IDENT=x]expression").unwrap_err().message,
            "expected '.' between steps"
        );
    }
}
