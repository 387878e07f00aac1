/// Convert a literal's textual form into C++ literal syntax for `param_type`.
///
/// Rules are checked in priority order; the first one that applies wins.
/// No validation is performed: text that does not fit the type passes through.
pub fn coerce_value(text: &str, param_type: &str) -> String {
    let value = text.trim();

    // Node pointers are built by the test helpers from the raw list literal
    if param_type.contains("ListNode") || param_type.contains("TreeNode") {
        return value.to_string();
    }

    if param_type.contains("vector") {
        if value.starts_with('[') {
            return brackets_to_braces(value);
        }
        return value.to_string();
    }

    if param_type.contains("string") {
        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            return value.to_string();
        }
        return format!("\"{}\"", value);
    }

    if param_type == "bool" {
        return if value.eq_ignore_ascii_case("true") {
            "true".to_string()
        } else {
            "false".to_string()
        };
    }

    if param_type == "char" {
        if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
            return value.to_string();
        }
        return format!("'{}'", value.trim_matches('"'));
    }

    value.to_string()
}

pub fn brackets_to_braces(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '[' => '{',
            ']' => '}',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_priority_order() {
        assert_eq!(coerce_value("[1,2,3]", "ListNode*"), "[1,2,3]");
        assert_eq!(coerce_value("[1,null,2]", "TreeNode*"), "[1,null,2]");
        assert_eq!(coerce_value("[[1,2],[3]]", "std::vector<std::vector<int>>&"), "{{1,2},{3}}");
        assert_eq!(coerce_value("[\"a\",\"b\"]", "std::vector<std::string>&"), "{\"a\",\"b\"}");
        assert_eq!(coerce_value("{1,2}", "std::vector<int>"), "{1,2}");
    }

    #[test]
    fn test_strings_and_chars() {
        assert_eq!(coerce_value("abc", "std::string"), "\"abc\"");
        assert_eq!(coerce_value(" \"abc\" ", "std::string"), "\"abc\"");
        assert_eq!(coerce_value("\"", "std::string"), "\"\"\"");
        assert_eq!(coerce_value("a", "char"), "'a'");
        assert_eq!(coerce_value("'a'", "char"), "'a'");
        assert_eq!(coerce_value("\"a\"", "char"), "'a'");
    }

    #[test]
    fn test_scalars() {
        assert_eq!(coerce_value("TRUE", "bool"), "true");
        assert_eq!(coerce_value("1", "bool"), "false");
        assert_eq!(coerce_value(" 42 ", "int"), "42");
        assert_eq!(coerce_value("-2.5", "double"), "-2.5");
    }

    proptest! {
        #[test]
        fn test_container_coercion_preserves_inner(inner in "[0-9a-z,\" -]{0,30}") {
            let literal = format!("[{}]", inner);
            let coerced = coerce_value(&literal, "std::vector<int>&");
            prop_assert_eq!(coerced, format!("{{{}}}", inner));
        }
    }
}
