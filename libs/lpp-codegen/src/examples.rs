/// Worked-example extraction from problem statements
///
/// **Input:** the statement HTML as served by the problem API.
/// **Output:** one `Example` per `<pre>` block whose Input/Output labels match.
///
/// **Label patterns (first match wins per block):**
/// 1. `<strong>Input:</strong> ... <strong>Output:</strong> ...`
/// 2. Plain `Input: ...` newline `Output: ...`
/// 3. `<b>Input:</b> ... <b>Output:</b> ...`
///
/// Blocks that match none of them, or that yield an empty input list or an
/// empty output, are skipped without error.
use crate::coerce::brackets_to_braces;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use tracing::debug;

lazy_static! {
    static ref PRE_BLOCK: Regex = Regex::new(r"(?is)<pre>(.*?)</pre>").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref LABEL_PATTERNS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)<strong>Input:</strong>\s*([^<]+?)\s*(?:<br\s*/?>\s*)?<strong>Output:</strong>\s*([^<\n]+?)\s*(?:<|\n|$)"
        )
        .unwrap(),
        Regex::new(r"Input:\s*([^\n]+?)\s*\n\s*Output:\s*([^\n]+?)\s*(?:\n|$)").unwrap(),
        Regex::new(
            r"(?i)<b>Input:</b>\s*([^<]+?)\s*(?:<br\s*/?>\s*)?<b>Output:</b>\s*([^<\n]+?)\s*(?:<|\n|$)"
        )
        .unwrap(),
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Raw input literals in parameter order
    pub inputs: Vec<String>,
    /// Raw output literal, tags stripped and trimmed
    pub output: String,
}

impl Example {
    /// The output as a C++ literal
    pub fn expected_literal(&self) -> String {
        parse_output_string(&self.output)
    }
}

pub fn extract_examples(content: &str) -> Vec<Example> {
    let mut examples = Vec::new();

    for (block_index, block) in PRE_BLOCK.captures_iter(content).enumerate() {
        let block = block[1].trim();

        let Some(caps) = LABEL_PATTERNS.iter().find_map(|p| p.captures(block)) else {
            debug!(block = block_index, "No Input/Output labels in <pre> block");
            continue;
        };

        let inputs = parse_input_string(caps[1].trim());
        let output = clean_text(&caps[2]).trim().to_string();

        if inputs.is_empty() || output.is_empty() {
            debug!(block = block_index, "Skipping example with empty inputs or output");
            continue;
        }
        examples.push(Example { inputs, output });
    }

    examples
}

/// Remove tags, then decode the entities statements commonly carry
fn clean_text(text: &str) -> String {
    let stripped = HTML_TAG.replace_all(text, "");
    match html_escape::decode_html_entities(&stripped) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

/// Split `nums = [2,7], target = 9` into `["[2,7]", "9"]`.
///
/// Commas split only at bracket depth zero and outside double quotes.
pub fn parse_input_string(input: &str) -> Vec<String> {
    let text = clean_text(input);

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    let mut in_quotes = false;

    for c in text.chars() {
        if c == '"' && !current.ends_with('\\') {
            in_quotes = !in_quotes;
        } else if !in_quotes {
            match c {
                '[' | '{' | '(' => depth += 1,
                ']' | '}' | ')' => depth -= 1,
                ',' if depth == 0 => {
                    if !current.trim().is_empty() {
                        parts.push(current.trim().to_string());
                    }
                    current.clear();
                    continue;
                }
                _ => {}
            }
        }
        current.push(c);
    }
    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }

    parts.into_iter().map(|part| strip_binding(&part)).collect()
}

/// `name = value` → `value`; anything else is returned as is
fn strip_binding(part: &str) -> String {
    if let Some((name, value)) = part.split_once('=') {
        let name = name.trim();
        if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return value.trim().to_string();
        }
    }
    part.to_string()
}

/// Convert an output literal to C++ syntax.
///
/// Lists become brace lists; bare words become string literals. Numbers,
/// quoted strings, booleans and null are left alone.
pub fn parse_output_string(output: &str) -> String {
    let text = clean_text(output);
    let text = text.trim();

    if text.starts_with('[') && text.ends_with(']') {
        return brackets_to_braces(text);
    }

    let quoted = text.len() >= 2 && text.starts_with('"') && text.ends_with('"');
    let digits = text.replace(['.', '-'], "");
    let numeric = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
    let keyword = matches!(text, "true" | "false" | "null" | "nullptr");
    let has_brackets = text.contains(['{', '}', '[', ']']);

    if !quoted && !numeric && !keyword && !has_brackets {
        return format!("\"{}\"", text);
    }
    text.to_string()
}
