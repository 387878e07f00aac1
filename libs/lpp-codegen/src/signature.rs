// Method signature parsing and extraction
//
// A signature is `returnType name(params)`. Parsing is a hand-written scanner:
// the method name is the first identifier that is preceded by whitespace and
// followed by `(`, and the parameter list runs to the final `)`.

use crate::cpp_types::{leetcode_to_cpp, normalize_type};
use lpp_common::error::{LppError, LppResult};
use lpp_common::types::ProblemData;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSignature {
    pub return_type: String,
    /// Source name with its first character uppercased
    pub method_name: String,
    pub params: Vec<Param>,
    raw_params: Vec<String>,
}

impl ParsedSignature {
    /// Normalized parameter list, as written into the method declaration
    pub fn params_str(&self) -> String {
        self.raw_params.join(", ")
    }

    pub fn to_signature_string(&self) -> String {
        format!("{} {}({})", self.return_type, self.method_name, self.params_str())
    }

    pub fn returns_void(&self) -> bool {
        self.return_type == "void"
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub fn parse_signature(signature: &str) -> LppResult<ParsedSignature> {
    let malformed = || LppError::MalformedSignature(signature.to_string());

    let collapsed = signature.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = collapsed.as_str();
    if !text.ends_with(')') {
        return Err(malformed());
    }
    let close = text.len() - 1;

    let (ret_end, name, open) = text
        .char_indices()
        .filter(|&(i, c)| c == '(' && i < close)
        .find_map(|(open, _)| {
            let head = text[..open].trim_end();
            let name_start = head
                .char_indices()
                .rev()
                .take_while(|&(_, c)| is_word_char(c))
                .last()
                .map(|(i, _)| i)?;
            let before = &head[..name_start];
            if before.is_empty() || !before.ends_with(' ') || before.trim().is_empty() {
                return None;
            }
            Some((before.trim_end().len(), &head[name_start..], open))
        })
        .ok_or_else(malformed)?;

    let return_type = normalize_type(&text[..ret_end]);
    let method_name = to_pascal_case(name);
    let inner = text[open + 1..close].trim();

    let raw_params: Vec<String> = split_parameters(inner)
        .iter()
        .map(|p| normalize_type(p))
        .collect();

    let params = raw_params
        .iter()
        .enumerate()
        .map(|(index, param)| split_type_and_name(param, index))
        .collect();

    Ok(ParsedSignature {
        return_type,
        method_name,
        params,
        raw_params,
    })
}

/// Split on commas that are not nested inside `<...>`
pub fn split_parameters(params: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;

    for c in params.chars() {
        match c {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => {
                if !current.trim().is_empty() {
                    parts.push(current.trim().to_string());
                }
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if !current.trim().is_empty() {
        parts.push(current.trim().to_string());
    }
    parts
}

fn split_type_and_name(param: &str, index: usize) -> Param {
    if let Some((ty, name)) = param.rsplit_once(' ') {
        let ty = ty.trim();
        if !ty.is_empty() && !name.is_empty() && name.chars().all(is_word_char) {
            return Param {
                ty: ty.to_string(),
                name: name.to_string(),
            };
        }
    }

    Param {
        ty: param.to_string(),
        name: format!("arg{}", index),
    }
}

pub fn to_pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pull the first method declaration out of a `class Solution { public: ... }`
/// snippet and return it re-serialized in normalized form.
pub fn signature_from_snippet(snippet: &str) -> Option<String> {
    let class_at = snippet.find("class Solution")?;
    let body = &snippet[class_at..];
    let public_at = body.find("public:")?;
    let section = body[public_at + "public:".len()..].trim_start();

    let open = section.find('(')?;
    let mut depth = 0usize;
    let mut close = None;
    for (i, c) in section[open..].char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + i);
                    break;
                }
            }
            _ => {}
        }
    }

    let declaration = &section[..=close?];
    match parse_signature(declaration) {
        Ok(sig) => Some(sig.to_signature_string()),
        Err(e) => {
            debug!(error = %e, "Snippet declaration did not parse");
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetaData {
    name: String,
    #[serde(default)]
    params: Vec<MetaParam>,
    #[serde(rename = "return")]
    return_type: MetaType,
}

#[derive(Debug, Deserialize)]
struct MetaParam {
    name: String,
    #[serde(rename = "type")]
    ty: String,
}

#[derive(Debug, Deserialize)]
struct MetaType {
    #[serde(rename = "type")]
    ty: String,
}

/// Build a signature from the problem's `metaData` JSON
pub fn signature_from_metadata(meta_json: &str) -> Option<String> {
    let meta: MetaData = match serde_json::from_str(meta_json) {
        Ok(meta) => meta,
        Err(e) => {
            debug!(error = %e, "metaData is not a single-method description");
            return None;
        }
    };

    let params: Vec<String> = meta
        .params
        .iter()
        .map(|p| {
            let mut ty = leetcode_to_cpp(&p.ty);
            if ty.contains("vector") {
                ty.push('&');
            }
            normalize_type(&format!("{} {}", ty, p.name))
        })
        .collect();

    let return_type = normalize_type(&leetcode_to_cpp(&meta.return_type.ty));
    Some(format!(
        "{} {}({})",
        return_type,
        to_pascal_case(&meta.name),
        params.join(", ")
    ))
}

/// Derive a signature for a problem: the C++ snippet first, `metaData` second
pub fn extract_cpp_signature(problem: &ProblemData) -> Option<String> {
    if let Some(sig) = problem.cpp_snippet().and_then(signature_from_snippet) {
        return Some(sig);
    }

    let fallback = problem
        .meta_data
        .as_deref()
        .filter(|m| !m.trim().is_empty())
        .and_then(signature_from_metadata);

    if fallback.is_none() {
        warn!(
            problem_id = problem.id().unwrap_or("?"),
            "No C++ signature could be derived"
        );
    }
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_two_sum() {
        let sig = parse_signature("vector<int> twoSum(vector<int>& nums, int target)").unwrap();
        assert_eq!(sig.return_type, "std::vector<int>");
        assert_eq!(sig.method_name, "TwoSum");
        assert_eq!(
            sig.params,
            vec![
                Param { ty: "std::vector<int>&".into(), name: "nums".into() },
                Param { ty: "int".into(), name: "target".into() },
            ]
        );
        assert_eq!(sig.params_str(), "std::vector<int>& nums, int target");
        assert_eq!(
            sig.to_signature_string(),
            "std::vector<int> TwoSum(std::vector<int>& nums, int target)"
        );
    }

    #[test]
    fn test_parse_pointer_return_and_spacing() {
        let sig = parse_signature("  ListNode *  addTwoNumbers ( ListNode * l1, ListNode* l2 )  ").unwrap();
        assert_eq!(sig.return_type, "ListNode*");
        assert_eq!(sig.method_name, "AddTwoNumbers");
        assert_eq!(sig.params[0], Param { ty: "ListNode*".into(), name: "l1".into() });
        assert_eq!(sig.params[1].name, "l2");
    }

    #[test]
    fn test_parse_no_params_and_unnamed() {
        let sig = parse_signature("int count()").unwrap();
        assert!(sig.params.is_empty());
        assert_eq!(sig.params_str(), "");

        let sig = parse_signature("bool check(int, string s)").unwrap();
        assert_eq!(sig.params[0], Param { ty: "int".into(), name: "arg0".into() });
        assert_eq!(sig.params[1], Param { ty: "std::string".into(), name: "s".into() });
    }

    #[test]
    fn test_parse_multiline_signature() {
        let sig = parse_signature("vector<vector<int>>\n  merge(vector<vector<int>>& intervals)").unwrap();
        assert_eq!(sig.method_name, "Merge");
        assert_eq!(sig.params[0].ty, "std::vector<std::vector<int>>&");
    }

    #[test]
    fn test_malformed_signatures() {
        for bad in ["", "twoSum(int a)", "int twoSum", "int (int a)", "int twoSum(int a"] {
            match parse_signature(bad) {
                Err(LppError::MalformedSignature(s)) => assert_eq!(s, bad),
                other => panic!("expected MalformedSignature for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_split_parameters_nested() {
        assert_eq!(
            split_parameters("map<int,int> a, vector<int> b"),
            vec!["map<int,int> a", "vector<int> b"]
        );
        assert_eq!(
            split_parameters("vector<pair<int, string>>& v, int k"),
            vec!["vector<pair<int, string>>& v", "int k"]
        );
        assert!(split_parameters("").is_empty());
    }

    #[test]
    fn test_signature_from_snippet() {
        let snippet = "class Solution {\npublic:\n    vector<int> twoSum(vector<int>& nums, int target) {\n        \n    }\n};";
        assert_eq!(
            signature_from_snippet(snippet).as_deref(),
            Some("std::vector<int> TwoSum(std::vector<int>& nums, int target)")
        );

        let tree = "/**\n * struct TreeNode { ... };\n */\nclass Solution {\npublic:\n    TreeNode* invertTree(TreeNode* root) {\n    }\n};";
        assert_eq!(
            signature_from_snippet(tree).as_deref(),
            Some("TreeNode* InvertTree(TreeNode* root)")
        );

        assert_eq!(signature_from_snippet("class MinStack {\npublic:\n    MinStack() {}\n};"), None);
    }

    #[test]
    fn test_signature_from_metadata() {
        let meta = r#"{"name": "twoSum", "params": [{"name": "nums", "type": "integer[]"}, {"name": "target", "type": "integer"}], "return": {"type": "integer[]"}}"#;
        assert_eq!(
            signature_from_metadata(meta).as_deref(),
            Some("std::vector<int> TwoSum(std::vector<int>& nums, int target)")
        );

        let design = r#"{"classname": "LRUCache", "constructor": {"params": []}, "methods": []}"#;
        assert_eq!(signature_from_metadata(design), None);
    }

    #[test]
    fn test_extract_prefers_snippet_then_metadata() {
        let problem: ProblemData = serde_json::from_str(
            r#"{
                "questionFrontendId": "70",
                "codeSnippets": [{"langSlug": "python3", "code": "class Solution:"}],
                "metaData": "{\"name\": \"climbStairs\", \"params\": [{\"name\": \"n\", \"type\": \"integer\"}], \"return\": {\"type\": \"integer\"}}"
            }"#,
        )
        .unwrap();
        assert_eq!(extract_cpp_signature(&problem).as_deref(), Some("int ClimbStairs(int n)"));

        let empty = ProblemData::default();
        assert_eq!(extract_cpp_signature(&empty), None);
    }

    proptest! {
        #[test]
        fn test_method_name_only_changes_first_char(name in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
            let sig = parse_signature(&format!("int {}(int x)", name)).unwrap();
            prop_assert_eq!(sig.method_name.len(), name.len());
            prop_assert_eq!(&sig.method_name[1..], &name[1..]);
            prop_assert!(sig.method_name[..1].eq_ignore_ascii_case(&name[..1]));
        }
    }
}
