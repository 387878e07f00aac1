// Test case construction and C++ test body rendering
//
// Cases come from extracted examples when there are any, otherwise from the
// line-per-value `exampleTestcases` blob. Rendering never fails: without
// usable cases a commented TODO block is produced.

use crate::coerce::{brackets_to_braces, coerce_value};
use crate::cpp_types::{is_list_node, is_tree_node, normalize_type};
use crate::examples::Example;
use crate::signature::ParsedSignature;

const INDENT: &str = "    ";

/// Return types compared directly with `ASSERT_EQ(call, literal)`
const SCALAR_RETURNS: [&str; 5] = ["int", "bool", "double", "float", "char"];

/// Topics whose vector answers are usually order-insensitive
const UNORDERED_TOPICS: [&str; 2] = ["Hash Table", "Set"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestInput {
    pub param_name: String,
    pub param_type: String,
    /// Already coerced to C++ literal syntax
    pub literal_value: String,
    /// `param_name` + case index
    pub var_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// 1-based
    pub case_index: usize,
    pub inputs: Vec<TestInput>,
    pub expected_output: Option<String>,
}

pub enum CaseSource<'a> {
    Examples(&'a [Example]),
    /// `exampleTestcases`: one value per line, `params.len()` lines per case
    Lines { blob: &'a str, expected: &'a [String] },
}

fn make_input(sig: &ParsedSignature, index: usize, raw: &str, case_index: usize) -> TestInput {
    let param = &sig.params[index];
    TestInput {
        param_name: param.name.clone(),
        param_type: param.ty.clone(),
        literal_value: coerce_value(raw, &param.ty),
        var_name: format!("{}{}", param.name, case_index),
    }
}

pub fn build_cases(source: CaseSource<'_>, sig: &ParsedSignature) -> Vec<TestCase> {
    match source {
        CaseSource::Examples(examples) => examples
            .iter()
            .enumerate()
            .filter(|(_, example)| !example.inputs.is_empty())
            .map(|(position, example)| {
                let case_index = position + 1;
                let inputs = example
                    .inputs
                    .iter()
                    .take(sig.params.len())
                    .enumerate()
                    .map(|(i, raw)| make_input(sig, i, raw, case_index))
                    .collect();
                TestCase {
                    case_index,
                    inputs,
                    expected_output: Some(example.expected_literal()).filter(|e| !e.is_empty()),
                }
            })
            .collect(),

        CaseSource::Lines { blob, expected } => {
            if sig.params.is_empty() {
                return Vec::new();
            }
            let lines: Vec<&str> = blob.trim().lines().collect();
            lines
                .chunks_exact(sig.params.len())
                .enumerate()
                .map(|(position, chunk)| {
                    let case_index = position + 1;
                    let inputs = chunk
                        .iter()
                        .enumerate()
                        .map(|(i, raw)| make_input(sig, i, raw, case_index))
                        .collect();
                    TestCase {
                        case_index,
                        inputs,
                        expected_output: expected
                            .get(position)
                            .filter(|e| !e.is_empty())
                            .cloned(),
                    }
                })
                .collect()
        }
    }
}

/// Cases for a problem: examples first, the testcase blob as fallback
pub fn collect_cases(
    examples: &[Example],
    example_testcases: Option<&str>,
    sig: &ParsedSignature,
) -> Vec<TestCase> {
    let cases = build_cases(CaseSource::Examples(examples), sig);
    if !cases.is_empty() {
        return cases;
    }

    match example_testcases.filter(|b| !b.trim().is_empty()) {
        Some(blob) => {
            let expected: Vec<String> = examples.iter().map(Example::expected_literal).collect();
            build_cases(CaseSource::Lines { blob, expected: &expected }, sig)
        }
        None => Vec::new(),
    }
}

pub fn generate_test_code(
    examples: &[Example],
    example_testcases: Option<&str>,
    sig: &ParsedSignature,
    topics: &[String],
) -> String {
    render_cases(&collect_cases(examples, example_testcases, sig), sig, topics)
}

pub fn render_cases(cases: &[TestCase], sig: &ParsedSignature, topics: &[String]) -> String {
    if cases.is_empty() {
        return default_test_comment(sig);
    }

    let blocks: Vec<String> = cases
        .iter()
        .map(|case| {
            let mut lines = Vec::new();
            render_case(case, sig, topics, &mut lines);
            lines
                .iter()
                .map(|line| format!("{}{}", INDENT, line))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect();

    blocks.join("\n\n")
}

fn render_case(case: &TestCase, sig: &ParsedSignature, topics: &[String], out: &mut Vec<String>) {
    let n = case.case_index;
    out.push(format!("TEST_CASE(\"Example {}\");", n));

    for input in &case.inputs {
        out.push(declaration(input));
    }

    let args: Vec<&str> = case.inputs.iter().map(|i| i.var_name.as_str()).collect();
    let call = format!("solution.{}({})", sig.method_name, args.join(", "));

    match &case.expected_output {
        Some(expected) if sig.returns_void() => {
            out.push(format!("{};", call));
            out.push(format!("// TODO: Verify in-place result, expected {}", expected));
        }
        Some(expected) => assertion(n, expected, &call, sig, topics, out),
        None => {
            out.push(format!("auto result{} = {};", n, call));
            out.push(format!("// TODO: Add expected result for example {}", n));
        }
    }

    for input in &case.inputs {
        if is_list_node(&input.param_type) {
            out.push(format!("TestHelpers::DeleteLinkedList({});", input.var_name));
        } else if is_tree_node(&input.param_type) {
            out.push(format!("TestHelpers::DeleteTree({});", input.var_name));
        }
    }
}

fn is_list_literal(value: &str) -> bool {
    (value.starts_with('[') && value.ends_with(']')) || (value.starts_with('{') && value.ends_with('}'))
}

/// `{2,4,3}` initializer for a list helper, or None for a non-list literal
fn list_initializer(value: &str) -> Option<String> {
    let value = value.trim();
    is_list_literal(value).then(|| brackets_to_braces(value))
}

/// Level-order initializer for the tree helper, `null` → `INT_MIN`
fn tree_initializer(value: &str) -> Option<String> {
    let value = value.trim();
    is_list_literal(value).then(|| format!("{{{}}}", value[1..value.len() - 1].replace("null", "INT_MIN")))
}

fn list_decl(var: &str, value: &str) -> String {
    match list_initializer(value) {
        Some(init) => format!("ListNode* {} = TestHelpers::CreateLinkedList({});", var, init),
        None => format!("ListNode* {} = nullptr;", var),
    }
}

fn tree_decl(var: &str, value: &str) -> String {
    match tree_initializer(value) {
        Some(init) => format!("TreeNode* {} = TestHelpers::CreateBinaryTree({});", var, init),
        None => format!("TreeNode* {} = nullptr;", var),
    }
}

fn declaration(input: &TestInput) -> String {
    if is_list_node(&input.param_type) {
        list_decl(&input.var_name, &input.literal_value)
    } else if is_tree_node(&input.param_type) {
        tree_decl(&input.var_name, &input.literal_value)
    } else {
        let decl_type = normalize_type(&input.param_type.replace('&', ""));
        format!("{} {} = {};", decl_type, input.var_name, input.literal_value)
    }
}

fn assertion(
    n: usize,
    expected: &str,
    call: &str,
    sig: &ParsedSignature,
    topics: &[String],
    out: &mut Vec<String>,
) {
    let return_type = sig.return_type.as_str();

    if is_list_node(return_type) {
        out.push(list_decl(&format!("expected{}", n), expected));
        out.push(format!("auto result{} = {};", n, call));
        out.push(format!("ASSERT_LINKED_LISTS_EQ(result{}, expected{});", n, n));
        out.push(format!("TestHelpers::DeleteLinkedList(expected{});", n));
        out.push(format!("TestHelpers::DeleteLinkedList(result{});", n));
    } else if is_tree_node(return_type) {
        out.push(tree_decl(&format!("expected{}", n), expected));
        out.push(format!("auto result{} = {};", n, call));
        out.push(format!("ASSERT_TREES_EQ(result{}, expected{});", n, n));
        out.push(format!("TestHelpers::DeleteTree(expected{});", n));
        out.push(format!("TestHelpers::DeleteTree(result{});", n));
    } else if SCALAR_RETURNS.contains(&return_type) {
        out.push(format!("ASSERT_EQ({}, {});", call, expected));
    } else {
        out.push(format!("{} expected{} = {};", normalize_type(return_type), n, expected));
        if return_type.contains("vector") && topics.iter().any(|t| UNORDERED_TOPICS.contains(&t.as_str())) {
            out.push("// Note: If order doesn't matter, use ASSERT_UNORDERED_EQ instead".to_string());
        }
        out.push(format!("ASSERT_EQ({}, expected{});", call, n));
    }
}

fn default_test_comment(sig: &ParsedSignature) -> String {
    let m = &sig.method_name;
    [
        "// TODO: Add test cases using ASSERT_EQ".to_string(),
        "// Examples:".to_string(),
        format!("// ASSERT_EQ(solution.{}(...), expected_result);", m),
        "//".to_string(),
        "// For more complex tests:".to_string(),
        "// TEST_CASE(\"Description of test case\");".to_string(),
        format!("// auto result = solution.{}(...);", m),
        "// ASSERT_EQ(result, expected);".to_string(),
    ]
    .iter()
    .map(|line| format!("{}{}", INDENT, line))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::examples::extract_examples;
    use crate::signature::parse_signature;
    use pretty_assertions::assert_eq;

    fn example(inputs: &[&str], output: &str) -> Example {
        Example {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            output: output.to_string(),
        }
    }

    #[test]
    fn test_two_sum_from_statement() {
        let sig = parse_signature("vector<int> twoSum(vector<int>& nums, int target)").unwrap();
        let examples = extract_examples(
            "<pre><strong>Input:</strong> nums = [2,7,11,15], target = 9 <strong>Output:</strong> [0,1]</pre>",
        );
        let topics = vec!["Array".to_string(), "Hash Table".to_string()];

        let code = generate_test_code(&examples, None, &sig, &topics);
        let expected = "    TEST_CASE(\"Example 1\");
    std::vector<int> nums1 = {2,7,11,15};
    int target1 = 9;
    std::vector<int> expected1 = {0,1};
    // Note: If order doesn't matter, use ASSERT_UNORDERED_EQ instead
    ASSERT_EQ(solution.TwoSum(nums1, target1), expected1);";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_linked_list_case() {
        let sig = parse_signature("ListNode* addTwoNumbers(ListNode* l1, ListNode* l2)").unwrap();
        let examples = vec![example(&["[2,4,3]", "[5,6,4]"], "[7,0,8]")];

        let code = generate_test_code(&examples, None, &sig, &[]);
        let expected = "    TEST_CASE(\"Example 1\");
    ListNode* l11 = TestHelpers::CreateLinkedList({2,4,3});
    ListNode* l21 = TestHelpers::CreateLinkedList({5,6,4});
    ListNode* expected1 = TestHelpers::CreateLinkedList({7,0,8});
    auto result1 = solution.AddTwoNumbers(l11, l21);
    ASSERT_LINKED_LISTS_EQ(result1, expected1);
    TestHelpers::DeleteLinkedList(expected1);
    TestHelpers::DeleteLinkedList(result1);
    TestHelpers::DeleteLinkedList(l11);
    TestHelpers::DeleteLinkedList(l21);";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_tree_case_maps_null() {
        let sig = parse_signature("TreeNode* invertTree(TreeNode* root)").unwrap();
        let examples = vec![example(&["[4,2,null,1]"], "[4,null,2]"), example(&["[]"], "[]")];

        let code = generate_test_code(&examples, None, &sig, &[]);
        assert!(code.contains("TreeNode* root1 = TestHelpers::CreateBinaryTree({4,2,INT_MIN,1});"));
        assert!(code.contains("TreeNode* expected1 = TestHelpers::CreateBinaryTree({4,INT_MIN,2});"));
        assert!(code.contains("TreeNode* root2 = TestHelpers::CreateBinaryTree({});"));
        assert!(code.contains("ASSERT_TREES_EQ(result2, expected2);"));
        assert!(code.contains("TestHelpers::DeleteTree(root2);"));
        assert!(code.contains("\n\n    TEST_CASE(\"Example 2\");"));
    }

    #[test]
    fn test_scalar_and_string_inputs() {
        let sig = parse_signature("int lengthOfLongestSubstring(string s)").unwrap();
        let examples = vec![example(&["\"abcabcbb\""], "3")];
        let code = generate_test_code(&examples, None, &sig, &[]);
        assert_eq!(
            code,
            "    TEST_CASE(\"Example 1\");\n    std::string s1 = \"abcabcbb\";\n    ASSERT_EQ(solution.LengthOfLongestSubstring(s1), 3);"
        );
    }

    #[test]
    fn test_void_return_and_missing_expected() {
        let sig = parse_signature("void rotate(vector<int>& nums, int k)").unwrap();
        let examples = vec![example(&["[1,2,3]", "1"], "[3,1,2]")];
        let code = generate_test_code(&examples, None, &sig, &[]);
        assert!(code.contains("    solution.Rotate(nums1, k1);"));
        assert!(code.contains("// TODO: Verify in-place result, expected {3,1,2}"));

        let sig = parse_signature("int climbStairs(int n)").unwrap();
        let code = generate_test_code(&[], Some("2\n3"), &sig, &[]);
        assert!(code.contains("    int n1 = 2;\n    auto result1 = solution.ClimbStairs(n1);"));
        assert!(code.contains("// TODO: Add expected result for example 2"));
    }

    #[test]
    fn test_wide_integer_return_uses_expected_variable() {
        let sig = parse_signature("long long maxSum(int n)").unwrap();
        let code = generate_test_code(&[example(&["3"], "6")], None, &sig, &[]);
        assert!(code.contains("    long long expected1 = 6;"));
        assert!(code.contains("    ASSERT_EQ(solution.MaxSum(n1), expected1);"));
    }

    #[test]
    fn test_lines_source_grouping() {
        let sig = parse_signature("vector<int> twoSum(vector<int>& nums, int target)").unwrap();
        let expected = vec!["{0,1}".to_string()];
        let cases = build_cases(
            CaseSource::Lines { blob: "[2,7,11,15]\n9\n[3,2,4]\n6\n[3,3]", expected: &expected },
            &sig,
        );

        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].expected_output.as_deref(), Some("{0,1}"));
        assert_eq!(cases[1].expected_output, None);
        assert_eq!(cases[1].inputs[0].literal_value, "{3,2,4}");
        assert_eq!(cases[1].inputs[1].var_name, "target2");
    }

    #[test]
    fn test_examples_source_drops_extra_inputs() {
        let sig = parse_signature("int f(int a)").unwrap();
        let cases = build_cases(CaseSource::Examples(&[example(&["1", "2"], "3")]), &sig);
        assert_eq!(cases[0].inputs.len(), 1);
        assert_eq!(cases[0].case_index, 1);

        let no_params = parse_signature("int count()").unwrap();
        assert!(build_cases(CaseSource::Lines { blob: "1\n2", expected: &[] }, &no_params).is_empty());
    }

    #[test]
    fn test_no_cases_yields_todo_block() {
        let sig = parse_signature("bool isPalindrome(int x)").unwrap();
        let code = generate_test_code(&[], None, &sig, &[]);
        assert!(!code.is_empty());
        assert!(code.starts_with("    // TODO: Add test cases using ASSERT_EQ"));
        assert!(code.contains("solution.IsPalindrome(...)"));
    }
}
