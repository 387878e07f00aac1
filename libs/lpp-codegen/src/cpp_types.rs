/// C++ type normalization
///
/// **Normalization Rules (applied in order):**
/// 1. Collapse whitespace runs, trim
/// 2. Tighten template brackets: `vector < int >` → `vector<int>`
/// 3. Attach pointers: `TreeNode * *` → `TreeNode**`
/// 4. Attach references: `vector<int> &` → `vector<int>&`
/// 5. `const` is always followed by a space
/// 6. Container names gain a `std::` prefix
///
/// Step 6 is skipped entirely when `std::` already appears anywhere in the
/// input, so a partially qualified type like `std::vector<string>` keeps its
/// bare `string`. Downstream callers rely on that output being stable.
///
/// The whole transformation is idempotent.
use lazy_static::lazy_static;
use regex::Regex;

/// Container and utility names that receive a `std::` prefix
pub const STD_CONTAINERS: [&str; 12] = [
    "vector",
    "string",
    "map",
    "unordered_map",
    "set",
    "unordered_set",
    "pair",
    "queue",
    "stack",
    "priority_queue",
    "deque",
    "list",
];

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref OPEN_ANGLE: Regex = Regex::new(r"\s*<\s*").unwrap();
    static ref BEFORE_CLOSE_ANGLE: Regex = Regex::new(r"\s+>").unwrap();
    // A space after `>` survives only when a parameter name follows
    static ref AFTER_CLOSE_ANGLE: Regex = Regex::new(r">\s+([^\w\s])").unwrap();
    static ref POINTER: Regex = Regex::new(r"(\w|>)\s+(\*+)").unwrap();
    static ref SPACED_STARS: Regex = Regex::new(r"\*\s+\*").unwrap();
    static ref REFERENCE: Regex = Regex::new(r"(\w|>)\s+(&)").unwrap();
    static ref CONST_GLUED: Regex = Regex::new(r"\bconst(\w)").unwrap();
}

pub fn normalize_type(raw: &str) -> String {
    let mut ty = WHITESPACE.replace_all(raw, " ").trim().to_string();
    if ty.is_empty() {
        return ty;
    }

    ty = OPEN_ANGLE.replace_all(&ty, "<").into_owned();
    ty = BEFORE_CLOSE_ANGLE.replace_all(&ty, ">").into_owned();
    ty = AFTER_CLOSE_ANGLE.replace_all(&ty, ">$1").into_owned();

    ty = POINTER.replace_all(&ty, "$1$2").into_owned();
    while SPACED_STARS.is_match(&ty) {
        ty = SPACED_STARS.replace_all(&ty, "**").into_owned();
    }

    ty = REFERENCE.replace_all(&ty, "$1$2").into_owned();

    while CONST_GLUED.is_match(&ty) {
        ty = CONST_GLUED.replace_all(&ty, "const $1").into_owned();
    }

    let already_qualified = ty.contains("std::");
    if !already_qualified {
        for name in STD_CONTAINERS {
            ty = qualify_word(&ty, name);
        }
    }

    ty
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Prefix every whole-word occurrence of `name` with `std::`, except where
/// the occurrence is already scoped (`x::name`).
fn qualify_word(ty: &str, name: &str) -> String {
    let bytes = ty.as_bytes();
    let mut out = String::with_capacity(ty.len() + 5);
    let mut last = 0;

    for (start, _) in ty.match_indices(name) {
        let end = start + name.len();
        let left_ok = !ty[..start].chars().next_back().is_some_and(is_word_char);
        let right_ok = !ty[end..].chars().next().is_some_and(is_word_char);
        let scoped = start >= 2 && &bytes[start - 2..start] == b"::";

        if left_ok && right_ok && !scoped {
            out.push_str(&ty[last..start]);
            out.push_str("std::");
            out.push_str(name);
            last = end;
        }
    }

    out.push_str(&ty[last..]);
    out
}

/// Placeholder body statement for a method returning `return_type`
pub fn default_return(return_type: &str) -> &'static str {
    if return_type.contains("vector") {
        "return {};"
    } else if return_type.contains("string") {
        "return \"\";"
    } else if return_type == "int" {
        "return 0;"
    } else if return_type == "bool" {
        "return false;"
    } else if return_type == "double" || return_type == "float" {
        "return 0.0;"
    } else if return_type.contains('*') {
        "return nullptr;"
    } else if return_type == "void" {
        "// void return"
    } else {
        "return {}; // TODO: check return type"
    }
}

/// Map a LeetCode metadata type (`integer[]`, `ListNode`, ...) to C++
pub fn leetcode_to_cpp(lc_type: &str) -> String {
    let lc_type = lc_type.trim();

    if let Some(base) = lc_type.strip_suffix("[][]") {
        return format!("std::vector<std::vector<{}>>", scalar_to_cpp(base));
    }
    if let Some(base) = lc_type.strip_suffix("[]") {
        return format!("std::vector<{}>", scalar_to_cpp(base));
    }
    if let Some(inner) = lc_type
        .strip_prefix("list<")
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return format!("std::vector<{}>", leetcode_to_cpp(inner));
    }

    scalar_to_cpp(lc_type).to_string()
}

fn scalar_to_cpp(lc_type: &str) -> &str {
    match lc_type {
        "integer" => "int",
        "long" => "long long",
        "double" => "double",
        "string" => "std::string",
        "boolean" => "bool",
        "character" => "char",
        "void" => "void",
        "ListNode" => "ListNode*",
        "TreeNode" => "TreeNode*",
        "Node" => "Node*",
        other => other,
    }
}

pub fn is_list_node(ty: &str) -> bool {
    ty.contains("ListNode")
}

pub fn is_tree_node(ty: &str) -> bool {
    ty.contains("TreeNode")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_spacing() {
        assert_eq!(normalize_type("  vector < int >  "), "std::vector<int>");
        assert_eq!(normalize_type("vector<vector<int> >"), "std::vector<std::vector<int>>");
        assert_eq!(normalize_type("TreeNode *"), "TreeNode*");
        assert_eq!(normalize_type("TreeNode * *"), "TreeNode**");
        assert_eq!(normalize_type("vector<int> & nums"), "std::vector<int>& nums");
        assert_eq!(normalize_type("vector<int> b"), "std::vector<int> b");
        assert_eq!(normalize_type("conststring&"), "const std::string&");
    }

    #[test]
    fn test_qualification_rules() {
        assert_eq!(normalize_type("unordered_map<string, int>"), "std::unordered_map<std::string, int>");
        assert_eq!(normalize_type("pair<int,int>"), "std::pair<int,int>");
        // Not whole words
        assert_eq!(normalize_type("vectors"), "vectors");
        assert_eq!(normalize_type("mystring"), "mystring");
        assert_eq!(normalize_type("éstring"), "éstring");
        assert_eq!(normalize_type("vectorß<int>"), "vectorß<int>");
        assert_eq!(normalize_type("map<int,éa>"), "std::map<int,éa>");
        // Already scoped
        assert_eq!(normalize_type("boost::list<int>"), "boost::list<int>");
        // Global guard: a single std:: disables qualification
        assert_eq!(normalize_type("std::vector<string>"), "std::vector<string>");
    }

    #[test]
    fn test_plain_types_untouched() {
        assert_eq!(normalize_type("int"), "int");
        assert_eq!(normalize_type("long long"), "long long");
        assert_eq!(normalize_type(""), "");
        assert_eq!(normalize_type("   "), "");
    }

    #[test]
    fn test_default_return() {
        assert_eq!(default_return("std::vector<int>"), "return {};");
        assert_eq!(default_return("std::string"), "return \"\";");
        assert_eq!(default_return("int"), "return 0;");
        assert_eq!(default_return("bool"), "return false;");
        assert_eq!(default_return("double"), "return 0.0;");
        assert_eq!(default_return("ListNode*"), "return nullptr;");
        assert_eq!(default_return("void"), "// void return");
        assert_eq!(default_return("long long"), "return {}; // TODO: check return type");
    }

    #[test]
    fn test_leetcode_to_cpp() {
        assert_eq!(leetcode_to_cpp("integer"), "int");
        assert_eq!(leetcode_to_cpp("integer[]"), "std::vector<int>");
        assert_eq!(leetcode_to_cpp("character[][]"), "std::vector<std::vector<char>>");
        assert_eq!(leetcode_to_cpp("list<string>"), "std::vector<std::string>");
        assert_eq!(leetcode_to_cpp("TreeNode"), "TreeNode*");
        assert_eq!(leetcode_to_cpp("Interval"), "Interval");
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(raw in "[a-z_:<>*& ,]{0,24}|(const )?(vector|map|string|set) ?< ?(int|string) ?> ?[&*]? ?[a-z]{0,4}") {
            let once = normalize_type(&raw);
            prop_assert_eq!(normalize_type(&once), once.clone());
        }
    }
}
