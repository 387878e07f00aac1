// Solution file rendering and writing
//
// The template uses `${name}` placeholders. Unknown placeholders are left in
// the output untouched so a custom template can carry its own `${...}` text.

use crate::cpp_types::default_return;
use crate::signature::ParsedSignature;
use lazy_static::lazy_static;
use lpp_common::error::{LppError, LppResult};
use lpp_common::types::Difficulty;
use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/solution.h.tmpl");

const STRUCTURES_HEADER: &str = "\"../Common/Structures.h\"";
const TEST_HELPERS_INCLUDE: &str = "\n#include \"../Common/TestHelpers.h\"";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\$\{(\w+)\}").unwrap();
    static ref TITLE_WORD: Regex = Regex::new(r"\w+").unwrap();
}

/// Everything the solution template needs for one problem
#[derive(Debug, Clone)]
pub struct SolutionContext<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub difficulty: Difficulty,
    pub topics: &'a [String],
    pub companies: &'a [String],
    pub signature: &'a ParsedSignature,
    /// Rendered test body, every line indented
    pub test_cases: &'a str,
}

impl SolutionContext<'_> {
    pub fn placeholders(&self) -> HashMap<&'static str, String> {
        let sig = self.signature;
        let sig_text = sig.to_signature_string();

        let includes = collect_includes(&sig_text, self.topics)
            .iter()
            .map(|inc| format!("#include {}", inc))
            .collect::<Vec<_>>()
            .join("\n");

        let companies = if self.companies.is_empty() {
            "Unknown".to_string()
        } else {
            self.companies.join(", ")
        };

        HashMap::from([
            ("number", self.id.to_string()),
            ("title", self.title.to_string()),
            ("difficulty", self.difficulty.to_string()),
            ("topics", self.topics.join(", ")),
            ("companies", companies),
            ("includes", includes),
            ("test_helpers_include", test_helpers_include(&sig_text, self.topics).to_string()),
            ("return_type", sig.return_type.clone()),
            ("method_name", sig.method_name.clone()),
            ("params", sig.params_str()),
            ("default_return", default_return(&sig.return_type).to_string()),
            // The template already indents the placeholder itself
            ("test_cases", self.test_cases.trim_start().to_string()),
        ])
    }
}

pub fn render_template(template: &str, values: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

pub fn render_solution(template: &str, ctx: &SolutionContext<'_>) -> String {
    render_template(template, &ctx.placeholders())
}

/// Embedded template unless a custom template file is configured
pub fn load_template(custom: Option<&Path>) -> LppResult<String> {
    match custom {
        Some(path) => {
            debug!(path = %path.display(), "Using custom solution template");
            fs::read_to_string(path).map_err(|e| LppError::io(path, e))
        }
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

fn mentions_linked_list(topics: &[String]) -> bool {
    topics.iter().any(|t| t.contains("Linked List") || t.contains("LinkedList"))
}

fn mentions_tree(topics: &[String]) -> bool {
    topics.iter().any(|t| t.contains("Tree"))
}

/// Headers for a problem, system headers first, then local headers, each sorted
pub fn collect_includes(signature: &str, topics: &[String]) -> Vec<String> {
    let mut includes: BTreeSet<&str> = BTreeSet::from(["<iostream>"]);
    let unordered = signature.contains("unordered");

    if signature.contains("ListNode") || signature.contains("TreeNode") {
        includes.insert(STRUCTURES_HEADER);
    }
    if mentions_linked_list(topics) || mentions_tree(topics) {
        includes.insert(STRUCTURES_HEADER);
    }

    if signature.contains("vector") {
        includes.insert("<vector>");
    }
    if signature.contains("string") {
        includes.insert("<string>");
    }
    if signature.contains("map") {
        includes.insert(if unordered { "<unordered_map>" } else { "<map>" });
    }
    if signature.contains("set") {
        includes.insert(if unordered { "<unordered_set>" } else { "<set>" });
    }
    if signature.contains("queue") {
        includes.insert("<queue>");
    }
    if signature.contains("stack") {
        includes.insert("<stack>");
    }
    if signature.contains("pair") {
        includes.insert("<utility>");
    }

    for topic in topics {
        if let Some(header) = topic_include(topic) {
            includes.insert(header);
        }
    }

    // '"' sorts before '<', so system headers are split out first
    let (system, local): (Vec<&str>, Vec<&str>) = includes.into_iter().partition(|inc| inc.starts_with('<'));
    system.into_iter().chain(local).map(str::to_string).collect()
}

fn topic_include(topic: &str) -> Option<&'static str> {
    match topic {
        "Hash Table" => Some("<unordered_map>"),
        "Binary Tree" | "Queue" | "Heap" | "Heap (Priority Queue)" => Some("<queue>"),
        "Binary Search" | "Sorting" => Some("<algorithm>"),
        "Stack" => Some("<stack>"),
        "Graph" | "Dynamic Programming" => Some("<vector>"),
        "Linked List" => Some("<iostream>"),
        _ => None,
    }
}

pub fn test_helpers_include(signature: &str, topics: &[String]) -> &'static str {
    let needs_helpers = signature.contains("ListNode")
        || signature.contains("TreeNode")
        || mentions_tree(topics)
        || mentions_linked_list(topics);
    if needs_helpers {
        TEST_HELPERS_INCLUDE
    } else {
        ""
    }
}

/// `<id>_<Words>.h`, each title word capitalized
pub fn solution_filename(id: &str, title: &str) -> String {
    let words: Vec<String> = TITLE_WORD
        .find_iter(title)
        .map(|m| capitalize(m.as_str()))
        .collect();
    format!("{}_{}.h", id, words.join("_"))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Write a solution file into `dir`, refusing to replace one unless `overwrite`
pub fn emit(dir: &Path, filename: &str, content: &str, overwrite: bool) -> LppResult<PathBuf> {
    let path = dir.join(filename);
    if path.exists() && !overwrite {
        return Err(LppError::AlreadyExists(path));
    }

    fs::create_dir_all(dir).map_err(|e| LppError::io(dir, e))?;
    fs::write(&path, content).map_err(|e| LppError::io(&path, e))?;

    info!(filename = %filename, bytes = content.len(), "Wrote solution file");
    Ok(path)
}

/// Solution files already generated for `id` (any title)
pub fn find_existing_solutions(dir: &Path, id: &str) -> LppResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let prefix = format!("{}_", id);
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| LppError::io(dir, e))? {
        let entry = entry.map_err(|e| LppError::io(dir, e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(&prefix) && name.ends_with(".h") {
            found.push(entry.path());
        }
    }
    found.sort();
    Ok(found)
}
