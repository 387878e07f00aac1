// Generation orchestration: problem data → solution file + manifest + metadata
use anyhow::{Context, Result};
use chrono::Utc;
use lpp_codegen::emitter::{self, SolutionContext};
use lpp_codegen::examples::{extract_examples, Example};
use lpp_codegen::manifest;
use lpp_codegen::signature::{extract_cpp_signature, parse_signature};
use lpp_codegen::testcase::{collect_cases, render_cases};
use lpp_common::config::Config;
use lpp_common::error::LppError;
use lpp_common::metadata::MetadataStore;
use lpp_common::types::{Difficulty, ProblemData, ProblemRecord};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Replace previously generated files for the same id
    pub force: bool,
    /// Used instead of the extracted signature
    pub manual_signature: Option<String>,
}

/// A solution to generate without API data
#[derive(Debug, Clone)]
pub struct SolutionRequest {
    pub id: String,
    pub title: String,
    pub signature: String,
    pub difficulty: Difficulty,
    pub topics: Vec<String>,
    pub companies: Vec<String>,
    pub force: bool,
}

#[derive(Debug, Clone)]
pub struct Generated {
    pub id: String,
    pub title: String,
    pub signature: String,
    pub filename: String,
    pub path: PathBuf,
    pub test_cases: usize,
}

pub struct Generator {
    config: Config,
    template: String,
}

impl Generator {
    pub fn new(config: Config) -> Result<Self> {
        let template = emitter::load_template(config.template_path.as_deref())
            .context("Failed to load solution template")?;
        Ok(Self { config, template })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate from a full API problem record
    pub fn from_problem(&self, problem: &ProblemData, options: &GenerateOptions) -> Result<Generated> {
        let title = problem.display_title().to_string();
        if problem.is_paid_only {
            let id = problem.id().unwrap_or("?").to_string();
            return Err(LppError::PaidOnly { id, title }.into());
        }

        let id = problem
            .id()
            .ok_or_else(|| LppError::extraction("?", format!("'{}' has no problem id", title)))?
            .to_string();

        let signature = match &options.manual_signature {
            Some(sig) => sig.clone(),
            None => extract_cpp_signature(problem).ok_or_else(|| {
                LppError::extraction(&id, "no C++ signature in code snippets or metaData")
            })?,
        };

        let examples = extract_examples(problem.statement());
        debug!(problem_id = %id, examples = examples.len(), "Extracted examples");

        let request = SolutionRequest {
            id,
            title,
            signature,
            difficulty: problem.difficulty(),
            topics: problem.topics(),
            companies: Vec::new(),
            force: options.force,
        };
        self.generate(&request, &examples, problem.example_testcases.as_deref())
    }

    /// Generate from user-supplied details; the test body is the TODO block
    pub fn manual(&self, request: &SolutionRequest) -> Result<Generated> {
        self.generate(request, &[], None)
    }

    fn generate(
        &self,
        request: &SolutionRequest,
        examples: &[Example],
        example_testcases: Option<&str>,
    ) -> Result<Generated> {
        let sig = parse_signature(&request.signature)?;

        let cases = collect_cases(examples, example_testcases, &sig);
        let test_code = render_cases(&cases, &sig, &request.topics);

        let problems_dir = self.config.problems_dir();
        let filename = emitter::solution_filename(&request.id, &request.title);

        let existing = emitter::find_existing_solutions(&problems_dir, &request.id)?;
        if request.force {
            let mut removed = Vec::new();
            for old in &existing {
                fs::remove_file(old)
                    .with_context(|| format!("Failed to remove {}", old.display()))?;
                debug!(path = %old.display(), "Removed previous solution file");
                if let Some(name) = old.file_name() {
                    removed.push(name.to_string_lossy().into_owned());
                }
            }
            if let Err(e) = manifest::remove_from_manifest(&self.config.manifest_path(), &removed) {
                warn!(problem_id = %request.id, "Failed to prune include manifest: {}", e);
            }
        } else if let Some(first) = existing.into_iter().next() {
            return Err(LppError::AlreadyExists(first).into());
        }

        let ctx = SolutionContext {
            id: &request.id,
            title: &request.title,
            difficulty: request.difficulty,
            topics: &request.topics,
            companies: &request.companies,
            signature: &sig,
            test_cases: &test_code,
        };
        let content = emitter::render_solution(&self.template, &ctx);
        let path = emitter::emit(&problems_dir, &filename, &content, request.force)?;

        // The solution file is usable without the manifest entry
        if let Err(e) = manifest::update_manifest(&self.config.manifest_path(), &filename) {
            warn!(filename = %filename, "Failed to update include manifest: {}", e);
        }

        let mut store = MetadataStore::load(self.config.metadata_path())?;
        store.upsert(
            &request.id,
            ProblemRecord {
                id: request.id.clone(),
                title: request.title.clone(),
                signature: sig.to_signature_string(),
                difficulty: request.difficulty,
                topics: request.topics.iter().cloned().collect(),
                companies: request.companies.iter().cloned().collect(),
                created_at: Utc::now(),
                filename: filename.clone(),
            },
        )?;
        store.save()?;

        info!(problem_id = %request.id, filename = %filename, test_cases = cases.len(), "Generated solution");

        Ok(Generated {
            id: request.id.clone(),
            title: request.title.clone(),
            signature: sig.to_signature_string(),
            filename,
            path,
            test_cases: cases.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn new_generator(dir: &TempDir) -> Generator {
        Generator::new(Config::default().with_root(dir.path())).unwrap()
    }

    fn two_sum() -> ProblemData {
        serde_json::from_value(serde_json::json!({
            "questionFrontendId": "1",
            "title": "Two Sum",
            "titleSlug": "two-sum",
            "difficulty": "Easy",
            "topicTags": [{"name": "Array"}, {"name": "Hash Table"}],
            "content": "<pre><strong>Input:</strong> nums = [2,7,11,15], target = 9\n<strong>Output:</strong> [0,1]\n</pre><pre><strong>Input:</strong> nums = [3,2,4], target = 6\n<strong>Output:</strong> [1,2]\n</pre>",
            "exampleTestcases": "[2,7,11,15]\n9\n[3,2,4]\n6",
            "codeSnippets": [{"langSlug": "cpp", "code": "class Solution {\npublic:\n    vector<int> twoSum(vector<int>& nums, int target) {\n        \n    }\n};"}]
        }))
        .unwrap()
    }

    #[test]
    fn test_generate_from_problem() {
        let dir = TempDir::new().unwrap();
        let generator = new_generator(&dir);

        let out = generator.from_problem(&two_sum(), &GenerateOptions::default()).unwrap();
        assert_eq!(out.filename, "1_Two_Sum.h");
        assert_eq!(out.test_cases, 2);
        assert_eq!(out.signature, "std::vector<int> TwoSum(std::vector<int>& nums, int target)");

        let content = fs::read_to_string(&out.path).unwrap();
        assert!(content.contains("class Solution1"));
        assert!(content.contains("    std::vector<int> TwoSum(std::vector<int>& nums, int target)"));
        assert!(content.contains("    std::vector<int> nums2 = {3,2,4};"));
        assert!(content.contains("ASSERT_EQ(solution.TwoSum(nums1, target1), expected1);"));

        let manifest = fs::read_to_string(generator.config().manifest_path()).unwrap();
        assert!(manifest.contains("#include \"Problems/1_Two_Sum.h\""));

        let store = MetadataStore::load(generator.config().metadata_path()).unwrap();
        let record = store.get("1").unwrap();
        assert_eq!(record.filename, "1_Two_Sum.h");
        assert_eq!(record.difficulty, Difficulty::Easy);
        assert!(record.topics.contains("Hash Table"));
    }

    #[test]
    fn test_paid_only_is_rejected_before_generation() {
        let dir = TempDir::new().unwrap();
        let generator = new_generator(&dir);
        let mut problem = two_sum();
        problem.is_paid_only = true;

        let err = generator.from_problem(&problem, &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<LppError>(), Some(LppError::PaidOnly { .. })));
        assert!(!generator.config().problems_dir().exists());
        assert!(!generator.config().metadata_path().exists());
    }

    #[test]
    fn test_existing_solution_requires_force() {
        let dir = TempDir::new().unwrap();
        let generator = new_generator(&dir);
        generator.from_problem(&two_sum(), &GenerateOptions::default()).unwrap();

        let err = generator.from_problem(&two_sum(), &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<LppError>(), Some(LppError::AlreadyExists(_))));

        // A retitled problem replaces the old file under force
        let mut renamed = two_sum();
        renamed.title = Some("Two Sum II".to_string());
        let out = generator
            .from_problem(&renamed, &GenerateOptions { force: true, manual_signature: None })
            .unwrap();
        assert_eq!(out.filename, "1_Two_Sum_Ii.h");
        assert!(!generator.config().problems_dir().join("1_Two_Sum.h").exists());
        let manifest = fs::read_to_string(generator.config().manifest_path()).unwrap();
        assert!(manifest.contains("Problems/1_Two_Sum_Ii.h"));
        assert!(!manifest.contains("Problems/1_Two_Sum.h"));

        let store = MetadataStore::load(generator.config().metadata_path()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("1").unwrap().title, "Two Sum II");
    }

    #[test]
    fn test_missing_signature_and_manual_override() {
        let dir = TempDir::new().unwrap();
        let generator = new_generator(&dir);
        let mut problem = two_sum();
        problem.code_snippets.clear();

        let err = generator.from_problem(&problem, &GenerateOptions::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LppError>(),
            Some(LppError::ExtractionFailure { id, .. }) if id == "1"
        ));

        let options = GenerateOptions {
            force: false,
            manual_signature: Some("vector<int> twoSum(vector<int>& nums, int target)".to_string()),
        };
        assert_eq!(generator.from_problem(&problem, &options).unwrap().test_cases, 2);
    }

    #[test]
    fn test_manual_generation_has_todo_block() {
        let dir = TempDir::new().unwrap();
        let generator = new_generator(&dir);
        let request = SolutionRequest {
            id: "9".to_string(),
            title: "Palindrome Number".to_string(),
            signature: "bool isPalindrome(int x)".to_string(),
            difficulty: Difficulty::Easy,
            topics: vec!["Math".to_string()],
            companies: vec!["Amazon".to_string()],
            force: false,
        };

        let out = generator.manual(&request).unwrap();
        assert_eq!(out.test_cases, 0);
        let content = fs::read_to_string(&out.path).unwrap();
        assert!(content.contains("// TODO: Add test cases using ASSERT_EQ"));
        assert!(content.contains(" * Companies: Amazon"));

        let bad = SolutionRequest {
            signature: "isPalindrome".to_string(),
            ..request
        };
        let err = generator.manual(&bad).unwrap_err();
        assert!(matches!(err.downcast_ref::<LppError>(), Some(LppError::MalformedSignature(_))));
    }
}
