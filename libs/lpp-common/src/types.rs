use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Lenient conversion for API payloads; unknown values fall back to Medium
    pub fn from_api(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}' (expected Easy, Medium or Hard)", other)),
        }
    }
}

/// A generated solution, persisted in `metadata.json` keyed by its numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemRecord {
    /// Filled from the store key on load
    #[serde(skip)]
    pub id: String,
    pub title: String,
    pub signature: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub topics: BTreeSet<String>,
    #[serde(default)]
    pub companies: BTreeSet<String>,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    pub filename: String,
}

/// One free problem of the upstream catalog, persisted in `problems.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(skip)]
    pub id: String,
    pub title_slug: String,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub topic_tags: Vec<String>,
    #[serde(default)]
    pub ac_rate: Option<f64>,
}

impl CatalogEntry {
    /// Build a catalog entry from a listing record. Paid-only records and
    /// records without a usable id are rejected.
    pub fn from_problem(problem: &ProblemData) -> Option<Self> {
        if problem.is_paid_only {
            return None;
        }
        let id = problem.id()?;
        Some(Self {
            id: id.to_string(),
            title_slug: problem.title_slug.clone().unwrap_or_default(),
            title: problem.display_title().to_string(),
            difficulty: problem.difficulty(),
            topic_tags: problem.topics(),
            ac_rate: problem.ac_rate,
        })
    }

    /// Slug for the problem API; derived from the title when the listing had none
    pub fn slug(&self) -> String {
        if self.title_slug.is_empty() {
            self.title.to_lowercase().replace(' ', "-")
        } else {
            self.title_slug.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicTag {
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeSnippet {
    pub lang: Option<String>,
    pub lang_slug: String,
    pub code: String,
}

/// Problem record as returned by the problem API.
///
/// The API is not consistent about field names across endpoints (`/select`,
/// `/daily`, `/problems`), so alternates are kept side by side and resolved by
/// the accessor methods.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProblemData {
    #[serde(deserialize_with = "de_opt_id")]
    pub question_frontend_id: Option<String>,
    #[serde(deserialize_with = "de_opt_id")]
    pub question_id: Option<String>,
    pub title: Option<String>,
    pub question_title: Option<String>,
    pub title_slug: Option<String>,
    pub difficulty: Option<String>,
    #[serde(deserialize_with = "de_null_default")]
    pub topic_tags: Vec<TopicTag>,
    #[serde(deserialize_with = "de_null_default")]
    pub is_paid_only: bool,
    #[serde(deserialize_with = "de_null_default")]
    pub code_snippets: Vec<CodeSnippet>,
    pub content: Option<String>,
    pub question: Option<String>,
    pub question_content: Option<String>,
    pub example_testcases: Option<String>,
    pub meta_data: Option<String>,
    pub ac_rate: Option<f64>,
}

impl ProblemData {
    /// Frontend id, falling back to the internal question id
    pub fn id(&self) -> Option<&str> {
        [&self.question_frontend_id, &self.question_id]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .map(str::trim)
            .find(|v| !v.is_empty() && *v != "0")
    }

    pub fn display_title(&self) -> &str {
        non_empty(&self.title)
            .or_else(|| non_empty(&self.question_title))
            .unwrap_or("Unknown Problem")
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_api(self.difficulty.as_deref())
    }

    pub fn topics(&self) -> Vec<String> {
        self.topic_tags
            .iter()
            .map(|t| t.name.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Statement HTML from whichever field the endpoint populated
    pub fn statement(&self) -> &str {
        non_empty(&self.content)
            .or_else(|| non_empty(&self.question))
            .or_else(|| non_empty(&self.question_content))
            .unwrap_or("")
    }

    pub fn cpp_snippet(&self) -> Option<&str> {
        self.code_snippets
            .iter()
            .find(|s| s.lang_slug == "cpp")
            .map(|s| s.code.as_str())
            .filter(|code| !code.trim().is_empty())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Ids arrive as strings from some endpoints and as numbers from others
fn de_opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn de_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
