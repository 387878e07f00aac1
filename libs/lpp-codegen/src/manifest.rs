// Aggregate include header (`AllProblems.h`)
//
// The header is always re-rendered in full from the set of solution filenames,
// sorted by leading problem id, so updates are idempotent.

use handlebars::Handlebars;
use lazy_static::lazy_static;
use lpp_common::error::{LppError, LppResult};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const MANIFEST_TEMPLATE: &str = include_str!("../templates/all_problems.h.hbs");

lazy_static! {
    static ref INCLUDE_LINE: Regex = Regex::new(r#"^\s*#include\s+"Problems/([^"]+)""#).unwrap();
}

/// Ordering key: numeric id prefix first, then the full name
fn sort_key(filename: &str) -> (u64, String) {
    let id = filename
        .split('_')
        .next()
        .and_then(|prefix| prefix.parse::<u64>().ok())
        .unwrap_or(u64::MAX);
    (id, filename.to_string())
}

fn read_includes(path: &Path) -> LppResult<BTreeSet<(u64, String)>> {
    if !path.exists() {
        return Ok(BTreeSet::new());
    }
    let content = fs::read_to_string(path).map_err(|e| LppError::io(path, e))?;
    Ok(content
        .lines()
        .filter_map(|line| INCLUDE_LINE.captures(line))
        .map(|caps| sort_key(&caps[1]))
        .collect())
}

pub fn render_manifest<'a>(filenames: impl IntoIterator<Item = &'a str>) -> LppResult<String> {
    let sorted: BTreeSet<(u64, String)> = filenames.into_iter().map(sort_key).collect();
    let includes: Vec<String> = sorted.into_iter().map(|(_, name)| name).collect();

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(handlebars::no_escape);

    let mut data = HashMap::new();
    data.insert("includes", includes);

    handlebars
        .render_template(MANIFEST_TEMPLATE, &data)
        .map_err(|e| LppError::Template(e.to_string()))
}

fn write_manifest(path: &Path, entries: &BTreeSet<(u64, String)>) -> LppResult<()> {
    let content = render_manifest(entries.iter().map(|(_, name)| name.as_str()))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| LppError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| LppError::io(path, e))
}

/// Add `filename` to the manifest. Returns false when it was already listed.
pub fn update_manifest(path: &Path, filename: &str) -> LppResult<bool> {
    let mut entries = read_includes(path)?;
    let added = entries.insert(sort_key(filename));

    if !added {
        debug!(filename = %filename, "Already listed in manifest");
        return Ok(false);
    }

    write_manifest(path, &entries)?;
    info!(filename = %filename, total = entries.len(), "Manifest updated");
    Ok(true)
}

/// Drop entries for solution files that no longer exist. Returns how many were removed.
pub fn remove_from_manifest(path: &Path, filenames: &[String]) -> LppResult<usize> {
    if filenames.is_empty() || !path.exists() {
        return Ok(0);
    }

    let mut entries = read_includes(path)?;
    let before = entries.len();
    entries.retain(|(_, name)| !filenames.contains(name));
    let removed = before - entries.len();

    if removed > 0 {
        write_manifest(path, &entries)?;
        debug!(removed, "Pruned manifest entries");
    }
    Ok(removed)
}

/// Rebuild the manifest from the solution headers in `problems_dir`
pub fn regenerate_manifest(path: &Path, problems_dir: &Path) -> LppResult<usize> {
    let manifest_name = path.file_name();
    let mut entries = BTreeSet::new();

    if problems_dir.exists() {
        for entry in fs::read_dir(problems_dir).map_err(|e| LppError::io(problems_dir, e))? {
            let entry = entry.map_err(|e| LppError::io(problems_dir, e))?;
            let file_path = entry.path();
            if !file_path.is_file() || file_path.extension().and_then(|e| e.to_str()) != Some("h") {
                continue;
            }
            if file_path.file_name() == manifest_name {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.insert(sort_key(&name));
        }
    }

    write_manifest(path, &entries)?;
    info!(path = %path.display(), total = entries.len(), "Manifest regenerated");
    Ok(entries.len())
}
