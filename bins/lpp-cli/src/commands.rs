// CLI commands for generating and tracking solutions
use crate::batch::{run_batch, ItemOutcome};
use crate::fetcher::{ApiClient, ProblemQuery};
use crate::pipeline::{GenerateOptions, Generated, Generator, SolutionRequest};
use anyhow::{bail, Context, Result};
use lpp_codegen::manifest;
use lpp_common::config::Config;
use lpp_common::error::LppError;
use lpp_common::metadata::{parse_id, Catalog, MetadataStore};
use lpp_common::types::{CatalogEntry, Difficulty, ProblemData};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// What `fetch` should look up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Daily,
    Number(u64),
    Slug(String),
}

impl Identifier {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("daily") {
            Identifier::Daily
        } else if let Some(id) = parse_id(raw) {
            Identifier::Number(id)
        } else {
            Identifier::Slug(raw.to_lowercase())
        }
    }
}

fn connect(config: &Config) -> Result<ApiClient> {
    let client = ApiClient::new(&config.api_url, config.api_timeout);
    if !client.is_available() {
        bail!(
            "Problem API is not reachable at {} (set LPP_API_URL or pass --api-url)",
            client.base_url()
        );
    }
    Ok(client)
}

fn print_generated(out: &Generated) {
    println!("✅ Created {}. {}", out.id, out.title);
    println!("   File:       {}", out.path.display());
    println!("   Signature:  {}", out.signature);
    println!("   Test cases: {}", out.test_cases);
}

/// Print the follow-up hint for errors the user can act on
fn print_hint(err: &anyhow::Error, command: &str) {
    let Some(err) = err.downcast_ref::<LppError>().filter(|e| e.is_recoverable()) else {
        return;
    };
    match err {
        LppError::MalformedSignature(sig) => {
            println!("⚠️  Could not parse signature {:?}", sig);
            println!("💡 Expected \"<return type> <name>(<params>)\", e.g. \"int climbStairs(int n)\"");
        }
        LppError::AlreadyExists(path) => {
            println!("⚠️  {} already exists", path.display());
            println!("💡 Re-run with --force to overwrite: lpp {} --force", command);
        }
        LppError::ExtractionFailure { id, .. } => {
            println!("⚠️  Could not extract a C++ signature for problem {}", id);
            println!(
                "💡 Provide one manually: lpp {} --signature \"<return type> <name>(<params>)\"",
                command
            );
        }
        LppError::PaidOnly { id, title } => {
            println!("🔒 Problem {} ({}) is paid-only and cannot be generated", id, title);
        }
        _ => {}
    }
}

/// Fetch one problem (by number, slug, or `daily`) and generate its solution
pub fn fetch(config: &Config, identifier: &str, force: bool, signature: Option<String>) -> Result<()> {
    let client = connect(config)?;
    let generator = Generator::new(config.clone())?;

    let problem = match Identifier::parse(identifier) {
        Identifier::Daily => {
            println!("📅 Fetching today's daily challenge...");
            client.fetch_daily()?
        }
        Identifier::Number(id) => {
            let catalog = Catalog::load(config.catalog_path())?;
            let entry = catalog.get(&id.to_string()).with_context(|| {
                format!(
                    "Problem {} not found in {} (run `lpp update`, or it may be paid-only)",
                    id,
                    catalog.path().display()
                )
            })?;
            println!("🔍 Fetching problem {}: {}...", id, entry.title);
            client.fetch_problem(&entry.slug())?
        }
        Identifier::Slug(slug) => {
            println!("🔍 Fetching problem '{}'...", slug);
            client.fetch_problem(&slug)?
        }
    };

    println!(
        "📝 Generating {}. {} [{}]",
        problem.id().unwrap_or("?"),
        problem.display_title(),
        problem.difficulty()
    );

    let options = GenerateOptions {
        force,
        manual_signature: signature,
    };
    match generator.from_problem(&problem, &options) {
        Ok(out) => {
            print_generated(&out);
            Ok(())
        }
        Err(e) => {
            print_hint(&e, &format!("fetch {}", identifier));
            Err(e)
        }
    }
}

/// Generate solutions for a page of the problem list
pub fn batch(
    config: &Config,
    limit: usize,
    skip: usize,
    difficulty: Option<Difficulty>,
    tags: Vec<String>,
    force: bool,
) -> Result<()> {
    let client = connect(config)?;
    let generator = Generator::new(config.clone())?;

    let query = ProblemQuery {
        limit,
        skip,
        difficulty,
        tags,
    };
    let listing = client.fetch_problems(&query)?;
    let (paid, free): (Vec<ProblemData>, Vec<ProblemData>) =
        listing.into_iter().partition(|p| p.is_paid_only);

    println!(
        "📦 Batch: {} problem(s) to generate, {} paid-only skipped",
        free.len(),
        paid.len()
    );
    if free.is_empty() {
        println!("No problems matched the query.");
        return Ok(());
    }

    let options = GenerateOptions {
        force,
        manual_signature: None,
    };
    let report = run_batch(
        free,
        config.batch_delay,
        |p| format!("{}. {}", p.id().unwrap_or("?"), p.display_title()),
        |p| {
            let slug = p
                .title_slug
                .as_deref()
                .with_context(|| format!("'{}' has no title slug", p.display_title()))?;
            let full = client.fetch_problem(slug)?;
            generator.from_problem(&full, &options)
        },
    );

    println!("\n📊 Batch complete: {} succeeded, {} failed", report.succeeded(), report.failed());
    for outcome in &report.outcomes {
        match outcome {
            ItemOutcome::Succeeded { value, .. } => {
                println!("  ✅ {} ({} test case(s))", value.filename, value.test_cases);
            }
            ItemOutcome::Failed { label, error } => println!("  ❌ {}: {}", label, error),
        }
    }
    if report.failures().any(|(_, e)| e.contains("already exists")) {
        println!("\n💡 Re-run with --force to overwrite existing solutions");
    }
    Ok(())
}

/// Generate a solution from details supplied on the command line
pub fn new_problem(config: &Config, request: SolutionRequest) -> Result<()> {
    let generator = Generator::new(config.clone())?;
    println!("📝 Creating problem {}. {} [{}]", request.id, request.title, request.difficulty);

    match generator.manual(&request) {
        Ok(out) => {
            print_generated(&out);
            println!("\n📋 Next steps:");
            println!("  1. Add test cases to {}", out.filename);
            println!("  2. Implement {}", out.signature);
            Ok(())
        }
        Err(e) => {
            let command = format!(
                "new {} --title \"{}\" --signature \"{}\"",
                request.id, request.title, request.signature
            );
            print_hint(&e, &command);
            Err(e)
        }
    }
}

/// Random catalog entry, optionally restricted to one difficulty
pub fn pick_random<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    difficulty: Option<Difficulty>,
    rng: &mut R,
) -> Option<(u64, &'a CatalogEntry)> {
    let candidates: Vec<(u64, &CatalogEntry)> = catalog
        .iter()
        .filter(|(_, entry)| difficulty.map_or(true, |d| entry.difficulty == d))
        .collect();
    candidates.choose(rng).copied()
}

/// Fetch a random problem from the catalog
pub fn random(config: &Config, difficulty: Option<Difficulty>, force: bool) -> Result<()> {
    let catalog = Catalog::load(config.catalog_path())?;
    if catalog.is_empty() {
        bail!("Problem catalog is empty (run `lpp update` first)");
    }

    let (id, entry) = match pick_random(&catalog, difficulty, &mut rand::thread_rng()) {
        Some(pick) => pick,
        None => bail!(
            "No {} problems in the catalog",
            difficulty.map(|d| d.as_str()).unwrap_or("free")
        ),
    };
    println!("🎲 Picked {}. {} [{}]", id, entry.title, entry.difficulty);

    fetch(config, &id.to_string(), force, None)
}

/// Filters for `list`
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub difficulty: Option<Difficulty>,
    pub topic: Option<String>,
    pub limit: Option<usize>,
}

impl ListFilter {
    fn matches<'a>(&self, difficulty: Difficulty, mut topics: impl Iterator<Item = &'a String>) -> bool {
        if self.difficulty.is_some_and(|d| d != difficulty) {
            return false;
        }
        match &self.topic {
            Some(topic) => {
                let topic = topic.to_lowercase();
                topics.any(|t| t.to_lowercase().contains(&topic))
            }
            None => true,
        }
    }
}

pub fn list(config: &Config, filter: &ListFilter, generated: bool) -> Result<()> {
    let limit = filter.limit.unwrap_or(usize::MAX);
    let mut shown = 0;

    if generated {
        let store = MetadataStore::load(config.metadata_path())?;
        if store.is_empty() {
            println!("No solutions generated yet.");
            println!("\n💡 Generate one with: lpp fetch <number>");
            return Ok(());
        }

        println!("📋 Generated Solutions:\n");
        println!("{:<6} {:<45} {:<8} {}", "ID", "TITLE", "LEVEL", "FILE");
        println!("{}", "─".repeat(100));
        for (id, record) in store.iter() {
            if shown >= limit {
                break;
            }
            if !filter.matches(record.difficulty, record.topics.iter()) {
                continue;
            }
            println!("{:<6} {:<45} {:<8} {}", id, record.title, record.difficulty, record.filename);
            shown += 1;
        }
        println!("\n✅ Showing {} of {} solution(s)", shown, store.len());
        return Ok(());
    }

    let catalog = Catalog::load(config.catalog_path())?;
    if catalog.is_empty() {
        println!("Problem catalog is empty.");
        println!("\n💡 Download it with: lpp update");
        return Ok(());
    }

    println!("📋 Problems:\n");
    println!("{:<6} {:<55} {:<8} {:>7}", "ID", "TITLE", "LEVEL", "AC RATE");
    println!("{}", "─".repeat(80));
    for (id, entry) in catalog.iter() {
        if shown >= limit {
            break;
        }
        if !filter.matches(entry.difficulty, entry.topic_tags.iter()) {
            continue;
        }
        let ac_rate = entry
            .ac_rate
            .map(|r| format!("{:.1}%", r))
            .unwrap_or_else(|| "-".to_string());
        println!("{:<6} {:<55} {:<8} {:>7}", id, entry.title, entry.difficulty, ac_rate);
        shown += 1;
    }
    println!("\n✅ Showing {} of {} problem(s)", shown, catalog.len());
    Ok(())
}

/// Catalog contents plus what was left out of it
#[derive(Debug, Default)]
pub struct CatalogBuild {
    pub entries: BTreeMap<u64, CatalogEntry>,
    pub skipped_paid: usize,
    pub skipped_invalid: usize,
}

impl CatalogBuild {
    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.entries.values().filter(|e| e.difficulty == difficulty).count()
    }
}

/// Free problems keyed by numeric frontend id; a later duplicate id wins
pub fn build_catalog(problems: &[ProblemData]) -> CatalogBuild {
    let mut build = CatalogBuild::default();
    for problem in problems {
        if problem.is_paid_only {
            build.skipped_paid += 1;
            continue;
        }
        match CatalogEntry::from_problem(problem).and_then(|e| parse_id(&e.id).map(|id| (id, e))) {
            Some((0, _)) | None => {
                debug!(title = %problem.display_title(), "Skipping listing record without id");
                build.skipped_invalid += 1;
            }
            Some((id, entry)) => {
                build.entries.insert(id, entry);
            }
        }
    }
    build
}

/// Download the full problem list and rewrite the catalog
pub fn update(config: &Config) -> Result<()> {
    let client = connect(config)?;

    println!("🔄 Fetching problem list from {}...", client.base_url());
    let problems = client.fetch_all_problems(config.batch_limit)?;
    if problems.is_empty() {
        bail!("The problem API returned no problems");
    }

    let build = build_catalog(&problems);
    println!("  Processed: {} problems", problems.len());
    println!("  Skipped:   {} paid-only problems", build.skipped_paid);
    if build.skipped_invalid > 0 {
        println!("  Skipped:   {} records without an id", build.skipped_invalid);
    }

    let mut catalog = Catalog::load(config.catalog_path())?;
    let previous = catalog.len();
    let total = build.entries.len();
    let counts: Vec<(Difficulty, usize)> = Difficulty::ALL.iter().map(|d| (*d, build.count(*d))).collect();

    catalog.replace_all(build.entries);
    catalog.save()?;
    println!("💾 Saved {}", catalog.path().display());

    println!("\n📊 Statistics:");
    for (difficulty, count) in counts {
        println!("  {:<7} {:>5}", difficulty, count);
    }
    println!("  {:<7} {:>5} (free problems only, previously {})", "Total", total, previous);
    Ok(())
}

/// Show where things live and how much has been generated
pub fn status(config: &Config) -> Result<()> {
    println!("📊 LeetPlusPlus status\n");
    println!("  Root:      {}", config.root.display());

    let client = ApiClient::new(&config.api_url, config.api_timeout);
    if client.is_available() {
        println!("  API:       ✅ {}", client.base_url());
    } else {
        println!("  API:       ❌ {} (not reachable)", client.base_url());
    }

    match Catalog::load(config.catalog_path()) {
        Ok(catalog) if catalog.is_empty() => println!("  Catalog:   empty (run `lpp update`)"),
        Ok(catalog) => println!("  Catalog:   {} problems", catalog.len()),
        Err(e) => {
            warn!("Failed to read catalog: {}", e);
            println!("  Catalog:   ❌ unreadable");
        }
    }

    let store = MetadataStore::load(config.metadata_path())?;
    println!("  Generated: {} solution(s)", store.len());
    for difficulty in Difficulty::ALL {
        let count = store.values().filter(|r| r.difficulty == difficulty).count();
        println!("    {:<7} {:>4}", difficulty, count);
    }

    let manifest_path = config.manifest_path();
    if manifest_path.exists() {
        println!("  Manifest:  {}", manifest_path.display());
    } else {
        println!("  Manifest:  missing (run `lpp regenerate`)");
    }
    Ok(())
}

/// Rebuild the include manifest from the solution files on disk
pub fn regenerate(config: &Config) -> Result<()> {
    let problems_dir = config.problems_dir();
    println!("🔧 Rebuilding include manifest from {}...", problems_dir.display());

    let count = manifest::regenerate_manifest(&config.manifest_path(), &problems_dir)?;
    println!("✅ {} lists {} solution(s)", config.manifest_path().display(), count);
    Ok(())
}
