/// Sequential batch runner
///
/// **Guarantees:**
/// - Items are processed strictly one at a time, in input order
/// - A fixed delay separates consecutive items (none before the first or after the last)
/// - A failing item is logged and recorded; the batch always runs to completion
/// - The report lists outcomes in input order
use std::thread;
use std::time::Duration;
use tracing::{error, info};

#[derive(Debug)]
pub enum ItemOutcome<T> {
    Succeeded { label: String, value: T },
    Failed { label: String, error: String },
}

impl<T> ItemOutcome<T> {
    pub fn label(&self) -> &str {
        match self {
            ItemOutcome::Succeeded { label, .. } | ItemOutcome::Failed { label, .. } => label,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Succeeded { .. })
    }
}

#[derive(Debug)]
pub struct BatchReport<T> {
    pub outcomes: Vec<ItemOutcome<T>>,
}

impl<T> BatchReport<T> {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            ItemOutcome::Failed { label, error } => Some((label.as_str(), error.as_str())),
            ItemOutcome::Succeeded { .. } => None,
        })
    }
}

pub fn run_batch<I, T, L, F>(items: Vec<I>, delay: Duration, label_of: L, mut process: F) -> BatchReport<T>
where
    L: Fn(&I) -> String,
    F: FnMut(&I) -> anyhow::Result<T>,
{
    let total = items.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, item) in items.iter().enumerate() {
        if index > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }

        let label = label_of(item);
        info!(item = index + 1, total, label = %label, "Processing batch item");

        match process(item) {
            Ok(value) => outcomes.push(ItemOutcome::Succeeded { label, value }),
            Err(e) => {
                error!(label = %label, "Batch item failed: {:#}", e);
                outcomes.push(ItemOutcome::Failed {
                    label,
                    error: format!("{:#}", e),
                });
            }
        }
    }

    BatchReport { outcomes }
}
