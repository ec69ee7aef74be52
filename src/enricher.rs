use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{DemandError, Result};
use crate::models::{BranchMeta, ClientTotal, EnrichedRow, MobileContact};

/// How a left join treats a lookup table that repeats a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateKeyPolicy {
    /// Emit one joined row per matching lookup row.
    #[default]
    FanOut,
    /// Join against the first lookup row for each key.
    FirstMatch,
    /// Fail the run.
    Reject,
}

impl DuplicateKeyPolicy {
    pub fn key(&self) -> &'static str {
        match self {
            Self::FanOut => "fan-out",
            Self::FirstMatch => "first-match",
            Self::Reject => "reject",
        }
    }
}

/// Key → values, in lookup-table order.
struct Lookup<V> {
    entries: HashMap<String, Vec<V>>,
}

impl<V: Clone> Lookup<V> {
    fn build(
        table: &str,
        rows: impl IntoIterator<Item = (String, V)>,
        policy: DuplicateKeyPolicy,
    ) -> Result<Self> {
        let mut entries: HashMap<String, Vec<V>> = HashMap::new();
        let mut duplicates: Vec<String> = Vec::new();
        let mut reported: HashSet<String> = HashSet::new();
        for (key, value) in rows {
            let key = key.trim().to_string();
            let values = entries.entry(key.clone()).or_default();
            if !values.is_empty() && reported.insert(key.clone()) {
                duplicates.push(key);
            }
            if values.is_empty() || policy == DuplicateKeyPolicy::FanOut {
                values.push(value);
            }
        }

        if !duplicates.is_empty() {
            match policy {
                DuplicateKeyPolicy::Reject => {
                    return Err(DemandError::DuplicateKey {
                        table: table.to_string(),
                        keys: duplicates,
                    });
                }
                DuplicateKeyPolicy::FanOut => tracing::warn!(
                    table,
                    keys = ?duplicates,
                    "duplicate join keys; matching rows will be repeated"
                ),
                DuplicateKeyPolicy::FirstMatch => tracing::info!(
                    table,
                    keys = ?duplicates,
                    "duplicate join keys; using first match"
                ),
            }
        }
        Ok(Self { entries })
    }

    /// Matches for a key, or a single `None` when there is none (left join).
    fn matches(&self, key: &str) -> Vec<Option<V>> {
        match self.entries.get(key.trim()) {
            Some(values) => values.iter().cloned().map(Some).collect(),
            None => vec![None],
        }
    }
}

/// Left-joins branch language by BranchID and mobile number by ClientID.
/// Lookups are indexed once and reused for both product lines.
pub struct Enricher {
    langs: Lookup<Option<String>>,
    mobiles: Lookup<Option<i64>>,
}

impl Enricher {
    pub fn new(
        branches: &[BranchMeta],
        contacts: &[MobileContact],
        policy: DuplicateKeyPolicy,
    ) -> Result<Self> {
        let langs = Lookup::build(
            "branch",
            branches
                .iter()
                .map(|b| (b.branch_id.clone(), b.lang.clone())),
            policy,
        )?;
        let mobiles = Lookup::build(
            "mobile",
            contacts.iter().map(|c| (c.client_id.clone(), c.mobile)),
            policy,
        )?;
        Ok(Self { langs, mobiles })
    }

    pub fn enrich(&self, totals: Vec<ClientTotal>) -> Vec<EnrichedRow> {
        let mut rows = Vec::with_capacity(totals.len());
        for total in totals {
            let lang_matches = self.langs.matches(&total.record.branch_id);
            let mobile_matches = self.mobiles.matches(&total.record.client_id);
            for lang in &lang_matches {
                for mobile in &mobile_matches {
                    rows.push(EnrichedRow {
                        total: total.clone(),
                        lang: lang.clone().flatten(),
                        mobile: mobile.flatten(),
                    });
                }
            }
        }
        rows
    }
}
