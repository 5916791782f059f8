//! Copilot metrics API record types

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Deserialize a list that the API may omit or send as `null` on idle days
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One day of Copilot usage for an account (the `date` field lives in the key)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageRecord {
    pub total_active_users: u64,
    pub total_engaged_users: u64,
    #[serde(default)]
    pub copilot_ide_code_completions: Option<IdeCodeCompletions>,
}

impl UsageRecord {
    /// Editors under the code-completion section (empty when absent)
    pub fn completion_editors(&self) -> &[EditorCompletions] {
        self.copilot_ide_code_completions
            .as_ref()
            .map(|c| c.editors.as_slice())
            .unwrap_or(&[])
    }

    /// Languages under the code-completion section (empty when absent)
    pub fn completion_languages(&self) -> &[LanguageEngagement] {
        self.copilot_ide_code_completions
            .as_ref()
            .map(|c| c.languages.as_slice())
            .unwrap_or(&[])
    }
}

/// `copilot_ide_code_completions` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct IdeCodeCompletions {
    #[serde(default)]
    pub total_engaged_users: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub languages: Vec<LanguageEngagement>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub editors: Vec<EditorCompletions>,
}

/// Engaged users for one language, across all editors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageEngagement {
    pub name: String,
    pub total_engaged_users: u64,
}

/// Code completions for one IDE
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorCompletions {
    pub name: String,
    pub total_engaged_users: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub models: Vec<ModelCompletions>,
}

/// Code completions served by one model inside an editor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelCompletions {
    pub name: String,
    #[serde(default)]
    pub is_custom_model: bool,
    #[serde(default)]
    pub total_engaged_users: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub languages: Vec<LanguageCompletions>,
}

/// Suggestion and acceptance counters for one language under a model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageCompletions {
    pub name: String,
    #[serde(default)]
    pub total_engaged_users: u64,
    pub total_code_suggestions: u64,
    pub total_code_acceptances: u64,
    pub total_code_lines_suggested: u64,
    pub total_code_lines_accepted: u64,
}

/// Usage records keyed by date, in API response order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsByDate {
    entries: Vec<(NaiveDate, UsageRecord)>,
    index: HashMap<NaiveDate, usize>,
}

impl MetricsByDate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. A repeated date replaces the earlier record in place.
    pub fn insert(&mut self, date: NaiveDate, record: UsageRecord) {
        match self.index.get(&date) {
            Some(&pos) => self.entries[pos].1 = record,
            None => {
                self.index.insert(date, self.entries.len());
                self.entries.push((date, record));
            }
        }
    }

    pub fn get(&self, date: &NaiveDate) -> Option<&UsageRecord> {
        self.index.get(date).map(|&pos| &self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.iter().map(|(date, _)| *date)
    }

    pub fn records(&self) -> impl Iterator<Item = &UsageRecord> {
        self.entries.iter().map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &UsageRecord)> {
        self.entries.iter().map(|(date, record)| (*date, record))
    }
}
