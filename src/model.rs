//! Data model for the Todo Manager API
//!
//! Mirrors the wire format of the backend: camelCase field names, SCREAMING
//! enum variants, and ISO-8601 absolute timestamps. `expiryDate` is either an
//! absolute timestamp or literal `null`, never an empty string.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Priority of a todo item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// All priorities, in form-population order
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Wire representation of the priority
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    /// Parse the wire representation, rejecting unknown values
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            other => Err(Error::validation(format!("unknown priority: {other}"))),
        }
    }
}

/// Category of a todo item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Personal,
    Study,
    #[default]
    Other,
    Work,
    Health,
    Home,
}

impl Category {
    /// All categories, in form-population order
    pub const ALL: [Category; 6] = [
        Category::Personal,
        Category::Study,
        Category::Other,
        Category::Work,
        Category::Health,
        Category::Home,
    ];

    /// Wire representation of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Personal => "PERSONAL",
            Category::Study => "STUDY",
            Category::Other => "OTHER",
            Category::Work => "WORK",
            Category::Health => "HEALTH",
            Category::Home => "HOME",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse the wire representation, rejecting unknown values
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PERSONAL" => Ok(Category::Personal),
            "STUDY" => Ok(Category::Study),
            "OTHER" => Ok(Category::Other),
            "WORK" => Ok(Category::Work),
            "HEALTH" => Ok(Category::Health),
            "HOME" => Ok(Category::Home),
            other => Err(Error::validation(format!("unknown category: {other}"))),
        }
    }
}

/// Server-assigned identifier of a todo item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wrap a raw identifier, e.g. one decoded from a server response
    pub const fn new(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task record with scheduling and classification metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: Category,
    /// Absolute expiry timestamp, or `null` when the item never expires
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Display status of an item, derived from its state at render time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// Marked completed on the server
    Completed,
    /// Past its expiry date and still incomplete
    Expired,
    /// Neither completed nor expired
    Pending,
}

impl TodoItem {
    /// Whether the item is past its expiry date at `now`
    ///
    /// Items without an expiry date never expire. The comparison is strict,
    /// matching the server's own expired-task accounting.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expiry_date {
            Some(expiry) => expiry < now,
            None => false,
        }
    }

    /// Derived display status at `now`; carries no state transition
    pub fn display_status(&self, now: DateTime<Utc>) -> ItemStatus {
        if self.is_completed {
            ItemStatus::Completed
        } else if self.is_expired(now) {
            ItemStatus::Expired
        } else {
            ItemStatus::Pending
        }
    }
}

/// A todo item being drafted locally, before the server assigns it an id
///
/// The form captures the expiry as a plain calendar date; serialization
/// converts it to the canonical absolute-timestamp form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: Category,
    pub expiry_date: Option<NaiveDate>,
}

impl TodoDraft {
    /// Reject drafts whose title is blank; checked before any request
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::validation("title must not be blank"));
        }
        Ok(())
    }

    /// Wire payload for `POST /addTodo`
    pub fn to_payload(&self) -> DraftPayload {
        DraftPayload {
            title: self.title.clone(),
            description: optional_text(&self.description),
            priority: self.priority,
            category: self.category,
            expiry_date: self.expiry_date.map(midnight_utc),
        }
    }
}

/// JSON body sent when creating a todo
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPayload {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub category: Category,
    /// Serialized as an ISO-8601 timestamp, or `null` when unset
    pub expiry_date: Option<DateTime<Utc>>,
}

/// Server-computed aggregate counts over the todo collection
///
/// Fetched independently of the collection and never derived locally; the
/// server is the source of truth for these counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_tasks: u64,
    pub completed_tasks: u64,
    pub pending_tasks: u64,
    pub expired_tasks: u64,
}

/// Convert a calendar date to its canonical absolute timestamp (midnight UTC)
pub fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Render a timestamp as a plain date for display
pub fn display_date(timestamp: DateTime<Utc>) -> String {
    timestamp.date_naive().format("%Y-%m-%d").to_string()
}

fn optional_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
