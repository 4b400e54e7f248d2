//! Immutable log record types.
//!
//! Each type pairs a REST collection with a topic on the logs push namespace;
//! the live views fetch once and then follow `<topic>:created|updated|deleted`.

#[cfg(test)]
#[path = "logs_test.rs"]
mod logs_test;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RecordId;
use crate::resource::{LogRecord, Row, format_timestamp, or_dash};

choice_enum! {
    ClientAction {
        Create => "create", "Create";
        Update => "update", "Update";
        Delete => "delete", "Delete";
        Login => "login", "Login";
        Logout => "logout", "Logout";
        Other => "other", "Other";
    }
}

choice_enum! {
    TransactionStatus {
        Pending => "pending", "Pending";
        Processing => "processing", "Processing";
        Completed => "completed", "Completed";
        Failed => "failed", "Failed";
    }
}

choice_enum! {
    LogLevel {
        Debug => "debug", "Debug";
        Info => "info", "Info";
        Warn => "warn", "Warning";
        Error => "error", "Error";
    }
}

choice_enum! {
    BillingOutcome {
        Charged => "charged", "Charged";
        Refunded => "refunded", "Refunded";
        Rejected => "rejected", "Rejected";
    }
}

/// Action performed by a user of the admin client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientLog {
    pub id: RecordId,
    pub action: ClientAction,
    #[serde(default)]
    pub entity: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Row for ClientLog {
    fn columns() -> &'static [&'static str] {
        &["Time", "Action", "Entity", "User", "Message"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_timestamp(&self.created_at),
            self.action.label().to_owned(),
            self.entity.clone(),
            or_dash(self.user.as_deref()),
            self.message.clone(),
        ]
    }

    fn category(&self) -> Option<&'static str> {
        Some(self.action.as_str())
    }

    fn filter_options() -> &'static [(&'static str, &'static str)] {
        ClientAction::OPTIONS
    }
}

impl LogRecord for ClientLog {
    const ENDPOINT: &'static str = "/api/client-log";
    const TOPIC: &'static str = "client_log";
    const TITLE: &'static str = "Client log";

    fn id(&self) -> RecordId {
        self.id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// One remote-processing request as it moves through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTransactionLog {
    pub id: RecordId,
    pub initiator_key: String,
    #[serde(default)]
    pub app_instance_id: Option<RecordId>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub message: String,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Row for RemoteTransactionLog {
    fn columns() -> &'static [&'static str] {
        &["Time", "Initiator", "Instance", "Status", "Message"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_timestamp(&self.created_at),
            self.initiator_key.clone(),
            or_dash(self.app_instance_id),
            self.status.label().to_owned(),
            self.message.clone(),
        ]
    }

    fn category(&self) -> Option<&'static str> {
        Some(self.status.as_str())
    }

    fn filter_options() -> &'static [(&'static str, &'static str)] {
        TransactionStatus::OPTIONS
    }
}

impl LogRecord for RemoteTransactionLog {
    const ENDPOINT: &'static str = "/api/remote-transactions";
    const TOPIC: &'static str = "transaction_log";
    const TITLE: &'static str = "Remote transactions";

    fn id(&self) -> RecordId {
        self.id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Distinct initiator keys seen in `logs`, sorted.
///
/// Derived locally so a new transaction never triggers a refetch.
#[must_use]
pub fn initiators(logs: &[RemoteTransactionLog]) -> Vec<String> {
    logs.iter()
        .map(|l| l.initiator_key.clone())
        .filter(|k| !k.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Backend application log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationLog {
    pub id: RecordId,
    pub level: LogLevel,
    #[serde(default)]
    pub source: String,
    pub message: String,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Row for ApplicationLog {
    fn columns() -> &'static [&'static str] {
        &["Time", "Level", "Source", "Message"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_timestamp(&self.created_at),
            self.level.label().to_owned(),
            self.source.clone(),
            self.message.clone(),
        ]
    }

    fn category(&self) -> Option<&'static str> {
        Some(self.level.as_str())
    }

    fn filter_options() -> &'static [(&'static str, &'static str)] {
        LogLevel::OPTIONS
    }
}

impl LogRecord for ApplicationLog {
    const ENDPOINT: &'static str = "/api/application-logs";
    const TOPIC: &'static str = "application_log";
    const TITLE: &'static str = "Application logs";

    fn id(&self) -> RecordId {
        self.id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Infrastructure log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemLog {
    pub id: RecordId,
    pub level: LogLevel,
    #[serde(default)]
    pub component: String,
    pub message: String,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Row for SystemLog {
    fn columns() -> &'static [&'static str] {
        &["Time", "Level", "Component", "Message"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_timestamp(&self.created_at),
            self.level.label().to_owned(),
            self.component.clone(),
            self.message.clone(),
        ]
    }

    fn category(&self) -> Option<&'static str> {
        Some(self.level.as_str())
    }

    fn filter_options() -> &'static [(&'static str, &'static str)] {
        LogLevel::OPTIONS
    }
}

impl LogRecord for SystemLog {
    const ENDPOINT: &'static str = "/api/system-logs";
    const TOPIC: &'static str = "system_log";
    const TITLE: &'static str = "System logs";

    fn id(&self) -> RecordId {
        self.id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Charge record for a processed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingLog {
    pub id: RecordId,
    pub initiator_key: String,
    pub pages: u32,
    pub outcome: BillingOutcome,
    #[serde(default)]
    pub amount_cents: i64,
    #[serde(alias = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl BillingLog {
    /// Amount as `12.34`.
    #[must_use]
    pub fn amount_text(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Row for BillingLog {
    fn columns() -> &'static [&'static str] {
        &["Time", "Initiator", "Pages", "Outcome", "Amount"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            format_timestamp(&self.created_at),
            self.initiator_key.clone(),
            self.pages.to_string(),
            self.outcome.label().to_owned(),
            self.amount_text(),
        ]
    }

    fn category(&self) -> Option<&'static str> {
        Some(self.outcome.as_str())
    }

    fn filter_options() -> &'static [(&'static str, &'static str)] {
        BillingOutcome::OPTIONS
    }
}

impl LogRecord for BillingLog {
    const ENDPOINT: &'static str = "/api/processing-requests-billing-logs";
    const TOPIC: &'static str = "billing_log";
    const TITLE: &'static str = "Billing";

    fn id(&self) -> RecordId {
        self.id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.created_at
    }
}
