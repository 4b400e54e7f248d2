//! `docflow logs <kind>`: print a log collection, optionally following the
//! logs namespace.
//!
//! SYSTEM CONTEXT
//! ==============
//! ```text
//! connect(/ws/logs) ──► GET <endpoint> ──► LiveList::from_fetch ──► snapshot
//!        │
//!        └─ frame ──► decode_feed_event::<T> ──► LiveList::apply ──► one line per change
//! ```
//!
//! The socket opens before the fetch so changes made in between queue up
//! and are applied on top of the snapshot. A closed socket is reopened with
//! backoff and the list is refetched.

#[cfg(test)]
#[path = "logs_test.rs"]
mod logs_test;

use std::time::Duration;

use clap::{Args, ValueEnum};
use frames::Namespace;
use records::LogRecord;
use records::feed::{FeedEvent, LiveList, decode_feed_event};
use records::logs::{ApplicationLog, BillingLog, ClientLog, RemoteTransactionLog, SystemLog, initiators};
use records::table::TableState;
use serde::Serialize;
use tracing::{info, warn};

use crate::api::RestClient;
use crate::config::Settings;
use crate::error::ConsoleError;
use crate::feed::FeedSubscription;
use crate::output::{print_json, render_table};
use crate::resources::check_filter;

const RECONNECT_MIN: Duration = Duration::from_secs(1);
const RECONNECT_MAX: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogKind {
    Client,
    Transactions,
    Application,
    System,
    Billing,
}

#[derive(Args, Debug)]
pub struct LogsArgs {
    #[arg(value_enum)]
    kind: LogKind,

    #[arg(long)]
    search: Option<String>,

    /// Category value: level, status, action or outcome depending on the kind.
    #[arg(long)]
    filter: Option<String>,

    /// Newest rows shown in the snapshot.
    #[arg(long, default_value_t = 50)]
    limit: usize,

    /// Keep printing changes pushed by the server until interrupted.
    #[arg(long, default_value_t = false)]
    follow: bool,

    #[arg(long, help = "With --follow, stop after this many applied changes")]
    max_events: Option<usize>,

    #[arg(long, default_value_t = false)]
    json: bool,
}

/// # Errors
///
/// Bad filter values, transport and server failures.
pub async fn run(settings: &Settings, client: &RestClient, args: LogsArgs) -> Result<(), ConsoleError> {
    match args.kind {
        LogKind::Client => run_for::<ClientLog>(settings, client, &args).await,
        LogKind::Transactions => run_for::<RemoteTransactionLog>(settings, client, &args).await,
        LogKind::Application => run_for::<ApplicationLog>(settings, client, &args).await,
        LogKind::System => run_for::<SystemLog>(settings, client, &args).await,
        LogKind::Billing => run_for::<BillingLog>(settings, client, &args).await,
    }
}

/// Distinct initiator keys seen in remote transactions.
///
/// # Errors
///
/// Transport and server failures.
pub async fn list_initiators(client: &RestClient) -> Result<Vec<String>, ConsoleError> {
    let logs: Vec<RemoteTransactionLog> = client.list(RemoteTransactionLog::ENDPOINT).await?;
    Ok(initiators(&logs))
}

async fn run_for<T: LogRecord + Serialize>(
    settings: &Settings,
    client: &RestClient,
    args: &LogsArgs,
) -> Result<(), ConsoleError> {
    let mut table = log_table::<T>(args.search.as_deref(), args.filter.as_deref())?;
    if args.follow {
        follow(settings, client, &mut table, args.limit, args.max_events, |line| println!("{line}")).await?;
        return Ok(());
    }

    let live = LiveList::from_fetch(client.list(T::ENDPOINT).await?);
    table.set_items(live.rows().to_vec());
    let rows: Vec<&T> = table.visible().into_iter().take(args.limit).collect();
    if args.json {
        print_json(&rows)
    } else {
        print!("{}", render_table(&rows));
        Ok(())
    }
}

/// Matching state for one log view. Unknown filter values are rejected here.
pub(crate) fn log_table<T: LogRecord>(search: Option<&str>, filter: Option<&str>) -> Result<TableState<T>, ConsoleError> {
    check_filter::<T>(filter)?;
    let mut table = TableState::new();
    table.set_query(search.unwrap_or_default());
    table.set_filter(filter);
    Ok(table)
}

/// Print a snapshot, then one line per applied change until interrupted or
/// `max_events` changes have been applied. Returns the final list.
///
/// # Errors
///
/// Failures of the first connect or fetch. Later socket closures reconnect.
pub async fn follow<T: LogRecord>(
    settings: &Settings,
    client: &RestClient,
    table: &mut TableState<T>,
    limit: usize,
    max_events: Option<usize>,
    mut emit: impl FnMut(String),
) -> Result<LiveList<T>, ConsoleError> {
    let mut feed = FeedSubscription::connect(settings, Namespace::Logs).await?;
    let mut live = LiveList::from_fetch(client.list(T::ENDPOINT).await?);
    table.set_items(live.rows().to_vec());
    let snapshot: Vec<&T> = table.visible().into_iter().take(limit).collect();
    emit(render_table(&snapshot).trim_end().to_owned());
    info!(topic = T::TOPIC, rows = live.len(), "following");

    if max_events == Some(0) {
        return Ok(live);
    }
    let mut applied = 0_usize;
    loop {
        let next = tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(live),
            next = feed.next(None) => next,
        };
        let frame = match next {
            Ok(frame) => frame,
            Err(ConsoleError::WsClosed) => {
                warn!(namespace = feed.namespace().label(), "push channel closed, reconnecting");
                feed = tokio::select! {
                    _ = tokio::signal::ctrl_c() => return Ok(live),
                    feed = reconnect(settings) => feed,
                };
                live = LiveList::from_fetch(client.list(T::ENDPOINT).await?);
                table.set_items(live.rows().to_vec());
                continue;
            }
            Err(e) => return Err(e),
        };

        let event = match decode_feed_event::<T>(&frame) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                warn!(event = %frame.event, error = %e, "ignoring malformed log event");
                continue;
            }
        };
        let line = describe(&event, table);
        if live.apply(event) {
            table.set_items(live.rows().to_vec());
            if let Some(line) = line {
                emit(line);
            }
            applied += 1;
            if max_events.is_some_and(|max| applied >= max) {
                return Ok(live);
            }
        }
    }
}

async fn reconnect(settings: &Settings) -> FeedSubscription {
    let mut delay = RECONNECT_MIN;
    loop {
        tokio::time::sleep(delay).await;
        match FeedSubscription::connect(settings, Namespace::Logs).await {
            Ok(feed) => return feed,
            Err(e) => {
                warn!(error = %e, retry_in = ?delay, "reconnect failed");
                delay = (delay * 2).min(RECONNECT_MAX);
            }
        }
    }
}

/// Output line for an event, or `None` when the row is hidden by the search or filter.
pub(crate) fn describe<T: LogRecord>(event: &FeedEvent<T>, table: &TableState<T>) -> Option<String> {
    match event {
        FeedEvent::Created(row) => table.matches(row).then(|| format!("+ {}", row.cells().join(" | "))),
        FeedEvent::Updated(row) => table.matches(row).then(|| format!("~ {}", row.cells().join(" | "))),
        FeedEvent::Deleted(id) => Some(format!("- {} #{id}", T::TITLE)),
    }
}
