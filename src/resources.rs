//! `docflow resource <kind> …`: CRUD over the administration collections.
//!
//! DESIGN
//! ======
//! Every kind is a [`Resource`], so one generic runner serves them all. JSON
//! given with `--data` is decoded into the typed record and validated before
//! anything is sent. `update` accepts partial JSON: it is merged over the
//! current record, the merge is validated, and the full record is PUT.
//!
//! `toggle` flips the active flag locally through [`begin_toggle`], sends the
//! partial `{ "active": … }` update, and rolls the flip back when the server
//! refuses it.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use clap::{Args, Subcommand, ValueEnum};
use records::optimistic::begin_toggle;
use records::resources::{
    AccessToken, AiProvider, ApiEndpoint, Destination, DocumentType, FtpEndpoint, LocalStorageFolder, ProcessingRule,
    WindowsAppInstance,
};
use records::table::TableState;
use records::{RecordId, Resource, Row, ValidationErrors};
use serde_json::Value;
use tracing::info;

use crate::api::RestClient;
use crate::error::ConsoleError;
use crate::output::{print_json, print_table};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    AccessRights,
    AiProviders,
    ApiEndpoints,
    FtpEndpoints,
    LocalFolders,
    DocumentTypes,
    ProcessingRules,
    Destinations,
    AppInstances,
}

#[derive(Args, Debug)]
pub struct ResourceCommand {
    #[arg(value_enum)]
    kind: ResourceKind,

    #[command(subcommand)]
    action: ResourceAction,
}

#[derive(Subcommand, Debug)]
pub enum ResourceAction {
    List {
        /// Case-insensitive text match over every column.
        #[arg(long)]
        search: Option<String>,
        /// Category value, for kinds that have one.
        #[arg(long)]
        filter: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Get {
        id: RecordId,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: RecordId,
        /// Full or partial JSON object.
        #[arg(long)]
        data: String,
    },
    Delete {
        id: RecordId,
    },
    /// Flip the active flag.
    Toggle {
        id: RecordId,
    },
}

/// # Errors
///
/// Validation, transport and server failures.
pub async fn run(client: &RestClient, command: ResourceCommand) -> Result<(), ConsoleError> {
    match command.kind {
        ResourceKind::AccessRights => run_for::<AccessToken>(client, command.action).await,
        ResourceKind::AiProviders => run_for::<AiProvider>(client, command.action).await,
        ResourceKind::ApiEndpoints => run_for::<ApiEndpoint>(client, command.action).await,
        ResourceKind::FtpEndpoints => run_for::<FtpEndpoint>(client, command.action).await,
        ResourceKind::LocalFolders => run_for::<LocalStorageFolder>(client, command.action).await,
        ResourceKind::DocumentTypes => run_for::<DocumentType>(client, command.action).await,
        ResourceKind::ProcessingRules => run_for::<ProcessingRule>(client, command.action).await,
        ResourceKind::Destinations => run_for::<Destination>(client, command.action).await,
        ResourceKind::AppInstances => run_for::<WindowsAppInstance>(client, command.action).await,
    }
}

async fn run_for<R: Resource>(client: &RestClient, action: ResourceAction) -> Result<(), ConsoleError> {
    match action {
        ResourceAction::List { search, filter, json } => {
            let table = list::<R>(client, search.as_deref(), filter.as_deref()).await?;
            let rows = table.visible();
            if json {
                print_json(&rows)?;
            } else {
                print_table(&rows);
            }
            Ok(())
        }
        ResourceAction::Get { id } => {
            let record: R = client.get(&R::item_path(id)).await?;
            print_json(&record)
        }
        ResourceAction::Create { data } => {
            let created = create::<R>(client, &data).await?;
            print_json(&created)
        }
        ResourceAction::Update { id, data } => {
            let updated = update::<R>(client, id, &data).await?;
            print_json(&updated)
        }
        ResourceAction::Delete { id } => {
            client.delete(&R::item_path(id)).await?;
            info!(endpoint = R::ENDPOINT, id, "deleted");
            println!("deleted {id}");
            Ok(())
        }
        ResourceAction::Toggle { id } => {
            let record = toggle::<R>(client, id).await?;
            let state = if record.active().unwrap_or_default() { "active" } else { "inactive" };
            println!("{id} is now {state}");
            Ok(())
        }
    }
}

/// Fetch the collection and apply `search`/`filter` locally.
///
/// # Errors
///
/// [`ConsoleError::Validation`] for an unknown filter value, before any request.
pub async fn list<R: Resource>(
    client: &RestClient,
    search: Option<&str>,
    filter: Option<&str>,
) -> Result<TableState<R>, ConsoleError> {
    check_filter::<R>(filter)?;
    let mut table = TableState::new();
    table.begin_loading();
    table.set_items(client.list(R::ENDPOINT).await?);
    table.set_query(search.unwrap_or_default());
    table.set_filter(filter);
    Ok(table)
}

/// # Errors
///
/// Validation failures are reported without contacting the server.
pub async fn create<R: Resource>(client: &RestClient, data: &str) -> Result<R, ConsoleError> {
    let record = parse_record::<R>(None, serde_json::from_str(data)?)?;
    let created: Option<R> = client.post(R::ENDPOINT, &record).await?;
    info!(endpoint = R::ENDPOINT, id = ?created.as_ref().and_then(|r| r.id()), "created");
    Ok(created.unwrap_or(record))
}

/// Merge `data` over the current record, validate, and PUT the result.
///
/// # Errors
///
/// Validation failures are reported before the PUT.
pub async fn update<R: Resource>(client: &RestClient, id: RecordId, data: &str) -> Result<R, ConsoleError> {
    let patch: Value = serde_json::from_str(data)?;
    let current: Value = client.get(&R::item_path(id)).await?;
    let record = parse_record::<R>(Some(id), merge_patch(current, patch))?;
    let updated: Option<R> = client.put(&R::item_path(id), &record).await?;
    info!(endpoint = R::ENDPOINT, id, "updated");
    Ok(updated.unwrap_or(record))
}

/// Optimistically flip the active flag of `id`, rolling back on failure.
///
/// # Errors
///
/// [`ConsoleError::NotFound`] for an unknown id and
/// [`ConsoleError::NoActiveFlag`] for kinds without one; otherwise the
/// server's refusal, after the local flip has been undone.
pub async fn toggle<R: Resource>(client: &RestClient, id: RecordId) -> Result<R, ConsoleError> {
    let mut table = TableState::<R>::new();
    table.set_items(client.list(R::ENDPOINT).await?);
    if table.find(id).is_none() {
        return Err(ConsoleError::NotFound(id));
    }
    let pending = begin_toggle(&mut table, id).ok_or(ConsoleError::NoActiveFlag(R::TITLE))?;

    match client.put::<_, Value>(&R::item_path(pending.id()), &pending.request_body()).await {
        Ok(_) => {
            info!(endpoint = R::ENDPOINT, id, active = pending.desired(), "toggled");
            pending.commit();
        }
        Err(e) => {
            pending.rollback(&mut table);
            return Err(e.into());
        }
    }
    table.find(id).cloned().ok_or(ConsoleError::NotFound(id))
}

/// Decode `json` as `R`, stamping `id`, and run the record's own validation.
pub(crate) fn parse_record<R: Resource>(id: Option<RecordId>, mut json: Value) -> Result<R, ConsoleError> {
    if let Value::Object(map) = &mut json {
        match id {
            Some(id) => {
                map.insert("id".to_owned(), Value::from(id));
            }
            None => {
                map.remove("id");
            }
        }
    }
    let record: R = serde_json::from_value(json)?;
    record.validate()?;
    Ok(record)
}

/// Shallow merge: top-level keys of `patch` replace those of `current`.
pub(crate) fn merge_patch(current: Value, patch: Value) -> Value {
    match (current, patch) {
        (Value::Object(mut base), Value::Object(changes)) => {
            base.extend(changes);
            Value::Object(base)
        }
        (_, patch) => patch,
    }
}

/// Reject a `--filter` value the row type does not know.
pub(crate) fn check_filter<R: Row>(filter: Option<&str>) -> Result<(), ValidationErrors> {
    let Some(filter) = filter.filter(|f| !f.is_empty()) else {
        return Ok(());
    };
    let options = R::filter_options();
    if options.iter().any(|(value, _)| *value == filter) {
        return Ok(());
    }
    let mut errors = ValidationErrors::new();
    if options.is_empty() {
        errors.push("filter", "this kind has no categories");
    } else {
        let known: Vec<&str> = options.iter().map(|(value, _)| *value).collect();
        errors.push("filter", format!("must be one of {}", known.join(", ")));
    }
    errors.into_result()
}
