//! `docflow remote process`: run one remote-processing request end to end.
//!
//! SYSTEM CONTEXT
//! ==============
//! ```text
//! validate ──► connect(/ws/processing) ──session:connected──► RemoteSession::begin
//!          ──► POST /api/remote/process ──► processing:result (same session) ──► print
//! ```
//!
//! ERROR HANDLING
//! ==============
//! Input is validated before the socket opens. A failed POST aborts the
//! session; a closed socket or an expired result timeout ends the wait.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use clap::Args;
use frames::Namespace;
use records::RecordId;
use records::remote::{PROCESS_PATH, ProcessingResult, RemoteCommand, RemoteSession, SessionPhase};
use serde_json::Value;
use tracing::{info, warn};

use crate::api::RestClient;
use crate::config::Settings;
use crate::error::ConsoleError;
use crate::feed::FeedSubscription;
use crate::output::print_json;

#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Access token key the request is made on behalf of.
    #[arg(long)]
    initiator: String,

    #[arg(long)]
    instance: RecordId,

    /// Defaults to the instance's chosen device.
    #[arg(long)]
    device: Option<RecordId>,

    /// Omit to let the server detect the document type.
    #[arg(long)]
    document_type: Option<RecordId>,
}

impl ProcessArgs {
    fn command(&self) -> RemoteCommand {
        RemoteCommand {
            initiator_key: self.initiator.clone(),
            app_instance_id: self.instance,
            device_id: self.device,
            document_type_id: self.document_type,
        }
    }
}

/// # Errors
///
/// See [`process`]; a result whose status is not completed is also an error.
pub async fn run(settings: &Settings, client: &RestClient, args: ProcessArgs) -> Result<(), ConsoleError> {
    let result = process(settings, client, args.command()).await?;
    print_json(&result)?;
    if result.succeeded() {
        Ok(())
    } else {
        Err(ConsoleError::ProcessingFailed(result.message))
    }
}

/// Submit `command` and wait for its correlated result.
///
/// # Errors
///
/// [`ConsoleError::Validation`] before any connection, socket and POST
/// failures, [`ConsoleError::Timeout`] when no result arrives within the
/// result timeout, and [`ConsoleError::ProcessingFailed`] for error frames.
pub async fn process(
    settings: &Settings,
    client: &RestClient,
    command: RemoteCommand,
) -> Result<ProcessingResult, ConsoleError> {
    command.validate()?;

    let mut feed = FeedSubscription::connect(settings, Namespace::Processing).await?;
    let mut session = RemoteSession::new();
    while matches!(session.phase(), SessionPhase::Connecting) {
        let frame = feed.next(Some(settings.connect_timeout)).await?;
        session.observe(&frame);
    }
    info!(session_id = session.session_id().unwrap_or_default(), "processing session ready");

    let request = session.begin(command)?;
    if let Err(e) = client.post::<_, Value>(PROCESS_PATH, &request).await {
        session.abort(e.user_message());
        return Err(e.into());
    }
    info!(initiator = %request.initiator_key, app_instance_id = request.app_instance_id, "request accepted, waiting for result");

    let deadline = tokio::time::Instant::now() + settings.result_timeout;
    while !session.is_finished() {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        match feed.next(Some(remaining)).await {
            Ok(frame) => {
                session.observe(&frame);
            }
            Err(ConsoleError::Timeout(_)) => {
                session.abort("no result before the timeout");
                return Err(ConsoleError::Timeout("processing result"));
            }
            Err(e) => {
                warn!(error = %e, "processing channel lost while waiting");
                session.abort(e.to_string());
                return Err(e);
            }
        }
    }

    match session.phase() {
        SessionPhase::Completed(result) => Ok(result.clone()),
        SessionPhase::Failed(message) => Err(ConsoleError::ProcessingFailed(message.clone())),
        _ => Err(ConsoleError::WsClosed),
    }
}
