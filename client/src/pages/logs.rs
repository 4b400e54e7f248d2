//! Live log screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each screen fetches its collection once, then follows the logs push
//! namespace. Frames for the screen's topic are folded into a [`LiveList`];
//! an effect copies the list into the table, so search, filter and paging
//! keep working while rows arrive.
//!
//! Events that land before the fetch completes are held and replayed over the
//! fetched rows. The subscription reconnects with backoff; each reconnect
//! refetches the list. The subscription is closed when the route unmounts.

use frames::Namespace;
use leptos::prelude::*;
use leptos::task::spawn_local;
use records::feed::{LiveList, decode_feed_event};
use records::logs::{ApplicationLog, BillingLog, ClientLog, RemoteTransactionLog, SystemLog, initiators};
use records::table::TableState;
use records::{ApiError, LogRecord, Row};

use crate::components::alert::ErrorAlert;
use crate::components::data_table::{pager, plain_table, table_controls};
use crate::net::feed::{self, FeedStatus};

/// Signals behind one live log screen.
struct LiveLog<T: Send + Sync + 'static> {
    live: RwSignal<LiveList<T>>,
    table: RwSignal<TableState<T>>,
    status: RwSignal<FeedStatus>,
    loaded: RwSignal<bool>,
}

impl<T: Send + Sync + 'static> Clone for LiveLog<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for LiveLog<T> {}

impl<T> LiveLog<T>
where
    T: LogRecord + Send + Sync,
{
    /// Start the fetch and the subscription. Both end with the owning route.
    fn start() -> Self {
        let this = Self {
            live: RwSignal::new(LiveList::awaiting_fetch()),
            table: RwSignal::new(TableState::new()),
            status: RwSignal::new(FeedStatus::default()),
            loaded: RwSignal::new(false),
        };
        this.table.update(TableState::begin_loading);
        this.fetch();

        let Self { live, status, .. } = this;
        let dropped = std::cell::Cell::new(false);
        let subscription = feed::subscribe(
            Namespace::Logs,
            true,
            move |frame| match decode_feed_event::<T>(&frame) {
                Ok(Some(event)) => {
                    let _ = live.try_update(|list| list.apply(event));
                }
                Ok(None) => {}
                Err(e) => leptos::logging::warn!("{} frame `{}` ignored: {e}", T::TOPIC, frame.event),
            },
            move |s| {
                let _ = status.try_set(s);
                match s {
                    FeedStatus::Retrying => dropped.set(true),
                    // Pushes sent while the socket was down are gone; refetch.
                    FeedStatus::Live if dropped.replace(false) => this.fetch(),
                    _ => {}
                }
            },
        );
        on_cleanup(move || drop(subscription));

        this
    }

    /// Fetch the collection, holding push events until it lands.
    fn fetch(self) {
        let Self { live, table, loaded, .. } = self;
        let _ = live.try_update(LiveList::hold);
        spawn_local(async move {
            match crate::net::api::fetch_list::<T>(T::ENDPOINT).await {
                Ok(rows) => {
                    let _ = live.try_update(|list| list.seed(rows));
                    let _ = table.try_update(|t| t.error = None);
                }
                Err(e) => {
                    let _ = live.try_update(LiveList::release);
                    let _ = table.try_update(|t| t.fail(e));
                }
            }
            let _ = loaded.try_set(true);
        });
    }

    /// Copy live rows passing `keep` into the table once the fetch settled.
    fn sync_table(self, keep: impl Fn(&T) -> bool + Send + Sync + 'static) {
        let Self { live, table, loaded, .. } = self;
        Effect::new(move || {
            if !loaded.get() {
                return;
            }
            let rows: Vec<T> = live.with(|list| list.rows().iter().filter(|r| keep(*r)).cloned().collect());
            table.update(|t| {
                let error = t.error.take();
                t.set_items(rows);
                t.error = error;
            });
        });
    }
}

/// Screen for one log record type.
fn log_page<T>() -> impl IntoView
where
    T: LogRecord + Send + Sync,
{
    let log = LiveLog::<T>::start();
    log.sync_table(|_| true);
    log_view(T::TITLE, log, ())
}

#[component]
pub fn ClientLogsPage() -> impl IntoView {
    log_page::<ClientLog>()
}

#[component]
pub fn ApplicationLogsPage() -> impl IntoView {
    log_page::<ApplicationLog>()
}

#[component]
pub fn SystemLogsPage() -> impl IntoView {
    log_page::<SystemLog>()
}

#[component]
pub fn BillingLogsPage() -> impl IntoView {
    log_page::<BillingLog>()
}

/// Remote transactions, with an initiator selector derived from the rows seen so far.
#[component]
pub fn TransactionsPage() -> impl IntoView {
    let log = LiveLog::<RemoteTransactionLog>::start();
    let initiator = RwSignal::new(None::<String>);
    log.sync_table(move |row| initiator.with(|who| who.as_ref().is_none_or(|w| *w == row.initiator_key)));

    let live = log.live;
    let selector = view! {
        <label class="page-header__select">
            "Initiator "
            <select on:change=move |ev| {
                let value = event_target_value(&ev);
                initiator.set((!value.is_empty()).then_some(value));
            }>
                <option value="">"All"</option>
                {move || {
                    live.with(|list| initiators(list.rows()))
                        .into_iter()
                        .map(|key| {
                            let current = key.clone();
                            let label = key.clone();
                            view! {
                                <option value=key selected=move || initiator.with(|w| w.as_ref() == Some(&current))>
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()
                }}
            </select>
        </label>
    };
    log_view(RemoteTransactionLog::TITLE, log, selector)
}

fn log_view<T, V>(title: &'static str, log: LiveLog<T>, extra: V) -> impl IntoView
where
    T: Row + Clone + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let LiveLog { table, status, .. } = log;
    let list_error = Signal::derive(move || table.with(|t| t.error.as_ref().map(ApiError::user_message)));

    view! {
        <section class="log-page">
            <header class="page-header">
                <h1>{title}</h1>
                <span class="page-header__spacer"></span>
                {extra}
                <span class=move || format!("feed-status feed-status--{:?}", status.get()).to_lowercase()>
                    {move || status.get().label()}
                </span>
            </header>
            <ErrorAlert message=list_error/>
            {table_controls(table)}
            {plain_table(table)}
            {pager(table)}
        </section>
    }
}
