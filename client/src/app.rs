//! Root application component with navigation and routing.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{A, Route, Router, Routes},
};

use crate::pages::destinations::DestinationsPage;
use crate::pages::home::HomePage;
use crate::pages::instances::InstancesPage;
use crate::pages::layout_editor::LayoutEditorPage;
use crate::pages::layouts::LayoutsPage;
use crate::pages::logs::{ApplicationLogsPage, BillingLogsPage, ClientLogsPage, SystemLogsPage, TransactionsPage};
use crate::pages::remote::RemotePage;
use crate::pages::resource::{
    AccessTokensPage, AiProvidersPage, ApiEndpointsPage, DocumentTypesPage, FtpEndpointsPage, LocalFoldersPage,
    ProcessingRulesPage,
};

/// Navigation entries, grouped for the sidebar.
pub const NAV: &[(&str, &[(&str, &str)])] = &[
    (
        "Configuration",
        &[
            ("/document-types", "Document types"),
            ("/document-layouts", "Document layouts"),
            ("/processing-rules", "Processing rules"),
            ("/destinations", "Destinations"),
            ("/api-endpoints", "API endpoints"),
            ("/ftp-endpoints", "FTP endpoints"),
            ("/local-folders", "Local folders"),
            ("/access-tokens", "Access tokens"),
            ("/ai-providers", "AI providers"),
            ("/app-instances", "App instances"),
        ],
    ),
    (
        "Logs",
        &[
            ("/logs/client", "Client actions"),
            ("/logs/transactions", "Remote transactions"),
            ("/logs/application", "Application"),
            ("/logs/system", "System"),
            ("/logs/billing", "Billing"),
        ],
    ),
    ("Processing", &[("/remote", "Remote command")]),
];

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="Docflow Admin"/>

        <Router>
            <div class="shell">
                <Sidebar/>
                <main class="shell__main">
                    <Routes fallback=|| "Page not found.".into_view()>
                        <Route path=StaticSegment("") view=HomePage/>
                        <Route path=StaticSegment("document-types") view=DocumentTypesPage/>
                        <Route path=StaticSegment("document-layouts") view=LayoutsPage/>
                        <Route path=StaticSegment("layout-editor") view=LayoutEditorPage/>
                        <Route
                            path=(StaticSegment("document-layouts"), ParamSegment("id"))
                            view=LayoutEditorPage
                        />
                        <Route path=StaticSegment("processing-rules") view=ProcessingRulesPage/>
                        <Route path=StaticSegment("destinations") view=DestinationsPage/>
                        <Route path=StaticSegment("api-endpoints") view=ApiEndpointsPage/>
                        <Route path=StaticSegment("ftp-endpoints") view=FtpEndpointsPage/>
                        <Route path=StaticSegment("local-folders") view=LocalFoldersPage/>
                        <Route path=StaticSegment("access-tokens") view=AccessTokensPage/>
                        <Route path=StaticSegment("ai-providers") view=AiProvidersPage/>
                        <Route path=StaticSegment("app-instances") view=InstancesPage/>
                        <Route path=(StaticSegment("logs"), StaticSegment("client")) view=ClientLogsPage/>
                        <Route path=(StaticSegment("logs"), StaticSegment("transactions")) view=TransactionsPage/>
                        <Route path=(StaticSegment("logs"), StaticSegment("application")) view=ApplicationLogsPage/>
                        <Route path=(StaticSegment("logs"), StaticSegment("system")) view=SystemLogsPage/>
                        <Route path=(StaticSegment("logs"), StaticSegment("billing")) view=BillingLogsPage/>
                        <Route path=StaticSegment("remote") view=RemotePage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    view! {
        <nav class="sidebar">
            <A href="/">
                <span class="sidebar__brand">"Docflow"</span>
            </A>
            {NAV
                .iter()
                .map(|(group, links)| {
                    view! {
                        <section class="sidebar__group">
                            <h3 class="sidebar__heading">{*group}</h3>
                            <ul>
                                {links
                                    .iter()
                                    .map(|(href, label)| {
                                        view! {
                                            <li>
                                                <A href=*href>{*label}</A>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        </section>
                    }
                })
                .collect_view()}
        </nav>
    }
}
