use super::*;
use std::collections::HashSet;

/// Router views take no arguments.
fn route_view<V: IntoView>(_: fn() -> V) {}

#[test]
fn every_screen_is_a_plain_route_component() {
    route_view(HomePage);
    route_view(DocumentTypesPage);
    route_view(LayoutsPage);
    route_view(LayoutEditorPage);
    route_view(ProcessingRulesPage);
    route_view(DestinationsPage);
    route_view(ApiEndpointsPage);
    route_view(FtpEndpointsPage);
    route_view(LocalFoldersPage);
    route_view(AccessTokensPage);
    route_view(AiProvidersPage);
    route_view(InstancesPage);
    route_view(ClientLogsPage);
    route_view(TransactionsPage);
    route_view(ApplicationLogsPage);
    route_view(SystemLogsPage);
    route_view(BillingLogsPage);
    route_view(RemotePage);
}

#[test]
fn navigation_links_are_unique_absolute_paths() {
    let mut seen = HashSet::new();
    for (_, links) in NAV {
        for (href, label) in *links {
            assert!(href.starts_with('/'), "{href}");
            assert!(!label.is_empty());
            assert!(seen.insert(*href), "duplicate link {href}");
        }
    }
    assert_eq!(seen.len(), 16);
}
