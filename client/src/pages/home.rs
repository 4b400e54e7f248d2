//! Landing page: every screen, grouped the same way as the sidebar.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::NAV;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="home">
            <h1>"Docflow administration"</h1>
            <div class="home__groups">
                {NAV
                    .iter()
                    .map(|(group, links)| {
                        view! {
                            <article class="home__card">
                                <h2>{*group}</h2>
                                {links
                                    .iter()
                                    .map(|(href, label)| view! { <A href=*href>{*label}</A> })
                                    .collect_view()}
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
