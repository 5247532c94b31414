use yew::prelude::*;
use yew_router::components::Link;

use crate::providers::PROVIDERS;
use crate::Route;

#[function_component(Home)]
pub fn home() -> Html {
    // Scroll to top only on initial mount
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    html! {
        <div class="provider-list-page">
            <section class="provider-list-hero">
                <h1>{"Compare internet & TV providers"}</h1>
                <p>{"Pick a provider to see plans available at your address."}</p>
            </section>
            <section class="provider-list">
                { for PROVIDERS.iter().map(|provider| html! {
                    <div class="provider-card" key={provider.id.clone()}>
                        <Link<Route> to={Route::Provider { id: provider.id.clone() }}>
                            <h2 style={format!("color: {};", provider.colors.primary)}>{&provider.name}</h2>
                            <p>{&provider.tagline}</p>
                        </Link<Route>>
                    </div>
                }) }
            </section>
            <style>
                {r#"
                .provider-list-page {
                    max-width: 960px;
                    margin: 0 auto;
                    padding: 74px 1.5rem 4rem;
                    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                }
                .provider-list-hero h1 {
                    font-size: 2.25rem;
                    margin-bottom: 0.5rem;
                }
                .provider-list {
                    display: grid;
                    grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
                    gap: 1rem;
                    margin-top: 2rem;
                }
                .provider-card a {
                    display: block;
                    padding: 1.25rem;
                    border: 1px solid #e5e7eb;
                    border-radius: 12px;
                    color: #374151;
                    text-decoration: none;
                    transition: box-shadow 0.2s ease;
                }
                .provider-card a:hover {
                    box-shadow: 0 8px 24px rgba(0, 0, 0, 0.08);
                }
                .provider-card h2 {
                    margin: 0 0 0.35rem;
                }
                "#}
            </style>
        </div>
    }
}
