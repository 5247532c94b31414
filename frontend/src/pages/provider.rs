use yew::prelude::*;
use yew_router::components::Link;

use crate::components::call_popup::CallPopup;
use crate::components::popup_view::tel_href;
use crate::config::{PopupVariant, SITE_CONTACT};
use crate::providers::find_provider;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct ProviderPageProps {
    pub id: String,
    #[prop_or_default]
    pub variant: PopupVariant,
}

#[function_component(ProviderPage)]
pub fn provider_page(props: &ProviderPageProps) -> Html {
    let Some(provider) = find_provider(&props.id) else {
        return html! {
            <div class="provider-page">
                <h1>{"Provider not found"}</h1>
                <Link<Route> to={Route::Home}>{"Back to all providers"}</Link<Route>>
            </div>
        };
    };

    html! {
        <div class="provider-page">
            <section class="provider-hero" style={format!("border-color: {};", provider.colors.primary)}>
                <h1>{format!("{} plans & pricing", provider.name)}</h1>
                <p>{&provider.tagline}</p>
                <a class="provider-hero-call" href={tel_href(SITE_CONTACT.phone_dial)}
                    style={format!("background: {};", provider.colors.primary)}>
                    {format!("Call {}", SITE_CONTACT.phone_display)}
                </a>
            </section>
            <Link<Route> to={Route::Home} classes="provider-back">{"All providers"}</Link<Route>>
            <CallPopup key={format!("{}-{:?}", provider.id, props.variant)} provider={provider.clone()} variant={props.variant} />
            <style>
                {r#"
                .provider-page {
                    max-width: 960px;
                    margin: 0 auto;
                    padding: 74px 1.5rem 4rem;
                    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                }
                .provider-hero {
                    border-left: 6px solid;
                    padding: 1rem 1.5rem;
                    margin-bottom: 2rem;
                }
                .provider-hero-call {
                    display: inline-block;
                    margin-top: 1rem;
                    padding: 0.75rem 1.5rem;
                    border-radius: 999px;
                    color: #fff;
                    font-weight: 700;
                    text-decoration: none;
                }
                .provider-back {
                    color: #6b7280;
                }
                "#}
            </style>
        </div>
    }
}
