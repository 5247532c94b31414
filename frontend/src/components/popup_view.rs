use chrono::Utc;
use stylist::css;
use web_sys::MouseEvent;
use yew::prelude::*;
use yew_hooks::use_interval;

use crate::config::{PopupTuning, SITE_CONTACT};
use crate::hours;
use crate::providers::Provider;

pub fn tel_href(dial: &str) -> String {
    let digits: String = dial
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    format!("tel:{}", digits)
}

pub fn mailto_href(email: &str, provider_name: &str) -> String {
    let subject = format!("Question about {} plans", provider_name);
    format!("mailto:{}?subject={}", email, urlencoding::encode(&subject))
}

#[derive(Properties, PartialEq)]
pub struct CallModalProps {
    pub provider: Provider,
    pub tuning: PopupTuning,
    pub reappearing: bool,
    pub dialog_ref: NodeRef,
    pub on_dismiss: Callback<()>,
    pub on_suppress: Callback<()>,
}

#[function_component(CallModal)]
pub fn call_modal(props: &CallModalProps) -> Html {
    let CallModalProps {
        provider,
        tuning,
        reappearing,
        dialog_ref,
        on_dismiss,
        on_suppress,
    } = props;

    let brand = css!(
        r#"
            width: ${width};
            max-width: calc(100vw - 2rem);
            border-top: 6px solid ${primary};

            .cta-call {
                background: linear-gradient(135deg, ${primary}, ${accent});
            }
            .cta-provider {
                color: ${primary};
            }
        "#,
        width = tuning.dialog_width,
        primary = provider.colors.primary.clone(),
        accent = provider.colors.accent.clone(),
    );

    let on_backdrop = {
        let on_dismiss = on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };
    let stop_propagation = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_not_now = {
        let on_dismiss = on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };
    let on_dont_show = {
        let on_suppress = on_suppress.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_suppress.emit(());
        })
    };

    let entrance = if *reappearing { "cta-reappear" } else { "cta-enter" };

    html! {
        <div class="cta-backdrop" onclick={on_backdrop}>
            <style>{MODAL_CSS}</style>
            <div
                ref={dialog_ref.clone()}
                class={classes!("cta-dialog", entrance, brand)}
                role="dialog"
                aria-modal="true"
                aria-labelledby="cta-headline"
                tabindex="-1"
                onclick={stop_propagation}
            >
                <p class="cta-provider">{format!("Shopping for {}?", provider.name)}</p>
                <h2 id="cta-headline">{tuning.headline}</h2>
                <p class="cta-body">{tuning.body}</p>
                <a class="cta-call" href={tel_href(SITE_CONTACT.phone_dial)}>
                    {format!("Call Now {}", SITE_CONTACT.phone_display)}
                </a>
                <AvailabilityLine />
                <a class="cta-email" href={mailto_href(SITE_CONTACT.email, &provider.name)}>
                    {format!("Or email {}", SITE_CONTACT.email)}
                </a>
                <div class="cta-secondary">
                    <button class="cta-not-now" onclick={on_not_now}>{"Not Now"}</button>
                    <button class="cta-dont-show" onclick={on_dont_show}>{"Don't show again"}</button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct MinimizedBadgeProps {
    pub provider: Provider,
    pub label: AttrValue,
    /// When false the badge is a plain call link instead of reopening the popup.
    pub reopens: bool,
    pub on_reopen: Callback<()>,
}

#[function_component(MinimizedBadge)]
pub fn minimized_badge(props: &MinimizedBadgeProps) -> Html {
    let badge = css!(
        r#"
            background: ${primary};
            border: 2px solid ${accent};
        "#,
        primary = props.provider.colors.primary.clone(),
        accent = props.provider.colors.accent.clone(),
    );

    if props.reopens {
        let on_click = {
            let on_reopen = props.on_reopen.clone();
            Callback::from(move |_: MouseEvent| on_reopen.emit(()))
        };
        html! {
            <>
                <style>{BADGE_CSS}</style>
                <button class={classes!("cta-badge", badge)} onclick={on_click}>
                    {props.label.clone()}
                </button>
            </>
        }
    } else {
        html! {
            <>
                <style>{BADGE_CSS}</style>
                <a class={classes!("cta-badge", badge)} href={tel_href(SITE_CONTACT.phone_dial)}>
                    {SITE_CONTACT.phone_display}
                </a>
            </>
        }
    }
}

#[function_component(AvailabilityLine)]
pub fn availability_line() -> Html {
    let now = use_state(Utc::now);
    {
        let now = now.clone();
        use_interval(move || now.set(Utc::now()), 60_000);
    }

    let open = hours::is_open_at(SITE_CONTACT.hours, SITE_CONTACT.time_zone, *now);
    let summary = hours::describe(SITE_CONTACT.hours, SITE_CONTACT.time_zone, *now);

    html! {
        <div class={classes!("cta-availability", open.then(|| "open"))}>
            <span class="cta-dot"></span>
            {
                if open {
                    html! { <span>{"Agents available now"}</span> }
                } else {
                    html! { <span>{"Leave a message and we'll call you back"}</span> }
                }
            }
            <small>{summary}</small>
        </div>
    }
}

const MODAL_CSS: &str = r#"
    .cta-backdrop {
        position: fixed;
        inset: 0;
        z-index: 1000;
        display: flex;
        align-items: center;
        justify-content: center;
        background: rgba(10, 14, 26, 0.55);
        backdrop-filter: blur(3px);
    }
    .cta-dialog {
        background: #fff;
        border-radius: 18px;
        padding: 2rem 1.75rem 1.5rem;
        box-shadow: 0 24px 48px rgba(0, 0, 0, 0.25);
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
        text-align: center;
        outline: none;
    }
    .cta-dialog h2 {
        margin: 0.25rem 0 0.75rem;
        font-size: 1.5rem;
        color: #111827;
    }
    .cta-provider {
        margin: 0;
        font-weight: 600;
        text-transform: uppercase;
        letter-spacing: 0.04em;
        font-size: 0.8rem;
    }
    .cta-body {
        color: #4b5563;
        line-height: 1.5;
    }
    .cta-call {
        display: block;
        margin: 1.25rem 0 0.75rem;
        padding: 0.9rem 1rem;
        border-radius: 999px;
        color: #fff;
        font-weight: 700;
        font-size: 1.1rem;
        text-decoration: none;
    }
    .cta-email {
        display: block;
        margin-top: 0.75rem;
        color: #6b7280;
        font-size: 0.85rem;
    }
    .cta-availability {
        display: flex;
        flex-direction: column;
        align-items: center;
        gap: 0.15rem;
        color: #6b7280;
        font-size: 0.85rem;
    }
    .cta-availability.open {
        color: #047857;
    }
    .cta-dot {
        width: 8px;
        height: 8px;
        border-radius: 50%;
        background: currentColor;
    }
    .cta-secondary {
        display: flex;
        justify-content: space-between;
        margin-top: 1.25rem;
    }
    .cta-secondary button {
        background: none;
        border: none;
        color: #6b7280;
        cursor: pointer;
        font-size: 0.85rem;
    }
    .cta-not-now {
        font-weight: 600;
    }
    .cta-enter {
        animation: ctaEnter 0.35s ease-out;
    }
    .cta-reappear {
        animation: ctaReappear 0.6s cubic-bezier(0.34, 1.56, 0.64, 1);
    }
    @keyframes ctaEnter {
        from { opacity: 0; transform: translateY(16px); }
        to { opacity: 1; transform: translateY(0); }
    }
    @keyframes ctaReappear {
        0% { opacity: 0; transform: scale(0.85); }
        100% { opacity: 1; transform: scale(1); }
    }
"#;

const BADGE_CSS: &str = r#"
    .cta-badge {
        position: fixed;
        right: 1.25rem;
        bottom: 1.25rem;
        z-index: 999;
        padding: 0.8rem 1.2rem;
        border-radius: 999px;
        box-shadow: 0 8px 24px rgba(0, 0, 0, 0.25);
        color: #fff;
        font-weight: 700;
        cursor: pointer;
        text-decoration: none;
        animation: ctaEnter 0.35s ease-out;
    }
    @keyframes ctaEnter {
        from { opacity: 0; transform: translateY(16px); }
        to { opacity: 1; transform: translateY(0); }
    }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tel_links_keep_only_dialable_characters() {
        assert_eq!(tel_href("+1 (855) 407-2231"), "tel:+18554072231");
    }

    #[test]
    fn mailto_subject_is_url_encoded() {
        assert_eq!(
            mailto_href("help@compareproviders.net", "AT&T Fiber"),
            "mailto:help@compareproviders.net?subject=Question%20about%20AT%26T%20Fiber%20plans"
        );
    }
}
