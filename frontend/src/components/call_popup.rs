use std::collections::HashMap;

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::components::focus_guard::FocusGuard;
use crate::components::popup_view::{CallModal, MinimizedBadge};
use crate::config::{PopupTuning, PopupVariant};
use crate::popup::machine::{Effect, Event, PopupMachine, TimerKind};
use crate::popup::session::{self, BrowserSessionStore, SessionRecord};
use crate::providers::Provider;

#[derive(Properties, PartialEq)]
pub struct CallPopupProps {
    pub provider: Provider,
    #[prop_or_default]
    pub variant: PopupVariant,
}

pub enum CallPopupMsg {
    TimerFired(TimerKind),
    Dismiss,
    SuppressForever,
    ReopenFromBadge,
}

/// Call-to-action popup for one provider. Mount it with a `key` of the
/// provider id so switching providers starts from that provider's record.
pub struct CallPopup {
    machine: PopupMachine,
    tuning: PopupTuning,
    store: BrowserSessionStore,
    timers: HashMap<TimerKind, Timeout>,
    dialog_ref: NodeRef,
    focus_guard: Option<FocusGuard>,
}

impl Component for CallPopup {
    type Message = CallPopupMsg;
    type Properties = CallPopupProps;

    fn create(ctx: &Context<Self>) -> Self {
        let provider_id = ctx.props().provider.id.clone();
        let tuning = ctx.props().variant.tuning();
        let store = BrowserSessionStore;
        let record = SessionRecord::load(&store, &provider_id);
        info!("Mounting call popup for {} with {:?}", provider_id, record);

        let mut popup = Self {
            machine: PopupMachine::new(tuning.timing),
            tuning,
            store,
            timers: HashMap::new(),
            dialog_ref: NodeRef::default(),
            focus_guard: None,
        };
        let effects = popup.machine.handle(Event::Mounted(record));
        popup.run_effects(ctx, effects);
        popup
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let event = match msg {
            CallPopupMsg::TimerFired(timer) => {
                self.timers.remove(&timer);
                Event::TimerFired(timer)
            }
            CallPopupMsg::Dismiss => Event::Dismiss,
            CallPopupMsg::SuppressForever => Event::SuppressForever,
            CallPopupMsg::ReopenFromBadge => Event::ReopenFromBadge,
        };

        let before = self.machine.projection();
        let effects = self.machine.handle(event);
        self.run_effects(ctx, effects);
        debug!(
            "Popup for {} is {:?} after {} dismissals",
            ctx.props().provider.id,
            self.machine.phase(),
            self.machine.dismiss_count()
        );
        self.machine.projection() != before
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let view = self.machine.projection();
        let provider = &ctx.props().provider;

        html! {
            <>
                if view.is_open {
                    <CallModal
                        provider={provider.clone()}
                        tuning={self.tuning}
                        reappearing={view.is_reappearing}
                        dialog_ref={self.dialog_ref.clone()}
                        on_dismiss={ctx.link().callback(|_| CallPopupMsg::Dismiss)}
                        on_suppress={ctx.link().callback(|_| CallPopupMsg::SuppressForever)}
                    />
                }
                if view.is_minimized {
                    <MinimizedBadge
                        provider={provider.clone()}
                        label={self.tuning.badge_label}
                        reopens={view.badge_reopens}
                        on_reopen={ctx.link().callback(|_| CallPopupMsg::ReopenFromBadge)}
                    />
                }
            </>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        let is_open = self.machine.projection().is_open;
        if !is_open {
            // Dropping the guard restores scroll and focus.
            self.focus_guard = None;
            return;
        }
        if self.focus_guard.is_none() {
            if let Some(dialog) = self.dialog_ref.cast::<HtmlElement>() {
                let on_cancel = ctx.link().callback(|_| CallPopupMsg::Dismiss);
                self.focus_guard = FocusGuard::engage(&dialog, on_cancel);
            }
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.timers.clear();
        self.focus_guard = None;
    }
}

impl CallPopup {
    fn run_effects(&mut self, ctx: &Context<Self>, effects: Vec<Effect>) {
        let provider_id = ctx.props().provider.id.as_str();
        for effect in effects {
            match effect {
                Effect::Arm { timer, after_ms } => {
                    let link = ctx.link().clone();
                    let handle = Timeout::new(after_ms, move || {
                        link.send_message(CallPopupMsg::TimerFired(timer));
                    });
                    // Replacing a handle cancels the timer it held.
                    self.timers.insert(timer, handle);
                }
                Effect::CancelTimers => self.timers.clear(),
                Effect::PersistDismissCount(count) => {
                    if let Err(e) = session::persist_dismiss_count(&self.store, provider_id, count) {
                        warn!("Failed to persist dismiss count for {}: {}", provider_id, e);
                    }
                }
                Effect::PersistSuppressed => {
                    if let Err(e) = session::persist_suppressed(&self.store, provider_id) {
                        warn!("Failed to persist suppress flag for {}: {}", provider_id, e);
                    }
                }
            }
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::popup::session::SessionStore;
    use crate::providers::BrandColors;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
    use web_sys::{window, Element, KeyboardEvent, KeyboardEventInit};
    use yew::AppHandle;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(provider_id: &str) -> (AppHandle<CallPopup>, Element) {
        let document = window().unwrap().document().unwrap();
        let root = document.create_element("div").unwrap();
        document.body().unwrap().append_child(&root).unwrap();

        let props = CallPopupProps {
            provider: Provider {
                id: provider_id.to_string(),
                name: "Test Fiber".to_string(),
                tagline: String::new(),
                colors: BrandColors {
                    primary: "#123456".to_string(),
                    accent: "#654321".to_string(),
                },
            },
            variant: PopupVariant::Standard,
        };
        let app = yew::Renderer::<CallPopup>::with_root_and_props(root.clone(), props).render();
        (app, root)
    }

    fn dialog_shown(root: &Element) -> bool {
        root.query_selector(".cta-dialog").ok().flatten().is_some()
    }

    fn page_overflow() -> String {
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
            .map(|body| body.style().get_property_value("overflow").unwrap())
            .unwrap_or_default()
    }

    #[wasm_bindgen_test]
    async fn first_visit_opens_after_delay_and_unmount_releases_the_page() {
        let (app, root) = mount("browser-popup-open");

        TimeoutFuture::new(100).await;
        assert!(!dialog_shown(&root));

        TimeoutFuture::new(600).await;
        assert!(dialog_shown(&root));
        assert_eq!(page_overflow(), "hidden");

        app.destroy();
        TimeoutFuture::new(20).await;
        assert!(!dialog_shown(&root));
        assert_eq!(page_overflow(), "");
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn unmount_before_the_initial_delay_never_opens() {
        let (app, root) = mount("browser-popup-early-unmount");

        TimeoutFuture::new(100).await;
        app.destroy();
        TimeoutFuture::new(700).await;

        assert!(!dialog_shown(&root));
        assert_eq!(page_overflow(), "");
        assert_eq!(
            SessionRecord::load(&BrowserSessionStore, "browser-popup-early-unmount"),
            SessionRecord::default()
        );
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn escape_dismisses_and_persists_the_count() {
        let (app, root) = mount("browser-popup-escape");
        TimeoutFuture::new(700).await;
        assert!(dialog_shown(&root));

        let init = KeyboardEventInit::new();
        init.set_key("Escape");
        init.set_bubbles(true);
        let escape = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        window().unwrap().document().unwrap().dispatch_event(&escape).unwrap();
        TimeoutFuture::new(20).await;

        assert!(!dialog_shown(&root));
        assert_eq!(page_overflow(), "");
        assert_eq!(
            BrowserSessionStore.get("dismissed-browser-popup-escape").unwrap().as_deref(),
            Some("1")
        );

        app.destroy();
        TimeoutFuture::new(20).await;
        root.remove();
    }
}
