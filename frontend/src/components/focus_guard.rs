use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlElement, KeyboardEvent, Node};
use yew::Callback;

const FOCUSABLE: &str = "a[href], button:not([disabled]), input:not([disabled]), [tabindex]:not([tabindex=\"-1\"])";

/// Keyboard and scroll discipline for an open dialog. Engaging it moves focus
/// into the dialog, locks page scroll and routes Escape to `on_cancel`;
/// dropping it undoes all of that and hands focus back.
pub struct FocusGuard {
    document: Document,
    previous_focus: Option<HtmlElement>,
    body: Option<HtmlElement>,
    previous_overflow: String,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

impl FocusGuard {
    pub fn engage(dialog: &HtmlElement, on_cancel: Callback<()>) -> Option<Self> {
        let document = window()?.document()?;

        let previous_focus = document
            .active_element()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());

        let body = document.body();
        let previous_overflow = body
            .as_ref()
            .and_then(|body| body.style().get_property_value("overflow").ok())
            .unwrap_or_default();
        if let Some(body) = &body {
            if let Err(err) = body.style().set_property("overflow", "hidden") {
                debug!("Could not lock page scroll: {:?}", err);
            }
        }

        let trap_root = dialog.clone();
        let keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            match event.key().as_str() {
                "Escape" => {
                    event.prevent_default();
                    on_cancel.emit(());
                }
                "Tab" => wrap_tab_focus(&trap_root, &event),
                _ => {}
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);

        if let Err(err) =
            document.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
        {
            warn!("Could not listen for dialog keys: {:?}", err);
        }

        if let Err(err) = dialog.focus() {
            debug!("Could not focus dialog: {:?}", err);
        }

        Some(Self {
            document,
            previous_focus,
            body,
            previous_overflow,
            keydown,
        })
    }
}

impl Drop for FocusGuard {
    fn drop(&mut self) {
        let _ = self
            .document
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());

        if let Some(body) = &self.body {
            let style = body.style();
            let restored = if self.previous_overflow.is_empty() {
                style.remove_property("overflow").map(|_| ())
            } else {
                style.set_property("overflow", &self.previous_overflow)
            };
            if let Err(err) = restored {
                debug!("Could not restore page scroll: {:?}", err);
            }
        }

        if let Some(previous) = &self.previous_focus {
            let _ = previous.focus();
        }
    }
}

// Keeps Tab and Shift+Tab cycling inside the dialog.
fn wrap_tab_focus(root: &HtmlElement, event: &KeyboardEvent) {
    let Ok(candidates) = root.query_selector_all(FOCUSABLE) else {
        return;
    };
    let count = candidates.length();
    if count == 0 {
        event.prevent_default();
        return;
    }

    let as_element = |node: Option<Node>| node.and_then(|n| n.dyn_into::<HtmlElement>().ok());
    let (Some(first), Some(last)) = (
        as_element(candidates.item(0)),
        as_element(candidates.item(count - 1)),
    ) else {
        return;
    };

    let active = root.owner_document().and_then(|doc| doc.active_element());
    let is_active = |target: &HtmlElement| {
        active
            .as_ref()
            .map(|element| {
                let node: &Node = element.as_ref();
                target.is_same_node(Some(node))
            })
            .unwrap_or(false)
    };

    if event.shift_key() {
        if is_active(&first) || is_active(root) {
            event.prevent_default();
            let _ = last.focus();
        }
    } else if is_active(&last) || active.is_none() {
        event.prevent_default();
        let _ = first.focus();
    }
}
