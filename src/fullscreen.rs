use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

const LABEL_ENTER: &str = "Vollbild";
const LABEL_EXIT: &str = "Vollbild beenden";
const LABEL_UNAVAILABLE: &str = "Vollbild nicht verfügbar";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FullscreenState {
    Unsupported,
    Inactive,
    Active,
}

impl FullscreenState {
    pub(crate) fn label(self) -> &'static str {
        match self {
            FullscreenState::Unsupported => LABEL_UNAVAILABLE,
            FullscreenState::Inactive => LABEL_ENTER,
            FullscreenState::Active => LABEL_EXIT,
        }
    }
}

pub(crate) fn current_state() -> FullscreenState {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return FullscreenState::Unsupported;
    };
    let supported = document
        .document_element()
        .map(|root| Reflect::has(&root, &JsValue::from_str("requestFullscreen")).unwrap_or(false))
        .unwrap_or(false);
    if !supported {
        FullscreenState::Unsupported
    } else if document.fullscreen_element().is_some() {
        FullscreenState::Active
    } else {
        FullscreenState::Inactive
    }
}

fn call_promise(target: &JsValue, method: &str) -> Result<Option<Promise>, JsValue> {
    let func = Reflect::get(target, &JsValue::from_str(method))?.dyn_into::<Function>()?;
    let value = func.call0(target)?;
    Ok(value.dyn_into::<Promise>().ok())
}

/// Enters or leaves fullscreen. Failures only reach the console.
pub(crate) fn toggle() {
    let state = current_state();
    if state == FullscreenState::Unsupported {
        return;
    }
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let request = match state {
        FullscreenState::Active => call_promise(&document, "exitFullscreen"),
        _ => match document.document_element() {
            Some(root) => call_promise(&root, "requestFullscreen"),
            None => return,
        },
    };
    match request {
        Ok(Some(promise)) => spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                gloo::console::error!("fullscreen toggle failed", err);
            }
        }),
        Ok(None) => {}
        Err(err) => {
            gloo::console::error!("fullscreen toggle failed", err);
        }
    }
}
