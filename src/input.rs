use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, PointerEvent, TouchEvent};
use yew::{Callback, NodeRef};

use crate::app_core::AppCore;
use kreide_core::{is_primary_press, PlayerId, PointerKind, PressGesture, PressOutcome, LONG_PRESS_MS};

pub(crate) type SharedPress = Rc<RefCell<PressBinding>>;

/// Per-card press state: the gesture machine plus the browser resources it drives.
pub(crate) struct PressBinding {
    gesture: PressGesture,
    active_pointer: Option<i32>,
    timer: Option<Timeout>,
    touch_fallback: bool,
}

impl PressBinding {
    pub(crate) fn new() -> Self {
        Self {
            gesture: PressGesture::new(),
            active_pointer: None,
            timer: None,
            touch_fallback: false,
        }
    }

    fn clear_timer(&mut self) {
        self.timer.take();
    }
}

impl Default for PressBinding {
    fn default() -> Self {
        Self::new()
    }
}

fn start_press(binding: &SharedPress, core: &Rc<AppCore>, id: PlayerId, x: f32, y: f32) {
    let token = binding.borrow_mut().gesture.press(x, y);
    let binding_for_timer = Rc::clone(binding);
    let core = Rc::clone(core);
    let timer = Timeout::new(LONG_PRESS_MS, move || {
        let outcome = {
            let mut binding = binding_for_timer.borrow_mut();
            binding.timer.take();
            binding.gesture.timer_elapsed(token)
        };
        if outcome == Some(PressOutcome::LongPress) {
            core.long_press(id);
        }
    });
    binding.borrow_mut().timer = Some(timer);
}

fn move_press(binding: &SharedPress, x: f32, y: f32) {
    let mut binding = binding.borrow_mut();
    if binding.gesture.moved(x, y) {
        binding.clear_timer();
    }
}

fn end_press(binding: &SharedPress, core: &AppCore, id: PlayerId) {
    let outcome = {
        let mut binding = binding.borrow_mut();
        binding.clear_timer();
        binding.gesture.release()
    };
    if outcome == Some(PressOutcome::Tap) {
        core.change_score(id, -1);
    }
}

fn abort_press(binding: &SharedPress) {
    let mut binding = binding.borrow_mut();
    binding.active_pointer = None;
    binding.clear_timer();
    binding.gesture.abort();
}

fn is_active_pointer(binding: &SharedPress, pointer_id: i32) -> bool {
    binding.borrow().active_pointer == Some(pointer_id)
}

pub(crate) struct PressHandlers {
    pub(crate) onpointerdown: Callback<PointerEvent>,
    pub(crate) onpointermove: Callback<PointerEvent>,
    pub(crate) onpointerup: Callback<PointerEvent>,
    /// Also serves `lostpointercapture`.
    pub(crate) onpointercancel: Callback<PointerEvent>,
}

/// Tap wipes one stroke, a long press hands strokes back.
/// Pointer capture targets `area`, since yew delegates events from the app root.
pub(crate) fn press_handlers(
    binding: &SharedPress,
    core: &Rc<AppCore>,
    id: PlayerId,
    area: &NodeRef,
) -> PressHandlers {
    let onpointerdown = {
        let binding = Rc::clone(binding);
        let core = Rc::clone(core);
        let area = area.clone();
        Callback::from(move |event: PointerEvent| {
            let kind = PointerKind::from_pointer_type(&event.pointer_type());
            if !is_primary_press(kind, event.button(), event.is_primary()) {
                return;
            }
            event.prevent_default();
            binding.borrow_mut().active_pointer = Some(event.pointer_id());
            if let Some(element) = area.cast::<Element>() {
                let _ = element.set_pointer_capture(event.pointer_id());
            }
            start_press(&binding, &core, id, event.client_x() as f32, event.client_y() as f32);
        })
    };
    let onpointermove = {
        let binding = Rc::clone(binding);
        Callback::from(move |event: PointerEvent| {
            if !is_active_pointer(&binding, event.pointer_id()) {
                return;
            }
            move_press(&binding, event.client_x() as f32, event.client_y() as f32);
        })
    };
    let onpointerup = {
        let binding = Rc::clone(binding);
        let core = Rc::clone(core);
        let area = area.clone();
        Callback::from(move |event: PointerEvent| {
            let pointer_id = event.pointer_id();
            if !is_active_pointer(&binding, pointer_id) {
                return;
            }
            binding.borrow_mut().active_pointer = None;
            if let Some(element) = area.cast::<Element>() {
                if element.has_pointer_capture(pointer_id) {
                    let _ = element.release_pointer_capture(pointer_id);
                }
            }
            end_press(&binding, &core, id);
        })
    };
    let onpointercancel = {
        let binding = Rc::clone(binding);
        Callback::from(move |event: PointerEvent| {
            if !is_active_pointer(&binding, event.pointer_id()) {
                return;
            }
            abort_press(&binding);
        })
    };
    PressHandlers {
        onpointerdown,
        onpointermove,
        onpointerup,
        onpointercancel,
    }
}

pub(crate) fn pointer_events_supported() -> bool {
    let Some(window) = web_sys::window() else {
        return true;
    };
    Reflect::has(&window, &JsValue::from_str("PointerEvent")).unwrap_or(true)
}

/// Keeps long presses from opening the context menu or selecting text.
pub(crate) fn suppress_native_gestures(element: &Element) -> Vec<EventListener> {
    ["contextmenu", "selectstart"]
        .into_iter()
        .map(|name| {
            EventListener::new_with_options(
                element,
                name,
                EventListenerOptions::enable_prevent_default(),
                |event: &Event| event.prevent_default(),
            )
        })
        .collect()
}

/// Single-finger touch handling for browsers without Pointer Events.
pub(crate) fn bind_touch_fallback(
    element: &Element,
    binding: &SharedPress,
    core: &Rc<AppCore>,
    id: PlayerId,
) -> Vec<EventListener> {
    let touchstart = {
        let binding = Rc::clone(binding);
        let core = Rc::clone(core);
        EventListener::new_with_options(
            element,
            "touchstart",
            EventListenerOptions::enable_prevent_default(),
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                let touches = event.touches();
                if touches.length() != 1 {
                    return;
                }
                binding.borrow_mut().touch_fallback = true;
                event.prevent_default();
                let (x, y) = touches
                    .item(0)
                    .map(|touch| (touch.client_x() as f32, touch.client_y() as f32))
                    .unwrap_or((0.0, 0.0));
                start_press(&binding, &core, id, x, y);
            },
        )
    };
    let touchend = {
        let binding = Rc::clone(binding);
        let core = Rc::clone(core);
        EventListener::new(element, "touchend", move |_event: &Event| {
            let was_active = std::mem::replace(&mut binding.borrow_mut().touch_fallback, false);
            if was_active {
                end_press(&binding, &core, id);
            }
        })
    };
    let touchcancel = {
        let binding = Rc::clone(binding);
        EventListener::new(element, "touchcancel", move |_event: &Event| {
            binding.borrow_mut().touch_fallback = false;
            abort_press(&binding);
        })
    };
    vec![touchstart, touchend, touchcancel]
}
