mod app_core;
mod app_router;
mod fullscreen;
mod input;
mod tally_view;
mod yew_app;

use gloo::events::{EventListener, EventListenerOptions};
use web_sys::Event;

use crate::app_core::AppCore;
use kreide_core::RoundTracker;

fn main() {
    console_error_panic_hook::set_once();

    let config = app_router::load_init_config();
    let rules = config.variant.rules();
    let tracker = match RoundTracker::with_player_count(rules, config.player_count) {
        Ok(tracker) => tracker,
        Err(err) => {
            gloo::console::warn!(err.to_string());
            RoundTracker::new(rules)
        }
    };
    gloo::console::log!(format!(
        "kreide: variant {} with {} players",
        config.variant,
        tracker.state().player_count
    ));

    // Long presses anywhere on the board must not open the context menu.
    if let Some(window) = web_sys::window() {
        EventListener::new_with_options(
            &window,
            "contextmenu",
            EventListenerOptions::enable_prevent_default(),
            |event: &Event| event.prevent_default(),
        )
        .forget();
    }

    yew_app::run(AppCore::new(tracker));
}
