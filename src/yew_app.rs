use std::rc::Rc;

use gloo::events::EventListener;
use web_sys::{Element, HtmlSelectElement};
use yew::prelude::*;

use crate::app_core::AppCore;
use crate::fullscreen::{self, FullscreenState};
use crate::input::{self, PressBinding};
use crate::tally_view::{self, BollaDots, ChalkTally};
use kreide_core::{
    InputStyle, Player, ResetMode, RoundRules, TallyMetrics, MAX_PLAYERS, MIN_PLAYERS,
};

const RENAME_PROMPT: &str = "Spielernamen eingeben:";
const NEW_GAME_CONFIRM: &str =
    "Neues Spiel starten? Alle Bolla werden gelöscht und alle Spieler auf 7 Striche gesetzt.";

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) core: Rc<AppCore>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }
}

fn reset_label(mode: ResetMode) -> &'static str {
    match mode {
        ResetMode::NewGame => "Neues Spiel",
        ResetMode::NewRound => "Neue Runde",
    }
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let app_core = props.core.clone();
    let snapshot = use_state(|| app_core.snapshot());
    let metrics = use_state(tally_view::viewport_metrics);
    let fullscreen_state = use_state(fullscreen::current_state);
    {
        let snapshot = snapshot.clone();
        let core = app_core.clone();
        use_effect_with((), move |_| {
            let core_for_hook = core.clone();
            let subscription = core.subscribe(Rc::new(move || {
                snapshot.set(core_for_hook.snapshot());
            }));
            move || drop(subscription)
        });
    }
    {
        let metrics = metrics.clone();
        let fullscreen_state = fullscreen_state.clone();
        use_effect_with((), move |_| {
            let mut listeners = Vec::new();
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    listeners.push(EventListener::new(&document, "fullscreenchange", move |_| {
                        fullscreen_state.set(fullscreen::current_state());
                    }));
                }
                listeners.push(EventListener::new(&window, "resize", move |_| {
                    metrics.set(tally_view::viewport_metrics());
                }));
            }
            move || drop(listeners)
        });
    }

    let rules = snapshot.rules;
    let player_count = snapshot.state.player_count;
    let count_select = use_node_ref();
    {
        // `selected` stops applying once the user has picked an option.
        let count_select = count_select.clone();
        use_effect_with(player_count, move |count| {
            if let Some(select) = count_select.cast::<HtmlSelectElement>() {
                select.set_value(&count.to_string());
            }
        });
    }

    let on_count_change = {
        let core = app_core.clone();
        Callback::from(move |event: Event| {
            let Some(select) = event.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            let Ok(count) = select.value().parse::<usize>() else {
                return;
            };
            if let Err(err) = core.set_player_count(count) {
                gloo::console::warn!(err.to_string());
            }
        })
    };
    let on_reset = {
        let core = app_core.clone();
        Callback::from(move |_: MouseEvent| {
            if core.rules().reset_mode == ResetMode::NewGame
                && !gloo::dialogs::confirm(NEW_GAME_CONFIRM)
            {
                return;
            }
            core.reset();
        })
    };
    let on_undo = {
        let core = app_core.clone();
        Callback::from(move |_: MouseEvent| core.undo())
    };
    let on_fullscreen = Callback::from(|_: MouseEvent| fullscreen::toggle());

    let count_options: Html = (MIN_PLAYERS..=MAX_PLAYERS)
        .map(|count| {
            html! {
                <option value={count.to_string()} selected={count == player_count}>
                    {format!("{count} Spieler")}
                </option>
            }
        })
        .collect();
    let fullscreen_button = if rules.fullscreen_toggle {
        html! {
            <button
                class="fullscreen-btn"
                onclick={on_fullscreen}
                disabled={*fullscreen_state == FullscreenState::Unsupported}
            >
                {fullscreen_state.label()}
            </button>
        }
    } else {
        html! {}
    };
    let cards: Html = snapshot
        .state
        .players
        .iter()
        .map(|player| {
            html! {
                <PlayerCard
                    key={player.id}
                    core={app_core.clone()}
                    player={player.clone()}
                    rules={rules}
                    metrics={*metrics}
                />
            }
        })
        .collect();

    html! {
        <>
            <header class="toolbar">
                <select
                    ref={count_select}
                    class="player-count"
                    aria-label="Spieleranzahl"
                    onchange={on_count_change}
                >
                    {count_options}
                </select>
                <button class="new-round-btn" onclick={on_reset}>
                    {reset_label(rules.reset_mode)}
                </button>
                <button class="undo-btn" onclick={on_undo} disabled={!snapshot.can_undo}>
                    {"Rückgängig"}
                </button>
                {fullscreen_button}
            </header>
            <main class={classes!("board", format!("layout-{player_count}"))}>
                {cards}
            </main>
        </>
    }
}

#[derive(Properties)]
struct PlayerCardProps {
    core: Rc<AppCore>,
    player: Player,
    rules: RoundRules,
    metrics: TallyMetrics,
}

impl PartialEq for PlayerCardProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
            && self.player == other.player
            && self.rules == other.rules
            && self.metrics == other.metrics
    }
}

#[function_component(PlayerCard)]
fn player_card(props: &PlayerCardProps) -> Html {
    let id = props.player.id;
    let binding = use_mut_ref(PressBinding::new);
    let score_area = use_node_ref();
    let gesture_input = props.rules.input_style == InputStyle::Gesture;
    {
        let binding = binding.clone();
        let score_area = score_area.clone();
        let core = props.core.clone();
        use_effect_with((id, gesture_input), move |_| {
            let mut listeners = Vec::new();
            if let Some(element) = score_area.cast::<Element>() {
                listeners.extend(input::suppress_native_gestures(&element));
                if gesture_input && !input::pointer_events_supported() {
                    listeners.extend(input::bind_touch_fallback(&element, &binding, &core, id));
                }
            }
            move || drop(listeners)
        });
    }

    let on_rename = {
        let core = props.core.clone();
        Callback::from(move |_: MouseEvent| {
            let current = core.player_name(id).unwrap_or_default();
            let Some(name) = gloo::dialogs::prompt(RENAME_PROMPT, Some(&current)) else {
                return;
            };
            if name.trim().is_empty() {
                gloo::console::log!("rename ignored: empty name");
                return;
            }
            core.rename_player(id, &name);
        })
    };

    let tally = html! {
        <ChalkTally player_id={id} score={props.player.score} metrics={props.metrics} />
    };
    let score_area_html = if gesture_input {
        let handlers = input::press_handlers(&binding, &props.core, id, &score_area);
        html! {
            <div
                class="score-area"
                ref={score_area}
                onpointerdown={handlers.onpointerdown}
                onpointermove={handlers.onpointermove}
                onpointerup={handlers.onpointerup}
                onpointercancel={handlers.onpointercancel.clone()}
                onlostpointercapture={handlers.onpointercancel}
            >
                {tally}
            </div>
        }
    } else {
        let on_minus = {
            let core = props.core.clone();
            Callback::from(move |_: MouseEvent| core.change_score(id, -1))
        };
        let on_plus = {
            let core = props.core.clone();
            Callback::from(move |_: MouseEvent| core.change_score(id, 1))
        };
        html! {
            <div class="score-area" ref={score_area}>
                {tally}
                <div class="score-controls">
                    <button class="score-btn minus" aria-label="Strich wegwischen" onclick={on_minus}>
                        {"−"}
                    </button>
                    if props.rules.show_score_number {
                        <span class="score-number">{props.player.score}</span>
                    }
                    <button class="score-btn plus" aria-label="Strich dazu" onclick={on_plus}>
                        {"+"}
                    </button>
                </div>
            </div>
        }
    };

    html! {
        <section class="player-card">
            <div class="player-head">
                <button class="player-name" onclick={on_rename}>{props.player.name.clone()}</button>
                <BollaDots count={props.player.wins} />
            </div>
            {score_area_html}
        </section>
    }
}

pub(crate) fn run(core: Rc<AppCore>) {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("app"));
    match root {
        Some(root) => {
            yew::Renderer::<App>::with_root_and_props(root, AppProps { core }).render();
        }
        None => {
            yew::Renderer::<App>::with_props(AppProps { core }).render();
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use kreide_core::{RoundTracker, Variant, LONG_PRESS_MS};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{EventInit, HtmlElement, PointerEvent, PointerEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(core: Rc<AppCore>) -> Element {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        yew::Renderer::<App>::with_root_and_props(root.clone(), AppProps { core }).render();
        root
    }

    fn count(root: &Element, selector: &str) -> u32 {
        root.query_selector_all(selector)
            .map(|list| list.length())
            .unwrap_or(0)
    }

    fn first(root: &Element, selector: &str) -> Element {
        root.query_selector(selector)
            .ok()
            .flatten()
            .unwrap_or_else(|| panic!("missing {selector}"))
    }

    fn first_tally_label(root: &Element) -> Option<String> {
        first(root, ".player-card .chalk-score").get_attribute("aria-label")
    }

    fn pointer(target: &Element, kind: &str) {
        let init = PointerEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        init.set_pointer_id(1);
        init.set_pointer_type("touch");
        init.set_is_primary(true);
        let event = PointerEvent::new_with_event_init_dict(kind, &init).expect("pointer event");
        target.dispatch_event(&event).expect("dispatch pointer event");
    }

    fn pick_player_count(select: &HtmlSelectElement, count: &str) {
        select.set_value(count);
        let init = EventInit::new();
        init.set_bubbles(true);
        let event = Event::new_with_event_init_dict("change", &init).expect("change event");
        select.dispatch_event(&event).expect("dispatch change");
    }

    #[wasm_bindgen_test(async)]
    async fn tap_on_score_area_wipes_one_stroke() {
        set_panic_hook();
        let core = AppCore::new(
            RoundTracker::with_player_count(Variant::Tap.rules(), 2).expect("valid count"),
        );
        let root = mount(core.clone());
        TimeoutFuture::new(0).await;
        let area = first(&root, ".score-area");

        pointer(&area, "pointerdown");
        pointer(&area, "pointerup");
        TimeoutFuture::new(0).await;
        assert_eq!(first_tally_label(&root).as_deref(), Some("6 Striche"));

        // The cancelled long-press timer must not add strokes afterwards.
        TimeoutFuture::new(LONG_PRESS_MS + 150).await;
        assert_eq!(first_tally_label(&root).as_deref(), Some("6 Striche"));
        assert_eq!(core.snapshot().state.players[0].score, 6);
    }

    #[wasm_bindgen_test(async)]
    async fn held_press_adds_two_strokes() {
        set_panic_hook();
        let core = AppCore::new(
            RoundTracker::with_player_count(Variant::TapRound.rules(), 2).expect("valid count"),
        );
        let root = mount(core.clone());
        TimeoutFuture::new(0).await;
        let area = first(&root, ".score-area");

        pointer(&area, "pointerdown");
        TimeoutFuture::new(LONG_PRESS_MS + 150).await;
        assert_eq!(first_tally_label(&root).as_deref(), Some("9 Striche"));

        pointer(&area, "pointerup");
        TimeoutFuture::new(0).await;
        assert_eq!(first_tally_label(&root).as_deref(), Some("9 Striche"));
    }

    #[wasm_bindgen_test(async)]
    async fn player_count_select_follows_undo() {
        set_panic_hook();
        let core = AppCore::new(RoundTracker::new(Variant::Tap.rules()));
        let root = mount(core.clone());
        TimeoutFuture::new(0).await;
        let select = first(&root, ".player-count")
            .dyn_into::<HtmlSelectElement>()
            .expect("select element");

        for value in ["2", "4", "3"] {
            pick_player_count(&select, value);
            TimeoutFuture::new(0).await;
        }
        assert_eq!(count(&root, ".player-card"), 3);

        first(&root, ".undo-btn")
            .dyn_into::<HtmlElement>()
            .expect("undo button")
            .click();
        TimeoutFuture::new(0).await;
        assert_eq!(count(&root, ".player-card"), 4);
        assert_eq!(select.value(), "4");
    }

    #[wasm_bindgen_test(async)]
    async fn renders_one_card_per_player() {
        set_panic_hook();
        let core = AppCore::new(RoundTracker::new(Variant::Tap.rules()));
        let root = mount(core.clone());
        TimeoutFuture::new(0).await;
        assert_eq!(count(&root, ".player-card"), 4);
        assert_eq!(count(&root, ".board.layout-4"), 1);
        assert_eq!(count(&root, ".fullscreen-btn"), 1);
        assert_eq!(count(&root, ".undo-btn[disabled]"), 1);

        core.set_player_count(2).expect("valid count");
        TimeoutFuture::new(0).await;
        assert_eq!(count(&root, ".player-card"), 2);
        assert_eq!(count(&root, ".board.layout-2"), 1);
        assert_eq!(count(&root, ".undo-btn[disabled]"), 0);
    }

    #[wasm_bindgen_test(async)]
    async fn tally_and_bolla_follow_score() {
        set_panic_hook();
        let core = AppCore::new(
            RoundTracker::with_player_count(Variant::Tap.rules(), 2).expect("valid count"),
        );
        let root = mount(core.clone());
        TimeoutFuture::new(0).await;
        assert_eq!(count(&root, ".player-card line"), 8);

        core.change_score(2, -7);
        TimeoutFuture::new(0).await;
        assert_eq!(count(&root, ".bolla-dot"), 1);
        assert_eq!(count(&root, ".player-card line"), 8);

        core.change_score(1, -2);
        TimeoutFuture::new(0).await;
        assert_eq!(count(&root, ".player-card line"), 6);
    }

    #[wasm_bindgen_test(async)]
    async fn button_variant_shows_numbers() {
        set_panic_hook();
        let core = AppCore::new(RoundTracker::new(Variant::Buttons.rules()));
        let root = mount(core);
        TimeoutFuture::new(0).await;
        assert_eq!(count(&root, ".score-number"), 4);
        assert_eq!(count(&root, ".score-btn"), 8);
        assert_eq!(count(&root, ".fullscreen-btn"), 0);
    }
}
