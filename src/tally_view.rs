use yew::prelude::*;

use kreide_core::tally::STROKE_COLOR;
use kreide_core::{build_tally, tally_seed, tally_width, PlayerId, TallyMetrics};

pub(crate) const COMPACT_MEDIA_QUERY: &str = "(max-width: 520px)";

pub(crate) fn viewport_metrics() -> TallyMetrics {
    let compact = web_sys::window()
        .and_then(|window| window.match_media(COMPACT_MEDIA_QUERY).ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false);
    if compact {
        TallyMetrics::COMPACT
    } else {
        TallyMetrics::REGULAR
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct TallyProps {
    pub(crate) player_id: PlayerId,
    pub(crate) score: u32,
    pub(crate) metrics: TallyMetrics,
}

#[function_component(ChalkTally)]
pub(crate) fn chalk_tally(props: &TallyProps) -> Html {
    let metrics = props.metrics;
    let strokes = build_tally(props.score, tally_seed(props.player_id, props.score), &metrics);
    let width = tally_width(&strokes, &metrics);
    let height = metrics.view_height();
    let lines: Html = strokes
        .iter()
        .map(|stroke| {
            html! {
                <line
                    x1={format!("{:.2}", stroke.x1)}
                    y1={format!("{:.2}", stroke.y1)}
                    x2={format!("{:.2}", stroke.x2)}
                    y2={format!("{:.2}", stroke.y2)}
                    stroke={STROKE_COLOR}
                    stroke-linecap="round"
                    stroke-width={format!("{:.2}", stroke.width)}
                    opacity={format!("{:.2}", stroke.opacity)}
                />
            }
        })
        .collect();
    html! {
        <svg
            class="chalk-score"
            viewBox={format!("0 0 {width} {height}")}
            preserveAspectRatio="xMinYMid meet"
            role="img"
            aria-label={format!("{} Striche", props.score)}
        >
            {lines}
        </svg>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct BollaProps {
    pub(crate) count: u32,
}

#[function_component(BollaDots)]
pub(crate) fn bolla_dots(props: &BollaProps) -> Html {
    html! {
        <span class="bolla-dots" title={format!("{} Bolla", props.count)}>
            { for (0..props.count).map(|_| html! { <span class="bolla-dot" aria-hidden="true"></span> }) }
        </span>
    }
}
