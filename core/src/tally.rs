//! Hand-drawn chalk tally geometry.
//!
//! Every five strokes collapse into a crossed pair, the rest are drawn as
//! upright bars. Jitter comes from a seeded generator so a card redraws the
//! same chalk for the same score.

use crate::player::PlayerId;

pub const COMPACT_MAX_WIDTH_PX: f32 = 520.0;
pub const STROKE_COLOR: &str = "#f5f5f5";

const STROKE_WIDTH_JITTER: f32 = 1.8;
const OPACITY_MIN: f32 = 0.86;
const OPACITY_JITTER: f32 = 0.14;
const CROSS_INSET: f32 = 6.0;
const CROSS_JITTER: f32 = 3.0;
const BAR_JITTER_X: f32 = 2.4;
const BAR_JITTER_END: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TallyMetrics {
    pub stroke_base: f32,
    pub group_space: f32,
    pub remainder_spacing: f32,
    pub cross_width: f32,
    pub base_x: f32,
    pub base_y: f32,
    pub bar_height: f32,
}

impl TallyMetrics {
    pub const REGULAR: TallyMetrics = TallyMetrics {
        stroke_base: 6.9,
        group_space: 70.0,
        remainder_spacing: 15.0,
        cross_width: 42.0,
        base_x: 18.0,
        base_y: 9.0,
        bar_height: 122.0,
    };

    pub const COMPACT: TallyMetrics = TallyMetrics {
        stroke_base: 4.7,
        group_space: 54.0,
        remainder_spacing: 12.0,
        cross_width: 32.0,
        base_x: 18.0,
        base_y: 9.0,
        bar_height: 122.0,
    };

    pub fn for_viewport_width(width_px: f32) -> Self {
        if width_px <= COMPACT_MAX_WIDTH_PX {
            Self::COMPACT
        } else {
            Self::REGULAR
        }
    }

    /// Height of the drawing including the stroke overshoot at both ends.
    pub fn view_height(&self) -> f32 {
        self.base_y * 2.0 + self.bar_height
    }
}

impl Default for TallyMetrics {
    fn default() -> Self {
        Self::REGULAR
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChalkStroke {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub opacity: f32,
}

/// 32-bit mulberry generator; yields values in `[0, 1)`.
#[derive(Clone, Debug)]
pub struct ChalkRng {
    state: u32,
}

impl ChalkRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = (self.state ^ (self.state >> 15)).wrapping_mul(self.state | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        ((t ^ (t >> 14)) >> 8) as f32 / 16_777_216.0
    }

    /// Centered jitter in `[-range / 2, range / 2)`.
    fn jitter(&mut self, range: f32) -> f32 {
        (self.next_f32() - 0.5) * range
    }
}

pub fn tally_seed(id: PlayerId, score: u32) -> u32 {
    id.wrapping_mul(1000).wrapping_add(score)
}

fn stroke(rng: &mut ChalkRng, x1: f32, y1: f32, x2: f32, y2: f32, stroke_base: f32) -> ChalkStroke {
    let width = stroke_base + rng.next_f32() * STROKE_WIDTH_JITTER;
    let opacity = (OPACITY_MIN + rng.next_f32() * OPACITY_JITTER).min(1.0);
    ChalkStroke {
        x1,
        y1,
        x2,
        y2,
        width,
        opacity,
    }
}

pub fn build_tally(score: u32, seed: u32, metrics: &TallyMetrics) -> Vec<ChalkStroke> {
    let mut rng = ChalkRng::new(seed);
    let groups = score / 5;
    let remainder = score % 5;
    let mut strokes = Vec::with_capacity((groups * 2 + remainder) as usize);
    let top = metrics.base_y + CROSS_INSET;
    let bottom = metrics.base_y + metrics.bar_height - CROSS_INSET;

    for group in 0..groups {
        let start_x = metrics.base_x + group as f32 * metrics.group_space;
        let end_x = start_x + metrics.cross_width;

        let x1 = start_x + rng.jitter(CROSS_JITTER);
        let y1 = top + rng.jitter(CROSS_JITTER);
        let x2 = end_x + rng.jitter(CROSS_JITTER);
        let y2 = bottom + rng.jitter(CROSS_JITTER);
        strokes.push(stroke(&mut rng, x1, y1, x2, y2, metrics.stroke_base));

        let x1 = end_x + rng.jitter(CROSS_JITTER);
        let y1 = top + rng.jitter(CROSS_JITTER);
        let x2 = start_x + rng.jitter(CROSS_JITTER);
        let y2 = bottom + rng.jitter(CROSS_JITTER);
        strokes.push(stroke(&mut rng, x1, y1, x2, y2, metrics.stroke_base));
    }

    let bars_x = metrics.base_x + groups as f32 * metrics.group_space;
    for index in 0..remainder {
        let x = bars_x + index as f32 * metrics.remainder_spacing + rng.jitter(BAR_JITTER_X);
        let y1 = metrics.base_y + rng.jitter(BAR_JITTER_END);
        let y2 = metrics.base_y + metrics.bar_height + rng.jitter(BAR_JITTER_END);
        strokes.push(stroke(&mut rng, x, y1, x, y2, metrics.stroke_base));
    }
    strokes
}

/// Width needed to show every stroke, never narrower than one crossed group.
pub fn tally_width(strokes: &[ChalkStroke], metrics: &TallyMetrics) -> f32 {
    let min_width = metrics.base_x * 2.0 + metrics.cross_width;
    strokes
        .iter()
        .map(|stroke| stroke.x1.max(stroke.x2) + stroke.width)
        .fold(min_width, f32::max)
        .ceil()
}
