use std::fmt;
use std::str::FromStr;

use crate::player::START_SCORE;

pub const LONG_PRESS_GAIN: u32 = 2;

/// When a round is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinRule {
    /// Fewer than two players keep strokes; the survivor, if any, takes the Bolla.
    LastStanding,
    /// The first player wiped down to zero takes the Bolla.
    FirstToZero,
}

/// What the "new game" control clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Scores and Bolla; asks for confirmation first.
    NewGame,
    /// Scores only.
    NewRound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStyle {
    /// Tap to wipe a stroke, long press to add strokes back.
    Gesture,
    /// Explicit plus and minus buttons.
    Buttons,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRules {
    pub win_rule: WinRule,
    pub reset_mode: ResetMode,
    pub input_style: InputStyle,
    pub start_score: u32,
    pub long_press_gain: u32,
    pub show_score_number: bool,
    pub fullscreen_toggle: bool,
}

impl Default for RoundRules {
    fn default() -> Self {
        Variant::default().rules()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Tap,
    TapRound,
    Buttons,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Tap, Variant::TapRound, Variant::Buttons];

    pub fn rules(self) -> RoundRules {
        match self {
            Variant::Tap => RoundRules {
                win_rule: WinRule::LastStanding,
                reset_mode: ResetMode::NewGame,
                input_style: InputStyle::Gesture,
                start_score: START_SCORE,
                long_press_gain: LONG_PRESS_GAIN,
                show_score_number: false,
                fullscreen_toggle: true,
            },
            Variant::TapRound => RoundRules {
                win_rule: WinRule::LastStanding,
                reset_mode: ResetMode::NewRound,
                input_style: InputStyle::Gesture,
                start_score: START_SCORE,
                long_press_gain: LONG_PRESS_GAIN,
                show_score_number: false,
                fullscreen_toggle: false,
            },
            Variant::Buttons => RoundRules {
                win_rule: WinRule::FirstToZero,
                reset_mode: ResetMode::NewRound,
                input_style: InputStyle::Buttons,
                start_score: START_SCORE,
                long_press_gain: LONG_PRESS_GAIN,
                show_score_number: true,
                fullscreen_toggle: false,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Tap => "tap",
            Variant::TapRound => "tap-round",
            Variant::Buttons => "buttons",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant '{0}' (expected tap, tap-round or buttons)")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Variant::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant(trimmed.to_string()))
    }
}
