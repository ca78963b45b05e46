pub mod gesture;
pub mod history;
pub mod player;
pub mod rules;
pub mod tally;
pub mod tracker;

pub use gesture::{
    is_primary_press, PointerKind, PressGesture, PressOutcome, PressPhase, TimerToken,
    LONG_PRESS_CANCEL_THRESHOLD_PX, LONG_PRESS_MS,
};
pub use history::{History, HISTORY_LIMIT};
pub use player::{
    default_player_name, is_valid_player_count, GameState, Player, PlayerId, DEFAULT_PLAYER_COUNT,
    MAX_PLAYERS, MIN_PLAYERS, START_SCORE,
};
pub use rules::{InputStyle, ResetMode, RoundRules, UnknownVariant, Variant, WinRule};
pub use tally::{build_tally, tally_seed, tally_width, ChalkStroke, TallyMetrics};
pub use tracker::{RoundTracker, ScoreChange, TrackerError};
