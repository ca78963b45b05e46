use crate::history::History;
use crate::player::{is_valid_player_count, GameState, PlayerId, DEFAULT_PLAYER_COUNT};
use crate::rules::{ResetMode, RoundRules, WinRule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreChange {
    /// No such player; nothing recorded.
    Ignored,
    Applied { score: u32 },
    /// The change ended the round and every score went back to the start.
    RoundOver { winner: Option<PlayerId> },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("player count must be between 2 and 4, got {0}")]
    InvalidPlayerCount(usize),
}

/// Owns the scoreboard and its undo history. Every mutation records the prior
/// state first, so `undo` always lands on the exact previous board.
#[derive(Debug, Clone)]
pub struct RoundTracker {
    state: GameState,
    history: History<GameState>,
    rules: RoundRules,
}

impl RoundTracker {
    pub fn new(rules: RoundRules) -> Self {
        Self {
            state: GameState::new(DEFAULT_PLAYER_COUNT, rules.start_score),
            history: History::new(),
            rules,
        }
    }

    pub fn with_player_count(rules: RoundRules, player_count: usize) -> Result<Self, TrackerError> {
        if !is_valid_player_count(player_count) {
            return Err(TrackerError::InvalidPlayerCount(player_count));
        }
        Ok(Self {
            state: GameState::new(player_count, rules.start_score),
            history: History::new(),
            rules,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> RoundRules {
        self.rules
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn record(&mut self) {
        self.history.record(self.state.clone());
    }

    pub fn change_score(&mut self, id: PlayerId, delta: i32) -> ScoreChange {
        let Some(previous) = self.state.player(id).map(|player| player.score) else {
            return ScoreChange::Ignored;
        };
        self.record();
        let score = if delta < 0 {
            previous.saturating_sub(delta.unsigned_abs())
        } else {
            previous.saturating_add(delta.unsigned_abs())
        };
        if let Some(player) = self.state.player_mut(id) {
            player.score = score;
        }

        let round_over = match self.rules.win_rule {
            WinRule::LastStanding => {
                let mut remaining = self.state.players_in_round().map(|player| player.id);
                match (remaining.next(), remaining.next()) {
                    (None, _) => Some(None),
                    (Some(survivor), None) => Some(Some(survivor)),
                    _ => None,
                }
            }
            WinRule::FirstToZero => (previous > 0 && score == 0).then_some(Some(id)),
        };

        match round_over {
            Some(winner) => {
                if let Some(player) = winner.and_then(|winner| self.state.player_mut(winner)) {
                    player.wins += 1;
                }
                self.state.reset_scores(self.rules.start_score);
                ScoreChange::RoundOver { winner }
            }
            None => ScoreChange::Applied { score },
        }
    }

    /// Long press on a tally: refills a wiped-out player, otherwise adds strokes back.
    pub fn long_press(&mut self, id: PlayerId) -> ScoreChange {
        let Some(score) = self.state.player(id).map(|player| player.score) else {
            return ScoreChange::Ignored;
        };
        let delta = if score == 0 {
            self.rules.start_score
        } else {
            self.rules.long_press_gain
        };
        self.change_score(id, delta as i32)
    }

    /// Returns false when the player is unknown or the trimmed name is empty.
    pub fn rename_player(&mut self, id: PlayerId, name: &str) -> bool {
        let trimmed = name.trim();
        if trimmed.is_empty() || self.state.player(id).is_none() {
            return false;
        }
        self.record();
        if let Some(player) = self.state.player_mut(id) {
            player.name = trimmed.to_string();
        }
        true
    }

    pub fn reset_round(&mut self) {
        self.record();
        self.state.reset_scores(self.rules.start_score);
    }

    pub fn start_new_game(&mut self) {
        self.record();
        self.state.reset_scores(self.rules.start_score);
        self.state.clear_wins();
    }

    /// Runs whichever reset the rules assign to the "new game" control.
    pub fn reset(&mut self) -> ResetMode {
        match self.rules.reset_mode {
            ResetMode::NewGame => self.start_new_game(),
            ResetMode::NewRound => self.reset_round(),
        }
        self.rules.reset_mode
    }

    /// Returns `Ok(false)` when the count is unchanged.
    pub fn set_player_count(&mut self, count: usize) -> Result<bool, TrackerError> {
        if !is_valid_player_count(count) {
            return Err(TrackerError::InvalidPlayerCount(count));
        }
        if count == self.state.player_count {
            return Ok(false);
        }
        self.record();
        self.state.resize(count, self.rules.start_score);
        Ok(true)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(snapshot) => {
                self.state = snapshot;
                true
            }
            None => false,
        }
    }
}

impl Default for RoundTracker {
    fn default() -> Self {
        Self::new(RoundRules::default())
    }
}
