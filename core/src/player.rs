pub type PlayerId = u32;

pub const START_SCORE: u32 = 7;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const DEFAULT_PLAYER_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    /// Rounds won ("Bolla").
    pub wins: u32,
}

impl Player {
    pub fn new(id: PlayerId, start_score: u32) -> Self {
        Self {
            id,
            name: default_player_name(id),
            score: start_score,
            wins: 0,
        }
    }

    pub fn is_in_round(&self) -> bool {
        self.score > 0
    }
}

pub fn default_player_name(id: PlayerId) -> String {
    format!("Spieler {id}")
}

pub fn is_valid_player_count(count: usize) -> bool {
    (MIN_PLAYERS..=MAX_PLAYERS).contains(&count)
}

/// Full scoreboard. `players` always holds ids `1..=player_count` in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub player_count: usize,
    pub players: Vec<Player>,
}

impl GameState {
    pub fn new(player_count: usize, start_score: u32) -> Self {
        let players = (1..=player_count as PlayerId)
            .map(|id| Player::new(id, start_score))
            .collect();
        Self {
            player_count,
            players,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    pub fn players_in_round(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|player| player.is_in_round())
    }

    pub fn reset_scores(&mut self, start_score: u32) {
        for player in &mut self.players {
            player.score = start_score;
        }
    }

    pub fn clear_wins(&mut self) {
        for player in &mut self.players {
            player.wins = 0;
        }
    }

    /// Rebuilds the roster to `count` slots, keeping players whose id is still in range.
    pub fn resize(&mut self, count: usize, start_score: u32) {
        let mut previous = std::mem::take(&mut self.players);
        self.players = (1..=count as PlayerId)
            .map(|id| {
                previous
                    .iter()
                    .position(|player| player.id == id)
                    .map(|index| previous.swap_remove(index))
                    .unwrap_or_else(|| Player::new(id, start_score))
            })
            .collect();
        self.player_count = count;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_COUNT, START_SCORE)
    }
}
