use kreide_core::tally::ChalkRng;
use kreide_core::{
    GameState, RoundRules, RoundTracker, ScoreChange, Variant, WinRule, HISTORY_LIMIT, START_SCORE,
};

fn tracker(variant: Variant, players: usize) -> RoundTracker {
    RoundTracker::with_player_count(variant.rules(), players).expect("valid player count")
}

fn scores(state: &GameState) -> Vec<u32> {
    state.players.iter().map(|player| player.score).collect()
}

fn wins(state: &GameState) -> Vec<u32> {
    state.players.iter().map(|player| player.wins).collect()
}

fn random_op(tracker: &mut RoundTracker, rng: &mut ChalkRng) {
    let pick = (rng.next_f32() * 6.0) as u32;
    let id = 1 + (rng.next_f32() * 5.0) as u32;
    match pick {
        0 | 1 => {
            tracker.change_score(id, -1);
        }
        2 => {
            tracker.change_score(id, -(1 + (rng.next_f32() * 9.0) as i32));
        }
        3 => {
            tracker.long_press(id);
        }
        4 => {
            let count = 2 + (rng.next_f32() * 3.0) as usize;
            tracker.set_player_count(count).expect("count in range");
        }
        _ => {
            tracker.rename_player(id, &format!("Spieler {}", id * 10));
        }
    }
}

#[test]
fn four_players_first_to_zero_scenario() {
    let mut tracker = tracker(Variant::Buttons, 4);
    for _ in 0..6 {
        tracker.change_score(1, -1);
    }
    assert_eq!(scores(tracker.state()), vec![1, 7, 7, 7]);

    let change = tracker.change_score(1, -1);
    assert_eq!(change, ScoreChange::RoundOver { winner: Some(1) });
    assert_eq!(scores(tracker.state()), vec![7; 4]);
    assert_eq!(wins(tracker.state()), vec![1, 0, 0, 0]);
}

#[test]
fn four_players_last_standing_keeps_playing() {
    let mut tracker = tracker(Variant::Tap, 4);
    for _ in 0..7 {
        tracker.change_score(1, -1);
    }
    assert_eq!(scores(tracker.state()), vec![0, 7, 7, 7]);
    assert_eq!(wins(tracker.state()), vec![0; 4]);

    tracker.change_score(2, -7);
    assert_eq!(
        tracker.change_score(3, -9),
        ScoreChange::RoundOver { winner: Some(4) }
    );
    assert_eq!(scores(tracker.state()), vec![7; 4]);
    assert_eq!(wins(tracker.state()), vec![0, 0, 0, 1]);
}

#[test]
fn no_survivor_resets_without_winner() {
    let mut tracker = tracker(Variant::Tap, 4);
    tracker.change_score(1, -7);
    tracker.change_score(2, -7);
    assert_eq!(tracker.set_player_count(2), Ok(true));
    assert_eq!(scores(tracker.state()), vec![0, 0]);

    assert_eq!(
        tracker.change_score(1, -1),
        ScoreChange::RoundOver { winner: None }
    );
    assert_eq!(scores(tracker.state()), vec![START_SCORE; 2]);
    assert_eq!(wins(tracker.state()), vec![0, 0]);
}

#[test]
fn shrinking_keeps_leading_players() {
    let mut tracker = tracker(Variant::Tap, 4);
    tracker.change_score(1, -3);
    tracker.rename_player(2, "Sepp");
    tracker.change_score(4, -2);
    let before = tracker.state().clone();

    assert_eq!(tracker.set_player_count(2), Ok(true));
    let state = tracker.state();
    assert_eq!(state.player_count, 2);
    assert_eq!(state.players.len(), 2);
    assert_eq!(state.players[0], before.players[0]);
    assert_eq!(state.players[1], before.players[1]);

    assert_eq!(tracker.set_player_count(3), Ok(true));
    let third = &tracker.state().players[2];
    assert_eq!((third.id, third.score, third.wins), (3, START_SCORE, 0));
    assert_eq!(third.name, "Spieler 3");
}

#[test]
fn two_undos_reverse_two_mutations() {
    let mut tracker = tracker(Variant::TapRound, 3);
    let initial = tracker.state().clone();
    tracker.change_score(2, -1);
    let after_first = tracker.state().clone();
    tracker.rename_player(3, "Resi");

    assert!(tracker.undo());
    assert_eq!(tracker.state(), &after_first);
    assert!(tracker.undo());
    assert_eq!(tracker.state(), &initial);
    assert!(!tracker.undo());
    assert_eq!(tracker.state(), &initial);
}

#[test]
fn undo_restores_round_win_and_player_count() {
    let mut tracker = tracker(Variant::Tap, 2);
    tracker.change_score(1, -6);
    let before_win = tracker.state().clone();
    tracker.change_score(1, -1);
    assert_eq!(wins(tracker.state()), vec![0, 1]);
    tracker.set_player_count(4).expect("valid count");

    tracker.undo();
    assert_eq!(tracker.state().player_count, 2);
    tracker.undo();
    assert_eq!(tracker.state(), &before_win);
}

#[test]
fn scores_never_negative_and_undo_is_exact() {
    for variant in Variant::ALL {
        let mut tracker = tracker(variant, 4);
        let mut rng = ChalkRng::new(0xC4A1_7A11);
        let mut seen = vec![tracker.state().clone()];
        for _ in 0..150 {
            let before = tracker.history_len();
            random_op(&mut tracker, &mut rng);
            if tracker.history_len() > before {
                seen.push(tracker.state().clone());
            } else {
                *seen.last_mut().expect("initial state") = tracker.state().clone();
            }
            let state = tracker.state();
            assert_eq!(state.players.len(), state.player_count);
            if variant.rules().win_rule == WinRule::FirstToZero {
                assert!(state.players.iter().all(|player| player.score > 0));
            }
        }
        seen.pop();
        while let Some(expected) = seen.pop() {
            assert!(tracker.undo());
            assert_eq!(tracker.state(), &expected);
        }
        assert!(!tracker.can_undo());
    }
}

#[test]
fn history_is_bounded() {
    let mut tracker = RoundTracker::new(RoundRules::default());
    for index in 0..(HISTORY_LIMIT + 50) {
        tracker.change_score(1 + (index % 4) as u32, 1);
        assert!(tracker.history_len() <= HISTORY_LIMIT);
    }
    assert_eq!(tracker.history_len(), HISTORY_LIMIT);
    let mut undone = 0;
    while tracker.undo() {
        undone += 1;
    }
    assert_eq!(undone, HISTORY_LIMIT);
}
