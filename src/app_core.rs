use std::cell::RefCell;
use std::rc::Rc;

use kreide_core::{
    GameState, PlayerId, ResetMode, RoundRules, RoundTracker, ScoreChange, TrackerError,
};

pub(crate) type AppSubscriber = Rc<dyn Fn()>;

/// Shared owner of the scoreboard. Views hold an `Rc<AppCore>` and re-render
/// through subscriptions after every applied change.
pub(crate) struct AppCore {
    tracker: RefCell<RoundTracker>,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

#[derive(Clone, PartialEq)]
pub(crate) struct AppSnapshot {
    pub(crate) state: GameState,
    pub(crate) rules: RoundRules,
    pub(crate) can_undo: bool,
}

impl AppCore {
    pub(crate) fn new(tracker: RoundTracker) -> Rc<Self> {
        Rc::new(Self {
            tracker: RefCell::new(tracker),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub(crate) fn subscribe(&self, subscriber: AppSubscriber) -> AppSubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        AppSubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    fn notify(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }

    pub(crate) fn snapshot(&self) -> AppSnapshot {
        let tracker = self.tracker.borrow();
        AppSnapshot {
            state: tracker.state().clone(),
            rules: tracker.rules(),
            can_undo: tracker.can_undo(),
        }
    }

    pub(crate) fn rules(&self) -> RoundRules {
        self.tracker.borrow().rules()
    }

    pub(crate) fn player_name(&self, id: PlayerId) -> Option<String> {
        self.tracker
            .borrow()
            .state()
            .player(id)
            .map(|player| player.name.clone())
    }

    pub(crate) fn change_score(&self, id: PlayerId, delta: i32) {
        let change = self.tracker.borrow_mut().change_score(id, delta);
        self.after_score_change(id, change);
    }

    pub(crate) fn long_press(&self, id: PlayerId) {
        let change = self.tracker.borrow_mut().long_press(id);
        self.after_score_change(id, change);
    }

    fn after_score_change(&self, id: PlayerId, change: ScoreChange) {
        match change {
            ScoreChange::Ignored => {
                gloo::console::warn!(format!("score change ignored: no player {id}"));
                return;
            }
            ScoreChange::Applied { .. } => {}
            ScoreChange::RoundOver { winner: Some(winner) } => {
                let name = self.player_name(winner).unwrap_or_default();
                gloo::console::log!(format!("round over: Bolla for {name}"));
            }
            ScoreChange::RoundOver { winner: None } => {
                gloo::console::log!("round over: nobody left standing");
            }
        }
        self.notify();
    }

    pub(crate) fn rename_player(&self, id: PlayerId, name: &str) {
        let renamed = self.tracker.borrow_mut().rename_player(id, name);
        if renamed {
            self.notify();
        }
    }

    pub(crate) fn reset(&self) -> ResetMode {
        let mode = self.tracker.borrow_mut().reset();
        self.notify();
        mode
    }

    pub(crate) fn set_player_count(&self, count: usize) -> Result<(), TrackerError> {
        let changed = self.tracker.borrow_mut().set_player_count(count)?;
        if changed {
            self.notify();
        }
        Ok(())
    }

    pub(crate) fn undo(&self) {
        let restored = self.tracker.borrow_mut().undo();
        if restored {
            self.notify();
        }
    }
}

pub(crate) struct AppSubscription {
    subscriber: AppSubscriber,
    subscribers: Rc<RefCell<Vec<AppSubscriber>>>,
}

impl Drop for AppSubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}
