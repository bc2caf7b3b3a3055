//! Engine-to-host notifications
//!
//! The engine holds an `EngineObserver` and reports the displayed score every
//! running tick and the final score once per run. Hosts can pass closures,
//! an in-memory log, or the sending half of a channel drained by their loop.

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Displayed score after a tick (or 0 after reset)
    ScoreChanged(u32),
    /// Run ended on a collision with this final score
    GameOver(u32),
}

/// Receives engine notifications
pub trait EngineObserver {
    fn notify_score(&mut self, score: u32);
    fn notify_game_over(&mut self, final_score: u32);
}

impl<T: EngineObserver + ?Sized> EngineObserver for &mut T {
    fn notify_score(&mut self, score: u32) {
        (**self).notify_score(score)
    }

    fn notify_game_over(&mut self, final_score: u32) {
        (**self).notify_game_over(final_score)
    }
}

impl<T: EngineObserver + ?Sized> EngineObserver for Box<T> {
    fn notify_score(&mut self, score: u32) {
        (**self).notify_score(score)
    }

    fn notify_game_over(&mut self, final_score: u32) {
        (**self).notify_game_over(final_score)
    }
}

/// Observer built from a pair of closures
pub struct Callbacks<S, G> {
    pub on_score_update: S,
    pub on_game_over: G,
}

impl<S, G> Callbacks<S, G>
where
    S: FnMut(u32),
    G: FnMut(u32),
{
    pub fn new(on_score_update: S, on_game_over: G) -> Self {
        Self {
            on_score_update,
            on_game_over,
        }
    }
}

impl<S, G> EngineObserver for Callbacks<S, G>
where
    S: FnMut(u32),
    G: FnMut(u32),
{
    fn notify_score(&mut self, score: u32) {
        (self.on_score_update)(score)
    }

    fn notify_game_over(&mut self, final_score: u32) {
        (self.on_game_over)(final_score)
    }
}

/// Records every event in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn score_updates(&self) -> impl Iterator<Item = u32> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::ScoreChanged(s) => Some(*s),
            GameEvent::GameOver(_) => None,
        })
    }

    pub fn game_overs(&self) -> impl Iterator<Item = u32> + '_ {
        self.events.iter().filter_map(|e| match e {
            GameEvent::GameOver(s) => Some(*s),
            GameEvent::ScoreChanged(_) => None,
        })
    }
}

impl EngineObserver for EventLog {
    fn notify_score(&mut self, score: u32) {
        self.events.push(GameEvent::ScoreChanged(score));
    }

    fn notify_game_over(&mut self, final_score: u32) {
        self.events.push(GameEvent::GameOver(final_score));
    }
}

impl EngineObserver for Sender<GameEvent> {
    fn notify_score(&mut self, score: u32) {
        if self.send(GameEvent::ScoreChanged(score)).is_err() {
            log::debug!("score event dropped, receiver gone");
        }
    }

    fn notify_game_over(&mut self, final_score: u32) {
        if self.send(GameEvent::GameOver(final_score)).is_err() {
            log::warn!("game over event dropped, receiver gone");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_callbacks_forward() {
        let mut scores = Vec::new();
        let mut finals = Vec::new();
        {
            let mut observer = Callbacks::new(|s| scores.push(s), |f| finals.push(f));
            observer.notify_score(3);
            observer.notify_score(4);
            observer.notify_game_over(4);
        }
        assert_eq!(scores, vec![3, 4]);
        assert_eq!(finals, vec![4]);
    }

    #[test]
    fn test_event_log_filters() {
        let mut log = EventLog::new();
        log.notify_score(1);
        log.notify_game_over(1);
        log.notify_score(0);
        assert_eq!(log.score_updates().collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(log.game_overs().collect::<Vec<_>>(), vec![1]);
        assert_eq!(log.drain().len(), 3);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_channel_observer() {
        let (mut tx, rx) = mpsc::channel();
        tx.notify_score(7);
        tx.notify_game_over(7);
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![GameEvent::ScoreChanged(7), GameEvent::GameOver(7)]
        );
        drop(rx);
        // Receiver gone: must not panic
        tx.notify_score(8);
    }
}
