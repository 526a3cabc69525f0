use super::{ActionOutcome, Game, GameError};
use crate::{herd_score, only_complete_sets, ActionId, Event, EventBus, GameState};
use tracing::{debug, info};

impl Game {
    pub(super) fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.state != GameState::InProgress {
            return Err(GameError::NotInProgress);
        }
        Ok(())
    }

    pub(super) fn ensure_turn(&self, seat: usize, action: &'static str) -> Result<(), GameError> {
        if seat != self.current_seat {
            return Err(GameError::NotYourTurn {
                player: self.table.name(seat).to_string(),
                action,
            });
        }
        Ok(())
    }

    pub(super) fn ensure_idle(&self) -> Result<(), GameError> {
        if self.current_action.is_some() {
            return Err(GameError::ActionInProgress);
        }
        Ok(())
    }

    pub(super) fn allocate_action_id(&mut self) -> ActionId {
        let id = ActionId(self.next_action_id);
        self.next_action_id += 1;
        id
    }

    pub(super) fn conclude(&mut self, outcome: ActionOutcome, events: &mut EventBus) {
        if outcome == ActionOutcome::Finished {
            self.end_current_action(events);
        }
    }

    fn end_current_action(&mut self, events: &mut EventBus) {
        if let Some(action) = self.current_action.take() {
            debug!(game = %self.id, action = %action.id(), kind = %action.kind(), "action finished");
            self.history.push(action);
        }

        if self.is_over() {
            self.finish(events);
            return;
        }

        self.current_seat = self.table.next_seat(self.current_seat);
        let player = self.table.id_at(self.current_seat);
        debug!(game = %self.id, %player, "turn passed");
        events.push(Event::TurnPassed { player });
    }

    fn is_over(&self) -> bool {
        let deck_empty = self.deck.as_ref().map_or(true, |deck| deck.is_empty());
        deck_empty
            && self
                .table
                .players()
                .iter()
                .all(|player| only_complete_sets(&player.herd))
    }

    fn finish(&mut self, events: &mut EventBus) {
        let mut scores = Vec::with_capacity(self.table.len());
        for seat in 0..self.table.len() {
            if let Some(player) = self.table.get_mut(seat) {
                let score = herd_score(&player.herd);
                player.score = Some(score);
                scores.push((player.id, score));
            }
        }
        self.state = GameState::Finished;
        info!(game = %self.id, ?scores, "game finished");
        events.push(Event::GameFinished { scores });
    }
}
