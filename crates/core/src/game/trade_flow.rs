use super::{Game, GameAction, GameError};
use crate::{ActionId, ActionKind, Animal, Event, EventBus, Note, PlayerId, Trade};
use tracing::debug;

fn active_trade(slot: &mut Option<GameAction>, id: ActionId) -> Result<&mut Trade, GameError> {
    match slot {
        Some(GameAction::Trade(trade)) if trade.id == id => Ok(trade),
        _ => Err(GameError::StaleAction(ActionKind::Trade)),
    }
}

impl Game {
    pub fn start_trade(
        &mut self,
        initiator: PlayerId,
        responder: PlayerId,
        animal: Animal,
        events: &mut EventBus,
    ) -> Result<ActionId, GameError> {
        self.ensure_in_progress()?;
        let initiator_seat = self.table.seat_of(initiator)?;
        self.ensure_turn(initiator_seat, "start a trade")?;
        self.ensure_idle()?;
        let responder_seat = self.table.seat_of(responder)?;
        if responder_seat == initiator_seat {
            return Err(GameError::SelfTrade(
                self.table.name(initiator_seat).to_string(),
            ));
        }
        for seat in [initiator_seat, responder_seat] {
            if self.table.count_of(seat, animal) == 0 {
                return Err(GameError::AnimalNotHeld {
                    player: self.table.name(seat).to_string(),
                    animal,
                });
            }
        }

        let is_paired = self.table.count_of(initiator_seat, animal) == 2
            && self.table.count_of(responder_seat, animal) == 2;
        let id = self.allocate_action_id();
        debug!(
            game = %self.id,
            action = %id,
            %initiator,
            %responder,
            %animal,
            is_paired,
            "trade started"
        );
        events.push(Event::TradeStarted {
            action: id,
            initiator,
            responder,
            animal,
            paired: is_paired,
        });
        self.current_action = Some(GameAction::Trade(Trade::new(
            id, animal, initiator, responder, is_paired,
        )));
        Ok(id)
    }

    pub fn set_offer(
        &mut self,
        trade: ActionId,
        initiator: PlayerId,
        cash: &[Note],
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let active = active_trade(&mut self.current_action, trade)?;
        self.table.seat_of(initiator)?;
        let outcome = active.set_offer(&self.table, initiator, cash, events)?;
        self.conclude(outcome, events);
        Ok(())
    }

    /// Answers the offer with a counter stack. Unequal stacks settle the trade at once;
    /// an empty counter is allowed and counts as zero.
    pub fn set_counter_offer(
        &mut self,
        trade: ActionId,
        responder: PlayerId,
        cash: &[Note],
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let active = active_trade(&mut self.current_action, trade)?;
        self.table.seat_of(responder)?;
        let outcome = active.set_counter_offer(&mut self.table, responder, cash, events)?;
        self.conclude(outcome, events);
        Ok(())
    }

    pub fn accept_trade(
        &mut self,
        trade: ActionId,
        responder: PlayerId,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let active = active_trade(&mut self.current_action, trade)?;
        self.table.seat_of(responder)?;
        let outcome = active.accept(&mut self.table, responder, events)?;
        self.conclude(outcome, events);
        Ok(())
    }
}
