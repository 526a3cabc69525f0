use crate::{
    cash_value, ActionId, ActionOutcome, Animal, Event, EventBus, GameError, Note, PlayerId,
    Table,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TradePhase {
    AwaitingOffer,
    AwaitingResponse,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: ActionId,
    pub animal: Animal,
    pub initiator: PlayerId,
    pub responder: PlayerId,
    pub offer: Option<Vec<Note>>,
    pub counter_offer: Option<Vec<Note>>,
    pub is_paired: bool,
    /// Set after the first tie; a second tie hands the cards to the initiator for free.
    pub offers_tied: bool,
    pub winner: Option<PlayerId>,
    pub cards_moved: usize,
    finished: bool,
}

impl Trade {
    pub(crate) fn new(
        id: ActionId,
        animal: Animal,
        initiator: PlayerId,
        responder: PlayerId,
        is_paired: bool,
    ) -> Self {
        Self {
            id,
            animal,
            initiator,
            responder,
            offer: None,
            counter_offer: None,
            is_paired,
            offers_tied: false,
            winner: None,
            cards_moved: 0,
            finished: false,
        }
    }

    pub fn phase(&self) -> TradePhase {
        if self.finished {
            TradePhase::Finished
        } else if self.offer.is_some() {
            TradePhase::AwaitingResponse
        } else {
            TradePhase::AwaitingOffer
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn ensure_affordable(
        &self,
        table: &Table,
        seat: usize,
        cash: &[Note],
    ) -> Result<(), GameError> {
        table.check_cash(seat, cash).map_err(|err| match err {
            GameError::InsufficientFunds { player, source } => GameError::OfferUnaffordable {
                player,
                animal: self.animal,
                source,
            },
            other => other,
        })
    }

    pub(crate) fn set_offer(
        &mut self,
        table: &Table,
        player: PlayerId,
        cash: &[Note],
        events: &mut EventBus,
    ) -> Result<ActionOutcome, GameError> {
        if player != self.initiator {
            return Err(GameError::NotInitiator(table.name_of(player)));
        }
        if self.offer.is_some() {
            return Err(GameError::OfferAlreadySet);
        }
        if cash.is_empty() {
            return Err(GameError::EmptyOffer);
        }
        self.ensure_affordable(table, table.seat_of(player)?, cash)?;

        let total = cash_value(cash);
        self.offer = Some(cash.to_vec());
        debug!(action = %self.id, notes = cash.len(), total, "offer set");
        events.push(Event::OfferSet {
            action: self.id,
            total,
        });
        Ok(ActionOutcome::Pending)
    }

    pub(crate) fn set_counter_offer(
        &mut self,
        table: &mut Table,
        player: PlayerId,
        cash: &[Note],
        events: &mut EventBus,
    ) -> Result<ActionOutcome, GameError> {
        if player != self.responder {
            return Err(GameError::NotResponder(table.name_of(player)));
        }
        let offer = self.offer.clone().ok_or(GameError::NoOfferToCounter)?;
        let responder_seat = table.seat_of(self.responder)?;
        let initiator_seat = table.seat_of(self.initiator)?;
        self.ensure_affordable(table, responder_seat, cash)?;

        let offer_total = cash_value(&offer);
        let counter_total = cash_value(cash);
        if offer_total != counter_total {
            // Both stacks change hands in full; only the card direction depends on who bid more.
            table.swap_cash(initiator_seat, &offer, responder_seat, cash)?;
        }
        debug!(action = %self.id, offer_total, counter_total, "counter offer set");
        events.push(Event::CounterOfferSet {
            action: self.id,
            total: counter_total,
        });

        if offer_total == counter_total {
            if !self.offers_tied {
                self.offers_tied = true;
                self.offer = None;
                self.counter_offer = None;
                events.push(Event::OffersTied {
                    action: self.id,
                    repeated: false,
                });
                return Ok(ActionOutcome::Pending);
            }
            self.counter_offer = Some(cash.to_vec());
            events.push(Event::OffersTied {
                action: self.id,
                repeated: true,
            });
            self.hand_over(table, initiator_seat, responder_seat, events);
            return Ok(ActionOutcome::Finished);
        }

        self.counter_offer = Some(cash.to_vec());
        if offer_total > counter_total {
            self.hand_over(table, initiator_seat, responder_seat, events);
        } else {
            self.hand_over(table, responder_seat, initiator_seat, events);
        }
        Ok(ActionOutcome::Finished)
    }

    pub(crate) fn accept(
        &mut self,
        table: &mut Table,
        player: PlayerId,
        events: &mut EventBus,
    ) -> Result<ActionOutcome, GameError> {
        if player != self.responder {
            return Err(GameError::NotResponder(table.name_of(player)));
        }
        let offer = self.offer.clone().ok_or(GameError::NoOfferToAccept)?;
        if self.counter_offer.is_some() {
            return Err(GameError::CounterOfferPending);
        }

        let initiator_seat = table.seat_of(self.initiator)?;
        let responder_seat = table.seat_of(self.responder)?;
        table.transfer_cash(initiator_seat, responder_seat, &offer)?;
        self.hand_over(table, initiator_seat, responder_seat, events);
        Ok(ActionOutcome::Finished)
    }

    fn hand_over(
        &mut self,
        table: &mut Table,
        winner_seat: usize,
        loser_seat: usize,
        events: &mut EventBus,
    ) {
        let winner = table.id_at(winner_seat);
        let moved = table.move_cards(loser_seat, winner_seat, self.animal, self.is_paired);
        self.winner = Some(winner);
        self.cards_moved = moved;
        self.finished = true;
        debug!(action = %self.id, %winner, cards = moved, animal = %self.animal, "trade settled");
        events.push(Event::TradeSettled {
            action: self.id,
            winner,
            cards: moved,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnimalCard, Player};

    fn setup(paired: bool) -> (Table, Trade) {
        let mut table = Table::new();
        for id in 1..=3 {
            table.seat(Player::new(PlayerId(id), format!("Player {id}")));
        }
        let copies = if paired { 2 } else { 1 };
        let mut card_id = 0;
        for seat in 0..2 {
            for _ in 0..copies {
                card_id += 1;
                table.give_card(seat, AnimalCard::new(card_id, Animal::Koe));
            }
        }
        let trade = Trade::new(ActionId(1), Animal::Koe, PlayerId(1), PlayerId(2), paired);
        (table, trade)
    }

    #[test]
    fn phase_tracks_offer_and_completion() {
        let (mut table, mut trade) = setup(false);
        let mut events = EventBus::default();
        assert_eq!(trade.phase(), TradePhase::AwaitingOffer);
        trade
            .set_offer(&table, PlayerId(1), &[Note::Ten], &mut events)
            .unwrap();
        assert_eq!(trade.phase(), TradePhase::AwaitingResponse);
        let outcome = trade.accept(&mut table, PlayerId(2), &mut events).unwrap();
        assert_eq!(outcome, ActionOutcome::Finished);
        assert_eq!(trade.phase(), TradePhase::Finished);
        assert_eq!(trade.winner, Some(PlayerId(1)));
        assert_eq!(table.count_of(0, Animal::Koe), 2);
    }

    #[test]
    fn first_tie_resets_offers() {
        let (mut table, mut trade) = setup(false);
        let mut events = EventBus::default();
        trade
            .set_offer(&table, PlayerId(1), &[Note::Ten], &mut events)
            .unwrap();
        let outcome = trade
            .set_counter_offer(&mut table, PlayerId(2), &[Note::Ten], &mut events)
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Pending);
        assert!(trade.offers_tied);
        assert_eq!(trade.offer, None);
        assert_eq!(trade.phase(), TradePhase::AwaitingOffer);
        assert_eq!(table.total_cash(), 270);
    }

    #[test]
    fn paired_counter_win_moves_both_cards() {
        let (mut table, mut trade) = setup(true);
        let mut events = EventBus::default();
        trade
            .set_offer(&table, PlayerId(1), &[Note::Zero], &mut events)
            .unwrap();
        trade
            .set_counter_offer(&mut table, PlayerId(2), &[Note::Ten], &mut events)
            .unwrap();
        assert_eq!(trade.winner, Some(PlayerId(2)));
        assert_eq!(trade.cards_moved, 2);
        assert_eq!(table.count_of(1, Animal::Koe), 4);
        assert_eq!(table.count_of(0, Animal::Koe), 0);
    }

    #[test]
    fn failed_swap_leaves_no_counter_offer_event() {
        let (mut table, mut trade) = setup(false);
        let mut events = EventBus::default();
        trade
            .set_offer(&table, PlayerId(1), &[Note::Fifty], &mut events)
            .unwrap();
        events.drain().for_each(drop);
        if let Some(initiator) = table.get_mut(0) {
            initiator.wallet.withdraw(&[Note::Fifty]).unwrap();
        }

        let err = trade
            .set_counter_offer(&mut table, PlayerId(2), &[Note::Ten], &mut events)
            .unwrap_err();
        assert!(matches!(err, GameError::InsufficientFunds { .. }));
        assert!(events.is_empty());
        assert!(trade.counter_offer.is_none());
        assert_eq!(trade.phase(), TradePhase::AwaitingResponse);
        assert_eq!(table.get(1).map(|p| p.wallet.total()), Some(90));
    }

    #[test]
    fn unaffordable_offer_names_the_animal() {
        let (table, mut trade) = setup(false);
        let mut events = EventBus::default();
        let err = trade
            .set_offer(&table, PlayerId(1), &[Note::Hundred], &mut events)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "player \"Player 1\" does not have enough money for the proposed trade offer for animal card Koe"
        );
        assert!(trade.offer.is_none());
    }
}
