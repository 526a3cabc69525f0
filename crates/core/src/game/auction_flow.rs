use super::{Game, GameAction, GameError};
use crate::{ActionId, ActionKind, AnimalCard, Auction, Event, EventBus, Note, PlayerId};
use tracing::{debug, info};

fn active_auction(
    slot: &mut Option<GameAction>,
    id: ActionId,
) -> Result<&mut Auction, GameError> {
    match slot {
        Some(GameAction::Auction(auction)) if auction.id == id => Ok(auction),
        _ => Err(GameError::StaleAction(ActionKind::Auction)),
    }
}

impl Game {
    pub fn start_auction(
        &mut self,
        auctioneer: PlayerId,
        events: &mut EventBus,
    ) -> Result<ActionId, GameError> {
        self.ensure_in_progress()?;
        let seat = self.table.seat_of(auctioneer)?;
        self.ensure_turn(seat, "start an auction")?;
        self.ensure_idle()?;

        let card = self.draw_card(events)?;
        let bidders = self
            .table
            .seats_after(seat)
            .into_iter()
            .map(|bidder| self.table.id_at(bidder))
            .collect();
        let id = self.allocate_action_id();
        debug!(game = %self.id, action = %id, %auctioneer, animal = %card.animal, "auction started");
        events.push(Event::AuctionStarted {
            action: id,
            auctioneer,
            animal: card.animal,
        });
        self.current_action = Some(GameAction::Auction(Auction::new(
            id, card, auctioneer, bidders,
        )));
        Ok(id)
    }

    fn draw_card(&mut self, events: &mut EventBus) -> Result<AnimalCard, GameError> {
        let deck = self.deck.as_mut().ok_or(GameError::NotInProgress)?;
        let next = deck.peek().copied().ok_or(GameError::EmptyDeck)?;
        if next.animal != self.config.donkey {
            return Ok(deck.draw_next()?);
        }

        let drop = self.donkey_drops + 1;
        let note = self
            .config
            .donkey_payout(drop)
            .ok_or(GameError::DonkeyOverflow { drop })?;
        let card = deck.draw_next()?;
        self.donkey_drops = drop;
        self.table.credit_all(note);
        self.donkey_paid += note.value() * self.table.len() as u32;
        info!(game = %self.id, drop, %note, "donkey drawn, paying every player");
        events.push(Event::DonkeyDropped { drop, note });
        Ok(card)
    }

    pub fn place_bid(
        &mut self,
        auction: ActionId,
        bidder: PlayerId,
        amount: u32,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let active = active_auction(&mut self.current_action, auction)?;
        self.table.seat_of(bidder)?;
        let outcome = active.place_bid(&self.table, bidder, amount, events)?;
        self.conclude(outcome, events);
        Ok(())
    }

    pub fn skip_bid(
        &mut self,
        auction: ActionId,
        bidder: PlayerId,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let active = active_auction(&mut self.current_action, auction)?;
        self.table.seat_of(bidder)?;
        let outcome = active.skip_bid(&mut self.table, bidder, events)?;
        self.conclude(outcome, events);
        Ok(())
    }

    pub fn move_to_money_transfer(
        &mut self,
        auction: ActionId,
        auctioneer: PlayerId,
        buy_over: bool,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let active = active_auction(&mut self.current_action, auction)?;
        self.table.seat_of(auctioneer)?;
        let outcome = active.move_to_money_transfer(&self.table, auctioneer, buy_over, events)?;
        self.conclude(outcome, events);
        Ok(())
    }

    /// Settles the auction. `cash` must cover the bid; overpayment is not refunded.
    pub fn perform_auction_transfer(
        &mut self,
        auction: ActionId,
        payer: PlayerId,
        payee: PlayerId,
        cash: &[Note],
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        let active = active_auction(&mut self.current_action, auction)?;
        self.table.seat_of(payer)?;
        self.table.seat_of(payee)?;
        let outcome = active.perform_transfer(&mut self.table, payer, payee, cash, events)?;
        self.conclude(outcome, events);
        Ok(())
    }
}
