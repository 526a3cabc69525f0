use crate::{
    cash_value, ActionId, ActionOutcome, AnimalCard, Event, EventBus, GameError, Note, PlayerId,
    Table,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AuctionPhase {
    Bidding,
    BuyOver,
    MoneyTransfer,
    Finished,
}

/// One drawn card up for auction. Every non-auctioneer bids in table order; skipping
/// drops a bidder for good. Once a single bidder holds a positive bid the auctioneer
/// may buy the card over for the same amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    pub id: ActionId,
    pub card: AnimalCard,
    pub auctioneer: PlayerId,
    bidders: Vec<PlayerId>,
    cursor: usize,
    pub bid: u32,
    pub last_bidder: Option<PlayerId>,
    pub buy_over: bool,
    pub phase: AuctionPhase,
    pub winner: Option<PlayerId>,
}

impl Auction {
    pub(crate) fn new(
        id: ActionId,
        card: AnimalCard,
        auctioneer: PlayerId,
        bidders: Vec<PlayerId>,
    ) -> Self {
        Self {
            id,
            card,
            auctioneer,
            bidders,
            cursor: 0,
            bid: 0,
            last_bidder: None,
            buy_over: false,
            phase: AuctionPhase::Bidding,
            winner: None,
        }
    }

    pub fn bidders(&self) -> &[PlayerId] {
        &self.bidders
    }

    pub fn current_bidder(&self) -> Option<PlayerId> {
        if self.phase != AuctionPhase::Bidding {
            return None;
        }
        self.bidders.get(self.cursor).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == AuctionPhase::Finished
    }

    pub fn settlement(&self) -> Option<(PlayerId, PlayerId)> {
        let last = self.last_bidder?;
        if self.buy_over {
            Some((self.auctioneer, last))
        } else {
            Some((last, self.auctioneer))
        }
    }

    fn ensure_bidder_turn(&self, table: &Table, bidder: PlayerId) -> Result<(), GameError> {
        if self.phase != AuctionPhase::Bidding {
            return Err(GameError::BiddingClosed);
        }
        if bidder == self.auctioneer {
            return Err(GameError::AuctioneerCannotBid(table.name_of(bidder)));
        }
        if self.bidders.get(self.cursor) != Some(&bidder) {
            return Err(GameError::NotYourBid(table.name_of(bidder)));
        }
        Ok(())
    }

    pub(crate) fn place_bid(
        &mut self,
        table: &Table,
        bidder: PlayerId,
        amount: u32,
        events: &mut EventBus,
    ) -> Result<ActionOutcome, GameError> {
        self.ensure_bidder_turn(table, bidder)?;
        if amount <= self.bid {
            return Err(GameError::BidTooLow {
                current: self.bid,
                offered: amount,
            });
        }

        self.bid = amount;
        self.last_bidder = Some(bidder);
        self.cursor = (self.cursor + 1) % self.bidders.len();
        debug!(action = %self.id, %bidder, amount, "bid placed");
        events.push(Event::BidPlaced {
            action: self.id,
            bidder,
            amount,
        });

        if self.bidders.len() == 1 {
            self.phase = AuctionPhase::BuyOver;
        }
        Ok(ActionOutcome::Pending)
    }

    pub(crate) fn skip_bid(
        &mut self,
        table: &mut Table,
        bidder: PlayerId,
        events: &mut EventBus,
    ) -> Result<ActionOutcome, GameError> {
        self.ensure_bidder_turn(table, bidder)?;

        self.bidders.remove(self.cursor);
        if self.bidders.is_empty() {
            self.cursor = 0;
        } else {
            self.cursor %= self.bidders.len();
        }
        debug!(action = %self.id, %bidder, remaining = self.bidders.len(), "bid skipped");
        events.push(Event::BidSkipped {
            action: self.id,
            bidder,
            remaining: self.bidders.len(),
        });

        match (self.bidders.len(), self.bid) {
            (1, bid) if bid > 0 => {
                self.phase = AuctionPhase::BuyOver;
                Ok(ActionOutcome::Pending)
            }
            (0, 0) => {
                let seat = table.seat_of(self.auctioneer)?;
                table.give_card(seat, self.card);
                self.finish(self.auctioneer, 0, events);
                Ok(ActionOutcome::Finished)
            }
            _ => Ok(ActionOutcome::Pending),
        }
    }

    pub(crate) fn move_to_money_transfer(
        &mut self,
        table: &Table,
        player: PlayerId,
        buy_over: bool,
        events: &mut EventBus,
    ) -> Result<ActionOutcome, GameError> {
        match self.phase {
            AuctionPhase::Bidding => return Err(GameError::BiddingOpen),
            AuctionPhase::MoneyTransfer | AuctionPhase::Finished => {
                return Err(GameError::BuyOverClosed)
            }
            AuctionPhase::BuyOver => {}
        }
        if player != self.auctioneer {
            return Err(GameError::NotAuctioneer(table.name_of(player)));
        }

        self.buy_over = buy_over;
        self.phase = AuctionPhase::MoneyTransfer;
        debug!(action = %self.id, buy_over, "buy-over decided");
        events.push(Event::BuyOverDecided {
            action: self.id,
            buy_over,
        });
        Ok(ActionOutcome::Pending)
    }

    pub(crate) fn perform_transfer(
        &mut self,
        table: &mut Table,
        payer: PlayerId,
        payee: PlayerId,
        cash: &[Note],
        events: &mut EventBus,
    ) -> Result<ActionOutcome, GameError> {
        if self.phase != AuctionPhase::MoneyTransfer {
            return Err(GameError::NotInMoneyTransfer);
        }
        if payer == payee {
            return Err(GameError::SelfPayment(table.name_of(payer)));
        }
        let (expected_payer, expected_payee) = self.settlement().ok_or_else(|| {
            GameError::Invariant(format!("{} reached money transfer without a bid", self.id))
        })?;
        if payer == expected_payee && payee == expected_payer {
            return Err(GameError::ReversedPayment(table.name_of(payer)));
        }
        if payer != expected_payer {
            return Err(GameError::NotPayer(table.name_of(payer)));
        }
        if payee != expected_payee {
            return Err(GameError::NotPayee(table.name_of(payee)));
        }
        let payer_seat = table.seat_of(payer)?;
        let payee_seat = table.seat_of(payee)?;
        table.check_cash(payer_seat, cash)?;
        let total = cash_value(cash);
        if total < self.bid {
            return Err(GameError::CashBelowBid {
                offered: total,
                required: self.bid,
            });
        }

        table.transfer_cash(payer_seat, payee_seat, cash)?;
        table.give_card(payer_seat, self.card);
        self.finish(payer, total, events);
        Ok(ActionOutcome::Finished)
    }

    fn finish(&mut self, winner: PlayerId, paid: u32, events: &mut EventBus) {
        self.phase = AuctionPhase::Finished;
        self.winner = Some(winner);
        debug!(action = %self.id, %winner, paid, animal = %self.card.animal, "auction settled");
        events.push(Event::AuctionSettled {
            action: self.id,
            winner,
            paid,
        });
    }
}
