use crate::{ActionId, Animal, Note, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    PlayerJoined {
        player: PlayerId,
        seats: usize,
    },
    GameStarted {
        players: usize,
        first_player: PlayerId,
        deck: usize,
    },
    DonkeyDropped {
        drop: u8,
        note: Note,
    },
    AuctionStarted {
        action: ActionId,
        auctioneer: PlayerId,
        animal: Animal,
    },
    BidPlaced {
        action: ActionId,
        bidder: PlayerId,
        amount: u32,
    },
    BidSkipped {
        action: ActionId,
        bidder: PlayerId,
        remaining: usize,
    },
    BuyOverDecided {
        action: ActionId,
        buy_over: bool,
    },
    AuctionSettled {
        action: ActionId,
        winner: PlayerId,
        paid: u32,
    },
    TradeStarted {
        action: ActionId,
        initiator: PlayerId,
        responder: PlayerId,
        animal: Animal,
        paired: bool,
    },
    OfferSet {
        action: ActionId,
        total: u32,
    },
    CounterOfferSet {
        action: ActionId,
        total: u32,
    },
    OffersTied {
        action: ActionId,
        repeated: bool,
    },
    TradeSettled {
        action: ActionId,
        winner: PlayerId,
        cards: usize,
    },
    TurnPassed {
        player: PlayerId,
    },
    GameFinished {
        scores: Vec<(PlayerId, u32)>,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn last(&self) -> Option<&Event> {
        self.queue.last()
    }
}
