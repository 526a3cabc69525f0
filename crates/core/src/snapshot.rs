use crate::{
    ActionId, Animal, Auction, AuctionPhase, GameAction, GameId, GameState, Note, Player,
    PlayerId, Trade, TradePhase, Wallet,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub wallet: Wallet,
    pub cash: u32,
    pub herd: BTreeMap<Animal, usize>,
    pub score: Option<u32>,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            wallet: player.wallet.clone(),
            cash: player.wallet.total(),
            herd: player.herd_counts(),
            score: player.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionSnapshot {
    Auction {
        id: ActionId,
        animal: Animal,
        auctioneer: PlayerId,
        phase: AuctionPhase,
        bid: u32,
        last_bidder: Option<PlayerId>,
        current_bidder: Option<PlayerId>,
        bidders: Vec<PlayerId>,
        buy_over: bool,
    },
    Trade {
        id: ActionId,
        animal: Animal,
        initiator: PlayerId,
        responder: PlayerId,
        phase: TradePhase,
        offer: Option<Vec<Note>>,
        counter_offer: Option<Vec<Note>>,
        paired: bool,
        offers_tied: bool,
    },
}

impl From<&Auction> for ActionSnapshot {
    fn from(auction: &Auction) -> Self {
        Self::Auction {
            id: auction.id,
            animal: auction.card.animal,
            auctioneer: auction.auctioneer,
            phase: auction.phase,
            bid: auction.bid,
            last_bidder: auction.last_bidder,
            current_bidder: auction.current_bidder(),
            bidders: auction.bidders().to_vec(),
            buy_over: auction.buy_over,
        }
    }
}

impl From<&Trade> for ActionSnapshot {
    fn from(trade: &Trade) -> Self {
        Self::Trade {
            id: trade.id,
            animal: trade.animal,
            initiator: trade.initiator,
            responder: trade.responder,
            phase: trade.phase(),
            offer: trade.offer.clone(),
            counter_offer: trade.counter_offer.clone(),
            paired: trade.is_paired,
            offers_tied: trade.offers_tied,
        }
    }
}

impl From<&GameAction> for ActionSnapshot {
    fn from(action: &GameAction) -> Self {
        match action {
            GameAction::Auction(auction) => auction.into(),
            GameAction::Trade(trade) => trade.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSnapshot {
    pub id: GameId,
    pub state: GameState,
    pub current_player: Option<PlayerId>,
    pub deck_remaining: usize,
    pub donkey_drops: u8,
    pub players: Vec<PlayerView>,
    pub action: Option<ActionSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatRecord {
    pub id: PlayerId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    pub id: GameId,
    pub state: GameState,
    pub seats: Vec<SeatRecord>,
    pub current_player: Option<PlayerId>,
}
