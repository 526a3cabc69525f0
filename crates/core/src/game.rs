use crate::{
    ActionId, ActionKind, Animal, Auction, Deck, DeckError, GameConfig, GameId, GameState,
    PlayerId, RngState, Table, Trade, WalletError,
};
use thiserror::Error;

mod auction_flow;
mod lobby;
mod trade_flow;
mod turns;
mod view;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cannot add players after the game has started")]
    LobbyClosed,
    #[error("cannot add more than {max} players")]
    TableFull { max: usize },
    #[error("player \"{0}\" is already part of this game")]
    DuplicatePlayer(String),
    #[error("the game is already in progress")]
    AlreadyStarted,
    #[error("cannot start a game with less than {min} players (have {actual})")]
    NotEnoughPlayers { min: usize, actual: usize },
    #[error("the game is not in progress")]
    NotInProgress,
    #[error("{0} is not part of this game")]
    UnknownPlayer(PlayerId),
    #[error("it's not {player}'s turn to {action}")]
    NotYourTurn { player: String, action: &'static str },
    #[error("a game action is already in progress")]
    ActionInProgress,
    #[error("no animals left in the deck")]
    EmptyDeck,
    #[error("donkey drop #{drop} has no payout entry")]
    DonkeyOverflow { drop: u8 },
    #[error("this {0} is not currently active")]
    StaleAction(ActionKind),
    #[error("the auctioneer (\"{0}\") can't place a bid")]
    AuctioneerCannotBid(String),
    #[error("it's not {0}'s turn to bid")]
    NotYourBid(String),
    #[error("bid must be higher than the current bid of {current} (got {offered})")]
    BidTooLow { current: u32, offered: u32 },
    #[error("the auction has passed the bidding phase")]
    BiddingClosed,
    #[error("the auction is still in progress")]
    BiddingOpen,
    #[error("the auction is past the buy-over phase")]
    BuyOverClosed,
    #[error("player \"{0}\" is not the auctioneer and cannot move to the money transfer phase")]
    NotAuctioneer(String),
    #[error("the auction is not in the money transfer phase")]
    NotInMoneyTransfer,
    #[error("player \"{0}\" cannot be both payer and payee")]
    SelfPayment(String),
    #[error("player \"{0}\" is the payee, not the payer; payer and payee are reversed")]
    ReversedPayment(String),
    #[error("player \"{0}\" is not the payer")]
    NotPayer(String),
    #[error("player \"{0}\" is not the payee")]
    NotPayee(String),
    #[error("total cash ({offered}) must be at least equal to the bid ({required})")]
    CashBelowBid { offered: u32, required: u32 },
    #[error("player \"{player}\" cannot pay: {source}")]
    InsufficientFunds {
        player: String,
        #[source]
        source: WalletError,
    },
    #[error(
        "player \"{player}\" does not have enough money for the proposed trade offer for animal card {animal}"
    )]
    OfferUnaffordable {
        player: String,
        animal: Animal,
        #[source]
        source: WalletError,
    },
    #[error("player \"{player}\" does not have the animal card {animal}")]
    AnimalNotHeld { player: String, animal: Animal },
    #[error("player \"{0}\" cannot trade with themselves")]
    SelfTrade(String),
    #[error("\"{0}\" is not the trade initiator")]
    NotInitiator(String),
    #[error("\"{0}\" is not offered the trade")]
    NotResponder(String),
    #[error("offer already set for this trade")]
    OfferAlreadySet,
    #[error("offer cannot be empty")]
    EmptyOffer,
    #[error("counter offer cannot be set when there is no initial offer")]
    NoOfferToCounter,
    #[error("trade cannot be accepted when there is no initial offer")]
    NoOfferToAccept,
    #[error("trade cannot be accepted after a counter offer")]
    CounterOfferPending,
    #[error("engine invariant violated: {0}")]
    Invariant(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OutOfTurn,
    WrongRole,
    StaleAction,
    PhaseViolation,
    InsufficientFunds,
    InsufficientTotal,
    Capacity,
    Duplicate,
    Invariant,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotYourTurn { .. } | Self::NotYourBid(_) => ErrorKind::OutOfTurn,
            Self::UnknownPlayer(_)
            | Self::AuctioneerCannotBid(_)
            | Self::NotAuctioneer(_)
            | Self::SelfPayment(_)
            | Self::ReversedPayment(_)
            | Self::NotPayer(_)
            | Self::NotPayee(_)
            | Self::AnimalNotHeld { .. }
            | Self::SelfTrade(_)
            | Self::NotInitiator(_)
            | Self::NotResponder(_) => ErrorKind::WrongRole,
            Self::StaleAction(_) => ErrorKind::StaleAction,
            Self::LobbyClosed
            | Self::AlreadyStarted
            | Self::NotInProgress
            | Self::ActionInProgress
            | Self::BiddingClosed
            | Self::BiddingOpen
            | Self::BuyOverClosed
            | Self::NotInMoneyTransfer
            | Self::OfferAlreadySet
            | Self::NoOfferToCounter
            | Self::NoOfferToAccept
            | Self::CounterOfferPending => ErrorKind::PhaseViolation,
            Self::InsufficientFunds { .. } | Self::OfferUnaffordable { .. } => {
                ErrorKind::InsufficientFunds
            }
            Self::BidTooLow { .. } | Self::CashBelowBid { .. } | Self::EmptyOffer => {
                ErrorKind::InsufficientTotal
            }
            Self::TableFull { .. }
            | Self::NotEnoughPlayers { .. }
            | Self::EmptyDeck
            | Self::DonkeyOverflow { .. } => ErrorKind::Capacity,
            Self::DuplicatePlayer(_) => ErrorKind::Duplicate,
            Self::Invariant(_) => ErrorKind::Invariant,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DonkeyOverflow { .. } | Self::Invariant(_))
    }
}

impl From<DeckError> for GameError {
    fn from(value: DeckError) -> Self {
        match value {
            DeckError::Empty => Self::EmptyDeck,
        }
    }
}

/// Completion signal returned by auction and trade steps; the game decides what a
/// finished action means for the turn and the end of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Pending,
    Finished,
}

#[derive(Debug, Clone)]
pub enum GameAction {
    Auction(Auction),
    Trade(Trade),
}

impl GameAction {
    pub fn id(&self) -> ActionId {
        match self {
            Self::Auction(auction) => auction.id,
            Self::Trade(trade) => trade.id,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Auction(_) => ActionKind::Auction,
            Self::Trade(_) => ActionKind::Trade,
        }
    }

    pub fn animal(&self) -> Animal {
        match self {
            Self::Auction(auction) => auction.card.animal,
            Self::Trade(trade) => trade.animal,
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            Self::Auction(auction) => auction.is_finished(),
            Self::Trade(trade) => trade.is_finished(),
        }
    }

    pub fn as_auction(&self) -> Option<&Auction> {
        match self {
            Self::Auction(auction) => Some(auction),
            Self::Trade(_) => None,
        }
    }

    pub fn as_trade(&self) -> Option<&Trade> {
        match self {
            Self::Trade(trade) => Some(trade),
            Self::Auction(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct Game {
    id: GameId,
    config: GameConfig,
    state: GameState,
    table: Table,
    deck: Option<Deck>,
    rng: RngState,
    current_seat: usize,
    current_action: Option<GameAction>,
    history: Vec<GameAction>,
    donkey_drops: u8,
    donkey_paid: u32,
    next_action_id: u32,
}
