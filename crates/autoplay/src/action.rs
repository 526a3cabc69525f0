use koehandel_core::{Animal, Note, PlayerId};
use serde::{Deserialize, Serialize};

/// One engine move, carrying the acting player so it can be replayed verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AutoAction {
    StartAuction {
        player: PlayerId,
    },
    Bid {
        player: PlayerId,
        amount: u32,
    },
    SkipBid {
        player: PlayerId,
    },
    DecideBuyOver {
        player: PlayerId,
        buy_over: bool,
    },
    Pay {
        payer: PlayerId,
        payee: PlayerId,
        cash: Vec<Note>,
    },
    StartTrade {
        initiator: PlayerId,
        responder: PlayerId,
        animal: Animal,
    },
    Offer {
        player: PlayerId,
        cash: Vec<Note>,
    },
    Counter {
        player: PlayerId,
        cash: Vec<Note>,
    },
    Accept {
        player: PlayerId,
    },
}

impl AutoAction {
    pub fn actor(&self) -> PlayerId {
        match self {
            Self::StartAuction { player }
            | Self::Bid { player, .. }
            | Self::SkipBid { player }
            | Self::DecideBuyOver { player, .. }
            | Self::Offer { player, .. }
            | Self::Counter { player, .. }
            | Self::Accept { player } => *player,
            Self::Pay { payer, .. } => *payer,
            Self::StartTrade { initiator, .. } => *initiator,
        }
    }

    pub fn stable_key(&self) -> String {
        match self {
            Self::StartAuction { player } => format!("start_auction:{}", player.0),
            Self::Bid { player, amount } => format!("bid:{}:{amount:06}", player.0),
            Self::SkipBid { player } => format!("skip_bid:{}", player.0),
            Self::DecideBuyOver { player, buy_over } => {
                format!("buy_over:{}:{buy_over}", player.0)
            }
            Self::Pay { payer, payee, cash } => {
                format!("pay:{}:{}:{cash:?}", payer.0, payee.0)
            }
            Self::StartTrade {
                initiator,
                responder,
                animal,
            } => format!("start_trade:{}:{}:{animal}", initiator.0, responder.0),
            Self::Offer { player, cash } => format!("offer:{}:{cash:?}", player.0),
            Self::Counter { player, cash } => format!("counter:{}:{cash:?}", player.0),
            Self::Accept { player } => format!("accept:{}", player.0),
        }
    }

    pub fn short_label(&self) -> String {
        match self {
            Self::StartAuction { player } => format!("{player} starts an auction"),
            Self::Bid { player, amount } => format!("{player} bids {amount}"),
            Self::SkipBid { player } => format!("{player} skips"),
            Self::DecideBuyOver { player, buy_over } => {
                if *buy_over {
                    format!("{player} buys over")
                } else {
                    format!("{player} lets the bid stand")
                }
            }
            Self::Pay { payer, payee, cash } => format!("{payer} pays {payee} {cash:?}"),
            Self::StartTrade {
                initiator,
                responder,
                animal,
            } => format!("{initiator} challenges {responder} for {animal}"),
            Self::Offer { player, cash } => format!("{player} offers {cash:?}"),
            Self::Counter { player, cash } => format!("{player} counters {cash:?}"),
            Self::Accept { player } => format!("{player} accepts"),
        }
    }
}
