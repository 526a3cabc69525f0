use super::{Game, GameAction};
use crate::{
    ActionId, ActionSnapshot, Auction, Deck, GameConfig, GameId, GameRecord, GameSnapshot,
    GameState, Player, PlayerId, PlayerView, SeatRecord, Trade,
};

impl Game {
    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn players(&self) -> &[Player] {
        self.table.players()
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.table.players().iter().find(|player| player.id == id)
    }

    /// The turn holder. `None` until the game has started.
    pub fn current_player(&self) -> Option<&Player> {
        if self.state == GameState::NotStarted {
            return None;
        }
        self.table.get(self.current_seat)
    }

    pub fn next_player(&self) -> Option<&Player> {
        if self.state == GameState::NotStarted {
            return None;
        }
        self.table.get(self.table.next_seat(self.current_seat))
    }

    pub fn current_action(&self) -> Option<&GameAction> {
        self.current_action.as_ref()
    }

    pub fn history(&self) -> &[GameAction] {
        &self.history
    }

    pub fn action(&self, id: ActionId) -> Option<&GameAction> {
        self.current_action
            .iter()
            .chain(self.history.iter())
            .find(|action| action.id() == id)
    }

    pub fn auction(&self, id: ActionId) -> Option<&Auction> {
        self.action(id).and_then(GameAction::as_auction)
    }

    pub fn trade(&self, id: ActionId) -> Option<&Trade> {
        self.action(id).and_then(GameAction::as_trade)
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn donkey_drops(&self) -> u8 {
        self.donkey_drops
    }

    pub fn donkey_paid(&self) -> u32 {
        self.donkey_paid
    }

    pub fn total_cash(&self) -> u32 {
        self.table.total_cash()
    }

    pub fn total_cards(&self) -> usize {
        self.table.total_cards()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id,
            state: self.state,
            current_player: self.current_player().map(|player| player.id),
            deck_remaining: self.deck.as_ref().map_or(0, Deck::len),
            donkey_drops: self.donkey_drops,
            players: self.table.players().iter().map(PlayerView::from).collect(),
            action: self.current_action.as_ref().map(ActionSnapshot::from),
        }
    }

    pub fn record(&self) -> GameRecord {
        GameRecord {
            id: self.id,
            state: self.state,
            seats: self
                .table
                .players()
                .iter()
                .map(|player| SeatRecord {
                    id: player.id,
                    name: player.name.clone(),
                })
                .collect(),
            current_player: self.current_player().map(|player| player.id),
        }
    }
}
