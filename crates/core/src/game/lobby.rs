use super::{Game, GameError};
use crate::{
    ConfigError, Deck, Event, EventBus, GameConfig, GameId, GameState, Player, RngState, Table,
    Wallet,
};
use tracing::info;

impl Game {
    pub fn new(id: GameId, first: Player, seed: u64) -> Self {
        Self::build(id, first, GameConfig::default(), seed)
    }

    pub fn with_config(
        id: GameId,
        first: Player,
        config: GameConfig,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(id, first, config, seed))
    }

    fn build(id: GameId, first: Player, config: GameConfig, seed: u64) -> Self {
        let mut table = Table::new();
        table.seat(Self::prepare_seat(&config, first));
        info!(game = %id, seed, "game created");
        Self {
            id,
            config,
            state: GameState::NotStarted,
            table,
            deck: None,
            rng: RngState::from_seed(seed),
            current_seat: 0,
            current_action: None,
            history: Vec::new(),
            donkey_drops: 0,
            donkey_paid: 0,
            next_action_id: 1,
        }
    }

    fn prepare_seat(config: &GameConfig, mut player: Player) -> Player {
        player.wallet = Wallet::from_notes(&config.starting_cash);
        player.herd.clear();
        player.score = None;
        player
    }

    pub fn add_player(&mut self, player: Player, events: &mut EventBus) -> Result<usize, GameError> {
        if self.state != GameState::NotStarted {
            return Err(GameError::LobbyClosed);
        }
        if self.table.len() >= self.config.max_players {
            return Err(GameError::TableFull {
                max: self.config.max_players,
            });
        }
        if self.table.contains(player.id) {
            return Err(GameError::DuplicatePlayer(player.name));
        }

        let id = player.id;
        self.table.seat(Self::prepare_seat(&self.config, player));
        let seats = self.table.len();
        info!(game = %self.id, player = %id, seats, "player joined");
        events.push(Event::PlayerJoined { player: id, seats });
        Ok(seats)
    }

    fn ensure_startable(&self) -> Result<(), GameError> {
        if self.state != GameState::NotStarted {
            return Err(GameError::AlreadyStarted);
        }
        if self.table.len() < self.config.min_players {
            return Err(GameError::NotEnoughPlayers {
                min: self.config.min_players,
                actual: self.table.len(),
            });
        }
        Ok(())
    }

    pub fn start(&mut self, events: &mut EventBus) -> Result<GameState, GameError> {
        self.ensure_startable()?;
        let deck = Deck::shuffled(&mut self.rng);
        self.start_with_deck(deck, events)
    }

    pub fn start_with_deck(
        &mut self,
        deck: Deck,
        events: &mut EventBus,
    ) -> Result<GameState, GameError> {
        self.ensure_startable()?;

        self.current_seat = self.rng.next_index(self.table.len());
        let first_player = self.table.id_at(self.current_seat);
        let deck_len = deck.len();
        self.deck = Some(deck);
        self.state = GameState::InProgress;
        info!(
            game = %self.id,
            players = self.table.len(),
            %first_player,
            deck = deck_len,
            "game started"
        );
        events.push(Event::GameStarted {
            players: self.table.len(),
            first_player,
            deck: deck_len,
        });
        Ok(self.state)
    }
}
