use crate::{AutoAction, AutoplayConfig, AutoplayError};
use koehandel_core::{
    cash_value, ActionId, Animal, AuctionPhase, EventBus, Game, GameAction, GameConfig, GameId,
    GameState, Note, Player, PlayerId, TradePhase,
};
use std::collections::BTreeSet;

#[derive(Debug)]
pub struct Simulator {
    pub game: Game,
    pub events: EventBus,
    initial_cards: usize,
    base_cash: u32,
    steps: u32,
}

impl Simulator {
    /// Seats `cfg.players` players, starts the game and snapshots the conservation baselines.
    pub fn setup(cfg: &AutoplayConfig, rules: GameConfig) -> Result<Self, AutoplayError> {
        let mut events = EventBus::default();
        let mut game = Game::with_config(
            GameId(cfg.seed),
            Player::new(PlayerId(1), "Player 1"),
            rules,
            cfg.seed,
        )?;
        for id in 2..=cfg.players {
            game.add_player(Player::new(PlayerId(id), format!("Player {id}")), &mut events)?;
        }
        game.start(&mut events)?;
        Ok(Self::new(game))
    }

    pub fn new(game: Game) -> Self {
        let in_flight = usize::from(in_flight_card(&game));
        let initial_cards =
            game.deck().map_or(0, |deck| deck.len()) + game.total_cards() + in_flight;
        let base_cash = game.total_cash() - game.donkey_paid();
        Self {
            game,
            events: EventBus::default(),
            initial_cards,
            base_cash,
            steps: 0,
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Every move the engine would accept right now that the acting player can pay for.
    pub fn legal_actions(&self, cfg: &AutoplayConfig) -> Vec<AutoAction> {
        if self.game.state() != GameState::InProgress {
            return Vec::new();
        }
        let mut actions = match self.game.current_action() {
            None => self.turn_actions(),
            Some(GameAction::Auction(auction)) => match auction.phase {
                AuctionPhase::Bidding => {
                    let Some(bidder) = auction.current_bidder() else {
                        return Vec::new();
                    };
                    let budget = self.cash_of(bidder);
                    let mut actions = vec![AutoAction::SkipBid { player: bidder }];
                    for raise in (10..=cfg.max_bid_raise.max(10)).step_by(10) {
                        let amount = auction.bid + raise;
                        if amount <= budget {
                            actions.push(AutoAction::Bid {
                                player: bidder,
                                amount,
                            });
                        }
                    }
                    actions
                }
                AuctionPhase::BuyOver => {
                    let player = auction.auctioneer;
                    let mut actions = vec![AutoAction::DecideBuyOver {
                        player,
                        buy_over: false,
                    }];
                    if self.cash_of(player) >= auction.bid {
                        actions.push(AutoAction::DecideBuyOver {
                            player,
                            buy_over: true,
                        });
                    }
                    actions
                }
                AuctionPhase::MoneyTransfer => {
                    let Some((payer, payee)) = auction.settlement() else {
                        return Vec::new();
                    };
                    let notes = self.notes_of(payer);
                    match cover(&notes, auction.bid) {
                        Some(cash) => vec![AutoAction::Pay { payer, payee, cash }],
                        None => Vec::new(),
                    }
                }
                AuctionPhase::Finished => Vec::new(),
            },
            Some(GameAction::Trade(trade)) => match trade.phase() {
                TradePhase::AwaitingOffer => stacks(&self.notes_of(trade.initiator), false)
                    .into_iter()
                    .map(|cash| AutoAction::Offer {
                        player: trade.initiator,
                        cash,
                    })
                    .collect(),
                TradePhase::AwaitingResponse => {
                    let mut actions = vec![AutoAction::Accept {
                        player: trade.responder,
                    }];
                    actions.extend(
                        stacks(&self.notes_of(trade.responder), true)
                            .into_iter()
                            .map(|cash| AutoAction::Counter {
                                player: trade.responder,
                                cash,
                            }),
                    );
                    actions
                }
                TradePhase::Finished => Vec::new(),
            },
        };

        actions.sort_by_key(|item| item.stable_key());
        actions.dedup_by_key(|item| item.stable_key());
        actions
    }

    fn turn_actions(&self) -> Vec<AutoAction> {
        let Some(player) = self.game.current_player() else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        if self.can_draw() {
            actions.push(AutoAction::StartAuction { player: player.id });
        }
        if player.wallet.is_empty() {
            return actions;
        }
        let held: BTreeSet<Animal> = player.herd.iter().map(|card| card.animal).collect();
        for rival in self.game.players() {
            if rival.id == player.id {
                continue;
            }
            for animal in held.iter().filter(|animal| rival.holds(**animal)) {
                actions.push(AutoAction::StartTrade {
                    initiator: player.id,
                    responder: rival.id,
                    animal: *animal,
                });
            }
        }
        actions
    }

    /// A draw is possible and would not run past the donkey payout table.
    fn can_draw(&self) -> bool {
        let Some(next) = self.game.deck().and_then(|deck| deck.peek()) else {
            return false;
        };
        let config = self.game.config();
        next.animal != config.donkey
            || config
                .donkey_payout(self.game.donkey_drops() + 1)
                .is_some()
    }

    fn cash_of(&self, player: PlayerId) -> u32 {
        self.game
            .player(player)
            .map_or(0, |player| player.wallet.total())
    }

    fn notes_of(&self, player: PlayerId) -> Vec<Note> {
        self.game
            .player(player)
            .map(|player| player.wallet.notes())
            .unwrap_or_default()
    }

    /// Routes `action` to the engine, then checks conservation. Returns the number of
    /// events the step produced.
    pub fn apply_action(&mut self, action: &AutoAction) -> Result<usize, AutoplayError> {
        match action {
            AutoAction::StartAuction { player } => {
                self.game.start_auction(*player, &mut self.events)?;
            }
            AutoAction::Bid { player, amount } => {
                let id = self.active_id()?;
                self.game.place_bid(id, *player, *amount, &mut self.events)?;
            }
            AutoAction::SkipBid { player } => {
                let id = self.active_id()?;
                self.game.skip_bid(id, *player, &mut self.events)?;
            }
            AutoAction::DecideBuyOver { player, buy_over } => {
                let id = self.active_id()?;
                self.game
                    .move_to_money_transfer(id, *player, *buy_over, &mut self.events)?;
            }
            AutoAction::Pay { payer, payee, cash } => {
                let id = self.active_id()?;
                self.game
                    .perform_auction_transfer(id, *payer, *payee, cash, &mut self.events)?;
            }
            AutoAction::StartTrade {
                initiator,
                responder,
                animal,
            } => {
                self.game
                    .start_trade(*initiator, *responder, *animal, &mut self.events)?;
            }
            AutoAction::Offer { player, cash } => {
                let id = self.active_id()?;
                self.game.set_offer(id, *player, cash, &mut self.events)?;
            }
            AutoAction::Counter { player, cash } => {
                let id = self.active_id()?;
                self.game
                    .set_counter_offer(id, *player, cash, &mut self.events)?;
            }
            AutoAction::Accept { player } => {
                let id = self.active_id()?;
                self.game.accept_trade(id, *player, &mut self.events)?;
            }
        }
        self.steps += 1;
        self.check_invariants()?;
        Ok(self.events.drain().count())
    }

    fn active_id(&self) -> Result<ActionId, AutoplayError> {
        self.game
            .current_action()
            .map(GameAction::id)
            .ok_or_else(|| AutoplayError::Invariant {
                step: self.steps,
                detail: "no action in progress".to_string(),
            })
    }

    /// Cards are never created or lost, and cash only grows by donkey payouts.
    pub fn check_invariants(&self) -> Result<(), AutoplayError> {
        let in_flight = usize::from(in_flight_card(&self.game));
        let cards =
            self.game.deck().map_or(0, |deck| deck.len()) + self.game.total_cards() + in_flight;
        if cards != self.initial_cards {
            return Err(AutoplayError::Invariant {
                step: self.steps,
                detail: format!("{cards} cards in play, expected {}", self.initial_cards),
            });
        }
        let expected = self.base_cash + self.game.donkey_paid();
        if self.game.total_cash() != expected {
            return Err(AutoplayError::Invariant {
                step: self.steps,
                detail: format!(
                    "{} cash on the table, expected {expected}",
                    self.game.total_cash()
                ),
            });
        }
        if self.game.players().iter().any(|player| player.herd.len() > self.initial_cards) {
            return Err(AutoplayError::Invariant {
                step: self.steps,
                detail: "herd larger than the deck".to_string(),
            });
        }
        Ok(())
    }
}

/// The auction card sits with the auction until it is settled.
fn in_flight_card(game: &Game) -> bool {
    matches!(
        game.current_action(),
        Some(GameAction::Auction(auction)) if !auction.is_finished()
    )
}

/// Smallest notes first until `amount` is covered.
fn cover(notes: &[Note], amount: u32) -> Option<Vec<Note>> {
    let mut cash = Vec::new();
    for note in notes {
        if cash_value(&cash) >= amount {
            break;
        }
        cash.push(*note);
    }
    (cash_value(&cash) >= amount).then_some(cash)
}

/// Candidate trade stacks: each distinct note on its own plus the whole wallet.
fn stacks(notes: &[Note], allow_empty: bool) -> Vec<Vec<Note>> {
    let mut out: Vec<Vec<Note>> = Vec::new();
    if allow_empty {
        out.push(Vec::new());
    }
    let distinct: BTreeSet<Note> = notes.iter().copied().collect();
    out.extend(distinct.into_iter().map(|note| vec![note]));
    if notes.len() > 1 {
        out.push(notes.to_vec());
    }
    out
}
