use koehandel_core::{
    ActionId, ActionKind, Animal, AuctionPhase, Deck, ErrorKind, Event, EventBus, Game, GameError,
    GameId, Note, Player, PlayerId,
};

/// Seats `count` players, starts with `deck` and returns the ids in turn order.
fn table(count: u64, deck: Deck) -> (Game, EventBus, Vec<PlayerId>) {
    let mut events = EventBus::default();
    let mut game = Game::new(GameId(1), Player::new(PlayerId(1), "Player 1"), 42);
    for id in 2..=count {
        game.add_player(Player::new(PlayerId(id), format!("Player {id}")), &mut events)
            .expect("seat player");
    }
    game.start_with_deck(deck, &mut events).expect("start game");
    let first = game.current_player().expect("turn holder").id;
    let ids: Vec<PlayerId> = game.players().iter().map(|player| player.id).collect();
    let offset = ids.iter().position(|id| *id == first).expect("seated");
    let order = (0..ids.len()).map(|i| ids[(offset + i) % ids.len()]).collect();
    (game, events, order)
}

fn name(id: PlayerId) -> String {
    format!("Player {}", id.0)
}

fn notes(game: &Game, id: PlayerId) -> Vec<Note> {
    game.player(id).expect("player").wallet.notes()
}

#[test]
fn everyone_skips_and_auctioneer_keeps_the_card() {
    let (mut game, mut events, order) = table(3, Deck::standard());
    let id = game.start_auction(order[0], &mut events).expect("start auction");

    game.skip_bid(id, order[1], &mut events).expect("first skip");
    game.skip_bid(id, order[2], &mut events).expect("second skip");

    let auction = game.auction(id).expect("archived auction");
    assert_eq!(auction.phase, AuctionPhase::Finished);
    assert_eq!(auction.last_bidder, None);
    assert_eq!(auction.winner, Some(order[0]));
    assert!(game.current_action().is_none());
    assert_eq!(game.player(order[0]).expect("player").count_of(Animal::Koe), 1);
    assert_eq!(game.current_player().map(|player| player.id), Some(order[1]));
    assert_eq!(game.total_cash(), 270);
    assert!(events
        .drain()
        .any(|event| event == Event::TurnPassed { player: order[1] }));
}

#[test]
fn highest_bidder_pays_the_auctioneer() {
    let (mut game, mut events, order) = table(3, Deck::standard());
    let id = game.start_auction(order[0], &mut events).expect("start auction");

    game.place_bid(id, order[1], 10, &mut events).expect("bid");
    game.skip_bid(id, order[2], &mut events).expect("skip");
    assert_eq!(game.auction(id).map(|a| a.phase), Some(AuctionPhase::BuyOver));

    game.move_to_money_transfer(id, order[0], false, &mut events)
        .expect("decline buy-over");
    game.perform_auction_transfer(id, order[1], order[0], &[Note::Ten], &mut events)
        .expect("pay");

    assert_eq!(game.player(order[1]).map(|p| p.wallet.total()), Some(80));
    assert_eq!(game.player(order[0]).map(|p| p.wallet.total()), Some(100));
    assert_eq!(game.player(order[1]).map(|p| p.count_of(Animal::Koe)), Some(1));
    assert_eq!(game.current_player().map(|player| player.id), Some(order[1]));
}

#[test]
fn buy_over_reverses_the_payment() {
    let (mut game, mut events, order) = table(3, Deck::standard());
    let id = game.start_auction(order[0], &mut events).expect("start auction");

    game.place_bid(id, order[1], 10, &mut events).expect("first bid");
    game.place_bid(id, order[2], 20, &mut events).expect("second bid");
    game.skip_bid(id, order[1], &mut events).expect("skip");
    game.move_to_money_transfer(id, order[0], true, &mut events)
        .expect("buy over");

    let err = game
        .perform_auction_transfer(id, order[2], order[0], &[Note::Ten, Note::Ten], &mut events)
        .unwrap_err();
    assert_eq!(err, GameError::ReversedPayment(name(order[2])));

    game.perform_auction_transfer(id, order[0], order[2], &[Note::Ten, Note::Ten], &mut events)
        .expect("pay");

    assert_eq!(
        notes(&game, order[0]),
        vec![Note::Zero, Note::Zero, Note::Ten, Note::Ten, Note::Fifty]
    );
    assert_eq!(
        notes(&game, order[2]),
        vec![
            Note::Zero,
            Note::Zero,
            Note::Ten,
            Note::Ten,
            Note::Ten,
            Note::Ten,
            Note::Ten,
            Note::Ten,
            Note::Fifty
        ]
    );
    assert_eq!(game.player(order[0]).map(|p| p.count_of(Animal::Koe)), Some(1));
}

#[test]
fn overpayment_is_kept_by_the_payee() {
    let (mut game, mut events, order) = table(3, Deck::standard());
    let id = game.start_auction(order[0], &mut events).expect("start auction");
    game.place_bid(id, order[1], 10, &mut events).expect("bid");
    game.skip_bid(id, order[2], &mut events).expect("skip");
    game.move_to_money_transfer(id, order[0], false, &mut events)
        .expect("decline");

    game.perform_auction_transfer(id, order[1], order[0], &[Note::Fifty], &mut events)
        .expect("pay");
    assert_eq!(game.player(order[0]).map(|p| p.wallet.total()), Some(140));
    assert_eq!(game.player(order[1]).map(|p| p.wallet.total()), Some(40));
}

#[test]
fn bidding_rules_are_enforced() {
    let (mut game, mut events, order) = table(3, Deck::standard());
    let id = game.start_auction(order[0], &mut events).expect("start auction");

    let err = game.place_bid(id, order[0], 10, &mut events).unwrap_err();
    assert_eq!(err, GameError::AuctioneerCannotBid(name(order[0])));
    assert_eq!(err.kind(), ErrorKind::WrongRole);

    let err = game.place_bid(id, order[2], 10, &mut events).unwrap_err();
    assert_eq!(err, GameError::NotYourBid(name(order[2])));
    assert_eq!(err.kind(), ErrorKind::OutOfTurn);

    let err = game.place_bid(id, order[1], 0, &mut events).unwrap_err();
    assert_eq!(err, GameError::BidTooLow { current: 0, offered: 0 });

    let err = game
        .move_to_money_transfer(id, order[0], false, &mut events)
        .unwrap_err();
    assert_eq!(err, GameError::BiddingOpen);

    let err = game
        .perform_auction_transfer(id, order[1], order[0], &[Note::Ten], &mut events)
        .unwrap_err();
    assert_eq!(err, GameError::NotInMoneyTransfer);
}

#[test]
fn buy_over_phase_rules_are_enforced() {
    let (mut game, mut events, order) = table(3, Deck::standard());
    let id = game.start_auction(order[0], &mut events).expect("start auction");
    game.place_bid(id, order[1], 20, &mut events).expect("bid");
    game.skip_bid(id, order[2], &mut events).expect("skip");

    let err = game.skip_bid(id, order[1], &mut events).unwrap_err();
    assert_eq!(err, GameError::BiddingClosed);

    let err = game
        .move_to_money_transfer(id, order[1], false, &mut events)
        .unwrap_err();
    assert_eq!(err, GameError::NotAuctioneer(name(order[1])));
    assert_eq!(err.kind(), ErrorKind::WrongRole);

    game.move_to_money_transfer(id, order[0], false, &mut events)
        .expect("decline");
    let err = game
        .move_to_money_transfer(id, order[0], true, &mut events)
        .unwrap_err();
    assert_eq!(err, GameError::BuyOverClosed);

    let err = game
        .perform_auction_transfer(id, order[1], order[1], &[Note::Fifty], &mut events)
        .unwrap_err();
    assert_eq!(err, GameError::SelfPayment(name(order[1])));

    let err = game
        .perform_auction_transfer(id, order[2], order[0], &[Note::Fifty], &mut events)
        .unwrap_err();
    assert_eq!(err, GameError::NotPayer(name(order[2])));

    let err = game
        .perform_auction_transfer(id, order[1], order[2], &[Note::Fifty], &mut events)
        .unwrap_err();
    assert_eq!(err, GameError::NotPayee(name(order[2])));

    let err = game
        .perform_auction_transfer(id, order[1], order[0], &[Note::Ten], &mut events)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "total cash (10) must be at least equal to the bid (20)"
    );
    assert_eq!(err.kind(), ErrorKind::InsufficientTotal);

    let err = game
        .perform_auction_transfer(id, order[1], order[0], &[Note::Hundred], &mut events)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
    assert_eq!(game.total_cash(), 270);
    assert!(game.current_action().is_some());
}

#[test]
fn only_the_turn_holder_starts_one_auction_at_a_time() {
    let (mut game, mut events, order) = table(3, Deck::standard());

    let err = game.start_auction(order[1], &mut events).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!("it's not {}'s turn to start an auction", name(order[1]))
    );

    let id = game.start_auction(order[0], &mut events).expect("start auction");
    let err = game.start_auction(order[0], &mut events).unwrap_err();
    assert_eq!(err, GameError::ActionInProgress);

    let err = game
        .place_bid(ActionId(id.0 + 7), order[1], 10, &mut events)
        .unwrap_err();
    assert_eq!(err.to_string(), "this auction is not currently active");

    let err = game.set_offer(id, order[0], &[Note::Ten], &mut events).unwrap_err();
    assert_eq!(err.to_string(), "this trade is not currently active");

    let err = game
        .place_bid(id, PlayerId(99), 10, &mut events)
        .unwrap_err();
    assert_eq!(err, GameError::UnknownPlayer(PlayerId(99)));
}

#[test]
fn finished_auction_id_is_stale() {
    let (mut game, mut events, order) = table(3, Deck::standard());
    let id = game.start_auction(order[0], &mut events).expect("start auction");
    game.skip_bid(id, order[1], &mut events).expect("first skip");
    game.skip_bid(id, order[2], &mut events).expect("second skip");
    assert!(game.auction(id).is_some_and(|auction| auction.is_finished()));

    let err = game.skip_bid(id, order[1], &mut events).unwrap_err();
    assert_eq!(err, GameError::StaleAction(ActionKind::Auction));
    assert_eq!(err.kind(), ErrorKind::StaleAction);

    let next = game.start_auction(order[1], &mut events).expect("next auction");
    let err = game.place_bid(id, order[2], 10, &mut events).unwrap_err();
    assert_eq!(err, GameError::StaleAction(ActionKind::Auction));
    assert_eq!(game.auction(next).map(|a| a.bid), Some(0));
}

#[test]
fn oversized_payment_is_rejected_without_panicking() {
    let (mut game, mut events, order) = table(3, Deck::standard());
    let id = game.start_auction(order[0], &mut events).expect("start auction");
    game.place_bid(id, order[1], 10, &mut events).expect("bid");
    game.skip_bid(id, order[2], &mut events).expect("skip");
    game.move_to_money_transfer(id, order[0], false, &mut events)
        .expect("decline");

    let stack = vec![Note::FiveHundred; 9_000_000];
    let err = game
        .perform_auction_transfer(id, order[1], order[0], &stack, &mut events)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
    assert!(!err.is_fatal());
    assert_eq!(game.total_cash(), 270);
    assert_eq!(
        game.auction(id).map(|a| a.phase),
        Some(AuctionPhase::MoneyTransfer)
    );

    game.perform_auction_transfer(id, order[1], order[0], &[Note::Ten], &mut events)
        .expect("pay");
}

#[test]
fn four_players_rotate_bidders_in_seat_order() {
    let (mut game, mut events, order) = table(4, Deck::standard());
    let id = game.start_auction(order[0], &mut events).expect("start auction");
    assert_eq!(
        game.auction(id).map(|a| a.bidders().to_vec()),
        Some(vec![order[1], order[2], order[3]])
    );

    game.place_bid(id, order[1], 10, &mut events).expect("bid");
    game.skip_bid(id, order[2], &mut events).expect("skip");
    assert_eq!(
        game.auction(id).and_then(|a| a.current_bidder()),
        Some(order[3])
    );
    game.place_bid(id, order[3], 20, &mut events).expect("raise");
    assert_eq!(
        game.auction(id).and_then(|a| a.current_bidder()),
        Some(order[1])
    );
    game.skip_bid(id, order[1], &mut events).expect("fold");
    let auction = game.auction(id).expect("auction");
    assert_eq!(auction.phase, AuctionPhase::BuyOver);
    assert_eq!(auction.last_bidder, Some(order[3]));
    assert_eq!(auction.bid, 20);
}

#[test]
fn donkey_pays_every_player() {
    let deck = Deck::from_animals([Animal::Ezel, Animal::Koe, Animal::Koe]);
    let (mut game, mut events, order) = table(3, deck);

    let id = game.start_auction(order[0], &mut events).expect("start auction");
    assert_eq!(game.auction(id).map(|a| a.card.animal), Some(Animal::Ezel));
    assert_eq!(game.donkey_drops(), 1);
    assert_eq!(game.donkey_paid(), 150);
    for player in game.players() {
        assert_eq!(player.wallet.count(Note::Fifty), 2);
        assert_eq!(player.wallet.total(), 140);
    }
    assert!(events.drain().any(|event| event
        == Event::DonkeyDropped {
            drop: 1,
            note: Note::Fifty
        }));
}

#[test]
fn fifth_donkey_is_fatal() {
    let deck = Deck::from_animals([Animal::Ezel; 5]);
    let (mut game, mut events, _) = table(3, deck);

    for _ in 0..4 {
        let auctioneer = game.current_player().expect("turn holder").id;
        let id = game.start_auction(auctioneer, &mut events).expect("start auction");
        while let Some(bidder) = game.auction(id).and_then(|a| a.current_bidder()) {
            game.skip_bid(id, bidder, &mut events).expect("skip");
        }
    }
    for player in game.players() {
        assert_eq!(player.wallet.total(), 90 + 50 + 100 + 200 + 500);
    }

    let auctioneer = game.current_player().expect("turn holder").id;
    let err = game.start_auction(auctioneer, &mut events).unwrap_err();
    assert_eq!(err, GameError::DonkeyOverflow { drop: 5 });
    assert!(err.is_fatal());
    assert_eq!(game.deck().map(Deck::len), Some(1));
    assert_eq!(game.donkey_drops(), 4);
}
