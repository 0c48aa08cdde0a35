//! Special-card effect integration tests.
//!
//! Each test plays a full turn through the engine and checks what the
//! effect queue, animations and collections did to the decks and piles.

use data_war::animation::AnimationKind;
use data_war::cards::{Card, CardId, SpecialType};
use data_war::core::{Command, EngineError, GameConfig, PlayerId};
use data_war::game::{ChoiceKind, Engine, EngineEvent};
use data_war::LockReason;

fn plain(id: u32, value: u8) -> Card {
    Card::new(CardId::new(id), value)
}

fn special(id: u32, special: SpecialType, value: u8) -> Card {
    Card::special(CardId::new(id), special, value)
}

/// `n` value-1 cards with ids from `from`.
fn filler(from: u32, n: u32) -> Vec<Card> {
    (from..from + n).map(|i| plain(i, 1)).collect()
}

fn with_filler(mut front: Vec<Card>, from: u32, n: u32) -> Vec<Card> {
    front.extend(filler(from, n));
    front
}

/// Play until both sides have a value card on top.
fn play_until_ready(engine: &mut Engine) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    for side in PlayerId::all() {
        while engine.state().player(side).played_card.map_or(true, |c| c.requires_follow_up()) {
            match engine.dispatch(Command::PlayCard(side)) {
                Ok(more) => events.extend(more),
                Err(_) => break,
            }
        }
    }
    events
}

fn play_turn(engine: &mut Engine) -> Vec<EngineEvent> {
    let mut events = play_until_ready(engine);
    events.extend(engine.dispatch(Command::ResolveTurn).unwrap());
    events.extend(engine.run_until_idle());
    events
}

fn deck_ids(engine: &Engine, side: PlayerId) -> Vec<CardId> {
    engine.state().player(side).deck.iter().map(|c| c.id).collect()
}

fn animations(events: &[EngineEvent]) -> Vec<AnimationKind> {
    events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::AnimationStarted { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect()
}

fn assert_one_animation_at_a_time(events: &[EngineEvent]) {
    let mut showing = 0;
    for event in events {
        match event {
            EngineEvent::AnimationStarted { .. } => {
                showing += 1;
                assert!(showing <= 1, "two animations showing at once");
            }
            EngineEvent::AnimationFinished { .. } => showing -= 1,
            _ => {}
        }
    }
}

// =============================================================================
// Launch Stacks
// =============================================================================

/// The winner claims a face-up Launch Stack into their pile.
#[test]
fn test_launch_stack_claimed_by_winner() {
    let player = with_filler(vec![special(1, SpecialType::LaunchStack, 0), plain(2, 5)], 3, 3);
    let cpu = with_filler(vec![plain(100, 3)], 101, 3);
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    let events = play_turn(&mut engine);
    let rockets: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::CollectionStarted { launch_stacks, .. } => Some(*launch_stacks),
            _ => None,
        })
        .collect();
    assert_eq!(rockets, vec![1]);

    let player = engine.state().player(PlayerId::Player);
    assert_eq!(player.launch_stack_count(), 1);
    assert_eq!(player.launch_stack_pile()[0].id, CardId::new(1));
    assert!(!deck_ids(&engine, PlayerId::Player).contains(&CardId::new(1)));
    assert_eq!(engine.state().census().len(), 9);
}

/// A Launch Stack played by the loser goes to the winner's pile.
#[test]
fn test_launch_stack_of_loser_goes_to_winner() {
    let player = with_filler(vec![plain(1, 6)], 2, 3);
    let cpu = with_filler(vec![special(100, SpecialType::LaunchStack, 0), plain(101, 2)], 102, 3);
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    play_turn(&mut engine);
    assert_eq!(engine.state().player(PlayerId::Player).launch_stack_count(), 1);
    assert_eq!(engine.state().player(PlayerId::Cpu).launch_stack_count(), 0);
}

/// Reaching the threshold ends the game on the collection that did it.
#[test]
fn test_launch_stack_threshold_wins() {
    let config = GameConfig::default().with_launch_stack_threshold(1);
    let player = with_filler(vec![special(1, SpecialType::LaunchStack, 0), plain(2, 5)], 3, 3);
    let cpu = with_filler(vec![plain(100, 3)], 101, 3);
    let mut engine = Engine::with_decks(config, player, cpu);

    let events = play_turn(&mut engine);
    let win = engine.winner().unwrap();
    assert_eq!(win.winner, PlayerId::Player);
    assert_eq!(win.win_condition, data_war::WinCondition::LaunchStacks);
    assert!(events.contains(&EngineEvent::GameOver(win)));
    assert!(!events.iter().any(|e| matches!(e, EngineEvent::TurnEnded { .. })));
}

// =============================================================================
// Steal, buy, recall
// =============================================================================

/// CPU wins a Launch Stack on turn one; the player's Patent Theft takes it.
#[test]
fn test_patent_theft_steals_a_launch_stack() {
    let player = with_filler(vec![plain(1, 1), special(2, SpecialType::PatentTheft, 6)], 3, 3);
    let cpu = with_filler(
        vec![special(100, SpecialType::LaunchStack, 0), plain(101, 5), plain(102, 1)],
        103,
        3,
    );
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    play_turn(&mut engine);
    assert_eq!(engine.state().player(PlayerId::Cpu).launch_stack_count(), 1);

    let events = play_turn(&mut engine);
    assert_eq!(animations(&events), vec![AnimationKind::PatentTheft]);
    assert!(events.contains(&EngineEvent::LaunchStackStolen {
        from: PlayerId::Cpu,
        to: PlayerId::Player,
    }));
    assert_eq!(engine.state().player(PlayerId::Player).launch_stack_count(), 1);
    assert_eq!(engine.state().player(PlayerId::Cpu).launch_stack_count(), 0);
}

/// Patent Theft played by the loser does nothing.
#[test]
fn test_patent_theft_needs_a_win() {
    let player = with_filler(vec![special(1, SpecialType::PatentTheft, 1)], 2, 3);
    let cpu = with_filler(vec![plain(100, 5)], 101, 3);
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    let events = play_turn(&mut engine);
    assert!(animations(&events).is_empty());
    assert!(!events.iter().any(|e| matches!(e, EngineEvent::LaunchStackStolen { .. })));
}

/// Leveraged Buyout takes the top of the loser's deck before the board.
#[test]
fn test_leveraged_buyout_buys_top_cards() {
    let player = with_filler(vec![special(1, SpecialType::LeveragedBuyout, 6)], 2, 2);
    let cpu = vec![plain(100, 1), plain(101, 2), plain(102, 3), plain(103, 4)];
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    let events = play_turn(&mut engine);
    assert_eq!(animations(&events), vec![AnimationKind::LeveragedBuyout]);

    let collections = events
        .iter()
        .filter(|e| matches!(e, EngineEvent::CollectionFinished { .. }))
        .count();
    assert_eq!(collections, 2);
    assert_eq!(
        deck_ids(&engine, PlayerId::Player),
        vec![
            CardId::new(2),
            CardId::new(3),
            CardId::new(101),
            CardId::new(102),
            CardId::new(1),
            CardId::new(100),
        ]
    );
    assert_eq!(deck_ids(&engine, PlayerId::Cpu), vec![CardId::new(103)]);
}

/// Mandatory Recall sends the loser's Launch Stacks back into their deck.
#[test]
fn test_mandatory_recall_reshuffles_pile() {
    let player = with_filler(vec![plain(1, 1), special(2, SpecialType::MandatoryRecall, 6)], 3, 3);
    let cpu = with_filler(
        vec![special(100, SpecialType::LaunchStack, 0), plain(101, 5), plain(102, 1)],
        103,
        3,
    );
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    play_turn(&mut engine);
    assert_eq!(engine.state().player(PlayerId::Cpu).launch_stack_count(), 1);

    let events = play_turn(&mut engine);
    assert_eq!(animations(&events), vec![AnimationKind::MandatoryRecall]);
    assert!(events.contains(&EngineEvent::LaunchStacksRecalled {
        player: PlayerId::Cpu,
        count: 1,
    }));
    assert_eq!(engine.state().player(PlayerId::Cpu).launch_stack_count(), 0);
    assert!(deck_ids(&engine, PlayerId::Cpu).contains(&CardId::new(100)));
    assert_eq!(engine.state().census().len(), 11);
}

// =============================================================================
// Forced Empathy
// =============================================================================

/// Decks swap before the board is collected, with the inline animation.
#[test]
fn test_forced_empathy_swaps_decks() {
    let player = vec![special(1, SpecialType::ForcedEmpathy, 3), plain(2, 1), plain(3, 1)];
    let cpu = vec![plain(100, 1), plain(101, 1), plain(102, 1), plain(103, 1)];
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    let events = play_turn(&mut engine);
    assert!(events.contains(&EngineEvent::DecksSwapped));
    assert_eq!(animations(&events), vec![AnimationKind::ForcedEmpathy]);
    assert_eq!(
        deck_ids(&engine, PlayerId::Player),
        vec![CardId::new(101), CardId::new(102), CardId::new(103), CardId::new(1), CardId::new(100)]
    );
    assert_eq!(deck_ids(&engine, PlayerId::Cpu), vec![CardId::new(2), CardId::new(3)]);
}

// =============================================================================
// Animation ordering
// =============================================================================

/// Two animated effects in one turn play one after the other.
#[test]
fn test_animations_play_one_at_a_time() {
    let player = with_filler(vec![special(1, SpecialType::LeveragedBuyout, 6)], 2, 3);
    let cpu = with_filler(vec![special(100, SpecialType::TemperTantrum, 1)], 101, 5);
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    let mut events = play_until_ready(&mut engine);
    events.extend(engine.dispatch(Command::ResolveTurn).unwrap());
    events.extend(engine.run_until_idle());

    assert_eq!(
        animations(&events),
        vec![AnimationKind::LeveragedBuyout, AnimationKind::TemperTantrum]
    );
    assert!(engine.state().tantrum.is_some());
    assert_eq!(engine.lock_reasons(), vec![LockReason::PlayerChoice]);

    events.extend(engine.dispatch(Command::confirm_tantrum(&[CardId::new(1)])).unwrap());
    events.extend(engine.run_until_idle());
    assert_one_animation_at_a_time(&events);
    assert!(!engine.transitions_blocked());
}

/// An effect whose animation was shown is not animated again.
#[test]
fn test_hostile_takeover_animated_once() {
    let player = with_filler(vec![special(1, SpecialType::HostileTakeover, 6)], 2, 3);
    let cpu = with_filler(vec![plain(100, 3)], 101, 8);
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    let mut events = play_until_ready(&mut engine);
    events.extend(engine.dispatch(Command::ResolveTurn).unwrap());
    events.extend(engine.run_until_idle());
    events.extend(engine.dispatch(Command::PlayWarHand(PlayerId::Cpu)).unwrap());
    events.extend(engine.dispatch(Command::ResolveTurn).unwrap());
    events.extend(engine.run_until_idle());

    assert_eq!(
        animations(&events),
        vec![AnimationKind::DataWar, AnimationKind::HostileTakeover]
    );
    assert_one_animation_at_a_time(&events);
}

/// Both sides showing a takeover: no takeover round, a plain war, and one
/// animation covers both cards.
#[test]
fn test_same_type_on_both_sides_animates_once() {
    let player = with_filler(
        vec![
            special(1, SpecialType::HostileTakeover, 6),
            plain(2, 1),
            plain(3, 1),
            plain(4, 1),
            plain(5, 5),
        ],
        6,
        3,
    );
    let cpu = with_filler(
        vec![
            special(100, SpecialType::HostileTakeover, 6),
            plain(101, 1),
            plain(102, 1),
            plain(103, 1),
            plain(104, 2),
        ],
        105,
        3,
    );
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    let mut events = play_until_ready(&mut engine);
    events.extend(engine.dispatch(Command::ResolveTurn).unwrap());
    events.extend(engine.run_until_idle());
    assert!(events.contains(&EngineEvent::DataWarStarted {
        stage: 1,
        hostile_takeover: false,
    }));

    for side in PlayerId::all() {
        events.extend(engine.dispatch(Command::PlayWarHand(side)).unwrap());
    }
    events.extend(engine.dispatch(Command::ResolveTurn).unwrap());
    events.extend(engine.run_until_idle());

    let takeovers = animations(&events)
        .into_iter()
        .filter(|kind| *kind == AnimationKind::HostileTakeover)
        .count();
    assert_eq!(takeovers, 1);
    assert_one_animation_at_a_time(&events);
    assert_eq!(engine.state().player(PlayerId::Player).deck.len(), 3 + 10);
    assert!(!engine.transitions_blocked());
}

/// A tracker smacker cancels the opposing takeover entirely.
#[test]
fn test_tracker_smacker_blocks_hostile_takeover() {
    let player = with_filler(vec![special(1, SpecialType::HostileTakeover, 6)], 2, 3);
    let cpu = with_filler(vec![special(100, SpecialType::Blocker, 0), plain(101, 3)], 102, 5);
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    let events = play_turn(&mut engine);
    assert_eq!(engine.state().turn.number, 2);
    assert!(!events.iter().any(|e| matches!(e, EngineEvent::DataWarStarted { .. })));
    assert!(!animations(&events).contains(&AnimationKind::HostileTakeover));
}

// =============================================================================
// Open What You Want
// =============================================================================

/// The player reorders the top three cards of their deck.
#[test]
fn test_open_what_you_want_reorders() {
    let player = vec![
        special(1, SpecialType::OpenWhatYouWant, 4),
        plain(2, 1),
        plain(3, 2),
        plain(4, 3),
        plain(5, 4),
    ];
    let cpu = with_filler(vec![plain(100, 1)], 101, 3);
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    play_until_ready(&mut engine);
    let events = engine.dispatch(Command::ResolveTurn).unwrap();
    assert!(events.contains(&EngineEvent::ChoiceOpened {
        choice: ChoiceKind::OpenWhatYouWant,
        player: PlayerId::Player,
    }));
    let revealed: Vec<CardId> = engine
        .state()
        .open_what_you_want
        .as_ref()
        .unwrap()
        .revealed
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(revealed, vec![CardId::new(2), CardId::new(3), CardId::new(4)]);

    let bad = Command::confirm_order(&[CardId::new(2), CardId::new(3), CardId::new(5)]);
    assert!(matches!(engine.dispatch(bad), Err(EngineError::InvalidSelection(_))));
    assert!(engine.state().open_what_you_want.is_some());

    let order = [CardId::new(4), CardId::new(2), CardId::new(3)];
    engine.dispatch(Command::confirm_order(&order)).unwrap();
    engine.run_until_idle();

    assert_eq!(
        deck_ids(&engine, PlayerId::Player),
        vec![
            CardId::new(4),
            CardId::new(2),
            CardId::new(3),
            CardId::new(5),
            CardId::new(1),
            CardId::new(100),
        ]
    );
    assert!(!engine.transitions_blocked());
}

/// The CPU's copy of the card opens nothing.
#[test]
fn test_open_what_you_want_cpu_skipped() {
    let player = with_filler(vec![plain(1, 1)], 2, 3);
    let cpu = with_filler(vec![special(100, SpecialType::OpenWhatYouWant, 4)], 101, 3);
    let mut engine = Engine::with_decks(GameConfig::default(), player, cpu);

    let events = play_turn(&mut engine);
    assert!(!events.iter().any(|e| matches!(e, EngineEvent::ChoiceOpened { .. })));
    assert_eq!(engine.state().turn.number, 2);
}

/// Confirming a choice that isn't open is refused.
#[test]
fn test_confirm_without_choice() {
    let mut engine = Engine::with_decks(GameConfig::default(), filler(1, 3), filler(100, 3));
    assert_eq!(
        engine.dispatch(Command::confirm_order(&[CardId::new(1)])),
        Err(EngineError::NoChoiceOpen("open what you want"))
    );
    assert_eq!(
        engine.dispatch(Command::confirm_tantrum(&[])),
        Err(EngineError::NoChoiceOpen("temper tantrum"))
    );
}
