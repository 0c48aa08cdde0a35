//! Property-based tests over whole games using proptest.
//!
//! A simple driver plays standard dealt games to the end (or a step cap),
//! answering every choice the way the CPU would, and the properties are
//! checked after every step.

use data_war::cards::CardId;
use data_war::core::{Command, GameConfig, PlayerId, TurnPhase};
use data_war::game::{Engine, EngineEvent};
use data_war::rules::{check_win_condition, WinCondition};
use data_war::{Card, GameState, LockReason};
use proptest::prelude::*;

const MAX_STEPS: usize = 3_000;

/// Apply the next sensible command. Returns false once nothing is left.
fn step(engine: &mut Engine, events: &mut Vec<EngineEvent>) -> bool {
    if engine.winner().is_some() {
        return false;
    }
    let state = engine.state();

    if let Some(tantrum) = &state.tantrum {
        let keep = tantrum.cpu_selection();
        events.extend(engine.dispatch(Command::confirm_tantrum(&keep)).unwrap());
        return true;
    }
    if let Some(open) = &state.open_what_you_want {
        let order: Vec<CardId> = open.revealed.iter().rev().map(|c| c.id).collect();
        events.extend(engine.dispatch(Command::confirm_order(&order)).unwrap());
        return true;
    }
    if let Some(grab) = state.data_grab.as_ref().filter(|g| g.is_open()) {
        if let Some(first) = grab.pool.first() {
            let card = first.id();
            events.extend(
                engine
                    .dispatch(Command::GrabCard {
                        player: PlayerId::Player,
                        card,
                    })
                    .unwrap(),
            );
        }
        events.extend(engine.run_until_idle());
        return true;
    }
    if state.lock.holds(LockReason::ResultsModal) {
        events.extend(engine.dispatch(Command::DismissDataGrabResults).unwrap());
        return true;
    }
    if engine.transitions_blocked() || engine.next_deadline().is_some() {
        let fired = engine.run_until_idle();
        let progressed = !fired.is_empty();
        events.extend(fired);
        return progressed || !engine.transitions_blocked();
    }

    if state.turn.phase == TurnPhase::DataWar && state.turn.owes_war_hand() {
        for side in PlayerId::all() {
            if engine.state().turn.awaiting_war_hand[side] {
                events.extend(engine.dispatch(Command::PlayWarHand(side)).unwrap());
            }
        }
        return true;
    }

    for side in PlayerId::all() {
        while engine
            .state()
            .player(side)
            .played_card
            .map_or(true, |c| c.requires_follow_up())
        {
            match engine.dispatch(Command::PlayCard(side)) {
                Ok(more) => events.extend(more),
                Err(_) => break,
            }
        }
    }
    match engine.dispatch(Command::ResolveTurn) {
        Ok(more) => {
            events.extend(more);
            true
        }
        Err(_) => false,
    }
}

fn play_game(seed: u64) -> (Engine, Vec<EngineEvent>) {
    let mut engine = Engine::new(GameConfig::default(), seed);
    let total = engine.config().deck.total_cards();
    let mut events = Vec::new();

    for _ in 0..MAX_STEPS {
        if !step(&mut engine, &mut events) {
            break;
        }
        assert_conserved(engine.state(), total);
    }
    (engine, events)
}

fn assert_conserved(state: &GameState, total: usize) {
    let census = state.census();
    assert_eq!(census.len(), total, "card count changed");
    assert!(census.windows(2).all(|w| w[0] != w[1]), "duplicate card id");
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

fn turn_winners(events: &[EngineEvent]) -> Vec<EngineEvent> {
    events
        .iter()
        .filter(|e| matches!(e, EngineEvent::TurnResolved { .. }))
        .cloned()
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Every card stays in exactly one place for the whole game.
    #[test]
    fn test_cards_are_conserved(seed in any::<u64>()) {
        let (engine, _) = play_game(seed);
        assert_conserved(engine.state(), engine.config().deck.total_cards());
    }

    /// Same deal, same plays: same winners, same events, same end state.
    #[test]
    fn test_games_are_deterministic(seed in any::<u64>()) {
        let (first, first_events) = play_game(seed);
        let (second, second_events) = play_game(seed);

        prop_assert_eq!(turn_winners(&first_events), turn_winners(&second_events));
        prop_assert_eq!(first_events, second_events);
        prop_assert_eq!(first.snapshot(), second.snapshot());
    }

    /// Animations never overlap.
    #[test]
    fn test_animations_never_overlap(seed in any::<u64>()) {
        let (_, events) = play_game(seed);
        assert_one_animation_at_a_time(&events);
    }

    /// A finished game reports exactly one game-over and holds no
    /// leftover continuation.
    #[test]
    fn test_game_over_is_reported_once(seed in any::<u64>()) {
        let (engine, events) = play_game(seed);
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, EngineEvent::GameOver(_)))
            .count();
        if engine.winner().is_some() {
            prop_assert_eq!(game_overs, 1);
            prop_assert!(engine.state().continuation.is_empty());
        } else {
            prop_assert_eq!(game_overs, 0);
        }
    }

    /// Launch-Stack counts always match the piles.
    #[test]
    fn test_pile_matches_count(seed in any::<u64>()) {
        let (engine, _) = play_game(seed);
        for (_, player) in engine.state().players.iter() {
            prop_assert_eq!(player.launch_stack_count() as usize, player.launch_stack_pile().len());
        }
    }
}

// =============================================================================
// Launch-Stack threshold
// =============================================================================

fn rocket(id: u32) -> Card {
    Card::special(CardId::new(id), data_war::SpecialType::LaunchStack, 0)
}

/// One short of the threshold keeps the game going; reaching it wins.
#[test]
fn test_threshold_two_then_three() {
    let config = GameConfig::default();
    let mut state = GameState::new(
        (1..=5).map(|i| Card::new(CardId::new(i), 2)).collect(),
        (10..=15).map(|i| Card::new(CardId::new(i), 2)).collect(),
        0,
    );
    state.player_mut(PlayerId::Player).add_launch_stack(rocket(50));
    state.player_mut(PlayerId::Player).add_launch_stack(rocket(51));
    assert!(!check_win_condition(&mut state, &config));
    assert!(state.win.is_none());

    state.player_mut(PlayerId::Player).add_launch_stack(rocket(52));
    assert!(check_win_condition(&mut state, &config));
    let win = state.win.unwrap();
    assert_eq!(win.winner, PlayerId::Player);
    assert_eq!(win.win_condition, WinCondition::LaunchStacks);
}
