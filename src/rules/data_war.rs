//! Data-War detection.
//!
//! Decides whether the current board escalates into another war round,
//! and hands out forfeits when a side can't afford one.
//!
//! ## Hostile Takeover
//!
//! With a takeover in play the decision depends on how many cards each
//! side has on the board:
//!
//! - Opening play (both sides at most one card) or the takeover side has
//!   more cards: the opponent owes a war hand.
//! - Equal counts (the takeover came up inside a war): the takeover side
//!   counts as the fixed value, the opponent drops to 0 and loses its
//!   tracker and blocker effects, and owes a new war hand.
//! - Opponent has more cards (its war hand is down): the takeover round is
//!   over and the board is checked like any other tie.
//!
//! In the first two cases an opponent without a full war hand in its deck
//! loses on the spot.
//!
//! ## Normal ties
//!
//! Both sides owe a war hand. A side short of cards loses instead; if both
//! are short, the one with fewer cards loses (the CPU on equal counts).

use tracing::{debug, info};

use super::comparator::compare;
use super::win::{declare_winner, WinCondition};
use crate::core::{GameConfig, GameState, PlayerId};

/// Returns true if a war round continues: the sides flagged in
/// `turn.awaiting_war_hand` must commit a war hand before the turn can be
/// resolved again. Returns false when the turn can be decided, or when a
/// forfeit ended the game.
pub fn check_for_data_war(state: &mut GameState, config: &GameConfig) -> bool {
    if state.win.is_some() {
        return false;
    }
    let hand_size = config.war_hand_size();

    if let Some(takeover) = state.turn.hostile_takeover_by {
        let opponent = takeover.opponent();
        let own_cards = state.player(takeover).board_len();
        let opponent_cards = state.player(opponent).board_len();
        let opening = own_cards <= 1 && opponent_cards <= 1;

        if opening || own_cards >= opponent_cards {
            if state.player(opponent).deck.len() < hand_size {
                info!(%takeover, "opponent can't answer the takeover");
                declare_winner(state, takeover, WinCondition::AllCards);
                return false;
            }

            if !opening && own_cards == opponent_cards {
                state.player_mut(takeover).current_turn_value = config.hostile_takeover_value;
                let answering = state.player_mut(opponent);
                answering.current_turn_value = 0;
                answering.strip_modifier_effects();
                debug!(%takeover, "takeover inside a war, opponent reset");
            }

            state.turn.hostile_takeover_data_war = true;
            start_round(state, &[opponent]);
            return true;
        }

        debug!(%takeover, "takeover round answered");
        state.turn.hostile_takeover_data_war = false;
    }

    let player = state.player(PlayerId::Player);
    let cpu = state.player(PlayerId::Cpu);
    if player.played_card.is_none() || cpu.played_card.is_none() {
        return false;
    }
    if !compare(player, cpu).is_tie() {
        return false;
    }

    let player_deck = player.deck.len();
    let cpu_deck = cpu.deck.len();
    let loser = match (player_deck < hand_size, cpu_deck < hand_size) {
        (false, false) => {
            start_round(state, &PlayerId::ALL);
            return true;
        }
        (true, false) => PlayerId::Player,
        (false, true) => PlayerId::Cpu,
        (true, true) if player_deck < cpu_deck => PlayerId::Player,
        (true, true) => PlayerId::Cpu,
    };

    info!(%loser, player_deck, cpu_deck, "not enough cards for a data war");
    declare_winner(state, loser.opponent(), WinCondition::AllCards);
    false
}

fn start_round(state: &mut GameState, sides: &[PlayerId]) {
    state.turn.war_stage += 1;
    for side in sides {
        state.turn.awaiting_war_hand[*side] = true;
    }
    info!(stage = state.turn.war_stage, ?sides, "data war");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardId, PlayedCardState, SpecialType};
    use crate::rules::{refresh_turn_values, WinState};

    fn deck(from: u32, n: u32) -> Vec<Card> {
        (from..from + n).map(|i| Card::new(CardId::new(i), 2)).collect()
    }

    fn takeover(id: u32) -> Card {
        Card::special(CardId::new(id), SpecialType::HostileTakeover, 6)
    }

    fn play(state: &mut GameState, side: PlayerId, card: Card) {
        state.player_mut(side).place(PlayedCardState::face_up(card));
    }

    fn resolve(state: &mut GameState) -> bool {
        let config = GameConfig::default();
        refresh_turn_values(state, &config);
        check_for_data_war(state, &config)
    }

    #[test]
    fn test_no_tie_no_war() {
        let mut state = GameState::new(deck(1, 10), deck(20, 10), 0);
        play(&mut state, PlayerId::Player, Card::new(CardId::new(100), 5));
        play(&mut state, PlayerId::Cpu, Card::new(CardId::new(101), 3));

        assert!(!resolve(&mut state));
        assert!(state.win.is_none());
        assert!(!state.turn.owes_war_hand());
    }

    #[test]
    fn test_tie_starts_war() {
        let mut state = GameState::new(deck(1, 10), deck(20, 10), 0);
        play(&mut state, PlayerId::Player, Card::new(CardId::new(100), 4));
        play(&mut state, PlayerId::Cpu, Card::new(CardId::new(101), 4));

        assert!(resolve(&mut state));
        assert!(state.win.is_none());
        assert_eq!(state.turn.war_stage, 1);
        assert!(state.turn.awaiting_war_hand[PlayerId::Player]);
        assert!(state.turn.awaiting_war_hand[PlayerId::Cpu]);
    }

    #[test]
    fn test_tie_short_deck_loses() {
        let mut state = GameState::new(deck(1, 10), deck(20, 2), 0);
        play(&mut state, PlayerId::Player, Card::new(CardId::new(100), 4));
        play(&mut state, PlayerId::Cpu, Card::new(CardId::new(101), 4));

        assert!(!resolve(&mut state));
        assert_eq!(
            state.win,
            Some(WinState {
                winner: PlayerId::Player,
                win_condition: WinCondition::AllCards
            })
        );
    }

    #[test]
    fn test_both_short_fewer_loses() {
        let mut state = GameState::new(deck(1, 1), deck(20, 3), 0);
        play(&mut state, PlayerId::Player, Card::new(CardId::new(100), 4));
        play(&mut state, PlayerId::Cpu, Card::new(CardId::new(101), 4));

        assert!(!resolve(&mut state));
        assert_eq!(state.win.map(|w| w.winner), Some(PlayerId::Cpu));
    }

    #[test]
    fn test_both_short_equal_cpu_loses() {
        let mut state = GameState::new(deck(1, 2), deck(20, 2), 0);
        play(&mut state, PlayerId::Player, Card::new(CardId::new(100), 4));
        play(&mut state, PlayerId::Cpu, Card::new(CardId::new(101), 4));

        assert!(!resolve(&mut state));
        assert_eq!(state.win.map(|w| w.winner), Some(PlayerId::Player));
    }

    #[test]
    fn test_hostile_takeover_opening() {
        let mut state = GameState::new(deck(1, 10), deck(20, 10), 0);
        play(&mut state, PlayerId::Player, takeover(100));
        play(&mut state, PlayerId::Cpu, Card::new(CardId::new(101), 2));
        state.turn.hostile_takeover_by = Some(PlayerId::Player);

        assert!(resolve(&mut state));
        assert!(state.turn.hostile_takeover_data_war);
        assert!(state.turn.awaiting_war_hand[PlayerId::Cpu]);
        assert!(!state.turn.awaiting_war_hand[PlayerId::Player]);
        assert!(state.win.is_none());
    }

    #[test]
    fn test_hostile_takeover_short_opponent_loses() {
        let mut state = GameState::new(deck(1, 10), deck(20, 3), 0);
        play(&mut state, PlayerId::Cpu, takeover(100));
        play(&mut state, PlayerId::Player, Card::new(CardId::new(101), 2));
        state.turn.hostile_takeover_by = Some(PlayerId::Cpu);

        // CPU deck is short but it is the player who must answer.
        assert!(resolve(&mut state));

        let mut state = GameState::new(deck(1, 3), deck(20, 10), 0);
        play(&mut state, PlayerId::Cpu, takeover(100));
        play(&mut state, PlayerId::Player, Card::new(CardId::new(101), 2));
        state.turn.hostile_takeover_by = Some(PlayerId::Cpu);

        assert!(!resolve(&mut state));
        assert_eq!(state.win.map(|w| w.winner), Some(PlayerId::Cpu));
        assert!(!state.turn.hostile_takeover_data_war);
    }

    #[test]
    fn test_hostile_takeover_inside_war_resets_opponent() {
        let mut state = GameState::new(deck(1, 10), deck(20, 10), 0);
        for (i, side) in [PlayerId::Player, PlayerId::Cpu].into_iter().enumerate() {
            let base = 200 + 10 * i as u32;
            play(&mut state, side, Card::new(CardId::new(base), 4));
            for k in 1..=3 {
                state
                    .player_mut(side)
                    .place(PlayedCardState::face_down(Card::new(CardId::new(base + k), 1)));
            }
        }
        play(&mut state, PlayerId::Player, takeover(300));
        let theft = Card::special(CardId::new(301), SpecialType::PatentTheft, 3);
        play(&mut state, PlayerId::Cpu, theft);
        state.player_mut(PlayerId::Cpu).active_effects.push_back(crate::core::ActiveEffect {
            card: CardId::new(302),
            special: SpecialType::Tracker,
            value: 2,
        });
        state.turn.hostile_takeover_by = Some(PlayerId::Player);
        state.turn.war_stage = 1;

        assert!(resolve(&mut state));

        let cpu = state.player(PlayerId::Cpu);
        assert_eq!(cpu.current_turn_value, 0);
        assert!(cpu.active_effects.iter().all(|e| !e.is_modifier()));
        assert_eq!(cpu.active_effects.len(), 1);
        assert_eq!(state.player(PlayerId::Player).current_turn_value, 6);
        assert_eq!(state.turn.war_stage, 2);
        assert!(state.turn.awaiting_war_hand[PlayerId::Cpu]);
    }

    #[test]
    fn test_hostile_takeover_answered_falls_through() {
        let mut state = GameState::new(deck(1, 10), deck(20, 10), 0);
        play(&mut state, PlayerId::Player, takeover(100));
        for k in 0..3 {
            state
                .player_mut(PlayerId::Cpu)
                .place(PlayedCardState::face_down(Card::new(CardId::new(110 + k), 1)));
        }
        play(&mut state, PlayerId::Cpu, Card::new(CardId::new(120), 5));
        state.turn.hostile_takeover_by = Some(PlayerId::Player);
        state.turn.hostile_takeover_data_war = true;

        assert!(!resolve(&mut state));
        assert!(!state.turn.hostile_takeover_data_war);
        assert!(state.win.is_none());
        assert_eq!(state.player(PlayerId::Player).current_turn_value, 6);
    }
}
