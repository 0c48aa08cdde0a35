//! Per-type effect handlers.
//!
//! A handler applies one pending effect and tells the processor what to do
//! next. Handlers never touch the scheduler: anything that has to wait
//! (a collection, a sub-game window, an animation) is returned as a
//! `HandlerOutcome` for the engine to schedule.

use tracing::debug;

use crate::animation::{AnimationKind, LockReason};
use crate::cards::{Card, SpecialType};
use crate::core::{GameConfig, GameState, PlayerId};
use crate::game::{ChoiceKind, EngineEvent};
use crate::resolution::LaunchStackClaim;
use crate::subgames::{OpenWhatYouWantState, TemperTantrumState};
use crate::zones::{CardDistribution, CollectionRequest};

use super::PendingEffect;

/// What a handler can touch.
pub struct HandlerContext<'a> {
    pub state: &'a mut GameState,
    pub config: &'a GameConfig,
    pub events: &'a mut Vec<EngineEvent>,
}

/// What the processor does after a handler ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// Done; move on to the next effect.
    Continue,
    /// A player choice is open; the confirm command resumes the queue.
    AwaitChoice,
    /// Run this collection, then resume the queue.
    Collect(CollectionRequest),
    /// Open the Data Grab window.
    StartDataGrab,
    /// Play this animation, then resume the queue.
    Inline(AnimationKind),
}

pub type Handler = fn(&mut HandlerContext<'_>, &PendingEffect) -> HandlerOutcome;

/// Look up the handler of a special type. Plain cards have none.
#[must_use]
pub fn handler_for(special: SpecialType) -> Option<Handler> {
    let handler: Handler = match special {
        SpecialType::None => return None,
        SpecialType::Tracker | SpecialType::Blocker | SpecialType::HostileTakeover => no_op,
        SpecialType::LaunchStack => claim_launch_stack,
        SpecialType::PatentTheft => patent_theft,
        SpecialType::LeveragedBuyout => leveraged_buyout,
        SpecialType::TemperTantrum => temper_tantrum,
        SpecialType::MandatoryRecall => mandatory_recall,
        SpecialType::ForcedEmpathy => forced_empathy,
        SpecialType::OpenWhatYouWant => open_what_you_want,
        SpecialType::DataGrab => data_grab,
    };
    Some(handler)
}

// Trackers and blockers already acted through the turn values; a Hostile
// Takeover's effect is its animation.
fn no_op(_ctx: &mut HandlerContext<'_>, _effect: &PendingEffect) -> HandlerOutcome {
    HandlerOutcome::Continue
}

fn claim_launch_stack(ctx: &mut HandlerContext<'_>, effect: &PendingEffect) -> HandlerOutcome {
    let id = effect.card_id();
    let on_board = ctx.state.players.iter().any(|(_, p)| {
        p.played_cards_in_hand
            .iter()
            .any(|c| c.id() == id && c.is_counted_launch_stack())
    });
    if on_board {
        ctx.state.effects.claim(LaunchStackClaim::from_effect(effect));
    } else {
        debug!(card = %id, "launch stack left the board before its claim");
    }
    HandlerOutcome::Continue
}

fn patent_theft(ctx: &mut HandlerContext<'_>, effect: &PendingEffect) -> HandlerOutcome {
    let thief = effect.played_by;
    let victim = thief.opponent();
    let (robber, robbed) = ctx.state.players.pair_mut(thief);

    if let Some(card) = robbed.take_launch_stack() {
        robber.add_launch_stack(card);
        ctx.events.push(EngineEvent::LaunchStackStolen {
            from: victim,
            to: thief,
        });
    } else {
        debug!(%victim, "nothing to steal");
    }
    HandlerOutcome::Continue
}

fn leveraged_buyout(ctx: &mut HandlerContext<'_>, effect: &PendingEffect) -> HandlerOutcome {
    let buyer = effect.played_by;
    let seller = buyer.opponent();
    let distributions: Vec<_> = ctx
        .state
        .player(seller)
        .deck
        .iter()
        .take(ctx.config.buyout_card_count)
        .map(|card| CardDistribution::from_deck(*card, seller, buyer))
        .collect();

    if distributions.is_empty() {
        return HandlerOutcome::Continue;
    }
    HandlerOutcome::Collect(CollectionRequest::new(distributions).winner(buyer).skip_board_clear())
}

fn temper_tantrum(ctx: &mut HandlerContext<'_>, effect: &PendingEffect) -> HandlerOutcome {
    let winner = effect.played_by.opponent();
    let tantrum = TemperTantrumState::open(ctx.state.player(winner), ctx.config.tantrum_max_keep);

    if winner.is_cpu() {
        let keep = tantrum.cpu_selection();
        return match tantrum.validate(&keep) {
            Ok(selected) => {
                let animated = tantrum.apply(ctx.state, &selected);
                HandlerOutcome::Collect(
                    CollectionRequest::new(animated)
                        .winner(winner)
                        .visual_only()
                        .skip_board_clear(),
                )
            }
            Err(err) => {
                debug!(%err, "cpu tantrum selection rejected");
                HandlerOutcome::Continue
            }
        };
    }

    ctx.state.tantrum = Some(tantrum);
    ctx.state.lock.acquire(LockReason::PlayerChoice);
    ctx.events.push(EngineEvent::ChoiceOpened {
        choice: ChoiceKind::TemperTantrum,
        player: winner,
    });
    HandlerOutcome::AwaitChoice
}

fn mandatory_recall(ctx: &mut HandlerContext<'_>, effect: &PendingEffect) -> HandlerOutcome {
    let victim = effect.played_by.opponent();
    let recalled = ctx.state.players[victim].drain_launch_stacks();
    if recalled.is_empty() {
        return HandlerOutcome::Continue;
    }

    let count = recalled.len();
    let mut cards: Vec<Card> = ctx.state.players[victim].deck.iter().copied().collect();
    cards.extend(recalled);
    ctx.state.players[victim].deck = ctx.state.rng.shuffled(cards).into_iter().collect();

    ctx.events.push(EngineEvent::LaunchStacksRecalled {
        player: victim,
        count,
    });
    HandlerOutcome::Continue
}

fn forced_empathy(ctx: &mut HandlerContext<'_>, _effect: &PendingEffect) -> HandlerOutcome {
    let (player, cpu) = ctx.state.players.pair_mut(PlayerId::Player);
    std::mem::swap(&mut player.deck, &mut cpu.deck);
    ctx.events.push(EngineEvent::DecksSwapped);
    HandlerOutcome::Inline(AnimationKind::ForcedEmpathy)
}

fn open_what_you_want(ctx: &mut HandlerContext<'_>, effect: &PendingEffect) -> HandlerOutcome {
    if effect.played_by.is_cpu() {
        return HandlerOutcome::Continue;
    }
    let Some(open) = OpenWhatYouWantState::open(
        ctx.state.player(effect.played_by),
        ctx.config.open_what_you_want_count,
    ) else {
        return HandlerOutcome::Continue;
    };

    ctx.state.open_what_you_want = Some(open);
    ctx.state.lock.acquire(LockReason::PlayerChoice);
    ctx.events.push(EngineEvent::ChoiceOpened {
        choice: ChoiceKind::OpenWhatYouWant,
        player: effect.played_by,
    });
    HandlerOutcome::AwaitChoice
}

fn data_grab(ctx: &mut HandlerContext<'_>, _effect: &PendingEffect) -> HandlerOutcome {
    if ctx.state.board_card_count() >= ctx.config.data_grab_min_board_cards {
        HandlerOutcome::StartDataGrab
    } else {
        HandlerOutcome::Continue
    }
}
