//! Greedy policy.
//!
//! Captures the most valuable reachable piece (a captain above all else),
//! occasionally spends a special, otherwise makes a random quiet move. Draft
//! picks are random, the captain is the first drafted type and placement
//! fills the home row from the left.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engines::policy_trait::{Decision, Policy};
use crate::game_state::game_rules::{home_row, COLS};
use crate::game_state::game_state::GameState;
use crate::game_state::game_types::{Phase, Player, Square};
use crate::game_state::piece_registry::Piece;
use crate::machine::game::Game;
use crate::moves::piece_catalog::{PieceType, ALL_PIECE_TYPES};
use crate::rules::legal_moves::{all_candidate_actions, CandidateAction};

const CAPTAIN_VALUE: i32 = 20_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedyConfig {
    /// Chance of spending a non-capturing special when nothing can be taken.
    pub special_chance: f64,
    /// Fixed seed for reproducible matches; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self {
            special_chance: 0.25,
            seed: None,
        }
    }
}

pub struct GreedyPolicy {
    config: GreedyConfig,
    rng: StdRng,
}

impl GreedyPolicy {
    pub fn new(config: GreedyConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(GreedyConfig {
            seed: Some(seed),
            ..GreedyConfig::default()
        })
    }

    #[inline]
    fn piece_value(kind: PieceType) -> i32 {
        match kind {
            PieceType::Warrior => 300,
            PieceType::Ranger => 320,
            PieceType::Mage => 330,
            PieceType::Rogue => 320,
            PieceType::Sentinel => 500,
        }
    }

    fn capture_value(victim: &Piece) -> i32 {
        if victim.is_captain {
            CAPTAIN_VALUE
        } else {
            Self::piece_value(victim.kind)
        }
    }

    fn choose_play(&mut self, state: &GameState, actor: Player) -> Option<Decision> {
        let candidates = all_candidate_actions(state, actor);

        let mut best_value = 0;
        let mut best = Vec::new();
        for action in &candidates {
            let Some(victim) = action.victim(state).filter(|v| v.owner != actor) else {
                continue;
            };
            let value = Self::capture_value(victim);
            if value > best_value {
                best_value = value;
                best.clear();
                best.push(*action);
            } else if value == best_value {
                best.push(*action);
            }
        }
        if let Some(action) = best.as_slice().choose(&mut self.rng) {
            return Some(Decision::Act(*action));
        }

        let specials: Vec<CandidateAction> = candidates
            .iter()
            .copied()
            .filter(|a| matches!(a, CandidateAction::Special { .. }))
            .collect();
        if !specials.is_empty() && self.rng.random_bool(self.config.special_chance) {
            if let Some(action) = specials.as_slice().choose(&mut self.rng) {
                return Some(Decision::Act(*action));
            }
        }

        let quiet: Vec<CandidateAction> = candidates
            .into_iter()
            .filter(|a| matches!(a, CandidateAction::Move { .. }))
            .collect();
        quiet.as_slice().choose(&mut self.rng).copied().map(Decision::Act)
    }
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new(GreedyConfig::default())
    }
}

impl Policy for GreedyPolicy {
    fn name(&self) -> &str {
        "Greedy"
    }

    fn decide(&mut self, game: &Game, actor: Player) -> Option<Decision> {
        let state = game.state();
        match state.phase {
            Phase::Draft => {
                let drafted = &state.player(actor).drafted;
                let available: Vec<PieceType> = ALL_PIECE_TYPES
                    .into_iter()
                    .filter(|kind| !drafted.contains(kind))
                    .collect();
                available.as_slice().choose(&mut self.rng).copied().map(Decision::Pick)
            }
            Phase::Captain => state
                .player(actor)
                .drafted
                .first()
                .map(|&kind| Decision::NominateCaptain {
                    player: actor,
                    kind,
                }),
            Phase::Placement => {
                let piece = *state.player(actor).bench.first()?;
                let row = home_row(actor);
                let square = (0..COLS)
                    .map(|col| Square::new(row, col))
                    .find(|&sq| state.board.is_empty_at(sq))?;
                Some(Decision::Place { piece, square })
            }
            Phase::Play => self.choose_play(state, actor),
            Phase::GameOver => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_shared::test_support::*;
    use crate::moves::piece_catalog::SpecialTarget;

    fn game_from(state: GameState) -> Game {
        let mut game = Game::default();
        game.state = state;
        game
    }

    #[test]
    fn captain_capture_beats_richer_capture() {
        let mut state = empty_play_state();
        put(&mut state, PieceType::Ranger, Player::P1, 2, 2);
        let captain = put(&mut state, PieceType::Warrior, Player::P2, 1, 1);
        if let Some(p) = state.pieces.get_mut(captain) {
            p.is_captain = true;
        }
        put(&mut state, PieceType::Sentinel, Player::P2, 1, 3);
        let game = game_from(state);

        for seed in 0..8 {
            let mut policy = GreedyPolicy::with_seed(seed);
            let decision = policy.decide(&game, Player::P1).expect("decision");
            let Decision::Act(action) = decision else {
                panic!("expected a play action, got {decision:?}");
            };
            let victim = action.victim(game.state()).expect("capture");
            assert!(victim.is_captain);
        }
    }

    #[test]
    fn prefers_most_valuable_capture() {
        let mut state = empty_play_state();
        put(&mut state, PieceType::Warrior, Player::P1, 2, 2);
        put(&mut state, PieceType::Mage, Player::P2, 1, 2);
        put(&mut state, PieceType::Sentinel, Player::P2, 2, 3);
        let game = game_from(state);

        let mut policy = GreedyPolicy::with_seed(42);
        let Some(Decision::Act(action)) = policy.decide(&game, Player::P1) else {
            panic!("expected a play action");
        };
        assert_eq!(
            action.victim(game.state()).map(|p| p.kind),
            Some(PieceType::Sentinel)
        );
    }

    #[test]
    fn never_spends_special_when_chance_is_zero() {
        let mut state = empty_play_state();
        put(&mut state, PieceType::Sentinel, Player::P1, 4, 0);
        let game = game_from(state);

        let mut policy = GreedyPolicy::new(GreedyConfig {
            special_chance: 0.0,
            seed: Some(7),
        });
        for _ in 0..16 {
            let decision = policy.decide(&game, Player::P1);
            assert!(matches!(
                decision,
                Some(Decision::Act(CandidateAction::Move { .. }))
            ));
        }

        let mut eager = GreedyPolicy::new(GreedyConfig {
            special_chance: 1.0,
            seed: Some(7),
        });
        assert!(matches!(
            eager.decide(&game, Player::P1),
            Some(Decision::Act(CandidateAction::Special {
                target: SpecialTarget::SelfStatus,
                ..
            }))
        ));
    }

    #[test]
    fn no_pieces_means_no_decision() {
        let game = game_from(empty_play_state());
        let mut policy = GreedyPolicy::with_seed(0);
        assert_eq!(policy.decide(&game, Player::P2), None);
    }

    #[test]
    fn draft_picks_are_unique() {
        let mut game = Game::default();
        game.state.player_mut(Player::P1).drafted =
            vec![PieceType::Warrior, PieceType::Ranger, PieceType::Mage];
        let mut policy = GreedyPolicy::with_seed(11);
        for _ in 0..8 {
            let decision = policy.decide(&game, Player::P1);
            assert!(matches!(
                decision,
                Some(Decision::Pick(PieceType::Rogue | PieceType::Sentinel))
            ));
        }
    }
}
