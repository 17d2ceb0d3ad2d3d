//! Uniform random policy.
//!
//! Every phase picks uniformly among what is legal. Mostly useful as a match
//! opponent and for smoke-testing the state machine.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::policy_trait::{Decision, Policy};
use crate::game_state::game_rules::{home_row, COLS};
use crate::game_state::game_types::{Phase, Player, Square};
use crate::machine::game::Game;
use crate::moves::piece_catalog::{PieceType, ALL_PIECE_TYPES};
use crate::rules::legal_moves::all_candidate_actions;

pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "Random"
    }

    fn decide(&mut self, game: &Game, actor: Player) -> Option<Decision> {
        let state = game.state();
        let rng = &mut self.rng;
        match state.phase {
            Phase::Draft => {
                let drafted = &state.player(actor).drafted;
                let available: Vec<PieceType> = ALL_PIECE_TYPES
                    .into_iter()
                    .filter(|kind| !drafted.contains(kind))
                    .collect();
                available.as_slice().choose(rng).copied().map(Decision::Pick)
            }
            Phase::Captain => state
                .player(actor)
                .drafted
                .as_slice()
                .choose(rng)
                .map(|&kind| Decision::NominateCaptain {
                    player: actor,
                    kind,
                }),
            Phase::Placement => {
                let piece = *state.player(actor).bench.as_slice().choose(rng)?;
                let row = home_row(actor);
                let open: Vec<Square> = (0..COLS)
                    .map(|col| Square::new(row, col))
                    .filter(|&sq| state.board.is_empty_at(sq))
                    .collect();
                let square = *open.as_slice().choose(rng)?;
                Some(Decision::Place { piece, square })
            }
            Phase::Play => all_candidate_actions(state, actor)
                .as_slice()
                .choose(rng)
                .copied()
                .map(Decision::Act),
            Phase::GameOver => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::commands::Command;

    #[test]
    fn random_decisions_are_accepted_by_the_game() {
        let mut game = Game::default();
        let mut policy = RandomPolicy::with_seed(17);
        let mut steps = 0;
        while matches!(game.phase(), Phase::Draft | Phase::Captain | Phase::Placement) {
            let actor = game.current_actor().expect("someone to act");
            let decision = policy.decide(&game, actor).expect("decision");
            for command in decision.commands() {
                game.submit(command).expect("legal command");
            }
            steps += 1;
            assert!(steps < 64, "setup phases should finish");
        }
        assert_eq!(game.phase(), Phase::Play);
        assert_eq!(game.state().board.occupied().count(), 8);

        let decision = policy.decide(&game, Player::P1).expect("opening move");
        for command in decision.commands() {
            game.submit(command).expect("legal command");
        }
        assert_eq!(game.current_actor(), Some(Player::P2));
    }

    #[test]
    fn nothing_to_do_after_game_over() {
        let mut game = Game::default();
        game.submit(Command::RandomDraft { seed: 2 }).expect("draft");
        game.state.end_game(
            Player::P2,
            crate::game_state::game_types::GameOverReason::Timeout,
        );
        let mut policy = RandomPolicy::with_seed(1);
        assert_eq!(policy.decide(&game, Player::P1), None);
    }
}
