//! Deferred AI turns.
//!
//! The AI never acts inline. `schedule_ai` issues a ticket due after the
//! think delay; the driver calls `fire_ai` once time has passed. A ticket is
//! only honoured while the game it was issued for is unchanged: same restart
//! generation, same number of committed actions, same phase and actor.

use crate::engines::policy_trait::Policy;
use crate::errors::{GameError, GameResult};
use crate::game_state::game_types::{Phase, Player};
use crate::machine::commands::CommandOutcome;
use crate::machine::game::Game;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiTicket {
    pub generation: u64,
    pub action_count: u64,
    pub phase: Phase,
    pub actor: Player,
    pub due_at_ms: u64,
}

impl Game {
    /// AI-controlled side the current phase is waiting on.
    ///
    /// In the captain phase either side may nominate, so this is the first
    /// AI side still without a nomination.
    pub fn ai_actor(&self) -> Option<Player> {
        let state = &self.state;
        let actor = match state.phase {
            Phase::Captain => Player::ALL.into_iter().find(|&p| {
                self.is_ai_enabled(p) && state.captain_nominations[p.index()].is_none()
            })?,
            Phase::Placement => {
                let placer = state.placement_turn;
                if state.player(placer).bench.is_empty() {
                    return None;
                }
                placer
            }
            Phase::Draft | Phase::Play => state.current_actor()?,
            Phase::GameOver => return None,
        };
        self.is_ai_enabled(actor).then_some(actor)
    }

    /// Issue a ticket for the AI side to act, or return the one already in
    /// flight. `None` when no AI side is expected to act.
    pub fn schedule_ai(&mut self) -> Option<AiTicket> {
        if let Some(ticket) = self.ai_in_flight {
            return Some(ticket);
        }
        let actor = self.ai_actor()?;
        let ticket = AiTicket {
            generation: self.generation,
            action_count: self.action_count,
            phase: self.state.phase,
            actor,
            due_at_ms: self.now_ms() + self.config.ai_think_delay_ms,
        };
        log::debug!("scheduled AI for {actor} at {}ms", ticket.due_at_ms);
        self.ai_in_flight = Some(ticket);
        Some(ticket)
    }

    /// Whether `ticket` still describes the live game.
    pub fn is_current(&self, ticket: &AiTicket) -> bool {
        self.state.phase != Phase::GameOver
            && ticket.generation == self.generation
            && ticket.action_count == self.action_count
            && ticket.phase == self.state.phase
            && self.ai_actor() == Some(ticket.actor)
    }

    /// Run the AI turn described by `ticket`.
    ///
    /// Returns the outcome of the last command the policy's decision produced.
    /// Stale tickets are dropped without touching the game.
    pub fn fire_ai(
        &mut self,
        ticket: AiTicket,
        policy: &mut dyn Policy,
    ) -> GameResult<CommandOutcome> {
        if self.ai_in_flight != Some(ticket) {
            return Err(GameError::StaleTicket);
        }
        self.tick();
        if !self.is_current(&ticket) {
            self.ai_in_flight = None;
            return Err(GameError::StaleTicket);
        }
        if self.now_ms() < ticket.due_at_ms {
            return Err(GameError::NotDueYet);
        }
        self.ai_in_flight = None;

        let actor = ticket.actor;
        let Some(decision) = policy.decide(self, actor) else {
            log::info!("{} found no action for {actor}", policy.name());
            return Err(GameError::NoAvailableAction(actor));
        };
        log::debug!("{} decided {decision:?} for {actor}", policy.name());

        let selection = self.state.selection;
        let mut last = None;
        for command in decision.commands() {
            match self.submit(command) {
                Ok(outcome) => last = Some(outcome),
                Err(err) => {
                    log::warn!("{} produced a rejected command: {err}", policy.name());
                    if self.state.phase != Phase::GameOver {
                        self.state.selection = selection;
                    }
                    return Err(err);
                }
            }
        }
        last.ok_or(GameError::NoAvailableAction(actor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::policy_greedy::GreedyPolicy;
    use crate::game_state::game_rules::GameConfig;
    use crate::game_state::game_types::GameOverReason;
    use crate::machine::commands::Command;
    use crate::machine::time_source::ManualTime;
    use crate::moves::piece_catalog::PieceType;

    fn ai_game(p1: bool, p2: bool) -> (Game, ManualTime) {
        let time = ManualTime::new();
        let config = GameConfig {
            ai_enabled: [p1, p2],
            ..GameConfig::default()
        };
        (Game::with_time_source(config, Box::new(time.clone())), time)
    }

    fn place_everything(game: &mut Game) {
        while game.phase() == Phase::Placement {
            let placer = game.state().placement_turn;
            let id = game.state().player(placer).bench[0];
            let square = game.placement_squares()[0];
            game.submit(Command::SelectBenchPiece(id)).expect("select");
            game.submit(Command::PlaceAt(square)).expect("place");
        }
    }

    #[test]
    fn human_turn_schedules_nothing() {
        let (mut game, _) = ai_game(false, true);
        assert_eq!(game.schedule_ai(), None);
        game.submit(Command::Pick(PieceType::Mage)).expect("pick");
        let ticket = game.schedule_ai().expect("P2 is AI");
        assert_eq!(ticket.actor, Player::P2);
        assert_eq!(ticket.due_at_ms, 400);
        assert_eq!(game.schedule_ai(), Some(ticket));
    }

    #[test]
    fn ticket_fires_only_when_due() {
        let (mut game, time) = ai_game(true, false);
        let mut policy = GreedyPolicy::with_seed(3);
        let ticket = game.schedule_ai().expect("ticket");

        time.advance(399);
        assert_eq!(game.fire_ai(ticket, &mut policy), Err(GameError::NotDueYet));
        assert!(game.is_ai_busy());

        time.advance(1);
        let outcome = game.fire_ai(ticket, &mut policy).expect("AI pick");
        assert!(matches!(
            outcome,
            CommandOutcome::Picked {
                player: Player::P1,
                ..
            }
        ));
        assert!(!game.is_ai_busy());
        assert_eq!(game.state().player(Player::P1).drafted.len(), 1);
    }

    #[test]
    fn human_input_is_rejected_while_ai_is_busy() {
        let (mut game, _) = ai_game(true, false);
        game.schedule_ai().expect("ticket");
        assert_eq!(
            game.submit(Command::Pick(PieceType::Rogue)),
            Err(GameError::AiBusy)
        );
        assert!(game.state().player(Player::P1).drafted.is_empty());
    }

    #[test]
    fn restart_invalidates_pending_ticket() {
        let (mut game, time) = ai_game(true, true);
        let mut policy = GreedyPolicy::with_seed(5);
        let ticket = game.schedule_ai().expect("ticket");
        game.submit(Command::Restart).expect("restart");
        time.advance(1_000);
        assert_eq!(game.fire_ai(ticket, &mut policy), Err(GameError::StaleTicket));
        assert!(game.state().player(Player::P1).drafted.is_empty());

        let fresh = game.schedule_ai().expect("new ticket");
        assert_ne!(fresh.generation, ticket.generation);
    }

    #[test]
    fn restart_invalidates_pending_placement_ticket() {
        let (mut game, time) = ai_game(false, false);
        let mut policy = GreedyPolicy::with_seed(6);
        game.submit(Command::RandomDraft { seed: 8 }).expect("draft");
        game.submit(Command::SetAiEnabled {
            player: Player::P1,
            enabled: true,
        })
        .expect("toggle");
        let ticket = game.schedule_ai().expect("placement ticket");
        assert_eq!(ticket.phase, Phase::Placement);

        game.submit(Command::Restart).expect("restart");
        time.advance(1_000);
        assert_eq!(game.fire_ai(ticket, &mut policy), Err(GameError::StaleTicket));
        assert_eq!(game.phase(), Phase::Draft);
        assert_eq!(game.state().board.occupied().count(), 0);
        assert!(game.state().pieces.is_empty());
    }

    #[test]
    fn expired_clock_wins_over_busy_ai() {
        let (mut game, time) = ai_game(false, false);
        game.submit(Command::RandomDraft { seed: 4 }).expect("draft");
        place_everything(&mut game);

        let (from, to) = game
            .state()
            .board
            .occupied()
            .filter(|&(_, id)| game.piece(id).is_some_and(|p| p.owner == Player::P1))
            .find_map(|(square, id)| {
                game.legal_moves(id)
                    .into_iter()
                    .find(|&to| game.piece_at(to).is_none())
                    .map(|to| (square, to))
            })
            .expect("P1 has a quiet move");
        game.submit(Command::SelectBoardPiece(from)).expect("select");
        game.submit(Command::ActAt(to)).expect("move");

        game.submit(Command::SetAiEnabled {
            player: Player::P2,
            enabled: true,
        })
        .expect("toggle");
        game.schedule_ai().expect("P2 ticket");
        time.advance(90_500);
        assert_eq!(
            game.submit(Command::SelectBoardPiece(to)),
            Err(GameError::WrongPhase(Phase::GameOver))
        );
        let outcome = game.outcome().expect("outcome");
        assert_eq!(outcome.winner, Player::P1);
        assert_eq!(outcome.reason, GameOverReason::Timeout);
    }

    #[test]
    fn ticket_goes_stale_after_game_over() {
        let (mut game, time) = ai_game(true, true);
        let mut policy = GreedyPolicy::with_seed(9);
        game.submit(Command::SetAiEnabled {
            player: Player::P1,
            enabled: false,
        })
        .expect("toggle");
        game.submit(Command::RandomDraft { seed: 4 }).expect("draft");
        place_everything(&mut game);
        // P1 (human) to move; let P2's AI hold a ticket from a forged turn.
        game.state.active_player = Some(Player::P2);
        let ticket = game.schedule_ai().expect("ticket");
        time.advance(90_000);
        assert_eq!(game.tick(), Some(Player::P1));
        assert_eq!(game.fire_ai(ticket, &mut policy), Err(GameError::StaleTicket));
        assert_eq!(game.phase(), Phase::GameOver);
    }

    #[test]
    fn ai_nominates_only_its_own_captain() {
        let (mut game, time) = ai_game(false, true);
        let mut policy = GreedyPolicy::with_seed(1);
        let p1 = [
            PieceType::Warrior,
            PieceType::Ranger,
            PieceType::Mage,
            PieceType::Rogue,
        ];
        for kind in p1 {
            game.submit(Command::Pick(kind)).expect("human pick");
            let ticket = game.schedule_ai().expect("ai ticket");
            time.advance_to(ticket.due_at_ms);
            game.fire_ai(ticket, &mut policy).expect("ai pick");
        }
        assert_eq!(game.phase(), Phase::Captain);

        let ticket = game.schedule_ai().expect("captain ticket");
        assert_eq!(ticket.actor, Player::P2);
        time.advance_to(ticket.due_at_ms);
        game.fire_ai(ticket, &mut policy).expect("nominate");
        assert_eq!(game.phase(), Phase::Captain);
        assert!(game.state().captain_nominations[Player::P2.index()].is_some());
        assert_eq!(game.state().captain_nominations[Player::P1.index()], None);
        assert_eq!(game.schedule_ai(), None);
    }
}
