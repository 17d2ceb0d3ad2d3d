//! Line-oriented terminal front-end.
//!
//! Reads one command per line, routes it to `Game::submit`, prints new event
//! log lines, and lets the AI play any side it controls before reading the
//! next line.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use crate::engines::policy_greedy::GreedyPolicy;
use crate::engines::policy_trait::Policy;
use crate::errors::GameError;
use crate::game_state::game_rules::GameConfig;
use crate::game_state::game_types::{Player, Square};
use crate::game_state::piece_registry::PieceId;
use crate::machine::commands::{Command, CommandOutcome};
use crate::machine::game::Game;
use crate::moves::piece_catalog::{PieceType, ALL_PIECE_TYPES};
use crate::utils::render_game_state::render_game;

const HELP: &str = "\
commands:
  pick <type>                draft a piece type (warrior, ranger, mage, rogue, sentinel)
  random [seed]              random teams and captains, skip to placement
  captain <p1|p2> <type>     nominate one side's captain
  captains <type> <type>     assign both captains at once
  bench <id>                 select a bench piece to place
  place <row> <col>          place the selected bench piece
  select <row> <col>         select own piece or preview an opponent piece
  special                    toggle special mode for the selected piece
  act <row> <col>            click a square (move, special, reselect)
  fortify                    use the selected piece's self special
  ai <p1|p2> <on|off>        toggle computer control
  board | moves | tick | log [n] | types | restart | help | quit";

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut cli = CliState::new(
        Game::new(GameConfig::default()),
        Box::new(GreedyPolicy::default()),
    );

    cli.print_new_events(&mut stdout)?;
    writeln!(stdout, "{HELP}")?;
    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = cli.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct CliState {
    game: Game,
    policy: Box<dyn Policy>,
    printed_events: usize,
}

impl CliState {
    pub fn new(game: Game, policy: Box<dyn Policy>) -> Self {
        Self {
            game,
            policy,
            printed_events: 0,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handle one input line. Returns `true` when the loop should stop.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match cmd {
            "help" | "?" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(true),
            "board" => write!(out, "{}", render_game(&self.game))?,
            "types" => {
                for kind in ALL_PIECE_TYPES {
                    writeln!(
                        out,
                        "{} ({}): {}",
                        kind.name(),
                        kind.abbr(),
                        kind.description()
                    )?;
                }
            }
            "moves" => {
                let targets = self.game.selection_targets();
                if targets.is_empty() {
                    writeln!(out, "no highlighted squares")?;
                } else {
                    let list: Vec<String> = targets.iter().map(Square::to_string).collect();
                    writeln!(out, "{}", list.join(" "))?;
                }
            }
            "log" => {
                let count = args.first().and_then(|n| n.parse().ok()).unwrap_or(10);
                for event in self.game.state().events.latest(count) {
                    writeln!(out, "[{}] {}", event.at.format("%H:%M:%S"), event.message)?;
                }
            }
            "tick" => {
                if let Some(player) = self.game.tick() {
                    writeln!(out, "{player} flagged")?;
                }
                self.print_new_events(out)?;
            }
            _ => match parse_command(cmd, &args) {
                Ok(command) => {
                    match self.game.submit(command) {
                        Ok(CommandOutcome::Restarted) => self.printed_events = 0,
                        Ok(outcome) => describe_outcome(&self.game, outcome, out)?,
                        Err(err) => writeln!(out, "error: {err}")?,
                    }
                    self.print_new_events(out)?;
                    self.drive_ai(out)?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
        }

        Ok(false)
    }

    /// Let the AI act for every side it controls until a human is to move.
    fn drive_ai(&mut self, out: &mut impl Write) -> io::Result<()> {
        while let Some(ticket) = self.game.schedule_ai() {
            let wait = ticket.due_at_ms.saturating_sub(self.game.now_ms());
            if wait > 0 {
                let step = self.game.config().tick_interval_ms.max(1);
                thread::sleep(Duration::from_millis(wait.min(step)));
                if self.game.tick().is_some() {
                    self.print_new_events(out)?;
                    break;
                }
                continue;
            }
            match self.game.fire_ai(ticket, self.policy.as_mut()) {
                Ok(outcome) => describe_outcome(&self.game, outcome, out)?,
                Err(GameError::NotDueYet) => continue,
                Err(err) => {
                    writeln!(out, "ai: {err}")?;
                    self.print_new_events(out)?;
                    break;
                }
            }
            self.print_new_events(out)?;
        }
        Ok(())
    }

    fn print_new_events(&mut self, out: &mut impl Write) -> io::Result<()> {
        let entries = self.game.state().events.entries();
        if entries.len() < self.printed_events {
            self.printed_events = 0;
        }
        for event in &entries[self.printed_events..] {
            writeln!(out, "> {}", event.message)?;
        }
        self.printed_events = entries.len();
        Ok(())
    }
}

fn describe_outcome(game: &Game, outcome: CommandOutcome, out: &mut impl Write) -> io::Result<()> {
    match outcome {
        CommandOutcome::Selected { piece, preview } => {
            let label = game.piece(piece).map(|p| p.label()).unwrap_or_default();
            let verb = if preview { "previewing" } else { "selected" };
            writeln!(out, "{verb} {label}")?;
            let targets: Vec<String> = game
                .selection_targets()
                .iter()
                .map(Square::to_string)
                .collect();
            writeln!(out, "moves: {}", targets.join(" "))
        }
        CommandOutcome::BenchPieceSelected(piece) => {
            let label = game.piece(piece).map(|p| p.label()).unwrap_or_default();
            writeln!(out, "selected {label} from the bench")
        }
        CommandOutcome::SpecialModeToggled { engaged } => {
            writeln!(out, "special mode {}", if engaged { "on" } else { "off" })
        }
        CommandOutcome::CaptainNominated { player, kind } => {
            writeln!(out, "{player} nominates {kind} as captain")
        }
        CommandOutcome::SelectionCleared => writeln!(out, "selection cleared"),
        CommandOutcome::AiToggled { player, enabled } => {
            writeln!(out, "{player} AI {}", if enabled { "on" } else { "off" })
        }
        CommandOutcome::Picked { .. }
        | CommandOutcome::CaptainsAssigned { .. }
        | CommandOutcome::Placed { .. }
        | CommandOutcome::Moved { .. }
        | CommandOutcome::SpecialUsed { .. }
        | CommandOutcome::Restarted => Ok(()),
    }
}

fn parse_command(cmd: &str, args: &[&str]) -> Result<Command, String> {
    let kind = |text: &str| text.parse::<PieceType>().map_err(|e| e.to_string());
    let usage = |text: &str| format!("usage: {text}");
    match (cmd, args) {
        ("pick", [k]) => Ok(Command::Pick(kind(k)?)),
        ("random", []) => Ok(Command::RandomDraft {
            seed: rand::random(),
        }),
        ("random", [seed]) => seed
            .parse()
            .map(|seed| Command::RandomDraft { seed })
            .map_err(|_| usage("random [seed]")),
        ("captain", [player, k]) => Ok(Command::NominateCaptain {
            player: parse_player(player).ok_or_else(|| usage("captain <p1|p2> <type>"))?,
            kind: kind(k)?,
        }),
        ("captains", [p1, p2]) => Ok(Command::ConfirmCaptains {
            p1: kind(p1)?,
            p2: kind(p2)?,
        }),
        ("bench", [id]) => id
            .trim_start_matches('#')
            .parse()
            .map(|n| Command::SelectBenchPiece(PieceId(n)))
            .map_err(|_| usage("bench <id>")),
        ("place", [row, col]) => parse_square(row, col)
            .map(Command::PlaceAt)
            .ok_or_else(|| usage("place <row> <col>")),
        ("select", [row, col]) => parse_square(row, col)
            .map(Command::SelectBoardPiece)
            .ok_or_else(|| usage("select <row> <col>")),
        ("act", [row, col]) => parse_square(row, col)
            .map(Command::ActAt)
            .ok_or_else(|| usage("act <row> <col>")),
        ("special", []) => Ok(Command::ToggleSpecialMode),
        ("fortify", []) => Ok(Command::ActivateSelfSpecial),
        ("ai", [player, state]) => {
            let player = parse_player(player).ok_or_else(|| usage("ai <p1|p2> <on|off>"))?;
            let enabled = match *state {
                "on" => true,
                "off" => false,
                _ => return Err(usage("ai <p1|p2> <on|off>")),
            };
            Ok(Command::SetAiEnabled { player, enabled })
        }
        ("restart", []) => Ok(Command::Restart),
        _ => Err(format!("unknown command `{cmd}`, try `help`")),
    }
}

fn parse_player(text: &str) -> Option<Player> {
    match text.to_ascii_lowercase().as_str() {
        "p1" | "1" => Some(Player::P1),
        "p2" | "2" => Some(Player::P2),
        _ => None,
    }
}

fn parse_square(row: &str, col: &str) -> Option<Square> {
    Some(Square::new(row.parse().ok()?, col.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_types::Phase;
    use crate::machine::time_source::ManualTime;

    fn cli(config: GameConfig) -> CliState {
        CliState::new(
            Game::with_time_source(config, Box::new(ManualTime::new())),
            Box::new(GreedyPolicy::with_seed(8)),
        )
    }

    fn run(cli: &mut CliState, line: &str) -> String {
        let mut out = Vec::new();
        cli.handle_command(line, &mut out).expect("write to buffer");
        String::from_utf8(out).expect("utf8 output")
    }

    #[test]
    fn pick_prints_log_line_and_rejects_duplicates() {
        let mut cli = cli(GameConfig::default());
        run(&mut cli, "pick mage");
        assert!(cli.game().state().player(Player::P1).drafted.contains(&PieceType::Mage));
        let out = run(&mut cli, "pick Mg");
        assert!(out.contains("> Player 2 picked Mage."));
        let out = run(&mut cli, "pick mage");
        assert_eq!(out, "error: P1 already picked Mage\n");
    }

    #[test]
    fn restart_prints_the_fresh_log() {
        let mut cli = cli(GameConfig::default());
        run(&mut cli, "pick mage");
        run(&mut cli, "pick rogue");
        let out = run(&mut cli, "restart");
        assert_eq!(
            out,
            format!("> New game.\n> {}\n", crate::game_state::game_rules::DRAFT_INTRO)
        );
        assert_eq!(cli.game().phase(), Phase::Draft);
    }

    #[test]
    fn unknown_input_is_reported() {
        let mut cli = cli(GameConfig::default());
        assert!(run(&mut cli, "dance").contains("unknown command `dance`"));
        assert!(run(&mut cli, "pick dragon").contains("unknown piece type `dragon`"));
        assert!(run(&mut cli, "place x 1").starts_with("error: "));
        assert!(cli.handle_command("quit", &mut Vec::new()).expect("quit"));
    }

    #[test]
    fn ai_plays_its_side_after_human_input() {
        let mut cli = cli(GameConfig {
            ai_think_delay_ms: 0,
            ai_enabled: [false, true],
            ..GameConfig::default()
        });
        run(&mut cli, "pick warrior");
        let game = cli.game();
        assert_eq!(game.state().player(Player::P2).drafted.len(), 1);
        assert_eq!(game.current_actor(), Some(Player::P1));

        run(&mut cli, "pick ranger");
        run(&mut cli, "pick mage");
        run(&mut cli, "pick rogue");
        assert_eq!(cli.game().phase(), Phase::Captain);
        assert!(cli.game().state().captain_nominations[Player::P2.index()].is_some());

        run(&mut cli, "captain p1 rogue");
        assert_eq!(cli.game().phase(), Phase::Placement);
    }

    #[test]
    fn random_setup_then_board_render() {
        let mut cli = cli(GameConfig::default());
        run(&mut cli, "random 3");
        assert_eq!(cli.game().phase(), Phase::Placement);
        let board = run(&mut cli, "board");
        assert!(board.starts_with("placement - P1 to act"));
        assert!(board.contains("P1 bench: "));
    }
}
