//! Terminal board renderer.
//!
//! Row 0 (P2's home row) is printed first. Each cell is four characters:
//! owner digit, two-letter abbreviation, and a marker (`*` captain, `!`
//! fortified). Empty highlighted squares print as ` +  `.

use crate::game_state::game_rules::{COLS, ROWS};
use crate::game_state::game_types::{Phase, Player, Square};
use crate::game_state::piece_registry::Piece;
use crate::machine::game::Game;
use crate::utils::time_format::format_time;

/// Render the board alone, with `highlight` squares marked.
pub fn render_board(game: &Game, highlight: &[Square]) -> String {
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..COLS {
        out.push_str(&format!("  {col}  "));
    }
    out.push('\n');

    for row in 0..ROWS {
        out.push_str(&format!(" {row} "));
        for col in 0..COLS {
            let square = Square::new(row, col);
            out.push('|');
            match game.piece_at(square) {
                Some(piece) => out.push_str(&piece_cell(piece)),
                None if highlight.contains(&square) => out.push_str(" +  "),
                None => out.push_str(" .  "),
            }
        }
        out.push_str("|\n");
    }

    out
}

fn piece_cell(piece: &Piece) -> String {
    let owner = match piece.owner {
        Player::P1 => '1',
        Player::P2 => '2',
    };
    let marker = if piece.is_captain {
        '*'
    } else if piece.is_fortified() {
        '!'
    } else {
        ' '
    };
    format!("{owner}{}{marker}", piece.kind.abbr())
}

/// Full status view: phase line, clocks, board with current highlights and
/// benches.
pub fn render_game(game: &Game) -> String {
    let state = game.state();
    let mut out = String::new();

    let status = match (state.phase, game.outcome(), game.current_actor()) {
        (Phase::GameOver, Some(outcome), _) => outcome.message(),
        (phase, _, Some(actor)) => format!("{phase} - {actor} to act"),
        (phase, _, None) => phase.to_string(),
    };
    out.push_str(&status);
    out.push('\n');

    for player in Player::ALL {
        out.push_str(&format!(
            "{}: {}{}\n",
            state.player(player).name,
            format_time(game.remaining_time_ms(player)),
            if game.is_ai_enabled(player) { " (AI)" } else { "" }
        ));
    }

    let highlight = match state.phase {
        Phase::Placement => game.placement_squares(),
        _ => game.selection_targets(),
    };
    out.push_str(&render_board(game, &highlight));

    if state.phase == Phase::Placement {
        for player in Player::ALL {
            let bench: Vec<String> = state
                .player(player)
                .bench
                .iter()
                .filter_map(|&id| game.piece(id))
                .map(|p| {
                    let marker = if p.is_captain { "*" } else { "" };
                    format!("{}={}{marker}", p.id, p.kind.abbr())
                })
                .collect();
            out.push_str(&format!("{player} bench: {}\n", bench.join(" ")));
        }
    }

    out
}
