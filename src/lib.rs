//! Crate root module declarations for the draft chess game.
//!
//! This file exposes the game model, the per-type move rules, the phase state
//! machine with its AI scheduler, the AI policies, the terminal front-end and
//! utility helpers so binaries, benches and tests can import stable paths.

pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod clock;
    pub mod events;
    pub mod game_rules;
    pub mod game_state;
    pub mod game_types;
    pub mod piece_registry;
}

pub mod moves {
    pub mod mage_moves;
    pub mod move_shared;
    pub mod piece_catalog;
    pub mod ranger_moves;
    pub mod rogue_moves;
    pub mod sentinel_moves;
    pub mod warrior_moves;
}

pub mod rules {
    pub mod legal_moves;
    pub mod primitives;
}

pub mod machine {
    pub mod commands;
    pub mod game;
    pub mod scheduler;
    pub mod time_source;
}

pub mod engines {
    pub mod policy_greedy;
    pub mod policy_random;
    pub mod policy_trait;
}

pub mod cli {
    pub mod cli_top;
}

pub mod utils {
    pub mod match_harness;
    pub mod render_game_state;
    pub mod time_format;
}
