//! Subcommands of the `snake-q` binary

pub mod evaluate;
pub mod play;
pub mod reset;
pub mod train;
