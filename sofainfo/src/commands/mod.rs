//! Subcommands selected by flags in [`Args`](crate::cli::Args).

pub mod check;
pub mod info;
