//! Shared settings for the cardlint workspace.

pub mod config;
