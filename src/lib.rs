//! Developer workflow shortcuts.
//!
//! `bruh` is a CLI: git worktrees opened in tmux, AI-written commit messages
//! and pull requests, ecosystem-aware security scans, and navi cheatsheets
//! from shell history. The library exposes the pieces the binary is built
//! from; its API is not stable.

pub mod config;
pub mod error;
pub mod git;
pub mod path;
pub mod scan;
pub mod shell_exec;
pub mod styling;
