//! CLI infrastructure for the spantree toolkit
//!
//! This module provides the command-line interface for playing rollouts and
//! inspecting individual episodes of the spanning-tree construction game.

pub mod commands;
pub mod output;
