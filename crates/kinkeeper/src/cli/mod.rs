//! Command-line interface for kinkeeper.
//!
//! This module provides the CLI structure and command definitions for the
//! `kinkeep` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ClearCommand, ConfigCommand, EditCommand, ExportCommand, GalleryCommand,
    ImportCommand, LayoutArg, ListCommand, ProfileCommand, RemoveCommand, SettingsCommand,
    ShowCommand, StatsCommand, ThemeArg, TreeCommand, VoiceCommand,
};

/// kinkeep - keep your family's memories close
///
/// A local-first keeper of family members, their photos, voice
/// recordings, and stories, browsed as a relation-grouped tree and a
/// gallery.
#[derive(Debug, Parser)]
#[command(name = "kinkeep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a family member
    Add(AddCommand),

    /// List all family members
    List(ListCommand),

    /// Show one member's full record
    Show(ShowCommand),

    /// Edit an existing member
    Edit(EditCommand),

    /// Remove a member from the tree
    Remove(RemoveCommand),

    /// Render the relation-grouped family tree
    Tree(TreeCommand),

    /// Render the photo gallery
    Gallery(GalleryCommand),

    /// Show member and attachment counts
    Stats(StatsCommand),

    /// Attach a voice recording to a member
    Voice(VoiceCommand),

    /// Show or replace your profile text
    Profile(ProfileCommand),

    /// Export all family data as JSON
    Export(ExportCommand),

    /// Import family data from a JSON file
    Import(ImportCommand),

    /// Delete every member and the profile
    Clear(ClearCommand),

    /// View or change tree layout and color theme
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
