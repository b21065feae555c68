//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::settings::{ColorTheme, TreeLayout};

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// The member's name
    pub name: String,

    /// Relation to you (e.g. mother, cousin, you)
    #[arg(short, long)]
    pub relation: String,

    /// Birth date (YYYY-MM-DD)
    #[arg(short, long)]
    pub birth_date: Option<NaiveDate>,

    /// Short biography
    #[arg(long)]
    pub bio: Option<String>,

    /// Attach a photo from this image file
    #[arg(short, long)]
    pub photo: Option<PathBuf>,

    /// Attach a voice recording from this audio file
    #[arg(short, long)]
    pub audio: Option<PathBuf>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Member id or name
    pub key: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Edit command arguments. Fields left out keep their current values.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Member id or name
    pub key: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New relation value
    #[arg(short, long)]
    pub relation: Option<String>,

    /// New birth date (YYYY-MM-DD)
    #[arg(short, long)]
    pub birth_date: Option<NaiveDate>,

    /// New biography
    #[arg(long)]
    pub bio: Option<String>,

    /// Replace the photo with this image file
    #[arg(short, long)]
    pub photo: Option<PathBuf>,

    /// Replace the recording with this audio file
    #[arg(short, long)]
    pub audio: Option<PathBuf>,

    /// Remove the current photo
    #[arg(long)]
    pub remove_photo: bool,

    /// Remove the current voice recording
    #[arg(long)]
    pub remove_audio: bool,
}

/// Remove command arguments.
#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Member id or name
    pub key: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Tree command arguments.
#[derive(Debug, Args)]
pub struct TreeCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Gallery command arguments.
#[derive(Debug, Args)]
pub struct GalleryCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Voice command arguments.
#[derive(Debug, Args)]
pub struct VoiceCommand {
    /// Member id or name
    pub key: String,

    /// Audio file to record from
    #[arg(short, long, value_name = "FILE")]
    pub from: PathBuf,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// JSON file to import
    pub file: PathBuf,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Profile command arguments.
#[derive(Debug, Args)]
pub struct ProfileCommand {
    /// Replace the profile text
    #[arg(long, value_name = "TEXT")]
    pub set: Option<String>,
}

/// Settings commands.
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Change the tree layout
    Layout {
        /// The layout to use
        #[arg(value_enum)]
        value: LayoutArg,
    },

    /// Change the color theme
    Theme {
        /// The theme to use
        #[arg(value_enum)]
        value: ThemeArg,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Tree layout argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Groups stacked top to bottom
    Vertical,
    /// Groups laid out left to right
    Horizontal,
    /// Groups arranged around the central node
    Radial,
}

impl From<LayoutArg> for TreeLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Vertical => Self::Vertical,
            LayoutArg::Horizontal => Self::Horizontal,
            LayoutArg::Radial => Self::Radial,
        }
    }
}

/// Color theme argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    /// The stock palette
    Default,
    /// Warm sunset tones
    Warm,
    /// Cool blue tones
    Ocean,
    /// Muted green tones
    Forest,
}

impl From<ThemeArg> for ColorTheme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Default => Self::Default,
            ThemeArg::Warm => Self::Warm,
            ThemeArg::Ocean => Self::Ocean,
            ThemeArg::Forest => Self::Forest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_arg_conversion() {
        assert_eq!(TreeLayout::from(LayoutArg::Vertical), TreeLayout::Vertical);
        assert_eq!(
            TreeLayout::from(LayoutArg::Horizontal),
            TreeLayout::Horizontal
        );
        assert_eq!(TreeLayout::from(LayoutArg::Radial), TreeLayout::Radial);
    }

    #[test]
    fn test_theme_arg_conversion() {
        assert_eq!(ColorTheme::from(ThemeArg::Default), ColorTheme::Default);
        assert_eq!(ColorTheme::from(ThemeArg::Warm), ColorTheme::Warm);
        assert_eq!(ColorTheme::from(ThemeArg::Ocean), ColorTheme::Ocean);
        assert_eq!(ColorTheme::from(ThemeArg::Forest), ColorTheme::Forest);
    }

    #[test]
    fn test_add_command_debug() {
        let cmd = AddCommand {
            name: "Maria".to_string(),
            relation: "mother".to_string(),
            birth_date: None,
            bio: None,
            photo: None,
            audio: None,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Maria"));
    }

    #[test]
    fn test_settings_command_debug() {
        let cmd = SettingsCommand::Layout {
            value: LayoutArg::Radial,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Radial"));
    }
}
