//! `kinkeeper` - a local-first keeper of family memories
//!
//! This library provides the core functionality for keeping family member
//! records with embedded photos and voice recordings, browsing them as a
//! relation-grouped tree and a gallery, and persisting everything to a
//! local key-value store.
//!
//! The environment-facing capabilities (persistent storage, file reading,
//! audio input) sit behind small traits ([`store::Store`],
//! [`media::MediaReader`], [`recorder::AudioInput`]) so the domain logic
//! runs and tests without any particular frontend.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod keeper;
pub mod logging;
pub mod media;
pub mod member;
pub mod recorder;
pub mod relation;
pub mod repo;
pub mod settings;
pub mod store;
pub mod view;
pub mod wizard;

pub use config::KeeperConfig;
pub use error::{Error, Result};
pub use keeper::Keeper;
pub use logging::init_logging;
pub use media::EmbeddedMedia;
pub use member::{Member, MemberDraft, MemberId};
pub use recorder::VoiceRecorder;
pub use repo::MemberRepository;
pub use wizard::FormWizard;
