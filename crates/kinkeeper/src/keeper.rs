//! The keeper: application state and persistence orchestration.
//!
//! [`Keeper`] owns the member repository, the persistent store, and the
//! settings. Every mutation commits to the repository first and then
//! writes the serialized shadow copy to the store. Store failures are
//! logged and never propagate — the app keeps operating on in-memory
//! state, at the cost of possibly losing it on the next load.

use chrono::Utc;
use tracing::{info, warn};

use crate::error::Result;
use crate::export::{parse_import, FamilyExport};
use crate::member::{Member, MemberDraft, MemberId};
use crate::repo::MemberRepository;
use crate::settings::{ColorTheme, Settings, TreeLayout};
use crate::store::{Store, LAYOUT_KEY, MEMBERS_KEY, PROFILE_KEY, THEME_KEY};
use crate::view::{compute_stats, render_gallery, render_tree, GalleryView, Stats, TreeView};

/// Serialized size of the keeper's persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageFootprint {
    /// Bytes across the member list and profile blobs.
    pub bytes: u64,
}

impl StorageFootprint {
    /// Size in kilobytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn kilobytes(self) -> f64 {
        self.bytes as f64 / 1024.0
    }

    /// Coarse weight label shown next to the size.
    #[must_use]
    pub fn badge(self) -> &'static str {
        let kb = self.kilobytes();
        if kb < 100.0 {
            "Light"
        } else if kb < 500.0 {
            "Medium"
        } else {
            "Heavy"
        }
    }
}

/// What an import applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Number of members in the replacement list, if one was present.
    pub members_imported: Option<usize>,
    /// Whether the profile blob was overwritten.
    pub profile_updated: bool,
}

/// Application state: repository + store + settings.
#[derive(Debug)]
pub struct Keeper {
    repo: MemberRepository,
    store: Box<dyn Store>,
    settings: Settings,
}

impl Keeper {
    /// Load keeper state from the given store.
    ///
    /// Never fails: unreadable or malformed persisted state logs an error
    /// and starts empty, matching the original's tolerance for a corrupt
    /// blob.
    #[must_use]
    pub fn load(store: Box<dyn Store>) -> Self {
        let repo = match store.get(MEMBERS_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Member>>(&json) {
                Ok(members) => {
                    info!(count = members.len(), "loaded members");
                    MemberRepository::from_members(members)
                }
                Err(e) => {
                    warn!("stored member list is malformed, starting empty: {e}");
                    MemberRepository::new()
                }
            },
            Ok(None) => MemberRepository::new(),
            Err(e) => {
                warn!("failed to read stored members, starting empty: {e}");
                MemberRepository::new()
            }
        };

        let settings = Settings {
            layout: Self::load_setting(&*store, LAYOUT_KEY, TreeLayout::parse),
            theme: Self::load_setting(&*store, THEME_KEY, ColorTheme::parse),
        };

        Self {
            repo,
            store,
            settings,
        }
    }

    fn load_setting<T: Default>(
        store: &dyn Store,
        key: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> T {
        match store.get(key) {
            Ok(Some(value)) => parse(&value).unwrap_or_else(|| {
                warn!(key, %value, "unknown stored setting, using default");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                warn!(key, "failed to read setting, using default: {e}");
                T::default()
            }
        }
    }

    // === Members ===

    /// Add a member and persist.
    ///
    /// # Errors
    ///
    /// Propagates repository validation and duplicate-name errors; store
    /// failures do not surface here.
    pub fn add_member(&mut self, draft: MemberDraft) -> Result<MemberId> {
        let id = self.repo.add(draft)?;
        self.persist_members();
        Ok(id)
    }

    /// Update a member in place and persist.
    ///
    /// # Errors
    ///
    /// Propagates repository not-found, validation, and duplicate-name
    /// errors; store failures do not surface here.
    pub fn update_member(&mut self, id: MemberId, draft: MemberDraft) -> Result<()> {
        self.repo.update(id, draft)?;
        self.persist_members();
        Ok(())
    }

    /// Delete a member and persist. No-op (returning `false`) for the
    /// self record or a missing id.
    pub fn delete_member(&mut self, id: MemberId) -> bool {
        let removed = self.repo.delete(id);
        if removed {
            self.persist_members();
        }
        removed
    }

    /// Remove every member and the profile blob. The caller is
    /// responsible for confirming with the user first.
    pub fn clear_all(&mut self) {
        self.repo.clear_all();
        if let Err(e) = self.store.remove(MEMBERS_KEY) {
            warn!("failed to clear stored members: {e}");
        }
        if let Err(e) = self.store.remove(PROFILE_KEY) {
            warn!("failed to clear stored profile: {e}");
        }
    }

    /// Find a member by id or case-insensitive name.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Member> {
        self.repo.find(key)
    }

    /// All members in repository order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        self.repo.members()
    }

    /// The distinguished "you" record, if any.
    #[must_use]
    pub fn self_member(&self) -> Option<&Member> {
        self.repo.self_member()
    }

    // === Views ===

    /// The relation-grouped tree view.
    #[must_use]
    pub fn tree(&self) -> TreeView {
        render_tree(self.repo.members())
    }

    /// The gallery view.
    #[must_use]
    pub fn gallery(&self) -> GalleryView {
        render_gallery(self.repo.members())
    }

    /// Headline counts.
    #[must_use]
    pub fn stats(&self) -> Stats {
        compute_stats(self.repo.members())
    }

    // === Profile ===

    /// The opaque profile blob, if stored.
    #[must_use]
    pub fn profile(&self) -> Option<String> {
        match self.store.get(PROFILE_KEY) {
            Ok(value) => value,
            Err(e) => {
                warn!("failed to read profile: {e}");
                None
            }
        }
    }

    /// Overwrite the profile blob, best-effort.
    pub fn set_profile(&mut self, text: &str) {
        if let Err(e) = self.store.set(PROFILE_KEY, text) {
            warn!("failed to persist profile: {e}");
        }
    }

    // === Settings ===

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Change the tree layout and persist it.
    pub fn set_layout(&mut self, layout: TreeLayout) {
        self.settings.layout = layout;
        if let Err(e) = self.store.set(LAYOUT_KEY, layout.as_str()) {
            warn!("failed to persist layout: {e}");
        }
    }

    /// Change the color theme and persist it.
    pub fn set_theme(&mut self, theme: ColorTheme) {
        self.settings.theme = theme;
        if let Err(e) = self.store.set(THEME_KEY, theme.as_str()) {
            warn!("failed to persist theme: {e}");
        }
    }

    // === Export / Import ===

    /// Build the export document for the current state.
    #[must_use]
    pub fn export(&self) -> FamilyExport {
        FamilyExport {
            family_members: self.repo.members().to_vec(),
            your_profile: self.profile(),
            export_date: Utc::now(),
        }
    }

    /// Apply an import document from JSON text.
    ///
    /// A present member list fully replaces the repository; a present
    /// profile overwrites the stored blob. Malformed input changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ImportFormat`] if the text cannot be
    /// parsed.
    pub fn import_json(&mut self, json: &str) -> Result<ImportSummary> {
        let doc = parse_import(json)?;
        let mut summary = ImportSummary::default();

        if let Some(members) = doc.family_members {
            summary.members_imported = Some(members.len());
            self.repo = MemberRepository::from_members(members);
            self.persist_members();
        }
        if let Some(profile) = doc.your_profile {
            self.set_profile(&profile);
            summary.profile_updated = true;
        }

        Ok(summary)
    }

    /// Serialized size of the persisted member list and profile.
    #[must_use]
    pub fn footprint(&self) -> StorageFootprint {
        let members_len = serde_json::to_string(self.repo.members())
            .map(|s| s.len())
            .unwrap_or(0);
        let profile_len = self.profile().map_or(0, |p| p.len());
        StorageFootprint {
            bytes: u64::try_from(members_len + profile_len).unwrap_or(u64::MAX),
        }
    }

    /// Write the serialized member list to the store, best-effort.
    fn persist_members(&mut self) {
        match serde_json::to_string(self.repo.members()) {
            Ok(json) => {
                if let Err(e) = self.store.set(MEMBERS_KEY, &json) {
                    warn!("failed to persist members: {e}");
                }
            }
            Err(e) => warn!("failed to serialize members: {e}"),
        }
    }
}
