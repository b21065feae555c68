//! Multi-step form wizard.
//!
//! The wizard walks a draft member through three steps (details, photo,
//! voice), holding transient capture buffers until submission hands the
//! assembled draft to the keeper. Failed submissions leave every bit of
//! wizard state in place so the user can fix and retry; successful ones
//! reset back to a blank step 1.

use tracing::debug;

use crate::error::{Error, Result};
use crate::keeper::Keeper;
use crate::media::EmbeddedMedia;
use crate::member::{Member, MemberDraft, MemberId};

/// Number of form steps: details, photo, voice.
pub const STEP_COUNT: usize = 3;

/// Linear multi-step form state plus capture buffers.
#[derive(Debug, Default)]
pub struct FormWizard {
    step: usize,
    draft: MemberDraft,
    photo: Option<EmbeddedMedia>,
    audio: Option<EmbeddedMedia>,
    editing: Option<MemberId>,
    max_photo_bytes: Option<usize>,
}

impl FormWizard {
    /// Create a blank wizard at step 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: 1,
            ..Self::default()
        }
    }

    /// Create a blank wizard that rejects photos over `bytes`.
    #[must_use]
    pub fn with_photo_limit(bytes: usize) -> Self {
        Self {
            max_photo_bytes: Some(bytes),
            ..Self::new()
        }
    }

    /// Current step, 1-based.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Advance one step; clamped at the last step.
    pub fn next(&mut self) {
        if self.step < STEP_COUNT {
            self.step += 1;
        }
    }

    /// Go back one step; clamped at step 1.
    pub fn back(&mut self) {
        if self.step > 1 {
            self.step -= 1;
        }
    }

    /// The draft under construction.
    #[must_use]
    pub fn draft(&self) -> &MemberDraft {
        &self.draft
    }

    /// Mutable access to the draft fields.
    pub fn draft_mut(&mut self) -> &mut MemberDraft {
        &mut self.draft
    }

    /// Whether the wizard is editing an existing member.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The buffered photo, if one was attached.
    #[must_use]
    pub fn photo(&self) -> Option<&EmbeddedMedia> {
        self.photo.as_ref()
    }

    /// The buffered recording, if one was attached.
    #[must_use]
    pub fn audio(&self) -> Option<&EmbeddedMedia> {
        self.audio.as_ref()
    }

    /// Attach a photo, replacing any prior one.
    ///
    /// Non-image payloads (and payloads over the configured size limit)
    /// are rejected silently: no user-facing error, just a debug log and
    /// an unchanged buffer. Returns whether the photo was attached.
    pub fn attach_photo(&mut self, media: EmbeddedMedia) -> bool {
        if !media.is_image() {
            debug!(mime = %media.mime, "ignoring non-image photo attachment");
            return false;
        }
        if let Some(limit) = self.max_photo_bytes {
            if media.len() > limit {
                debug!(len = media.len(), limit, "ignoring oversized photo");
                return false;
            }
        }
        self.photo = Some(media);
        true
    }

    /// Drop the buffered photo.
    pub fn remove_photo(&mut self) {
        self.photo = None;
    }

    /// Attach a finalized recording, replacing any prior one.
    ///
    /// Non-audio payloads are rejected silently, mirroring the photo
    /// path. Returns whether the recording was attached.
    pub fn attach_audio(&mut self, media: EmbeddedMedia) -> bool {
        if !media.is_audio() {
            debug!(mime = %media.mime, "ignoring non-audio attachment");
            return false;
        }
        self.audio = Some(media);
        true
    }

    /// Drop the buffered recording.
    pub fn remove_audio(&mut self) {
        self.audio = None;
    }

    /// Seed the wizard from an existing member for editing.
    ///
    /// Every field carries over, including stored photo and audio so the
    /// previews reconstruct; the member's id becomes the edit target.
    pub fn begin_edit(&mut self, member: &Member) {
        self.draft = MemberDraft::from_member(member);
        self.photo = member.photo.clone();
        self.audio = member.audio.clone();
        self.editing = Some(member.id);
        self.step = 1;
    }

    /// Validate and commit the draft.
    ///
    /// Routes to add or update depending on whether an edit target is
    /// set. On success the wizard resets (edit mode cleared, back to step
    /// 1); on any failure the wizard state is left untouched so nothing
    /// the user entered is lost.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] when name or relation is missing, plus
    /// whatever the repository raises (duplicate name, not found).
    pub fn submit(&mut self, keeper: &mut Keeper) -> Result<MemberId> {
        if self.draft.name.trim().is_empty() || self.draft.relation.trim().is_empty() {
            return Err(Error::validation("name and relation are required"));
        }

        let mut draft = self.draft.clone();
        draft.photo = self.photo.clone();
        draft.audio = self.audio.clone();

        let id = match self.editing {
            Some(id) => {
                keeper.update_member(id, draft)?;
                id
            }
            None => keeper.add_member(draft)?,
        };

        self.reset();
        Ok(id)
    }

    /// Clear the draft, capture buffers, and edit flag; return to step 1.
    pub fn reset(&mut self) {
        let max_photo_bytes = self.max_photo_bytes;
        *self = Self {
            max_photo_bytes,
            ..Self::new()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn keeper() -> Keeper {
        Keeper::load(Box::new(MemoryStore::new()))
    }

    fn image(bytes: usize) -> EmbeddedMedia {
        EmbeddedMedia::new("image/png", vec![0; bytes])
    }

    fn audio() -> EmbeddedMedia {
        EmbeddedMedia::new("audio/wav", b"wav".to_vec())
    }

    #[test]
    fn test_starts_at_step_one() {
        assert_eq!(FormWizard::new().step(), 1);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut wizard = FormWizard::new();

        wizard.back();
        assert_eq!(wizard.step(), 1);

        for _ in 0..10 {
            wizard.next();
        }
        assert_eq!(wizard.step(), STEP_COUNT);

        wizard.back();
        assert_eq!(wizard.step(), STEP_COUNT - 1);
    }

    #[test]
    fn test_attach_photo_replaces_prior() {
        let mut wizard = FormWizard::new();

        assert!(wizard.attach_photo(image(4)));
        assert!(wizard.attach_photo(EmbeddedMedia::new("image/jpeg", vec![9])));
        assert_eq!(wizard.photo().unwrap().mime, "image/jpeg");
    }

    #[test]
    fn test_attach_photo_rejects_non_image_silently() {
        let mut wizard = FormWizard::new();

        assert!(!wizard.attach_photo(EmbeddedMedia::new("audio/wav", vec![1])));
        assert!(!wizard.attach_photo(EmbeddedMedia::new("text/plain", vec![1])));
        assert!(wizard.photo().is_none());
    }

    #[test]
    fn test_attach_photo_respects_size_limit() {
        let mut wizard = FormWizard::with_photo_limit(10);

        assert!(!wizard.attach_photo(image(11)));
        assert!(wizard.photo().is_none());

        assert!(wizard.attach_photo(image(10)));
        assert!(wizard.photo().is_some());
    }

    #[test]
    fn test_attach_audio_rejects_non_audio() {
        let mut wizard = FormWizard::new();

        assert!(!wizard.attach_audio(image(1)));
        assert!(wizard.audio().is_none());

        assert!(wizard.attach_audio(audio()));
        assert!(wizard.audio().is_some());
    }

    #[test]
    fn test_remove_photo_and_audio() {
        let mut wizard = FormWizard::new();
        wizard.attach_photo(image(1));
        wizard.attach_audio(audio());

        wizard.remove_photo();
        wizard.remove_audio();
        assert!(wizard.photo().is_none());
        assert!(wizard.audio().is_none());
    }

    #[test]
    fn test_submit_requires_name_and_relation() {
        let mut keeper = keeper();
        let mut wizard = FormWizard::new();
        wizard.draft_mut().name = "Maria".to_string();

        let err = wizard.submit(&mut keeper).unwrap_err();
        assert!(err.is_validation());

        // Nothing the user entered is lost.
        assert_eq!(wizard.draft().name, "Maria");
        assert!(keeper.members().is_empty());
    }

    #[test]
    fn test_submit_adds_member_with_buffers_and_resets() {
        let mut keeper = keeper();
        let mut wizard = FormWizard::new();
        wizard.draft_mut().name = "Maria".to_string();
        wizard.draft_mut().relation = "mother".to_string();
        wizard.attach_photo(image(3));
        wizard.attach_audio(audio());
        wizard.next();

        let id = wizard.submit(&mut keeper).unwrap();

        let member = keeper.find(&id.to_string()).unwrap();
        assert!(member.has_photo());
        assert!(member.has_voice());

        assert_eq!(wizard.step(), 1);
        assert!(wizard.draft().name.is_empty());
        assert!(wizard.photo().is_none());
        assert!(wizard.audio().is_none());
        assert!(!wizard.is_editing());
    }

    #[test]
    fn test_submit_duplicate_keeps_wizard_state() {
        let mut keeper = keeper();
        keeper
            .add_member(MemberDraft::new("Maria", "mother"))
            .unwrap();

        let mut wizard = FormWizard::new();
        wizard.draft_mut().name = "maria".to_string();
        wizard.draft_mut().relation = "aunt".to_string();
        wizard.attach_photo(image(2));

        let err = wizard.submit(&mut keeper).unwrap_err();
        assert!(err.is_duplicate_name());
        assert_eq!(wizard.draft().name, "maria");
        assert!(wizard.photo().is_some());
        assert_eq!(keeper.members().len(), 1);
    }

    #[test]
    fn test_begin_edit_seeds_everything() {
        let mut keeper = keeper();
        let mut draft = MemberDraft::new("Maria", "mother");
        draft.bio = "Gardener.".to_string();
        draft.photo = Some(image(5));
        draft.audio = Some(audio());
        let id = keeper.add_member(draft).unwrap();

        let mut wizard = FormWizard::new();
        wizard.begin_edit(&keeper.find("Maria").unwrap().clone());

        assert!(wizard.is_editing());
        assert_eq!(wizard.draft().name, "Maria");
        assert_eq!(wizard.draft().bio, "Gardener.");
        assert!(wizard.photo().is_some());
        assert!(wizard.audio().is_some());

        // Submitting the edit updates in place and exits edit mode.
        wizard.draft_mut().bio = "Master gardener.".to_string();
        let updated = wizard.submit(&mut keeper).unwrap();
        assert_eq!(updated, id);
        assert_eq!(keeper.find("Maria").unwrap().bio, "Master gardener.");
        assert!(!wizard.is_editing());
        assert_eq!(keeper.members().len(), 1);
    }

    #[test]
    fn test_edit_keeping_same_name_is_allowed() {
        let mut keeper = keeper();
        keeper
            .add_member(MemberDraft::new("Maria", "mother"))
            .unwrap();

        let mut wizard = FormWizard::new();
        wizard.begin_edit(&keeper.find("Maria").unwrap().clone());
        assert!(wizard.submit(&mut keeper).is_ok());
    }

    #[test]
    fn test_reset_clears_state_but_keeps_limit() {
        let mut wizard = FormWizard::with_photo_limit(4);
        wizard.draft_mut().name = "Maria".to_string();
        wizard.attach_photo(image(2));
        wizard.next();

        wizard.reset();

        assert_eq!(wizard.step(), 1);
        assert!(wizard.draft().name.is_empty());
        assert!(wizard.photo().is_none());
        // The configured limit still applies after reset.
        assert!(!wizard.attach_photo(image(5)));
    }
}
