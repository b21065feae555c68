//! Core member record types.
//!
//! A family member is a small record with a name, a relation drawn from a
//! fixed vocabulary, and optional birth date, biography, photo, and voice
//! recording. The persisted JSON field names are camelCase so documents
//! stay interchangeable with the original app's exports.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::media::EmbeddedMedia;

/// Unique identifier for a member, assigned by the repository at creation
/// and immutable afterwards.
pub type MemberId = i64;

/// A member of the family tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique id, assigned at creation time.
    pub id: MemberId,

    /// Display name; unique case-insensitively among current members.
    pub name: String,

    /// Relation to the keeper (e.g. `mother`, `cousin`, `you`).
    pub relation: String,

    /// Birth date, if known.
    pub birth_date: Option<NaiveDate>,

    /// Short biography; empty when the user left it blank.
    #[serde(default)]
    pub bio: String,

    /// Embedded photo, if one was attached.
    pub photo: Option<EmbeddedMedia>,

    /// Embedded voice recording, if one was attached.
    pub audio: Option<EmbeddedMedia>,
}

impl Member {
    /// Build a member from a draft, assigning the given id.
    ///
    /// Name and biography are trimmed; everything else is taken as-is.
    #[must_use]
    pub fn from_draft(id: MemberId, draft: MemberDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            relation: draft.relation,
            birth_date: draft.birth_date,
            bio: draft.bio.trim().to_string(),
            photo: draft.photo,
            audio: draft.audio,
        }
    }

    /// Whether this is the distinguished "you" record.
    ///
    /// The check is case-insensitive; at most one such member exists and it
    /// is protected from deletion.
    #[must_use]
    pub fn is_self(&self) -> bool {
        self.relation.eq_ignore_ascii_case("you")
    }

    /// Whether a photo is attached.
    #[must_use]
    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    /// Whether a voice recording is attached.
    #[must_use]
    pub fn has_voice(&self) -> bool {
        self.audio.is_some()
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// A member record before it has an id: what the form wizard hands to the
/// repository on submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDraft {
    /// Display name (required).
    pub name: String,
    /// Relation value (required).
    pub relation: String,
    /// Birth date, if provided.
    pub birth_date: Option<NaiveDate>,
    /// Biography text; defaults to empty.
    #[serde(default)]
    pub bio: String,
    /// Attached photo, if any.
    pub photo: Option<EmbeddedMedia>,
    /// Attached voice recording, if any.
    pub audio: Option<EmbeddedMedia>,
}

impl MemberDraft {
    /// Create a draft with just the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, relation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relation: relation.into(),
            ..Self::default()
        }
    }

    /// Re-create a draft from an existing member, e.g. when seeding edit
    /// mode. The id is deliberately not carried here; the caller tracks it.
    #[must_use]
    pub fn from_member(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            relation: member.relation.clone(),
            birth_date: member.birth_date,
            bio: member.bio.clone(),
            photo: member.photo.clone(),
            audio: member.audio.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, relation: &str) -> MemberDraft {
        MemberDraft::new(name, relation)
    }

    #[test]
    fn test_from_draft_assigns_id_and_trims() {
        let mut d = draft("  Maria  ", "mother");
        d.bio = "  Loves gardening.  ".to_string();

        let member = Member::from_draft(7, d);
        assert_eq!(member.id, 7);
        assert_eq!(member.name, "Maria");
        assert_eq!(member.bio, "Loves gardening.");
        assert_eq!(member.relation, "mother");
    }

    #[test]
    fn test_is_self_case_insensitive() {
        let you = Member::from_draft(1, draft("Alex", "you"));
        assert!(you.is_self());

        let shouting = Member::from_draft(2, draft("Alex", "YOU"));
        assert!(shouting.is_self());

        let mother = Member::from_draft(3, draft("Maria", "mother"));
        assert!(!mother.is_self());
    }

    #[test]
    fn test_name_matches_ignores_case() {
        let member = Member::from_draft(1, draft("Maria", "mother"));
        assert!(member.name_matches("maria"));
        assert!(member.name_matches("MARIA"));
        assert!(!member.name_matches("Marta"));
    }

    #[test]
    fn test_has_photo_and_voice() {
        let mut member = Member::from_draft(1, draft("Maria", "mother"));
        assert!(!member.has_photo());
        assert!(!member.has_voice());

        member.photo = Some(EmbeddedMedia::new("image/png", vec![1]));
        member.audio = Some(EmbeddedMedia::new("audio/wav", vec![2]));
        assert!(member.has_photo());
        assert!(member.has_voice());
    }

    #[test]
    fn test_draft_from_member_round_trip() {
        let mut original = Member::from_draft(4, draft("Nonna", "grandmother"));
        original.bio = "Makes the best pasta.".to_string();
        original.birth_date = NaiveDate::from_ymd_opt(1948, 3, 14);

        let d = MemberDraft::from_member(&original);
        let rebuilt = Member::from_draft(4, d);
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let mut member = Member::from_draft(1, draft("Maria", "mother"));
        member.birth_date = NaiveDate::from_ymd_opt(1970, 5, 1);

        let json = serde_json::to_string(&member).unwrap();
        assert!(json.contains("\"birthDate\":\"1970-05-01\""));
        assert!(json.contains("\"photo\":null"));
        assert!(json.contains("\"audio\":null"));
    }

    #[test]
    fn test_serde_round_trip_with_media() {
        let mut member = Member::from_draft(9, draft("Tom", "brother"));
        member.photo = Some(EmbeddedMedia::new("image/jpeg", b"jpeg".to_vec()));
        member.audio = Some(EmbeddedMedia::new("audio/wav", b"wav".to_vec()));

        let json = serde_json::to_string(&member).unwrap();
        let back: Member = serde_json::from_str(&json).unwrap();
        assert_eq!(back, member);
    }

    #[test]
    fn test_deserialize_missing_bio_defaults_empty() {
        let json = r#"{
            "id": 3,
            "name": "Maria",
            "relation": "mother",
            "birthDate": null,
            "photo": null,
            "audio": null
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.bio, "");
    }
}
