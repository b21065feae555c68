//! Export and import documents.
//!
//! A single JSON document carries the whole keeper: the member array, the
//! opaque profile blob, and an export timestamp. Import accepts the same
//! shape with every field optional; a present member array fully replaces
//! the repository (no merge), and malformed input applies nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::member::Member;

/// The exported document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyExport {
    /// Every member, in repository order.
    pub family_members: Vec<Member>,
    /// The stored profile blob, verbatim.
    pub your_profile: Option<String>,
    /// When this export was produced.
    pub export_date: DateTime<Utc>,
}

impl FamilyExport {
    /// Serialize to pretty-printed JSON, the shape offered for download.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A parsed import document. Fields the file omits stay `None` and leave
/// the corresponding state untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    /// Replacement member list, if present.
    #[serde(default)]
    pub family_members: Option<Vec<Member>>,
    /// Replacement profile blob, if present.
    #[serde(default)]
    pub your_profile: Option<String>,
}

impl ImportDocument {
    /// Whether the document carries nothing applicable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.family_members.is_none() && self.your_profile.is_none()
    }
}

/// Parse an import document from JSON text.
///
/// # Errors
///
/// Returns [`Error::ImportFormat`] if the text is not a JSON document of
/// the expected shape. Nothing is applied on failure.
pub fn parse_import(json: &str) -> Result<ImportDocument> {
    serde_json::from_str(json).map_err(|e| Error::import_format(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::MemberDraft;

    fn member(id: i64, name: &str, relation: &str) -> Member {
        Member::from_draft(id, MemberDraft::new(name, relation))
    }

    #[test]
    fn test_export_serializes_camel_case() {
        let export = FamilyExport {
            family_members: vec![member(1, "Maria", "mother")],
            your_profile: Some("hello".to_string()),
            export_date: Utc::now(),
        };

        let json = export.to_pretty_json().unwrap();
        assert!(json.contains("\"familyMembers\""));
        assert!(json.contains("\"yourProfile\""));
        assert!(json.contains("\"exportDate\""));
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let export = FamilyExport {
            family_members: vec![member(1, "Maria", "mother"), member(2, "Tom", "brother")],
            your_profile: None,
            export_date: Utc::now(),
        };

        let json = export.to_pretty_json().unwrap();
        let doc = parse_import(&json).unwrap();
        assert_eq!(doc.family_members.unwrap(), export.family_members);
        assert_eq!(doc.your_profile, None);
    }

    #[test]
    fn test_import_with_members_only() {
        let json = r#"{"familyMembers": []}"#;
        let doc = parse_import(json).unwrap();
        assert_eq!(doc.family_members, Some(Vec::new()));
        assert!(doc.your_profile.is_none());
    }

    #[test]
    fn test_import_with_profile_only() {
        let json = r#"{"yourProfile": "about me"}"#;
        let doc = parse_import(json).unwrap();
        assert!(doc.family_members.is_none());
        assert_eq!(doc.your_profile.as_deref(), Some("about me"));
    }

    #[test]
    fn test_import_ignores_export_date() {
        let json = r#"{"familyMembers": [], "exportDate": "2024-01-01T00:00:00Z"}"#;
        assert!(parse_import(json).is_ok());
    }

    #[test]
    fn test_import_empty_object() {
        let doc = parse_import("{}").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_import_malformed_json_fails() {
        let err = parse_import("{not json").unwrap_err();
        assert!(matches!(err, Error::ImportFormat { .. }));
    }

    #[test]
    fn test_import_malformed_member_fails() {
        // A member without a name is not the expected shape.
        let json = r#"{"familyMembers": [{"id": 1}]}"#;
        let err = parse_import(json).unwrap_err();
        assert!(matches!(err, Error::ImportFormat { .. }));
    }
}
