//! In-memory member repository.
//!
//! The repository exclusively owns the ordered member list; append order is
//! display order in the gallery. The persistent store only ever holds a
//! serialized shadow of this list, written after every mutation by the
//! layer above ([`crate::keeper::Keeper`]).

use tracing::debug;

use crate::error::{Error, Result};
use crate::member::{Member, MemberDraft, MemberId};

/// Ordered collection of family members with id assignment and
/// case-insensitive name uniqueness.
#[derive(Debug, Clone, Default)]
pub struct MemberRepository {
    members: Vec<Member>,
    next_id: MemberId,
}

impl MemberRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a repository from previously persisted members.
    ///
    /// The id counter resumes above the highest existing id so ids are
    /// never reused.
    #[must_use]
    pub fn from_members(members: Vec<Member>) -> Self {
        let next_id = members.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        Self { members, next_id }
    }

    /// Add a new member from a draft.
    ///
    /// Assigns the next unique id and appends to the list.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if the name is empty after trimming;
    /// [`Error::DuplicateName`] if any existing member's name matches
    /// case-insensitively.
    pub fn add(&mut self, draft: MemberDraft) -> Result<MemberId> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(Error::validation("name is required"));
        }
        if self.name_taken(name, None) {
            return Err(Error::duplicate_name(name));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.members.push(Member::from_draft(id, draft));
        debug!(id, "added member");
        Ok(id)
    }

    /// Replace the member with the given id, preserving the id.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no member has this id;
    /// [`Error::Validation`] if the new name is empty after trimming;
    /// [`Error::DuplicateName`] if a *different* member already holds the
    /// new name.
    pub fn update(&mut self, id: MemberId, draft: MemberDraft) -> Result<()> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| Error::not_found(id.to_string()))?;

        let name = draft.name.trim();
        if name.is_empty() {
            return Err(Error::validation("name is required"));
        }
        if self.name_taken(name, Some(id)) {
            return Err(Error::duplicate_name(name));
        }

        self.members[index] = Member::from_draft(id, draft);
        debug!(id, "updated member");
        Ok(())
    }

    /// Remove the member with the given id.
    ///
    /// The distinguished self record is never removed; deleting it (or a
    /// missing id) is a silent no-op returning `false`.
    pub fn delete(&mut self, id: MemberId) -> bool {
        let Some(index) = self.members.iter().position(|m| m.id == id) else {
            return false;
        };
        if self.members[index].is_self() {
            debug!(id, "refusing to delete the self record");
            return false;
        }
        self.members.remove(index);
        debug!(id, "deleted member");
        true
    }

    /// Find the first member matching the key: exact id when the key is
    /// numeric, otherwise case-insensitive name.
    ///
    /// Name uniqueness is enforced by [`add`](Self::add) and
    /// [`update`](Self::update), so a name lookup is unambiguous.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Member> {
        let id: Option<MemberId> = key.parse().ok();
        self.members
            .iter()
            .find(|m| id == Some(m.id) || m.name_matches(key))
    }

    /// Get a member by id.
    #[must_use]
    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// The distinguished "you" record, if one exists.
    #[must_use]
    pub fn self_member(&self) -> Option<&Member> {
        self.members.iter().find(|m| m.is_self())
    }

    /// Empty the repository unconditionally. Confirmation is the caller's
    /// responsibility.
    pub fn clear_all(&mut self) {
        self.members.clear();
        debug!("cleared all members");
    }

    /// All members in append (gallery) order.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the repository holds no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether a name is already held, optionally excluding one id (the
    /// record being edited).
    fn name_taken(&self, name: &str, exclude: Option<MemberId>) -> bool {
        self.members
            .iter()
            .any(|m| Some(m.id) != exclude && m.name_matches(name))
    }
}
