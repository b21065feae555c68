//! View models derived from the member list.
//!
//! Pure derivations only: the tree partitions members into relation groups,
//! the gallery is the flat list in repository order, and the stats line
//! counts attachments. No rendering surface is assumed; the CLI formats
//! these, and any other frontend could too.

use serde::Serialize;

use crate::member::Member;
use crate::relation::{classify, RelationGroup, GROUP_ORDER};

/// Call-to-action shown in place of an empty gallery grid.
pub const EMPTY_GALLERY_PROMPT: &str =
    "No family members yet. Start building your family tree by adding your first member!";

/// One labeled group of the tree view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeGroup {
    /// Group title (e.g. "Parents").
    pub title: &'static str,
    /// Members in repository order.
    pub members: Vec<Member>,
}

/// The relation-grouped tree.
///
/// The distinguished self record renders once, centrally; every non-empty
/// group follows in fixed order. Members whose relation falls outside the
/// vocabulary appear in no group — they are only visible in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeView {
    /// The central "you" node, if one exists.
    pub center: Option<Member>,
    /// Non-empty groups in display order.
    pub groups: Vec<TreeGroup>,
}

impl TreeView {
    /// Whether the tree has nothing at all to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.center.is_none() && self.groups.is_empty()
    }
}

/// The flat gallery in repository order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GalleryView {
    /// Nothing to show; surface a call-to-action instead of an empty grid.
    Empty {
        /// The call-to-action text.
        prompt: String,
    },
    /// One item per member, append order.
    Grid {
        /// Gallery items.
        items: Vec<Member>,
    },
}

/// Headline counts for the stats bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Total number of members.
    pub count: usize,
    /// Members with a photo attached.
    pub photo_count: usize,
    /// Members with a voice recording attached.
    pub voice_count: usize,
}

/// Partition members into the relation-grouped tree.
#[must_use]
pub fn render_tree(members: &[Member]) -> TreeView {
    let center = members.iter().find(|m| m.is_self()).cloned();

    let groups = GROUP_ORDER
        .iter()
        .filter_map(|&group| {
            let matching: Vec<Member> = members
                .iter()
                .filter(|m| classify(&m.relation) == group)
                .cloned()
                .collect();
            if matching.is_empty() {
                None
            } else {
                Some(TreeGroup {
                    title: group.title(),
                    members: matching,
                })
            }
        })
        .collect();

    TreeView { center, groups }
}

/// Build the gallery view in repository order.
#[must_use]
pub fn render_gallery(members: &[Member]) -> GalleryView {
    if members.is_empty() {
        GalleryView::Empty {
            prompt: EMPTY_GALLERY_PROMPT.to_string(),
        }
    } else {
        GalleryView::Grid {
            items: members.to_vec(),
        }
    }
}

/// Count members and attachments.
#[must_use]
pub fn compute_stats(members: &[Member]) -> Stats {
    Stats {
        count: members.len(),
        photo_count: members.iter().filter(|m| m.has_photo()).count(),
        voice_count: members.iter().filter(|m| m.has_voice()).count(),
    }
}

/// Group a member would render under, if any.
///
/// `None` for the self record (it renders centrally) and for relations
/// outside the vocabulary.
#[must_use]
pub fn group_of(member: &Member) -> Option<RelationGroup> {
    match classify(&member.relation) {
        RelationGroup::You | RelationGroup::Unknown => None,
        group => Some(group),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::EmbeddedMedia;
    use crate::member::MemberDraft;

    fn member(id: i64, name: &str, relation: &str) -> Member {
        Member::from_draft(id, MemberDraft::new(name, relation))
    }

    #[test]
    fn test_tree_of_empty_list() {
        let tree = render_tree(&[]);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_tree_places_self_centrally() {
        let members = vec![member(1, "Alex", "you"), member(2, "Maria", "mother")];
        let tree = render_tree(&members);

        assert_eq!(tree.center.as_ref().unwrap().name, "Alex");
        // "you" never shows up inside a group.
        for group in &tree.groups {
            assert!(group.members.iter().all(|m| m.name != "Alex"));
        }
    }

    #[test]
    fn test_tree_maria_appears_only_under_parents() {
        let members = vec![member(1, "Maria", "mother")];
        let tree = render_tree(&members);

        assert_eq!(tree.groups.len(), 1);
        assert_eq!(tree.groups[0].title, "Parents");
        assert_eq!(tree.groups[0].members[0].name, "Maria");
    }

    #[test]
    fn test_tree_omits_empty_groups() {
        let members = vec![member(1, "Tom", "brother")];
        let tree = render_tree(&members);

        let titles: Vec<&str> = tree.groups.iter().map(|g| g.title).collect();
        assert_eq!(titles, ["Siblings"]);
    }

    #[test]
    fn test_tree_group_order_is_fixed() {
        let members = vec![
            member(1, "Lea", "daughter"),
            member(2, "Maria", "mother"),
            member(3, "Sam", "spouse"),
            member(4, "Nonna", "grandmother"),
        ];
        let tree = render_tree(&members);

        let titles: Vec<&str> = tree.groups.iter().map(|g| g.title).collect();
        assert_eq!(titles, ["Parents", "Grandparents", "Children", "Partners"]);
    }

    #[test]
    fn test_tree_preserves_repository_order_within_group() {
        let members = vec![
            member(1, "Maria", "mother"),
            member(2, "Tom", "brother"),
            member(3, "Jorge", "father"),
        ];
        let tree = render_tree(&members);

        let parents: Vec<&str> = tree.groups[0]
            .members
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(parents, ["Maria", "Jorge"]);
    }

    #[test]
    fn test_tree_silently_omits_unknown_relations() {
        let members = vec![member(1, "Rui", "godfather"), member(2, "Maria", "mother")];
        let tree = render_tree(&members);

        let grouped: usize = tree.groups.iter().map(|g| g.members.len()).sum();
        assert_eq!(grouped, 1);
        assert!(tree
            .groups
            .iter()
            .all(|g| g.members.iter().all(|m| m.name != "Rui")));
    }

    #[test]
    fn test_gallery_empty_state_has_prompt() {
        match render_gallery(&[]) {
            GalleryView::Empty { prompt } => assert!(prompt.contains("first member")),
            GalleryView::Grid { .. } => panic!("expected empty state"),
        }
    }

    #[test]
    fn test_gallery_keeps_repository_order_and_unknown_relations() {
        let members = vec![
            member(1, "Maria", "mother"),
            member(2, "Rui", "godfather"),
            member(3, "Tom", "brother"),
        ];
        match render_gallery(&members) {
            GalleryView::Grid { items } => {
                let names: Vec<&str> = items.iter().map(|m| m.name.as_str()).collect();
                // Unknown relations are still visible here.
                assert_eq!(names, ["Maria", "Rui", "Tom"]);
            }
            GalleryView::Empty { .. } => panic!("expected grid"),
        }
    }

    #[test]
    fn test_stats_counts_attachments() {
        let mut maria = member(1, "Maria", "mother");
        maria.photo = Some(EmbeddedMedia::new("image/png", vec![1]));
        let mut tom = member(2, "Tom", "brother");
        tom.audio = Some(EmbeddedMedia::new("audio/wav", vec![2]));
        let nonna = member(3, "Nonna", "grandmother");

        let stats = compute_stats(&[maria, tom, nonna]);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.photo_count, 1);
        assert_eq!(stats.voice_count, 1);
    }

    #[test]
    fn test_stats_single_member_scenario() {
        let stats = compute_stats(&[member(1, "Maria", "mother")]);
        assert_eq!(stats.count, 1);
        assert_eq!(stats.photo_count, 0);
        assert_eq!(stats.voice_count, 0);
    }

    #[test]
    fn test_group_of() {
        assert_eq!(
            group_of(&member(1, "Maria", "mother")),
            Some(RelationGroup::Parents)
        );
        assert_eq!(group_of(&member(2, "Alex", "you")), None);
        assert_eq!(group_of(&member(3, "Rui", "godfather")), None);
    }
}
