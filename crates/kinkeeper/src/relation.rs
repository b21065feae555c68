//! Relation vocabulary and grouping.
//!
//! Members carry a free-text relation value; the tree view groups them by
//! mapping that value through fixed membership tables. Values outside the
//! vocabulary classify as [`RelationGroup::Unknown`] and are omitted from
//! the grouped tree (they still appear in the gallery) — this mirrors the
//! original behavior and is intentional, not an error path.

use std::fmt;

/// The display group a relation value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationGroup {
    /// The distinguished "you" record, rendered centrally.
    You,
    /// `father`, `mother`, `parent`.
    Parents,
    /// `grandfather`, `grandmother`, `grandparent`.
    Grandparents,
    /// `brother`, `sister`, `sibling`.
    Siblings,
    /// `uncle`, `aunt`.
    UnclesAunts,
    /// `cousin`.
    Cousins,
    /// `son`, `daughter`, `child`.
    Children,
    /// `spouse`, `partner`, `father-in-law`, `mother-in-law`.
    Partners,
    /// Anything outside the fixed vocabulary.
    Unknown,
}

/// Membership tables, case-sensitive on the stored value.
const PARENTS: &[&str] = &["father", "mother", "parent"];
const GRANDPARENTS: &[&str] = &["grandfather", "grandmother", "grandparent"];
const SIBLINGS: &[&str] = &["brother", "sister", "sibling"];
const UNCLES_AUNTS: &[&str] = &["uncle", "aunt"];
const COUSINS: &[&str] = &["cousin"];
const CHILDREN: &[&str] = &["son", "daughter", "child"];
const PARTNERS: &[&str] = &["spouse", "partner", "father-in-law", "mother-in-law"];

/// Grouped tree rendering order. `You` renders centrally and `Unknown` is
/// omitted, so neither appears here.
pub const GROUP_ORDER: &[RelationGroup] = &[
    RelationGroup::Parents,
    RelationGroup::Grandparents,
    RelationGroup::Siblings,
    RelationGroup::UnclesAunts,
    RelationGroup::Cousins,
    RelationGroup::Children,
    RelationGroup::Partners,
];

/// Classify a relation value into its display group.
///
/// Total and deterministic: the eight vocabularies match exactly
/// (case-sensitive), the self check alone is case-insensitive, and
/// everything else maps to [`RelationGroup::Unknown`].
#[must_use]
pub fn classify(relation: &str) -> RelationGroup {
    if relation.eq_ignore_ascii_case("you") {
        return RelationGroup::You;
    }
    if PARENTS.contains(&relation) {
        RelationGroup::Parents
    } else if GRANDPARENTS.contains(&relation) {
        RelationGroup::Grandparents
    } else if SIBLINGS.contains(&relation) {
        RelationGroup::Siblings
    } else if UNCLES_AUNTS.contains(&relation) {
        RelationGroup::UnclesAunts
    } else if COUSINS.contains(&relation) {
        RelationGroup::Cousins
    } else if CHILDREN.contains(&relation) {
        RelationGroup::Children
    } else if PARTNERS.contains(&relation) {
        RelationGroup::Partners
    } else {
        RelationGroup::Unknown
    }
}

/// Fixed relation-to-glyph table.
const EMOJI_TABLE: &[(&str, &str)] = &[
    ("you", "👤"),
    ("father", "👨"),
    ("mother", "👩"),
    ("parent", "🧑"),
    ("grandfather", "👴"),
    ("grandmother", "👵"),
    ("grandparent", "🧓"),
    ("uncle", "👨"),
    ("aunt", "👩"),
    ("brother", "👦"),
    ("sister", "👧"),
    ("sibling", "🧑"),
    ("cousin", "🧑"),
    ("son", "👦"),
    ("daughter", "👧"),
    ("child", "🧒"),
    ("spouse", "💑"),
    ("partner", "💑"),
    ("father-in-law", "👨"),
    ("mother-in-law", "👩"),
];

/// Default glyph for relations outside the table.
pub const DEFAULT_EMOJI: &str = "👤";

/// Look up the display glyph for a relation value.
///
/// Unknown values get [`DEFAULT_EMOJI`] rather than an error.
#[must_use]
pub fn emoji_for(relation: &str) -> &'static str {
    EMOJI_TABLE
        .iter()
        .find(|(r, _)| *r == relation)
        .map_or(DEFAULT_EMOJI, |&(_, glyph)| glyph)
}

impl RelationGroup {
    /// Human-readable group title as shown in the tree view.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::You => "You",
            Self::Parents => "Parents",
            Self::Grandparents => "Grandparents",
            Self::Siblings => "Siblings",
            Self::UnclesAunts => "Uncles & Aunts",
            Self::Cousins => "Cousins",
            Self::Children => "Children",
            Self::Partners => "Partners",
            Self::Unknown => "Uncategorized",
        }
    }
}

impl fmt::Display for RelationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
