//! Formal given names and their common informal forms.

use std::collections::{BTreeMap, BTreeSet};

/// Built-in formal → informal given-name pairs (lowercase).
pub const NICKNAMES: &[(&str, &[&str])] = &[
    ("abigail", &["abby", "gail"]),
    ("alexander", &["alex", "sasha", "xander"]),
    ("alexandra", &["alex", "sasha", "lexi"]),
    ("andrew", &["andy", "drew"]),
    ("anthony", &["tony"]),
    ("benjamin", &["ben", "benny"]),
    ("catherine", &["cathy", "cate", "kate", "katie"]),
    ("charles", &["charlie", "chuck", "chas"]),
    ("christine", &["chris", "christy"]),
    ("christopher", &["chris", "kit"]),
    ("daniel", &["dan", "danny"]),
    ("david", &["dave", "davey"]),
    ("deborah", &["deb", "debbie"]),
    ("donald", &["don", "donnie"]),
    ("dorothy", &["dot", "dottie"]),
    ("douglas", &["doug"]),
    ("edward", &["ed", "eddie", "ted", "ned"]),
    ("elizabeth", &["liz", "beth", "lizzie", "betty", "eliza"]),
    ("eugene", &["gene"]),
    ("francis", &["frank", "fran"]),
    ("frederick", &["fred", "freddie"]),
    ("gerald", &["gerry", "jerry"]),
    ("gregory", &["greg"]),
    ("henry", &["hank", "harry"]),
    ("james", &["jim", "jimmy", "jamie"]),
    ("jennifer", &["jen", "jenny"]),
    ("jessica", &["jess", "jessie"]),
    ("john", &["jack", "johnny", "jon"]),
    ("jonathan", &["jon", "jonny"]),
    ("joseph", &["joe", "joey"]),
    ("joshua", &["josh"]),
    ("katherine", &["kate", "kathy", "katie", "kat"]),
    ("kenneth", &["ken", "kenny"]),
    ("lawrence", &["larry"]),
    ("leonard", &["leo", "len"]),
    ("margaret", &["maggie", "meg", "peggy", "marge"]),
    ("matthew", &["matt"]),
    ("michael", &["mike", "mikey", "mick"]),
    ("nathaniel", &["nate"]),
    ("nicholas", &["nick", "nicky"]),
    ("patricia", &["pat", "patty", "trish"]),
    ("peter", &["pete"]),
    ("philip", &["phil"]),
    ("phillip", &["phil"]),
    ("raymond", &["ray"]),
    ("rebecca", &["becky", "becca"]),
    ("richard", &["rick", "dick", "rich", "ricky"]),
    ("robert", &["bob", "rob", "bobby", "robbie", "bert"]),
    ("ronald", &["ron", "ronnie"]),
    ("samantha", &["sam"]),
    ("samuel", &["sam", "sammy"]),
    ("stephen", &["steve"]),
    ("steven", &["steve"]),
    ("susan", &["sue", "susie"]),
    ("theodore", &["ted", "theo"]),
    ("thomas", &["tom", "tommy"]),
    ("timothy", &["tim"]),
    ("victoria", &["vicky", "tori"]),
    ("william", &["bill", "will", "billy", "willy", "liam"]),
    ("zachary", &["zach"]),
];

/// Nickname lookup: the built-in table plus configured additions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NicknameTable {
    extra: BTreeMap<String, BTreeSet<String>>,
}

impl NicknameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register informal forms for a formal name. Entries are lowercased and
    /// trimmed; blank ones are ignored.
    pub fn insert<I, S>(&mut self, formal: &str, nicknames: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let formal = formal.trim().to_lowercase();
        if formal.is_empty() {
            return;
        }
        let entry = self.extra.entry(formal).or_default();
        entry.extend(
            nicknames
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty()),
        );
    }

    /// True if `informal` is a listed nickname of `formal`.
    pub fn is_nickname_of(&self, formal: &str, informal: &str) -> bool {
        NICKNAMES
            .iter()
            .any(|(name, nicks)| *name == formal && nicks.contains(&informal))
            || self
                .extra
                .get(formal)
                .is_some_and(|nicks| nicks.contains(informal))
    }

    /// True if either name is a nickname of the other.
    pub fn are_equivalent(&self, a: &str, b: &str) -> bool {
        self.is_nickname_of(a, b) || self.is_nickname_of(b, a)
    }
}
