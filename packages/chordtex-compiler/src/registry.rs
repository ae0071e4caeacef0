//! # Command Registry
//!
//! The fixed table of keywords a song file may use before a `:`, what kind of
//! command each one is, and which markup directive it is emitted as.
//!
//! | keyword   | kind      | directive  |
//! |-----------|-----------|------------|
//! | title     | attribute | songtitle  |
//! | by        | attribute | by         |
//! | comment   | attribute | comment    |
//! | capo      | attribute | capo       |
//! | scripture | attribute | scripture  |
//! | order     | attribute | order      |
//! | format    | attribute | songformat |
//! | verse     | stanza    | verse      |
//! | chorus    | stanza    | chorus     |
//! | prechorus | stanza    | prechorus  |
//! | bridge    | stanza    | bridge     |
//! | intro     | stanza    | intro      |
//! | outro     | stanza    | outro      |
//! | tag       | stanza    | tag        |
//! | break     | stanza    | songbreak  |

use std::fmt;

/// Whether a command is a single-line attribute or opens a stanza.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Attribute,
    Stanza,
}

/// Every keyword the registry recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    Title,
    By,
    Comment,
    Capo,
    Scripture,
    Order,
    Format,
    Verse,
    Chorus,
    Prechorus,
    Bridge,
    Intro,
    Outro,
    Tag,
    Break,
}

/// keyword, name, kind, directive
const REGISTRY: &[(Keyword, &str, CommandKind, &str)] = &[
    (Keyword::Title, "title", CommandKind::Attribute, "songtitle"),
    (Keyword::By, "by", CommandKind::Attribute, "by"),
    (Keyword::Comment, "comment", CommandKind::Attribute, "comment"),
    (Keyword::Capo, "capo", CommandKind::Attribute, "capo"),
    (Keyword::Scripture, "scripture", CommandKind::Attribute, "scripture"),
    (Keyword::Order, "order", CommandKind::Attribute, "order"),
    (Keyword::Format, "format", CommandKind::Attribute, "songformat"),
    (Keyword::Verse, "verse", CommandKind::Stanza, "verse"),
    (Keyword::Chorus, "chorus", CommandKind::Stanza, "chorus"),
    (Keyword::Prechorus, "prechorus", CommandKind::Stanza, "prechorus"),
    (Keyword::Bridge, "bridge", CommandKind::Stanza, "bridge"),
    (Keyword::Intro, "intro", CommandKind::Stanza, "intro"),
    (Keyword::Outro, "outro", CommandKind::Stanza, "outro"),
    (Keyword::Tag, "tag", CommandKind::Stanza, "tag"),
    (Keyword::Break, "break", CommandKind::Stanza, "songbreak"),
];

impl Keyword {
    /// Look up a keyword by name. Matching ignores ASCII case.
    pub fn lookup(name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(_, n, _, _)| n.eq_ignore_ascii_case(name))
            .map(|(keyword, _, _, _)| *keyword)
    }

    fn entry(self) -> &'static (Keyword, &'static str, CommandKind, &'static str) {
        // rows are declared in variant order
        &REGISTRY[self as usize]
    }

    /// The keyword as written in a song file.
    pub fn name(self) -> &'static str {
        self.entry().1
    }

    pub fn kind(self) -> CommandKind {
        self.entry().2
    }

    /// Output directive name, e.g. `songtitle` for `title`.
    pub fn directive(self) -> &'static str {
        self.entry().3
    }

    pub fn is_stanza(self) -> bool {
        self.kind() == CommandKind::Stanza
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
