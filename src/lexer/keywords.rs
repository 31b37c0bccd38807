//! Keyword and operator spelling tables.
//!
//! Every keyword has a native Devanagari spelling and one or more romanized
//! spellings. Operators additionally have uppercase mnemonic names
//! (`YOGA` for `+`, `SAMA` for `==`, ...). Lookup tries the tables in that
//! order and the first hit wins; anything else is a plain identifier.
//!
//! Lookup is case-sensitive: `YOGA` is addition, `yoga` is a name.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::TokenKind;

/// Devanagari keyword spellings.
const NATIVE: &[(&str, TokenKind)] = &[
    ("कार्य", TokenKind::Function),
    ("वर्ग", TokenKind::Class),
    ("यदि", TokenKind::If),
    ("अन्यथा", TokenKind::Else),
    ("प्रयास", TokenKind::Try),
    ("पकड़ो", TokenKind::Catch),
    ("अंततः", TokenKind::Finally),
    ("लौटाओ", TokenKind::Return),
    ("स्थिर", TokenKind::Const),
    ("चर", TokenKind::Let),
    ("असमकालिक", TokenKind::Async),
    ("प्रतीक्षा", TokenKind::Await),
    ("मिलान", TokenKind::Match),
    ("अन्य", TokenKind::Default),
    ("सत्य", TokenKind::True),
    ("असत्य", TokenKind::False),
    ("शून्य", TokenKind::Null),
];

/// Romanized keyword spellings, transliterated and English.
const ROMANIZED: &[(&str, TokenKind)] = &[
    ("karya", TokenKind::Function),
    ("function", TokenKind::Function),
    ("varga", TokenKind::Class),
    ("class", TokenKind::Class),
    ("yadi", TokenKind::If),
    ("if", TokenKind::If),
    ("anyatha", TokenKind::Else),
    ("else", TokenKind::Else),
    ("prayas", TokenKind::Try),
    ("try", TokenKind::Try),
    ("pakdo", TokenKind::Catch),
    ("catch", TokenKind::Catch),
    ("antatah", TokenKind::Finally),
    ("finally", TokenKind::Finally),
    ("lautao", TokenKind::Return),
    ("return", TokenKind::Return),
    ("sthir", TokenKind::Const),
    ("const", TokenKind::Const),
    ("char", TokenKind::Let),
    ("let", TokenKind::Let),
    ("var", TokenKind::Let),
    ("asamakalik", TokenKind::Async),
    ("async", TokenKind::Async),
    ("pratiksha", TokenKind::Await),
    ("await", TokenKind::Await),
    ("milan", TokenKind::Match),
    ("match", TokenKind::Match),
    ("anya", TokenKind::Default),
    ("default", TokenKind::Default),
    ("satya", TokenKind::True),
    ("true", TokenKind::True),
    ("asatya", TokenKind::False),
    ("false", TokenKind::False),
    ("shunya", TokenKind::Null),
    ("null", TokenKind::Null),
];

/// Uppercase operator mnemonics.
const SYMBOLIC: &[(&str, TokenKind)] = &[
    ("YOGA", TokenKind::Plus),
    ("VIYOGA", TokenKind::Minus),
    ("GUNA", TokenKind::Star),
    ("BHAGA", TokenKind::Slash),
    ("SHESHA", TokenKind::Percent),
    ("SAMA", TokenKind::EqualEqual),
    ("ASAMA", TokenKind::BangEqual),
    ("LAGHU", TokenKind::Less),
    ("LAGHUSAMA", TokenKind::LessEqual),
    ("ADHIKA", TokenKind::Greater),
    ("ADHIKASAMA", TokenKind::GreaterEqual),
    ("CHA", TokenKind::AndAnd),
    ("VA", TokenKind::OrOr),
    ("NA", TokenKind::Bang),
];

/// Which table a spelling was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Native,
    Romanized,
    Symbolic,
}

type Table = HashMap<&'static str, TokenKind>;

static TABLES: LazyLock<[(Script, Table); 3]> = LazyLock::new(|| {
    [
        (Script::Native, NATIVE.iter().copied().collect()),
        (Script::Romanized, ROMANIZED.iter().copied().collect()),
        (Script::Symbolic, SYMBOLIC.iter().copied().collect()),
    ]
});

/// Looks up a word in the three tables, in priority order.
///
/// # Example
///
/// ```
/// use dvibhasha::lexer::{lookup_keyword, TokenKind};
///
/// assert_eq!(lookup_keyword("karya"), Some(TokenKind::Function));
/// assert_eq!(lookup_keyword("कार्य"), Some(TokenKind::Function));
/// assert_eq!(lookup_keyword("YOGA"), Some(TokenKind::Plus));
/// assert_eq!(lookup_keyword("yoga"), None);
/// ```
pub fn lookup_keyword(word: &str) -> Option<TokenKind> {
    lookup_with_script(word).map(|(_, kind)| kind)
}

/// Like [`lookup_keyword`], but also reports which table matched.
pub fn lookup_with_script(word: &str) -> Option<(Script, TokenKind)> {
    TABLES
        .iter()
        .find_map(|(script, table)| table.get(word).map(|kind| (*script, *kind)))
}

/// All spellings of a canonical kind, native first.
///
/// Used by tooling to show alternative spellings on hover.
pub fn spellings_of(kind: TokenKind) -> Vec<&'static str> {
    NATIVE
        .iter()
        .chain(ROMANIZED)
        .chain(SYMBOLIC)
        .filter(|(_, k)| *k == kind)
        .map(|(word, _)| *word)
        .collect()
}
