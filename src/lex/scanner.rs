//! Turns one file's source text into a stream of tokens, stripping
//! comments and normalizing string/char literals to a placeholder id.
//!
//! The FSM here mirrors the comment/string tracking style used elsewhere
//! in this codebase for line classification, generalized to emit tokens
//! instead of counting lines: a small state machine walks the source one
//! character at a time, switching between normal code, line comments,
//! (possibly nested) block comments, pragmas, and string/char literals.

use super::interner::{Interner, STRING_LITERAL_ID};
use super::language::LanguageSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrKind {
    Double,
    Single,
    TripleDouble,
    TripleSingle,
}

impl StrKind {
    fn closer(self) -> &'static str {
        match self {
            StrKind::Double => "\"",
            StrKind::Single => "'",
            StrKind::TripleDouble => "\"\"\"",
            StrKind::TripleSingle => "'''",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    LineComment,
    BlockComment(u32),
    Pragma,
    InString(StrKind),
}

/// One scanned token: an interned id, the `may-start-run` classification,
/// and the 1-based source line it started on (for excerpt recovery).
#[derive(Debug, Clone, Copy)]
pub struct ScannedToken {
    pub id: u32,
    pub may_start_run: bool,
    pub line: u32,
}

fn starts_with_at(chars: &[char], pos: usize, marker: &str) -> bool {
    let marker: Vec<char> = marker.chars().collect();
    if pos + marker.len() > chars.len() {
        return false;
    }
    chars[pos..pos + marker.len()] == marker[..]
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Scan `source` under `lang` (or generic word/punctuation rules if `lang`
/// is `None`), interning lexemes through `interner`.
pub fn scan(source: &str, lang: Option<&LanguageSpec>, interner: &mut Interner) -> Vec<ScannedToken> {
    let chars: Vec<char> = source.chars().collect();
    let mut out = Vec::new();
    let mut pos = 0usize;
    let mut line = 1u32;
    let mut state = State::Normal;

    while pos < chars.len() {
        let c = chars[pos];

        match state {
            State::Normal => {
                if let Some(lang) = lang {
                    if let Some((open, _)) = lang.pragma {
                        if starts_with_at(&chars, pos, open) {
                            state = State::Pragma;
                            pos += open.chars().count();
                            continue;
                        }
                    }
                    if let Some((open, _)) = lang.block_comment {
                        if starts_with_at(&chars, pos, open) {
                            state = State::BlockComment(1);
                            pos += open.chars().count();
                            continue;
                        }
                    }
                    if lang.line_comments.iter().any(|m| starts_with_at(&chars, pos, m)) {
                        let marker = lang.line_comments.iter().find(|m| starts_with_at(&chars, pos, m)).unwrap();
                        let next = chars.get(pos + marker.chars().count()).copied();
                        let blocked = next.is_some_and(|nc| lang.line_comment_not_before.contains(nc));
                        if !blocked {
                            state = State::LineComment;
                            pos += marker.chars().count();
                            continue;
                        }
                    }
                    if lang.triple_quote_strings && starts_with_at(&chars, pos, "\"\"\"") {
                        state = State::InString(StrKind::TripleDouble);
                        pos += 3;
                        continue;
                    }
                    if lang.triple_quote_strings && starts_with_at(&chars, pos, "'''") {
                        state = State::InString(StrKind::TripleSingle);
                        pos += 3;
                        continue;
                    }
                    if c == '"' {
                        state = State::InString(StrKind::Double);
                        pos += 1;
                        continue;
                    }
                    if lang.single_quote_strings && c == '\'' {
                        state = State::InString(StrKind::Single);
                        pos += 1;
                        continue;
                    }
                } else if c == '"' {
                    state = State::InString(StrKind::Double);
                    pos += 1;
                    continue;
                }

                if c == '\n' {
                    line += 1;
                    pos += 1;
                } else if c.is_whitespace() {
                    pos += 1;
                } else if is_word_char(c) {
                    let start = pos;
                    while pos < chars.len() && is_word_char(chars[pos]) {
                        pos += 1;
                    }
                    let text: String = chars[start..pos].iter().collect();
                    out.push(ScannedToken { id: interner.word(&text), may_start_run: true, line });
                } else {
                    out.push(ScannedToken { id: interner.punct(c), may_start_run: false, line });
                    pos += 1;
                }
            }

            State::LineComment => {
                if c == '\n' {
                    state = State::Normal;
                } else {
                    pos += 1;
                }
            }

            State::BlockComment(depth) => {
                let lang = lang.expect("BlockComment state requires a language spec");
                let (open, close) = lang.block_comment.expect("language must define block comment");
                if lang.nested_block_comments && starts_with_at(&chars, pos, open) {
                    state = State::BlockComment(depth + 1);
                    pos += open.chars().count();
                } else if starts_with_at(&chars, pos, close) {
                    pos += close.chars().count();
                    state = if depth <= 1 { State::Normal } else { State::BlockComment(depth - 1) };
                } else if c == '\n' {
                    line += 1;
                    pos += 1;
                } else {
                    pos += 1;
                }
            }

            State::Pragma => {
                let lang = lang.expect("Pragma state requires a language spec");
                let (_, close) = lang.pragma.expect("language must define pragma");
                if starts_with_at(&chars, pos, close) {
                    pos += close.chars().count();
                    state = State::Normal;
                } else if c == '\n' {
                    line += 1;
                    pos += 1;
                } else {
                    pos += 1;
                }
            }

            State::InString(kind) => {
                if c == '\\' && pos + 1 < chars.len() && kind != StrKind::TripleDouble && kind != StrKind::TripleSingle {
                    pos += 2;
                } else if starts_with_at(&chars, pos, kind.closer()) {
                    pos += kind.closer().chars().count();
                    out.push(ScannedToken { id: STRING_LITERAL_ID, may_start_run: true, line });
                    state = State::Normal;
                } else if c == '\n' {
                    line += 1;
                    pos += 1;
                    if kind == StrKind::Single || kind == StrKind::Double {
                        // unterminated single-line literal: treat the
                        // newline as closing it, matching how most of
                        // these languages actually behave.
                        out.push(ScannedToken { id: STRING_LITERAL_ID, may_start_run: true, line: line - 1 });
                        state = State::Normal;
                    }
                } else {
                    pos += 1;
                }
            }
        }
    }

    // Anything still open at EOF (unterminated literal) is flushed as a
    // literal token rather than silently dropped.
    if matches!(state, State::InString(_)) {
        out.push(ScannedToken { id: STRING_LITERAL_ID, may_start_run: true, line });
    }

    out
}
