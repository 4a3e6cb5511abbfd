use super::model::TextUnit;
use once_cell::sync::Lazy;
use regex::Regex;

/// Blank-line paragraph separator (a newline, optional whitespace, another newline)
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern is valid"));

/// Sentence-terminal punctuation followed by whitespace or end of text
static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("sentence pattern is valid"));

/// Clause punctuation used when a sentence alone is over the transport limit
static CLAUSE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;:]\s+").expect("clause pattern is valid"));

/// Split a script into ordered, bounded-length units.
///
/// Paragraphs (blank-line separated) that fit in `max_unit_length` are emitted
/// as they are. Longer paragraphs are re-split on sentence boundaries and the
/// sentences greedily packed. A single sentence longer than the limit is kept
/// whole as its own unit.
///
/// Total: an empty or whitespace-only script yields no units.
pub fn segment(text: &str, max_unit_length: usize) -> Vec<TextUnit> {
    let mut contents: Vec<String> = Vec::new();

    for paragraph in PARAGRAPH_BREAK.split(text) {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        if char_len(paragraph) <= max_unit_length {
            contents.push(paragraph.to_string());
        } else {
            contents.extend(pack(split_sentences(paragraph), max_unit_length));
        }
    }

    contents
        .into_iter()
        .enumerate()
        .map(|(index, content)| TextUnit::new(index, content))
        .collect()
}

/// Re-split already formed unit text so every piece fits the backend's
/// request-size ceiling.
///
/// Boundaries are tried from coarse to fine: sentences, then clause
/// punctuation (commas, semicolons, colons), then words. A single word longer
/// than the limit is cut on character boundaries. Every returned piece is
/// non-empty and at most `transport_limit` characters.
pub fn split_for_transport(text: &str, transport_limit: usize) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if char_len(text) <= transport_limit {
        return vec![text.to_string()];
    }

    let fragments = fragments_within(text, transport_limit, Boundary::Sentence);
    pack(fragments, transport_limit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Sentence,
    Clause,
    Word,
    Character,
}

impl Boundary {
    fn finer(self) -> Self {
        match self {
            Boundary::Sentence => Boundary::Clause,
            Boundary::Clause => Boundary::Word,
            Boundary::Word | Boundary::Character => Boundary::Character,
        }
    }
}

fn fragments_within(text: &str, limit: usize, boundary: Boundary) -> Vec<String> {
    let pieces = match boundary {
        Boundary::Sentence => split_sentences(text),
        Boundary::Clause => split_keeping_delimiter(&CLAUSE_END, text),
        Boundary::Word => text.split_whitespace().map(str::to_string).collect(),
        Boundary::Character => hard_split(text, limit),
    };

    let mut fragments = Vec::with_capacity(pieces.len());
    for piece in pieces {
        if boundary == Boundary::Character || char_len(&piece) <= limit {
            fragments.push(piece);
        } else {
            fragments.extend(fragments_within(&piece, limit, boundary.finer()));
        }
    }
    fragments
}

fn split_sentences(text: &str) -> Vec<String> {
    split_keeping_delimiter(&SENTENCE_END, text)
}

/// Split after every match of `pattern`, keeping the punctuation with the
/// preceding piece. Pieces are trimmed and empty pieces dropped.
fn split_keeping_delimiter(pattern: &Regex, text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut last_end = 0;

    for mat in pattern.find_iter(text) {
        let piece = text[last_end..mat.end()].trim();
        if !piece.is_empty() {
            pieces.push(piece.to_string());
        }
        last_end = mat.end();
    }

    let remaining = text[last_end..].trim();
    if !remaining.is_empty() {
        pieces.push(remaining.to_string());
    }

    pieces
}

fn hard_split(text: &str, limit: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(limit.max(1))
        .map(|chunk| chunk.iter().collect::<String>())
        .filter(|piece| !piece.trim().is_empty())
        .collect()
}

/// Greedily join pieces with a single space, flushing whenever the next piece
/// would push the accumulator past `limit`. A piece already over the limit
/// becomes its own entry.
fn pack(pieces: Vec<String>, limit: usize) -> Vec<String> {
    let mut packed = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for piece in pieces {
        let piece_len = char_len(&piece);

        if !current.is_empty() && current_len + 1 + piece_len > limit {
            packed.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current.is_empty() {
            current = piece;
            current_len = piece_len;
        } else {
            current.push(' ');
            current.push_str(&piece);
            current_len += 1 + piece_len;
        }
    }

    if !current.is_empty() {
        packed.push(current);
    }

    packed
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
