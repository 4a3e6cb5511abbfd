use pretty_assertions::assert_eq;
use script_narrator::domain::segment::{segment, split_for_transport, DEFAULT_MAX_UNIT_LENGTH};

const SAMPLE_SCRIPTS: &[&str] = &[
    "",
    "One line.",
    "Para one, short.\n\nPara two, short.",
    "Welcome to the show! Today we talk about Rust. Why? Because it is fun.\n\n\n\nSecond segment starts here... and continues for a while; it has clauses, commas, and more.",
    "   leading and trailing whitespace   \n\n   \n\n  another paragraph  ",
    "No terminal punctuation at all in this paragraph but it keeps going and going",
    "Ünïcödé text. Ça va? Très bien!\n\nПривет мир. こんにちは。",
];

fn tokens(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[test]
fn it_should_never_emit_empty_units_and_keep_indices_dense() {
    for script in SAMPLE_SCRIPTS {
        for max in [1, 10, 50, DEFAULT_MAX_UNIT_LENGTH] {
            let units = segment(script, max);
            for (expected, unit) in units.iter().enumerate() {
                assert_eq!(unit.sequence_index, expected);
                assert!(!unit.content.trim().is_empty());
            }
        }
    }
}

#[test]
fn it_should_return_trimmed_input_when_short_and_single_paragraph() {
    let script = "  A short script without blank lines.\nIt has a soft line break.  ";
    let units = segment(script, DEFAULT_MAX_UNIT_LENGTH);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].content, script.trim());
}

#[test]
fn it_should_preserve_word_order_across_units() {
    for script in SAMPLE_SCRIPTS {
        for max in [1, 10, 50, DEFAULT_MAX_UNIT_LENGTH] {
            let joined = segment(script, max)
                .into_iter()
                .map(|unit| unit.content)
                .collect::<Vec<_>>()
                .join(" ");
            assert_eq!(tokens(&joined), tokens(script), "max={}", max);
        }
    }
}

#[test]
fn it_should_split_scenario_paragraphs() {
    let units = segment("Para one, short.\n\nPara two, short.", 600);
    let contents: Vec<String> = units.into_iter().map(|unit| unit.content).collect();
    assert_eq!(contents, vec!["Para one, short.", "Para two, short."]);
}

#[test]
fn it_should_keep_a_5000_char_sentence_as_one_oversized_unit() {
    let mut sentence = "narration ".repeat(500);
    sentence.truncate(4999);
    sentence.push('.');
    assert_eq!(sentence.chars().count(), 5000);

    let units = segment(&sentence, 600);
    assert_eq!(units.len(), 1);
    assert!(units[0].content.chars().count() > 600);
}

#[test]
fn it_should_bound_every_transport_piece() {
    let mut sentence = "narration, ".repeat(500);
    sentence.push('.');

    for limit in [1, 7, 100, 2000] {
        let pieces = split_for_transport(&sentence, limit);
        assert!(!pieces.is_empty());
        for piece in &pieces {
            assert!(!piece.trim().is_empty());
            assert!(piece.chars().count() <= limit, "limit={} piece={:?}", limit, piece);
        }
    }
}
