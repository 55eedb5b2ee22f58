use std::{
    collections::HashMap,
    io::{
        BufRead,
        Write,
    },
};

use crate::{
    anki::NoteSink,
    core::{
        CardStyle,
        Config,
        Flashcard,
        ReibunError,
    },
    words::WordList,
};

/// Outcome of parsing one selection line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Skip,
    Keep(Vec<usize>),
}

/// Validates a compact selection string against the candidate count. Every
/// character must be a digit naming an existing candidate, with no repeats;
/// the first offending character is returned as the error. Empty input
/// means skip.
pub fn parse_selection(input: &str, card_count: usize) -> Result<Selection, char> {
    if input.is_empty() {
        return Ok(Selection::Skip);
    }

    let mut picks = Vec::new();
    for c in input.chars() {
        let digit = match c.to_digit(10) {
            Some(d) if d >= 1 && d as usize <= card_count => d as usize,
            _ => return Err(c),
        };
        if picks.contains(&digit) {
            return Err(c);
        }
        picks.push(digit);
    }

    Ok(Selection::Keep(picks))
}

/// Field name -> text mapping for one candidate, using the configured
/// fields for the word's card style.
pub fn note_fields(config: &Config, style: CardStyle, card: &Flashcard) -> HashMap<String, String> {
    let mapping = match style {
        CardStyle::Basic => &config.basic_fields,
        CardStyle::Cloze => &config.cloze_fields,
    };

    HashMap::from([
        (mapping.sentence_field.clone(), card.example_sentence.clone()),
        (mapping.english_field.clone(), card.english.clone()),
    ])
}

/// Shows a word's candidates and loops on user input until a valid
/// selection decides the word's fate. File and collection writes happen
/// only after the whole selection string has validated; the pending entry
/// is removed only after its done/skipped record is written.
pub fn review_word<R: BufRead, W: Write>(
    word: &str,
    cards: &[Flashcard],
    config: &Config,
    sink: &mut dyn NoteSink,
    words: &WordList,
    input: &mut R,
    output: &mut W,
) -> Result<(), ReibunError> {
    writeln!(output, "Flashcard options: {}\n", word)?;
    for (i, card) in cards.iter().enumerate() {
        writeln!(output, "{}   {}", i + 1, card.example_sentence)?;
        writeln!(output, "    {}\n", card.english)?;
    }

    loop {
        writeln!(
            output,
            "Enter \"1\" to keep the first card, \"2\" to keep the second, \"13\" to keep the \
             first and third, etc. Blank to skip this word without creating any cards."
        )?;
        write!(output, "Flashcards to keep: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(ReibunError::Custom("input stream closed".to_string()));
        }
        let selection = line.trim_end_matches(['\r', '\n']);

        match parse_selection(selection, cards.len()) {
            Err(c) => {
                writeln!(output, "Invalid input: {}", c)?;
            }
            Ok(Selection::Skip) => {
                words.mark_skipped(word)?;
                words.remove_pending(word)?;
                return Ok(());
            }
            Ok(Selection::Keep(picks)) => {
                let style = CardStyle::of(word);
                for pick in picks {
                    writeln!(output, "Creating flashcard: [{}] {}", pick, word)?;
                    sink.create_note(style, note_fields(config, style, &cards[pick - 1]))?;
                }
                words.mark_done(word)?;
                words.remove_pending(word)?;
                return Ok(());
            }
        }
    }
}
