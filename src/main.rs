use std::{
    io,
    sync::Arc,
};

use tokio::runtime::Runtime;

use reibun::{
    anki::AnkiState,
    core::{
        pipeline::{
            run_session,
            Prefetcher,
        },
        Config,
        ReibunError,
    },
    llm::FlashcardRequester,
    words::{
        parse_new_words,
        WordList,
    },
};

// New words to create flashcards for, one per line. Lines beginning with # are
// comments and will be ignored. Blank lines are also ignored, as is anything
// following a separating whitespace character on a line. These words will be
// de-duped and added to the pending words file in random order when the tool
// runs.
const NEW_WORDS: &str = "
";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ReibunError> {
    let config = Config::load();

    let runtime = Arc::new(Runtime::new()?);
    let mut anki = AnkiState::connect(runtime.clone(), &config)?;
    let requester = Arc::new(FlashcardRequester::new(&config)?);

    let word_list = WordList::new(&config);

    let new_words = parse_new_words(NEW_WORDS, &mut rand::rng());
    let mut pending = word_list.load_pending()?;
    if !new_words.is_empty() {
        word_list.append_pending(&new_words, &pending)?;
        pending = word_list.load_pending()?;
    }

    let queue: Vec<String> = pending
        .iter()
        .map(|word| word.trim())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect();
    if queue.is_empty() {
        println!("No words to process.");
        return Ok(());
    }

    let mut prefetcher = Prefetcher::new(runtime, requester);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    run_session(
        &queue,
        &mut prefetcher,
        &config,
        &mut anki,
        &word_list,
        &mut input,
        &mut output,
    )
}
