use std::{
    io::{
        BufRead,
        Write,
    },
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use tokio::runtime::Runtime;

use crate::{
    anki::NoteSink,
    core::{
        Config,
        Flashcard,
        ReibunError,
    },
    llm::CardSource,
    review::review_word,
    words::WordList,
};

/// Holds the single look-ahead request. `submit` fills the slot, `take`
/// drains it; the session loop alternates the two so at most one network
/// call is in flight at any time.
pub struct Prefetcher {
    runtime: Arc<Runtime>,
    source: Arc<dyn CardSource>,
    slot: Option<mpsc::Receiver<Result<Vec<Flashcard>, ReibunError>>>,
}

impl Prefetcher {
    pub fn new(runtime: Arc<Runtime>, source: Arc<dyn CardSource>) -> Self {
        Self { runtime, source, slot: None }
    }

    /// Kicks off the request for `word` on a worker thread and parks the
    /// result channel in the look-ahead slot.
    pub fn submit(&mut self, word: &str) {
        let (sender, receiver) = mpsc::channel();
        let runtime = self.runtime.clone();
        let source = self.source.clone();
        let word = word.to_string();

        thread::spawn(move || {
            let result = runtime.block_on(source.fetch(&word));
            let _ = sender.send(result);
        });

        self.slot = Some(receiver);
    }

    /// Blocks until the in-flight request finishes and empties the slot.
    /// Returns None if nothing was submitted since the last take.
    pub fn take(&mut self) -> Option<Result<Vec<Flashcard>, ReibunError>> {
        self.slot.take().map(|receiver| {
            receiver.recv().unwrap_or_else(|_| {
                Err(ReibunError::Custom("prefetch worker disconnected".to_string()))
            })
        })
    }
}

/// Walks the pending words, always submitting the next word's request
/// before the current word's review starts, so the user only ever waits on
/// the network for the first word.
pub fn run_session<R: BufRead, W: Write>(
    words: &[String],
    prefetcher: &mut Prefetcher,
    config: &Config,
    sink: &mut dyn NoteSink,
    store: &WordList,
    input: &mut R,
    output: &mut W,
) -> Result<(), ReibunError> {
    if words.is_empty() {
        return Ok(());
    }

    prefetcher.submit(&words[0]);

    for i in 0..words.len() {
        let cards = prefetcher
            .take()
            .ok_or_else(|| ReibunError::Custom("look-ahead slot was empty".to_string()))??;

        if i + 1 < words.len() {
            prefetcher.submit(&words[i + 1]);
        }

        review_word(&words[i], &cards, config, sink, store, input, output)?;
    }

    Ok(())
}
