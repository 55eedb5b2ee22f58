use std::{
    collections::HashSet,
    fs::{
        self,
        OpenOptions,
    },
    io::Write,
    path::{
        Path,
        PathBuf,
    },
};

use rand::{
    seq::SliceRandom,
    Rng,
};

use crate::core::{
    Config,
    ReibunError,
};

/// Parses the inline new-words block: one word per line, `#` lines and blank
/// lines skipped, anything after the first whitespace on a line discarded.
/// The result is deduplicated and shuffled with the caller's RNG so pending
/// words are not always worked through in the same order.
pub fn parse_new_words<R: Rng>(raw: &str, rng: &mut R) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .filter(|word| seen.insert(word.clone()))
        .collect();

    words.shuffle(rng);
    words
}

/// The three lifecycle files a word moves through. Pending supports removal
/// by full rewrite; done and skipped are append-only.
pub struct WordList {
    pending_path: PathBuf,
    done_path: PathBuf,
    skipped_path: PathBuf,
}

impl WordList {
    pub fn new(config: &Config) -> Self {
        Self {
            pending_path: config.pending_path.clone(),
            done_path: config.done_path.clone(),
            skipped_path: config.skipped_path.clone(),
        }
    }

    /// Raw pending lines, blanks included, exactly as stored on disk.
    pub fn load_pending(&self) -> Result<Vec<String>, ReibunError> {
        let content = fs::read_to_string(&self.pending_path)?;
        Ok(content.split('\n').map(str::to_string).collect())
    }

    pub fn append_pending(
        &self,
        new_words: &[String],
        existing: &[String],
    ) -> Result<(), ReibunError> {
        let mut file =
            OpenOptions::new().append(true).create(true).open(&self.pending_path)?;
        for word in new_words {
            if !existing.iter().any(|w| w == word) {
                println!("Adding to pending words file: {}", word);
                writeln!(file, "{}", word)?;
            }
        }
        Ok(())
    }

    /// Rewrites the pending file keeping every line whose trimmed content is
    /// not `word`, preserving relative order.
    pub fn remove_pending(&self, word: &str) -> Result<(), ReibunError> {
        let content = fs::read_to_string(&self.pending_path)?;
        let remaining: Vec<&str> = content.lines().filter(|line| line.trim() != word).collect();

        let mut output = remaining.join("\n");
        if !output.is_empty() {
            output.push('\n');
        }
        fs::write(&self.pending_path, output)?;
        Ok(())
    }

    pub fn mark_done(&self, word: &str) -> Result<(), ReibunError> {
        append_line(&self.done_path, word)
    }

    pub fn mark_skipped(&self, word: &str) -> Result<(), ReibunError> {
        append_line(&self.skipped_path, word)
    }
}

fn append_line(path: &Path, word: &str) -> Result<(), ReibunError> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    writeln!(file, "{}", word)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rand::{
        rngs::StdRng,
        SeedableRng,
    };
    use tempfile::tempdir;

    use super::*;

    fn word_list(dir: &Path) -> WordList {
        let mut config = Config::default();
        config.pending_path = dir.join("words_pending.txt");
        config.done_path = dir.join("words_done.txt");
        config.skipped_path = dir.join("words_skipped.txt");
        WordList::new(&config)
    }

    #[test]
    fn ingestion_skips_comments_and_glosses_and_dedupes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut words = parse_new_words("# comment\n\nword1 reading\nword1\nword2\n", &mut rng);

        words.sort();
        assert_eq!(words, vec!["word1".to_string(), "word2".to_string()]);
    }

    #[test]
    fn ingestion_is_a_permutation_of_the_input_set() {
        let raw = "一\n二\n三\n四\n五\n";
        let mut rng = StdRng::seed_from_u64(42);
        let mut words = parse_new_words(raw, &mut rng);

        assert_eq!(words.len(), 5);
        words.sort();
        let mut expected: Vec<String> =
            raw.lines().map(str::to_string).collect();
        expected.sort();
        assert_eq!(words, expected);
    }

    #[test]
    fn load_pending_returns_raw_lines_including_blanks() {
        let dir = tempdir().unwrap();
        let list = word_list(dir.path());
        fs::write(dir.path().join("words_pending.txt"), "a\n\nb\n").unwrap();

        let lines = list.load_pending().unwrap();
        assert_eq!(lines, vec!["a", "", "b", ""]);
    }

    #[test]
    fn append_pending_skips_words_already_present() {
        let dir = tempdir().unwrap();
        let list = word_list(dir.path());
        let path = dir.path().join("words_pending.txt");
        fs::write(&path, "word1\n").unwrap();

        let existing = list.load_pending().unwrap();
        list.append_pending(&["word1".to_string()], &existing).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "word1\n");
    }

    #[test]
    fn append_pending_adds_new_words_in_order() {
        let dir = tempdir().unwrap();
        let list = word_list(dir.path());
        let path = dir.path().join("words_pending.txt");
        fs::write(&path, "word1\n").unwrap();

        let existing = list.load_pending().unwrap();
        list.append_pending(
            &["word2".to_string(), "word1".to_string(), "word3".to_string()],
            &existing,
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "word1\nword2\nword3\n");
    }

    #[test]
    fn remove_pending_keeps_other_lines_in_order() {
        let dir = tempdir().unwrap();
        let list = word_list(dir.path());
        let path = dir.path().join("words_pending.txt");
        fs::write(&path, "a\nb\nc\n").unwrap();

        list.remove_pending("b").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nc\n");
    }

    #[test]
    fn remove_pending_matches_on_trimmed_content() {
        let dir = tempdir().unwrap();
        let list = word_list(dir.path());
        let path = dir.path().join("words_pending.txt");
        fs::write(&path, "a  \nb\n").unwrap();

        list.remove_pending("a").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "b\n");
    }

    #[test]
    fn mark_done_and_skipped_append_one_line_each() {
        let dir = tempdir().unwrap();
        let list = word_list(dir.path());

        list.mark_done("word1").unwrap();
        list.mark_done("word2").unwrap();
        list.mark_skipped("word3").unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("words_done.txt")).unwrap(),
            "word1\nword2\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("words_skipped.txt")).unwrap(),
            "word3\n"
        );
    }

    #[test]
    fn load_pending_fails_when_the_file_is_missing() {
        let dir = tempdir().unwrap();
        let list = word_list(dir.path());

        assert!(list.load_pending().is_err());
    }
}
