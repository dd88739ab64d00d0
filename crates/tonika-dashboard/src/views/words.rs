//! Most frequent words per sentiment (treemap data).

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tonika_core::{BatchRow, Sentiment};

/// Words kept per sentiment.
pub const TOP_WORDS: usize = 15;

/// Words ignored when counting.
pub const STOP_WORDS: &[&str] = &[
    // Russian
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она",
    "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее",
    "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "теперь", "когда",
    "даже", "ну", "вдруг", "ли", "если", "уже", "или", "ни", "быть", "был", "него", "до",
    "вас", "нибудь", "опять", "уж", "вам", "ведь", "там", "потом", "себя", "ничего", "ей",
    "может", "они", "тут", "где", "есть", "надо", "ней", "для", "мы", "тебя", "их", "чем",
    "была", "сам", "чтоб", "без", "будто", "чего", "раз", "тоже", "себе", "под", "будет",
    "ж", "тогда", "кто", "этот", "того", "потому", "этого", "какой", "совсем", "ним",
    "здесь", "этом", "один", "почти", "мой", "тем", "чтобы", "нее", "это", "при", "очень",
    // English
    "a", "an", "the", "and", "or", "but", "is", "are", "was", "were", "be", "been", "to",
    "of", "in", "on", "at", "for", "with", "it", "this", "that", "i", "you", "he", "she",
    "we", "they", "my", "your", "so", "not", "no", "do", "does", "did", "have", "has",
    "had", "me", "as", "by", "from", "if", "then", "there", "very",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassWords {
    pub sentiment: Sentiment,
    pub words: Vec<WordCount>,
}

/// Top `n` words of each sentiment present in `rows`, counted per class.
///
/// Messages are lowercased and split on whitespace; stop words are dropped.
/// Ties are broken alphabetically.
pub fn top_words(rows: &[BatchRow], n: usize) -> Vec<ClassWords> {
    let stop_words: HashSet<&str> = STOP_WORDS.iter().copied().collect();

    Sentiment::ALL
        .iter()
        .filter(|&&sentiment| rows.iter().any(|r| r.sentiment == sentiment))
        .map(|&sentiment| {
            let mut counts: HashMap<String, usize> = HashMap::new();
            for message in rows
                .iter()
                .filter(|r| r.sentiment == sentiment)
                .filter_map(BatchRow::message)
            {
                for word in message.to_lowercase().split_whitespace() {
                    if !stop_words.contains(word) {
                        *counts.entry(word.to_string()).or_default() += 1;
                    }
                }
            }

            let mut words: Vec<WordCount> = counts
                .into_iter()
                .map(|(word, count)| WordCount { word, count })
                .collect();
            words.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
            words.truncate(n);

            ClassWords { sentiment, words }
        })
        .collect()
}
