//! Heuristic text helpers behind the template generators.

use std::collections::HashMap;

/// Words that are long enough to pass the length filter but carry no topic.
const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "along", "among", "another", "around",
    "based", "because", "before", "being", "below", "between", "could", "during", "every",
    "further", "having", "might", "other", "others", "rather", "should", "since", "still",
    "their", "there", "these", "thing", "things", "those", "through", "under", "until",
    "using", "where", "which", "while", "within", "without", "would",
];

/// Markers that promote a sentence to a key point.
const KEY_POINT_MARKERS: &[&str] = &["important", "key", "main", "significant", "crucial", "essential"];

/// Sentences considered when looking for key points.
const KEY_POINT_SCAN: usize = 10;
/// Sentences used as key points when no marker matches.
const DEFAULT_KEY_POINTS: usize = 3;

/// Split on `". "`, dropping blank pieces.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    text.split(". ")
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

/// Truncate to at most `max_chars` characters, ending in `...` when cut.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut truncated: String = text.chars().take(max_chars - 3).collect();
    truncated.push_str("...");
    truncated
}

/// First and last sentence, or the whole text when it has three sentences or fewer.
pub(crate) fn extractive_summary(text: &str, max_chars: usize) -> String {
    let sentences = split_sentences(text);
    let summary = match sentences.as_slice() {
        [] => String::new(),
        [first, .., last] if sentences.len() > 3 => terminate(&format!("{first}. {last}")),
        short => terminate(&short.join(". ")),
    };
    truncate_chars(&summary, max_chars)
}

fn terminate(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(['.', '!', '?']) {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

/// Sentences mentioning a key-point marker, or the opening sentences when none do.
pub(crate) fn key_points(text: &str) -> Vec<String> {
    let sentences = split_sentences(text);
    let marked: Vec<String> = sentences
        .iter()
        .take(KEY_POINT_SCAN)
        .filter(|sentence| {
            let words = sentence
                .split(|c: char| !c.is_alphanumeric())
                .map(str::to_lowercase)
                .collect::<Vec<_>>();
            KEY_POINT_MARKERS
                .iter()
                .any(|marker| words.iter().any(|word| word == marker))
        })
        .map(|sentence| sentence.to_string())
        .collect();
    if !marked.is_empty() {
        return marked;
    }
    sentences
        .into_iter()
        .take(DEFAULT_KEY_POINTS)
        .map(str::to_string)
        .collect()
}

/// Candidate quiz terms with their occurrence counts.
///
/// Terms are lower-cased alphabetic words longer than four characters that
/// are not stop words, ranked by frequency, then length, then first
/// occurrence.
pub(crate) fn key_terms(content: &str, max_terms: usize) -> Vec<(String, usize)> {
    let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
    for (position, word) in content.split_whitespace().enumerate() {
        let cleaned = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if cleaned.chars().count() <= 4
            || !cleaned.chars().all(char::is_alphabetic)
            || STOP_WORDS.contains(&cleaned.as_str())
        {
            continue;
        }
        stats.entry(cleaned).or_insert((0, position)).0 += 1;
    }
    let mut ranked: Vec<(String, usize, usize)> = stats
        .into_iter()
        .map(|(term, (count, first))| (term, count, first))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
            .then_with(|| a.2.cmp(&b.2))
    });
    ranked
        .into_iter()
        .take(max_terms)
        .map(|(term, count, _)| (term, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NOTES: &str = "Cells are the basic unit of life. Mitochondria produce energy. \
        The nucleus stores genetic material. Ribosomes build proteins. \
        Membranes control transport";

    #[test]
    fn summary_keeps_first_and_last_sentence() {
        assert_eq!(
            extractive_summary(NOTES, 500),
            "Cells are the basic unit of life. Membranes control transport."
        );
    }

    #[test]
    fn short_text_is_kept_whole() {
        assert_eq!(
            extractive_summary("One idea. Two ideas.", 500),
            "One idea. Two ideas."
        );
        assert_eq!(extractive_summary("   ", 500), "");
    }

    #[test]
    fn summary_respects_max_chars() {
        let summary = extractive_summary(NOTES, 20);
        assert_eq!(summary.chars().count(), 20);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_chars("ééééé", 5), "ééééé");
        assert_eq!(truncate_chars("éééééé", 5), "éé...");
        assert_eq!(truncate_chars("abcdef", 2), "ab");
    }

    #[test]
    fn key_points_prefer_marked_sentences() {
        let text = "Intro line. The main idea is recursion. Filler here. A crucial detail is the base case";
        assert_eq!(
            key_points(text),
            vec![
                "The main idea is recursion".to_string(),
                "A crucial detail is the base case".to_string()
            ]
        );
    }

    #[test]
    fn key_points_fall_back_to_opening_sentences() {
        assert_eq!(
            key_points(NOTES),
            vec![
                "Cells are the basic unit of life".to_string(),
                "Mitochondria produce energy".to_string(),
                "The nucleus stores genetic material".to_string()
            ]
        );
    }

    #[test]
    fn key_terms_rank_by_frequency_then_length() {
        let content = "Vectors, matrices and vectors. Matrices multiply vectors; \
            eigenvalues describe matrices. Their basis spans.";
        let terms = key_terms(content, 10);
        assert_eq!(
            terms,
            vec![
                ("matrices".to_string(), 3),
                ("vectors".to_string(), 3),
                ("eigenvalues".to_string(), 1),
                ("multiply".to_string(), 1),
                ("describe".to_string(), 1),
                ("basis".to_string(), 1),
                ("spans".to_string(), 1),
            ]
        );
        assert_eq!(key_terms(content, 2).len(), 2);
    }

    #[test]
    fn key_terms_skip_short_and_non_alphabetic_words() {
        assert!(key_terms("the cat sat on 12345 mats", 10).is_empty());
    }
}
