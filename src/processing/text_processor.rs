//! Text normalization, keyword extraction and tokenization

use regex::Regex;
use std::collections::HashSet;

/// Normalizes job descriptions and resumes into a shared token alphabet.
///
/// Normalized text only ever contains `a-z`, `0-9`, `+` and spaces, so every
/// downstream regex can stay ASCII-only.
pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    keyword_regex: Regex,
    token_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let keyword_regex = Regex::new(r"[a-z]{3,}").expect("Invalid keyword regex");

        // `+` separates tokens, so "c++" and "3+" contribute nothing.
        let token_regex = Regex::new(r"[a-z0-9]{2,}").expect("Invalid token regex");

        Self {
            stop_words: ENGLISH_STOP_WORDS.iter().copied().collect(),
            keyword_regex,
            token_regex,
        }
    }

    /// Lowercase, then replace every character outside `[a-z0-9+]` with one space.
    pub fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '+' {
                    c
                } else {
                    ' '
                }
            })
            .collect()
    }

    /// Maximal runs of 3+ letters, deduplicated in first-occurrence order.
    pub fn extract_keywords(&self, normalized: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for m in self.keyword_regex.find_iter(normalized) {
            if seen.insert(m.as_str()) {
                keywords.push(m.as_str().to_string());
            }
        }

        keywords
    }

    /// Vectorizer tokens: runs of 2+ alphanumerics with English stop words removed.
    pub fn tokenize(&self, normalized: &str) -> Vec<String> {
        self.token_regex
            .find_iter(normalized)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against",
    "all", "almost", "alone", "along", "already", "also", "although", "always",
    "am", "among", "amongst", "amoungst", "amount", "an", "and", "another",
    "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being",
    "below", "beside", "besides", "between", "beyond", "bill", "both",
    "bottom", "but", "by", "call", "can", "cannot", "cant", "co", "con",
    "could", "couldnt", "cry", "de", "describe", "detail", "do", "done",
    "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone",
    "everything", "everywhere", "except", "few", "fifteen", "fifty", "fill",
    "find", "fire", "first", "five", "for", "former", "formerly", "forty",
    "found", "four", "from", "front", "full", "further", "get", "give", "go",
    "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter",
    "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed",
    "interest", "into", "is", "it", "its", "itself", "keep", "last", "latter",
    "latterly", "least", "less", "ltd", "made", "many", "may", "me",
    "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
    "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone",
    "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on",
    "once", "one", "only", "onto", "or", "other", "others", "otherwise", "our",
    "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps",
    "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side",
    "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone",
    "something", "sometime", "sometimes", "somewhere", "still", "such",
    "system", "take", "ten", "than", "that", "the", "their", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
    "third", "this", "those", "though", "three", "through", "throughout",
    "thru", "thus", "to", "together", "too", "top", "toward", "towards",
    "twelve", "twenty", "two", "un", "under", "until", "up", "upon", "us",
    "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with",
    "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_replaces_each_character() {
        let processor = TextProcessor::new();
        let normalized = processor.normalize("C++, Rust!\nSQL");

        assert_eq!(normalized, "c++  rust  sql");
    }

    #[test]
    fn test_normalize_drops_non_ascii_letters() {
        let processor = TextProcessor::new();
        assert_eq!(processor.normalize("Résumé"), "r sum ");
    }

    #[test]
    fn test_keywords_are_unique_and_long_enough() {
        let processor = TextProcessor::new();
        let normalized = processor.normalize("Go, Rust and rust; AI with 3+ years of SQL2");

        let keywords = processor.extract_keywords(&normalized);

        assert_eq!(keywords, vec!["rust", "and", "with", "years", "sql"]);
        assert!(keywords.iter().all(|k| k.len() >= 3));
    }

    #[test]
    fn test_empty_text_has_no_keywords() {
        let processor = TextProcessor::new();
        assert!(processor.extract_keywords(&processor.normalize("")).is_empty());
    }

    #[test]
    fn test_tokenization_filters_stop_words() {
        let processor = TextProcessor::new();
        let normalized = processor.normalize("Experience with Python 3 and k8s, C++");

        let tokens = processor.tokenize(&normalized);

        assert_eq!(tokens, vec!["experience", "python", "k8s"]);
        assert!(processor.tokenize("with and the").is_empty());
    }
}
