/// Tweet parsing — CSV column extraction and cleanup into training sequences.

use regex::Regex;
use std::io::BufRead;
use std::sync::OnceLock;

use super::files::lines;
use super::TextError;

/// Characters that end a sentence.
pub const PUNCTUATION: &[char] = &['.', '?', '!', ';'];

/// Replace every sentence-ending character with a period.
pub fn replace_punctuation(tweet: &str) -> String {
    tweet
        .chars()
        .map(|c| if PUNCTUATION.contains(&c) { '.' } else { c })
        .collect()
}

/// Split a tweet into trimmed, non-empty sentences without their punctuation.
pub fn tweet_split(tweet: &str) -> Vec<String> {
    replace_punctuation(tweet)
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// The zero-indexed comma-separated column of `line`, if it exists.
///
/// Column contents are assumed not to contain commas.
pub fn extract_column(line: &str, column: usize) -> Option<&str> {
    line.split(',').nth(column)
}

/// Every tweet in `column` of the CSV data, skipping lines without that column.
pub fn csv_to_tweets<R: BufRead>(reader: R, column: usize) -> Result<Vec<String>, TextError> {
    let mut tweets = Vec::new();
    for line in lines(reader) {
        let line = line?;
        if let Some(tweet) = extract_column(&line, column) {
            tweets.push(tweet.to_string());
        }
    }
    Ok(tweets)
}

/// Trim and lowercase a word; `None` if it is empty or has characters other
/// than ASCII letters, digits, `_` and `'`.
pub fn clean_word(word: &str) -> Option<String> {
    let cleaned = word.trim().to_lowercase();
    let valid = cleaned
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '\'');
    if cleaned.is_empty() || !valid {
        return None;
    }
    Some(cleaned)
}

/// Split on single spaces and keep the words that survive cleaning.
pub fn parse_and_clean_sentence(sentence: &str) -> Vec<String> {
    sentence.split(' ').filter_map(clean_word).collect()
}

fn url_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("URL pattern must compile")
}

fn url_patterns() -> &'static [(Regex, &'static str); 3] {
    static PATTERNS: OnceLock<[(Regex, &'static str); 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // a trailing URL that closes a sentence keeps its period
            (url_regex(r"\bhttp\S*\.$"), "."),
            (url_regex(r"\bhttp\S*\.\s"), ". "),
            (url_regex(r"\bhttp\S*"), ""),
        ]
    })
}

/// Delete every word that starts with `http`.
pub fn remove_urls(s: &str) -> String {
    let mut out = s.to_string();
    for (pattern, replacement) in url_patterns() {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    out
}

/// Break a tweet into sentences of cleaned words, dropping empty sentences.
pub fn parse_and_clean_tweet(tweet: &str) -> Vec<Vec<String>> {
    tweet_split(&remove_urls(tweet))
        .iter()
        .map(|sentence| parse_and_clean_sentence(sentence))
        .filter(|words| !words.is_empty())
        .collect()
}

/// Training sequences for every tweet in `column` of the CSV data.
pub fn csv_to_training_data<R: BufRead>(
    reader: R,
    column: usize,
) -> Result<Vec<Vec<String>>, TextError> {
    let tweets = csv_to_tweets(reader, column)?;
    Ok(tweets
        .iter()
        .flat_map(|tweet| parse_and_clean_tweet(tweet))
        .collect())
}
