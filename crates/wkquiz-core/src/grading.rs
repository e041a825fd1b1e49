//! Answer checking and correction messages.

use wana_kana::ConvertJapanese;

use crate::model::Subject;

/// Kana to latin transliteration, used for reading answers and hints.
pub fn romanize(kana: &str) -> String {
    kana.to_romaji()
}

/// Whether `answer` matches any accepted or auxiliary meaning.
pub fn meaning_matches(subject: &Subject, answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    subject
        .accepted_meanings()
        .iter()
        .any(|m| m.to_lowercase() == answer)
}

/// Whether `answer` matches an accepted reading, typed either as kana or
/// in its romanized form.
///
/// The apostrophe that separates ん from a following vowel or y
/// (`kin'en`) is optional.
pub fn reading_matches(subject: &Subject, answer: &str) -> bool {
    let answer = answer.trim();
    let typed = without_apostrophes(&answer.to_lowercase());
    subject
        .accepted_readings()
        .iter()
        .any(|r| *r == answer || without_apostrophes(&romanize(r)) == typed)
}

fn without_apostrophes(romaji: &str) -> String {
    romaji.replace('\'', "")
}

/// `The correct meaning(s) for X is/are: a, b.`
pub fn meaning_correction(subject: &Subject) -> String {
    correction("meaning", subject.characters(), &subject.accepted_meanings())
}

/// Like [`meaning_correction`], with each reading followed by its
/// romanized form in parentheses.
pub fn reading_correction(subject: &Subject) -> String {
    let annotated: Vec<String> = subject
        .accepted_readings()
        .iter()
        .map(|r| format!("{r} ({})", romanize(r)))
        .collect();
    let annotated: Vec<&str> = annotated.iter().map(String::as_str).collect();
    correction("reading", subject.characters(), &annotated)
}

fn correction(noun: &str, characters: &str, answers: &[&str]) -> String {
    let multiple = answers.len() > 1;
    let plural = if multiple { "s" } else { "" };
    let verb = if multiple { "are" } else { "is" };
    format!(
        "The correct {noun}{plural} for {characters} {verb}: {}.",
        answers.join(", ")
    )
}
