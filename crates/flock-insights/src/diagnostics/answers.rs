use crate::surveys::{QuestionCode, SurveyResponse};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Uppercased, accent-free, whitespace-collapsed form used for every keyword comparison.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whole-phrase test: `needle` must not start or end inside a longer word of `haystack`.
pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Read-only view answering questions about one response.
///
/// Missing or unknown question codes behave as an empty answer so templates can evolve
/// without breaking scoring.
#[derive(Debug, Clone, Copy)]
pub struct AnswerSheet<'a> {
    response: &'a SurveyResponse,
}

impl<'a> AnswerSheet<'a> {
    pub fn new(response: &'a SurveyResponse) -> Self {
        Self { response }
    }

    pub fn response(&self) -> &'a SurveyResponse {
        self.response
    }

    /// Raw answer text, empty when the question was not answered.
    pub fn answer(&self, code: QuestionCode) -> String {
        self.response
            .answer(code)
            .map(|answer| answer.text())
            .unwrap_or_default()
    }

    pub fn normalized(&self, code: QuestionCode) -> String {
        normalize(&self.answer(code))
    }

    /// Case- and diacritic-insensitive substring test.
    pub fn has_option(&self, code: QuestionCode, needle: &str) -> bool {
        let needle = normalize(needle);
        !needle.is_empty() && self.normalized(code).contains(&needle)
    }

    pub fn has_any_option(&self, code: QuestionCode, needles: &[&str]) -> bool {
        let haystack = self.normalized(code);
        needles.iter().any(|needle| {
            let needle = normalize(needle);
            !needle.is_empty() && haystack.contains(&needle)
        })
    }

    pub fn is_exactly(&self, code: QuestionCode, expected: &str) -> bool {
        self.normalized(code) == normalize(expected)
    }

    /// Boolean-like answers: `true`, `sí`, or `yes`.
    pub fn is_yes(&self, code: QuestionCode) -> bool {
        matches!(self.normalized(code).as_str(), "TRUE" | "SI" | "YES")
    }
}
