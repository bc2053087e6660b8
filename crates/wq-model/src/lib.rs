//! Data model shared by the Wiki Quiz client crates.
//!
//! Every type here mirrors the JSON exchanged with the quiz service. The service owns
//! generation and persistence, so these types are read-only input for the client: nothing
//! here validates that a question's `answer` is actually one of its `options`.

use std::{fmt, num::ParseIntError, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

/// Identifier assigned to a quiz by the service.
///
/// Stable across fetches of the same quiz, so it doubles as the identity a quiz session is
/// keyed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizId(pub i64);

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuizId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Named entities extracted from the source article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEntities {
    /// People mentioned in the article
    #[serde(default)]
    pub people: Vec<String>,
    /// Organizations mentioned in the article
    #[serde(default)]
    pub organizations: Vec<String>,
    /// Locations mentioned in the article
    #[serde(default)]
    pub locations: Vec<String>,
}

impl KeyEntities {
    /// Whether no entity of any kind was extracted
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.organizations.is_empty() && self.locations.is_empty()
    }
}

/// Question difficulty as rated by the generator. Display-only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Easy question
    Easy,
    /// Medium question
    Medium,
    /// Hard question
    Hard,
    /// Missing or unrecognized rating
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Unknown => "unknown",
        })
    }
}

/// A single multiple-choice question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The prompt shown to the user
    #[serde(rename = "question")]
    pub text: String,
    /// Candidate answers, in display order
    pub options: Vec<String>,
    /// The correct option, verbatim
    pub answer: String,
    /// Why the answer is correct
    #[serde(default)]
    pub explanation: String,
    /// Difficulty rating
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Question {
    /// Exact, case-sensitive comparison against the correct answer.
    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }

    /// Look up an option by its display label (`A`, `b`, ...).
    pub fn option_by_label(&self, label: &str) -> Option<&str> {
        option_index(label)
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
    }
}

/// A generated quiz together with the article metadata it was built from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Service-assigned identifier
    #[serde(default)]
    pub id: Option<QuizId>,
    /// Source article URL
    #[serde(default)]
    pub url: String,
    /// Article title
    #[serde(default)]
    pub title: String,
    /// Short article summary
    #[serde(default)]
    pub summary: String,
    /// Entities extracted from the article
    #[serde(default)]
    pub key_entities: KeyEntities,
    /// Section headings of the article
    #[serde(default)]
    pub sections: Vec<String>,
    /// Ordered questions. Position is the question's identity within a session.
    #[serde(default, rename = "quiz")]
    pub questions: Vec<Question>,
    /// Suggested follow-up topics
    #[serde(default)]
    pub related_topics: Vec<String>,
}

impl Quiz {
    /// Number of questions in the quiz
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Summary record of a previously generated quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Identifier to fetch the full quiz with
    pub id: QuizId,
    /// Article title
    #[serde(default)]
    pub title: String,
    /// Source article URL
    #[serde(default)]
    pub url: String,
    /// When the quiz was generated, if the service recorded it
    #[serde(default, deserialize_with = "deserialize_generated_at")]
    pub date_generated: Option<DateTime<Utc>>,
}

/// Title and summary of an article, fetched before generating a quiz from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPreview {
    /// Article title
    pub title: String,
    /// Truncated article summary
    #[serde(default)]
    pub summary: String,
    /// The previewed URL, echoed back by the service
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of the generate and preview requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRequest {
    /// Wikipedia article URL
    pub url: String,
}

/// Raw `date_generated` value before parsing
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Other(IgnoredAny),
}

/// Accepts RFC 3339 timestamps, the offset-less ISO-8601 form some backends emit and bare
/// `YYYY-MM-DD` dates, all taken to be UTC. Anything else is read as an unknown date.
fn deserialize_generated_at<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<RawDate>::deserialize(deserializer)? {
        Some(RawDate::Text(raw)) => raw,
        Some(RawDate::Other(_)) | None => return Ok(None),
    };

    Ok(parse_generated_at(&raw))
}

fn parse_generated_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Display label of the option at `index`: 0 is `A`, 1 is `B`, and so on up to `Z`.
pub fn option_label(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|idx| *idx < 26)
        .map(|idx| char::from(b'A' + idx))
}

/// Label shown for the option at `index`: the letter while there is one, then the 1-based
/// position.
pub fn option_display_label(index: usize) -> String {
    option_label(index).map_or_else(|| (index + 1).to_string(), String::from)
}

/// Inverse of [`option_display_label`]. Letters are case-insensitive and a number is taken as
/// a 1-based position; surrounding whitespace is ignored.
pub fn option_index(label: &str) -> Option<usize> {
    let label = label.trim();
    if let Ok(position) = label.parse::<usize>() {
        return position.checked_sub(1);
    }

    let mut chars = label.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !letter.is_ascii_uppercase() {
        return None;
    }
    Some(usize::from(letter as u8 - b'A'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_quiz_wire_format() {
        let quiz: Quiz = serde_json::from_value(json!({
            "id": 7,
            "url": "https://en.wikipedia.org/wiki/Alan_Turing",
            "title": "Alan Turing",
            "summary": "English mathematician.",
            "key_entities": { "people": ["Alan Turing"] },
            "sections": ["Early life"],
            "quiz": [{
                "question": "Where was Turing born?",
                "options": ["London", "Paris", "Berlin", "Rome"],
                "answer": "London",
                "difficulty": "easy",
                "explanation": "He was born in Maida Vale, London."
            }],
            "related_topics": ["Enigma"]
        }))
        .unwrap();

        assert_eq!(quiz.id, Some(QuizId(7)));
        assert_eq!(quiz.question_count(), 1);
        assert_eq!(quiz.questions[0].text, "Where was Turing born?");
        assert_eq!(quiz.questions[0].difficulty, Difficulty::Easy);
        assert_eq!(quiz.key_entities.people, vec!["Alan Turing"]);
        assert!(quiz.key_entities.organizations.is_empty());
    }

    #[test]
    fn test_quiz_defaults_for_missing_fields() {
        let quiz: Quiz = serde_json::from_value(json!({ "title": "Empty" })).unwrap();
        assert_eq!(quiz.id, None);
        assert!(quiz.questions.is_empty());
        assert!(quiz.key_entities.is_empty());
        assert!(quiz.related_topics.is_empty());
    }

    #[test]
    fn test_unknown_difficulty() {
        let question: Question = serde_json::from_value(json!({
            "question": "?",
            "options": ["a"],
            "answer": "a",
            "difficulty": "legendary"
        }))
        .unwrap();
        assert_eq!(question.difficulty, Difficulty::Unknown);
        assert_eq!(question.explanation, "");
    }

    #[test]
    fn test_is_correct_is_exact() {
        let question = Question {
            text: "Capital of France?".to_string(),
            options: vec!["Paris".to_string(), "paris".to_string()],
            answer: "Paris".to_string(),
            explanation: String::new(),
            difficulty: Difficulty::Easy,
        };
        assert!(question.is_correct("Paris"));
        assert!(!question.is_correct("paris"));
        assert!(!question.is_correct("Paris "));
        assert_eq!(question.option_by_label("b"), Some("paris"));
        assert_eq!(question.option_by_label("C"), None);
    }

    #[test]
    fn test_history_entry_dates() {
        let naive: HistoryEntry = serde_json::from_value(json!({
            "id": 1,
            "title": "Rust",
            "url": "https://en.wikipedia.org/wiki/Rust",
            "date_generated": "2024-05-01T12:34:56.123456"
        }))
        .unwrap();
        let date = naive.date_generated.unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 5, 1));
        assert_eq!(date.hour(), 12);

        let offset: HistoryEntry = serde_json::from_value(json!({
            "id": 2,
            "title": "Rust",
            "url": "https://en.wikipedia.org/wiki/Rust",
            "date_generated": "2024-05-01T23:00:00-02:00"
        }))
        .unwrap();
        assert_eq!(offset.date_generated.unwrap().day(), 2);

        let missing: HistoryEntry = serde_json::from_value(json!({
            "id": 3,
            "title": "Rust",
            "url": "https://en.wikipedia.org/wiki/Rust",
            "date_generated": null
        }))
        .unwrap();
        assert_eq!(missing.date_generated, None);

        let day_only: HistoryEntry = serde_json::from_value(json!({
            "id": 4,
            "date_generated": "2024-05-01"
        }))
        .unwrap();
        let date = day_only.date_generated.unwrap();
        assert_eq!((date.month(), date.day(), date.hour()), (5, 1, 0));
    }

    #[test]
    fn test_history_survives_unreadable_dates() {
        let entries: Vec<HistoryEntry> = serde_json::from_value(json!([
            {
                "id": 3,
                "title": "Rust",
                "url": "https://en.wikipedia.org/wiki/Rust",
                "date_generated": "2024-05-01T12:34:56"
            },
            { "id": 2, "title": "Go", "date_generated": "yesterday" },
            { "id": 1, "title": "Zig", "date_generated": 1714566896 }
        ]))
        .unwrap();

        assert_eq!(entries.len(), 3);
        assert!(entries[0].date_generated.is_some());
        assert_eq!(entries[1].date_generated, None);
        assert_eq!(entries[2].date_generated, None);
        assert_eq!(entries[2].title, "Zig");
    }

    #[test]
    fn test_option_labels() {
        assert_eq!(option_label(0), Some('A'));
        assert_eq!(option_label(3), Some('D'));
        assert_eq!(option_label(25), Some('Z'));
        assert_eq!(option_label(26), None);

        assert_eq!(option_index("A"), Some(0));
        assert_eq!(option_index(" d "), Some(3));
        assert_eq!(option_index("AB"), None);
        assert_eq!(option_index(""), None);

        // Past Z options are shown and picked by position
        assert_eq!(option_display_label(25), "Z");
        assert_eq!(option_display_label(26), "27");
        assert_eq!(option_index("27"), Some(26));
        assert_eq!(option_index("1"), Some(0));
        assert_eq!(option_index("0"), None);
    }

    #[test]
    fn test_option_past_z_is_selectable() {
        let question = Question {
            options: (1..=28).map(|n| format!("option {n}")).collect(),
            ..Question::default()
        };
        let label = option_display_label(27);
        assert_eq!(question.option_by_label(&label), Some("option 28"));
        assert_eq!(question.option_by_label("z"), Some("option 26"));
        assert_eq!(question.option_by_label("29"), None);
    }

    #[test]
    fn test_quiz_id_parse_and_display() {
        assert_eq!("42".parse::<QuizId>().unwrap(), QuizId(42));
        assert!("abc".parse::<QuizId>().is_err());
        assert_eq!(QuizId(42).to_string(), "42");
    }
}
