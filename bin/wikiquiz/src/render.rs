//! Plain-text rendering of quizzes, history and results.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use wq_model::{HistoryEntry, Question, Quiz, UrlPreview, option_display_label};
use wq_session::{Outcome, QuizSession};

const URL_DISPLAY_LIMIT: usize = 50;
const NOT_SPECIFIED: &str = "Not specified";

/// `A-D` for a four-option question
pub fn label_range(option_count: usize) -> String {
    match option_count {
        0 => String::new(),
        1 => option_display_label(0),
        n => format!("{}-{}", option_display_label(0), option_display_label(n - 1)),
    }
}

fn list_or_placeholder(items: &[String]) -> String {
    if items.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        items.join(", ")
    }
}

/// Article preview shown before generating
pub fn preview(preview: &UrlPreview) -> String {
    let mut out = format!("Preview: {}\n", preview.title);
    if !preview.summary.is_empty() {
        let _ = writeln!(out, "  {}", preview.summary);
    }
    out
}

/// Full quiz in review mode. `hide_answers` leaves out answers and explanations.
pub fn quiz(quiz: &Quiz, hide_answers: bool) -> String {
    let mut out = String::new();
    let title = if quiz.title.is_empty() {
        "Wikipedia Quiz"
    } else {
        quiz.title.as_str()
    };
    let _ = writeln!(out, "== {title} ==");
    if !quiz.summary.is_empty() {
        let _ = writeln!(out, "{}", quiz.summary);
    }
    out.push('\n');

    let entities = &quiz.key_entities;
    let _ = writeln!(out, "People:        {}", list_or_placeholder(&entities.people));
    let _ = writeln!(out, "Organizations: {}", list_or_placeholder(&entities.organizations));
    let _ = writeln!(out, "Locations:     {}", list_or_placeholder(&entities.locations));
    let _ = writeln!(out, "Sections:      {}", list_or_placeholder(&quiz.sections));
    out.push('\n');

    out.push_str("Quiz Questions:\n");
    for (idx, question) in quiz.questions.iter().enumerate() {
        out.push_str(&question_header(idx, question));
        for (opt_idx, option) in question.options.iter().enumerate() {
            let _ = writeln!(out, "    {}. {option}", option_display_label(opt_idx));
        }
        if !hide_answers {
            let _ = writeln!(out, "  Correct: {} [{}]", question.answer, question.difficulty);
            if !question.explanation.is_empty() {
                let _ = writeln!(out, "  {}", question.explanation);
            }
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Suggested Topics: {}", list_or_placeholder(&quiz.related_topics));
    out
}

fn question_header(idx: usize, question: &Question) -> String {
    format!("Q{}: {}\n", idx + 1, question.text)
}

/// A question while it is being answered, marking the current selection
pub fn take_question(idx: usize, question: &Question, selected: Option<&str>) -> String {
    let mut out = question_header(idx, question);
    for (opt_idx, option) in question.options.iter().enumerate() {
        let mark = if selected == Some(option.as_str()) { "(*)" } else { "( )" };
        let _ = writeln!(out, "  {mark} {}. {option}", option_display_label(opt_idx));
    }
    out
}

/// Per-question feedback and the final score of a submitted session
pub fn results(session: &QuizSession) -> String {
    let mut out = String::new();
    for (idx, question) in session.quiz().questions.iter().enumerate() {
        out.push_str(&question_header(idx, question));
        let selected = session.selection(idx);
        for (opt_idx, option) in question.options.iter().enumerate() {
            let mark = if question.is_correct(option) {
                "[correct]"
            } else if selected == Some(option.as_str()) {
                "[wrong]"
            } else {
                ""
            };
            let line = format!("    {}. {option} {mark}", option_display_label(opt_idx));
            let _ = writeln!(out, "{}", line.trim_end());
        }

        let verdict = match session.outcome(idx) {
            Some(Outcome::Correct) => "Correct!",
            Some(Outcome::Incorrect) => "Incorrect.",
            Some(Outcome::Unanswered) => "Incorrect. (not answered)",
            None => "",
        };
        let _ = writeln!(out, "  {verdict}");
        let _ = writeln!(out, "  Explanation: {}", question.explanation);
        let _ = writeln!(out, "  Difficulty: {}", question.difficulty);
        out.push('\n');
    }

    let _ = write!(out, "Score: {} / {}", session.score(), session.question_count());
    out
}

/// `Jan 5, 2024`, or `Not available` without a date
pub fn date(date: Option<&DateTime<Utc>>) -> String {
    date.map_or_else(
        || "Not available".to_string(),
        |date| date.format("%b %-d, %Y").to_string(),
    )
}

/// Shorten long URLs for table display
pub fn truncate_url(url: &str) -> String {
    if url.chars().count() > URL_DISPLAY_LIMIT {
        let head: String = url.chars().take(URL_DISPLAY_LIMIT).collect();
        format!("{head}...")
    } else {
        url.to_string()
    }
}

/// Table of previously generated quizzes
pub fn history_table(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No quizzes generated yet.".to_string();
    }

    let rows: Vec<[String; 4]> = entries
        .iter()
        .map(|entry| {
            [
                entry.id.to_string(),
                entry.title.clone(),
                truncate_url(&entry.url),
                date(entry.date_generated.as_ref()),
            ]
        })
        .collect();

    let header = ["ID", "Article Title", "URL", "Date Generated"];
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: [&str; 4]| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    };

    push_row(header);
    push_row(widths.map(|w| "-".repeat(w)).each_ref().map(String::as_str));
    for row in &rows {
        push_row(row.each_ref().map(String::as_str));
    }
    out
}
