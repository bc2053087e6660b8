use std::io::{self, Write};

use tokio::io::AsyncBufRead;
use wq_session::QuizSession;

use crate::{console::Console, render};

/// Walk the user through `session` and print the results once it is submitted.
///
/// Every question is asked in turn; an option letter selects, an empty answer skips and keeps
/// any earlier pick. Declining the submission starts another pass so answers can be revised.
/// Returns `false` if the input ended before the quiz was submitted.
pub async fn take_quiz<R, W>(
    console: &mut Console<R, W>,
    session: &mut QuizSession,
) -> io::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if session.question_count() == 0 {
        console.print("This quiz has no questions.")?;
        return Ok(false);
    }
    if session.is_submitted() {
        session.reset();
    }

    loop {
        for idx in 0..session.question_count() {
            if !ask(console, session, idx).await? {
                return Ok(false);
            }
        }

        let unanswered = session.question_count() - session.answered_count();
        if unanswered > 0 {
            console.print(format!("{unanswered} question(s) left unanswered."))?;
        }

        let Some(reply) = console.prompt("Submit answers? [Y/n] ").await? else {
            return Ok(false);
        };
        if !reply.trim().eq_ignore_ascii_case("n") {
            break;
        }
    }

    session.submit();
    console.print(render::results(session))?;
    Ok(true)
}

/// Ask one question until a valid letter or an empty line is entered. `false` on EOF.
async fn ask<R, W>(
    console: &mut Console<R, W>,
    session: &mut QuizSession,
    idx: usize,
) -> io::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let question = &session.quiz().questions[idx];
    console.print(render::take_question(idx, question, session.selection(idx)))?;
    let label = format!("Answer [{}, Enter to skip] ", render::label_range(question.options.len()));

    loop {
        let Some(reply) = console.prompt(&label).await? else {
            return Ok(false);
        };
        if reply.trim().is_empty() {
            return Ok(true);
        }

        let question = &session.quiz().questions[idx];
        match question.option_by_label(&reply) {
            Some(option) => {
                let option = option.to_string();
                session.select_option(idx, option);
                return Ok(true);
            }
            None => console.print(format!(
                "Pick one of {}.",
                render::label_range(question.options.len())
            ))?,
        }
    }
}
