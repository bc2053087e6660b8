//! Interactive shell with a "Generate Quiz" and a "Past Quizzes" tab.

use std::io::{self, Write};

use anyhow::anyhow;
use tokio::io::AsyncBufRead;
use wq_api::QuizClient;
use wq_model::QuizId;
use wq_session::QuizSession;

use crate::{
    console::Console,
    render,
    take::take_quiz,
    tabs::{GenerateTab, HistoryTab, Mode, Tab},
};

const GENERATE_HELP: &str = "\
Commands:
  <URL> | generate <URL>   generate a quiz for a Wikipedia article
  preview <URL>            show the article title and summary
  review                   show the current quiz with answers
  take                     answer the current quiz
  tab | history            switch to Past Quizzes
  help                     show this help
  quit                     leave";

const HISTORY_HELP: &str = "\
Commands:
  <ID> | view <ID>         show a stored quiz
  take [ID]                answer the open quiz, or the one with ID
  close                    close the open quiz
  refresh                  reload the list
  tab | generate           switch to Generate Quiz
  help                     show this help
  quit                     leave";

/// A line typed at the shell prompt
#[derive(Debug, PartialEq, Eq)]
enum Action {
    Generate(Option<String>),
    Preview(Option<String>),
    Review,
    Take(Option<QuizId>),
    View(QuizId),
    Close,
    Refresh,
    SwitchTab(Tab),
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

fn parse_action(line: &str, tab: Tab) -> Action {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, Some(arg.trim().to_string())),
        None => (line, None),
    };
    let unknown = || Action::Unknown(line.to_string());

    match (command.to_ascii_lowercase().as_str(), tab) {
        ("", _) => Action::Nothing,
        ("q" | "quit" | "exit", _) => Action::Quit,
        ("help" | "?", _) => Action::Help,
        ("tab", _) => Action::SwitchTab(tab.other()),
        ("history" | "h", _) => Action::SwitchTab(Tab::History),
        ("g" | "generate", Tab::History) if arg.is_none() => Action::SwitchTab(Tab::Generate),
        ("g" | "generate", _) => Action::Generate(arg),
        ("p" | "preview", _) => Action::Preview(arg),
        ("r" | "review", Tab::Generate) => Action::Review,
        ("t" | "take", _) => match arg {
            None => Action::Take(None),
            Some(id) => id.parse().map_or_else(|_| unknown(), |id| Action::Take(Some(id))),
        },
        ("v" | "view", Tab::History) => arg
            .and_then(|id| id.parse().ok())
            .map_or_else(unknown, Action::View),
        ("c" | "close", Tab::History) => Action::Close,
        ("refresh", Tab::History) => Action::Refresh,
        (_, _) if arg.is_none() && command.contains("://") => Action::Generate(Some(line.to_string())),
        (_, Tab::History) if arg.is_none() => command.parse().map_or_else(|_| unknown(), Action::View),
        _ => unknown(),
    }
}

/// `[Generate Quiz]  Past Quizzes` with the active tab bracketed
fn tab_bar(active: Tab) -> String {
    Tab::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.title())
            } else {
                tab.title().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[derive(Debug)]
pub struct Shell<R, W> {
    client: QuizClient,
    console: Console<R, W>,
    tab: Tab,
    generate: GenerateTab,
    history: HistoryTab,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(client: QuizClient, console: Console<R, W>) -> Self {
        Self {
            client,
            console,
            tab: Tab::default(),
            generate: GenerateTab::default(),
            history: HistoryTab::default(),
        }
    }

    /// Read and run commands until `quit` or the end of input
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.console.print(tab_bar(self.tab))?;
        self.console.print(GENERATE_HELP)?;

        loop {
            let label = format!("{}> ", self.tab.title());
            let Some(line) = self.console.prompt(&label).await? else {
                break;
            };

            match parse_action(&line, self.tab) {
                Action::Quit => break,
                Action::Nothing => {}
                action => self.dispatch(action).await?,
            }
        }

        tracing::debug!("shell closed");
        Ok(())
    }

    async fn dispatch(&mut self, action: Action) -> io::Result<()> {
        match action {
            Action::Generate(url) => {
                self.switch_silently(Tab::Generate);
                if self.generate_quiz(url).await? {
                    self.present_generated().await?;
                } else {
                    self.report_generate_error()?;
                }
            }
            Action::Preview(url) => {
                self.switch_silently(Tab::Generate);
                if !self.preview(url).await? {
                    self.report_generate_error()?;
                }
            }
            Action::Review => self.set_generate_mode(Mode::Review).await?,
            Action::Take(None) if self.tab == Tab::Generate => {
                self.set_generate_mode(Mode::Take).await?;
            }
            Action::Take(None) => self.take_selected().await?,
            Action::Take(Some(id)) => {
                self.switch_silently(Tab::History);
                if self.open_quiz(id).await? {
                    self.take_selected().await?;
                } else {
                    self.report_history_error()?;
                }
            }
            Action::View(id) => {
                if self.open_quiz(id).await? {
                    self.show_selected()?;
                } else {
                    self.report_history_error()?;
                }
            }
            Action::Close => {
                self.history.close_details();
                self.console.print(render::history_table(self.history.entries()))?;
            }
            Action::Refresh => self.show_history().await?,
            Action::SwitchTab(tab) => self.switch_tab(tab).await?,
            Action::Help => {
                let help = match self.tab {
                    Tab::Generate => GENERATE_HELP,
                    Tab::History => HISTORY_HELP,
                };
                self.console.print(help)?;
            }
            Action::Unknown(line) => {
                self.console
                    .print(format!("Unknown command: {line}. Type 'help' for commands."))?;
            }
            Action::Quit | Action::Nothing => {}
        }
        Ok(())
    }

    fn switch_silently(&mut self, tab: Tab) {
        self.tab = tab;
    }

    async fn switch_tab(&mut self, tab: Tab) -> io::Result<()> {
        self.tab = tab;
        self.console.print(tab_bar(tab))?;

        match tab {
            Tab::Generate => {
                let status = match self.generate.quiz() {
                    Some(quiz) => format!("Current quiz: {}. Type 'review' or 'take'.", quiz.title),
                    None if !self.generate.url().is_empty() => {
                        format!("Last URL: {}", self.generate.url())
                    }
                    None => "Enter a Wikipedia article URL to generate a quiz.".to_string(),
                };
                self.console.print(status)?;
            }
            Tab::History => {
                // The list is fetched again every time the tab is opened
                self.history = HistoryTab::default();
                self.show_history().await?;
            }
        }
        Ok(())
    }

    async fn preview(&mut self, url: Option<String>) -> io::Result<bool> {
        if let Some(url) = url {
            self.generate.set_url(url);
        }
        let Some(url) = self.generate.begin_preview() else {
            return Ok(false);
        };

        self.console.print("Loading preview...")?;
        let result = self.client.preview_url(&url).await;
        self.generate.finish_preview(result);

        match self.generate.preview() {
            Some(preview) => {
                self.console.print(render::preview(preview))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn generate_quiz(&mut self, url: Option<String>) -> io::Result<bool> {
        if let Some(url) = url {
            self.generate.set_url(url);
        }
        let Some(url) = self.generate.begin_generate() else {
            return Ok(false);
        };

        self.console.print("Generating quiz, this can take a minute...")?;
        let result = self.client.generate_quiz(&url).await;
        self.generate.finish_generate(url, result);
        Ok(self.generate.quiz().is_some())
    }

    async fn set_generate_mode(&mut self, mode: Mode) -> io::Result<()> {
        self.switch_silently(Tab::Generate);
        if self.generate.quiz().is_none() {
            return self.console.print("Generate a quiz first.");
        }
        self.generate.set_mode(mode);
        self.present_generated().await
    }

    /// Show the generated quiz the way the current mode asks for
    async fn present_generated(&mut self) -> io::Result<()> {
        let Some(quiz) = self.generate.quiz() else {
            return Ok(());
        };

        match self.generate.mode() {
            Mode::Review => self.console.print(render::quiz(quiz, false)),
            Mode::Take => {
                let mut session = QuizSession::new(quiz.clone());
                self.console.print(render::quiz(quiz, true))?;
                take_quiz(&mut self.console, &mut session).await?;
                Ok(())
            }
        }
    }

    fn report_generate_error(&mut self) -> io::Result<()> {
        match self.generate.error() {
            Some(error) => self.console.print(format!("Error: {error}")),
            None => Ok(()),
        }
    }

    async fn load_history(&mut self) -> io::Result<bool> {
        if !self.history.begin_load() {
            return Ok(false);
        }

        self.console.print("Loading history...")?;
        let result = self.client.history().await;
        self.history.finish_load(result);
        Ok(self.history.error().is_none())
    }

    async fn show_history(&mut self) -> io::Result<()> {
        if self.load_history().await? {
            self.console.print(render::history_table(self.history.entries()))
        } else {
            self.report_history_error()
        }
    }

    async fn open_quiz(&mut self, id: QuizId) -> io::Result<bool> {
        self.history.close_details();
        self.console.print(format!("Loading quiz {id}..."))?;
        let result = self.client.quiz(id).await;
        self.history.open_details(result);
        Ok(self.history.details_open())
    }

    fn show_selected(&mut self) -> io::Result<()> {
        if let Some(quiz) = self.history.selected() {
            self.console.print(render::quiz(quiz, false))?;
            self.console.print("Type 'take' to answer it or 'close' to go back.")?;
        }
        Ok(())
    }

    async fn take_selected(&mut self) -> io::Result<()> {
        let Some(quiz) = self.history.selected() else {
            return self.console.print("Open a quiz first with 'view <ID>'.");
        };

        let mut session = QuizSession::new(quiz.clone());
        self.console.print(render::quiz(quiz, true))?;
        take_quiz(&mut self.console, &mut session).await?;
        Ok(())
    }

    fn report_history_error(&mut self) -> io::Result<()> {
        match self.history.error() {
            Some(error) => self.console.print(format!("Error: {error}")),
            None => Ok(()),
        }
    }

    /// `wikiquiz generate`
    pub async fn generate_once(&mut self, url: String, take: bool) -> anyhow::Result<()> {
        if !self.generate_quiz(Some(url)).await? {
            return Err(anyhow!(failure(self.generate.error())));
        }
        if take {
            self.generate.set_mode(Mode::Take);
        }
        self.present_generated().await?;
        Ok(())
    }

    /// `wikiquiz preview`
    pub async fn preview_once(&mut self, url: String) -> anyhow::Result<()> {
        if !self.preview(Some(url)).await? {
            return Err(anyhow!(failure(self.generate.error())));
        }
        Ok(())
    }

    /// `wikiquiz history`
    pub async fn history_once(&mut self) -> anyhow::Result<()> {
        if !self.load_history().await? {
            return Err(anyhow!(failure(self.history.error())));
        }
        self.console.print(render::history_table(self.history.entries()))?;
        Ok(())
    }

    /// `wikiquiz show`
    pub async fn show_once(&mut self, id: QuizId, take: bool) -> anyhow::Result<()> {
        if !self.open_quiz(id).await? {
            return Err(anyhow!(failure(self.history.error())));
        }
        if take {
            self.take_selected().await?;
        } else {
            self.show_selected()?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn console(&self) -> &Console<R, W> {
        &self.console
    }
}

fn failure(error: Option<&str>) -> String {
    error.unwrap_or("Request failed.").to_string()
}
