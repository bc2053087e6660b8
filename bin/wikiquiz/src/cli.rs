use clap::{Parser, Subcommand};
use wq_model::QuizId;

#[derive(Parser)]
#[command(author, version, about = "Generate and take quizzes built from Wikipedia articles", long_about = None)]
pub struct Cli {
    /// Base URL of the quiz service, overriding WIKIQUIZ_API_BASE_URL
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,
    /// Without a command the interactive shell is opened
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a quiz for an article, or fetch the cached one
    Generate {
        url: String,
        /// Answer the questions instead of reviewing them
        #[arg(long)]
        take: bool,
    },
    /// Show an article's title and summary
    Preview { url: String },
    /// List previously generated quizzes
    History,
    /// Show a stored quiz
    Show {
        id: QuizId,
        /// Answer the questions instead of reviewing them
        #[arg(long)]
        take: bool,
    },
}
