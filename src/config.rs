//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::data::{Catalog, DEFAULT_CATEGORY, DEFAULT_FOLDER, DEFAULT_OWNER, DEFAULT_REPO, Source};
use crate::session::EmptyAnswerPolicy;
use crate::speech::{CommandSpeaker, SilentSpeaker, Speaker, SpeechConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Drill English verb forms and vocabulary in the terminal", long_about = None)]
pub struct Cli {
    /// JSON file to load the items from
    #[arg(short, long, conflicts_with_all = ["url", "category"])]
    pub file: Option<PathBuf>,

    /// URL of a JSON file to download
    #[arg(short, long, conflicts_with = "category")]
    pub url: Option<String>,

    /// Catalog category to load (verbs, phrasal_verbs, connectors, ...)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Catalog file to load, by 1-based number or name (default: first)
    #[arg(short, long)]
    pub pick: Option<String>,

    #[arg(long, default_value = DEFAULT_OWNER)]
    pub github_owner: String,

    #[arg(long, default_value = DEFAULT_REPO)]
    pub github_repo: String,

    #[arg(long, default_value = DEFAULT_FOLDER)]
    pub github_folder: String,

    /// List the catalog files of the category and exit
    #[arg(long, conflicts_with_all = ["file", "url"])]
    pub list: bool,

    /// Seed for the prompt directions
    #[arg(long)]
    pub seed: Option<u64>,

    /// Accept an empty answer when the correct value is empty too
    #[arg(long)]
    pub accept_empty: bool,

    /// Disable text-to-speech
    #[arg(long)]
    pub no_speech: bool,

    /// Speak English prompts as soon as they are shown
    #[arg(long)]
    pub auto_speak: bool,

    /// espeak-compatible speech program
    #[arg(long, default_value = "espeak-ng")]
    pub speech_program: String,

    /// Speech rate relative to normal speed
    #[arg(long, default_value_t = 0.9)]
    pub speech_rate: f32,

    /// File receiving the log output
    #[arg(long, default_value = "verb-drill.log")]
    pub log_file: PathBuf,
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: Source,
    pub seed: Option<u64>,
    pub policy: EmptyAnswerPolicy,
    /// `None` when speech is disabled.
    pub speech: Option<SpeechConfig>,
    pub auto_speak: bool,
    pub log_file: PathBuf,
    pub list_only: bool,
}

impl Cli {
    pub fn into_config(self) -> Config {
        let source = match (self.file, self.url) {
            (Some(path), _) => Source::File(path),
            (None, Some(url)) => Source::Url(url),
            (None, None) => Source::GitHub {
                catalog: Catalog {
                    owner: self.github_owner,
                    repo: self.github_repo,
                    folder: self.github_folder,
                },
                category: self.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
                pick: self.pick,
            },
        };

        let policy = if self.accept_empty {
            EmptyAnswerPolicy::MatchEmptyTruth
        } else {
            EmptyAnswerPolicy::AlwaysMismatch
        };

        let speech = (!self.no_speech).then(|| SpeechConfig {
            program: self.speech_program,
            rate: self.speech_rate,
        });

        Config {
            source,
            seed: self.seed,
            policy,
            speech,
            auto_speak: self.auto_speak,
            log_file: self.log_file,
            list_only: self.list,
        }
    }
}

impl Config {
    pub fn speaker(&self) -> Box<dyn Speaker> {
        match &self.speech {
            Some(speech) => Box::new(CommandSpeaker::new(speech.clone())),
            None => Box::new(SilentSpeaker),
        }
    }
}
