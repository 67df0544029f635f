//! Prompt-driven stitch, defaults matching the single-shot workflow.

use std::path::PathBuf;

use dialoguer::{Input, Select};
use substitch_common::{AppConfig, SubtitleLanguage, DEFAULT_INPUT_FOLDER};

const LANGUAGE_CHOICES: [&str; 3] = [
    "1. Chinese subtitles (keep the upper line)",
    "2. English subtitles (keep the lower line)",
    "3. Bilingual subtitles (keep both lines)",
];

pub fn run(app: &AppConfig) -> anyhow::Result<()> {
    println!("{}", "=".repeat(60));
    println!("Subtitle stitcher");
    println!("{}", "=".repeat(60));

    let folder: String = Input::new()
        .with_prompt("Screenshot folder")
        .default(DEFAULT_INPUT_FOLDER.to_string())
        .interact_text()?;
    let folder = PathBuf::from(folder.trim());

    let choice = Select::new()
        .with_prompt("Subtitle language")
        .items(&LANGUAGE_CHOICES)
        .default(0)
        .interact()?;
    let language = language_for_choice(choice);

    println!();
    println!("Selected: {language}");
    println!("{}", "=".repeat(60));

    let config = app
        .stitch_config(folder)
        .with_language(language)
        .with_preview(true);
    super::stitch::execute(config, false)
}

/// Menu position to language; anything unexpected keeps the default.
fn language_for_choice(choice: usize) -> SubtitleLanguage {
    (choice + 1)
        .to_string()
        .parse()
        .unwrap_or_default()
}
