use std::collections::VecDeque;

use dialoguer::{theme::ColorfulTheme, Input};

use crate::error::Result;

/// Source of answers to the driver's questions
pub trait Prompter {
    /// Asks `prompt` and returns the answer, `default` when left empty
    fn ask(&mut self, prompt: &str, default: &str) -> Result<String>;
}

/// Asks on the terminal
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str, default: &str) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()?;
        Ok(answer)
    }
}

/// Replays canned answers and records every question asked
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    /// Empty strings and running out of answers both pick the default
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str, default: &str) -> Result<String> {
        self.asked.push(prompt.to_string());
        Ok(match self.answers.pop_front() {
            Some(answer) if !answer.is_empty() => answer,
            _ => default.to_string(),
        })
    }
}

/// Asks a yes/no question; only `y` or `yes` count as yes
pub fn confirm(prompter: &mut impl Prompter, question: &str, default_yes: bool) -> Result<bool> {
    let (hint, default) = if default_yes {
        ("Y/n", "y")
    } else {
        ("y/N", "n")
    };
    let answer = prompter.ask(&format!("{} [{}]", question, hint), default)?;
    Ok(match answer.trim().to_lowercase().as_str() {
        "" => default_yes,
        "y" | "yes" => true,
        _ => false,
    })
}
