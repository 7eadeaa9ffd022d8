//! Interactive capture of secrets, kept apart from where they're stored.

use dialoguer::{theme::ColorfulTheme, Password};

pub type PromptError = dialoguer::Error;

/// Asks the user for a secret value.
pub trait SecretPrompt {
    fn ask(&self, prompt: &str) -> Result<String, PromptError>;
}

/// Reads from the terminal without echoing input.
pub struct TerminalPrompt;

impl SecretPrompt for TerminalPrompt {
    fn ask(&self, prompt: &str) -> Result<String, PromptError> {
        Password::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
    }
}

/// Answers every prompt with a canned reply.
#[cfg(test)]
pub struct CannedPrompt(pub Result<String, ()>);

#[cfg(test)]
impl SecretPrompt for CannedPrompt {
    fn ask(&self, _prompt: &str) -> Result<String, PromptError> {
        self.0.clone().map_err(|_| {
            dialoguer::Error::IO(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "not a terminal",
            ))
        })
    }
}
