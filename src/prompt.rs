use inquire::{required, Text};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum PromptError {
    #[error("failed to read interactive input")]
    #[diagnostic(
        code(sprout::prompt::read),
        help("Pass the value as a command-line flag to skip the prompt")
    )]
    Read {
        #[source]
        source: inquire::InquireError,
    },
}

fn read(result: Result<String, inquire::InquireError>) -> Result<String, PromptError> {
    result.map_err(|source| PromptError::Read { source })
}

pub fn project_name() -> Result<String, PromptError> {
    read(
        Text::new("Project name:")
            .with_validator(required!("project name is required"))
            .prompt(),
    )
}

pub fn app_name(default: &str) -> Result<String, PromptError> {
    read(
        Text::new("Application display name:")
            .with_default(default)
            .prompt(),
    )
}

pub fn app_id(default: &str) -> Result<String, PromptError> {
    read(
        Text::new("Application id:")
            .with_default(default)
            .with_help_message("Reverse-domain identifier, e.g. com.example.myapp")
            .prompt(),
    )
}
