use dialoguer::{theme::ColorfulTheme, Confirm, Input};

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, dialoguer::Error> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
}

/// Prompt the user for free-form text input.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, dialoguer::Error> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .interact_text()
}
