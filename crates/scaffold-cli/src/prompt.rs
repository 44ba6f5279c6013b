use console::{style, Style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use scaffold_codegen::Prompt;
use std::path::Path;

/// Asks on the terminal before overwriting a file.
pub(crate) struct ConfirmPrompt {
    theme: ColorfulTheme,
}

impl ConfirmPrompt {
    pub(crate) fn new() -> Self {
        let theme = ColorfulTheme {
            prompt_style: Style::new().bold(),
            prompt_prefix: style("?".to_string()).yellow().bold(),
            success_prefix: style("✔".to_string()).green().bold(),
            ..Default::default()
        };
        Self { theme }
    }
}

impl Prompt for ConfirmPrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> scaffold_core::Result<bool> {
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(format!("{} already exists. Overwrite?", path.display()))
            .default(false)
            .interact()
            .map_err(anyhow::Error::from)?;
        Ok(confirmed)
    }
}
