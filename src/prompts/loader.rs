//! Prompt loader
//!
//! Loads prompt templates from files or falls back to embedded
//! defaults, and builds the (system, user) prompt pair for the
//! breakdown call.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use super::{Granularity, Mode, embedded};

/// Context for rendering the breakdown templates
///
/// Granularity is expanded to one boolean per level so the template
/// can select its instruction block with plain conditionals.
#[derive(Debug, Clone, Serialize)]
pub struct PromptContext {
    /// Raw user input, embedded verbatim
    pub input: String,
    /// Mode label shown to the generator
    pub mode_label: String,
    pub granularity_minimal: bool,
    pub granularity_moderate: bool,
    pub granularity_detailed: bool,
}

impl PromptContext {
    pub fn new(input: &str, mode: Mode, granularity: Granularity) -> Self {
        Self {
            input: input.to_string(),
            mode_label: mode.label().to_string(),
            granularity_minimal: granularity == Granularity::Minimal,
            granularity_moderate: granularity == Granularity::Moderate,
            granularity_detailed: granularity == Granularity::Detailed,
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (`.braindump/prompts/`)
    user_dir: Option<PathBuf>,
    /// Repo default directory (`prompts/`)
    repo_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        debug!(?root, "PromptLoader::new: called");
        let user_dir = root.join(".braindump/prompts");
        let repo_dir = root.join("prompts");

        Self {
            hbs: Handlebars::new(),
            user_dir: user_dir.exists().then_some(user_dir),
            repo_dir: repo_dir.exists().then_some(repo_dir),
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Handlebars::new(),
            user_dir: None,
            repo_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `.braindump/prompts/{name}.pmt`
    /// 2. Repo default: `prompts/{name}.pmt`
    /// 3. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        for dir in [&self.user_dir, &self.repo_dir].into_iter().flatten() {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found on disk");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: using embedded");
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    fn render(&self, template_name: &str, context: &PromptContext) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Build the (system instructions, user prompt) pair for a
    /// breakdown request
    ///
    /// Pure function of its inputs: same input, mode, and granularity
    /// always produce the same prompts. Input content is not
    /// validated here; empty submissions never reach this point.
    pub fn build_plan_prompt(&self, input: &str, mode: Mode, granularity: Granularity) -> Result<(String, String)> {
        debug!(input_len = input.len(), ?mode, ?granularity, "build_plan_prompt: called");
        let context = PromptContext::new(input, mode, granularity);
        let system = self.render("breakdown-system", &context)?;
        let user = self.render("breakdown-user", &context)?;
        Ok((system, user))
    }

    /// System instructions for the emotion classification call
    pub fn classify_prompt(&self) -> Result<String> {
        self.load_template("emotion-classify")
    }

    /// System instructions for the acknowledgment call
    ///
    /// `positive` selects amplify-momentum wording; otherwise the
    /// validate-struggle wording is used.
    pub fn acknowledgment_prompt(&self, positive: bool) -> Result<String> {
        if positive {
            self.load_template("ack-positive")
        } else {
            self.load_template("ack-negative")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_plan_prompt_embeds_input_verbatim() {
        let loader = PromptLoader::embedded_only();
        let input = "need to do taxes, call mom, fix bike... I feel overwhelmed";

        let (system, user) = loader
            .build_plan_prompt(input, Mode::Robotic, Granularity::Moderate)
            .expect("build prompt");

        assert!(user.contains(input));
        assert!(user.contains(Mode::Robotic.label()));
        assert!(user.contains("```json"), "user prompt carries the one-shot example");
        assert!(system.contains("LEVEL 2 (MODERATE)"));
        assert!(!system.contains("LEVEL 1 (MINIMAL)"));
        assert!(!system.contains("LEVEL 3 (MAXIMUM DETAIL)"));
    }

    #[test]
    fn test_build_plan_prompt_is_pure() {
        let loader = PromptLoader::embedded_only();
        let a = loader
            .build_plan_prompt("fix bike", Mode::Creative, Granularity::Detailed)
            .unwrap();
        let b = loader
            .build_plan_prompt("fix bike", Mode::Creative, Granularity::Detailed)
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_plan_prompt_granularity_blocks() {
        let loader = PromptLoader::embedded_only();

        let (minimal, _) = loader
            .build_plan_prompt("x", Mode::Robotic, Granularity::Minimal)
            .unwrap();
        let (detailed, _) = loader
            .build_plan_prompt("x", Mode::Robotic, Granularity::Detailed)
            .unwrap();

        assert!(minimal.contains("1-4 steps per task"));
        assert!(detailed.contains("8-15 micro-steps per task"));
    }

    #[test]
    fn test_input_not_html_escaped() {
        let loader = PromptLoader::embedded_only();
        let (_, user) = loader
            .build_plan_prompt("it's \"chaos\" & <stress>", Mode::Robotic, Granularity::Moderate)
            .unwrap();
        assert!(user.contains("it's \"chaos\" & <stress>"));
    }

    #[test]
    fn test_acknowledgment_prompts_differ() {
        let loader = PromptLoader::embedded_only();
        let positive = loader.acknowledgment_prompt(true).unwrap();
        let negative = loader.acknowledgment_prompt(false).unwrap();
        assert!(positive.contains("momentum"));
        assert!(negative.contains("struggles"));
        assert_ne!(positive, negative);
    }

    #[test]
    fn test_unknown_template_errors() {
        let loader = PromptLoader::embedded_only();
        assert!(loader.load_template("nonexistent-template").is_err());
    }
}
