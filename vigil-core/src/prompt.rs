//! System prompt rendering.
//!
//! The persona lives in `vigil-core/prompts/system.md` and uses `{{var}}`
//! placeholders filled from [`IdentitySettings`].

use std::collections::HashMap;

use crate::config::IdentitySettings;

/// content: prompts/system.md
const SYSTEM_PROMPT_TEMPLATE: &str = include_str!("../prompts/system.md");

pub type TemplateVars = HashMap<String, String>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("template parse error: {0}")]
    TemplateParse(String),
    #[error("missing template variable: {0}")]
    MissingVar(String),
}

pub fn vars_from_pairs(pairs: &[(&str, &str)]) -> TemplateVars {
    let mut vars = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        vars.insert((*key).to_string(), (*value).to_string());
    }
    vars
}

pub fn render_template(template: &str, vars: &TemplateVars) -> Result<String, PromptError> {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let (prefix, after_start) = rest.split_at(start);
        out.push_str(prefix);
        let Some(end) = after_start.find("}}") else {
            return Err(PromptError::TemplateParse("Unclosed {{ in template".to_string()));
        };
        let var = after_start[2..end].trim();
        if var.is_empty() {
            return Err(PromptError::TemplateParse("Empty {{}} in template".to_string()));
        }
        let value = vars
            .get(var)
            .ok_or_else(|| PromptError::MissingVar(var.to_string()))?;
        out.push_str(value);
        rest = &after_start[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Render the persona prompt for the configured identity.
pub fn system_prompt(identity: &IdentitySettings) -> Result<String, PromptError> {
    let vars = vars_from_pairs(&[
        ("bot_name", identity.bot_name.as_str()),
        ("bot_title", identity.bot_title.as_str()),
        ("primary_user", identity.primary_user.as_str()),
    ]);
    render_template(SYSTEM_PROMPT_TEMPLATE, &vars)
}

/// Append context sections to a base prompt.
///
/// Blank sections are dropped, so callers can pass the output of
/// knowledge lookups directly.
pub fn compose_prompt(base: &str, sections: &[&str]) -> String {
    let mut out = base.trim_end().to_string();
    for section in sections.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        out.push_str("\n\n");
        out.push_str(section);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_template_substitutes_vars() {
        let vars = vars_from_pairs(&[("name", "Vigil")]);
        let rendered = render_template("Hello {{ name }}, {{name}}!", &vars).unwrap();
        assert_eq!(rendered, "Hello Vigil, Vigil!");
    }

    #[test]
    fn test_render_template_errors() {
        let vars = vars_from_pairs(&[]);
        assert_eq!(
            render_template("{{missing}}", &vars),
            Err(PromptError::MissingVar("missing".to_string()))
        );
        assert!(matches!(
            render_template("{{open", &vars),
            Err(PromptError::TemplateParse(_))
        ));
        assert!(matches!(
            render_template("{{ }}", &vars),
            Err(PromptError::TemplateParse(_))
        ));
    }

    #[test]
    fn test_system_prompt_uses_identity() {
        let mut identity = IdentitySettings::default();
        identity.bot_name = "Warden".to_string();
        identity.primary_user = "Ada".to_string();

        let prompt = system_prompt(&identity).unwrap();
        assert!(prompt.starts_with("You are Warden — The Watchful Guardian."));
        assert!(prompt.contains("friend to Ada"));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_compose_prompt_skips_empty_sections() {
        let composed = compose_prompt("Base\n", &["", "## RELEVANT KNOWLEDGE\n\nx\n", "   "]);
        assert_eq!(composed, "Base\n\n## RELEVANT KNOWLEDGE\n\nx");

        assert_eq!(compose_prompt("Base", &[]), "Base");
    }
}
