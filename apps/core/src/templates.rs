//! Response template selection.
//!
//! Picks a localized reply for messages classified as prospection. Recruiting
//! messages get the recruiter template, everything else the generic one.

use std::collections::HashMap;

use crate::brain::{ClassificationResult, Language};

const DEFAULT_RECRUITER_EN: &str = "Hi {name}, thanks for reaching out! I'm not actively looking for new opportunities at the moment, but feel free to connect, I'm always open to interesting conversations.";
const DEFAULT_RECRUITER_FR: &str = "Bonjour {name}, merci pour votre message ! Je ne suis pas en recherche active actuellement, mais n'hésitez pas à rester en contact.";
const DEFAULT_SPAM_EN: &str = "Thanks for the message, but I'm not interested. Best of luck!";
const DEFAULT_SPAM_FR: &str = "Merci pour le message, mais ce n'est pas pour moi. Bonne continuation !";

const FALLBACK_KEY: &str = "spam_en";

/// Template family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Recruiter,
    Spam,
}

impl TemplateKind {
    fn prefix(&self) -> &'static str {
        match self {
            TemplateKind::Recruiter => "recruiter",
            TemplateKind::Spam => "spam",
        }
    }
}

/// Template key such as `recruiter_fr`
pub fn template_key(kind: TemplateKind, language: Language) -> String {
    format!("{}_{}", kind.prefix(), language.code())
}

/// Localized response templates
#[derive(Debug, Clone)]
pub struct ResponseTemplates {
    templates: HashMap<String, String>,
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        let templates = [
            ("recruiter_en", DEFAULT_RECRUITER_EN),
            ("recruiter_fr", DEFAULT_RECRUITER_FR),
            ("spam_en", DEFAULT_SPAM_EN),
            ("spam_fr", DEFAULT_SPAM_FR),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self { templates }
    }
}

impl ResponseTemplates {
    /// Replace the defaults with the given overrides. An override map
    /// replaces the whole set, as `RESPONSE_TEMPLATES` does.
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Self {
        if overrides.is_empty() {
            Self::default()
        } else {
            Self {
                templates: overrides.clone(),
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Render a template, falling back to `spam_en`, then to an empty string.
    pub fn render(&self, kind: TemplateKind, language: Language, sender_name: &str) -> String {
        let key = template_key(kind, language);
        self.get(&key)
            .or_else(|| self.get(FALLBACK_KEY))
            .unwrap_or_default()
            .replace("{name}", sender_name)
    }

    /// Suggested reply for a classification, `None` when it is not spam.
    pub fn select(&self, result: &ClassificationResult, sender_name: &str) -> Option<String> {
        if !result.is_spam {
            return None;
        }
        let kind = if result.is_recruiting() {
            TemplateKind::Recruiter
        } else {
            TemplateKind::Spam
        };
        Some(self.render(kind, result.language, sender_name))
    }
}
