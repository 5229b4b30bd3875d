//! Categorized phrase lexicons for French and English.
//!
//! Each category is compiled into its own pattern set so that every analyzer
//! only consumes the categories it is responsible for. Patterns are regex
//! fragments wrapped as `(?i)\b(?:...)\b`, matched against normalized text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use super::language::Language;

/// Semantic category of a lexicon entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Job offers, hiring, headhunting vocabulary
    Recruiting,
    /// Stock cold-contact openers ("I came across your profile")
    GenericOpener,
    /// Plural-institutional voice ("we help", "notre solution")
    CommercialTone,
    /// Benefit claims aimed at the reader ("boost your revenue")
    CommercialPitch,
    /// First-person, informal register ("I think", "ton approche")
    AuthenticTone,
    /// Technical jargon (only risky in combination)
    TechnicalTerm,
    /// Marketing buzzwords typical of cold outreach ("synergy", "quick call")
    ColdOutreachBuzzword,
    /// Phrases that only make sense inside an existing thread
    ReplyIndicator,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Recruiting,
        Category::GenericOpener,
        Category::CommercialTone,
        Category::CommercialPitch,
        Category::AuthenticTone,
        Category::TechnicalTerm,
        Category::ColdOutreachBuzzword,
        Category::ReplyIndicator,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Recruiting => "recruiting",
            Category::GenericOpener => "generic_opener",
            Category::CommercialTone => "commercial_tone",
            Category::CommercialPitch => "commercial_pitch",
            Category::AuthenticTone => "authentic_tone",
            Category::TechnicalTerm => "technical_term",
            Category::ColdOutreachBuzzword => "cold_outreach_buzzword",
            Category::ReplyIndicator => "reply_indicator",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// --- French ---

const FR_RECRUITING: &[&str] = &[
    r"opportunités?",
    r"recrut(?:e|ons|ement|ements|eur|euse|eurs)",
    r"postes?",
    r"cdi",
    r"cdd",
    r"candidat(?:e|s|es|ure|ures)?",
    r"rémunération",
    r"salaire",
    r"chasseur de têtes",
    r"offre d'emploi",
    r"profil (?:idéal|recherché)",
];

const FR_GENERIC_OPENER: &[&str] = &[
    r"je me permets",
    r"(?:votre|ton) profil a retenu mon attention",
    r"j'ai (?:vu|remarqué|découvert|consulté) (?:votre|ton) (?:profil|parcours)",
    r"en parcourant (?:votre|ton) profil",
    r"j'espère que (?:vous allez|tu vas) bien",
    r"je souhaitais (?:vous|te) présenter",
];

const FR_COMMERCIAL_TONE: &[&str] = &[
    r"nous proposons",
    r"nous aidons",
    r"nous accompagnons",
    r"nous offrons",
    r"nous sommes spécialisés",
    r"notre (?:solution|plateforme|offre|agence|expertise|produit|société|cabinet)",
    r"nos (?:solutions|clients|services|experts|offres)",
];

const FR_COMMERCIAL_PITCH: &[&str] = &[
    r"transformer (?:votre|vos) (?:entreprise|activité|business|équipes)",
    r"booster (?:votre|vos) (?:croissance|ventes|activité|business|visibilité)",
    r"augmenter (?:votre|vos) (?:chiffre d'affaires|ventes|revenus|productivité)",
    r"(?:optimiser|développer) (?:votre|vos) (?:entreprise|activité|business|ventes)",
    r"gagner du temps",
    r"démo gratuite",
    r"essai gratuit",
    r"sans engagement",
    r"retour sur investissement",
    r"des entreprises comme la vôtre",
];

const FR_AUTHENTIC_TONE: &[&str] = &[
    r"je pense",
    r"personnellement",
    r"à mon avis",
    r"je trouve",
    r"ton approche",
    r"ta démarche",
    r"si ça t'intéresse",
    r"si ça te dit",
    r"qu'en penses-tu",
    r"j'ai (?:bien |beaucoup )?aimé",
    r"je suis curieu(?:x|se)",
    r"je me demandais",
];

// No bare "ai" here: it would fire on "j'ai".
const FR_TECHNICAL_TERM: &[&str] = &[
    r"ia",
    r"rag",
    r"llm",
    r"chiffrement",
    r"encryption",
    r"sécurité",
    r"cybersécurité",
    r"architecture",
    r"cloud",
    r"saas",
    r"api",
    r"données",
    r"machine learning",
    r"apprentissage automatique",
    r"blockchain",
    r"devops",
    r"kubernetes",
    r"automatisation",
];

const FR_COLD_OUTREACH_BUZZWORD: &[&str] = &[
    r"synerg(?:y|ie|ies)",
    r"scal(?:er|abilité|able|ables)",
    r"innovant(?:e|s|es)?",
    r"disrupti(?:f|ve|on)",
    r"révolutionn(?:aire|aires|er)",
    r"levier",
    r"croissance rapide",
    r"gagnant-gagnant",
    r"win-win",
    r"petit (?:call|appel|échange)",
    r"call rapide",
    r"(?:15|20|30) ?min(?:utes)?",
    r"transformation digitale",
    r"niveau supérieur",
    r"fort potentiel",
    r"game changer",
];

const FR_REPLY_INDICATOR: &[&str] = &[
    r"merci pour (?:ta|ton|votre|vos) (?:réponse|retour|message)",
    r"pour répondre à (?:ta|votre) question",
    r"comme (?:tu l'as|vous l'avez) (?:dit|mentionné|évoqué)",
    r"suite à (?:notre|ton|votre) (?:échange|conversation|discussion|message)",
    r"je reviens vers (?:toi|vous)",
    r"(?:tu m'as|vous m'avez) demandé",
];

// --- English ---

const EN_RECRUITING: &[&str] = &[
    r"opportunit(?:y|ies)",
    r"hiring",
    r"recruit(?:er|ers|ing|ment)?",
    r"headhunt(?:er|ers|ing)?",
    r"talent acquisition",
    r"job (?:offer|opening|openings)",
    r"open (?:position|positions|role|roles)",
    r"(?:new|exciting) role",
    r"salary",
    r"compensation package",
];

const EN_GENERIC_OPENER: &[&str] = &[
    r"i came across your profile",
    r"i noticed your (?:experience|profile|background|work)",
    r"i hope (?:this|my) (?:message|email|note) finds you well",
    r"hope you(?:'re| are) (?:doing )?well",
    r"i have an? (?:exciting|great|amazing|unique)",
    r"i wanted to reach out",
    r"reaching out (?:because|to)",
    r"i'd love to connect",
];

const EN_COMMERCIAL_TONE: &[&str] = &[
    r"we help",
    r"we speciali[sz]e",
    r"we offer",
    r"we provide",
    r"we've helped",
    r"our (?:solution|solutions|platform|product|services?|company|agency|clients)",
];

const EN_COMMERCIAL_PITCH: &[&str] = &[
    r"(?:boost|grow|increase|transform|optimi[sz]e|streamline) your (?:business|company|revenue|sales|team|growth|pipeline)",
    r"companies like yours",
    r"roi",
    r"return on investment",
    r"free (?:trial|demo|audit)",
    r"book a demo",
    r"sav(?:e|ing) (?:time|money)",
    r"limited (?:time )?offer",
    r"no commitment",
];

const EN_AUTHENTIC_TONE: &[&str] = &[
    r"i think",
    r"i feel",
    r"personally",
    r"in my opinion",
    r"i'm curious",
    r"i was wondering",
    r"if you're interested",
    r"if you are interested",
    r"what do you think",
    r"your approach",
    r"i (?:really )?(?:enjoyed|liked) your",
];

const EN_TECHNICAL_TERM: &[&str] = &[
    r"ai",
    r"rag",
    r"llm",
    r"encryption",
    r"security",
    r"cybersecurity",
    r"architecture",
    r"cloud",
    r"saas",
    r"api",
    r"data",
    r"machine learning",
    r"blockchain",
    r"devops",
    r"kubernetes",
    r"automation",
];

const EN_COLD_OUTREACH_BUZZWORD: &[&str] = &[
    r"synerg(?:y|ies)",
    r"scal(?:e|es|ing|able)",
    r"quick (?:call|chat)",
    r"hop on a call",
    r"fast-growing",
    r"game[- ]chang(?:er|ing)",
    r"disrupt(?:ive|ion)?",
    r"cutting[- ]edge",
    r"leverage",
    r"innovative",
    r"growth hacking",
    r"win-win",
    r"low-hanging fruit",
    r"touch base",
    r"circle back",
    r"thought leader(?:ship)?",
    r"next level",
    r"(?:15|20|30)[- ]?min(?:ute)?s?",
];

const EN_REPLY_INDICATOR: &[&str] = &[
    r"thanks? (?:you )?for (?:your|the) (?:message|reply|response|answer)",
    r"as you (?:mentioned|said|suggested)",
    r"as we discussed",
    r"following up",
    r"to answer your question",
    r"in response to your",
    r"you asked",
];

fn raw_patterns(language: Language, category: Category) -> &'static [&'static str] {
    match (language, category) {
        (Language::French, Category::Recruiting) => FR_RECRUITING,
        (Language::French, Category::GenericOpener) => FR_GENERIC_OPENER,
        (Language::French, Category::CommercialTone) => FR_COMMERCIAL_TONE,
        (Language::French, Category::CommercialPitch) => FR_COMMERCIAL_PITCH,
        (Language::French, Category::AuthenticTone) => FR_AUTHENTIC_TONE,
        (Language::French, Category::TechnicalTerm) => FR_TECHNICAL_TERM,
        (Language::French, Category::ColdOutreachBuzzword) => FR_COLD_OUTREACH_BUZZWORD,
        (Language::French, Category::ReplyIndicator) => FR_REPLY_INDICATOR,
        (Language::English, Category::Recruiting) => EN_RECRUITING,
        (Language::English, Category::GenericOpener) => EN_GENERIC_OPENER,
        (Language::English, Category::CommercialTone) => EN_COMMERCIAL_TONE,
        (Language::English, Category::CommercialPitch) => EN_COMMERCIAL_PITCH,
        (Language::English, Category::AuthenticTone) => EN_AUTHENTIC_TONE,
        (Language::English, Category::TechnicalTerm) => EN_TECHNICAL_TERM,
        (Language::English, Category::ColdOutreachBuzzword) => EN_COLD_OUTREACH_BUZZWORD,
        (Language::English, Category::ReplyIndicator) => EN_REPLY_INDICATOR,
    }
}

/// Normalize raw text before matching: typographic apostrophes become `'`,
/// whitespace runs collapse to a single space, everything is lowercased.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.replace(['\u{2019}', '\u{2018}', '`'], "'"))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Compiled patterns of a single category
pub struct PatternSet {
    category: Category,
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile a category's pattern fragments.
    pub fn compile(category: Category, fragments: &[&str]) -> Result<Self, regex::Error> {
        let patterns = fragments
            .iter()
            .map(|fragment| Regex::new(&format!(r"(?i)\b(?:{})\b", fragment)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { category, patterns })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Total number of occurrences across all patterns
    pub fn count(&self, text: &str) -> usize {
        self.patterns
            .iter()
            .map(|pattern| pattern.find_iter(text).count())
            .sum()
    }

    /// Every matched fragment, in pattern order then text order
    pub fn matches(&self, text: &str) -> Vec<String> {
        self.patterns
            .iter()
            .flat_map(|pattern| pattern.find_iter(text).map(|m| m.as_str().to_string()))
            .collect()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(text))
    }
}

/// All categories for one language
pub struct Lexicon {
    language: Language,
    sets: HashMap<Category, PatternSet>,
}

impl Lexicon {
    /// Build the built-in lexicon for a language.
    pub fn builtin(language: Language) -> Result<Self, regex::Error> {
        let mut sets = HashMap::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let set = PatternSet::compile(category, raw_patterns(language, category))?;
            sets.insert(category, set);
        }

        Ok(Self { language, sets })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Pattern set for a category. Every category is always present.
    pub fn get(&self, category: Category) -> &PatternSet {
        &self.sets[&category]
    }
}

/// Read-only lexicons for every supported language
pub struct LexiconStore {
    french: Lexicon,
    english: Lexicon,
}

// Compiled once; the fragments are static so a failure here is a programming error.
static BUILTIN: LazyLock<Arc<LexiconStore>> = LazyLock::new(|| {
    Arc::new(LexiconStore {
        french: Lexicon::builtin(Language::French).expect("Invalid regex: French lexicon"),
        english: Lexicon::builtin(Language::English).expect("Invalid regex: English lexicon"),
    })
});

impl LexiconStore {
    /// Shared handle to the built-in lexicons
    pub fn builtin() -> Arc<LexiconStore> {
        Arc::clone(&BUILTIN)
    }

    pub fn for_language(&self, language: Language) -> &Lexicon {
        match language {
            Language::French => &self.french,
            Language::English => &self.english,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_category_compiles() {
        let store = LexiconStore::builtin();
        for language in [Language::French, Language::English] {
            let lexicon = store.for_language(language);
            assert_eq!(lexicon.language(), language);
            for category in Category::ALL {
                assert!(
                    !lexicon.get(category).is_empty(),
                    "{} has no {} patterns",
                    language.code(),
                    category
                );
            }
        }
    }

    #[test]
    fn test_no_pattern_shared_between_categories() {
        for language in [Language::French, Language::English] {
            let mut seen: HashSet<&str> = HashSet::new();
            for category in Category::ALL {
                for fragment in raw_patterns(language, category) {
                    assert!(
                        seen.insert(fragment),
                        "'{}' appears in more than one {} category",
                        fragment,
                        language.code()
                    );
                }
            }
        }
    }

    #[test]
    fn test_word_boundaries() {
        let store = LexiconStore::builtin();
        let technical = store.for_language(Language::French).get(Category::TechnicalTerm);

        assert_eq!(technical.count("notre plateforme aide les équipes"), 0);
        assert_eq!(technical.count("j'ai vu ton profil"), 0);
        assert_eq!(technical.count("avec rag et ia générative"), 2);
    }

    #[test]
    fn test_count_is_per_occurrence() {
        let store = LexiconStore::builtin();
        let commercial = store.for_language(Language::English).get(Category::CommercialTone);

        assert_eq!(commercial.count("we help you. we help them."), 2);
        assert_eq!(
            commercial.matches("our platform, we help"),
            vec!["we help".to_string(), "our platform".to_string()]
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Qu\u{2019}en   penses-tu ?"), "qu'en penses-tu ?");
        assert_eq!(normalize("  Hello\n\tWorld "), "hello world");
        assert_eq!(normalize(""), "");
    }
}
