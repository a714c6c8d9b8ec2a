//! Section rule table.
//!
//! # Responsibility
//! - Map a free-text website idea to an ordered list of page sections.
//! - Provide the one rule table used by both the backend (authoritative
//!   derivation) and the client (optimistic render).
//!
//! # Invariants
//! - Matching is case-insensitive substring search.
//! - Rules are evaluated in declaration order; the first match wins.
//! - Every idea maps to exactly one template; `Default` covers no-match.

use serde::{Deserialize, Serialize};

/// Named template selected by the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionTemplate {
    Bakery,
    Restaurant,
    Shop,
    Portfolio,
    /// Applied when no keyword rule matches.
    Default,
}

struct SectionRule {
    template: SectionTemplate,
    keywords: &'static [&'static str],
}

const RULES: &[SectionRule] = &[
    SectionRule {
        template: SectionTemplate::Bakery,
        keywords: &["bakery"],
    },
    SectionRule {
        template: SectionTemplate::Restaurant,
        keywords: &["restaurant"],
    },
    SectionRule {
        template: SectionTemplate::Shop,
        keywords: &["shop", "store"],
    },
    SectionRule {
        template: SectionTemplate::Portfolio,
        keywords: &["portfolio"],
    },
];

const BAKERY_SECTIONS: &[&str] = &[
    "Hero - Fresh Baked Goods",
    "Our Story",
    "Menu",
    "Location & Hours",
];
const RESTAURANT_SECTIONS: &[&str] = &["Hero - Fine Dining", "About Chef", "Menu", "Reservations"];
const SHOP_SECTIONS: &[&str] = &[
    "Hero - Featured Products",
    "Product Catalog",
    "About Us",
    "Shipping & Returns",
    "Contact",
];
const PORTFOLIO_SECTIONS: &[&str] = &[
    "Hero - Introduction",
    "Projects",
    "Skills",
    "About Me",
    "Contact",
];
const DEFAULT_SECTIONS: &[&str] = &["Hero", "About", "Services", "Testimonials", "Contact"];

impl SectionTemplate {
    /// Selects the template for an idea.
    pub fn classify(idea: &str) -> Self {
        let lowered = idea.to_lowercase();
        RULES
            .iter()
            .find(|rule| {
                rule.keywords
                    .iter()
                    .any(|keyword| lowered.contains(keyword))
            })
            .map_or(Self::Default, |rule| rule.template)
    }

    /// Ordered section names for this template.
    pub fn section_names(self) -> &'static [&'static str] {
        match self {
            Self::Bakery => BAKERY_SECTIONS,
            Self::Restaurant => RESTAURANT_SECTIONS,
            Self::Shop => SHOP_SECTIONS,
            Self::Portfolio => PORTFOLIO_SECTIONS,
            Self::Default => DEFAULT_SECTIONS,
        }
    }

    /// Owned copy of the section list, as stored on a project.
    pub fn sections(self) -> Vec<String> {
        self.section_names()
            .iter()
            .map(|name| (*name).to_string())
            .collect()
    }
}

/// Derives the section list for an idea. Pure and total.
pub fn derive_sections(idea: &str) -> Vec<String> {
    SectionTemplate::classify(idea).sections()
}

/// Normalizes an idea into the key used for client-side caching.
///
/// Trims surrounding whitespace and lowercases; two ideas with the same key
/// always derive the same sections.
pub fn normalize_idea(idea: &str) -> String {
    idea.trim().to_lowercase()
}
