//! Government-institution allow-list.
//!
//! The prompts already ask for Indian government colleges only; this filter is
//! applied to the parsed output regardless, since the model does not always comply.

/// Phrases matched anywhere in the lower-cased institution name.
const GOVERNMENT_PHRASES: &[&str] = &[
    "indian institute",
    "national institute",
    "government college",
    "govt. college",
    "university of delhi",
];

/// Acronyms matched only as whole words, so "Unity College" does not pass as "nit".
const GOVERNMENT_ACRONYMS: &[&str] = &["iit", "nit", "iiit", "jnu", "bhu"];

#[derive(Debug, Clone)]
pub struct InstitutionFilter {
    phrases: &'static [&'static str],
    acronyms: &'static [&'static str],
}

impl Default for InstitutionFilter {
    fn default() -> Self {
        Self {
            phrases: GOVERNMENT_PHRASES,
            acronyms: GOVERNMENT_ACRONYMS,
        }
    }
}

impl InstitutionFilter {
    /// True when the name carries at least one allow-listed phrase or acronym.
    pub fn allows(&self, name: &str) -> bool {
        let lower = name.to_lowercase();

        if self.phrases.iter().any(|p| lower.contains(p)) {
            return true;
        }

        lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .any(|token| self.acronyms.contains(&token))
    }

    /// Keeps only allowed items, preserving order.
    pub fn retain<T, F>(&self, items: Vec<T>, name_of: F) -> Vec<T>
    where
        F: Fn(&T) -> &str,
    {
        items
            .into_iter()
            .filter(|item| self.allows(name_of(item)))
            .collect()
    }
}
