use crate::models::MatchMode;

/// Build tools and frameworks worth calling out in a report
pub const DEFAULT_HEAVY_KEYWORDS: &[&str] = &[
    "webpack",
    "babel",
    "typescript",
    "react",
    "next",
    "vite",
    "rollup",
    "eslint",
    "prettier",
    "jest",
    "vitest",
    "cypress",
    "playwright",
    "@types/node",
    "@types/react",
    "tailwindcss",
    "postcss",
];

/// Flags dependency names that match a keyword list
#[derive(Debug, Clone)]
pub struct HeavyMatcher {
    keywords: Vec<String>,
    mode: MatchMode,
}

impl Default for HeavyMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_HEAVY_KEYWORDS.iter().copied(), MatchMode::Exact)
    }
}

impl HeavyMatcher {
    pub fn new<I, S>(keywords: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            mode,
        }
    }

    /// Same keywords, different comparison
    pub fn with_mode(&self, mode: MatchMode) -> Self {
        Self {
            keywords: self.keywords.clone(),
            mode,
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// First keyword that `name` matches, if any
    pub fn matches(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();

        self.keywords
            .iter()
            .find(|keyword| match self.mode {
                MatchMode::Exact => name == keyword.as_str(),
                MatchMode::Substring => name.contains(keyword.as_str()),
            })
            .map(String::as_str)
    }
}
