//! Language and internationalization types

use serde::{Deserialize, Serialize};

/// Language preference for internationalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl Language {
    /// Extract language from an Accept-Language header value
    pub fn from_accept_language(header: &str) -> Self {
        let header_lower = header.to_lowercase();
        if header_lower.contains("zh") {
            Language::Chinese
        } else {
            Language::English
        }
    }

    /// Get language code (ISO 639-1)
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_chinese_preference() {
        assert_eq!(
            Language::from_accept_language("zh-CN,zh;q=0.9,en;q=0.8"),
            Language::Chinese
        );
        assert_eq!(
            Language::from_accept_language("en-US,en;q=0.9"),
            Language::English
        );
        assert_eq!(Language::from_accept_language(""), Language::English);
    }
}
