//! Category Classifier
//!
//! テキストを`CLASSIFICATION_RULES`に基づいて分類する。

use tracing::debug;

use super::builtin::{Category, ClassificationRule, CLASSIFICATION_RULES};

/// ルールマッチの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    /// 採用されたカテゴリ
    pub category: Category,
    /// マッチしたトリガー文字列
    pub trigger: &'static str,
}

/// テキストを分類する
///
/// どのルールにもマッチしなければ`Category::General`。
pub fn classify(text: &str) -> Category {
    match match_rule(text) {
        Some(m) => m.category,
        None => Category::General,
    }
}

/// 最初にマッチしたルールとトリガーを返す
pub fn match_rule(text: &str) -> Option<RuleMatch> {
    let lowered = text.to_lowercase();
    let found = match_rules(CLASSIFICATION_RULES, &lowered);

    match &found {
        Some(m) => debug!(category = %m.category, trigger = m.trigger, "prompt classified"),
        None => debug!("no trigger matched, falling back to general"),
    }

    found
}

fn match_rules(rules: &[ClassificationRule], lowered: &str) -> Option<RuleMatch> {
    rules.iter().find_map(|rule| {
        rule.first_trigger_in(lowered).map(|trigger| RuleMatch {
            category: rule.category,
            trigger,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_general() {
        assert_eq!(classify(""), Category::General);
    }

    #[test]
    fn test_no_trigger_is_general() {
        assert_eq!(classify("Tell me about quantum computing"), Category::General);
        assert_eq!(classify("Summarize the quarterly report"), Category::General);
    }

    #[test]
    fn test_each_category() {
        let cases = [
            ("Why did sales drop?", Category::Causal),
            ("Compare X versus Y", Category::Comparative),
            ("Guide me through deploying a web server", Category::Procedural),
            ("Predict next quarter's revenue", Category::Predictive),
            ("Describe the onboarding process", Category::Descriptive),
            ("Evaluate our pricing strategy", Category::Evaluative),
        ];
        for (text, expected) in cases {
            assert_eq!(classify(text), expected, "text: {text}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("FORECAST the market"), Category::Predictive);
        assert_eq!(classify("ExPlAiN this"), Category::Descriptive);
    }

    #[test]
    fn test_how_always_wins_over_how_to() {
        let m = match_rule("How to set up a CI pipeline step by step").unwrap();
        assert_eq!(m.category, Category::Causal);
        assert_eq!(m.trigger, "how");

        // "how" anywhere, even inside another word
        assert_eq!(classify("Show me a comparison versus last year"), Category::Causal);
    }

    #[test]
    fn test_priority_order_resolves_overlap() {
        // comparative is checked before descriptive
        assert_eq!(classify("Explain and compare both plans"), Category::Comparative);
        // procedural before evaluative
        assert_eq!(classify("Judge each step"), Category::Procedural);
    }

    #[test]
    fn test_substring_match_inside_words() {
        // "vs" inside "devs"
        assert_eq!(classify("Hire more devs"), Category::Comparative);
        // "cause" inside "because"
        assert_eq!(classify("I ask because I care"), Category::Causal);
    }

    #[test]
    fn test_first_trigger_reported() {
        let m = match_rule("What will happen to rates? Please forecast.").unwrap();
        assert_eq!(m.category, Category::Predictive);
        assert_eq!(m.trigger, "what will happen");
        assert!(match_rule("plain text").is_none());
    }

    #[test]
    fn test_deterministic() {
        let text = "Outline the plan";
        assert_eq!(classify(text), classify(text));
    }
}
