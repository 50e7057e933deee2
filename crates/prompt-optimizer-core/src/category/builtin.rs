//! Builtin Category Definitions
//!
//! プロンプトの修辞タイプと、その判定に使うキーワードルール。
//! ルールは配列の順に評価され、最初にマッチしたものが採用される。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OptimizerError;

/// プロンプトの修辞タイプ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Causal,
    Comparative,
    Procedural,
    Predictive,
    Descriptive,
    Evaluative,
    /// どのルールにもマッチしない場合のフォールバック
    #[default]
    General,
}

impl Category {
    /// 全カテゴリ（ルール評価順 + General）
    pub const ALL: [Category; 7] = [
        Category::Causal,
        Category::Comparative,
        Category::Procedural,
        Category::Predictive,
        Category::Descriptive,
        Category::Evaluative,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Causal => "causal",
            Category::Comparative => "comparative",
            Category::Procedural => "procedural",
            Category::Predictive => "predictive",
            Category::Descriptive => "descriptive",
            Category::Evaluative => "evaluative",
            Category::General => "general",
        }
    }

    /// このカテゴリを判定するルール（Generalにはルールがない）
    pub fn rule(&self) -> Option<&'static ClassificationRule> {
        CLASSIFICATION_RULES.iter().find(|r| r.category == *self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = OptimizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| OptimizerError::UnknownCategory {
                name: s.to_string(),
            })
    }
}

/// キーワードによる分類ルールの静的定義
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    /// マッチ時に割り当てるカテゴリ
    pub category: Category,
    /// トリガー文字列（小文字、部分一致で判定）
    pub triggers: &'static [&'static str],
}

impl ClassificationRule {
    /// 小文字化済みのテキストにマッチする最初のトリガーを返す
    pub fn first_trigger_in(&self, lowered: &str) -> Option<&'static str> {
        self.triggers.iter().copied().find(|t| lowered.contains(t))
    }
}

/// 分類ルール（優先度順）
///
/// "how" (causal) は "how to" (procedural) を包含するため、
/// "how to" を含むテキストは常に causal になる。互換性のためこの順序を維持する。
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        category: Category::Causal,
        triggers: &["how", "why", "cause"],
    },
    ClassificationRule {
        category: Category::Comparative,
        triggers: &["compare", "versus", "vs"],
    },
    ClassificationRule {
        category: Category::Procedural,
        triggers: &["step", "how to", "guide"],
    },
    ClassificationRule {
        category: Category::Predictive,
        triggers: &["what will happen", "predict", "forecast"],
    },
    ClassificationRule {
        category: Category::Descriptive,
        triggers: &["describe", "explain", "outline"],
    },
    ClassificationRule {
        category: Category::Evaluative,
        triggers: &["evaluate", "assessment", "judge"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_cover_every_category_but_general() {
        for category in Category::ALL {
            match category {
                Category::General => assert!(category.rule().is_none()),
                _ => assert!(category.rule().is_some(), "no rule for {category}"),
            }
        }
    }

    #[test]
    fn test_rule_order() {
        let order: Vec<Category> = CLASSIFICATION_RULES.iter().map(|r| r.category).collect();
        assert_eq!(order, Category::ALL[..6].to_vec());
    }

    #[test]
    fn test_triggers_are_lowercase() {
        for rule in CLASSIFICATION_RULES {
            for trigger in rule.triggers {
                assert_eq!(*trigger, trigger.to_lowercase());
            }
        }
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("causal".parse::<Category>().unwrap(), Category::Causal);
        assert_eq!(" General ".parse::<Category>().unwrap(), Category::General);
        assert_eq!("EVALUATIVE".parse::<Category>().unwrap(), Category::Evaluative);
        assert!("bogus".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Predictive).unwrap();
        assert_eq!(json, "\"predictive\"");
        let parsed: Category = serde_json::from_str("\"descriptive\"").unwrap();
        assert_eq!(parsed, Category::Descriptive);
    }
}
