//! Prompt rewriting.
//!
//! Appends a fixed, category-specific instruction to the user's prompt and
//! pairs it with a rationale explaining what the extra instruction buys.
//!
//! ```rust
//! use prompt_optimizer_core::{optimize, Category};
//!
//! let result = optimize("Tell me about quantum computing");
//! assert_eq!(result.category, Category::General);
//! assert_eq!(
//!     result.augmented,
//!     "Tell me about quantum computing - Could you elaborate more on this topic?"
//! );
//! ```

use serde::Serialize;

use crate::category::{classify, Category};

/// Separator placed between the original prompt and the suffix
pub const SUFFIX_SEPARATOR: &str = " - ";

/// Suffix and rationale for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewriteEntry {
    pub suffix: &'static str,
    pub rationale: &'static str,
}

const CAUSAL: RewriteEntry = RewriteEntry {
    suffix: "Please explain the causes and their effects in detail.",
    rationale: "Optimized to explore deeper causal relationships, providing a basis for targeted interventions.",
};

const COMPARATIVE: RewriteEntry = RewriteEntry {
    suffix: "Include detailed comparisons of each option's efficiency, cost, and environmental impact.",
    rationale: "Optimized for detailed comparison to aid strategic decisions in product development or marketing.",
};

const PROCEDURAL: RewriteEntry = RewriteEntry {
    suffix: "Outline the steps involved in detail.",
    rationale: "Enhanced to provide a clear, actionable guide, reducing execution risk and enhancing operational clarity.",
};

const PREDICTIVE: RewriteEntry = RewriteEntry {
    suffix: "What predictions can be made based on current trends?",
    rationale: "Optimized to incorporate forecasting, helping in strategic planning and risk management.",
};

const DESCRIPTIVE: RewriteEntry = RewriteEntry {
    suffix: "Provide a comprehensive description including key stages and their significance.",
    rationale: "Enhanced to provide a thorough understanding, foundational for informed decision-making.",
};

const EVALUATIVE: RewriteEntry = RewriteEntry {
    suffix: "Evaluate and provide reasoning for your judgment.",
    rationale: "Optimized to include evaluation with justifications, crucial for validating business strategies.",
};

const GENERAL: RewriteEntry = RewriteEntry {
    suffix: "Could you elaborate more on this topic?",
    rationale: "General optimization for more detailed information, promoting comprehensive understanding.",
};

impl Category {
    /// Rewrite template for this category
    pub fn rewrite(&self) -> &'static RewriteEntry {
        match self {
            Category::Causal => &CAUSAL,
            Category::Comparative => &COMPARATIVE,
            Category::Procedural => &PROCEDURAL,
            Category::Predictive => &PREDICTIVE,
            Category::Descriptive => &DESCRIPTIVE,
            Category::Evaluative => &EVALUATIVE,
            Category::General => &GENERAL,
        }
    }
}

/// Result of optimizing a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Optimization {
    /// Original prompt followed by the category suffix
    pub augmented: String,
    /// Why the augmented prompt should get a better answer
    pub rationale: &'static str,
    pub category: Category,
}

impl Optimization {
    pub fn into_parts(self) -> (String, &'static str, Category) {
        (self.augmented, self.rationale, self.category)
    }
}

/// Classify `text` and append the matching suffix
pub fn optimize(text: &str) -> Optimization {
    rewrite_as(text, classify(text))
}

/// Rewrite `text` using a known category, skipping classification
pub fn rewrite_as(text: &str, category: Category) -> Optimization {
    let entry = category.rewrite();
    Optimization {
        augmented: format!("{text}{SUFFIX_SEPARATOR}{}", entry.suffix),
        rationale: entry.rationale,
        category,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_augmented_is_text_plus_suffix() {
        let inputs = [
            "",
            "Why is the sky blue?",
            "Compare X versus Y",
            "Guide me through deploying a web server",
            "Forecast demand",
            "Describe the pipeline",
            "Assessment of risk",
            "hello",
        ];
        for text in inputs {
            let result = optimize(text);
            let expected = format!("{} - {}", text, classify(text).rewrite().suffix);
            assert_eq!(result.augmented, expected);
            assert_eq!(result.category, classify(text));
        }
    }

    #[test]
    fn test_causal_scenario() {
        let result = optimize("How does inflation affect interest rates?");
        assert_eq!(result.category, Category::Causal);
        assert!(result
            .augmented
            .ends_with("Please explain the causes and their effects in detail."));
        assert!(result.rationale.contains("causal relationships"));
    }

    #[test]
    fn test_procedural_scenario() {
        let result = optimize("Guide me through deploying a web server");
        assert_eq!(result.category, Category::Procedural);
        assert_eq!(
            result.augmented,
            "Guide me through deploying a web server - Outline the steps involved in detail."
        );
    }

    #[test]
    fn test_general_scenario() {
        let (augmented, rationale, category) =
            optimize("Tell me about quantum computing").into_parts();
        assert_eq!(category, Category::General);
        assert!(augmented.ends_with("Could you elaborate more on this topic?"));
        assert!(rationale.contains("comprehensive understanding"));
    }

    #[test]
    fn test_empty_input() {
        let result = optimize("");
        assert_eq!(result.category, Category::General);
        assert_eq!(result.augmented, " - Could you elaborate more on this topic?");
    }

    #[test]
    fn test_rationale_phrases() {
        let phrases = [
            (Category::Causal, "targeted interventions"),
            (Category::Comparative, "strategic decisions"),
            (Category::Procedural, "execution risk"),
            (Category::Predictive, "risk management"),
            (Category::Descriptive, "informed decision-making"),
            (Category::Evaluative, "business strategies"),
            (Category::General, "comprehensive understanding"),
        ];
        for (category, phrase) in phrases {
            assert!(
                category.rewrite().rationale.contains(phrase),
                "{category} rationale missing '{phrase}'"
            );
        }
    }

    #[test]
    fn test_rewrite_as_skips_classification() {
        let result = rewrite_as("How are you", Category::Evaluative);
        assert_eq!(result.category, Category::Evaluative);
        assert!(result
            .augmented
            .ends_with("Evaluate and provide reasoning for your judgment."));
    }
}
