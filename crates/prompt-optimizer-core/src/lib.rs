pub mod category;
pub mod comparison;
pub mod config;
pub mod error;
pub mod llm;
pub mod rewrite;

pub use comparison::{compare, require_credential, Comparison};
pub use config::Config;
pub use error::{OptimizerError, Result};
pub use llm::{CompletionClient, LlmConfig};
pub use rewrite::{optimize, rewrite_as, Optimization, RewriteEntry};

// Category system
pub use category::{
    classify, match_rule, Category, ClassificationRule, RuleMatch, CLASSIFICATION_RULES,
};
