//! # Category Module
//!
//! ユーザーのクエリを修辞タイプ（カテゴリ）に分類する機能を提供する。
//!
//! ## 設計目的
//!
//! 自然言語理解は行わず、キーワードの部分一致だけで判定する。
//! ルールは固定の優先順で評価され、最初にマッチしたものが採用される：
//!
//! - **causal**: how, why, cause
//! - **comparative**: compare, versus, vs
//! - **procedural**: step, how to, guide
//! - **predictive**: what will happen, predict, forecast
//! - **descriptive**: describe, explain, outline
//! - **evaluative**: evaluate, assessment, judge
//! - **general**: 上記いずれにもマッチしない場合
//!
//! ## モジュール構成
//!
//! - `builtin`: カテゴリと分類ルールの定義
//! - `classifier`: 分類器
//!
//! ## 使用例
//!
//! ```rust
//! use prompt_optimizer_core::category::{classify, match_rule, Category};
//!
//! assert_eq!(classify("Compare X versus Y"), Category::Comparative);
//! assert_eq!(classify(""), Category::General);
//!
//! // "how" は "how to" より先に評価される
//! let m = match_rule("How to write a guide").unwrap();
//! assert_eq!(m.category, Category::Causal);
//! assert_eq!(m.trigger, "how");
//! ```

mod builtin;
mod classifier;

// Re-exports
pub use builtin::{Category, ClassificationRule, CLASSIFICATION_RULES};
pub use classifier::{classify, match_rule, RuleMatch};
