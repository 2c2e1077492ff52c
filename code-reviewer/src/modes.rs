//! Review modes: what the model is asked to focus on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ReviewError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewMode {
    #[default]
    Comprehensive,
    Security,
    Performance,
    Readability,
    BestPractices,
    Documentation,
    TestGeneration,
}

impl ReviewMode {
    pub const ALL: [ReviewMode; 7] = [
        ReviewMode::Comprehensive,
        ReviewMode::Security,
        ReviewMode::Performance,
        ReviewMode::Readability,
        ReviewMode::BestPractices,
        ReviewMode::Documentation,
        ReviewMode::TestGeneration,
    ];

    pub fn value(self) -> &'static str {
        match self {
            ReviewMode::Comprehensive => "comprehensive",
            ReviewMode::Security => "security",
            ReviewMode::Performance => "performance",
            ReviewMode::Readability => "readability",
            ReviewMode::BestPractices => "best_practices",
            ReviewMode::Documentation => "documentation",
            ReviewMode::TestGeneration => "test_generation",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReviewMode::Comprehensive => "Comprehensive",
            ReviewMode::Security => "Security",
            ReviewMode::Performance => "Performance",
            ReviewMode::Readability => "Readability",
            ReviewMode::BestPractices => "Best Practices",
            ReviewMode::Documentation => "Documentation",
            ReviewMode::TestGeneration => "Test Generation",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ReviewMode::Comprehensive => {
                "A full review covering correctness, security, performance and style."
            }
            ReviewMode::Security => "Looks for vulnerabilities, unsafe input handling and secrets.",
            ReviewMode::Performance => "Finds bottlenecks, wasted allocations and slow algorithms.",
            ReviewMode::Readability => "Suggests clearer naming, structure and simpler control flow.",
            ReviewMode::BestPractices => "Checks idioms and conventions of the language.",
            ReviewMode::Documentation => "Reviews comments and docs, and proposes missing ones.",
            ReviewMode::TestGeneration => "Writes unit tests for the given code.",
        }
    }

    /// Instruction block sent to the model for this mode.
    pub(crate) fn focus(self) -> &'static str {
        match self {
            ReviewMode::Comprehensive => {
                "Review the code thoroughly: bugs and edge cases, security issues, performance, \
                 readability and maintainability. Group findings by severity."
            }
            ReviewMode::Security => {
                "Focus only on security: injection, unsafe deserialization, missing input \
                 validation, authentication and authorization flaws, leaked secrets. Rate each \
                 finding's severity."
            }
            ReviewMode::Performance => {
                "Focus only on performance: algorithmic complexity, unnecessary allocations or \
                 copies, blocking calls, N+1 patterns. Estimate the impact of each finding."
            }
            ReviewMode::Readability => {
                "Focus only on readability: naming, function length, nesting, duplication and \
                 dead code. Show the improved version of each snippet you criticise."
            }
            ReviewMode::BestPractices => {
                "Focus on idiomatic usage and the conventions of the language and its \
                 ecosystem, including error handling and API design."
            }
            ReviewMode::Documentation => {
                "Focus on documentation: missing or stale comments, unclear public APIs. \
                 Propose doc comments in the language's conventional format."
            }
            ReviewMode::TestGeneration => {
                "Write a complete unit test suite for the code using the language's most common \
                 test framework. Cover normal cases, edge cases and error paths. Reply with the \
                 test code and a short explanation."
            }
        }
    }

    /// Whether the mode can be applied to a whole repository at once.
    pub fn supports_repository(self) -> bool {
        !matches!(self, ReviewMode::TestGeneration)
    }
}

impl fmt::Display for ReviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for ReviewMode {
    type Err = ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ReviewMode::ALL
            .into_iter()
            .find(|m| m.value().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ReviewError::UnknownMode(s.to_string()))
    }
}
