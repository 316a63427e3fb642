// src/domain/issue/analysis.rs
//! Rule-based triage annotation attached to an issue when it is reported.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Moderate,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Moderate => "Moderate",
            Severity::High => "High",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Medium => "Medium",
            Priority::High => "High",
        })
    }
}

const ESCALATION_WORDS: [&str; 2] = ["urgent", "immediately"];
const SENSITIVE_SITES: [&str; 2] = ["school", "hospital"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub severity: Severity,
    pub priority: Priority,
}

impl Assessment {
    /// Classify a description. The two rules are independent; both may fire.
    pub fn of(description: &str) -> Self {
        let text = description.to_lowercase();
        let mut assessment = Self {
            severity: Severity::Moderate,
            priority: Priority::Medium,
        };

        if ESCALATION_WORDS.iter().any(|word| text.contains(word)) {
            assessment.severity = Severity::High;
            assessment.priority = Priority::High;
        }
        if SENSITIVE_SITES.iter().any(|word| text.contains(word)) {
            assessment.priority = Priority::High;
        }

        assessment
    }
}

/// Produce the annotation text persisted with a new issue.
pub fn analyze(issue_type: &str, description: &str) -> String {
    let Assessment { severity, priority } = Assessment::of(description);
    format!(
        "Automated analysis for issue type '{issue_type}':\n\
         - Estimated severity: {severity}\n\
         - Suggested resolution priority: {priority}\n\
         - Notes: Location and citizen description indicate that field\n  \
         inspection by the respective civic department is recommended."
    )
}
