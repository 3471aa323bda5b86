// ABOUTME: Defines the confirmation policy - which tool calls run freely,
// ABOUTME: which are refused, and which need a human decision.

use std::sync::Arc;

use tracing::warn;

/// The decision made by a policy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Run the tool without asking.
    Allow,
    /// Refuse the tool call.
    Deny,
    /// Ask the user for approval.
    Ask,
}

/// A condition function for conditional rules.
pub type ConditionFn = Arc<dyn Fn(&serde_json::Value) -> Decision + Send + Sync>;

/// Which tool names a rule applies to.
pub enum Matcher {
    Exact(String),
    Pattern(glob::Pattern),
}

impl Matcher {
    fn matches(&self, tool: &str) -> bool {
        match self {
            Matcher::Exact(name) => name == tool,
            Matcher::Pattern(pattern) => pattern.matches(tool),
        }
    }
}

/// A rule in the policy.
pub enum PolicyRule {
    /// A fixed decision for matching tools.
    Fixed { matcher: Matcher, decision: Decision },

    /// Decision computed from the call arguments.
    Conditional { tool: String, condition: ConditionFn },
}

/// A policy that evaluates tool calls. First matching rule wins.
pub struct Policy {
    rules: Vec<PolicyRule>,
    default: Decision,
}

impl Policy {
    /// Create a new policy builder.
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::new()
    }

    /// A policy that asks about every call.
    pub fn ask_all() -> Self {
        Self::builder().default(Decision::Ask).build()
    }

    /// A policy that allows every call.
    pub fn allow_all() -> Self {
        Self::builder().default(Decision::Allow).build()
    }

    /// Evaluate a tool call by tool name and arguments.
    pub fn evaluate(&self, tool: &str, params: &serde_json::Value) -> Decision {
        for rule in &self.rules {
            match rule {
                PolicyRule::Fixed { matcher, decision } if matcher.matches(tool) => {
                    return *decision;
                }
                PolicyRule::Conditional { tool: t, condition } if t == tool => {
                    return condition(params);
                }
                _ => continue,
            }
        }
        self.default
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::ask_all()
    }
}

/// Builder for constructing policies.
pub struct PolicyBuilder {
    rules: Vec<PolicyRule>,
    default: Decision,
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyBuilder {
    /// Create a new builder. Unmatched tools are asked about.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default: Decision::Ask,
        }
    }

    fn exact(mut self, tool: impl Into<String>, decision: Decision) -> Self {
        self.rules.push(PolicyRule::Fixed {
            matcher: Matcher::Exact(tool.into()),
            decision,
        });
        self
    }

    fn pattern(mut self, pattern: &str, decision: Decision) -> Self {
        match glob::Pattern::new(pattern) {
            Ok(p) => self.rules.push(PolicyRule::Fixed {
                matcher: Matcher::Pattern(p),
                decision,
            }),
            Err(e) => warn!(pattern, error = %e, "ignoring invalid policy pattern"),
        }
        self
    }

    /// Allow a tool by exact name.
    pub fn allow(self, tool: impl Into<String>) -> Self {
        self.exact(tool, Decision::Allow)
    }

    /// Deny a tool by exact name.
    pub fn deny(self, tool: impl Into<String>) -> Self {
        self.exact(tool, Decision::Deny)
    }

    /// Ask about a tool by exact name.
    pub fn ask(self, tool: impl Into<String>) -> Self {
        self.exact(tool, Decision::Ask)
    }

    /// Allow tools matching a glob pattern.
    pub fn allow_pattern(self, pattern: &str) -> Self {
        self.pattern(pattern, Decision::Allow)
    }

    /// Deny tools matching a glob pattern.
    pub fn deny_pattern(self, pattern: &str) -> Self {
        self.pattern(pattern, Decision::Deny)
    }

    /// Ask about tools matching a glob pattern.
    pub fn ask_pattern(self, pattern: &str) -> Self {
        self.pattern(pattern, Decision::Ask)
    }

    /// Add a conditional rule.
    pub fn conditional<F>(mut self, tool: impl Into<String>, condition: F) -> Self
    where
        F: Fn(&serde_json::Value) -> Decision + Send + Sync + 'static,
    {
        self.rules.push(PolicyRule::Conditional {
            tool: tool.into(),
            condition: Arc::new(condition),
        });
        self
    }

    /// Set the default decision for unmatched tools.
    pub fn default(mut self, decision: Decision) -> Self {
        self.default = decision;
        self
    }

    /// Build the policy.
    pub fn build(self) -> Policy {
        Policy {
            rules: self.rules,
            default: self.default,
        }
    }
}
