//! Ordered path-pattern authorization rules.

use tracing::trace;

use crate::http::security::path_matcher::PathPattern;
use crate::http::security::principal::{Principal, Role};

/// What a matched rule requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// No credentials needed.
    Public,
    /// A principal holding exactly this role.
    Role(Role),
}

/// One pattern/requirement pair.
#[derive(Clone, Debug)]
pub struct Rule {
    pattern: PathPattern,
    access: Access,
}

impl Rule {
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn access(&self) -> Access {
        self.access
    }
}

/// Outcome of an authorization decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyCause),
}

/// Why a request was denied; drives the 401-vs-403 choice in the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenyCause {
    /// A role-gated rule matched but no principal was presented.
    AuthenticationRequired,
    /// The principal's role does not satisfy the matched rule.
    InsufficientRole,
    /// No rule matched the path at all.
    NoMatchingRule,
}

/// Ordered first-match rule list.
///
/// Rules are evaluated in declaration order and the first matching pattern
/// wins. There is no specificity resolution: more specific or open rules must
/// be declared before more general closed ones. A path no rule matches is
/// denied.
///
/// # Example
/// ```
/// use snippet_security_core::http::security::rules::{Decision, RuleTable};
/// use snippet_security_core::http::security::Role;
///
/// let rules = RuleTable::builder()
///     .permit_all("/manage/status")
///     .require_role("/manage/**", Role::Actuator)
///     .require_role("/api/**", Role::Admin)
///     .require_role("/**", Role::User)
///     .build();
///
/// assert_eq!(rules.decide("/manage/status", None), Decision::Allow);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder { rules: Vec::new() }
    }

    /// The first matching rule for a path, if any.
    fn first_match(&self, path: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.pattern.matches(path))
    }

    /// What the path requires, before any authentication has happened.
    /// `None` means no rule matches, which the caller must treat as deny.
    pub fn required_access(&self, path: &str) -> Option<Access> {
        self.first_match(path).map(|rule| rule.access)
    }

    /// Decides whether the (possibly absent) principal may access the path.
    pub fn decide(&self, path: &str, principal: Option<&Principal>) -> Decision {
        let Some(rule) = self.first_match(path) else {
            trace!(path, "no authorization rule matches");
            return Decision::Deny(DenyCause::NoMatchingRule);
        };

        match (rule.access, principal) {
            (Access::Public, _) => Decision::Allow,
            (Access::Role(_), None) => Decision::Deny(DenyCause::AuthenticationRequired),
            (Access::Role(required), Some(principal)) => {
                if principal.has_role(required) {
                    Decision::Allow
                } else {
                    trace!(
                        path,
                        required = %required,
                        held = %principal.role(),
                        "principal role does not satisfy rule"
                    );
                    Decision::Deny(DenyCause::InsufficientRole)
                }
            }
        }
    }

    /// Number of declared rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder preserving declaration order.
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    rules: Vec<Rule>,
}

impl RuleTableBuilder {
    /// Declares an open rule: the pattern is reachable without credentials.
    pub fn permit_all(mut self, pattern: &str) -> Self {
        self.rules.push(Rule {
            pattern: PathPattern::new(pattern),
            access: Access::Public,
        });
        self
    }

    /// Declares a closed rule gated on the given role.
    pub fn require_role(mut self, pattern: &str, role: Role) -> Self {
        self.rules.push(Rule {
            pattern: PathPattern::new(pattern),
            access: Access::Role(role),
        });
        self
    }

    pub fn build(self) -> RuleTable {
        RuleTable { rules: self.rules }
    }
}
