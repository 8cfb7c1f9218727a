//! Tool descriptors and exit-code classification

use std::ops::RangeInclusive;

/// What a scanner looks for; selected on the command line.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    /// Committed credentials (ecosystem-independent)
    Secrets,
    Security,
    Static,
    /// Known-vulnerable dependencies
    Vulns,
}

/// Exit codes a tool documents as "ran fine, found problems".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueCodes {
    Exact(&'static [i32]),
    Range(RangeInclusive<i32>),
    /// Every non-zero code (tools without a documented convention)
    AnyNonZero,
}

impl IssueCodes {
    pub fn contains(&self, code: i32) -> bool {
        match self {
            IssueCodes::Exact(codes) => codes.contains(&code),
            IssueCodes::Range(range) => range.contains(&code),
            IssueCodes::AnyNonZero => code != 0,
        }
    }
}

/// How a tool's exit status maps to an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitPolicy {
    pub issue_codes: IssueCodes,
    /// Exit 0 with non-empty output still means issues (staticcheck)
    pub output_is_issue: bool,
}

impl ExitPolicy {
    pub const fn codes(codes: &'static [i32]) -> Self {
        Self {
            issue_codes: IssueCodes::Exact(codes),
            output_is_issue: false,
        }
    }

    pub const fn range(range: RangeInclusive<i32>) -> Self {
        Self {
            issue_codes: IssueCodes::Range(range),
            output_is_issue: false,
        }
    }

    pub const fn any_non_zero() -> Self {
        Self {
            issue_codes: IssueCodes::AnyNonZero,
            output_is_issue: false,
        }
    }

    pub const fn with_output_is_issue(mut self) -> Self {
        self.output_is_issue = true;
        self
    }

    /// Classify a finished run.
    ///
    /// `code` is `None` when the process was killed by a signal.
    pub fn classify(&self, code: Option<i32>, output: &str) -> ToolOutcome {
        match code {
            Some(0) if self.output_is_issue && !output.trim().is_empty() => {
                ToolOutcome::IssuesFound
            }
            Some(0) => ToolOutcome::Clean,
            Some(code) if self.issue_codes.contains(code) => ToolOutcome::IssuesFound,
            _ => ToolOutcome::ExecutionError,
        }
    }
}

/// Result of running one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ToolOutcome {
    /// Probe executable not on `PATH`; never a failure
    Unavailable,
    Clean,
    IssuesFound,
    /// Unexpected exit code, signal, or spawn failure
    ExecutionError,
}

impl ToolOutcome {
    /// Whether this outcome fails the scan.
    pub fn is_failure(self) -> bool {
        matches!(self, ToolOutcome::IssuesFound | ToolOutcome::ExecutionError)
    }
}

/// Static description of one external scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Display name, e.g. `npm audit`
    pub name: &'static str,
    pub program: &'static str,
    /// Executable probed on `PATH`; `cargo audit` probes `cargo-audit`
    pub probe: &'static str,
    pub category: Category,
    pub quiet_args: &'static [&'static str],
    pub verbose_args: &'static [&'static str],
    pub policy: ExitPolicy,
    pub install_hint: &'static str,
}

impl ToolDescriptor {
    pub fn args(&self, verbose: bool) -> &'static [&'static str] {
        if verbose {
            self.verbose_args
        } else {
            self.quiet_args
        }
    }
}
