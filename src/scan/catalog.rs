//! The scanner table: which tools run for which ecosystem, in order

use super::ecosystem::Ecosystem;
use super::tool::{Category, ExitPolicy, ToolDescriptor};

/// Secret scanner, run once regardless of ecosystem.
pub const GITLEAKS: ToolDescriptor = ToolDescriptor {
    name: "gitleaks",
    program: "gitleaks",
    probe: "gitleaks",
    category: Category::Secrets,
    quiet_args: &["detect"],
    verbose_args: &["detect", "--verbose"],
    policy: ExitPolicy::codes(&[1]),
    install_hint: "brew install gitleaks, or see https://github.com/gitleaks/gitleaks",
};

const GO_TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "go vet",
        program: "go",
        probe: "go",
        category: Category::Static,
        quiet_args: &["vet", "./..."],
        verbose_args: &["vet", "./..."],
        policy: ExitPolicy::any_non_zero(),
        install_hint: "https://go.dev/doc/install",
    },
    ToolDescriptor {
        name: "staticcheck",
        program: "staticcheck",
        probe: "staticcheck",
        category: Category::Static,
        quiet_args: &["./..."],
        verbose_args: &["./..."],
        policy: ExitPolicy::codes(&[1]).with_output_is_issue(),
        install_hint: "go install honnef.co/go/tools/cmd/staticcheck@latest",
    },
    ToolDescriptor {
        name: "gosec",
        program: "gosec",
        probe: "gosec",
        category: Category::Security,
        quiet_args: &["./..."],
        verbose_args: &["-verbose", "./..."],
        policy: ExitPolicy::codes(&[1]),
        install_hint: "go install github.com/securecodewarrior/gosec/v2/cmd/gosec@latest",
    },
    ToolDescriptor {
        name: "govulncheck",
        program: "govulncheck",
        probe: "govulncheck",
        category: Category::Vulns,
        quiet_args: &["./..."],
        verbose_args: &["./..."],
        policy: ExitPolicy::codes(&[3]),
        install_hint: "go install golang.org/x/vuln/cmd/govulncheck@latest",
    },
];

/// Shared by JavaScript and TypeScript projects.
const JS_TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "eslint",
        program: "eslint",
        probe: "eslint",
        category: Category::Static,
        quiet_args: &[".", "--ext", ".js,.jsx,.ts,.tsx", "--quiet"],
        verbose_args: &[".", "--ext", ".js,.jsx,.ts,.tsx"],
        policy: ExitPolicy::codes(&[1]),
        install_hint: "npm install -g eslint",
    },
    ToolDescriptor {
        name: "npm audit",
        program: "npm",
        probe: "npm",
        category: Category::Vulns,
        quiet_args: &["audit", "--audit-level", "moderate"],
        verbose_args: &["audit"],
        policy: ExitPolicy::codes(&[1]),
        install_hint: "https://nodejs.org/",
    },
];

const PYTHON_TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "bandit",
        program: "bandit",
        probe: "bandit",
        category: Category::Security,
        quiet_args: &["-r", ".", "-q"],
        verbose_args: &["-r", "."],
        policy: ExitPolicy::codes(&[1]),
        install_hint: "pip install bandit",
    },
    ToolDescriptor {
        name: "pylint",
        program: "pylint",
        probe: "pylint",
        category: Category::Static,
        quiet_args: &["--recursive=y", ".", "--errors-only"],
        verbose_args: &["--recursive=y", "."],
        // pylint's exit status is a bit field of message categories
        policy: ExitPolicy::range(1..=32),
        install_hint: "pip install pylint",
    },
    ToolDescriptor {
        name: "safety",
        program: "safety",
        probe: "safety",
        category: Category::Vulns,
        quiet_args: &["check", "--short-report"],
        verbose_args: &["check"],
        policy: ExitPolicy::codes(&[64]),
        install_hint: "pip install safety",
    },
];

const JAVA_TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "spotbugs",
        program: "spotbugs",
        probe: "spotbugs",
        category: Category::Static,
        quiet_args: &["-textui", "."],
        verbose_args: &["-textui", "."],
        policy: ExitPolicy::codes(&[1]),
        install_hint: "https://spotbugs.github.io/",
    },
    ToolDescriptor {
        name: "pmd",
        program: "pmd",
        probe: "pmd",
        category: Category::Static,
        quiet_args: &["check", "-d", ".", "-R", "rulesets/java/quickstart.xml", "-f", "text"],
        verbose_args: &["check", "-d", ".", "-R", "rulesets/java/quickstart.xml", "-f", "text"],
        policy: ExitPolicy::codes(&[4]),
        install_hint: "https://pmd.github.io/",
    },
];

const RUST_TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: "cargo clippy",
        program: "cargo",
        probe: "cargo",
        category: Category::Static,
        quiet_args: &["clippy", "--", "-D", "warnings"],
        verbose_args: &["clippy", "--", "-D", "warnings"],
        policy: ExitPolicy::codes(&[101]),
        install_hint: "https://rustup.rs/",
    },
    ToolDescriptor {
        name: "cargo audit",
        program: "cargo",
        probe: "cargo-audit",
        category: Category::Vulns,
        quiet_args: &["audit"],
        verbose_args: &["audit"],
        policy: ExitPolicy::codes(&[1]),
        install_hint: "cargo install cargo-audit",
    },
];

/// Tools for one ecosystem, in run order.
pub fn tools_for(ecosystem: Ecosystem) -> &'static [ToolDescriptor] {
    match ecosystem {
        Ecosystem::Go => GO_TOOLS,
        Ecosystem::JavaScript | Ecosystem::TypeScript => JS_TOOLS,
        Ecosystem::Python => PYTHON_TOOLS,
        Ecosystem::Java => JAVA_TOOLS,
        Ecosystem::Rust => RUST_TOOLS,
    }
}
