//! Install-signature patterns for shell command content.
//!
//! The battery is kept as literal data — a mnemonic name paired with a
//! regex source — so individual signatures can be tested one at a time and
//! new ones added without touching control flow. Matching is intentionally
//! permissive: a false positive costs one approval round-trip, a false
//! negative is a policy gap.

use regex::Regex;
use std::sync::LazyLock;

/// Mnemonic name and regex source for each install signature.
///
/// All patterns are case-insensitive via the inline `(?i)` flag.
const INSTALL_SIGNATURES: &[(&str, &str)] = &[
    ("clawhub-install", r"(?i)\bclawhub\s+install\b"),
    ("clawhub-add", r"(?i)\bclawhub\s+add\b"),
    ("npx-skills-add", r"(?i)\bnpx\s+skills?\s+add\b"),
    ("openclaw-install", r"(?i)\bopenclaw\s+skills?\s+install\b"),
    ("install-script", r"(?i)\binstall\.sh\b"),
    ("git-clone-skills", r"(?i)\bgit\s+clone\b.*\bskills?\b"),
    ("skills-git-clone", r"(?i)\bskills?\b.*\bgit\s+clone\b"),
    ("curl-skills", r"(?i)\bcurl\b.*\bskills?\b.*\binstall\b"),
    ("wget-skills", r"(?i)\bwget\b.*\bskills?\b.*\binstall\b"),
    // Writes into a skills directory count as installs too.
    ("skills-dir-write", r"(?i)[~/]\.openclaw/skills/"),
    ("skill-md-write", r"(?i)/skills/.*SKILL\.md"),
];

static COMPILED: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    INSTALL_SIGNATURES
        .iter()
        .map(|(name, source)| (*name, Regex::new(source).expect("invalid install signature")))
        .collect()
});

/// Return the mnemonic of the first install signature matching `command`.
#[must_use]
pub fn match_install_signature(command: &str) -> Option<&'static str> {
    COMPILED
        .iter()
        .find(|(_, re)| re.is_match(command))
        .map(|(name, _)| *name)
}

/// Check whether a command string contains a skill-install operation.
#[must_use]
pub fn is_install_command(command: &str) -> bool {
    match_install_signature(command).is_some()
}
