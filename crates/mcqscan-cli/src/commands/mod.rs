pub mod extract;
pub mod init;
pub mod preview;
pub mod validate;

use anyhow::{Context, Result};

use mcqscan_core::rules::{RulesConfig, ScanRules};

/// Compile the configured rules, naming the failure for the user.
fn compile_rules(rules: &RulesConfig) -> Result<ScanRules> {
    ScanRules::compile(rules).context("invalid scan rules")
}
