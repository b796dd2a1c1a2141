//! JSON output formatter

use linthtml_core::LintResult;
use miette::{IntoDiagnostic, Result};
use serde_json::Value;

pub fn output_json(results: &[LintResult]) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&to_json(results)).into_diagnostic()?
    );
    Ok(())
}

fn to_json(results: &[LintResult]) -> Value {
    results
        .iter()
        .map(|r| {
            serde_json::json!({
                "path": r.path.display().to_string(),
                "issues": r.issues,
            })
        })
        .collect()
}
