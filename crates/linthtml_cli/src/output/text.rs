//! Text output formatter

use std::fmt::Write;

use linthtml_core::LintResult;

pub fn output_text(results: &[LintResult]) {
    print!("{}", format_text(results));
}

fn format_text(results: &[LintResult]) -> String {
    let mut out = String::new();

    for result in results {
        if result.issues.is_empty() {
            continue;
        }

        let _ = writeln!(out, "\n{}:", result.path.display());
        for issue in &result.issues {
            let start = issue.position.start;
            let _ = writeln!(
                out,
                "  {}:{}  {}  {} ({})",
                start.line,
                start.column,
                issue.code,
                issue.message(),
                issue.rule
            );
        }
    }

    let total_files = results.len();
    let total_issues: usize = results.iter().map(|r| r.issues.len()).sum();

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Checked {} files, found {} issues",
        total_files, total_issues
    );
    out
}
