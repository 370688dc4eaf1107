//! Console narration and the identifier file.
//!
//! This is the human-facing output; diagnostics go through `log`. Every
//! narration function writes to the sink it is given, which is stdout in
//! the binaries.

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use tokio::fs;

use crate::collections::CollectionId;
use crate::config::Config;
use crate::error::Result;
use crate::provision::{CreateOutcome, ProvisionReport};

/// Write success message
pub fn success<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("✅ {}", message).green())
}

/// Write warning message
pub fn warning<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("⚠️  {}", message).yellow())
}

/// Write error message
pub fn error<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", format!("❌ {}", message).red())
}

/// Write info message
pub fn info<W: Write>(out: &mut W, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message.yellow())
}

/// Write `id` as bare text, replacing the file if it exists
pub async fn save_collection_id(path: &Path, id: &CollectionId) -> Result<()> {
    fs::write(path, id.as_str()).await?;
    Ok(())
}

/// One summary line per attempted collection
pub fn summary_lines(report: &ProvisionReport) -> Vec<String> {
    report
        .created
        .iter()
        .map(|(name, outcome)| match outcome {
            CreateOutcome::Created(_) if name == "users" => {
                format!("  ✅ {} (Auth collection)", name)
            }
            CreateOutcome::Created(_) => format!("  ✅ {}", name),
            CreateOutcome::Failed(reason) => {
                format!("  ⚠️  {} (not created: {})", name, reason)
            }
        })
        .collect()
}

/// Closing block written after a run that was not aborted
pub fn write_summary<W: Write>(
    out: &mut W,
    report: &ProvisionReport,
    config: &Config,
) -> io::Result<()> {
    success(out, "🎉 All collections created successfully!")?;
    writeln!(out)?;
    info(out, "Summary:")?;
    for line in summary_lines(report) {
        writeln!(out, "{}", line)?;
    }
    if !report.failed_deletions.is_empty() {
        warning(
            out,
            &format!(
                "Could not delete before re-creating: {}",
                report.failed_deletions.join(", ")
            ),
        )?;
    }
    writeln!(out)?;
    info(out, "Next steps:")?;
    writeln!(out, "  1. Open Admin UI: {}", config.admin_ui_url())?;
    writeln!(out, "  2. Create test user to verify")?;
    writeln!(out, "  3. Add the pocketbase client package to the app")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saved_id_has_no_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users_id.txt");
        std::fs::write(&path, "stale-value-that-is-longer").unwrap();

        save_collection_id(&path, &CollectionId::new("abc123")).await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abc123");
    }

    #[test]
    fn summary_marks_failed_collections() {
        let report = ProvisionReport {
            deleted: vec![],
            failed_deletions: vec![],
            created: vec![
                ("users".to_string(), CreateOutcome::Created(CollectionId::new("u1"))),
                ("slots".to_string(), CreateOutcome::Failed("status 400".to_string())),
            ],
        };

        let lines = summary_lines(&report);
        assert_eq!(lines[0], "  ✅ users (Auth collection)");
        assert_eq!(lines[1], "  ⚠️  slots (not created: status 400)");
    }

    #[test]
    fn summary_lists_failed_deletions_and_admin_url() {
        let report = ProvisionReport {
            deleted: vec![],
            failed_deletions: vec!["users".to_string()],
            created: vec![("users".to_string(), CreateOutcome::Created(CollectionId::new("u1")))],
        };
        let config = Config::new("http://pb.internal:8090").unwrap();

        let mut out = Vec::new();
        write_summary(&mut out, &report, &config).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("All collections created successfully!"));
        assert!(text.contains("Could not delete before re-creating: users"));
        assert!(text.contains("  1. Open Admin UI: http://pb.internal:8090/_/\n"));
    }
}
