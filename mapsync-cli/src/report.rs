//! Human-readable rendering of run reports to stdout.

use std::path::Path;

use mapsync_sync::{
    CommandOutcome, RenameOutcome, RunReport, UpdateReport, VersionComparison, VersionStatus,
};

const RULE_WIDTH: usize = 60;

/// Print rename lines, then the check or update section of `run`.
pub fn print_run(new_dir: &Path, latest_dir: &Path, run: &RunReport) {
    for rename in &run.renames {
        println!("{}", rename_line(rename));
    }
    let lines = match &run.outcome {
        CommandOutcome::Check(comparisons) => check_lines(new_dir, latest_dir, comparisons),
        CommandOutcome::Update(update) => update_lines(new_dir, latest_dir, update),
    };
    for line in lines {
        println!("{line}");
    }
}

fn rename_line(outcome: &RenameOutcome) -> String {
    match outcome {
        RenameOutcome::Renamed { from, to } => format!("Renamed '{from}' -> '{to}'"),
        RenameOutcome::Conflict { from, to } => {
            format!("Skipping rename '{from}' -> '{to}': target already exists")
        }
        RenameOutcome::Failed { from, to, error } => {
            format!("Failed to rename '{from}' -> '{to}': {error}")
        }
    }
}

fn check_lines(
    new_dir: &Path,
    latest_dir: &Path,
    comparisons: &[VersionComparison],
) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Checking differences between {} and {}",
            new_dir.display(),
            latest_dir.display()
        ),
        "=".repeat(RULE_WIDTH),
        "NEW vs LATEST comparison:".to_string(),
    ];
    lines.extend(comparisons.iter().map(|c| {
        let name = &c.file_name;
        match c.status {
            VersionStatus::NewFile { staged } => format!("  {name}: NEW FILE (version={staged})"),
            VersionStatus::Changed { staged, live } => {
                format!("  {name}: NEW={staged}, LATEST={live}")
            }
            VersionStatus::Unchanged { version } => format!("  {name}: Same version ({version})"),
        }
    }));
    lines
}

fn update_lines(new_dir: &Path, latest_dir: &Path, update: &UpdateReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Updating maps from {} to {}",
            new_dir.display(),
            latest_dir.display()
        ),
        "=".repeat(RULE_WIDTH),
        String::new(),
        "Copying files...".to_string(),
    ];
    lines.extend(update.copied.iter().map(|name| format!("Copied {name}")));
    lines
}
