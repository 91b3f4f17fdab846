//! Validate a project file.

use std::path::PathBuf;

use anyhow::bail;
use cutline_render::Project;
use serde_json::json;
use tracing::warn;

use crate::OutputFormat;

fn report(project: &Project, errors: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json!({
            "project": project.name,
            "valid": errors.is_empty(),
            "errors": errors,
        })
        .to_string(),
        OutputFormat::Text => {
            let mut out = format!("Project: {}\n", project.name);
            if errors.is_empty() {
                out.push_str("Project is valid.");
            } else {
                for error in errors {
                    out.push_str(&format!("  - {error}\n"));
                }
                out.push_str(&format!("{} issue(s) found.", errors.len()));
            }
            out
        }
    }
}

pub fn run(path: PathBuf, format: OutputFormat) -> anyhow::Result<()> {
    let project = super::load(&path)?;
    let errors = project.validate();
    println!("{}", report(&project, &errors, format));
    if !errors.is_empty() {
        warn!(count = errors.len(), "project has validation errors");
        bail!("{} is invalid", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_report() {
        let project = Project::new("Demo");
        let out = report(&project, &["bad clip".to_string()], OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["errors"][0], "bad clip");
    }

    #[test]
    fn test_text_report() {
        let project = Project::new("Demo");
        assert!(report(&project, &[], OutputFormat::Text).ends_with("Project is valid."));
    }
}
