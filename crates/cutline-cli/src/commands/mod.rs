pub mod compile;
pub mod new;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use cutline_render::{Project, ProjectFile};

/// Load a project file, with the path in the error chain.
pub fn load(path: &Path) -> anyhow::Result<Project> {
    let file = ProjectFile::load_from_file(path)
        .with_context(|| format!("failed to load project {}", path.display()))?;
    Ok(file.project)
}
