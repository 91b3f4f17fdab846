//! Render status machine: `draft -> processing -> completed | failed`.

use cutline_core::{CutlineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::plan::{compile_render_plan, RenderPlan};
use crate::project::Project;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStatus {
    #[default]
    Draft,
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for RenderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Draft => "draft",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        })
    }
}

impl Project {
    fn require_processing(&self, operation: &str) -> Result<()> {
        if self.status == RenderStatus::Processing {
            Ok(())
        } else {
            Err(CutlineError::InvalidState(format!(
                "cannot {operation} while {}",
                self.status
            )))
        }
    }

    /// Compile the plan and enter `processing`.
    ///
    /// The returned plan is an owned snapshot: edits made while the render
    /// runs do not reach it. A plan that fails to compile leaves the status
    /// unchanged.
    pub fn begin_render(&mut self) -> Result<RenderPlan> {
        if self.status == RenderStatus::Processing {
            return Err(CutlineError::InvalidState(
                "a render is already in progress".into(),
            ));
        }
        let plan = compile_render_plan(self)?;
        self.status = RenderStatus::Processing;
        self.progress = 0.0;
        self.error = None;
        info!(project = %self.id, inputs = plan.inputs.len(), "render started");
        Ok(plan)
    }

    /// Record progress (0.0 to 1.0) reported by the renderer.
    pub fn update_progress(&mut self, progress: f64) -> Result<()> {
        self.require_processing("update progress")?;
        self.progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Ok(())
    }

    pub fn complete(&mut self) -> Result<()> {
        self.require_processing("complete")?;
        self.status = RenderStatus::Completed;
        self.progress = 1.0;
        info!(project = %self.id, "render completed");
        Ok(())
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<()> {
        self.require_processing("fail")?;
        let message = message.into();
        info!(project = %self.id, error = %message, "render failed");
        self.status = RenderStatus::Failed;
        self.error = Some(message);
        Ok(())
    }
}
