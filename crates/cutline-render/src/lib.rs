//! Cutline Render - project document and render pipeline
//!
//! Ties the engines together:
//! - `Project`: tracks plus per-clip effects, transitions, text overlays and
//!   audio settings, with a render status machine
//! - `compile_render_plan`: one filter graph for the whole timeline
//! - `OutputTimeline`: where timeline instants land once crossfades overlap
//! - `ExportFormat`/`ExportJob`: encoder presets and backend arguments
//! - `ProjectFile`: versioned JSON persistence

pub mod export;
pub mod plan;
pub mod project;
pub mod serialization;
pub mod status;
pub mod timing;

pub use export::{AudioCodec, ExportFormat, ExportJob, QualityPreset, VideoCodec};
pub use plan::{compile_render_plan, RenderInput, RenderPlan, StreamKind};
pub use project::{Project, ProjectSettings};
pub use serialization::{ProjectFile, CURRENT_VERSION};
pub use status::RenderStatus;
pub use timing::OutputTimeline;
