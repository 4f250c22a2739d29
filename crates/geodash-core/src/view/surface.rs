// crates/geodash-core/src/view/surface.rs
use super::frame::RenderedFeature;
use crate::geo::BBox;
use serde::Serialize;

/// Hover card contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub level: &'static str,
    pub indicator: &'static str,
    /// Formatted in the indicator's unit, `N/A` when undefined.
    pub value: String,
    pub officer: Option<String>,
}

/// The map rendering engine the view drives.
pub trait MapSurface {
    fn clear(&mut self);
    fn add_features(&mut self, features: &[RenderedFeature]);
    fn fit_bounds(&mut self, bounds: BBox);
    fn show_tooltip(&mut self, tooltip: &Tooltip);
    fn hide_tooltip(&mut self);
}

/// One recorded surface call.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum SurfaceCommand {
    Clear,
    AddFeatures { features: Vec<RenderedFeature> },
    FitBounds { bounds: BBox },
    ShowTooltip { tooltip: Tooltip },
    HideTooltip,
}

/// A [`MapSurface`] that records calls for a host to replay.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    commands: Vec<SurfaceCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Drains the recorded commands.
    pub fn take(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl MapSurface for CommandBuffer {
    fn clear(&mut self) {
        self.commands.push(SurfaceCommand::Clear);
    }

    fn add_features(&mut self, features: &[RenderedFeature]) {
        self.commands.push(SurfaceCommand::AddFeatures {
            features: features.to_vec(),
        });
    }

    fn fit_bounds(&mut self, bounds: BBox) {
        self.commands.push(SurfaceCommand::FitBounds { bounds });
    }

    fn show_tooltip(&mut self, tooltip: &Tooltip) {
        self.commands.push(SurfaceCommand::ShowTooltip {
            tooltip: tooltip.clone(),
        });
    }

    fn hide_tooltip(&mut self) {
        self.commands.push(SurfaceCommand::HideTooltip);
    }
}
