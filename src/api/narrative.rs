use std::path::Path;

use tracing::{debug, trace};

use crate::data::{Dataset, Region};
use crate::error::NarrativeResult;
use crate::render::{RenderFrame, Renderer};
use crate::scene::{SceneCatalog, SceneChange, SceneController, SceneView};

use super::{NarrativeConfig, build_scene_frame};

/// Host-facing facade tying the dataset, scene controller and a renderer.
///
/// Every navigation or selection call re-renders the resulting scene before
/// returning, the way a page redraws after a button click.
pub struct Narrative<R: Renderer> {
    renderer: R,
    controller: SceneController,
    config: NarrativeConfig,
}

impl<R: Renderer> Narrative<R> {
    /// Builds the narrative on scene 0 and renders it once.
    pub fn new(renderer: R, dataset: Dataset, config: NarrativeConfig) -> NarrativeResult<Self> {
        let config = config.validate()?;
        let controller = SceneController::new(
            dataset,
            SceneCatalog::from_variant(config.catalog),
            config.controller_options(),
        )?;
        let mut narrative = Self {
            renderer,
            controller,
            config,
        };
        narrative.render()?;
        Ok(narrative)
    }

    pub fn load(
        renderer: R,
        data_path: impl AsRef<Path>,
        config: NarrativeConfig,
    ) -> NarrativeResult<Self> {
        let dataset = Dataset::load(data_path)?;
        Self::new(renderer, dataset, config)
    }

    #[must_use]
    pub fn controller(&self) -> &SceneController {
        &self.controller
    }

    #[must_use]
    pub fn config(&self) -> &NarrativeConfig {
        &self.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn next(&mut self) -> NarrativeResult<SceneChange> {
        let change = self.controller.go_next();
        debug!(from = change.from, to = change.to, "next scene");
        self.render()?;
        Ok(change)
    }

    pub fn previous(&mut self) -> NarrativeResult<SceneChange> {
        let change = self.controller.go_previous();
        debug!(from = change.from, to = change.to, "previous scene");
        self.render()?;
        Ok(change)
    }

    pub fn go_to(&mut self, index: usize) -> NarrativeResult<SceneChange> {
        let change = self.controller.go_to(index)?;
        self.render()?;
        Ok(change)
    }

    pub fn select_region(&mut self, region: impl Into<Region>) -> NarrativeResult<SceneChange> {
        let change = self.controller.select_region(region)?;
        self.render()?;
        Ok(change)
    }

    #[must_use]
    pub fn view(&self) -> SceneView {
        self.controller.view()
    }

    pub fn frame(&self) -> NarrativeResult<RenderFrame> {
        build_scene_frame(&self.controller.view(), &self.config)
    }

    pub fn render(&mut self) -> NarrativeResult<()> {
        let frame = self.frame()?;
        trace!(
            scene = self.controller.current_scene(),
            lines = frame.lines.len(),
            polylines = frame.polylines.len(),
            texts = frame.texts.len(),
            "render scene"
        );
        self.renderer.render(&frame)
    }

    /// Frames animating the value axis across `change`, endpoints included.
    ///
    /// A change without an axis transition yields the current frame only.
    pub fn transition_frames(
        &self,
        change: &SceneChange,
        steps: usize,
    ) -> NarrativeResult<Vec<RenderFrame>> {
        let view = self.controller.view();
        let Some(transition) = change.axis_transition else {
            return Ok(vec![build_scene_frame(&view, &self.config)?]);
        };

        transition
            .keyframes(steps)
            .into_iter()
            .map(|y_domain| {
                let keyframe = SceneView {
                    y_domain,
                    ..view.clone()
                };
                build_scene_frame(&keyframe, &self.config)
            })
            .collect()
    }
}
