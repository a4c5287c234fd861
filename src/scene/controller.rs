use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{DEFAULT_TICK_COUNT, MAX_TICK_COUNT, XDomain, YDomain};
use crate::data::{Dataset, Record, Region, peak_record};
use crate::error::{NarrativeError, NarrativeResult};

use super::{
    Annotation, AnnotationAnchor, AxisTransition, RegionSelector, SceneCatalog, SceneFocus,
    SceneKind, SceneView, TrendPoint, YearScene,
};

/// Knobs the controller needs when deriving domains and transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerOptions {
    pub tick_count: usize,
    pub axis_transition: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            tick_count: DEFAULT_TICK_COUNT,
            axis_transition: Duration::from_millis(750),
        }
    }
}

/// Outcome of one navigation or selection step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneChange {
    pub from: usize,
    pub to: usize,
    /// Present whenever the value axis domain changed.
    pub axis_transition: Option<AxisTransition>,
}

/// Scene navigation state machine.
///
/// Owns the dataset, the current scene index and the value-axis domain. The
/// fixed domain is computed once from the whole dataset; the region explorer
/// swaps in a transient domain per selection and every other scene restores
/// the fixed one.
#[derive(Debug, Clone)]
pub struct SceneController {
    dataset: Dataset,
    catalog: SceneCatalog,
    options: ControllerOptions,
    current: usize,
    selected_region: Option<Region>,
    fixed_domain: YDomain,
    y_domain: YDomain,
    x_domain: XDomain,
}

impl SceneController {
    /// Builds the controller positioned on scene 0.
    pub fn new(
        dataset: Dataset,
        catalog: SceneCatalog,
        options: ControllerOptions,
    ) -> NarrativeResult<Self> {
        if catalog.is_empty() {
            return Err(NarrativeError::InvalidConfig(
                "scene catalog must contain at least one scene".to_owned(),
            ));
        }
        if options.tick_count == 0 || options.tick_count > MAX_TICK_COUNT {
            return Err(NarrativeError::InvalidConfig(format!(
                "tick count must be in 1..={MAX_TICK_COUNT}"
            )));
        }
        let x_domain = dataset.date_extent().ok_or_else(|| {
            NarrativeError::InvalidData("dataset has no records to place on a time axis".to_owned())
        })?;
        let fixed_domain = YDomain::from_max(dataset.max_cases().unwrap_or(0), options.tick_count);
        debug!(
            records = dataset.len(),
            scenes = catalog.len(),
            fixed_max = fixed_domain.max(),
            "scene controller ready"
        );

        let mut controller = Self {
            dataset,
            catalog,
            options,
            current: 0,
            selected_region: None,
            fixed_domain,
            y_domain: fixed_domain,
            x_domain,
        };
        controller.enter(0);
        Ok(controller)
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn current_scene(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.catalog.len()
    }

    #[must_use]
    pub fn current_kind(&self) -> &SceneKind {
        // `current` is only ever assigned through the catalog's own index math.
        &self.catalog.scenes[self.current]
    }

    #[must_use]
    pub fn selected_region(&self) -> Option<&Region> {
        self.selected_region.as_ref()
    }

    #[must_use]
    pub fn y_domain(&self) -> YDomain {
        self.y_domain
    }

    #[must_use]
    pub fn fixed_y_domain(&self) -> YDomain {
        self.fixed_domain
    }

    #[must_use]
    pub fn x_domain(&self) -> XDomain {
        self.x_domain
    }

    pub fn go_next(&mut self) -> SceneChange {
        let from = self.current;
        self.current = self.catalog.next_index(from);
        self.enter(from)
    }

    pub fn go_previous(&mut self) -> SceneChange {
        let from = self.current;
        self.current = self.catalog.previous_index(from);
        self.enter(from)
    }

    /// Jumps straight to `index`. Unlike stepping, this does not wrap.
    pub fn go_to(&mut self, index: usize) -> NarrativeResult<SceneChange> {
        if index >= self.catalog.len() {
            return Err(NarrativeError::SceneOutOfRange {
                index,
                count: self.catalog.len(),
            });
        }
        let from = self.current;
        self.current = index;
        Ok(self.enter(from))
    }

    /// Switches the region explorer to `region` and rescales the value axis.
    ///
    /// Regions absent from the dataset are accepted and produce an empty trend.
    pub fn select_region(&mut self, region: impl Into<Region>) -> NarrativeResult<SceneChange> {
        if !self.current_kind().is_interactive() {
            return Err(NarrativeError::RegionSelectorUnavailable {
                scene: self.current,
            });
        }

        let region = region.into();
        let previous = self.y_domain;
        self.y_domain = self.region_domain(&region);
        debug!(region = %region, max = self.y_domain.max(), "region selected");
        self.selected_region = Some(region);

        Ok(SceneChange {
            from: self.current,
            to: self.current,
            axis_transition: self.transition_from(previous),
        })
    }

    /// Pure description of the current scene.
    #[must_use]
    pub fn view(&self) -> SceneView {
        match self.current_kind() {
            SceneKind::Year(scene) => self.year_view(scene),
            SceneKind::RegionExplorer => self.region_view(),
        }
    }

    fn enter(&mut self, from: usize) -> SceneChange {
        let previous = self.y_domain;
        if self.current_kind().is_interactive() {
            let first = self.dataset.first_region().cloned();
            self.y_domain = first
                .as_ref()
                .map_or(self.fixed_domain, |region| self.region_domain(region));
            self.selected_region = first;
        } else {
            self.y_domain = self.fixed_domain;
            self.selected_region = None;
        }

        trace!(from, to = self.current, max = self.y_domain.max(), "scene entered");
        SceneChange {
            from,
            to: self.current,
            axis_transition: self.transition_from(previous),
        }
    }

    // An empty subset keeps the fixed domain rather than inventing one.
    fn region_domain(&self, region: &Region) -> YDomain {
        self.dataset
            .filter_region(region)
            .iter()
            .map(|record| record.cases)
            .max()
            .map_or(self.fixed_domain, |max| {
                YDomain::from_max(max, self.options.tick_count)
            })
    }

    fn transition_from(&self, previous: YDomain) -> Option<AxisTransition> {
        (previous != self.y_domain).then(|| {
            AxisTransition::new(previous, self.y_domain, self.options.axis_transition)
        })
    }

    fn year_view(&self, scene: &YearScene) -> SceneView {
        let rows = self.dataset.filter_year(scene.year);
        let annotation = peak_record(&rows).map(|peak| Annotation {
            text: scene.annotation.clone(),
            date: peak.date,
            value: peak.cases as f64,
            anchor: AnnotationAnchor::Peak,
        });

        self.scene_view(
            format!("Daily cases in {}", scene.year),
            SceneFocus::Year { year: scene.year },
            &rows,
            annotation,
        )
    }

    fn region_view(&self) -> SceneView {
        let rows = self
            .selected_region
            .as_ref()
            .map(|region| self.dataset.filter_region(region))
            .unwrap_or_default();
        let annotation = match (&self.selected_region, rows.get(rows.len() / 2)) {
            (Some(region), Some(mid)) => Some(Annotation {
                text: format!("Trend for {region}"),
                date: mid.date,
                value: mid.cases as f64,
                anchor: AnnotationAnchor::Midpoint,
            }),
            _ => None,
        };
        let selector = RegionSelector {
            options: self.dataset.regions().cloned().collect(),
            selected: self.selected_region.clone(),
        };

        self.scene_view(
            "Daily cases by state".to_owned(),
            SceneFocus::Region { selector },
            &rows,
            annotation,
        )
    }

    fn scene_view(
        &self,
        title: String,
        focus: SceneFocus,
        rows: &[&Record],
        annotation: Option<Annotation>,
    ) -> SceneView {
        SceneView {
            index: self.current,
            scene_count: self.catalog.len(),
            title,
            focus,
            trend: rows.iter().map(|record| TrendPoint::from(*record)).collect(),
            annotation,
            x_domain: self.x_domain,
            y_domain: self.y_domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{ControllerOptions, SceneController};
    use crate::data::{Dataset, Record, Region};
    use crate::error::NarrativeError;
    use crate::scene::{AnnotationAnchor, SceneCatalog, SceneFocus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn controller(catalog: SceneCatalog) -> SceneController {
        let dataset = Dataset::from_records(vec![
            Record::new(date(2020, 1, 1), "CA", 10),
            Record::new(date(2021, 6, 1), "CA", 500),
            Record::new(date(2022, 1, 1), "NY", 300),
        ]);
        SceneController::new(dataset, catalog, ControllerOptions::default()).expect("controller")
    }

    #[test]
    fn starts_on_first_scene_with_fixed_domain() {
        let controller = controller(SceneCatalog::with_region_explorer());
        assert_eq!(controller.current_scene(), 0);
        assert_eq!(controller.fixed_y_domain().max(), 500.0);
        assert_eq!(controller.y_domain(), controller.fixed_y_domain());
        assert!(controller.selected_region().is_none());
    }

    #[test]
    fn entering_explorer_selects_first_region_and_rescales() {
        let mut controller = controller(SceneCatalog::with_region_explorer());
        let change = controller.go_previous();
        assert_eq!((change.from, change.to), (0, 3));
        assert_eq!(controller.selected_region(), Some(&Region::from("CA")));
        // CA peaks at 500 too, so the domain is unchanged.
        assert!(change.axis_transition.is_none());

        let change = controller.select_region("NY").expect("explorer scene");
        let transition = change.axis_transition.expect("domain changed");
        assert_eq!(transition.from.max(), 500.0);
        assert_eq!(transition.to.max(), 300.0);
    }

    #[test]
    fn leaving_explorer_restores_fixed_domain() {
        let mut controller = controller(SceneCatalog::with_region_explorer());
        controller.go_to(3).expect("in range");
        controller.select_region("NY").expect("explorer scene");
        assert_eq!(controller.y_domain().max(), 300.0);

        let change = controller.go_next();
        assert_eq!(change.to, 0);
        assert_eq!(controller.y_domain(), controller.fixed_y_domain());
        assert!(change.axis_transition.is_some());
        assert!(controller.selected_region().is_none());
    }

    #[test]
    fn selection_outside_explorer_is_rejected() {
        let mut controller = controller(SceneCatalog::yearly());
        let err = controller.select_region("CA").expect_err("yearly scene");
        assert!(matches!(
            err,
            NarrativeError::RegionSelectorUnavailable { scene: 0 }
        ));
    }

    #[test]
    fn jump_does_not_wrap() {
        let mut controller = controller(SceneCatalog::yearly());
        let err = controller.go_to(3).expect_err("out of range");
        assert!(matches!(
            err,
            NarrativeError::SceneOutOfRange { index: 3, count: 3 }
        ));
        assert_eq!(controller.current_scene(), 0);
    }

    #[test]
    fn year_view_annotates_the_peak() {
        let mut controller = controller(SceneCatalog::yearly());
        controller.go_next();
        let view = controller.view();
        assert_eq!(view.focus, SceneFocus::Year { year: 2021 });
        assert_eq!(view.trend.len(), 1);
        let annotation = view.annotation.expect("non-empty year");
        assert_eq!(annotation.text, "Surge in January 2021");
        assert_eq!(annotation.anchor, AnnotationAnchor::Peak);
        assert_eq!(annotation.value, 500.0);
    }

    #[test]
    fn unknown_region_gives_empty_trend_and_no_annotation() {
        let mut controller = controller(SceneCatalog::with_region_explorer());
        controller.go_to(3).expect("in range");
        let change = controller.select_region("Atlantis").expect("explorer scene");
        let view = controller.view();
        assert!(view.trend.is_empty());
        assert!(view.annotation.is_none());
        assert_eq!(controller.y_domain(), controller.fixed_y_domain());
        assert!(change.axis_transition.is_none());
    }

    #[test]
    fn entering_explorer_rescales_when_first_region_peaks_lower() {
        let dataset = Dataset::from_records(vec![
            Record::new(date(2020, 1, 1), "WA", 40),
            Record::new(date(2020, 6, 1), "WA", 120),
            Record::new(date(2021, 1, 1), "TX", 9_000),
        ]);
        let mut controller = SceneController::new(
            dataset,
            SceneCatalog::with_region_explorer(),
            ControllerOptions::default(),
        )
        .expect("controller");

        let change = controller.go_to(3).expect("in range");
        let transition = change.axis_transition.expect("domain changed on entry");
        assert_eq!(transition.from, controller.fixed_y_domain());
        assert_eq!(transition.to.max(), 120.0);
        assert_eq!(controller.y_domain().max(), 120.0);
        assert_eq!(controller.selected_region(), Some(&Region::from("WA")));
    }

    #[test]
    fn empty_catalog_is_rejected_without_panicking() {
        let catalog = SceneCatalog { scenes: Vec::new() };
        let err = SceneController::new(
            Dataset::from_records(vec![Record::new(date(2020, 1, 1), "CA", 1)]),
            catalog,
            ControllerOptions::default(),
        )
        .expect_err("empty catalog");
        assert!(matches!(err, NarrativeError::InvalidConfig(_)));
    }

    #[test]
    fn oversized_tick_count_is_rejected() {
        let options = ControllerOptions {
            tick_count: 1_000_000_000,
            ..ControllerOptions::default()
        };
        let result = SceneController::new(
            Dataset::from_records(vec![Record::new(date(2020, 1, 1), "CA", 1)]),
            SceneCatalog::yearly(),
            options,
        );
        assert!(matches!(result, Err(NarrativeError::InvalidConfig(_))));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let result = SceneController::new(
            Dataset::default(),
            SceneCatalog::yearly(),
            ControllerOptions::default(),
        );
        assert!(result.is_err());
    }
}
