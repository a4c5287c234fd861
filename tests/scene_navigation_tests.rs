use case_narrative::core::YDomain;
use case_narrative::data::{Dataset, Record, Region};
use case_narrative::scene::{
    ControllerOptions, SceneCatalog, SceneController, SceneFocus, SceneKind,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn example_dataset() -> Dataset {
    Dataset::from_records(vec![
        Record::new(date(2020, 1, 1), "CA", 10),
        Record::new(date(2021, 6, 1), "CA", 500),
        Record::new(date(2022, 1, 1), "NY", 300),
    ])
}

fn controller(catalog: SceneCatalog) -> SceneController {
    SceneController::new(example_dataset(), catalog, ControllerOptions::default())
        .expect("controller init")
}

#[test]
fn example_year_scenes_draw_single_points() {
    let mut controller = controller(SceneCatalog::with_region_explorer());

    let scene0 = controller.view();
    assert_eq!(scene0.focus, SceneFocus::Year { year: 2020 });
    assert_eq!(scene0.trend.len(), 1);
    assert_eq!(scene0.trend[0].cases, 10);

    controller.go_next();
    let scene1 = controller.view();
    assert_eq!(scene1.focus, SceneFocus::Year { year: 2021 });
    assert_eq!(scene1.trend.len(), 1);
    assert_eq!(scene1.trend[0].cases, 500);
}

#[test]
fn example_region_selection_draws_ny_trend() {
    let mut controller = controller(SceneCatalog::with_region_explorer());
    controller.go_to(3).expect("explorer index");
    controller.select_region("NY").expect("explorer scene");

    let view = controller.view();
    assert_eq!(view.trend.len(), 1);
    assert_eq!(view.trend[0].cases, 300);
    let annotation = view.annotation.expect("annotation for non-empty region");
    assert_eq!(annotation.text, "Trend for NY");
    assert_eq!(annotation.value, 300.0);
    assert_eq!(view.y_domain, YDomain::from_max(300, 10));
}

#[test]
fn explorer_selector_lists_regions_in_first_seen_order() {
    let mut controller = controller(SceneCatalog::with_region_explorer());
    controller.go_previous();

    let SceneFocus::Region { selector } = controller.view().focus else {
        panic!("scene 3 should be the region explorer");
    };
    assert_eq!(selector.options, vec![Region::from("CA"), Region::from("NY")]);
    assert_eq!(selector.selected, Some(Region::from("CA")));
}

#[test]
fn next_wraps_after_last_scene() {
    for catalog in [SceneCatalog::yearly(), SceneCatalog::with_region_explorer()] {
        let count = catalog.len();
        let mut controller = controller(catalog);
        for expected in (1..count).chain([0]) {
            let change = controller.go_next();
            assert_eq!(change.to, expected);
        }
        assert_eq!(controller.current_scene(), 0);
    }
}

#[test]
fn previous_from_first_scene_lands_on_last() {
    let mut controller = controller(SceneCatalog::yearly());
    let change = controller.go_previous();
    assert_eq!((change.from, change.to), (0, 2));
    assert!(matches!(controller.current_kind(), SceneKind::Year(scene) if scene.year == 2022));
}

#[test]
fn leaving_explorer_backwards_restores_fixed_domain() {
    let mut controller = controller(SceneCatalog::with_region_explorer());
    controller.go_previous();
    controller.select_region("NY").expect("explorer scene");
    assert_ne!(controller.y_domain(), controller.fixed_y_domain());

    let change = controller.go_previous();
    assert_eq!(change.to, 2);
    assert_eq!(controller.y_domain(), controller.fixed_y_domain());
    assert_eq!(controller.fixed_y_domain(), YDomain::from_max(500, 10));
    let transition = change.axis_transition.expect("domain changed");
    assert_eq!(transition.to, controller.fixed_y_domain());
}

#[test]
fn year_scene_without_rows_is_degenerate_not_fatal() {
    let dataset = Dataset::from_records(vec![Record::new(date(2020, 5, 1), "CA", 7)]);
    let mut controller =
        SceneController::new(dataset, SceneCatalog::yearly(), ControllerOptions::default())
            .expect("controller init");
    controller.go_to(2).expect("in range");

    let view = controller.view();
    assert!(view.trend.is_empty());
    assert!(view.annotation.is_none());
}
