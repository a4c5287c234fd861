use case_narrative::data::{Dataset, Record};
use case_narrative::scene::{ControllerOptions, SceneCatalog, SceneController};
use chrono::NaiveDate;
use proptest::prelude::*;

fn dataset(rows: &[(i32, u32, u32, u64, u8)]) -> Dataset {
    Dataset::from_records(
        rows.iter()
            .map(|&(year, month, day, cases, region)| {
                let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid date");
                Record::new(date, format!("R{region}").as_str(), cases)
            })
            .collect(),
    )
}

fn row_strategy() -> impl Strategy<Value = (i32, u32, u32, u64, u8)> {
    (2019i32..2024, 1u32..=12, 1u32..=28, 0u64..100_000, 0u8..5)
}

fn catalog(explorer: bool) -> SceneCatalog {
    if explorer {
        SceneCatalog::with_region_explorer()
    } else {
        SceneCatalog::yearly()
    }
}

proptest! {
    #[test]
    fn stepping_count_times_returns_to_start(
        rows in proptest::collection::vec(row_strategy(), 1..40),
        explorer in any::<bool>(),
        start in 0usize..4
    ) {
        let catalog = catalog(explorer);
        let count = catalog.len();
        let mut controller =
            SceneController::new(dataset(&rows), catalog, ControllerOptions::default())
                .expect("controller init");
        controller.go_to(start % count).expect("in range");
        let origin = controller.current_scene();

        for _ in 0..count {
            controller.go_next();
        }
        prop_assert_eq!(controller.current_scene(), origin);
        for _ in 0..count {
            controller.go_previous();
        }
        prop_assert_eq!(controller.current_scene(), origin);
    }

    #[test]
    fn previous_and_next_cancel_out(
        rows in proptest::collection::vec(row_strategy(), 1..40),
        explorer in any::<bool>(),
        moves in proptest::collection::vec(any::<bool>(), 0..20),
        next_first in any::<bool>()
    ) {
        let mut controller =
            SceneController::new(dataset(&rows), catalog(explorer), ControllerOptions::default())
                .expect("controller init");
        for forward in moves {
            if forward {
                controller.go_next();
            } else {
                controller.go_previous();
            }
        }
        let before = controller.current_scene();
        if next_first {
            controller.go_next();
            controller.go_previous();
        } else {
            controller.go_previous();
            controller.go_next();
        }
        prop_assert_eq!(controller.current_scene(), before);
    }

    #[test]
    fn year_scenes_never_draw_other_years(
        rows in proptest::collection::vec(row_strategy(), 1..60)
    ) {
        let mut controller =
            SceneController::new(dataset(&rows), SceneCatalog::yearly(), ControllerOptions::default())
                .expect("controller init");
        for (index, year) in [2020, 2021, 2022].into_iter().enumerate() {
            controller.go_to(index).expect("in range");
            let view = controller.view();
            prop_assert!(view.trend.iter().all(|point| point.date.format("%Y").to_string() == year.to_string()));
            prop_assert!(view.trend.windows(2).all(|pair| pair[0].date <= pair[1].date));
            let expected = rows.iter().filter(|row| row.0 == year).count();
            prop_assert_eq!(view.trend.len(), expected);
        }
    }

    #[test]
    fn non_explorer_scenes_always_use_fixed_domain(
        rows in proptest::collection::vec(row_strategy(), 1..40),
        moves in proptest::collection::vec(any::<bool>(), 1..30),
        region in 0u8..6
    ) {
        let mut controller = SceneController::new(
            dataset(&rows),
            SceneCatalog::with_region_explorer(),
            ControllerOptions::default(),
        )
        .expect("controller init");
        for forward in moves {
            if forward {
                controller.go_next();
            } else {
                controller.go_previous();
            }
            if controller.current_kind().is_interactive() {
                controller
                    .select_region(format!("R{region}").as_str())
                    .expect("explorer scene");
            } else {
                prop_assert_eq!(controller.y_domain(), controller.fixed_y_domain());
            }
        }
    }
}
