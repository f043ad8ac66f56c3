use chrono::{Datelike, NaiveDate, Weekday};
use novaboard_core::timeline::{build_timeline, ZoomLevel};
use novaboard_core::Project;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn project(id: &str, start: &str, due: &str) -> Project {
    let mut project = Project::new(id, format!("Project {id}"));
    project.start_date = start.to_string();
    project.due_date = due.to_string();
    project
}

fn portfolio() -> Vec<Project> {
    vec![
        project("a", "2024-11-20", "2025-02-14"),
        project("b", "2025-01-10", "2025-01-20"),
        project("c", "", "2025-06-30"),
        project("d", "2025-03-01", ""),
        project("e", "not a date", "also bad"),
        project("f", "2025-05-10", "2025-04-01"),
    ]
}

#[test]
fn month_zoom_single_project_scenario() {
    let projects = vec![project("p1", "2025-01-10", "2025-01-20")];

    let layout = build_timeline(&projects, ZoomLevel::Month, date(2025, 1, 15));

    assert_eq!(layout.span_start, date(2024, 12, 1));
    assert_eq!(layout.bars.len(), 1);
    let bar = &layout.bars[0];
    assert_eq!(bar.project.id, "p1");
    assert_eq!(bar.duration_days, 10);
    assert_eq!(bar.width, 100);
    assert_eq!(bar.left, 400);
    assert!(layout.today_visible());
    assert_eq!(layout.today_offset, 450);
}

#[test]
fn header_tiers_tile_total_width_at_every_zoom() {
    let projects = portfolio();
    for zoom in ZoomLevel::ALL {
        let layout = build_timeline(&projects, zoom, date(2025, 2, 1));

        assert_eq!(layout.total_width, layout.total_days * zoom.px_per_day());
        for tier in [&layout.primary_headers, &layout.secondary_headers] {
            assert!(!tier.is_empty(), "{zoom:?} tier is empty");
            let sum: i64 = tier.iter().map(|bucket| bucket.width).sum();
            assert_eq!(sum, layout.total_width, "{zoom:?} headers do not tile");

            let mut expected_left = 0;
            for bucket in tier.iter() {
                assert_eq!(bucket.left, expected_left);
                assert!(bucket.width > 0);
                expected_left += bucket.width;
            }
        }
    }
}

#[test]
fn bars_stay_inside_span_with_minimum_width() {
    let projects = portfolio();
    for zoom in ZoomLevel::ALL {
        let layout = build_timeline(&projects, zoom, date(2025, 2, 1));

        assert_eq!(layout.bars.len(), projects.len());
        for bar in &layout.bars {
            assert!(bar.left >= 0, "{zoom:?} bar {} starts before span", bar.project.id);
            assert!(bar.width >= zoom.min_bar_width());
            assert!(bar.duration_days >= 1);
        }
    }
}

#[test]
fn bars_are_sorted_by_start_with_stable_ties() {
    let projects = vec![
        project("late", "2025-03-01", "2025-03-10"),
        project("tie-1", "2025-01-05", "2025-01-06"),
        project("early", "2024-12-01", "2024-12-20"),
        project("tie-2", "2025-01-05", "2025-02-01"),
    ];

    let layout = build_timeline(&projects, ZoomLevel::Month, date(2025, 1, 1));
    let order: Vec<&str> = layout.bars.iter().map(|bar| bar.project.id.as_str()).collect();

    assert_eq!(order, ["early", "tie-1", "tie-2", "late"]);
}

#[test]
fn missing_dates_fall_back_to_due_then_span_start() {
    let projects = vec![
        project("due-only", "", "2025-02-10"),
        project("start-only", "2025-02-01", ""),
        project("none", "", ""),
    ];

    let layout = build_timeline(&projects, ZoomLevel::Month, date(2025, 2, 1));
    let bar = |id: &str| {
        layout
            .bars
            .iter()
            .find(|bar| bar.project.id == id)
            .expect("bar present")
    };

    let due_only = bar("due-only");
    assert_eq!(due_only.starts_on, date(2025, 2, 10));
    assert_eq!(due_only.ends_on, date(2025, 2, 10));
    assert_eq!(due_only.width, ZoomLevel::Month.min_bar_width());
    assert_eq!(due_only.duration_days, 1);

    let start_only = bar("start-only");
    assert_eq!(start_only.ends_on, date(2025, 2, 1));

    let none = bar("none");
    assert_eq!(none.starts_on, layout.span_start);
    assert_eq!(none.left, 0);
}

#[test]
fn unparseable_start_pins_bar_to_span_start() {
    let projects = vec![project("garbled", "not a date", "2025-03-15")];

    let layout = build_timeline(&projects, ZoomLevel::Month, date(2025, 3, 1));
    let bar = &layout.bars[0];

    assert_eq!(bar.starts_on, layout.span_start);
    assert_eq!(bar.ends_on, date(2025, 3, 15));
    assert_eq!(bar.left, 0);
}

#[test]
fn inverted_dates_clamp_width_and_duration() {
    let projects = vec![project("inverted", "2025-05-10", "2025-04-01")];

    let layout = build_timeline(&projects, ZoomLevel::Week, date(2025, 5, 1));
    let bar = &layout.bars[0];

    assert_eq!(bar.width, ZoomLevel::Week.min_bar_width());
    assert_eq!(bar.duration_days, 1);
}

#[test]
fn empty_input_lays_out_headers_around_today() {
    let today = date(2025, 8, 15);
    for zoom in ZoomLevel::ALL {
        let layout = build_timeline(&[], zoom, today);

        assert!(layout.bars.is_empty());
        assert!(layout.total_width > 0);
        assert!(!layout.secondary_headers.is_empty());
        assert!(layout.span_start <= today && today < layout.span_end);
        assert!(layout.today_visible());
    }
}

#[test]
fn span_snaps_to_calendar_boundaries() {
    let projects = vec![project("p", "2025-04-16", "2025-05-20")];

    let week = build_timeline(&projects, ZoomLevel::Week, date(2025, 5, 1));
    assert_eq!(week.span_start.weekday(), Weekday::Sun);
    assert!(week.span_start <= date(2025, 4, 1));

    let quarter = build_timeline(&projects, ZoomLevel::Quarter, date(2025, 5, 1));
    assert_eq!(quarter.span_start, date(2025, 4, 1));
    assert_eq!(quarter.secondary_headers[0].label, "Q2");
    assert_eq!(quarter.primary_headers[0].label, "2025");

    let year = build_timeline(&projects, ZoomLevel::Year, date(2025, 5, 1));
    assert_eq!(year.span_start, date(2025, 1, 1));
    assert_eq!(year.span_end, date(2025, 12, 31));
    assert_eq!(year.primary_headers[0].label, "2020s");
}

#[test]
fn week_zoom_labels_days_and_months() {
    let projects = vec![project("p", "2025-01-10", "2025-01-12")];

    let layout = build_timeline(&projects, ZoomLevel::Week, date(2025, 1, 10));

    assert_eq!(layout.primary_headers[0].label, "December 2024");
    assert_eq!(layout.secondary_headers[0].width, ZoomLevel::Week.px_per_day());
    assert!(layout
        .primary_headers
        .iter()
        .any(|bucket| bucket.label == "January 2025"));
}
