//! Geometry and gesture tests for the horizontal pager.
//!
//! Each test runs against a table of mount scenarios crossing item width
//! fraction, offscreen limit, and layout direction. The container is always
//! 640x480, so full-width pages measure 640 px and 80%-width pages 512 px
//! with a 64 px centering inset.

use std::sync::Once;

use pager_ui::{
    HarnessArgs, LayoutDirection, PageLookupError, PagerArgs, PagerAxis, PagerHarness,
    PagerPageSize, Px, SetupError, SwipeDirection, numbered_pages,
};

const PAGE_COUNT: usize = 10;
const LAST_PAGE: usize = PAGE_COUNT - 1;

/// Fast enough to commit a transition on its own.
const FLING_VELOCITY: f32 = 5_000.0;
/// Too slow to fling; commits only through drag distance.
const CRAWL_VELOCITY: f32 = 100.0;

struct Scenario {
    item_width_fraction: f32,
    offscreen_limit: usize,
    layout_direction: LayoutDirection,
}

const SCENARIOS: &[Scenario] = &[
    // Typical full-width items.
    Scenario {
        item_width_fraction: 1.0,
        offscreen_limit: 2,
        layout_direction: LayoutDirection::Ltr,
    },
    Scenario {
        item_width_fraction: 1.0,
        offscreen_limit: 2,
        layout_direction: LayoutDirection::Rtl,
    },
    // An increased offscreen limit.
    Scenario {
        item_width_fraction: 1.0,
        offscreen_limit: 4,
        layout_direction: LayoutDirection::Ltr,
    },
    Scenario {
        item_width_fraction: 1.0,
        offscreen_limit: 4,
        layout_direction: LayoutDirection::Rtl,
    },
    // Items at 80% width.
    Scenario {
        item_width_fraction: 0.8,
        offscreen_limit: 2,
        layout_direction: LayoutDirection::Ltr,
    },
    Scenario {
        item_width_fraction: 0.8,
        offscreen_limit: 2,
        layout_direction: LayoutDirection::Rtl,
    },
];

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn mount(scenario: &Scenario) -> PagerHarness {
    init_tracing();
    let args = PagerArgs::default()
        .page_count(PAGE_COUNT)
        .page_size(PagerPageSize::Fraction(scenario.item_width_fraction))
        .offscreen_limit(scenario.offscreen_limit)
        .layout_direction(scenario.layout_direction);
    match PagerHarness::mount(HarnessArgs::default(), args, numbered_pages()) {
        Ok(harness) => harness,
        Err(err) => panic!("mount failed: {err}"),
    }
}

/// Verifies every mounted page against the centered paging formula, and
/// that the first page beyond the window is reported as not mounted.
fn assert_window(harness: &PagerHarness, scenario: &Scenario, current: usize) {
    let first = current.saturating_sub(scenario.offscreen_limit);
    let last = (current + scenario.offscreen_limit).min(LAST_PAGE);
    for page in first..=last {
        harness.assert_page_position(page, current);
    }
    if last < LAST_PAGE {
        assert!(matches!(
            harness.page_bounds(last + 1),
            Err(PageLookupError::NotMounted { .. })
        ));
    }
}

#[test]
fn initial_window_is_laid_out_exactly() {
    for scenario in SCENARIOS {
        let harness = mount(scenario);
        assert_eq!(harness.current_page(), 0);
        assert_window(&harness, scenario, 0);
        assert_eq!(
            harness.page_bounds(PAGE_COUNT),
            Err(PageLookupError::OutOfRange {
                page: PAGE_COUNT,
                page_count: PAGE_COUNT
            })
        );
    }
}

#[test]
fn forward_swipe_advances_exactly_one_page() {
    for scenario in SCENARIOS {
        let mut harness = mount(scenario);
        harness.swipe_across_center(SwipeDirection::Forward, FLING_VELOCITY, 0.5);
        assert_eq!(harness.current_page(), 1);
        assert_window(&harness, scenario, 1);
    }
}

#[test]
fn backward_swipe_returns_to_the_previous_page() {
    for scenario in SCENARIOS {
        let mut harness = mount(scenario);
        harness.swipe_across_center(SwipeDirection::Forward, FLING_VELOCITY, 0.5);
        harness.swipe_across_center(SwipeDirection::Backward, FLING_VELOCITY, 0.5);
        assert_eq!(harness.current_page(), 0);
        assert_window(&harness, scenario, 0);
    }
}

#[test]
fn backward_swipe_at_the_first_page_is_idempotent() {
    for scenario in SCENARIOS {
        let mut harness = mount(scenario);
        for _ in 0..2 {
            harness.swipe_across_center(SwipeDirection::Backward, FLING_VELOCITY, 0.5);
            assert_eq!(harness.current_page(), 0);
            assert_window(&harness, scenario, 0);
        }
    }
}

#[test]
fn forward_swipe_at_the_last_page_is_idempotent() {
    for scenario in SCENARIOS {
        let mut harness = mount(scenario);
        harness.jump_to_page(LAST_PAGE);
        for _ in 0..2 {
            harness.swipe_across_center(SwipeDirection::Forward, FLING_VELOCITY, 0.5);
            assert_eq!(harness.current_page(), LAST_PAGE);
            assert_window(&harness, scenario, LAST_PAGE);
        }
    }
}

#[test]
fn short_slow_drag_snaps_back() {
    for scenario in SCENARIOS {
        let mut harness = mount(scenario);
        harness.swipe_across_center(SwipeDirection::Forward, CRAWL_VELOCITY, 0.2);
        assert_eq!(harness.current_page(), 0);
        assert_window(&harness, scenario, 0);
    }
}

#[test]
fn short_fast_fling_commits() {
    for scenario in SCENARIOS {
        let mut harness = mount(scenario);
        harness.swipe_across_center(SwipeDirection::Forward, FLING_VELOCITY, 0.2);
        assert_eq!(harness.current_page(), 1);
        assert_window(&harness, scenario, 1);
    }
}

#[test]
fn settled_pager_has_no_page_offset() {
    for scenario in SCENARIOS {
        let mut harness = mount(scenario);
        harness.swipe_across_center(SwipeDirection::Forward, FLING_VELOCITY, 0.5);
        assert_eq!(harness.controller().with(|c| c.offset_fraction()), 0.0);
    }
}

/// A forward swipe moves the current page the same way under both layout
/// directions, while the measured lefts progress with opposite signs.
#[test]
fn rtl_mirrors_ltr_page_progression() {
    for (fraction, limit) in [(1.0f32, 2usize), (1.0, 4), (0.8, 2)] {
        let ltr = Scenario {
            item_width_fraction: fraction,
            offscreen_limit: limit,
            layout_direction: LayoutDirection::Ltr,
        };
        let rtl = Scenario {
            item_width_fraction: fraction,
            offscreen_limit: limit,
            layout_direction: LayoutDirection::Rtl,
        };
        let mut ltr_harness = mount(&ltr);
        let mut rtl_harness = mount(&rtl);

        ltr_harness.swipe_across_center(SwipeDirection::Forward, FLING_VELOCITY, 0.5);
        rtl_harness.swipe_across_center(SwipeDirection::Forward, FLING_VELOCITY, 0.5);

        assert_eq!(ltr_harness.current_page(), 1);
        assert_eq!(rtl_harness.current_page(), 1);

        let step = (640.0 * fraction).round() as i32;
        let first = (640 - step) / 2;
        assert_eq!(ltr_harness.page_bounds(0).map(|b| b.x), Ok(Px(first - step)));
        assert_eq!(rtl_harness.page_bounds(0).map(|b| b.x), Ok(Px(first + step)));
    }
}

#[test]
fn full_width_geometry_walkthrough() {
    let scenario = &SCENARIOS[0];
    let mut harness = mount(scenario);

    let bounds = match harness.page_bounds(0) {
        Ok(bounds) => bounds,
        Err(err) => panic!("page 0 missing: {err}"),
    };
    assert_eq!(bounds.x, Px(0));
    assert_eq!(bounds.width, Px(640));
    assert_eq!(bounds.height, Px(480));

    harness.swipe_across_center(SwipeDirection::Forward, FLING_VELOCITY, 0.5);
    assert_eq!(harness.current_page(), 1);
    assert_eq!(harness.page_bounds(1).map(|b| b.x), Ok(Px(0)));
    assert_eq!(harness.page_bounds(0).map(|b| b.x), Ok(Px(-640)));
    assert_eq!(harness.page_bounds(2).map(|b| b.x), Ok(Px(640)));
    assert_eq!(harness.page_bounds(3).map(|b| b.x), Ok(Px(1280)));
}

#[test]
fn fractional_width_geometry_walkthrough() {
    let scenario = &SCENARIOS[4];
    let mut harness = mount(scenario);

    // firstItemLeft = (640 - 512) / 2.
    assert_eq!(harness.page_bounds(0).map(|b| b.x), Ok(Px(64)));
    assert_eq!(harness.page_bounds(0).map(|b| b.width), Ok(Px(512)));
    assert_eq!(harness.page_bounds(1).map(|b| b.x), Ok(Px(576)));

    harness.swipe_across_center(SwipeDirection::Forward, FLING_VELOCITY, 0.5);
    assert_eq!(harness.page_bounds(1).map(|b| b.x), Ok(Px(64)));
    assert_eq!(harness.page_bounds(0).map(|b| b.x), Ok(Px(64 - 512)));
    assert_eq!(harness.page_bounds(2).map(|b| b.x), Ok(Px(64 + 512)));
}

#[test]
fn jump_to_page_remounts_the_window() {
    let scenario = &SCENARIOS[0];
    let mut harness = mount(scenario);
    harness.jump_to_page(5);

    assert_eq!(harness.current_page(), 5);
    assert_window(&harness, scenario, 5);
    assert!(matches!(
        harness.page_bounds(2),
        Err(PageLookupError::NotMounted { .. })
    ));
}

#[test]
fn vertical_axis_uses_the_same_formula() {
    init_tracing();
    let args = PagerArgs::default()
        .page_count(PAGE_COUNT)
        .axis(PagerAxis::Vertical);
    let mut harness = match PagerHarness::mount(HarnessArgs::default(), args, numbered_pages()) {
        Ok(harness) => harness,
        Err(err) => panic!("mount failed: {err}"),
    };

    assert_eq!(harness.page_bounds(0).map(|b| b.y), Ok(Px(0)));
    assert_eq!(harness.page_bounds(0).map(|b| b.height), Ok(Px(480)));
    assert_eq!(harness.page_bounds(1).map(|b| b.y), Ok(Px(480)));

    harness.swipe_across_center(SwipeDirection::Forward, FLING_VELOCITY, 0.5);
    assert_eq!(harness.current_page(), 1);
    assert_eq!(harness.page_bounds(0).map(|b| b.y), Ok(Px(-480)));
    harness.assert_page_position(1, 1);
}

#[test]
fn mount_rejects_invalid_configuration() {
    init_tracing();
    let mount_with = |args: PagerArgs| {
        PagerHarness::mount(HarnessArgs::default(), args, numbered_pages()).err()
    };

    assert_eq!(
        mount_with(PagerArgs::default()),
        Some(SetupError::EmptyPager)
    );
    assert_eq!(
        mount_with(
            PagerArgs::default()
                .page_count(PAGE_COUNT)
                .page_size(PagerPageSize::Fraction(0.0))
        ),
        Some(SetupError::PageFraction(0.0))
    );
    assert_eq!(
        mount_with(
            PagerArgs::default()
                .page_count(PAGE_COUNT)
                .page_size(PagerPageSize::Fraction(1.2))
        ),
        Some(SetupError::PageFraction(1.2))
    );
    assert_eq!(
        mount_with(PagerArgs::default().page_count(PAGE_COUNT).initial_page(10)),
        Some(SetupError::InitialPageOutOfRange {
            page: 10,
            page_count: PAGE_COUNT
        })
    );
}
