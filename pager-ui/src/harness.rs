//! Headless mount surface, gesture synthesis, and geometry assertions.
//!
//! The harness stands in for a real windowing embedding: it mounts a
//! [`Pager`] at a fixed size, instantiates tagged content for every page in
//! the mounted window, synthesizes drag gestures across the container
//! center, and lets callers query or assert the laid-out bounds of any page.
//!
//! Everything is synchronous and deterministic; a gesture call returns only
//! after the pager has settled and the page window has been remounted.

use std::{collections::HashMap, time::Duration};

use derive_setters::Setters;
use thiserror::Error;
use tracing::debug;

use crate::{
    color::Color,
    cursor::{CursorEvent, CursorEventContent, PressKeyEventType},
    layout::{Constraint, DimensionValue},
    pager::{Pager, PagerArgs, PagerController, PagerFrame, resolve_page_main},
    px::{Px, PxRect},
    state::State,
};

/// Number of move samples a synthesized swipe is split into.
const SWIPE_MOVE_SAMPLES: u32 = 10;

/// Passes a settle loop may take before the harness gives up.
const MAX_SETTLE_PASSES: usize = 8;

/// Mount surface configuration.
#[derive(Debug, Clone, Setters)]
pub struct HarnessArgs {
    /// Container width in physical pixels.
    pub width: Px,
    /// Container height in physical pixels.
    pub height: Px,
}

impl Default for HarnessArgs {
    fn default() -> Self {
        Self {
            width: Px(640),
            height: Px(480),
        }
    }
}

/// Content rendered into one page slot.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Tag identifying this page's content; the default builder uses the
    /// page index.
    pub tag: String,
    /// Background color.
    pub color: Color,
    /// Text shown on the page.
    pub label: String,
}

/// The default page builder: tags each page with its index and gives it a
/// random background so adjacent pages are visually distinct.
pub fn numbered_pages() -> impl Fn(usize) -> PageContent + Send + Sync + 'static {
    |page| PageContent {
        tag: page.to_string(),
        color: Color::random_opaque(),
        label: page.to_string(),
    }
}

/// A page instantiated inside the mounted window.
#[derive(Debug, Clone)]
pub struct PageNode {
    /// The content the builder produced for this page.
    pub content: PageContent,
    /// Bounds relative to the mount root, from the latest layout pass.
    pub bounds: PxRect,
}

/// Logical direction of a swipe, independent of the layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Reveal the next page in content order.
    Forward,
    /// Reveal the previous page in content order.
    Backward,
}

/// A page geometry query that could not be answered.
///
/// Lookup failures are deliberately distinct from wrong-position assertion
/// failures: a page that was never mounted has no bounds to be wrong about.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageLookupError {
    /// The index does not name a page of this pager.
    #[error("page {page} is outside the page range 0..{page_count}")]
    OutOfRange {
        /// Requested page.
        page: usize,
        /// Number of pages in the pager.
        page_count: usize,
    },
    /// The page exists but is outside the mounted window.
    #[error("page {page} is not mounted (window covers {first}..={last})")]
    NotMounted {
        /// Requested page.
        page: usize,
        /// First mounted page.
        first: usize,
        /// Last mounted page.
        last: usize,
    },
}

/// A pager mounted on a headless surface.
///
/// # Examples
///
/// ```
/// use pager_ui::{HarnessArgs, PagerArgs, PagerHarness, SwipeDirection, numbered_pages};
///
/// # fn main() -> Result<(), pager_ui::SetupError> {
/// let mut pager = PagerHarness::mount(
///     HarnessArgs::default(),
///     PagerArgs::default().page_count(4),
///     numbered_pages(),
/// )?;
///
/// pager.swipe_across_center(SwipeDirection::Forward, 2_000.0, 0.6);
/// assert_eq!(pager.current_page(), 1);
/// pager.assert_page_position(1, 1);
/// # Ok(())
/// # }
/// ```
pub struct PagerHarness {
    pager: Pager,
    constraint: Constraint,
    frame: PagerFrame,
    nodes: HashMap<usize, PageNode>,
    builder: Box<dyn Fn(usize) -> PageContent + Send + Sync>,
    clock: Duration,
}

impl PagerHarness {
    /// Mounts a pager at a fixed size and runs the initial layout pass.
    ///
    /// `builder` is invoked once for each page entering the mounted window;
    /// its content stays alive until the page leaves the window again.
    pub fn mount(
        harness_args: HarnessArgs,
        pager_args: PagerArgs,
        builder: impl Fn(usize) -> PageContent + Send + Sync + 'static,
    ) -> Result<Self, crate::pager::SetupError> {
        let pager = Pager::mount(pager_args)?;
        let constraint = Constraint::new(
            DimensionValue::Fixed(harness_args.width),
            DimensionValue::Fixed(harness_args.height),
        );
        let frame = pager.measure(&constraint)?;
        let mut harness = Self {
            pager,
            constraint,
            frame,
            nodes: HashMap::new(),
            builder: Box::new(builder),
            clock: Duration::ZERO,
        };
        harness.sync_nodes();
        debug!(
            width = %harness_args.width,
            height = %harness_args.height,
            "mounted pager harness"
        );
        Ok(harness)
    }

    /// Bounds of the mount root.
    pub fn root_bounds(&self) -> PxRect {
        PxRect::new(
            Px::ZERO,
            Px::ZERO,
            self.frame.size.width,
            self.frame.size.height,
        )
    }

    /// The page the pager is settled on.
    pub fn current_page(&self) -> usize {
        self.pager.controller().with(|c| c.current_page())
    }

    /// The live pager state handle.
    pub fn controller(&self) -> State<PagerController> {
        self.pager.controller()
    }

    /// The latest layout pass.
    pub fn frame(&self) -> &PagerFrame {
        &self.frame
    }

    /// Laid-out bounds of a page, or why they cannot be known.
    pub fn page_bounds(&self, page: usize) -> Result<PxRect, PageLookupError> {
        self.page_node(page).map(|node| node.bounds)
    }

    /// The mounted content node for a page, or why it is absent.
    pub fn page_node(&self, page: usize) -> Result<&PageNode, PageLookupError> {
        let page_count = self.pager.args().page_count;
        if page >= page_count {
            return Err(PageLookupError::OutOfRange { page, page_count });
        }
        self.nodes.get(&page).ok_or_else(|| {
            let first = self.frame.first_mounted().unwrap_or(0);
            let last = self.frame.last_mounted().unwrap_or(0);
            PageLookupError::NotMounted { page, first, last }
        })
    }

    /// Jumps to a page programmatically and settles the window.
    pub fn jump_to_page(&mut self, page: usize) {
        self.pager.controller().with_mut(|c| c.jump_to_page(page));
        self.settle();
    }

    /// Synthesizes a drag-then-release gesture across the container center.
    ///
    /// The drag covers `distance_fraction` of the container's scroll extent
    /// at the given average `velocity` (pixels per second, must be
    /// positive). The visual sign is derived from the layout direction so
    /// that [`SwipeDirection::Forward`] always reveals the next logical
    /// page. Blocks until the pager has settled and the page window has
    /// been remounted.
    pub fn swipe_across_center(
        &mut self,
        direction: SwipeDirection,
        velocity: f32,
        distance_fraction: f32,
    ) {
        if !(velocity > 0.0) {
            panic!("swipe velocity must be positive, got {velocity}");
        }
        if !(distance_fraction > 0.0) {
            panic!("swipe distance fraction must be positive, got {distance_fraction}");
        }

        let axis = self.pager.args().axis;
        let container_main = axis.main_extent(self.frame.size);
        let distance = container_main.to_f32() * distance_fraction;
        let logical = match direction {
            SwipeDirection::Forward => -distance,
            SwipeDirection::Backward => distance,
        };
        // The controller maps visual deltas back through the same sign, so
        // under RTL a forward swipe travels visually rightward.
        let visual = logical * axis.direction_sign(self.pager.args().layout_direction) as f32;

        debug!(
            ?direction,
            velocity,
            distance_fraction,
            visual,
            "synthesizing swipe across center"
        );

        let center = self.root_bounds().center();
        let step_duration = Duration::from_secs_f32(distance / velocity / SWIPE_MOVE_SAMPLES as f32);

        self.clock += Duration::from_millis(1);
        self.dispatch(CursorEvent {
            timestamp: self.clock,
            position: center,
            content: CursorEventContent::Pressed(PressKeyEventType::Left),
        });

        let mut position = center;
        for sample in 1..=SWIPE_MOVE_SAMPLES {
            self.clock += step_duration;
            let travelled = visual * sample as f32 / SWIPE_MOVE_SAMPLES as f32;
            position = axis.offset_position(center, Px::saturating_from_f32(travelled));
            self.dispatch(CursorEvent {
                timestamp: self.clock,
                position,
                content: CursorEventContent::Moved,
            });
        }

        self.dispatch(CursorEvent {
            timestamp: self.clock,
            position,
            content: CursorEventContent::Released(PressKeyEventType::Left),
        });
        self.settle();
    }

    /// Asserts that a page is laid out exactly where the centered paging
    /// formula puts it for the given current page.
    ///
    /// The expectation is recomputed from the measured root bounds, not the
    /// requested mount size. Panics with both values on mismatch; a page
    /// that cannot be looked up panics with the lookup failure instead.
    pub fn assert_page_position(&self, page: usize, current_page: usize) {
        let bounds = match self.page_bounds(page) {
            Ok(bounds) => bounds,
            Err(err) => panic!("cannot verify page {page}: {err}"),
        };

        let args = self.pager.args();
        let axis = args.axis;
        let container_main = axis.main_extent(self.frame.size);
        let page_main = resolve_page_main(args.page_size, container_main);
        let spacing = Px::from(args.page_spacing).max(Px::ZERO);
        let step = (page_main + spacing).raw() as i64;
        let first = ((container_main - page_main) / 2).raw() as i64;
        let sign = axis.direction_sign(args.layout_direction) as i64;

        let expected_main = first + sign * step * (page as i64 - current_page as i64);
        let actual_main = axis.main_of(bounds).raw() as i64;
        let actual_extent = axis.main_size_of(bounds);

        if actual_extent != page_main {
            panic!(
                "page {page} spans {actual_extent} px along the pager axis, expected {page_main} px"
            );
        }
        if actual_main != expected_main {
            panic!(
                "page {page} laid out at {actual_main} px with current page {current_page}, \
                 expected {expected_main} px"
            );
        }
    }

    fn dispatch(&mut self, event: CursorEvent) {
        self.pager.handle_cursor_event(&self.frame, &event);
        self.pump();
    }

    /// One layout pass.
    fn pump(&mut self) {
        match self.pager.measure(&self.constraint) {
            Ok(frame) => self.frame = frame,
            Err(err) => panic!("pager measure failed: {err}"),
        }
        self.sync_nodes();
    }

    /// Re-measures until the mounted window stops changing.
    fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_PASSES {
            let before = self.frame.clone();
            self.pump();
            if self.frame == before {
                return;
            }
        }
        panic!("pager layout did not settle after {MAX_SETTLE_PASSES} passes");
    }

    /// Mounts content for pages entering the window and drops content for
    /// pages that left it.
    fn sync_nodes(&mut self) {
        let frame = &self.frame;
        self.nodes
            .retain(|&page, _| frame.page(page).is_some());
        for placed in &frame.pages {
            let node = self
                .nodes
                .entry(placed.index)
                .or_insert_with(|| PageNode {
                    content: (self.builder)(placed.index),
                    bounds: placed.rect,
                });
            node.bounds = placed.rect;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutDirection;

    fn mount(page_count: usize) -> PagerHarness {
        match PagerHarness::mount(
            HarnessArgs::default(),
            PagerArgs::default().page_count(page_count),
            numbered_pages(),
        ) {
            Ok(harness) => harness,
            Err(err) => panic!("mount failed: {err}"),
        }
    }

    #[test]
    fn mounted_window_content_is_tagged_by_index() {
        let harness = mount(10);
        for page in 0..=2 {
            let node = match harness.page_node(page) {
                Ok(node) => node,
                Err(err) => panic!("page {page} missing: {err}"),
            };
            assert_eq!(node.content.tag, page.to_string());
        }
    }

    #[test]
    fn content_outside_the_window_is_not_instantiated() {
        let harness = mount(10);
        assert_eq!(
            harness.page_bounds(3),
            Err(PageLookupError::NotMounted {
                page: 3,
                first: 0,
                last: 2
            })
        );
        assert_eq!(
            harness.page_bounds(10),
            Err(PageLookupError::OutOfRange {
                page: 10,
                page_count: 10
            })
        );
    }

    #[test]
    fn window_content_survives_page_transitions() {
        let mut harness = mount(10);
        harness.jump_to_page(2);
        // Page 2 was already mounted; its node must be the same content.
        let node = match harness.page_node(2) {
            Ok(node) => node.content.color,
            Err(err) => panic!("page 2 missing: {err}"),
        };
        harness.jump_to_page(3);
        let node_after = match harness.page_node(2) {
            Ok(node) => node.content.color,
            Err(err) => panic!("page 2 missing: {err}"),
        };
        assert_eq!(node, node_after);
    }

    #[test]
    fn rtl_layout_direction_is_flipped_at_the_mount_root() {
        let harness = match PagerHarness::mount(
            HarnessArgs::default(),
            PagerArgs::default()
                .page_count(10)
                .layout_direction(LayoutDirection::Rtl),
            numbered_pages(),
        ) {
            Ok(harness) => harness,
            Err(err) => panic!("mount failed: {err}"),
        };
        // Page 1 sits one container width to the visual left under RTL.
        assert_eq!(
            harness.page_bounds(1).map(|b| b.x),
            Ok(Px(-640))
        );
    }
}
