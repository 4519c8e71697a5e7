//! Swipeable paging container.
//!
//! The pager lays a sequence of pages along one axis, keeps a bounded window
//! of pages mounted around the current one, and turns drag or fling gestures
//! into transitions of exactly one page. It is headless: a mount surface
//! (see [`crate::harness`]) drives [`Pager::measure`] and
//! [`Pager::handle_cursor_event`] and reads back the placed page geometry.

use std::time::Duration;

use derive_setters::Setters;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    cursor::{CursorEvent, CursorEventContent, PressKeyEventType, VelocityTracker},
    dp::Dp,
    layout::{
        ComputedData, Constraint, DimensionValue, LayoutDirection, MeasurementError,
        resolve_dimension,
    },
    px::{Px, PxPosition, PxRect},
    state::State,
};

/// Fraction of a page that a drag must cross before the release commits a
/// page change instead of snapping back.
pub const DEFAULT_SNAP_THRESHOLD: f32 = 0.5;

/// Release velocity, in pixels per second, above which a drag commits a page
/// change regardless of the distance covered.
pub const DEFAULT_MIN_FLING_VELOCITY: f32 = 300.0;

/// Scroll axis of a pager.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PagerAxis {
    /// Pages are placed side by side and swiped horizontally.
    #[default]
    Horizontal,
    /// Pages are stacked and swiped vertically.
    Vertical,
}

impl PagerAxis {
    pub(crate) fn main_dimension(self, constraint: &Constraint) -> DimensionValue {
        match self {
            Self::Horizontal => constraint.width,
            Self::Vertical => constraint.height,
        }
    }

    pub(crate) fn cross_dimension(self, constraint: &Constraint) -> DimensionValue {
        match self {
            Self::Horizontal => constraint.height,
            Self::Vertical => constraint.width,
        }
    }

    pub(crate) fn main_extent(self, size: ComputedData) -> Px {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    pub(crate) fn pack_size(self, main: Px, cross: Px) -> ComputedData {
        match self {
            Self::Horizontal => ComputedData {
                width: main,
                height: cross,
            },
            Self::Vertical => ComputedData {
                width: cross,
                height: main,
            },
        }
    }

    pub(crate) fn pack_rect(self, main: Px, main_extent: Px, cross_extent: Px) -> PxRect {
        match self {
            Self::Horizontal => PxRect::new(main, Px::ZERO, main_extent, cross_extent),
            Self::Vertical => PxRect::new(Px::ZERO, main, cross_extent, main_extent),
        }
    }

    pub(crate) fn main_of(self, rect: PxRect) -> Px {
        match self {
            Self::Horizontal => rect.x,
            Self::Vertical => rect.y,
        }
    }

    pub(crate) fn main_size_of(self, rect: PxRect) -> Px {
        match self {
            Self::Horizontal => rect.width,
            Self::Vertical => rect.height,
        }
    }

    pub(crate) fn offset_position(self, origin: PxPosition, delta: Px) -> PxPosition {
        match self {
            Self::Horizontal => origin.offset(delta, Px::ZERO),
            Self::Vertical => origin.offset(Px::ZERO, delta),
        }
    }

    pub(crate) fn drag_delta(self, from: PxPosition, to: PxPosition) -> f32 {
        match self {
            Self::Horizontal => (to.x - from.x).to_f32(),
            Self::Vertical => (to.y - from.y).to_f32(),
        }
    }

    /// Sign mapping visual motion along this axis to logical page order.
    ///
    /// Only the horizontal axis is affected by the layout direction.
    pub(crate) fn direction_sign(self, direction: LayoutDirection) -> i32 {
        match self {
            Self::Horizontal => direction.horizontal_sign(),
            Self::Vertical => 1,
        }
    }
}

/// How a page is sized along the scroll axis.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum PagerPageSize {
    /// Pages span the whole container along the scroll axis.
    #[default]
    Fill,
    /// Pages span this fraction of the container, in `(0, 1]`.
    Fraction(f32),
    /// Pages have a fixed density-independent extent.
    Fixed(Dp),
}

/// Configuration for mounting a pager.
#[derive(Debug, Clone, Setters)]
pub struct PagerArgs {
    /// Total number of pages. Must be at least 1.
    pub page_count: usize,
    /// Page selected when the pager is first mounted.
    pub initial_page: usize,
    /// Scroll axis.
    pub axis: PagerAxis,
    /// Flow direction of the page sequence.
    pub layout_direction: LayoutDirection,
    /// Page extent along the scroll axis.
    pub page_size: PagerPageSize,
    /// Spacing between adjacent pages.
    pub page_spacing: Dp,
    /// Number of pages kept mounted on each side of the current one.
    pub offscreen_limit: usize,
    /// Whether drag gestures move the pager.
    pub user_scroll_enabled: bool,
    /// Dragged page fraction required to commit a transition on release.
    pub snap_threshold: f32,
    /// Release velocity required to commit a transition regardless of
    /// distance, in pixels per second.
    pub min_fling_velocity: f32,
}

impl Default for PagerArgs {
    fn default() -> Self {
        Self {
            page_count: 0,
            initial_page: 0,
            axis: PagerAxis::Horizontal,
            layout_direction: LayoutDirection::Ltr,
            page_size: PagerPageSize::Fill,
            page_spacing: Dp::ZERO,
            offscreen_limit: 2,
            user_scroll_enabled: true,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
        }
    }
}

/// Configuration rejected at mount time.
#[derive(Debug, Error, PartialEq)]
pub enum SetupError {
    /// The pager was mounted with zero pages.
    #[error("a pager needs at least one page")]
    EmptyPager,
    /// The initial page does not exist.
    #[error("initial page {page} is outside the page range 0..{page_count}")]
    InitialPageOutOfRange {
        /// Requested initial page.
        page: usize,
        /// Number of pages in the pager.
        page_count: usize,
    },
    /// A fractional page size fell outside `(0, 1]`.
    #[error("page size fraction {0} is outside (0, 1]")]
    PageFraction(f32),
    /// A fixed page size was negative.
    #[error("fixed page size {0} dp is negative")]
    NegativePageSize(f64),
    /// The snap threshold fell outside `(0, 1]`.
    #[error("snap threshold {0} is outside (0, 1]")]
    SnapThreshold(f32),
    /// The minimum fling velocity was negative.
    #[error("minimum fling velocity {0} px/s is negative")]
    NegativeFlingVelocity(f32),
    /// The container could not be measured.
    #[error(transparent)]
    Measurement(#[from] MeasurementError),
}

#[derive(Debug, Clone)]
struct DragState {
    origin_page: usize,
    last_position: PxPosition,
    last_timestamp: Duration,
    tracker: VelocityTracker,
}

/// Live pager state: the current page and the scroll position backing it.
///
/// Held behind a [`State`] handle shared between the mounted widget and its
/// caller. The current page only changes through a committed gesture or
/// [`PagerController::jump_to_page`].
#[derive(Debug, Clone)]
pub struct PagerController {
    current_page: usize,
    page_count: usize,
    page_main: Px,
    page_spacing: Px,
    scroll_offset: f32,
    drag: Option<DragState>,
    initialized: bool,
}

impl PagerController {
    /// Creates a controller starting on the requested page.
    pub fn new(initial_page: usize) -> Self {
        Self {
            current_page: initial_page,
            page_count: 0,
            page_main: Px::ZERO,
            page_spacing: Px::ZERO,
            scroll_offset: 0.0,
            drag: None,
            initialized: false,
        }
    }

    /// The currently selected page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages the pager was laid out with.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Whether a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Offset from the current page as a fraction of one page step.
    ///
    /// Zero when settled; positive values lean toward the next page.
    pub fn offset_fraction(&self) -> f32 {
        let step = self.page_distance();
        if step <= f32::EPSILON {
            return 0.0;
        }
        let progress = self.progress_from(self.current_page);
        progress.clamp(-1.0, 1.0)
    }

    /// Jumps to the requested page, clamped to the valid range.
    ///
    /// Cancels any in-flight drag.
    pub fn jump_to_page(&mut self, page: usize) {
        let page = self.clamp_page(page);
        self.drag = None;
        self.current_page = page;
        self.scroll_offset = self.offset_for_page(page);
    }

    pub(crate) fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub(crate) fn update_layout(&mut self, page_main: Px, page_spacing: Px, page_count: usize) {
        let size_changed = page_main != self.page_main || page_spacing != self.page_spacing;
        self.page_main = page_main;
        self.page_spacing = page_spacing;
        self.page_count = page_count;
        self.current_page = self.clamp_page(self.current_page);

        if (!self.initialized || size_changed) && page_main > Px::ZERO {
            self.scroll_offset = self.offset_for_page(self.current_page);
            self.initialized = true;
        }
        self.scroll_offset = self.clamp_offset(self.scroll_offset);
    }

    pub(crate) fn start_drag(&mut self, position: PxPosition, timestamp: Duration) {
        self.drag = Some(DragState {
            origin_page: self.current_page,
            last_position: position,
            last_timestamp: timestamp,
            tracker: VelocityTracker::default(),
        });
    }

    /// Applies a cursor move to the in-flight drag.
    ///
    /// `sign` maps visual motion to logical page order; dragging content
    /// toward lower coordinates under LTR reveals the next page.
    pub(crate) fn drag_to(
        &mut self,
        position: PxPosition,
        timestamp: Duration,
        axis: PagerAxis,
        sign: i32,
    ) {
        if self.page_distance() <= f32::EPSILON {
            return;
        }
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let visual = axis.drag_delta(drag.last_position, position);
        let logical = visual * sign as f32;
        let delta_time = timestamp
            .saturating_sub(drag.last_timestamp)
            .as_secs_f32();
        if delta_time > 0.0 {
            drag.tracker.push(timestamp, logical / delta_time);
        }
        drag.last_position = position;
        drag.last_timestamp = timestamp;
        let next = self.scroll_offset + logical;
        self.scroll_offset = self.clamp_offset(next);
    }

    /// Ends the drag and commits at most one page of travel.
    ///
    /// Returns the page the pager settled on.
    pub(crate) fn release_drag(&mut self, snap_threshold: f32, min_fling_velocity: f32) -> usize {
        let Some(drag) = self.drag.take() else {
            return self.current_page;
        };
        let origin = drag.origin_page;
        let velocity = drag.tracker.average().unwrap_or(0.0);
        let progress = self.progress_from(origin);
        let snap_threshold = snap_threshold.clamp(f32::EPSILON, 1.0);

        // Logical offsets shrink as pages advance, so a negative release
        // velocity points at the next page.
        let target = if velocity.abs() >= min_fling_velocity && min_fling_velocity > 0.0 {
            if velocity < 0.0 {
                origin.saturating_add(1)
            } else {
                origin.saturating_sub(1)
            }
        } else if progress >= snap_threshold {
            origin.saturating_add(1)
        } else if progress <= -snap_threshold {
            origin.saturating_sub(1)
        } else {
            origin
        };
        let target = self.clamp_page(target);

        trace!(origin, target, velocity, progress, "pager drag released");
        self.current_page = target;
        self.scroll_offset = self.offset_for_page(target);
        target
    }

    fn clamp_page(&self, page: usize) -> usize {
        if self.page_count == 0 {
            0
        } else {
            page.min(self.page_count - 1)
        }
    }

    fn page_distance(&self) -> f32 {
        (self.page_main + self.page_spacing).to_f32()
    }

    fn offset_for_page(&self, page: usize) -> f32 {
        -self.page_distance() * page as f32
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        if self.page_count <= 1 || self.page_distance() <= f32::EPSILON {
            return 0.0;
        }
        let min_offset = -self.page_distance() * (self.page_count - 1) as f32;
        offset.clamp(min_offset, 0.0)
    }

    /// Pages of travel away from `origin`, positive toward higher pages.
    fn progress_from(&self, origin: usize) -> f32 {
        let step = self.page_distance();
        if step <= f32::EPSILON {
            return 0.0;
        }
        (self.offset_for_page(origin) - self.scroll_offset) / step
    }
}

impl Default for PagerController {
    fn default() -> Self {
        Self::new(0)
    }
}

/// One page placed by a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedPage {
    /// Logical page index.
    pub index: usize,
    /// Bounds relative to the mount root.
    pub rect: PxRect,
}

/// The settled result of one pager layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerFrame {
    /// Measured container size.
    pub size: ComputedData,
    /// Every mounted page with its placement, in index order.
    pub pages: SmallVec<[PlacedPage; 8]>,
}

impl PagerFrame {
    /// The placement of a mounted page, if it is inside the window.
    pub fn page(&self, index: usize) -> Option<&PlacedPage> {
        self.pages.iter().find(|page| page.index == index)
    }

    /// Index of the first mounted page.
    pub fn first_mounted(&self) -> Option<usize> {
        self.pages.first().map(|page| page.index)
    }

    /// Index of the last mounted page.
    pub fn last_mounted(&self) -> Option<usize> {
        self.pages.last().map(|page| page.index)
    }

    pub(crate) fn contains(&self, position: PxPosition) -> bool {
        PxRect::new(Px::ZERO, Px::ZERO, self.size.width, self.size.height).contains(position)
    }
}

/// A mounted paging widget.
///
/// Construction validates the configuration and fails fast on nonsense
/// rather than surfacing it later as a geometry mismatch.
pub struct Pager {
    args: PagerArgs,
    controller: State<PagerController>,
}

impl Pager {
    /// Mounts a pager with a fresh controller on `args.initial_page`.
    pub fn mount(args: PagerArgs) -> Result<Self, SetupError> {
        let controller = State::new(PagerController::new(args.initial_page));
        Self::with_controller(args, controller)
    }

    /// Mounts a pager driven by an existing controller handle.
    pub fn with_controller(
        args: PagerArgs,
        controller: State<PagerController>,
    ) -> Result<Self, SetupError> {
        validate_args(&args)?;
        debug!(
            page_count = args.page_count,
            initial_page = args.initial_page,
            offscreen_limit = args.offscreen_limit,
            axis = ?args.axis,
            direction = ?args.layout_direction,
            "mounting pager"
        );
        Ok(Self { args, controller })
    }

    /// The mount configuration.
    pub fn args(&self) -> &PagerArgs {
        &self.args
    }

    /// The live state handle shared with the mount surface.
    pub fn controller(&self) -> State<PagerController> {
        self.controller.clone()
    }

    /// Lays out the mounted page window under the given constraint.
    ///
    /// Pages are centered: with container extent `W` and page extent `w`,
    /// the current page starts at `(W - w) / 2` and page `p` sits at
    /// `(W - w) / 2 + sign(direction) * step * (p - current)`.
    pub fn measure(&self, constraint: &Constraint) -> Result<PagerFrame, MeasurementError> {
        let axis = self.args.axis;
        let container_main = resolve_dimension(axis.main_dimension(constraint), Px::ZERO, "main")?;
        let container_cross =
            resolve_dimension(axis.cross_dimension(constraint), Px::ZERO, "cross")?;

        let page_main = resolve_page_main(self.args.page_size, container_main);
        let page_spacing = Px::from(self.args.page_spacing).max(Px::ZERO);

        self.controller
            .with_mut(|c| c.update_layout(page_main, page_spacing, self.args.page_count));
        let (current_page, scroll_offset) = self
            .controller
            .with(|c| (c.current_page(), c.scroll_offset()));

        let window = mounted_window(current_page, self.args.page_count, self.args.offscreen_limit);
        let first_main = (container_main - page_main) / 2;
        let step = (page_main + page_spacing).to_f32();
        let sign = axis.direction_sign(self.args.layout_direction);

        let mut pages = SmallVec::new();
        for index in window {
            let travel = step * index as f32 + scroll_offset;
            let main = first_main + Px::saturating_from_f32(sign as f32 * travel);
            pages.push(PlacedPage {
                index,
                rect: axis.pack_rect(main, page_main, container_cross),
            });
        }

        Ok(PagerFrame {
            size: axis.pack_size(container_main, container_cross),
            pages,
        })
    }

    /// Feeds one cursor event through gesture recognition.
    ///
    /// `frame` is the most recent layout pass; it scopes press hit-testing
    /// to the container. A release settles the controller synchronously, so
    /// the caller should re-measure afterwards.
    pub fn handle_cursor_event(&self, frame: &PagerFrame, event: &CursorEvent) {
        if !self.args.user_scroll_enabled {
            return;
        }
        let axis = self.args.axis;
        let sign = axis.direction_sign(self.args.layout_direction);
        match event.content {
            CursorEventContent::Pressed(PressKeyEventType::Left) => {
                if frame.contains(event.position) {
                    self.controller
                        .with_mut(|c| c.start_drag(event.position, event.timestamp));
                }
            }
            CursorEventContent::Moved => {
                self.controller
                    .with_mut(|c| c.drag_to(event.position, event.timestamp, axis, sign));
            }
            CursorEventContent::Released(PressKeyEventType::Left) => {
                let committed = self.controller.with_mut(|c| {
                    c.release_drag(self.args.snap_threshold, self.args.min_fling_velocity)
                });
                trace!(committed, "pager settled");
            }
            _ => {}
        }
    }
}

fn validate_args(args: &PagerArgs) -> Result<(), SetupError> {
    if args.page_count == 0 {
        return Err(SetupError::EmptyPager);
    }
    if args.initial_page >= args.page_count {
        return Err(SetupError::InitialPageOutOfRange {
            page: args.initial_page,
            page_count: args.page_count,
        });
    }
    match args.page_size {
        PagerPageSize::Fraction(fraction) if !(fraction > 0.0 && fraction <= 1.0) => {
            return Err(SetupError::PageFraction(fraction));
        }
        PagerPageSize::Fixed(dp) if dp.0 < 0.0 => {
            return Err(SetupError::NegativePageSize(dp.0));
        }
        _ => {}
    }
    if !(args.snap_threshold > 0.0 && args.snap_threshold <= 1.0) {
        return Err(SetupError::SnapThreshold(args.snap_threshold));
    }
    if args.min_fling_velocity < 0.0 {
        return Err(SetupError::NegativeFlingVelocity(args.min_fling_velocity));
    }
    Ok(())
}

/// Resolves the page extent along the scroll axis.
pub(crate) fn resolve_page_main(page_size: PagerPageSize, container_main: Px) -> Px {
    match page_size {
        PagerPageSize::Fill => container_main,
        PagerPageSize::Fraction(fraction) => {
            Px::saturating_from_f32((container_main.to_f32() * fraction).round())
        }
        PagerPageSize::Fixed(dp) => Px::from(dp),
    }
}

/// Pages mounted around `current`: `current ± limit`, clamped to the range.
pub(crate) fn mounted_window(
    current: usize,
    page_count: usize,
    limit: usize,
) -> std::ops::Range<usize> {
    if page_count == 0 {
        return 0..0;
    }
    let first = current.saturating_sub(limit);
    let last = current.saturating_add(limit).min(page_count - 1);
    first..last + 1
}
