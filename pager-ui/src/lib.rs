//! A swipeable paging container with a headless layout and gesture harness.
//!
//! `pager-ui` lays a sequence of pages along one axis, keeps a bounded
//! window of pages mounted around the current one, and turns drag or fling
//! gestures into transitions of exactly one page. Pages are centered inside
//! the container and placed by pure integer pixel math, so laid-out
//! positions can be asserted exactly.
//!
//! The crate is headless: instead of a windowing stack it ships its own
//! mount surface, [`PagerHarness`], which drives layout passes, synthesizes
//! drag gestures across the container center, and exposes per-page bounds
//! for verification. Layout direction is a mount-time parameter; under
//! right-to-left flow the horizontal offsets flip sign while the logical
//! page order stays the same.
//!
//! # Example
//!
//! ```
//! use pager_ui::{
//!     HarnessArgs, PagerArgs, PagerHarness, PagerPageSize, SwipeDirection, numbered_pages,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pager = PagerHarness::mount(
//!     HarnessArgs::default(),
//!     PagerArgs::default()
//!         .page_count(10)
//!         .page_size(PagerPageSize::Fraction(0.8)),
//!     numbered_pages(),
//! )?;
//!
//! // An 80%-wide page is centered: (640 - 512) / 2 = 64.
//! assert_eq!(pager.page_bounds(0)?.x.raw(), 64);
//!
//! pager.swipe_across_center(SwipeDirection::Forward, 2_000.0, 0.6);
//! assert_eq!(pager.current_page(), 1);
//! pager.assert_page_position(0, 1);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs, clippy::unwrap_used)]

pub mod color;
pub mod cursor;
pub mod dp;
pub mod harness;
pub mod layout;
pub mod pager;
pub mod px;
pub mod state;

pub use crate::{
    color::Color,
    cursor::{CursorEvent, CursorEventContent, PressKeyEventType, VelocityTracker},
    dp::Dp,
    harness::{
        HarnessArgs, PageContent, PageLookupError, PageNode, PagerHarness, SwipeDirection,
        numbered_pages,
    },
    layout::{ComputedData, Constraint, DimensionValue, LayoutDirection, MeasurementError},
    pager::{
        DEFAULT_MIN_FLING_VELOCITY, DEFAULT_SNAP_THRESHOLD, Pager, PagerArgs, PagerAxis,
        PagerController, PagerFrame, PagerPageSize, PlacedPage, SetupError,
    },
    px::{Px, PxPosition, PxRect},
    state::State,
};
