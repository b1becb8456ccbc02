//! The two-phase layout driver.
//!
//! A round tries the natural fit, then slack on either axis. The primary round
//! uses each element's desired ratio; if it fails, a single fallback round uses
//! the template ratios and marks the result as degraded.

use tracing::{debug, warn};

use folio_core::{GridSpec, LayoutError, LayoutFailure, PageSize, RoundFailures};

use crate::attempt::{attempt_layout, Attempt};
use crate::constraints::AspectChoice;
use crate::sizes::GridSizes;
use crate::tracks::{ExtraSpace, TrackList};

/// Options for layout computation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutOptions {
    /// Sizes above `-negative_tolerance` count as non-negative
    pub negative_tolerance: f64,
    /// Retry with fallback ratios when the desired ones can't be met
    pub allow_fallback: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            negative_tolerance: 1e-9,
            allow_fallback: true,
        }
    }
}

/// A solved page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageLayout {
    pub sizes: GridSizes,
    /// Set when only the fallback ratios could be satisfied.
    pub degraded: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    options: LayoutOptions,
}

impl LayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Size every row and column of `grid` to fill `page`.
    pub fn compute_sizes(&self, page: PageSize, grid: &GridSpec) -> Result<PageLayout, LayoutError> {
        if !page.is_valid() {
            return Err(LayoutError::InvalidPageSize {
                width: page.width,
                height: page.height,
            });
        }
        grid.validate()?;

        let primary = match self.layout_round(page, grid, AspectChoice::Desired) {
            Ok(sizes) => return Ok(PageLayout { sizes, degraded: false }),
            Err(failures) => failures,
        };
        debug!(%primary, "desired ratios can't be met");

        if !self.options.allow_fallback {
            return Err(LayoutError::Unsolvable { primary, fallback: None });
        }

        match self.layout_round(page, grid, AspectChoice::Fallback) {
            Ok(sizes) => {
                warn!(
                    width = page.width,
                    height = page.height,
                    "layout degraded to fallback aspect ratios"
                );
                Ok(PageLayout { sizes, degraded: true })
            }
            Err(fallback) => Err(LayoutError::Unsolvable {
                primary,
                fallback: Some(fallback),
            }),
        }
    }

    /// One natural attempt, then both slack attempts from the tracks it ended with.
    /// `grid` must already have passed [`GridSpec::validate`].
    pub(crate) fn layout_round(
        &self,
        page: PageSize,
        grid: &GridSpec,
        aspect: AspectChoice,
    ) -> Result<GridSizes, RoundFailures> {
        let base = TrackList::from_grid(grid);
        let Attempt { result, tracks } =
            attempt_layout(page, &base, grid, ExtraSpace::None, aspect, &self.options);
        let natural = match result {
            Ok(sizes) => return Ok(sizes),
            Err(failure) => failure,
        };

        let width = attempt_layout(page, &tracks, grid, ExtraSpace::Width, aspect, &self.options);
        let height = attempt_layout(page, &tracks, grid, ExtraSpace::Height, aspect, &self.options);

        choose_slack(width.result, height.result).map_err(|(width_slack, height_slack)| {
            RoundFailures {
                natural,
                width_slack,
                height_slack,
            }
        })
    }
}

/// Width slack wins a tie only when it leaves more vertical padding.
pub(crate) fn choose_slack(
    width: Result<GridSizes, LayoutFailure>,
    height: Result<GridSizes, LayoutFailure>,
) -> Result<GridSizes, (LayoutFailure, LayoutFailure)> {
    match (width, height) {
        (Ok(w), Ok(h)) => {
            if w.padding.y > h.padding.y {
                Ok(w)
            } else {
                Ok(h)
            }
        }
        (Ok(w), Err(_)) => Ok(w),
        (Err(_), Ok(h)) => Ok(h),
        (Err(w), Err(h)) => Err((w, h)),
    }
}

/// Compute sizes with default options.
pub fn compute_sizes(page: PageSize, grid: &GridSpec) -> Result<PageLayout, LayoutError> {
    LayoutEngine::default().compute_sizes(page, grid)
}
