//! Board generation parameters and the product policy constants behind them.

use alloc::string::String;
use core::fmt;

use crate::cell_set::CellSetError;
use crate::mask::LayoutMask;

pub const MIN_SIZE: usize = 5;
pub const MAX_SIZE: usize = 20;

/// Lower bound of the default inactive range, in percent of playable cells.
pub const DEFAULT_MIN_INACTIVE_PERCENT: u32 = 17;
/// Upper bound of the default inactive range, in percent of playable cells.
pub const DEFAULT_MAX_INACTIVE_PERCENT: u32 = 19;
/// Explicit percentage overrides are clamped to this ceiling.
pub const MAX_CUSTOM_PERCENTAGE: f64 = 90.0;

pub const MAX_FAIRNESS_ATTEMPTS: usize = 40;
/// A board whose horizontal/vertical move counts differ by at most this is accepted.
pub const FAIRNESS_THRESHOLD: usize = 1;

/// Errors raised while validating or generating a board.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateError {
    /// Rows or columns outside `[MIN_SIZE, MAX_SIZE]`.
    InvalidDimensions { rows: usize, cols: usize },
    /// Percentage override is not a number.
    InvalidPercentage(f64),
    /// Inactive-cell policy bounds are inverted, above 100% or not a number.
    InvalidPolicy,
    /// The layout mask leaves no playable cell.
    MaskExcludesAllCells,
    /// A mask coordinate cannot be addressed.
    MaskOutOfBounds(CellSetError),
    /// An unseeded board was requested but no entropy source is available.
    EntropyUnavailable,
}

impl From<CellSetError> for GenerateError {
    fn from(err: CellSetError) -> Self {
        GenerateError::MaskOutOfBounds(err)
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::InvalidDimensions { rows, cols } => write!(
                f,
                "board dimensions must be within {}-{}, got {}x{}",
                MIN_SIZE, MAX_SIZE, rows, cols
            ),
            GenerateError::InvalidPercentage(value) => {
                write!(f, "invalid inactive percentage: {}", value)
            }
            GenerateError::InvalidPolicy => write!(
                f,
                "inactive policy needs min <= max <= 100 and a finite, non-negative custom maximum"
            ),
            GenerateError::MaskExcludesAllCells => {
                write!(f, "layout mask excludes every cell of the board")
            }
            GenerateError::MaskOutOfBounds(e) => write!(f, "layout mask error: {}", e),
            GenerateError::EntropyUnavailable => {
                write!(f, "unseeded generation requires an entropy source")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GenerateError {}

/// Inactive-cell policy applied by the generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationPolicy {
    pub min_inactive_percent: u32,
    pub max_inactive_percent: u32,
    pub max_custom_percentage: f64,
}

impl GenerationPolicy {
    /// Percent bounds ordered and at most 100, custom maximum finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.min_inactive_percent <= self.max_inactive_percent
            && self.max_inactive_percent <= 100
            && self.max_custom_percentage.is_finite()
            && self.max_custom_percentage >= 0.0
    }
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            min_inactive_percent: DEFAULT_MIN_INACTIVE_PERCENT,
            max_inactive_percent: DEFAULT_MAX_INACTIVE_PERCENT,
            max_custom_percentage: MAX_CUSTOM_PERCENTAGE,
        }
    }
}

/// Retry budget and acceptance threshold of the balanced-board search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FairnessPolicy {
    /// Boards drawn per search; anything below 1 still draws one.
    pub max_attempts: usize,
    pub threshold: usize,
}

impl Default for FairnessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_FAIRNESS_ATTEMPTS,
            threshold: FAIRNESS_THRESHOLD,
        }
    }
}

/// Validated generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    rows: usize,
    cols: usize,
    seed: Option<String>,
    inactive_percentage: Option<f64>,
    mask: LayoutMask,
    policy: GenerationPolicy,
}

impl BoardConfig {
    /// Start building a configuration for a `rows × cols` board.
    pub fn builder(rows: usize, cols: usize) -> BoardConfigBuilder {
        BoardConfigBuilder {
            rows,
            cols,
            seed: None,
            inactive_percentage: None,
            mask: LayoutMask::None,
            policy: GenerationPolicy::default(),
        }
    }

    /// Shorthand for an unmasked, unseeded board with the default policy.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GenerateError> {
        Self::builder(rows, cols).build()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    pub fn inactive_percentage(&self) -> Option<f64> {
        self.inactive_percentage
    }

    pub fn mask(&self) -> &LayoutMask {
        &self.mask
    }

    pub fn policy(&self) -> &GenerationPolicy {
        &self.policy
    }

    /// Same request with the seed removed, used for fresh search attempts.
    pub fn unseeded(&self) -> Self {
        Self {
            seed: None,
            ..self.clone()
        }
    }
}

/// Builder for [`BoardConfig`]; nothing is checked until [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct BoardConfigBuilder {
    rows: usize,
    cols: usize,
    seed: Option<String>,
    inactive_percentage: Option<f64>,
    mask: LayoutMask,
    policy: GenerationPolicy,
}

impl BoardConfigBuilder {
    #[must_use]
    pub fn seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    #[must_use]
    pub fn maybe_seed(mut self, seed: Option<String>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn inactive_percentage(mut self, percentage: f64) -> Self {
        self.inactive_percentage = Some(percentage);
        self
    }

    #[must_use]
    pub fn maybe_inactive_percentage(mut self, percentage: Option<f64>) -> Self {
        self.inactive_percentage = percentage;
        self
    }

    #[must_use]
    pub fn mask(mut self, mask: LayoutMask) -> Self {
        self.mask = mask;
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: GenerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validate dimensions, percentage, policy and mask coverage.
    pub fn build(self) -> Result<BoardConfig, GenerateError> {
        let in_range = |n: usize| (MIN_SIZE..=MAX_SIZE).contains(&n);
        if !in_range(self.rows) || !in_range(self.cols) {
            return Err(GenerateError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if let Some(pct) = self.inactive_percentage {
            if pct.is_nan() {
                return Err(GenerateError::InvalidPercentage(pct));
            }
        }
        if !self.policy.is_valid() {
            return Err(GenerateError::InvalidPolicy);
        }
        let mask = self.mask.normalized();
        if mask.playable_count(self.rows, self.cols) == 0 {
            return Err(GenerateError::MaskExcludesAllCells);
        }
        Ok(BoardConfig {
            rows: self.rows,
            cols: self.cols,
            seed: self.seed,
            inactive_percentage: self.inactive_percentage,
            mask,
            policy: self.policy,
        })
    }
}
