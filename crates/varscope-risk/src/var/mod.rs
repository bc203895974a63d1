//! Value at Risk (VaR) calculations.
//!
//! VaR is read off the simulated distribution as a percentile threshold;
//! CVaR (expected shortfall) is the mean of the draws beyond it.

mod reducer;

pub use reducer::*;

use serde::{Deserialize, Serialize};

/// Value at Risk result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaRResult {
    /// VaR threshold in reporting units (percent for returns and relative ranges)
    pub var: f64,
    /// Conditional VaR in reporting units, when requested
    pub cvar: Option<f64>,
    /// Percentile the threshold was taken at, in (0, 100)
    pub percentile: f64,
    /// Draws strictly beyond the threshold (zero when CVaR fell back to VaR)
    pub tail_count: usize,
}

impl std::fmt::Display for VaRResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VaR({:.2}%): {:.2}", self.percentile, self.var)?;
        if let Some(cvar) = self.cvar {
            write!(f, ", CVaR: {:.2}", cvar)?;
        }
        Ok(())
    }
}
