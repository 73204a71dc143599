mod amortization;
mod bands;
mod growth;
pub mod ratio;
mod types;

pub use amortization::{PERIODS_PER_YEAR, amortize, monthly_rate, outstanding_balance};
pub use bands::{DEFAULT_TAPER_RATE, apply_bands, tapered_allowance};
pub use growth::{grow_future, growth_series};
pub use types::{
    Amortization, Band, BandBreakdown, BandResult, BandTable, Growth, SeriesPoint,
};
