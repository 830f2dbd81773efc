// Copyright (c) 2024 The Botho Foundation

//! Statutory rate tables.
//!
//! Rates are carried in basis points so that every share can be computed
//! with exact integer arithmetic. The reference rates are:
//!
//! | Sector              | CBS    | IBS state | IBS municipal | Simplified |
//! |---------------------|--------|-----------|---------------|------------|
//! | PADRAO              | 8.65%  | 11.15%    | 4.70%         | 26.50%     |
//! | SAUDE               | 4.33%  | 5.58%     | 2.35%         | 13.25%     |
//! | EDUCACAO            | 4.33%  | 5.58%     | 2.35%         | 13.25%     |
//! | TRANSPORTE_COLETIVO | 4.33%  | 5.58%     | 2.35%         | 13.25%     |
//! | CESTA_BASICA        | 0      | 0         | 0             | 0          |
//! | COMBUSTIVEIS        | 8.65%  | 11.15%    | 4.70%         | 26.50%     |

use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::Sector;

/// A rate in basis points (1 bps = 0.01%).
pub type RateBps = u32;

/// Basis points in a whole (100%).
pub const BPS_SCALE: RateBps = 10_000;

/// Simplified-regime rate of the general sector, which unrecognized sector
/// tags resolve to.
pub const DEFAULT_SIMPLIFIED_BPS: RateBps = 2_650;

/// Compute `floor(amount * bps / 10_000)`.
///
/// Splits `amount` into quotient and remainder by the scale first, so the
/// intermediate products never exceed `amount` and cannot overflow.
pub fn apply_bps(amount: U256, bps: RateBps) -> U256 {
    let scale = U256::from(BPS_SCALE);
    let bps = U256::from(bps);
    let quotient = amount / scale;
    let remainder = amount % scale;
    quotient * bps + remainder * bps / scale
}

/// The three standard-regime shares for a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardRates {
    /// Federal share (CBS)
    pub federal_bps: RateBps,
    /// State share (IBS)
    pub state_bps: RateBps,
    /// Municipal share (IBS)
    pub municipal_bps: RateBps,
}

impl StandardRates {
    pub const fn new(federal_bps: RateBps, state_bps: RateBps, municipal_bps: RateBps) -> Self {
        Self {
            federal_bps,
            state_bps,
            municipal_bps,
        }
    }

    /// Combined nominal rate.
    pub fn total_bps(&self) -> RateBps {
        self.federal_bps + self.state_bps + self.municipal_bps
    }
}

/// Rates for one sector across both regimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorRates {
    pub standard: StandardRates,
    pub simplified_bps: RateBps,
}

const GENERAL: SectorRates = SectorRates {
    standard: StandardRates::new(865, 1_115, 470),
    simplified_bps: DEFAULT_SIMPLIFIED_BPS,
};

const REDUCED: SectorRates = SectorRates {
    standard: StandardRates::new(433, 558, 235),
    simplified_bps: 1_325,
};

const EXEMPT: SectorRates = SectorRates {
    standard: StandardRates::new(0, 0, 0),
    simplified_bps: 0,
};

/// Immutable mapping from [`Sector`] to its rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateTable {
    standard: SectorRates,
    health: SectorRates,
    education: SectorRates,
    public_transit: SectorRates,
    basic_basket: SectorRates,
    fuel: SectorRates,
}

/// The reference table (LC 214/2025 estimates).
pub static STATUTORY_RATES: RateTable = RateTable {
    standard: GENERAL,
    health: REDUCED,
    education: REDUCED,
    public_transit: REDUCED,
    basic_basket: EXEMPT,
    fuel: GENERAL,
};

impl RateTable {
    /// The reference table shared by the whole process.
    pub fn statutory() -> &'static RateTable {
        &STATUTORY_RATES
    }

    /// All rates for a sector.
    pub fn sector(&self, sector: Sector) -> &SectorRates {
        match sector {
            Sector::Standard => &self.standard,
            Sector::Health => &self.health,
            Sector::Education => &self.education,
            Sector::PublicTransit => &self.public_transit,
            Sector::BasicBasket => &self.basic_basket,
            Sector::Fuel => &self.fuel,
        }
    }

    /// Standard-regime shares for a sector.
    pub fn standard(&self, sector: Sector) -> StandardRates {
        self.sector(sector).standard
    }

    /// Simplified-regime rate for a sector.
    pub fn simplified_bps(&self, sector: Sector) -> RateBps {
        self.sector(sector).simplified_bps
    }
}

impl Default for RateTable {
    fn default() -> Self {
        STATUTORY_RATES
    }
}
