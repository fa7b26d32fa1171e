//! Piecewise point tables for the qualitative scorecard.
//!
//! Bands are checked top to bottom and the first match wins. Values that fall in no band
//! (including the literal gaps left between open intervals) score nothing.

use crate::workflows::credit::profile::{
    CashflowControl, CreditHistoryCategory, CustomerBase, ExperienceBand, FundingAccess, Industry,
    InventoryLiquidity, LegalStructure, LendoRelationship, MarketReach, NitaqatColor,
    SuccessionRisk, YesNo,
};

pub const SCORECARD_VERSION: &str = "lendo-scorecard/2025.1";

/// Interval predicate with explicit bound inclusivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interval {
    /// `x < bound`
    Below(f64),
    /// `x <= bound`
    AtMost(f64),
    /// `x > bound`
    Above(f64),
    /// `x >= bound`
    AtLeast(f64),
    /// `low < x < high`
    Open(f64, f64),
    /// `low <= x <= high`
    Closed(f64, f64),
    /// `low <= x < high`
    ClosedOpen(f64, f64),
    /// `low < x <= high`
    OpenClosed(f64, f64),
}

impl Interval {
    pub fn contains(self, value: f64) -> bool {
        match self {
            Self::Below(bound) => value < bound,
            Self::AtMost(bound) => value <= bound,
            Self::Above(bound) => value > bound,
            Self::AtLeast(bound) => value >= bound,
            Self::Open(low, high) => low < value && value < high,
            Self::Closed(low, high) => low <= value && value <= high,
            Self::ClosedOpen(low, high) => low <= value && value < high,
            Self::OpenClosed(low, high) => low < value && value <= high,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub interval: Interval,
    pub points: f64,
}

impl Band {
    pub const fn new(interval: Interval, points: f64) -> Self {
        Self { interval, points }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BandTable {
    pub bands: &'static [Band],
}

impl BandTable {
    pub fn points_for(&self, value: f64) -> Option<f64> {
        self.bands
            .iter()
            .find(|band| band.interval.contains(value))
            .map(|band| band.points)
    }
}

use Interval::*;

/// Applies once the business is at least three years old.
pub const YEARS_ESTABLISHED: BandTable = BandTable {
    bands: &[
        Band::new(ClosedOpen(3.0, 10.0), 3.0),
        Band::new(AtLeast(10.0), 4.0),
    ],
};

pub const YOUNG_BUSINESS_YEARS: f64 = 3.0;
pub const YOUNG_BUSINESS_GROWING: f64 = 1.4;
pub const YOUNG_BUSINESS: f64 = -1.0;

pub const DAYS_PAST_DUE: BandTable = BandTable {
    bands: &[
        Band::new(Above(90.0), -35.0),
        Band::new(Closed(30.0, 90.0), -14.0),
        Band::new(ClosedOpen(1.0, 30.0), -7.0),
    ],
};

/// Years in business above which a company with no past dues earns the clean-record points.
pub const CLEAN_RECORD_MIN_YEARS: f64 = 2.0;
pub const CLEAN_RECORD: f64 = 7.0;

pub const REVENUE_GROWTH: BandTable = BandTable {
    bands: &[
        Band::new(Above(30.0), 4.0),
        Band::new(Closed(5.0, 30.0), 3.0),
        Band::new(Below(5.0), 1.0),
    ],
};

pub const GROSS_MARGIN_GROWTH: BandTable = BandTable {
    bands: &[Band::new(Below(3.0), 0.75)],
};

pub const NET_PROFIT_MARGIN: BandTable = BandTable {
    bands: &[
        Band::new(Below(0.0), -6.0),
        Band::new(ClosedOpen(0.0, 5.0), -0.75),
        Band::new(Open(5.0, 15.0), 1.5),
        Band::new(Above(15.0), 3.0),
    ],
};

pub const NET_MARGIN_GROWTH: BandTable = BandTable {
    bands: &[
        Band::new(Below(-20.0), -3.0),
        Band::new(Open(-20.0, 0.0), -1.5),
        Band::new(ClosedOpen(0.0, 3.0), 0.75),
        Band::new(Closed(3.0, 20.0), 2.25),
        Band::new(Above(20.0), 3.0),
    ],
};

pub const OPERATING_CASH_FLOW: BandTable = BandTable {
    bands: &[Band::new(Below(0.0), -2.0), Band::new(Above(0.0), 2.0)],
};

pub const CURRENT_RATIO: BandTable = BandTable {
    bands: &[
        Band::new(Below(1.0), -2.0),
        Band::new(Open(1.0, 4.0), 1.5),
        Band::new(Above(4.0), 2.0),
    ],
};

pub const LEVERAGE_RATIO: BandTable = BandTable {
    bands: &[
        Band::new(Below(1.0), -2.0),
        Band::new(Open(1.0, 2.0), 1.0),
        Band::new(Above(2.0), 2.0),
    ],
};

pub const INTEREST_COVERAGE: BandTable = BandTable {
    bands: &[
        Band::new(Below(1.0), -2.0),
        Band::new(Above(4.0), 2.0),
        Band::new(Open(1.0, 4.0), 1.5),
    ],
};

pub const DSCR: BandTable = BandTable {
    bands: &[
        Band::new(Below(1.0), -2.0),
        Band::new(Above(2.0), 2.0),
        Band::new(Open(1.0, 2.0), 1.0),
    ],
};

pub const DAYS_SALES_OUTSTANDING: BandTable = BandTable {
    bands: &[
        Band::new(Above(270.0), -2.0),
        Band::new(Open(180.0, 270.0), -1.0),
        Band::new(Open(120.0, 180.0), 0.0),
        Band::new(Below(120.0), 2.0),
    ],
};

pub const RECEIVABLES_TO_SALES: BandTable = BandTable {
    bands: &[
        Band::new(Above(100.0), -2.0),
        Band::new(Closed(70.0, 100.0), -1.0),
        Band::new(Open(50.0, 70.0), 0.0),
        Band::new(AtMost(50.0), 2.0),
    ],
};

/// Scored on the percentage, i.e. the stored fraction times 100.
pub const EXTERNAL_DEBT_TO_SALES: BandTable = BandTable {
    bands: &[
        Band::new(Above(50.0), -1.0),
        Band::new(OpenClosed(25.0, 50.0), 0.0),
        Band::new(AtMost(25.0), 2.0),
    ],
};

pub const CHEQUES_CLEAR_COURT_FLAGGED: f64 = -3.0;
pub const CHEQUES_AND_COURT_CLEAR: f64 = 3.0;
pub const CHEQUES_FLAGGED_COURT_CLEAR: f64 = -1.5;
pub const CHEQUES_UNRESOLVED: f64 = 0.0;

pub const BUREAU_ALL_CLEAR: f64 = 7.0;
pub const BUREAU_FLAGGED: f64 = 0.0;

pub fn nitaqat(color: NitaqatColor) -> f64 {
    match color {
        NitaqatColor::Red => -4.0,
        NitaqatColor::Yellow => -2.0,
        NitaqatColor::LowGreen
        | NitaqatColor::MediumGreen
        | NitaqatColor::HighGreen
        | NitaqatColor::Green => 0.0,
        NitaqatColor::Platinum => 2.0,
    }
}

pub fn market(reach: MarketReach) -> f64 {
    match reach {
        MarketReach::LocalIncludingGcc => 3.0,
        MarketReach::OtherCountries => -1.5,
        MarketReach::OtherCountriesExcludingGcc => 1.5,
    }
}

pub fn industry(industry: Industry) -> f64 {
    use Industry::*;
    match industry {
        InformationAndCommunication | ArtsAndRecreation => 7.0,
        Mining | Utilities | Food | Finance | Education | ProfessionalServices => 6.0,
        Health | Retail | MotorRepair => 5.0,
        Agriculture | Forestry | Manufacturing | Transport | RealEstate => 3.5,
        WaterSupply | WasteManagement | Defense | OtherServices | Households => 2.0,
    }
}

pub fn customer_base(base: CustomerBase) -> f64 {
    match base {
        CustomerBase::UpToFive => 1.25,
        CustomerBase::SixToTwenty => 3.75,
        CustomerBase::MoreThanTwenty => 5.0,
    }
}

pub fn inventory_liquidity(liquidity: InventoryLiquidity) -> f64 {
    match liquidity {
        InventoryLiquidity::Concerning => -3.0,
        InventoryLiquidity::NotApplicable => 3.0,
        InventoryLiquidity::Uncertain => 1.5,
        InventoryLiquidity::ReadyForSale => 3.0,
    }
}

pub fn funding_access(access: FundingAccess) -> f64 {
    match access {
        FundingAccess::NoAccess => 0.0,
        FundingAccess::FinancialInstitution => 1.0,
        FundingAccess::OwnerSupport => 2.0,
    }
}

pub fn cashflow_control(control: CashflowControl) -> f64 {
    match control {
        CashflowControl::Full => 1.25,
        CashflowControl::PartialThirdParty => 1.05,
        CashflowControl::PartialClient => 1.01,
        CashflowControl::NoControl => 1.0,
    }
}

pub fn lendo_relationship(relationship: LendoRelationship) -> f64 {
    match relationship {
        LendoRelationship::NoRelationship => 1.0,
        LendoRelationship::FrequentPastDues => 0.75,
        LendoRelationship::SomePastDues => 1.05,
        LendoRelationship::TimelyRepayments => 1.15,
    }
}

/// Ownership, management, covenant and audited-statement events.
pub fn adverse_event(answer: YesNo) -> f64 {
    match answer {
        YesNo::No => 1.0,
        YesNo::Yes => 0.9,
    }
}

pub fn legal_structure(structure: LegalStructure) -> f64 {
    match structure {
        LegalStructure::JointStockCompany => 2.0,
        LegalStructure::LimitedLiabilityCompany => 1.5,
        LegalStructure::Partnership => 1.0,
        LegalStructure::SoleProprietorship => 0.5,
    }
}

pub fn succession_risk(risk: SuccessionRisk) -> f64 {
    match risk {
        SuccessionRisk::Low => 1.0,
        SuccessionRisk::Medium => 0.5,
        SuccessionRisk::High => 0.0,
    }
}

pub fn experience(band: ExperienceBand) -> f64 {
    match band {
        ExperienceBand::MoreThanTenYears => 2.0,
        ExperienceBand::FiveToTenYears => 1.0,
        ExperienceBand::LessThanFiveYears => 0.5,
    }
}

pub fn credit_history(category: CreditHistoryCategory) -> f64 {
    match category {
        CreditHistoryCategory::Clean => 2.0,
        CreditHistoryCategory::MinorDelays => 0.5,
        CreditHistoryCategory::SeriousDelinquency => -2.0,
        CreditHistoryCategory::NoHistory => 0.0,
    }
}
