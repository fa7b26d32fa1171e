use serde::Serialize;

/// Letter grade derived from the scorecard total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    R,
}

impl Grade {
    /// Lower bounds, highest first. Anything below the last bound is `R`.
    const THRESHOLDS: [(f64, Grade); 5] = [
        (90.0, Grade::APlus),
        (70.0, Grade::A),
        (60.0, Grade::B),
        (50.0, Grade::C),
        (40.0, Grade::D),
    ];

    pub fn from_score(score: f64) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::R)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::R => "R",
        }
    }

    /// Risk band printed next to the grade on the credit file.
    pub const fn risk_rating(self) -> &'static str {
        match self {
            Self::APlus | Self::A => "Low",
            Self::B | Self::C => "Medium",
            Self::D => "High",
            Self::R => "Rejected",
        }
    }
}
