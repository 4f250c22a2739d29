// crates/geodash-core/src/catalog.rs

//! Fixed filter dimensions of the dashboard.
//!
//! Every dimension has a canonical string (`as_str`) that is used both in
//! metric keys and on the wire. Parsing is case-insensitive and accepts a
//! few aliases found in boundary files and old bookmarks.

use crate::error::{DashError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! catalog_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $text:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every value, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical string used in metric keys and JSON.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = DashError;

            fn from_str(s: &str) -> Result<Self> {
                let t = s.trim();
                $(
                    if t.eq_ignore_ascii_case($text) $(|| t.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )+
                Err(DashError::unknown($kind, s))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
                s.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
                let raw = String::deserialize(d)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

catalog_enum! {
    /// Government scheme filter. `Pmmsy` is the fisheries scheme whose
    /// metrics carry a sector and financial-year breakdown.
    Scheme, "scheme" {
        All => "all",
        Pmmsy => "PMMSY",
        Pmmkss => "PMMKSS",
        Kcc => "KCC",
        Fidf => "FIDF",
    }
}

catalog_enum! {
    Gender, "gender" {
        All => "all",
        Male => "male" | "m",
        Female => "female" | "f",
        Transgender => "transgender" | "tg" | "other",
    }
}

catalog_enum! {
    /// Calendar year filter used by the generic schemes.
    Year, "year" {
        All => "all",
        Y2020 => "2020",
        Y2021 => "2021",
        Y2022 => "2022",
        Y2023 => "2023",
        Y2024 => "2024",
    }
}

catalog_enum! {
    /// Financial year filter used by the fisheries scheme.
    FinancialYear, "financial year" {
        All => "all",
        Fy2020 => "2020-21" | "fy2020-21",
        Fy2021 => "2021-22" | "fy2021-22",
        Fy2022 => "2022-23" | "fy2022-23",
        Fy2023 => "2023-24" | "fy2023-24",
        Fy2024 => "2024-25" | "fy2024-25",
    }
}

catalog_enum! {
    Sector, "sector" {
        All => "all",
        Inland => "inland",
        Marine => "marine",
    }
}

catalog_enum! {
    /// Administrative granularity tier.
    Level, "level" {
        State => "state" | "ut" | "state/ut",
        District => "district",
        SubDistrict => "sub-district" | "subdistrict" | "sub_district" | "tehsil" | "taluk" | "block",
    }
}

catalog_enum! {
    Indicator, "indicator" {
        Funds => "funds",
        Beneficiaries => "beneficiaries",
        Registrations => "registrations",
        TotalProjects => "totalProjects" | "total_projects",
        Investment => "investment",
        FishProduction => "fishProduction" | "fish_production" | "output",
        Employment => "employment",
        DirectEmployment => "directEmployment" | "direct_employment",
        IndirectEmployment => "indirectEmployment" | "indirect_employment",
    }
}

catalog_enum! {
    /// Secondary category of the top-N bar chart.
    Breakdown, "breakdown" {
        Scheme => "scheme",
        Gender => "gender",
        Year => "year",
    }
}

/// Indicators carried by every generic scheme bag.
pub const GENERIC_INDICATORS: &[Indicator] = &[
    Indicator::Funds,
    Indicator::Beneficiaries,
    Indicator::Registrations,
];

/// Indicators carried by every fisheries scheme bag.
pub const FISHERIES_INDICATORS: &[Indicator] = &[
    Indicator::TotalProjects,
    Indicator::Investment,
    Indicator::FishProduction,
    Indicator::Employment,
    Indicator::DirectEmployment,
    Indicator::IndirectEmployment,
];

impl Scheme {
    /// Concrete schemes, without the `all` aggregate.
    pub fn members() -> impl Iterator<Item = Scheme> {
        Scheme::ALL.iter().copied().filter(|s| *s != Scheme::All)
    }

    pub fn is_fisheries(self) -> bool {
        matches!(self, Scheme::Pmmsy)
    }

    pub fn indicators(self) -> &'static [Indicator] {
        if self.is_fisheries() {
            FISHERIES_INDICATORS
        } else {
            GENERIC_INDICATORS
        }
    }

    pub fn default_indicator(self) -> Indicator {
        self.indicators()[0]
    }

    pub fn supports(self, indicator: Indicator) -> bool {
        self.indicators().contains(&indicator)
    }

    pub fn label(self) -> &'static str {
        match self {
            Scheme::All => "All Schemes",
            Scheme::Pmmsy => "Pradhan Mantri Matsya Sampada Yojana",
            Scheme::Pmmkss => "Pradhan Mantri Matsya Kisan Samridhi Sah-Yojana",
            Scheme::Kcc => "Kisan Credit Card (Fisheries)",
            Scheme::Fidf => "Fisheries & Aquaculture Infrastructure Development Fund",
        }
    }
}

impl Gender {
    pub fn members() -> impl Iterator<Item = Gender> {
        Gender::ALL.iter().copied().filter(|g| *g != Gender::All)
    }
}

impl Year {
    pub fn members() -> impl Iterator<Item = Year> {
        Year::ALL.iter().copied().filter(|y| *y != Year::All)
    }
}

impl FinancialYear {
    pub fn members() -> impl Iterator<Item = FinancialYear> {
        FinancialYear::ALL
            .iter()
            .copied()
            .filter(|y| *y != FinancialYear::All)
    }
}

impl Level {
    /// The next coarser level, if any.
    pub fn parent(self) -> Option<Level> {
        match self {
            Level::State => None,
            Level::District => Some(Level::State),
            Level::SubDistrict => Some(Level::District),
        }
    }

    /// The next finer level, if any.
    pub fn child(self) -> Option<Level> {
        match self {
            Level::State => Some(Level::District),
            Level::District => Some(Level::SubDistrict),
            Level::SubDistrict => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::State => "State",
            Level::District => "District",
            Level::SubDistrict => "Sub-district",
        }
    }
}

/// How an indicator value is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Indian rupees.
    Rupees,
    /// Plain head/record count.
    Count,
    /// Metric tonnes.
    Tonnes,
}

impl Indicator {
    pub fn label(self) -> &'static str {
        match self {
            Indicator::Funds => "Funds Released",
            Indicator::Beneficiaries => "Beneficiaries",
            Indicator::Registrations => "Registrations",
            Indicator::TotalProjects => "Total Projects",
            Indicator::Investment => "Investment",
            Indicator::FishProduction => "Fish Production",
            Indicator::Employment => "Employment Generated",
            Indicator::DirectEmployment => "Direct Employment",
            Indicator::IndirectEmployment => "Indirect Employment",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            Indicator::Funds | Indicator::Investment => Unit::Rupees,
            Indicator::FishProduction => Unit::Tonnes,
            _ => Unit::Count,
        }
    }
}
