// crates/geodash-core/src/key.rs

//! Structured metric lookup keys.
//!
//! Bags are stored under a [`MetricKey`] rather than a hand-built string.
//! The canonical string form (`PMMKSS_male_2023`,
//! `PMMSY_female_2022-23_marine`) only exists at the edges: logging, JSON
//! views and [`MetricKey::parse`].

use crate::catalog::{FinancialYear, Gender, Scheme, Sector, Year};
use crate::error::{DashError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Time component of a key: calendar year for generic schemes, financial
/// year for the fisheries scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Period {
    Year(Year),
    FinancialYear(FinancialYear),
}

impl Period {
    pub fn is_all(self) -> bool {
        matches!(
            self,
            Period::Year(Year::All) | Period::FinancialYear(FinancialYear::All)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Year(y) => y.as_str(),
            Period::FinancialYear(fy) => fy.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricKey {
    pub scheme: Scheme,
    pub gender: Gender,
    pub period: Period,
    /// Only present for the fisheries scheme.
    pub sector: Option<Sector>,
}

impl MetricKey {
    /// Key shape of the generic schemes: `${scheme}_${gender}_${year}`.
    pub fn generic(scheme: Scheme, gender: Gender, year: Year) -> Self {
        MetricKey {
            scheme,
            gender,
            period: Period::Year(year),
            sector: None,
        }
    }

    /// Key shape of the fisheries scheme:
    /// `${scheme}_${gender}_${financial_year}_${sector}`.
    pub fn fisheries(gender: Gender, fy: FinancialYear, sector: Sector) -> Self {
        MetricKey {
            scheme: Scheme::Pmmsy,
            gender,
            period: Period::FinancialYear(fy),
            sector: Some(sector),
        }
    }

    /// Builds the key shape appropriate for `scheme`.
    pub fn for_scheme(
        scheme: Scheme,
        gender: Gender,
        year: Year,
        fy: FinancialYear,
        sector: Sector,
    ) -> Self {
        if scheme.is_fisheries() {
            MetricKey::fisheries(gender, fy, sector)
        } else {
            MetricKey::generic(scheme, gender, year)
        }
    }

    /// The `all_all_all` key.
    pub fn overall() -> Self {
        MetricKey::generic(Scheme::All, Gender::All, Year::All)
    }

    /// Same scheme, every other dimension widened to `all`.
    pub fn widened(self) -> Self {
        MetricKey::for_scheme(
            self.scheme,
            Gender::All,
            Year::All,
            FinancialYear::All,
            Sector::All,
        )
    }

    pub fn with_gender(self, gender: Gender) -> Self {
        MetricKey { gender, ..self }
    }

    /// Swaps the scheme. Crossing between the generic and fisheries shapes
    /// has no period or sector to carry over, so both widen to `all`.
    pub fn with_scheme(self, scheme: Scheme) -> Self {
        if scheme.is_fisheries() == self.scheme.is_fisheries() {
            return MetricKey { scheme, ..self };
        }
        MetricKey::for_scheme(
            scheme,
            self.gender,
            Year::All,
            FinancialYear::All,
            Sector::All,
        )
    }

    pub fn with_period(self, period: Period) -> Self {
        MetricKey { period, ..self }
    }

    pub fn is_fisheries(&self) -> bool {
        self.sector.is_some()
    }

    /// Canonical string form.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Parses either key shape.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || DashError::InvalidKey(s.to_string());
        let parts: Vec<&str> = s.trim().split('_').collect();
        match parts.as_slice() {
            [scheme, gender, year] => {
                let scheme: Scheme = scheme.parse().map_err(|_| invalid())?;
                if scheme.is_fisheries() {
                    return Err(invalid());
                }
                Ok(MetricKey::generic(
                    scheme,
                    gender.parse().map_err(|_| invalid())?,
                    year.parse().map_err(|_| invalid())?,
                ))
            }
            [scheme, gender, fy, sector] => {
                let scheme: Scheme = scheme.parse().map_err(|_| invalid())?;
                if !scheme.is_fisheries() {
                    return Err(invalid());
                }
                Ok(MetricKey::fisheries(
                    gender.parse().map_err(|_| invalid())?,
                    fy.parse().map_err(|_| invalid())?,
                    sector.parse().map_err(|_| invalid())?,
                ))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.scheme, self.gender, self.period.as_str())?;
        if let Some(sector) = self.sector {
            write!(f, "_{sector}")?;
        }
        Ok(())
    }
}

impl FromStr for MetricKey {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self> {
        MetricKey::parse(s)
    }
}

impl Serialize for MetricKey {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MetricKey {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        MetricKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_shapes() {
        assert_eq!(MetricKey::overall().canonical(), "all_all_all");
        let k = MetricKey::generic(Scheme::Pmmkss, Gender::Male, Year::Y2023);
        assert_eq!(k.canonical(), "PMMKSS_male_2023");
        let f = MetricKey::fisheries(Gender::Female, FinancialYear::Fy2022, Sector::Marine);
        assert_eq!(f.canonical(), "PMMSY_female_2022-23_marine");
    }

    #[test]
    fn parse_inverts_display() {
        for s in ["all_all_all", "KCC_transgender_2021", "PMMSY_all_all_inland"] {
            assert_eq!(MetricKey::parse(s).unwrap().canonical(), s);
        }
    }

    #[test]
    fn parse_rejects_mismatched_shapes() {
        assert!(MetricKey::parse("PMMSY_male_2023").is_err());
        assert!(MetricKey::parse("KCC_male_2023-24_marine").is_err());
        assert!(MetricKey::parse("KCC_male").is_err());
        assert!(MetricKey::parse("KCC_male_1999").is_err());
    }

    #[test]
    fn widened_keeps_scheme_and_shape() {
        let f = MetricKey::fisheries(Gender::Male, FinancialYear::Fy2021, Sector::Inland);
        assert_eq!(f.widened().canonical(), "PMMSY_all_all_all");
        let g = MetricKey::generic(Scheme::Kcc, Gender::Female, Year::Y2020);
        assert_eq!(g.widened().canonical(), "KCC_all_all");
    }

    #[test]
    fn with_scheme_reshapes_across_families() {
        let overall = MetricKey::overall();
        assert_eq!(overall.with_scheme(Scheme::Pmmsy).canonical(), "PMMSY_all_all_all");
        let f = MetricKey::fisheries(Gender::Male, FinancialYear::All, Sector::All);
        assert_eq!(f.with_scheme(Scheme::Fidf).canonical(), "FIDF_male_all");
    }
}
