use serde::{Deserialize, Serialize};
use std::{fmt::Display, iter::Sum, ops::Add};

/// population counts of a census block: the total and the demographic
/// subgroups reported by the indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationAttributes {
    #[serde(rename = "POBTOT")]
    pub pobtot: u64,
    #[serde(rename = "POBFEM")]
    pub pobfem: u64,
    #[serde(rename = "POB0_14")]
    pub pob0_14: u64,
    #[serde(rename = "P_60YMAS")]
    pub p_60ymas: u64,
    #[serde(rename = "P_CD_T")]
    pub p_cd_t: u64,
}

/// the population fields of the census layer, by their column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopulationField {
    Total,
    Female,
    Age0To14,
    Age60Plus,
    Disabled,
}

impl PopulationField {
    pub const ALL: [PopulationField; 5] = [
        PopulationField::Total,
        PopulationField::Female,
        PopulationField::Age0To14,
        PopulationField::Age60Plus,
        PopulationField::Disabled,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            PopulationField::Total => "POBTOT",
            PopulationField::Female => "POBFEM",
            PopulationField::Age0To14 => "POB0_14",
            PopulationField::Age60Plus => "P_60YMAS",
            PopulationField::Disabled => "P_CD_T",
        }
    }

    /// total population must be present in a census layer, the subgroup
    /// breakdowns may be absent.
    pub fn is_required(&self) -> bool {
        matches!(self, PopulationField::Total)
    }
}

impl Display for PopulationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl PopulationAttributes {
    pub fn get(&self, field: PopulationField) -> u64 {
        match field {
            PopulationField::Total => self.pobtot,
            PopulationField::Female => self.pobfem,
            PopulationField::Age0To14 => self.pob0_14,
            PopulationField::Age60Plus => self.p_60ymas,
            PopulationField::Disabled => self.p_cd_t,
        }
    }

    pub fn set(&mut self, field: PopulationField, value: u64) {
        match field {
            PopulationField::Total => self.pobtot = value,
            PopulationField::Female => self.pobfem = value,
            PopulationField::Age0To14 => self.pob0_14 = value,
            PopulationField::Age60Plus => self.p_60ymas = value,
            PopulationField::Disabled => self.p_cd_t = value,
        }
    }

    /// change from `self` to `other`, positive when `other` serves more people.
    pub fn delta_to(&self, other: &PopulationAttributes) -> PopulationDelta {
        let d = |f: PopulationField| other.get(f) as i64 - self.get(f) as i64;
        PopulationDelta {
            pobtot: d(PopulationField::Total),
            pobfem: d(PopulationField::Female),
            pob0_14: d(PopulationField::Age0To14),
            p_60ymas: d(PopulationField::Age60Plus),
            p_cd_t: d(PopulationField::Disabled),
        }
    }
}

impl Add for PopulationAttributes {
    type Output = PopulationAttributes;

    fn add(self, rhs: Self) -> Self::Output {
        PopulationAttributes {
            pobtot: self.pobtot.saturating_add(rhs.pobtot),
            pobfem: self.pobfem.saturating_add(rhs.pobfem),
            pob0_14: self.pob0_14.saturating_add(rhs.pob0_14),
            p_60ymas: self.p_60ymas.saturating_add(rhs.p_60ymas),
            p_cd_t: self.p_cd_t.saturating_add(rhs.p_cd_t),
        }
    }
}

impl Sum for PopulationAttributes {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(PopulationAttributes::default(), |acc, p| acc + p)
    }
}

impl<'a> Sum<&'a PopulationAttributes> for PopulationAttributes {
    fn sum<I: Iterator<Item = &'a PopulationAttributes>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// signed difference between two [`PopulationAttributes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationDelta {
    #[serde(rename = "POBTOT")]
    pub pobtot: i64,
    #[serde(rename = "POBFEM")]
    pub pobfem: i64,
    #[serde(rename = "POB0_14")]
    pub pob0_14: i64,
    #[serde(rename = "P_60YMAS")]
    pub p_60ymas: i64,
    #[serde(rename = "P_CD_T")]
    pub p_cd_t: i64,
}
