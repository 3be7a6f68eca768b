use std::{num::ParseIntError, str::FromStr};

use chrono::NaiveDate;
use derive_more::{Display, From, Into};
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Identifies a driver for the lifetime of a roster. Ids are never reused, even after the
/// driver they pointed to has been removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
pub struct DriverId(u64);

impl DriverId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl FromStr for DriverId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum DriverStatus {
    Active,
    Inactive,
}

impl DriverStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// A single driver on the roster.
///
/// Everything except [`DriverStatus`] is fixed at creation. The status only changes through
/// [`Roster::toggle_status`](crate::Roster::toggle_status).
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct DriverRecord {
    #[getset(get_copy = "pub")]
    id: DriverId,
    #[getset(get = "pub")]
    name: String,
    #[getset(get = "pub")]
    company: String,
    #[getset(get = "pub")]
    license_number: String,
    #[getset(get_copy = "pub")]
    status: DriverStatus,
    #[getset(get = "pub")]
    email: String,
    #[getset(get = "pub")]
    phone: String,
    #[getset(get = "pub")]
    address: String,
    #[getset(get_copy = "pub")]
    hire_date: NaiveDate,
    /// Somewhere in `[3.0, 5.0]`
    #[getset(get_copy = "pub")]
    performance_rating: f64,
    /// Opaque reference to the driver's photo
    #[getset(get = "pub")]
    profile_photo: String,
}

impl DriverRecord {
    pub(super) fn new(id: DriverId, driver: NewDriver) -> Self {
        let NewDriver {
            name,
            company,
            license_number,
            status,
            email,
            phone,
            address,
            hire_date,
            performance_rating,
            profile_photo,
        } = driver;

        Self {
            id,
            name,
            company,
            license_number,
            status,
            email,
            phone,
            address,
            hire_date,
            performance_rating,
            profile_photo,
        }
    }

    pub(super) fn toggle_status(&mut self) -> DriverStatus {
        self.status = self.status.toggled();
        self.status
    }

    /// Initials shown when no profile photo can be displayed, e.g. `"JD"` for `"John Doe"`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}

/// Everything needed to put a driver on the roster. The roster assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDriver {
    pub name: String,
    pub company: String,
    pub license_number: String,
    pub status: DriverStatus,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub hire_date: NaiveDate,
    pub performance_rating: f64,
    pub profile_photo: String,
}

#[cfg(test)]
impl NewDriver {
    /// A driver with placeholder details, for tests that only care about a few fields.
    pub(crate) fn mock(name: &str, status: DriverStatus) -> Self {
        Self {
            name: name.into(),
            company: "Alpha Logistics".into(),
            license_number: "DL100000".into(),
            status,
            email: "driver@example.com".into(),
            phone: "+1 (555) 100-1000".into(),
            address: "123 Main St, Anytown, USA".into(),
            hire_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            performance_rating: 4.0,
            profile_photo: "/placeholder-avatar-1.jpg".into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_toggled() {
        assert_eq!(DriverStatus::Active.toggled(), DriverStatus::Inactive);
        assert_eq!(DriverStatus::Inactive.toggled().toggled(), DriverStatus::Inactive);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!("active".parse::<DriverStatus>().unwrap(), DriverStatus::Active);
        assert_eq!("Inactive".parse::<DriverStatus>().unwrap(), DriverStatus::Inactive);
        assert!("retired".parse::<DriverStatus>().is_err());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(" 7".parse::<DriverId>().unwrap(), DriverId::new(7));
        assert!("-1".parse::<DriverId>().is_err());
    }

    #[test]
    fn test_initials() {
        let record = DriverRecord::new(
            DriverId::new(1),
            NewDriver::mock("John  Doe", DriverStatus::Active),
        );

        assert_eq!(record.initials(), "JD");
    }
}
