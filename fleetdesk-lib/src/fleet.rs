//! Companies and the vehicles they run.

use std::{num::ParseIntError, str::FromStr};

use chrono::{Days, NaiveDate};
use derive_more::{Display, From, Into};
use getset::{CopyGetters, Getters};
use rand::{Rng, seq::IndexedRandom};
use strum::VariantArray;
use thiserror::Error;
use tracing::debug;

/// Vehicles generated for every company.
const CARS_PER_COMPANY: u64 = 5;
/// Insurance on generated vehicles falls due within this many days.
const INSURANCE_WINDOW_DAYS: u64 = 365;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("No company with id {0}")]
    CompanyNotFound(CompanyId),
    #[error("No car with id {0}")]
    CarNotFound(CarId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
pub struct CompanyId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
pub struct CarId(u64);

impl FromStr for CompanyId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl FromStr for CarId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Company {
    pub id: CompanyId,
    pub name: &'static str,
    pub location: &'static str,
}

const fn company(id: u64, name: &'static str, location: &'static str) -> Company {
    Company {
        id: CompanyId(id),
        name,
        location,
    }
}

static DIRECTORY: [Company; 9] = [
    company(1, "Alpha Logistics", "New York, NY"),
    company(2, "Beta Transport", "Los Angeles, CA"),
    company(3, "Gamma Shipping", "Chicago, IL"),
    company(4, "Delta Freight", "Houston, TX"),
    company(5, "Epsilon Carriers", "Phoenix, AZ"),
    company(6, "Zeta Movers", "Philadelphia, PA"),
    company(7, "Eta Express", "San Antonio, TX"),
    company(8, "Theta Transit", "San Diego, CA"),
    company(9, "Iota Transport", "Dallas, TX"),
];

/// Every known company, ordered by id.
pub fn companies() -> &'static [Company] {
    &DIRECTORY
}

pub fn find_company(id: CompanyId) -> Result<Company> {
    companies()
        .iter()
        .find(|c| c.id == id)
        .copied()
        .ok_or(Error::CompanyNotFound(id))
}

/// Companies whose name or location contains `term`, ignoring case.
pub fn search_companies(term: &str) -> Vec<Company> {
    let needle = term.to_lowercase();
    companies()
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&needle) || c.location.to_lowercase().contains(&needle)
        })
        .copied()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, VariantArray)]
pub enum CarModel {
    Sedan,
    #[strum(to_string = "SUV")]
    Suv,
    Van,
    Truck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, VariantArray)]
pub enum ServiceKind {
    Delivery,
    Passenger,
    Freight,
}

#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct Car {
    #[getset(get_copy = "pub")]
    id: CarId,
    #[getset(get_copy = "pub")]
    model: CarModel,
    /// Name of the driver assigned to the car
    #[getset(get = "pub")]
    driver: String,
    #[getset(get_copy = "pub")]
    service: ServiceKind,
    #[getset(get_copy = "pub")]
    insure_due_date: NaiveDate,
    #[getset(get_copy = "pub")]
    is_broken_down: bool,
}

/// A company together with its vehicles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDetails {
    company: Company,
    cars: Vec<Car>,
}

impl CompanyDetails {
    /// Generate the vehicles of `company`, none of them broken down.
    pub fn generate<R: Rng + ?Sized>(company: Company, rng: &mut R, today: NaiveDate) -> Self {
        let cars = (1..=CARS_PER_COMPANY)
            .map(|n| Car {
                id: CarId(n),
                model: CarModel::VARIANTS
                    .choose(rng)
                    .copied()
                    .unwrap_or(CarModel::Sedan),
                driver: format!("Driver {n}"),
                service: ServiceKind::VARIANTS
                    .choose(rng)
                    .copied()
                    .unwrap_or(ServiceKind::Delivery),
                insure_due_date: today
                    .checked_add_days(Days::new(rng.random_range(0..INSURANCE_WINDOW_DAYS)))
                    .unwrap_or(today),
                is_broken_down: false,
            })
            .collect();

        Self { company, cars }
    }

    pub fn company(&self) -> Company {
        self.company
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    /// Flip whether a car is broken down, returning the updated car.
    pub fn toggle_breakdown(&mut self, id: CarId) -> Result<&Car> {
        let car = self
            .cars
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::CarNotFound(id))?;

        car.is_broken_down = !car.is_broken_down;
        debug!(
            "Car {id} of {} broken down: {}",
            self.company.name, car.is_broken_down
        );

        Ok(car)
    }
}

#[cfg(test)]
mod test {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn details() -> CompanyDetails {
        let company = find_company(CompanyId::from(2)).unwrap();
        CompanyDetails::generate(company, &mut StdRng::seed_from_u64(5), today())
    }

    #[test]
    fn test_companies() {
        assert_eq!(companies().len(), 9);
        assert_eq!(find_company(CompanyId::from(9)).unwrap().name, "Iota Transport");
        assert_eq!(
            find_company(CompanyId::from(10)).unwrap_err(),
            Error::CompanyNotFound(CompanyId::from(10))
        );
    }

    #[test]
    fn test_search_name_or_location() {
        let names: Vec<&str> = search_companies("transport")
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Beta Transport", "Iota Transport"]);

        let names: Vec<&str> = search_companies(", tx").iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Delta Freight", "Eta Express", "Iota Transport"]);

        assert_eq!(search_companies("").len(), 9);
        assert!(search_companies("nowhere").is_empty());
    }

    #[test]
    fn test_generate() {
        let details = details();

        assert_eq!(details.company().name, "Beta Transport");
        assert_eq!(details.cars().len(), 5);

        for car in details.cars() {
            assert!(!car.is_broken_down());
            assert!(car.insure_due_date() >= today());
            assert!(car.insure_due_date() < today() + Days::new(INSURANCE_WINDOW_DAYS));
        }

        let drivers: Vec<&str> = details.cars().iter().map(|c| c.driver().as_str()).collect();
        assert_eq!(
            drivers,
            vec!["Driver 1", "Driver 2", "Driver 3", "Driver 4", "Driver 5"]
        );
    }

    #[test]
    fn test_toggle_breakdown() {
        let mut details = details();
        let id = CarId::from(2);

        assert!(details.toggle_breakdown(id).unwrap().is_broken_down());
        assert!(!details.toggle_breakdown(id).unwrap().is_broken_down());
        assert_eq!(
            details.toggle_breakdown(CarId::from(6)).unwrap_err(),
            Error::CarNotFound(CarId::from(6))
        );
    }

    #[test]
    fn test_model_names() {
        assert_eq!(CarModel::Suv.to_string(), "SUV");
        assert_eq!(ServiceKind::Freight.to_string(), "Freight");
    }
}
