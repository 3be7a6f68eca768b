//! Mock data for new sessions.

use chrono::NaiveDate;
use rand::{Rng, seq::IndexedRandom};
use tracing::debug;

use crate::{
    Roster,
    auth::CredentialVerifier,
    roster::{DriverStatus, NewDriver},
};

pub const DEFAULT_SEED_SIZE: usize = 50;

/// Employers mock drivers are assigned to.
pub const EMPLOYERS: [&str; 4] = [
    "Alpha Logistics",
    "Beta Transport",
    "Gamma Shipping",
    "Delta Freight",
];

const ADDRESS: &str = "123 Main St, Anytown, USA";
const PHOTO_COUNT: usize = 5;

/// Generate `count` mock drivers named `Driver 1` to `Driver {count}`.
pub fn drivers<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<NewDriver> {
    let hire_date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default();

    (0..count)
        .map(|index| {
            let n = index.saturating_add(1);
            let status = if rng.random_bool(0.5) {
                DriverStatus::Active
            } else {
                DriverStatus::Inactive
            };

            NewDriver {
                name: format!("Driver {n}"),
                company: EMPLOYERS.choose(rng).copied().unwrap_or_default().into(),
                license_number: format!("DL{}", index.saturating_add(100_000)),
                status,
                email: format!("driver{n}@example.com"),
                phone: format!(
                    "+1 (555) {}-{}",
                    index.saturating_add(100),
                    index.saturating_add(1000)
                ),
                address: ADDRESS.into(),
                hire_date,
                performance_rating: rating(rng),
                profile_photo: format!(
                    "/placeholder-avatar-{}.jpg",
                    index.rem_euclid(PHOTO_COUNT).saturating_add(1)
                ),
            }
        })
        .collect()
}

/// A roster holding `count` mock drivers with ids 1 to `count`.
pub fn roster<R: Rng + ?Sized>(
    count: usize,
    rng: &mut R,
    verifier: impl CredentialVerifier + 'static,
) -> Roster {
    let mut roster = Roster::new(verifier);
    for driver in drivers(count, rng) {
        roster.insert(driver);
    }

    debug!("Seeded roster with {count} drivers");

    roster
}

/// A rating in `[3.0, 5.0]` with one decimal place.
fn rating<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let tenths: u8 = rng.random_range(30..=50);
    f64::from(tenths) / 10.0
}

#[cfg(test)]
mod test {
    use rand::{SeedableRng, rngs::StdRng};

    use crate::{auth::SharedSecret, roster::DriverId};

    use super::*;

    #[test]
    fn test_drivers() {
        let mut rng = StdRng::seed_from_u64(1);
        let drivers = drivers(12, &mut rng);

        assert_eq!(drivers.len(), 12);

        let first = drivers.first().unwrap();
        assert_eq!(first.name, "Driver 1");
        assert_eq!(first.license_number, "DL100000");
        assert_eq!(first.email, "driver1@example.com");
        assert_eq!(first.phone, "+1 (555) 100-1000");
        assert_eq!(first.profile_photo, "/placeholder-avatar-1.jpg");

        let last = drivers.last().unwrap();
        assert_eq!(last.name, "Driver 12");
        assert_eq!(last.profile_photo, "/placeholder-avatar-2.jpg");

        for driver in &drivers {
            assert!(EMPLOYERS.contains(&driver.company.as_str()));
            assert!((3.0..=5.0).contains(&driver.performance_rating));
            assert_eq!(driver.hire_date.to_string(), "2022-01-01");
        }
    }

    #[test]
    fn test_same_seed_same_drivers() {
        let a = drivers(20, &mut StdRng::seed_from_u64(99));
        let b = drivers(20, &mut StdRng::seed_from_u64(99));

        assert_eq!(a, b);
    }

    #[test]
    fn test_roster_ids() {
        let roster = roster(50, &mut StdRng::seed_from_u64(3), SharedSecret::new("admin"));

        let ids: Vec<DriverId> = roster.iter().map(|d| d.id()).collect();
        let expected: Vec<DriverId> = (1..=50).map(DriverId::new).collect();

        assert_eq!(ids, expected);
    }
}
