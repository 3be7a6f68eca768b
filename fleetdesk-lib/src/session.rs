//! A logged-in user and everything that lives only as long as their session.
//!
//! Logging in seeds a brand new roster and logging out drops it, so nothing a
//! session does outlives it. Session operations report their outcome the way
//! the user sees it: as an optional [`Notice`]. Outcomes the user is never
//! told about (an unknown driver, a blank remark) produce no notice at all.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Duration,
};

use chrono::Local;
use derive_more::Display;
use rand::{SeedableRng, rngs::StdRng};
use strum::EnumString;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    Roster,
    auth::SharedSecret,
    config::CoreConfig,
    fleet::{self, CarId, Company, CompanyDetails, CompanyId},
    roster::{self, DriverId, DriverRecord, Remark},
    seed,
    shift::ShiftClock,
};

/// The driver shown on the driver dashboard.
pub const DASHBOARD_DRIVER: DriverId = DriverId::new(1);
/// How many remarks the driver dashboard shows.
pub const DASHBOARD_REMARKS: usize = 3;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Only administrators can do that")]
    Forbidden,
    #[error("No company is open")]
    NoCompanyOpen,
    #[error("No image found at {}", .0.display())]
    MissingImage(PathBuf),
    #[error(transparent)]
    Fleet(#[from] fleet::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Role {
    Driver,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A short message for the user about something that just happened.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{message}")]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// What the driver dashboard displays.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverDashboard<'a> {
    pub driver: Option<&'a DriverRecord>,
    pub recent_remarks: &'a [Remark],
    pub shift: ShiftClock,
    pub car_broken_down: bool,
}

#[derive(Debug)]
pub struct Session {
    role: Role,
    roster: Roster,
    shift: ShiftClock,
    /// Breakdown state reported from the company views, by car
    breakdowns: HashMap<CarId, bool>,
    company: Option<CompanyDetails>,
    rng: StdRng,
}

impl Session {
    /// Log in as `role`, seeding a new roster. Passing a `seed` makes the mock data reproducible.
    pub fn login(role: Role, cfg: &CoreConfig, seed: Option<u64>) -> (Self, Notice) {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let roster = seed::roster(
            cfg.seed_size,
            &mut rng,
            SharedSecret::new(cfg.admin_secret.clone()),
        );

        if roster.is_empty() {
            warn!("Seeded an empty roster");
        }
        info!("Logged in as {role}");

        (
            Self {
                role,
                roster,
                shift: ShiftClock::new(),
                breakdowns: HashMap::new(),
                company: None,
                rng,
            },
            Notice::success(format!("Welcome, {role}!")),
        )
    }

    /// End the session, discarding everything it holds. Drivers still owe a [`FleetUpload`] for
    /// the shift they just finished.
    pub fn logout(self) -> (Notice, Option<FleetUpload>) {
        info!("Logged out {}", self.role);

        let upload = match self.role {
            Role::Driver => Some(FleetUpload { shift: self.shift }),
            Role::Admin => None,
        };

        (Notice::info("Logged out successfully"), upload)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// The roster being managed. Only administrators get to browse it.
    pub fn roster(&self) -> Result<&Roster> {
        self.require_admin()?;
        Ok(&self.roster)
    }

    /// Companies whose name or location contains `term`.
    pub fn search_companies(&self, term: &str) -> Result<Vec<Company>> {
        self.require_admin()?;
        Ok(fleet::search_companies(term))
    }

    pub fn toggle_status(&mut self, id: DriverId) -> Result<Option<Notice>> {
        self.require_admin()?;

        Ok(match self.roster.toggle_status(id) {
            Ok(driver) => Some(Notice::info(format!(
                "Driver {id} status changed to {}",
                driver.status()
            ))),
            Err(e) => silence(e),
        })
    }

    pub fn add_remark(&mut self, id: DriverId, text: &str) -> Result<Option<Notice>> {
        self.require_admin()?;

        Ok(match self.roster.add_remark(id, text) {
            Ok(_) => Some(Notice::success("Remark added successfully")),
            Err(e) => silence(e),
        })
    }

    /// Arm a driver for removal. Returns whether a driver is now pending.
    pub fn request_removal(&mut self, id: DriverId) -> Result<bool> {
        self.require_admin()?;

        match self.roster.request_removal(id) {
            Ok(()) => Ok(true),
            Err(e) => {
                debug!("Ignored removal request: {e}");
                Ok(false)
            }
        }
    }

    pub fn cancel_removal(&mut self) -> Result<Option<DriverId>> {
        self.require_admin()?;
        Ok(self.roster.cancel_removal())
    }

    /// Confirm the pending removal with `secret`. A wrong secret is reported as an error notice
    /// and leaves the removal pending.
    pub fn confirm_removal(&mut self, secret: &str) -> Result<Option<Notice>> {
        self.require_admin()?;

        Ok(match self.roster.confirm_removal(secret) {
            Ok(Some(driver)) => Some(Notice::success(format!(
                "Driver {} removed successfully",
                driver.id()
            ))),
            Ok(None) => None,
            Err(e) => Some(Notice::error(e.to_string())),
        })
    }

    /// Open the details of a company, generating its vehicles.
    pub fn open_company(&mut self, id: CompanyId) -> Result<&CompanyDetails> {
        self.require_admin()?;

        let company = fleet::find_company(id)?;
        let details = CompanyDetails::generate(company, &mut self.rng, Local::now().date_naive());

        Ok(self.company.insert(details))
    }

    pub fn company(&self) -> Option<&CompanyDetails> {
        self.company.as_ref()
    }

    /// Flip the breakdown state of a car in the open company.
    pub fn toggle_breakdown(&mut self, id: CarId) -> Result<Notice> {
        self.require_admin()?;

        let car = self
            .company
            .as_mut()
            .ok_or(Error::NoCompanyOpen)?
            .toggle_breakdown(id)?;

        let broken = car.is_broken_down();
        self.breakdowns.insert(id, broken);

        Ok(Notice::info(format!(
            "Car {id} marked as {}",
            if broken { "broken down" } else { "operational" }
        )))
    }

    pub fn is_broken_down(&self, id: CarId) -> bool {
        self.breakdowns.get(&id).copied().unwrap_or(false)
    }

    /// Advance the shift clock by one minute. Returns whether it is still running.
    pub fn tick_shift(&mut self) -> bool {
        self.shift.tick()
    }

    /// Let the shift clock catch up with `elapsed` wall-clock time, returning the remainder.
    pub fn catch_up_shift(&mut self, elapsed: Duration) -> Duration {
        self.shift.catch_up(elapsed)
    }

    pub fn dashboard(&self) -> DriverDashboard<'_> {
        DriverDashboard {
            driver: self.roster.get(DASHBOARD_DRIVER),
            recent_remarks: self
                .roster
                .recent_remarks(DASHBOARD_DRIVER, DASHBOARD_REMARKS),
            shift: self.shift,
            car_broken_down: self.is_broken_down(CarId::from(DASHBOARD_DRIVER.get())),
        }
    }

    fn require_admin(&self) -> Result<()> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Driver => Err(Error::Forbidden),
        }
    }
}

/// The end-of-shift report a driver files after logging out: a photo of the fleet and how many
/// fleets they got done.
#[derive(Debug)]
#[must_use]
pub struct FleetUpload {
    shift: ShiftClock,
}

impl FleetUpload {
    pub fn submit(&self, image: &Path, fleets_done: u32) -> Result<Notice> {
        if !image.is_file() {
            return Err(Error::MissingImage(image.to_path_buf()));
        }

        info!(
            "Fleet upload of {fleets_done} fleets with {} after {:.0}% of the shift",
            image.display(),
            self.shift.progress_percent()
        );

        Ok(Notice::success("Fleet upload successful"))
    }
}

/// Roster failures the user is not told about.
fn silence(e: roster::Error) -> Option<Notice> {
    debug!("Ignored: {e}");
    None
}

#[cfg(test)]
mod test {
    use super::*;

    fn admin() -> Session {
        Session::login(Role::Admin, &CoreConfig::default(), Some(11)).0
    }

    #[test]
    fn test_login() {
        let (session, notice) = Session::login(Role::Admin, &CoreConfig::default(), Some(1));

        assert_eq!(notice, Notice::success("Welcome, admin!"));
        assert_eq!(session.role(), Role::Admin);
        assert_eq!(session.roster.len(), 50);
    }

    #[test]
    fn test_login_uses_seed_size() {
        let cfg = CoreConfig {
            seed_size: 3,
            ..Default::default()
        };

        let (session, _) = Session::login(Role::Driver, &cfg, None);

        assert_eq!(session.roster.len(), 3);
    }

    #[test]
    fn test_logout() {
        let (notice, upload) = admin().logout();

        assert_eq!(notice, Notice::info("Logged out successfully"));
        assert!(upload.is_none());
    }

    #[test]
    fn test_driver_logout_asks_for_fleet_upload() {
        let (session, _) = Session::login(Role::Driver, &CoreConfig::default(), Some(5));
        let image = tempfile::NamedTempFile::new().unwrap();

        let (_, upload) = session.logout();

        assert_eq!(
            upload.unwrap().submit(image.path(), 12).unwrap(),
            Notice::success("Fleet upload successful")
        );
    }

    #[test]
    fn test_fleet_upload_needs_image() {
        let (session, _) = Session::login(Role::Driver, &CoreConfig::default(), Some(5));
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("fleet.jpg");

        let (_, upload) = session.logout();

        assert_eq!(
            upload.unwrap().submit(&missing, 3).unwrap_err(),
            Error::MissingImage(missing)
        );
    }

    #[test]
    fn test_driver_is_forbidden() {
        let (mut session, _) = Session::login(Role::Driver, &CoreConfig::default(), Some(2));
        let id = DriverId::new(1);
        let status = session.roster.get(id).unwrap().status();

        assert_eq!(session.toggle_status(id).unwrap_err(), Error::Forbidden);
        assert_eq!(session.add_remark(id, "hi").unwrap_err(), Error::Forbidden);
        assert_eq!(session.request_removal(id).unwrap_err(), Error::Forbidden);
        assert_eq!(session.confirm_removal("admin").unwrap_err(), Error::Forbidden);
        assert_eq!(
            session.open_company(CompanyId::from(1)).unwrap_err(),
            Error::Forbidden
        );
        assert_eq!(session.roster().unwrap_err(), Error::Forbidden);
        assert_eq!(session.search_companies("").unwrap_err(), Error::Forbidden);
        assert_eq!(session.roster.get(id).unwrap().status(), status);
    }

    #[test]
    fn test_toggle_status_notice() {
        let mut session = admin();
        let id = DriverId::new(4);
        let next = session.roster.get(id).unwrap().status().toggled();

        assert_eq!(
            session.toggle_status(id).unwrap(),
            Some(Notice::info(format!("Driver 4 status changed to {next}")))
        );
        assert_eq!(session.toggle_status(DriverId::new(404)).unwrap(), None);
    }

    #[test]
    fn test_remark_notice() {
        let mut session = admin();

        assert_eq!(
            session.add_remark(DriverId::new(1), "Late twice").unwrap(),
            Some(Notice::success("Remark added successfully"))
        );
        assert_eq!(session.add_remark(DriverId::new(1), "  ").unwrap(), None);
        assert_eq!(session.add_remark(DriverId::new(404), "x").unwrap(), None);
    }

    #[test]
    fn test_removal_flow() {
        let mut session = admin();
        let id = DriverId::new(7);

        assert!(session.request_removal(id).unwrap());
        assert_eq!(
            session.confirm_removal("wrong").unwrap(),
            Some(Notice::error("Invalid password"))
        );
        assert!(session.roster.contains(id));

        assert_eq!(
            session.confirm_removal("admin").unwrap(),
            Some(Notice::success("Driver 7 removed successfully"))
        );
        assert!(!session.roster.contains(id));

        assert!(!session.request_removal(id).unwrap());
        assert_eq!(session.confirm_removal("admin").unwrap(), None);
    }

    #[test]
    fn test_removal_uses_configured_secret() {
        let cfg = CoreConfig {
            admin_secret: "s3cret".into(),
            ..Default::default()
        };
        let (mut session, _) = Session::login(Role::Admin, &cfg, Some(3));
        session.request_removal(DriverId::new(2)).unwrap();

        assert_eq!(
            session.confirm_removal("admin").unwrap(),
            Some(Notice::error("Invalid password"))
        );
        assert!(session.confirm_removal("s3cret").unwrap().is_some());
    }

    #[test]
    fn test_breakdown_reaches_dashboard() {
        let mut session = admin();

        assert_eq!(
            session.toggle_breakdown(CarId::from(1)).unwrap_err(),
            Error::NoCompanyOpen
        );

        session.open_company(CompanyId::from(3)).unwrap();
        assert_eq!(
            session.toggle_breakdown(CarId::from(1)).unwrap(),
            Notice::info("Car 1 marked as broken down")
        );
        assert!(session.dashboard().car_broken_down);

        assert_eq!(
            session.toggle_breakdown(CarId::from(1)).unwrap(),
            Notice::info("Car 1 marked as operational")
        );
        assert!(!session.dashboard().car_broken_down);

        assert_eq!(
            session.toggle_breakdown(CarId::from(9)).unwrap_err(),
            Error::Fleet(fleet::Error::CarNotFound(CarId::from(9)))
        );
    }

    #[test]
    fn test_search_companies() {
        let session = admin();

        assert_eq!(session.search_companies("").unwrap().len(), 9);
        assert!(session.roster().is_ok());
    }

    #[test]
    fn test_open_unknown_company() {
        let mut session = admin();

        assert_eq!(
            session.open_company(CompanyId::from(42)).unwrap_err(),
            Error::Fleet(fleet::Error::CompanyNotFound(CompanyId::from(42)))
        );
        assert!(session.company().is_none());
    }

    #[test]
    fn test_dashboard() {
        let mut session = admin();
        for text in ["one", "two", "three", "four"] {
            session.add_remark(DASHBOARD_DRIVER, text).unwrap();
        }
        session.tick_shift();

        let dashboard = session.dashboard();

        assert_eq!(dashboard.driver.unwrap().id(), DASHBOARD_DRIVER);
        let texts: Vec<&str> = dashboard
            .recent_remarks
            .iter()
            .map(|r| r.text().as_str())
            .collect();
        assert_eq!(texts, vec!["two", "three", "four"]);
        assert_eq!(dashboard.shift.remaining(), 479);
        assert!(!dashboard.car_broken_down);
    }

    #[test]
    fn test_parse_role() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Driver.to_string(), "driver");
    }
}
