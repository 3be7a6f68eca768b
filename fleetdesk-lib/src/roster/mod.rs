//! The driver roster view-model.
//!
//! A [`Roster`] exclusively owns the drivers of one session. Reads go through
//! [`Roster::query`], which derives a display-ready page without touching the
//! records. Writes are limited to toggling a driver's status, appending
//! remarks and the two-phase, password-gated removal.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::CredentialVerifier;

mod driver;
mod query;
mod remark;

pub use driver::{DriverId, DriverRecord, DriverStatus, NewDriver};
pub use query::{
    ITEMS_PER_PAGE, RosterPage, RosterQuery, SortColumn, SortDirection, SortState, StatusFilter,
    run as run_query,
};
pub use remark::Remark;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("No driver with id {0}")]
    NotFound(DriverId),
    #[error("Remarks must contain some text")]
    EmptyRemark,
    #[error("Invalid password")]
    AuthFailed,
}

#[derive(Debug)]
pub struct Roster {
    /// Kept in insertion order, which is also the order ties are broken in when sorting
    drivers: Vec<DriverRecord>,
    remarks: HashMap<DriverId, Vec<Remark>>,
    pending_removal: Option<DriverId>,
    next_id: u64,
    verifier: Box<dyn CredentialVerifier>,
}

impl Roster {
    /// Create an empty roster whose removals are confirmed against `verifier`.
    pub fn new(verifier: impl CredentialVerifier + 'static) -> Self {
        Self {
            drivers: Vec::new(),
            remarks: HashMap::new(),
            pending_removal: None,
            next_id: 1,
            verifier: Box::new(verifier),
        }
    }

    /// Put a new driver on the roster, returning the id it was assigned.
    pub fn insert(&mut self, driver: NewDriver) -> DriverId {
        let id = DriverId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        self.drivers.push(DriverRecord::new(id, driver));

        debug!("Added driver {id}");

        id
    }

    pub fn get(&self, id: DriverId) -> Option<&DriverRecord> {
        self.drivers.iter().find(|d| d.id() == id)
    }

    pub fn contains(&self, id: DriverId) -> bool {
        self.get(id).is_some()
    }

    /// All drivers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DriverRecord> {
        self.drivers.iter()
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Derive one page of drivers matching `query`.
    pub fn query(&self, query: &RosterQuery) -> RosterPage<'_> {
        run_query(&self.drivers, query)
    }

    /// Flip a driver between active and inactive, returning the updated record.
    pub fn toggle_status(&mut self, id: DriverId) -> Result<&DriverRecord> {
        let driver = self
            .drivers
            .iter_mut()
            .find(|d| d.id() == id)
            .ok_or(Error::NotFound(id))?;

        let status = driver.toggle_status();
        debug!("Driver {id} is now {status}");

        Ok(driver)
    }

    /// Append a remark to a driver. Text that is empty once trimmed is rejected, but otherwise
    /// stored as given.
    pub fn add_remark(&mut self, id: DriverId, text: &str) -> Result<&Remark> {
        if text.trim().is_empty() {
            return Err(Error::EmptyRemark);
        }

        if !self.contains(id) {
            return Err(Error::NotFound(id));
        }

        let remarks = self.remarks.entry(id).or_default();
        remarks.push(Remark::new(text));

        debug!("Added remark to driver {id}");

        remarks.last().ok_or(Error::NotFound(id))
    }

    /// Every remark on a driver, oldest first.
    pub fn remarks(&self, id: DriverId) -> &[Remark] {
        self.remarks.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Up to `count` of the most recent remarks on a driver, oldest first.
    pub fn recent_remarks(&self, id: DriverId, count: usize) -> &[Remark] {
        let remarks = self.remarks(id);
        remarks
            .get(remarks.len().saturating_sub(count)..)
            .unwrap_or_default()
    }

    /// Arm a driver for removal. Nothing is removed until [`Roster::confirm_removal`] succeeds,
    /// and arming another driver replaces the previous target.
    pub fn request_removal(&mut self, id: DriverId) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::NotFound(id));
        }

        if let Some(previous) = self.pending_removal.replace(id) {
            debug!("Pending removal moved from driver {previous} to driver {id}");
        }

        Ok(())
    }

    pub fn pending_removal(&self) -> Option<DriverId> {
        self.pending_removal
    }

    /// Disarm the pending removal, if any.
    pub fn cancel_removal(&mut self) -> Option<DriverId> {
        self.pending_removal.take()
    }

    /// Remove the pending driver if `secret` is accepted.
    ///
    /// A rejected secret leaves both the roster and the pending target untouched so the caller can
    /// retry as often as it likes. An accepted secret with nothing pending removes nothing.
    pub fn confirm_removal(&mut self, secret: &str) -> Result<Option<DriverRecord>> {
        if !self.verifier.verify(secret) {
            warn!("Rejected removal of driver {:?}", self.pending_removal);
            return Err(Error::AuthFailed);
        }

        let Some(id) = self.pending_removal.take() else {
            return Ok(None);
        };

        let Some(position) = self.drivers.iter().position(|d| d.id() == id) else {
            return Ok(None);
        };

        let removed = self.drivers.remove(position);
        self.remarks.remove(&id);

        debug!("Removed driver {id}");

        Ok(Some(removed))
    }

    #[cfg(test)]
    /// A roster of 50 seeded drivers guarded by the secret `"admin"`.
    pub(crate) fn mock() -> Self {
        use rand::{SeedableRng, rngs::StdRng};

        use crate::{auth::SharedSecret, seed};

        let mut rng = StdRng::seed_from_u64(7);
        seed::roster(50, &mut rng, SharedSecret::new("admin"))
    }
}
