//! In-memory roster and attendance store.
//!
//! Serves local runs and tests without PostgreSQL. The roster is fixed at
//! construction; attendance records live behind a mutex so concurrent
//! registrations never lose appends. Id assignment and append happen under
//! the same lock.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::warn;

use crate::domain::ports::{
    AttendancePersistenceError, AttendanceRepository, RosterPersistenceError, RosterRepository,
    StoreHealth, StoreHealthError,
};
use crate::domain::{AttendanceKind, AttendanceRecord, DNI_NOT_REGISTERED_MESSAGE, Dni, Person};

const DEFAULT_ROSTER: [(&str, &str); 2] = [("12345678", "Ana García"), ("87654321", "Luis Pérez")];

/// Store holding the roster and appended records in process memory.
pub struct InMemoryAttendanceStore {
    roster: Vec<Person>,
    records: Mutex<Vec<AttendanceRecord>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryAttendanceStore {
    /// Build a store over `roster` using `clock` for record timestamps.
    pub fn new(roster: Vec<Person>, clock: Arc<dyn Clock>) -> Self {
        Self {
            roster,
            records: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Build a store with the built-in two-person roster and the system clock.
    ///
    /// # Examples
    /// ```
    /// use attendance_backend::outbound::memory::InMemoryAttendanceStore;
    ///
    /// let store = InMemoryAttendanceStore::with_default_roster();
    /// assert_eq!(store.roster().len(), 2);
    /// ```
    pub fn with_default_roster() -> Self {
        Self::new(default_roster(), Arc::new(DefaultClock))
    }

    /// People eligible to register.
    pub fn roster(&self) -> &[Person] {
        &self.roster
    }

    /// Snapshot of the records appended so far.
    ///
    /// # Errors
    ///
    /// Returns [`AttendancePersistenceError::Query`] if a writer panicked
    /// while holding the record lock.
    pub fn records(&self) -> Result<Vec<AttendanceRecord>, AttendancePersistenceError> {
        self.lock_records().map(|records| records.clone())
    }

    fn lookup(&self, dni: &Dni) -> Option<&Person> {
        self.roster.iter().find(|person| person.dni() == dni)
    }

    fn lock_records(&self) -> Result<MutexGuard<'_, Vec<AttendanceRecord>>, AttendancePersistenceError> {
        self.records
            .lock()
            .map_err(|_| {
                warn!("attendance list lock poisoned");
                AttendancePersistenceError::query("attendance list lock poisoned")
            })
    }
}

impl Default for InMemoryAttendanceStore {
    fn default() -> Self {
        Self::with_default_roster()
    }
}

fn default_roster() -> Vec<Person> {
    DEFAULT_ROSTER
        .iter()
        .filter_map(|(dni, name)| Dni::new(dni).ok().map(|dni| Person::new(dni, *name, None)))
        .collect()
}

#[async_trait]
impl RosterRepository for InMemoryAttendanceStore {
    async fn find_person(&self, dni: &Dni) -> Result<Option<Person>, RosterPersistenceError> {
        Ok(self.lookup(dni).cloned())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceStore {
    async fn record_entry(&self, dni: &Dni) -> Result<AttendanceRecord, AttendancePersistenceError> {
        let person = self
            .lookup(dni)
            .ok_or_else(|| AttendancePersistenceError::person_not_found(DNI_NOT_REGISTERED_MESSAGE))?;

        let mut records = self.lock_records()?;
        let id = i64::try_from(records.len())
            .map(|len| len + 1)
            .map_err(|_| AttendancePersistenceError::query("attendance id space exhausted"))?;
        let record = AttendanceRecord {
            id,
            dni: dni.clone(),
            name: person.name().to_owned(),
            recorded_at: self.clock.utc(),
            kind: AttendanceKind::Entry,
        };
        records.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl StoreHealth for InMemoryAttendanceStore {
    async fn ping(&self) -> Result<(), StoreHealthError> {
        self.records
            .lock()
            .map(|_| ())
            .map_err(|_| StoreHealthError::unreachable("attendance list lock poisoned"))
    }
}
