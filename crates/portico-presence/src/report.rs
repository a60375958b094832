//! Read-only aggregates for the dashboard and staff panel.
//!
//! Everything here is a pure read over directory and ledger snapshots; the
//! rendering collaborators (dashboard, export) consume the results as plain
//! data. No aggregate is cached — each call reflects the stores at call
//! time.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use portico_core::age::age_in_years;
use portico_core::entities::Client;
use portico_core::enums::PresenceKind;
use portico_core::ids::NationalId;
use portico_directory::ClientDirectory;

use crate::ledger::PresenceLedger;

// ---------------------------------------------------------------------------
// VenueSnapshot
// ---------------------------------------------------------------------------

/// Point-in-time occupancy and visit aggregates for one day.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct VenueSnapshot {
    /// Clients whose presence cache says they are inside right now.
    pub inside_now: usize,
    /// Entry events recorded on the snapshot day.
    pub entries_today: usize,
    /// Distinct clients with at least one entry on the snapshot day.
    pub unique_visitors_today: usize,
    /// Mean whole-year age of today's visitors, rounded; `None` with no
    /// visitors.
    pub average_age_today: Option<u32>,
    pub generated_at: DateTime<Utc>,
}

/// One bucket of the hourly entry-flow histogram.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HourlyEntries {
    /// Hour of day, 0–23.
    pub hour: u32,
    pub entries: usize,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Aggregate the day's occupancy and visit counts as of `now`.
#[must_use]
pub fn venue_snapshot<D, L>(directory: &D, ledger: &L, now: DateTime<Utc>) -> VenueSnapshot
where
    D: ClientDirectory,
    L: PresenceLedger,
{
    let today = now.date_naive();
    let clients = directory.snapshot();
    let inside_now = clients.iter().filter(|c| c.currently_inside).count();

    let events = ledger.all_events();
    let todays_entries: Vec<_> = events
        .iter()
        .filter(|e| e.kind == PresenceKind::Entry && e.occurred_at.date_naive() == today)
        .collect();
    let entries_today = todays_entries.len();

    let visitors: HashSet<&NationalId> = todays_entries.iter().map(|e| &e.client_id).collect();
    let unique_visitors_today = visitors.len();

    let by_id: HashMap<&NationalId, &Client> = clients.iter().map(|c| (&c.id, c)).collect();
    let ages: Vec<i32> = visitors
        .iter()
        .filter_map(|id| by_id.get(*id))
        .map(|c| age_in_years(c.birth_date, today))
        .collect();
    let average_age_today = average(&ages);

    VenueSnapshot {
        inside_now,
        entries_today,
        unique_visitors_today,
        average_age_today,
        generated_at: now,
    }
}

/// Entry counts per hour of `day`, always 24 buckets.
#[must_use]
pub fn entries_by_hour<L: PresenceLedger>(ledger: &L, day: NaiveDate) -> Vec<HourlyEntries> {
    let mut buckets = [0usize; 24];
    for event in ledger.all_events() {
        if event.kind == PresenceKind::Entry && event.occurred_at.date_naive() == day {
            buckets[event.occurred_at.hour() as usize] += 1;
        }
    }
    buckets
        .iter()
        .enumerate()
        .map(|(hour, &entries)| HourlyEntries {
            hour: hour as u32,
            entries,
        })
        .collect()
}

/// Number of visits (entry events) recorded for a client this session.
#[must_use]
pub fn visit_count<L: PresenceLedger>(ledger: &L, client_id: &NationalId) -> usize {
    ledger
        .history(client_id)
        .iter()
        .filter(|e| e.kind == PresenceKind::Entry)
        .count()
}

/// The latest entrants, most recent first, one row per client — the staff
/// panel's quick-access list.
#[must_use]
pub fn recent_entries<D, L>(directory: &D, ledger: &L, limit: usize) -> Vec<Client>
where
    D: ClientDirectory,
    L: PresenceLedger,
{
    let events = ledger.all_events();
    let mut seen: HashSet<NationalId> = HashSet::new();
    let mut entrants = Vec::new();
    for event in events.iter().rev() {
        if event.kind != PresenceKind::Entry || !seen.insert(event.client_id.clone()) {
            continue;
        }
        if let Ok(client) = directory.find_by_id(&event.client_id) {
            entrants.push(client);
        }
        if entrants.len() == limit {
            break;
        }
    }
    entrants
}

fn average(ages: &[i32]) -> Option<u32> {
    if ages.is_empty() {
        return None;
    }
    let sum: i32 = ages.iter().sum();
    let mean = f64::from(sum) / ages.len() as f64;
    Some(mean.round() as u32)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use portico_core::ids::Phone;
    use portico_directory::MemoryDirectory;
    use pretty_assertions::assert_eq;

    use crate::ledger::MemoryLedger;

    use super::*;

    fn client(id: &str, name: &str, birth_year: i32) -> Client {
        Client {
            id: NationalId::parse(id).unwrap(),
            name: name.into(),
            email: format!("{}@email.com", name.to_lowercase()),
            phone: Phone::parse("11987654321").unwrap(),
            birth_date: NaiveDate::from_ymd_opt(birth_year, 5, 15).unwrap(),
            currently_inside: false,
            last_visit: None,
        }
    }

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 25, hour, minute, 0).unwrap()
    }

    #[test]
    fn snapshot_counts_todays_entries_and_visitors() {
        let directory = MemoryDirectory::new();
        let ledger = MemoryLedger::new();
        let joao = directory.create(client("12345678900", "Joao", 1994)).unwrap();
        let maria = directory
            .create(client("98765432100", "Maria", 1998))
            .unwrap();

        // João enters, leaves, re-enters; Maria enters once.
        ledger.append(&joao.id, PresenceKind::Entry, at(20, 0)).unwrap();
        ledger.append(&joao.id, PresenceKind::Exit, at(21, 0)).unwrap();
        ledger.append(&joao.id, PresenceKind::Entry, at(22, 0)).unwrap();
        ledger.append(&maria.id, PresenceKind::Entry, at(22, 30)).unwrap();
        directory.set_inside_flag(&joao.id, true).unwrap();
        directory.set_inside_flag(&maria.id, true).unwrap();

        let snapshot = venue_snapshot(&directory, &ledger, at(23, 0));
        assert_eq!(snapshot.inside_now, 2);
        assert_eq!(snapshot.entries_today, 3);
        assert_eq!(snapshot.unique_visitors_today, 2);
        // Ages on 2024-01-25: 29 (born 1994) and 25 (born 1998) → mean 27.
        assert_eq!(snapshot.average_age_today, Some(27));
    }

    #[test]
    fn snapshot_with_no_visitors_has_no_average_age() {
        let directory = MemoryDirectory::new();
        let ledger = MemoryLedger::new();
        directory.create(client("12345678900", "Joao", 1994)).unwrap();

        let snapshot = venue_snapshot(&directory, &ledger, at(19, 0));
        assert_eq!(snapshot.inside_now, 0);
        assert_eq!(snapshot.entries_today, 0);
        assert_eq!(snapshot.unique_visitors_today, 0);
        assert_eq!(snapshot.average_age_today, None);
    }

    #[test]
    fn snapshot_ignores_other_days() {
        let directory = MemoryDirectory::new();
        let ledger = MemoryLedger::new();
        let joao = directory.create(client("12345678900", "Joao", 1994)).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2024, 1, 24, 23, 0, 0).unwrap();
        ledger
            .append(&joao.id, PresenceKind::Entry, yesterday)
            .unwrap();

        let snapshot = venue_snapshot(&directory, &ledger, at(22, 0));
        assert_eq!(snapshot.entries_today, 0);
    }

    #[test]
    fn hourly_histogram_buckets_entries_only() {
        let ledger = MemoryLedger::new();
        let joao = NationalId::parse("12345678900").unwrap();
        let maria = NationalId::parse("98765432100").unwrap();
        ledger.append(&joao, PresenceKind::Entry, at(22, 5)).unwrap();
        ledger.append(&maria, PresenceKind::Entry, at(22, 40)).unwrap();
        ledger.append(&joao, PresenceKind::Exit, at(23, 10)).unwrap();

        let histogram = entries_by_hour(&ledger, at(0, 0).date_naive());
        assert_eq!(histogram.len(), 24);
        assert_eq!(histogram[22], HourlyEntries { hour: 22, entries: 2 });
        assert_eq!(histogram[23], HourlyEntries { hour: 23, entries: 0 });
    }

    #[test]
    fn visit_count_counts_entries_only() {
        let ledger = MemoryLedger::new();
        let joao = NationalId::parse("12345678900").unwrap();
        ledger.append(&joao, PresenceKind::Entry, at(20, 0)).unwrap();
        ledger.append(&joao, PresenceKind::Exit, at(21, 0)).unwrap();
        ledger.append(&joao, PresenceKind::Entry, at(22, 0)).unwrap();

        assert_eq!(visit_count(&ledger, &joao), 2);
        assert_eq!(visit_count(&ledger, &NationalId::parse("98765432100").unwrap()), 0);
    }

    #[test]
    fn recent_entries_lists_latest_first_without_repeats() {
        let directory = MemoryDirectory::new();
        let ledger = MemoryLedger::new();
        let joao = directory.create(client("12345678900", "Joao", 1994)).unwrap();
        let maria = directory
            .create(client("98765432100", "Maria", 1998))
            .unwrap();

        ledger.append(&joao.id, PresenceKind::Entry, at(20, 0)).unwrap();
        ledger.append(&joao.id, PresenceKind::Exit, at(20, 30)).unwrap();
        ledger.append(&maria.id, PresenceKind::Entry, at(21, 0)).unwrap();
        ledger.append(&joao.id, PresenceKind::Entry, at(22, 0)).unwrap();

        let recent = recent_entries(&directory, &ledger, 5);
        let names: Vec<&str> = recent.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Joao", "Maria"]);

        let capped = recent_entries(&directory, &ledger, 1);
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0].name, "Joao");
    }
}
