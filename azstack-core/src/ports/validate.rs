//! Port mapping document validation.

use super::{PortDocument, PortEntry, PortRecord};
use std::collections::HashSet;

/// Validate a port mapping document.
///
/// Returns an ordered list of human-readable errors; empty means valid.
/// Services are checked in document order, list entries in list order. Each
/// record is checked for field presence and for host-port uniqueness
/// independently, so one record can contribute both error kinds. A host port
/// is recorded in the seen set even when it duplicates an earlier one, so a
/// port claimed three times yields two duplicate errors.
pub fn validate(doc: &PortDocument) -> Vec<String> {
    let mut seen: HashSet<u16> = HashSet::new();
    let mut errors = Vec::new();

    for (service, entry) in &doc.services {
        match entry {
            PortEntry::Single(record) => {
                check_record(service, record, &mut seen, &mut errors);
            }
            PortEntry::Multiple(records) => {
                for record in records {
                    check_record(service, record, &mut seen, &mut errors);
                }
            }
        }
    }

    errors
}

fn check_record(
    service: &str,
    record: &PortRecord,
    seen: &mut HashSet<u16>,
    errors: &mut Vec<String>,
) {
    if record.host.is_none() || record.container.is_none() {
        errors.push(format!("Missing host/container for {}", service));
    }

    if let Some(host) = record.host {
        if !seen.insert(host) {
            errors.push(format!("Duplicate host port {} for {}", host, service));
        }
    }
}
