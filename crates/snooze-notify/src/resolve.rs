//! Notification list inheritance resolution.
//!
//! A schedule's email and phone lists may contain the inheritance sentinel.
//! If it appears anywhere in a list, the global master entries are merged in
//! front of the schedule's own literal entries; without the sentinel, the
//! schedule's list is used verbatim and the master list is ignored entirely.
//!
//! Resolution is per list: a schedule can inherit emails while pinning its
//! own phones, or vice versa.

use tracing::warn;

use snooze_config::{EmailEntry, PhoneEntry, PhoneNumber, is_valid_email, is_valid_phone};

/// The effective recipients for one schedule after inheritance resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTargets {
    /// Recipient email addresses, deduplicated, merge order preserved.
    pub emails: Vec<String>,
    /// Recipient phone numbers, deduplicated on the bare number.
    pub phones: Vec<PhoneNumber>,
}

impl ResolvedTargets {
    /// Returns true if resolution produced no recipients at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty()
    }
}

/// Resolves a schedule's notification lists against the global defaults.
///
/// Master entries come first when the sentinel triggers a merge, so the
/// global defaults keep their position ahead of schedule-local additions.
/// Entries that fail shape validation are dropped with a warning rather
/// than poisoning the rest of the list; the configuration validator
/// normally rejects them long before this point.
#[must_use]
pub fn resolve(
    local_emails: &[EmailEntry],
    local_phones: &[PhoneEntry],
    master_emails: &[String],
    master_phones: &[PhoneNumber],
) -> ResolvedTargets {
    ResolvedTargets {
        emails: resolve_emails(local_emails, master_emails),
        phones: resolve_phones(local_phones, master_phones),
    }
}

fn resolve_emails(local: &[EmailEntry], master: &[String]) -> Vec<String> {
    let inherits = local.iter().any(|e| matches!(e, EmailEntry::Inherited));
    let literals = local.iter().filter_map(|e| match e {
        EmailEntry::Inherited => None,
        EmailEntry::Address(addr) => Some(addr.as_str()),
    });

    let mut emails: Vec<String> = Vec::new();
    let candidates: Vec<&str> = if inherits {
        master.iter().map(String::as_str).chain(literals).collect()
    } else {
        literals.collect()
    };

    for addr in candidates {
        if !is_valid_email(addr) {
            warn!(address = addr, "dropping malformed email recipient");
            continue;
        }
        // Exact-match dedup; address case variants are kept distinct.
        if !emails.iter().any(|e| e == addr) {
            emails.push(addr.to_string());
        }
    }
    emails
}

fn resolve_phones(local: &[PhoneEntry], master: &[PhoneNumber]) -> Vec<PhoneNumber> {
    let inherits = local.iter().any(|p| matches!(p, PhoneEntry::Inherited));
    let literals = local.iter().filter_map(|p| match p {
        PhoneEntry::Inherited => None,
        PhoneEntry::Number(number) => Some(number),
    });

    let candidates: Vec<&PhoneNumber> = if inherits {
        master.iter().chain(literals).collect()
    } else {
        literals.collect()
    };

    let mut phones: Vec<PhoneNumber> = Vec::new();
    for phone in candidates {
        if !is_valid_phone(&phone.number) {
            warn!(number = %phone.number, "dropping malformed phone recipient");
            continue;
        }
        // Dedup on the bare number. A later duplicate carrying the
        // non-critical opt-in upgrades the kept entry in place, so the
        // opt-in wins regardless of which copy carried it.
        if let Some(existing) = phones.iter_mut().find(|p| p.number == phone.number) {
            existing.receives_non_critical |= phone.receives_non_critical;
        } else {
            phones.push(phone.clone());
        }
    }
    phones
}
