//! Synthetic drill-down roster for a selected spend bucket.
//!
//! Identities are synthesized from curated name lists. The roster RNG is
//! seeded from the bucket label, so re-opening the same bucket shows the
//! same users instead of reshuffling under the admin's cursor. Spend is
//! sampled uniformly inside the bucket's range.

use crate::{
    distribution::{parse_bucket_label, SpendBucketDatum},
    rng::SeededRng,
    types::round2,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A bucket drill-down never materializes more than this many users,
/// whatever the simulated total says.
pub const ROSTER_CAP: usize = 50;

/// A synthesized user row in the drill-down table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticUser {
    pub email: String,
    pub spend: f64,
}

/// Generate the roster for one bucket, sorted descending by spend.
///
/// A malformed bucket label yields an empty roster — "no range" means
/// "nothing to display", not a failure.
pub fn generate_bucket_roster(bucket: &SpendBucketDatum) -> Vec<SyntheticUser> {
    let Some(range) = parse_bucket_label(&bucket.bucket) else {
        log::debug!("bucket label {:?} has no range, empty roster", bucket.bucket);
        return Vec::new();
    };

    let mut rng = SeededRng::from_identity(&bucket.bucket);
    let count = (bucket.users as usize).min(ROSTER_CAP);
    let mut users = Vec::with_capacity(count);

    for n in 0..count {
        let first = first_names()[rng.index_below(first_names().len())];
        let last = last_names()[rng.index_below(last_names().len())];
        // Index suffix keeps emails unique within the roster.
        let email = format!(
            "{}.{}{}@example.com",
            first.to_lowercase(),
            last.to_lowercase(),
            n + 1
        );
        let spend = round2(rng.in_range(f64::from(range.min), f64::from(range.max)));
        users.push(SyntheticUser { email, spend });
    }

    users.sort_by(|a, b| b.spend.partial_cmp(&a.spend).unwrap_or(Ordering::Equal));
    users
}

/// Curated first names for synthesized identities.
fn first_names() -> &'static [&'static str] {
    &[
        "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda",
        "David", "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph",
        "Jessica", "Thomas", "Sarah", "Christopher", "Karen", "Daniel", "Lisa",
        "Matthew", "Nancy", "Anthony", "Emily", "Mark", "Michelle", "Steven", "Amanda",
        "Andrew", "Melissa", "Joshua", "Stephanie", "Kevin", "Rebecca", "Brian",
        "Laura", "George", "Hannah", "Eric", "Sofia", "Nathan", "Grace", "Elijah",
        "Olivia", "Gabriel", "Victoria", "Juan", "Priya",
    ]
}

/// Curated last names for synthesized identities.
fn last_names() -> &'static [&'static str] {
    &[
        "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
        "Rodriguez", "Martinez", "Wilson", "Anderson", "Taylor", "Thomas", "Moore",
        "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
        "Clark", "Lewis", "Robinson", "Walker", "Nguyen", "Hill", "Flores", "Green",
        "Adams", "Nelson", "Baker", "Rivera", "Campbell", "Mitchell", "Carter",
        "Patel", "Kim", "Chen", "Tran", "Murphy", "Cook", "Morales", "Ortiz",
        "Singh", "Cohen", "Ivanov", "Okafor",
    ]
}
