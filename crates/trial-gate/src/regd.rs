//! Patient registration-number allocation.
//!
//! Numbers are zero-padded four-digit strings drawn from 1..=1000 per lab.
//! The preferred slot cycles with the patient count; when it is already in
//! use the lowest free number wins.

use crate::error::TrialGateError;
use std::collections::BTreeSet;

/// Per-lab patient capacity.
pub const MAX_PATIENTS: u32 = 1000;

/// Render a registration number in its stored form, e.g. `7` → `"0007"`.
pub fn format_regd_no(n: u32) -> String {
    format!("{:04}", n)
}

/// Allocate the next registration number given the set already in use.
pub fn next_regd_no(taken: &BTreeSet<String>) -> Result<String, TrialGateError> {
    if taken.len() as u32 >= MAX_PATIENTS {
        return Err(TrialGateError::RegistrationLimitReached(MAX_PATIENTS));
    }

    let preferred = (taken.len() as u32 % MAX_PATIENTS) + 1;
    let candidate = format_regd_no(preferred);
    if !taken.contains(&candidate) {
        return Ok(candidate);
    }

    for n in 1..=MAX_PATIENTS {
        let candidate = format_regd_no(n);
        if !taken.contains(&candidate) {
            return Ok(candidate);
        }
    }

    Err(TrialGateError::RegistrationLimitReached(MAX_PATIENTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn taken(numbers: &[u32]) -> BTreeSet<String> {
        numbers.iter().map(|&n| format_regd_no(n)).collect()
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(format_regd_no(7), "0007");
        assert_eq!(format_regd_no(42), "0042");
        assert_eq!(format_regd_no(1000), "1000");
    }

    #[test]
    fn first_patient_gets_0001() {
        assert_eq!(next_regd_no(&BTreeSet::new()).unwrap(), "0001");
    }

    #[test]
    fn allocation_follows_the_count() {
        assert_eq!(next_regd_no(&taken(&[1, 2, 3])).unwrap(), "0004");
    }

    #[test]
    fn falls_back_to_lowest_free_number() {
        // Count says 0004 next, but it is taken; 0002 is the lowest hole.
        assert_eq!(next_regd_no(&taken(&[1, 3, 4])).unwrap(), "0002");
    }

    #[test]
    fn limit_reached_at_capacity() {
        let full: BTreeSet<String> = (1..=MAX_PATIENTS).map(format_regd_no).collect();
        assert_eq!(
            next_regd_no(&full).unwrap_err(),
            TrialGateError::RegistrationLimitReached(MAX_PATIENTS)
        );
    }

    #[test]
    fn one_slot_below_capacity_still_allocates() {
        let mut almost: BTreeSet<String> = (1..=MAX_PATIENTS).map(format_regd_no).collect();
        almost.remove(&format_regd_no(500));
        assert_eq!(next_regd_no(&almost).unwrap(), "0500");
    }
}
