//! Trial and subscription gating for lab accounts.
//!
//! Pure calendar arithmetic: the caller fetches account rows and passes the
//! relevant dates in, so every calculation can be tested against a fixed
//! day instead of the wall clock. Also home to patient registration-number
//! allocation, which shares the same per-account capacity rules.

pub mod error;
pub mod regd;
pub mod trial;

pub use error::TrialGateError;
pub use regd::{format_regd_no, next_regd_no, MAX_PATIENTS};
pub use trial::{
    requires_subscription, status_message, SubscriptionState, TrialStatus, TrialWindow,
};
