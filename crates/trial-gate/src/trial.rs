//! Trial expiry window calculation.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Length of the free trial.
pub const TRIAL_MONTHS: u32 = 1;

/// Where an account stands with billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubscriptionState {
    None,
    Trial,
    Active { plan: String },
}

/// The fixed window opened when an account starts its trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TrialWindow {
    pub fn from_start(start: NaiveDate) -> Self {
        let end = start
            .checked_add_months(Months::new(TRIAL_MONTHS))
            .expect("date overflow");
        Self { start, end }
    }

    /// Days until expiry. Negative once the window has passed.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.end - today).num_days()
    }

    /// The window expires at the end of its last day, so `end` itself is
    /// still inside the trial.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        today > self.end
    }
}

/// Snapshot of an account's trial/subscription standing on a given day.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialStatus {
    pub window: Option<TrialWindow>,
    pub days_left: i64,
    pub expired: bool,
    pub subscription: SubscriptionState,
}

impl TrialStatus {
    /// Evaluate an account against a calendar day.
    ///
    /// An account that never started a trial is neither expired nor
    /// counting down; gating for it is purely a subscription question.
    pub fn evaluate(
        trial_start: Option<NaiveDate>,
        subscription: SubscriptionState,
        today: NaiveDate,
    ) -> Self {
        match trial_start {
            None => Self {
                window: None,
                days_left: 0,
                expired: false,
                subscription,
            },
            Some(start) => {
                let window = TrialWindow::from_start(start);
                Self {
                    days_left: window.days_left(today),
                    expired: window.is_expired(today),
                    window: Some(window),
                    subscription,
                }
            }
        }
    }
}

/// Banner text shown on the dashboard.
pub fn status_message(status: &TrialStatus) -> String {
    if let SubscriptionState::Active { plan } = &status.subscription {
        return format!("You have an active {plan} subscription.");
    }

    match &status.window {
        None => "You have not started your free trial yet.".to_string(),
        Some(_) if status.expired => {
            "Your free trial has expired. Please subscribe to continue.".to_string()
        }
        Some(_) => format!(
            "Your free trial expires in {} day{}.",
            status.days_left,
            if status.days_left == 1 { "" } else { "s" }
        ),
    }
}

/// True when the account must be sent to the subscription page.
pub fn requires_subscription(status: &TrialStatus) -> bool {
    status.expired && !matches!(status.subscription, SubscriptionState::Active { .. })
}
