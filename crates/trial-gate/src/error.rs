use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TrialGateError {
    #[error("Registration limit reached. Maximum {0} patients allowed.")]
    RegistrationLimitReached(u32),
}
