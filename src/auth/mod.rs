mod auth_status;
mod run;
mod sign_in;

pub use auth_status::{check_auth_status, AuthStatus, AuthStatusReport};
pub use run::{run_auth_status, run_sign_in};
pub use sign_in::{
    sign_in, verify_sign_in, SignInOutcome, SignInReport, SignedInUser, NEXT_STEPS,
    SIGN_IN_WARNING,
};
