//! Authentication use cases
//!
//! Thin wrappers over the identity port used by the auth screens. Local
//! form validation (password confirmation and the like) stays in the UI
//! layer; these use cases forward to the provider and log the outcome.

pub mod reset_password;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

pub use reset_password::RequestPasswordReset;
pub use sign_in::SignIn;
pub use sign_out::SignOut;
pub use sign_up::SignUp;
