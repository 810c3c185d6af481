//! Business logic services
//!
//! Services encapsulate business logic and coordinate between the
//! repositories and the auth collaborators.

pub mod user;

pub use user::UserService;
