//! In-memory roster of students and the courses they are enrolled in.

mod seed;
mod store;
pub mod types;

pub use store::{Roster, RosterApi};
pub use types::{Course, Rejection, Student};
