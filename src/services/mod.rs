pub mod cleanup;
pub mod reservations;
pub mod users;
