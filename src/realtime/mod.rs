pub mod broadcaster;
pub mod events;
pub mod session;
pub mod socket;
