//! SQLite row access. Functions take any executor so callers can run them
//! on the pool or inside a transaction.

pub mod products;
pub mod users;
