pub mod messages;
pub mod rooms;
pub mod search;
pub mod users;

#[cfg(test)]
pub(crate) mod testutil;
