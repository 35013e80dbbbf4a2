//! Request processing shared by all controllers.

pub mod auth;
pub mod correlation;
pub mod session;

#[cfg(test)]
mod test;
