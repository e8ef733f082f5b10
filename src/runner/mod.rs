//! Operation runners
//!
//! Each runner drives the common state machine: login, a send or
//! receive loop, then a best-effort logout. An error anywhere
//! short-circuits the loop but never skips the logout.

mod receive;
mod send;

pub use receive::ReceiveRunner;
pub use send::SendRunner;
