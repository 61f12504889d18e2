// handlers/protected - endpoints behind the bearer-token middleware

pub mod notes;
pub mod whoami;

pub use whoami::whoami;
