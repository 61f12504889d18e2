// handlers/public - token acquisition endpoints that do not require authentication

pub mod accounts;
pub mod drawers;
