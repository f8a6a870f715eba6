//! Credential handling. Only password hashing lives here: the API itself is
//! fully open and performs no authentication.

pub mod password;
