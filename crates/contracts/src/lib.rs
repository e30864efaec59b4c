//! Shared wire types of the catalog admin application: aggregates, DTOs,
//! the response envelope and validation used by both server and client.

pub mod domain;
pub mod shared;
pub mod system;
