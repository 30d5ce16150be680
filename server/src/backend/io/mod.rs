//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. The REST
//! API lives in [`rest`]; it owns request parsing, DTO mapping and the
//! translation of domain errors to status codes.

pub mod rest;
