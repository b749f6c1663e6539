//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain services. Handlers parse
//! requests, call a service, and translate the outcome into a status code and
//! JSON body.

pub mod rest;
