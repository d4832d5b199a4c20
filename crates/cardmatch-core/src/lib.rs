//! cardmatch Core Library
//!
//! Core domain logic for cardmatch: scoring candidate cards against project
//! requirements, searching for qualifying teams, and committing assignments
//! under transactional invariants.

pub mod assignment;
pub mod config;
pub mod db;
pub mod error;
pub mod lock;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod scoring;
pub mod search;
pub mod store;
