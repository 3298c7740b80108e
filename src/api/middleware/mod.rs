//! Request middleware for the analysis API.

pub mod audit;
