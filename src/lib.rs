// src/lib.rs

//! codecorpus Crawler Library

pub mod corpus;
pub mod error;
pub mod frontier;
pub mod models;
pub mod pipeline;
pub mod progress;
pub mod services;
pub mod storage;
pub mod utils;
