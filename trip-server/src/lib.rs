//! Trip planner server.
//!
//! Loads a set of travel deals and answers: "what is the fastest, or the
//! cheapest, way to get from here to there?"

pub mod cache;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod graph;
pub mod planner;
pub mod web;
