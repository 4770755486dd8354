//! Terminal dashboard comparing three predetermined evacuation strategies
//! over a fixed road network.

pub mod app;
pub mod braille;
pub mod config;
pub mod export;
pub mod map;
pub mod report;
pub mod scenario;
pub mod selection;
pub mod ui;
