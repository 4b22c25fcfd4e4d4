// src/lib.rs
//
// bubblecmp: reshapes wide financial-metric spreadsheets into tidy
// per-company/per-year panels and renders charts comparing
// valuation-to-revenue ratios across the dot-com and AI eras.

pub mod analysis;
pub mod chart;
pub mod cohort;
pub mod export;
pub mod ingest;
pub mod panel;
pub mod report;
