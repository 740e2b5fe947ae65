#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! A contact form whose submit path can be configured to fail silently.
//!
//! The core is a pure validation engine ([`model::validate`]) and a
//! submission state machine ([`submit::SubmissionController`]) with two
//! policy switches that reproduce the two classic "nothing happens when I
//! click submit" defect classes: suppressed validation errors and
//! swallowed network failures. The TUI in [`tui`] is a thin driver.

pub mod model;
pub mod submit;
pub mod tui;
