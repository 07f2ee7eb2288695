//! Core library for funnelcoach
//!
//! This crate is the **Functional Core** of funnelcoach. The `funnelcoach`
//! binary is the Imperative Shell: it reads transcripts, talks HTTP, runs the
//! spinner and prints. Everything here is pure.
//!
//! # Module Organization
//!
//! - [`analysis`]: request validation, response interpretation and model reply classification
//! - [`carousel`]: index arithmetic for the rotating tips shown during a request
//! - [`prompt`]: coaching prompt construction
//! - [`report`]: parsing the plain-text analysis report and rendering it as HTML
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use funnelcoach_core::report::{parse_report, render_html};
//!
//! let document = parse_report("Final Score: 88/100 (Strong)\nCoaching tips:\nAsk \"why?\"")?;
//! assert!(document.score().is_some());
//!
//! let html = render_html(&document);
//! assert!(html.contains("<code>why?</code>"));
//! ```

pub mod analysis;
pub mod carousel;
pub mod prompt;
pub mod report;
