//! # plazo
//!
//! Heuristic extraction of actionable deadlines and responsible parties from
//! free-form Spanish office memos, to auto-populate calendar reminders.
//!
//! ## Architecture
//!
//! - **Date handling** (`dates`): strict and fuzzy parsing, offset-aware
//!   scanning over lower-cased text
//! - **Cue scanning** (`cues`): keyword vocabulary, responsible party,
//!   subject line, action classification — all data-driven pattern tables
//! - **Deadline resolution** (`resolve`): cue-proximity disambiguation with
//!   a grace-period fallback, plus the agenda (reminder) schedule
//! - **NER fallback** (`ner`): optional model-backed extraction that degrades
//!   to "missing model" when no model is available
//! - **Glue** (`pdf`, `event`): PDF text in, calendar-event spec out
//!
//! Outputs are heuristic and provisional; a human confirms them before any
//! event is scheduled.
//!
//! ## Library usage
//!
//! ```
//! use plazo::analyze::Analyzer;
//!
//! let analyzer = Analyzer::with_defaults();
//! let analysis = analyzer.analyze(
//!     "memo.pdf",
//!     "Asunto: Informe anual\nEntregar hasta el 15/03/2026.",
//! );
//! assert!(analysis.detected.is_some());
//! ```

pub mod analyze;
pub mod config;
pub mod cues;
pub mod dates;
pub mod error;
pub mod event;
pub mod ner;
pub mod pdf;
pub mod resolve;
