//! Core library for gamma
//!
//! This crate implements the **Functional Core** of the gamma quiz generator,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! gamma uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`gamma_core`** (this crate): prompt construction, response extraction,
//!   structural checks and project folder access
//! - **`gamma`**: subprocesses, HTTP, the web server and the CLI (the Imperative Shell)
//!
//! Nothing in this crate spawns a process or opens a socket. Backend output is
//! handed in as plain strings, which keeps every transformation testable with
//! fixed canned text.
//!
//! # Module Organization
//!
//! - [`quiz`]: prompt template, GML block extraction, schema check, upload cleanup
//! - [`backend`]: backend selection, CLI argument shaping, API request/response types
//! - [`project`]: object folder listing and event file writes
//!
//! # Example Usage
//!
//! ```rust
//! use gamma_core::quiz::{build_prompt, extract_gml, Difficulty, QuizRequest};
//!
//! let prompt = build_prompt(&QuizRequest {
//!     topic: "Volcanoes".to_string(),
//!     difficulty: Difficulty::Easy,
//! });
//! assert!(prompt.contains("Volcanoes"));
//!
//! let extraction = extract_gml("Here you go:\nquestions = [];\nsoundwrong = -1;\nBye");
//! assert!(extraction.matched);
//! assert_eq!(extraction.code, "questions = [];\nsoundwrong = -1;");
//! ```

pub mod backend;
pub mod project;
pub mod quiz;
