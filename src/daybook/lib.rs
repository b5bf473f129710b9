//! # Daybook Architecture
//!
//! Daybook is a **UI-agnostic journaling library**. This is not a CLI
//! application that happens to have some library code—it's a library that
//! happens to have a CLI client.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Carries collaborators (analysis, document builder)       │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract EntryStore trait                                │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! │  - The single codec + mutation-gate boundary                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//! - **Never** assumes a terminal environment
//!
//! Diagnostics go through the `log` facade; the binary decides where they
//! land.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Entry`, `Mood`, `Tag`)
//! - [`codec`]: At-rest content obfuscation boundary
//! - [`passkey`]: Store-wide and per-entry gates
//! - [`markup`]: Markdown-subset formatter (placeholder substitution)
//! - [`document`]: Paginated document assembly
//! - [`analysis`]: Sentiment/keyword collaborator seams
//! - [`config`]: Configuration management
//! - [`logging`]: File-logger bootstrap for the binary
//! - [`error`]: Error types

pub mod analysis;
pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod markup;
pub mod model;
pub mod passkey;
pub mod store;
