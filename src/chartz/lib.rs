//! # Chartz Architecture
//!
//! Chartz is a **UI-agnostic chart-metadata editing library**. This is not a
//! CLI application that happens to have some library code—it's a library
//! that happens to have a CLI client.
//!
//! The domain: a Trombone Champ charts directory holds one subdirectory per
//! custom chart, each with a `song.tmb` JSON document. Chartz projects those
//! documents through a typed column schema into a table, stages validated
//! cell edits in memory, and writes only the changed fields back—leaving
//! every unknown field in every document untouched.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, renders tables, prints messages        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the loaded batch, the edit session, the sort state  │
//! │  - Dispatches to commands, returns structured Results       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (columns/, session.rs, rows.rs, commands/, report)  │
//! │  - Schema, coercion, staging, sorting, reconciliation       │
//! │  - Pure request/response; no widget or terminal references  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract ChartStore trait                                │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Errors Are Data
//!
//! Per-chart problems—a directory without a `song.tmb`, a file that isn't
//! valid JSON, a write that fails mid-flush—are collected into lists and
//! reported in aggregate, once per batch operation, in a deterministic
//! order. Nothing unwinds past the batch. Only two things are fatal: an
//! unreadable charts root, and programmer errors.
//!
//! ## Key Principle: Stage, Then Reconcile
//!
//! Editing never mutates a loaded chart. Edits accumulate in an
//! [`session::EditSession`] keyed by (chart id, column); a flush re-reads
//! each dirty chart's document from disk, merges the staged edits onto it,
//! and writes the whole document back. Charts that fail stay dirty for a
//! retry; charts that persist are cleared. One chart's failure never rolls
//! back another's success.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`columns`]: The typed column schema and text coercion
//! - [`session`]: Pending-edit staging
//! - [`rows`]: Row projection and sorting
//! - [`commands`]: Business logic for each operation
//! - [`report`]: Deterministic error aggregation
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Chart`, `ScanResult`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod columns;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod rows;
pub mod session;
pub mod store;
