//! Domain model for homework records.
//!
//! # Responsibility
//! - Define the record shape shared by storage, API and client layers.
//!
//! # Invariants
//! - Every record is identified by a storage-assigned `HomeworkId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod homework;
