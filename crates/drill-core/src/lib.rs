//! # drill-core
//!
//! Core types shared by every drill crate:
//! - Entity structs for points and their persisted metadata records
//! - Session outcome enum and the per-session outcome ledger
//! - The scheduler that filters and orders the study queue
//! - Identifier helpers for the metadata store keys
//! - CLI response types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod scheduler;
pub mod session;
