//! Shared helpers for the benchmark binaries.

#![allow(dead_code)]

pub mod workload;
