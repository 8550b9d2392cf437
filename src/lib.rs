//! Bridge a flat, index-referenced interchange type graph into a shared,
//! possibly cyclic native type representation.
//!
//! The producer (an external schema-inference tool) serializes its type graph
//! with composite types in one positional table and every reference expressed
//! as an index, so cyclic graphs travel as acyclic JSON. This crate rebuilds
//! the real graph:
//!
//! - allocate one shared shell per composite slot (identity = table index),
//! - fill every shell's properties against the finished table,
//! - resolve the named top-level types.
//!
//! Self- and mutual references work because any reference to slot `i` yields
//! the same shared node whether or not that node is filled yet. The only
//! failure mode is a reference to a slot that does not exist.

pub mod cli;
pub mod emit;
pub mod import;
pub mod interchange;
pub mod path_de;
pub mod ty;
