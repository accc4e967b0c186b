//! Depindex - a network package index that enforces dependency integrity.
//!
//! A package can only be indexed once all of its dependencies are indexed,
//! and cannot be removed while other packages depend on it. Clients talk to
//! the server over a line-oriented TCP protocol (see [`depindex_wire`]).
//!
//! This crate provides both the `depindex` server binary and a library
//! exposing the index, request dispatch and server.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod index;
pub mod server;

// Public CLI module (needed by binary)
pub mod cli;

pub mod config;
