//! Feedback board library.
//!
//! A server-rendered feedback board: visitors browse a project's posts,
//! filter, sort and search them, vote, and submit new ideas. Data comes from
//! a hosted PostgREST-style service or a local SQLite database.

#![allow(clippy::needless_raw_string_hashes)]

pub mod backend;
pub mod board;
pub mod components;
pub mod config;
pub mod web;
