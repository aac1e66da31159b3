//! To-do List Manager
//!
//! A server-rendered web application for managing named to-do lists. Lists
//! live either in the visitor's session or in a shared `PostgreSQL`
//! database, selected at startup.

pub mod api;
pub mod domain;
pub mod infrastructure;
