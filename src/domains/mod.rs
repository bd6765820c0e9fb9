//! Domains module containing business logic organized by bounded contexts.
//!
//! The server currently has a single domain, `tools`: named operations that
//! MCP clients invoke and that mostly delegate to external processes.

pub mod tools;
