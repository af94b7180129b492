//! PNL Tools module
//!
//! Tool implementations behind the MCP server.

pub mod foods;
pub mod status;
pub mod tracking;
