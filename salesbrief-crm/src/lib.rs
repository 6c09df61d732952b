//! # salesbrief-crm
//!
//! Salesforce REST access for the salesbrief pipeline.
//!
//! ## Overview
//!
//! - [`CrmClient`] - Authenticated query client (`query_all` follows
//!   `nextRecordsUrl` until every page is collected)
//! - [`CrmConfig`] / [`CrmAuth`] - Connection settings from `SALESFORCE_*`
//!   environment variables, token or username-password auth
//! - [`Opportunity`] / [`format_summary`] - Typed records and the fixed
//!   text summary contract
//! - [`FetchOpportunitiesTool`] - The fetch capability handed to the
//!   analyst stage

pub mod client;
pub mod config;
pub mod records;
pub mod tool;

pub use client::CrmClient;
pub use config::{API_VERSION, CrmAuth, CrmConfig, LOGIN_URL};
pub use records::{
    AccountRef, NO_OPPORTUNITIES, OPPORTUNITY_QUERY, Opportunity, QueryResponse, QueryResult,
    format_summary,
};
pub use tool::{FETCH_TOOL_NAME, FetchOpportunitiesTool};
