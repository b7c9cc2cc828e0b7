//! Emergence Scenarios
//!
//! Scenario management for the emergence risk calculator.
//!
//! # Architecture
//!
//! - **Scenario**: a named configuration with a stable id
//! - **Lists**: the pinned compare list (max 8) and the saved list (max 20)
//! - **Store**: where the saved list lives between sessions
//! - **Codec**: the full state as a shareable query string
//! - **Session**: ties the above together and derives series and metrics
//!
//! Untrusted input (store contents, share links) is sanitized field by field
//! at the boundary and never rejected wholesale.
//!
//! # Usage
//!
//! ```
//! use emergence_scenarios::{MemoryStore, Session};
//!
//! let mut session = Session::from_share_query(MemoryStore::new(), "n=50&a=7&k=4&t=hub");
//! session.pin_current(Some("Hub, 50 agents"));
//! let link = session.share_query();
//! assert!(link.starts_with("n=50&a=7&k=4&t=hub&sc="));
//! ```

mod codec;
mod error;
mod lists;
mod scenario;
mod session;
mod store;

pub use codec::{
    decode, decode_compare_payload, encode, encode_compare_payload, SharedState, PARAM_AGENTS,
    PARAM_AUTONOMY, PARAM_CAP, PARAM_COMPARE, PARAM_TOPOLOGY,
};
pub use error::{Error, Result};
pub use lists::{apply, CompareList, SavedList, COMPARE_CAP, SAVED_CAP};
pub use scenario::{
    compare_default_name, fresh_id, is_valid_id, sanitize_scenario, sanitize_scenarios, Scenario,
    SAVED_DEFAULT_NAME,
};
pub use session::Session;
pub use store::{parse_saved, JsonFileStore, MemoryStore, ScenarioStore};
