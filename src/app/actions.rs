//! Side effects produced by the event handler.
//!
//! The handler never touches the host. It returns actions and the plugin
//! runtime in `main.rs` executes them in order.

use super::coordinator::OutboundQuery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sends a query to the provider via `web_request`.
    ///
    /// The sequence number travels in the request context so the result can
    /// be matched against the coordinator.
    IssueQuery(OutboundQuery),

    /// Hides the plugin pane.
    CloseFocus,
}
