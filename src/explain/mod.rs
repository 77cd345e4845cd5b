//! On-demand explanation of the illusion
//!
//! The request/response shapes and the panel state machine are plain data,
//! so the whole flow is testable off-browser. Only `transport` talks to the
//! network, and only on wasm32.

pub mod markup;
pub mod panel;
pub mod request;
#[cfg(target_arch = "wasm32")]
pub mod transport;

pub use markup::{Span, parse as parse_markup};
pub use panel::{Explanation, ExplanationPanel, PanelState, ToggleAction};
pub use request::{ExplanationError, ExplanationRequest, extract_text};
#[cfg(target_arch = "wasm32")]
pub use transport::fetch_explanation;
