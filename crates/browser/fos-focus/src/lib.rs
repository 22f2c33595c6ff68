//! fOS Focus
//!
//! Focus and visibility management for modal dialogs and toasts.
//!
//! Features:
//! - Tabbable element detection
//! - Focus traps with nested-scope support and focus restoration
//! - Hiding background content from assistive technology
//! - Persistent live regions for announcements
//! - Native sequential (Tab) navigation for hosts without a user agent
//!
//! A dialog opens by hiding its siblings and starting a trap; it closes by
//! releasing the trap and then restoring the hidden siblings:
//!
//! ```rust,ignore
//! let mut hidden = hide_siblings(&mut doc, dialog);
//! let mut trap = FocusTrap::start(&mut doc, dialog, TrapOptions::default());
//! // ...
//! trap.release(&mut doc);
//! hidden.restore(&mut doc);
//! ```

pub mod config;
pub mod hider;
pub mod keyboard;
pub mod live_region;
pub mod tabbable;
pub mod trap;

pub use config::FocusConfig;
pub use hider::{hide_siblings, HiddenSibling, HideSession, ARIA_HIDDEN};
pub use keyboard::{press_key, press_shift_tab, press_tab, sequential_navigation};
pub use live_region::{LiveRegionKind, LiveRegions};
pub use tabbable::{is_tabbable, is_visible, list_tabbables, parse_tab_index, tab_index, TabbableElement};
pub use trap::{focus_first, FocusTrap, RestoreFocus, TrapOptions};

/// Focus subsystem error
///
/// Runtime focus and attribute failures are never errors; only
/// configuration is validated.
#[derive(Debug, thiserror::Error)]
pub enum FocusError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
