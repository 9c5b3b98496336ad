//! The selector capability.

use bidsync_core::Resource;

/// A UI-facing capability that can be kept in sync with resource state.
///
/// Any fragment implementing these three operations (a dropdown, a tab
/// strip, a wizard step) may register with the synchronizer. Fan-out runs
/// in registration order, and `set_value` is guaranteed to have reached
/// every registered selector before the triggering call returns.
pub trait Selector {
    /// Replace the selector's option list with the given resources.
    fn load_options(&mut self, resources: &[Resource]);

    /// Set the selector's current value; `None` clears it.
    fn set_value(&mut self, id: Option<&str>);

    /// The selector's current value.
    fn get_value(&self) -> Option<String>;
}
