use std::fmt;

use super::ContentGuard;

/// Handler for text input change events.
///
/// Created by [`ContentGuard::create_input_handler`]. Each change is checked
/// once the filter is ready; with `auto_replace` enabled, invalid input is
/// masked in place before being forwarded.
pub struct InputHandler<'g, F> {
    guard: &'g ContentGuard,
    on_change: F,
}

impl<'g, F> InputHandler<'g, F>
where
    F: Fn(&str),
{
    pub(crate) fn new(guard: &'g ContentGuard, on_change: F) -> Self {
        Self { guard, on_change }
    }

    /// Handle a new input value, masking it in place when configured to
    pub fn handle(&self, value: &mut String) {
        if !self.guard.is_ready() {
            (self.on_change)(value);
            return;
        }

        let result = self.guard.check_text(value);
        if self.guard.options().auto_replace && !result.is_valid {
            *value = self.guard.replace_text(value);
        }
        (self.on_change)(value);
    }
}

impl<F> fmt::Debug for InputHandler<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputHandler")
            .field("guard", self.guard)
            .finish()
    }
}
