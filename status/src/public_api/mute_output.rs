// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{OutputDevice, set_global_output_device};

/// Scoped suppression of the process-global output device: while an instance of this
/// guard is alive, the global device is a null sink, so everything routed through the
/// convenience print functions (and any task built on [`crate::global_output_device`])
/// is swallowed. Dropping the guard restores the previous device unconditionally,
/// including during a panic unwind, since restore happens in [`Drop`].
///
/// This redirection is process-wide mutable state. Guards from multiple threads
/// interleave their acquire/restore pairs in an unspecified order, so only use this
/// from one thread at a time.
///
/// ```
/// use r3bl_status::{MutedOutput, print_info};
/// {
///     let _mute = MutedOutput::new();
///     print_info("nobody sees this");
/// } // Previous device restored here.
/// print_info("back to normal");
/// ```
#[allow(missing_debug_implementations)]
pub struct MutedOutput {
    prev_device: Option<OutputDevice>,
}

impl MutedOutput {
    #[must_use]
    pub fn new() -> Self {
        let prev_device = set_global_output_device(OutputDevice::new_null());
        Self {
            prev_device: Some(prev_device),
        }
    }
}

impl Default for MutedOutput {
    fn default() -> Self { Self::new() }
}

impl Drop for MutedOutput {
    fn drop(&mut self) {
        if let Some(prev_device) = self.prev_device.take() {
            set_global_output_device(prev_device);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    use super::MutedOutput;
    use crate::{OutputDevice, OutputDeviceExt, print_ok, set_global_output_device};

    #[serial]
    #[test]
    fn test_muted_scope_swallows_prints_and_restores_on_drop() {
        let (mock_device, mock) = OutputDevice::new_mock();
        let prev = set_global_output_device(mock_device);

        print_ok("before");
        {
            let _mute = MutedOutput::new();
            print_ok("while muted");
        }
        print_ok("after");

        let output = mock.get_copy_of_buffer_as_string_strip_ansi();
        assert_eq!(output, "[OKAY] before\n[OKAY] after\n");

        set_global_output_device(prev);
    }

    #[serial]
    #[test]
    fn test_restore_happens_even_on_panic_unwind() {
        let (mock_device, mock) = OutputDevice::new_mock();
        let prev = set_global_output_device(mock_device);

        let unwind_result = std::panic::catch_unwind(|| {
            let _mute = MutedOutput::new();
            panic!("boom");
        });
        assert!(unwind_result.is_err());

        print_ok("recovered");
        let output = mock.get_copy_of_buffer_as_string_strip_ansi();
        assert_eq!(output, "[OKAY] recovered\n");

        set_global_output_device(prev);
    }
}
