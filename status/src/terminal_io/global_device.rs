// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The process-global default output device. The convenience print functions in
//! [`crate::public_api`] resolve this slot on every call, which is what lets the
//! stdout-suppression scope ([`crate::MutedOutput`]) redirect them wholesale: it swaps
//! a null-sink device in and restores the previous device when dropped.
//!
//! This is deliberate process-wide mutable state with strict acquire/restore
//! discipline. Swapping from multiple threads at once interleaves acquire/restore
//! pairs in an unspecified order, so treat redirection as single-threaded-use only.

use std::sync::LazyLock;

use crate::{OutputDevice, StdMutex};

static GLOBAL_OUTPUT_DEVICE: LazyLock<StdMutex<OutputDevice>> =
    LazyLock::new(|| StdMutex::new(OutputDevice::new_stdout()));

/// Returns a clone of the current process-global output device (an `Arc` handle, so
/// clones write to the same destination).
///
/// # Panics
///
/// Panics if the slot's mutex is poisoned.
#[must_use]
pub fn global_output_device() -> OutputDevice {
    GLOBAL_OUTPUT_DEVICE.lock().unwrap().clone()
}

/// Replaces the process-global output device, returning the device that was installed
/// before. Callers that swap must restore the returned device when they are done;
/// [`crate::MutedOutput`] does this on drop.
///
/// # Panics
///
/// Panics if the slot's mutex is poisoned.
pub fn set_global_output_device(device: OutputDevice) -> OutputDevice {
    let mut slot = GLOBAL_OUTPUT_DEVICE.lock().unwrap();
    std::mem::replace(&mut *slot, device)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use serial_test::serial;

    use super::{global_output_device, set_global_output_device};
    use crate::{OutputDevice, OutputDeviceExt};

    #[serial]
    #[test]
    fn test_swap_and_restore_global_device() {
        let (mock_device, mock) = OutputDevice::new_mock();
        let prev = set_global_output_device(mock_device);

        {
            let device = global_output_device();
            let mut_ref = crate::lock_output_device_as_mut!(device);
            mut_ref.write_all(b"captured\n").expect("mock never fails");
        }
        assert_eq!(mock.get_copy_of_buffer_as_string(), "captured\n");

        set_global_output_device(prev);
    }
}
