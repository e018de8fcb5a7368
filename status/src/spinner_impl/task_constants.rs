// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

/// Default tick interval for the background redraw loop. This also bounds how long
/// scope exit waits for the ticker to observe the stop signal.
pub const TICK_DELAY_MS: u64 = 300;
pub const TICK_DELAY_UNIT: Duration = Duration::from_millis(TICK_DELAY_MS);
