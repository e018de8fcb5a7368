// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use miette::{WrapErr as _, miette};
use r3bl_status::{CHECKMARK, FAILMARK, FailurePolicy, MutedOutput, OutputDevice,
                  PendingTask, StatusKind, TICK_DELAY_UNIT, ThresholdColors,
                  format_number_by_threshold, print_bullet, print_chunk, print_debug,
                  print_error, print_info, print_ok, print_warning};

#[tokio::main]
pub async fn main() -> miette::Result<()> {
    println!("-------------> One-shot status lines <-------------");
    print_ok("repo is clean");
    print_warning("3 dependencies are yanked");
    print_error("release build failed");
    print_info("retrying with the previous toolchain");
    print_debug("cache key = a1b2c3");
    print_bullet("see the build log for details");

    println!("-------------> Marks & threshold-colored numbers <-------------");
    println!("{}payload verified", *CHECKMARK);
    println!("{}signature mismatch", *FAILMARK);
    let delta = format_number_by_threshold(
        -3.21,
        0.0,
        ThresholdColors::default(),
        Some(1),
        true,
    );
    print_info(&format!("benchmark delta: {delta}%"));

    println!("-------------> Chunked status block <-------------");
    print_chunk(StatusKind::Info, &[
        "downloading manifests",
        "resolving versions",
        "done in 1.2s",
    ]);

    println!("-------------> Muted scope <-------------");
    {
        let _mute = MutedOutput::new();
        print_ok("you will never see this line");
    }
    print_ok("output restored");

    println!("-------------> Busy indicator: success <-------------");
    example_scope_that_succeeds().await?;

    println!("-------------> Busy indicator: failure (report swallowed) <-------------");
    example_scope_that_fails().await?;

    Ok(())
}

async fn example_scope_that_succeeds() -> miette::Result<()> {
    let task = PendingTask::try_new(
        "syncing index",
        Some("dots"),
        Some(3),
        TICK_DELAY_UNIT,
        OutputDevice::new_stdout(),
    )?;

    let outcome = task
        .run_scope(FailurePolicy::default(), |handle| async move {
            for step in 1..=3u64 {
                tokio::time::sleep(Duration::from_millis(600)).await;
                handle.update_progress(step)?;
            }
            handle.update("syncing index: finalizing")?;
            tokio::time::sleep(Duration::from_millis(600)).await;
            Ok("synced")
        })
        .await?;

    print_bullet(&format!("scope returned: {outcome:?}"));
    Ok(())
}

async fn example_scope_that_fails() -> miette::Result<()> {
    let task = PendingTask::try_new(
        "connecting to 127.0.0.1:8000",
        Some("arrow"),
        None,
        TICK_DELAY_UNIT,
        OutputDevice::new_stdout(),
    )?;

    // With the default policy the failure is rendered, then swallowed: this function
    // still returns Ok.
    let outcome: Option<()> = task
        .run_scope(FailurePolicy::default(), |_handle| async {
            tokio::time::sleep(Duration::from_millis(1_800)).await;
            Err(miette!("timeout")).wrap_err("handshake failed")
        })
        .await?;

    print_bullet(&format!("scope returned: {outcome:?}"));
    Ok(())
}
