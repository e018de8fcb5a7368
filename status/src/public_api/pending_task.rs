// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::Write as _, sync::Arc, time::Duration};

use tokio::{sync::{broadcast, oneshot},
            time::interval};

use crate::{AnimationTemplate, FailureReport, FrameCycle, OutputDevice, SafeTaskStatus,
            StatusError, StatusKind, StdMutex, TaskState, TaskStatus,
            get_display_width, print_final_tick, print_pending_tick,
            render_final_tick, render_pending_tick};

/// `PendingTask` keeps a continuously updating "in progress" line on screen for the
/// duration of an enclosing operation, then replaces it with a terminal DONE/FAIL
/// status line.
///
/// While the task is [`TaskState::Running`], a background tokio task (the ticker)
/// owns all writes to the in-progress line: on every tick it repaints the line in
/// place: unconditionally when an animation is configured (the moving glyph needs
/// it), otherwise only when an update raised the dirty flag since the last tick, so
/// rapid updates coalesce into a single repaint. The owner mutates the description
/// and progress only through [`Self::update`] / [`Self::update_progress`], and owns
/// the single write of the final line.
///
/// Scope exit ([`Self::complete`] / [`Self::fail`]) stops the ticker over a broadcast
/// channel and then blocks on a oneshot until the ticker has fully exited (bounded
/// by one tick interval), so a stale in-progress repaint can never clobber the final
/// line. Both consume the task: `Completed` and `Failed` are terminal states.
///
/// Multiple tasks may be active at once on different operations; their writes to a
/// shared device are not serialized against each other, so interleaving across
/// independent instances is unspecified.
///
/// # Usage example
///
/// ```
/// use std::time::Duration;
/// use r3bl_status::{OutputDevice, PendingTask};
/// # async fn example() -> miette::Result<()> {
/// let mut task = PendingTask::try_new(
///     "loading",
///     Some("dots"),
///     Some(3),
///     Duration::from_millis(300),
///     OutputDevice::new_stdout(),
/// )?;
/// task.start()?;
///
/// // Some work happens here...
/// task.update_progress(1)?;
/// task.update("loading: manifests")?;
///
/// // Stop the ticker, wait for it to fully exit, paint the final DONE line.
/// task.complete().await?;
/// # Ok(())
/// # }
/// ```
pub struct PendingTask {
    pub tick_delay: Duration,
    pub maybe_animation: Option<AnimationTemplate>,
    pub output_device: OutputDevice,
    safe_status: SafeTaskStatus,
    shutdown_sender: broadcast::Sender<()>,
    /// This is used to observe when the ticker has completely exited. Consumed by
    /// scope exit.
    maybe_shutdown_complete_rx: Option<oneshot::Receiver<()>>,
}

impl std::fmt::Debug for PendingTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTask")
            .field("tick_delay", &self.tick_delay)
            .field("maybe_animation", &self.maybe_animation)
            .field("is_mock", &self.output_device.is_mock)
            .field("safe_status", &self.safe_status)
            .field(
                "maybe_shutdown_complete_rx",
                &self.maybe_shutdown_complete_rx.is_some(),
            )
            .finish()
    }
}

/// What a scope does with a failure after rendering its report. See
/// [`PendingTask::run_scope`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Render the report, then swallow the failure: the scope returns `Ok(None)` and
    /// the caller never sees the error. This mirrors the behavior this crate
    /// inherited, and it is a correctness hazard when the caller needs to know the
    /// operation failed; reach for [`FailurePolicy::ReportAndPropagate`] in that
    /// case.
    #[default]
    Report,
    /// Render the report, then re-raise the failure to the caller.
    ReportAndPropagate,
}

impl PendingTask {
    /// Create a new task in the [`TaskState::Idle`] state. Nothing is painted and no
    /// ticker exists until [`Self::start`] is called.
    ///
    /// If `arg_description` contains ANSI escape sequences then these will be
    /// stripped (they would corrupt the repaint-in-place arithmetic).
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::UnknownAnimation`] if `maybe_animation_name` is not a
    /// registered animation name. This is checked here, synchronously, before any
    /// background work starts.
    pub fn try_new(
        arg_description: impl AsRef<str>,
        maybe_animation_name: Option<&str>,
        maybe_total_count: Option<u64>,
        tick_delay: Duration,
        output_device: OutputDevice,
    ) -> miette::Result<PendingTask> {
        let maybe_animation = match maybe_animation_name {
            Some(name) => Some(AnimationTemplate::lookup(name)?),
            None => None,
        };

        let description = sanitize_message(arg_description.as_ref());

        // Shutdown broadcast channel.
        let (shutdown_sender, _) = broadcast::channel::<()>(1);

        Ok(PendingTask {
            tick_delay,
            maybe_animation,
            output_device,
            safe_status: Arc::new(StdMutex::new(TaskStatus::new(
                description,
                maybe_total_count,
            ))),
            shutdown_sender,
            maybe_shutdown_complete_rx: None,
        })
    }

    /// Current lifecycle state.
    ///
    /// # Panics
    ///
    /// Panics if the status mutex is poisoned.
    #[must_use]
    pub fn state(&self) -> TaskState { self.safe_status.lock().unwrap().state }

    /// Returns a cloneable handle that can drive [`Self::update`] /
    /// [`Self::update_progress`] from inside a scope body while the task itself is
    /// held by the scope runner.
    #[must_use]
    pub fn handle(&self) -> PendingTaskHandle {
        PendingTaskHandle {
            safe_status: self.safe_status.clone(),
        }
    }

    /// Scope entry: transition [`TaskState::Idle`] → [`TaskState::Running`] and spawn
    /// the ticker. Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::AlreadyStarted`] if the task is not `Idle`; a task is
    /// not reusable after it has run.
    ///
    /// # Panics
    ///
    /// Panics if the status mutex is poisoned.
    pub fn start(&mut self) -> miette::Result<()> {
        {
            let mut status = self.safe_status.lock().unwrap();
            if status.state != TaskState::Idle {
                return Err(StatusError::AlreadyStarted(status.state).into());
            }
            status.state = TaskState::Running;
            status.dirty = true;
        }

        tracing::debug!(
            animation = ?self.maybe_animation,
            tick_delay = ?self.tick_delay,
            "PendingTask: start ticker"
        );

        self.spawn_ticker();

        Ok(())
    }

    /// Replace the displayed description. Takes effect on the next tick; there is no
    /// synchronous repaint.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::NotRunning`] unless the task is `Running`.
    pub fn update(&self, arg_description: impl AsRef<str>) -> miette::Result<()> {
        try_update_description(&self.safe_status, arg_description)
    }

    /// Update the numerator of the `(current/total)` suffix. Takes effect on the next
    /// tick.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::NotRunning`] unless the task is `Running`, and
    /// [`StatusError::ProgressNotConfigured`] if the task was built without a total
    /// count.
    pub fn update_progress(&self, value: u64) -> miette::Result<()> {
        try_update_progress(&self.safe_status, value)
    }

    /// Scope exit without failure: stop the ticker, wait for it to fully exit, then
    /// paint one DONE line with the final description.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::NotRunning`] unless the task is `Running`; propagates
    /// terminal write errors from painting the final line.
    pub async fn complete(mut self) -> miette::Result<()> {
        self.finish(TaskState::Completed, None).await
    }

    /// Scope exit with failure: stop the ticker, wait for it to fully exit, then
    /// paint one FAIL line with the final description followed by the structured
    /// failure report (one FAIL `ERROR` line, then one BULLET line per cause frame,
    /// oldest first).
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::NotRunning`] unless the task is `Running`; propagates
    /// terminal write errors from painting the final lines.
    pub async fn fail(mut self, failure: &FailureReport) -> miette::Result<()> {
        self.finish(TaskState::Failed, Some(failure)).await
    }

    /// Run a fallible async body inside this task's scope: start, hand the body a
    /// [`PendingTaskHandle`], then complete or fail based on the body's result. On
    /// failure the report is rendered and `policy` decides whether the error
    /// re-raises to the caller ([`FailurePolicy::ReportAndPropagate`]) or is
    /// swallowed, returning `Ok(None)` ([`FailurePolicy::Report`], the default).
    ///
    /// # Errors
    ///
    /// Propagates lifecycle/terminal-write errors from start/complete/fail, and the
    /// body's own error under [`FailurePolicy::ReportAndPropagate`].
    pub async fn run_scope<T, F, Fut>(
        mut self,
        policy: FailurePolicy,
        make_fut: F,
    ) -> miette::Result<Option<T>>
    where
        F: FnOnce(PendingTaskHandle) -> Fut,
        Fut: Future<Output = miette::Result<T>>,
    {
        self.start()?;
        let handle = self.handle();

        match make_fut(handle).await {
            Ok(value) => {
                self.complete().await?;
                Ok(Some(value))
            }
            Err(report) => {
                let failure = FailureReport::from_report(&report);
                self.fail(&failure).await?;
                match policy {
                    FailurePolicy::Report => Ok(None),
                    FailurePolicy::ReportAndPropagate => Err(report),
                }
            }
        }
    }

    /// Spawn the background ticker. This is where the repaint loop lives. It runs
    /// until it observes the shutdown signal, which it confirms over the oneshot
    /// channel so scope exit can block until no further paints are possible.
    fn spawn_ticker(&mut self) {
        let safe_status = self.safe_status.clone();
        let output_device = self.output_device.clone();
        let maybe_animation = self.maybe_animation;
        let tick_delay = self.tick_delay;

        let mut shutdown_receiver = self.shutdown_sender.subscribe();

        // Create a oneshot channel to signal when the ticker has fully exited.
        let (shutdown_complete_sender, shutdown_complete_receiver) =
            oneshot::channel::<()>();
        self.maybe_shutdown_complete_rx = Some(shutdown_complete_receiver);

        tokio::spawn(async move {
            let mut interval = interval(tick_delay);
            let mut maybe_frame_cycle = maybe_animation.map(FrameCycle::new);

            loop {
                tokio::select! {
                    // Poll shutdown channel.
                    // This branch is cancel safe because recv is cancel safe.
                    _ = shutdown_receiver.recv() => {
                        // It's okay if this fails - it just means the receiver was
                        // dropped.
                        shutdown_complete_sender.send(()).ok();
                        break;
                    }

                    // Poll interval.
                    // This branch is cancel safe because tick is cancel safe.
                    _ = interval.tick() => {
                        let maybe_output = {
                            let mut status = safe_status.lock().unwrap();
                            if status.state != TaskState::Running {
                                None
                            } else if status.dirty || maybe_frame_cycle.is_some() {
                                status.dirty = false;
                                let maybe_frame = maybe_frame_cycle
                                    .as_mut()
                                    .map(FrameCycle::next_frame);
                                Some(render_pending_tick(
                                    &status,
                                    maybe_frame,
                                    get_display_width(),
                                ))
                            } else {
                                // Nothing changed since the last tick and there is no
                                // moving glyph; skip the repaint.
                                None
                            }
                        };

                        if let Some(output) = maybe_output {
                            // We don't care about the result of this operation.
                            print_pending_tick(&output_device, &output).ok();
                        }
                    },
                }
            }
        });
    }

    async fn finish(
        &mut self,
        terminal_state: TaskState,
        maybe_failure: Option<&FailureReport>,
    ) -> miette::Result<()> {
        // Transition under the lock. The ticker stops painting as soon as the state
        // leaves Running, even before it observes the shutdown signal.
        {
            let mut status = self.safe_status.lock().unwrap();
            if status.state != TaskState::Running {
                return Err(StatusError::NotRunning(status.state).into());
            }
            status.state = terminal_state;
        }

        // Stop the ticker (if the send fails the ticker is already gone), then wait
        // for it to fully exit. The wait is bounded by one tick interval.
        self.shutdown_sender.send(()).ok();
        if let Some(receiver) = self.maybe_shutdown_complete_rx.take() {
            receiver.await.ok();
        }

        let kind = match terminal_state {
            TaskState::Failed => StatusKind::Fail,
            _ => StatusKind::Done,
        };
        let final_output = {
            let status = self.safe_status.lock().unwrap();
            render_final_tick(&status, kind, get_display_width())
        };
        print_final_tick(&self.output_device, &final_output)?;

        if let Some(failure) = maybe_failure {
            let mut_ref = crate::lock_output_device_as_mut!(self.output_device);
            for line in failure.render_lines() {
                // We don't care about the result of this operation.
                mut_ref.write_all(line.as_bytes()).ok();
            }
            // We don't care about the result of this operation.
            mut_ref.flush().ok();
        }

        tracing::debug!(?terminal_state, "PendingTask: ticker stopped, final line painted");

        Ok(())
    }
}

impl Drop for PendingTask {
    /// Backstop for a task that is dropped while still running (scope abandoned
    /// without calling [`Self::complete`] / [`Self::fail`]): signal the ticker so it
    /// exits instead of painting forever. No final line is painted on this path.
    fn drop(&mut self) {
        // We don't care about the result of this operation.
        self.shutdown_sender.send(()).ok();
    }
}

/// Cloneable handle over a task's shared status record. Lets a scope body issue
/// updates while the scope runner holds the [`PendingTask`] itself.
#[derive(Clone, Debug)]
pub struct PendingTaskHandle {
    safe_status: SafeTaskStatus,
}

impl PendingTaskHandle {
    /// Same contract as [`PendingTask::update`].
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::NotRunning`] unless the task is `Running`.
    pub fn update(&self, arg_description: impl AsRef<str>) -> miette::Result<()> {
        try_update_description(&self.safe_status, arg_description)
    }

    /// Same contract as [`PendingTask::update_progress`].
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::NotRunning`] unless the task is `Running`, and
    /// [`StatusError::ProgressNotConfigured`] if the task was built without a total
    /// count.
    pub fn update_progress(&self, value: u64) -> miette::Result<()> {
        try_update_progress(&self.safe_status, value)
    }

    /// Current lifecycle state.
    ///
    /// # Panics
    ///
    /// Panics if the status mutex is poisoned.
    #[must_use]
    pub fn state(&self) -> TaskState { self.safe_status.lock().unwrap().state }
}

fn try_update_description(
    safe_status: &SafeTaskStatus,
    arg_description: impl AsRef<str>,
) -> miette::Result<()> {
    let description = sanitize_message(arg_description.as_ref());
    let mut status = safe_status.lock().unwrap();
    if status.state != TaskState::Running {
        return Err(StatusError::NotRunning(status.state).into());
    }
    status.description = description;
    status.dirty = true;
    Ok(())
}

fn try_update_progress(safe_status: &SafeTaskStatus, value: u64) -> miette::Result<()> {
    let mut status = safe_status.lock().unwrap();
    if status.state != TaskState::Running {
        return Err(StatusError::NotRunning(status.state).into());
    }
    match status.maybe_progress.as_mut() {
        Some(progress) => {
            progress.current = value;
            status.dirty = true;
            Ok(())
        }
        None => Err(StatusError::ProgressNotConfigured.into()),
    }
}

/// Make sure no ANSI escape sequences sneak into text that gets repainted in place.
fn sanitize_message(arg: &str) -> String {
    if arg.contains('\x1b') {
        strip_ansi_escapes::strip_str(arg)
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use miette::miette;
    use pretty_assertions::assert_eq;

    use super::{FailurePolicy, PendingTask};
    use crate::{FailureReport, OutputDevice, OutputDeviceExt, StatusError, StdoutMock,
                TaskState};

    const QUANTUM: Duration = Duration::from_millis(100);

    fn make_task(
        description: &str,
        maybe_animation_name: Option<&str>,
        maybe_total_count: Option<u64>,
    ) -> (PendingTask, StdoutMock) {
        let (output_device, stdout_mock) = OutputDevice::new_mock();
        let task = PendingTask::try_new(
            description,
            maybe_animation_name,
            maybe_total_count,
            QUANTUM,
            output_device,
        )
        .unwrap();
        (task, stdout_mock)
    }

    #[tokio::test(start_paused = true)]
    async fn test_done_lifecycle_paints_busy_then_done() {
        let (mut task, stdout_mock) = make_task("loading", None, None);
        assert_eq!(task.state(), TaskState::Idle);

        task.start().unwrap();
        assert_eq!(task.state(), TaskState::Running);
        let handle = task.handle();

        // Let the first tick paint the initial BUSY line, then change the
        // description; the change lands on the next tick.
        tokio::time::sleep(QUANTUM / 2).await;
        task.update("almost there").unwrap();
        tokio::time::sleep(QUANTUM).await;

        task.complete().await.unwrap();
        assert_eq!(handle.state(), TaskState::Completed);

        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.first().copied(), Some("[BUSY] loading"));
        assert_eq!(lines.last().copied(), Some("[DONE] almost there"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_updates_coalesce_into_one_repaint() {
        let (mut task, stdout_mock) = make_task("loading", None, None);
        task.start().unwrap();
        tokio::time::sleep(QUANTUM / 2).await;

        // Two updates land between two ticks; only the second one is ever painted.
        task.update("phase one").unwrap();
        task.update("phase two").unwrap();
        tokio::time::sleep(QUANTUM).await;

        task.complete().await.unwrap();

        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(!output.contains("phase one"));
        let busy_repaints = output
            .lines()
            .filter(|line| line.contains("[BUSY]") && line.contains("phase two"))
            .count();
        assert_eq!(busy_repaints, 1);
        assert!(output.ends_with("[DONE] phase two\n"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_sequence_is_non_decreasing() {
        let (mut task, stdout_mock) = make_task("loading", None, Some(3));
        task.start().unwrap();
        tokio::time::sleep(QUANTUM / 2).await;

        for value in 1..=3 {
            task.update_progress(value).unwrap();
            tokio::time::sleep(QUANTUM).await;
        }

        task.complete().await.unwrap();

        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        let lines: Vec<&str> = output.lines().collect();

        let progress_values: Vec<u64> = lines
            .iter()
            .filter_map(|line| {
                let (_, rest) = line.split_once('(')?;
                let (numerator, _) = rest.split_once('/')?;
                numerator.parse().ok()
            })
            .collect();
        assert!(!progress_values.is_empty());
        assert!(progress_values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(progress_values.iter().all(|value| *value <= 3));

        let last_line = lines.last().copied().unwrap();
        assert!(last_line.starts_with("[DONE]"));
        assert!(last_line.contains("loading"));
        assert!(last_line.contains("(3/3)"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_fraction_renders_on_the_next_tick() {
        let (mut task, stdout_mock) = make_task("copying", None, Some(10));
        task.start().unwrap();
        tokio::time::sleep(QUANTUM / 2).await;

        task.update_progress(7).unwrap();
        tokio::time::sleep(QUANTUM).await;

        task.complete().await.unwrap();

        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.contains("(7/10)"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_lifecycle_renders_report_with_cause_frames() {
        let (mut task, stdout_mock) = make_task("connecting", Some("dots"), None);
        task.start().unwrap();
        let handle = task.handle();

        tokio::time::sleep(QUANTUM * 3).await;

        let failure = FailureReport::from_report(&miette!("timeout"));
        task.fail(&failure).await.unwrap();
        assert_eq!(handle.state(), TaskState::Failed);

        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();

        // The moving glyph forces a repaint on every tick, even with no updates.
        let busy_repaints =
            output.lines().filter(|line| line.contains("[BUSY]")).count();
        assert!(busy_repaints >= 2);
        assert!(output.contains("•... connecting"));

        assert!(output.contains("[FAIL] connecting"));
        assert!(output.contains("ERROR (Error): timeout"));
        let last_line = output.lines().last().unwrap();
        assert!(last_line.contains("--->"));
        assert!(last_line.contains("timeout"));
    }

    #[tokio::test]
    async fn test_ticker_quiesces_before_the_final_line() {
        let (mut task, stdout_mock) = make_task("loading", Some("bar"), None);
        task.start().unwrap();
        tokio::time::sleep(QUANTUM * 3).await;

        task.complete().await.unwrap();
        let buffer_at_exit = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();

        // Once complete() returns the ticker has fully exited: nothing is painted
        // after the final line, even two tick intervals later.
        tokio::time::sleep(QUANTUM * 2).await;
        let buffer_later = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert_eq!(buffer_at_exit, buffer_later);
        assert!(buffer_later.ends_with("[DONE] loading\n"));
    }

    #[tokio::test]
    async fn test_update_before_start_is_a_usage_error() {
        let (task, _stdout_mock) = make_task("loading", None, None);
        let report = task.update("nope").unwrap_err();
        assert!(matches!(
            report.downcast_ref::<StatusError>(),
            Some(StatusError::NotRunning(TaskState::Idle))
        ));
    }

    #[tokio::test]
    async fn test_start_twice_is_a_usage_error() {
        let (mut task, _stdout_mock) = make_task("loading", None, None);
        task.start().unwrap();
        let report = task.start().unwrap_err();
        assert!(matches!(
            report.downcast_ref::<StatusError>(),
            Some(StatusError::AlreadyStarted(TaskState::Running))
        ));
        task.complete().await.unwrap();
    }

    #[tokio::test]
    async fn test_complete_before_start_is_a_usage_error() {
        let (task, _stdout_mock) = make_task("loading", None, None);
        let report = task.complete().await.unwrap_err();
        assert!(matches!(
            report.downcast_ref::<StatusError>(),
            Some(StatusError::NotRunning(TaskState::Idle))
        ));
    }

    #[tokio::test]
    async fn test_progress_without_total_is_a_usage_error() {
        let (mut task, _stdout_mock) = make_task("loading", None, None);
        task.start().unwrap();
        let report = task.update_progress(1).unwrap_err();
        assert!(matches!(
            report.downcast_ref::<StatusError>(),
            Some(StatusError::ProgressNotConfigured)
        ));
        task.complete().await.unwrap();
    }

    #[test]
    fn test_unknown_animation_name_fails_fast() {
        let (output_device, _stdout_mock) = OutputDevice::new_mock();
        let report = PendingTask::try_new(
            "loading",
            Some("sparkles"),
            None,
            QUANTUM,
            output_device,
        )
        .unwrap_err();
        assert!(matches!(
            report.downcast_ref::<StatusError>(),
            Some(StatusError::UnknownAnimation(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scope_swallows_failure_by_default() {
        let (task, stdout_mock) = make_task("connecting", None, None);

        let result: miette::Result<Option<()>> = task
            .run_scope(FailurePolicy::default(), |_handle| async {
                tokio::time::sleep(QUANTUM).await;
                Err(miette!("timeout"))
            })
            .await;

        // The failure was reported but did not reach the caller.
        assert!(matches!(result, Ok(None)));

        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.contains("[FAIL] connecting"));
        assert!(output.contains("timeout"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scope_propagates_failure_when_asked() {
        let (task, stdout_mock) = make_task("connecting", None, None);

        let result: miette::Result<Option<()>> = task
            .run_scope(FailurePolicy::ReportAndPropagate, |_handle| async {
                Err(miette!("timeout"))
            })
            .await;

        assert!(result.is_err());

        // The report is still rendered before the failure re-raises.
        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.contains("[FAIL] connecting"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scope_success_returns_value_and_paints_done() {
        let (task, stdout_mock) = make_task("loading", None, None);

        let result = task
            .run_scope(FailurePolicy::default(), |handle| async move {
                tokio::time::sleep(QUANTUM).await;
                handle.update("loading: step two")?;
                tokio::time::sleep(QUANTUM).await;
                Ok(42)
            })
            .await
            .unwrap();

        assert_eq!(result, Some(42));

        let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
        assert!(output.ends_with("[DONE] loading: step two\n"));
    }
}
