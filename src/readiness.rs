// Readiness waiter: after the stack has been started, poll one container's
// run state at a fixed interval until it is running or the ceiling is
// reached, then open the frontend. The browser is opened exactly once in
// both cases; on timeout the user gets a warning instead of a success line.

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::host::Host;
use crate::interrupt::Interrupt;

/// How often a "still waiting" line is printed while polling.
const PROGRESS_EVERY: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Waiting,
    Ready,
    TimedOut,
    /// Ctrl+C arrived mid-wait; the browser is not opened.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Container whose run state stands in for the whole stack.
    pub container: String,
    pub interval: Duration,
    pub timeout: Duration,
    /// Pause between observing readiness and opening the browser.
    pub open_delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitReport {
    /// State at every poll, in order.
    pub history: Vec<Readiness>,
    pub outcome: Readiness,
    pub waited: Duration,
    /// Status lines shown to the user, in order.
    pub messages: Vec<String>,
}

impl WaitReport {
    fn say(&mut self, progress: &ProgressBar, line: String) {
        progress.suspend(|| println!("{}", line));
        self.messages.push(line);
    }
}

/// Spinner shown on a terminal while waiting; hidden otherwise.
pub fn spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Block until the stack looks ready or `policy.timeout` has elapsed,
/// then open `url`. Inspection failures count as "not running yet". A
/// raised `interrupt` ends the wait at the next tick without opening
/// anything.
pub fn wait_for_stack<H: Host + ?Sized>(
    host: &mut H,
    policy: &ReadinessPolicy,
    url: &Url,
    progress: &ProgressBar,
    interrupt: &Interrupt,
) -> WaitReport {
    let mut report = WaitReport {
        history: Vec::new(),
        outcome: Readiness::Waiting,
        waited: Duration::ZERO,
        messages: Vec::new(),
    };

    while report.waited < policy.timeout {
        progress.set_message(format!(
            "Waiting for {} ({}s elapsed)",
            policy.container,
            report.waited.as_secs()
        ));
        host.sleep(policy.interval);
        if interrupt.is_raised() {
            progress.finish_and_clear();
            info!(waited = report.waited.as_secs(), "readiness wait interrupted");
            report.outcome = Readiness::Cancelled;
            return report;
        }
        report.waited += policy.interval;
        report.history.push(Readiness::Waiting);
        let waited = report.waited.as_secs();

        let running = match host.is_running(&policy.container) {
            Ok(running) => running,
            Err(e) => {
                warn!(error = %e, "readiness check failed");
                false
            }
        };
        debug!(container = %policy.container, waited, running, "poll");

        if running {
            progress.finish_and_clear();
            info!(waited, "stack ready");
            report.say(progress, format!("\n✅ Services are ready! (waited {}s)", waited));
            report.say(progress, "🌐 Opening frontend in browser...".to_string());
            host.sleep(policy.open_delay);
            report.outcome = Readiness::Ready;
            open_frontend(host, url, progress, &mut report);
            return report;
        }

        if waited % PROGRESS_EVERY.as_secs() == 0 {
            report.say(progress, format!("   Still waiting... ({}s elapsed)", waited));
        }
    }

    progress.finish_and_clear();
    info!(waited = report.waited.as_secs(), "readiness wait timed out");
    report.say(
        progress,
        "\n⚠️ Services may still be starting. Opening browser anyway...".to_string(),
    );
    report.outcome = Readiness::TimedOut;
    open_frontend(host, url, progress, &mut report);
    report
}

fn open_frontend<H: Host + ?Sized>(
    host: &mut H,
    url: &Url,
    progress: &ProgressBar,
    report: &mut WaitReport,
) {
    report.say(progress, format!("\n🌐 Opening: {}\n", url));
    if let Err(e) = host.open_url(url) {
        report.say(progress, format!("❌ {}", e));
    }
}
