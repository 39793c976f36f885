use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use ncmd::engine::progress::{Progress, ProgressCallback, ProgressReporter};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Bar state shared between the handler and its callbacks.
struct BarState {
    pb: ProgressBar,
    phase: &'static str,
    /// Whether the current phase announced its total with `TaskStart`.
    counted: bool,
}

/// Renders workflow progress on stderr, counting work items in `unit`
/// (`"frames"` for conversion, `"guests"` for scene assembly).
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
    unit: &'static str,
}

impl CliProgressHandler {
    pub fn new(unit: &'static str) -> Self {
        let pb = ProgressBar::new_spinner().with_style(spinner_style());
        pb.set_draw_target(ProgressDrawTarget::stderr());

        Self {
            state: Arc::new(Mutex::new(BarState {
                pb,
                phase: "",
                counted: false,
            })),
            unit,
        }
    }

    /// Returns a reporter that drives this handler's progress bar.
    pub fn reporter(&self) -> ProgressReporter<'static> {
        ProgressReporter::with_callback(self.get_callback())
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();
        let unit = self.unit;

        Box::new(move |progress: Progress| {
            let Ok(mut state) = state.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };
            state.apply(progress, unit);
        })
    }
}

impl BarState {
    fn apply(&mut self, progress: Progress, unit: &str) {
        match progress {
            Progress::PhaseStart { name } => {
                self.phase = name;
                self.counted = false;
                self.pb.reset();
                self.pb.set_style(spinner_style());
                self.pb
                    .enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                self.pb.set_message(name);
            }
            Progress::TaskStart { total_steps } => {
                self.counted = true;
                self.pb.disable_steady_tick();
                self.pb.reset();
                self.pb.set_length(total_steps);
                self.pb.set_style(bar_style(unit));
                self.pb.set_message(self.phase);
            }
            Progress::TaskIncrement => {
                self.pb.inc(1);
                if !self.counted {
                    self.pb
                        .set_message(format!("{}: {} {}", self.phase, self.pb.position(), unit));
                }
            }
            Progress::TaskFinish => {
                let total = self.pb.length().unwrap_or(0);
                if self.pb.position() < total {
                    self.pb.set_position(total);
                }
            }
            Progress::PhaseFinish => {
                self.pb.disable_steady_tick();
                let done = self.pb.position();
                let summary = if done > 0 {
                    format!("✓ {} ({} {})", self.phase, done, unit)
                } else {
                    format!("✓ {}", self.phase)
                };
                self.pb.finish_with_message(summary);
            }
            Progress::Message(msg) => {
                self.pb.suspend(|| eprintln!("{}", note_line(&msg)));
            }
        }
    }
}

/// Formats a workflow note printed above the bar, e.g. an empty radial distribution.
fn note_line(msg: &str) -> String {
    format!("  → {}", msg)
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style(unit: &str) -> ProgressStyle {
    let template = format!("{{msg:<20}} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {unit} ({{eta}})");
    ProgressStyle::with_template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key(
            "eta",
            |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
            },
        )
        .progress_chars("##-")
}
