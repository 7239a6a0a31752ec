/// ProgressReporter port for user feedback during a fetch cycle
///
/// Abstracts the status line, the request console, and non-fatal warnings
/// so the engine never touches a terminal directly.
pub trait ProgressReporter: Send + Sync {
    /// Reports the current status message ("Determining version...", ...).
    fn report(&self, message: &str);

    /// Logs one outbound request line for the diagnostics console.
    fn request_line(&self, line: &str);

    /// Surfaces a non-fatal warning without interrupting the operation.
    fn report_warning(&self, message: &str);

    /// Reports completion of the fetch cycle.
    fn report_completion(&self, message: &str);
}

/// A reporter that swallows everything, for tests and quiet mode.
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn report(&self, _message: &str) {}
    fn request_line(&self, _line: &str) {}
    fn report_warning(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}
