/// Receiver for the resolver's diagnostic messages (`Resolved path '...'`).
///
/// Any `Fn(&str)` closure is a sink, so callers can forward messages to a
/// test writer or collect them.
pub trait DiagnosticSink {
    fn log(&self, message: &str);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&str),
{
    fn log(&self, message: &str) {
        self(message)
    }
}
