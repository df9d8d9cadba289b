pub mod probe;

pub use probe::{DiagnosticsProbe, ProbeState};
