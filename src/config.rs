//! Compilation options.
//!
//! The front end never parses command-line arguments itself. The driver
//! builds an [`Options`] snapshot once and hands it to the diagnostic sinks,
//! which consult it to decide what gets printed.

use std::fmt::Display;

/// Optimization level requested for later compilation phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizationLevel {
    #[default]
    O0,
    O1,
    O2,
    O3,
    /// Optimize for size
    Os,
    /// Optimize for size at all cost
    Oz,
}

impl OptimizationLevel {
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag {
            "0" => Some(OptimizationLevel::O0),
            "1" => Some(OptimizationLevel::O1),
            "2" => Some(OptimizationLevel::O2),
            "3" => Some(OptimizationLevel::O3),
            "s" => Some(OptimizationLevel::Os),
            "z" => Some(OptimizationLevel::Oz),
            _ => None,
        }
    }
}

impl Display for OptimizationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Read-only configuration snapshot.
#[derive(Debug, Clone)]
pub struct Options {
    pub opt_level: OptimizationLevel,
    pub print_messages: bool,
    pub print_warnings: bool,
    pub print_errors: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            opt_level: OptimizationLevel::O0,
            print_messages: true,
            print_warnings: true,
            print_errors: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OptimizationLevel, Options};

    #[test]
    fn test_default_options_print_everything() {
        let options = Options::default();
        assert!(options.print_messages);
        assert!(options.print_warnings);
        assert!(options.print_errors);
        assert_eq!(options.opt_level, OptimizationLevel::O0);
    }

    #[test]
    fn test_optimization_level_from_flag() {
        assert_eq!(OptimizationLevel::from_flag("2"), Some(OptimizationLevel::O2));
        assert_eq!(OptimizationLevel::from_flag("z"), Some(OptimizationLevel::Oz));
        assert_eq!(OptimizationLevel::from_flag("4"), None);
    }
}
