//! Plain-text rendering of batch results.
//!
//! One heading per indicator with its breaks on the line below, the same
//! shape the map page shows in its side panel:
//!
//! ```text
//! # Language breaks
//!
//! ## Spanish
//! 0, 45, 130, 290, 610, 1420, 3306
//!
//! ## Tagalog
//! insufficient data (6 classes, 4 values)
//! ```

use core::fmt;

use crate::batch::ClassifiedColumn;
use crate::error::ClassifyError;

/// A titled list of classification results, rendered via `Display`.
#[derive(Clone, Copy, Debug)]
pub struct BreaksReport<'a> {
    title: &'a str,
    entries: &'a [ClassifiedColumn],
}

impl<'a> BreaksReport<'a> {
    /// Report titled `title` over `entries`, in the given order.
    pub fn new(title: &'a str, entries: &'a [ClassifiedColumn]) -> Self {
        Self { title, entries }
    }
}

impl fmt::Display for BreaksReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        for entry in self.entries {
            writeln!(f)?;
            match &entry.group {
                Some(group) => writeln!(f, "## {} ({})", entry.attribute, group)?,
                None => writeln!(f, "## {}", entry.attribute)?,
            }
            match &entry.outcome {
                Ok(breaks) => writeln!(f, "{breaks}")?,
                Err(ClassifyError::InsufficientData { classes, values }) => {
                    writeln!(f, "insufficient data ({classes} classes, {values} values)")?
                }
                Err(err) => writeln!(f, "{err}")?,
            }
        }
        Ok(())
    }
}
