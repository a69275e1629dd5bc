//! Coverage analysis for method tables.
//!
//! Every table is total once built, but the fallback entries mark signatures
//! the implementer never wrote. A [`CoverageReport`] lists them per arity so
//! gaps can be found before a call hits them.

use std::fmt;

use super::types::Signature;

/// Implemented and fallback signatures of one arity.
#[derive(Debug, Clone)]
pub struct CoverageReport<T> {
    /// The method the report describes.
    pub method: String,
    /// Arity of every listed signature.
    pub arity: usize,
    /// Signatures with a user handler.
    pub implemented: Vec<Signature<T>>,
    /// Signatures bound to the fallback.
    pub missing: Vec<Signature<T>>,
}

impl<T> CoverageReport<T> {
    pub fn new(
        method: String,
        arity: usize,
        implemented: Vec<Signature<T>>,
        missing: Vec<Signature<T>>,
    ) -> Self {
        Self {
            method,
            arity,
            implemented,
            missing,
        }
    }

    /// Returns true if no signature of this arity falls back.
    pub fn is_total(&self) -> bool {
        self.missing.is_empty()
    }

    /// Total number of signatures of this arity.
    pub fn total(&self) -> usize {
        self.implemented.len() + self.missing.len()
    }
}

impl<T: fmt::Display> fmt::Display for CoverageReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "`{}` arity {}: {} of {} signatures implemented",
            self.method,
            self.arity,
            self.implemented.len(),
            self.total()
        )?;
        if !self.missing.is_empty() {
            writeln!(f, "falls back for:")?;
            for signature in &self.missing {
                writeln!(f, "  {}", signature)?;
            }
        }
        Ok(())
    }
}
