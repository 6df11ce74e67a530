//! Galaxy parameters and the committed/draft store behind the control panel.

use crate::error::GalaxyError;

/// Upper bound on particle count. Keeps each vertex buffer well under the
/// default `max_buffer_size` of 256 MiB.
pub const MAX_PARTICLES: u32 = 2_000_000;

/// Largest branch count the control panel offers.
pub const MAX_BRANCHES: u32 = 32;

/// Spin slider range.
pub const SPIN_MIN: f32 = 0.0;
pub const SPIN_MAX: f32 = 10.0;

/// Parameters of a generated galaxy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalaxyParams {
    /// Number of particles.
    pub count: u32,
    /// Number of spiral arms.
    pub branches: u32,
    /// Angular offset per unit radius.
    pub spin: f32,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            count: 50_000,
            branches: 5,
            spin: 0.5,
        }
    }
}

impl GalaxyParams {
    pub fn new(count: u32, branches: u32, spin: f32) -> Self {
        Self {
            count,
            branches,
            spin,
        }
    }

    /// Check the parameters against what the generator accepts.
    ///
    /// `count == 0` is valid and produces an empty galaxy.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.branches == 0 {
            return Err(GalaxyError::invalid("branches", "must be at least 1"));
        }
        if !self.spin.is_finite() {
            return Err(GalaxyError::invalid(
                "spin",
                format!("must be finite, got {}", self.spin),
            ));
        }
        if self.count > MAX_PARTICLES {
            return Err(GalaxyError::invalid(
                "count",
                format!("{} exceeds the maximum of {}", self.count, MAX_PARTICLES),
            ));
        }
        Ok(())
    }
}

/// Holds the committed parameters and the draft being edited.
///
/// The control panel edits the draft freely. [`ParamStore::commit`] promotes
/// it once the edit is finished.
#[derive(Debug, Clone)]
pub struct ParamStore {
    committed: GalaxyParams,
    draft: GalaxyParams,
}

impl ParamStore {
    pub fn new(params: GalaxyParams) -> Self {
        Self {
            committed: params,
            draft: params,
        }
    }

    pub fn committed(&self) -> GalaxyParams {
        self.committed
    }

    pub fn draft(&self) -> GalaxyParams {
        self.draft
    }

    pub fn draft_mut(&mut self) -> &mut GalaxyParams {
        &mut self.draft
    }

    /// Discard the draft.
    pub fn revert(&mut self) {
        self.draft = self.committed;
    }

    /// Promote the draft.
    ///
    /// Returns `Ok(Some(params))` when the committed value changed,
    /// `Ok(None)` when the draft equals what is already committed. An invalid
    /// draft is reverted and reported; the committed value is left alone.
    pub fn commit(&mut self) -> Result<Option<GalaxyParams>, GalaxyError> {
        if self.draft == self.committed {
            return Ok(None);
        }
        if let Err(e) = self.draft.validate() {
            self.revert();
            return Err(e);
        }
        self.committed = self.draft;
        Ok(Some(self.committed))
    }
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new(GalaxyParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = GalaxyParams::default();
        assert_eq!(p.count, 50_000);
        assert_eq!(p.branches, 5);
        assert_eq!(p.spin, 0.5);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_zero_count_is_valid() {
        assert!(GalaxyParams::new(0, 3, 1.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_branches() {
        let err = GalaxyParams::new(10, 0, 1.0).validate().unwrap_err();
        assert!(matches!(
            err,
            GalaxyError::InvalidParameter { name: "branches", .. }
        ));
    }

    #[test]
    fn test_rejects_non_finite_spin() {
        for spin in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let err = GalaxyParams::new(10, 2, spin).validate().unwrap_err();
            assert!(matches!(
                err,
                GalaxyError::InvalidParameter { name: "spin", .. }
            ));
        }
    }

    #[test]
    fn test_rejects_excessive_count() {
        let err = GalaxyParams::new(MAX_PARTICLES + 1, 2, 1.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            GalaxyError::InvalidParameter { name: "count", .. }
        ));
        assert!(GalaxyParams::new(MAX_PARTICLES, 2, 1.0).validate().is_ok());
    }

    #[test]
    fn test_commit_unchanged_draft() {
        let mut store = ParamStore::default();
        assert_eq!(store.commit().unwrap(), None);
    }

    #[test]
    fn test_commit_changed_draft() {
        let mut store = ParamStore::default();
        store.draft_mut().branches = 7;
        let committed = store.commit().unwrap().unwrap();
        assert_eq!(committed.branches, 7);
        assert_eq!(store.committed().branches, 7);

        // Committing again without edits reports nothing.
        assert_eq!(store.commit().unwrap(), None);
    }

    #[test]
    fn test_commit_invalid_draft_reverts() {
        let mut store = ParamStore::default();
        store.draft_mut().branches = 0;
        assert!(store.commit().is_err());
        assert_eq!(store.committed(), GalaxyParams::default());
        assert_eq!(store.draft(), GalaxyParams::default());
    }

    #[test]
    fn test_revert() {
        let mut store = ParamStore::default();
        store.draft_mut().spin = 3.0;
        store.revert();
        assert_eq!(store.draft().spin, 0.5);
    }
}
