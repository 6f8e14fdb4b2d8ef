use crate::error::Result;
use crate::trip::Trip;

/// Receives star changes after they have been applied in memory.
///
/// A failure here never rolls back the in-memory toggle.
#[cfg_attr(test, mockall::automock)]
pub trait StarPersistence {
    fn star_changed(&mut self, trip: &Trip) -> Result<()>;
}

/// Persistence that drops every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPersistence;

impl StarPersistence for NoopPersistence {
    fn star_changed(&mut self, _trip: &Trip) -> Result<()> {
        Ok(())
    }
}
