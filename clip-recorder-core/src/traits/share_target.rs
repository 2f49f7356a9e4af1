use std::path::Path;

use crate::models::error::RecorderError;

/// External consumer that a recording can be handed to.
pub trait ShareTarget {
    fn share(&self, path: &Path) -> Result<(), RecorderError>;
}
