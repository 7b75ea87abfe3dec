use serde::de::DeserializeOwned;

use structcheck_reflect::Reflect;

use crate::error::Error;
use crate::validator::Validator;

impl Validator {
    /// Decode a JSON payload into `T` and validate the result.
    ///
    /// Decoding delegates to `serde_json`; validation only runs once the
    /// payload decoded cleanly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the payload is not valid JSON for
    /// `T`, otherwise the same errors as [`Validator::validate`].
    pub fn bind_and_validate<T>(&self, payload: &str) -> Result<T, Error>
    where
        T: DeserializeOwned + Reflect,
    {
        let value: T = serde_json::from_str(payload)?;
        tracing::debug!(record = value.descriptor().name, "payload decoded, validating");
        self.validate(&value)?;
        Ok(value)
    }
}
