use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CryptoError {
    #[error("No valid proof: {0}")]
    ProofVerificationError(String),

    #[error("Malformed group element in {0}")]
    InvalidGroupElement(String),

    #[error("Serialization failed: {0}")]
    SerializationError(String),
}

impl From<ark_serialize::SerializationError> for CryptoError {
    fn from(err: ark_serialize::SerializationError) -> Self {
        Self::SerializationError(err.to_string())
    }
}
