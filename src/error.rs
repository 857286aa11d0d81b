pub type MatrixResult<T> = Result<T, MatrixError>;

#[derive(thiserror::Error, Debug)]
pub enum MatrixError {
    #[error("invariant violation: {0}")]
    Invariant(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("external tool failure: {0}")]
    ExternalTool(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MatrixError {
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    pub fn filesystem(msg: impl Into<String>) -> Self {
        Self::Filesystem(msg.into())
    }

    pub fn external_tool(msg: impl Into<String>) -> Self {
        Self::ExternalTool(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            MatrixError::invariant("x")
                .to_string()
                .contains("invariant violation:")
        );
        assert!(
            MatrixError::filesystem("x")
                .to_string()
                .contains("filesystem error:")
        );
        assert!(
            MatrixError::external_tool("x")
                .to_string()
                .contains("external tool failure:")
        );
        assert!(MatrixError::encode("x").to_string().contains("encode error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = MatrixError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
