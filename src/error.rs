pub type ArcwiseResult<T> = Result<T, ArcwiseError>;

#[derive(thiserror::Error, Debug)]
pub enum ArcwiseError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ArcwiseError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefix_is_stable() {
        assert!(
            ArcwiseError::validation("x")
                .to_string()
                .contains("validation error:")
        );
    }
}
