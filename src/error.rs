/// Errors that can occur when parsing a version string.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
#[non_exhaustive]
pub enum ParseError {
    /// The version string did not split into at least three dot-separated segments.
    #[error("Version `{version}` should have at least 3 dot-separated segments, found {found}")]
    TooFewSegments {
        /// The offending version string
        version: String,
        /// The number of segments that were found
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_segments_message() {
        let err = ParseError::TooFewSegments {
            version: "1.2".to_owned(),
            found: 2,
        };
        assert_eq!(
            "Version `1.2` should have at least 3 dot-separated segments, found 2",
            err.to_string()
        );
    }
}
