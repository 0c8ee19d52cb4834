use bitflags::bitflags;

bitflags! {
    /// A set of version segments that a [bump](crate::Version::bump_by) applies to.
    ///
    /// Combine flags with `|` to target several segments at once:
    ///
    /// ```
    /// use tripver::prelude::*;
    ///
    /// let mut version = Version::default();
    /// version.bump(Segments::MAJOR | Segments::PATCH);
    /// assert_eq!("1.1.1", version.to_string());
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Segments: u8 {
        /// The major segment.
        const MAJOR = 0b0001;
        /// The minor segment.
        const MINOR = 0b0010;
        /// The patch segment.
        const PATCH = 0b0100;
    }
}

impl Default for Segments {
    /// Major only.
    fn default() -> Self {
        Segments::MAJOR
    }
}
