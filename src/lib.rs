//! # tripver
//!
//! A small library for `major.minor.patch` version numbers: parse them, render them, bump their
//! segments and compare them.
//!
//! There is no pre-release or build metadata and no range matching. A [`Version`] is just three
//! integers, compared numerically in order of significance.
//!
//! ## Examples
//!
//! Parse, bump and render:
//!
//! ```
//! use tripver::prelude::*;
//!
//! let mut version = Version::parse("1.2.3").unwrap();
//! version.bump(Segments::MAJOR | Segments::PATCH);
//! assert_eq!("2.2.4", version.to_string());
//! ```
//!
//! Compare:
//!
//! ```
//! use tripver::prelude::*;
//!
//! let version = Version::parse("1.0.0").unwrap();
//! assert!(version > Version::parse("0.0.999999").unwrap());
//! assert!(version.lt(&Version::parse("1.0.1").unwrap()));
//! assert!(version.ne(&Version::default()));
//! ```
//!
//! ## Important Terms
//!
//! - **Segment**: One of the three numbers of a version: *major*, *minor* or *patch*. A set of
//!   them is modeled by [`Segments`].
//! - **Bump**: Adding an increment (usually `1`) to some segments of a version. Unlike SemVer's
//!   "next version" rules, bumping a segment does not reset the lesser ones.
//!
//! ## Lenient Parsing
//!
//! A version string needs at least three dot-separated parts, otherwise parsing fails with a
//! [`ParseError`]. Beyond that, parsing never fails: parts past the third are ignored, each part
//! is read as a leading number (an exponent like `1e3` included), and parts that do not start with
//! a number become `0`. See [`Version::set_version`] for details.
//!
//! ## Prelude
//!
//! tripver provides a prelude module for convenience. It contains everything needed to interact
//! with the library.
//!
//! Use it with:
//!
//! ```
//! use tripver::prelude::*;
//! ```
#![warn(missing_docs)]

mod error;
mod segment;
mod version;

pub use crate::error::ParseError;
pub use crate::segment::Segments;
pub use crate::version::{semver, Version};

/// A convenience module appropriate for glob imports (`use tripver::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::semver;
    #[doc(no_inline)]
    pub use crate::ParseError;
    #[doc(no_inline)]
    pub use crate::Segments;
    #[doc(no_inline)]
    pub use crate::Version;
}
