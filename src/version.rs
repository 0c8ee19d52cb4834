use crate::{error::ParseError, segment::Segments};
use core::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
    str::FromStr,
};
use log::{debug, trace};

/// Converts one dot-separated segment into a number without ever failing.
///
/// Leading whitespace (including vertical tab and form feed) is skipped, then an optional sign,
/// then the longest run of ASCII digits, then an optional exponent (`e` or `E`, an optional sign
/// and at least one digit). Anything after that is ignored, and a segment with no leading digits
/// is `0`. A negative exponent truncates toward zero, so `15e-1` is `1`. Values outside of `i64`
/// saturate.
fn coerce_segment(segment: &str) -> i64 {
    let trimmed = segment.trim_start_matches(is_numeric_whitespace);
    let (negative, rest) = split_sign(trimmed);

    let mantissa_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: i64 = 0;
    for byte in rest[..mantissa_len].bytes() {
        let digit = i64::from(byte - b'0');
        value = value.saturating_mul(10);
        value = if negative {
            value.saturating_sub(digit)
        } else {
            value.saturating_add(digit)
        };
    }

    if mantissa_len > 0 {
        if let Some(exponent) = parse_exponent(&rest[mantissa_len..]) {
            value = apply_exponent(value, exponent);
        }
    }

    if segment.parse::<i64>().is_err() {
        debug!("coerced non-integer version segment `{segment}` to {value}");
    }

    value
}

fn is_numeric_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Returns whether `s` starts with a minus sign, and `s` without its leading sign (if any).
fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

/// Parses a leading `e`/`E` exponent with an optional sign and at least one digit. The exponent
/// saturates, since anything past a few dozen already saturates or zeroes the value.
fn parse_exponent(s: &str) -> Option<i32> {
    let rest = s.strip_prefix(|c: char| c.eq_ignore_ascii_case(&'e'))?;
    let (negative, digits) = split_sign(rest);
    let digits_len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude = digits[..digits_len].bytes().fold(0i32, |acc, byte| {
        acc.saturating_mul(10).saturating_add(i32::from(byte - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn apply_exponent(value: i64, exponent: i32) -> i64 {
    // i64 has 19 digits, so 20 steps either saturate or reach zero
    let steps = exponent.unsigned_abs().min(20);
    (0..steps).fold(value, |acc, _| {
        if exponent > 0 {
            acc.saturating_mul(10)
        } else {
            acc / 10
        }
    })
}

/// A version number made of a major, minor and patch segment, like `1.2.3`.
///
/// Versions can be [parsed](Version::set_version), [displayed](Version::to_string),
/// [bumped](Version::bump_by) and compared. Comparison is numeric, segment by segment, starting
/// with major, so `1.0.0` is greater than `0.0.999999`.
///
/// There is no pre-release or build metadata. A version string is just three dot-separated
/// numbers; see [Version::set_version] for exactly how lenient parsing is.
///
/// # Examples
///
/// ```
/// use tripver::prelude::*;
///
/// let mut version = Version::parse("1.2.3").unwrap();
/// version.bump(Segments::MINOR);
/// assert_eq!("1.3.3", version.to_string());
/// assert!(version > Version::parse("1.2.3").unwrap());
/// ```
///
/// Without input, a version starts at `0.1.0`:
///
/// ```
/// use tripver::prelude::*;
///
/// let version = Version::default();
/// assert_eq!(Version::DEFAULT_VERSION, version.to_string());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Version {
    major: i64,
    minor: i64,
    patch: i64,
}

impl Version {
    /// The version a new instance holds when no version string is given.
    pub const DEFAULT_VERSION: &'static str = "0.1.0";

    /// The amount [Version::bump] adds to each selected segment.
    pub const DEFAULT_INCREMENT: i64 = 1;

    /// Creates a version from an optional version string. `None` gives the default `0.1.0`.
    ///
    /// # Errors
    ///
    /// - If `version` is `Some` and has fewer than 3 dot-separated segments, returns a
    ///   [ParseError::TooFewSegments].
    pub fn new(version: Option<&str>) -> Result<Self, ParseError> {
        let mut new = Self::default();
        if let Some(version) = version {
            new.set_version(version)?;
        }
        Ok(new)
    }

    /// Parses a version string. Equivalent to `Version::new(Some(version))`.
    ///
    /// # Errors
    ///
    /// - If `version` has fewer than 3 dot-separated segments, returns a
    ///   [ParseError::TooFewSegments].
    pub fn parse(version: &str) -> Result<Self, ParseError> {
        Self::new(Some(version))
    }

    /// Creates a version directly from its segment values.
    pub const fn from_parts(major: i64, minor: i64, patch: i64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Replaces all three segments of this version with those parsed from `version`, and returns
    /// this version for chaining.
    ///
    /// `version` is split on `.`, and the first three parts become the major, minor and patch
    /// segments. Any further parts are ignored, so `1.2.3.4` sets `1.2.3`.
    ///
    /// Each part is converted leniently and never fails: leading whitespace and an optional sign
    /// are accepted, then as many digits as are present, then an optional exponent such as `e3`.
    /// Trailing text is dropped and a part with no leading digits becomes `0`. So `a.b.c` sets
    /// `0.0.0`, `1.0.01` sets `1.0.1`, and `1e3.2E2.15e-1` sets `1000.200.1` (negative exponents
    /// truncate toward zero). This is kept for compatibility with existing version strings; new
    /// callers should not rely on it.
    ///
    /// # Example
    ///
    /// ```
    /// use tripver::prelude::*;
    ///
    /// let mut version = Version::default();
    /// version.set_version("69.69.69").unwrap();
    /// assert_eq!("69.69.69", version.to_string());
    ///
    /// // too few segments leaves the version unchanged
    /// assert!(version.set_version("1.2").is_err());
    /// assert_eq!("69.69.69", version.to_string());
    /// ```
    ///
    /// # Errors
    ///
    /// - If `version` has fewer than 3 dot-separated segments, returns a
    ///   [ParseError::TooFewSegments]. The version is not modified.
    pub fn set_version(&mut self, version: &str) -> Result<&mut Self, ParseError> {
        let parts: Vec<&str> = version.split('.').collect();

        if parts.len() < 3 {
            return Err(ParseError::TooFewSegments {
                version: version.to_owned(),
                found: parts.len(),
            });
        }

        if parts.len() > 3 {
            debug!(
                "ignoring {} trailing segment(s) of version `{version}`",
                parts.len() - 3
            );
        }

        // every part is coerced before any field changes
        let [major, minor, patch] = [parts[0], parts[1], parts[2]].map(coerce_segment);
        self.major = major;
        self.minor = minor;
        self.patch = patch;

        trace!("set version to {}", self);
        Ok(self)
    }

    /// Returns the major segment.
    pub fn major(&self) -> i64 {
        self.major
    }

    /// Returns the minor segment.
    pub fn minor(&self) -> i64 {
        self.minor
    }

    /// Returns the patch segment.
    pub fn patch(&self) -> i64 {
        self.patch
    }

    /// [Self::bump_by] with an increment of [Version::DEFAULT_INCREMENT].
    ///
    /// Pass [Segments::default()] to bump just the major segment.
    pub fn bump(&mut self, segments: Segments) -> &mut Self {
        self.bump_by(segments, Self::DEFAULT_INCREMENT)
    }

    /// Adds `increment` to every segment in `segments`, and returns this version for chaining.
    ///
    /// Unselected segments are left alone, and lesser segments are *not* reset to zero. A
    /// negative `increment` decrements, and a segment may go below zero. Results saturate at the
    /// bounds of `i64`.
    ///
    /// # Example
    ///
    /// ```
    /// use tripver::prelude::*;
    ///
    /// let mut version = Version::parse("1.2.3").unwrap();
    /// version
    ///     .bump_by(Segments::MINOR | Segments::PATCH, 10)
    ///     .bump_by(Segments::MAJOR, -1);
    /// assert_eq!("0.12.13", version.to_string());
    /// ```
    pub fn bump_by(&mut self, segments: Segments, increment: i64) -> &mut Self {
        if segments.contains(Segments::MAJOR) {
            self.major = self.major.saturating_add(increment);
        }
        if segments.contains(Segments::MINOR) {
            self.minor = self.minor.saturating_add(increment);
        }
        if segments.contains(Segments::PATCH) {
            self.patch = self.patch.saturating_add(increment);
        }

        trace!("bumped {:?} by {} to {}", segments, increment, self);
        self
    }

    /// Like [Self::bump_by], but returns a new version and leaves this one unchanged.
    pub fn bumped(&self, segments: Segments, increment: i64) -> Self {
        let mut next = *self;
        next.bump_by(segments, increment);
        next
    }

    fn as_tuple(&self) -> (i64, i64, i64) {
        (self.major, self.minor, self.patch)
    }
}

/// Creates a version from an optional version string. Shorthand for [Version::new].
///
/// ```
/// use tripver::semver;
///
/// assert_eq!("0.1.0", semver(None).unwrap().to_string());
/// assert_eq!("1.2.3", semver(Some("1.2.3")).unwrap().to_string());
/// ```
///
/// # Errors
///
/// - If `version` is `Some` and has fewer than 3 dot-separated segments, returns a
///   [ParseError::TooFewSegments].
pub fn semver(version: Option<&str>) -> Result<Version, ParseError> {
    Version::new(version)
}

impl Default for Version {
    /// `0.1.0`
    fn default() -> Self {
        Self::from_parts(0, 1, 0)
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Version {
    /// Returns the rendered version string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Ord for Version {
    /// Compares major, then minor, then patch, numerically.
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_tuple().cmp(&other.as_tuple())
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_tuple().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::iproduct;
    use rstest::*;

    fn v(version: &str) -> Version {
        Version::parse(version).unwrap()
    }

    #[test]
    fn test_default() {
        let version = Version::default();
        assert_eq!("0.1.0", version.to_string());
        assert_eq!(0, version.major());
        assert_eq!(1, version.minor());
        assert_eq!(0, version.patch());
        assert_eq!(Ok(version), Version::new(None));
        assert_eq!(Ok(version), semver(None));
    }

    #[test]
    fn test_equal_but_distinct() {
        let a = Version::default();
        let b = Version::default();
        assert_eq!(a, b);
        assert!(!ptr_eq(&a, &b));
        assert!(ptr_eq(&a, &a));
    }

    fn ptr_eq(a: &Version, b: &Version) -> bool {
        core::ptr::eq(a, b)
    }

    #[rstest]
    #[case("69.69.69", "69.69.69")]
    #[case("0.0.0", "0.0.0")]
    #[case("10.20.30", "10.20.30")]
    #[case("1.2.3.4", "1.2.3")] // extra segments are dropped
    #[case("1.2.3.foo.bar", "1.2.3")]
    #[case("a.b.c", "0.0.0")] // non-numeric coerces to zero
    #[case("..", "0.0.0")]
    #[case("1.0.01", "1.0.1")]
    #[case("12abc.3x.y4", "12.3.0")]
    #[case(" 7.+8.-9", "7.8.-9")]
    #[case("\x0B5.\x0C6.\r\n7", "5.6.7")] // vertical tab and form feed count as whitespace
    #[case("1e3.2E2.15e-1", "1000.200.1")]
    #[case("-2e2.5e+1.3e", "-200.50.3")]
    #[case("e3.1e.7e-x", "0.1.7")] // exponent needs mantissa and exponent digits
    fn test_parse_renders(#[case] version_str: &str, #[case] expected: &str) {
        assert_eq!(expected, v(version_str).to_string());
        assert_eq!(Ok(v(version_str)), version_str.parse::<Version>());
    }

    #[test]
    fn test_parse_saturates() {
        let version = v("99999999999999999999.-99999999999999999999.0");
        assert_eq!(i64::MAX, version.major());
        assert_eq!(i64::MIN, version.minor());
    }

    #[test]
    fn test_exponent_saturates() {
        let version = v("9e99999999999.-1e30.123e-40");
        assert_eq!(i64::MAX, version.major());
        assert_eq!(i64::MIN, version.minor());
        assert_eq!(0, version.patch());
    }

    #[rstest]
    #[case("", 1)]
    #[case("1", 1)]
    #[case("1.2", 2)]
    #[case("foo", 1)]
    fn test_too_few_segments(#[case] version_str: &str, #[case] found: usize) {
        let expected = Err(ParseError::TooFewSegments {
            version: version_str.to_owned(),
            found,
        });
        assert_eq!(expected, Version::parse(version_str));
        assert_eq!(expected, version_str.parse::<Version>());
    }

    #[test]
    fn test_set_version_failure_does_not_mutate() {
        let mut version = v("4.5.6");
        let result = version.set_version("1.2").map(|v| *v);
        assert!(matches!(result, Err(ParseError::TooFewSegments { .. })));
        assert_eq!("4.5.6", version.to_string());
    }

    #[test]
    fn test_set_version_chains() {
        let mut version = Version::default();
        version
            .set_version("69.69.69")
            .unwrap()
            .bump(Segments::PATCH);
        assert_eq!("69.69.70", version.to_string());
        assert_eq!(69, version.major());
        assert_eq!(69, version.minor());
        assert_eq!(70, version.patch());
    }

    #[test]
    fn test_default_bump() {
        let mut version = Version::default();
        version.bump(Segments::default());
        assert_eq!("1.1.0", version.to_string());
    }

    #[rstest]
    #[case(Segments::MAJOR, "1.1.0")]
    #[case(Segments::MINOR, "0.2.0")]
    #[case(Segments::PATCH, "0.1.1")]
    #[case(Segments::MAJOR | Segments::MINOR, "1.2.0")]
    #[case(Segments::MINOR | Segments::PATCH, "0.2.1")]
    #[case(Segments::MAJOR | Segments::PATCH, "1.1.1")]
    #[case(Segments::all(), "1.2.1")]
    #[case(Segments::empty(), "0.1.0")]
    fn test_bump_combinations(#[case] segments: Segments, #[case] expected: &str) {
        let mut version = Version::default();
        assert_eq!(expected, version.bump(segments).to_string());
    }

    #[test]
    fn test_bump_by() {
        let mut version = v("1.2.3");
        version.bump_by(Segments::all(), 5);
        assert_eq!("6.7.8", version.to_string());
    }

    #[test]
    fn test_bump_by_negative_does_not_clamp() {
        let mut version = Version::default();
        version.bump_by(Segments::all(), -2);
        assert_eq!("-2.-1.-2", version.to_string());
    }

    #[test]
    fn test_bump_by_saturates() {
        let mut version = Version::from_parts(i64::MAX, 0, i64::MIN);
        version
            .bump_by(Segments::MAJOR, 1)
            .bump_by(Segments::PATCH, -1);
        assert_eq!(Version::from_parts(i64::MAX, 0, i64::MIN), version);
    }

    #[test]
    fn test_bumped_is_pure() {
        let version = v("1.2.3");
        let next = version.bumped(Segments::MINOR, 1);
        assert_eq!("1.2.3", version.to_string());
        assert_eq!("1.3.3", next.to_string());
    }

    #[test]
    fn test_comparators() {
        let version = v("1.0.0");

        assert!(version.gt(&Version::default()));
        assert!(version.gt(&v("0.0.999999")));
        assert!(!version.gt(&v("1.0.1")));
        assert!(!version.gt(&v("1.0.01")));

        assert!(version.ge(&Version::default()));
        assert!(version.ge(&v("0.0.999999")));
        assert!(version.ge(&v("1.0.0")));
        assert!(!version.ge(&v("1.0.1")));

        assert!(!version.lt(&Version::default()));
        assert!(!version.lt(&v("0.0.999999")));
        assert!(version.lt(&v("1.0.1")));
        assert!(version.lt(&v("1.0.01")));

        assert!(!version.le(&v("0.0.999999")));
        assert!(version.le(&v("1.0.0")));
        assert!(version.le(&v("1.0.1")));

        assert!(version.eq(&v("1.0.0")));
        assert!(!version.eq(&Version::default()));
        assert!(!version.eq(&v("1.0.01")));

        assert!(!version.ne(&v("1.0.0")));
        assert!(version.ne(&v("1.0.1")));
        assert!(version.ne(&v("0.0.999999")));
    }

    #[test]
    fn test_numeric_not_lexical() {
        assert!(v("10.0.0") > v("9.0.0"));
        assert!(v("1.10.0") > v("1.9.0"));
        assert!(v("1.1.10") > v("1.1.9"));
    }

    #[fixture]
    fn triples() -> Vec<Version> {
        let values = [-1, 0, 1, 2, 10, 999_999];
        iproduct!(values, values, values)
            .map(|(major, minor, patch)| Version::from_parts(major, minor, patch))
            .collect()
    }

    #[rstest]
    fn test_comparator_laws(triples: Vec<Version>) {
        for (a, b) in iproduct!(triples.iter(), triples.iter()) {
            assert_eq!(a.ne(b), !a.eq(b));
            assert_eq!(a.ge(b), a.gt(b) || a.eq(b));
            assert_eq!(a.le(b), a.lt(b) || a.eq(b));
            assert_eq!(a.gt(b), b.lt(a));
            assert_eq!(
                a.cmp(b),
                (a.major(), a.minor(), a.patch()).cmp(&(b.major(), b.minor(), b.patch()))
            );
        }
    }

    #[rstest]
    fn test_display_round_trip(triples: Vec<Version>) {
        for version in triples {
            assert_eq!(Ok(version), version.to_string().parse::<Version>());
        }
    }

    #[test]
    fn test_bump_makes_greater() {
        let cur = v("1.2.3");
        for segments in [Segments::MAJOR, Segments::MINOR, Segments::PATCH] {
            assert!(cur < cur.bumped(segments, Version::DEFAULT_INCREMENT));
            assert!(cur > cur.bumped(segments, -1));
        }
    }
}
