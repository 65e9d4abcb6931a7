//! Library of parser functions for the legacy flat format

// crate modules
use crate::sphere::Sphere;

// spheretools modules
use spheretools_utils::f;

// nom parser combinators
use nom::character::complete::{self, digit1, space0, space1};
use nom::combinator::all_consuming;
use nom::number::complete::double;
use nom::sequence::preceded;
use nom::IResult;

/// Number of whitespace separated fields in a sphere record
pub(crate) const RECORD_FIELDS: usize = 5;

// ! Boolean checks

/// Check a line has the shape of a sphere record, `x y z radius <extra>`
///
/// Anything else ends the sphere data, including blank lines.
pub(crate) fn is_sphere_record(i: &str) -> bool {
    i.split_whitespace().count() == RECORD_FIELDS
}

// ! Parser combinators

/// Level count and branching factor from the first line
///
/// Anything following the two values is ignored.
pub(crate) fn header(i: &str) -> IResult<&str, (usize, usize)> {
    let (i, levels) = uint(i)?;
    let (i, degree) = preceded(space1, uint)(i)?;
    let (i, _) = space0(i)?;
    Ok((i, (levels, degree)))
}

/// Sphere from the first four fields of a record
///
/// Fails with a short description of the first field that is not a number.
pub(crate) fn sphere_record(i: &str) -> Result<Sphere, String> {
    let mut values = [0.0; 4];
    let fields = i.split_whitespace();

    for ((value, name), token) in values.iter_mut().zip(["x", "y", "z", "radius"]).zip(fields) {
        let (_, v) = number(token).map_err(|_| f!("{name} value \"{token}\" is not a number"))?;
        *value = v;
    }

    Ok(Sphere::new([values[0], values[1], values[2]], values[3]))
}

/// A single token that must be entirely a floating point number
fn number(i: &str) -> IResult<&str, f64> {
    all_consuming(double)(i)
}

/// Unsigned size value, trimming preceding whitespace
fn uint(i: &str) -> IResult<&str, usize> {
    let (i, value) = digit1(i.trim_start())?;
    let (_, v) = complete::u64(value)?;
    Ok((i, v as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_values() {
        assert_eq!(header("3 2"), Ok(("", (3, 2))));
        assert_eq!(header("  4\t8  "), Ok(("", (4, 8))));
        assert_eq!(header("3 2 extra"), Ok(("extra", (3, 2))));
    }

    #[test]
    fn header_failures() {
        assert!(header("").is_err());
        assert!(header("3").is_err());
        assert!(header("three 2").is_err());
        assert!(header("-3 2").is_err());
        assert!(header("3.5 2").is_err());
    }

    #[test]
    fn record_shape() {
        assert!(is_sphere_record("0 0 0 1.0 x"));
        assert!(is_sphere_record("  1.5e-3 -2 3 0.5 1  "));
        assert!(!is_sphere_record(""));
        assert!(!is_sphere_record("0 0 0 1.0"));
        assert!(!is_sphere_record("0 0 0 1.0 1 0 0 0 1.0"));
    }

    #[test]
    fn record_values() {
        assert_eq!(
            sphere_record("1 -2.5 3e-1 0.5 x"),
            Ok(Sphere::new([1.0, -2.5, 0.3], 0.5))
        );
        assert_eq!(
            sphere_record("0 0 0 -1 1"),
            Ok(Sphere::new([0.0, 0.0, 0.0], -1.0))
        );
    }

    #[test]
    fn record_failures() {
        assert_eq!(
            sphere_record("0 abc 0 1 x"),
            Err("y value \"abc\" is not a number".to_string())
        );
        assert_eq!(
            sphere_record("0 0 0 1.0.0 x"),
            Err("radius value \"1.0.0\" is not a number".to_string())
        );
    }
}
