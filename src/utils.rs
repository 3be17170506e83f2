use units::{Length, nm};

/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}

/// Parse a length given either as a bare number of nanometres (`"750"`) or as
/// a number with an explicit unit (`"0.75 um"`, `"0.75 µm"`, `"1 mm"`).
pub fn parse_length_nm(s: &str) -> Result<Length, String> {
    let s = s.trim();
    if let Ok(x) = s.parse::<f64>() { return Ok(nm(x)) }
    // `uom` only knows the micro sign
    let normalized = match s.split_once(char::is_whitespace) {
        Some((value, "um")) => format!("{value} µm"),
        _                   => s.to_string(),
    };
    normalized.parse::<Length>().map_err(|e| format!("cannot parse `{s}` as a length: {e:?}"))
}

/// Round `x` up to an integer, unless it is already an integer up to
/// floating-point noise: `11.000000000000002` becomes 11, not 12.
pub fn ceil_to_usize(x: f64) -> usize {
    let nearest = x.round();
    let tolerance = 1e-9 * x.abs().max(1.0);
    let rounded = if (x - nearest).abs() <= tolerance { nearest } else { x.ceil() };
    rounded.max(0.0) as usize
}

/// Integer part of `x`, with values within floating-point noise of an integer
/// snapped to it first: `4.999999999999999` becomes 5, not 4.
pub fn trunc_to_i64(x: f64) -> i64 {
    let nearest = x.round();
    let tolerance = 1e-9 * x.abs().max(1.0);
    if (x - nearest).abs() <= tolerance { nearest as i64 } else { x.trunc() as i64 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use float_eq::assert_float_eq;
    use units::nm_;

    #[rstest]
    #[case(         7,         "7")]
    #[case(      1234,     "1,234")]
    #[case(   1234567, "1,234,567")]
    fn digits_are_grouped(#[case] n: usize, #[case] expected: &str) {
        assert_eq!(group_digits(n), expected);
    }

    #[rstest]
    #[case("750"    , 750.0)]
    #[case(" 12.5 " ,  12.5)]
    #[case("0.75 um", 750.0)]
    #[case("0.5 µm" , 500.0)]
    #[case("1 mm"   ,   1e6)]
    fn lengths_default_to_nanometres(#[case] text: &str, #[case] expected_nm: f64) {
        let l = parse_length_nm(text).unwrap();
        assert_float_eq!(nm_(l), expected_nm, r2nd <= 1e-12);
    }

    #[rstest]
    #[case( 4.999999999999999,  5)]
    #[case( 5.5              ,  5)]
    #[case(-2.7              , -2)]
    #[case(750.0000000000001 , 750)]
    fn truncation_ignores_noise(#[case] x: f64, #[case] expected: i64) {
        assert_eq!(trunc_to_i64(x), expected);
    }

    #[test]
    fn unparsable_length() {
        assert!(parse_length_nm("seven furlongs").is_err());
    }

    #[rstest]
    #[case(11.000000000000002, 11)]
    #[case(10.999999999999998, 11)]
    #[case(11.1              , 12)]
    #[case(34.55751918948773 , 35)]
    #[case( 0.0              ,  0)]
    fn ceiling(#[case] x: f64, #[case] expected: usize) {
        assert_eq!(ceil_to_usize(x), expected);
    }
}
