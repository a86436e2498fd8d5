//! Number formatting on the wire.

use serde::Serializer;

/// Largest integer an `f64` holds exactly; the client reads numbers as doubles.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Writes integral values without a fraction, `10` rather than `10.0`.
///
/// Use with `#[serde(serialize_with = "tornado_analyze::number::serialize")]`.
pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Number(#[serde(serialize_with = "super::serialize")] f64);

    fn json(value: f64) -> String {
        serde_json::to_string(&Number(value)).unwrap()
    }

    #[test]
    fn integral_values_have_no_fraction() {
        assert_eq!(json(10.0), "10");
        assert_eq!(json(-3.0), "-3");
        assert_eq!(json(0.0), "0");
    }

    #[test]
    fn other_values_stay_floats() {
        assert_eq!(json(2.5), "2.5");
        assert_eq!(json(-0.25), "-0.25");
    }
}
