//! Range handling shared by every path that writes a vital.

pub const VITAL_MIN: u8 = 0;
pub const VITAL_MAX: u8 = 100;

/// Clamp an arbitrary integer into the vital range.
pub fn clamp_vital(value: i64) -> u8 {
    value.clamp(VITAL_MIN as i64, VITAL_MAX as i64) as u8
}

/// Round a fractional value (half away from zero) and clamp it into range.
/// NaN maps to the floor of the range.
pub fn clamp_vital_f64(value: f64) -> u8 {
    if value.is_nan() {
        return VITAL_MIN;
    }
    value.round().clamp(VITAL_MIN as f64, VITAL_MAX as f64) as u8
}

/// Increase a vital by `amount`, saturating at the maximum.
pub fn raise(current: u8, amount: u8) -> u8 {
    clamp_vital(current as i64 + amount as i64)
}

/// Drop a sub-point carry that would push a vital past either end of the range.
pub fn settle_carry(value: u8, carry: f64) -> f64 {
    if !carry.is_finite()
        || (value >= VITAL_MAX && carry > 0.0)
        || (value <= VITAL_MIN && carry < 0.0)
    {
        0.0
    } else {
        carry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_vital() {
        assert_eq!(clamp_vital(-5), 0);
        assert_eq!(clamp_vital(0), 0);
        assert_eq!(clamp_vital(57), 57);
        assert_eq!(clamp_vital(100), 100);
        assert_eq!(clamp_vital(i64::MAX), 100);
    }

    #[test]
    fn test_clamp_vital_f64_rounds() {
        assert_eq!(clamp_vital_f64(25.4), 25);
        assert_eq!(clamp_vital_f64(25.5), 26);
        assert_eq!(clamp_vital_f64(-0.7), 0);
        assert_eq!(clamp_vital_f64(130.0), 100);
        assert_eq!(clamp_vital_f64(f64::NAN), 0);
    }

    #[test]
    fn test_settle_carry() {
        assert_eq!(settle_carry(100, 0.3), 0.0);
        assert_eq!(settle_carry(100, -0.3), -0.3);
        assert_eq!(settle_carry(0, -0.2), 0.0);
        assert_eq!(settle_carry(0, 0.2), 0.2);
        assert_eq!(settle_carry(50, 0.4), 0.4);
        assert_eq!(settle_carry(50, f64::NAN), 0.0);
    }

    #[test]
    fn test_raise_saturates() {
        assert_eq!(raise(80, 20), 100);
        assert_eq!(raise(95, 20), 100);
        assert_eq!(raise(40, 20), 60);
        assert_eq!(raise(100, 255), 100);
    }
}
