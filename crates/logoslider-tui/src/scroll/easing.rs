//! Easing curves mapping animation progress [0, 1] onto [0, 1]

pub use logoslider_core::EasingType;

pub trait EasingTypeExt {
    /// Eased value of progress `t`; `t` is clamped to [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::None => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            EasingType::Linear => t,
            EasingType::Cubic => 1.0 - (1.0 - t).powi(3),
            EasingType::Quintic => 1.0 - (1.0 - t).powi(5),
            EasingType::EaseOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
            EasingType::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingType; 5] = [
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
        EasingType::EaseInOut,
    ];

    #[test]
    fn test_curves_hit_both_ends() {
        for easing in CURVES {
            assert!(easing.apply(0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
        assert_eq!(EasingType::None.apply(0.99), 0.0);
    }

    #[test]
    fn test_curves_never_move_backwards() {
        for easing in CURVES {
            let mut prev = 0.0;
            for i in 0..=20 {
                let v = easing.apply(i as f64 / 20.0);
                assert!(v >= prev, "{:?} not monotonic at step {}", easing, i);
                prev = v;
            }
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let e = EasingType::EaseInOut;
        assert!((e.apply(0.5) - 0.5).abs() < 0.001);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 0.001);
    }
}
