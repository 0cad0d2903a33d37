//! `C-u` numeric prefix argument.

/// Largest count a prefix argument can hold.
pub const MAX_REPEAT: usize = 10_000;

/// A transient multiplier consumed by exactly one command.
///
/// The first `C-u` activates with a count of 0; each further `C-u` quadruples
/// the running count (treating 0 as 1). Digits accumulate in base ten. Taking
/// the value yields the count, or 1 when it is 0, and resets the argument.
/// The count never exceeds [`MAX_REPEAT`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepeatArgument {
    count: usize,
    active: bool,
}

impl RepeatArgument {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns true when the count was clamped to [`MAX_REPEAT`].
    pub fn start(&mut self) -> bool {
        if self.active {
            self.set_clamped(self.count.max(1).saturating_mul(4))
        } else {
            self.count = 0;
            self.active = true;
            false
        }
    }

    /// Returns true when the count was clamped to [`MAX_REPEAT`].
    pub fn digit(&mut self, d: u8) -> bool {
        if !self.active {
            self.active = true;
            self.count = 0;
        }
        self.set_clamped(
            self.count
                .saturating_mul(10)
                .saturating_add(usize::from(d.min(9))),
        )
    }

    fn set_clamped(&mut self, n: usize) -> bool {
        self.count = n.min(MAX_REPEAT);
        n > MAX_REPEAT
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Consume the argument.
    pub fn take(&mut self) -> usize {
        let n = if self.count > 0 { self.count } else { 1 };
        self.clear();
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_one() {
        let mut u = RepeatArgument::default();
        assert_eq!(u.take(), 1);
    }

    #[test]
    fn repeated_prefix_quadruples() {
        let mut u = RepeatArgument::default();
        u.start();
        assert_eq!(u.count(), 0);
        u.start();
        assert_eq!(u.count(), 4);
        u.start();
        assert_eq!(u.count(), 16);
        assert_eq!(u.take(), 16);
        assert!(!u.is_active());
        assert_eq!(u.take(), 1);
    }

    #[test]
    fn digits_accumulate() {
        let mut u = RepeatArgument::default();
        u.start();
        u.digit(1);
        u.digit(2);
        assert_eq!(u.take(), 12);
    }

    #[test]
    fn long_digit_runs_clamp() {
        let mut u = RepeatArgument::default();
        u.start();
        let clamped: Vec<bool> = (0..25).map(|_| u.digit(9)).collect();
        assert!(!clamped[3], "9999 fits");
        assert!(clamped[4]);
        assert!(clamped[24]);
        assert_eq!(u.count(), MAX_REPEAT);
        assert_eq!(u.take(), MAX_REPEAT);
    }

    #[test]
    fn repeated_prefix_clamps() {
        let mut u = RepeatArgument::default();
        let mut last = false;
        for _ in 0..40 {
            last = u.start();
        }
        assert!(last);
        assert_eq!(u.count(), MAX_REPEAT);
    }

    #[test]
    fn lone_prefix_takes_one() {
        let mut u = RepeatArgument::default();
        u.start();
        assert_eq!(u.take(), 1);
    }
}
