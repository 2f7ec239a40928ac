/// Pending repeat count typed before a motion or operator.
///
/// No digits typed means a count of 1. A leading `0` never starts a count.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Counts {
    current: Option<u32>,
}

impl Counts {
    /// Whether `digit` extends the count rather than acting as a key of its
    /// own.
    pub(crate) fn accepts(&self, digit: u32) -> bool {
        digit <= 9 && (digit != 0 || self.current.is_some())
    }

    pub(crate) fn push_digit(&mut self, d: u32) {
        let next = self
            .current
            .unwrap_or(0)
            .saturating_mul(10)
            .saturating_add(d);
        self.current = Some(next);
    }

    pub(crate) fn value(&self) -> u32 {
        self.current.unwrap_or(1).max(1)
    }

    /// Current value; the count goes back to 1.
    pub(crate) fn take(&mut self) -> u32 {
        let v = self.value();
        self.current = None;
        v
    }
}
