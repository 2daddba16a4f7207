/// Monotonic counter used to tag asynchronous work with the state it was issued for.
///
/// Work carrying an older generation than the current one is stale and must be
/// dropped by whoever receives its result.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn new(n: u64) -> Self {
        Generation(n)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Advances to the next generation and returns it.
    pub fn bump(&mut self) -> Self {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    pub fn is_current(self, current: Generation) -> bool {
        self == current
    }
}
