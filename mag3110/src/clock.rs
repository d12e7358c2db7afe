/// Monotonic tick source shared with the scheduler that drives
/// [`crate::Compass::idle_tick`].
pub trait Clock {
    fn ticks(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn ticks(&self) -> u64 {
        (**self).ticks()
    }
}
