/// Runs `func` with `arg` when the returned guard goes out of scope, on every
/// exit path including early returns through `?`.
pub fn finally<A, F>(arg: A, func: F) -> FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    FinallyGuard { arg, func }
}

pub struct FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    arg: A,
    func: F,
}

impl<A, F> FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    /// Mutable access to the guarded value while the scope is alive.
    #[inline]
    pub fn get_mut(&mut self) -> &mut A {
        &mut self.arg
    }
}

impl<A, F> Drop for FinallyGuard<A, F>
where
    F: FnMut(&mut A),
{
    fn drop(&mut self) {
        (self.func)(&mut self.arg)
    }
}
