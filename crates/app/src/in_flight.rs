//! Busy flags that reset themselves.

/// Holds a "request in flight" flag raised until dropped.
///
/// Dropping a pending future (navigation, a timeout, a losing `select!`
/// branch) drops the guard with it, so the flag never stays stuck.
pub(crate) struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    pub(crate) fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
