/// Receives the steps an algorithm takes, such as the rewrite rules applied by the simplifier.
///
/// Implemented for `()`, which discards every step, and for `Vec<S>`, which records them in
/// order.
pub trait StepCollector<S> {
    /// Records one step.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
