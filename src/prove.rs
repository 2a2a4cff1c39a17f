/// The outcome of checking a property against one generated value.
pub trait Prove {
    fn prove(&self) -> bool;
}

impl Prove for bool {
    fn prove(&self) -> bool {
        *self
    }
}

impl Prove for () {
    fn prove(&self) -> bool {
        true
    }
}

impl<T, E> Prove for Result<T, E> {
    fn prove(&self) -> bool {
        self.is_ok()
    }
}
