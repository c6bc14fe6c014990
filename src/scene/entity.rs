/// Anything in a scene that carries a human-readable name.
pub trait Named {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);
}
