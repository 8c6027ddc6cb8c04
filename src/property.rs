/// A store-backed property, implemented by the type `#[observable_default]` generates.
pub trait Property {
    /// Type the property is read and written as.
    type Value;

    /// Name reported to observers.
    const NAME: &'static str;

    /// Read the current value, reporting an access.
    fn get() -> Self::Value;

    /// Write a new value, reporting a mutation around the write.
    fn set(new_value: Self::Value);

    /// Read the value, modify it with `f`, and write it back.
    fn update(f: impl FnOnce(&mut Self::Value)) {
        let mut value = Self::get();
        f(&mut value);
        Self::set(value);
    }
}
