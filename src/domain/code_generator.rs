//! Contract for producing candidate short codes.

/// Produces random candidate short codes.
///
/// Implementations hold no state that influences uniqueness; collisions are
/// detected by the store. See [`crate::utils::code_generator::RandomCodeGenerator`]
/// for the production implementation.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a string of exactly `length` characters, each drawn
    /// independently and uniformly from the generator's alphabet.
    fn generate(&self, length: usize) -> String;
}
