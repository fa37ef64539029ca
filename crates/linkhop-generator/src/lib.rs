pub mod random;
pub mod seq;

use linkhop_core::ShortCode;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness against existing links is checked by the caller, which may
/// ask for another code when a generated one is already taken.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;

    /// Generates a candidate short code.
    fn generate(&self) -> Self::Output;
}
