use crate::error::ShortenerError;
use linkhop_core::ShortCode;
use linkhop_generator::Generator;
use std::collections::HashSet;
use tracing::debug;

/// Picks the short code for one shortening request.
///
/// A non-blank alias is used as given (trimmed). Otherwise a code is drawn
/// from the generator, re-rolling on collision up to `max_attempts` times.
/// The allocator never touches storage; the caller supplies every code
/// already reserved.
#[derive(Debug, Clone)]
pub struct Allocator<G> {
    generator: G,
    max_attempts: usize,
}

impl<G: Generator> Allocator<G> {
    /// `max_attempts` is raised to at least one.
    pub fn new(generator: G, max_attempts: usize) -> Self {
        Self {
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Allocates a code that is not in `reserved`.
    pub fn allocate(
        &self,
        alias: Option<&str>,
        reserved: &HashSet<ShortCode>,
    ) -> Result<ShortCode, ShortenerError> {
        if let Some(alias) = alias.and_then(ShortCode::alias) {
            if reserved.contains(&alias) {
                return Err(ShortenerError::AliasTaken(alias));
            }
            return Ok(alias);
        }

        for attempt in 1..=self.max_attempts {
            let candidate: ShortCode = self.generator.generate().into();
            if !reserved.contains(&candidate) {
                return Ok(candidate);
            }
            debug!(code = %candidate, attempt, "generated code collides, rolling again");
        }

        Err(ShortenerError::GeneratorExhausted {
            attempts: self.max_attempts,
        })
    }
}
