use crate::Generator;
use linkhop_core::ShortCode;
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Length of generated codes unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Generates short codes from the leading characters of random UUIDs.
///
/// Codes are lowercase hexadecimal. With the default length of six there
/// are about 16.7 million possible codes, so collisions are rare but not
/// impossible.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(default = DEFAULT_CODE_LENGTH)]
    length: usize,
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RandomGenerator {
    /// Length of the generated codes. A configured length of zero is
    /// raised to one, so a code is never empty.
    pub fn length(&self) -> usize {
        self.length.max(1)
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let length = self.length();
        let mut code = String::with_capacity(length + 32);
        while code.len() < length {
            code.push_str(&Uuid::new_v4().simple().to_string());
        }
        code.truncate(length);
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_codes_are_six_hex_chars() {
        let generator = RandomGenerator::default();
        let code = generator.generate();

        assert_eq!(code.as_str().len(), 6);
        assert!(code
            .as_str()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn custom_length_longer_than_one_uuid() {
        let generator = RandomGenerator::builder().length(40).build();
        assert_eq!(generator.generate().as_str().len(), 40);
    }

    #[test]
    fn zero_length_still_yields_a_code() {
        let generator = RandomGenerator::builder().length(0).build();
        assert_eq!(generator.length(), 1);
        assert_eq!(generator.generate().as_str().len(), 1);
    }

    #[test]
    fn codes_vary() {
        let generator = RandomGenerator::default();
        let codes: HashSet<ShortCode> = (0..100).map(|_| generator.generate()).collect();
        // 100 draws from 16^6 values; a handful of repeats would point at a broken source
        assert!(codes.len() > 95);
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
