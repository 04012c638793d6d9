use rand::{Rng, distr::Alphanumeric};

/// Generates a random alphanumeric string of the specified length.
///
/// # Examples
///
/// ```
/// use phd_portal::utils::random::generate_random_string;
///
/// let suffix = generate_random_string(8);
/// assert_eq!(suffix.len(), 8);
/// ```
pub fn generate_random_string(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect::<String>()
}
