use rand::Rng;
use rand::distr::Alphanumeric;

/// 生成大写字母与数字组成的随机码
pub fn generate_random_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .map(|b| (b as char).to_ascii_uppercase())
        .take(length)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_uppercase_alphanumeric() {
        let code = generate_random_code(8);
        assert_eq!(code.len(), 8);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }
}
