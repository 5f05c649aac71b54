use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

// 学号、工号、科目代码
static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9/_.-]*$").expect("Invalid identifier regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 手机号：可选的前导 +，允许空格和连字符分隔，数字位数 7..=15
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    let body = phone.strip_prefix('+').unwrap_or(phone);
    if body.is_empty()
        || !body
            .chars()
            .all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
    {
        return Err("Phone number may only contain digits, spaces, dashes and a leading +");
    }
    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err("Phone number must contain between 7 and 15 digits");
    }
    Ok(())
}

pub fn validate_identifier(value: &str) -> Result<(), &'static str> {
    if value.is_empty() || value.len() > 32 {
        return Err("Identifier length must be between 1 and 32 characters");
    }
    if !IDENTIFIER_RE.is_match(value) {
        return Err("Identifier must contain only letters, numbers, '/', '_', '.' or '-'");
    }
    Ok(())
}

/// 去除首尾空白，空字符串视为缺失
pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("bursar@school.ac.ke").is_ok());
        assert!(validate_email("bursar@school").is_err());
        assert!(validate_email("no-at-sign.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+254 712-345-678").is_ok());
        assert!(validate_phone("0712345678").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("07123abc45").is_err());
        assert!(validate_phone("+").is_err());
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("ADM/2024/001").is_ok());
        assert!(validate_identifier("MATH-101").is_ok());
        assert!(validate_identifier("-leading").is_err());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier(&"X".repeat(33)).is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  Jane "), Some("Jane"));
        assert_eq!(non_empty("   "), None);
    }
}
