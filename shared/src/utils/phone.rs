//! Phone number utilities
//!
//! Member phone numbers are stored as loosely formatted text (E.164-ish),
//! so helpers here normalize rather than validate.

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Mask a phone number for log output (e.g., +23****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

/// Mask the password parameter in a provider request URL before logging
pub fn mask_url_password(url: &str) -> String {
    match url.find("password=") {
        Some(start) => {
            let value_start = start + "password=".len();
            let value_end = url[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(url.len());
            format!("{}***{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_number() {
        assert_eq!(normalize_phone_number("080-1234-5678"), "08012345678");
        assert_eq!(normalize_phone_number("+234 801 234 5678"), "+2348012345678");
        assert_eq!(normalize_phone_number("(080) 1234-5678"), "08012345678");
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+2348012345678"), "+23****5678");
        assert_eq!(mask_phone_number("12345"), "****");
    }

    #[test]
    fn test_mask_url_password() {
        assert_eq!(
            mask_url_password("https://api.example.com/?username=u&password=secret&action=send"),
            "https://api.example.com/?username=u&password=***&action=send"
        );
        assert_eq!(
            mask_url_password("https://api.example.com/?username=u&password=secret"),
            "https://api.example.com/?username=u&password=***"
        );
        assert_eq!(
            mask_url_password("https://api.example.com/?username=u"),
            "https://api.example.com/?username=u"
        );
    }
}
