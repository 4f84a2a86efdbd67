//! Pure string-masking helpers for Brazilian document numbers, phone
//! numbers, postal codes, and currency.
//!
//! Masks are progressive: partial input yields a partial mask, matching the
//! behavior expected by the form layer that echoes keystrokes back.

/// Keep only ASCII digits. Shared with lookup input validation.
pub fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format a CPF or CNPJ progressively using the CNPJ layout
/// (`00.000.000/0000-00`), capped at 14 digits.
pub fn mask_document(value: &str) -> String {
    let digits = digits(value);
    let mut out = String::with_capacity(18);

    for (i, c) in digits.chars().take(14).enumerate() {
        match i {
            2 | 5 => out.push('.'),
            8 => out.push('/'),
            12 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }

    out
}

/// Format a CPF progressively (`000.000.000-00`), capped at 11 digits.
pub fn mask_cpf(value: &str) -> String {
    let digits = digits(value);
    let mut out = String::with_capacity(14);

    for (i, c) in digits.chars().take(11).enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }

    out
}

/// Format a phone number, handling both mobile (11-digit) and landline
/// (10-digit) groupings. A leading zero (trunk prefix) is stripped.
pub fn mask_phone(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let mut r = digits(value);
    if r.starts_with('0') {
        r.remove(0);
    }

    match r.len() {
        0..=2 => format!("({}", r),
        3..=5 => format!("({}) {}", &r[..2], &r[2..]),
        6..=10 => {
            let middle_end = 6.min(r.len());
            let tail = &r[middle_end..];
            if tail.is_empty() {
                format!("({}) {}", &r[..2], &r[2..middle_end])
            } else {
                format!("({}) {}-{}", &r[..2], &r[2..middle_end], tail)
            }
        }
        _ => format!("({}) {}-{}", &r[..2], &r[2..7], &r[7..11]),
    }
}

/// Format a CEP progressively (`00000-000`), capped at 8 digits.
pub fn mask_zip_code(value: &str) -> String {
    let digits = digits(value);
    let mut out = String::with_capacity(9);

    for (i, c) in digits.chars().take(8).enumerate() {
        if i == 5 {
            out.push('-');
        }
        out.push(c);
    }

    out
}

/// Format a monetary value as Brazilian Real: `R$ 1.234,56`.
///
/// Zero (and anything that rounds to zero cents) renders as `R$ 0,00`.
pub fn format_currency(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;

    let whole = cents / 100;
    let frac = cents % 100;

    // Group the integer part with '.' thousands separators
    let whole_str = whole.to_string();
    let mut grouped = String::with_capacity(whole_str.len() + whole_str.len() / 3);
    let offset = whole_str.len() % 3;
    for (i, c) in whole_str.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative && cents > 0 { "-" } else { "" };
    format!("R$ {}{},{:02}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(digits("12.345-6ab"), "123456");
        assert_eq!(digits(""), "");
    }

    #[test]
    fn test_mask_document_full_cnpj() {
        assert_eq!(mask_document("12345678000190"), "12.345.678/0001-90");
    }

    #[test]
    fn test_mask_document_partial() {
        assert_eq!(mask_document("123"), "12.3");
        assert_eq!(mask_document("123456"), "12.345.6");
        assert_eq!(mask_document("123456789"), "12.345.678/9");
    }

    #[test]
    fn test_mask_document_caps_at_cnpj_length() {
        assert_eq!(mask_document("123456780001909999"), "12.345.678/0001-90");
    }

    #[test]
    fn test_mask_cpf() {
        assert_eq!(mask_cpf("12345678901"), "123.456.789-01");
        assert_eq!(mask_cpf("1234"), "123.4");
    }

    #[test]
    fn test_mask_phone_mobile() {
        assert_eq!(mask_phone("47999887766"), "(47) 99988-7766");
    }

    #[test]
    fn test_mask_phone_landline() {
        assert_eq!(mask_phone("4733221100"), "(47) 3322-1100");
    }

    #[test]
    fn test_mask_phone_partial() {
        assert_eq!(mask_phone("4"), "(4");
        assert_eq!(mask_phone("4733"), "(47) 33");
        assert_eq!(mask_phone("473322"), "(47) 3322");
    }

    #[test]
    fn test_mask_phone_strips_trunk_zero() {
        assert_eq!(mask_phone("047999887766"), "(47) 99988-7766");
    }

    #[test]
    fn test_mask_zip_code() {
        assert_eq!(mask_zip_code("88301000"), "88301-000");
        assert_eq!(mask_zip_code("883"), "883");
        assert_eq!(mask_zip_code("88301-000999"), "88301-000");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(1234.56), "R$ 1.234,56");
        assert_eq!(format_currency(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_currency(12.5), "R$ 12,50");
        assert_eq!(format_currency(-250.75), "R$ -250,75");
    }
}
