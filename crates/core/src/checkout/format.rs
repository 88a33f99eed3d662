//! Pure input formatters for the payment form.
//!
//! Each formatter strips everything that is not a digit, caps the length,
//! and re-inserts separators at fixed positions. They are total functions
//! of the raw input - no state, no side effects - and idempotent, so they
//! can run on every keystroke.

/// Group a card number into 4-digit blocks: `4111111111111111` →
/// `4111 1111 1111 1111`. At most 16 digits are kept.
#[must_use]
pub fn card_number(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(16).collect();

    let mut out = String::with_capacity(19);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Mask a CPF: `12345678901` → `123.456.789-01`. At most 11 digits.
#[must_use]
pub fn cpf(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(11).collect();

    let mut out = String::with_capacity(14);
    for (i, c) in digits.chars().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Mask a CEP (postal code): `12345678` → `12345-678`. At most 8 digits.
#[must_use]
pub fn cep(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(8).collect();

    let mut out = String::with_capacity(9);
    for (i, c) in digits.chars().enumerate() {
        if i == 5 {
            out.push('-');
        }
        out.push(c);
    }
    out
}

/// Mask a Brazilian phone number: `11912345678` → `(11) 91234-5678`.
/// At most 11 digits (area code plus nine-digit mobile).
#[must_use]
pub fn phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(11).collect();

    let mut out = String::with_capacity(15);
    for (i, c) in digits.chars().enumerate() {
        match i {
            0 => out.push('('),
            2 => out.push_str(") "),
            7 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_number_groups_by_four() {
        assert_eq!(card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(card_number("4111"), "4111");
        assert_eq!(card_number("41111"), "4111 1");
        assert_eq!(card_number(""), "");
    }

    #[test]
    fn card_number_strips_junk_and_caps_length() {
        assert_eq!(card_number("4111-1111 2222abc3333"), "4111 1111 2222 3333");
        assert_eq!(
            card_number("41111111111111119999"),
            "4111 1111 1111 1111"
        );
    }

    #[test]
    fn cpf_masks_fully_and_partially() {
        assert_eq!(cpf("12345678901"), "123.456.789-01");
        assert_eq!(cpf("123"), "123");
        assert_eq!(cpf("1234"), "123.4");
        assert_eq!(cpf("1234567890"), "123.456.789-0");
        assert_eq!(cpf("123456789012345"), "123.456.789-01");
    }

    #[test]
    fn cep_masks_after_five_digits() {
        assert_eq!(cep("12345678"), "12345-678");
        assert_eq!(cep("12345"), "12345");
        assert_eq!(cep("123456"), "12345-6");
    }

    #[test]
    fn phone_masks_area_code_and_hyphen() {
        assert_eq!(phone("11912345678"), "(11) 91234-5678");
        assert_eq!(phone("11"), "(11");
        assert_eq!(phone("119"), "(11) 9");
    }

    #[test]
    fn formatters_are_idempotent() {
        for raw in ["4111111111111111", "4111 1111 11"] {
            let once = card_number(raw);
            assert_eq!(card_number(&once), once);
        }
        let once = cpf("12345678901");
        assert_eq!(cpf(&once), once);
        let once = cep("12345678");
        assert_eq!(cep(&once), once);
        let once = phone("11912345678");
        assert_eq!(phone(&once), once);
    }
}
