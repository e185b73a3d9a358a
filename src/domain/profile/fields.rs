//! Per-field validators.
//!
//! Each validator trims its input, then applies its rules in order and reports only the
//! first one that fails.

use super::email::is_valid_address;
use super::{Field, FieldError, FieldResult, FieldRule};
use regex::Regex;
use std::sync::LazyLock;

pub const FULL_NAME_REQUIRED: &str = "Полное имя обязательно для заполнения";
pub const FULL_NAME_LENGTH: &str = "Полное имя должно содержать от 2 до 100 символов";
pub const FULL_NAME_FORMAT: &str =
    "Полное имя может содержать только буквы, пробелы, дефисы и апострофы";
pub const EMAIL_REQUIRED: &str = "Email обязателен для заполнения";
pub const EMAIL_LENGTH: &str = "Email не должен превышать 255 символов";
pub const EMAIL_FORMAT: &str = "Некорректный формат email адреса";
pub const PHONE_REQUIRED: &str = "Телефон обязателен для заполнения";
pub const PHONE_LENGTH: &str = "Телефон должен содержать от 7 до 20 символов";
pub const PHONE_FORMAT: &str = "Телефон может содержать только цифры, +, пробелы, дефисы и скобки";
pub const AGE_REQUIRED: &str = "Возраст обязателен для заполнения";
pub const AGE_RANGE: &str = "Возраст должен быть от 0 до 120 лет";

const FULL_NAME_MIN_CHARS: usize = 2;
const FULL_NAME_MAX_CHARS: usize = 100;
const EMAIL_MAX_CHARS: usize = 255;
const PHONE_MIN_CHARS: usize = 7;
const PHONE_MAX_CHARS: usize = 20;
const MIN_AGE: i32 = 0;
const MAX_AGE: i32 = 120;

// Latin and Cyrillic letters (Ё/ё sit outside А-я), any Unicode whitespace, hyphen,
// apostrophe.
static FULL_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-zА-Яа-яЁё\s'\-]+$").expect("full name pattern compiles")
});

/// Strips the characters the form transport may pad values with.
pub fn sanitize(raw: &str) -> &str {
    raw.trim_matches(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B'))
}

fn is_ascii_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

fn is_phone_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')') || is_ascii_space(c)
}

pub fn validate_full_name(raw: &str) -> FieldResult<String> {
    let name = sanitize(raw);
    if name.is_empty() {
        return Err(FieldError::new(Field::FullName, FieldRule::Required, FULL_NAME_REQUIRED));
    }
    let len = name.chars().count();
    if !(FULL_NAME_MIN_CHARS..=FULL_NAME_MAX_CHARS).contains(&len) {
        return Err(FieldError::new(Field::FullName, FieldRule::Length, FULL_NAME_LENGTH));
    }
    if !FULL_NAME_PATTERN.is_match(name) {
        return Err(FieldError::new(Field::FullName, FieldRule::Format, FULL_NAME_FORMAT));
    }
    Ok(name.to_string())
}

pub fn validate_email(raw: &str) -> FieldResult<String> {
    let email = sanitize(raw);
    if email.is_empty() {
        return Err(FieldError::new(Field::Email, FieldRule::Required, EMAIL_REQUIRED));
    }
    if email.chars().count() > EMAIL_MAX_CHARS {
        return Err(FieldError::new(Field::Email, FieldRule::Length, EMAIL_LENGTH));
    }
    if !is_valid_address(email) {
        return Err(FieldError::new(Field::Email, FieldRule::Format, EMAIL_FORMAT));
    }
    Ok(email.to_string())
}

/// Validates a phone number.
///
/// The length bound applies to the value with every non-phone character removed, while the
/// character-class check applies to the value as typed. The typed value is what gets stored.
pub fn validate_phone(raw: &str) -> FieldResult<String> {
    let phone = sanitize(raw);
    if phone.is_empty() {
        return Err(FieldError::new(Field::Phone, FieldRule::Required, PHONE_REQUIRED));
    }
    let stripped_len = phone.chars().filter(|c| is_phone_char(*c)).count();
    if !(PHONE_MIN_CHARS..=PHONE_MAX_CHARS).contains(&stripped_len) {
        return Err(FieldError::new(Field::Phone, FieldRule::Length, PHONE_LENGTH));
    }
    if !phone.chars().all(is_phone_char) {
        return Err(FieldError::new(Field::Phone, FieldRule::Format, PHONE_FORMAT));
    }
    Ok(phone.to_string())
}

/// Validates an age.
///
/// Only a blank value counts as missing; `"0"` is a valid age. The number is read with
/// [`coerce_integer`], so trailing garbage is ignored and text without a leading number
/// reads as 0.
pub fn validate_age(raw: &str) -> FieldResult<i32> {
    let age = sanitize(raw);
    if age.is_empty() {
        return Err(FieldError::new(Field::Age, FieldRule::Required, AGE_REQUIRED));
    }
    match i32::try_from(coerce_integer(age)) {
        Ok(value) if (MIN_AGE..=MAX_AGE).contains(&value) => Ok(value),
        _ => Err(FieldError::new(Field::Age, FieldRule::Range, AGE_RANGE)),
    }
}

/// Lenient integer read of the longest leading number.
///
/// The number is an optional sign, digits with an optional fraction, and an optional
/// exponent (`"1.5e1"` reads as 15). It is truncated toward zero. Text without a leading
/// number yields 0 and values past the `i64` range saturate.
pub fn coerce_integer(text: &str) -> i64 {
    let prefix = &text[..numeric_prefix_len(text.as_bytes())];
    // `as` saturates at the i64 bounds.
    prefix.parse::<f64>().map_or(0, |value| value.trunc() as i64)
}

fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |start: usize| {
        start
            + bytes[start..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - end - 1;
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    // An exponent counts only when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_rules() {
        assert_eq!(validate_full_name("").unwrap_err().message(), FULL_NAME_REQUIRED);
        assert_eq!(validate_full_name(" \t ").unwrap_err().message(), FULL_NAME_REQUIRED);
        assert_eq!(validate_full_name("A").unwrap_err().message(), FULL_NAME_LENGTH);
        assert_eq!(
            validate_full_name(&"a".repeat(101)).unwrap_err().message(),
            FULL_NAME_LENGTH
        );
        assert_eq!(validate_full_name("John123").unwrap_err().message(), FULL_NAME_FORMAT);
        assert_eq!(validate_full_name("Анна-Мария").unwrap(), "Анна-Мария");
        assert_eq!(validate_full_name("O'Brien").unwrap(), "O'Brien");
        assert_eq!(validate_full_name("  Пётр Ёлкин  ").unwrap(), "Пётр Ёлкин");
    }

    #[test]
    fn full_name_length_counts_characters_not_bytes() {
        // 100 Cyrillic letters are 200 bytes.
        let name = "Я".repeat(100);
        assert_eq!(validate_full_name(&name).unwrap(), name);
        assert_eq!(
            validate_full_name(&"Я".repeat(101)).unwrap_err().rule(),
            FieldRule::Length
        );
    }

    #[test]
    fn full_name_rejects_letters_outside_latin_and_cyrillic() {
        for name in ["José", "Zoë", "Ґанна", "李小龍", "Anna_Lee"] {
            assert_eq!(
                validate_full_name(name).unwrap_err().rule(),
                FieldRule::Format,
                "{name}"
            );
        }
    }

    #[test]
    fn full_name_accepts_unicode_whitespace() {
        for name in ["Anna\u{00A0}Lee", "Anna\u{2003}Lee", "Иван\u{3000}Петров"] {
            assert_eq!(validate_full_name(name).unwrap(), name);
        }
    }

    #[test]
    fn length_is_checked_before_format() {
        // Both too short and not a letter.
        assert_eq!(validate_full_name("1").unwrap_err().rule(), FieldRule::Length);
    }

    #[test]
    fn email_rules() {
        assert_eq!(validate_email("").unwrap_err().message(), EMAIL_REQUIRED);
        assert_eq!(validate_email("not-an-email").unwrap_err().message(), EMAIL_FORMAT);
        let long = format!("{}@example.com", "a".repeat(244));
        assert_eq!(long.chars().count(), 256);
        assert_eq!(validate_email(&long).unwrap_err().message(), EMAIL_LENGTH);
        assert_eq!(validate_email(" user@example.com\n").unwrap(), "user@example.com");
    }

    #[test]
    fn email_within_length_rule_can_still_exceed_the_address_limit() {
        let domain = format!("{}.{}.{}.com", "b".repeat(63), "c".repeat(63), "d".repeat(58));
        let address = format!("{}@{}", "a".repeat(64), domain);
        assert_eq!(address.chars().count(), 255);
        assert_eq!(validate_email(&address).unwrap_err().rule(), FieldRule::Format);
    }

    #[test]
    fn phone_rules() {
        assert_eq!(validate_phone("").unwrap_err().message(), PHONE_REQUIRED);
        assert_eq!(validate_phone("abc").unwrap_err().message(), PHONE_LENGTH);
        assert_eq!(validate_phone("123456").unwrap_err().message(), PHONE_LENGTH);
        assert_eq!(
            validate_phone("1234567890123456789012").unwrap_err().message(),
            PHONE_LENGTH
        );
        assert_eq!(
            validate_phone("+1 (555) 123-4567").unwrap(),
            "+1 (555) 123-4567"
        );
        assert_eq!(validate_phone("+7 999 123 45 67").unwrap(), "+7 999 123 45 67");
    }

    #[test]
    fn phone_keeps_typed_value_and_rejects_foreign_characters() {
        // Long enough once letters are stripped, but the typed value is not all phone characters.
        assert_eq!(
            validate_phone("+1 555 123 4567 ext").unwrap_err().message(),
            PHONE_FORMAT
        );
        assert_eq!(validate_phone("555.123.4567").unwrap_err().rule(), FieldRule::Format);
    }

    #[test]
    fn age_rules() {
        assert_eq!(validate_age("").unwrap_err().message(), AGE_REQUIRED);
        assert_eq!(validate_age("   ").unwrap_err().message(), AGE_REQUIRED);
        assert_eq!(validate_age("-1").unwrap_err().message(), AGE_RANGE);
        assert_eq!(validate_age("121").unwrap_err().message(), AGE_RANGE);
        assert_eq!(validate_age("0").unwrap(), 0);
        assert_eq!(validate_age("120").unwrap(), 120);
        assert_eq!(validate_age(" 30 ").unwrap(), 30);
    }

    #[test]
    fn age_is_coerced_leniently() {
        assert_eq!(validate_age("150abc").unwrap_err().message(), AGE_RANGE);
        assert_eq!(validate_age("abc").unwrap(), 0);
        assert_eq!(validate_age("42 years").unwrap(), 42);
        assert_eq!(validate_age("12.9").unwrap(), 12);
        assert_eq!(validate_age("+7").unwrap(), 7);
        assert_eq!(validate_age("1e3").unwrap_err().message(), AGE_RANGE);
        assert_eq!(validate_age("1.5e1").unwrap(), 15);
        assert_eq!(validate_age("2.5E+1 years").unwrap(), 25);
        assert_eq!(validate_age("1e").unwrap(), 1);
        assert_eq!(validate_age("4e-1").unwrap(), 0);
        assert_eq!(validate_age("-0.5").unwrap(), 0);
        assert_eq!(validate_age(".9").unwrap(), 0);
        assert_eq!(validate_age("1e400").unwrap_err().rule(), FieldRule::Range);
        assert_eq!(
            validate_age("99999999999999999999999").unwrap_err().rule(),
            FieldRule::Range
        );
    }

    #[test]
    fn coerce_integer_saturates() {
        assert_eq!(coerce_integer("99999999999999999999999"), i64::MAX);
        assert_eq!(coerce_integer("-99999999999999999999999"), i64::MIN);
        assert_eq!(coerce_integer("-"), 0);
        assert_eq!(coerce_integer("--5"), 0);
        assert_eq!(coerce_integer("007"), 7);
        assert_eq!(coerce_integer("-1e400"), i64::MIN);
        assert_eq!(coerce_integer("."), 0);
        assert_eq!(coerce_integer("-.e5"), 0);
        assert_eq!(coerce_integer("12.e1"), 120);
    }

    #[test]
    fn numeric_prefix_stops_at_the_first_non_number_byte() {
        assert_eq!(numeric_prefix_len(b"42 years"), 2);
        assert_eq!(numeric_prefix_len(b"-3.25e+2x"), 8);
        assert_eq!(numeric_prefix_len(b"7e+"), 1);
        assert_eq!(numeric_prefix_len(b"abc"), 0);
        assert_eq!(numeric_prefix_len(b"+"), 0);
    }
}
