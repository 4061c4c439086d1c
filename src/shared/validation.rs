use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for phone number fields
    /// Digits with an optional leading +, spaces allowed as separators
    /// - Valid: "+212600000000", "06 00 00 00 00"
    /// - Invalid: "abc", "+", "12"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9](?:[0-9 ]{4,18})[0-9]$").unwrap();
}
