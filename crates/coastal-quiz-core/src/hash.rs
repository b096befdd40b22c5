//! Answer canonicalisation and digests.
//!
//! Answer keys are published inside question-set JSON, so they are stored as
//! SHA-256 digests of a canonical form instead of in plain text. This is
//! obfuscation only: there is no salt and no secret, and anyone can hash the
//! candidate answers themselves. It keeps a student from reading the key off
//! the file, nothing more.
//!
//! Canonical forms:
//! - multiple choice: the option key as written
//! - multiple selection: each option key on its own, compared as a set
//! - text: the answer lower-cased
//! - numeric: see [`canonical_number`]

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest as _, Sha256};

use crate::error::QuizError;
use crate::kind::QuestionKind;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_LEN: usize = 64;

/// Largest numeric precision, in decimal places. Past this an `f64` carries
/// no more significant digits.
pub const MAX_PRECISION: u32 = 15;

/// A hex-encoded SHA-256 digest of a canonical answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Digest an already canonical string.
    pub fn of(canonical: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        Digest(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Digest {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == DIGEST_LEN && s.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Digest(s.to_ascii_lowercase()))
        } else {
            Err(QuizError::InvalidDigest(s.to_string()))
        }
    }
}

impl TryFrom<String> for Digest {
    type Error = QuizError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

/// The digest(s) produced for one authored or submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashedAnswer {
    Single(Digest),
    /// One digest per selected key; order carries no meaning.
    Set(BTreeSet<Digest>),
}

impl HashedAnswer {
    /// JSON form written into hashed question sets.
    pub fn to_value(&self) -> Value {
        match self {
            HashedAnswer::Single(d) => Value::String(d.to_string()),
            HashedAnswer::Set(ds) => {
                Value::Array(ds.iter().map(|d| Value::String(d.to_string())).collect())
            }
        }
    }
}

/// Digest a multiple-choice option key.
pub fn hash_choice(key: &str) -> Digest {
    Digest::of(key)
}

/// Digest every key of a multiple-selection answer.
pub fn hash_selection<I, S>(keys: I) -> BTreeSet<Digest>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter().map(|k| Digest::of(k.as_ref())).collect()
}

/// Digest a free-text answer, case-insensitively.
pub fn hash_text(answer: &str) -> Digest {
    Digest::of(&answer.to_lowercase())
}

/// Digest a numeric answer after canonicalising it to `precision`.
pub fn hash_numeric(value: f64, precision: Option<u32>) -> Result<Digest, QuizError> {
    Ok(Digest::of(&canonical_number(value, precision)?))
}

/// Canonical text of a numeric answer.
///
/// With a positive `precision` the value is rounded to that many decimal
/// places, half away from zero, and rendered with exactly that many decimals:
/// `0.334` and `0.326` both become `"0.33"`, `0.335` becomes `"0.34"`.
/// Rounding works on the shortest decimal representation of the `f64`, so
/// binary noise such as `2.675` being stored as `2.67499…` does not leak into
/// the result.
///
/// With no precision, or a precision of zero, the shortest round-trip
/// rendering is used as is: `4`, `4.0` and `4.00` all render `"4"`, but `4.4`
/// does not match `4`.
///
/// Negative zero renders as zero. NaN and infinities are rejected, as is a
/// precision above [`MAX_PRECISION`].
pub fn canonical_number(value: f64, precision: Option<u32>) -> Result<String, QuizError> {
    if !value.is_finite() {
        return Err(QuizError::InvalidNumberFormat(value.to_string()));
    }
    if let Some(p) = precision.filter(|p| *p > MAX_PRECISION) {
        return Err(precision_out_of_range(p));
    }
    let value = if value == 0.0 { 0.0 } else { value };

    match precision.filter(|p| *p > 0) {
        Some(places) => Ok(round_half_away(value, places as usize)),
        None => Ok(value.to_string()),
    }
}

fn round_half_away(value: f64, places: usize) -> String {
    // f64's Display never switches to exponent notation
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes().get(places).is_some_and(|d| *d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - places;
    let render = |ds: &[u8]| ds.iter().map(|d| char::from(b'0' + d)).collect::<String>();

    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() && digits.iter().any(|d| *d != 0) {
        out.push('-');
    }
    out.push_str(&render(&digits[..split]));
    out.push('.');
    out.push_str(&render(&digits[split..]));
    out
}

pub(crate) fn precision_out_of_range(precision: impl fmt::Display) -> QuizError {
    QuizError::InvalidField {
        field: "precision",
        reason: format!("{precision} exceeds {MAX_PRECISION} decimal places"),
    }
}

/// Hash a loosely typed answer value for the given kind tag.
///
/// This is the entry point used when hashing question sets at authoring time,
/// where answers arrive as raw JSON. Selection answers must be an array of
/// option keys; numeric answers may be JSON numbers or numeric strings.
pub fn hash_answer(
    answer: &Value,
    kind: &str,
    precision: Option<u32>,
) -> Result<HashedAnswer, QuizError> {
    let kind: QuestionKind = kind.parse()?;
    let invalid = |reason: &str| QuizError::InvalidAnswer {
        kind,
        reason: reason.to_string(),
    };

    match kind {
        QuestionKind::MultipleChoice => match answer {
            Value::String(key) => Ok(HashedAnswer::Single(hash_choice(key))),
            Value::Number(n) => Ok(HashedAnswer::Single(hash_choice(&n.to_string()))),
            _ => Err(invalid("expected an option key")),
        },
        QuestionKind::MultipleSelection => {
            let keys = answer
                .as_array()
                .ok_or_else(|| invalid("expected a list of option keys"))?
                .iter()
                .map(|k| match k {
                    Value::String(s) => Ok(s.clone()),
                    Value::Number(n) => Ok(n.to_string()),
                    _ => Err(invalid("option keys must be strings")),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(HashedAnswer::Set(hash_selection(keys)))
        }
        QuestionKind::Text => match answer {
            Value::String(text) => Ok(HashedAnswer::Single(hash_text(text))),
            _ => Err(invalid("expected a string")),
        },
        QuestionKind::Numeric => {
            let value = match answer {
                Value::Number(n) => n
                    .as_f64()
                    .ok_or_else(|| QuizError::InvalidNumberFormat(n.to_string()))?,
                Value::String(s) => parse_number(s)?,
                _ => return Err(invalid("expected a number")),
            };
            Ok(HashedAnswer::Single(hash_numeric(value, precision)?))
        }
    }
}

/// Parse user or authored numeric text. Surrounding whitespace is ignored;
/// NaN and infinities are rejected.
pub fn parse_number(input: &str) -> Result<f64, QuizError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| QuizError::InvalidNumberFormat(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn digest_is_sha256_hex() {
        assert_eq!(
            Digest::of("a").as_str(),
            "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb"
        );
        assert_eq!(Digest::of("").as_str().len(), DIGEST_LEN);
    }

    #[test]
    fn hashing_is_deterministic_for_every_kind() {
        let cases = [
            (json!("a"), "multiple_choice"),
            (json!(["a", "c"]), "multiple_selection"),
            (json!("Some answer"), "text"),
            (json!(0.33), "numeric"),
        ];
        for (answer, kind) in cases {
            assert_eq!(
                hash_answer(&answer, kind, Some(2)).unwrap(),
                hash_answer(&answer, kind, Some(2)).unwrap(),
                "{kind} digest should be stable"
            );
        }
    }

    #[test]
    fn text_is_case_insensitive() {
        assert_eq!(hash_text("Paris"), hash_text("paris"));
        assert_eq!(hash_text("PARIS"), hash_text("paris"));
        // no trimming
        assert_ne!(hash_text("paris "), hash_text("paris"));
    }

    #[test]
    fn numeric_rounds_to_decimal_places() {
        assert_eq!(
            hash_numeric(0.334, Some(2)).unwrap(),
            hash_numeric(0.326, Some(2)).unwrap()
        );
        assert_eq!(
            hash_numeric(0.33, Some(2)).unwrap(),
            hash_numeric(0.334, Some(2)).unwrap()
        );
        assert_ne!(
            hash_numeric(0.33, Some(2)).unwrap(),
            hash_numeric(0.34, Some(2)).unwrap()
        );
    }

    #[test]
    fn canonical_number_half_away_from_zero() {
        assert_eq!(canonical_number(0.335, Some(2)).unwrap(), "0.34");
        assert_eq!(canonical_number(-0.335, Some(2)).unwrap(), "-0.34");
        assert_eq!(canonical_number(2.675, Some(2)).unwrap(), "2.68");
        assert_eq!(canonical_number(9.995, Some(2)).unwrap(), "10.00");
        assert_eq!(canonical_number(99.96, Some(1)).unwrap(), "100.0");
        assert_eq!(canonical_number(4.0, Some(2)).unwrap(), "4.00");
        assert_eq!(canonical_number(35.0, Some(3)).unwrap(), "35.000");
    }

    #[test]
    fn canonical_number_normalises_negative_zero() {
        assert_eq!(canonical_number(-0.001, Some(2)).unwrap(), "0.00");
        assert_eq!(canonical_number(-0.0, None).unwrap(), "0");
    }

    #[test]
    fn canonical_number_without_precision() {
        assert_eq!(canonical_number(4.0, None).unwrap(), "4");
        assert_eq!(canonical_number(4.0, Some(0)).unwrap(), "4");
        assert_eq!(canonical_number(4.4, Some(0)).unwrap(), "4.4");
        assert_eq!(canonical_number(0.1, None).unwrap(), "0.1");
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        assert!(matches!(
            canonical_number(f64::NAN, None),
            Err(QuizError::InvalidNumberFormat(_))
        ));
        assert!(parse_number("inf").is_err());
        assert!(parse_number("NaN").is_err());
        assert!(parse_number("four").is_err());
        assert_eq!(parse_number(" 4.00 ").unwrap(), 4.0);
    }

    #[test]
    fn numeric_answers_from_strings_and_numbers_agree() {
        assert_eq!(
            hash_answer(&json!(4), "numeric", None).unwrap(),
            hash_answer(&json!("4.0"), "numeric", None).unwrap()
        );
    }

    #[test]
    fn selection_hashes_each_key() {
        let hashed = hash_answer(&json!(["c", "a"]), "multiple_selection", None).unwrap();
        assert_eq!(hashed, HashedAnswer::Set(hash_selection(["a", "c"])));
        assert_eq!(hashed.to_value().as_array().unwrap().len(), 2);
    }

    #[test]
    fn unsupported_kind_is_an_error() {
        let err = hash_answer(&json!("a"), "essay", None).unwrap_err();
        assert_eq!(err, QuizError::UnsupportedQuestionKind("essay".into()));
    }

    #[test]
    fn wrong_answer_shape_is_an_error() {
        assert!(matches!(
            hash_answer(&json!("a"), "multiple_selection", None),
            Err(QuizError::InvalidAnswer { .. })
        ));
        assert!(matches!(
            hash_answer(&json!(3), "text", None),
            Err(QuizError::InvalidAnswer { .. })
        ));
    }

    #[test]
    fn digest_parsing_validates_and_lowercases() {
        let upper = Digest::of("a").as_str().to_uppercase();
        assert_eq!(upper.parse::<Digest>().unwrap(), Digest::of("a"));
        assert!("a".parse::<Digest>().is_err());
        assert!("z".repeat(DIGEST_LEN).parse::<Digest>().is_err());
    }

    #[test]
    fn digest_serde_rejects_plain_answers() {
        assert!(serde_json::from_value::<Digest>(json!("Paris")).is_err());
        let d: Digest = serde_json::from_value(json!(Digest::of("a").as_str())).unwrap();
        assert_eq!(d, Digest::of("a"));
    }

    #[test]
    fn precision_is_bounded() {
        assert_eq!(
            canonical_number(1.0, Some(MAX_PRECISION)).unwrap(),
            "1.000000000000000"
        );
        for precision in [MAX_PRECISION + 1, 4_000_000_000] {
            assert!(matches!(
                canonical_number(0.33, Some(precision)),
                Err(QuizError::InvalidField { field: "precision", .. })
            ));
            assert!(hash_answer(&json!(0.33), "numeric", Some(precision)).is_err());
        }
    }
}
