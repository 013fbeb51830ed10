use super::ignore;
use super::scan::Scanner;
use crate::config::{Config, UnknownFields};
use crate::de::{Deserialize, Numeral, Place, Seq, Tuple};
use crate::meta::Classify;
use crate::types::Token;
use crate::visit::{AcceptWriter, WriteVisitor};
use crate::{Error, Result};

use tracing::{debug, trace};

/// Deserialize a JSON string into a default-constructed value.
pub fn from_str<T: Classify + Deserialize + Default>(j: &str) -> Result<T> {
    from_str_with(j, &Config::default())
}

pub fn from_str_with<T: Classify + Deserialize + Default>(j: &str, config: &Config) -> Result<T> {
    let mut out = T::default();
    from_str_into_with(j, &mut out, config)?;
    Ok(out)
}

/// Deserialize a JSON string into an existing value. The whole input must be
/// one fragment, optionally surrounded by whitespace.
pub fn from_str_into<T: Classify + Deserialize>(j: &str, target: &mut T) -> Result<()> {
    from_str_into_with(j, target, &Config::default())
}

pub fn from_str_into_with<T: Classify + Deserialize>(j: &str, target: &mut T, config: &Config) -> Result<()> {
    let mut scanner = Scanner::with_config(j, *config);
    scanner.read(target)?;
    scanner.finish()
}

impl<'a> Scanner<'a> {
    /// Decode the next JSON fragment into `target`, stopping right after it.
    ///
    /// On failure the target may be partially written.
    pub fn read<T: Classify + Deserialize>(&mut self, target: &mut T) -> Result<&mut Self> {
        trace!(category = ?T::CATEGORY, offset = self.position(), "decoding value");
        if let Err(err) = decode(self, target) {
            debug!(%err, "decoding failed");
            return Err(err);
        }
        Ok(self)
    }
}

fn decode(scanner: &mut Scanner<'_>, target: &mut dyn Deserialize) -> Result<()> {
    match target.begin() {
        Place::Bool(b) => *b = parse_bool(scanner)?,
        Place::Number(n) => parse_number(scanner, n)?,
        Place::Char(c) => *c = parse_char(scanner)?,
        Place::Str(s) => {
            scanner.expect('"')?;
            *s = scanner.parse_str()?.into_owned();
        }
        Place::Seq(mut seq) => scanner.nest(|scanner| decode_seq(scanner, &mut *seq))?,
        Place::Tuple(tuple) => scanner.nest(|scanner| decode_tuple(scanner, tuple))?,
        Place::Aggregate(aggregate) => scanner.nest(|scanner| decode_aggregate(scanner, aggregate))?,
    }
    Ok(())
}

fn parse_bool(scanner: &mut Scanner<'_>) -> Result<bool> {
    scanner.skip_whitespace();
    let offset = scanner.position();
    match scanner.word() {
        "true" => Ok(true),
        "false" => Ok(false),
        word => Err(Error::StructuralMismatch {
            expected: Token::Boolean,
            found: if word.is_empty() {
                scanner.peek().into()
            } else {
                Token::Literal(word.to_owned())
            },
            offset,
        }),
    }
}

fn parse_number(scanner: &mut Scanner<'_>, slot: &mut dyn Numeral) -> Result<()> {
    scanner.skip_whitespace();
    let offset = scanner.position();
    let text = scanner.numeral();
    if text.is_empty() {
        return Err(Error::StructuralMismatch {
            expected: Token::Number,
            found: scanner.peek().into(),
            offset,
        });
    }
    if !slot.assign(text) {
        return Err(Error::InvalidNumber {
            text: text.to_owned(),
            offset,
        });
    }
    Ok(())
}

fn parse_char(scanner: &mut Scanner<'_>) -> Result<char> {
    scanner.expect('"')?;
    let offset = scanner.position();
    let text = scanner.parse_str()?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::InvalidCharacter {
            text: text.into_owned(),
            offset,
        }),
    }
}

fn decode_seq(scanner: &mut Scanner<'_>, seq: &mut dyn Seq) -> Result<()> {
    scanner.expect('[')?;
    if !scanner.close_if_empty(']') {
        loop {
            let offset = scanner.position();
            let expected = seq.fixed_len().unwrap_or_default();
            match seq.element() {
                Some(element) => decode(scanner, element)?,
                None => return Err(Error::LengthMismatch { expected, offset }),
            }
            if !scanner.separator(']')? {
                break;
            }
        }
    }
    if seq.finish() {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            expected: seq.fixed_len().unwrap_or_default(),
            offset: scanner.position(),
        })
    }
}

fn decode_tuple(scanner: &mut Scanner<'_>, tuple: &mut dyn Tuple) -> Result<()> {
    scanner.expect('{')?;
    for index in 0..tuple.arity() {
        if index > 0 {
            scanner.expect(',')?;
        }
        expect_key(scanner, &(index + 1).to_string())?;
        scanner.expect(':')?;
        if let Some(element) = tuple.element(index) {
            decode(scanner, element)?;
        }
    }
    scanner.expect('}')
}

fn expect_key(scanner: &mut Scanner<'_>, key: &str) -> Result<()> {
    scanner.expect('"')?;
    let offset = scanner.position() - 1;
    let found = scanner.parse_str()?;
    if found == key {
        Ok(())
    } else {
        Err(Error::StructuralMismatch {
            expected: Token::Literal(format!("\"{}\"", key)),
            found: Token::Literal(format!("\"{}\"", found)),
            offset,
        })
    }
}

fn decode_aggregate(scanner: &mut Scanner<'_>, aggregate: &mut dyn AcceptWriter) -> Result<()> {
    scanner.expect('{')?;
    if scanner.close_if_empty('}') {
        return Ok(());
    }
    loop {
        scanner.expect('"')?;
        let offset = scanner.position() - 1;
        let key = scanner.parse_str()?;
        scanner.expect(':')?;

        let mut field = FieldReader {
            key: &key,
            scanner: &mut *scanner,
            outcome: None,
        };
        aggregate.accept_writer(&mut field);
        match field.outcome {
            Some(outcome) => outcome?,
            None => match scanner.config().unknown_fields {
                UnknownFields::Reject => {
                    return Err(Error::UnknownField {
                        name: key.into_owned(),
                        offset,
                    })
                }
                UnknownFields::Skip => {
                    debug!(field = %key, offset, "skipping unknown field");
                    ignore::skip_value(scanner)?;
                }
            },
        }

        if !scanner.separator('}')? {
            return Ok(());
        }
    }
}

/// Decodes the value under one object key into the field of that name.
struct FieldReader<'k, 's, 'a> {
    key: &'k str,
    scanner: &'s mut Scanner<'a>,
    outcome: Option<Result<()>>,
}

impl WriteVisitor for FieldReader<'_, '_, '_> {
    fn visit(&mut self, name: &str, value: &mut dyn Deserialize) {
        if self.outcome.is_none() && name == self.key {
            self.outcome = Some(decode(self.scanner, value));
        }
    }
}

#[cfg(test)]
#[allow(clippy::approx_constant)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

    #[test]
    fn booleans() {
        assert_eq!(from_str::<bool>("true"), Ok(true));
        assert_eq!(from_str::<bool>(" false "), Ok(false));
        let mut v = true;
        from_str_into("false", &mut v).unwrap();
        assert!(!v);
    }

    #[test]
    fn boolean_literal_must_be_exact() {
        assert_eq!(
            from_str::<bool>("truth"),
            Err(Error::StructuralMismatch {
                expected: Token::Boolean,
                found: Token::Literal("truth".into()),
                offset: 0,
            })
        );
        assert_eq!(
            from_str::<bool>("1"),
            Err(Error::StructuralMismatch {
                expected: Token::Boolean,
                found: Token::Char('1'),
                offset: 0,
            })
        );
    }

    #[test]
    fn numbers() {
        assert_eq!(from_str::<i32>("7"), Ok(7));
        assert_eq!(from_str::<i64>("-9223372036854775808"), Ok(i64::MIN));
        assert_eq!(from_str::<f64>("3.14"), Ok(3.14));
        assert_eq!(from_str::<f32>("-1.5e2"), Ok(-150.0));
        assert_eq!(from_str::<u8>("\n 42"), Ok(42));
    }

    #[test]
    fn malformed_numbers() {
        assert_eq!(
            from_str::<i32>("3.5"),
            Err(Error::InvalidNumber { text: "3.5".into(), offset: 0 })
        );
        assert_eq!(
            from_str::<u8>("300"),
            Err(Error::InvalidNumber { text: "300".into(), offset: 0 })
        );
        assert_eq!(
            from_str::<f64>("1.2.3"),
            Err(Error::InvalidNumber { text: "1.2.3".into(), offset: 0 })
        );
        assert_eq!(
            from_str::<i32>("\"7\""),
            Err(Error::StructuralMismatch {
                expected: Token::Number,
                found: Token::Char('"'),
                offset: 0,
            })
        );
    }

    #[test]
    fn strings() {
        assert_eq!(from_str::<String>(r#""hello""#), Ok("hello".to_owned()));
        assert_eq!(from_str::<String>(r#""say \"hi\"""#), Ok("say \"hi\"".to_owned()));
        let mut s = String::from("previous");
        from_str_into(r#""next""#, &mut s).unwrap();
        assert_eq!(s, "next");
    }

    #[test]
    fn characters() {
        assert_eq!(from_str::<char>(r#""x""#), Ok('x'));
        assert_eq!(from_str::<char>(r#""\n""#), Ok('\n'));
        assert_eq!(
            from_str::<char>(r#""xy""#),
            Err(Error::InvalidCharacter { text: "xy".into(), offset: 1 })
        );
        assert!(matches!(from_str::<char>(r#""""#), Err(Error::InvalidCharacter { .. })));
    }

    #[test]
    fn containers() {
        assert_eq!(from_str::<Vec<i32>>("[3,7,11]"), Ok(vec![3, 7, 11]));
        assert_eq!(from_str::<Vec<i32>>(" [ 3 , 7 ,11 ] "), Ok(vec![3, 7, 11]));
        assert_eq!(from_str::<Vec<i32>>("[]"), Ok(vec![]));
        assert_eq!(from_str::<Vec<Vec<u8>>>("[[1],[],[2,3]]"), Ok(vec![vec![1], vec![], vec![2, 3]]));
        assert_eq!(from_str::<VecDeque<char>>(r#"["a","b"]"#), Ok(VecDeque::from(vec!['a', 'b'])));
        assert_eq!(from_str::<BTreeSet<i8>>("[2,1,2]"), Ok(BTreeSet::from([1, 2])));
    }

    #[test]
    fn container_delimiters() {
        assert_eq!(
            from_str::<Vec<i32>>("[1 2]"),
            Err(Error::StructuralMismatch {
                expected: Token::Either(',', ']'),
                found: Token::Char('2'),
                offset: 3,
            })
        );
        assert_eq!(
            from_str::<Vec<i32>>("[1,2"),
            Err(Error::StructuralMismatch {
                expected: Token::Either(',', ']'),
                found: Token::EndOfInput,
                offset: 4,
            })
        );
        assert!(matches!(
            from_str::<Vec<i32>>("[1,]"),
            Err(Error::StructuralMismatch { expected: Token::Number, .. })
        ));
        assert!(matches!(
            from_str::<Vec<i32>>("{}"),
            Err(Error::StructuralMismatch { expected: Token::Char('['), .. })
        ));
    }

    // Decoding appends to whatever the container already holds; callers that
    // want replacement clear the target first.
    #[test]
    fn decoding_into_non_empty_vec_appends() {
        let mut v = vec![1, 2];
        from_str_into("[3]", &mut v).unwrap();
        assert_eq!(v, [1, 2, 3]);
        from_str_into("[]", &mut v).unwrap();
        assert_eq!(v, [1, 2, 3]);
    }

    #[test]
    fn maps_decode_from_entry_tuples() {
        let text = r#"[{"1":"b","2":[2]},{"1":"a","2":[]}]"#;
        let expected = BTreeMap::from([("a".to_owned(), vec![]), ("b".to_owned(), vec![2u8])]);
        assert_eq!(from_str::<BTreeMap<String, Vec<u8>>>(text), Ok(expected));
        assert_eq!(
            from_str::<HashMap<char, bool>>(r#"[{"1":"y","2":true}]"#),
            Ok(HashMap::from([('y', true)]))
        );
        assert!(matches!(
            from_str::<BTreeMap<u8, u8>>("[[1,2]]"),
            Err(Error::StructuralMismatch { expected: Token::Char('{'), .. })
        ));
    }

    // Existing keys stay unless the input names them again.
    #[test]
    fn decoding_into_non_empty_map_merges() {
        let mut map = BTreeMap::from([(1, 10), (2, 20)]);
        from_str_into(r#"[{"1":2,"2":-1},{"1":3,"2":30}]"#, &mut map).unwrap();
        assert_eq!(map, BTreeMap::from([(1, 10), (2, -1), (3, 30)]));
    }

    #[test]
    fn fixed_arrays_are_filled_in_place() {
        let mut a = [0u16; 3];
        from_str_into("[4,5,6]", &mut a).unwrap();
        assert_eq!(a, [4, 5, 6]);
        assert_eq!(from_str::<[u16; 2]>("[1,2,3]"), Err(Error::LengthMismatch { expected: 2, offset: 5 }));
        assert_eq!(from_str::<[u16; 2]>("[1]"), Err(Error::LengthMismatch { expected: 2, offset: 3 }));
        assert_eq!(from_str::<[u16; 2]>("[]"), Err(Error::LengthMismatch { expected: 2, offset: 2 }));
        assert_eq!(from_str::<[u16; 0]>("[]"), Ok([]));
    }

    #[test]
    fn tuples() {
        let mut v = (13, 2.71, String::from("bye"));
        from_str_into(r#"{"1":7,"2":3.14,"3":"hello"}"#, &mut v).unwrap();
        assert_eq!(v, (7, 3.14, String::from("hello")));
        assert_eq!(from_str::<(bool,)>(r#" { "1" : true } "#), Ok((true,)));
    }

    #[test]
    fn tuple_keys_follow_positions() {
        assert_eq!(
            from_str::<(i32, i32)>(r#"{"2":1,"1":2}"#),
            Err(Error::StructuralMismatch {
                expected: Token::Literal("\"1\"".into()),
                found: Token::Literal("\"2\"".into()),
                offset: 1,
            })
        );
        assert!(matches!(
            from_str::<(i32,)>(r#"{"1":1,"2":2}"#),
            Err(Error::StructuralMismatch { expected: Token::Char('}'), .. })
        ));
        assert!(matches!(
            from_str::<(i32, i32)>(r#"{"1":1}"#),
            Err(Error::StructuralMismatch { expected: Token::Char(','), .. })
        ));
    }

    #[test]
    fn scanner_reads_consecutive_fragments() {
        let mut scanner = Scanner::new(r#"true [1,2] "x" rest"#);
        let (mut b, mut v, mut s) = (false, Vec::<u8>::new(), String::new());
        scanner.read(&mut b).unwrap().read(&mut v).unwrap().read(&mut s).unwrap();
        assert_eq!((b, v, s.as_str()), (true, vec![1, 2], "x"));
        assert_eq!(scanner.remaining(), " rest");
        assert!(!scanner.is_at_end());
    }

    #[test]
    fn read_stops_at_the_closing_delimiter() {
        let mut scanner = Scanner::new("[1]]");
        let mut v = Vec::<i32>::new();
        scanner.read(&mut v).unwrap();
        assert_eq!(scanner.position(), 3);
        assert_eq!(scanner.finish(), Err(Error::TrailingCharacters { offset: 3 }));
        assert_eq!(from_str::<i32>("1 2"), Err(Error::TrailingCharacters { offset: 2 }));
    }

    #[test]
    fn empty_input_is_a_mismatch() {
        assert!(matches!(
            from_str::<Vec<i32>>(""),
            Err(Error::StructuralMismatch { found: Token::EndOfInput, .. })
        ));
        assert!(matches!(
            from_str::<bool>("   "),
            Err(Error::StructuralMismatch { found: Token::EndOfInput, .. })
        ));
    }

    #[test]
    fn depth_is_bounded() {
        let config = Config::default().with_max_depth(2);
        assert_eq!(from_str_with::<Vec<Vec<u8>>>("[[1]]", &config), Ok(vec![vec![1]]));
        assert!(matches!(
            from_str_with::<Vec<Vec<Vec<u8>>>>("[[[1]]]", &config),
            Err(Error::DepthLimitExceeded { limit: 2, .. })
        ));
    }
}
