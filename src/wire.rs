//! Request-line parsing for the demo server.
//!
//! Requests are single space-delimited lines; no quoting or escaping is
//! supported. Malformed input is rejected here, before it reaches the
//! ledger.

use bytes::BytesMut;

use crate::error::ProtocolError;
use crate::item::ItemId;

/// Split a request buffer into whitespace-delimited tokens.
///
/// Non-UTF-8 bytes are replaced rather than rejected; the protocol is
/// text-only.
pub fn tokenize(buf: &mut BytesMut) -> Vec<String> {
    let text = String::from_utf8_lossy(&buf[..]).into_owned();
    buf.clear();
    text.split_whitespace().map(str::to_string).collect()
}

/// Parse a decimal item id.
pub fn parse_item_id(token: &str) -> Result<ItemId, ProtocolError> {
    token.parse().map_err(|_| ProtocolError::InvalidArgument {
        what: "item id",
        input: token.to_string(),
    })
}

/// Parse a signed quantity or delta.
pub fn parse_quantity(token: &str) -> Result<i64, ProtocolError> {
    token.parse().map_err(|_| ProtocolError::InvalidArgument {
        what: "quantity",
        input: token.to_string(),
    })
}

/// Parse `<item_id>:<quantity>` reservation pairs, preserving order.
/// Reservation quantities must be positive; signed values are only
/// meaningful for adjustment deltas.
pub fn parse_pairs(tokens: &[String]) -> Result<Vec<(ItemId, i64)>, ProtocolError> {
    if tokens.is_empty() {
        return Err(ProtocolError::MissingArgument("item pairs"));
    }

    tokens
        .iter()
        .map(|token| {
            let (id, qty) =
                token
                    .split_once(':')
                    .ok_or_else(|| ProtocolError::InvalidArgument {
                        what: "item pair",
                        input: token.clone(),
                    })?;
            let item_id = parse_item_id(id)?;
            let quantity = parse_quantity(qty)?;
            if quantity <= 0 {
                return Err(ProtocolError::InvalidArgument {
                    what: "reservation quantity",
                    input: token.clone(),
                });
            }
            Ok((item_id, quantity))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_whitespace() {
        let mut buf = BytesMut::from("reserve O1 1001:5 1002:2");
        assert_eq!(tokenize(&mut buf), vec!["reserve", "O1", "1001:5", "1002:2"]);
    }

    #[test]
    fn tokenize_collapses_repeated_spaces() {
        let mut buf = BytesMut::from("check  1001   44");
        assert_eq!(tokenize(&mut buf), vec!["check", "1001", "44"]);
    }

    #[test]
    fn tokenize_empty_buffer() {
        let mut buf = BytesMut::new();
        assert!(tokenize(&mut buf).is_empty());
    }

    #[test]
    fn pairs_parse_in_order() {
        let tokens = vec!["1001:5".to_string(), "1002:2".to_string()];
        assert_eq!(parse_pairs(&tokens).unwrap(), vec![(1001, 5), (1002, 2)]);
    }

    #[test]
    fn pair_without_colon_is_rejected() {
        let tokens = vec!["1001x5".to_string()];
        assert!(matches!(
            parse_pairs(&tokens),
            Err(ProtocolError::InvalidArgument { what: "item pair", .. })
        ));
    }

    #[test]
    fn empty_pair_list_is_rejected() {
        assert!(matches!(
            parse_pairs(&[]),
            Err(ProtocolError::MissingArgument("item pairs"))
        ));
    }

    #[test]
    fn non_positive_pair_quantities_are_rejected() {
        for token in ["1001:-5", "1001:0"] {
            let tokens = vec![token.to_string()];
            assert!(matches!(
                parse_pairs(&tokens),
                Err(ProtocolError::InvalidArgument {
                    what: "reservation quantity",
                    ..
                })
            ));
        }
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(parse_item_id("laptop").is_err());
        assert!(parse_quantity("-").is_err());
        assert_eq!(parse_quantity("-10").unwrap(), -10);
    }
}
