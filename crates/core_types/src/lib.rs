pub type PageId = u64;
pub type RequestId = u64;

/// Stable identity of one highlighted code region. Generated once and cached
/// as an attribute on the element, so repeated observation returns the same id.
pub type BlockId = String;

/// Stable identity of one addressable lexical token inside a code block.
/// Base-36 counter encoding, assigned in document order.
pub type TokenId = String;

/// Attribute carrying a token's id on its wrapping element.
pub const TOKEN_ID_ATTR: &str = "data-token-id";

/// Attribute marking an element as programmatically inserted by the splitter.
pub const WRAPPED_ATTR: &str = "data-hoverlay-wrapped";

/// Attribute carrying a code block's id on its root element.
pub const BLOCK_ID_ATTR: &str = "data-code-block-id";

pub fn encode_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
