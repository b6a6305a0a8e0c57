//! Incremental parser for a streamed JSON object list.
//!
//! The model replies with `{ "<key>": [ {…}, {…}, … ] }` delivered as text
//! chunks. This parser emits each top-level array element as soon as its
//! closing brace arrives instead of waiting for the whole reply. Elements
//! that fail to deserialize are logged and skipped; one bad element never
//! corrupts the rest of the stream.
//!
//! Callers must invoke [`ListStreamParser::finish`] when the stream ends:
//! the element before the closing `]` is only seen in the buffer, and a
//! truncated reply may not even carry the `]`. Dropping that flush silently
//! loses the final element.

use serde::de::DeserializeOwned;

#[derive(Debug)]
pub struct ListStreamParser {
    in_array: bool,
    depth: u32,
    in_string: bool,
    escaped: bool,
    buffer: String,
    /// Elements skipped because they failed to deserialize.
    skipped: usize,
}

impl Default for ListStreamParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ListStreamParser {
    pub fn new() -> Self {
        ListStreamParser {
            in_array: false,
            depth: 0,
            in_string: false,
            escaped: false,
            buffer: String::new(),
            skipped: 0,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Feeds one chunk of text, invoking `on_element` for every completed
    /// array element.
    pub fn feed<T, F>(&mut self, chunk: &str, on_element: &mut F)
    where
        T: DeserializeOwned,
        F: FnMut(T),
    {
        for c in chunk.chars() {
            if !self.in_array {
                if c == '[' {
                    self.in_array = true;
                }
                continue;
            }
            if self.in_string {
                self.buffer.push(c);
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == '"' {
                    self.in_string = false;
                }
                continue;
            }
            match c {
                '"' => {
                    self.in_string = true;
                    self.buffer.push(c);
                }
                '{' => {
                    self.depth += 1;
                    self.buffer.push(c);
                }
                '}' => {
                    self.depth = self.depth.saturating_sub(1);
                    self.buffer.push(c);
                }
                ',' if self.depth == 0 => self.flush(on_element),
                ']' if self.depth == 0 => {
                    self.flush(on_element);
                    self.in_array = false;
                }
                _ => self.buffer.push(c),
            }
        }
    }

    /// Flushes the trailing buffered element. Must be called when the stream
    /// ends, otherwise the last element of the array is dropped.
    pub fn finish<T, F>(&mut self, on_element: &mut F)
    where
        T: DeserializeOwned,
        F: FnMut(T),
    {
        self.flush(on_element);
        self.in_array = false;
    }

    fn flush<T, F>(&mut self, on_element: &mut F)
    where
        T: DeserializeOwned,
        F: FnMut(T),
    {
        let raw = std::mem::take(&mut self.buffer);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        match serde_json::from_str::<T>(trimmed) {
            Ok(element) => on_element(element),
            Err(err) => {
                self.skipped += 1;
                log::warn!("skipping malformed stream element: {err}; raw: {trimmed}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ListStreamParser;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        ids: Vec<String>,
    }

    fn collect_one_byte_at_a_time(input: &str) -> (Vec<Item>, usize) {
        let mut parser = ListStreamParser::new();
        let mut items = Vec::new();
        for c in input.chars() {
            parser.feed(&c.to_string(), &mut |item: Item| items.push(item));
        }
        parser.finish(&mut |item: Item| items.push(item));
        (items, parser.skipped())
    }

    #[test]
    fn byte_at_a_time_matches_whole_string_parse() {
        let input = r#"{"hoverHintList":[{"ids":["a"]},{"ids":["b"]},{"ids":["c"]}]}"#;
        let (items, skipped) = collect_one_byte_at_a_time(input);
        assert_eq!(skipped, 0);
        let ids: Vec<&str> = items.iter().map(|i| i.ids[0].as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn elements_are_emitted_before_the_array_closes() {
        let mut parser = ListStreamParser::new();
        let mut items: Vec<Item> = Vec::new();
        parser.feed(r#"{"k":[{"ids":["a"]},"#, &mut |i| items.push(i));
        assert_eq!(items.len(), 1, "first element must arrive before `]`");
        parser.feed(r#"{"ids":["b"]}]}"#, &mut |i| items.push(i));
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn truncated_stream_still_yields_buffered_element_on_finish() {
        let mut parser = ListStreamParser::new();
        let mut items: Vec<Item> = Vec::new();
        // Stream cut off after the last object, before `]`.
        parser.feed(r#"{"k":[{"ids":["a"]},{"ids":["b"]}"#, &mut |i| items.push(i));
        assert_eq!(items.len(), 1);
        parser.finish(&mut |i: Item| items.push(i));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].ids, vec!["b"]);
    }

    #[test]
    fn braces_inside_strings_do_not_break_depth_tracking() {
        let input = r#"{"k":[{"ids":["{a}"]},{"ids":["b,]"]}]}"#;
        let (items, skipped) = collect_one_byte_at_a_time(input);
        assert_eq!(skipped, 0);
        assert_eq!(items[0].ids, vec!["{a}"]);
        assert_eq!(items[1].ids, vec!["b,]"]);
    }

    #[test]
    fn escaped_quotes_inside_strings_are_handled() {
        let input = r#"{"k":[{"ids":["a\"b"]}]}"#;
        let (items, skipped) = collect_one_byte_at_a_time(input);
        assert_eq!(skipped, 0);
        assert_eq!(items[0].ids, vec!["a\"b"]);
    }

    #[test]
    fn malformed_element_is_skipped_without_corrupting_the_rest() {
        let input = r#"{"k":[{"ids":["a"]},{"bogus":1},{"ids":["c"]}]}"#;
        let (items, skipped) = collect_one_byte_at_a_time(input);
        assert_eq!(skipped, 1);
        let ids: Vec<&str> = items.iter().map(|i| i.ids[0].as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn finish_after_clean_close_is_a_no_op() {
        let input = r#"{"k":[{"ids":["a"]}]}"#;
        let (items, skipped) = collect_one_byte_at_a_time(input);
        assert_eq!(skipped, 0);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn whitespace_between_elements_is_tolerated() {
        let input = "{\"k\": [\n  {\"ids\": [\"a\"]},\n  {\"ids\": [\"b\"]}\n]}";
        let (items, skipped) = collect_one_byte_at_a_time(input);
        assert_eq!(skipped, 0);
        assert_eq!(items.len(), 2);
    }
}
