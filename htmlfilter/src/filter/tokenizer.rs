/// One step of tokenization: literal text followed by a raw tag.
///
/// Either half may be empty. A non-empty `tag` always starts with `<` and
/// ends with the first following `>`, or runs to the end of the input when
/// no `>` follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub tag: &'a str,
}

/// Splits a string into [`Segment`]s covering it without gaps or overlaps.
///
/// ```
/// use htmlfilter::filter::{Segment, Tokenizer};
///
/// let segments: Vec<_> = Tokenizer::new("hi <b>there</b>").collect();
/// assert_eq!(segments[0], Segment { text: "hi ", tag: "<b>" });
/// assert_eq!(segments[1], Segment { text: "there", tag: "</b>" });
/// assert_eq!(segments.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer { s: input, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.s.len()
    }

    fn find_byte(&self, byte: u8, start: usize) -> Option<usize> {
        self.s
            .as_bytes()
            .get(start..)?
            .iter()
            .position(|&b| b == byte)
            .map(|rel| start + rel)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if self.is_eof() {
            return None;
        }

        let len = self.s.len();
        let text_end = self.find_byte(b'<', self.pos).unwrap_or(len);
        let tag_end = if text_end < len {
            self.find_byte(b'>', text_end).map_or(len, |gt| gt + 1)
        } else {
            len
        };

        let segment = Segment {
            text: &self.s[self.pos..text_end],
            tag: &self.s[text_end..tag_end],
        };
        self.pos = tag_end;
        Some(segment)
    }
}

/// Convenience wrapper collecting [`Tokenizer`] output.
pub fn tokenize(input: &str) -> Vec<Segment<'_>> {
    Tokenizer::new(input).collect()
}
