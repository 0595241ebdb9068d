//! Comment block tokenizer
//!
//! Locates `/* ... @keyword ... */` blocks in template source. Any mix of
//! whitespace and `*` may sit between the opener and the keyword, so both
//! `/** @break` and
//!
//! ```text
//! /**
//!  * @break
//! ```
//!
//! are recognized. Blocks are yielded in source order with the offset of
//! their opener; offsets count UTF-16 code units so ids match the ones the
//! site build produces for the same file.

/// Keyword pattern to look for after a comment opener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPattern<'k> {
    /// Keyword without the leading `@`
    pub keyword: &'k str,
    /// Require a non-word character (or end of input) after the keyword
    pub word_boundary: bool,
}

impl<'k> BlockPattern<'k> {
    /// Keyword that must end at a word boundary (`@break` but not `@breaks`)
    #[must_use]
    pub const fn word(keyword: &'k str) -> Self {
        Self {
            keyword,
            word_boundary: true,
        }
    }

    /// Keyword matched as a plain prefix
    #[must_use]
    pub const fn prefix(keyword: &'k str) -> Self {
        Self {
            keyword,
            word_boundary: false,
        }
    }
}

/// One matched comment block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentBlock<'s> {
    /// Offset of the `/*` opener, in UTF-16 code units
    pub offset: usize,
    /// Text between the keyword and the closing `*/`
    pub body: &'s str,
}

/// Iterator over every block matching a pattern, in source order
#[derive(Debug, Clone)]
pub struct Blocks<'s, 'k> {
    source: &'s str,
    pattern: BlockPattern<'k>,
    cursor: usize,
}

impl<'s> Iterator for Blocks<'s, '_> {
    type Item = CommentBlock<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(rel) = self.source[self.cursor..].find("/*") {
            let start = self.cursor + rel;
            match match_at(self.source, start, self.pattern) {
                Some((body_start, body_end)) => {
                    self.cursor = body_end + 2;
                    return Some(CommentBlock {
                        offset: utf16_offset(self.source, start),
                        body: &self.source[body_start..body_end],
                    });
                }
                None => self.cursor = start + 1,
            }
        }
        self.cursor = self.source.len();
        None
    }
}

/// All blocks matching `pattern`
#[must_use]
pub fn find_blocks<'s, 'k>(source: &'s str, pattern: BlockPattern<'k>) -> Blocks<'s, 'k> {
    Blocks {
        source,
        pattern,
        cursor: 0,
    }
}

/// First block matching `pattern`, if any
#[must_use]
pub fn find_first<'s>(source: &'s str, pattern: BlockPattern<'_>) -> Option<CommentBlock<'s>> {
    find_blocks(source, pattern).next()
}

/// Try to match a block whose opener is at `start`; returns the body range
fn match_at(source: &str, start: usize, pattern: BlockPattern<'_>) -> Option<(usize, usize)> {
    let after_opener = start + 2;
    let rest = &source[after_opener..];
    let lead = rest
        .char_indices()
        .find(|&(_, c)| !(c.is_whitespace() || c == '*'))
        .map_or(rest.len(), |(i, _)| i);

    let at_keyword = &rest[lead..];
    let tail = at_keyword.strip_prefix('@')?.strip_prefix(pattern.keyword)?;
    if pattern.word_boundary && tail.chars().next().is_some_and(is_word_char) {
        return None;
    }

    let body_start = source.len() - tail.len();
    let body_len = tail.find("*/")?;
    Some((body_start, body_start + body_len))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn utf16_offset(source: &str, byte_offset: usize) -> usize {
    source[..byte_offset].encode_utf16().count()
}

/// Remove the leading `* ` comment-continuation marker from each line
///
/// Only lines with at least one whitespace character before the `* ` are
/// stripped; everything else is kept verbatim.
#[must_use]
pub fn strip_continuation(body: &str) -> String {
    body.split('\n')
        .map(|line| {
            let trimmed = line.trim_start();
            if trimmed.len() < line.len() {
                trimmed.strip_prefix("* ").unwrap_or(line)
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BREAK: BlockPattern<'static> = BlockPattern::word("break");
    const LOCATION: BlockPattern<'static> = BlockPattern::prefix("breaklocation");

    #[test]
    fn finds_multiline_block() {
        let src = "<div>\n{/**\n * @break\n * description: x\n */}\n</div>";
        let blocks: Vec<_> = find_blocks(src, BREAK).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].offset, src.find("/**").unwrap());
        assert_eq!(blocks[0].body, "\n * description: x\n ");
    }

    #[test]
    fn finds_single_line_block() {
        let src = "/* @break description: inline */";
        let block = find_first(src, BREAK).unwrap();
        assert_eq!(block.offset, 0);
        assert_eq!(block.body, " description: inline ");
    }

    #[test]
    fn blocks_come_in_source_order() {
        let src = "/** @break a: 1 */ text /** @break a: 2 */";
        let offsets: Vec<_> = find_blocks(src, BREAK).map(|b| b.offset).collect();
        assert_eq!(offsets, vec![0, 24]);
    }

    #[test]
    fn word_boundary_excludes_longer_keywords() {
        let src = "/** @breaklocation Home */ /** @breaks x */";
        assert_eq!(find_blocks(src, BREAK).count(), 0);
    }

    #[test]
    fn location_keyword_found_separately() {
        let src = "/** @breaklocation Gift Shop */\n/** @break a: 1 */";
        let loc = find_first(src, LOCATION).unwrap();
        assert_eq!(loc.body.trim(), "Gift Shop");
        assert_eq!(find_blocks(src, BREAK).count(), 1);
    }

    #[test]
    fn unrelated_comments_are_skipped() {
        let src = "/* plain comment */ /* another /** @break a: 1 */";
        let block = find_first(src, BREAK).unwrap();
        assert_eq!(block.offset, src.find("/** @break").unwrap());
    }

    #[test]
    fn unterminated_block_is_ignored() {
        assert!(find_first("/** @break never closed", BREAK).is_none());
    }

    #[test]
    fn offsets_count_utf16_units() {
        let src = "é😀/** @break a: 1 */";
        // 'é' is one UTF-16 unit, the emoji is two
        assert_eq!(find_first(src, BREAK).unwrap().offset, 3);
    }

    #[test]
    fn stripping_continuation_markers() {
        let body = "\n * description: x\n * wcag2:\n *   - 1.1.1\n ";
        assert_eq!(
            strip_continuation(body),
            "\ndescription: x\nwcag2:\n  - 1.1.1\n "
        );
    }

    #[test]
    fn stripping_keeps_unmarked_lines() {
        assert_eq!(strip_continuation("*not stripped"), "*not stripped");
        assert_eq!(strip_continuation("  key: value"), "  key: value");
    }

    #[test]
    fn rescanning_is_deterministic() {
        let src = "/** @break a: 1 */\n/**\n * @break\n * a: 2\n */";
        let first: Vec<_> = find_blocks(src, BREAK).collect();
        let second: Vec<_> = find_blocks(src, BREAK).collect();
        assert_eq!(first, second);
    }

    proptest::proptest! {
        #[test]
        fn prop_every_inserted_block_is_found_in_order(
            filler in proptest::collection::vec("[a-z <>{}\n]{0,12}", 1..8),
        ) {
            let mut src = String::new();
            let mut expected = Vec::new();
            for (i, text) in filler.iter().enumerate() {
                src.push_str(text);
                expected.push(src.len());
                src.push_str(&format!("/** @break n: {i} */"));
            }
            let blocks: Vec<_> = find_blocks(&src, BREAK).collect();
            let offsets: Vec<_> = blocks.iter().map(|b| b.offset).collect();
            proptest::prop_assert_eq!(offsets, expected);
            for (i, block) in blocks.iter().enumerate() {
                proptest::prop_assert_eq!(block.body.trim(), format!("n: {i}"));
            }
        }
    }
}
