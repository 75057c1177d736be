//! Message partitioning: splitting oversized text into chunks that
//! honor a backend's documented size limits.
//!
//! Two algorithms with different units of division:
//!
//! - [`partition_message`] walks an arbitrary char window across the
//!   input, searching backward near each boundary for a word break, and
//!   reports how many chars were dropped against the total limit.
//! - [`message_items_from_lines`] keeps source lines intact (truncating
//!   over-long ones with an ellipsis) and groups them into multiple
//!   independent batches.
//!
//! Both operate on chars (code points), never bytes.

use serde::{Deserialize, Serialize};

/// Suffix appended to a line truncated by [`message_items_from_lines`].
pub const ELLIPSIS: &str = " ...";

/// One bounded chunk of a larger message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageItem {
    pub text: String,
}

impl MessageItem {
    fn from_chars(chars: &[char]) -> Self {
        Self {
            text: chars.iter().collect(),
        }
    }

    /// Chunk length in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A backend's documented constraints: max chars per chunk, max total
/// chars to transmit, max number of chunks/messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLimit {
    pub chunk_size: usize,
    pub total_chunk_size: usize,
    pub chunk_count: usize,
}

/// Split `input` into at most `chunk_count - 1` chunks of at most
/// `chunk_size` chars each, transmitting at most `total_chunk_size`
/// chars overall. One chunk slot is reserved and never filled here;
/// callers that need the full count account for it themselves.
///
/// Near each chunk boundary the split point is moved backward across at
/// most `search_distance` chars to the nearest newline or space, so
/// words are not broken mid-token when a break is close enough. The
/// separator itself is skipped and belongs to neither chunk. When no
/// break is found inside the window the chunk is hard-cut at the naive
/// boundary.
///
/// Returns the chunks and the number of input chars omitted because
/// they exceeded the total limit.
#[must_use]
pub fn partition_message(
    input: &str,
    limits: &MessageLimit,
    search_distance: usize,
) -> (Vec<MessageItem>, usize) {
    let chars: Vec<char> = input.chars().collect();
    if chars.is_empty() {
        return (Vec::new(), 0);
    }

    let effective_total = chars.len().min(limits.total_chunk_size);
    let max_chunks = limits.chunk_count.saturating_sub(1);
    let mut items = Vec::new();
    let mut offset = 0;

    for _ in 0..max_chunks {
        if offset >= effective_total {
            break;
        }

        let naive_end = offset + limits.chunk_size;
        if naive_end >= effective_total {
            items.push(MessageItem::from_chars(&chars[offset..effective_total]));
            offset = effective_total;
            break;
        }

        // Backward scan for the first word break inside the window.
        // Clamped to the chunk start so a pathological distance cannot
        // reach into the previous chunk.
        let window_start = naive_end.saturating_sub(search_distance).max(offset);
        let mut end = naive_end;
        let mut separator = 0;
        for i in (window_start..naive_end).rev() {
            if chars[i] == '\n' || chars[i] == ' ' {
                end = i;
                separator = 1;
                break;
            }
        }

        items.push(MessageItem::from_chars(&chars[offset..end]));
        offset = end + separator;
    }

    (items, chars.len() - offset)
}

/// Split `input` on newlines and group whole lines into batches, each
/// holding at most `chunk_count` items and `total_chunk_size` chars.
///
/// A line longer than the per-line cap (`min(chunk_size,
/// total_chunk_size)`) is truncated and suffixed with [`ELLIPSIS`] so
/// its final length is exactly the cap. Empty lines are dropped.
#[must_use]
pub fn message_items_from_lines(input: &str, limits: &MessageLimit) -> Vec<Vec<MessageItem>> {
    let max_chunk_size = limits.chunk_size.min(limits.total_chunk_size);
    let ellipsis_len = ELLIPSIS.chars().count();

    let mut batches = Vec::new();
    let mut batch: Vec<MessageItem> = Vec::new();
    let mut batch_total = 0;

    for line in input.split('\n') {
        let line_len = line.chars().count();
        let (text, text_len) = if line_len > max_chunk_size {
            // A cap smaller than the ellipsis leaves no room for it;
            // hard-truncate instead of emitting an over-long marker.
            if max_chunk_size > ellipsis_len {
                let truncated: String =
                    line.chars().take(max_chunk_size - ellipsis_len).collect();
                (truncated + ELLIPSIS, max_chunk_size)
            } else {
                let truncated: String = line.chars().take(max_chunk_size).collect();
                (truncated, max_chunk_size)
            }
        } else {
            (line.to_string(), line_len)
        };

        if text.is_empty() {
            continue;
        }

        if batch.len() == limits.chunk_count || batch_total + text_len > limits.total_chunk_size {
            batches.push(std::mem::take(&mut batch));
            batch_total = 0;
        }

        batch_total += text_len;
        batch.push(MessageItem { text });
    }

    if !batch.is_empty() {
        batches.push(batch);
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: MessageLimit = MessageLimit {
        chunk_size: 10,
        total_chunk_size: 100,
        chunk_count: 10,
    };

    #[test]
    fn short_input_is_a_single_chunk() {
        let (items, omitted) = partition_message("hello", &LIMITS, 3);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "hello");
        assert_eq!(omitted, 0);
    }

    #[test]
    fn breaks_at_a_space_inside_the_search_window() {
        // Naive boundary is 10; the space at index 7 is within distance 3.
        let (items, omitted) = partition_message("aaaaaaa bbbbbb", &LIMITS, 3);
        assert_eq!(items[0].text, "aaaaaaa");
        assert_eq!(items[1].text, "bbbbbb");
        assert_eq!(omitted, 0);
    }

    #[test]
    fn hard_cuts_when_no_break_is_near() {
        let (items, omitted) = partition_message("aaaaaaaaaaaaaa", &LIMITS, 3);
        assert_eq!(items[0].text, "aaaaaaaaaa");
        assert_eq!(items[1].text, "aaaa");
        assert_eq!(omitted, 0);
    }

    #[test]
    fn newline_counts_as_a_word_break() {
        let (items, _) = partition_message("aaaaaaaa\nbbbbbb", &LIMITS, 3);
        assert_eq!(items[0].text, "aaaaaaaa");
        assert_eq!(items[1].text, "bbbbbb");
    }

    #[test]
    fn separator_belongs_to_neither_chunk() {
        let (items, omitted) = partition_message("aaaaaaaaa bbbbbbbbb", &LIMITS, 3);
        assert_eq!(items[0].text, "aaaaaaaaa");
        assert_eq!(items[1].text, "bbbbbbbbb");
        // 19 input chars, 18 transmitted, separator consumed not omitted.
        assert_eq!(omitted, 0);
    }

    #[test]
    fn respects_the_total_limit() {
        let limits = MessageLimit {
            chunk_size: 10,
            total_chunk_size: 15,
            chunk_count: 10,
        };
        let (items, omitted) = partition_message(&"a".repeat(30), &limits, 0);
        let transmitted: usize = items.iter().map(MessageItem::len).sum();
        assert_eq!(transmitted, 15);
        assert_eq!(omitted, 15);
    }

    #[test]
    fn never_emits_more_than_count_minus_one_chunks() {
        let limits = MessageLimit {
            chunk_size: 10,
            total_chunk_size: 1000,
            chunk_count: 3,
        };
        let (items, omitted) = partition_message(&"a".repeat(100), &limits, 0);
        assert_eq!(items.len(), 2);
        assert_eq!(omitted, 80);
    }

    #[test]
    fn counts_chars_not_bytes() {
        // 'ä' is two bytes; ten of them fill exactly one chunk.
        let (items, omitted) = partition_message(&"ä".repeat(14), &LIMITS, 0);
        assert_eq!(items[0].text, "ä".repeat(10));
        assert_eq!(items[1].text, "ä".repeat(4));
        assert_eq!(omitted, 0);
    }

    #[test]
    fn lines_shorter_than_the_cap_pass_through() {
        let batches = message_items_from_lines("one\ntwo\nthree", &LIMITS);
        assert_eq!(batches.len(), 1);
        let texts: Vec<&str> = batches[0].iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    fn long_line_is_truncated_to_exactly_chunk_size() {
        let batches = message_items_from_lines(&"x".repeat(25), &LIMITS);
        let item = &batches[0][0];
        assert_eq!(item.len(), LIMITS.chunk_size);
        assert!(item.text.ends_with(ELLIPSIS));
    }

    #[test]
    fn cap_smaller_than_the_ellipsis_hard_truncates() {
        let limits = MessageLimit {
            chunk_size: 3,
            total_chunk_size: 100,
            chunk_count: 10,
        };
        let batches = message_items_from_lines("abcdefgh\nij", &limits);
        assert_eq!(batches[0][0].text, "abc");
        assert_eq!(batches[0][0].len(), 3);
        assert_eq!(batches[0][1].text, "ij");
    }

    #[test]
    fn empty_lines_are_dropped() {
        let batches = message_items_from_lines("one\n\n\ntwo", &LIMITS);
        assert_eq!(batches[0].len(), 2);
    }

    #[test]
    fn batch_seals_at_chunk_count() {
        let limits = MessageLimit {
            chunk_size: 10,
            total_chunk_size: 1000,
            chunk_count: 2,
        };
        let batches = message_items_from_lines("a\nb\nc\nd\ne", &limits);
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[1].len(), 2);
        assert_eq!(batches[2].len(), 1);
    }

    #[test]
    fn batch_seals_when_total_would_overflow() {
        let limits = MessageLimit {
            chunk_size: 10,
            total_chunk_size: 12,
            chunk_count: 100,
        };
        // 6 + 6 = 12 fits; the third line would make 18.
        let batches = message_items_from_lines("aaaaaa\nbbbbbb\ncccccc", &limits);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[1].len(), 1);
    }

    #[test]
    fn empty_input_yields_no_batches() {
        assert!(message_items_from_lines("", &LIMITS).is_empty());
    }
}
