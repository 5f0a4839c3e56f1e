//! Reading-time estimate
//!
//! Word counts are whitespace-token counts; the estimate divides by a
//! fixed words-per-minute constant and rounds up, so any non-empty post
//! reads in at least one minute. An empty post reads in zero minutes.

/// Count whitespace-separated words in a text
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated reading time in minutes: `ceil(total_words / words_per_minute)`
pub fn reading_time(total_words: usize, words_per_minute: usize) -> usize {
    if words_per_minute == 0 {
        return 0;
    }
    total_words.div_ceil(words_per_minute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("one  two\nthree"), 3);
    }

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(reading_time(250, 200), 2);
        assert_eq!(reading_time(200, 200), 1);
        assert_eq!(reading_time(201, 200), 2);
    }

    #[test]
    fn test_nonzero_words_read_in_at_least_one_minute() {
        for words in [1, 50, 199, 200] {
            assert!(reading_time(words, 200) >= 1, "words={}", words);
        }
    }

    #[test]
    fn test_empty_post_reads_in_zero_minutes() {
        assert_eq!(reading_time(0, 200), 0);
    }
}
