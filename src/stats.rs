/// Counters for one corpus generation run, owned by the driver and returned
/// to the caller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CorpusStats {
    pub lines_read: u64,
    pub articles_written: u64,
    pub untitled_skipped: u64,
    pub malformed_skipped: u64,
    pub anchors_collected: u64,
    pub anchors_masked: u64,
}

impl CorpusStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_lines(&mut self) {
        self.lines_read += 1;
    }

    /// Records a written article and returns the running total.
    pub fn inc_articles(&mut self) -> u64 {
        self.articles_written += 1;
        self.articles_written
    }

    pub fn inc_untitled(&mut self) {
        self.untitled_skipped += 1;
    }

    pub fn inc_malformed(&mut self) {
        self.malformed_skipped += 1;
    }

    pub fn add_anchors(&mut self, collected: usize, masked: usize) {
        self.anchors_collected += collected as u64;
        self.anchors_masked += masked as u64;
    }

    pub fn articles(&self) -> u64 {
        self.articles_written
    }

    pub fn skipped(&self) -> u64 {
        self.untitled_skipped + self.malformed_skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_zero() {
        let stats = CorpusStats::new();
        assert_eq!(stats.lines_read, 0);
        assert_eq!(stats.articles(), 0);
        assert_eq!(stats.skipped(), 0);
        assert_eq!(stats.anchors_collected, 0);
        assert_eq!(stats.anchors_masked, 0);
    }

    #[test]
    fn inc_articles_returns_running_total() {
        let mut stats = CorpusStats::new();
        assert_eq!(stats.inc_articles(), 1);
        assert_eq!(stats.inc_articles(), 2);
        assert_eq!(stats.articles(), 2);
    }

    #[test]
    fn skipped_sums_both_reasons() {
        let mut stats = CorpusStats::new();
        stats.inc_untitled();
        stats.inc_untitled();
        stats.inc_malformed();
        assert_eq!(stats.skipped(), 3);
    }

    #[test]
    fn add_anchors_accumulates() {
        let mut stats = CorpusStats::new();
        stats.add_anchors(3, 5);
        stats.add_anchors(1, 0);
        assert_eq!(stats.anchors_collected, 4);
        assert_eq!(stats.anchors_masked, 5);
    }
}
