//! Call history entities for instrumented operations.

use std::fmt;

/// One recorded invocation of an instrumented operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub input: String,
    pub output: String,
}

/// The full call history of an operation, in invocation order.
///
/// Built from the operation's `:inputs` and `:outputs` lists. Entries are
/// paired by index; `count` is the number of recorded inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replay {
    pub operation: String,
    pub count: usize,
    pub calls: Vec<RecordedCall>,
}

impl Replay {
    /// Pairs the input and output logs of `operation` by index.
    pub fn from_logs(operation: &str, inputs: Vec<String>, outputs: Vec<String>) -> Self {
        let count = inputs.len();
        let calls = inputs
            .into_iter()
            .zip(outputs)
            .map(|(input, output)| RecordedCall { input, output })
            .collect();

        Self {
            operation: operation.to_string(),
            count,
            calls,
        }
    }

    /// Returns true if the operation has never been recorded.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} was called {} times:", self.operation, self.count)?;
        for call in &self.calls {
            write!(f, "\n{}(*{}) -> {}", self.operation, call.input, call.output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_logs_pairs_by_index() {
        let replay = Replay::from_logs(
            "Cache.store",
            vec!["(\"a\",)".to_string(), "(\"b\",)".to_string()],
            vec!["k1".to_string(), "k2".to_string()],
        );

        assert_eq!(replay.count, 2);
        assert_eq!(replay.calls[0].input, "(\"a\",)");
        assert_eq!(replay.calls[0].output, "k1");
        assert_eq!(replay.calls[1].output, "k2");
    }

    #[test]
    fn test_display() {
        let replay = Replay::from_logs(
            "Cache.store",
            vec!["(\"first\",)".to_string()],
            vec!["abc".to_string()],
        );

        assert_eq!(
            replay.to_string(),
            "Cache.store was called 1 times:\nCache.store(*(\"first\",)) -> abc"
        );
    }

    #[test]
    fn test_empty_history() {
        let replay = Replay::from_logs("Cache.store", vec![], vec![]);
        assert!(replay.is_empty());
        assert_eq!(replay.to_string(), "Cache.store was called 0 times:");
    }
}
