use std::future::Future;

use crate::error::FetchError;

/// Result of walking an ordered list of data sources.
#[derive(Debug)]
pub struct ChainOutcome<'a, S, T> {
    /// First source that produced a value, with that value.
    pub resolved: Option<(&'a S, T)>,
    /// Every source tried before `resolved` (or all of them), with its error.
    pub failures: Vec<(&'a S, FetchError)>,
}

impl<S, T> ChainOutcome<'_, S, T> {
    /// The resolved value, or `default` when every source failed.
    pub fn value_or(self, default: T) -> T {
        self.resolved.map(|(_, value)| value).unwrap_or(default)
    }
}

/// Try `sources` in order until one succeeds. A failing source never stops the walk;
/// sources after the first success are not touched.
pub async fn first_success<'a, S, T, F, Fut>(sources: &'a [S], mut fetch: F) -> ChainOutcome<'a, S, T>
where
    F: FnMut(&'a S) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut failures = Vec::new();
    for source in sources {
        match fetch(source).await {
            Ok(value) => {
                return ChainOutcome {
                    resolved: Some((source, value)),
                    failures,
                };
            }
            Err(e) => failures.push((source, e)),
        }
    }
    ChainOutcome {
        resolved: None,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;

    use super::*;

    #[test]
    fn stops_at_first_success() {
        let tried = RefCell::new(Vec::new());
        let sources = ["a", "b", "c"];
        let outcome = block_on(first_success(&sources, |s| {
            tried.borrow_mut().push(*s);
            let result = if *s == "b" {
                Ok(2)
            } else {
                Err(FetchError::Status(404))
            };
            async move { result }
        }));

        assert_eq!(tried.into_inner(), vec!["a", "b"]);
        let (source, value) = outcome.resolved.unwrap();
        assert_eq!((*source, value), ("b", 2));
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].1, FetchError::Status(404));
    }

    #[test]
    fn all_failures_fall_through_to_default() {
        let sources = ["a", "b"];
        let outcome = block_on(first_success(&sources, |_| async {
            Err::<u32, _>(FetchError::Network("offline".into()))
        }));

        assert!(outcome.resolved.is_none());
        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(outcome.value_or(7), 7);
    }

    #[test]
    fn empty_chain_resolves_to_default() {
        let sources: [&str; 0] = [];
        let outcome = block_on(first_success(&sources, |_| async { Ok(1) }));
        assert_eq!(outcome.value_or(9), 9);
    }
}
