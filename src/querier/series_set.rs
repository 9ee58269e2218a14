use super::Series;
use crate::core::{RemoteError, Result};
use std::iter::FusedIterator;

/// Result of a select: an ordered sequence of series, or a terminal error.
///
/// A failed set yields no series; the error is read with [`SeriesSet::err`].
/// Once drained, a set keeps returning `None`.
#[derive(Debug)]
pub struct SeriesSet {
    state: State,
}

#[derive(Debug)]
enum State {
    Ready(std::vec::IntoIter<Series>),
    Failed(RemoteError),
}

impl SeriesSet {
    /// Set yielding the given series in order
    pub fn from_series(series: Vec<Series>) -> Self {
        Self {
            state: State::Ready(series.into_iter()),
        }
    }

    /// Set with no series and no error
    pub fn empty() -> Self {
        Self::from_series(Vec::new())
    }

    /// Set carrying only an error
    pub fn failed(err: RemoteError) -> Self {
        Self {
            state: State::Failed(err),
        }
    }

    /// Terminal error, if the select failed
    pub fn err(&self) -> Option<&RemoteError> {
        match &self.state {
            State::Failed(err) => Some(err),
            State::Ready(_) => None,
        }
    }

    /// True when the set carries an error
    pub fn is_failed(&self) -> bool {
        matches!(self.state, State::Failed(_))
    }

    /// Collects the remaining series, or returns the error
    pub fn into_result(self) -> Result<Vec<Series>> {
        match self.state {
            State::Ready(iter) => Ok(iter.collect()),
            State::Failed(err) => Err(err),
        }
    }
}

impl Default for SeriesSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Iterator for SeriesSet {
    type Item = Series;

    fn next(&mut self) -> Option<Series> {
        match &mut self.state {
            State::Ready(iter) => iter.next(),
            State::Failed(_) => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.state {
            State::Ready(iter) => iter.size_hint(),
            State::Failed(_) => (0, Some(0)),
        }
    }
}

impl FusedIterator for SeriesSet {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Labels;

    #[test]
    fn test_failed_set_yields_nothing() {
        let mut set = SeriesSet::failed(RemoteError::to_query("boom"));
        assert!(set.is_failed());
        assert!(set.next().is_none());
        assert!(set.next().is_none());
        assert_eq!(set.err().unwrap().to_string(), "to_query: boom");
        assert!(set.into_result().is_err());
    }

    #[test]
    fn test_ready_set_drains_once() {
        let series = Series::new(Labels::from_pairs([("__name__", "up")]), vec![]);
        let mut set = SeriesSet::from_series(vec![series.clone()]);

        assert_eq!(set.size_hint(), (1, Some(1)));
        assert_eq!(set.next(), Some(series));
        assert_eq!(set.next(), None);
        assert_eq!(set.next(), None);
        assert!(set.err().is_none());
    }

    #[test]
    fn test_empty_set() {
        assert!(SeriesSet::empty().into_result().unwrap().is_empty());
        assert!(!SeriesSet::default().is_failed());
    }
}
