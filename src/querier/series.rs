use crate::core::{Labels, Sample};

/// One decoded series: a sorted label set and its time-ordered samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    labels: Labels,
    samples: Vec<Sample>,
}

impl Series {
    /// Creates a series. Samples are expected in timestamp order.
    pub fn new(labels: Labels, samples: Vec<Sample>) -> Self {
        Self { labels, samples }
    }

    /// Label set, sorted by name
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// All samples
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Iterator over the samples, with seek support
    pub fn iter(&self) -> SeriesIterator<'_> {
        SeriesIterator {
            samples: &self.samples,
            next: 0,
            current: None,
        }
    }

    /// Splits the series into its parts
    pub fn into_parts(self) -> (Labels, Vec<Sample>) {
        (self.labels, self.samples)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = Sample;
    type IntoIter = SeriesIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sample cursor over a [`Series`].
///
/// `next` yields samples in order. `seek(t)` moves forward to the first
/// sample at or after `t` and never moves backwards: if the sample last
/// returned already satisfies `t`, it is returned again.
#[derive(Debug, Clone)]
pub struct SeriesIterator<'a> {
    samples: &'a [Sample],
    next: usize,
    current: Option<usize>,
}

impl SeriesIterator<'_> {
    /// Sample last returned by `next` or `seek`
    pub fn at(&self) -> Option<Sample> {
        self.current.map(|i| self.samples[i])
    }

    /// Advances to the first sample with `timestamp_ms >= t`.
    ///
    /// Returns `None` once the series is exhausted.
    pub fn seek(&mut self, t: i64) -> Option<Sample> {
        if let Some(sample) = self.at() {
            if sample.timestamp_ms >= t {
                return Some(sample);
            }
        }

        let rest = &self.samples[self.next..];
        let offset = rest.partition_point(|s| s.timestamp_ms < t);
        let index = self.next + offset;
        if index < self.samples.len() {
            self.current = Some(index);
            self.next = index + 1;
            Some(self.samples[index])
        } else {
            self.current = None;
            self.next = self.samples.len();
            None
        }
    }
}

impl Iterator for SeriesIterator<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let sample = *self.samples.get(self.next)?;
        self.current = Some(self.next);
        self.next += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.samples.len() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SeriesIterator<'_> {}

impl std::iter::FusedIterator for SeriesIterator<'_> {}
