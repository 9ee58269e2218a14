//! Read adapter: exposes a remote read endpoint as a queryable store.
//!
//! A [`Queryable`] hands out [`Querier`]s bound to a time window and a
//! context. Each [`Querier::select`] builds one remote read query from its
//! matchers, sends it through the [`ReadClient`], and decodes the result into
//! a [`SeriesSet`]. Failures never escape as `Err`: they are carried by the
//! returned set and read with [`SeriesSet::err`].

mod series;
mod series_set;

pub use series::{Series, SeriesIterator};
pub use series_set::SeriesSet;

use crate::convert;
use crate::core::{Context, LabelQueries, Matcher, ReadConfig, RemoteError, Result, SelectHints};
use crate::transport::ReadClient;
use std::sync::Arc;
use tracing::{debug, warn};

/// Warnings attached to label enumeration results
pub type Warnings = Vec<String>;

/// Source of queriers backed by one remote read client.
pub struct Queryable<C: ?Sized> {
    client: Arc<C>,
    config: ReadConfig,
}

impl<C: ReadClient + ?Sized> Queryable<C> {
    /// Creates a queryable with the default read configuration
    pub fn new(client: Arc<C>) -> Self {
        Self::with_config(client, ReadConfig::default())
    }

    /// Creates a queryable with an explicit read configuration
    pub fn with_config(client: Arc<C>, config: ReadConfig) -> Self {
        Self { client, config }
    }

    /// Binds a querier to `ctx` and the inclusive window `[mint, maxt]`.
    ///
    /// Never fails and performs no I/O.
    pub fn querier(&self, ctx: Context, mint: i64, maxt: i64) -> Result<Querier<C>> {
        Ok(Querier {
            ctx,
            mint,
            maxt,
            client: Arc::clone(&self.client),
            config: self.config.clone(),
        })
    }

    /// The read configuration in use
    pub fn config(&self) -> &ReadConfig {
        &self.config
    }
}

impl<C: ?Sized> Clone for Queryable<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: self.config.clone(),
        }
    }
}

/// Read view bound to one context and time window.
pub struct Querier<C: ?Sized> {
    ctx: Context,
    mint: i64,
    maxt: i64,
    client: Arc<C>,
    config: ReadConfig,
}

impl<C: ReadClient + ?Sized> Querier<C> {
    /// Start of the window, in milliseconds
    pub fn mint(&self) -> i64 {
        self.mint
    }

    /// End of the window, in milliseconds
    pub fn maxt(&self) -> i64 {
        self.maxt
    }

    /// Context every read of this querier is issued under
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Runs one remote read for `matchers` over the querier's window.
    ///
    /// Matchers are forwarded unchanged; an empty list is sent as-is and the
    /// remote end decides what it means. `hints` are forwarded when present.
    pub async fn select(
        &self,
        sort_series: bool,
        hints: Option<&SelectHints>,
        matchers: &[Matcher],
    ) -> SeriesSet {
        let query = match convert::to_query(self.mint, self.maxt, matchers, hints) {
            Ok(query) => query,
            Err(err) => {
                debug!(error = %err, "Select - could not build remote read query");
                return SeriesSet::failed(err);
            },
        };

        debug!(
            mint = self.mint,
            maxt = self.maxt,
            matchers = matchers.len(),
            sort_series,
            "Select - remote read"
        );

        match self.client.read(&self.ctx, query).await {
            Ok(result) => {
                let series = result.timeseries.len();
                let set =
                    convert::from_query_result(sort_series, result, self.config.validate_labels);
                if let Some(err) = set.err() {
                    warn!(error = %err, series, "Select - rejected remote read result");
                }
                set
            },
            Err(err) => {
                warn!(error = %err, "Select - remote read failed");
                SeriesSet::failed(RemoteError::RemoteRead(err))
            },
        }
    }

    /// Label names are not enumerated over remote read.
    pub fn label_names(&self, _matchers: &[Matcher]) -> Result<(Vec<String>, Warnings)> {
        self.label_query("label names")
    }

    /// Label values are not enumerated over remote read.
    pub fn label_values(
        &self,
        _name: &str,
        _matchers: &[Matcher],
    ) -> Result<(Vec<String>, Warnings)> {
        self.label_query("label values")
    }

    /// Releases the querier. Holds nothing, so this always succeeds.
    pub fn close(&self) -> Result<()> {
        Ok(())
    }

    fn label_query(&self, what: &str) -> Result<(Vec<String>, Warnings)> {
        match self.config.label_queries {
            LabelQueries::Empty => Ok((Vec::new(), Vec::new())),
            LabelQueries::Unsupported => {
                Err(RemoteError::unsupported(format!("{what} over remote read")))
            },
        }
    }
}
