//! Ticker selection fan-out and view publication.
//!
//! Every [`Orchestrator::select`] call takes the next value of a monotonic
//! epoch, fetches all four sources concurrently and waits for each to settle.
//! The resulting [`ViewState`] is published only if no newer selection has
//! started in the meantime; otherwise it is dropped without notices.
//!
//! # Example
//!
//! ```rust,ignore
//! use shankh_core::{OrchestratorBuilder, Ticker};
//!
//! let orchestrator = OrchestratorBuilder::new().with_env()?.build()?;
//! let mut notices = orchestrator.notices();
//!
//! orchestrator.select(Ticker::parse("RELIANCE.NS")?).await;
//! while let Ok(notice) = notices.try_recv() {
//!     eprintln!("{}", notice.summary());
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::config::ShankhConfig;
use crate::gateways::{
    FinancialsGateway, Gateway, GatewayTransport, PredictionGateway, PriceHistoryGateway,
    SentimentGateway,
};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::retry::RetryPolicy;
use crate::view::{FetchNotice, ViewState};
use crate::{
    FinancialSnapshot, HistoryInterval, HistoryPeriod, Prediction, PriceSeries, SentimentResult,
    Ticker, ValidationError,
};

const DEFAULT_NOTICE_CAPACITY: usize = 64;

/// The four gateways consulted on every selection.
#[derive(Clone)]
pub struct Gateways {
    pub price_history: Arc<dyn Gateway<Output = PriceSeries>>,
    pub prediction: Arc<dyn Gateway<Output = Prediction>>,
    pub sentiment: Arc<dyn Gateway<Output = SentimentResult>>,
    pub financials: Arc<dyn Gateway<Output = FinancialSnapshot>>,
}

impl Gateways {
    /// HTTP gateways sharing one transport.
    pub fn over_http(transport: GatewayTransport) -> Self {
        Self {
            price_history: Arc::new(PriceHistoryGateway::new(transport.clone())),
            prediction: Arc::new(PredictionGateway::new(transport.clone())),
            sentiment: Arc::new(SentimentGateway::new(transport.clone())),
            financials: Arc::new(FinancialsGateway::new(transport)),
        }
    }
}

/// Result of one `select` call, as seen by its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    Published(Arc<ViewState>),
    /// A newer selection started before this one settled.
    Discarded { request_epoch: u64, latest_epoch: u64 },
}

impl SelectOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }

    pub fn view(&self) -> Option<&Arc<ViewState>> {
        match self {
            Self::Published(view) => Some(view),
            Self::Discarded { .. } => None,
        }
    }
}

/// Owner of the observable [`ViewState`].
///
/// Cloning is cheap; clones share the epoch, the view and the notice channel.
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    gateways: Gateways,
    epoch: AtomicU64,
    view: watch::Sender<Option<Arc<ViewState>>>,
    notices: broadcast::Sender<FetchNotice>,
}

impl Orchestrator {
    pub fn new(gateways: Gateways) -> Self {
        Self::with_notice_capacity(gateways, DEFAULT_NOTICE_CAPACITY)
    }

    pub fn with_notice_capacity(gateways: Gateways, capacity: usize) -> Self {
        let (view, _) = watch::channel(None);
        let (notices, _) = broadcast::channel(capacity.max(1));

        Self {
            inner: Arc::new(Inner {
                gateways,
                epoch: AtomicU64::new(0),
                view,
                notices,
            }),
        }
    }

    /// Fetch all four sources for `ticker` and publish the view if still current.
    pub async fn select(&self, ticker: Ticker) -> SelectOutcome {
        let epoch = self.inner.begin(&ticker);
        self.inner.run(ticker, epoch).await
    }

    /// Start a selection on the runtime without awaiting it.
    ///
    /// The epoch is taken before this returns, so a later `select` or
    /// `spawn_select` always supersedes this one.
    pub fn spawn_select(&self, ticker: Ticker) -> JoinHandle<SelectOutcome> {
        let epoch = self.inner.begin(&ticker);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.run(ticker, epoch).await })
    }

    /// Most recently published view, `None` before the first publication.
    pub fn current(&self) -> Option<Arc<ViewState>> {
        self.inner.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<ViewState>>> {
        self.inner.view.subscribe()
    }

    /// Per-source failure notices of published selections.
    pub fn notices(&self) -> broadcast::Receiver<FetchNotice> {
        self.inner.notices.subscribe()
    }

    /// Epoch of the most recently started selection; zero before any.
    pub fn latest_epoch(&self) -> u64 {
        self.inner.epoch.load(Ordering::SeqCst)
    }
}

impl Inner {
    fn begin(&self, ticker: &Ticker) -> u64 {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(ticker = %ticker, epoch, "selection started");
        epoch
    }

    async fn run(&self, ticker: Ticker, epoch: u64) -> SelectOutcome {
        let gateways = &self.gateways;
        let (price_series, prediction, sentiment, financials) = tokio::join!(
            gateways.price_history.fetch(&ticker),
            gateways.prediction.fetch(&ticker),
            gateways.sentiment.fetch(&ticker),
            gateways.financials.fetch(&ticker),
        );

        let view = Arc::new(ViewState {
            ticker,
            price_series,
            prediction,
            sentiment,
            financials,
            request_epoch: epoch,
        });

        if !self.commit(&view) {
            let latest_epoch = self.epoch.load(Ordering::SeqCst);
            tracing::debug!(
                ticker = %view.ticker,
                request_epoch = epoch,
                latest_epoch,
                "discarding stale selection"
            );
            return SelectOutcome::Discarded {
                request_epoch: epoch,
                latest_epoch,
            };
        }

        SelectOutcome::Published(view)
    }

    /// Publish `view` if its epoch is still the latest.
    ///
    /// Notices are sent under the view lock, before receivers are woken.
    fn commit(&self, view: &Arc<ViewState>) -> bool {
        self.view.send_if_modified(|current| {
            if self.epoch.load(Ordering::SeqCst) != view.request_epoch {
                return false;
            }
            if current
                .as_ref()
                .is_some_and(|published| published.request_epoch > view.request_epoch)
            {
                return false;
            }
            *current = Some(Arc::clone(view));
            self.announce(view);
            true
        })
    }

    fn announce(&self, view: &ViewState) {
        let failures = view.failures();
        if failures.is_empty() {
            tracing::info!(
                ticker = %view.ticker,
                epoch = view.request_epoch,
                "all sources loaded"
            );
            return;
        }

        for (source, error) in failures {
            tracing::warn!(
                ticker = %view.ticker,
                source = %source,
                code = error.code(),
                cause = error.cause(),
                "{}",
                error.message()
            );
            // No subscribers is fine; the failure is still in the view.
            let _ = self.notices.send(FetchNotice {
                ticker: view.ticker.clone(),
                source,
                error: error.clone(),
            });
        }
    }
}

/// Builds an [`Orchestrator`] over HTTP gateways.
///
/// Configuration layers apply in call order: defaults, then
/// [`with_env`](Self::with_env), then explicit setters.
#[derive(Default)]
pub struct OrchestratorBuilder {
    config: ShankhConfig,
    http_client: Option<Arc<dyn HttpClient>>,
    notice_capacity: Option<usize>,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `SHANKH_*` environment overrides. See [`crate::config`].
    pub fn with_env(mut self) -> Result<Self, ValidationError> {
        self.config = ShankhConfig::from_env()?;
        Ok(self)
    }

    pub fn with_config(mut self, config: ShankhConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.timeout_ms = timeout_ms;
        self
    }

    pub fn with_history_period(mut self, period: HistoryPeriod) -> Self {
        self.config.history_period = period;
        self
    }

    pub fn with_history_interval(mut self, interval: HistoryInterval) -> Self {
        self.config.history_interval = interval;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// Replace the reqwest transport, e.g. with a scripted client in tests.
    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn with_notice_capacity(mut self, capacity: usize) -> Self {
        self.notice_capacity = Some(capacity);
        self
    }

    pub fn config(&self) -> &ShankhConfig {
        &self.config
    }

    pub fn build(self) -> Result<Orchestrator, ValidationError> {
        self.config.validate()?;

        let http_client = self
            .http_client
            .unwrap_or_else(|| Arc::new(ReqwestHttpClient::new()));
        let transport = GatewayTransport::new(http_client, self.config);

        Ok(Orchestrator::with_notice_capacity(
            Gateways::over_http(transport),
            self.notice_capacity.unwrap_or(DEFAULT_NOTICE_CAPACITY),
        ))
    }
}
