use serde::Deserialize;

use super::{decode, FetchError, FetchFuture, Gateway, GatewayTransport};
use crate::http_client::HttpRequest;
use crate::source::SourceKind;
use crate::{FinancialSnapshot, Ticker};

/// Latest income statement figures from `GET /get-financial-data/{ticker}`.
#[derive(Clone)]
pub struct FinancialsGateway {
    transport: GatewayTransport,
}

#[derive(Debug, Deserialize)]
struct FinancialsResponse {
    financial_data: WireStatement,
}

// The service drops absent line items instead of sending null.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireStatement {
    date: Option<String>,
    total_revenue: Option<f64>,
    net_income: Option<f64>,
    ebitda: Option<f64>,
    gross_profit: Option<f64>,
    operating_income: Option<f64>,
    operating_expense: Option<f64>,
    interest_expense: Option<f64>,
    pretax_income: Option<f64>,
    tax_provision: Option<f64>,
    diluted_eps: Option<f64>,
    basic_eps: Option<f64>,
}

impl FinancialsGateway {
    pub fn new(transport: GatewayTransport) -> Self {
        Self { transport }
    }

    async fn fetch_snapshot(&self, ticker: &Ticker) -> Result<FinancialSnapshot, FetchError> {
        let path = format!("get-financial-data/{}", urlencoding::encode(ticker.as_str()));
        let request = HttpRequest::get(self.transport.endpoint(&path));
        let payload = self.transport.send(SourceKind::Financials, request).await?;
        let response: FinancialsResponse = decode(SourceKind::Financials, &payload)?;
        let statement = response.financial_data;

        Ok(FinancialSnapshot {
            ticker: ticker.clone(),
            report_date: statement.date,
            total_revenue: statement.total_revenue,
            net_income: statement.net_income,
            ebitda: statement.ebitda,
            gross_profit: statement.gross_profit,
            operating_income: statement.operating_income,
            operating_expense: statement.operating_expense,
            interest_expense: statement.interest_expense,
            pretax_income: statement.pretax_income,
            tax_provision: statement.tax_provision,
            diluted_eps: statement.diluted_eps,
            basic_eps: statement.basic_eps,
        })
    }
}

impl Gateway for FinancialsGateway {
    type Output = FinancialSnapshot;

    fn source_kind(&self) -> SourceKind {
        SourceKind::Financials
    }

    fn fetch<'a>(&'a self, ticker: &'a Ticker) -> FetchFuture<'a, Self::Output> {
        Box::pin(self.fetch_snapshot(ticker))
    }
}
