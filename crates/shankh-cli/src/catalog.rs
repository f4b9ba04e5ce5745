//! Bundled NIFTY ticker catalog used by `shankh search`.

use serde::Serialize;

/// One searchable instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub ticker: &'static str,
    pub name: &'static str,
}

pub const NIFTY_COMPANIES: &[CatalogEntry] = &[
    CatalogEntry { ticker: "RELIANCE.NS", name: "Reliance Industries Ltd." },
    CatalogEntry { ticker: "INFY.NS", name: "Infosys Ltd." },
    CatalogEntry { ticker: "TCS.NS", name: "Tata Consultancy Services Ltd." },
    CatalogEntry { ticker: "HDFCBANK.NS", name: "HDFC Bank Ltd." },
    CatalogEntry { ticker: "ICICIBANK.NS", name: "ICICI Bank Ltd." },
    CatalogEntry { ticker: "KOTAKBANK.NS", name: "Kotak Mahindra Bank Ltd." },
    CatalogEntry { ticker: "HINDUNILVR.NS", name: "Hindustan Unilever Ltd." },
    CatalogEntry { ticker: "ITC.NS", name: "ITC Ltd." },
    CatalogEntry { ticker: "SBIN.NS", name: "State Bank of India" },
    CatalogEntry { ticker: "BHARTIARTL.NS", name: "Bharti Airtel Ltd." },
    CatalogEntry { ticker: "BAJFINANCE.NS", name: "Bajaj Finance Ltd." },
    CatalogEntry { ticker: "ASIANPAINT.NS", name: "Asian Paints Ltd." },
    CatalogEntry { ticker: "AXISBANK.NS", name: "Axis Bank Ltd." },
    CatalogEntry { ticker: "AARTIDRUGS.NS", name: "Aarti Drugs Ltd." },
    CatalogEntry { ticker: "INDIGO.NS", name: "InterGlobe Aviation Ltd." },
];

/// Case-insensitive substring match on ticker or name, in catalog order.
pub fn search(query: &str, limit: usize) -> Vec<CatalogEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    NIFTY_COMPANIES
        .iter()
        .filter(|entry| {
            entry.ticker.to_lowercase().contains(&needle)
                || entry.name.to_lowercase().contains(&needle)
        })
        .take(limit)
        .copied()
        .collect()
}
