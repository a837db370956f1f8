//! Static directory of monitored companies.
//!
//! The directory is built once at startup from a fixed table and never
//! mutated afterwards; consumers receive it by reference. Iteration order is
//! the table's declared order, which fixes the per-run symbol order.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::Symbol;

/// Market capitalization tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapTier {
    LargeCap,
    MidCap,
    SmallCap,
}

impl CapTier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LargeCap => "large-cap",
            Self::MidCap => "mid-cap",
            Self::SmallCap => "small-cap",
        }
    }
}

/// Metadata for a single monitored company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub symbol: Symbol,
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub cap_tier: CapTier,
}

/// Immutable symbol → company metadata mapping with filter helpers.
#[derive(Debug, Clone)]
pub struct CompanyDirectory {
    records: Vec<CompanyRecord>,
    index: HashMap<String, usize>,
}

impl CompanyDirectory {
    /// Directory over the built-in monitored-company table.
    pub fn builtin() -> Self {
        let records = COMPANY_TABLE
            .iter()
            .map(|(symbol, name, sector, industry, cap_tier)| CompanyRecord {
                symbol: Symbol::parse(symbol).expect("table symbols are valid"),
                name: (*name).to_owned(),
                sector: (*sector).to_owned(),
                industry: (*industry).to_owned(),
                cap_tier: *cap_tier,
            })
            .collect();
        Self::from_records(records)
    }

    /// Directory over an explicit record list, preserving its order.
    pub fn from_records(records: Vec<CompanyRecord>) -> Self {
        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.symbol.as_str().to_owned(), position))
            .collect();
        Self { records, index }
    }

    /// Lookup by ticker, case-insensitive on the input.
    pub fn get(&self, symbol: &str) -> Option<&CompanyRecord> {
        let key = symbol.trim().to_ascii_uppercase();
        self.index.get(&key).map(|position| &self.records[*position])
    }

    /// All tickers in declared order.
    pub fn symbols(&self) -> Vec<Symbol> {
        self.records.iter().map(|record| record.symbol.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompanyRecord> {
        self.records.iter()
    }

    pub fn by_sector<'a>(&'a self, sector: &str) -> Vec<&'a CompanyRecord> {
        self.records
            .iter()
            .filter(|record| record.sector.eq_ignore_ascii_case(sector))
            .collect()
    }

    pub fn by_cap_tier(&self, tier: CapTier) -> Vec<&CompanyRecord> {
        self.records
            .iter()
            .filter(|record| record.cap_tier == tier)
            .collect()
    }

    /// Sector → company count, sorted by sector name.
    pub fn sector_distribution(&self) -> BTreeMap<String, usize> {
        let mut distribution = BTreeMap::new();
        for record in &self.records {
            *distribution.entry(record.sector.clone()).or_insert(0) += 1;
        }
        distribution
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

type CompanyRow = (&'static str, &'static str, &'static str, &'static str, CapTier);

#[rustfmt::skip]
const COMPANY_TABLE: &[CompanyRow] = &[
    // Large-cap technology
    ("GOOGL", "Alphabet Inc.", "Technology", "Internet Content & Information", CapTier::LargeCap),
    ("AAPL", "Apple Inc.", "Technology", "Consumer Electronics", CapTier::LargeCap),
    ("MSFT", "Microsoft Corporation", "Technology", "Software—Infrastructure", CapTier::LargeCap),
    ("AMZN", "Amazon.com Inc.", "Consumer Cyclical", "Internet Retail", CapTier::LargeCap),
    ("META", "Meta Platforms Inc.", "Technology", "Internet Content & Information", CapTier::LargeCap),
    ("TSLA", "Tesla, Inc.", "Consumer Cyclical", "Auto Manufacturers", CapTier::LargeCap),
    ("NVDA", "NVIDIA Corporation", "Technology", "Semiconductors", CapTier::LargeCap),
    ("ADBE", "Adobe Inc.", "Technology", "Software—Infrastructure", CapTier::LargeCap),
    ("INTC", "Intel Corporation", "Technology", "Semiconductors", CapTier::LargeCap),
    // Financial services
    ("JPM", "JPMorgan Chase & Co.", "Financial Services", "Banks—Diversified", CapTier::LargeCap),
    ("BAC", "Bank of America Corporation", "Financial Services", "Banks—Diversified", CapTier::LargeCap),
    ("WFC", "Wells Fargo & Company", "Financial Services", "Banks—Diversified", CapTier::LargeCap),
    ("GS", "The Goldman Sachs Group, Inc.", "Financial Services", "Capital Markets", CapTier::LargeCap),
    ("V", "Visa Inc.", "Financial Services", "Credit Services", CapTier::LargeCap),
    ("MA", "Mastercard Incorporated", "Financial Services", "Credit Services", CapTier::LargeCap),
    // Healthcare
    ("JNJ", "Johnson & Johnson", "Healthcare", "Drug Manufacturers—General", CapTier::LargeCap),
    ("PFE", "Pfizer Inc.", "Healthcare", "Drug Manufacturers—General", CapTier::LargeCap),
    ("MRK", "Merck & Co., Inc.", "Healthcare", "Drug Manufacturers—General", CapTier::LargeCap),
    ("UNH", "UnitedHealth Group Incorporated", "Healthcare", "Healthcare Plans", CapTier::LargeCap),
    ("ABT", "Abbott Laboratories", "Healthcare", "Medical Devices", CapTier::LargeCap),
    ("TMO", "Thermo Fisher Scientific Inc.", "Healthcare", "Diagnostics & Research", CapTier::LargeCap),
    // Consumer defensive
    ("WMT", "Walmart Inc.", "Consumer Defensive", "Discount Stores", CapTier::LargeCap),
    ("PG", "The Procter & Gamble Company", "Consumer Defensive", "Household & Personal Products", CapTier::LargeCap),
    ("KO", "The Coca-Cola Company", "Consumer Defensive", "Beverages—Non-Alcoholic", CapTier::LargeCap),
    ("PEP", "PepsiCo, Inc.", "Consumer Defensive", "Beverages—Non-Alcoholic", CapTier::LargeCap),
    ("COST", "Costco Wholesale Corporation", "Consumer Defensive", "Discount Stores", CapTier::LargeCap),
    // Energy
    ("XOM", "Exxon Mobil Corporation", "Energy", "Oil & Gas Integrated", CapTier::LargeCap),
    ("CVX", "Chevron Corporation", "Energy", "Oil & Gas Integrated", CapTier::LargeCap),
    ("COP", "ConocoPhillips", "Energy", "Oil & Gas E&P", CapTier::LargeCap),
    ("SLB", "Schlumberger Limited", "Energy", "Oil & Gas Equipment & Services", CapTier::LargeCap),
    // Industrials
    ("BA", "The Boeing Company", "Industrials", "Aerospace & Defense", CapTier::LargeCap),
    ("CAT", "Caterpillar Inc.", "Industrials", "Farm & Heavy Construction Machinery", CapTier::LargeCap),
    ("HON", "Honeywell International Inc.", "Industrials", "Conglomerates", CapTier::LargeCap),
    ("UPS", "United Parcel Service, Inc.", "Industrials", "Integrated Freight & Logistics", CapTier::LargeCap),
    // Communication services
    ("DIS", "The Walt Disney Company", "Communication Services", "Entertainment", CapTier::LargeCap),
    ("NFLX", "Netflix, Inc.", "Communication Services", "Entertainment", CapTier::LargeCap),
    ("CMCSA", "Comcast Corporation", "Communication Services", "Telecom Services", CapTier::LargeCap),
    ("TMUS", "T-Mobile US, Inc.", "Communication Services", "Telecom Services", CapTier::LargeCap),
    // Real estate
    ("AMT", "American Tower Corporation", "Real Estate", "REIT—Specialty", CapTier::LargeCap),
    ("PLD", "Prologis, Inc.", "Real Estate", "REIT—Industrial", CapTier::LargeCap),
    // Utilities
    ("NEE", "NextEra Energy, Inc.", "Utilities", "Utilities—Renewable", CapTier::LargeCap),
    ("DUK", "Duke Energy Corporation", "Utilities", "Utilities—Regulated Electric", CapTier::LargeCap),
    // Materials
    ("LIN", "Linde plc", "Materials", "Specialty Chemicals", CapTier::LargeCap),
    ("APD", "Air Products and Chemicals, Inc.", "Materials", "Specialty Chemicals", CapTier::LargeCap),
];
