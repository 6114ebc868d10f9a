//! Provider column catalog: human-readable field names and the
//! two-character codes the quote endpoint wants in its `f=` parameter.

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashSet};

static YAHOO_COLUMNS: &[(&str, &str)] = &[
    ("AfterHoursChangeRealtime", "c8"),
    ("AnnualizedGain", "g3"),
    ("Ask", "a0"),
    ("AskRealtime", "b2"),
    ("AskSize", "a5"),
    ("AverageDailyVolume", "a2"),
    ("Bid", "b0"),
    ("BidRealtime", "b3"),
    ("BidSize", "b6"),
    ("BookValuePerShare", "b4"),
    ("Change", "c1"),
    ("ChangeFromFiftydayMovingAverage", "m7"),
    ("ChangeFromTwoHundreddayMovingAverage", "m5"),
    ("ChangeFromYearHigh", "k4"),
    ("ChangeFromYearLow", "j5"),
    ("ChangeInPercent", "p2"),
    ("ChangeInPercentFromYearHigh", "k5"),
    ("ChangeInPercentRealtime", "k2"),
    ("ChangeRealtime", "c6"),
    ("Change_ChangeInPercent", "c0"),
    ("Commission", "c3"),
    ("Currency", "c4"),
    ("DaysHigh", "h0"),
    ("DaysLow", "g0"),
    ("DaysRange", "m0"),
    ("DaysRangeRealtime", "m2"),
    ("DaysValueChange", "w1"),
    ("DaysValueChangeRealtime", "w4"),
    ("DilutedEPS", "e0"),
    ("DividendPayDate", "r1"),
    ("EBITDA", "j4"),
    ("EPSEstimateCurrentYear", "e7"),
    ("EPSEstimateNextQuarter", "e9"),
    ("EPSEstimateNextYear", "e8"),
    ("ExDividendDate", "q0"),
    ("FiftydayMovingAverage", "m3"),
    ("HighLimit", "l2"),
    ("HoldingsGain", "g4"),
    ("HoldingsGainPercent", "g1"),
    ("HoldingsGainPercentRealtime", "g5"),
    ("HoldingsGainRealtime", "g6"),
    ("HoldingsValue", "v1"),
    ("HoldingsValueRealtime", "v7"),
    ("LastTradeDate", "d1"),
    ("LastTradePriceOnly", "l1"),
    ("LastTradeRealtimeWithTime", "k1"),
    ("LastTradeSize", "k3"),
    ("LastTradeTime", "t1"),
    ("LastTradeWithTime", "l0"),
    ("LowLimit", "l3"),
    ("MarketCapRealtime", "j3"),
    ("MarketCapitalization", "j1"),
    ("MoreInfo", "i0"),
    ("Name", "n0"),
    ("Notes", "n4"),
    ("OneyrTargetPrice", "t8"),
    ("Open", "o0"),
    ("OrderBookRealtime", "i5"),
    ("PEGRatio", "r5"),
    ("PERatio", "r0"),
    ("PERatioRealtime", "r2"),
    ("PercentChangeFromFiftydayMovingAverage", "m8"),
    ("PercentChangeFromTwoHundreddayMovingAverage", "m6"),
    ("PercentChangeFromYearLow", "j6"),
    ("PreviousClose", "p0"),
    ("PriceBook", "p6"),
    ("PriceEPSEstimateCurrentYear", "r6"),
    ("PriceEPSEstimateNextYear", "r7"),
    ("PricePaid", "p1"),
    ("PriceSales", "p5"),
    ("Revenue", "s6"),
    ("SharesFloat", "f6"),
    ("SharesOutstanding", "j2"),
    ("SharesOwned", "s1"),
    ("ShortRatio", "s7"),
    ("StockExchange", "x0"),
    ("Symbol", "s0"),
    ("TickerTrend", "t7"),
    ("TradeDate", "d2"),
    ("TradeLinks", "t6"),
    ("TradeLinksAdditional", "f0"),
    ("TrailingAnnualDividendYield", "d0"),
    ("TrailingAnnualDividendYieldInPercent", "y0"),
    ("TwoHundreddayMovingAverage", "m4"),
    ("Volume", "v0"),
    ("YearHigh", "k0"),
    ("YearLow", "j0"),
    ("YearRange", "w0"),
];

// These columns are known to be misformatted on the provider's side:
// numbers emitted with embedded commas and no quoting, which splits the
// value across several CSV cells.
static PROBLEM_COLUMNS: &[&str] = &["SharesFloat", "SharesOutstanding"];

/// The built-in provider catalog.
pub static YAHOO: Lazy<Catalog> = Lazy::new(|| Catalog::new(YAHOO_COLUMNS, PROBLEM_COLUMNS));

/// Immutable name → code table plus the set of problem columns. Built once
/// and handed to the planner and client by value, so tests can substitute
/// an alternate table.
#[derive(Debug, Clone)]
pub struct Catalog {
    codes: BTreeMap<&'static str, &'static str>,
    problem: HashSet<&'static str>,
}

impl Catalog {
    /// Build a catalog from a name → code table and the names whose values
    /// need tail repair.
    ///
    /// # Panics
    ///
    /// Panics if a name or code repeats, or a problem name is missing from
    /// the table. Both tables are compiled-in configuration.
    pub fn new(columns: &[(&'static str, &'static str)], problem: &[&'static str]) -> Self {
        let mut codes = BTreeMap::new();
        let mut seen = HashSet::new();
        for &(name, code) in columns {
            assert!(seen.insert(code), "duplicate column code {}", code);
            assert!(
                codes.insert(name, code).is_none(),
                "duplicate column name {}",
                name
            );
        }
        let problem: HashSet<&'static str> = problem.iter().copied().collect();
        for name in &problem {
            assert!(codes.contains_key(name), "problem column {} not in catalog", name);
        }
        Catalog { codes, problem }
    }

    /// Provider code for `field`, if the field is known.
    pub fn code(&self, field: &str) -> Option<&'static str> {
        self.codes.get(field).copied()
    }

    /// Canonical name and code for `field`, if the field is known.
    pub fn lookup(&self, field: &str) -> Option<(&'static str, &'static str)> {
        self.codes.get_key_value(field).map(|(name, code)| (*name, *code))
    }

    /// Whether `field` needs tail repair.
    pub fn is_problem(&self, field: &str) -> bool {
        self.problem.contains(field)
    }

    /// All field names, in stable (lexicographic) order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.codes.keys().copied()
    }

    /// All (name, code) pairs, in stable name order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.codes.iter().map(|(name, code)| (*name, *code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
