//! Universe: the fixed, ordered instrument set of a run.

use crate::engine::error::PortfolioError;
use serde::{Deserialize, Serialize};

/// Ordered set of symbols traded in one backtest.
///
/// Established once at engine construction. Every per-instrument column in the
/// ledgers and snapshot records is indexed by a symbol's position here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Universe {
    symbols: Vec<String>,
}

impl Universe {
    /// Build a universe, rejecting an empty list or repeated symbols.
    pub fn new<I, S>(symbols: I) -> Result<Self, PortfolioError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let symbols: Vec<String> = symbols.into_iter().map(Into::into).collect();
        if symbols.is_empty() {
            return Err(PortfolioError::EmptyUniverse);
        }
        for (i, sym) in symbols.iter().enumerate() {
            if symbols[..i].contains(sym) {
                return Err(PortfolioError::DuplicateSymbol(sym.clone()));
            }
        }
        Ok(Self { symbols })
    }

    /// Column index of `symbol`.
    pub fn index_of(&self, symbol: &str) -> Result<usize, PortfolioError> {
        self.symbols
            .iter()
            .position(|s| s == symbol)
            .ok_or_else(|| PortfolioError::UnknownSymbol(symbol.to_string()))
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// First symbol; its latest bar timestamp keys each snapshot.
    pub fn primary(&self) -> &str {
        &self.symbols[0]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed universe.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl TryFrom<Vec<String>> for Universe {
    type Error = PortfolioError;

    fn try_from(symbols: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(symbols)
    }
}

impl From<Universe> for Vec<String> {
    fn from(universe: Universe) -> Self {
        universe.symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order() {
        let u = Universe::new(["EURUSD", "GBPUSD", "USDJPY"]).unwrap();
        assert_eq!(u.symbols(), &["EURUSD", "GBPUSD", "USDJPY"]);
        assert_eq!(u.index_of("GBPUSD").unwrap(), 1);
        assert_eq!(u.primary(), "EURUSD");
        assert_eq!(u.len(), 3);
    }

    #[test]
    fn rejects_empty() {
        let empty: Vec<String> = Vec::new();
        assert!(matches!(Universe::new(empty), Err(PortfolioError::EmptyUniverse)));
    }

    #[test]
    fn rejects_duplicates() {
        let err = Universe::new(["SPY", "QQQ", "SPY"]).unwrap_err();
        assert!(matches!(err, PortfolioError::DuplicateSymbol(ref s) if s == "SPY"));
    }

    #[test]
    fn deserialization_validates() {
        let u: Universe = serde_json::from_str(r#"["A","B"]"#).unwrap();
        assert_eq!(u.primary(), "A");
        assert!(serde_json::from_str::<Universe>("[]").is_err());
        assert!(serde_json::from_str::<Universe>(r#"["A","A"]"#).is_err());
        assert_eq!(serde_json::to_string(&u).unwrap(), r#"["A","B"]"#);
    }

    #[test]
    fn unknown_symbol_is_an_error() {
        let u = Universe::new(["SPY"]).unwrap();
        assert!(matches!(u.index_of("QQQ"), Err(PortfolioError::UnknownSymbol(_))));
    }
}
