use serde::{Deserialize, Serialize};

/// A selectable asset, identified by its price-feed id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Identifier understood by the price-quote service (e.g. `ethereum`).
    pub id: String,
    pub name: String,
    pub symbol: String,
}

impl Token {
    pub fn new(id: impl Into<String>, name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            symbol: symbol.into(),
        }
    }
}

/// Ordered list of tokens offered for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCatalog {
    tokens: Vec<Token>,
}

impl TokenCatalog {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Finds a token by id or symbol, ignoring case.
    pub fn find(&self, key: &str) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|t| t.id.eq_ignore_ascii_case(key) || t.symbol.eq_ignore_ascii_case(key))
    }
}

impl Default for TokenCatalog {
    fn default() -> Self {
        Self::new(vec![
            Token::new("ethereum", "Ethereum", "ETH"),
            Token::new("bitcoin", "Bitcoin", "BTC"),
            Token::new("solana", "Solana", "SOL"),
            Token::new("arbitrum", "Arbitrum", "ARB"),
            Token::new("optimism", "Optimism", "OP"),
            Token::new("chainlink", "Chainlink", "LINK"),
            Token::new("uniswap", "Uniswap", "UNI"),
        ])
    }
}
