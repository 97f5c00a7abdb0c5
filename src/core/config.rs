//! Game and network configuration.
//!
//! - `GameConfig`: dealing, penalty and recycling rules
//! - `NetConfig`: where and how long to wait for the peer
//!
//! Both peers must agree on `GameConfig::chain_penalty`, `hand_size` and
//! `recycle`; none of them is sent over the wire. The session logs the local
//! values and warns when they differ from the standard rules.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the discard pile is turned into a new draw pile when the draw pile
/// runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecycleOrder {
    /// Keep the discard order: the oldest discard is drawn first.
    #[default]
    Preserve,
    /// Shuffle the recycled cards.
    ///
    /// The reshuffled order is never sent over the wire. Both peers seed
    /// the recycle RNG from the synchronized draw pile, so they reshuffle
    /// identically as long as both run with this setting.
    Shuffle,
}

/// Rules configuration for one hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt to each seat.
    pub hand_size: usize,

    /// Cards drawn per pending seven when a chain resolves.
    pub chain_penalty: usize,

    /// Refill ordering for the draw pile.
    pub recycle: RecycleOrder,

    /// Seed for the dealing RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: 7,
            chain_penalty: 2,
            recycle: RecycleOrder::Preserve,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of cards dealt per seat.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Set the per-seven penalty.
    #[must_use]
    pub fn with_chain_penalty(mut self, cards: usize) -> Self {
        self.chain_penalty = cards;
        self
    }

    /// Set the recycle ordering.
    #[must_use]
    pub fn with_recycle(mut self, recycle: RecycleOrder) -> Self {
        self.recycle = recycle;
        self
    }

    /// Fix the dealing seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether the unsent rules match the defaults. The seed does not count;
    /// only seat 0 uses it.
    #[must_use]
    pub fn is_standard(&self) -> bool {
        let standard = Self::default();
        self.hand_size == standard.hand_size
            && self.chain_penalty == standard.chain_penalty
            && self.recycle == standard.recycle
    }
}

/// Port both peers use unless configured otherwise.
pub const DEFAULT_PORT: u16 = 7777;

/// Connection setup configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetConfig {
    /// Peer host to connect to when joining.
    pub host: String,

    /// Port to listen on or connect to.
    pub port: u16,

    /// How long the hosting side waits for the peer to connect.
    pub accept_timeout: Duration,

    /// Pause between failed connection attempts when joining.
    pub connect_retry: Duration,

    /// Give up after this many failed attempts. `None` retries forever.
    pub connect_attempts: Option<u32>,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            accept_timeout: Duration::from_secs(30),
            connect_retry: Duration::from_secs(30),
            connect_attempts: None,
        }
    }
}

impl NetConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the peer host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the accept timeout.
    #[must_use]
    pub fn with_accept_timeout(mut self, timeout: Duration) -> Self {
        self.accept_timeout = timeout;
        self
    }

    /// Set the retry pause and attempt limit for joining.
    #[must_use]
    pub fn with_connect_retry(mut self, pause: Duration, attempts: Option<u32>) -> Self {
        self.connect_retry = pause;
        self.connect_attempts = attempts;
        self
    }

    /// `host:port` string for connecting.
    #[must_use]
    pub fn peer_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config_defaults() {
        let config = GameConfig::default();

        assert_eq!(config.hand_size, 7);
        assert_eq!(config.chain_penalty, 2);
        assert_eq!(config.recycle, RecycleOrder::Preserve);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_game_config_builder() {
        let config = GameConfig::new()
            .with_hand_size(5)
            .with_chain_penalty(3)
            .with_recycle(RecycleOrder::Shuffle)
            .with_seed(99);

        assert_eq!(config.hand_size, 5);
        assert_eq!(config.chain_penalty, 3);
        assert_eq!(config.recycle, RecycleOrder::Shuffle);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_standard_rules_ignore_seed() {
        assert!(GameConfig::new().is_standard());
        assert!(GameConfig::new().with_seed(3).is_standard());
        assert!(!GameConfig::new().with_hand_size(5).is_standard());
        assert!(!GameConfig::new().with_chain_penalty(3).is_standard());
        assert!(!GameConfig::new().with_recycle(RecycleOrder::Shuffle).is_standard());
    }

    #[test]
    fn test_game_config_serde() {
        let config = GameConfig::new().with_seed(1);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_net_config() {
        let config = NetConfig::new()
            .with_host("10.0.0.2")
            .with_port(9000)
            .with_accept_timeout(Duration::from_secs(5))
            .with_connect_retry(Duration::from_millis(250), Some(4));

        assert_eq!(config.peer_addr(), "10.0.0.2:9000");
        assert_eq!(config.accept_timeout, Duration::from_secs(5));
        assert_eq!(config.connect_attempts, Some(4));
        assert_eq!(NetConfig::default().port, DEFAULT_PORT);
    }
}
