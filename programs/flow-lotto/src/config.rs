use std::{fmt, str::FromStr};

use anchor_lang::prelude::*;
use tracing::info;

use crate::{
    constants::MAX_TICKETS_PER_WALLET,
    error::LottoError,
    prize::PrizeShares,
    state::{TagEncoding, WalletAddress},
};

pub const NETWORK_ENV: &str = "LOTTO_NETWORK";
pub const CONTRACT_ADDRESS_ENV: &str = "LOTTO_CONTRACT_ADDRESS";
pub const TAG_ENCODING_ENV: &str = "LOTTO_TAG_ENCODING";

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Network {
    #[default]
    Emulator,
    Testnet,
    Mainnet,
}

impl Network {
    /// Block explorer root, `None` for the local emulator.
    pub fn explorer_base_url(&self) -> Option<&'static str> {
        match self {
            Network::Emulator => None,
            Network::Testnet => Some("https://testnet.flowscan.io"),
            Network::Mainnet => Some("https://flow-view-source.com"),
        }
    }
}

impl FromStr for Network {
    type Err = anchor_lang::error::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "emulator" | "local" => Ok(Network::Emulator),
            "testnet" => Ok(Network::Testnet),
            "mainnet" => Ok(Network::Mainnet),
            _ => err!(LottoError::UnknownNetwork),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Network::Emulator => "emulator",
            Network::Testnet => "testnet",
            Network::Mainnet => "mainnet",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    Account,
    Tx,
}

/// Resolved once at start-up and handed to whoever needs it.
#[derive(Clone, Debug, PartialEq)]
pub struct LottoConfig {
    pub network: Network,
    pub contract_address: Option<WalletAddress>,
    pub tag_encoding: TagEncoding,
    pub max_tickets_per_wallet: u64,
    pub prize_shares: PrizeShares,
}

impl LottoConfig {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            contract_address: None,
            tag_encoding: TagEncoding::default(),
            max_tickets_per_wallet: MAX_TICKETS_PER_WALLET,
            prize_shares: PrizeShares::default(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LottoConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let network = match lookup(NETWORK_ENV) {
            Some(raw) => raw.parse()?,
            None => Network::default(),
        };

        let mut config = Self::new(network);
        config.contract_address = lookup(CONTRACT_ADDRESS_ENV)
            .filter(|raw| !raw.trim().is_empty())
            .map(WalletAddress::new);

        if let Some(raw) = lookup(TAG_ENCODING_ENV) {
            config.tag_encoding = match raw.trim() {
                "5" | "five" => TagEncoding::FiveState,
                "4" | "four" => TagEncoding::FourState,
                _ => return err!(LottoError::UnknownLifecycleTag),
            };
        }

        info!(
            network = %config.network,
            contract = ?config.contract_address.as_ref().map(WalletAddress::as_str),
            encoding = ?config.tag_encoding,
            "lotto config resolved"
        );
        Ok(config)
    }

    /// Explorer URL for an account or transaction; `#` on the emulator.
    pub fn explorer_link(&self, id: &str, kind: LinkKind) -> String {
        let kind = match kind {
            LinkKind::Account => "account",
            LinkKind::Tx => "tx",
        };
        match self.network.explorer_base_url() {
            Some(base) => format!("{base}/{kind}/{id}"),
            None => "#".to_string(),
        }
    }
}
