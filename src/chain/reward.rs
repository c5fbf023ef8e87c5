use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::ProviderBuilder;
use async_trait::async_trait;
use tracing::info;

use crate::infra::{Result, RewardContract};

use super::{call_failed, confirmed, receipt_failed, send_failed, ChainConfig, IERC20ZkAirdrop};

/// [`RewardContract`] backed by a JSON-RPC node
pub struct EthRewardContract {
    config: ChainConfig,
}

impl EthRewardContract {
    pub fn new(config: ChainConfig) -> Self {
        Self { config }
    }

    pub fn address(&self) -> Address {
        self.config.reward_address
    }
}

#[async_trait]
impl RewardContract for EthRewardContract {
    async fn balance_of(&self, account: Address) -> Result<U256> {
        let provider = ProviderBuilder::new().on_http(self.config.url()?);
        let contract = IERC20ZkAirdrop::new(self.config.reward_address, &provider);

        let balance = contract
            .balanceOf(account)
            .call()
            .await
            .map_err(call_failed)?;

        Ok(balance._0)
    }

    async fn mint(&self, to: Address) -> Result<TxHash> {
        info!(to = %to, token = %self.config.reward_address, "Minting reward");

        let signer = self.config.signer()?;
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(EthereumWallet::from(signer))
            .on_http(self.config.url()?);

        let contract = IERC20ZkAirdrop::new(self.config.reward_address, &provider);

        let pending = contract.mint(to).send().await.map_err(send_failed)?;

        info!(tx_hash = %pending.tx_hash(), "Transaction sent");

        let receipt = pending
            .with_required_confirmations(self.config.required_confirmations)
            .with_timeout(self.config.confirmation_timeout)
            .get_receipt()
            .await
            .map_err(receipt_failed)?;

        confirmed(&receipt, "mint")
    }
}
