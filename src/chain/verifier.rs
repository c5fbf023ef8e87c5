use alloy::network::EthereumWallet;
use alloy::primitives::{Address, TxHash};
use alloy::providers::ProviderBuilder;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use tracing::info;

use crate::domain::{OnChainProofArgs, VerificationStatus, ZkpRequest};
use crate::infra::{Result, VerifierContract};

use super::{call_failed, confirmed, receipt_failed, send_failed, ChainConfig, IZKPVerifier};

/// [`VerifierContract`] backed by a JSON-RPC node
pub struct EthVerifierContract {
    config: ChainConfig,
}

impl EthVerifierContract {
    pub fn new(config: ChainConfig) -> Self {
        Self { config }
    }

    pub fn address(&self) -> Address {
        self.config.verifier_address
    }

    pub fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    /// Hex selector of `submitZKPResponse`, as wallets expect it in
    /// contract-invoke requests.
    pub fn submit_method_id() -> String {
        hex::encode(IZKPVerifier::submitZKPResponseCall::SELECTOR)
    }
}

#[async_trait]
impl VerifierContract for EthVerifierContract {
    async fn get_zkp_request(&self, request_id: u64) -> Result<ZkpRequest> {
        let provider = ProviderBuilder::new().on_http(self.config.url()?);
        let contract = IZKPVerifier::new(self.config.verifier_address, &provider);

        let request = contract
            .getZKPRequest(request_id)
            .call()
            .await
            .map_err(call_failed)?
            ._0;

        Ok(ZkpRequest {
            metadata: request.metadata,
            validator: request.validator,
            data: request.data,
        })
    }

    async fn get_proof_status(&self, sender: Address, request_id: u64) -> Result<VerificationStatus> {
        let provider = ProviderBuilder::new().on_http(self.config.url()?);
        let contract = IZKPVerifier::new(self.config.verifier_address, &provider);

        let status = contract
            .getProofStatus(sender, request_id)
            .call()
            .await
            .map_err(call_failed)?
            ._0;

        Ok(VerificationStatus {
            is_verified: status.isVerified,
            validator_version: status.validatorVersion,
            block_number: status.blockNumber,
            block_timestamp: status.blockTimestamp,
        })
    }

    async fn submit_zkp_response(&self, request_id: u64, args: &OnChainProofArgs) -> Result<TxHash> {
        info!(
            request_id,
            inputs = args.inputs.len(),
            verifier = %self.config.verifier_address,
            "Submitting ZKP response"
        );

        let signer = self.config.signer()?;
        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(EthereumWallet::from(signer))
            .on_http(self.config.url()?);

        let contract = IZKPVerifier::new(self.config.verifier_address, &provider);

        let tx = contract.submitZKPResponse(request_id, args.inputs.clone(), args.a, args.b, args.c);

        let pending = tx.send().await.map_err(send_failed)?;

        info!(tx_hash = %pending.tx_hash(), "Transaction sent");

        let receipt = pending
            .with_required_confirmations(self.config.required_confirmations)
            .with_timeout(self.config.confirmation_timeout)
            .get_receipt()
            .await
            .map_err(receipt_failed)?;

        confirmed(&receipt, "submitZKPResponse")
    }
}
