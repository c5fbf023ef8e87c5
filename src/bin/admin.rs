use std::collections::VecDeque;

use alloy::primitives::Address;

use zk_claim_orchestrator::chain::{ChainConfig, EthRewardContract, EthVerifierContract};
use zk_claim_orchestrator::config::{did_method_networks, EnvironmentConfig};
use zk_claim_orchestrator::crypto::{bind_hex, encode};
use zk_claim_orchestrator::domain::{Did, GeneratedProof, TransactionData};
use zk_claim_orchestrator::infra::{AgentConfig, RpcIdentityAgent, VerifierContract};
use zk_claim_orchestrator::request::{
    build_authorization_message, build_contract_invoke_request, linked_multi_query, ClaimTemplate,
};
use zk_claim_orchestrator::telemetry::{init_telemetry, TelemetryConfig};
use zk_claim_orchestrator::{ClaimConfig, ClaimOrchestrator};

fn print_help() {
    eprintln!(
        "\
zk-claim-admin

USAGE:
  zk-claim-admin <command> [options]

COMMANDS:
  challenge                  Print the challenge bound to an address
  encode-proof               Encode a generated proof as verifier calldata
  auth-request               Print an authorization request message
  contract-invoke-request    Print a contract-invoke request for the verifier
  status                     Read the on-chain proof status
  run-claim                  Run a full claim against the configured verifier
  submit                     Submit a proof generated elsewhere

challenge OPTIONS:
  --address <hex>            (required) 20-byte address

encode-proof OPTIONS:
  --proof <path>             (required) JSON file with {{proof, pub_signals}}

auth-request OPTIONS:
  --from <did>               (required) Verifier DID
  --circuit <flow>           sig | mtp | v3 | sd | linked (default: linked)
  --request-id <n>           (default: 1)
  --callback-url <url>       (default: empty)
  --reason <text>            (default: \"age verification\")
  --message <text>           (default: empty)

contract-invoke-request OPTIONS:
  --circuit <flow>           sig | mtp | v3 | sd (default: sig)
  --request-id <n>           (defaults to the configured id for the flow)

status OPTIONS:
  --request-id <n>           (required)
  --actor <address>          (defaults to the WALLET_KEY address)

run-claim OPTIONS:
  --circuit <flow>           sig | mtp | v3 | sd (default: sig)
  --request-id <n>           (defaults to the configured id for the flow)

submit OPTIONS:
  --proof <path>             (required) JSON file with {{proof, pub_signals}}
  --request-id <n>           (required)
  --circuit <flow>           (required) Flow the proof was generated for

ENVIRONMENT:
  RPC_URL, WALLET_KEY, CHAIN_ID, ERC20_VERIFIER_ADDRESS, ERC20_ZK_AIRDROP_ADDRESS,
  ERC20_VERIFIER, ERC20_VERIFIER_DID, IDENTITY_AGENT_URL, RHS_MODE, RHS_URL,
  RHS_ADDRESS, IS_OLD_STATE_GENESIS, SKIP_REVOCATION_CHECK,
  CONFIRMATION_TIMEOUT_SECS, REQUIRED_CONFIRMATIONS,
  TRANSFER_REQUEST_ID_SIG_VALIDATOR, TRANSFER_REQUEST_ID_MTP_VALIDATOR,
  TRANSFER_REQUEST_ID_V3, LOG_LEVEL, LOG_JSON
"
    );
}

fn next_value(args: &mut VecDeque<String>, flag: &str) -> anyhow::Result<String> {
    args.pop_front()
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn parse_template(raw: &str) -> anyhow::Result<ClaimTemplate> {
    ClaimTemplate::parse(raw).ok_or_else(|| anyhow::anyhow!("unknown flow: {raw}"))
}

fn require_chain_config() -> anyhow::Result<ChainConfig> {
    ChainConfig::from_env()?.ok_or_else(|| {
        anyhow::anyhow!("RPC_URL, WALLET_KEY and ERC20_VERIFIER_ADDRESS must be set")
    })
}

fn require_agent() -> anyhow::Result<RpcIdentityAgent> {
    let config = AgentConfig::from_env()
        .ok_or_else(|| anyhow::anyhow!("IDENTITY_AGENT_URL must be set"))?;
    Ok(RpcIdentityAgent::connect(&config)?)
}

fn read_proof(path: &str) -> anyhow::Result<GeneratedProof> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {path}: {e}"))?;
    Ok(serde_json::from_str(&raw)?)
}

fn network_name(chain_id: u64) -> String {
    match chain_id {
        11155420 => "opt-sepolia".to_string(),
        10 => "opt-mainnet".to_string(),
        other => other.to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args: VecDeque<String> = std::env::args().skip(1).collect();
    let Some(command) = args.pop_front() else {
        print_help();
        return Ok(());
    };

    if matches!(command.as_str(), "-h" | "--help" | "help") {
        print_help();
        return Ok(());
    }

    init_telemetry(&TelemetryConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    match command.as_str() {
        "challenge" => {
            let mut address: Option<String> = None;
            while let Some(arg) = args.pop_front() {
                match arg.as_str() {
                    "--address" => address = Some(next_value(&mut args, "--address")?),
                    "-h" | "--help" => {
                        print_help();
                        return Ok(());
                    }
                    other => anyhow::bail!("unexpected argument: {other}"),
                }
            }

            let address = address.ok_or_else(|| anyhow::anyhow!("--address is required"))?;
            println!("{}", bind_hex(&address)?);
            Ok(())
        }
        "encode-proof" => {
            let mut proof_path: Option<String> = None;
            while let Some(arg) = args.pop_front() {
                match arg.as_str() {
                    "--proof" => proof_path = Some(next_value(&mut args, "--proof")?),
                    "-h" | "--help" => {
                        print_help();
                        return Ok(());
                    }
                    other => anyhow::bail!("unexpected argument: {other}"),
                }
            }

            let proof_path = proof_path.ok_or_else(|| anyhow::anyhow!("--proof is required"))?;
            let proof = read_proof(&proof_path)?;
            println!("{}", serde_json::to_string_pretty(&encode(&proof))?);
            Ok(())
        }
        "auth-request" => {
            let mut from: Option<String> = None;
            let mut flow = "linked".to_string();
            let mut request_id: u64 = 1;
            let mut callback_url = String::new();
            let mut reason = "age verification".to_string();
            let mut message = String::new();

            while let Some(arg) = args.pop_front() {
                match arg.as_str() {
                    "--from" => from = Some(next_value(&mut args, "--from")?),
                    "--circuit" => flow = next_value(&mut args, "--circuit")?,
                    "--request-id" => {
                        let raw = next_value(&mut args, "--request-id")?;
                        request_id = raw
                            .parse()
                            .map_err(|_| anyhow::anyhow!("invalid --request-id: {raw}"))?;
                    }
                    "--callback-url" => callback_url = next_value(&mut args, "--callback-url")?,
                    "--reason" => reason = next_value(&mut args, "--reason")?,
                    "--message" => message = next_value(&mut args, "--message")?,
                    "-h" | "--help" => {
                        print_help();
                        return Ok(());
                    }
                    other => anyhow::bail!("unexpected argument: {other}"),
                }
            }

            let from = Did::new(from.ok_or_else(|| anyhow::anyhow!("--from is required"))?);
            let scope = if flow == "linked" {
                linked_multi_query(request_id, 0).to_vec()
            } else {
                vec![parse_template(&flow)?.request(request_id)]
            };

            let msg = build_authorization_message(&from, scope, callback_url, reason, message);
            println!("{}", serde_json::to_string_pretty(&msg)?);
            Ok(())
        }
        "contract-invoke-request" => {
            let mut flow = "sig".to_string();
            let mut request_id: Option<u64> = None;
            while let Some(arg) = args.pop_front() {
                match arg.as_str() {
                    "--circuit" => flow = next_value(&mut args, "--circuit")?,
                    "--request-id" => {
                        let raw = next_value(&mut args, "--request-id")?;
                        request_id = Some(
                            raw.parse()
                                .map_err(|_| anyhow::anyhow!("invalid --request-id: {raw}"))?,
                        );
                    }
                    "-h" | "--help" => {
                        print_help();
                        return Ok(());
                    }
                    other => anyhow::bail!("unexpected argument: {other}"),
                }
            }

            let template = parse_template(&flow)?;
            let env = EnvironmentConfig::from_env()?;
            let chain = require_chain_config()?;
            let request_id = request_id.unwrap_or_else(|| env.request_ids.for_template(template));

            let transaction_data = TransactionData {
                contract_address: chain.verifier_address.to_string(),
                method_id: EthVerifierContract::submit_method_id(),
                chain_id: chain.chain_id,
                network: network_name(chain.chain_id),
            };
            let msg = build_contract_invoke_request(
                transaction_data,
                vec![template.request(request_id)],
                "airdrop participation",
            );
            println!("{}", serde_json::to_string_pretty(&msg)?);
            Ok(())
        }
        "status" => {
            let mut request_id: Option<u64> = None;
            let mut actor: Option<Address> = None;
            while let Some(arg) = args.pop_front() {
                match arg.as_str() {
                    "--request-id" => {
                        let raw = next_value(&mut args, "--request-id")?;
                        request_id = Some(
                            raw.parse()
                                .map_err(|_| anyhow::anyhow!("invalid --request-id: {raw}"))?,
                        );
                    }
                    "--actor" => {
                        let raw = next_value(&mut args, "--actor")?;
                        actor = Some(
                            raw.parse()
                                .map_err(|_| anyhow::anyhow!("invalid --actor: {raw}"))?,
                        );
                    }
                    "-h" | "--help" => {
                        print_help();
                        return Ok(());
                    }
                    other => anyhow::bail!("unexpected argument: {other}"),
                }
            }

            let request_id =
                request_id.ok_or_else(|| anyhow::anyhow!("--request-id is required"))?;
            let chain = require_chain_config()?;
            let actor = match actor {
                Some(actor) => actor,
                None => chain.signer_address()?,
            };

            let verifier = EthVerifierContract::new(chain);
            let status = verifier.get_proof_status(actor, request_id).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        }
        "run-claim" => {
            let mut flow = "sig".to_string();
            let mut request_id: Option<u64> = None;
            while let Some(arg) = args.pop_front() {
                match arg.as_str() {
                    "--circuit" => flow = next_value(&mut args, "--circuit")?,
                    "--request-id" => {
                        let raw = next_value(&mut args, "--request-id")?;
                        request_id = Some(
                            raw.parse()
                                .map_err(|_| anyhow::anyhow!("invalid --request-id: {raw}"))?,
                        );
                    }
                    "-h" | "--help" => {
                        print_help();
                        return Ok(());
                    }
                    other => anyhow::bail!("unexpected argument: {other}"),
                }
            }

            let template = parse_template(&flow)?;
            let env = EnvironmentConfig::from_env()?;
            let chain = require_chain_config()?;
            let agent = require_agent()?;
            agent.register_did_networks(&did_method_networks()).await?;

            let mut config = ClaimConfig::from_environment(&env, template);
            if let Some(request_id) = request_id {
                config.request.id = request_id;
            }

            let actor = chain.signer_address()?;
            let orchestrator = ClaimOrchestrator::new(
                agent.clone(),
                agent,
                EthVerifierContract::new(chain.clone()),
                EthRewardContract::new(chain),
                config,
            );

            let outcome = orchestrator.run_claim(actor).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        "submit" => {
            let mut proof_path: Option<String> = None;
            let mut request_id: Option<u64> = None;
            let mut flow: Option<String> = None;
            while let Some(arg) = args.pop_front() {
                match arg.as_str() {
                    "--proof" => proof_path = Some(next_value(&mut args, "--proof")?),
                    "--request-id" => {
                        let raw = next_value(&mut args, "--request-id")?;
                        request_id = Some(
                            raw.parse()
                                .map_err(|_| anyhow::anyhow!("invalid --request-id: {raw}"))?,
                        );
                    }
                    "--circuit" => flow = Some(next_value(&mut args, "--circuit")?),
                    "-h" | "--help" => {
                        print_help();
                        return Ok(());
                    }
                    other => anyhow::bail!("unexpected argument: {other}"),
                }
            }

            let proof_path = proof_path.ok_or_else(|| anyhow::anyhow!("--proof is required"))?;
            let request_id =
                request_id.ok_or_else(|| anyhow::anyhow!("--request-id is required"))?;
            let template =
                parse_template(&flow.ok_or_else(|| anyhow::anyhow!("--circuit is required"))?)?;

            let proof = read_proof(&proof_path)?;
            let env = EnvironmentConfig::from_env()?;
            let chain = require_chain_config()?;
            let agent = require_agent()?;

            let config = ClaimConfig::from_environment(&env, template);
            let request = template.request(request_id);
            let actor = chain.signer_address()?;
            let orchestrator = ClaimOrchestrator::new(
                agent.clone(),
                agent,
                EthVerifierContract::new(chain.clone()),
                EthRewardContract::new(chain),
                config,
            );

            let outcome = orchestrator.submit_generated(actor, &request, proof).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(())
        }
        other => {
            print_help();
            anyhow::bail!("unknown command: {other}")
        }
    }
}
