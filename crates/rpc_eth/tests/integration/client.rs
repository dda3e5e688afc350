use headsmith_block_header::{Era, RemoteBlockHeader};
use headsmith_primitives::{B256, Bytes, address, b256};
use headsmith_rpc_eth::{
    BlockSpec, CallRequest, TransactionRequest,
    client::{EthRpcClient, RpcClientError},
};
use headsmith_test_utils::fixtures;
use mockito::Matcher;
use reqwest::StatusCode;
use serde_json::json;

fn new_client(url: &str) -> EthRpcClient {
    EthRpcClient::new(url, None).expect("url ok")
}

fn success_body(result: serde_json::Value) -> String {
    json!({ "jsonrpc": "2.0", "id": 0, "result": result }).to_string()
}

#[tokio::test]
async fn send_request_body_400_status() -> anyhow::Result<()> {
    const STATUS_CODE: u16 = 400;

    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_status(STATUS_CODE.into())
        .with_header("content-type", "text/plain")
        .create_async()
        .await;

    let hash = b256!("0xc008e9f9bb92057dd0035496fbf4fb54f66b4b18b370928e46d6603933022222");

    let error = new_client(&server.url())
        .get_transaction_receipt(hash)
        .await
        .expect_err("should have failed to due to a HTTP status error");

    if let RpcClientError::HttpStatus(error) = error {
        assert_eq!(
            reqwest::Error::from(error).status(),
            Some(StatusCode::from_u16(STATUS_CODE)?)
        );
    } else {
        unreachable!("Invalid error: {error}");
    }

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn get_block_by_number_reproduces_hash() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getBlockByNumber",
            "params": ["0x1", false],
        })))
        .with_status(200)
        .with_body(success_body(fixtures::cancun_block()))
        .create_async()
        .await;

    let block = new_client(&server.url())
        .get_block_by_number(BlockSpec::Number(1))
        .await?
        .expect("block exists");

    let header = RemoteBlockHeader::from(block);
    assert_eq!(header.hash, Some(fixtures::CANCUN_BLOCK_HASH));
    assert!(header.matches_reported_hash(Era::Cancun));

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn get_block_by_number_unknown_block() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(success_body(serde_json::Value::Null))
        .create_async()
        .await;

    let block = new_client(&server.url())
        .get_block_by_number(BlockSpec::Number(u64::MAX >> 1))
        .await?;

    assert!(block.is_none());
    Ok(())
}

#[tokio::test]
async fn call_returns_data() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let to = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_call",
            "params": [{ "to": to, "data": "0x8b1329e0" }, "0x1b4"],
        })))
        .with_status(200)
        .with_body(success_body(json!("0x01")))
        .create_async()
        .await;

    let result = new_client(&server.url())
        .call(
            CallRequest {
                to: Some(to),
                data: Some(Bytes::from_static(&[0x8b, 0x13, 0x29, 0xe0])),
                ..CallRequest::default()
            },
            BlockSpec::Number(0x1b4),
        )
        .await?;

    assert_eq!(result, Bytes::from_static(&[0x01]));
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn call_revert_is_json_rpc_error() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(
            json!({
                "jsonrpc": "2.0",
                "id": 0,
                "error": { "code": 3, "message": "execution reverted", "data": "0x" },
            })
            .to_string(),
        )
        .create_async()
        .await;

    let error = new_client(&server.url())
        .call(CallRequest::default(), BlockSpec::latest())
        .await
        .expect_err("should revert");

    let rpc_error = error.as_json_rpc_error().expect("JSON-RPC error");
    assert_eq!(rpc_error.code, 3);
}

#[tokio::test]
async fn send_transaction_and_receipt() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let transaction_hash =
        b256!("0xc008e9f9bb92057dd0035496fbf4fb54f66b4b18b370928e46d6603933022222");
    let from = address!("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");

    let send_mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_sendTransaction",
            "params": [{ "from": from }],
        })))
        .with_status(200)
        .with_body(success_body(json!(transaction_hash)))
        .create_async()
        .await;

    let client = new_client(&server.url());
    let hash = client
        .send_transaction(TransactionRequest {
            from,
            ..TransactionRequest::default()
        })
        .await?;
    assert_eq!(hash, transaction_hash);
    send_mock.assert_async().await;

    let receipt_mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getTransactionReceipt",
            "params": [transaction_hash],
        })))
        .with_status(200)
        .with_body(
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "result": {
                    "transactionHash": transaction_hash,
                    "blockNumber": "0x2a",
                    "contractAddress": "0x5fbdb2315678afecb367f032d93f642f64180aa3",
                    "status": "0x1",
                },
            })
            .to_string(),
        )
        .create_async()
        .await;

    let receipt = client
        .get_transaction_receipt(hash)
        .await?
        .expect("receipt exists");
    assert!(receipt.is_success());
    assert_eq!(receipt.block_number, Some(42));
    assert_eq!(
        receipt.contract_address,
        Some(address!("0x5fbdb2315678afecb367f032d93f642f64180aa3"))
    );

    receipt_mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn get_storage_at_returns_word() -> anyhow::Result<()> {
    let mut server = mockito::Server::new_async().await;

    let contract = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");
    let _mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_getStorageAt",
            "params": [contract, "0x0", "latest"],
        })))
        .with_status(200)
        .with_body(success_body(json!(
            "0x000000000000000000000000000000000000000000000000000000000000002a"
        )))
        .create_async()
        .await;

    let value = new_client(&server.url())
        .get_storage_at(
            contract,
            headsmith_primitives::U256::ZERO,
            BlockSpec::latest(),
        )
        .await?;

    assert_eq!(value, B256::with_last_byte(0x2a));
    Ok(())
}

#[cfg(feature = "test-remote")]
mod alchemy {
    use headsmith_test_utils::env::RemoteNode;

    use super::*;

    #[tokio::test]
    async fn mainnet_genesis_reproduces_hash() -> anyhow::Result<()> {
        let client = new_client(&RemoteNode::EthereumMainnet.url());

        let block = client
            .get_block_by_number(BlockSpec::Number(0))
            .await?
            .expect("genesis exists");

        let header = RemoteBlockHeader::from(block);
        assert_eq!(header.hash, Some(fixtures::MAINNET_GENESIS_HASH));
        assert!(header.matches_reported_hash(Era::PreLondon));
        Ok(())
    }

    #[tokio::test]
    async fn chain_id() -> anyhow::Result<()> {
        let client = new_client(&RemoteNode::EthereumSepolia.url());
        assert_eq!(client.chain_id().await?, 11_155_111);
        Ok(())
    }

    #[tokio::test]
    async fn op_block_reproduces_hash() -> anyhow::Result<()> {
        let client = new_client(&RemoteNode::OpMainnet.url());

        let number = client.block_number().await?;
        let block = client
            .get_block_by_number(BlockSpec::Number(number))
            .await?
            .expect("latest block exists");

        let header = RemoteBlockHeader::from(block);
        let era = Era::from_fields(&header.fields).expect("canonical shape");
        assert!(header.matches_reported_hash(era));
        Ok(())
    }
}
