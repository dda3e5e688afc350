use alloy_sol_types::{Revert, SolError as _};
use headsmith_challenge::{
    BoxedError, CallOutcome, ChainReader, ChainWriter, ContractCall, EthRpcChain, PollPolicy,
    ReceiptTimeoutError, chain::RawRequestError,
};
use headsmith_primitives::{Address, Bytes, address, b256, bytes, hex};
use headsmith_rpc_eth::client::EthRpcClient;
use mockito::Matcher;
use serde_json::json;

const ACCOUNT: Address = address!("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
const CONTRACT: Address = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");

fn new_chain(url: &str) -> EthRpcChain {
    let client = EthRpcClient::new(url, None).expect("url ok");
    EthRpcChain::new(client, ACCOUNT).with_receipt_polling(PollPolicy {
        interval_ms: 0,
        max_polls: 2,
    })
}

fn response(id: u64, result: serde_json::Value) -> String {
    json!({ "jsonrpc": "2.0", "id": id, "result": result }).to_string()
}

fn error_response(code: i64, message: &str, data: Option<String>) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": 0,
        "error": { "code": code, "message": message, "data": data },
    })
    .to_string()
}

fn mint_call() -> ContractCall {
    ContractCall {
        from: ACCOUNT,
        to: CONTRACT,
        data: bytes!("0x12345678"),
    }
}

#[tokio::test]
async fn simulate_call_on_block() -> Result<(), BoxedError> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_call",
            "params": [{ "from": ACCOUNT, "to": CONTRACT, "data": "0x12345678" }, "0x68"],
        })))
        .with_status(200)
        .with_body(response(0, json!("0x")))
        .create_async()
        .await;

    let outcome = new_chain(&server.url())
        .simulate_call(&mint_call(), Some(0x68))
        .await?;
    assert_eq!(outcome, CallOutcome::Success(Bytes::new()));

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn simulate_call_decodes_revert_reason() -> Result<(), BoxedError> {
    let mut server = mockito::Server::new_async().await;

    let revert = Revert {
        reason: "Invalid block header".to_owned(),
    };
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(error_response(
            3,
            "execution reverted",
            Some(hex::encode_prefixed(revert.abi_encode())),
        ))
        .create_async()
        .await;

    let outcome = new_chain(&server.url())
        .simulate_call(&mint_call(), None)
        .await?;
    assert_eq!(
        outcome,
        CallOutcome::Reverted("Invalid block header".to_owned())
    );

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn simulate_call_falls_back_to_message() -> Result<(), BoxedError> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(error_response(-32000, "out of gas", None))
        .create_async()
        .await;

    let outcome = new_chain(&server.url())
        .simulate_call(&mint_call(), None)
        .await?;
    assert_eq!(outcome, CallOutcome::Reverted("out of gas".to_owned()));

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn raw_request_reports_rejection() -> Result<(), BoxedError> {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "method": "debug_getRawHeader" })))
        .with_status(200)
        .with_body(error_response(
            -32601,
            "the method debug_getRawHeader does not exist/is not available",
            None,
        ))
        .create_async()
        .await;

    let result = new_chain(&server.url())
        .raw_request("debug_getRawHeader", vec![json!("0x01")])
        .await;

    assert!(matches!(
        result,
        Err(RawRequestError::Rejected { code: -32601, .. })
    ));

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn deploy_sends_creation_without_recipient() -> Result<(), BoxedError> {
    let mut server = mockito::Server::new_async().await;

    let transaction_hash =
        b256!("0xc008e9f9bb92057dd0035496fbf4fb54f66b4b18b370928e46d6603933022222");
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "eth_sendTransaction",
            "params": [{ "from": ACCOUNT, "data": "0x6080" }],
        })))
        .with_status(200)
        .with_body(response(0, json!(transaction_hash)))
        .create_async()
        .await;

    let chain = new_chain(&server.url());
    assert_eq!(chain.deploy_contract(bytes!("0x6080")).await?, transaction_hash);

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn failed_receipt_is_reported() -> Result<(), BoxedError> {
    let mut server = mockito::Server::new_async().await;

    let transaction_hash =
        b256!("0xc008e9f9bb92057dd0035496fbf4fb54f66b4b18b370928e46d6603933022222");
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(response(
            0,
            json!({
                "transactionHash": transaction_hash,
                "blockNumber": "0x10",
                "contractAddress": null,
                "status": "0x0",
            }),
        ))
        .create_async()
        .await;

    let receipt = new_chain(&server.url())
        .wait_for_receipt(transaction_hash)
        .await?;
    assert_eq!(receipt.block_number, 0x10);
    assert!(!receipt.success);

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn pending_receipt_times_out() -> Result<(), BoxedError> {
    let mut server = mockito::Server::new_async().await;

    let transaction_hash =
        b256!("0xc008e9f9bb92057dd0035496fbf4fb54f66b4b18b370928e46d6603933022222");
    let mut mocks = Vec::new();
    for id in 0..2 {
        mocks.push(
            server
                .mock("POST", "/")
                .match_body(Matcher::PartialJson(json!({ "id": id })))
                .with_status(200)
                .with_body(response(id, serde_json::Value::Null))
                .create_async()
                .await,
        );
    }

    let error = new_chain(&server.url())
        .wait_for_receipt(transaction_hash)
        .await
        .expect_err("receipt is pending");

    let timeout = error
        .downcast_ref::<ReceiptTimeoutError>()
        .expect("timeout error");
    assert_eq!(timeout.polls, 2);

    for mock in mocks {
        mock.assert_async().await;
    }
    Ok(())
}
